//! Flow Module: Maximum Flow on Integer-Capacity Networks
//!
//! The bottleneck search only needs a yes/no answer per threshold plus the
//! routing of the final flow, so the solver sits behind the
//! [`MaxFlowOracle`] trait. Any exact engine can be plugged in.
//!
//! ## Engines
//!
//! - [`Dinic`]: level graph + blocking flow (default)
//! - [`EdmondsKarp`]: BFS shortest augmenting paths
//!
//! Both keep capacities as `u64` and only ever push whole units, so the
//! flows they return are integral.

mod network;
mod residual;
mod dinic;
mod edmonds_karp;

pub use network::{Edge, EdgeId, FlowNetwork, FlowSolution, MaxFlowOracle};
pub use dinic::Dinic;
pub use edmonds_karp::EdmondsKarp;
