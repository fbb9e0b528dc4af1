//! Matching Module: Bottleneck Matching via Parametric Max-Flow
//!
//! The bottleneck distance between diagrams X and Y is
//!
//!   d_B(X, Y) = min over matchings η of  max over x of ‖x - η(x)‖∞
//!
//! where points may also be matched to the diagonal. It is computed in
//! three steps:
//!
//! 1. `cost_matrix`: augmented (M+1)×(N+1) matrix D of all pair costs
//! 2. `feasibility` + `search`: bisection over the distinct values of D,
//!    each probe asking a max-flow oracle whether a perfect matching exists
//!    using only pairs of cost ≤ d
//! 3. `reconstruct`: read the matched pairs off the winning flow

mod cost_matrix;
mod feasibility;
mod search;
mod reconstruct;

pub use cost_matrix::CostMatrix;
pub use feasibility::{CrossEdge, FeasibilityGraph};
pub use search::{minimum_feasible_threshold, Probe, SearchOutcome};
pub use reconstruct::{BottleneckMatching, MatchEntry, MatchingMap};
