//! # TDA-Bottleneck
//!
//! Bottleneck distance between persistence diagrams, with the optimal
//! matching that realizes it.
//!
//! ## Definition
//!
//! For diagrams X and Y, each augmented with every point of the diagonal
//! Δ = {(t, t)}, the bottleneck distance is
//!
//!   d_B(X, Y) = inf over bijections η: X ∪ Δ → Y ∪ Δ of sup ‖x - η(x)‖∞
//!
//! A point (b, d) is (d - b)/2 away from the diagonal in the L∞ norm, so
//! short-lived features are cheap to discard while long-lived ones must be
//! matched to something similar.
//!
//! ## Methodology
//!
//! 1. **Augmented cost matrix**: (M+1)×(N+1) matrix of L∞ pair costs, with
//!    one extra row and column standing for each diagram's diagonal
//!
//! 2. **Parametric search**: the answer is one of the matrix entries, so
//!    the sorted distinct entries are bisected
//!
//! 3. **Max-flow feasibility**: at each candidate d, a unit-capacity flow
//!    network admits flow M+N iff a perfect matching using only pairs of
//!    cost ≤ d exists
//!
//! 4. **Matching reconstruction**: the saturating flow at the minimum
//!    feasible d names each point's partner
//!
//! ## Key Property
//!
//! Stability: perturbing every point of a diagram by at most ε in L∞ moves
//! it at most ε in bottleneck distance.
//!
//! ## Example
//!
//! ```
//! use tda_bottleneck::{bottleneck_distance, PersistenceDiagram};
//!
//! let a = PersistenceDiagram::from_pairs(&[(0.0, 1.0), (5.0, 8.0)]);
//! let b = PersistenceDiagram::from_pairs(&[(0.0, 1.1)]);
//!
//! // (5, 8) has nothing close in `b` and goes to the diagonal at cost 1.5
//! assert_eq!(bottleneck_distance(&a, &b).unwrap(), 1.5);
//! ```
//!
//! ## References
//!
//! - Cohen-Steiner, Edelsbrunner & Harer, "Stability of Persistence
//!   Diagrams", DCG 37 (2007)
//! - Efrat, Itai & Katz, "Geometry Helps in Bottleneck Matching and
//!   Related Problems", Algorithmica 31 (2001)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)

pub mod diagram;
pub mod distance;
pub mod error;
pub mod flow;
pub mod matching;

// Re-exports from diagram
pub use diagram::{
    PersistenceDiagram,
    Diagnostic,
    DiagramSide,
};

// Re-exports from distance
pub use distance::{
    bottleneck_distance,
    bottleneck_matching,
    cost_matrix,
    Bottleneck,
    BottleneckConfig,
    BottleneckResult,
};

// Re-exports from error
pub use error::{BottleneckError, Result};

// Re-exports from flow
pub use flow::{
    // Oracle contract
    MaxFlowOracle,
    FlowNetwork,
    FlowSolution,
    // Engines
    Dinic,
    EdmondsKarp,
};

// Re-exports from matching
pub use matching::{
    CostMatrix,
    BottleneckMatching,
    MatchEntry,
};
