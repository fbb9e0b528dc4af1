//! Error type shared by every stage of the bottleneck pipeline.
//!
//! Only precondition violations and broken internal invariants are errors.
//! Recoverable input problems (points dying at infinity, diagrams that end up
//! empty) are reported through [`crate::Diagnostic`] instead.

use thiserror::Error;

use crate::diagram::DiagramSide;

#[derive(Debug, Error)]
pub enum BottleneckError {
    #[error("diagram has {found} coordinate column(s); birth and death need at least 2")]
    TooFewColumns { found: usize },

    #[error("point {index} has {found} coordinates, expected {expected} like the first point")]
    RaggedPoint {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{side}: point {index} has a non-finite birth")]
    NonFiniteBirth { side: DiagramSide, index: usize },

    #[error("{side}: point {index} dies before it is born (below the diagonal)")]
    DeathBeforeBirth { side: DiagramSide, index: usize },

    #[error("no perfect matching at the largest candidate threshold {threshold} (flow {flow} of {required})")]
    Infeasible {
        threshold: f64,
        flow: u64,
        required: u64,
    },
}

pub type Result<T> = std::result::Result<T, BottleneckError>;
