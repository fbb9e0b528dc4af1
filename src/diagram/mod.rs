//! Diagram Module: Input Points and Their Preparation
//!
//! A persistence diagram D = {(bᵢ, dᵢ)} lists the birth and death of each
//! topological feature. Before two diagrams can be compared, each one is
//! validated, stripped of essential (never-dying) points and, if nothing
//! remains, replaced by a single point on the diagonal.

mod points;
mod filter;

pub use points::PersistenceDiagram;
pub use filter::{filter_diagram, Diagnostic, DiagramSide, FilteredDiagram};
