//! Preparing a diagram for matching
//!
//! Points with a non-finite death cannot be matched to anything at finite
//! cost, so they are dropped before the cost matrix is built. Each affected
//! diagram yields one [`Diagnostic`] record (mirrored to `log::warn!`).
//! A diagram left with no points is replaced by a single point at the
//! origin, which sits on the diagonal and therefore costs nothing.

use std::fmt;

use log::{debug, warn};
use ndarray::{s, Array2, ArrayView2};

use super::PersistenceDiagram;
use crate::error::{BottleneckError, Result};

/// Which of the two compared diagrams a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramSide {
    First,
    Second,
}

impl fmt::Display for DiagramSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramSide::First => write!(f, "dgm1"),
            DiagramSide::Second => write!(f, "dgm2"),
        }
    }
}

/// Non-fatal condition met while preparing the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Points with non-finite death were ignored
    NonFiniteDeathsDropped { side: DiagramSide, dropped: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NonFiniteDeathsDropped { side, dropped } => write!(
                f,
                "{side} has {dropped} point(s) with non-finite death times; ignoring those points"
            ),
        }
    }
}

/// Birth/death block of a diagram, ready for the cost matrix
#[derive(Debug, Clone)]
pub struct FilteredDiagram {
    /// M×2 birth/death values
    points: Array2<f64>,
    /// Row in the caller's diagram; `None` for the origin placeholder
    origin: Vec<Option<usize>>,
}

impl FilteredDiagram {
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// Input row of filtered point `i`, or `None` for the placeholder
    pub fn origin(&self, i: usize) -> Option<usize> {
        self.origin[i]
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin.iter().all(Option::is_none)
    }
}

/// Drop non-finite deaths, substitute the placeholder, and record what happened
pub fn filter_diagram(
    diagram: &PersistenceDiagram,
    side: DiagramSide,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FilteredDiagram> {
    let kept: Vec<usize> = (0..diagram.len())
        .filter(|&i| !diagram.is_essential(i))
        .collect();

    if let Some(&index) = kept.iter().find(|&&i| !diagram.birth(i).is_finite()) {
        return Err(BottleneckError::NonFiniteBirth { side, index });
    }
    // half-persistence, the diagonal cost, must not go negative
    if let Some(&index) = kept.iter().find(|&&i| diagram.death(i) < diagram.birth(i)) {
        return Err(BottleneckError::DeathBeforeBirth { side, index });
    }

    let dropped = diagram.len() - kept.len();
    if dropped > 0 {
        let record = Diagnostic::NonFiniteDeathsDropped { side, dropped };
        warn!("{record}");
        diagnostics.push(record);
    }

    if kept.is_empty() {
        debug!("{side} is empty after filtering; matching against a placeholder at the origin");
        return Ok(FilteredDiagram {
            points: Array2::zeros((1, 2)),
            origin: vec![None],
        });
    }

    let source = diagram.points().slice(s![.., 0..2]);
    let mut points = Array2::zeros((kept.len(), 2));
    for (row, &i) in kept.iter().enumerate() {
        points.row_mut(row).assign(&source.row(i));
    }

    Ok(FilteredDiagram {
        points,
        origin: kept.into_iter().map(Some).collect(),
    })
}
