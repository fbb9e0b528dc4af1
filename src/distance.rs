//! Bottleneck Distance: Public Entry Points
//!
//! Wires the pipeline together: filter both diagrams, build the augmented
//! cost matrix, search for the minimum feasible threshold and, on request,
//! report the matching that achieves it.

use crate::diagram::{filter_diagram, Diagnostic, DiagramSide, PersistenceDiagram};
use crate::error::Result;
use crate::flow::{Dinic, MaxFlowOracle};
use crate::matching::{minimum_feasible_threshold, BottleneckMatching, CostMatrix, MatchingMap};

/// Options for a bottleneck computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BottleneckConfig {
    /// Also report the optimal matching
    pub matching: bool,
    /// Fill the cost matrix in parallel (needs the `parallel` feature)
    pub parallel: bool,
}

impl BottleneckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matching(mut self, matching: bool) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Distance, optional matching, and anything worth warning about
#[derive(Debug, Clone)]
pub struct BottleneckResult {
    pub distance: f64,
    /// Present when [`BottleneckConfig::matching`] is set
    pub matching: Option<BottleneckMatching>,
    pub diagnostics: Vec<Diagnostic>,
    /// Max-flow oracle calls made by the search
    pub probes: usize,
}

/// Bottleneck distance computer over a pluggable max-flow engine
#[derive(Debug, Clone)]
pub struct Bottleneck<O = Dinic> {
    config: BottleneckConfig,
    oracle: O,
}

impl Bottleneck<Dinic> {
    pub fn new(config: BottleneckConfig) -> Self {
        Self::with_oracle(config, Dinic)
    }
}

impl Default for Bottleneck<Dinic> {
    fn default() -> Self {
        Self::new(BottleneckConfig::default())
    }
}

impl<O: MaxFlowOracle> Bottleneck<O> {
    pub fn with_oracle(config: BottleneckConfig, oracle: O) -> Self {
        Self { config, oracle }
    }

    pub fn compute(&self, dgm1: &PersistenceDiagram, dgm2: &PersistenceDiagram) -> Result<BottleneckResult> {
        let mut diagnostics = Vec::new();
        let first = filter_diagram(dgm1, DiagramSide::First, &mut diagnostics)?;
        let second = filter_diagram(dgm2, DiagramSide::Second, &mut diagnostics)?;

        let costs = CostMatrix::build(first.points(), second.points(), self.config.parallel);
        let outcome = minimum_feasible_threshold(&costs, &self.oracle)?;

        let matching = self.config.matching.then(|| {
            MatchingMap::from_flow(&outcome.best.graph, &outcome.best.flow).entries(&costs, &first, &second)
        });

        Ok(BottleneckResult {
            distance: outcome.threshold(),
            matching,
            diagnostics,
            probes: outcome.probes,
        })
    }
}

/// Bottleneck distance between two diagrams
pub fn bottleneck_distance(dgm1: &PersistenceDiagram, dgm2: &PersistenceDiagram) -> Result<f64> {
    Ok(Bottleneck::new(BottleneckConfig::default()).compute(dgm1, dgm2)?.distance)
}

/// Bottleneck distance together with an optimal matching
pub fn bottleneck_matching(
    dgm1: &PersistenceDiagram,
    dgm2: &PersistenceDiagram,
) -> Result<(f64, BottleneckMatching)> {
    let result = Bottleneck::new(BottleneckConfig::new().with_matching(true)).compute(dgm1, dgm2)?;
    Ok((result.distance, result.matching.unwrap_or_default()))
}

/// Augmented cross-similarity matrix the search runs on
///
/// Rows and columns index the filtered diagrams (essential points removed,
/// empty diagrams replaced by one origin point); the last row and column
/// are the diagonals. Diagnostics are the same records
/// [`BottleneckResult::diagnostics`] would carry.
pub fn cost_matrix(
    dgm1: &PersistenceDiagram,
    dgm2: &PersistenceDiagram,
) -> Result<(CostMatrix, Vec<Diagnostic>)> {
    let mut diagnostics = Vec::new();
    let first = filter_diagram(dgm1, DiagramSide::First, &mut diagnostics)?;
    let second = filter_diagram(dgm2, DiagramSide::Second, &mut diagnostics)?;
    Ok((CostMatrix::build(first.points(), second.points(), false), diagnostics))
}
