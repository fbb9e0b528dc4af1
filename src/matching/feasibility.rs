//! Feasibility Graph for a Candidate Threshold
//!
//! Node numbering is fixed so that flows are reproducible:
//!
//! ```text
//! 0 .. M-1        first-diagram points
//! M               first-diagram diagonal
//! M+1 .. M+N      second-diagram points
//! M+N+1           second-diagram diagonal
//! M+N+2, M+N+3    source, sink
//! ```
//!
//! Every point carries one unit. The first diagonal can absorb up to N
//! second-diagram points and the second diagonal up to M first-diagram
//! points, so source and sink capacities both total M+N. A flow of value
//! M+N therefore matches every point, to a partner within the threshold or
//! to the diagonal.

use crate::flow::{EdgeId, FlowNetwork, FlowSolution, MaxFlowOracle};

use super::CostMatrix;

/// An edge between the left (first diagram) and right (second diagram) sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossEdge {
    /// Row of D, `M` for the diagonal
    pub row: usize,
    /// Column of D, `N` for the diagonal
    pub col: usize,
    pub id: EdgeId,
}

/// Flow network whose max flow decides whether threshold `d` is achievable
#[derive(Debug, Clone)]
pub struct FeasibilityGraph {
    network: FlowNetwork,
    cross_edges: Vec<CrossEdge>,
    threshold: f64,
    m: usize,
    n: usize,
}

impl FeasibilityGraph {
    pub fn build(costs: &CostMatrix, threshold: f64) -> Self {
        let (m, n) = (costs.m(), costs.n());
        let source = m + n + 2;
        let sink = m + n + 3;
        let mut network = FlowNetwork::with_capacity(m + n + 4, (m + 1) * (n + 1) + m + n + 2);
        let mut cross_edges = Vec::new();

        for row in 0..=m {
            for col in 0..=n {
                let capacity = if row == m && col == n {
                    // bulk diagonal-to-diagonal channel, present at every threshold
                    m.min(n) as u64
                } else if costs.entry(row, col) <= threshold {
                    1
                } else {
                    continue;
                };
                let id = network.add_edge(row, m + 1 + col, capacity);
                cross_edges.push(CrossEdge { row, col, id });
            }
        }

        for i in 0..m {
            network.add_edge(source, i, 1);
        }
        network.add_edge(source, m, n as u64);

        for j in 0..n {
            network.add_edge(m + 1 + j, sink, 1);
        }
        network.add_edge(m + 1 + n, sink, m as u64);

        Self {
            network,
            cross_edges,
            threshold,
            m,
            n,
        }
    }

    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    pub fn cross_edges(&self) -> &[CrossEdge] {
        &self.cross_edges
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn source(&self) -> usize {
        self.m + self.n + 2
    }

    pub fn sink(&self) -> usize {
        self.m + self.n + 3
    }

    /// Flow value of a perfect matching
    pub fn required_flow(&self) -> u64 {
        (self.m + self.n) as u64
    }

    pub fn solve<O: MaxFlowOracle>(&self, oracle: &O) -> FlowSolution {
        oracle.max_flow(&self.network, self.source(), self.sink())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Dinic, EdmondsKarp};
    use ndarray::array;

    fn scenario() -> CostMatrix {
        let first = array![[0.0, 1.0], [5.0, 8.0]];
        let second = array![[0.0, 1.1]];
        CostMatrix::build(first.view(), second.view(), false)
    }

    fn is_feasible(costs: &CostMatrix, threshold: f64) -> bool {
        let graph = FeasibilityGraph::build(costs, threshold);
        graph.solve(&Dinic).value == graph.required_flow()
    }

    #[test]
    fn test_capacities_balance() {
        let graph = FeasibilityGraph::build(&scenario(), 0.0);
        let edges = graph.network().edges();

        let out_of_source: u64 = edges.iter().filter(|e| e.from == graph.source()).map(|e| e.capacity).sum();
        let into_sink: u64 = edges.iter().filter(|e| e.to == graph.sink()).map(|e| e.capacity).sum();
        assert_eq!(out_of_source, 3);
        assert_eq!(into_sink, 3);
        assert_eq!(graph.required_flow(), 3);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let costs = scenario();
        let graph = FeasibilityGraph::build(&costs, 1.5);
        assert!(graph.cross_edges().iter().any(|e| e.row == 1 && e.col == 1));

        let below = FeasibilityGraph::build(&costs, 1.5 - 1e-9);
        assert!(!below.cross_edges().iter().any(|e| e.row == 1 && e.col == 1));
    }

    #[test]
    fn test_diagonal_channel_always_present() {
        let graph = FeasibilityGraph::build(&scenario(), -1.0);
        assert_eq!(graph.cross_edges().len(), 1);
        let edge = graph.network().edge(graph.cross_edges()[0].id);
        assert_eq!((edge.from, edge.to, edge.capacity), (2, 4, 1));
    }

    #[test]
    fn test_feasibility_is_monotone() {
        let costs = scenario();
        let outcomes: Vec<bool> = costs.candidates().iter().map(|&d| is_feasible(&costs, d)).collect();

        let first_ok = outcomes.iter().position(|&ok| ok).unwrap();
        assert!(outcomes[first_ok..].iter().all(|&ok| ok));
        assert!((costs.candidates()[first_ok] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic_build() {
        let costs = scenario();
        let a = FeasibilityGraph::build(&costs, 1.5);
        let b = FeasibilityGraph::build(&costs, 1.5);
        assert_eq!(a.network().edges(), b.network().edges());
        assert_eq!(a.solve(&EdmondsKarp), b.solve(&EdmondsKarp));
    }
}
