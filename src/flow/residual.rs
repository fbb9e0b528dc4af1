//! Residual graph shared by the augmenting-path engines.
//!
//! Network edge `e` owns arcs `2e` (forward, starts at full capacity) and
//! `2e + 1` (backward, starts empty); `arc ^ 1` is always the partner arc.

use super::network::{FlowNetwork, FlowSolution};

pub(crate) struct ResidualGraph {
    /// Outgoing arc ids per node
    pub adjacency: Vec<Vec<usize>>,
    pub head: Vec<usize>,
    pub residual: Vec<u64>,
    capacity: Vec<u64>,
}

impl ResidualGraph {
    pub fn new(network: &FlowNetwork) -> Self {
        let m = network.n_edges();
        let mut adjacency = vec![Vec::new(); network.n_nodes()];
        let mut head = Vec::with_capacity(2 * m);
        let mut residual = Vec::with_capacity(2 * m);
        let mut capacity = Vec::with_capacity(m);

        for (e, edge) in network.edges().iter().enumerate() {
            adjacency[edge.from].push(2 * e);
            adjacency[edge.to].push(2 * e + 1);
            head.extend([edge.to, edge.from]);
            residual.extend([edge.capacity, 0]);
            capacity.push(edge.capacity);
        }

        Self {
            adjacency,
            head,
            residual,
            capacity,
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Move `delta` units along `arc`
    pub fn push(&mut self, arc: usize, delta: u64) {
        self.residual[arc] -= delta;
        self.residual[arc ^ 1] += delta;
    }

    /// Per-edge flow read off the forward arcs
    pub fn into_solution(self, value: u64) -> FlowSolution {
        let edge_flows = self
            .capacity
            .iter()
            .enumerate()
            .map(|(e, &cap)| cap - self.residual[2 * e])
            .collect();
        FlowSolution { value, edge_flows }
    }
}
