//! Flow networks and the max-flow oracle contract.

/// Index of an edge in [`FlowNetwork::edges`]
pub type EdgeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub capacity: u64,
}

/// Directed graph with integer capacities
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    n_nodes: usize,
    edges: Vec<Edge>,
}

impl FlowNetwork {
    pub fn new(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            edges: Vec::new(),
        }
    }

    pub fn with_capacity(n_nodes: usize, n_edges: usize) -> Self {
        Self {
            n_nodes,
            edges: Vec::with_capacity(n_edges),
        }
    }

    /// Add a directed edge; ids are handed out in insertion order
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: u64) -> EdgeId {
        assert!(
            from < self.n_nodes && to < self.n_nodes,
            "edge {from}->{to} outside a network of {} nodes",
            self.n_nodes
        );
        self.edges.push(Edge { from, to, capacity });
        self.edges.len() - 1
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Edge {
        self.edges[id]
    }
}

/// Maximum flow value and how it is routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSolution {
    pub value: u64,
    /// Flow on each network edge, indexed by [`EdgeId`]
    pub edge_flows: Vec<u64>,
}

impl FlowSolution {
    pub fn flow(&self, id: EdgeId) -> u64 {
        self.edge_flows[id]
    }
}

/// Any exact integer max-flow engine.
///
/// Implementations must return a maximum flow that is integral, respects
/// every capacity and conserves flow at every node other than `source` and
/// `sink`. The bottleneck search reads the per-edge amounts back as discrete
/// matching decisions, so fractional or approximate answers are not allowed.
pub trait MaxFlowOracle {
    fn max_flow(&self, network: &FlowNetwork, source: usize, sink: usize) -> FlowSolution;
}

impl<O: MaxFlowOracle + ?Sized> MaxFlowOracle for &O {
    fn max_flow(&self, network: &FlowNetwork, source: usize, sink: usize) -> FlowSolution {
        (**self).max_flow(network, source, sink)
    }
}
