//! Dinic's algorithm: BFS level graph, then blocking flow by DFS.
//!
//! O(V² E) in general and O(E √V) on unit-capacity bipartite networks,
//! which is what the feasibility graphs mostly are.

use std::collections::VecDeque;

use super::network::{FlowNetwork, FlowSolution, MaxFlowOracle};
use super::residual::ResidualGraph;

const UNREACHED: usize = usize::MAX;

/// Default max-flow engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Dinic;

impl MaxFlowOracle for Dinic {
    fn max_flow(&self, network: &FlowNetwork, source: usize, sink: usize) -> FlowSolution {
        assert!(source != sink, "source and sink must differ");

        let mut graph = ResidualGraph::new(network);
        let n = graph.n_nodes();
        let mut level = vec![UNREACHED; n];
        let mut next = vec![0usize; n];
        let mut queue = VecDeque::new();
        let mut total = 0;

        while build_levels(&graph, source, sink, &mut level, &mut queue) {
            next.fill(0);
            loop {
                let pushed = blocking_dfs(&mut graph, &level, &mut next, source, sink, u64::MAX);
                if pushed == 0 {
                    break;
                }
                total += pushed;
            }
        }

        graph.into_solution(total)
    }
}

/// BFS distances over arcs with spare capacity; true if the sink is reachable
fn build_levels(
    graph: &ResidualGraph,
    source: usize,
    sink: usize,
    level: &mut [usize],
    queue: &mut VecDeque<usize>,
) -> bool {
    level.fill(UNREACHED);
    queue.clear();
    level[source] = 0;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &arc in &graph.adjacency[u] {
            let v = graph.head[arc];
            if graph.residual[arc] > 0 && level[v] == UNREACHED {
                level[v] = level[u] + 1;
                queue.push_back(v);
            }
        }
    }

    level[sink] != UNREACHED
}

fn blocking_dfs(
    graph: &mut ResidualGraph,
    level: &[usize],
    next: &mut [usize],
    u: usize,
    sink: usize,
    limit: u64,
) -> u64 {
    if u == sink {
        return limit;
    }

    while next[u] < graph.adjacency[u].len() {
        let arc = graph.adjacency[u][next[u]];
        let v = graph.head[arc];
        let spare = graph.residual[arc];
        if spare > 0 && level[v] == level[u] + 1 {
            let pushed = blocking_dfs(graph, level, next, v, sink, limit.min(spare));
            if pushed > 0 {
                graph.push(arc, pushed);
                return pushed;
            }
        }
        next[u] += 1;
    }

    0
}
