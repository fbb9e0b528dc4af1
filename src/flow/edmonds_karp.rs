//! Edmonds-Karp: augment along BFS-shortest paths until none is left.
//!
//! O(V E²). Slower than [`super::Dinic`] but short enough to audit, which
//! makes it a useful cross-check.

use std::collections::VecDeque;

use super::network::{FlowNetwork, FlowSolution, MaxFlowOracle};
use super::residual::ResidualGraph;

const UNDEFINED: usize = usize::MAX;

#[derive(Debug, Clone, Copy, Default)]
pub struct EdmondsKarp;

impl MaxFlowOracle for EdmondsKarp {
    fn max_flow(&self, network: &FlowNetwork, source: usize, sink: usize) -> FlowSolution {
        assert!(source != sink, "source and sink must differ");

        let mut graph = ResidualGraph::new(network);
        let mut parent_arc = vec![UNDEFINED; graph.n_nodes()];
        let mut queue = VecDeque::new();
        let mut total = 0;

        loop {
            // find augmenting path, bfs
            parent_arc.fill(UNDEFINED);
            queue.clear();
            queue.push_back(source);
            let mut reached = false;
            'bfs: while let Some(u) = queue.pop_front() {
                for &arc in &graph.adjacency[u] {
                    let v = graph.head[arc];
                    if v == source || parent_arc[v] != UNDEFINED || graph.residual[arc] == 0 {
                        continue;
                    }
                    parent_arc[v] = arc;
                    if v == sink {
                        reached = true;
                        break 'bfs;
                    }
                    queue.push_back(v);
                }
            }
            if !reached {
                break;
            }

            let mut delta = u64::MAX;
            let mut v = sink;
            while v != source {
                let arc = parent_arc[v];
                delta = delta.min(graph.residual[arc]);
                v = graph.head[arc ^ 1];
            }

            let mut v = sink;
            while v != source {
                let arc = parent_arc[v];
                graph.push(arc, delta);
                v = graph.head[arc ^ 1];
            }
            total += delta;
        }

        graph.into_solution(total)
    }
}
