//! Parametric Search over Candidate Thresholds
//!
//! Feasibility is monotone in the threshold: every edge present at d is
//! still present at any d' > d. The smallest feasible threshold is therefore
//! found by bisection over the sorted distinct entries of D.
//!
//! The largest entry is probed first. It admits every edge, so it must be
//! feasible; if not, the graph construction is broken and the search stops
//! with [`BottleneckError::Infeasible`]. The remaining candidates are then
//! bisected with the best feasible probe carried along, which keeps the
//! flow that realizes the final answer.

use log::{debug, trace};

use super::{CostMatrix, FeasibilityGraph};
use crate::error::{BottleneckError, Result};
use crate::flow::{FlowSolution, MaxFlowOracle};

/// One oracle call at one threshold
#[derive(Debug, Clone)]
pub struct Probe {
    pub graph: FeasibilityGraph,
    pub flow: FlowSolution,
}

impl Probe {
    pub fn run<O: MaxFlowOracle>(costs: &CostMatrix, threshold: f64, oracle: &O) -> Self {
        let graph = FeasibilityGraph::build(costs, threshold);
        let flow = graph.solve(oracle);
        Self { graph, flow }
    }

    pub fn threshold(&self) -> f64 {
        self.graph.threshold()
    }

    pub fn is_feasible(&self) -> bool {
        self.flow.value == self.graph.required_flow()
    }
}

/// Minimum feasible threshold and the flow found there
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Probe,
    /// Number of max-flow oracle calls made
    pub probes: usize,
}

impl SearchOutcome {
    /// The bottleneck distance
    pub fn threshold(&self) -> f64 {
        self.best.threshold()
    }
}

/// Smallest candidate of `costs` admitting a perfect matching
pub fn minimum_feasible_threshold<O: MaxFlowOracle>(costs: &CostMatrix, oracle: &O) -> Result<SearchOutcome> {
    let candidates = costs.candidates();
    let top = candidates.len() - 1;

    let mut best = Probe::run(costs, candidates[top], oracle);
    let mut probes = 1;
    if !best.is_feasible() {
        return Err(BottleneckError::Infeasible {
            threshold: best.threshold(),
            flow: best.flow.value,
            required: best.graph.required_flow(),
        });
    }

    // invariant: candidates[hi] is feasible, everything below lo is not
    let (mut lo, mut hi) = (0, top);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let probe = Probe::run(costs, candidates[mid], oracle);
        probes += 1;
        trace!(
            "probe d = {} -> flow {}/{}",
            probe.threshold(),
            probe.flow.value,
            probe.graph.required_flow()
        );

        if probe.is_feasible() {
            best = probe;
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    debug!(
        "bottleneck threshold {} after {} probe(s) over {} candidate(s)",
        best.threshold(),
        probes,
        candidates.len()
    );
    Ok(SearchOutcome { best, probes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Dinic, EdmondsKarp, FlowNetwork};
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn costs(first: Array2<f64>, second: Array2<f64>) -> CostMatrix {
        CostMatrix::build(first.view(), second.view(), false)
    }

    fn random_block(rng: &mut StdRng, n: usize) -> Array2<f64> {
        let mut block = Array2::zeros((n, 2));
        for i in 0..n {
            let birth: f64 = rng.gen_range(0.0..5.0);
            block[[i, 0]] = birth;
            block[[i, 1]] = birth + rng.gen_range(0.0..3.0);
        }
        block
    }

    /// Linear scan: first candidate whose probe is feasible
    fn brute_force(costs: &CostMatrix) -> f64 {
        costs
            .candidates()
            .into_iter()
            .find(|&d| Probe::run(costs, d, &Dinic).is_feasible())
            .unwrap()
    }

    #[test]
    fn test_scenario_threshold() {
        let d = costs(array![[0.0, 1.0], [5.0, 8.0]], array![[0.0, 1.1]]);
        let outcome = minimum_feasible_threshold(&d, &Dinic).unwrap();

        assert_eq!(outcome.threshold(), 1.5);
        assert!(outcome.best.is_feasible());
    }

    #[test]
    fn test_single_candidate() {
        // identical diagonal points: every entry of D is 0
        let d = costs(array![[1.0, 1.0]], array![[1.0, 1.0]]);
        assert_eq!(d.candidates(), vec![0.0]);

        let outcome = minimum_feasible_threshold(&d, &Dinic).unwrap();
        assert_eq!(outcome.threshold(), 0.0);
        assert_eq!(outcome.probes, 1);
    }

    #[test]
    fn test_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..25 {
            let m = rng.gen_range(1..7);
            let n = rng.gen_range(1..7);
            let d = costs(random_block(&mut rng, m), random_block(&mut rng, n));

            let outcome = minimum_feasible_threshold(&d, &Dinic).unwrap();
            assert_eq!(outcome.threshold(), brute_force(&d));

            let bound = 1 + (d.candidates().len() as f64).log2().ceil() as usize;
            assert!(outcome.probes <= bound, "{} probes > {}", outcome.probes, bound);
        }
    }

    #[test]
    fn test_oracles_agree() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let d = costs(random_block(&mut rng, 5), random_block(&mut rng, 4));
            let a = minimum_feasible_threshold(&d, &Dinic).unwrap();
            let b = minimum_feasible_threshold(&d, &EdmondsKarp).unwrap();
            assert_eq!(a.threshold(), b.threshold());
        }
    }

    /// Oracle that never routes anything
    struct Blocked;

    impl MaxFlowOracle for Blocked {
        fn max_flow(&self, network: &FlowNetwork, _source: usize, _sink: usize) -> FlowSolution {
            FlowSolution {
                value: 0,
                edge_flows: vec![0; network.n_edges()],
            }
        }
    }

    #[test]
    fn test_infeasible_top_is_an_error() {
        let d = costs(array![[0.0, 2.0]], array![[0.0, 1.0]]);
        let err = minimum_feasible_threshold(&d, &Blocked).unwrap_err();
        assert!(matches!(err, BottleneckError::Infeasible { flow: 0, required: 2, .. }));
    }

    #[test]
    fn test_best_flow_is_integral_and_within_capacity() {
        let mut rng = StdRng::seed_from_u64(99);
        let d = costs(random_block(&mut rng, 6), random_block(&mut rng, 3));
        let outcome = minimum_feasible_threshold(&d, &Dinic).unwrap();
        let network = outcome.best.graph.network();

        let mut balance = vec![0i64; network.n_nodes()];
        for (id, edge) in network.edges().iter().enumerate() {
            let f = outcome.best.flow.flow(id);
            assert!(f <= edge.capacity);
            balance[edge.from] -= f as i64;
            balance[edge.to] += f as i64;
        }
        let (source, sink) = (outcome.best.graph.source(), outcome.best.graph.sink());
        for (node, &b) in balance.iter().enumerate() {
            if node != source && node != sink {
                assert_eq!(b, 0, "flow not conserved at node {node}");
            }
        }
        assert_eq!(balance[sink], 9);
    }
}
