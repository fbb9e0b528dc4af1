//! Reading the Optimal Matching out of a Saturating Flow
//!
//! In a flow of value M+N every point node carries exactly one unit, so the
//! cross edge it uses names its partner. Diagonal nodes carry many units at
//! once and get no entry of their own.

use ndarray::Array2;

use super::{CostMatrix, FeasibilityGraph};
use crate::diagram::FilteredDiagram;
use crate::flow::FlowSolution;

/// Partner of each point node in the augmented numbering.
///
/// Left nodes are `0..=M` (`M` = first diagonal), right nodes are
/// `M+1..=M+N+1` (`M+N+1` = second diagonal). Both diagonal entries are
/// always `None`; so is any node the flow left unmatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingMap {
    partner: Vec<Option<usize>>,
    m: usize,
    n: usize,
}

impl MatchingMap {
    pub fn from_flow(graph: &FeasibilityGraph, flow: &FlowSolution) -> Self {
        let (m, n) = (graph.m(), graph.n());
        let mut partner = vec![None; m + n + 2];

        for edge in graph.cross_edges() {
            if flow.flow(edge.id) == 0 || (edge.row == m && edge.col == n) {
                continue;
            }
            let (left, right) = (edge.row, m + 1 + edge.col);
            if edge.row < m {
                debug_assert!(partner[left].is_none(), "point {left} matched twice");
                partner[left] = Some(right);
            }
            if edge.col < n {
                debug_assert!(partner[right].is_none(), "point {right} matched twice");
                partner[right] = Some(left);
            }
        }

        Self { partner, m, n }
    }

    pub fn partner(&self, node: usize) -> Option<usize> {
        self.partner[node]
    }

    /// Column of D matched to first-diagram point `i` (`N` = diagonal)
    pub fn column_of(&self, i: usize) -> Option<usize> {
        self.partner[i].map(|right| right - self.m - 1)
    }

    /// Row of D matched to second-diagram point `j` (`M` = diagonal)
    pub fn row_of(&self, j: usize) -> Option<usize> {
        self.partner[self.m + 1 + j]
    }

    /// Report the pairs in terms of the caller's diagrams
    pub fn entries(
        &self,
        costs: &CostMatrix,
        first: &FilteredDiagram,
        second: &FilteredDiagram,
    ) -> BottleneckMatching {
        let (m, n) = (self.m, self.n);
        let mut entries = Vec::with_capacity(m + n);

        for i in 0..m {
            let Some(col) = self.column_of(i) else { continue };
            let (from, to) = (first.origin(i), if col < n { second.origin(col) } else { None });
            // a real point paired with a placeholder pays its own diagonal cost
            let cost = match (from, to) {
                (None, Some(_)) => costs.entry(m, col),
                (Some(_), None) => costs.entry(i, n),
                _ => costs.entry(i, col),
            };
            let entry = MatchEntry {
                first: from,
                second: to,
                cost,
            };
            if !entry.is_diagonal_pair() {
                entries.push(entry);
            }
        }

        for j in 0..n {
            if self.row_of(j) != Some(m) {
                continue;
            }
            let entry = MatchEntry {
                first: None,
                second: second.origin(j),
                cost: costs.entry(m, j),
            };
            if !entry.is_diagonal_pair() {
                entries.push(entry);
            }
        }

        BottleneckMatching { entries }
    }
}

/// One correspondence; `None` means the point is matched to the diagonal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchEntry {
    /// Row in the first input diagram
    pub first: Option<usize>,
    /// Row in the second input diagram
    pub second: Option<usize>,
    /// Entry of D paid by this pair
    pub cost: f64,
}

impl MatchEntry {
    fn is_diagonal_pair(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// (first or -1, second or -1, cost)
    pub fn as_triple(&self) -> (i64, i64, f64) {
        let index = |side: Option<usize>| side.map_or(-1, |i| i as i64);
        (index(self.first), index(self.second), self.cost)
    }
}

/// Optimal correspondences, first-diagram points first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BottleneckMatching {
    entries: Vec<MatchEntry>,
}

impl BottleneckMatching {
    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEntry> {
        self.entries.iter()
    }

    /// Largest pair cost; equals the bottleneck distance
    pub fn max_cost(&self) -> f64 {
        self.entries.iter().map(|e| e.cost).fold(0.0, f64::max)
    }

    /// K×3 matrix of `as_triple` rows
    pub fn to_array(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.entries.len(), 3));
        for (row, entry) in self.entries.iter().enumerate() {
            let (i, j, cost) = entry.as_triple();
            out[[row, 0]] = i as f64;
            out[[row, 1]] = j as f64;
            out[[row, 2]] = cost;
        }
        out
    }
}

impl<'a> IntoIterator for &'a BottleneckMatching {
    type Item = &'a MatchEntry;
    type IntoIter = std::slice::Iter<'a, MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{filter_diagram, DiagramSide, PersistenceDiagram};
    use crate::flow::Dinic;
    use crate::matching::minimum_feasible_threshold;
    use approx::assert_relative_eq;

    fn solve(a: &[(f64, f64)], b: &[(f64, f64)]) -> (f64, MatchingMap, BottleneckMatching) {
        let first = filter_diagram(&PersistenceDiagram::from_pairs(a), DiagramSide::First, &mut Vec::new()).unwrap();
        let second = filter_diagram(&PersistenceDiagram::from_pairs(b), DiagramSide::Second, &mut Vec::new()).unwrap();
        let costs = CostMatrix::build(first.points(), second.points(), false);
        let outcome = minimum_feasible_threshold(&costs, &Dinic).unwrap();
        let map = MatchingMap::from_flow(&outcome.best.graph, &outcome.best.flow);
        let matching = map.entries(&costs, &first, &second);
        (outcome.threshold(), map, matching)
    }

    #[test]
    fn test_scenario_pairs() {
        let (d, map, matching) = solve(&[(0.0, 1.0), (5.0, 8.0)], &[(0.0, 1.1)]);

        assert_eq!(d, 1.5);
        // (0,1) <-> (0,1.1), (5,8) -> diagonal
        assert_eq!(map.column_of(0), Some(0));
        assert_eq!(map.column_of(1), Some(1));
        assert_eq!(map.row_of(0), Some(0));
        assert_eq!(map.partner(2), None);

        let triples: Vec<_> = matching.iter().map(MatchEntry::as_triple).collect();
        assert_eq!(triples.len(), 2);
        assert_eq!((triples[0].0, triples[0].1), (0, 0));
        assert_relative_eq!(triples[0].2, 0.1, epsilon = 1e-12);
        assert_eq!(triples[1], (1, -1, 1.5));
        assert_eq!(matching.max_cost(), d);
    }

    #[test]
    fn test_second_diagram_points_to_diagonal() {
        let (d, _, matching) = solve(&[(0.0, 0.2)], &[(0.0, 4.0), (1.0, 1.2)]);

        assert_eq!(d, 2.0);
        let triples: Vec<_> = matching.iter().map(MatchEntry::as_triple).collect();
        assert!(triples.contains(&(-1, 0, 2.0)));
        // every real point shows up exactly once
        let firsts = triples.iter().filter(|t| t.0 == 0).count();
        let seconds_0 = triples.iter().filter(|t| t.1 == 0).count();
        let seconds_1 = triples.iter().filter(|t| t.1 == 1).count();
        assert_eq!((firsts, seconds_0, seconds_1), (1, 1, 1));
    }

    #[test]
    fn test_placeholder_pairs_dropped() {
        let (d, _, matching) = solve(&[(0.0, 2.0)], &[]);

        assert_eq!(d, 1.0);
        assert_eq!(matching.entries(), &[MatchEntry { first: Some(0), second: None, cost: 1.0 }]);
    }

    #[test]
    fn test_placeholder_partner_pays_half_persistence() {
        let b = [(0.0, 0.1), (5.0, 9.0)];
        let (d, _, matching) = solve(&[], &b);

        assert_eq!(d, 2.0);
        assert_eq!(matching.len(), 2);
        for entry in &matching {
            assert_eq!(entry.first, None);
            let (birth, death) = b[entry.second.unwrap()];
            assert_relative_eq!(entry.cost, 0.5 * (death - birth));
        }
        assert_eq!(matching.max_cost(), d);
    }

    #[test]
    fn test_both_empty() {
        let (d, _, matching) = solve(&[], &[]);
        assert_eq!(d, 0.0);
        assert!(matching.is_empty());
    }

    #[test]
    fn test_to_array_layout() {
        let (_, _, matching) = solve(&[(0.0, 2.0)], &[]);
        let arr = matching.to_array();
        assert_eq!(arr.dim(), (1, 3));
        assert_eq!(arr.row(0).to_vec(), vec![0.0, -1.0, 1.0]);
    }
}
