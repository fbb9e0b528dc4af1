//! Augmented Cost Matrix
//!
//! For diagrams with M and N points, D is (M+1)×(N+1):
//!
//! ```text
//!            j < N                       N
//!  i < M   max(|bᵢ-bⱼ|, |dᵢ-dⱼ|)        (dᵢ-bᵢ)/2
//!    M     (dⱼ-bⱼ)/2                     0
//! ```
//!
//! The extra row and column stand for "the diagonal" of each diagram. An
//! L∞ ball around (b, d) first touches the diagonal at a corner, half the
//! persistence away, which is why the diagonal costs are (d-b)/2.

use log::trace;
use ndarray::{s, Array2, ArrayView2, ArrayViewMut2, Zip};

/// (M+1)×(N+1) matching costs, diagonal row and column included
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    d: Array2<f64>,
    m: usize,
    n: usize,
}

impl CostMatrix {
    /// Build D from two M×2 and N×2 birth/death blocks (M, N ≥ 1)
    pub fn build(first: ArrayView2<'_, f64>, second: ArrayView2<'_, f64>, parallel: bool) -> Self {
        let (m, n) = (first.nrows(), second.nrows());
        debug_assert!(m >= 1 && n >= 1, "filtered diagrams are never empty");

        let mut d = Array2::<f64>::zeros((m + 1, n + 1));

        let block = d.slice_mut(s![..m, ..n]);
        if parallel {
            fill_cross_block_parallel(block, first, second);
        } else {
            fill_cross_block(block, first, second);
        }

        for j in 0..n {
            d[[m, j]] = half_persistence(second, j);
        }
        for i in 0..m {
            d[[i, n]] = half_persistence(first, i);
        }
        // d[[m, n]] stays 0: diagonal to diagonal is free

        trace!("built {}x{} cost matrix", m + 1, n + 1);
        Self { d, m, n }
    }

    /// Points in the first diagram (the diagonal row is index `m`)
    pub fn m(&self) -> usize {
        self.m
    }

    /// Points in the second diagram (the diagonal column is index `n`)
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn entry(&self, i: usize, j: usize) -> f64 {
        self.d[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.d
    }

    /// Distinct entries in ascending order; always contains 0
    pub fn candidates(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.d.iter().copied().collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }
}

fn half_persistence(points: ArrayView2<'_, f64>, i: usize) -> f64 {
    0.5 * (points[[i, 1]] - points[[i, 0]])
}

fn chebyshev(first: &ArrayView2<'_, f64>, i: usize, second: &ArrayView2<'_, f64>, j: usize) -> f64 {
    let db = (first[[i, 0]] - second[[j, 0]]).abs();
    let dd = (first[[i, 1]] - second[[j, 1]]).abs();
    db.max(dd)
}

fn fill_cross_block(block: ArrayViewMut2<'_, f64>, first: ArrayView2<'_, f64>, second: ArrayView2<'_, f64>) {
    Zip::indexed(block).for_each(|(i, j), cell| *cell = chebyshev(&first, i, &second, j));
}

#[cfg(feature = "parallel")]
fn fill_cross_block_parallel(
    block: ArrayViewMut2<'_, f64>,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
) {
    Zip::indexed(block).par_for_each(|(i, j), cell| *cell = chebyshev(&first, i, &second, j));
}

#[cfg(not(feature = "parallel"))]
fn fill_cross_block_parallel(
    block: ArrayViewMut2<'_, f64>,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
) {
    log::debug!("built without the `parallel` feature; filling the cost matrix serially");
    fill_cross_block(block, first, second);
}
