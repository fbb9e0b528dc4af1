//! Persistence Diagram Storage
//!
//! A persistence diagram is stored as a K×C matrix: column 0 holds the
//! birth value, column 1 the death value. Any further columns (homology
//! dimension, representative indices, ...) travel with the point but are
//! never read by the distance computation.
//!
//! ## Interpretation
//!
//! - Points far above the diagonal (large d-b) are robust features
//! - Points near the diagonal are cheap to match away
//! - A point with infinite death is essential and cannot be matched

use ndarray::{Array2, ArrayView1};

use crate::error::{BottleneckError, Result};

/// Birth/death pairs, plus any extra coordinate columns
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceDiagram {
    points: Array2<f64>,
}

impl PersistenceDiagram {
    /// Wrap a K×C matrix of points.
    ///
    /// An empty diagram may have any number of columns; a non-empty one
    /// needs at least birth and death.
    pub fn new(points: Array2<f64>) -> Result<Self> {
        if points.nrows() > 0 && points.ncols() < 2 {
            return Err(BottleneckError::TooFewColumns {
                found: points.ncols(),
            });
        }
        Ok(Self { points })
    }

    /// Build from a list of point records, all of the same length
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let width = first.as_ref().len();
        if width < 2 {
            return Err(BottleneckError::TooFewColumns { found: width });
        }

        let mut flat = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BottleneckError::RaggedPoint {
                    index,
                    expected: width,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }

        let points = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|_| BottleneckError::TooFewColumns { found: width })?;
        Ok(Self { points })
    }

    /// Build from plain (birth, death) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mut points = Array2::zeros((pairs.len(), 2));
        for (i, &(birth, death)) in pairs.iter().enumerate() {
            points[[i, 0]] = birth;
            points[[i, 1]] = death;
        }
        Self { points }
    }

    pub fn empty() -> Self {
        Self {
            points: Array2::zeros((0, 2)),
        }
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Number of coordinate columns per point
    pub fn n_coords(&self) -> usize {
        self.points.ncols()
    }

    pub fn birth(&self, i: usize) -> f64 {
        self.points[[i, 0]]
    }

    pub fn death(&self, i: usize) -> f64 {
        self.points[[i, 1]]
    }

    /// Full coordinate row, extra columns included
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }

    /// Lifetime of the feature
    pub fn persistence(&self, i: usize) -> f64 {
        self.death(i) - self.birth(i)
    }

    /// Does this point never die?
    pub fn is_essential(&self, i: usize) -> bool {
        !self.death(i).is_finite()
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }
}

impl Default for PersistenceDiagram {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&[(f64, f64)]> for PersistenceDiagram {
    fn from(pairs: &[(f64, f64)]) -> Self {
        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_rows_keeps_extra_columns() {
        let pd = PersistenceDiagram::from_rows(&[vec![0.0, 1.0, 1.0], vec![0.5, 3.0, 2.0]]).unwrap();

        assert_eq!(pd.len(), 2);
        assert_eq!(pd.n_coords(), 3);
        assert_eq!(pd.point(1).to_vec(), vec![0.5, 3.0, 2.0]);
        assert!((pd.persistence(1) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = PersistenceDiagram::from_rows(&[vec![0.0, 1.0], vec![0.0, 1.0, 7.0]]).unwrap_err();
        assert!(matches!(
            err,
            BottleneckError::RaggedPoint { index: 1, expected: 2, found: 3 }
        ));
    }

    #[test]
    fn test_single_column_rejected() {
        let err = PersistenceDiagram::from_rows(&[[1.0], [2.0]]).unwrap_err();
        assert!(matches!(err, BottleneckError::TooFewColumns { found: 1 }));

        let err = PersistenceDiagram::new(array![[1.0], [2.0]]).unwrap_err();
        assert!(matches!(err, BottleneckError::TooFewColumns { found: 1 }));
    }

    #[test]
    fn test_empty_inputs() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(PersistenceDiagram::from_rows(&rows).unwrap().is_empty());
        assert!(PersistenceDiagram::new(Array2::zeros((0, 0))).unwrap().is_empty());
        assert!(PersistenceDiagram::default().is_empty());
    }

    #[test]
    fn test_essential_point() {
        let pd = PersistenceDiagram::from_pairs(&[(0.0, f64::INFINITY), (0.0, 1.0)]);
        assert!(pd.is_essential(0));
        assert!(!pd.is_essential(1));
    }
}
