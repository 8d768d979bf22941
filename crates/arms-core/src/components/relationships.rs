//! Relationship Matrix
//!
//! Symmetric pairwise affinity between agents. `R[i][j] == R[j][i]` and the
//! diagonal is always zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{SampleBounds, RELATIONSHIP_DOMAIN};
use crate::error::{ArmsError, Result};

/// Dense symmetric n×n relationship table, stored row-major.
///
/// Serialized as a list of rows; deserializing goes through [`RelationshipMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct RelationshipMatrix {
    size: usize,
    values: Vec<f64>,
}

impl RelationshipMatrix {
    /// Creates a table where every pair is neutral (0.0).
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Builds a table from explicit rows, checking shape, symmetry and diagonal.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut matrix = Self::new(size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ArmsError::invalid(format!(
                    "relationship row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            if row[i] != 0.0 {
                return Err(ArmsError::invalid(format!(
                    "relationship of agent {} with itself must be 0, got {}",
                    i, row[i]
                )));
            }
        }
        for i in 0..size {
            for j in (i + 1)..size {
                if rows[i][j] != rows[j][i] {
                    return Err(ArmsError::invalid(format!(
                        "relationship table is not symmetric at ({}, {}): {} vs {}",
                        i, j, rows[i][j], rows[j][i]
                    )));
                }
                matrix.set(i, j, rows[i][j])?;
            }
        }
        Ok(matrix)
    }

    /// Draws every unordered pair once from `bounds` and mirrors it.
    pub fn sample<R: Rng>(size: usize, bounds: SampleBounds, rng: &mut R) -> Result<Self> {
        bounds.validate("relationship", RELATIONSHIP_DOMAIN)?;
        let mut matrix = Self::new(size);
        for i in 0..size {
            for j in (i + 1)..size {
                let value = bounds.sample(rng);
                matrix.values[i * size + j] = value;
                matrix.values[j * size + i] = value;
            }
        }
        Ok(matrix)
    }

    /// Number of agents covered by the table.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Relationship between `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        assert!(a < self.size && b < self.size, "agent index out of range");
        self.values[a * self.size + b]
    }

    /// Sets both `(a, b)` and `(b, a)`.
    pub fn set(&mut self, a: usize, b: usize, value: f64) -> Result<()> {
        if a >= self.size || b >= self.size {
            return Err(ArmsError::invalid(format!(
                "agent pair ({}, {}) outside a table of {} agents",
                a, b, self.size
            )));
        }
        if a == b {
            return Err(ArmsError::invalid(format!(
                "relationship of agent {} with itself is fixed at 0",
                a
            )));
        }
        if !value.is_finite() {
            return Err(ArmsError::invalid(format!(
                "relationship ({}, {}) must be finite, got {}",
                a, b, value
            )));
        }
        self.values[a * self.size + b] = value;
        self.values[b * self.size + a] = value;
        Ok(())
    }

    /// Row of relationships held by `agent`.
    pub fn row(&self, agent: usize) -> &[f64] {
        &self.values[agent * self.size..(agent + 1) * self.size]
    }
}

impl TryFrom<Vec<Vec<f64>>> for RelationshipMatrix {
    type Error = ArmsError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<RelationshipMatrix> for Vec<Vec<f64>> {
    fn from(matrix: RelationshipMatrix) -> Self {
        (0..matrix.size).map(|i| matrix.row(i).to_vec()).collect()
    }
}
