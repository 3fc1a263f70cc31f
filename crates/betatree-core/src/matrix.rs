//! Row-major observation matrix

use crate::{Error, Result};

/// An n×d matrix of finite observations, stored row-major.
///
/// Row `i` is observation `i`; column `p` is coordinate `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMatrix {
    values: Vec<f64>,
    rows: usize,
    dims: usize,
}

impl DataMatrix {
    /// Wrap a row-major buffer of `values.len() / dims` observations
    pub fn from_row_major(values: Vec<f64>, dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(Error::InvalidInput("dimension must be at least 1".to_string()));
        }
        if values.len() % dims != 0 {
            return Err(Error::InvalidInput(format!(
                "buffer of length {} is not a multiple of dimension {dims}",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("data matrix"));
        }
        let rows = values.len() / dims;
        Ok(Self { values, rows, dims })
    }

    /// Build from one vector per observation
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dims = rows.first().map(Vec::len).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * dims);
        for row in rows {
            if row.len() != dims {
                return Err(Error::size_mismatch(dims, row.len(), "observation row"));
            }
            values.extend_from_slice(row);
        }
        Self::from_row_major(values, dims)
    }

    /// Build from one vector per coordinate
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let dims = columns.len();
        let rows = columns.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(Error::size_mismatch(rows, bad.len(), "coordinate column"));
        }
        let mut values = Vec::with_capacity(rows * dims);
        for i in 0..rows {
            values.extend(columns.iter().map(|c| c[i]));
        }
        Self::from_row_major(values, dims)
    }

    /// Number of observations
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Number of coordinates per observation
    pub fn n_dims(&self) -> usize {
        self.dims
    }

    /// Check if the matrix holds no observations
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Observation `i`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.dims..(i + 1) * self.dims]
    }

    /// Coordinate `p` of observation `i`
    #[inline]
    pub fn value(&self, i: usize, p: usize) -> f64 {
        self.values[i * self.dims + p]
    }

    /// Iterate over observations
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.dims)
    }

    /// Per-coordinate minimum and maximum, `None` when empty
    pub fn bounding_box(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        let first = self.rows().next()?;
        let mut low = first.to_vec();
        let mut high = first.to_vec();
        for row in self.rows().skip(1) {
            for (p, &v) in row.iter().enumerate() {
                low[p] = low[p].min(v);
                high[p] = high[p].max(v);
            }
        }
        Some((low, high))
    }
}
