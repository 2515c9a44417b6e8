//! CRS (Compressed Row Storage) matrix with incremental insertion
//!
//! # Format
//!
//! For an m×n sparse matrix with nnz stored entries:
//! - `row_ptr`: `Vec<usize>` of length m+1 - row_ptr\[i\] is the start of row i
//! - `col_indices`: `Vec<usize>` of length nnz - column index for each entry
//! - `values`: `Vec<T>` of length nnz - the entry values
//! - `shape`: (m, n) - dimensions of the matrix
//!
//! Entries are appended to the end of a row's segment as they are inserted, so
//! a row may hold the same column several times. Such duplicates stand for the
//! sum of their values until [`CrsMatrix::compress`] merges them and sorts each
//! row by ascending column.
//!
//! # Examples
//!
//! ```
//! use crs_matrix::CrsMatrix;
//!
//! let mut m = CrsMatrix::<f64>::new(3, 4);
//! m.insert_at_row(1, &[3, 0, 3], &[1.0, 2.0, 0.5]).unwrap();
//! assert_eq!(m.nnz(), 3);
//!
//! m.compress().unwrap();
//! assert_eq!(m.row(1), Some((&[0, 3][..], &[2.0, 1.5][..])));
//! assert_eq!(m.row_ptr(), &[0, 0, 2, 2]);
//! ```

use std::collections::BTreeMap;

use num_traits::Float;

use crate::config::{ColumnPolicy, CrsConfig, DedupStrategy};
use crate::error::{CrsError, CrsResult};
use crate::splice::splice_pair;

/// CRS (Compressed Row Storage) matrix
#[derive(Debug, Clone)]
pub struct CrsMatrix<T> {
    /// Row pointers: row_ptr[i] = start index of row i in col_indices/values
    /// Length: nrows + 1, with row_ptr[nrows] = nnz
    row_ptr: Vec<usize>,

    /// Column indices for each stored entry
    col_indices: Vec<usize>,

    /// Values of stored entries
    values: Vec<T>,

    /// Shape: (nrows, ncols)
    shape: (usize, usize),

    /// Set by `compress`, cleared by any non-empty insertion
    compressed: bool,

    config: CrsConfig,
}

impl<T> CrsMatrix<T> {
    /// Create an empty matrix with `nrows + 1` zero row pointers
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::with_config(nrows, ncols, CrsConfig::default())
    }

    /// Create an empty matrix with the given policies
    pub fn with_config(nrows: usize, ncols: usize, config: CrsConfig) -> Self {
        Self {
            row_ptr: vec![0; nrows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
            shape: (nrows, ncols),
            compressed: false,
            config,
        }
    }

    /// Build a matrix from raw CRS arrays
    ///
    /// The arrays must satisfy the structural invariants (see
    /// [`validate`](Self::validate)). Rows may hold duplicate or unsorted
    /// columns, so the result is never flagged as compressed.
    ///
    /// # Errors
    ///
    /// Returns [`CrsError::InvalidStructure`] or [`CrsError::LengthMismatch`]
    /// when the arrays do not describe a `shape.0`-row matrix.
    pub fn from_parts(
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
    ) -> CrsResult<Self> {
        let matrix = Self {
            row_ptr,
            col_indices,
            values,
            shape,
            compressed: false,
            config: CrsConfig::default(),
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Shape of the matrix (nrows, ncols)
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.shape.0
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.shape.1
    }

    /// Get row pointers
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Get column indices
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Get values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Whether every row is currently in canonical (unique, ascending) form
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Policies this matrix was created with
    pub fn config(&self) -> &CrsConfig {
        &self.config
    }

    /// Compute density (nnz / total_elements)
    pub fn density(&self) -> f64 {
        let total = self.nrows() as f64 * self.ncols() as f64;
        if total == 0.0 {
            0.0
        } else {
            self.nnz() as f64 / total
        }
    }

    /// Get a row as (col_indices, values) slices in storage order
    pub fn row(&self, i: usize) -> Option<(&[usize], &[T])> {
        if i >= self.nrows() {
            return None;
        }
        Some(self.row_slices(i))
    }

    /// Number of entries currently stored for row `i`
    pub fn row_len(&self, i: usize) -> Option<usize> {
        if i >= self.nrows() {
            return None;
        }
        Some(self.row_ptr[i + 1] - self.row_ptr[i])
    }

    /// Iterate over all stored entries as `(row, col, &value)`
    ///
    /// Rows are visited in ascending order, entries within a row in storage
    /// order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        (0..self.nrows()).flat_map(move |row| {
            (self.row_ptr[row]..self.row_ptr[row + 1])
                .map(move |k| (row, self.col_indices[k], &self.values[k]))
        })
    }

    /// Check all structural invariants
    ///
    /// - `row_ptr` has `nrows + 1` entries, starts at 0, never decreases and
    ///   ends at `nnz`
    /// - `col_indices` and `values` have the same length
    /// - when compressed, columns strictly ascend within every row
    /// - under [`ColumnPolicy::Strict`], every column is below `ncols`
    pub fn validate(&self) -> CrsResult<()> {
        let nrows = self.nrows();

        if self.row_ptr.len() != nrows + 1 {
            return Err(CrsError::invalid_structure(format!(
                "row pointers have length {} for {} rows (expected {})",
                self.row_ptr.len(),
                nrows,
                nrows + 1
            )));
        }

        if self.col_indices.len() != self.values.len() {
            return Err(CrsError::LengthMismatch {
                cols: self.col_indices.len(),
                values: self.values.len(),
            });
        }

        if self.row_ptr[0] != 0 {
            return Err(CrsError::invalid_structure(format!(
                "first row pointer is {}, expected 0",
                self.row_ptr[0]
            )));
        }

        for (i, w) in self.row_ptr.windows(2).enumerate() {
            if w[0] > w[1] {
                return Err(CrsError::invalid_structure(format!(
                    "row pointer not sorted at index {}: {} > {}",
                    i, w[0], w[1]
                )));
            }
        }

        if self.row_ptr[nrows] != self.nnz() {
            return Err(CrsError::invalid_structure(format!(
                "last row pointer is {}, expected nnz {}",
                self.row_ptr[nrows],
                self.nnz()
            )));
        }

        for row in 0..nrows {
            let (cols, _) = self.row_slices(row);
            if self.compressed {
                if let Some(w) = cols.windows(2).find(|w| w[0] >= w[1]) {
                    return Err(CrsError::invalid_structure(format!(
                        "compressed row {} is not strictly ascending: {} then {}",
                        row, w[0], w[1]
                    )));
                }
            }
            if self.config.columns == ColumnPolicy::Strict {
                self.check_columns(row, cols)?;
            }
        }

        Ok(())
    }

    pub(crate) fn row_slices(&self, i: usize) -> (&[usize], &[T]) {
        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];
        (&self.col_indices[start..end], &self.values[start..end])
    }

    fn check_columns(&self, row: usize, cols: &[usize]) -> CrsResult<()> {
        let ncols = self.ncols();
        match cols.iter().find(|&&col| col >= ncols) {
            Some(&col) => Err(CrsError::ColIndexOutOfBounds { row, col, ncols }),
            None => Ok(()),
        }
    }
}

impl<T: Float> CrsMatrix<T> {
    /// Append entries to the end of row `row`
    ///
    /// `cols` and `vals` are parallel; they may be in any order and may repeat
    /// columns already present in the row. Offsets of all later rows shift by
    /// the number of inserted entries. A non-empty insertion clears the
    /// compressed flag.
    ///
    /// # Complexity
    ///
    /// O(nnz + k): the column and value arrays are rebuilt on every call.
    ///
    /// # Errors
    ///
    /// - [`CrsError::RowOutOfRange`] if `row >= nrows`
    /// - [`CrsError::LengthMismatch`] if `cols.len() != vals.len()`
    /// - [`CrsError::ColIndexOutOfBounds`] under [`ColumnPolicy::Strict`]
    pub fn insert_at_row(&mut self, row: usize, cols: &[usize], vals: &[T]) -> CrsResult<()> {
        let nrows = self.nrows();
        if row >= nrows {
            return Err(CrsError::RowOutOfRange { row, nrows });
        }
        if cols.len() != vals.len() {
            return Err(CrsError::LengthMismatch {
                cols: cols.len(),
                values: vals.len(),
            });
        }
        if self.config.columns == ColumnPolicy::Strict {
            self.check_columns(row, cols)?;
        }
        if cols.is_empty() {
            return Ok(());
        }

        let offset = self.row_ptr[row + 1];
        let (col_indices, values) =
            splice_pair(&self.col_indices, &self.values, offset, cols, vals)?;

        for ptr in &mut self.row_ptr[row + 1..] {
            *ptr += cols.len();
        }
        self.col_indices = col_indices;
        self.values = values;
        self.compressed = false;

        tracing::trace!(row, inserted = cols.len(), nnz = self.nnz(), "row entries inserted");
        Ok(())
    }

    /// Append a single entry to row `row`
    pub fn insert(&mut self, row: usize, col: usize, value: T) -> CrsResult<()> {
        self.insert_at_row(row, &[col], &[value])
    }

    /// Merge duplicate columns and sort every row by ascending column
    ///
    /// Values of repeated columns are summed in storage order. The arrays are
    /// rebuilt row by row and swapped in once all rows are done.
    ///
    /// # Errors
    ///
    /// [`CrsError::AlreadyCompressed`] if the matrix is already compressed.
    pub fn compress(&mut self) -> CrsResult<()> {
        if self.compressed {
            return Err(CrsError::AlreadyCompressed);
        }

        let nrows = self.nrows();
        let nnz_before = self.nnz();
        let mut row_ptr = Vec::with_capacity(nrows + 1);
        let mut col_indices = Vec::with_capacity(nnz_before);
        let mut values = Vec::with_capacity(nnz_before);
        row_ptr.push(0);

        for i in 0..nrows {
            let (cols, vals) = self.row_slices(i);
            group_row_into(cols, vals, self.config.dedup, &mut col_indices, &mut values);
            row_ptr.push(col_indices.len());
        }

        self.row_ptr = row_ptr;
        self.col_indices = col_indices;
        self.values = values;
        self.compressed = true;

        tracing::debug!(
            nrows,
            nnz_before,
            nnz_after = self.nnz(),
            strategy = ?self.config.dedup,
            "matrix compressed"
        );
        Ok(())
    }

    /// Copy row `row` into caller-supplied buffers
    ///
    /// Entries are written in storage order (insertion order before
    /// compression, ascending column after). The usable capacity is the
    /// shorter of the two buffers.
    ///
    /// # Returns
    ///
    /// The number of entries written.
    ///
    /// # Errors
    ///
    /// - [`CrsError::RowOutOfRange`] if `row >= nrows`
    /// - [`CrsError::BufferTooSmall`] if the row does not fit; nothing is
    ///   written in that case
    pub fn row_entries(
        &self,
        row: usize,
        cols_out: &mut [usize],
        vals_out: &mut [T],
    ) -> CrsResult<usize> {
        let (cols, vals) = self.row(row).ok_or(CrsError::RowOutOfRange {
            row,
            nrows: self.nrows(),
        })?;

        let capacity = cols_out.len().min(vals_out.len());
        if capacity < cols.len() {
            return Err(CrsError::BufferTooSmall {
                required: cols.len(),
                capacity,
            });
        }

        cols_out[..cols.len()].copy_from_slice(cols);
        vals_out[..vals.len()].copy_from_slice(vals);
        Ok(cols.len())
    }

    /// Store `scalar_a * self + scalar_b * b` into `c`
    ///
    /// See [`ops::add`](crate::ops::add).
    pub fn add(
        &self,
        scalar_a: T,
        b: &CrsMatrix<T>,
        scalar_b: T,
        c: &mut CrsMatrix<T>,
    ) -> CrsResult<()> {
        crate::ops::add(self, scalar_a, b, scalar_b, c)
    }

    /// Store the element-wise product `(scalar_a * self) ⊙ (scalar_b * b)` into `c`
    ///
    /// See [`ops::hadamard`](crate::ops::hadamard).
    pub fn hadamard(
        &self,
        scalar_a: T,
        b: &CrsMatrix<T>,
        scalar_b: T,
        c: &mut CrsMatrix<T>,
    ) -> CrsResult<()> {
        crate::ops::hadamard(self, scalar_a, b, scalar_b, c)
    }
}

impl<T: PartialEq> PartialEq for CrsMatrix<T> {
    /// Structural equality; policies are not compared
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.compressed == other.compressed
            && self.row_ptr == other.row_ptr
            && self.col_indices == other.col_indices
            && self.values == other.values
    }
}

/// Group one row by column, summing duplicates, and append the result in
/// ascending column order
///
/// Duplicates are accumulated in storage order under both strategies, so the
/// output is identical whichever one is chosen.
pub(crate) fn group_row_into<T: Float>(
    cols: &[usize],
    vals: &[T],
    strategy: DedupStrategy,
    out_cols: &mut Vec<usize>,
    out_vals: &mut Vec<T>,
) {
    match strategy {
        DedupStrategy::OrderedMap => {
            let mut grouped: BTreeMap<usize, T> = BTreeMap::new();
            for (&col, &val) in cols.iter().zip(vals) {
                grouped
                    .entry(col)
                    .and_modify(|acc| *acc = *acc + val)
                    .or_insert(val);
            }
            for (col, val) in grouped {
                out_cols.push(col);
                out_vals.push(val);
            }
        }
        DedupStrategy::SortMerge => {
            let mut order: Vec<usize> = (0..cols.len()).collect();
            // stable: equal columns keep storage order
            order.sort_by_key(|&k| cols[k]);

            let mut iter = order.into_iter();
            let Some(first) = iter.next() else {
                return;
            };
            let mut col = cols[first];
            let mut acc = vals[first];
            for k in iter {
                if cols[k] == col {
                    acc = acc + vals[k];
                } else {
                    out_cols.push(col);
                    out_vals.push(acc);
                    col = cols[k];
                    acc = vals[k];
                }
            }
            out_cols.push(col);
            out_vals.push(acc);
        }
    }
}
