//! Binary operations on CRS matrices
//!
//! # Operations
//!
//! - **Addition**: `C = αA + βB`, see [`add`]
//! - **Hadamard product**: `C = (αA) ⊙ (βB)`, see [`hadamard`]
//!
//! Both write into a caller-owned output matrix `C` that is expected to be
//! freshly constructed with the operands' row count. The result rows are
//! inserted into a working copy of `C` that is compressed at the end and only
//! then stored back, so the result is always in canonical form and a failed
//! call leaves `C` as it was. The operands are only read and need not be
//! compressed.
//!
//! # Examples
//!
//! ```
//! use crs_matrix::{ops, CrsMatrix};
//!
//! let mut a = CrsMatrix::<f64>::new(2, 3);
//! let mut b = CrsMatrix::<f64>::new(2, 3);
//! a.insert_at_row(0, &[0, 2], &[1.0, 2.0]).unwrap();
//! b.insert_at_row(0, &[2], &[5.0]).unwrap();
//!
//! let mut c = CrsMatrix::new(2, 3);
//! ops::add(&a, 2.0, &b, 1.0, &mut c).unwrap();
//! assert_eq!(c.row(0), Some((&[0, 2][..], &[2.0, 9.0][..])));
//! ```

use num_traits::Float;

use crate::config::{AddStrategy, DedupStrategy};
use crate::crs::{group_row_into, CrsMatrix};
use crate::error::{CrsError, CrsResult};

/// Scaled sparse addition: `C = scalar_a * A + scalar_b * B`
///
/// The row strategy comes from `a`'s configuration:
///
/// - [`AddStrategy::ConcatCompress`]: each output row is the scaled row of `A`
///   followed by the scaled row of `B`, with no column comparison. Compressing
///   `C` afterwards sums the columns both operands share.
/// - [`AddStrategy::SortedMerge`]: the row of `A` is grouped by column and
///   the column-sorted row of `B` is merged into it. Repeated columns are
///   summed in the same order concatenation would use (all of `A`'s entries,
///   then `B`'s, each in storage order), so the result is identical to
///   `ConcatCompress`.
///
/// # Preconditions
///
/// `A`, `B` and `C` have the same number of rows and `A`, `B` the same number
/// of columns. `C` should hold no entries; this is not checked.
///
/// # Errors
///
/// - [`CrsError::ShapeMismatch`] when the preconditions on shape fail
/// - [`CrsError::AlreadyCompressed`] when `C` is already compressed and
///   receives no entries
/// - [`CrsError::ColIndexOutOfBounds`] when `C` uses
///   [`ColumnPolicy::Strict`](crate::config::ColumnPolicy::Strict) and an
///   operand holds a column outside `C`
///
/// `C` is left unchanged on every error.
///
/// # Complexity
///
/// O(m · nnz(C)) for the row insertions plus the cost of one compression.
pub fn add<T: Float>(
    a: &CrsMatrix<T>,
    scalar_a: T,
    b: &CrsMatrix<T>,
    scalar_b: T,
    c: &mut CrsMatrix<T>,
) -> CrsResult<()> {
    CrsError::check_binary_shapes(a.shape(), b.shape(), c.shape())?;

    let strategy = a.config().add;
    let mut out = c.clone();
    let mut cols = Vec::new();
    let mut vals = Vec::new();

    for i in 0..a.nrows() {
        cols.clear();
        vals.clear();

        let (a_cols, a_vals) = a.row_slices(i);
        let (b_cols, b_vals) = b.row_slices(i);

        match strategy {
            AddStrategy::ConcatCompress => {
                cols.extend_from_slice(a_cols);
                vals.extend(a_vals.iter().map(|&v| scalar_a * v));
                cols.extend_from_slice(b_cols);
                vals.extend(b_vals.iter().map(|&v| scalar_b * v));
            }
            AddStrategy::SortedMerge => {
                let (a_cols, a_vals) = scaled_group(a_cols, a_vals, scalar_a);
                let (b_cols, b_vals) = scaled_sort(b_cols, b_vals, scalar_b);
                merge_union(&a_cols, &a_vals, &b_cols, &b_vals, &mut cols, &mut vals);
            }
        }

        out.insert_at_row(i, &cols, &vals)?;
    }

    out.compress()?;
    *c = out;

    tracing::debug!(
        nrows = a.nrows(),
        nnz_a = a.nnz(),
        nnz_b = b.nnz(),
        nnz_c = c.nnz(),
        strategy = ?strategy,
        "sparse addition complete"
    );
    Ok(())
}

/// Scaled element-wise product: `C = (scalar_a * A) ⊙ (scalar_b * B)`
///
/// Each operand row is grouped by column (duplicates summed) after scaling.
/// Only columns present in both rows produce an output entry, holding the
/// product of the two grouped values; a column missing from either operand
/// is an implicit zero and is omitted.
///
/// # Preconditions
///
/// Same as [`add`].
///
/// # Errors
///
/// Same as [`add`].
pub fn hadamard<T: Float>(
    a: &CrsMatrix<T>,
    scalar_a: T,
    b: &CrsMatrix<T>,
    scalar_b: T,
    c: &mut CrsMatrix<T>,
) -> CrsResult<()> {
    CrsError::check_binary_shapes(a.shape(), b.shape(), c.shape())?;

    let mut out = c.clone();
    let mut cols = Vec::new();
    let mut vals = Vec::new();

    for i in 0..a.nrows() {
        cols.clear();
        vals.clear();

        let (a_cols, a_vals) = a.row_slices(i);
        let (b_cols, b_vals) = b.row_slices(i);
        let (a_cols, a_vals) = scaled_group(a_cols, a_vals, scalar_a);
        let (b_cols, b_vals) = scaled_group(b_cols, b_vals, scalar_b);

        let mut ai = 0;
        let mut bi = 0;
        while ai < a_cols.len() && bi < b_cols.len() {
            match a_cols[ai].cmp(&b_cols[bi]) {
                std::cmp::Ordering::Less => ai += 1,
                std::cmp::Ordering::Greater => bi += 1,
                std::cmp::Ordering::Equal => {
                    cols.push(a_cols[ai]);
                    vals.push(a_vals[ai] * b_vals[bi]);
                    ai += 1;
                    bi += 1;
                }
            }
        }

        out.insert_at_row(i, &cols, &vals)?;
    }

    out.compress()?;
    *c = out;

    tracing::debug!(
        nrows = a.nrows(),
        nnz_a = a.nnz(),
        nnz_b = b.nnz(),
        nnz_c = c.nnz(),
        "sparse hadamard product complete"
    );
    Ok(())
}

/// Scale a row, then group it by ascending column
fn scaled_group<T: Float>(cols: &[usize], vals: &[T], scalar: T) -> (Vec<usize>, Vec<T>) {
    let scaled: Vec<T> = vals.iter().map(|&v| scalar * v).collect();
    let mut out_cols = Vec::with_capacity(cols.len());
    let mut out_vals = Vec::with_capacity(cols.len());
    group_row_into(
        cols,
        &scaled,
        DedupStrategy::OrderedMap,
        &mut out_cols,
        &mut out_vals,
    );
    (out_cols, out_vals)
}

/// Scale a row, then stable-sort it by column without merging repeats
fn scaled_sort<T: Float>(cols: &[usize], vals: &[T], scalar: T) -> (Vec<usize>, Vec<T>) {
    let mut order: Vec<usize> = (0..cols.len()).collect();
    order.sort_by_key(|&k| cols[k]);
    let out_cols = order.iter().map(|&k| cols[k]).collect();
    let out_vals = order.iter().map(|&k| scalar * vals[k]).collect();
    (out_cols, out_vals)
}

/// Two-pointer union of a strictly ascending row `a` and an ascending row `b`
/// that may repeat columns
///
/// Each output column starts from `a`'s value (if any) and adds `b`'s
/// entries for that column left to right.
fn merge_union<T: Float>(
    a_cols: &[usize],
    a_vals: &[T],
    b_cols: &[usize],
    b_vals: &[T],
    out_cols: &mut Vec<usize>,
    out_vals: &mut Vec<T>,
) {
    let mut ai = 0;
    let mut bi = 0;

    while ai < a_cols.len() || bi < b_cols.len() {
        let col = match (a_cols.get(ai), b_cols.get(bi)) {
            (Some(&ac), Some(&bc)) => ac.min(bc),
            (Some(&ac), None) => ac,
            (None, Some(&bc)) => bc,
            (None, None) => break,
        };

        let mut acc = if a_cols.get(ai) == Some(&col) {
            ai += 1;
            a_vals[ai - 1]
        } else {
            bi += 1;
            b_vals[bi - 1]
        };
        while b_cols.get(bi) == Some(&col) {
            acc = acc + b_vals[bi];
            bi += 1;
        }

        out_cols.push(col);
        out_vals.push(acc);
    }
}
