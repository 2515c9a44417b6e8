//! CRS Matrix Walkthrough
//!
//! Builds a small matrix step by step and dumps it after each step:
//! - Two entries inserted into rows 0 and 4
//! - The same two duplicate entries appended to row 4 twice
//! - Compression merging the duplicates
//! - A scaled addition of two matrices
//!
//! Run with: cargo run --example crs_demo
//! Set `RUST_LOG=crs_matrix=trace` and build with `--features subscriber` to
//! see the operation log.

use crs_matrix::tracing_support::{init_tracing, TracingConfig};
use crs_matrix::CrsMatrix;

fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default())?;

    let (rows, cols) = (5, 5);
    let mut matrix = CrsMatrix::<f32>::new(rows, cols);
    matrix.print()?;

    let mut col_values = [1, 4];
    let mut values = [4.1f32, 2.0];

    matrix.insert_at_row(0, &col_values, &values)?;
    matrix.print()?;

    matrix.insert_at_row(4, &col_values, &values)?;
    matrix.print()?;

    col_values = [2, 0];
    values = [3.1, 1.7];
    matrix.insert_at_row(4, &col_values, &values)?;
    matrix.insert_at_row(4, &col_values, &values)?;
    matrix.compress()?;
    matrix.print()?;

    // 3*A + 2*B where B shares row 4 with A
    let mut other = CrsMatrix::<f32>::new(rows, cols);
    other.insert_at_row(4, &[4, 3], &[1.0, 0.5])?;
    other.compress()?;

    let mut sum = CrsMatrix::<f32>::new(rows, cols);
    matrix.add(3.0, &other, 2.0, &mut sum)?;
    sum.print()?;

    Ok(())
}
