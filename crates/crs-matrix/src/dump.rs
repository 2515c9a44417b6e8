//! Plain-text dump of a CRS matrix
//!
//! The layout is consumed verbatim by external harnesses and must not change:
//!
//! ```text
//! INFORMATION
//! ------------------
//! Number of Rows: <nrows>
//! Number of Columns: <ncols>
//! Number of Non-Zeros: <nnz>
//! VALUES
//! ------------------
//! Row: <i> Col: <col> Value <value>
//! ```
//!
//! One `Row:` line is written per stored entry, rows ascending, entries in
//! storage order. Values use [`format_general`], which matches the default
//! rendering of a C++ output stream (`%g`, six significant digits).
//!
//! # Examples
//!
//! ```
//! use crs_matrix::CrsMatrix;
//!
//! let mut m = CrsMatrix::<f32>::new(2, 2);
//! m.insert_at_row(1, &[0], &[4.1]).unwrap();
//! assert!(m.to_string().ends_with("Row: 1 Col: 0 Value 4.1\n"));
//! ```

use std::fmt;
use std::io::{self, Write};

use num_traits::Float;

use crate::crs::CrsMatrix;

const SEPARATOR: &str = "------------------";

/// Significant digits of the default stream precision
const PRECISION: i32 = 6;

impl<T: Float> fmt::Display for CrsMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INFORMATION")?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Number of Rows: {}", self.nrows())?;
        writeln!(f, "Number of Columns: {}", self.ncols())?;
        writeln!(f, "Number of Non-Zeros: {}", self.nnz())?;
        writeln!(f, "VALUES")?;
        writeln!(f, "{}", SEPARATOR)?;
        for (row, col, value) in self.iter_nonzero() {
            writeln!(
                f,
                "Row: {} Col: {} Value {}",
                row,
                col,
                format_general(value.to_f64().unwrap_or(f64::NAN))
            )?;
        }
        Ok(())
    }
}

impl<T: Float> CrsMatrix<T> {
    /// Write the text dump to `writer`
    pub fn dump<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }

    /// Write the text dump to standard output
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.dump(&mut handle)
    }
}

/// Format `value` like `printf("%g")`
///
/// Six significant digits, trailing zeros removed, scientific notation when
/// the decimal exponent is below -4 or at least 6.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the target precision first fixes the exponent, e.g. 999999.5 -> 1e+06
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
