//! # crs-matrix
//!
//! Compressed Row Storage (CRS/CSR) sparse matrices built for incremental
//! assembly.
//!
//! This crate provides:
//! - [`CrsMatrix`]: flat row-pointer / column / value storage
//! - Insertion of unsorted, possibly duplicate entries at the end of a row
//! - One-shot compression merging duplicate columns and sorting rows
//! - Scaled addition and element-wise (Hadamard) product
//! - Bounded row extraction into caller buffers
//! - A byte-stable text dump
//!
//! Storage is three flat `Vec`s so a matrix can later be copied to an
//! accelerator in a single transfer; see [`backend`] for execution targets.
//!
//! # Example
//!
//! ```
//! use crs_matrix::CrsMatrix;
//!
//! let mut a = CrsMatrix::<f64>::new(3, 3);
//! a.insert_at_row(0, &[2, 0, 2], &[1.0, 4.0, 1.0]).unwrap();
//! a.compress().unwrap();
//!
//! let mut b = CrsMatrix::<f64>::new(3, 3);
//! b.insert_at_row(0, &[1], &[3.0]).unwrap();
//!
//! let mut c = CrsMatrix::new(3, 3);
//! a.add(1.0, &b, 2.0, &mut c).unwrap();
//!
//! let mut cols = [0usize; 3];
//! let mut vals = [0.0; 3];
//! let n = c.row_entries(0, &mut cols, &mut vals).unwrap();
//! assert_eq!(&cols[..n], &[0, 1, 2]);
//! assert_eq!(&vals[..n], &[4.0, 6.0, 2.0]);
//! ```

pub mod backend;
pub mod config;
pub mod crs;
pub mod dump;
pub mod error;
pub mod ops;
pub mod splice;
pub mod tracing_support;

// Re-exports
pub use backend::{backend_for, CrsBackend, DeviceBackend, ExecutionTarget, HostBackend};
pub use config::*;
pub use crs::CrsMatrix;
pub use dump::format_general;
pub use error::*;
