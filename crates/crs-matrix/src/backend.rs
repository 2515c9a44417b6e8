//! Execution targets for binary CRS operations
//!
//! Binary operations are reached through [`CrsBackend`], so a caller can pick
//! where they run without changing the call site. Every backend has the same
//! pre- and postconditions as the functions in [`ops`](crate::ops).
//!
//! # Current Implementation
//!
//! - [`HostBackend`] runs the algorithms of [`ops`](crate::ops) on the
//!   calling thread.
//! - [`DeviceBackend`] is a placeholder for accelerator execution. It holds
//!   no matrix state and reports [`CrsError::UnsupportedTarget`] for every
//!   operation. Moving a matrix to a device will need an explicit transfer
//!   step; host matrices are never shared with a device backend.
//!
//! # Example
//!
//! ```
//! use crs_matrix::backend::{backend_for, ExecutionTarget};
//! use crs_matrix::CrsMatrix;
//!
//! let mut a = CrsMatrix::<f32>::new(2, 2);
//! a.insert_at_row(1, &[0], &[2.0]).unwrap();
//! let b = a.clone();
//! let mut c = CrsMatrix::new(2, 2);
//!
//! let backend = backend_for::<f32>(ExecutionTarget::Host);
//! backend.add(&a, 1.0, &b, 1.0, &mut c).unwrap();
//! assert_eq!(c.values(), &[4.0]);
//! ```

use std::fmt;

use num_traits::Float;

use crate::crs::CrsMatrix;
use crate::error::{CrsError, CrsResult};
use crate::ops;

/// Where an operation executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionTarget {
    /// Calling thread on the host (always available)
    Host,
    /// Accelerator device with the given ordinal
    Device(usize),
}

impl fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionTarget::Host => write!(f, "host"),
            ExecutionTarget::Device(id) => write!(f, "device:{}", id),
        }
    }
}

/// Binary CRS operations behind an execution target
pub trait CrsBackend<T: Float> {
    /// Target this backend executes on
    fn target(&self) -> ExecutionTarget;

    /// `C = scalar_a * A + scalar_b * B`, compressed
    fn add(
        &self,
        a: &CrsMatrix<T>,
        scalar_a: T,
        b: &CrsMatrix<T>,
        scalar_b: T,
        c: &mut CrsMatrix<T>,
    ) -> CrsResult<()>;

    /// `C = (scalar_a * A) ⊙ (scalar_b * B)`, compressed
    fn hadamard(
        &self,
        a: &CrsMatrix<T>,
        scalar_a: T,
        b: &CrsMatrix<T>,
        scalar_b: T,
        c: &mut CrsMatrix<T>,
    ) -> CrsResult<()>;
}

/// Host-resident execution
#[derive(Debug, Clone, Copy, Default)]
pub struct HostBackend;

impl<T: Float> CrsBackend<T> for HostBackend {
    fn target(&self) -> ExecutionTarget {
        ExecutionTarget::Host
    }

    fn add(
        &self,
        a: &CrsMatrix<T>,
        scalar_a: T,
        b: &CrsMatrix<T>,
        scalar_b: T,
        c: &mut CrsMatrix<T>,
    ) -> CrsResult<()> {
        ops::add(a, scalar_a, b, scalar_b, c)
    }

    fn hadamard(
        &self,
        a: &CrsMatrix<T>,
        scalar_a: T,
        b: &CrsMatrix<T>,
        scalar_b: T,
        c: &mut CrsMatrix<T>,
    ) -> CrsResult<()> {
        ops::hadamard(a, scalar_a, b, scalar_b, c)
    }
}

/// Accelerator execution (not available yet)
#[derive(Debug, Clone, Copy)]
pub struct DeviceBackend {
    device_id: usize,
}

impl DeviceBackend {
    /// Backend bound to accelerator `device_id`
    pub fn new(device_id: usize) -> Self {
        Self { device_id }
    }

    fn unsupported(&self, operation: &'static str) -> CrsError {
        tracing::warn!(device = self.device_id, operation, "device execution requested");
        CrsError::UnsupportedTarget {
            target: ExecutionTarget::Device(self.device_id).to_string(),
            operation,
        }
    }
}

impl<T: Float> CrsBackend<T> for DeviceBackend {
    fn target(&self) -> ExecutionTarget {
        ExecutionTarget::Device(self.device_id)
    }

    fn add(
        &self,
        _a: &CrsMatrix<T>,
        _scalar_a: T,
        _b: &CrsMatrix<T>,
        _scalar_b: T,
        _c: &mut CrsMatrix<T>,
    ) -> CrsResult<()> {
        Err(self.unsupported("add"))
    }

    fn hadamard(
        &self,
        _a: &CrsMatrix<T>,
        _scalar_a: T,
        _b: &CrsMatrix<T>,
        _scalar_b: T,
        _c: &mut CrsMatrix<T>,
    ) -> CrsResult<()> {
        Err(self.unsupported("hadamard"))
    }
}

/// Select the backend for `target`
pub fn backend_for<T: Float>(target: ExecutionTarget) -> Box<dyn CrsBackend<T>> {
    match target {
        ExecutionTarget::Host => Box::new(HostBackend),
        ExecutionTarget::Device(id) => Box::new(DeviceBackend::new(id)),
    }
}
