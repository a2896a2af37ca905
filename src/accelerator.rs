//! The accelerated-computation capability the harness benchmarks against.

use crate::cpu;
use crate::error::AcceleratorError;

/// A backend that adds two vectors somewhere other than the reference loop.
///
/// The call is synchronous: it either returns the full output or an error.
/// Implementations only borrow the inputs for the duration of the call.
pub trait Accelerator {
    /// Short backend name used in diagnostics, e.g. `"CUDA"`.
    fn name(&self) -> &str;

    fn compute(&mut self, a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError>;
}

impl<A: Accelerator + ?Sized> Accelerator for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute(&mut self, a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
        (**self).compute(a, b)
    }
}

/// Runs the addition on the host. Useful where no device is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostAccelerator;

impl Accelerator for HostAccelerator {
    fn name(&self) -> &str {
        "Host"
    }

    fn compute(&mut self, a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
        check_lengths(a, b)?;
        Ok(cpu::add_vectors_cpu(a, b))
    }
}

pub(crate) fn check_lengths(a: &[f32], b: &[f32]) -> Result<(), AcceleratorError> {
    if a.len() != b.len() {
        return Err(AcceleratorError::LengthMismatch {
            a: a.len(),
            b: b.len(),
        });
    }
    Ok(())
}
