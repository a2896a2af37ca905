//! Foreign call boundary for externally implemented vector addition.
//!
//! A foreign routine receives two read-only input pointers, a writable output
//! pointer and the element count, fills the output with the elementwise sum and
//! returns whether it succeeded. [`ForeignAccelerator`] lends it the harness's
//! buffers for exactly one call.

use std::ffi::c_int;

use log::debug;

use crate::accelerator::{check_lengths, Accelerator};
use crate::error::AcceleratorError;

/// Signature of a C-ABI vector addition routine.
pub type VectorAddFn =
    unsafe extern "C" fn(a: *const f32, b: *const f32, c: *mut f32, n: c_int) -> bool;

#[cfg(feature = "cuda")]
#[link(name = "cuda_vector_add")]
extern "C" {
    pub fn cuda_vector_add(h_a: *const f32, h_b: *const f32, h_c: *mut f32, n: c_int) -> bool;
}

/// Adapts a [`VectorAddFn`] to the [`Accelerator`] trait.
pub struct ForeignAccelerator {
    name: String,
    routine: VectorAddFn,
}

impl ForeignAccelerator {
    /// # Safety
    ///
    /// `routine` must read at most `n` elements from each input, write at most `n`
    /// elements to the output, and keep no pointer past its return.
    pub unsafe fn new(name: impl Into<String>, routine: VectorAddFn) -> Self {
        Self {
            name: name.into(),
            routine,
        }
    }

    /// The linked `cuda_vector_add` routine.
    #[cfg(feature = "cuda")]
    pub fn cuda() -> Self {
        // SAFETY: cuda_vector_add follows the VectorAddFn contract.
        unsafe { Self::new("CUDA", cuda_vector_add) }
    }
}

impl std::fmt::Debug for ForeignAccelerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForeignAccelerator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Accelerator for ForeignAccelerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&mut self, a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
        check_lengths(a, b)?;
        let n = c_int::try_from(a.len()).map_err(|_| AcceleratorError::TooLarge { len: a.len() })?;
        let mut out = vec![0.0f32; a.len()];

        debug!("calling {} routine with n={}", self.name, n);
        // SAFETY: all three buffers hold exactly `n` elements and outlive the call;
        // `out` is uniquely borrowed and does not alias the inputs.
        let ok = unsafe { (self.routine)(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), n) };

        if ok {
            Ok(out)
        } else {
            Err(AcceleratorError::Failed {
                backend: self.name.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn always_fails(_: *const f32, _: *const f32, _: *mut f32, _: c_int) -> bool {
        false
    }

    #[test]
    fn false_maps_to_failed() {
        let mut accel = unsafe { ForeignAccelerator::new("Stub", always_fails) };
        let err = accel.compute(&[1.0], &[2.0]).unwrap_err();
        assert!(matches!(err, AcceleratorError::Failed { ref backend } if backend == "Stub"));
    }

    #[test]
    fn mismatched_lengths_never_reach_the_routine() {
        let mut accel = unsafe { ForeignAccelerator::new("Stub", always_fails) };
        let err = accel.compute(&[1.0, 2.0], &[2.0]).unwrap_err();
        assert!(matches!(err, AcceleratorError::LengthMismatch { a: 2, b: 1 }));
    }
}
