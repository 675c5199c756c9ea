//! Fourier-transform trait and error type.
//!
//! The [`FourierTransform`] trait abstracts over discrete-Fourier-transform
//! engines so that the reconstruction code in `lucida-core` never touches a
//! concrete FFT library. Implementations must satisfy the contract spelled
//! out on the trait methods; the reconstruction math is only correct if
//! they do.

use ndarray::Array3;
use num_complex::Complex64;
use thiserror::Error;

/// Errors originating from a transform backend.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Cannot transform an array with a zero-length axis (shape {0}x{1}x{2})")]
    EmptyInput(usize, usize, usize),

    #[error("Transform engine error: {0}")]
    EngineError(String),
}

/// Abstraction over 2-D discrete Fourier transform engines.
///
/// The contract, which `lucida-core` relies on:
///
/// - Transforms act along the **first two axes** of a `(Nx, Ny, D)` array
///   and treat each of the `D` trailing slices independently.
/// - The forward transform leaves the zero spatial frequency at index
///   `(0, 0)` (it is *not* centered). Centering is the caller's concern.
/// - The inverse transform is the exact algebraic inverse of the forward
///   one up to floating-point error, i.e. it carries the `1/(Nx*Ny)`
///   normalization.
///
/// The `_inplace` variants overwrite their argument and exist so callers
/// that own their buffers can skip an allocation; the allocating variants
/// are the default and never alias their input.
pub trait FourierTransform: Send + Sync {
    /// Forward 2-D DFT along the first two axes, overwriting `data`.
    fn fft2_inplace(&self, data: &mut Array3<Complex64>) -> Result<(), TransformError>;

    /// Inverse 2-D DFT along the first two axes, overwriting `data`.
    fn ifft2_inplace(&self, data: &mut Array3<Complex64>) -> Result<(), TransformError>;

    /// Forward 2-D DFT along the first two axes, returning a new array.
    fn fft2(&self, data: &Array3<Complex64>) -> Result<Array3<Complex64>, TransformError> {
        let mut out = data.clone();
        self.fft2_inplace(&mut out)?;
        Ok(out)
    }

    /// Inverse 2-D DFT along the first two axes, returning a new array.
    fn ifft2(&self, data: &Array3<Complex64>) -> Result<Array3<Complex64>, TransformError> {
        let mut out = data.clone();
        self.ifft2_inplace(&mut out)?;
        Ok(out)
    }
}
