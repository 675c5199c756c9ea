//! Application of a transfer function to a centered spectrum.
//!
//! The transfer function is analytically zero outside its finite support,
//! so applying it is a two-part operation: multiply inside the overlap with
//! the kernel, and force everything outside to exactly zero. The zeroing is
//! not an optimization — skipping it would leave spurious high-frequency
//! energy from the recorded hologram in the reconstruction.
//!
//! The convention throughout is that index `N/2` along each spatial axis is
//! the zero spatial frequency (a `fftshift`-centered spectrum).

use ndarray::{s, Array3, Zip};
use num_complex::Complex64;

use super::PropagationError;

/// Multiply `spectrum` by `kernel` over the kernel's support and zero the
/// rest.
///
/// # Arguments
/// * `spectrum` - Centered spectrum of shape `(Nx, Ny, D)`, one slice per
///   distance.
/// * `kernel` - Transfer function of shape `(Kx, Ky, D)` with
///   `Kx <= Nx`, `Ky <= Ny`, centered on the same zero-frequency origin.
///
/// # Returns
/// A new array with the same shape as `spectrum`. Every element strictly
/// outside the kernel's spatial support is exactly zero in every distance
/// slice.
pub fn apply_transfer_function(
    spectrum: &Array3<Complex64>,
    kernel: &Array3<Complex64>,
) -> Result<Array3<Complex64>, PropagationError> {
    let (nx, ny, nd) = spectrum.dim();
    let (kx, ky, kd) = kernel.dim();

    if kx > nx || ky > ny {
        return Err(PropagationError::KernelExceedsSpectrum {
            kernel_x: kx,
            kernel_y: ky,
            spectrum_x: nx,
            spectrum_y: ny,
        });
    }
    if kd != nd {
        return Err(PropagationError::DepthMismatch {
            kernel: kd,
            spectrum: nd,
        });
    }

    // Both arrays are centered on index N/2, so the kernel overlays the
    // spectrum symmetrically about the zero-frequency bin. Starting from a
    // zeroed output makes the outside-support zeroing structural.
    let row = nx / 2 - kx / 2;
    let col = ny / 2 - ky / 2;

    let mut filtered = Array3::<Complex64>::zeros((nx, ny, nd));
    Zip::from(filtered.slice_mut(s![row..row + kx, col..col + ky, ..]))
        .and(spectrum.slice(s![row..row + kx, col..col + ky, ..]))
        .and(kernel)
        .for_each(|out, &spec, &g| *out = spec * g);

    Ok(filtered)
}
