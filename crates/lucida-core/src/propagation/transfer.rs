//! The free-space optical transfer function.
//!
//! Propagation over a distance $d$ multiplies the angular spectrum of a
//! field by
//!
//! $$
//! G(m, n; d) = \exp\!\left(-i \frac{2\pi d}{\lambda}
//! \sqrt{1 - \left(\frac{\lambda n}{N_x \Delta x}\right)^2
//!         - \left(\frac{\lambda m}{N_y \Delta y}\right)^2}\,\right)
//! $$
//!
//! where the radicand is the squared cosine of the propagation angle given
//! by the grating equation. Where it is negative the spatial frequency
//! corresponds to an evanescent wave, which does not propagate: the kernel
//! is identically zero there, and zero everywhere outside a finite
//! frequency disk whose radius shrinks as $|d|$ grows. The kernel array is
//! therefore sized adaptively — only as large as the distance demanding the
//! most support requires — which bounds memory for near-field
//! reconstruction stacks.
//!
//! # References
//! 1. Kreis, *Handbook of Holographic Interferometry* (Wiley, 2005),
//!    equation 3.79 (page 116).
//! 2. Kreis, *Optical Engineering* **41**(8):1829 (2002), section 5
//!    (cascaded free-space propagation, finite transfer-function support).

use ndarray::{Array2, Array3, Axis};
use num_complex::Complex64;

use super::PropagationError;

/// Optional refinements of the transfer function.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferOptions {
    /// Number of cascaded free-space propagation steps; 0 disables
    /// cascading. When > 0, the kernel is evaluated at `d / cascade_steps`
    /// and raised elementwise to the `cascade_steps`-th power.
    pub cascade_steps: u32,
    /// Gradient-filter offset; 0 disables the filter. When nonzero, the
    /// kernel at `d + gradient_offset` is subtracted from the kernel at
    /// `d`, cancelling the slowly varying common part and enhancing
    /// high-frequency features.
    pub gradient_offset: f64,
}

/// Build the transfer function for every distance in `distances`.
///
/// # Arguments
/// * `shape` - Dimensions `(Nx, Ny)` of the image to be filtered; the
///   kernel never exceeds them.
/// * `spacing` - Pixel spacing `(dx, dy)`.
/// * `med_wavelen` - Wavelength in the propagation medium.
/// * `distances` - Reconstruction distances; negative values propagate
///   backward along the axis. Must be nonempty, and must not contain an
///   exact zero when cascading.
/// * `options` - Cascade and gradient-filter settings.
///
/// # Returns
/// The kernel as a `(Kx, Ky, D)` array with `Kx`, `Ky` even, centered on
/// the zero spatial frequency, one slice per distance. `Kx <= Nx` and
/// `Ky <= Ny`; frequencies outside the kernel are implicitly zero and must
/// be zeroed in any spectrum it is applied to (see
/// [`super::spectrum::apply_transfer_function`]).
pub fn transfer_function(
    shape: (usize, usize),
    spacing: (f64, f64),
    med_wavelen: f64,
    distances: &[f64],
    options: &TransferOptions,
) -> Result<Array3<Complex64>, PropagationError> {
    validate_grid(shape, spacing, med_wavelen)?;
    if distances.is_empty() {
        return Err(PropagationError::EmptyDistances);
    }
    let cascade = options.cascade_steps;
    if cascade > 0 && distances.iter().any(|&d| d == 0.0) {
        return Err(PropagationError::ZeroDistanceCascade);
    }

    // Cascading evaluates the kernel at the per-step distance d / C and
    // raises it to the C-th power; the step distances also size the
    // support window, so the window is never undersized for the steps.
    let scaled: Vec<f64> = if cascade > 0 {
        distances.iter().map(|d| d / f64::from(cascade)).collect()
    } else {
        distances.to_vec()
    };

    let (nx, ny) = shape;
    let (dx, dy) = spacing;
    let half_m = support_half_width(nx, dx, med_wavelen, &scaled);
    let half_n = support_half_width(ny, dy, med_wavelen, &scaled);

    // Squared cosine of the propagation angle on the centered frequency
    // grid. Negative values mark evanescent components.
    let root = Array2::from_shape_fn((2 * half_m, 2 * half_n), |(i, j)| {
        let m = i as f64 - half_m as f64;
        let n = j as f64 - half_n as f64;
        1.0 - (med_wavelen * n / (nx as f64 * dx)).powi(2)
            - (med_wavelen * m / (ny as f64 * dy)).powi(2)
    });

    let mut kernel = Array3::<Complex64>::zeros((2 * half_m, 2 * half_n, scaled.len()));
    for ((i, j), &r) in root.indexed_iter() {
        if r < 0.0 {
            // Evanescent: exactly zero for every distance and any cascade.
            continue;
        }
        let angular = 2.0 * std::f64::consts::PI * r.sqrt() / med_wavelen;
        for (k, &d) in scaled.iter().enumerate() {
            let mut value = Complex64::cis(-angular * d);
            if options.gradient_offset != 0.0 {
                value -= Complex64::cis(-angular * (d + options.gradient_offset));
            }
            if cascade > 0 {
                value = value.powu(cascade);
            }
            kernel[[i, j, k]] = value;
        }
    }

    Ok(kernel)
}

/// Build the transfer function for a single distance as a 2-D kernel.
pub fn transfer_function_single(
    shape: (usize, usize),
    spacing: (f64, f64),
    med_wavelen: f64,
    distance: f64,
    options: &TransferOptions,
) -> Result<Array2<Complex64>, PropagationError> {
    let kernel = transfer_function(shape, spacing, med_wavelen, &[distance], options)?;
    Ok(kernel.index_axis_move(Axis(2), 0))
}

pub(super) fn validate_grid(
    shape: (usize, usize),
    spacing: (f64, f64),
    med_wavelen: f64,
) -> Result<(), PropagationError> {
    if shape.0 == 0 || shape.1 == 0 {
        return Err(PropagationError::InvalidShape(shape.0, shape.1));
    }
    if spacing.0 <= 0.0 || spacing.1 <= 0.0 {
        return Err(PropagationError::InvalidSpacing(spacing.0, spacing.1));
    }
    if med_wavelen <= 0.0 {
        return Err(PropagationError::InvalidWavelength(med_wavelen));
    }
    Ok(())
}

/// Half-width of the kernel support along one axis, in frequency samples.
///
/// The support disk shrinks as $|d|$ grows, so the width is governed by
/// the smallest requested $|d|$: `dim² · step² / (2 λ |d|)`, rounded up by
/// one sample. A distance of zero makes the support unbounded; that is
/// recovered locally by falling back to half the image, never surfaced to
/// the caller. The result is clamped so the kernel never exceeds the
/// image.
fn support_half_width(dim: usize, step: f64, med_wavelen: f64, distances: &[f64]) -> usize {
    let raw = distances
        .iter()
        .map(|d| (dim as f64).powi(2) * step * step / (2.0 * med_wavelen * d.abs()))
        .fold(0.0_f64, f64::max);

    let half = if raw.is_finite() && raw < (usize::MAX / 2) as f64 {
        raw as usize + 1
    } else {
        log::debug!(
            "transfer-function support is unbounded, falling back to {} samples",
            dim / 2
        );
        dim / 2
    };

    dim.min(2 * half) / 2
}
