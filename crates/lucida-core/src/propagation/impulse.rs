//! The real-space impulse response of free-space propagation.
//!
//! The spatial-domain counterpart of the transfer function: the spherical
//! point-spread kernel of scalar diffraction,
//!
//! $$
//! h(m, n; d) = \frac{i}{\lambda}
//! \frac{\exp\!\left(-i k \sqrt{d^2 + (m \Delta x)^2 + (n \Delta y)^2}\right)}
//!      {\sqrt{d^2 + (m \Delta x)^2 + (n \Delta y)^2}}
//! $$
//!
//! for integer pixel offsets $(m, n)$ from the image center. Convolving a
//! recorded field with this kernel propagates it a distance $d$, which is
//! useful when the frequency-domain route is not.
//!
//! The kernel is defined everywhere except at $d = 0$ exactly at the
//! center pixel, where the spherical wave is singular. Rather than leave
//! that to divide-by-zero fallout, a distance of exactly zero is rejected
//! up front; zero-distance reconstruction belongs to the transfer-function
//! path, where it is well defined.
//!
//! # Reference
//! Schnars and Jüptner, *Digital recording and numerical reconstruction of
//! holograms*, Meas. Sci. Technol. **13** (2002), equation 3.18 (page R91).

use ndarray::Array3;
use num_complex::Complex64;

use super::transfer::validate_grid;
use super::PropagationError;

/// Build the impulse-response kernel for every distance in `distances`.
///
/// # Arguments
/// * `shape` - Image dimensions `(Nx, Ny)`; both must be even, since the
///   kernel is centered on the pixel `(Nx/2, Ny/2)` and odd shapes have no
///   well-defined centering.
/// * `spacing` - Pixel spacing `(dx, dy)`.
/// * `med_wavelen` - Wavelength in the propagation medium.
/// * `wavevec` - Wavevector magnitude in the medium, $2\pi / \lambda$.
/// * `distances` - Propagation distances; all must be nonzero.
///
/// # Returns
/// The kernel as a `(Nx, Ny, D)` array, one slice per distance.
pub fn impulse_response(
    shape: (usize, usize),
    spacing: (f64, f64),
    med_wavelen: f64,
    wavevec: f64,
    distances: &[f64],
) -> Result<Array3<Complex64>, PropagationError> {
    validate_grid(shape, spacing, med_wavelen)?;
    if distances.is_empty() {
        return Err(PropagationError::EmptyDistances);
    }
    if shape.0 % 2 != 0 || shape.1 % 2 != 0 {
        return Err(PropagationError::OddShape(shape.0, shape.1));
    }
    if distances.iter().any(|&d| d == 0.0) {
        return Err(PropagationError::SingularDistance);
    }

    let (nx, ny) = shape;
    let (dx, dy) = spacing;
    let (half_m, half_n) = (nx / 2, ny / 2);
    let amplitude = Complex64::new(0.0, 1.0 / med_wavelen);

    let kernel = Array3::from_shape_fn((nx, ny, distances.len()), |(i, j, k)| {
        let m = i as f64 - half_m as f64;
        let n = j as f64 - half_n as f64;
        let d = distances[k];
        let root = (d * d + (m * dx).powi(2) + (n * dy).powi(2)).sqrt();
        amplitude * Complex64::cis(-wavevec * root) / root
    });

    Ok(kernel)
}
