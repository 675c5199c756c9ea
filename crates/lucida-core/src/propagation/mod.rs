//! Numerical propagation of recorded wavefronts.
//!
//! A hologram records the intensity of an interference pattern; the object
//! it encodes is recovered by propagating the recorded field backward or
//! forward along the optical axis. In the angular-spectrum picture this is
//! a multiplication in the spatial-frequency domain:
//!
//! $$
//! U(x, y; d) = \mathcal{F}^{-1}\bigl[ \mathcal{F}[U(x, y; 0)] \cdot
//! G(m, n; d) \bigr]
//! $$
//!
//! where $G$ is the free-space transfer function built by
//! [`transfer::transfer_function`]. The [`Propagator`] orchestrates the
//! pipeline for one or many reconstruction distances; each distance slice
//! is independent of every other.
//!
//! # Reference
//! Kreis, *Handbook of Holographic Interferometry* (Wiley, 2005), ch. 3.

pub mod impulse;
pub mod spectrum;
pub mod transfer;

use ndarray::{Array3, Axis};
use num_complex::Complex64;
use thiserror::Error;

use lucida_compute::{fftshift2, ifftshift2, FourierTransform, TransformError};

use crate::types::{DepthAxis, Field, Reconstruction, Volume};

use self::transfer::TransferOptions;

/// Errors that can occur while building kernels or reconstructing.
///
/// All invalid-parameter conditions are detected eagerly at the start of a
/// call; no partial results are ever returned.
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("Wavelength must be positive, got {0}")]
    InvalidWavelength(f64),

    #[error("Pixel spacing must be positive in both directions, got ({0}, {1})")]
    InvalidSpacing(f64, f64),

    #[error("Image shape must be nonzero in both dimensions, got {0}x{1}")]
    InvalidShape(usize, usize),

    #[error("At least one propagation distance is required")]
    EmptyDistances,

    #[error("Cascaded propagation is undefined for a distance of exactly zero")]
    ZeroDistanceCascade,

    #[error(
        "Transfer function ({kernel_x}x{kernel_y}) exceeds the spectrum ({spectrum_x}x{spectrum_y})"
    )]
    KernelExceedsSpectrum {
        kernel_x: usize,
        kernel_y: usize,
        spectrum_x: usize,
        spectrum_y: usize,
    },

    #[error("Kernel carries {kernel} distance slices but the spectrum carries {spectrum}")]
    DepthMismatch { kernel: usize, spectrum: usize },

    #[error("Impulse response requires even image dimensions, got {0}x{1}")]
    OddShape(usize, usize),

    #[error("Impulse response is singular at a distance of exactly zero")]
    SingularDistance,

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Reconstructs a field at one or many distances along the optical axis.
///
/// The propagator holds the Fourier collaborator and the two optional
/// kernel refinements. It is stateless across calls: every call builds its
/// kernel fresh and returns new containers.
pub struct Propagator<'a> {
    fourier: &'a dyn FourierTransform,
    /// Offset for the contrast-enhancing gradient filter. If nonzero, a
    /// second kernel at distance `d + gradient_offset` is subtracted from
    /// each kernel, cancelling the smoothly varying part of the
    /// reconstruction and enhancing rapidly varying features.
    pub gradient_offset: f64,
    /// Number of cascaded free-space propagation steps. If > 0, each
    /// kernel is computed at `d / cascade_steps` and raised to the
    /// `cascade_steps`-th power, improving numerical accuracy for long
    /// propagation distances.
    pub cascade_steps: u32,
}

impl<'a> Propagator<'a> {
    /// Create a plain propagator with no gradient filter and no cascading.
    pub fn new(fourier: &'a dyn FourierTransform) -> Self {
        Self {
            fourier,
            gradient_offset: 0.0,
            cascade_steps: 0,
        }
    }

    /// Create a propagator that applies the gradient filter with the given
    /// offset.
    pub fn with_gradient_filter(fourier: &'a dyn FourierTransform, offset: f64) -> Self {
        Self {
            fourier,
            gradient_offset: offset,
            cascade_steps: 0,
        }
    }

    /// Propagate `field` to every distance in `distances`.
    ///
    /// Distances may be negative (propagation backward along the axis) and
    /// need not be ordered or evenly spaced. A single distance returns
    /// [`Reconstruction::Plane`]; several return [`Reconstruction::Stack`]
    /// whose depth axis is uniform exactly when the consecutive distance
    /// differences agree within floating tolerance.
    pub fn propagate(
        &self,
        field: &Field,
        distances: &[f64],
    ) -> Result<Reconstruction, PropagationError> {
        let options = TransferOptions {
            cascade_steps: self.cascade_steps,
            gradient_offset: self.gradient_offset,
        };
        // Validates shape, spacing, wavelength, and the distance set.
        let kernel = transfer::transfer_function(
            field.shape(),
            field.spacing,
            field.optics.med_wavelen,
            distances,
            &options,
        )?;

        let (nx, ny) = field.shape();
        let nd = distances.len();
        log::debug!(
            "propagating {}x{} field to {} distance(s), kernel support {}x{}",
            nx,
            ny,
            nd,
            kernel.dim().0,
            kernel.dim().1
        );

        let mut plane = field.data.clone().insert_axis(Axis(2));
        self.fourier.fft2_inplace(&mut plane)?;
        let plane = fftshift2(&plane);

        // One copy of the spectrum per requested distance; the filter then
        // treats every slice independently.
        let mut stack = Array3::<Complex64>::zeros((nx, ny, nd));
        for k in 0..nd {
            stack
                .index_axis_mut(Axis(2), k)
                .assign(&plane.index_axis(Axis(2), 0));
        }

        let filtered = spectrum::apply_transfer_function(&stack, &kernel)?;

        let mut reconstructed = ifftshift2(&filtered);
        // The buffer is owned here, so the destructive inverse is safe.
        self.fourier.ifft2_inplace(&mut reconstructed)?;

        if nd == 1 {
            let data = reconstructed.index_axis_move(Axis(2), 0);
            Ok(Reconstruction::Plane(Field::new(
                data,
                field.spacing,
                field.optics.clone(),
            )))
        } else {
            let depth = match uniform_spacing(distances) {
                Some(spacing) => DepthAxis::Uniform { spacing },
                None => DepthAxis::Irregular {
                    coordinates: distances.to_vec(),
                },
            };
            Ok(Reconstruction::Stack(Volume {
                data: reconstructed,
                spacing: field.spacing,
                depth,
                optics: field.optics.clone(),
            }))
        }
    }

    /// Propagate `field` to a single distance, returning the plane directly.
    pub fn propagate_to(&self, field: &Field, distance: f64) -> Result<Field, PropagationError> {
        match self.propagate(field, &[distance])? {
            Reconstruction::Plane(plane) => Ok(plane),
            Reconstruction::Stack(_) => unreachable!("one distance always packages as a plane"),
        }
    }
}

/// The common difference of `distances` if they form a uniform grid.
///
/// Uses the same tolerances as numpy's `allclose` (rtol 1e-5, atol 1e-8),
/// so reconstruction stacks package the way the recorded data suggests.
fn uniform_spacing(distances: &[f64]) -> Option<f64> {
    let first = distances[1] - distances[0];
    let close = |a: f64, b: f64| (a - b).abs() <= 1e-8 + 1e-5 * b.abs();
    if distances.windows(2).all(|w| close(w[1] - w[0], first)) {
        Some(first)
    } else {
        None
    }
}
