//! Core types shared across the Lucida framework.
//!
//! This module defines the data containers the reconstruction pipeline
//! operates on: a recorded 2-D field, the 3-D stack produced by
//! multi-distance reconstruction, and the optical metadata attached to
//! both. The propagation engine treats all of these as read-only and
//! returns new containers; it never mutates its inputs.

use ndarray::{Array2, Array3};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Optical metadata attached to a recorded field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Optics {
    /// Wavelength inside the propagation medium (same length unit as the
    /// pixel spacing), i.e. vacuum wavelength divided by the refractive
    /// index. This is the wavelength all propagation math uses.
    pub med_wavelen: f64,
    /// Polarisation of the illumination, if known. Carried through
    /// untouched; the scalar propagation model does not use it.
    pub polarization: Option<[f64; 2]>,
}

impl Optics {
    /// Create optics metadata for unpolarised illumination.
    pub fn new(med_wavelen: f64) -> Self {
        Self {
            med_wavelen,
            polarization: None,
        }
    }

    /// The wavevector magnitude in the medium, $k = 2\pi / \lambda$.
    pub fn wavevec(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.med_wavelen
    }
}

/// A recorded 2-D optical field: complex samples on a regular pixel grid.
///
/// Holograms are recorded as real intensities; [`Field::from_intensity`]
/// lifts them into this container. Reconstructed planes come back as the
/// same type, so a reconstruction can itself be propagated further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Complex samples, shape `(Nx, Ny)`.
    pub data: Array2<Complex64>,
    /// Pixel spacing `(dx, dy)` in physical length units.
    pub spacing: (f64, f64),
    /// Optical metadata.
    pub optics: Optics,
}

impl Field {
    pub fn new(data: Array2<Complex64>, spacing: (f64, f64), optics: Optics) -> Self {
        Self {
            data,
            spacing,
            optics,
        }
    }

    /// Wrap a recorded (real) intensity image as a complex field.
    ///
    /// Background division or subtraction is the caller's concern; the
    /// samples are used as-is.
    pub fn from_intensity(intensity: Array2<f64>, spacing: (f64, f64), optics: Optics) -> Self {
        Self {
            data: intensity.mapv(|v| Complex64::new(v, 0.0)),
            spacing,
            optics,
        }
    }

    /// Image dimensions `(Nx, Ny)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// The depth-axis description of a reconstructed volume.
///
/// Reconstruction distances need not be evenly spaced, so the third axis is
/// either a uniform grid or an explicit coordinate list. The variant is
/// chosen from the requested distances, never guessed from array shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DepthAxis {
    /// Slices are evenly spaced by `spacing` along the optical axis.
    Uniform { spacing: f64 },
    /// Slices sit at the listed coordinates along the optical axis.
    Irregular { coordinates: Vec<f64> },
}

/// A reconstructed volume: one complex slice per reconstruction distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    /// Complex samples, shape `(Nx, Ny, D)` with the distance axis last.
    pub data: Array3<Complex64>,
    /// In-plane pixel spacing `(dx, dy)`, inherited from the source field.
    pub spacing: (f64, f64),
    /// Depth-axis description.
    pub depth: DepthAxis,
    /// Optical metadata, inherited from the source field.
    pub optics: Optics,
}

/// The result of propagating a field to one or more distances.
///
/// A single distance produces a plane, several produce a stack. The
/// distinction is made from the number of requested distances at the call
/// site, so a degenerate one-slice volume can never leak out.
#[derive(Debug, Clone)]
pub enum Reconstruction {
    /// Result of a single-distance reconstruction.
    Plane(Field),
    /// Result of a multi-distance reconstruction.
    Stack(Volume),
}
