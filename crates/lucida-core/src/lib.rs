//! # Lucida Core
//!
//! The numerical backbone of the Lucida framework. This crate reconstructs
//! a wavefront at arbitrary distances along the optical axis from a single
//! recorded hologram, using scalar diffraction theory evaluated in the
//! spatial-frequency domain.
//!
//! ## Architecture
//!
//! Reconstruction is driven by the [`propagation::Propagator`], which
//! forward-transforms a [`types::Field`], multiplies the spectrum by the
//! free-space transfer function, and inverse-transforms the result for each
//! requested distance. The discrete transforms themselves live behind the
//! [`lucida_compute::FourierTransform`] trait so the physics here is
//! independent of the FFT engine.
//!
//! ## Modules
//!
//! - [`types`] — Field, volume, and optics containers.
//! - [`propagation`] — The propagation engine: transfer function, spectrum
//!   filter, impulse response, and the orchestrating propagator.
//!
//! ## Units
//!
//! All distances, wavelengths, and pixel spacings must be expressed in the
//! same length unit, and the wavelength is always the wavelength *inside
//! the propagation medium* (vacuum wavelength divided by the refractive
//! index).

pub mod propagation;
pub mod types;

pub use propagation::{PropagationError, Propagator};
pub use types::{DepthAxis, Field, Optics, Reconstruction, Volume};
