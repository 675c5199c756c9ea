//! # Lucida Compute
//!
//! Fourier-transform backend abstraction for the Lucida framework. This
//! crate provides a [`FourierTransform`](backend::FourierTransform) trait
//! that isolates the reconstruction physics in `lucida-core` from the
//! engine performing the discrete transforms.
//!
//! ## Available backends
//!
//! | Backend | Engine | Status |
//! |---------|--------|--------|
//! | CPU ([`CpuFourier`]) | rustfft + Rayon | Implemented |
//!
//! ## Conventions
//!
//! All transforms act along the first two axes of a `(Nx, Ny, D)` array,
//! independently for each of the `D` trailing slices, and leave the zero
//! spatial frequency at index `(0, 0)`. Callers that need a centered
//! spectrum bracket the transform with [`fftshift2`] / [`ifftshift2`].

pub mod backend;
pub mod cpu;
pub mod shift;

pub use backend::{FourierTransform, TransformError};
pub use cpu::CpuFourier;
pub use shift::{fftshift2, ifftshift2};
