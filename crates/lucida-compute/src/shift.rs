//! Spectrum centering helpers.
//!
//! The transform backends leave the zero spatial frequency at index
//! `(0, 0)`; the reconstruction code works on spectra centered at
//! `(Nx/2, Ny/2)`. These two rolls convert between the conventions along
//! the first two axes only, leaving the depth axis untouched. For
//! even-sized axes the two are identical; for odd sizes they are exact
//! inverses of each other.

use ndarray::Array3;

/// Move the zero-frequency bin from index `(0, 0)` to `(Nx/2, Ny/2)`.
pub fn fftshift2<A: Clone>(data: &Array3<A>) -> Array3<A> {
    let (nx, ny, _) = data.dim();
    let (sx, sy) = ((nx + 1) / 2, (ny + 1) / 2);
    Array3::from_shape_fn(data.dim(), |(i, j, k)| {
        data[[(i + sx) % nx, (j + sy) % ny, k]].clone()
    })
}

/// Move the zero-frequency bin from index `(Nx/2, Ny/2)` back to `(0, 0)`.
pub fn ifftshift2<A: Clone>(data: &Array3<A>) -> Array3<A> {
    let (nx, ny, _) = data.dim();
    let (sx, sy) = (nx / 2, ny / 2);
    Array3::from_shape_fn(data.dim(), |(i, j, k)| {
        data[[(i + sx) % nx, (j + sy) % ny, k]].clone()
    })
}
