//! CPU Fourier backend using rustfft, parallelized with Rayon.

use std::sync::Arc;

use ndarray::{Array3, Axis, Zip};
use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};

use crate::backend::{FourierTransform, TransformError};

/// Transform backend that runs rustfft plans across threads via Rayon.
///
/// The planner is constructed per call: the backend holds no state between
/// calls, so a single instance can be shared freely across threads.
pub struct CpuFourier;

impl CpuFourier {
    pub fn new() -> Self {
        Self
    }

    /// Run `fft` over every 1-D lane of `data` along `axis`.
    ///
    /// Lanes are independent, so they are processed in parallel. Each lane
    /// is gathered into a contiguous scratch buffer because the lanes of a
    /// 3-D array are strided in memory.
    fn transform_lanes(data: &mut Array3<Complex64>, axis: Axis, fft: &Arc<dyn Fft<f64>>) {
        Zip::from(data.lanes_mut(axis)).par_for_each(|mut lane| {
            let mut buffer: Vec<Complex64> = lane.to_vec();
            fft.process(&mut buffer);
            for (dst, src) in lane.iter_mut().zip(buffer) {
                *dst = src;
            }
        });
    }

    fn transform(
        data: &mut Array3<Complex64>,
        direction: FftDirection,
    ) -> Result<(), TransformError> {
        let (nx, ny, nd) = data.dim();
        if nx == 0 || ny == 0 || nd == 0 {
            return Err(TransformError::EmptyInput(nx, ny, nd));
        }

        let mut planner = FftPlanner::new();
        let fft_rows = planner.plan_fft(nx, direction);
        let fft_cols = planner.plan_fft(ny, direction);

        Self::transform_lanes(data, Axis(0), &fft_rows);
        Self::transform_lanes(data, Axis(1), &fft_cols);

        // rustfft is unnormalized in both directions; the inverse carries
        // the 1/(Nx*Ny) factor so that ifft2(fft2(x)) == x.
        if direction == FftDirection::Inverse {
            let scale = 1.0 / (nx * ny) as f64;
            data.mapv_inplace(|v| v * scale);
        }

        Ok(())
    }
}

impl Default for CpuFourier {
    fn default() -> Self {
        Self::new()
    }
}

impl FourierTransform for CpuFourier {
    fn fft2_inplace(&self, data: &mut Array3<Complex64>) -> Result<(), TransformError> {
        Self::transform(data, FftDirection::Forward)
    }

    fn ifft2_inplace(&self, data: &mut Array3<Complex64>) -> Result<(), TransformError> {
        Self::transform(data, FftDirection::Inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array3;

    fn sample_stack(nx: usize, ny: usize, nd: usize) -> Array3<Complex64> {
        // Deterministic, structure-free test data.
        Array3::from_shape_fn((nx, ny, nd), |(i, j, k)| {
            let t = (i * 31 + j * 17 + k * 7) as f64;
            Complex64::new((0.3 * t).sin(), (0.7 * t).cos())
        })
    }

    #[test]
    fn test_round_trip_is_identity() {
        let fourier = CpuFourier::new();
        let original = sample_stack(8, 6, 3);

        let spectrum = fourier.fft2(&original).unwrap();
        let restored = fourier.ifft2(&spectrum).unwrap();

        for (a, b) in original.iter().zip(restored.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_frequency_is_not_centered() {
        // A constant field concentrates all energy in the zero-frequency
        // bin, which the contract places at index (0, 0).
        let fourier = CpuFourier::new();
        let ones = Array3::from_elem((8, 8, 1), Complex64::new(1.0, 0.0));

        let spectrum = fourier.fft2(&ones).unwrap();

        assert_abs_diff_eq!(spectrum[[0, 0, 0]].re, 64.0, epsilon = 1e-12);
        for ((i, j, _), v) in spectrum.indexed_iter() {
            if (i, j) != (0, 0) {
                assert_abs_diff_eq!(v.norm(), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_slices_transform_independently() {
        let fourier = CpuFourier::new();
        let stack = sample_stack(8, 8, 2);

        let together = fourier.fft2(&stack).unwrap();

        for k in 0..2 {
            let single = stack
                .index_axis(Axis(2), k)
                .to_owned()
                .insert_axis(Axis(2));
            let alone = fourier.fft2(&single).unwrap();
            for ((i, j, _), v) in alone.indexed_iter() {
                assert_abs_diff_eq!(v.re, together[[i, j, k]].re, epsilon = 1e-12);
                assert_abs_diff_eq!(v.im, together[[i, j, k]].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let fourier = CpuFourier::new();
        let mut empty = Array3::<Complex64>::zeros((0, 4, 1));
        assert!(matches!(
            fourier.fft2_inplace(&mut empty),
            Err(TransformError::EmptyInput(0, 4, 1))
        ));
    }

    #[test]
    fn test_inplace_matches_allocating() {
        let fourier = CpuFourier::new();
        let stack = sample_stack(4, 4, 2);

        let allocated = fourier.fft2(&stack).unwrap();
        let mut inplace = stack.clone();
        fourier.fft2_inplace(&mut inplace).unwrap();

        for (a, b) in allocated.iter().zip(inplace.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-14);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-14);
        }
    }
}
