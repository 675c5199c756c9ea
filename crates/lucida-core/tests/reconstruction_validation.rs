//! Integration tests: the full reconstruction pipeline against its
//! physical invariants.
//!
//! These drive the propagator end to end through the CPU Fourier backend:
//! zero-distance identity, forward-then-back reversibility, degenerate
//! zero input, and the packaging of multi-distance stacks.

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use num_complex::Complex64;

use lucida_compute::CpuFourier;
use lucida_core::propagation::Propagator;
use lucida_core::types::{DepthAxis, Field, Optics, Reconstruction};

/// λ = 0.5 with unit pixels keeps every grid frequency below the
/// evanescent cutoff, so propagation is unitary and exactly reversible.
fn test_field(nx: usize, ny: usize) -> Field {
    let data = Array2::from_shape_fn((nx, ny), |(i, j)| {
        let t = (i * 13 + j * 7) as f64;
        Complex64::new(1.0 + (0.4 * t).sin(), (0.9 * t).cos())
    });
    Field::new(data, (1.0, 1.0), Optics::new(0.5))
}

fn assert_fields_close(a: &Field, b: &Field, epsilon: f64) {
    assert_eq!(a.shape(), b.shape());
    let mut worst = 0.0f64;
    for (x, y) in a.data.iter().zip(b.data.iter()) {
        worst = worst.max((x - y).norm());
        assert_abs_diff_eq!(x.re, y.re, epsilon = epsilon);
        assert_abs_diff_eq!(x.im, y.im, epsilon = epsilon);
    }
    eprintln!("max |Δ| = {worst:.2e}");
}

#[test]
fn test_zero_distance_reproduces_the_field() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(16, 16);

    let reconstructed = propagator.propagate_to(&field, 0.0).unwrap();

    assert_fields_close(&field, &reconstructed, 1e-10);
    assert_eq!(reconstructed.spacing, field.spacing);
}

#[test]
fn test_forward_then_backward_propagation_is_the_identity() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(16, 16);
    let d = 10.0;

    let forward = propagator.propagate_to(&field, d).unwrap();
    let back = propagator.propagate_to(&forward, -d).unwrap();

    assert_fields_close(&field, &back, 1e-8);
}

#[test]
fn test_propagation_moves_energy_between_pixels() {
    // A point-like feature must spread as it propagates; equality with the
    // input would mean the kernel did nothing.
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);

    let mut data = Array2::from_elem((16, 16), Complex64::new(0.0, 0.0));
    data[[8, 8]] = Complex64::new(1.0, 0.0);
    let field = Field::new(data, (1.0, 1.0), Optics::new(0.5));

    let forward = propagator.propagate_to(&field, 10.0).unwrap();

    let spread = forward
        .data
        .indexed_iter()
        .filter(|&((i, j), v)| (i, j) != (8, 8) && v.norm() > 1e-6)
        .count();
    assert!(spread > 0, "propagation must diffract the point source");
}

#[test]
fn test_zero_field_stays_zero() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = Field::new(
        Array2::from_elem((4, 4), Complex64::new(0.0, 0.0)),
        (1.0, 1.0),
        Optics::new(0.5),
    );

    let reconstructed = propagator.propagate_to(&field, 3.0).unwrap();

    assert_eq!(reconstructed.shape(), (4, 4));
    assert_eq!(reconstructed.spacing, (1.0, 1.0));
    for v in reconstructed.data.iter() {
        assert_abs_diff_eq!(v.norm(), 0.0, epsilon = 1e-14);
    }
}

#[test]
fn test_evenly_spaced_distances_package_as_a_uniform_volume() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(8, 8);

    let reconstruction = propagator.propagate(&field, &[1.0, 2.0, 3.0]).unwrap();

    match reconstruction {
        Reconstruction::Stack(volume) => {
            assert_eq!(volume.data.dim(), (8, 8, 3));
            assert_eq!(volume.depth, DepthAxis::Uniform { spacing: 1.0 });
            assert_eq!(volume.spacing, field.spacing);
        }
        Reconstruction::Plane(_) => panic!("three distances must produce a stack"),
    }
}

#[test]
fn test_unevenly_spaced_distances_record_their_coordinates() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(8, 8);

    let reconstruction = propagator.propagate(&field, &[1.0, 2.0, 5.0]).unwrap();

    match reconstruction {
        Reconstruction::Stack(volume) => {
            assert_eq!(
                volume.depth,
                DepthAxis::Irregular {
                    coordinates: vec![1.0, 2.0, 5.0]
                }
            );
        }
        Reconstruction::Plane(_) => panic!("three distances must produce a stack"),
    }
}

#[test]
fn test_single_distance_packages_as_a_plane() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(8, 8);

    match propagator.propagate(&field, &[2.5]).unwrap() {
        Reconstruction::Plane(plane) => {
            assert_eq!(plane.shape(), (8, 8));
            assert_abs_diff_eq!(
                plane.optics.med_wavelen,
                field.optics.med_wavelen,
                epsilon = 0.0
            );
        }
        Reconstruction::Stack(_) => panic!("one distance must produce a plane"),
    }
}

#[test]
fn test_stack_slices_match_single_distance_reconstructions() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(8, 8);
    let distances = [4.0, 9.0, 14.0];

    let stack = match propagator.propagate(&field, &distances).unwrap() {
        Reconstruction::Stack(volume) => volume,
        Reconstruction::Plane(_) => panic!("expected a stack"),
    };

    for (k, &d) in distances.iter().enumerate() {
        let single = propagator.propagate_to(&field, d).unwrap();
        for ((i, j), v) in single.data.indexed_iter() {
            assert_abs_diff_eq!(v.re, stack.data[[i, j, k]].re, epsilon = 1e-10);
            assert_abs_diff_eq!(v.im, stack.data[[i, j, k]].im, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_gradient_filtered_reconstruction_is_the_difference_of_two() {
    let fourier = CpuFourier::new();
    let field = test_field(16, 16);
    let d = 10.0;
    let offset = 5.0;

    let plain = Propagator::new(&fourier);
    let filtered = Propagator::with_gradient_filter(&fourier, offset);

    let enhanced = filtered.propagate_to(&field, d).unwrap();
    let at_d = plain.propagate_to(&field, d).unwrap();
    let at_offset = plain.propagate_to(&field, d + offset).unwrap();

    for ((i, j), v) in enhanced.data.indexed_iter() {
        let expected = at_d.data[[i, j]] - at_offset.data[[i, j]];
        assert_abs_diff_eq!(v.re, expected.re, epsilon = 1e-10);
        assert_abs_diff_eq!(v.im, expected.im, epsilon = 1e-10);
    }
}

#[test]
fn test_empty_distance_list_is_rejected() {
    let fourier = CpuFourier::new();
    let propagator = Propagator::new(&fourier);
    let field = test_field(8, 8);

    assert!(propagator.propagate(&field, &[]).is_err());
}
