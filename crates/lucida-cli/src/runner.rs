//! Job execution: load the hologram, reconstruct, write the results.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use ndarray_npy::{NpzWriter, ReadNpyExt};

use lucida_compute::CpuFourier;
use lucida_core::propagation::Propagator;
use lucida_core::types::{Field, Optics, Reconstruction};

use crate::config::Job;

/// Run a reconstruction job, writing `reconstruction.npz` into `out_dir`.
///
/// The archive holds `amplitude` and `phase` arrays (2-D for a single
/// distance, 3-D with the distance axis last for a stack) plus the
/// `distances` the reconstruction was evaluated at.
pub fn run_job(job: &Job, out_dir: &Path) -> Result<PathBuf> {
    let hologram_file = File::open(&job.input.hologram)
        .with_context(|| format!("Failed to open {}", job.input.hologram.display()))?;
    let hologram = Array2::<f64>::read_npy(hologram_file)
        .with_context(|| format!("Failed to read {}", job.input.hologram.display()))?;

    let optics = Optics::new(job.input.medium_wavelength);
    let field = Field::from_intensity(
        hologram,
        (job.input.spacing[0], job.input.spacing[1]),
        optics,
    );
    let distances = job.reconstruction.distances.resolve();

    log::info!(
        "reconstructing {}x{} hologram at {} distance(s)",
        field.shape().0,
        field.shape().1,
        distances.len()
    );

    let fourier = CpuFourier::new();
    let mut propagator = Propagator::new(&fourier);
    propagator.gradient_offset = job.reconstruction.gradient_offset;
    propagator.cascade_steps = job.reconstruction.cascade_steps;

    let reconstruction = propagator.propagate(&field, &distances)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join("reconstruction.npz");
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut npz = NpzWriter::new(file);

    match reconstruction {
        Reconstruction::Plane(plane) => {
            npz.add_array("amplitude", &plane.data.mapv(|v| v.norm()))?;
            npz.add_array("phase", &plane.data.mapv(|v| v.arg()))?;
        }
        Reconstruction::Stack(volume) => {
            npz.add_array("amplitude", &volume.data.mapv(|v| v.norm()))?;
            npz.add_array("phase", &volume.data.mapv(|v| v.arg()))?;
        }
    }
    npz.add_array("distances", &Array1::from(distances))?;
    npz.finish().context("Failed to finalize the npz archive")?;

    Ok(path)
}
