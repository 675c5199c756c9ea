//! TOML job-file loading and validation.
//!
//! A job names the recorded hologram, its calibration, the reconstruction
//! distances, and where the output goes:
//!
//! ```toml
//! [input]
//! hologram = "hologram.npy"
//! spacing = [0.1, 0.1]
//! medium_wavelength = 0.66
//!
//! [reconstruction]
//! distances = { start = 100.0, stop = 200.0, num = 11 }
//! gradient_offset = 0.0
//! cascade_steps = 0
//!
//! [output]
//! directory = "out"
//! ```
//!
//! `distances` also accepts an explicit list, e.g. `[100.0, 120.0, 170.0]`.
//! All lengths share one unit, and the wavelength is the wavelength in the
//! propagation medium.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Job {
    pub input: Input,
    pub reconstruction: ReconstructionConfig,
    #[serde(default)]
    pub output: Output,
}

#[derive(Debug, Deserialize)]
pub struct Input {
    /// Path to the recorded hologram (`.npy`, real-valued 2-D array).
    pub hologram: PathBuf,
    /// Pixel spacing `[dx, dy]`.
    pub spacing: [f64; 2],
    /// Wavelength in the propagation medium.
    pub medium_wavelength: f64,
}

#[derive(Debug, Deserialize)]
pub struct ReconstructionConfig {
    pub distances: Distances,
    #[serde(default)]
    pub gradient_offset: f64,
    #[serde(default)]
    pub cascade_steps: u32,
}

/// Reconstruction distances: an explicit list or a linear range.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Distances {
    List(Vec<f64>),
    Range { start: f64, stop: f64, num: usize },
}

impl Distances {
    pub fn resolve(&self) -> Vec<f64> {
        match self {
            Distances::List(values) => values.clone(),
            Distances::Range { start, stop, num } => {
                if *num <= 1 {
                    return vec![*start];
                }
                let step = (stop - start) / (*num as f64 - 1.0);
                (0..*num).map(|i| start + i as f64 * step).collect()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Output {
    pub directory: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("out"),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Job> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file {}", path.display()))?;
    let job: Job =
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

    if job.input.medium_wavelength <= 0.0 {
        bail!("medium_wavelength must be positive");
    }
    if job.input.spacing.iter().any(|&s| s <= 0.0) {
        bail!("spacing must be positive in both directions");
    }
    if job.reconstruction.distances.resolve().is_empty() {
        bail!("at least one reconstruction distance is required");
    }

    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_distances_resolve_to_a_linear_grid() {
        let distances = Distances::Range {
            start: 100.0,
            stop: 200.0,
            num: 11,
        };
        let resolved = distances.resolve();
        assert_eq!(resolved.len(), 11);
        assert_eq!(resolved[0], 100.0);
        assert_eq!(resolved[10], 200.0);
        assert!((resolved[1] - 110.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_range_collapses_to_start() {
        let distances = Distances::Range {
            start: 5.0,
            stop: 9.0,
            num: 1,
        };
        assert_eq!(distances.resolve(), vec![5.0]);
    }

    #[test]
    fn test_job_parses_with_list_distances() {
        let text = r#"
            [input]
            hologram = "holo.npy"
            spacing = [0.1, 0.1]
            medium_wavelength = 0.66

            [reconstruction]
            distances = [100.0, 120.0, 170.0]
        "#;
        let job: Job = toml::from_str(text).unwrap();
        assert_eq!(job.reconstruction.distances.resolve().len(), 3);
        assert_eq!(job.reconstruction.cascade_steps, 0);
        assert_eq!(job.output.directory, PathBuf::from("out"));
    }
}
