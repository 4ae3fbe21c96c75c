//! Synthetic breakthrough datasets.
//!
//! Loadings are evenly spaced over `[x_min, x_max]`; breakthrough is the exact
//! logistic curve plus Gaussian noise, clamped to `[0, 1]` like a real UV
//! breakthrough trace. The RNG is seeded so a given configuration always
//! produces the same file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{Sample, SimulateConfig};
use crate::error::AppError;
use crate::models::predict;

/// Generate a noisy sample set from `config`.
pub fn generate_samples(config: &SimulateConfig) -> Result<Vec<Sample>, AppError> {
    if config.count < 2 {
        return Err(AppError::invalid_data("Sample count must be >= 2."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::invalid_data("Invalid loading range for sample generation."));
    }
    if !(config.params.k.is_finite() && config.params.x0.is_finite()) {
        return Err(AppError::invalid_data("Invalid curve parameters for sample generation."));
    }
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::invalid_data(format!("Noise distribution error: {e}")))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let step = (config.x_max - config.x_min) / (config.count as f64 - 1.0);

    let samples = (0..config.count)
        .map(|i| {
            let x = config.x_min + step * i as f64;
            let y = (predict(&config.params, x) + normal.sample(&mut rng)).clamp(0.0, 1.0);
            Sample::new(x, y)
        })
        .collect();

    Ok(samples)
}

/// Write samples as a headerless two-column CSV.
pub fn write_samples_csv(path: &Path, samples: &[Sample]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    write_samples(file, samples).map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))
}

fn write_samples<W: Write>(writer: W, samples: &[Sample]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    for s in samples {
        wtr.write_record([s.x.to_string(), s.y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::SigmoidParams;
    use crate::io::read_samples;

    fn config(noise: f64, seed: u64) -> SimulateConfig {
        SimulateConfig {
            params: SigmoidParams::new(0.12, 90.0),
            noise,
            seed,
            count: 25,
            x_min: 0.0,
            x_max: 180.0,
            out: PathBuf::from("unused.csv"),
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let a = generate_samples(&config(0.02, 7)).unwrap();
        let b = generate_samples(&config(0.02, 7)).unwrap();
        let c = generate_samples(&config(0.02, 8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn noiseless_samples_lie_on_curve() {
        let cfg = config(0.0, 1);
        let samples = generate_samples(&cfg).unwrap();
        assert_eq!(samples.len(), 25);
        assert_eq!(samples[0].x, 0.0);
        assert!((samples[24].x - 180.0).abs() < 1e-12);
        for s in &samples {
            assert!((s.y - predict(&cfg.params, s.x)).abs() < 1e-15);
        }
    }

    #[test]
    fn noisy_samples_stay_in_unit_interval() {
        let samples = generate_samples(&config(0.3, 3)).unwrap();
        assert!(samples.iter().all(|s| (0.0..=1.0).contains(&s.y)));
    }

    #[test]
    fn rejects_invalid_settings() {
        let mut cfg = config(0.01, 1);
        cfg.count = 1;
        assert!(generate_samples(&cfg).is_err());

        let mut cfg = config(0.01, 1);
        cfg.x_max = cfg.x_min;
        assert!(generate_samples(&cfg).is_err());

        assert!(generate_samples(&config(-1.0, 1)).is_err());
    }

    #[test]
    fn written_file_reads_back() {
        let samples = generate_samples(&config(0.01, 11)).unwrap();
        let mut buf = Vec::new();
        write_samples(&mut buf, &samples).unwrap();
        let back = read_samples(buf.as_slice(), b',').unwrap();
        assert_eq!(back, samples);
    }
}
