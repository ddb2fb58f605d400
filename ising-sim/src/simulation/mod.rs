pub mod realization;
pub mod temperature_sweep;

pub use realization::Realization;
pub use temperature_sweep::{
    run_temperature_sweep, summarize, temperature_range, TemperatureOutcome, TemperatureStats,
};

use crate::config::SimConfig;
use crate::error::Result;
use crate::mcmc;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use validator::Validate;

/// Per-sweep totals of one run, in sweep order.
///
/// Both vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableSeries {
    /// Total magnetization `sum_i s_i` after each sweep.
    pub magnetization: Vec<f64>,
    /// Total energy after each sweep.
    pub energy: Vec<f64>,
    /// Fraction of proposals accepted over the whole run.
    pub acceptance_rate: f64,
}

impl ObservableSeries {
    pub fn with_capacity(n_sweeps: usize) -> Self {
        Self {
            magnetization: Vec::with_capacity(n_sweeps),
            energy: Vec::with_capacity(n_sweeps),
            acceptance_rate: 0.0,
        }
    }

    pub fn push(&mut self, magnetization: f64, energy: f64) {
        self.magnetization.push(magnetization);
        self.energy.push(energy);
    }

    pub fn len(&self) -> usize {
        self.magnetization.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnetization.is_empty()
    }

    /// The last `n` entries of each series (the whole series if `n > len`).
    pub fn tail(&self, n: usize) -> (&[f64], &[f64]) {
        let start = self.len().saturating_sub(n);
        (&self.magnetization[start..], &self.energy[start..])
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.magnetization, self.energy)
    }
}

/// Run `config.n_sweeps` sweeps from a random start and record magnetization
/// and energy after every sweep.
///
/// All sweeps are recorded, burn-in included; `burnin_sweeps` is only checked
/// against `n_sweeps`. Parameters are validated before `rng` is touched.
pub fn run_ising<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Result<ObservableSeries> {
    config.validate()?;

    let mut real = Realization::new(config, rng)?;
    let n_proposals = mcmc::n_proposals(real.spins.n_spins(), config.flip_proportion);
    let mut series = ObservableSeries::with_capacity(config.n_sweeps);

    for _ in 0..config.n_sweeps {
        real.sweep(config.sweep_mode, config.temperature, n_proposals, rng);
        series.push(real.magnetization as f64, real.energy);
    }

    if real.proposed > 0 {
        series.acceptance_rate = real.accepted as f64 / real.proposed as f64;
    }
    Ok(series)
}

/// [`run_ising`] with a fresh generator seeded from `seed`.
pub fn run_ising_seeded(config: &SimConfig, seed: u64) -> Result<ObservableSeries> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    run_ising(config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    fn small_config() -> SimConfig {
        SimConfig {
            lattice_size: 4,
            temperature: 2.5,
            n_sweeps: 100,
            flip_proportion: 0.1,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_series_length() {
        for n_sweeps in [0, 1, 37] {
            let config = SimConfig {
                n_sweeps,
                ..small_config()
            };
            let series = run_ising_seeded(&config, 42).unwrap();
            assert_eq!(series.magnetization.len(), n_sweeps);
            assert_eq!(series.energy.len(), n_sweeps);
        }
    }

    #[test]
    fn test_burnin_does_not_shorten_series() {
        let config = SimConfig {
            burnin_sweeps: 60,
            ..small_config()
        };
        let series = run_ising_seeded(&config, 42).unwrap();
        assert_eq!(series.len(), 100);
    }

    #[test]
    fn test_same_seed_same_series() {
        let config = small_config();
        let a = run_ising_seeded(&config, 1234).unwrap();
        let b = run_ising_seeded(&config, 1234).unwrap();
        assert_eq!(a, b);

        let c = run_ising_seeded(&config, 1235).unwrap();
        assert_ne!(a.magnetization, c.magnetization);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let config = SimConfig {
            temperature: 0.0,
            ..small_config()
        };
        assert!(matches!(
            run_ising_seeded(&config, 0),
            Err(SimError::InvalidParameter(_))
        ));

        let config = SimConfig {
            lattice_size: 0,
            ..small_config()
        };
        assert!(matches!(
            run_ising_seeded(&config, 0),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_tail() {
        let mut series = ObservableSeries::with_capacity(4);
        for i in 0..4 {
            series.push(i as f64, -(i as f64));
        }
        let (m, e) = series.tail(2);
        assert_eq!(m, &[2.0, 3.0]);
        assert_eq!(e, &[-2.0, -3.0]);
        assert_eq!(series.tail(10).0.len(), 4);
        assert!(series.tail(0).0.is_empty());
    }
}
