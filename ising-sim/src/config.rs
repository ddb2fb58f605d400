use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SweepMode {
    #[default]
    Metropolis,
    Gibbs,
}

impl TryFrom<&str> for SweepMode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "metropolis" => Ok(Self::Metropolis),
            "gibbs" => Ok(Self::Gibbs),
            _ => Err(format!(
                "unknown sweep_mode '{s}', expected 'metropolis' or 'gibbs'"
            )),
        }
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.lattice_size < 1 {
        return Err(ValidationError::new("lattice_size must be >= 1"));
    }
    if !(cfg.temperature.is_finite() && cfg.temperature > 0.0) {
        return Err(ValidationError::new("temperature must be finite and > 0"));
    }
    if !(cfg.flip_proportion > 0.0 && cfg.flip_proportion <= 1.0) {
        return Err(ValidationError::new("flip_proportion must be in (0, 1]"));
    }
    if cfg.burnin_sweeps > cfg.n_sweeps {
        return Err(ValidationError::new("burnin_sweeps must be <= n_sweeps"));
    }
    if !(cfg.coupling.is_finite() && cfg.field.is_finite()) {
        return Err(ValidationError::new("coupling and field must be finite"));
    }
    Ok(())
}

/// Parameters for one engine invocation at a single temperature.
///
/// `burnin_sweeps` does not change what the engine records: every one of the
/// `n_sweeps` sweeps is recorded, and callers drop the leading burn-in
/// entries themselves.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    pub lattice_size: usize,
    pub temperature: f64,
    pub n_sweeps: usize,
    pub burnin_sweeps: usize,
    pub flip_proportion: f64,
    pub coupling: f64,
    pub field: f64,
    pub sweep_mode: SweepMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lattice_size: 16,
            temperature: 2.0,
            n_sweeps: 100_000,
            burnin_sweeps: 0,
            flip_proportion: 0.1,
            coupling: 1.0,
            field: 0.0,
            sweep_mode: SweepMode::Metropolis,
        }
    }
}

/// Upper bound on the number of temperatures in one sweep.
pub const MAX_TEMPERATURES: usize = 100_000;

fn validate_sweep_config(cfg: &SweepConfig) -> Result<(), ValidationError> {
    if !(cfg.t_step.is_finite() && cfg.t_step > 0.0) {
        return Err(ValidationError::new("t_step must be finite and > 0"));
    }
    if !(cfg.t_min.is_finite() && cfg.t_max.is_finite()) || cfg.t_min >= cfg.t_max {
        return Err(ValidationError::new("t_min must be < t_max"));
    }
    if ((cfg.t_max - cfg.t_min) / cfg.t_step).ceil() > MAX_TEMPERATURES as f64 {
        return Err(ValidationError::new("too many temperatures in t_min..t_max"));
    }
    if cfg.template.burnin_sweeps > cfg.template.n_sweeps {
        return Err(ValidationError::new(
            "burnin_sweeps cannot be greater than available n_sweeps",
        ));
    }
    if cfg.n_analysis > cfg.template.n_sweeps - cfg.template.burnin_sweeps {
        return Err(ValidationError::new(
            "n_analysis cannot be greater than available n_sweeps after burnin",
        ));
    }
    Ok(())
}

/// A sweep over `[t_min, t_max)` in steps of `t_step`, one engine run per
/// temperature built from `template`.
///
/// Only the template's step counts are checked here; per-temperature
/// parameter errors surface from the individual runs.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sweep_config"))]
pub struct SweepConfig {
    pub t_min: f64,
    pub t_max: f64,
    pub t_step: f64,
    /// Length of the tail window used for statistics.
    pub n_analysis: usize,
    pub template: SimConfig,
    /// Temperature `k` is seeded with `base_seed + k`, wrapping at `u64::MAX`.
    pub base_seed: u64,
    /// Run temperatures on the calling thread instead of the rayon pool.
    pub sequential: bool,
}

impl SweepConfig {
    /// Validate the sweep as a whole, before any engine call.
    pub fn check(&self) -> crate::error::Result<()> {
        self.validate()?;
        Ok(())
    }

    /// Engine parameters for one temperature of the sweep.
    pub fn at_temperature(&self, temperature: f64) -> SimConfig {
        SimConfig {
            temperature,
            ..self.template.clone()
        }
    }
}
