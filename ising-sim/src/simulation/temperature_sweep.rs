use super::{run_ising, ObservableSeries};
use crate::config::{SweepConfig, MAX_TEMPERATURES};
use crate::error::Result;
use crate::parallel::par_over_temperatures;
use crate::statistics::Statistics;
use log::{debug, error};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Tail-window averages for one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub temperature: f64,
    pub magnetization_mean: f64,
    pub magnetization_std: f64,
    pub energy_mean: f64,
    pub energy_std: f64,
}

/// Result of one temperature of a sweep. A failure here does not affect the
/// other temperatures.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureOutcome {
    pub temperature: f64,
    pub result: Result<TemperatureStats>,
}

/// Temperatures `t_min + k * t_step` for `k = 0..ceil((t_max - t_min) / t_step)`.
///
/// Same grid as `numpy.arange`: `t_max` itself is excluded unless rounding
/// puts the quotient just above an integer, so `(2.0, 2.6, 0.1)` gives seven
/// values ending near 2.6 while `(1.0, 2.0, 0.5)` gives `[1.0, 1.5]`. Returns
/// an empty vector for a non-positive step, an empty range, or a grid longer
/// than [`MAX_TEMPERATURES`].
pub fn temperature_range(t_min: f64, t_max: f64, t_step: f64) -> Vec<f64> {
    let n = ((t_max - t_min) / t_step).ceil();
    if !(t_step > 0.0 && n > 0.0 && n <= MAX_TEMPERATURES as f64) {
        return vec![];
    }
    (0..n as usize).map(|k| t_min + k as f64 * t_step).collect()
}

/// Mean and population std-dev over the last `n_analysis` sweeps.
pub fn summarize(
    temperature: f64,
    series: &ObservableSeries,
    n_analysis: usize,
) -> Result<TemperatureStats> {
    let (mags, energies) = series.tail(n_analysis);
    let m = Statistics::from_slice(mags);
    let e = Statistics::from_slice(energies);
    Ok(TemperatureStats {
        temperature,
        magnetization_mean: m.mean()?,
        magnetization_std: m.std()?,
        energy_mean: e.mean()?,
        energy_std: e.std()?,
    })
}

/// Run the engine once per temperature of `config` and summarize each run.
///
/// The step counts are validated up front and reject the whole sweep. After
/// that, each temperature gets its own generator seeded with
/// `base_seed + temp_id` (wrapping) and fails independently. Outcomes are
/// returned in temperature order.
///
/// `on_temperature` is called with the temperature index and its outcome as
/// soon as that temperature finishes. Under rayon the calls arrive in
/// completion order, not temperature order.
pub fn run_temperature_sweep(
    config: &SweepConfig,
    on_temperature: &(dyn Fn(usize, &TemperatureOutcome) + Sync),
) -> Result<Vec<TemperatureOutcome>> {
    config.check()?;

    let temperatures = temperature_range(config.t_min, config.t_max, config.t_step);

    let outcomes = par_over_temperatures(&temperatures, config.sequential, |temp_id, temp| {
        let sim_config = config.at_temperature(temp);
        let seed = config.base_seed.wrapping_add(temp_id as u64);
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

        let result = run_ising(&sim_config, &mut rng).and_then(|series| {
            debug!(
                "T={temp:.4}: {} sweeps, acceptance {:.3}",
                series.len(),
                series.acceptance_rate
            );
            summarize(temp, &series, config.n_analysis)
        });

        if let Err(ref e) = result {
            error!("T={temp}: simulation failed ({e}). No data written");
        }

        let outcome = TemperatureOutcome {
            temperature: temp,
            result,
        };
        on_temperature(temp_id, &outcome);
        outcome
    });

    Ok(outcomes)
}
