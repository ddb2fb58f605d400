use std::path::PathBuf;

use clap::Parser;
use ising_sim::{SimConfig, SweepConfig, SweepMode};

fn parse_sweep_mode(s: &str) -> Result<SweepMode, String> {
    SweepMode::try_from(s)
}

/// 2D Ising model temperature sweep.
///
/// Runs one Metropolis simulation per temperature and writes the tail-window
/// mean and standard deviation of magnetization and energy to a CSV file.
#[derive(Debug, Parser)]
#[command(name = "ising2d", version)]
pub struct Cli {
    /// Minimum temperature (included)
    #[arg(long, alias = "t_min", default_value_t = 2.0)]
    pub t_min: f64,

    /// Maximum temperature (excluded, as in numpy.arange)
    #[arg(long, alias = "t_max", default_value_t = 2.6)]
    pub t_max: f64,

    /// Temperature step size
    #[arg(long, alias = "t_step", default_value_t = 0.1)]
    pub t_step: f64,

    /// Lattice size (NxN)
    #[arg(long)]
    pub n: usize,

    /// Total number of steps
    #[arg(long, alias = "num_steps", default_value_t = 100_000)]
    pub num_steps: usize,

    /// Number of trailing steps used in analysis
    #[arg(long, alias = "num_analysis", default_value_t = 50_000)]
    pub num_analysis: usize,

    /// Number of burn-in steps
    #[arg(long, alias = "num_burnin", default_value_t = 0)]
    pub num_burnin: usize,

    /// Interaction strength
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub j: f64,

    /// Applied magnetic field
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub b: f64,

    /// Proportion of spins to consider flipping per step
    #[arg(long, alias = "flip_prop", default_value_t = 0.1)]
    pub flip_prop: f64,

    /// Acceptance rule: metropolis or gibbs
    #[arg(long, default_value = "metropolis", value_parser = parse_sweep_mode)]
    pub sweep_mode: SweepMode,

    /// Base seed; temperature k uses seed + k
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory for the CSV output and plots
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Skip the magnetization and energy SVG plots
    #[arg(long)]
    pub no_plot: bool,

    /// Run temperatures one after another on a single thread
    #[arg(long)]
    pub sequential: bool,
}

impl Cli {
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            t_min: self.t_min,
            t_max: self.t_max,
            t_step: self.t_step,
            n_analysis: self.num_analysis,
            template: SimConfig {
                lattice_size: self.n,
                temperature: self.t_min,
                n_sweeps: self.num_steps,
                burnin_sweeps: self.num_burnin,
                flip_proportion: self.flip_prop,
                coupling: self.j,
                field: self.b,
                sweep_mode: self.sweep_mode,
            },
            base_seed: self.seed,
            sequential: self.sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ising2d", "--n", "8"]).unwrap();
        let cfg = cli.sweep_config();
        assert_eq!(cfg.t_min, 2.0);
        assert_eq!(cfg.t_max, 2.6);
        assert_eq!(cfg.t_step, 0.1);
        assert_eq!(cfg.n_analysis, 50_000);
        assert_eq!(cfg.template.lattice_size, 8);
        assert_eq!(cfg.template.n_sweeps, 100_000);
        assert_eq!(cfg.template.burnin_sweeps, 0);
        assert_eq!(cfg.template.coupling, 1.0);
        assert_eq!(cfg.template.field, 0.0);
        assert_eq!(cfg.template.flip_proportion, 0.1);
        assert_eq!(cfg.template.sweep_mode, SweepMode::Metropolis);
        assert!(!cfg.sequential);
        assert!(!cli.no_plot);
    }

    #[test]
    fn test_underscore_aliases_and_negative_field() {
        let cli = Cli::try_parse_from([
            "ising2d",
            "--n",
            "4",
            "--num_steps",
            "1000",
            "--flip_prop",
            "0.5",
            "--b",
            "-0.25",
            "--sweep-mode",
            "gibbs",
            "--no-plot",
        ])
        .unwrap();
        assert_eq!(cli.num_steps, 1000);
        assert_eq!(cli.flip_prop, 0.5);
        assert_eq!(cli.b, -0.25);
        assert_eq!(cli.sweep_mode, SweepMode::Gibbs);
        assert!(cli.no_plot);
    }

    #[test]
    fn test_lattice_size_required() {
        assert!(Cli::try_parse_from(["ising2d"]).is_err());
        assert!(Cli::try_parse_from(["ising2d", "--n", "4", "--sweep-mode", "wolff"]).is_err());
    }
}
