use std::time::Instant;

use ising_sim::{run_ising, run_temperature_sweep, SimConfig, SweepConfig, SweepMode};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

const L: usize = 128;
const N_SWEEPS: usize = 2_000;
const FLIP_PROPORTION: f64 = 0.1;

fn main() {
    let template = SimConfig {
        lattice_size: L,
        temperature: 2.269,
        n_sweeps: N_SWEEPS,
        burnin_sweeps: 0,
        flip_proportion: FLIP_PROPORTION,
        coupling: 1.0,
        field: 0.0,
        sweep_mode: SweepMode::Metropolis,
    };

    println!(
        "Lattice: {}x{}  |  Sweeps: {}  |  Flip proportion: {}",
        L, L, N_SWEEPS, FLIP_PROPORTION
    );
    println!("{}", "-".repeat(70));

    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let t0 = Instant::now();
    let series = run_ising(&template, &mut rng).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();

    let per_sweep = elapsed / N_SWEEPS as f64 * 1000.0;
    let flips_per_sec = (series.len() * L * L) as f64 * FLIP_PROPORTION / elapsed;
    println!(
        "Single run: {:.3} s  |  {:.3} ms/sweep  |  {:.2e} proposals/s  |  acceptance {:.3}",
        elapsed, per_sweep, flips_per_sec, series.acceptance_rate
    );

    let sweep = SweepConfig {
        t_min: 1.5,
        t_max: 3.0,
        t_step: 0.1,
        n_analysis: N_SWEEPS / 2,
        template,
        base_seed: 42,
        sequential: false,
    };
    let t0 = Instant::now();
    let outcomes = run_temperature_sweep(&sweep, &|_, _| {}).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();
    println!(
        "Sweep over {} temperatures (rayon): {:.3} s",
        outcomes.len(),
        elapsed
    );
}
