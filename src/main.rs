mod cli;
mod output;
mod plot;

use std::error::Error;
use std::sync::{Mutex, PoisonError};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::{run_temperature_sweep, temperature_range};
use log::{error, info};

use cli::Cli;
use output::{format_summary, OrderedRows, ResultsWriter};
use plot::plot_observables;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("\n2D Ising Model Simulation\n");

    let cli = Cli::parse();
    let config = cli.sweep_config();
    config.check()?;

    let (mut writer, path) = ResultsWriter::create(&cli.output_dir)?;
    writer.write_parameters(&config)?;
    writer.write_results_header()?;
    info!(
        "Simulation started! Data will be written to {}",
        path.display()
    );

    let n_temps = temperature_range(config.t_min, config.t_max, config.t_step).len();
    let pb = ProgressBar::new(n_temps as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message("Simulation progress");

    // rows hit the disk as soon as every lower temperature is done, so an
    // interrupted run keeps a valid prefix of the sweep
    let rows = Mutex::new(OrderedRows::new(writer));
    let outcomes = run_temperature_sweep(&config, &|temp_id, outcome| {
        rows.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(temp_id, outcome.clone());
        pb.inc(1);
    })?;
    pb.finish();

    let rows = rows.into_inner().unwrap_or_else(PoisonError::into_inner);
    let n_done = rows.written();
    rows.finish()?;

    let n_ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    println!("\n{}", format_summary(&outcomes));
    info!(
        "Simulation finished! {n_ok}/{n_done} temperatures written to {}",
        path.display()
    );

    if !cli.no_plot {
        let stats: Vec<_> = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().copied())
            .collect();
        match plot_observables(&path, &stats) {
            Ok(plots) => {
                for plot in plots {
                    info!("Plot written to {}", plot.display());
                }
            }
            Err(e) => error!("error drawing plots ({e})"),
        }
    }

    Ok(())
}
