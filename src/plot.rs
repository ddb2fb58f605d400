use std::error::Error;
use std::path::{Path, PathBuf};

use ising_sim::TemperatureStats;
use plotters::prelude::*;

/// Write `<stem>.magnetization.svg` and `<stem>.energy.svg` next to
/// `csv_path`: the tail-window mean at each temperature with a one std-dev
/// error bar. Nothing is written when `stats` is empty.
pub fn plot_observables(
    csv_path: &Path,
    stats: &[TemperatureStats],
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if stats.is_empty() {
        return Ok(vec![]);
    }

    let magnetization: Vec<(f64, f64, f64)> = stats
        .iter()
        .map(|s| (s.temperature, s.magnetization_mean, s.magnetization_std))
        .collect();
    let energy: Vec<(f64, f64, f64)> = stats
        .iter()
        .map(|s| (s.temperature, s.energy_mean, s.energy_std))
        .collect();

    let mag_path = csv_path.with_extension("magnetization.svg");
    let energy_path = csv_path.with_extension("energy.svg");
    draw_errorbars(
        &mag_path,
        "Magnetization vs Temperature",
        "Magnetization",
        &magnetization,
    )?;
    draw_errorbars(&energy_path, "Energy vs Temperature", "Energy", &energy)?;

    Ok(vec![mag_path, energy_path])
}

/// Padded `(lo, hi)` covering all values, widened when they coincide.
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if !(hi - lo > 1e-9) {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = 0.1 * (hi - lo);
    (lo - pad, hi + pad)
}

fn draw_errorbars(
    out_path: &Path,
    caption: &str,
    y_desc: &str,
    series: &[(f64, f64, f64)],
) -> Result<(), Box<dyn Error>> {
    let (t_lo, t_hi) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (t, _, _)| {
            (lo.min(*t), hi.max(*t))
        });
    let (y_lo, y_hi) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, mean, std)| {
            (lo.min(mean - std), hi.max(mean + std))
        });
    let (x_min, x_max) = padded_range(t_lo, t_hi);
    let (y_min, y_max) = padded_range(y_lo, y_hi);

    let root = SVGBackend::new(out_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Temperature")
        .y_desc(y_desc)
        .draw()?;

    let cap = 0.01 * (x_max - x_min);
    for &(t, mean, std) in series {
        let (y0, y1) = (mean - std, mean + std);
        chart.draw_series([
            PathElement::new(vec![(t, y0), (t, y1)], BLUE.mix(0.8)),
            PathElement::new(vec![(t - cap, y0), (t + cap, y0)], BLUE.mix(0.8)),
            PathElement::new(vec![(t - cap, y1), (t + cap, y1)], BLUE.mix(0.8)),
        ])?;
        chart.draw_series(std::iter::once(Circle::new((t, mean), 3, BLUE.filled())))?;
    }

    root.present()?;
    Ok(())
}
