use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use csv::WriterBuilder;
use ising_sim::{SweepConfig, TemperatureOutcome, TemperatureStats};
use log::error;

pub const PARAMETER_HEADER: [&str; 7] = [
    "Lattice Size (NxN)",
    "Total Steps",
    "Steps Used in Analysis",
    "Burnin Steps",
    "Interaction Strength",
    "Applied Mag Field",
    "Spin Prop",
];

pub const RESULTS_HEADER: [&str; 5] = [
    "Temperature",
    "Magnetization Mean",
    "Magnetization Std Dev",
    "Energy Mean",
    "Energy Std Dev",
];

/// CSV record of one temperature sweep: a parameter block, a blank line, then
/// one row of statistics per temperature.
pub struct ResultsWriter<W: Write> {
    inner: W,
}

impl ResultsWriter<File> {
    /// Create `<dir>/<unix-seconds>.csv`, making `dir` if needed.
    pub fn create(dir: &Path) -> io::Result<(Self, PathBuf)> {
        fs::create_dir_all(dir)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let path = dir.join(format!("{stamp}.csv"));
        let file = File::create(&path)?;
        Ok((Self::new(file), path))
    }
}

impl<W: Write> ResultsWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    fn csv_writer(&mut self) -> csv::Writer<&mut W> {
        WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut self.inner)
    }

    fn write_row<I, T>(&mut self, record: I) -> csv::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = self.csv_writer();
        writer.write_record(record)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_parameters(&mut self, config: &SweepConfig) -> csv::Result<()> {
        let t = &config.template;
        self.write_row(PARAMETER_HEADER)?;
        self.write_row([
            t.lattice_size.to_string(),
            t.n_sweeps.to_string(),
            config.n_analysis.to_string(),
            t.burnin_sweeps.to_string(),
            t.coupling.to_string(),
            t.field.to_string(),
            t.flip_proportion.to_string(),
        ])?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    pub fn write_results_header(&mut self) -> csv::Result<()> {
        self.write_row(RESULTS_HEADER)
    }

    pub fn write_stats(&mut self, stats: &TemperatureStats) -> csv::Result<()> {
        self.write_row([
            stats.temperature.to_string(),
            stats.magnetization_mean.to_string(),
            stats.magnetization_std.to_string(),
            stats.energy_mean.to_string(),
            stats.energy_std.to_string(),
        ])
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Writes stats rows in temperature order while outcomes arrive in any order.
///
/// An outcome is held back until every lower temperature index has arrived.
/// Each written row is flushed, so the file always holds a complete prefix of
/// the sweep.
pub struct OrderedRows<W: Write> {
    writer: ResultsWriter<W>,
    pending: BTreeMap<usize, TemperatureOutcome>,
    next: usize,
}

impl<W: Write> OrderedRows<W> {
    pub fn new(writer: ResultsWriter<W>) -> Self {
        Self {
            writer,
            pending: BTreeMap::new(),
            next: 0,
        }
    }

    pub fn push(&mut self, temp_id: usize, outcome: TemperatureOutcome) {
        self.pending.insert(temp_id, outcome);
        while let Some(outcome) = self.pending.remove(&self.next) {
            self.next += 1;
            // failed temperatures leave no row
            if let Ok(stats) = &outcome.result {
                if let Err(e) = self.writer.write_stats(stats) {
                    error!("T={}: error writing to file ({e})", outcome.temperature);
                }
            }
        }
    }

    /// Number of temperatures already written or skipped.
    pub fn written(&self) -> usize {
        self.next
    }

    pub fn finish(self) -> io::Result<W> {
        self.writer.finish()
    }
}

/// Plain-text table of the sweep, one line per temperature.
pub fn format_summary(outcomes: &[TemperatureOutcome]) -> String {
    let mut out = format!(
        "{:>10}  {:>14}  {:>12}  {:>14}  {:>12}\n",
        "T", "<M>", "std(M)", "<E>", "std(E)"
    );
    for outcome in outcomes {
        match &outcome.result {
            Ok(s) => out.push_str(&format!(
                "{:>10.4}  {:>14.4}  {:>12.4}  {:>14.4}  {:>12.4}\n",
                s.temperature,
                s.magnetization_mean,
                s.magnetization_std,
                s.energy_mean,
                s.energy_std
            )),
            Err(e) => out.push_str(&format!("{:>10.4}  failed: {e}\n", outcome.temperature)),
        }
    }
    out
}
