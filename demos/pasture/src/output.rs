//! Run reporting: an optional per-tick stats CSV plus snapshot logging.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use csv::Writer;
use mob_core::Tick;
use mob_goal::Flag;
use mob_sim::{Mob, SimObserver, TickStats};
use tracing::info;

use crate::sheep::Sheep;

/// Writes one `TickStats` row per tick.
pub struct StatsCsv {
    writer: Writer<File>,
    rows:   usize,
}

impl StatsCsv {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["tick", "mobs", "active", "running_goals"])?;
        Ok(Self { writer, rows: 0 })
    }

    fn write(&mut self, stats: &TickStats) -> Result<()> {
        self.writer.write_record(&[
            stats.tick.0.to_string(),
            stats.mobs.to_string(),
            stats.active.to_string(),
            stats.running_goals.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Observer driving the pasture run's output.
///
/// Write errors are stored rather than propagated (observer hooks are
/// infallible); check [`take_error`][Self::take_error] after the run.
pub struct Report {
    csv:          Option<StatsCsv>,
    error:        Option<anyhow::Error>,
    snapshots:    usize,
    peak_running: usize,
}

impl Report {
    pub fn new(csv: Option<StatsCsv>) -> Self {
        Self { csv, error: None, snapshots: 0, peak_running: 0 }
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    pub fn csv_rows(&self) -> Option<usize> {
        self.csv.as_ref().map(StatsCsv::rows)
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots
    }

    pub fn peak_running(&self) -> usize {
        self.peak_running
    }

    /// Flush the CSV, if any.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(csv) = &mut self.csv {
            csv.writer.flush()?;
        }
        Ok(())
    }

    fn store_err(&mut self, result: Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

impl SimObserver<Sheep> for Report {
    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        self.peak_running = self.peak_running.max(stats.running_goals);
        if let Some(csv) = &mut self.csv {
            let result = csv.write(stats);
            self.store_err(result);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, mobs: &[Mob<Sheep>]) {
        self.snapshots += 1;
        let moving = mobs.iter().filter(|m| m.goal_selector.holder_of(Flag::Move).is_some()).count();
        let alert = mobs.iter().filter(|m| m.state.alert).count();
        let grazed: u32 = mobs.iter().map(|m| m.state.grass_eaten).sum();
        info!(%tick, sheep = mobs.len(), moving, alert, grazed, "flock snapshot");
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        let result = self.finish();
        self.store_err(result);
        info!(%final_tick, "report closed");
    }
}
