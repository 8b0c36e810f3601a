//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ptrack_behavior::{Robot, Target};
use ptrack_core::{SimClock, SimConfig, Tick};
use ptrack_sim::{CoverageReport, SimObserver};
use tracing::warn;

use crate::row::{AgentKind, AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert ticks
    /// to simulated seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, observed_targets: usize) {
        let row = TickSummaryRow {
            tick:             tick.0,
            time_secs:        self.clock.secs_at(tick),
            observed_targets: observed_targets as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[Robot], targets: &[Target]) {
        let rows: Vec<AgentSnapshotRow> = robots
            .iter()
            .map(|r| AgentSnapshotRow::from_state(AgentKind::Robot, r.id.0, tick.0, &r.state))
            .chain(
                targets
                    .iter()
                    .map(|t| AgentSnapshotRow::from_state(AgentKind::Target, t.id.0, tick.0, &t.state)),
            )
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _report: &CoverageReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
