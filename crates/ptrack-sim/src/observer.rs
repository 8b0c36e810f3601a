//! Simulation observer trait for progress reporting and data collection.

use ptrack_behavior::{Robot, Target};
use ptrack_core::Tick;

use crate::CoverageReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, observed: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {observed} targets observed");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the snapshot is taken.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `observed_targets` is the number of targets sensed by at least one
    /// robot in this tick's snapshot.
    fn on_tick_end(&mut self, _tick: Tick, _observed_targets: usize) {}

    /// Called every `config.output_interval_ticks` ticks with the post-tick
    /// state of every agent.
    fn on_snapshot(&mut self, _tick: Tick, _robots: &[Robot], _targets: &[Target]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _report: &CoverageReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
