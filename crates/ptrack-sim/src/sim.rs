//! The `Sim` struct and its tick loop.

use ptrack_agent::AgentRngs;
use ptrack_behavior::{ControlLaw, Robot, Target, WorldSnapshot};
use ptrack_core::{AgentId, SimClock, SimConfig, Tick};
use tracing::{debug, info, trace};

use crate::{CoverageReport, SimObserver};

/// The main simulation runner.
///
/// `Sim` holds all simulation state and drives the two-phase tick loop:
///
/// 1. **Snapshot**: copy every agent's kinematics and count, per target, the
///    robots sensing it.
/// 2. **Control phase**: [`ControlLaw::update_control`] for robots, then
///    targets, in ascending id order.  Each agent reads only the snapshot and
///    draws only from its own `AgentRng`.
/// 3. **Tally**: add the number of observed targets to `observed_ticks`.
/// 4. **State phase**: [`ControlLaw::update_state`] for robots, then targets.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run parameters (population sizes, duration, tick length, seed, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// Robots, indexed by `RobotId`.
    pub robots: Vec<Robot>,

    /// Targets, indexed by `TargetId`.
    pub targets: Vec<Target>,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Running sum of observed targets over all processed ticks.
    pub(crate) observed_ticks: u64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> CoverageReport {
        info!(
            robots = self.robots.len(),
            targets = self.targets.len(),
            ticks = self.config.total_ticks(),
            dt = self.config.dt_secs,
            tracking = self.config.tracking,
            seed = self.config.seed,
            "simulation started"
        );

        while self.clock.current_tick < self.config.end_tick() {
            self.observed_step(observer);
        }

        let report = self.report();
        observer.on_sim_end(self.clock.current_tick, &report);
        info!(
            observed_ticks = report.observed_ticks,
            average = report.raw_average(),
            normalized = report.normalized_average(),
            "simulation finished"
        );
        report
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_step(observer);
        }
    }

    /// Coverage accumulated so far.
    pub fn report(&self) -> CoverageReport {
        CoverageReport {
            observed_ticks: self.observed_ticks,
            ticks_run:      self.clock.current_tick.0,
            duration_secs:  self.config.duration_secs,
            target_count:   self.targets.len(),
        }
    }

    /// Shorthand for `self.report().average_observations(normalize)`.
    #[inline]
    pub fn average_observations(&self, normalize: bool) -> f64 {
        self.report().average_observations(normalize)
    }

    #[inline]
    pub fn observed_ticks(&self) -> u64 {
        self.observed_ticks
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let observed = self.process_tick(now);
        observer.on_tick_end(now, observed);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.robots, &self.targets);
        }
        self.clock.advance();
    }

    fn process_tick(&mut self, now: Tick) -> usize {
        let dt = self.config.dt_secs;

        // ── Phase 1: snapshot ─────────────────────────────────────────────
        let snapshot = WorldSnapshot::capture(&self.robots, &self.targets);
        let ctx = snapshot.context(now, dt);

        // ── Phase 2: control (reads snapshot only) ────────────────────────
        trace!(tick = now.0, "control phase");
        let robot_count = self.robots.len();
        for robot in &mut self.robots {
            let rng = self.rngs.get_mut(AgentId::of_robot(robot.id));
            robot.update_control(&ctx, rng);
        }
        for target in &mut self.targets {
            let rng = self.rngs.get_mut(AgentId::of_target(target.id, robot_count));
            target.update_control(&ctx, rng);
        }

        // ── Phase 3: tally ────────────────────────────────────────────────
        let observed = snapshot.observed_targets();
        self.observed_ticks += observed as u64;

        // ── Phase 4: state ────────────────────────────────────────────────
        trace!(tick = now.0, "state phase");
        for robot in &mut self.robots {
            robot.update_state(dt);
        }
        for target in &mut self.targets {
            target.update_state(dt);
        }

        debug!(tick = now.0, observed, "tick complete");
        observed
    }
}
