//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * dt_secs
//!
//! Using an integer tick as the canonical time unit keeps the loop bound
//! exact: a run of `duration_secs` at `dt_secs` executes `⌈T / dt⌉` ticks
//! regardless of floating-point drift in the accumulated time.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimClock {
    /// Simulated seconds per tick.
    pub dt_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f64) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.dt_secs
    }

    /// Simulated time at the start of `tick`.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.dt_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t = {:.3} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from JSON by the application crate (with the `serde`
/// feature every field is optional and falls back to [`SimConfig::default`])
/// and passed to the simulation builder, which calls [`validate`][Self::validate]
/// before any agent is created.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of robots (m).
    pub robot_count: usize,

    /// Number of targets (n).
    pub target_count: usize,

    /// Total simulated duration T in seconds.
    pub duration_secs: f64,

    /// Tick length in seconds.  Must satisfy `0 < dt_secs <= duration_secs`.
    pub dt_secs: f64,

    /// Radius of the circular environment, centred on the origin (m).
    pub env_radius: f64,

    /// Enable predictive tracking of targets that left sensing range.
    pub tracking: bool,

    /// Robot cruise / saturation speed (m/s).
    pub robot_max_speed: f64,

    /// Target speeds are drawn uniformly from `[0, target_max_speed]` (m/s).
    pub target_max_speed: f64,

    /// Per-tick probability that a target picks a new random heading.
    pub target_turn_chance: f64,

    /// Body radius shared by all agents (m).
    pub agent_radius: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Deliver observer snapshots every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            robot_count:           3,
            target_count:          6,
            duration_secs:         120.0,
            dt_secs:               1.0,
            env_radius:            100.0,
            tracking:              false,
            robot_max_speed:       2.0,
            target_max_speed:      1.5,
            target_turn_chance:    0.05,
            agent_radius:          2.0,
            seed:                  4,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// Reject malformed values.  A config that passes can run to completion
    /// without any further error path.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(CoreError::config("duration_secs", self.duration_secs, "must be positive and finite"));
        }
        if !(self.dt_secs.is_finite() && self.dt_secs > 0.0) {
            return Err(CoreError::config("dt_secs", self.dt_secs, "must be positive and finite"));
        }
        if self.dt_secs > self.duration_secs {
            return Err(CoreError::config("dt_secs", self.dt_secs, "must not exceed duration_secs"));
        }
        if !(self.env_radius.is_finite() && self.env_radius > 0.0) {
            return Err(CoreError::config("env_radius", self.env_radius, "must be positive and finite"));
        }
        if !(self.robot_max_speed.is_finite() && self.robot_max_speed > 0.0) {
            return Err(CoreError::config("robot_max_speed", self.robot_max_speed, "must be positive and finite"));
        }
        if !(self.target_max_speed.is_finite() && self.target_max_speed >= 0.0) {
            return Err(CoreError::config("target_max_speed", self.target_max_speed, "must be non-negative and finite"));
        }
        if !(0.0..=1.0).contains(&self.target_turn_chance) {
            return Err(CoreError::config("target_turn_chance", self.target_turn_chance, "must lie in [0, 1]"));
        }
        if !(self.agent_radius.is_finite() && self.agent_radius >= 0.0) {
            return Err(CoreError::config("agent_radius", self.agent_radius, "must be non-negative and finite"));
        }
        Ok(())
    }

    /// Number of ticks in the run, `⌈T / dt⌉`.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        (self.duration_secs / self.dt_secs).ceil() as u64
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }
}
