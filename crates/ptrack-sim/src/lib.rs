//! `ptrack-sim` — tick loop orchestrator for ptrack.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..⌈T / dt⌉:
//!   ① Snapshot — copy every agent's pose and control; count, per target,
//!                how many robots sense it.
//!   ② Control  — Robot::update_control (ascending RobotId), then
//!                Target::update_control (ascending TargetId).  Reads only
//!                the snapshot.
//!   ③ Tally    — observed_ticks += targets sensed by at least one robot.
//!   ④ State    — update_state for robots, then targets.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ptrack_core::SimConfig;
//! use ptrack_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let report = sim.run(&mut NoopObserver);
//! println!("{:.3}", report.average_observations(true));
//! ```

pub mod builder;
pub mod coverage;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use coverage::CoverageReport;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
