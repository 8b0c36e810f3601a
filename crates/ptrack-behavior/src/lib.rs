//! `ptrack-behavior` — control laws and the world snapshot they read.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`model`]    | `ControlLaw` trait — the capability shared by robots and targets  |
//! | [`context`]  | `WorldSnapshot` (owned pre-tick copy), `SimContext<'a>` (borrowed view) |
//! | [`profile`]  | `ForceProfile` — piecewise-linear force magnitude vs. distance     |
//! | [`tracking`] | `SensorRanges`, `Phantom`, `TrackingMemory`                       |
//! | [`robot`]    | `Robot`, `RobotSpec` — potential-field control law                |
//! | [`target`]   | `Target`, `TargetSpec` — constant speed, random heading changes   |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Design notes
//!
//! The two-phase tick loop in ptrack-sim works as follows:
//!
//! 1. **Control phase**: a [`WorldSnapshot`] of every agent's pre-tick pose
//!    and control is captured, then `ControlLaw::update_control` runs for
//!    every agent.  Reads go through `&SimContext`; each agent mutates only
//!    itself (its control and, for robots, its tracking memory).
//!
//! 2. **State phase**: `ControlLaw::update_state` integrates every agent.
//!
//! Because the snapshot is a copy, no control decision can observe another
//! agent's post-tick state, whatever order agents are visited in.

pub mod context;
pub mod error;
pub mod model;
pub mod profile;
pub mod robot;
pub mod target;
pub mod tracking;

#[cfg(test)]
mod tests;

pub use context::{SimContext, WorldSnapshot};
pub use error::{BehaviorError, BehaviorResult};
pub use model::ControlLaw;
pub use profile::{ForceProfile, ProfilePoint};
pub use robot::{Robot, RobotSpec};
pub use target::{Target, TargetSpec};
pub use tracking::{Phantom, SensorRanges, TrackingMemory};
