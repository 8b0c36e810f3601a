//! `ptrack-core` — foundational types for the `ptrack` target-tracking simulator.
//!
//! This crate is a dependency of every other `ptrack-*` crate.  It has no
//! `ptrack-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `RobotId`, `TargetId`                           |
//! | [`geometry`]    | `Vec2`, polar conversion, `unit_vector`, `signed_angle`, `reflect` |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]         | `AgentRng` (per-agent, seeded from the run seed)           |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geometry::{Vec2, cart_to_polar, polar_to_cart, reflect, signed_angle, unit_vector, wrap_angle};
pub use ids::{AgentId, RobotId, TargetId};
pub use rng::AgentRng;
pub use time::{SimClock, SimConfig, Tick};
