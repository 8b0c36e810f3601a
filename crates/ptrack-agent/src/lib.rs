//! `ptrack-agent` — the kinematic entity shared by robots and targets.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`state`]       | `Pose`, `Control`, `Kinematics`, `AgentState`              |
//! | [`store`]       | `AgentRngs` (one `AgentRng` per agent, indexed by `AgentId`) |
//! | [`placement`]   | uniform random placement inside the environment disk       |
//!
//! # Update discipline
//!
//! An agent's state changes in exactly two places per tick:
//!
//! 1. **Control phase** — a control law writes `AgentState::control`
//!    (speed and one-shot steering) from a read-only snapshot of the world,
//!    finishing with [`AgentState::apply_boundary_correction`].
//! 2. **State phase** — [`AgentState::update_state`] integrates the pose,
//!    resets steering, and appends to history.
//!
//! Nothing in this crate reads another agent, so the phases cannot leak
//! post-tick state between agents.

pub mod placement;
pub mod state;
pub mod store;


pub use placement::random_pose;
pub use state::{AgentState, Control, Kinematics, Pose};
pub use store::AgentRngs;
