//! The `ControlLaw` trait — the capability shared by robots and targets.

use ptrack_agent::AgentState;
use ptrack_core::AgentRng;

use crate::SimContext;

/// How an agent turns a world snapshot into a control.
///
/// Robots and targets are distinct types with distinct data; this trait is
/// the only thing the simulation loop needs from either.
///
/// # Required methods
///
/// [`state`][Self::state], [`state_mut`][Self::state_mut] and
/// [`update_control`][Self::update_control].  The state update is the same
/// Euler step for every agent and has a default.
///
/// # Contract
///
/// `update_control` reads other agents only through `ctx` and must end with
/// `AgentState::apply_boundary_correction` so the boundary always has the
/// last word on steering.
pub trait ControlLaw {
    fn state(&self) -> &AgentState;

    fn state_mut(&mut self) -> &mut AgentState;

    /// Control phase: decide speed and steering for the coming tick.
    fn update_control(&mut self, ctx: &SimContext<'_>, rng: &mut AgentRng);

    /// State phase: integrate the pose by `dt` seconds.
    fn update_state(&mut self, dt: f64) {
        self.state_mut().update_state(dt);
    }
}
