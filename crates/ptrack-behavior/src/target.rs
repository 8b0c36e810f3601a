//! Targets: constant speed, occasional random heading changes.

use std::f64::consts::FRAC_PI_2;

use ptrack_agent::{AgentState, Control, Pose};
use ptrack_core::{AgentRng, SimConfig, TargetId};

use crate::{BehaviorError, BehaviorResult, ControlLaw, SimContext};

/// Parameters shared by every target in a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetSpec {
    pub turn_chance: f64,
    pub max_speed:   f64,
    pub radius:      f64,
    pub env_radius:  f64,
}

impl TargetSpec {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            turn_chance: config.target_turn_chance,
            max_speed:   config.target_max_speed,
            radius:      config.agent_radius,
            env_radius:  config.env_radius,
        }
    }
}

/// A wandering target.
#[derive(Clone, Debug)]
pub struct Target {
    pub id:    TargetId,
    pub state: AgentState,

    /// Per-tick probability of a new random heading.
    turn_chance: f64,
}

impl Target {
    /// A target at `pose` moving straight at `speed`.
    pub fn new(id: TargetId, pose: Pose, speed: f64, spec: &TargetSpec) -> Self {
        Self {
            id,
            state: AgentState::new(pose, Control::new(speed, 0.0), spec.radius, spec.env_radius),
            turn_chance: spec.turn_chance,
        }
    }

    /// A target at `pose` with speed drawn from `U[0, spec.max_speed]`.
    pub fn with_random_speed(
        id: TargetId,
        pose: Pose,
        spec: &TargetSpec,
        rng: &mut AgentRng,
    ) -> BehaviorResult<Self> {
        if !(spec.max_speed.is_finite() && spec.max_speed >= 0.0) {
            return Err(BehaviorError::InvalidTargetMaxSpeed(spec.max_speed));
        }
        let speed = rng.gen_range(0.0..=spec.max_speed);
        Ok(Self::new(id, pose, speed, spec))
    }

    #[inline]
    pub fn turn_chance(&self) -> f64 {
        self.turn_chance
    }
}

impl ControlLaw for Target {
    #[inline]
    fn state(&self) -> &AgentState {
        &self.state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut AgentState {
        &mut self.state
    }

    fn update_control(&mut self, _ctx: &SimContext<'_>, rng: &mut AgentRng) {
        self.state.control.steering = if rng.gen_bool(self.turn_chance) {
            rng.gen_range(-FRAC_PI_2..=FRAC_PI_2)
        } else {
            0.0
        };
        self.state.apply_boundary_correction();
    }
}
