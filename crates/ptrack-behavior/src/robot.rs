//! Potential-field robots.
//!
//! Each tick a robot sums an attractive/repulsive force from every relevant
//! target (sensed targets and, with predictive tracking, phantoms) and a
//! spacing force from every other robot, then steers along the net force.

use ptrack_agent::{AgentState, Control, Pose};
use ptrack_core::{AgentRng, RobotId, SimConfig, TargetId, Vec2, signed_angle};

use crate::{BehaviorError, BehaviorResult, ControlLaw, ForceProfile, SensorRanges, SimContext, TrackingMemory};

/// Control point of the target profile whose distance is the sensing range.
const SENSING_POINT: usize = 3;

/// Control point of the target profile whose distance is the tracking range.
const TRACKING_POINT: usize = 4;

/// Weight of a target shared with other robots, and of every phantom.
const SHARED_WEIGHT: f64 = 0.25;

/// Weight of a target only this robot senses.
const EXCLUSIVE_WEIGHT: f64 = 1.0;

/// Parameters shared by every robot in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotSpec {
    pub max_speed:           f64,
    pub radius:              f64,
    pub env_radius:          f64,
    pub predictive_tracking: bool,
    pub target_profile:      ForceProfile,
    pub robot_profile:       ForceProfile,
}

impl RobotSpec {
    /// Default profiles for `config.tracking`, speeds and radii from `config`.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            max_speed:           config.robot_max_speed,
            radius:              config.agent_radius,
            env_radius:          config.env_radius,
            predictive_tracking: config.tracking,
            target_profile:      ForceProfile::target_default(config.tracking),
            robot_profile:       ForceProfile::robot_default(),
        }
    }

    pub fn with_target_profile(mut self, profile: ForceProfile) -> Self {
        self.target_profile = profile;
        self
    }

    pub fn with_robot_profile(mut self, profile: ForceProfile) -> Self {
        self.robot_profile = profile;
        self
    }

    /// Sensing and tracking ranges read off the target profile.
    pub fn ranges(&self) -> BehaviorResult<SensorRanges> {
        let got = self.target_profile.points().len();
        match (
            self.target_profile.distance_at(SENSING_POINT),
            self.target_profile.distance_at(TRACKING_POINT),
        ) {
            (Some(sensing), Some(tracking)) => Ok(SensorRanges {
                sensing,
                tracking,
                predictive: self.predictive_tracking,
            }),
            _ => Err(BehaviorError::ProfileTooShort { required: TRACKING_POINT + 1, got }),
        }
    }
}

/// A mobile sensor platform steering by potential field.
#[derive(Clone, Debug)]
pub struct Robot {
    pub id:    RobotId,
    pub state: AgentState,

    max_speed:      f64,
    target_profile: ForceProfile,
    robot_profile:  ForceProfile,
    ranges:         SensorRanges,
    memory:         TrackingMemory,

    /// Net force from the last control phase.
    last_force: Vec2,
}

impl Robot {
    /// A robot at `pose`, initially cruising straight at `spec.max_speed`.
    pub fn new(id: RobotId, pose: Pose, spec: RobotSpec) -> BehaviorResult<Self> {
        if !(spec.max_speed.is_finite() && spec.max_speed > 0.0) {
            return Err(BehaviorError::InvalidMaxSpeed(spec.max_speed));
        }
        let ranges = spec.ranges()?;
        Ok(Self {
            id,
            state: AgentState::new(pose, Control::new(spec.max_speed, 0.0), spec.radius, spec.env_radius),
            max_speed: spec.max_speed,
            target_profile: spec.target_profile,
            robot_profile: spec.robot_profile,
            ranges,
            memory: TrackingMemory::default(),
            last_force: Vec2::ZERO,
        })
    }

    #[inline]
    pub fn ranges(&self) -> SensorRanges {
        self.ranges
    }

    #[inline]
    pub fn memory(&self) -> &TrackingMemory {
        &self.memory
    }

    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    #[inline]
    pub fn last_force(&self) -> Vec2 {
        self.last_force
    }

    /// `‖point − self‖ ≤ sensing range`.
    #[inline]
    pub fn senses(&self, point: Vec2) -> bool {
        self.ranges.senses(self.state.distance_to(point))
    }

    /// `sensing range < ‖point − self‖ ≤ tracking range`, with tracking on.
    #[inline]
    pub fn in_tracking_band(&self, point: Vec2) -> bool {
        self.ranges.in_band(self.state.distance_to(point))
    }

    /// Weight of a real target in the net force: full when this robot is its
    /// only observer, shared otherwise.
    pub fn weight(&self, target: TargetId, ctx: &SimContext<'_>) -> f64 {
        if self.senses(ctx.target(target).position()) && ctx.sensing_count(target) <= 1 {
            EXCLUSIVE_WEIGHT
        } else {
            SHARED_WEIGHT
        }
    }

    /// Net force from the current memory and the snapshot.
    pub fn net_force(&self, ctx: &SimContext<'_>) -> Vec2 {
        let origin = self.state.position();
        let mut force = Vec2::ZERO;

        for &id in self.memory.sensed() {
            let pull = self.target_profile.force(origin, ctx.target(id).position());
            force += pull * self.weight(id, ctx);
        }
        for phantom in self.memory.tracked() {
            force += self.target_profile.force(origin, phantom.position()) * SHARED_WEIGHT;
        }
        for (i, other) in ctx.robots.iter().enumerate() {
            if i != self.id.index() {
                force += self.robot_profile.force(origin, other.position());
            }
        }
        force
    }
}

impl ControlLaw for Robot {
    #[inline]
    fn state(&self) -> &AgentState {
        &self.state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut AgentState {
        &mut self.state
    }

    fn update_control(&mut self, ctx: &SimContext<'_>, _rng: &mut AgentRng) {
        self.memory = self
            .memory
            .next_generation(self.state.position(), self.ranges, ctx.targets, ctx.dt);

        let force = self.net_force(ctx);
        let magnitude = force.norm();
        self.last_force = force;

        self.state.control.speed = if self.memory.is_idle() {
            self.max_speed
        } else {
            magnitude.min(self.max_speed)
        };
        self.state.control.steering = if magnitude != 0.0 {
            signed_angle(self.state.orientation_vector(), force)
        } else {
            0.0
        };

        self.state.apply_boundary_correction();
    }
}
