//! Per-agent kinematic state: pose, control, history, boundary reflection.

use std::f64::consts::FRAC_PI_2;

use ptrack_core::{Vec2, reflect, signed_angle};
use tracing::trace;

/// Position (m) and orientation (rad) of an agent.
///
/// `theta` accumulates steering increments and is never normalized; only
/// differences between headings are wrapped.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x:     f64,
    pub y:     f64,
    pub theta: f64,
}

impl Pose {
    #[inline]
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Unit vector along the current heading.
    #[inline]
    pub fn orientation_vector(&self) -> Vec2 {
        Vec2::from_heading(self.theta)
    }

    /// One Euler step: translate along the *current* heading at `control.speed`
    /// for `dt` seconds, then add the steering increment to the heading.
    ///
    /// Steering is a heading jump applied once per step, not a turn rate, so
    /// it is not scaled by `dt`.
    #[inline]
    pub fn integrate(&self, control: &Control, dt: f64) -> Pose {
        Pose {
            x:     self.x + control.speed * self.theta.cos() * dt,
            y:     self.y + control.speed * self.theta.sin() * dt,
            theta: self.theta + control.steering,
        }
    }
}

/// Speed (m/s) and one-shot steering increment (rad).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Control {
    pub speed:    f64,
    pub steering: f64,
}

impl Control {
    #[inline]
    pub const fn new(speed: f64, steering: f64) -> Self {
        Self { speed, steering }
    }
}

/// Pose and control of one agent, copied into the per-tick world snapshot.
///
/// This is the only view other agents ever get of an agent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Kinematics {
    pub pose:    Pose,
    pub control: Control,
}

impl Kinematics {
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pose.position()
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// The state every agent carries, whatever its control law.
#[derive(Clone, Debug)]
pub struct AgentState {
    pub pose:    Pose,
    pub control: Control,

    /// Body radius (m).  Carried for consumers that draw or space agents;
    /// the control laws do not use it.
    pub radius: f64,

    /// Radius of the circular environment centred on the origin (m).
    pub env_radius: f64,

    /// The initial pose followed by one pose per state update.
    history: Vec<Pose>,

    /// Steering consumed by the most recent state update.
    applied_steering: f64,
}

impl AgentState {
    pub fn new(pose: Pose, control: Control, radius: f64, env_radius: f64) -> Self {
        Self {
            pose,
            control,
            radius,
            env_radius,
            history: vec![pose],
            applied_steering: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pose.position()
    }

    #[inline]
    pub fn orientation_vector(&self) -> Vec2 {
        self.pose.orientation_vector()
    }

    /// Distance from this agent to `point`.
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f64 {
        self.position().distance(point)
    }

    #[inline]
    pub fn kinematics(&self) -> Kinematics {
        Kinematics { pose: self.pose, control: self.control }
    }

    /// Past poses, oldest first.
    #[inline]
    pub fn history(&self) -> &[Pose] {
        &self.history
    }

    /// Heading change applied by the last `update_state` (rad).  Zero before
    /// the first update.
    #[inline]
    pub fn applied_steering(&self) -> f64 {
        self.applied_steering
    }

    /// `true` once the agent is strictly outside the environment disk.
    #[inline]
    pub fn out_of_bounds(&self) -> bool {
        self.position().norm() > self.env_radius
    }

    /// `true` if the heading points back toward the centre, i.e. it makes
    /// more than a right angle with the outward radial direction.
    #[inline]
    pub fn heading_inward(&self) -> bool {
        signed_angle(self.position(), self.orientation_vector()).abs() > FRAC_PI_2
    }

    /// Steering that bounces the heading off the boundary's inward normal,
    /// or `None` when the agent is inside the disk or already turning back.
    pub fn boundary_steering(&self) -> Option<f64> {
        if self.out_of_bounds() && !self.heading_inward() {
            Some(reflect(self.orientation_vector(), -self.position()))
        } else {
            None
        }
    }

    /// Override the pending steering with the boundary reflection if one is
    /// required.  Control laws call this last.
    pub fn apply_boundary_correction(&mut self) {
        if let Some(steering) = self.boundary_steering() {
            trace!(
                x = self.pose.x,
                y = self.pose.y,
                steering,
                "boundary reflection"
            );
            self.control.steering = steering;
        }
    }

    /// Advance the pose by one tick, consume the steering, record history.
    pub fn update_state(&mut self, dt: f64) {
        self.pose = self.pose.integrate(&self.control, dt);
        self.applied_steering = self.control.steering;
        self.control.steering = 0.0;
        self.history.push(self.pose);
    }
}
