//! Read-only world state passed to every control law.

use ptrack_agent::Kinematics;
use ptrack_core::{Tick, TargetId};

use crate::{ControlLaw, Robot, Target};

/// Owned copy of every agent's pre-tick kinematics.
///
/// Captured once per tick by ptrack-sim before any control law runs.  The
/// per-target sensing counts are computed here, from pre-tick positions, so
/// every robot sees the same counts regardless of visiting order.
#[derive(Clone, Debug, Default)]
pub struct WorldSnapshot {
    robots:         Vec<Kinematics>,
    targets:        Vec<Kinematics>,
    sensing_counts: Vec<u32>,
}

impl WorldSnapshot {
    pub fn capture(robots: &[Robot], targets: &[Target]) -> Self {
        let robot_kin: Vec<Kinematics> = robots.iter().map(|r| r.state().kinematics()).collect();
        let target_kin: Vec<Kinematics> = targets.iter().map(|t| t.state().kinematics()).collect();

        let sensing_counts = target_kin
            .iter()
            .map(|t| robots.iter().filter(|r| r.senses(t.position())).count() as u32)
            .collect();

        Self { robots: robot_kin, targets: target_kin, sensing_counts }
    }

    /// Borrowed view for one tick's control phase.
    #[inline]
    pub fn context(&self, tick: Tick, dt: f64) -> SimContext<'_> {
        SimContext {
            tick,
            dt,
            robots:         &self.robots,
            targets:        &self.targets,
            sensing_counts: &self.sensing_counts,
        }
    }

    /// Number of targets within sensing range of at least one robot.
    pub fn observed_targets(&self) -> usize {
        self.sensing_counts.iter().filter(|&&c| c > 0).count()
    }
}

/// A read-only view of the pre-tick world handed to
/// [`ControlLaw::update_control`].
///
/// All borrows point into a [`WorldSnapshot`] and live for one control phase.
#[derive(Copy, Clone, Debug)]
pub struct SimContext<'a> {
    /// The tick being computed.
    pub tick: Tick,

    /// Tick length in seconds.
    pub dt: f64,

    /// Robot kinematics, indexed by `RobotId`.
    pub robots: &'a [Kinematics],

    /// Target kinematics, indexed by `TargetId`.
    pub targets: &'a [Kinematics],

    /// How many robots sense each target, indexed by `TargetId`.
    pub sensing_counts: &'a [u32],
}

impl SimContext<'_> {
    #[inline]
    pub fn target(&self, id: TargetId) -> &Kinematics {
        &self.targets[id.index()]
    }

    #[inline]
    pub fn sensing_count(&self, id: TargetId) -> u32 {
        self.sensing_counts[id.index()]
    }
}
