//! Plain data row types written by output backends.

use std::fmt;

use ptrack_agent::AgentState;

/// Which population a snapshot row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Robot,
    Target,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Robot => "robot",
            AgentKind::Target => "target",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pose and control of one agent after a given tick.
///
/// `steering` is the heading change applied during that tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub kind:     AgentKind,
    /// `RobotId` or `TargetId`, depending on `kind`.
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        f64,
    pub y:        f64,
    pub theta:    f64,
    pub speed:    f64,
    pub steering: f64,
}

impl AgentSnapshotRow {
    pub fn from_state(kind: AgentKind, agent_id: u32, tick: u64, state: &AgentState) -> Self {
        Self {
            kind,
            agent_id,
            tick,
            x:        state.pose.x,
            y:        state.pose.y,
            theta:    state.pose.theta,
            speed:    state.control.speed,
            steering: state.applied_steering(),
        }
    }
}

/// Coverage for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub time_secs:        f64,
    pub observed_targets: u64,
}
