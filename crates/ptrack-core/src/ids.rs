//! Strongly typed, zero-cost identifier wrappers.
//!
//! Robots and targets live in two separate `Vec`s, each indexed by its own
//! id type.  `AgentId` is the flat index over both populations (robots first,
//! then targets) and is used only to seed per-agent RNGs.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Flat index over all agents: robots `0..m`, then targets `m..m+n`.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a robot in the simulation's robot list.
    pub struct RobotId(u32);
}

typed_id! {
    /// Index of a target in the simulation's target list.
    pub struct TargetId(u32);
}

impl AgentId {
    /// The flat id of robot `robot`.
    #[inline]
    pub fn of_robot(robot: RobotId) -> AgentId {
        AgentId(robot.0)
    }

    /// The flat id of target `target` when there are `robot_count` robots.
    #[inline]
    pub fn of_target(target: TargetId, robot_count: usize) -> AgentId {
        AgentId(robot_count as u32 + target.0)
    }
}
