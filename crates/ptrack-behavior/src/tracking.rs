//! Sensor ranges and the per-robot memory of sensed and tracked targets.
//!
//! # Phantoms
//!
//! When a target a robot sensed on the previous tick has moved into the
//! tracking band (outside sensing range but within tracking range), the robot
//! keeps a *phantom*: a copy of the target's pose and control as seen in the
//! snapshot, dead-reckoned forward every tick at constant speed and heading.
//! The robot keeps steering toward the phantom until it leaves the band or
//! the real target is sensed again.
//!
//! # Generations
//!
//! Each control phase builds a fresh [`TrackingMemory`] from the previous
//! one and swaps it in.  Nothing is removed from a collection while that
//! collection is being iterated.

use std::collections::BTreeMap;

use ptrack_agent::{Control, Kinematics, Pose};
use ptrack_core::{TargetId, Vec2};
use tracing::trace;

/// Sensing radius and outer tracking radius of one robot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorRanges {
    pub sensing:  f64,
    pub tracking: f64,

    /// Whether the band `sensing < d <= tracking` is used at all.
    pub predictive: bool,
}

impl SensorRanges {
    #[inline]
    pub fn senses(&self, distance: f64) -> bool {
        distance <= self.sensing
    }

    /// `true` inside the tracking band; always `false` with tracking off.
    #[inline]
    pub fn in_band(&self, distance: f64) -> bool {
        self.predictive && distance > self.sensing && distance <= self.tracking
    }
}

/// Dead-reckoned estimate of a target that left sensing range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Phantom {
    /// The real target this phantom stands in for.
    pub source:  TargetId,
    pub pose:    Pose,
    pub control: Control,
}

impl Phantom {
    pub fn from_snapshot(source: TargetId, seen: &Kinematics) -> Self {
        Self { source, pose: seen.pose, control: seen.control }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pose.position()
    }

    /// One constant-velocity step.  A pending steering increment is applied
    /// once, like any agent's, and then cleared.
    pub fn dead_reckon(&mut self, dt: f64) {
        self.pose = self.pose.integrate(&self.control, dt);
        self.control.steering = 0.0;
    }
}

/// What a robot knows about targets beyond the current snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingMemory {
    /// Targets within sensing range at the last control phase, ascending.
    sensed: Vec<TargetId>,

    /// At most one phantom per source target.
    tracked: BTreeMap<TargetId, Phantom>,
}

impl TrackingMemory {
    #[inline]
    pub fn sensed(&self) -> &[TargetId] {
        &self.sensed
    }

    pub fn tracked(&self) -> impl Iterator<Item = &Phantom> {
        self.tracked.values()
    }

    #[inline]
    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    #[inline]
    pub fn phantom(&self, source: TargetId) -> Option<&Phantom> {
        self.tracked.get(&source)
    }

    /// Nothing sensed and nothing tracked.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.sensed.is_empty() && self.tracked.is_empty()
    }

    /// Build the memory for the coming tick.
    ///
    /// `origin` is the robot's pre-tick position and `targets` the snapshot
    /// of target kinematics indexed by `TargetId`.
    pub fn next_generation(
        &self,
        origin:  Vec2,
        ranges:  SensorRanges,
        targets: &[Kinematics],
        dt:      f64,
    ) -> TrackingMemory {
        let sensed: Vec<TargetId> = targets
            .iter()
            .enumerate()
            .filter(|(_, t)| ranges.senses(origin.distance(t.position())))
            .map(|(i, _)| TargetId(i as u32))
            .collect();

        let mut carried: BTreeMap<TargetId, Phantom> = BTreeMap::new();
        for (&source, phantom) in &self.tracked {
            if sensed.binary_search(&source).is_ok() {
                trace!(target_id = source.0, "phantom dropped: target re-acquired");
            } else {
                carried.insert(source, *phantom);
            }
        }

        for &source in &self.sensed {
            let seen = &targets[source.index()];
            if ranges.in_band(origin.distance(seen.position())) {
                trace!(target_id = source.0, "phantom spawned: target left sensing range");
                carried.insert(source, Phantom::from_snapshot(source, seen));
            }
        }

        let tracked = carried
            .into_iter()
            .filter_map(|(source, mut phantom)| {
                phantom.dead_reckon(dt);
                if ranges.in_band(origin.distance(phantom.position())) {
                    Some((source, phantom))
                } else {
                    trace!(target_id = source.0, "phantom dropped: left tracking band");
                    None
                }
            })
            .collect();

        TrackingMemory { sensed, tracked }
    }
}
