//! Piecewise-linear force profiles.
//!
//! A profile maps the distance between two agents to a signed force
//! magnitude: negative repels, positive attracts.  The force vector itself is
//! `magnitude · (other − self)`, so it scales with the separation as well as
//! pointing along it.

use ptrack_core::Vec2;

use crate::{BehaviorError, BehaviorResult};

/// One control point of a [`ForceProfile`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProfilePoint {
    pub distance:  f64,
    pub magnitude: f64,
}

/// Robot → target profile with predictive tracking: sense to 25 m, track to 30 m.
const TARGET_TRACKING: [(f64, f64); 5] = [(0.0, -1.0), (4.0, 0.0), (8.0, 1.0), (25.0, 1.0), (30.0, 0.0)];

/// Robot → target profile without tracking: sensing and tracking both end at 30 m.
const TARGET_SENSING_ONLY: [(f64, f64); 5] = [(0.0, -1.0), (4.0, 0.0), (8.0, 1.0), (30.0, 1.0), (30.0, 0.0)];

/// Robot → robot profile: repel inside 12.5 m, fade out by 20 m.
const ROBOT_SPACING: [(f64, f64); 3] = [(0.0, -1.0), (12.5, -1.0), (20.0, 0.0)];

/// Ordered `(distance, magnitude)` control points.
///
/// Invariants (checked by [`ForceProfile::new`]): at least one point, every
/// value finite, distances non-negative and non-decreasing.  Repeated
/// distances are allowed and produce a step.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceProfile {
    points: Vec<ProfilePoint>,
}

impl ForceProfile {
    pub fn new<I>(points: I) -> BehaviorResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points: Vec<ProfilePoint> = points
            .into_iter()
            .map(|(distance, magnitude)| ProfilePoint { distance, magnitude })
            .collect();

        if points.is_empty() {
            return Err(BehaviorError::EmptyProfile);
        }
        let mut previous = 0.0;
        for (index, p) in points.iter().enumerate() {
            if !(p.distance.is_finite() && p.magnitude.is_finite()) {
                return Err(BehaviorError::NonFiniteProfile { index });
            }
            if p.distance < previous {
                return Err(BehaviorError::UnsortedProfile { index });
            }
            previous = p.distance;
        }
        Ok(Self { points })
    }

    fn from_table(table: &[(f64, f64)]) -> Self {
        Self {
            points: table
                .iter()
                .map(|&(distance, magnitude)| ProfilePoint { distance, magnitude })
                .collect(),
        }
    }

    /// Default robot → target profile.
    pub fn target_default(predictive_tracking: bool) -> Self {
        if predictive_tracking {
            Self::from_table(&TARGET_TRACKING)
        } else {
            Self::from_table(&TARGET_SENSING_ONLY)
        }
    }

    /// Default robot → robot profile.
    pub fn robot_default() -> Self {
        Self::from_table(&ROBOT_SPACING)
    }

    #[inline]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Distance of the control point at `index`, if there is one.
    #[inline]
    pub fn distance_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.distance)
    }

    /// Force magnitude at `distance`.
    ///
    /// Linear between control points; clamped to the first magnitude below
    /// the first point and to the last magnitude at or beyond the last point.
    pub fn magnitude_at(&self, distance: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if distance <= first.distance {
            return first.magnitude;
        }
        if distance >= last.distance {
            return last.magnitude;
        }
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            // `b.distance > distance >= a.distance` excludes zero-width steps.
            if distance >= a.distance && distance < b.distance {
                let t = (distance - a.distance) / (b.distance - a.distance);
                return a.magnitude + t * (b.magnitude - a.magnitude);
            }
        }
        last.magnitude
    }

    /// Force exerted on an agent at `from` by an entity at `to`.
    #[inline]
    pub fn force(&self, from: Vec2, to: Vec2) -> Vec2 {
        let separation = to - from;
        separation * self.magnitude_at(separation.norm())
    }
}
