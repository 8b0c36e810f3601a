//! Unit tests for ptrack-behavior.

use ptrack_agent::Pose;
use ptrack_core::{AgentId, AgentRng, RobotId, SimConfig, TargetId, Tick};

use crate::{ControlLaw, Robot, RobotSpec, Target, TargetSpec, WorldSnapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(tracking: bool) -> SimConfig {
    SimConfig { tracking, ..SimConfig::default() }
}

fn robot_at(id: u32, x: f64, y: f64, tracking: bool) -> Robot {
    Robot::new(RobotId(id), Pose::new(x, y, 0.0), RobotSpec::from_config(&config(tracking))).unwrap()
}

fn target_at(id: u32, x: f64, y: f64, speed: f64) -> Target {
    Target::new(TargetId(id), Pose::new(x, y, 0.0), speed, &TargetSpec::from_config(&SimConfig::default()))
}

/// Run one control phase for a lone robot against `targets`.
fn control_step(robot: &mut Robot, targets: &[Target]) {
    let snapshot = WorldSnapshot::capture(std::slice::from_ref(&*robot), targets);
    let mut rng = AgentRng::new(0, AgentId(0));
    robot.update_control(&snapshot.context(Tick::ZERO, 1.0), &mut rng);
}

// ── Force profiles ────────────────────────────────────────────────────────────

#[cfg(test)]
mod profile_tests {
    use ptrack_core::Vec2;

    use crate::{BehaviorError, ForceProfile};

    const EPS: f64 = 1e-12;

    #[test]
    fn tracking_target_profile_values() {
        let p = ForceProfile::target_default(true);
        let cases = [
            (-1.0, -1.0),
            (0.0, -1.0),
            (2.0, -0.5),
            (4.0, 0.0),
            (6.0, 0.5),
            (8.0, 1.0),
            (20.0, 1.0),
            (27.5, 0.5),
            (30.0, 0.0),
            (45.0, 0.0),
        ];
        for (d, expected) in cases {
            assert!((p.magnitude_at(d) - expected).abs() < EPS, "d = {d}: {}", p.magnitude_at(d));
        }
    }

    #[test]
    fn sensing_only_profile_steps_to_zero_at_thirty() {
        let p = ForceProfile::target_default(false);
        assert!((p.magnitude_at(29.0) - 1.0).abs() < EPS);
        assert_eq!(p.magnitude_at(30.0), 0.0);
        assert_eq!(p.distance_at(3), Some(30.0));
        assert_eq!(p.distance_at(4), Some(30.0));
    }

    #[test]
    fn robot_profile_values() {
        let p = ForceProfile::robot_default();
        assert_eq!(p.magnitude_at(5.0), -1.0);
        assert!((p.magnitude_at(16.25) + 0.5).abs() < EPS);
        assert_eq!(p.magnitude_at(25.0), 0.0);
    }

    #[test]
    fn repeated_distance_is_a_step() {
        let p = ForceProfile::new([(0.0, 0.0), (5.0, 0.0), (5.0, 1.0), (10.0, 1.0)]).unwrap();
        assert_eq!(p.magnitude_at(4.9), 0.0);
        assert_eq!(p.magnitude_at(5.0), 1.0);
        assert_eq!(p.magnitude_at(7.0), 1.0);
    }

    #[test]
    fn force_scales_with_separation() {
        let p = ForceProfile::target_default(true);
        assert_eq!(p.force(Vec2::ZERO, Vec2::new(10.0, 0.0)), Vec2::new(10.0, 0.0));
        assert_eq!(p.force(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), Vec2::ZERO);
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        assert_eq!(ForceProfile::new(Vec::<(f64, f64)>::new()), Err(BehaviorError::EmptyProfile));
        assert_eq!(
            ForceProfile::new([(0.0, 1.0), (5.0, 0.0), (3.0, 1.0)]),
            Err(BehaviorError::UnsortedProfile { index: 2 })
        );
        assert_eq!(
            ForceProfile::new([(-1.0, 1.0), (5.0, 0.0)]),
            Err(BehaviorError::UnsortedProfile { index: 0 })
        );
        assert_eq!(
            ForceProfile::new([(0.0, f64::NAN)]),
            Err(BehaviorError::NonFiniteProfile { index: 0 })
        );
    }
}

// ── Robot construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod robot_spec_tests {
    use ptrack_agent::Pose;
    use ptrack_core::{RobotId, SimConfig};

    use super::config;
    use crate::{BehaviorError, ForceProfile, Robot, RobotSpec};

    #[test]
    fn ranges_come_from_target_profile() {
        let tracking = RobotSpec::from_config(&config(true)).ranges().unwrap();
        assert_eq!((tracking.sensing, tracking.tracking), (25.0, 30.0));
        assert!(tracking.predictive);

        let plain = RobotSpec::from_config(&config(false)).ranges().unwrap();
        assert_eq!((plain.sensing, plain.tracking), (30.0, 30.0));
        assert!(!plain.in_band(30.0));
    }

    #[test]
    fn short_target_profile_is_rejected() {
        let spec = RobotSpec::from_config(&SimConfig::default())
            .with_target_profile(ForceProfile::robot_default());
        let err = Robot::new(RobotId(0), Pose::default(), spec).unwrap_err();
        assert_eq!(err, BehaviorError::ProfileTooShort { required: 5, got: 3 });
    }

    #[test]
    fn non_positive_max_speed_is_rejected() {
        let mut spec = RobotSpec::from_config(&SimConfig::default());
        spec.max_speed = 0.0;
        assert!(matches!(
            Robot::new(RobotId(0), Pose::default(), spec),
            Err(BehaviorError::InvalidMaxSpeed(_))
        ));
    }

    #[test]
    fn band_predicates_follow_ranges() {
        let robot = Robot::new(RobotId(0), Pose::default(), RobotSpec::from_config(&config(true))).unwrap();
        assert!(robot.senses(ptrack_core::Vec2::new(25.0, 0.0)));
        assert!(!robot.in_tracking_band(ptrack_core::Vec2::new(25.0, 0.0)));
        assert!(robot.in_tracking_band(ptrack_core::Vec2::new(0.0, -30.0)));
        assert!(!robot.in_tracking_band(ptrack_core::Vec2::new(30.5, 0.0)));
    }

    #[test]
    fn custom_robot_profile_is_used() {
        let spacing = ForceProfile::new([(0.0, -2.0), (5.0, 0.0)]).unwrap();
        let spec = RobotSpec::from_config(&SimConfig::default()).with_robot_profile(spacing.clone());
        assert_eq!(spec.robot_profile, spacing);
        assert!(Robot::new(RobotId(0), Pose::default(), spec).is_ok());
    }

    #[test]
    fn new_robot_cruises_at_max_speed() {
        let robot = Robot::new(RobotId(1), Pose::new(1.0, 2.0, 0.5), RobotSpec::from_config(&SimConfig::default()))
            .unwrap();
        assert_eq!(robot.max_speed(), 2.0);
        assert_eq!(robot.state.control.speed, 2.0);
        assert_eq!(robot.state.control.steering, 0.0);
        assert!(robot.memory().is_idle());
    }
}

// ── Snapshot and weights ──────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn sensing_counts_and_observed_targets() {
        let robots = [robot_at(0, 0.0, 0.0, false), robot_at(1, 0.0, 5.0, false)];
        let targets = [target_at(0, 10.0, 0.0, 0.0), target_at(1, -80.0, 0.0, 0.0)];
        let snapshot = WorldSnapshot::capture(&robots, &targets);
        let ctx = snapshot.context(Tick(3), 1.0);
        assert_eq!(ctx.sensing_counts, &[2, 0]);
        assert_eq!(snapshot.observed_targets(), 1);
        assert_eq!(ctx.tick, Tick(3));
        assert_eq!(ctx.sensing_count(TargetId(1)), 0);
    }

    #[test]
    fn exclusive_target_has_full_weight() {
        let robots = [robot_at(0, 0.0, 0.0, false), robot_at(1, 60.0, 0.0, false)];
        let targets = [target_at(0, 10.0, 0.0, 0.0)];
        let snapshot = WorldSnapshot::capture(&robots, &targets);
        let ctx = snapshot.context(Tick::ZERO, 1.0);
        assert_eq!(robots[0].weight(TargetId(0), &ctx), 1.0);
    }

    #[test]
    fn shared_target_has_quarter_weight() {
        let robots = [robot_at(0, 0.0, 0.0, false), robot_at(1, 0.0, 5.0, false)];
        let targets = [target_at(0, 10.0, 0.0, 0.0)];
        let snapshot = WorldSnapshot::capture(&robots, &targets);
        let ctx = snapshot.context(Tick::ZERO, 1.0);
        assert_eq!(robots[0].weight(TargetId(0), &ctx), 0.25);
        assert_eq!(robots[1].weight(TargetId(0), &ctx), 0.25);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut robots = [robot_at(0, 0.0, 0.0, false)];
        let targets = [target_at(0, 10.0, 0.0, 1.0)];
        let snapshot = WorldSnapshot::capture(&robots, &targets);
        robots[0].update_state(5.0);
        let ctx = snapshot.context(Tick::ZERO, 1.0);
        assert_eq!(ctx.robots[0].pose.x, 0.0);
        assert!(robots[0].state.pose.x > 0.0);
    }
}

// ── Robot control law ─────────────────────────────────────────────────────────

#[cfg(test)]
mod robot_control_tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn idle_robot_cruises_straight_at_max_speed() {
        let mut robot = robot_at(0, 0.0, 0.0, false);
        robot.state.control.speed = 0.3;
        control_step(&mut robot, &[target_at(0, 80.0, 0.0, 0.0)]);
        assert!(robot.memory().is_idle());
        assert_eq!(robot.state.control.speed, 2.0);
        assert_eq!(robot.state.control.steering, 0.0);
    }

    #[test]
    fn steers_toward_sensed_target() {
        let mut robot = robot_at(0, 0.0, 0.0, false);
        control_step(&mut robot, &[target_at(0, 0.0, 10.0, 0.0)]);
        assert_eq!(robot.memory().sensed(), &[TargetId(0)]);
        assert_eq!(robot.state.control.speed, 2.0);
        assert!((robot.state.control.steering - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn speed_is_force_magnitude_below_saturation() {
        let mut robot = robot_at(0, 0.0, 0.0, false);
        // magnitude_at(5) = 0.25, F = (1.25, 0).
        control_step(&mut robot, &[target_at(0, 5.0, 0.0, 0.0)]);
        assert!((robot.state.control.speed - 1.25).abs() < EPS);
        assert!(robot.state.control.steering.abs() < EPS);
    }

    #[test]
    fn close_target_repels() {
        let mut robot = robot_at(0, 0.0, 0.0, false);
        control_step(&mut robot, &[target_at(0, 2.0, 0.0, 0.0)]);
        assert!((robot.state.control.speed - 1.0).abs() < EPS);
        assert!((robot.state.control.steering - PI).abs() < EPS);
        assert_eq!(robot.last_force(), ptrack_core::Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn robot_outside_heading_out_is_turned_back() {
        let mut robot = robot_at(0, 110.0, 0.0, false);
        control_step(&mut robot, &[]);
        assert!(robot.memory().is_idle());
        assert!((robot.state.control.steering - PI).abs() < EPS);
        robot.update_state(1.0);
        assert!(robot.state.heading_inward());
    }

    #[test]
    fn robots_repel_each_other() {
        let robots = [robot_at(0, 0.0, 0.0, false), robot_at(1, 10.0, 0.0, false)];
        let snapshot = WorldSnapshot::capture(&robots, &[]);
        let ctx = snapshot.context(Tick::ZERO, 1.0);
        let force = robots[0].net_force(&ctx);
        assert_eq!(force, ptrack_core::Vec2::new(-10.0, 0.0));
    }
}

// ── Predictive tracking ───────────────────────────────────────────────────────

#[cfg(test)]
mod tracking_tests {
    use super::*;

    /// Robot at the origin that sensed target 0 at (20, 0) last tick; the
    /// target has since moved to (27, 0) heading +x at 1 m/s.
    fn robot_with_fresh_phantom(tracking: bool) -> (Robot, Vec<Target>) {
        let mut robot = robot_at(0, 0.0, 0.0, tracking);
        let mut targets = vec![target_at(0, 20.0, 0.0, 1.0)];
        control_step(&mut robot, &targets);
        assert_eq!(robot.memory().sensed(), &[TargetId(0)]);

        targets[0].state.pose.x = if tracking { 27.0 } else { 35.0 };
        control_step(&mut robot, &targets);
        (robot, targets)
    }

    #[test]
    fn leaving_sensing_range_spawns_one_phantom() {
        let (robot, _) = robot_with_fresh_phantom(true);
        assert!(robot.memory().sensed().is_empty());
        assert_eq!(robot.memory().tracked_len(), 1);

        let phantom = robot.memory().phantom(TargetId(0)).unwrap();
        assert_eq!(phantom.source, TargetId(0));
        assert_eq!(phantom.pose.x, 28.0, "phantom advanced one dead-reckoning step");
        assert!(!robot.memory().is_idle());
    }

    #[test]
    fn phantom_pulls_at_quarter_weight() {
        let (robot, _) = robot_with_fresh_phantom(true);
        // magnitude_at(28) = 0.4, F = 0.25 · 0.4 · (28, 0).
        assert!((robot.last_force().x - 2.8).abs() < 1e-12);
        assert_eq!(robot.state.control.speed, 2.0);
    }

    #[test]
    fn phantom_is_dropped_once_outside_tracking_range() {
        let (mut robot, targets) = robot_with_fresh_phantom(true);
        // 28 → 29 → 30 stay in band, 31 does not.
        control_step(&mut robot, &targets);
        control_step(&mut robot, &targets);
        assert_eq!(robot.memory().phantom(TargetId(0)).map(|p| p.pose.x), Some(30.0));
        control_step(&mut robot, &targets);
        assert_eq!(robot.memory().tracked_len(), 0);
        assert!(robot.memory().is_idle());
        assert_eq!(robot.state.control.speed, 2.0);
    }

    #[test]
    fn phantom_is_dropped_when_target_is_reacquired() {
        let (mut robot, mut targets) = robot_with_fresh_phantom(true);
        targets[0].state.pose.x = 10.0;
        control_step(&mut robot, &targets);
        assert_eq!(robot.memory().tracked_len(), 0);
        assert_eq!(robot.memory().sensed(), &[TargetId(0)]);
    }

    #[test]
    fn no_phantoms_without_tracking() {
        let (robot, _) = robot_with_fresh_phantom(false);
        assert_eq!(robot.memory().tracked_len(), 0);
        assert!(robot.memory().is_idle());
    }
}

// ── Target control law ────────────────────────────────────────────────────────

#[cfg(test)]
mod target_tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::BehaviorError;

    fn spec(turn_chance: f64) -> TargetSpec {
        TargetSpec { turn_chance, ..TargetSpec::from_config(&SimConfig::default()) }
    }

    fn drive(target: &mut Target, ticks: usize) -> Vec<f64> {
        let snapshot = WorldSnapshot::default();
        let ctx = snapshot.context(Tick::ZERO, 1.0);
        let mut rng = AgentRng::new(9, AgentId(5));
        (0..ticks)
            .map(|_| {
                target.update_control(&ctx, &mut rng);
                let steering = target.state.control.steering;
                target.state.control.steering = 0.0;
                steering
            })
            .collect()
    }

    #[test]
    fn zero_turn_chance_never_steers() {
        let mut target = Target::new(TargetId(0), Pose::default(), 1.0, &spec(0.0));
        assert!(drive(&mut target, 200).iter().all(|&s| s == 0.0));
        assert_eq!(target.state.control.speed, 1.0);
    }

    #[test]
    fn certain_turn_chance_steers_within_quarter_turns() {
        let mut target = Target::new(TargetId(0), Pose::default(), 1.0, &spec(1.0));
        let steerings = drive(&mut target, 200);
        assert!(steerings.iter().all(|s| (-FRAC_PI_2..=FRAC_PI_2).contains(s)));
        assert!(steerings.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn boundary_overrides_random_steering() {
        let mut target = Target::new(TargetId(0), Pose::new(105.0, 0.0, 0.0), 1.0, &spec(0.0));
        let snapshot = WorldSnapshot::default();
        let mut rng = AgentRng::new(9, AgentId(5));
        target.update_control(&snapshot.context(Tick::ZERO, 1.0), &mut rng);
        assert!((target.state.control.steering - PI).abs() < 1e-12);
    }

    #[test]
    fn random_speed_is_within_bounds() {
        let spec = spec(0.05);
        let mut rng = AgentRng::new(4, AgentId(3));
        for i in 0..100 {
            let t = Target::with_random_speed(TargetId(i), Pose::default(), &spec, &mut rng).unwrap();
            assert!((0.0..=1.5).contains(&t.state.control.speed));
            assert_eq!(t.turn_chance(), 0.05);
        }
    }

    #[test]
    fn random_speed_rejects_bad_max_speed() {
        let mut rng = AgentRng::new(4, AgentId(3));
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let spec = TargetSpec { max_speed: bad, ..spec(0.05) };
            let err = Target::with_random_speed(TargetId(0), Pose::default(), &spec, &mut rng).err().unwrap();
            assert!(matches!(err, BehaviorError::InvalidTargetMaxSpeed(_)));
        }

        let still = TargetSpec { max_speed: 0.0, ..spec(0.05) };
        let t = Target::with_random_speed(TargetId(0), Pose::default(), &still, &mut rng).unwrap();
        assert_eq!(t.state.control.speed, 0.0);
    }
}
