//! Fluent builder for constructing a [`Sim`].

use ptrack_agent::{AgentRngs, random_pose};
use ptrack_behavior::{Robot, RobotSpec, Target, TargetSpec};
use ptrack_core::{AgentId, RobotId, SimConfig, TargetId};
use tracing::debug;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — population sizes, duration, tick length, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                              |
/// |--------------------|------------------------------------------------------|
/// | `.robot_spec(s)`   | `RobotSpec::from_config(&config)`                    |
/// | `.robots(v)`       | `robot_count` robots placed uniformly in the disk    |
/// | `.targets(v)`      | `target_count` targets placed uniformly, random speed |
///
/// Random placement draws from each agent's own `AgentRng`, so a given seed
/// always yields the same initial world.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .targets(hand_placed_targets)
///     .build()?;
/// let report = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    robot_spec: Option<RobotSpec>,
    robots:     Option<Vec<Robot>>,
    targets:    Option<Vec<Target>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            robot_spec: None,
            robots:     None,
            targets:    None,
        }
    }

    /// Parameters for randomly placed robots (e.g. non-default force
    /// profiles).  Ignored when `.robots(v)` is supplied.
    pub fn robot_spec(mut self, spec: RobotSpec) -> Self {
        self.robot_spec = Some(spec);
        self
    }

    /// Supply the robot population (must be length `robot_count`, robot `i`
    /// carrying `RobotId(i)`).
    pub fn robots(mut self, robots: Vec<Robot>) -> Self {
        self.robots = Some(robots);
        self
    }

    /// Supply the target population (must be length `target_count`, target
    /// `j` carrying `TargetId(j)`).
    pub fn targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Validate the config and inputs, seed per-agent RNGs, place any agents
    /// not supplied, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let robot_count = self.config.robot_count;
        let target_count = self.config.target_count;
        let mut rngs = AgentRngs::new(robot_count + target_count, self.config.seed);

        // ── Robots ────────────────────────────────────────────────────────
        let robots = match self.robots {
            Some(robots) => {
                check_population(robots.iter().map(|r| r.id.0), robot_count, "robots")?;
                robots
            }
            None => {
                let spec = self
                    .robot_spec
                    .unwrap_or_else(|| RobotSpec::from_config(&self.config));
                (0..robot_count as u32)
                    .map(|i| {
                        let id = RobotId(i);
                        let pose = random_pose(self.config.env_radius, rngs.get_mut(AgentId::of_robot(id)));
                        Robot::new(id, pose, spec.clone())
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        // ── Targets ───────────────────────────────────────────────────────
        let targets = match self.targets {
            Some(targets) => {
                check_population(targets.iter().map(|t| t.id.0), target_count, "targets")?;
                targets
            }
            None => {
                let spec = TargetSpec::from_config(&self.config);
                (0..target_count as u32)
                    .map(|j| {
                        let id = TargetId(j);
                        let rng = rngs.get_mut(AgentId::of_target(id, robot_count));
                        let pose = random_pose(self.config.env_radius, rng);
                        Target::with_random_speed(id, pose, &spec, rng)
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        debug!(robots = robots.len(), targets = targets.len(), seed = self.config.seed, "simulation built");

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            robots,
            targets,
            rngs,
            observed_ticks: 0,
        })
    }
}

/// Length must equal `expected` and the `i`th id must be `i`.
fn check_population<I>(ids: I, expected: usize, what: &'static str) -> SimResult<()>
where
    I: ExactSizeIterator<Item = u32>,
{
    if ids.len() != expected {
        return Err(SimError::AgentCountMismatch { expected, got: ids.len(), what });
    }
    for (index, id) in ids.enumerate() {
        if id as usize != index {
            return Err(SimError::AgentIdMismatch { index, id, what });
        }
    }
    Ok(())
}
