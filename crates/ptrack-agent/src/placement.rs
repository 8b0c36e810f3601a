//! Random initial placement.

use std::f64::consts::PI;

use ptrack_core::{AgentRng, polar_to_cart};

use crate::Pose;

/// A pose uniformly distributed over the disk of radius `env_radius`, with a
/// uniformly random heading.
///
/// The radius is drawn as `R·√u` so that the density is uniform in area
/// rather than bunched toward the centre.
pub fn random_pose(env_radius: f64, rng: &mut AgentRng) -> Pose {
    let rho = env_radius * rng.gen_range(0.0..=1.0_f64).sqrt();
    let phi = rng.gen_range(-PI..PI);
    let theta = rng.gen_range(-PI..PI);
    let p = polar_to_cart(rho, phi);
    Pose::new(p.x, p.y, theta)
}
