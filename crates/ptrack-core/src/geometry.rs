//! Planar vector type and the angle utilities used by steering.
//!
//! All angles are radians.  Differences between headings are always wrapped
//! into the half-open interval (−π, π] so a steering command never turns
//! the long way round.

use std::f64::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2-D vector in metres (positions, separations, forces).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along heading `theta`.
    #[inline]
    pub fn from_heading(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle of the vector, `atan2(y, x)`.  Zero for the zero vector.
    #[inline]
    pub fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).norm()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Cartesian → polar `(rho, phi)`.
#[inline]
pub fn cart_to_polar(v: Vec2) -> (f64, f64) {
    (v.norm(), v.heading())
}

/// Polar `(rho, phi)` → cartesian.
#[inline]
pub fn polar_to_cart(rho: f64, phi: f64) -> Vec2 {
    Vec2::new(rho * phi.cos(), rho * phi.sin())
}

/// `v / ‖v‖`, or `v` itself when it has zero length.
#[inline]
pub fn unit_vector(v: Vec2) -> Vec2 {
    let n = v.norm();
    if n == 0.0 { v } else { v * (1.0 / n) }
}

/// Wrap an angle into (−π, π].
pub fn wrap_angle(a: f64) -> f64 {
    let mut a = a % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Signed angle that rotates `v1` onto `v2`, wrapped into (−π, π].
///
/// Degenerate for a zero vector (its heading is taken as 0); callers guard
/// zero-length force vectors before steering on them.
#[inline]
pub fn signed_angle(v1: Vec2, v2: Vec2) -> f64 {
    wrap_angle(v2.heading() - v1.heading())
}

/// Reflect `v1` about `normal` and return the signed angle from `v1` to the
/// reflected vector.  This is the one-shot steering that bounces a heading
/// off a wall whose inward normal is `normal`.
pub fn reflect(v1: Vec2, normal: Vec2) -> f64 {
    let n = unit_vector(normal);
    let reflected = v1 - n * (2.0 * v1.dot(n));
    signed_angle(v1, reflected)
}
