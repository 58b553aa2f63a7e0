//! Combined positional and rotational camera offset.
//!
//! Every shake reports a `Displacement` each frame; the shaker sums them and
//! writes the result to the camera. Rotation is kept as Euler angles in degrees
//! so offsets can be added and scaled component-wise.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Position offset plus rotation offset (Euler angles, degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub position: Vec3,
    pub euler_angles: Vec3,
}

impl Displacement {
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        euler_angles: Vec3::ZERO,
    };

    pub const fn new(position: Vec3, euler_angles: Vec3) -> Self {
        Self {
            position,
            euler_angles,
        }
    }

    /// Displacement with only the position half populated.
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    /// Displacement with only the rotation half populated.
    pub const fn from_rotation(euler_angles: Vec3) -> Self {
        Self::new(Vec3::ZERO, euler_angles)
    }

    /// Component-wise product of two displacements.
    pub fn scale(a: Self, b: Self) -> Self {
        Self::new(a.position * b.position, a.euler_angles * b.euler_angles)
    }

    /// Unclamped linear interpolation.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self::new(
            a.position.lerp(b.position, t),
            a.euler_angles.lerp(b.euler_angles, t),
        )
    }

    /// Scales the position half and the rotation half by separate factors.
    pub fn scaled_by(self, position_strength: f32, rotation_strength: f32) -> Self {
        Self::new(
            self.position * position_strength,
            self.euler_angles * rotation_strength,
        )
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.position.length_squared() + self.euler_angles.length_squared()
    }

    /// Length of the six components taken as one vector.
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Unit-length copy over all six components. Zero stays zero.
    pub fn normalized(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= f32::EPSILON || !magnitude.is_finite() {
            return Self::ZERO;
        }
        self * (1.0 / magnitude)
    }

    /// Random displacement whose halves each lie inside the unit sphere.
    pub fn inside_unit_spheres<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(inside_unit_sphere(rng), inside_unit_sphere(rng))
    }

    /// Rotation half as a quaternion: roll about Z, then pitch about X, then yaw about Y.
    pub fn rotation(&self) -> Quat {
        let radians = self.euler_angles * std::f32::consts::PI / 180.0;
        Quat::from_euler(EulerRot::YXZ, radians.y, radians.x, radians.z)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.euler_angles.is_finite()
    }
}

/// Rejection-samples a point inside the unit sphere.
fn inside_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

impl Add for Displacement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.position + rhs.position, self.euler_angles + rhs.euler_angles)
    }
}

impl AddAssign for Displacement {
    fn add_assign(&mut self, rhs: Self) {
        self.position += rhs.position;
        self.euler_angles += rhs.euler_angles;
    }
}

impl Sub for Displacement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.position - rhs.position, self.euler_angles - rhs.euler_angles)
    }
}

impl Neg for Displacement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.position, -self.euler_angles)
    }
}

impl Mul<f32> for Displacement {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.position * rhs, self.euler_angles * rhs)
    }
}

impl Mul<Displacement> for f32 {
    type Output = Displacement;

    fn mul(self, rhs: Displacement) -> Displacement {
        rhs * self
    }
}
