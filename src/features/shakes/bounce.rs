//! Decaying oscillation between randomly perturbed waypoints.
//!
//! Each bounce reflects the previous direction, adds a bit of random
//! deviation and shrinks the waypoint by `(1 - i / num_bounces)^2`, which
//! reads as a short settling vibration.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::CameraShake;
use crate::utils::attenuation::{self, StrengthAttenuationParams};
use crate::utils::displacement::Displacement;
use crate::utils::easing::Easing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceShakeParams {
    /// Peak position offset of the first waypoint.
    pub position_strength: f32,
    /// Peak rotation offset (degrees) of the first waypoint.
    pub rotation_strength: f32,
    /// Per-axis mask applied to every bounce direction.
    pub axes_multiplier: Displacement,
    /// Waypoints per second.
    pub freq: f32,
    pub num_bounces: u32,
    /// How far each bounce may deviate from a pure reflection, in [0, 1].
    pub randomness: f32,
    pub easing: Easing,
    pub attenuation: StrengthAttenuationParams,
}

impl Default for BounceShakeParams {
    fn default() -> Self {
        Self {
            position_strength: 0.05,
            rotation_strength: 0.1,
            axes_multiplier: Displacement::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Z),
            freq: 25.0,
            num_bounces: 5,
            randomness: 0.5,
            easing: Easing::EaseInOut,
            attenuation: StrengthAttenuationParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BounceShake {
    params: BounceShakeParams,
    source_position: Option<Vec3>,
    rng: StdRng,
    /// Initial direction as given; `None` means draw one on initialize.
    initial_direction: Option<Displacement>,
    attenuation: f32,
    direction: Displacement,
    previous_waypoint: Displacement,
    current_waypoint: Displacement,
    bounce_index: u32,
    t: f32,
    current_displacement: Displacement,
    is_finished: bool,
}

impl BounceShake {
    /// Bounce shake starting in a random direction.
    pub fn new(params: BounceShakeParams, source_position: Option<Vec3>) -> Self {
        Self {
            params,
            source_position,
            rng: StdRng::from_entropy(),
            initial_direction: None,
            attenuation: 1.0,
            direction: Displacement::ZERO,
            previous_waypoint: Displacement::ZERO,
            current_waypoint: Displacement::ZERO,
            bounce_index: 0,
            t: 0.0,
            current_displacement: Displacement::ZERO,
            is_finished: false,
        }
    }

    /// Bounce shake whose first waypoint follows `initial_direction`.
    pub fn with_direction(
        params: BounceShakeParams,
        initial_direction: Displacement,
        source_position: Option<Vec3>,
    ) -> Self {
        Self {
            initial_direction: Some(initial_direction),
            ..Self::new(params, source_position)
        }
    }

    /// Replaces the random source with a seeded one for reproducible bounces.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn params(&self) -> &BounceShakeParams {
        &self.params
    }

    /// Number of waypoints committed so far.
    pub fn bounce_index(&self) -> u32 {
        self.bounce_index
    }

    pub fn current_waypoint(&self) -> Displacement {
        self.current_waypoint
    }

    fn random_direction(&mut self) -> Displacement {
        let rnd = Displacement::inside_unit_spheres(&mut self.rng);
        Displacement::scale(rnd, self.params.axes_multiplier).normalized()
    }

    fn waypoint(&self, magnitude: f32) -> Displacement {
        magnitude
            * self
                .direction
                .scaled_by(self.params.position_strength, self.params.rotation_strength)
    }

    fn advance_waypoint(&mut self) {
        self.t = 0.0;
        self.current_displacement = self.current_waypoint;
        self.previous_waypoint = self.current_waypoint;
        self.bounce_index += 1;

        if self.bounce_index > self.params.num_bounces {
            self.is_finished = true;
            return;
        }

        let deviation = self.params.randomness * self.random_direction();
        self.direction = (-self.direction + deviation).normalized();

        let decay = 1.0 - self.bounce_index as f32 / self.params.num_bounces as f32;
        self.current_waypoint = self.waypoint(decay * decay * self.attenuation);
    }
}

impl CameraShake for BounceShake {
    fn initialize(&mut self, camera_position: Vec3, _camera_rotation: Quat) {
        let initial_direction = self.initial_direction;
        self.direction = match initial_direction {
            Some(direction) => Displacement::scale(direction, self.params.axes_multiplier).normalized(),
            None => self.random_direction(),
        };
        self.attenuation = match self.source_position {
            Some(source_position) => attenuation::strength(&self.params.attenuation, source_position, camera_position),
            None => 1.0,
        };
        self.current_waypoint = self.waypoint(self.attenuation);
    }

    fn tick(&mut self, delta_time: f32, _camera_position: Vec3, _camera_rotation: Quat) {
        if self.is_finished {
            return;
        }

        if self.t < 1.0 {
            if self.params.freq > 0.0 && delta_time.is_finite() {
                self.t += delta_time.max(0.0) * self.params.freq;
            } else {
                self.t = 1.0;
            }
            self.current_displacement = Displacement::lerp(
                self.previous_waypoint,
                self.current_waypoint,
                self.params.easing.evaluate(self.t),
            );
        } else {
            self.advance_waypoint();
        }
    }

    fn current_displacement(&self) -> Displacement {
        self.current_displacement
    }

    fn is_finished(&self) -> bool {
        self.is_finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn initialized(mut shake: BounceShake) -> BounceShake {
        shake.initialize(Vec3::ZERO, Quat::IDENTITY);
        shake
    }

    /// Ticks until the next waypoint is committed; returns the committed waypoint.
    fn run_to_next_waypoint(shake: &mut BounceShake) -> Displacement {
        let start = shake.bounce_index();
        while shake.bounce_index() == start {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        }
        shake.current_displacement()
    }

    #[test]
    fn test_default_shake_is_finite_and_finishes() {
        let mut shake = initialized(BounceShake::new(BounceShakeParams::default(), None).with_seed(4));
        let mut ticks = 0;
        while !shake.is_finished() {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
            assert!(shake.current_displacement().is_finite());
            ticks += 1;
            assert!(ticks < 10_000);
        }
    }

    #[test]
    fn test_finishes_after_num_bounces_plus_one_waypoints() {
        let params = BounceShakeParams {
            num_bounces: 4,
            ..Default::default()
        };
        let mut shake = initialized(BounceShake::new(params, None).with_seed(8));
        for _ in 0..4 {
            run_to_next_waypoint(&mut shake);
            assert!(!shake.is_finished());
        }
        run_to_next_waypoint(&mut shake);
        assert_eq!(shake.bounce_index(), 5);
        assert!(shake.is_finished());
    }

    #[test]
    fn test_waypoint_magnitude_does_not_grow() {
        let params = BounceShakeParams {
            num_bounces: 6,
            position_strength: 1.0,
            rotation_strength: 1.0,
            ..Default::default()
        };
        let mut shake = initialized(BounceShake::new(params, None).with_seed(21));
        let mut previous = shake.current_waypoint().magnitude();
        assert!(previous > 0.0);
        while !shake.is_finished() {
            run_to_next_waypoint(&mut shake);
            let magnitude = shake.current_waypoint().magnitude();
            assert!(magnitude <= previous + 1e-6, "{} grew past {}", magnitude, previous);
            previous = magnitude;
        }
    }

    #[test]
    fn test_zero_randomness_reflects_direction() {
        let params = BounceShakeParams {
            randomness: 0.0,
            num_bounces: 2,
            position_strength: 1.0,
            rotation_strength: 1.0,
            axes_multiplier: Displacement::new(Vec3::ONE, Vec3::ONE),
            ..Default::default()
        };
        let direction = Displacement::from_position(Vec3::X);
        let mut shake = initialized(BounceShake::with_direction(params, direction, None));
        assert_eq!(shake.current_waypoint(), Displacement::from_position(Vec3::X));

        let first = run_to_next_waypoint(&mut shake);
        assert_eq!(first, Displacement::from_position(Vec3::X));
        // Reflected and scaled by (1 - 1/2)^2.
        assert!((shake.current_waypoint().position - Vec3::new(-0.25, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_frequency_snaps_each_waypoint() {
        let params = BounceShakeParams {
            freq: 0.0,
            num_bounces: 2,
            ..Default::default()
        };
        let mut shake = initialized(BounceShake::new(params, None).with_seed(1));
        // Each waypoint takes a snap tick plus a commit tick.
        for _ in 0..6 {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        }
        assert!(shake.is_finished());
    }

    #[test]
    fn test_zero_bounces_finishes_after_first_waypoint() {
        let params = BounceShakeParams {
            num_bounces: 0,
            ..Default::default()
        };
        let mut shake = initialized(BounceShake::new(params, None).with_seed(1));
        run_to_next_waypoint(&mut shake);
        assert!(shake.is_finished());
        assert!(shake.current_displacement().is_finite());
    }

    #[test]
    fn test_distant_source_attenuates_to_zero() {
        let mut shake = BounceShake::new(BounceShakeParams::default(), Some(Vec3::new(0.0, 0.0, 500.0))).with_seed(3);
        shake.initialize(Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(shake.current_waypoint().magnitude(), 0.0);
    }
}
