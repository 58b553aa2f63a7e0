//! Single attack/release impulse.
//!
//! The kick eases from rest to a target waypoint over the attack time and
//! back to rest over the release time, then finishes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::CameraShake;
use crate::utils::attenuation::{self, StrengthAttenuationParams};
use crate::utils::displacement::Displacement;
use crate::utils::easing::Easing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickShakeParams {
    /// Seconds to reach the target waypoint.
    pub attack_time: f32,
    pub attack_curve: Easing,
    /// Seconds to return to rest.
    pub release_time: f32,
    pub release_curve: Easing,
    pub attenuation: StrengthAttenuationParams,
    /// Per-axis peak displacement, multiplied by the kick direction.
    pub strength: Displacement,
}

impl Default for KickShakeParams {
    fn default() -> Self {
        Self {
            attack_time: 0.05,
            attack_curve: Easing::EaseInOut,
            release_time: 0.2,
            release_curve: Easing::EaseInOut,
            attenuation: StrengthAttenuationParams::default(),
            strength: Displacement::new(Vec3::splat(0.1), Vec3::ONE),
        }
    }
}

/// Where the kick direction comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KickOrigin {
    /// Fixed camera-local direction.
    Direction(Displacement),
    /// Away from a world-space source, resolved against the camera pose on initialize.
    Source {
        position: Vec3,
        attenuate_strength: bool,
    },
}

#[derive(Debug, Clone)]
pub struct KickShake {
    params: KickShakeParams,
    origin: KickOrigin,
    direction: Displacement,
    previous_waypoint: Displacement,
    current_waypoint: Displacement,
    release: bool,
    t: f32,
    current_displacement: Displacement,
    is_finished: bool,
}

impl KickShake {
    fn new(params: KickShakeParams, origin: KickOrigin) -> Self {
        let direction = match origin {
            KickOrigin::Direction(direction) => direction.normalized(),
            KickOrigin::Source { .. } => Displacement::ZERO,
        };
        Self {
            params,
            origin,
            direction,
            previous_waypoint: Displacement::ZERO,
            current_waypoint: Displacement::ZERO,
            release: false,
            t: 0.0,
            current_displacement: Displacement::ZERO,
            is_finished: false,
        }
    }

    /// Kick along a fixed direction; the direction is normalized.
    pub fn with_direction(params: KickShakeParams, direction: Displacement) -> Self {
        Self::new(params, KickOrigin::Direction(direction))
    }

    /// Kick pushing the camera away from `source_position`, optionally weakened
    /// by distance.
    pub fn from_source(params: KickShakeParams, source_position: Vec3, attenuate_strength: bool) -> Self {
        Self::new(
            params,
            KickOrigin::Source {
                position: source_position,
                attenuate_strength,
            },
        )
    }

    pub fn params(&self) -> &KickShakeParams {
        &self.params
    }

    pub fn origin(&self) -> KickOrigin {
        self.origin
    }

    /// True once the attack phase has completed.
    pub fn is_releasing(&self) -> bool {
        self.release
    }

    pub fn target_waypoint(&self) -> Displacement {
        Displacement::scale(self.direction, self.params.strength)
    }

    fn advance(&mut self, delta_time: f32) {
        let (duration, curve) = if self.release {
            (self.params.release_time, self.params.release_curve)
        } else {
            (self.params.attack_time, self.params.attack_curve)
        };

        if duration > 0.0 && delta_time.is_finite() {
            self.t += delta_time.max(0.0) / duration;
        } else {
            self.t = 1.0;
        }
        self.current_displacement =
            Displacement::lerp(self.previous_waypoint, self.current_waypoint, curve.evaluate(self.t));
    }
}

impl CameraShake for KickShake {
    fn initialize(&mut self, camera_position: Vec3, camera_rotation: Quat) {
        let origin = self.origin;
        if let KickOrigin::Source {
            position,
            attenuate_strength,
        } = origin
        {
            self.direction = attenuation::direction(position, camera_position, camera_rotation);
            if attenuate_strength {
                self.direction = self.direction
                    * attenuation::strength(&self.params.attenuation, position, camera_position);
            }
        }
        self.current_waypoint = self.target_waypoint();
    }

    fn tick(&mut self, delta_time: f32, _camera_position: Vec3, _camera_rotation: Quat) {
        if self.is_finished {
            return;
        }

        if self.t < 1.0 {
            self.advance(delta_time);
            return;
        }

        self.current_displacement = self.current_waypoint;
        self.previous_waypoint = self.current_waypoint;
        if self.release {
            self.is_finished = true;
        } else {
            self.release = true;
            self.t = 0.0;
            self.current_waypoint = Displacement::ZERO;
        }
    }

    fn current_displacement(&self) -> Displacement {
        self.current_displacement
    }

    fn is_finished(&self) -> bool {
        self.is_finished
    }
}
