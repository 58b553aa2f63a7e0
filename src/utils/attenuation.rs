//! Distance-based falloff of shake strength from a world-space source.
//!
//! Both functions are pure: they read the source and camera geometry and
//! return a value, with no state carried between calls.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::displacement::Displacement;
use crate::utils::power::{self, Degree};

/// How quickly a shake fades with distance from its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthAttenuationParams {
    /// Radius around the source with full strength.
    pub clipping_distance: f32,
    /// Distance past the clipping radius over which strength falls to zero.
    pub falloff_scale: f32,
    /// Shape of the falloff curve.
    pub falloff_degree: Degree,
    /// Per-axis weighting of the source-to-camera vector before measuring it.
    pub axes_multiplier: Vec3,
}

impl Default for StrengthAttenuationParams {
    fn default() -> Self {
        Self {
            clipping_distance: 10.0,
            falloff_scale: 50.0,
            falloff_degree: Degree::Quadratic,
            axes_multiplier: Vec3::ONE,
        }
    }
}

/// Strength multiplier in [0, 1] for a shake emitted at `source_position`.
pub fn strength(
    params: &StrengthAttenuationParams,
    source_position: Vec3,
    camera_position: Vec3,
) -> f32 {
    let offset = (camera_position - source_position) * params.axes_multiplier;
    let distance = offset.length();
    let beyond_clip = distance - params.clipping_distance;

    let linear = if params.falloff_scale > 0.0 {
        (1.0 - beyond_clip / params.falloff_scale).clamp(0.0, 1.0)
    } else if beyond_clip <= 0.0 {
        1.0
    } else {
        0.0
    };

    if linear.is_finite() {
        power::evaluate(linear, params.falloff_degree)
    } else {
        0.0
    }
}

/// Camera-local unit direction pointing from the source towards the camera.
///
/// Only the position half is populated.
pub fn direction(source_position: Vec3, camera_position: Vec3, camera_rotation: Quat) -> Displacement {
    let world = (camera_position - source_position).normalize_or_zero();
    Displacement::from_position(camera_rotation.inverse() * world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_full_strength_inside_clipping_distance() {
        let params = StrengthAttenuationParams::default();
        assert_eq!(strength(&params, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)), 1.0);
    }

    #[test]
    fn test_zero_strength_past_falloff() {
        let params = StrengthAttenuationParams::default();
        assert_eq!(strength(&params, Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_quadratic_falloff_midway() {
        let params = StrengthAttenuationParams::default();
        // 35 units away: 25 past the clipping radius, half of the falloff scale.
        let s = strength(&params, Vec3::ZERO, Vec3::new(0.0, 0.0, 35.0));
        assert!((s - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_axes_multiplier_ignores_masked_axis() {
        let params = StrengthAttenuationParams {
            axes_multiplier: Vec3::new(1.0, 0.0, 1.0),
            ..Default::default()
        };
        assert_eq!(strength(&params, Vec3::ZERO, Vec3::new(0.0, 500.0, 0.0)), 1.0);
    }

    #[test]
    fn test_zero_falloff_scale_is_hard_cutoff() {
        let params = StrengthAttenuationParams {
            falloff_scale: 0.0,
            ..Default::default()
        };
        assert_eq!(strength(&params, Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0)), 1.0);
        assert_eq!(strength(&params, Vec3::ZERO, Vec3::new(11.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_direction_is_camera_local_unit_vector() {
        let d = direction(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);
        assert!((d.position - Vec3::X).length() < 1e-6);
        assert_eq!(d.euler_angles, Vec3::ZERO);

        // Camera yawed 90 degrees: world +X is camera-local +Z.
        let rotated = direction(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        assert!((rotated.position - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_direction_coincident_positions_is_zero() {
        let d = direction(Vec3::ONE, Vec3::ONE, Quat::IDENTITY);
        assert_eq!(d, Displacement::ZERO);
    }
}
