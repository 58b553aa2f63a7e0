//! Ready-made parameter blocks for common shakes.

use bevy::prelude::*;

use crate::features::shakes::{BounceShakeParams, EnvelopeParams, KickShakeParams, NoiseMode, NoiseShakeParams};
use crate::utils::displacement::Displacement;

/// Converts a fade-out duration into an envelope decay rate.
fn decay_for_duration(duration: f32) -> f32 {
    if duration > 0.0 {
        1.0 / duration
    } else {
        1.0
    }
}

/// Short in-plane bounce for 2D cameras: sideways/vertical offset plus roll.
pub fn short_shake_2d(position_strength: f32, rotation_strength: f32, freq: f32, num_bounces: u32) -> BounceShakeParams {
    BounceShakeParams {
        position_strength,
        rotation_strength,
        freq,
        num_bounces,
        ..Default::default()
    }
}

/// Short rotational bounce for 3D cameras.
pub fn short_shake_3d(strength: f32, freq: f32, num_bounces: u32) -> BounceShakeParams {
    BounceShakeParams {
        axes_multiplier: Displacement::from_rotation(Vec3::new(1.0, 1.0, 0.4)),
        rotation_strength: strength,
        freq,
        num_bounces,
        ..Default::default()
    }
}

/// Noisy 2D explosion that fades out over `duration` seconds.
pub fn explosion_2d(position_strength: f32, rotation_strength: f32, duration: f32) -> NoiseShakeParams {
    NoiseShakeParams {
        strength: Displacement::new(
            Vec3::new(1.0, 1.0, 0.0) * position_strength,
            Vec3::Z * rotation_strength,
        ),
        noise_modes: vec![NoiseMode::new(8.0, 1.0), NoiseMode::new(20.0, 0.3)],
        envelope: EnvelopeParams {
            decay: decay_for_duration(duration),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Noisy rotational 3D explosion that fades out over `duration` seconds.
pub fn explosion_3d(strength: f32, duration: f32) -> NoiseShakeParams {
    NoiseShakeParams {
        strength: Displacement::from_rotation(Vec3::new(1.0, 1.0, 0.5) * strength),
        noise_modes: vec![NoiseMode::new(6.0, 1.0), NoiseMode::new(20.0, 0.2)],
        envelope: EnvelopeParams {
            decay: decay_for_duration(duration),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Low continuous rumble meant for manual amplitude control (engines, thrusters).
pub fn rumble(position_strength: f32, rotation_strength: f32) -> NoiseShakeParams {
    NoiseShakeParams {
        strength: Displacement::new(Vec3::splat(position_strength), Vec3::splat(rotation_strength)),
        noise_modes: vec![NoiseMode::new(12.0, 1.0), NoiseMode::new(30.0, 0.4)],
        envelope: EnvelopeParams {
            attack: 2.0,
            decay: 1.5,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Recoil-style kick: sharp attack, slower release, mostly pitch.
pub fn recoil(strength: f32) -> KickShakeParams {
    KickShakeParams {
        strength: Displacement::new(Vec3::splat(0.05 * strength), Vec3::new(1.0, 0.3, 0.3) * strength),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shakes::{BounceShake, CameraShake, KickShake, NoiseShake, Shake};

    fn runs_to_completion(mut shake: Shake) -> bool {
        shake.initialize(Vec3::ZERO, Quat::IDENTITY);
        for _ in 0..10_000 {
            shake.tick(1.0 / 60.0, Vec3::ZERO, Quat::IDENTITY);
            if !shake.current_displacement().is_finite() {
                return false;
            }
            if shake.is_finished() {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_presets_produce_finite_finishing_shakes() {
        let shakes: Vec<Shake> = vec![
            BounceShake::new(short_shake_2d(0.08, 0.1, 25.0, 5), None).into(),
            BounceShake::new(short_shake_3d(0.3, 25.0, 5), None).into(),
            NoiseShake::new(explosion_2d(1.0, 10.0, 0.5), 1.0, None, false).into(),
            NoiseShake::new(explosion_3d(8.0, 0.7), 1.0, None, false).into(),
            KickShake::with_direction(recoil(1.0), Displacement::from_rotation(Vec3::X)).into(),
        ];
        for shake in shakes {
            let kind = shake.kind();
            assert!(runs_to_completion(shake), "{} preset did not finish", kind);
        }
    }

    #[test]
    fn test_non_positive_duration_falls_back_to_unit_decay() {
        assert_eq!(explosion_2d(1.0, 1.0, 0.0).envelope.decay, 1.0);
        assert_eq!(explosion_3d(1.0, -2.0).envelope.decay, 1.0);
        assert_eq!(explosion_3d(1.0, 0.5).envelope.decay, 2.0);
    }
}
