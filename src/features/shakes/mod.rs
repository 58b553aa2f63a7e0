//! Shake generators and the capability the shaker drives them through.

pub mod bounce;
pub mod envelope;
pub mod kick;
pub mod noise;

use bevy::prelude::*;

use crate::utils::displacement::Displacement;

pub use bounce::{BounceShake, BounceShakeParams};
pub use envelope::{AmplitudeController, Envelope, EnvelopeControlMode, EnvelopeParams};
pub use kick::{KickOrigin, KickShake, KickShakeParams};
pub use self::noise::{NoiseMode, NoiseShake, NoiseShakeParams};

/// Something the shaker can advance once per frame.
///
/// `initialize` is called exactly once, with the camera pose at registration,
/// before the first `tick`.
pub trait CameraShake {
    fn initialize(&mut self, camera_position: Vec3, camera_rotation: Quat);

    fn tick(&mut self, delta_time: f32, camera_position: Vec3, camera_rotation: Quat);

    fn current_displacement(&self) -> Displacement;

    fn is_finished(&self) -> bool;
}

/// Every shake kind the shaker knows about.
#[derive(Debug, Clone)]
pub enum Shake {
    Noise(NoiseShake),
    Bounce(BounceShake),
    Kick(KickShake),
}

impl Shake {
    pub fn kind(&self) -> &'static str {
        match self {
            Shake::Noise(_) => "noise",
            Shake::Bounce(_) => "bounce",
            Shake::Kick(_) => "kick",
        }
    }

    /// Real-time amplitude control, for shakes that have an envelope.
    pub fn amplitude_controller(&mut self) -> Option<&mut dyn AmplitudeController> {
        match self {
            Shake::Noise(shake) => Some(shake as &mut dyn AmplitudeController),
            Shake::Bounce(_) | Shake::Kick(_) => None,
        }
    }
}

impl CameraShake for Shake {
    fn initialize(&mut self, camera_position: Vec3, camera_rotation: Quat) {
        match self {
            Shake::Noise(shake) => shake.initialize(camera_position, camera_rotation),
            Shake::Bounce(shake) => shake.initialize(camera_position, camera_rotation),
            Shake::Kick(shake) => shake.initialize(camera_position, camera_rotation),
        }
    }

    fn tick(&mut self, delta_time: f32, camera_position: Vec3, camera_rotation: Quat) {
        match self {
            Shake::Noise(shake) => shake.tick(delta_time, camera_position, camera_rotation),
            Shake::Bounce(shake) => shake.tick(delta_time, camera_position, camera_rotation),
            Shake::Kick(shake) => shake.tick(delta_time, camera_position, camera_rotation),
        }
    }

    fn current_displacement(&self) -> Displacement {
        match self {
            Shake::Noise(shake) => shake.current_displacement(),
            Shake::Bounce(shake) => shake.current_displacement(),
            Shake::Kick(shake) => shake.current_displacement(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Shake::Noise(shake) => shake.is_finished(),
            Shake::Bounce(shake) => shake.is_finished(),
            Shake::Kick(shake) => shake.is_finished(),
        }
    }
}

impl From<NoiseShake> for Shake {
    fn from(shake: NoiseShake) -> Self {
        Shake::Noise(shake)
    }
}

impl From<BounceShake> for Shake {
    fn from(shake: BounceShake) -> Self {
        Shake::Bounce(shake)
    }
}

impl From<KickShake> for Shake {
    fn from(shake: KickShake) -> Self {
        Shake::Kick(shake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_noise_exposes_amplitude_control() {
        let mut noise: Shake = NoiseShake::new(NoiseShakeParams::default(), 1.0, None, true).into();
        let mut bounce: Shake = BounceShake::new(BounceShakeParams::default(), None).into();
        let mut kick: Shake = KickShake::with_direction(KickShakeParams::default(), Displacement::from_position(Vec3::X)).into();
        assert!(noise.amplitude_controller().is_some());
        assert!(bounce.amplitude_controller().is_none());
        assert!(kick.amplitude_controller().is_none());
    }

    #[test]
    fn test_dispatch_reaches_variant() {
        let mut shake: Shake = KickShake::with_direction(
            KickShakeParams {
                attack_time: 0.0,
                ..Default::default()
            },
            Displacement::from_position(Vec3::X),
        )
        .into();
        assert_eq!(shake.kind(), "kick");
        shake.initialize(Vec3::ZERO, Quat::IDENTITY);
        shake.tick(0.01, Vec3::ZERO, Quat::IDENTITY);
        assert!(shake.current_displacement().position.x > 0.0);
        assert!(!shake.is_finished());
    }
}
