//! Continuous shake driven by layered coherent noise.
//!
//! Each noise layer samples a Perlin field along its own random seed offset,
//! with separate offsets per axis so the six channels do not move in lockstep.
//! The sum is shaped by an owned [`Envelope`] and optionally attenuated by
//! distance to a world-space source.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::envelope::{AmplitudeController, Envelope, EnvelopeControlMode, EnvelopeParams};
use super::CameraShake;
use crate::utils::attenuation::{self, StrengthAttenuationParams};
use crate::utils::displacement::Displacement;

/// Radius of the disc seed offsets are drawn from.
const SEED_RADIUS: f32 = 20.0;

/// One frequency layer of the noise sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseMode {
    /// Samples per second along the noise field.
    pub freq: f32,
    /// Relative weight of this layer.
    pub amplitude: f32,
}

impl NoiseMode {
    pub const fn new(freq: f32, amplitude: f32) -> Self {
        Self { freq, amplitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseShakeParams {
    /// Per-axis peak displacement.
    pub strength: Displacement,
    pub noise_modes: Vec<NoiseMode>,
    pub envelope: EnvelopeParams,
    pub attenuation: StrengthAttenuationParams,
}

impl Default for NoiseShakeParams {
    fn default() -> Self {
        Self {
            strength: Displacement::new(Vec3::splat(0.1), Vec3::splat(1.0)),
            noise_modes: vec![NoiseMode::new(25.0, 1.0)],
            envelope: EnvelopeParams::default(),
            attenuation: StrengthAttenuationParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NoiseShake {
    params: NoiseShakeParams,
    envelope: Envelope,
    source_position: Option<Vec3>,
    rng: StdRng,
    perlin: Perlin,
    seeds: Vec<Vec2>,
    norm: f32,
    time: f64,
    current_displacement: Displacement,
}

impl NoiseShake {
    /// Creates a noise shake that rises to `max_amplitude`.
    ///
    /// With `manual_strength_control` the envelope holds whatever target is set
    /// through [`AmplitudeController`] until `finish` is called; otherwise it
    /// decays and finishes on its own.
    pub fn new(
        params: NoiseShakeParams,
        max_amplitude: f32,
        source_position: Option<Vec3>,
        manual_strength_control: bool,
    ) -> Self {
        let control_mode = if manual_strength_control {
            EnvelopeControlMode::Manual
        } else {
            EnvelopeControlMode::Auto
        };
        let envelope = Envelope::new(params.envelope.clone(), max_amplitude, control_mode);

        Self {
            params,
            envelope,
            source_position,
            rng: StdRng::from_entropy(),
            perlin: Perlin::default(),
            seeds: Vec::new(),
            norm: 0.0,
            time: 0.0,
            current_displacement: Displacement::ZERO,
        }
    }

    /// Replaces the random source with a seeded one for reproducible noise.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn params(&self) -> &NoiseShakeParams {
        &self.params
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Six noise channels for one layer, each recentred to [-0.5, 0.5].
    fn sample_noise(&self, seed: Vec2, freq: f32) -> Displacement {
        let x = seed.x as f64;
        let y = seed.y as f64;
        let tf = self.time * freq as f64;

        let position = Vec3::new(
            self.sample([x + tf, y]),
            self.sample([x, y + tf]),
            self.sample([x + tf, y + tf]),
        );
        let euler_angles = Vec3::new(
            self.sample([-x - tf, -y]),
            self.sample([-x, -y - tf]),
            self.sample([-x - tf, -y - tf]),
        );
        Displacement::new(position, euler_angles)
    }

    fn sample(&self, point: [f64; 2]) -> f32 {
        (self.perlin.get(point) as f32 * 0.5).clamp(-0.5, 0.5)
    }
}

impl CameraShake for NoiseShake {
    fn initialize(&mut self, _camera_position: Vec3, _camera_rotation: Quat) {
        self.perlin = Perlin::new(self.rng.gen());
        self.seeds.clear();
        self.norm = 0.0;
        for mode in &self.params.noise_modes {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = SEED_RADIUS * self.rng.gen::<f32>().sqrt();
            self.seeds.push(Vec2::from_angle(angle) * radius);
            self.norm += mode.amplitude;
        }
    }

    fn tick(&mut self, delta_time: f32, camera_position: Vec3, _camera_rotation: Quat) {
        if self.envelope.is_finished() {
            return;
        }

        if delta_time.is_finite() && delta_time > 0.0 {
            self.time += delta_time as f64;
        }
        self.envelope.tick(delta_time);

        let mut noise = Displacement::ZERO;
        if self.norm.abs() > f32::EPSILON {
            for (mode, seed) in self.params.noise_modes.iter().zip(&self.seeds) {
                noise += mode.amplitude / self.norm * self.sample_noise(*seed, mode.freq);
            }
        }

        let mut displacement = self.envelope.intensity() * Displacement::scale(noise, self.params.strength);
        if let Some(source_position) = self.source_position {
            displacement = displacement * attenuation::strength(&self.params.attenuation, source_position, camera_position);
        }
        self.current_displacement = displacement;
    }

    fn current_displacement(&self) -> Displacement {
        self.current_displacement
    }

    fn is_finished(&self) -> bool {
        self.envelope.is_finished()
    }
}

impl AmplitudeController for NoiseShake {
    fn set_target_amplitude(&mut self, value: f32) {
        self.envelope.set_target_amplitude(value);
    }

    fn finish(&mut self) {
        self.envelope.finish();
    }

    fn finish_immediately(&mut self) {
        self.envelope.finish_immediately();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn initialized(shake: NoiseShake) -> NoiseShake {
        let mut shake = shake;
        shake.initialize(Vec3::ZERO, Quat::IDENTITY);
        shake
    }

    fn within_strength(d: Displacement, strength: Displacement) -> bool {
        let limit = Displacement::scale(
            Displacement::new(Vec3::splat(0.5), Vec3::splat(0.5)),
            Displacement::new(strength.position.abs(), strength.euler_angles.abs()),
        );
        d.position.abs().cmple(limit.position + Vec3::splat(1e-5)).all()
            && d.euler_angles.abs().cmple(limit.euler_angles + Vec3::splat(1e-5)).all()
    }

    #[test]
    fn test_default_shake_is_finite_and_finishes() {
        let params = NoiseShakeParams::default();
        let strength = params.strength;
        let mut shake = initialized(NoiseShake::new(params, 1.0, None, false).with_seed(3));
        let mut ticks = 0;
        while !shake.is_finished() {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
            let d = shake.current_displacement();
            assert!(d.is_finite());
            assert!(within_strength(d, strength));
            ticks += 1;
            assert!(ticks < 10_000);
        }
    }

    #[test]
    fn test_same_seed_same_motion() {
        let mut a = initialized(NoiseShake::new(NoiseShakeParams::default(), 1.0, None, false).with_seed(11));
        let mut b = initialized(NoiseShake::new(NoiseShakeParams::default(), 1.0, None, false).with_seed(11));
        for _ in 0..30 {
            a.tick(DT, Vec3::ZERO, Quat::IDENTITY);
            b.tick(DT, Vec3::ZERO, Quat::IDENTITY);
            assert_eq!(a.current_displacement(), b.current_displacement());
        }
    }

    #[test]
    fn test_zero_strength_axis_stays_still() {
        let params = NoiseShakeParams {
            strength: Displacement::from_rotation(Vec3::new(0.0, 0.0, 5.0)),
            ..Default::default()
        };
        let mut shake = initialized(NoiseShake::new(params, 1.0, None, true).with_seed(5));
        for _ in 0..60 {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
            let d = shake.current_displacement();
            assert_eq!(d.position, Vec3::ZERO);
            assert_eq!(d.euler_angles.x, 0.0);
            assert_eq!(d.euler_angles.y, 0.0);
        }
    }

    #[test]
    fn test_out_of_range_source_silences_shake() {
        let mut shake = initialized(
            NoiseShake::new(NoiseShakeParams::default(), 1.0, Some(Vec3::new(1000.0, 0.0, 0.0)), true).with_seed(9),
        );
        for _ in 0..30 {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
            assert_eq!(shake.current_displacement().magnitude(), 0.0);
        }
    }

    #[test]
    fn test_manual_control_tracks_target_and_finishes() {
        let mut shake = initialized(NoiseShake::new(NoiseShakeParams::default(), 0.0, None, true).with_seed(1));
        for _ in 0..120 {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        }
        assert!(!shake.is_finished());
        assert_eq!(shake.envelope().amplitude(), 0.0);

        shake.set_target_amplitude(0.6);
        for _ in 0..60 {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        }
        assert!((shake.envelope().amplitude() - 0.6).abs() < 1e-6);

        shake.finish();
        for _ in 0..120 {
            shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        }
        assert!(shake.is_finished());
    }

    #[test]
    fn test_finish_immediately_is_visible_at_once() {
        let mut shake = initialized(NoiseShake::new(NoiseShakeParams::default(), 1.0, None, false).with_seed(2));
        shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        shake.finish_immediately();
        assert!(shake.is_finished());
    }

    #[test]
    fn test_no_layers_produces_zero() {
        let params = NoiseShakeParams {
            noise_modes: Vec::new(),
            ..Default::default()
        };
        let mut shake = initialized(NoiseShake::new(params, 1.0, None, false));
        shake.tick(DT, Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(shake.current_displacement(), Displacement::ZERO);
    }
}
