//! Amplitude envelope: attack, sustain, decay.
//!
//! The envelope integrates its amplitude towards a target at the attack or
//! decay rate, holds it for the sustain time (auto mode only) and then falls
//! back to zero. `intensity` is the amplitude shaped by the configured degree.

use serde::{Deserialize, Serialize};

use crate::utils::power::{self, Degree};

/// Tuning for an [`Envelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeParams {
    /// Amplitude gained per second while rising. Non-positive means instant.
    pub attack: f32,
    /// Seconds to hold the target amplitude before decaying (auto mode).
    pub sustain: f32,
    /// Amplitude lost per second while falling. Non-positive means instant.
    pub decay: f32,
    /// Shaping applied to the amplitude to produce intensity.
    pub degree: Degree,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 10.0,
            sustain: 0.0,
            decay: 1.0,
            degree: Degree::Cubic,
        }
    }
}

/// Who drives the envelope's target amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnvelopeControlMode {
    /// Rise to the initial target, sustain, then decay and finish on its own.
    #[default]
    Auto,
    /// Hold whatever target the caller sets until `finish` is called.
    Manual,
}

/// Real-time control over a shake's strength.
pub trait AmplitudeController {
    /// Sets the amplitude to move towards, clamped to [0, 1].
    /// Only honoured in manual mode and before `finish`.
    fn set_target_amplitude(&mut self, value: f32);

    /// Lets the amplitude fall to zero, then finishes.
    fn finish(&mut self);

    /// Finishes right away regardless of the current amplitude.
    fn finish_immediately(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvelopeState {
    Increase,
    Sustain,
    Decrease,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    params: EnvelopeParams,
    control_mode: EnvelopeControlMode,
    amplitude: f32,
    target_amplitude: f32,
    intensity: f32,
    /// Seconds ticked so far; the sustain deadline is measured on this clock.
    elapsed: f32,
    sustain_end_time: f32,
    finish_when_amplitude_zero: bool,
    finish_immediately: bool,
    state: EnvelopeState,
}

impl Envelope {
    pub fn new(params: EnvelopeParams, initial_target_amplitude: f32, control_mode: EnvelopeControlMode) -> Self {
        let mut envelope = Self {
            params,
            control_mode,
            amplitude: 0.0,
            target_amplitude: 0.0,
            intensity: 0.0,
            elapsed: 0.0,
            sustain_end_time: 0.0,
            finish_when_amplitude_zero: false,
            finish_immediately: false,
            state: EnvelopeState::Decrease,
        };
        envelope.set_target(initial_target_amplitude);
        envelope
    }

    pub fn params(&self) -> &EnvelopeParams {
        &self.params
    }

    pub fn control_mode(&self) -> EnvelopeControlMode {
        self.control_mode
    }

    /// Current amplitude in [0, 1].
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Amplitude the envelope is moving towards, in [0, 1].
    pub fn target_amplitude(&self) -> f32 {
        self.target_amplitude
    }

    /// Shaped amplitude, refreshed by every tick.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_finished(&self) -> bool {
        if self.finish_immediately {
            return true;
        }
        (self.finish_when_amplitude_zero || self.control_mode == EnvelopeControlMode::Auto)
            && self.amplitude <= 0.0
            && self.target_amplitude <= 0.0
    }

    /// Advances the envelope by `delta_time` seconds.
    pub fn tick(&mut self, delta_time: f32) {
        if self.is_finished() {
            return;
        }

        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        self.elapsed += delta_time;

        match self.state {
            EnvelopeState::Increase => {
                if self.params.attack > 0.0 {
                    self.amplitude += delta_time * self.params.attack;
                }
                if self.amplitude > self.target_amplitude || self.params.attack <= 0.0 {
                    self.amplitude = self.target_amplitude;
                    self.state = EnvelopeState::Sustain;
                    if self.control_mode == EnvelopeControlMode::Auto {
                        self.sustain_end_time = self.elapsed + self.params.sustain;
                    }
                }
            }
            EnvelopeState::Decrease => {
                if self.params.decay > 0.0 {
                    self.amplitude -= delta_time * self.params.decay;
                }
                if self.amplitude < self.target_amplitude || self.params.decay <= 0.0 {
                    self.amplitude = self.target_amplitude;
                    self.state = EnvelopeState::Sustain;
                }
            }
            EnvelopeState::Sustain => {
                if self.control_mode == EnvelopeControlMode::Auto && self.elapsed > self.sustain_end_time {
                    self.set_target(0.0);
                }
            }
        }

        self.amplitude = self.amplitude.clamp(0.0, 1.0);
        self.intensity = power::evaluate(self.amplitude, self.params.degree);
    }

    /// Equal target and amplitude counts as a decrease; the next tick snaps
    /// straight to sustain.
    fn set_target(&mut self, value: f32) {
        self.target_amplitude = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.state = if self.target_amplitude > self.amplitude {
            EnvelopeState::Increase
        } else {
            EnvelopeState::Decrease
        };
    }
}

impl AmplitudeController for Envelope {
    fn set_target_amplitude(&mut self, value: f32) {
        if self.control_mode == EnvelopeControlMode::Manual && !self.finish_when_amplitude_zero {
            self.set_target(value);
        }
    }

    fn finish(&mut self) {
        self.finish_when_amplitude_zero = true;
        self.set_target(0.0);
    }

    fn finish_immediately(&mut self) {
        self.finish_immediately = true;
    }
}
