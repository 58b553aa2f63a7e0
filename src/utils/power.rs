//! Power-curve shaping shared by envelopes and distance falloff.

use serde::{Deserialize, Serialize};

/// Exponent applied to a normalized value. Higher degrees keep the value low
/// for longer and then rise sharply near 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Degree {
    Linear,
    Quadratic,
    #[default]
    Cubic,
    Quadric,
}

impl Degree {
    pub fn exponent(self) -> i32 {
        match self {
            Degree::Linear => 1,
            Degree::Quadratic => 2,
            Degree::Cubic => 3,
            Degree::Quadric => 4,
        }
    }
}

/// Raises `value` to the power given by `degree`.
pub fn evaluate(value: f32, degree: Degree) -> f32 {
    value.powi(degree.exponent())
}
