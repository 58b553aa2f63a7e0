//! Easing curves used to interpolate between shake waypoints.

use serde::{Deserialize, Serialize};

/// Monotone curve from (0, 0) to (1, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// Cubic smoothstep, flat at both ends.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Samples the curve. `t` is clamped to [0, 1] first.
    pub fn evaluate(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_eq!(easing.evaluate(0.0), 0.0);
            assert_eq!(easing.evaluate(1.0), 1.0);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.evaluate(-3.0), 0.0);
            assert_eq!(easing.evaluate(1.5), 1.0);
        }
    }

    #[test]
    fn test_monotone() {
        for easing in ALL {
            let mut previous = 0.0;
            for i in 0..=100 {
                let value = easing.evaluate(i as f32 / 100.0);
                assert!(value >= previous, "{:?} decreased at step {}", easing, i);
                previous = value;
            }
        }
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert_eq!(Easing::EaseInOut.evaluate(0.5), 0.5);
    }
}
