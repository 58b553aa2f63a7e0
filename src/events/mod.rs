use bevy::prelude::*;

use crate::features::shakes::Shake;

/// Event asking the shaker to start a shake.
/// Registered with the current camera pose before this frame's shake is applied.
#[derive(Event, Debug)]
pub struct ShakeRequest {
    pub shake: Shake,
}

impl ShakeRequest {
    pub fn new(shake: impl Into<Shake>) -> Self {
        Self { shake: shake.into() }
    }
}
