// Camera-related components for shake output.

use bevy::prelude::*;

/// Marks the camera node that receives the shake offset.
///
/// The shaker owns this entity's local `Transform` and overwrites it every
/// frame, so it should sit under a rig entity that carries the camera's actual
/// pose. The rig's `GlobalTransform` is the pose handed to shakes.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ShakeTarget;
