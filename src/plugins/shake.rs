//! Camera shake plugin - owns the shaker's lifetime and schedules its systems.
//!
//! The `CameraShaker` resource is inserted when the plugin is built and removed
//! when the app exits. Shakes registered during `Update` (directly or via
//! `ShakeRequest`) are applied in `PostUpdate`, before transform propagation.

use bevy::prelude::*;
use bevy::transform::TransformSystem;

use crate::events::ShakeRequest;
use crate::resources::config::ShakeConfig;
use crate::resources::shaker::CameraShaker;
use crate::systems::camera::{apply_camera_shake, register_requested_shakes, reset_new_shake_targets};

/// System set containing the shaker's per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraShakeSet;

#[derive(Default)]
pub struct CameraShakePlugin {
    pub config: ShakeConfig,
}

impl CameraShakePlugin {
    pub fn new(config: ShakeConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CameraShakePlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Camera shaker ready (strength multiplier {})",
            self.config.strength_multiplier
        );

        app.insert_resource(CameraShaker::new(self.config.strength_multiplier))
            .insert_resource(self.config.clone())
            .add_event::<ShakeRequest>()
            .configure_sets(PostUpdate, CameraShakeSet.before(TransformSystem::TransformPropagate))
            .add_systems(
                PostUpdate,
                (
                    reset_new_shake_targets,
                    register_requested_shakes,
                    apply_camera_shake,
                )
                    .chain()
                    .in_set(CameraShakeSet),
            )
            .add_systems(Last, remove_shaker_on_exit);
    }
}

/// Drops the shaker and its shakes once the app is exiting.
fn remove_shaker_on_exit(
    mut commands: Commands,
    mut exit_events: EventReader<AppExit>,
    shaker: Option<Res<CameraShaker>>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    if let Some(shaker) = shaker {
        info!("Shutting down camera shaker ({} active shakes)", shaker.active_count());
        commands.remove_resource::<CameraShaker>();
    }
}
