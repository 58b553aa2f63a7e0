// Camera shake systems: registration, per-frame application, target setup.

use bevy::prelude::*;
use crate::components::camera::ShakeTarget;
use crate::events::ShakeRequest;
use crate::resources::shaker::CameraShaker;

/// Pose handed to shakes: the target's parent rig, or the origin without one.
pub fn camera_pose(parent: Option<&Parent>, rigs: &Query<&GlobalTransform, Without<ShakeTarget>>) -> (Vec3, Quat) {
    parent
        .and_then(|parent| rigs.get(parent.get()).ok())
        .map(|rig| {
            let (_, rotation, translation) = rig.to_scale_rotation_translation();
            (translation, rotation)
        })
        .unwrap_or((Vec3::ZERO, Quat::IDENTITY))
}

/// Zeroes the local offset of newly marked shake targets so the first written
/// displacement starts from rest.
pub fn reset_new_shake_targets(mut query: Query<&mut Transform, Added<ShakeTarget>>) {
    for mut transform in &mut query {
        transform.translation = Vec3::ZERO;
        transform.rotation = Quat::IDENTITY;
    }
}

/// System that registers shakes sent through `ShakeRequest`.
pub fn register_requested_shakes(
    mut events: EventReader<ShakeRequest>,
    shaker: Option<ResMut<CameraShaker>>,
    targets: Query<Option<&Parent>, With<ShakeTarget>>,
    rigs: Query<&GlobalTransform, Without<ShakeTarget>>,
) {
    let Some(mut shaker) = shaker else {
        events.clear();
        return;
    };

    let parent = targets.get_single().ok().flatten();
    let (position, rotation) = camera_pose(parent, &rigs);

    for event in events.read() {
        shaker.register_shake(event.shake.clone(), position, rotation);
    }
}

/// System that advances every active shake and writes the summed offset
/// to the shake target. Skips the frame when there is no single target.
pub fn apply_camera_shake(
    time: Res<Time>,
    shaker: Option<ResMut<CameraShaker>>,
    mut targets: Query<(&mut Transform, Option<&Parent>), With<ShakeTarget>>,
    rigs: Query<&GlobalTransform, Without<ShakeTarget>>,
) {
    let Some(mut shaker) = shaker else {
        return;
    };
    let Ok((mut transform, parent)) = targets.get_single_mut() else {
        return;
    };

    let (position, rotation) = camera_pose(parent, &rigs);
    let displacement = shaker.advance_frame(time.delta_secs(), position, rotation);

    transform.translation = displacement.position;
    transform.rotation = displacement.rotation();
}
