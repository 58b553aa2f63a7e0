use bevy::prelude::*;

use crate::features::shakes::{AmplitudeController, CameraShake, Shake};
use crate::utils::displacement::Displacement;

/// Handle to a registered shake, valid while the shake is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShakeId(u64);

#[derive(Debug)]
struct ActiveShake {
    id: ShakeId,
    shake: Shake,
}

/// Resource holding every active shake.
///
/// Each frame the shaker:
/// - ticks every shake that has not finished yet
/// - drops shakes that finished, in the same frame
/// - sums the displacement of the rest and scales it by `strength_multiplier`
///
/// Constructed once by `CameraShakePlugin`; systems that want to shake the
/// camera take `ResMut<CameraShaker>` or send a `ShakeRequest`.
#[derive(Resource, Debug)]
pub struct CameraShaker {
    active: Vec<ActiveShake>,
    strength_multiplier: f32,
    next_id: u64,
    /// Unscaled sum from the last frame.
    raw_displacement: Displacement,
}

impl Default for CameraShaker {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CameraShaker {
    pub fn new(strength_multiplier: f32) -> Self {
        let mut shaker = Self {
            active: Vec::new(),
            strength_multiplier: 1.0,
            next_id: 0,
            raw_displacement: Displacement::ZERO,
        };
        shaker.set_strength_multiplier(strength_multiplier);
        shaker
    }

    /// Global scale in [0, 1] applied to the summed displacement.
    pub fn strength_multiplier(&self) -> f32 {
        self.strength_multiplier
    }

    pub fn set_strength_multiplier(&mut self, value: f32) {
        self.strength_multiplier = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    }

    /// Initializes `shake` against the camera pose and starts ticking it next frame.
    pub fn register_shake(
        &mut self,
        shake: impl Into<Shake>,
        camera_position: Vec3,
        camera_rotation: Quat,
    ) -> ShakeId {
        let mut shake = shake.into();
        shake.initialize(camera_position, camera_rotation);

        let id = ShakeId(self.next_id);
        self.next_id += 1;
        debug!("Registered {} shake {:?} ({} active)", shake.kind(), id, self.active.len() + 1);

        self.active.push(ActiveShake { id, shake });
        id
    }

    /// Advances every active shake by one frame and returns the scaled sum.
    pub fn advance_frame(&mut self, delta_time: f32, camera_position: Vec3, camera_rotation: Quat) -> Displacement {
        let mut sum = Displacement::ZERO;

        self.active.retain_mut(|active| {
            if !active.shake.is_finished() {
                active.shake.tick(delta_time, camera_position, camera_rotation);
            }
            if active.shake.is_finished() {
                debug!("{} shake {:?} finished", active.shake.kind(), active.id);
                return false;
            }
            sum += active.shake.current_displacement();
            true
        });

        self.raw_displacement = sum;
        self.scaled_displacement()
    }

    /// Sum of active displacements from the last frame, before the multiplier.
    pub fn raw_displacement(&self) -> Displacement {
        self.raw_displacement
    }

    /// Last frame's sum with the global multiplier applied.
    pub fn scaled_displacement(&self) -> Displacement {
        if self.strength_multiplier == 0.0 {
            return Displacement::ZERO;
        }
        self.strength_multiplier * self.raw_displacement
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: ShakeId) -> bool {
        self.active.iter().any(|active| active.id == id)
    }

    /// Amplitude control for an active shake that supports it.
    pub fn amplitude_controller(&mut self, id: ShakeId) -> Option<&mut dyn AmplitudeController> {
        self.active
            .iter_mut()
            .find(|active| active.id == id)
            .and_then(|active| active.shake.amplitude_controller())
    }

    /// Asks every envelope-driven shake to fade out. Shakes without an
    /// envelope run to completion.
    pub fn finish_all(&mut self) {
        for active in &mut self.active {
            if let Some(controller) = active.shake.amplitude_controller() {
                controller.finish();
            }
        }
    }

    /// Drops every active shake at once.
    pub fn clear(&mut self) {
        if !self.active.is_empty() {
            info!("Cleared {} active camera shakes", self.active.len());
        }
        self.active.clear();
        self.raw_displacement = Displacement::ZERO;
    }
}
