//! Procedural camera shake for bevy.
//!
//! Shakes (noise, bounce, kick) are registered with the [`CameraShaker`]
//! resource, which advances them once per frame and writes their summed
//! offset to the entity marked [`ShakeTarget`].
//!
//! [`CameraShaker`]: resources::shaker::CameraShaker
//! [`ShakeTarget`]: components::camera::ShakeTarget

pub mod components;
pub mod events;
pub mod features;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub mod prelude {
    pub use crate::components::camera::ShakeTarget;
    pub use crate::events::ShakeRequest;
    pub use crate::features::shakes::{
        AmplitudeController, BounceShake, BounceShakeParams, CameraShake, EnvelopeParams, KickShake,
        KickShakeParams, NoiseMode, NoiseShake, NoiseShakeParams, Shake,
    };
    pub use crate::plugins::shake::{CameraShakePlugin, CameraShakeSet};
    pub use crate::resources::config::ShakeConfig;
    pub use crate::resources::shaker::{CameraShaker, ShakeId};
    pub use crate::utils::attenuation::StrengthAttenuationParams;
    pub use crate::utils::displacement::Displacement;
    pub use crate::utils::easing::Easing;
    pub use crate::utils::power::Degree;
}
