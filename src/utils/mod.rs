pub mod attenuation;
pub mod displacement;
pub mod easing;
pub mod power;
