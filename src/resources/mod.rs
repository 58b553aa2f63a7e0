pub mod cli;
pub mod config;
pub mod presets;
pub mod shaker;

pub use cli::*;
pub use config::*;
pub use shaker::*;
