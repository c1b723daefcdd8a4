pub mod config;
pub mod input;
pub mod types;

pub use config::{CameraConfig, ConfigError};
pub use input::{Direction, InputEvent};
