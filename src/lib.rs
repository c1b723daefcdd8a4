//! Reusable pieces of the OpenGL tutorial examples: a free-look [`Camera`]
//! and a [`ShaderProgram`] built from vertex and fragment source.

mod backend;
pub use backend::GlBackend;

mod camera;
pub use camera::Camera;

mod shader;
pub use shader::{ShaderError, ShaderProgram, ShaderStage};

mod transform;
pub use transform::Transform;

pub use common::{CameraConfig, ConfigError, Direction, InputEvent, types};
