use crate::shader::ShaderStage;
use common::types::*;
use std::fmt::Debug;

/// The slice of the graphics API that shader programs and cameras need.
///
/// Every [`glow::HasContext`] implements this, so a `glow::Context` can be
/// handed straight to [`ShaderProgram`](crate::ShaderProgram). Calls must
/// happen on the thread that owns the current GL context.
pub trait GlBackend {
    type Shader: Copy + Debug;
    type Program: Copy + Debug + PartialEq;
    type UniformLocation: Debug;

    fn new_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Uploads `source` and compiles it, returning the compile status.
    fn compile(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_log(&self, shader: Self::Shader) -> String;
    fn drop_shader(&self, shader: Self::Shader);

    fn new_program(&self) -> Result<Self::Program, String>;
    fn attach(&self, program: Self::Program, shader: Self::Shader);
    /// Links `program`, returning the link status.
    fn link(&self, program: Self::Program) -> bool;
    fn program_log(&self, program: Self::Program) -> String;
    fn drop_program(&self, program: Self::Program);
    fn bind_program(&self, program: Option<Self::Program>);

    /// `None` when the program has no active uniform called `name`.
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    // writes to a `None` location are ignored, as GL does for location -1
    fn set_uniform_i32(&self, loc: Option<&Self::UniformLocation>, value: i32);
    fn set_uniform_f32(&self, loc: Option<&Self::UniformLocation>, value: f32);
    fn set_uniform_vec3(&self, loc: Option<&Self::UniformLocation>, value: Vec3);
    fn set_uniform_vec4(&self, loc: Option<&Self::UniformLocation>, value: Vec4);
    fn set_uniform_mat4(&self, loc: Option<&Self::UniformLocation>, value: &Mat4);
}

// The glow calls are unsafe only because they require a current context,
// which is the documented contract of this trait.
impl<C: glow::HasContext> GlBackend for C {
    type Shader = C::Shader;
    type Program = C::Program;
    type UniformLocation = C::UniformLocation;

    fn new_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { glow::HasContext::create_shader(self, stage.gl_type()) }
    }

    fn compile(&self, shader: Self::Shader, source: &str) -> bool {
        unsafe {
            glow::HasContext::shader_source(self, shader, source);
            glow::HasContext::compile_shader(self, shader);
            glow::HasContext::get_shader_compile_status(self, shader)
        }
    }

    fn shader_log(&self, shader: Self::Shader) -> String {
        unsafe { glow::HasContext::get_shader_info_log(self, shader) }
    }

    fn drop_shader(&self, shader: Self::Shader) {
        unsafe { glow::HasContext::delete_shader(self, shader) }
    }

    fn new_program(&self) -> Result<Self::Program, String> {
        unsafe { glow::HasContext::create_program(self) }
    }

    fn attach(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { glow::HasContext::attach_shader(self, program, shader) }
    }

    fn link(&self, program: Self::Program) -> bool {
        unsafe {
            glow::HasContext::link_program(self, program);
            glow::HasContext::get_program_link_status(self, program)
        }
    }

    fn program_log(&self, program: Self::Program) -> String {
        unsafe { glow::HasContext::get_program_info_log(self, program) }
    }

    fn drop_program(&self, program: Self::Program) {
        unsafe { glow::HasContext::delete_program(self, program) }
    }

    fn bind_program(&self, program: Option<Self::Program>) {
        unsafe { glow::HasContext::use_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { glow::HasContext::get_uniform_location(self, program, name) }
    }

    fn set_uniform_i32(&self, loc: Option<&Self::UniformLocation>, value: i32) {
        unsafe { glow::HasContext::uniform_1_i32(self, loc, value) }
    }

    fn set_uniform_f32(&self, loc: Option<&Self::UniformLocation>, value: f32) {
        unsafe { glow::HasContext::uniform_1_f32(self, loc, value) }
    }

    fn set_uniform_vec3(&self, loc: Option<&Self::UniformLocation>, value: Vec3) {
        unsafe { glow::HasContext::uniform_3_f32(self, loc, value.x, value.y, value.z) }
    }

    fn set_uniform_vec4(&self, loc: Option<&Self::UniformLocation>, value: Vec4) {
        unsafe { glow::HasContext::uniform_4_f32(self, loc, value.x, value.y, value.z, value.w) }
    }

    fn set_uniform_mat4(&self, loc: Option<&Self::UniformLocation>, value: &Mat4) {
        unsafe {
            glow::HasContext::uniform_matrix_4_f32_slice(self, loc, false, &value.to_cols_array())
        }
    }
}
