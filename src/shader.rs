use crate::backend::GlBackend;
use common::types::*;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShaderError {
    #[error("cannot create {0} shader: {1}")]
    CreateShader(ShaderStage, String),
    #[error("cannot create program: {0}")]
    CreateProgram(String),
    #[error("compiling {stage} shader failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("linking program failed: {0}")]
    Link(String),
}

/// A linked vertex + fragment program, or the reason there isn't one.
///
/// Construction never panics: a failed compile or link is logged once and
/// kept as the program's state, and the caller checks [`is_valid`] before
/// drawing with it.
///
/// [`is_valid`]: ShaderProgram::is_valid
pub struct ShaderProgram<G: GlBackend> {
    state: Result<G::Program, ShaderError>,
}

impl<G: GlBackend> ShaderProgram<G> {
    pub fn new(gl: &G, vertex_src: &str, fragment_src: &str) -> Self {
        let state = build(gl, vertex_src, fragment_src);
        match &state {
            Ok(program) => log::debug!("linked shader program {:?}", program),
            Err(err) => log::error!("{}", err),
        }

        Self { state }
    }

    /// Like [`new`](Self::new), but hands the failure back instead of
    /// keeping it. Nothing is logged on failure; that's up to the caller.
    pub fn try_new(gl: &G, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let program = build(gl, vertex_src, fragment_src)?;
        log::debug!("linked shader program {:?}", program);

        Ok(Self { state: Ok(program) })
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_ok()
    }

    pub fn error(&self) -> Option<&ShaderError> {
        self.state.as_ref().err()
    }

    pub fn handle(&self) -> Option<G::Program> {
        self.state.as_ref().ok().copied()
    }

    /// Makes this the active program. Does nothing for a failed program.
    pub fn bind(&self, gl: &G) {
        if let Ok(program) = self.state {
            gl.bind_program(Some(program));
        }
    }

    fn location(&self, gl: &G, name: &str) -> Option<G::UniformLocation> {
        match self.state {
            Ok(program) => gl.uniform_location(program, name),
            Err(_) => None,
        }
    }

    // Uniform writes go to the currently bound program. Names the program
    // doesn't have (including ones the compiler optimised away) are ignored.

    pub fn set_bool(&self, gl: &G, name: &str, value: bool) {
        gl.set_uniform_i32(self.location(gl, name).as_ref(), value as i32);
    }

    pub fn set_int(&self, gl: &G, name: &str, value: i32) {
        gl.set_uniform_i32(self.location(gl, name).as_ref(), value);
    }

    pub fn set_float(&self, gl: &G, name: &str, value: f32) {
        gl.set_uniform_f32(self.location(gl, name).as_ref(), value);
    }

    pub fn set_vec3(&self, gl: &G, name: &str, value: Vec3) {
        gl.set_uniform_vec3(self.location(gl, name).as_ref(), value);
    }

    pub fn set_vec4(&self, gl: &G, name: &str, value: Vec4) {
        gl.set_uniform_vec4(self.location(gl, name).as_ref(), value);
    }

    pub fn set_mat4(&self, gl: &G, name: &str, value: &Mat4) {
        gl.set_uniform_mat4(self.location(gl, name).as_ref(), value);
    }

    pub fn cleanup(&self, gl: &G) {
        if let Ok(program) = self.state {
            gl.drop_program(program);
        }
    }
}

impl<G: GlBackend> std::fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.state {
            Ok(program) => f.debug_tuple("ShaderProgram").field(program).finish(),
            Err(err) => f.debug_tuple("ShaderProgram").field(err).finish(),
        }
    }
}

fn compile<G: GlBackend>(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader, ShaderError> {
    let shader = gl
        .new_shader(stage)
        .map_err(|msg| ShaderError::CreateShader(stage, msg))?;

    if !gl.compile(shader, source) {
        let log = gl.shader_log(shader);
        gl.drop_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

fn build<G: GlBackend>(gl: &G, vertex_src: &str, fragment_src: &str) -> Result<G::Program, ShaderError> {
    let vertex = compile(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile(gl, ShaderStage::Fragment, fragment_src) {
        Ok(fragment) => fragment,
        Err(err) => {
            gl.drop_shader(vertex);
            return Err(err);
        }
    };

    let linked = gl.new_program().map_err(ShaderError::CreateProgram).and_then(|program| {
        gl.attach(program, vertex);
        gl.attach(program, fragment);

        if gl.link(program) {
            Ok(program)
        } else {
            let log = gl.program_log(program);
            gl.drop_program(program);
            Err(ShaderError::Link(log))
        }
    });

    // the linked program keeps what it needs from the stages
    gl.drop_shader(vertex);
    gl.drop_shader(fragment);

    linked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{FakeGl, Uniform};

    const VERT: &str = "#version 300 es
layout (location = 0) in vec3 aPos;
uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;
void main() {
    gl_Position = projection * view * model * vec4(aPos, 1.0);
}
";

    const FRAG: &str = "#version 300 es
precision mediump float;
out vec4 FragColor;
uniform float red;
uniform int texture0;
uniform vec4 tint;
void main() {
    FragColor = vec4(red, 0.0, 1.0, 1.0);
}
";

    #[test]
    fn valid_sources_link_and_release_stages() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, VERT, FRAG);

        assert!(program.is_valid());
        assert!(program.error().is_none());
        assert_eq!(gl.live_programs(), 1);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn broken_vertex_source_leaves_program_invalid() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, "#version 300 es\nvoid mian() {", FRAG);

        assert!(!program.is_valid());
        assert!(program.handle().is_none());

        let err = program.error().unwrap();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        let msg = err.to_string();
        assert!(msg.contains("vertex"), "{msg}");
        assert!(msg.contains("syntax error"), "{msg}");

        // never got as far as the fragment stage or a program object
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn broken_fragment_source_releases_vertex_stage() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, VERT, "#error nope\nvoid main() {}");

        let err = program.error().unwrap();
        assert!(err.to_string().contains("fragment"));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn link_failure_is_reported_with_linker_log() {
        let gl = FakeGl::failing_link();
        let program = ShaderProgram::new(&gl, VERT, FRAG);

        match program.error() {
            Some(ShaderError::Link(log)) => assert!(log.contains("not consumed")),
            other => panic!("expected link failure, got {:?}", other),
        }
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn program_creation_failure_releases_both_stages() {
        let gl = FakeGl::failing_program();
        let program = ShaderProgram::new(&gl, VERT, FRAG);

        assert!(!program.is_valid());
        assert!(matches!(program.error(), Some(ShaderError::CreateProgram(_))));
        assert!(program.error().unwrap().to_string().contains("context lost"));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn shader_creation_failure_is_reported_per_stage() {
        let gl = FakeGl::failing_shader(ShaderStage::Vertex);
        let program = ShaderProgram::new(&gl, VERT, FRAG);
        assert!(matches!(
            program.error(),
            Some(ShaderError::CreateShader(ShaderStage::Vertex, _))
        ));
        assert_eq!(gl.live_shaders(), 0);

        // vertex stage was created and compiled before the fragment one failed
        let gl = FakeGl::failing_shader(ShaderStage::Fragment);
        let err = ShaderProgram::try_new(&gl, VERT, FRAG).unwrap_err();
        assert_eq!(err.to_string(), "cannot create fragment shader: context lost");
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn try_new_surfaces_the_error() {
        let gl = FakeGl::new();
        let err = ShaderProgram::try_new(&gl, VERT, "").unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));

        assert!(ShaderProgram::try_new(&gl, VERT, FRAG).is_ok());
    }

    #[test]
    fn invalid_program_never_binds_or_writes() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, "", FRAG);
        let calls = gl.calls();

        program.bind(&gl);
        program.set_float(&gl, "red", 1.0);

        assert_eq!(gl.bound(), None);
        assert!(gl.writes().is_empty());
        // the write itself still reaches the backend, with no location
        assert_eq!(gl.calls(), calls + 1);
    }

    #[test]
    fn uniform_setters_write_by_name() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, VERT, FRAG);
        program.bind(&gl);
        assert_eq!(gl.bound(), program.handle());

        program.set_float(&gl, "red", 0.5);
        program.set_int(&gl, "texture0", 1);
        program.set_bool(&gl, "texture0", true);
        program.set_vec4(&gl, "tint", Vec4::new(1.0, 0.5, 0.25, 1.0));
        program.set_mat4(&gl, "view", &Mat4::IDENTITY);

        assert_eq!(gl.last_write("red"), Some(Uniform::Float(0.5)));
        assert_eq!(gl.last_write("texture0"), Some(Uniform::Int(1)));
        assert_eq!(
            gl.last_write("tint"),
            Some(Uniform::Vec4(Vec4::new(1.0, 0.5, 0.25, 1.0)))
        );
        assert_eq!(gl.last_write("view"), Some(Uniform::Mat4(Mat4::IDENTITY)));
        assert_eq!(gl.writes().len(), 5);
    }

    #[test]
    fn unknown_uniform_is_silently_ignored() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, VERT, FRAG);
        program.bind(&gl);

        program.set_float(&gl, "green", 1.0);
        program.set_vec3(&gl, "lightPos", Vec3::ONE);

        assert!(gl.writes().is_empty());
    }

    #[test]
    fn cleanup_releases_program() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, VERT, FRAG);
        program.bind(&gl);
        program.cleanup(&gl);

        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.bound(), None);
    }

    #[test]
    fn stage_names_match_diagnostics() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
    }
}
