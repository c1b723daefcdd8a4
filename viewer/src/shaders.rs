use glow::Context;
use include_dir::{Dir, include_dir};
use learngl::{ShaderProgram, ShaderStage};

static SHADERS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/shaders");

/// Builds the program stored as `<name>/vert.glsl` + `<name>/frag.glsl`.
///
/// A missing file is passed on as empty source, so it shows up as a compile
/// failure of that stage rather than a panic.
pub fn load(gl: &Context, name: &str) -> ShaderProgram<Context> {
    let vert = source(name, ShaderStage::Vertex);
    let frag = source(name, ShaderStage::Fragment);

    let program = ShaderProgram::new(gl, vert, frag);
    if !program.is_valid() {
        log::error!("shader program {} is unusable, nothing will be drawn", name);
    }

    program
}

fn source(name: &str, stage: ShaderStage) -> &'static str {
    let file_name = match stage {
        ShaderStage::Vertex => "vert.glsl",
        ShaderStage::Fragment => "frag.glsl",
    };

    let path = format!("{}/{}", name, file_name);
    match SHADERS_DIR.get_file(&path).and_then(|f| f.contents_utf8()) {
        Some(source) => source,
        None => {
            log::error!("cannot find {} shader source: {}", stage, path);
            ""
        }
    }
}
