use crate::{mesh::Mesh, shaders, texture::Texture};
use common::{CameraConfig, InputEvent, types::*};
use glow::*;
use learngl::{Camera, ShaderProgram, Transform};

const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

const TILT_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);
const SPIN_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);
// degrees per second
const SPIN_RATE: f32 = 50.0;

/// Ten textured cubes viewed through the free-look camera.
pub struct Demo {
    gl: Context,
    program: ShaderProgram<Context>,
    cam: Camera,
    cube: Mesh,
    textures: [Texture; 2],
    cubes: Vec<Transform>,
}

impl Demo {
    pub fn new(gl: Context, viewport: Vec2) -> Self {
        let program = shaders::load(&gl, "textured");

        let mut cam = Camera::with_config(load_config(), viewport);
        // settle the cursor baseline so the first drag doesn't jump
        cam.mouse_callback(cam.cursor());

        let cube = Mesh::cube(&gl);
        let textures = [
            Texture::new(&gl, "container.png"),
            Texture::new(&gl, "awesomeface.png"),
        ];

        let cubes = CUBE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                Transform::new()
                    .position(pos.x, pos.y, pos.z)
                    .rotated(TILT_AXIS, 20.0 + 2.0 * i as f32)
            })
            .collect();

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(0.2, 0.3, 0.3, 1.0);
            gl.viewport(0, 0, viewport.x as i32, viewport.y as i32);
        }

        program.bind(&gl);
        program.set_int(&gl, "texture0", 0);
        program.set_int(&gl, "texture1", 1);
        program.set_float(&gl, "mixValue", 0.2);

        Self {
            gl,
            program,
            cam,
            cube,
            textures,
            cubes,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.cam.handle_event(&event) {
            log::trace!("camera ignored {}", event);
        }
    }

    pub fn resize(&mut self, dim: Vec2) {
        unsafe { self.gl.viewport(0, 0, dim.x as i32, dim.y as i32) };
    }

    /// `time` is seconds since start, used to spin the cubes.
    pub fn render(&mut self, time: f32) {
        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.cam.update();

        if !self.program.is_valid() {
            return;
        }

        self.program.bind(&self.gl);
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(&self.gl, unit as u32);
        }
        self.cam.bind(&self.gl, &self.program);

        self.cube.bind(&self.gl);
        for cube in &self.cubes {
            let transform = cube.rotated(SPIN_AXIS, time * SPIN_RATE);
            transform.bind(&self.gl, &self.program);
            self.cube.draw(&self.gl);
        }
    }
}

fn load_config() -> CameraConfig {
    let Some(json) = crate::texture::ASSETS
        .get_file("camera.json")
        .and_then(|file| file.contents_utf8())
    else {
        log::warn!("no camera.json bundled, using default camera");
        return CameraConfig::default();
    };

    match CameraConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring camera.json: {}", err);
            CameraConfig::default()
        }
    }
}

impl Drop for Demo {
    fn drop(&mut self) {
        self.program.cleanup(&self.gl);
        self.cube.cleanup(&self.gl);
        self.textures.iter().for_each(|t| t.cleanup(&self.gl));
    }
}

impl std::fmt::Debug for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Demo")
            .field("program", &self.program)
            .field("cam", &self.cam)
            .finish()
    }
}
