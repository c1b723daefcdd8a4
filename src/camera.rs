use crate::{GlBackend, ShaderProgram};
use common::{CameraConfig, Direction, InputEvent, types::*};
use std::time::Duration;
use web_time::Instant;

/// Free-look camera driven by mouse drag, scroll and held movement keys.
///
/// Facing is derived from yaw/pitch on every [`calc_mouse_look_direction`]
/// rather than carried as free state, so it can't drift over many frames.
///
/// [`calc_mouse_look_direction`]: Camera::calc_mouse_look_direction
#[derive(Debug)]
pub struct Camera {
    pos: Position,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    orientation: Orientation,
    zoom: f32,

    cursor: Vec2,
    last_cursor: Vec2,
    mouse_pressed: bool,
    held: [bool; 4],

    speed: f32,
    epoch: Instant,
    last_frame: Duration,

    view: Mat4,
    proj: Mat4,

    config: CameraConfig,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self::with_config(CameraConfig::default(), viewport)
    }

    /// `viewport` only seeds the cursor baseline at the screen centre.
    pub fn with_config(config: CameraConfig, viewport: Vec2) -> Self {
        let up = config.world_up.try_normalize().unwrap_or(Vec3::Y);
        let front = config.front;
        let right = front.cross(up).try_normalize().unwrap_or(Vec3::X);
        let center = viewport / 2.0;

        let mut cam = Self {
            pos: config.position,
            front,
            up,
            right,
            orientation: Orientation::new(config.yaw, config.pitch),
            zoom: config.zoom.max(config.min_zoom).min(config.max_zoom),

            cursor: center,
            last_cursor: center,
            mouse_pressed: false,
            held: [false; 4],

            speed: 0.0,
            epoch: Instant::now(),
            last_frame: Duration::ZERO,

            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,

            config,
        };
        cam.orientation.clamp_pitch(cam.config.pitch_limit);

        cam.update_view();
        cam.update_projection();

        cam
    }

    /// Feeds one input event. Returns whether the camera used it.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::ButtonDown => {
                self.set_mouse_pressed(true);
                true
            }
            InputEvent::ButtonUp => {
                // motion since the last frame still belongs to this drag
                if self.mouse_pressed {
                    self.mouse_callback(self.cursor);
                }
                self.set_mouse_pressed(false);
                true
            }
            InputEvent::Motion { dx, dy } => {
                if self.mouse_pressed {
                    self.set_mouse_coords(dx, dy);
                }
                self.mouse_pressed
            }
            InputEvent::Scroll { dy } => {
                self.scroll_callback(dy);
                true
            }
            InputEvent::Key { direction, pressed } => {
                self.held[direction.index()] = pressed;
                true
            }
        }
    }

    /// Runs one frame: captured mouse look, frame timing, facing, held
    /// movement, then both matrices.
    pub fn update(&mut self) {
        let now = self.epoch.elapsed();
        self.update_at(now);
    }

    /// [`update`](Self::update) with an explicit timestamp since the camera
    /// was created.
    pub fn update_at(&mut self, now: Duration) {
        if self.mouse_pressed {
            self.mouse_callback(self.cursor);
        }

        self.sync_camera_frames_at(now);
        self.calc_mouse_look_direction();

        for dir in Direction::ALL {
            if self.held[dir.index()] {
                self.set_camera_pos(dir);
            }
        }

        self.update_view();
        self.update_projection();
    }

    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    pub fn set_mouse_pressed(&mut self, pressed: bool) {
        self.mouse_pressed = pressed;
    }

    /// Accumulates relative cursor motion into the absolute cursor.
    /// Non-finite motion is dropped.
    pub fn set_mouse_coords(&mut self, dx: f32, dy: f32) {
        let delta = Vec2::new(dx, dy);
        if delta.is_finite() {
            self.cursor += delta;
        }
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Turns cursor travel since the last call into yaw/pitch.
    ///
    /// Call once with the starting cursor before the first frame, otherwise
    /// the first drag jumps by the distance from the screen centre.
    pub fn mouse_callback(&mut self, cursor: Vec2) {
        if !cursor.is_finite() {
            return;
        }

        // screen y grows downward, pitch grows upward
        let offset = Vec2::new(cursor.x - self.last_cursor.x, self.last_cursor.y - cursor.y)
            * self.config.sensitivity;

        self.cursor = cursor;
        self.last_cursor = cursor;

        self.orientation += offset;
        self.orientation.yaw %= 360.0;
        self.orientation.clamp_pitch(self.config.pitch_limit);
    }

    pub fn calc_mouse_look_direction(&mut self) {
        let dir = self.orientation.direction();
        if let Some(front) = dir.try_normalize() {
            self.front = front;
        }
        if let Some(right) = self.front.cross(self.up).try_normalize() {
            self.right = right;
        }
    }

    /// Moves one step of the current frame's speed.
    pub fn set_camera_pos(&mut self, direction: Direction) {
        let strafe = self.front.cross(self.up).try_normalize().unwrap_or(self.right);

        match direction {
            Direction::Forward => self.pos += self.speed * self.front,
            Direction::Backward => self.pos -= self.speed * self.front,
            Direction::Left => self.pos -= self.speed * strafe,
            Direction::Right => self.pos += self.speed * strafe,
        }
    }

    /// Recomputes per-frame speed from the time since the previous call.
    /// Must run once per frame, before that frame's movement.
    pub fn sync_camera_frames(&mut self) {
        let now = self.epoch.elapsed();
        self.sync_camera_frames_at(now);
    }

    pub fn sync_camera_frames_at(&mut self, now: Duration) {
        let delta = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        self.speed = self.config.movement_speed * delta.as_secs_f32();
    }

    pub fn scroll_callback(&mut self, offset: f32) {
        self.zoom = (self.zoom - offset)
            .max(self.config.min_zoom)
            .min(self.config.max_zoom);
    }

    pub fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.pos, self.pos + self.front, self.up);
    }

    pub fn update_projection(&mut self) {
        let aspect = self.config.aspect_ratio;
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };

        self.proj = Mat4::perspective_rh_gl(
            self.zoom.to_radians(),
            aspect,
            self.config.near,
            self.config.far,
        );
    }

    /// Uploads `view` and `projection` to the bound program.
    pub fn bind<G: GlBackend>(&self, gl: &G, program: &ShaderProgram<G>) {
        program.set_mat4(gl, "view", &self.view);
        program.set_mat4(gl, "projection", &self.proj);
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.orientation.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.orientation.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.proj
    }
}
