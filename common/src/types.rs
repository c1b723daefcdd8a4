pub use glam::f32::*;

pub type Position = Vec3;

/// Euler look angles in degrees.
///
/// Only yaw and pitch are tracked; the free-look camera never rolls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn to_rad(&self) -> Vec2 {
        Vec2::new(self.yaw.to_radians(), self.pitch.to_radians())
    }

    /// Clamps pitch into `[-limit, limit]`.
    pub fn clamp_pitch(&mut self, limit: f32) {
        self.pitch = self.pitch.max(-limit).min(limit);
    }

    /// Unit facing vector for these angles. Yaw 0 looks down +X.
    pub fn direction(&self) -> Vec3 {
        let rad = self.to_rad();
        let (yaw, pitch) = (rad.x, rad.y);

        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }
}

impl std::ops::AddAssign<Vec2> for Orientation {
    fn add_assign(&mut self, rhs: Vec2) {
        self.yaw += rhs.x;
        self.pitch += rhs.y;
    }
}
