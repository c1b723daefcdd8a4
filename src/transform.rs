use crate::{GlBackend, ShaderProgram};
use common::types::*;

/// Per-object placement, uploaded as the `model` uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Position,
    pub rot: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    pub const fn new() -> Self {
        Self {
            pos: Position::ZERO,
            rot: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub const fn position(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Position::new(x, y, z),
            ..self
        }
    }

    pub const fn scale(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            scale: Vec3::new(x, y, z),
            ..self
        }
    }

    pub fn scale_uniform(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    /// Applies a further rotation of `degrees` about `axis`, in object space.
    /// A zero axis leaves the rotation unchanged.
    pub fn rotated(self, axis: Vec3, degrees: f32) -> Self {
        match axis.try_normalize() {
            Some(axis) => Self {
                rot: self.rot * Quat::from_axis_angle(axis, degrees.to_radians()),
                ..self
            },
            None => self,
        }
    }

    pub fn model_mat(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rot, self.pos)
    }

    pub fn bind<G: GlBackend>(&self, gl: &G, program: &ShaderProgram<G>) {
        program.set_mat4(gl, "model", &self.model_mat());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{FakeGl, Uniform};

    #[test]
    fn identity_by_default() {
        assert_eq!(Transform::default().model_mat(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_rotate_order() {
        // same composition as translate(pos) * rotate(axis, angle)
        let axis = Vec3::new(1.0, 0.3, 0.5);
        let t = Transform::new().position(2.0, 5.0, -15.0).rotated(axis, 40.0);

        let expected = Mat4::from_translation(Vec3::new(2.0, 5.0, -15.0))
            * Mat4::from_axis_angle(axis.normalize(), 40f32.to_radians());
        assert!(t.model_mat().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn rotations_accumulate_in_object_space() {
        let a = Vec3::new(1.0, 0.3, 0.5);
        let b = Vec3::new(0.5, 1.0, 0.0);
        let t = Transform::new().rotated(a, 20.0).rotated(b, 35.0);

        let expected = Mat4::from_axis_angle(a.normalize(), 20f32.to_radians())
            * Mat4::from_axis_angle(b.normalize(), 35f32.to_radians());
        assert!(t.model_mat().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn zero_axis_is_ignored() {
        let t = Transform::new().rotated(Vec3::ZERO, 90.0);
        assert_eq!(t.rot, Quat::IDENTITY);
    }

    #[test]
    fn scale_applies_before_translation() {
        let mut t = Transform::new().position(1.0, 0.0, 0.0);
        t.scale_uniform(2.0);
        let p = t.model_mat().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-6));
    }

    #[test]
    fn bind_uploads_model() {
        let gl = FakeGl::new();
        let program = ShaderProgram::new(&gl, "uniform mat4 model;\nvoid main() {}", "void main() {}");
        let t = Transform::new().position(0.0, 1.0, 0.0).scale(2.0, 2.0, 2.0);

        program.bind(&gl);
        t.bind(&gl, &program);

        assert_eq!(gl.last_write("model"), Some(Uniform::Mat4(t.model_mat())));
    }
}
