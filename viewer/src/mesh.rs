use glow::*;

#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy)]
#[repr(C)]
pub struct MeshVert {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

const fn v(x: f32, y: f32, z: f32, u: f32, w: f32) -> MeshVert {
    MeshVert {
        pos: [x, y, z],
        uv: [u, w],
    }
}

// six faces, two triangles each, texture coordinates (0,0) bottom left
const CUBE: [MeshVert; 36] = [
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    //
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    //
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    //
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    //
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    //
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
];

/// Non-indexed triangle list in one vertex buffer.
pub struct Mesh {
    vert_count: usize,
    vert_buffer: Buffer,
    vert_array: VertexArray,
}

impl Mesh {
    pub fn cube(gl: &Context) -> Self {
        Self::new(gl, &CUBE)
    }

    pub fn new(gl: &Context, verts: &[MeshVert]) -> Self {
        let (vert_array, vert_buffer) = unsafe {
            let vert_array = gl.create_vertex_array().unwrap();
            let vert_buffer = gl.create_buffer().unwrap();

            gl.bind_vertex_array(Some(vert_array));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vert_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(verts),
                glow::STATIC_DRAW,
            );

            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                size_of::<MeshVert>() as i32,
                0,
            );
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                size_of::<MeshVert>() as i32,
                3 * size_of::<f32>() as i32,
            );
            gl.enable_vertex_attrib_array(1);

            (vert_array, vert_buffer)
        };

        Self {
            vert_count: verts.len(),
            vert_buffer,
            vert_array,
        }
    }

    pub fn bind(&self, gl: &Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vert_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vert_buffer));
        }
    }

    pub fn draw(&self, gl: &Context) {
        unsafe { gl.draw_arrays(glow::TRIANGLES, 0, self.vert_count as i32) };
    }

    pub fn cleanup(&self, gl: &Context) {
        unsafe {
            gl.delete_vertex_array(self.vert_array);
            gl.delete_buffer(self.vert_buffer);
        }
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("vert_count", &self.vert_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_is_closed_unit_box() {
        assert_eq!(CUBE.len(), 36);
        for vert in CUBE {
            assert!(vert.pos.iter().all(|c| c.abs() == 0.5));
            assert!(vert.uv.iter().all(|c| *c == 0.0 || *c == 1.0));
        }
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(size_of::<MeshVert>(), 5 * size_of::<f32>());
        assert_eq!(bytemuck::cast_slice::<MeshVert, u8>(&CUBE).len(), 36 * 20);
    }
}
