use glow::*;
use include_dir::{Dir, include_dir};

pub static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

pub struct Texture {
    texture: glow::Texture,
}

impl Texture {
    pub fn new(gl: &Context, asset: &str) -> Self {
        let tex_data = ASSETS.get_file(asset).unwrap().contents();
        // texture coordinates start bottom left, image rows start top left
        let img = image::load_from_memory(tex_data).unwrap().flipv().into_rgba8();

        let texture = unsafe {
            let tex = gl.create_texture().unwrap();

            gl.bind_texture(glow::TEXTURE_2D, Some(tex));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                img.width() as i32,
                img.height() as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(img.as_raw().as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);

            tex
        };

        Self { texture }
    }

    pub fn bind(&self, gl: &Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    pub fn cleanup(&self, gl: &Context) {
        unsafe { gl.delete_texture(self.texture) };
    }
}
