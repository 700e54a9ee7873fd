use cubefield_assets::TextureImage;
use glow::HasContext;

use crate::RenderError;

/// An immutable RGBA8 texture with a full mipmap chain.
///
/// Wrap is mirrored-repeat on both axes; minification samples the chain
/// trilinearly, magnification is plain linear.
pub struct Texture2d {
    texture: glow::NativeTexture,
}

impl Texture2d {
    /// Upload a decoded image and generate its mipmaps.
    pub fn new(gl: &glow::Context, image: &TextureImage) -> Result<Self, RenderError> {
        unsafe {
            let texture = gl.create_texture().map_err(RenderError::Allocate)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::MIRRORED_REPEAT as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::MIRRORED_REPEAT as i32,
            );
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
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self { texture })
        }
    }

    /// Bind to the given texture unit (0-based).
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    /// Release the texture object. The handle must not be used afterwards.
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.texture) }
    }
}
