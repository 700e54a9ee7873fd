//! Disk-backed assets: GLSL shader sources and texture images.
//!
//! The renderer never touches the filesystem. Everything it consumes is
//! loaded here first, as plain strings (shader sources) or decoded RGBA
//! pixels (textures), so GPU-side code stays free of IO errors.
//!
//! # Invariants
//! - [`TextureImage`] pixels are always tightly packed RGBA8, flipped so
//!   that row 0 is the *bottom* of the image (GL texture origin).
//! - [`ShaderSource::load_or_empty`] never fails; unreadable files become
//!   empty sources and the failure is logged.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::error;

/// Vertex shader path, relative to the asset root.
pub const VERTEX_SHADER: &str = "shaders/cube.vert";
/// Fragment shader path, relative to the asset root.
pub const FRAGMENT_SHADER: &str = "shaders/cube.frag";
/// Crate texture for sampler unit 0, relative to the asset root.
pub const CONTAINER_TEXTURE: &str = "textures/container.png";
/// Face texture for sampler unit 1, relative to the asset root.
pub const FACE_TEXTURE: &str = "textures/awesomeface.png";

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// A vertex/fragment shader source pair, read from disk but not yet
/// compiled.
#[derive(Debug, Clone, Default)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Read both stages from disk.
    pub fn load(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, AssetError> {
        Ok(Self {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        })
    }

    /// Read both stages from disk, substituting an empty source for any
    /// stage that cannot be read.
    ///
    /// An empty source will fail to compile later, which surfaces in the
    /// shader's own diagnostics; rendering simply draws nothing in the
    /// meantime.
    pub fn load_or_empty(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Self {
        let vertex = read_source(vertex_path.as_ref()).unwrap_or_else(|e| {
            error!("{e}");
            String::new()
        });
        let fragment = read_source(fragment_path.as_ref()).unwrap_or_else(|e| {
            error!("{e}");
            String::new()
        });
        Self { vertex, fragment }
    }
}

fn read_source(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// A decoded texture, ready for upload.
///
/// Pixels are RGBA8, row 0 at the bottom.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decode an encoded image (PNG or JPEG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?.flipv().to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self {
            width,
            height,
            pixels: decoded.into_raw(),
        })
    }

    /// Read and decode a texture from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn shader_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("a.vert");
        let frag = dir.path().join("a.frag");
        fs::write(&vert, "#version 330 core\nvoid main() {}\n").unwrap();
        fs::write(&frag, "#version 330 core\nout vec4 c;\nvoid main() {}\n").unwrap();

        let src = ShaderSource::load(&vert, &frag).unwrap();
        assert!(src.vertex.starts_with("#version 330 core"));
        assert!(src.fragment.contains("out vec4 c;"));
    }

    #[test]
    fn missing_shader_error_names_the_path() {
        let err = ShaderSource::load("no/such.vert", "no/such.frag").unwrap_err();
        assert!(err.to_string().contains("no/such.vert"));
    }

    #[test]
    fn load_or_empty_substitutes_empty_sources() {
        let src = ShaderSource::load_or_empty("no/such.vert", "no/such.frag");
        assert_eq!(src.vertex, "");
        assert_eq!(src.fragment, "");
    }

    #[test]
    fn load_or_empty_keeps_the_readable_stage() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("ok.vert");
        fs::write(&vert, "void main() {}\n").unwrap();

        let src = ShaderSource::load_or_empty(&vert, dir.path().join("missing.frag"));
        assert_eq!(src.vertex, "void main() {}\n");
        assert_eq!(src.fragment, "");
    }

    // 1x2 RGBA PNG, red on top, blue on the bottom.
    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_fn(1, 2, |_, y| {
            if y == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn decode_flips_rows_for_gl() {
        let tex = TextureImage::decode(&tiny_png()).unwrap();
        assert_eq!((tex.width, tex.height), (1, 2));
        assert_eq!(tex.pixels.len(), 8);
        // Row 0 must be the bottom of the source image, which is blue.
        assert_eq!(&tex.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&tex.pixels[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn load_distinguishes_read_and_decode_failures() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("not_an_image.png");
        let mut f = fs::File::create(&garbage).unwrap();
        f.write_all(b"definitely not a png").unwrap();

        match TextureImage::load(&garbage) {
            Err(AssetError::Decode { path, .. }) => assert_eq!(path, garbage),
            other => panic!("expected decode error, got {other:?}"),
        }
        match TextureImage::load(dir.path().join("absent.png")) {
            Err(AssetError::Read { path, .. }) => {
                assert!(path.ends_with("absent.png"));
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");
        fs::write(&path, tiny_png()).unwrap();

        let tex = TextureImage::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (1, 2));
    }
}
