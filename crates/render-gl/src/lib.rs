//! OpenGL 3.3 core render backend for the cube field viewer.
//!
//! Draws ten textured cubes spinning about a shared axis, seen through a
//! fly camera. GPU objects never own the GL context; every call takes it
//! as an argument and resources are released through explicit `destroy`
//! calls rather than `Drop`.
//!
//! # Invariants
//! - A shader pair that fails to compile or link never aborts the viewer;
//!   the failure is logged and the frame draws nothing.
//! - Uniform names are resolved on every write and a miss is a silent
//!   no-op.
//! - The renderer never mutates camera or scene state.

mod mesh;
mod renderer;
mod shader;
mod texture;

pub use mesh::CubeMesh;
pub use renderer::{OPACITY_STEP, Renderer};
pub use shader::ShaderProgram;
pub use texture::Texture2d;

/// Errors from GPU object allocation.
///
/// Compile, link, and uniform failures are not represented here; those are
/// logged and rendering continues without the broken piece.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("GPU object allocation failed: {0}")]
    Allocate(String),
}
