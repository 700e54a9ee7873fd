//! Scene content: the unit cube mesh and the fixed field of spinning cubes.
//!
//! Everything here is plain data and pure math. The render crate uploads the
//! vertex table once and asks for a fresh model matrix per instance per
//! frame.
//!
//! # Invariants
//! - Model matrices are a pure function of (instance index, elapsed time).
//! - The translation part of a model matrix is always the instance position;
//!   spin never displaces a cube.

use cubefield_common::Vertex;
use glam::{Mat4, Vec3};

/// Spin rate shared by all cubes, radians per second (50°/s).
const SPIN_RATE: f32 = 50.0 * std::f32::consts::PI / 180.0;

/// Per-instance phase stagger (20° per index) so the field does not rotate in
/// lockstep.
const SPIN_STAGGER: f32 = 20.0 * std::f32::consts::PI / 180.0;

/// Common spin axis direction; normalized once at field construction.
const SPIN_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);

/// Unit cube centered at the origin: 36 vertices, two triangles per face,
/// with texture coordinates covering each face once.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 36] = [
    // -Z face
    Vertex { position: [-0.5, -0.5, -0.5], uv: [0.0, 0.0] },
    Vertex { position: [ 0.5, -0.5, -0.5], uv: [1.0, 0.0] },
    Vertex { position: [ 0.5,  0.5, -0.5], uv: [1.0, 1.0] },
    Vertex { position: [ 0.5,  0.5, -0.5], uv: [1.0, 1.0] },
    Vertex { position: [-0.5,  0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [-0.5, -0.5, -0.5], uv: [0.0, 0.0] },
    // +Z face
    Vertex { position: [-0.5, -0.5,  0.5], uv: [0.0, 0.0] },
    Vertex { position: [ 0.5, -0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [ 0.5,  0.5,  0.5], uv: [1.0, 1.0] },
    Vertex { position: [ 0.5,  0.5,  0.5], uv: [1.0, 1.0] },
    Vertex { position: [-0.5,  0.5,  0.5], uv: [0.0, 1.0] },
    Vertex { position: [-0.5, -0.5,  0.5], uv: [0.0, 0.0] },
    // -X face
    Vertex { position: [-0.5,  0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [-0.5,  0.5, -0.5], uv: [1.0, 1.0] },
    Vertex { position: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [-0.5, -0.5,  0.5], uv: [0.0, 0.0] },
    Vertex { position: [-0.5,  0.5,  0.5], uv: [1.0, 0.0] },
    // +X face
    Vertex { position: [ 0.5,  0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [ 0.5,  0.5, -0.5], uv: [1.0, 1.0] },
    Vertex { position: [ 0.5, -0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [ 0.5, -0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [ 0.5, -0.5,  0.5], uv: [0.0, 0.0] },
    Vertex { position: [ 0.5,  0.5,  0.5], uv: [1.0, 0.0] },
    // -Y face
    Vertex { position: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [ 0.5, -0.5, -0.5], uv: [1.0, 1.0] },
    Vertex { position: [ 0.5, -0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [ 0.5, -0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [-0.5, -0.5,  0.5], uv: [0.0, 0.0] },
    Vertex { position: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
    // +Y face
    Vertex { position: [-0.5,  0.5, -0.5], uv: [0.0, 1.0] },
    Vertex { position: [ 0.5,  0.5, -0.5], uv: [1.0, 1.0] },
    Vertex { position: [ 0.5,  0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [ 0.5,  0.5,  0.5], uv: [1.0, 0.0] },
    Vertex { position: [-0.5,  0.5,  0.5], uv: [0.0, 0.0] },
    Vertex { position: [-0.5,  0.5, -0.5], uv: [0.0, 1.0] },
];

/// The fixed set of cube instances scattered in front of the start position.
#[derive(Debug, Clone)]
pub struct CubeField {
    positions: Vec<Vec3>,
    axis: Vec3,
}

impl Default for CubeField {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeField {
    /// The fixed ten-cube layout.
    pub fn new() -> Self {
        Self {
            positions: vec![
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
            ],
            axis: SPIN_AXIS.normalize(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Model matrix for one instance at the given elapsed time.
    ///
    /// Translation to the instance position, then a spin of
    /// `50°/s · t + 20° · index` about the shared axis.
    ///
    /// Panics if `index` is out of range, like slice indexing.
    pub fn model_matrix(&self, index: usize, elapsed_secs: f32) -> Mat4 {
        let angle = elapsed_secs * SPIN_RATE + index as f32 * SPIN_STAGGER;
        Mat4::from_translation(self.positions[index]) * Mat4::from_axis_angle(self.axis, angle)
    }

    /// Model matrices for every instance at the given elapsed time, in
    /// instance order.
    pub fn model_matrices(&self, elapsed_secs: f32) -> impl Iterator<Item = Mat4> + '_ {
        (0..self.positions.len()).map(move |i| self.model_matrix(i, elapsed_secs))
    }
}
