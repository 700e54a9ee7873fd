use bytemuck::{Pod, Zeroable};

/// One mesh vertex: object-space position plus texture coordinate.
///
/// The layout matches the interleaved attribute setup in the render crate:
/// attribute 0 is the position, attribute 1 is the texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Byte offset of the texture coordinate within the vertex.
    pub const UV_OFFSET: i32 = std::mem::size_of::<[f32; 3]>() as i32;

    /// Byte stride between consecutive vertices in a buffer.
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;
}
