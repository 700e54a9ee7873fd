use cubefield_common::Vertex;
use cubefield_scene::CUBE_VERTICES;
use glow::HasContext;

use crate::RenderError;

/// The cube vertex buffer and its attribute layout, ready to draw.
///
/// Attribute 0 is the position (vec3), attribute 1 the texture coordinate
/// (vec2), interleaved in a single buffer. The geometry is not indexed;
/// one draw covers all 36 vertices.
pub struct CubeMesh {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    vertex_count: i32,
}

impl CubeMesh {
    pub fn new(gl: &glow::Context) -> Result<Self, RenderError> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(RenderError::Allocate)?;
            let vbo = gl.create_buffer().map_err(RenderError::Allocate)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&CUBE_VERTICES),
                glow::STATIC_DRAW,
            );

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, Vertex::STRIDE, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                Vertex::STRIDE,
                Vertex::UV_OFFSET,
            );

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                vbo,
                vertex_count: CUBE_VERTICES.len() as i32,
            })
        }
    }

    /// Bind the vertex array and issue one non-indexed draw of the cube.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
        }
    }

    /// Release the buffer and vertex array objects.
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}
