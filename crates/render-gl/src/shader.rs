use glam::Mat4;
use glow::HasContext;
use tracing::error;

use crate::RenderError;

/// A compiled and linked GLSL program.
///
/// Compile and link diagnostics go to the error log together with the
/// driver's info log text, and the program object survives either failure
/// in an unusable state: [`ShaderProgram::is_linked`] reports false and
/// every uniform access becomes a no-op. Only GPU object allocation
/// failures surface as `Err`.
pub struct ShaderProgram {
    program: glow::NativeProgram,
    linked: bool,
}

impl ShaderProgram {
    /// Compile a vertex/fragment source pair and link them into a program.
    pub fn new(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        let program = unsafe { gl.create_program().map_err(RenderError::Allocate)? };

        let vertex = compile_stage(gl, glow::VERTEX_SHADER, vertex_src)?;
        let fragment = compile_stage(gl, glow::FRAGMENT_SHADER, fragment_src)?;

        let mut linked = false;
        unsafe {
            if let (Some(vs), Some(fs)) = (vertex, fragment) {
                gl.attach_shader(program, vs);
                gl.attach_shader(program, fs);
                gl.link_program(program);
                linked = gl.get_program_link_status(program);
                if !linked {
                    error!(
                        "shader program link failed: {}",
                        gl.get_program_info_log(program)
                    );
                }
                gl.detach_shader(program, vs);
                gl.detach_shader(program, fs);
            }
            if let Some(vs) = vertex {
                gl.delete_shader(vs);
            }
            if let Some(fs) = fragment {
                gl.delete_shader(fs);
            }
        }

        Ok(Self { program, linked })
    }

    /// True when both stages compiled and the program linked.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Make this the active program for subsequent uniform writes and draws.
    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) }
    }

    pub fn set_bool(&self, gl: &glow::Context, name: &str, value: bool) {
        self.set_i32(gl, name, value as i32);
    }

    pub fn set_i32(&self, gl: &glow::Context, name: &str, value: i32) {
        unsafe { gl.uniform_1_i32(self.location(gl, name).as_ref(), value) }
    }

    pub fn set_f32(&self, gl: &glow::Context, name: &str, value: f32) {
        unsafe { gl.uniform_1_f32(self.location(gl, name).as_ref(), value) }
    }

    /// Upload a matrix in column-major order, as glam stores it.
    pub fn set_mat4(&self, gl: &glow::Context, name: &str, value: &Mat4) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(
                self.location(gl, name).as_ref(),
                false,
                &value.to_cols_array(),
            )
        }
    }

    /// Read a scalar uniform back from the program.
    ///
    /// `None` when the program is unusable or the name does not resolve.
    pub fn get_f32(&self, gl: &glow::Context, name: &str) -> Option<f32> {
        let location = self.location(gl, name)?;
        let mut value = [0.0_f32];
        unsafe { gl.get_uniform_f32(self.program, &location, &mut value) };
        Some(value[0])
    }

    // Locations are re-resolved on every access; nothing is cached across
    // frames. A name the GLSL compiler optimized out resolves to None just
    // like a misspelled one.
    fn location(&self, gl: &glow::Context, name: &str) -> Option<glow::NativeUniformLocation> {
        if !self.linked {
            return None;
        }
        unsafe { gl.get_uniform_location(self.program, name) }
    }

    /// Release the program object. The handle must not be used afterwards.
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) }
    }
}

/// Compile one stage. A compile error yields `Ok(None)` after logging the
/// driver diagnostics; `Err` is reserved for allocation failure.
fn compile_stage(
    gl: &glow::Context,
    stage: u32,
    source: &str,
) -> Result<Option<glow::NativeShader>, RenderError> {
    unsafe {
        let shader = gl.create_shader(stage).map_err(RenderError::Allocate)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if gl.get_shader_compile_status(shader) {
            Ok(Some(shader))
        } else {
            error!(
                "{} shader compile failed: {}",
                stage_name(stage),
                gl.get_shader_info_log(shader)
            );
            gl.delete_shader(shader);
            Ok(None)
        }
    }
}

fn stage_name(stage: u32) -> &'static str {
    match stage {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}
