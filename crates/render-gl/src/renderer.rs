use cubefield_assets::{ShaderSource, TextureImage};
use cubefield_camera::FlyCamera;
use cubefield_scene::CubeField;
use glow::HasContext;

use crate::RenderError;
use crate::mesh::CubeMesh;
use crate::shader::ShaderProgram;
use crate::texture::Texture2d;

/// Background color behind the cubes.
const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Change applied to the texture blend factor per adjustment step.
pub const OPACITY_STEP: f32 = 0.01;

/// Blend factor between the two textures at startup.
const INITIAL_OPACITY: f32 = 0.2;

/// Owns every GPU object the viewer needs and draws one frame at a time.
pub struct Renderer {
    shader: ShaderProgram,
    mesh: CubeMesh,
    container: Option<Texture2d>,
    face: Option<Texture2d>,
}

impl Renderer {
    /// Compile the shader pair and upload the cube mesh and textures.
    ///
    /// Either texture may be absent; its sampler unit is then left unbound
    /// and the corresponding cube faces sample black. A shader pair that
    /// fails to compile leaves the renderer drawing nothing, which the
    /// caller can observe through [`ShaderProgram::is_linked`].
    pub fn new(
        gl: &glow::Context,
        sources: &ShaderSource,
        container: Option<&TextureImage>,
        face: Option<&TextureImage>,
    ) -> Result<Self, RenderError> {
        let shader = ShaderProgram::new(gl, &sources.vertex, &sources.fragment)?;
        let mesh = CubeMesh::new(gl)?;
        let container = container.map(|img| Texture2d::new(gl, img)).transpose()?;
        let face = face.map(|img| Texture2d::new(gl, img)).transpose()?;

        // Sampler units never change, so assign them once up front.
        shader.bind(gl);
        shader.set_i32(gl, "texture1", 0);
        shader.set_i32(gl, "texture2", 1);
        shader.set_f32(gl, "opacity", INITIAL_OPACITY);

        unsafe { gl.enable(glow::DEPTH_TEST) };

        Ok(Self {
            shader,
            mesh,
            container,
            face,
        })
    }

    /// The shared program, for link-status checks and uniform access.
    pub fn shader(&self) -> &ShaderProgram {
        &self.shader
    }

    /// Match the GL viewport to a new drawable size.
    pub fn resize(&self, gl: &glow::Context, width: u32, height: u32) {
        unsafe { gl.viewport(0, 0, width as i32, height as i32) }
    }

    /// Clear and redraw the whole field for the given camera and time.
    pub fn draw_frame(
        &self,
        gl: &glow::Context,
        camera: &FlyCamera,
        field: &CubeField,
        elapsed_secs: f32,
    ) {
        unsafe {
            gl.clear_color(
                CLEAR_COLOR[0],
                CLEAR_COLOR[1],
                CLEAR_COLOR[2],
                CLEAR_COLOR[3],
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.shader.bind(gl);
        if let Some(texture) = &self.container {
            texture.bind(gl, 0);
        }
        if let Some(texture) = &self.face {
            texture.bind(gl, 1);
        }

        self.shader.set_mat4(gl, "view", &camera.view_matrix());
        self.shader.set_mat4(gl, "projection", &camera.projection_matrix());

        for model in field.model_matrices(elapsed_secs) {
            self.shader.set_mat4(gl, "model", &model);
            self.mesh.draw(gl);
        }
    }

    /// Nudge the blend factor between the two textures, clamped to [0, 1].
    pub fn adjust_opacity(&self, gl: &glow::Context, delta: f32) {
        if let Some(current) = self.shader.get_f32(gl, "opacity") {
            self.shader.bind(gl);
            self.shader.set_f32(gl, "opacity", (current + delta).clamp(0.0, 1.0));
        }
    }

    /// Release every GPU object this renderer owns.
    pub fn destroy(&self, gl: &glow::Context) {
        self.mesh.destroy(gl);
        self.shader.destroy(gl);
        if let Some(texture) = &self.container {
            texture.destroy(gl);
        }
        if let Some(texture) = &self.face {
            texture.destroy(gl);
        }
    }
}
