use anyhow::Result;
use clap::Parser;
use cubefield_assets::{ShaderSource, TextureImage};
use cubefield_camera::FlyCamera;
use cubefield_common::ScopedTimer;
use cubefield_render_gl::{OPACITY_STEP, Renderer};
use cubefield_scene::CubeField;
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::raw_window_handle::HasWindowHandle;
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "cubefield-viewer", about = "Spinning textured cube field viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding shaders/ and textures/
    #[arg(long, default_value = "./assets")]
    assets: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

/// Simulation-side state: camera, scene, and input tracking.
struct AppState {
    camera: FlyCamera,
    field: CubeField,
    keys_held: HashSet<KeyCode>,
    last_frame: Instant,
    started: Instant,
}

impl AppState {
    fn new() -> Self {
        Self {
            camera: FlyCamera::default(),
            field: CubeField::new(),
            keys_held: HashSet::new(),
            last_frame: Instant::now(),
            started: Instant::now(),
        }
    }

    fn update(&mut self, dt: f32) {
        if self.keys_held.contains(&KeyCode::KeyW) {
            self.camera.move_forward(dt);
        }
        if self.keys_held.contains(&KeyCode::KeyS) {
            self.camera.move_backward(dt);
        }
        if self.keys_held.contains(&KeyCode::KeyA) {
            self.camera.move_left(dt);
        }
        if self.keys_held.contains(&KeyCode::KeyD) {
            self.camera.move_right(dt);
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

/// Windowing shell around the GL context and renderer.
///
/// Field order matters for teardown: the surface must drop before the
/// window it was created from.
struct ViewerApp {
    state: AppState,
    assets_dir: PathBuf,
    initial_size: PhysicalSize<u32>,
    renderer: Option<Renderer>,
    gl: Option<glow::Context>,
    gl_surface: Option<Surface<WindowSurface>>,
    gl_context: Option<PossiblyCurrentContext>,
    window: Option<Window>,
}

impl ViewerApp {
    fn new(assets_dir: PathBuf, width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(),
            assets_dir,
            initial_size: PhysicalSize::new(width.max(1), height.max(1)),
            renderer: None,
            gl: None,
            gl_surface: None,
            gl_context: None,
            window: None,
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let _startup = ScopedTimer::new("viewer startup");

        let attrs = Window::default_attributes()
            .with_title("Cubefield")
            .with_inner_size(self.initial_size);

        // OpenGL 3.3 core with a 24-bit depth buffer.
        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|best, config| {
                        if config.num_samples() > best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("no compatible GL configurations")
            })
            .expect("create GL display");
        let window = window.expect("create window");

        let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(raw_window_handle);
        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .expect("create GL context")
        };

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .expect("build surface attributes");
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &surface_attributes)
                .expect("create GL surface")
        };
        let gl_context = not_current
            .make_current(&gl_surface)
            .expect("make GL context current");

        if let Err(err) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            tracing::warn!("vsync unavailable: {err}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| {
                gl_display.get_proc_address(name) as *const _
            })
        };
        unsafe {
            tracing::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
            );
        }

        let sources = ShaderSource::load_or_empty(
            self.assets_dir.join(cubefield_assets::VERTEX_SHADER),
            self.assets_dir.join(cubefield_assets::FRAGMENT_SHADER),
        );
        let container = load_texture(&self.assets_dir.join(cubefield_assets::CONTAINER_TEXTURE));
        let face = load_texture(&self.assets_dir.join(cubefield_assets::FACE_TEXTURE));

        let renderer = Renderer::new(&gl, &sources, container.as_ref(), face.as_ref())
            .expect("allocate GPU objects");

        let size = window.inner_size();
        renderer.resize(&gl, size.width.max(1), size.height.max(1));
        self.state.camera.set_aspect(size.width, size.height);

        // Mouse-look wants the cursor captured for the whole session.
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            tracing::warn!("cursor grab unavailable: {err}");
        }
        window.set_cursor_visible(false);

        self.renderer = Some(renderer);
        self.gl = Some(gl);
        self.gl_surface = Some(gl_surface);
        self.gl_context = Some(gl_context);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(context), Some(gl), Some(renderer)) = (
                    &self.gl_surface,
                    &self.gl_context,
                    &self.gl,
                    &self.renderer,
                ) {
                    let width = new_size.width.max(1);
                    let height = new_size.height.max(1);
                    surface.resize(
                        context,
                        NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
                        NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
                    );
                    renderer.resize(gl, width, height);
                    self.state.camera.set_aspect(width, height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape && key_state == ElementState::Pressed {
                    event_loop.exit();
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 10.0,
                };
                self.state.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(renderer), Some(gl), Some(surface), Some(context)) = (
                    &self.renderer,
                    &self.gl,
                    &self.gl_surface,
                    &self.gl_context,
                ) else {
                    return;
                };

                if self.state.keys_held.contains(&KeyCode::ArrowUp) {
                    renderer.adjust_opacity(gl, OPACITY_STEP);
                }
                if self.state.keys_held.contains(&KeyCode::ArrowDown) {
                    renderer.adjust_opacity(gl, -OPACITY_STEP);
                }

                renderer.draw_frame(
                    gl,
                    &self.state.camera,
                    &self.state.field,
                    self.state.elapsed_secs(),
                );

                if let Err(err) = surface.swap_buffers(context) {
                    tracing::error!("swap_buffers failed: {err}");
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.camera.rotate(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(renderer), Some(gl)) = (&self.renderer, &self.gl) {
            renderer.destroy(gl);
        }
        self.renderer = None;
    }
}

fn load_texture(path: &Path) -> Option<TextureImage> {
    match TextureImage::load(path) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::warn!("{err}; leaving its sampler unit unbound");
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubefield-viewer starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(cli.assets, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
