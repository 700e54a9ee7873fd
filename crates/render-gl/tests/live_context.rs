//! Shader checks that need a live display and an OpenGL 3.3 driver.
//!
//! Ignored by default; run with `cargo test -- --ignored` from a desktop
//! session.

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin_winit::{DisplayBuilder, GlWindow};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::raw_window_handle::HasWindowHandle;
use winit::window::{Window, WindowId};

use cubefield_render_gl::ShaderProgram;

const VALID_VERT: &str = "#version 330 core\n\
    layout (location = 0) in vec3 a_pos;\n\
    uniform float opacity;\n\
    out float v_opacity;\n\
    void main() {\n\
        v_opacity = opacity;\n\
        gl_Position = vec4(a_pos, 1.0);\n\
    }\n";

const VALID_FRAG: &str = "#version 330 core\n\
    in float v_opacity;\n\
    out vec4 frag_color;\n\
    void main() { frag_color = vec4(v_opacity); }\n";

const BROKEN_FRAG: &str = "#version 330 core\nvoid main() { this is not glsl }\n";

#[test]
#[ignore = "needs a display and an OpenGL 3.3 driver"]
fn shader_diagnostics_against_live_driver() {
    let event_loop = new_event_loop();
    let mut probe = Probe::default();
    event_loop.run_app(&mut probe).expect("event loop failed");
    assert!(probe.checked, "resumed never fired");
}

fn new_event_loop() -> EventLoop<()> {
    let mut builder = EventLoop::builder();
    // The libtest harness runs tests off the main thread.
    #[cfg(target_os = "linux")]
    {
        use winit::platform::wayland::EventLoopBuilderExtWayland;
        use winit::platform::x11::EventLoopBuilderExtX11;
        EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }
    builder.build().expect("failed to create event loop")
}

#[derive(Default)]
struct Probe {
    checked: bool,
}

impl ApplicationHandler for Probe {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.checked {
            run_checks(event_loop);
            self.checked = true;
        }
        event_loop.exit();
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

fn run_checks(event_loop: &ActiveEventLoop) {
    let attributes = Window::default_attributes()
        .with_visible(false)
        .with_inner_size(PhysicalSize::new(64, 64));
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(attributes))
        .build(event_loop, ConfigTemplateBuilder::new(), |mut configs| {
            configs.next().expect("no GL configs")
        })
        .expect("failed to create GL display");
    let window = window.expect("display builder returned no window");
    let gl_display = gl_config.display();
    let raw_window_handle = window.window_handle().expect("window handle").as_raw();

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .with_profile(GlProfile::Core)
        .build(Some(raw_window_handle));
    let not_current = unsafe {
        gl_display
            .create_context(&gl_config, &context_attributes)
            .expect("failed to create GL context")
    };

    let surface_attributes = window
        .build_surface_attributes(Default::default())
        .expect("surface attributes");
    let surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attributes)
            .expect("failed to create GL surface")
    };
    let _context = not_current
        .make_current(&surface)
        .expect("failed to make context current");

    let gl = unsafe {
        glow::Context::from_loader_function_cstr(|name| {
            gl_display.get_proc_address(name) as *const _
        })
    };

    // Valid sources link, and scalar uniforms round-trip through the driver.
    let good = ShaderProgram::new(&gl, VALID_VERT, VALID_FRAG).unwrap();
    assert!(good.is_linked());
    good.bind(&gl);
    for value in [0.0_f32, 0.25, 0.5, 0.75, 1.0] {
        good.set_f32(&gl, "opacity", value);
        assert_eq!(good.get_f32(&gl, "opacity"), Some(value));
    }

    // Unknown names are silent no-ops on write and absent on read.
    good.set_f32(&gl, "no_such_uniform", 1.0);
    assert_eq!(good.get_f32(&gl, "no_such_uniform"), None);
    good.destroy(&gl);

    // A broken stage leaves the program allocated but unusable.
    let bad = ShaderProgram::new(&gl, VALID_VERT, BROKEN_FRAG).unwrap();
    assert!(!bad.is_linked());
    assert_eq!(bad.get_f32(&gl, "opacity"), None);
    bad.destroy(&gl);
}
