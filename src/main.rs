//! Cottage - a small 3D scene with a camera fly-through
//!
//! Builds the house scene, flies the camera inside over ten seconds, then
//! leaves it to the orbit controls.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use cottage::config::AppConfig;
use cottage::context::SceneContext;
use cottage::input::{InputAction, InputMapper};
use cottage::scene::SceneBuilder;
use cottage::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use cottage_core::Scene;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Window system (created on resume)
    window_system: Option<WindowSystem>,
    /// Render system (created on resume)
    render_system: Option<RenderSystem>,
    simulation: SimulationSystem,
    scene: SceneContext,
    /// Mouse drags only rotate/pan while the cursor is over the window
    cursor_inside: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let source = Self::load_scene(&config);
        let scene = SceneContext::from_scene(&source, &config);

        Self {
            config,
            window_system: None,
            render_system: None,
            simulation: SimulationSystem::new(),
            scene,
            cursor_inside: true,
        }
    }

    /// The configured RON scene, or the built-in cottage
    fn load_scene(config: &AppConfig) -> Scene {
        if let Some(path) = &config.scene.path {
            match Scene::load(path) {
                Ok(scene) => return scene,
                Err(e) => log::warn!("Failed to load scene '{}': {}. Using the built-in cottage.", path, e),
            }
        }
        SceneBuilder::cottage().into_scene()
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                self.scene.reset_camera();
                if self.config.flythrough.enabled {
                    if let Err(e) = self.scene.start_flythrough(&self.config.flythrough) {
                        log::warn!("Fly-through not started: {}", e);
                    }
                }
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(ws) = &self.window_system {
                    ws.toggle_fullscreen();
                }
            }
            InputAction::SkipFlight => {
                if self.scene.skip_flight() {
                    log::info!("Fly-through skipped");
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // 1. Loader, camera flight, orbit controls
        let result = self.simulation.update(&mut self.scene);

        // 2. Draw what the update produced
        if let Some(rs) = &mut self.render_system {
            if result.geometry_dirty {
                rs.upload_world(&self.scene.world);
                self.scene.world.clear_all_dirty();
            }

            match rs.render_frame(&self.scene.camera, self.scene.world.lighting()) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => rs.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory; exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        // 3. Ask for the next frame
        if let Some(ws) = &self.window_system {
            let flight = result.flight_active.then(|| self.scene.director.progress());
            ws.update_title(self.scene.camera.position.to_array(), flight);
            ws.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(ws) => ws,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match RenderSystem::new(
            window_system.window().clone(),
            self.config.rendering.clone(),
            self.config.window.vsync,
        ) {
            Ok(rs) => rs,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (_, height) = render_system.size();
        self.scene.controls.set_viewport_height(height as f32);

        window_system.request_redraw();
        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(rs) = &mut self.render_system {
                    rs.resize(physical_size.width, physical_size.height);
                }
                if physical_size.height > 0 {
                    self.scene
                        .controls
                        .set_viewport_height(physical_size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::CursorEntered { .. } => self.cursor_inside = true,
            WindowEvent::CursorLeft { .. } => self.cursor_inside = false,

            WindowEvent::MouseInput { state, button, .. } => {
                self.scene.controls.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.scene.controls.process_scroll(lines);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

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
            if self.cursor_inside {
                self.scene.controls.process_mouse_motion(delta.0, delta.1);
            }
        }
    }
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Cottage");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
