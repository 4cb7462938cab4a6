use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use ironsight_assets::load_weapon_or_fallback;
use ironsight_core::Session;
use ironsight_input::{MouseLook, MoveIntent, PressLatch};
use ironsight_render_wgpu::WgpuRenderer;
use ironsight_scene::{HudState, compose};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "ironsight-desktop", about = "Ironsight desktop demo")]
struct Cli {
    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Mouse look sensitivity, radians per count of mouse travel
    #[arg(long, default_value_t = ironsight_core::player::DEFAULT_SENSITIVITY)]
    sensitivity: f32,

    /// Weapon model to load; a plain box stands in when it is missing
    #[arg(long, default_value = "assets/ak47.glb")]
    weapon_model: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Everything the frame loop mutates.
struct AppState {
    session: Session,
    sensitivity: f32,
    keys_held: HashSet<KeyCode>,
    fire_latch: PressLatch,
    fire_queued: bool,
    mouse_look: MouseLook,
    captured: bool,
    last_frame: Instant,
    fps: f32,
}

impl AppState {
    fn new(sensitivity: f32) -> Self {
        Self {
            session: Session::new(),
            sensitivity,
            keys_held: HashSet::new(),
            fire_latch: PressLatch::default(),
            fire_queued: false,
            mouse_look: MouseLook::default(),
            captured: false,
            last_frame: Instant::now(),
            fps: 0.0,
        }
    }

    fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.keys_held.contains(&KeyCode::KeyW),
            back: self.keys_held.contains(&KeyCode::KeyS),
            right: self.keys_held.contains(&KeyCode::KeyD),
            left: self.keys_held.contains(&KeyCode::KeyA),
        }
    }

    /// One frame of simulation: look, walk, tick, then any queued shot.
    fn advance(&mut self, dt: f32) {
        let look = self.mouse_look.take();
        if look != Vec2::ZERO {
            self.session.player.look(look.x, look.y, self.sensitivity);
        }

        let axes = self.move_intent().axes();
        self.session.player.walk(axes.x, axes.y, dt);
        self.session.update(dt);

        // Firing stays gated on capture so stray clicks while the cursor is
        // free never shoot.
        if std::mem::take(&mut self.fire_queued) && self.captured {
            let report = self.session.fire();
            tracing::debug!(enemy = report.enemy_hit, cube = ?report.target, "shot fired");
        }
    }
}

/// Paint the text overlay, weapon pane backdrop, and crosshair.
fn draw_hud(ctx: &EguiContext, hud: &HudState) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("hud"),
    ));
    let screen = ctx.screen_rect();

    // Translucent backdrop behind the weapon pane, bottom-right third.
    let pane = egui::Rect::from_min_max(
        egui::pos2(screen.max.x * 2.0 / 3.0, screen.max.y * 2.0 / 3.0),
        screen.max,
    );
    painter.rect_filled(
        pane,
        egui::CornerRadius::ZERO,
        egui::Color32::from_black_alpha(25),
    );

    painter.text(
        egui::pos2(10.0, 10.0),
        egui::Align2::LEFT_TOP,
        "ironsight",
        egui::FontId::proportional(20.0),
        egui::Color32::DARK_GRAY,
    );
    let small = egui::FontId::proportional(14.0);
    painter.text(
        egui::pos2(10.0, 35.0),
        egui::Align2::LEFT_TOP,
        "WASD: Move | Mouse: Look | Left Click: Shoot | Tab: Toggle cursor | ESC: Exit",
        small.clone(),
        egui::Color32::DARK_GRAY,
    );
    let (status, status_color) = if hud.captured {
        ("Mouse captured - infinite rotation!", egui::Color32::GREEN)
    } else {
        ("Mouse free - press Tab to capture", egui::Color32::RED)
    };
    painter.text(
        egui::pos2(10.0, 55.0),
        egui::Align2::LEFT_TOP,
        status,
        small.clone(),
        status_color,
    );
    painter.text(
        egui::pos2(10.0, 75.0),
        egui::Align2::LEFT_TOP,
        format!("Enemy Health: {:.0}", hud.enemy_health),
        small,
        egui::Color32::WHITE,
    );
    painter.text(
        egui::pos2(screen.max.x - 10.0, 10.0),
        egui::Align2::RIGHT_TOP,
        format!("FPS: {:.0}", hud.fps),
        egui::FontId::proportional(20.0),
        egui::Color32::WHITE,
    );

    if hud.captured {
        let center = screen.center();
        let size = 10.0;
        let thickness = 2.0;
        painter.rect_filled(
            egui::Rect::from_center_size(center, egui::vec2(size * 2.0, thickness)),
            egui::CornerRadius::ZERO,
            egui::Color32::WHITE,
        );
        painter.rect_filled(
            egui::Rect::from_center_size(center, egui::vec2(thickness, size * 2.0)),
            egui::CornerRadius::ZERO,
            egui::Color32::WHITE,
        );
    }
}

struct GpuApp {
    state: AppState,
    window_size: PhysicalSize<u32>,
    weapon_model: String,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli.sensitivity),
            window_size: PhysicalSize::new(cli.width.max(1), cli.height.max(1)),
            weapon_model: cli.weapon_model.clone(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn toggle_capture(&mut self) {
        let Some(window) = &self.window else { return };
        let capture = !self.state.captured;
        if capture {
            // Locked keeps the cursor pinned; some platforms only confine.
            if let Err(err) = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            {
                tracing::warn!("cursor grab unavailable: {err}");
                return;
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.state.captured = capture;
        tracing::debug!(captured = capture, "mouse capture toggled");
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode, pressed: bool) {
        if pressed {
            self.state.keys_held.insert(key);
        } else {
            self.state.keys_held.remove(&key);
        }

        if !pressed {
            return;
        }

        match key {
            KeyCode::Tab => self.toggle_capture(),
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("ironsight")
            .with_inner_size(self.window_size);
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("ironsight_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let weapon_mesh = load_weapon_or_fallback(&self.weapon_model);
        let renderer =
            WgpuRenderer::new(&device, surface_format, size.width, size.height, &weapon_mesh);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        // The demo starts with the mouse captured; Tab releases it.
        self.toggle_capture();

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                // Auto-repeat would flap the Tab toggle; held keys are
                // already tracked from the first press.
                if !repeat {
                    self.handle_key(event_loop, key, key_state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                if self
                    .state
                    .fire_latch
                    .update(btn_state == ElementState::Pressed)
                {
                    self.state.fire_queued = true;
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                if dt > 0.0 {
                    let instant_fps = 1.0 / dt;
                    self.state.fps = if self.state.fps > 0.0 {
                        self.state.fps * 0.9 + instant_fps * 0.1
                    } else {
                        instant_fps
                    };
                }
                self.state.advance(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let plan = compose(&self.state.session, self.state.captured, self.state.fps);
                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &plan);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let hud = plan.hud;
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    draw_hud(ctx, &hud);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.captured {
                self.state.mouse_look.add(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("ironsight-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
