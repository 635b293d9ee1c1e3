use anyhow::{Context, Result};
use clap::Parser;
use corridor_assets::{TextureImage, checkerboard, load_texture};
use corridor_camera::{CameraState, Projection, ViewSettings};
use corridor_common::Viewport;
use corridor_input::{InputCollector, MoveIntent};
use corridor_render::{FrameContext, FramePlan, compose_frame};
use corridor_render_wgpu::{SceneRenderer, SceneTextures};
use corridor_scene::SceneRegistry;
use egui::Context as EguiContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "corridor-desktop", about = "First-person corridor scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene file (JSON). The built-in level is used when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Directory holding floor.png and imp.png
    #[arg(long, default_value = "./assets")]
    assets: PathBuf,

    /// Fail on a missing or broken texture instead of drawing a placeholder
    #[arg(long)]
    strict_assets: bool,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Camera and projection settings (JSON)
    #[arg(long)]
    camera: Option<PathBuf>,

    /// World units moved per frame while a movement key is held.
    /// Overrides the settings file.
    #[arg(long)]
    speed: Option<f32>,

    /// Degrees turned per unit of mouse motion. Overrides the settings file.
    #[arg(long)]
    sensitivity: Option<f32>,
}

impl Cli {
    fn view_settings(&self) -> Result<ViewSettings> {
        let mut settings = match &self.camera {
            Some(path) => ViewSettings::load(path)
                .with_context(|| format!("failed to load camera settings {}", path.display()))?,
            None => ViewSettings::default(),
        };
        if let Some(speed) = self.speed {
            settings.camera.speed = speed;
        }
        if let Some(sensitivity) = self.sensitivity {
            settings.camera.sensitivity = sensitivity;
        }
        Ok(settings)
    }
}

/// Scene, camera and input. Everything the frame loop mutates lives here.
struct AppState {
    scene: SceneRegistry,
    camera: CameraState,
    projection: Projection,
    input: InputCollector,
    viewport: Viewport,
    show_hud: bool,
    last_draw_count: usize,
}

impl AppState {
    fn new(scene: SceneRegistry, settings: ViewSettings, viewport: Viewport) -> Self {
        Self {
            scene,
            camera: CameraState::new(settings.camera),
            projection: settings.projection,
            input: InputCollector::new(),
            viewport,
            show_hud: true,
            last_draw_count: 0,
        }
    }

    /// Consume this frame's input, move the camera, compose the draw list.
    fn frame(&mut self) -> FramePlan {
        let snapshot = self.input.snapshot();
        self.camera.update(&snapshot);
        let context = FrameContext::new(&self.camera, self.viewport, &self.projection);
        let plan = compose_frame(&self.scene, context);
        self.last_draw_count = plan.len();
        plan
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(intent) = move_intent(key) {
            self.input.set_intent(intent, pressed);
            return;
        }
        if pressed && key == KeyCode::F1 {
            self.show_hud = !self.show_hud;
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        egui::Window::new("Corridor")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                let p = self.camera.position();
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!(
                    "Yaw: {:.1}  Pitch: {:.1}",
                    self.camera.yaw(),
                    self.camera.pitch()
                ));
                ui.label(format!(
                    "Viewport: {}x{}",
                    self.viewport.width, self.viewport.height
                ));
                ui.label(format!("Draw calls: {}", self.last_draw_count));
                ui.label(format!(
                    "Pointer: {}",
                    if self.input.pointer_captured() {
                        "captured"
                    } else {
                        "free"
                    }
                ));
                ui.separator();
                ui.small("Click: Look | Esc: Release | WASD: Move | F1: Toggle HUD");
            });
    }
}

/// Compose the next frame only once there is a target to draw it into, so a
/// skipped frame neither moves the camera nor drains input.
fn frame_with_target<T, E>(
    state: &mut AppState,
    acquire: impl FnOnce() -> Result<T, E>,
) -> Result<(T, FramePlan), E> {
    let target = acquire()?;
    Ok((target, state.frame()))
}

fn move_intent(key: KeyCode) -> Option<MoveIntent> {
    match key {
        KeyCode::KeyW => Some(MoveIntent::Forward),
        KeyCode::KeyS => Some(MoveIntent::Backward),
        KeyCode::KeyA => Some(MoveIntent::StrafeLeft),
        KeyCode::KeyD => Some(MoveIntent::StrafeRight),
        _ => None,
    }
}

/// Load a texture, or fall back to a checkerboard unless `strict` is set.
fn load_or_placeholder(path: &Path, strict: bool, tint: [u8; 4]) -> Result<TextureImage> {
    match load_texture(path) {
        Ok(texture) => Ok(texture),
        Err(e) if strict => {
            Err(e).with_context(|| format!("failed to load texture {}", path.display()))
        }
        Err(e) => {
            tracing::warn!("texture {} unavailable ({e}); using placeholder", path.display());
            Ok(checkerboard(
                &path.display().to_string(),
                64,
                8,
                tint,
                [32, 32, 32, 255],
            ))
        }
    }
}

fn load_scene_textures(dir: &Path, strict: bool) -> Result<SceneTextures> {
    Ok(SceneTextures {
        floor: load_or_placeholder(&dir.join("floor.png"), strict, [120, 110, 90, 255])?,
        enemy: load_or_placeholder(&dir.join("imp.png"), strict, [200, 60, 40, 255])?,
    })
}

/// Window and GPU objects, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    textures: SceneTextures,
    initial_size: PhysicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState, textures: SceneTextures) -> Self {
        let initial_size = PhysicalSize::new(state.viewport.width, state.viewport.height);
        Self {
            state,
            textures,
            initial_size,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Corridor")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("corridor_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.viewport = Viewport::new(config.width, config.height);

        let renderer = SceneRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &self.textures,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.gpu = Some(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        });
        Ok(())
    }

    fn set_pointer_captured(&mut self, captured: bool) {
        self.state.input.set_pointer_captured(captured);
        let Some(gpu) = &self.gpu else {
            return;
        };
        let grab = if captured {
            gpu.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| gpu.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            gpu.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            tracing::warn!("cursor grab failed: {e}");
        }
        gpu.window.set_cursor_visible(!captured);
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let surface = &gpu.surface;
        let (output, plan) = match frame_with_target(&mut self.state, || {
            surface.get_current_texture()
        }) {
            Ok(acquired) => acquired,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &plan);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialise graphics: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.state.viewport = Viewport::new(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.clear_held();
                self.set_pointer_captured(false);
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
                let pressed = key_state == ElementState::Pressed;
                if pressed && key == KeyCode::Escape {
                    self.set_pointer_captured(false);
                } else {
                    self.state.handle_key(key, pressed);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                if !self.state.input.pointer_captured() {
                    self.set_pointer_captured(true);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
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
            self.state.input.mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("corridor-desktop starting");

    let scene = match &cli.scene {
        Some(path) => SceneRegistry::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => SceneRegistry::default_level(),
    };
    tracing::info!(
        walls = scene.walls().len(),
        enemies = scene.enemies().len(),
        "scene ready"
    );

    let textures = load_scene_textures(&cli.assets, cli.strict_assets)?;

    let settings = cli.view_settings()?;
    let state = AppState::new(scene, settings, Viewport::new(cli.width, cli.height));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, textures);
    event_loop.run_app(&mut app)?;

    Ok(())
}
