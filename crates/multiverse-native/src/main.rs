use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use glam::Vec2;
use multiverse_core::render::Renderer;
use multiverse_core::{NodeId, OverlayAction, Scene, SceneConfig, UiState, DOCUMENT_TITLE};

/// Pointer travel in physical pixels before a press becomes an orbit drag.
const DRAG_THRESHOLD_PX: f32 = 4.0;
/// Pixels per line for line-based wheel deltas.
const WHEEL_LINE_PX: f32 = 40.0;

#[derive(Default)]
struct Pointer {
    pos: Vec2,
    pressed_at: Option<Vec2>,
    dragging: bool,
}

struct App<'w> {
    window: &'w Window,
    gpu: Renderer<'w>,
    scene: Scene,
    ui: UiState,
    pointer: Pointer,
    last_frame: Instant,
}

impl<'w> App<'w> {
    async fn new(window: &'w Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let mut scene = Scene::new(SceneConfig::default());
        scene.set_viewport(size.width as f32, size.height as f32);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let mut gpu = Renderer::new(&instance, surface, size.width, size.height).await?;
        gpu.load_scene(&scene);
        Ok(Self {
            window,
            gpu,
            scene,
            ui: UiState::new(),
            pointer: Pointer::default(),
            last_frame: Instant::now(),
        })
    }

    fn viewport(&self) -> Vec2 {
        let size = self.window.inner_size();
        Vec2::new(size.width as f32, size.height as f32)
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.gpu.resize(new_size.width, new_size.height);
        self.scene
            .set_viewport(new_size.width as f32, new_size.height as f32);
    }

    fn cursor_moved(&mut self, pos: Vec2) {
        let prev = self.pointer.pos;
        self.pointer.pos = pos;
        let viewport = self.viewport();
        if let Some(origin) = self.pointer.pressed_at {
            if !self.pointer.dragging && origin.distance(pos) > DRAG_THRESHOLD_PX {
                self.pointer.dragging = true;
                self.scene.rig.orbit.begin_drag();
            }
            if self.pointer.dragging {
                let delta = pos - prev;
                self.scene.rig.orbit.rotate(delta.x, delta.y, viewport.y);
                return;
            }
        }
        let ray = self.scene.screen_ray(pos.x, pos.y, viewport.x, viewport.y);
        self.scene.pointer_move(&ray);
    }

    fn mouse_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pointer.pressed_at = Some(self.pointer.pos);
                self.pointer.dragging = false;
            }
            ElementState::Released => {
                let was_drag = self.pointer.dragging;
                self.pointer.pressed_at = None;
                self.pointer.dragging = false;
                if was_drag {
                    self.scene.rig.orbit.end_drag();
                    return;
                }
                let viewport = self.viewport();
                let pos = self.pointer.pos;
                let ray = self.scene.screen_ray(pos.x, pos.y, viewport.x, viewport.y);
                if let Some(id) = self.scene.click(&ray, &mut self.ui) {
                    log::info!("[click] {}", id);
                }
            }
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        // winit reports scroll-up as positive; the orbit layer expects DOM sign
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
            MouseScrollDelta::PixelDelta(p) => -p.y as f32,
        };
        self.scene.rig.zoom(dy);
    }

    fn key(&mut self, code: KeyCode) {
        let action = match code {
            KeyCode::Digit1 => OverlayAction::Jump(NodeId::ALL[0]),
            KeyCode::Digit2 => OverlayAction::Jump(NodeId::ALL[1]),
            KeyCode::Digit3 => OverlayAction::Jump(NodeId::ALL[2]),
            KeyCode::Digit4 => OverlayAction::Jump(NodeId::ALL[3]),
            KeyCode::Digit5 => OverlayAction::Jump(NodeId::ALL[4]),
            KeyCode::KeyT => OverlayAction::SetDark(!self.ui.dark()),
            KeyCode::KeyM => OverlayAction::SetMusic(!self.ui.music_on()),
            _ => return,
        };
        self.ui.apply(action);
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.scene.tick(dt.as_secs_f32(), &self.ui);
        self.gpu.render(&self.scene)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(DOCUMENT_TITLE)
        .build(&event_loop)?;

    let mut app = pollster::block_on(App::new(&window))?;
    log::info!("multiverse-native running; keys 1-5 jump, T theme, M music");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                app.cursor_moved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::CursorLeft { .. } => {
                app.scene.set_hovered(None);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => app.mouse_button(state),
            WindowEvent::MouseWheel { delta, .. } => app.wheel(delta),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => app.key(code),
            _ => {}
        },
        Event::AboutToWait => match app.frame() {
            Ok(()) => app.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => app.gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory");
                elwt.exit();
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
