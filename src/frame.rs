use crate::dom;
use crate::overlay;
use instant::Instant;
use multiverse_core::render::Renderer;
use multiverse_core::{RenderError, Scene, UiState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub ui: Rc<RefCell<UiState>>,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub gpu: Option<Renderer<'a>>,

    pub last_instant: Instant,
    pub seen_revision: Option<u64>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let viewport = dom::css_size(&self.canvas);
        let mut scene = self.scene.borrow_mut();
        scene.set_viewport(viewport.x, viewport.y);
        {
            let ui = self.ui.borrow();
            scene.tick(dt_sec, &ui);
            if self.seen_revision != Some(ui.revision()) {
                overlay::sync(&self.document, &ui);
                self.seen_revision = Some(ui.revision());
            }
        }

        let mut device_lost = false;
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(self.canvas.width(), self.canvas.height());
            match gpu.render(&scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => device_lost = true,
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }
        if device_lost {
            log::error!("[gpu] out of memory, rendering stopped");
            self.gpu = None;
            overlay::show_fallback(&self.document, "out of GPU memory");
        }

        overlay::place_captions(&self.document, &scene, viewport);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Result<Renderer<'static>, RenderError> {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    Renderer::new(&instance, surface, canvas.width(), canvas.height()).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
