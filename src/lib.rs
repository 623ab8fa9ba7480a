#![cfg(target_arch = "wasm32")]
use crate::constants::CANVAS_ID;
use instant::Instant;
use multiverse_core::{Scene, SceneConfig, UiState, DOCUMENT_TITLE};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("multiverse-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    document.set_title(DOCUMENT_TITLE);

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the backing store at CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let ui = Rc::new(RefCell::new(UiState::new()));
    let scene = Rc::new(RefCell::new(Scene::new(SceneConfig::default())));
    overlay::mount(&document, &ui)?;

    let mut gpu = match frame::init_gpu(&canvas).await {
        Ok(g) => g,
        Err(e) => {
            overlay::show_fallback(&document, &e.to_string());
            return Err(e.into());
        }
    };
    gpu.load_scene(&scene.borrow());

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        ui: ui.clone(),
        drag: Rc::new(RefCell::new(input::DragTracker::default())),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        ui,
        canvas,
        document,
        gpu: Some(gpu),
        last_instant: Instant::now(),
        seen_revision: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
