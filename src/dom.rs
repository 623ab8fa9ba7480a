use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Listen for `change` on a checkbox and pass its new `checked` value.
pub fn add_toggle_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(bool) + 'static,
) {
    let Some(input) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        log::warn!("[dom] missing toggle #{}", element_id);
        return;
    };
    let target = input.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(
        Box::new(move || handler(target.checked())) as Box<dyn FnMut()>,
    );
    _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn create_element(
    document: &web::Document,
    tag: &str,
    id: Option<&str>,
    text: Option<&str>,
) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
    if let Some(id) = id {
        el.set_id(id);
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

pub fn append(parent: &web::Node, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

/// Canvas size in CSS pixels.
pub fn css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
