use crate::constants::{HOVER_CLASS, WHEEL_DEADZONE};
use crate::dom;
use crate::input::{self, DragTracker, Release};
use glam::Vec2;
use multiverse_core::{Scene, UiState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub ui: Rc<RefCell<UiState>>,
    pub drag: Rc<RefCell<DragTracker>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
    wire_wheel(&w);
}

/// Pointer position and canvas size, both in CSS pixels.
fn pointer_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let pos = input::local_position(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
    );
    (pos, dom::css_size(canvas))
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let (pos, size) = pointer_css(&ev, &w2.canvas);
        let mut scene = w2.scene.borrow_mut();

        if let Some(delta) = w2.drag.borrow_mut().move_to(pos) {
            let orbit = &mut scene.rig.orbit;
            if !orbit.is_dragging() {
                orbit.begin_drag();
                log::debug!("[orbit] drag start");
            }
            orbit.rotate(delta.x, delta.y, size.y);
            return;
        }

        let ray = scene.screen_ray(pos.x, pos.y, size.x, size.y);
        let change = scene.pointer_move(&ray);
        if !change.is_empty() {
            dom::set_class(&w2.canvas, HOVER_CLASS, scene.hovered().is_some());
        }
    });
}

fn wire_pointerdown(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let (pos, _) = pointer_css(&ev, &w2.canvas);
        w2.drag.borrow_mut().press(pos);
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointerup(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerup", move |ev: web::PointerEvent| {
        let (pos, size) = pointer_css(&ev, &w2.canvas);
        let release = w2.drag.borrow_mut().release(pos);
        match release {
            Release::Click(at) => {
                let scene = w2.scene.borrow();
                let ray = scene.screen_ray(at.x, at.y, size.x, size.y);
                if let Some(id) = scene.click(&ray, &mut w2.ui.borrow_mut()) {
                    log::info!("[click] {}", id);
                }
            }
            Release::DragEnd => {
                w2.scene.borrow_mut().rig.orbit.end_drag();
                log::debug!("[orbit] drag end");
            }
            Release::Idle => {}
        }
        _ = w2.canvas.release_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointerleave(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerleave", move |_ev: web::PointerEvent| {
        let mut scene = w2.scene.borrow_mut();
        if w2.drag.borrow().is_dragging() {
            return;
        }
        if !scene.set_hovered(None).is_empty() {
            dom::set_class(&w2.canvas, HOVER_CLASS, false);
        }
    });

    let w3 = w.clone();
    listen(&w.canvas, "pointercancel", move |_ev: web::PointerEvent| {
        w3.drag.borrow_mut().cancel();
        w3.scene.borrow_mut().rig.orbit.end_drag();
    });
}

fn wire_wheel(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        let dy = ev.delta_y() as f32;
        if dy.abs() < WHEEL_DEADZONE {
            return;
        }
        w2.scene.borrow_mut().rig.zoom(dy);
    });
}
