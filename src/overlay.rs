//! DOM overlay: header, Quick Jump mini-map, toggles, call to action and the
//! world-anchored captions. Every control funnels into `UiState::apply`.

use crate::constants::*;
use crate::dom;
use glam::Vec2;
use multiverse_core::{
    minimap_entries, CaptionKey, OverlayAction, Scene, UiState, COLLABORATE_LABEL, HEADER_NAME,
    HEADER_TAGLINE, INTRO_LINES, MINIMAP_HEADING, MUSIC_TOGGLE_LABEL, NODES, THEME_TOGGLE_LABEL,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn jump_id(id: multiverse_core::NodeId) -> String {
    format!("jump-{}", id)
}

pub fn caption_id(key: CaptionKey) -> String {
    match key {
        CaptionKey::Intro => "caption-intro".to_string(),
        CaptionKey::Label(id) => format!("caption-{}", id),
    }
}

fn apply(ui: &Rc<RefCell<UiState>>, action: OverlayAction) {
    let changed = ui.borrow_mut().apply(action);
    if changed {
        if let Some(doc) = dom::window_document() {
            sync(&doc, &ui.borrow());
        }
    }
}

/// Build the overlay under `<body>` and wire its controls.
pub fn mount(document: &web::Document, ui: &Rc<RefCell<UiState>>) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let root = dom::create_element(document, "div", Some(OVERLAY_ID), None)?;

    let header = dom::create_element(document, "header", None, None)?;
    dom::append(&header, &dom::create_element(document, "h1", None, Some(HEADER_NAME))?)?;
    dom::append(&header, &dom::create_element(document, "p", None, Some(HEADER_TAGLINE))?)?;
    dom::append(&root, &header)?;

    let nav = dom::create_element(document, "nav", Some(MINIMAP_ID), None)?;
    dom::append(&nav, &dom::create_element(document, "h2", None, Some(MINIMAP_HEADING))?)?;
    for entry in minimap_entries() {
        let button = dom::create_element(
            document,
            "button",
            Some(&jump_id(entry.id)),
            Some(entry.label),
        )?;
        _ = button.set_attribute("type", "button");
        _ = button.set_attribute("aria-label", &entry.aria_label);
        dom::append(&nav, &button)?;
    }
    dom::append(&root, &nav)?;

    let toggles = dom::create_element(document, "div", Some("toggles"), None)?;
    for (id, text) in [
        (THEME_TOGGLE_ID, THEME_TOGGLE_LABEL),
        (MUSIC_TOGGLE_ID, MUSIC_TOGGLE_LABEL),
    ] {
        let label = dom::create_element(document, "label", None, None)?;
        let input = dom::create_element(document, "input", Some(id), None)?;
        _ = input.set_attribute("type", "checkbox");
        dom::append(&label, &input)?;
        dom::append(&label, &dom::create_element(document, "span", None, Some(text))?)?;
        dom::append(&toggles, &label)?;
    }
    dom::append(&root, &toggles)?;

    let cta = dom::create_element(
        document,
        "button",
        Some(COLLAB_BUTTON_ID),
        Some(COLLABORATE_LABEL),
    )?;
    _ = cta.set_attribute("type", "button");
    dom::append(&root, &cta)?;

    let captions = dom::create_element(document, "div", Some(CAPTION_LAYER_ID), None)?;
    let intro = dom::create_element(document, "div", Some(&caption_id(CaptionKey::Intro)), None)?;
    for line in INTRO_LINES {
        dom::append(&intro, &dom::create_element(document, "p", None, Some(line))?)?;
    }
    dom::append(&captions, &intro)?;
    for def in NODES.iter().skip(1) {
        let label = dom::create_element(
            document,
            "div",
            Some(&caption_id(CaptionKey::Label(def.id))),
            Some(def.label),
        )?;
        dom::set_class(&label, "label", true);
        dom::append(&captions, &label)?;
    }
    dom::append(&root, &captions)?;

    dom::append(&body, &root)?;

    for entry in minimap_entries() {
        let ui = ui.clone();
        dom::add_click_listener(document, &jump_id(entry.id), move || {
            apply(&ui, OverlayAction::Jump(entry.id));
        });
    }
    {
        let ui = ui.clone();
        dom::add_click_listener(document, COLLAB_BUTTON_ID, move || {
            apply(&ui, OverlayAction::Collaborate);
        });
    }
    {
        let ui = ui.clone();
        dom::add_toggle_listener(document, THEME_TOGGLE_ID, move |checked| {
            apply(&ui, OverlayAction::SetDark(checked));
        });
    }
    {
        let ui = ui.clone();
        dom::add_toggle_listener(document, MUSIC_TOGGLE_ID, move |checked| {
            apply(&ui, OverlayAction::SetMusic(checked));
        });
    }

    sync(document, &ui.borrow());
    log::info!("[overlay] mounted");
    Ok(())
}

/// Reflect `ui` into the DOM: active mini-map entry, theme class, toggles.
pub fn sync(document: &web::Document, ui: &UiState) {
    for entry in minimap_entries() {
        if let Some(el) = document.get_element_by_id(&jump_id(entry.id)) {
            let active = ui.selected() == Some(entry.id);
            dom::set_class(&el, ACTIVE_CLASS, active);
            _ = el.set_attribute("aria-current", if active { "true" } else { "false" });
        }
    }
    if let Some(root) = document.document_element() {
        dom::set_class(&root, DARK_CLASS, ui.dark());
    }
    set_checked(document, THEME_TOGGLE_ID, ui.dark());
    set_checked(document, MUSIC_TOGGLE_ID, ui.music_on());
}

fn set_checked(document: &web::Document, id: &str, checked: bool) {
    use wasm_bindgen::JsCast;
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        if input.checked() != checked {
            input.set_checked(checked);
        }
    }
}

/// Move each caption to its projected position; captions behind the camera
/// are hidden.
pub fn place_captions(document: &web::Document, scene: &Scene, viewport: Vec2) {
    let placed = scene.screen_captions(viewport.x, viewport.y);
    for caption in scene.captions() {
        let Some(el) = document.get_element_by_id(&caption_id(caption.key)) else {
            continue;
        };
        match placed.iter().find(|p| p.key == caption.key) {
            Some(p) => {
                let style = format!(
                    "left:{:.1}px;top:{:.1}px;transform:translate(-50%,-50%) scale({:.3})",
                    p.pos.x, p.pos.y, p.scale
                );
                _ = el.set_attribute("style", &style);
            }
            None => {
                _ = el.set_attribute("style", "display:none");
            }
        }
    }
}

/// Replace the scene with a static message when the GPU is unavailable.
pub fn show_fallback(document: &web::Document, detail: &str) {
    log::error!("[gpu] {}", detail);
    let el = match document.get_element_by_id(FALLBACK_ID) {
        Some(el) => el,
        None => {
            let Ok(el) = dom::create_element(document, "div", Some(FALLBACK_ID), None) else {
                return;
            };
            if let Some(body) = document.body() {
                _ = dom::append(&body, &el);
            }
            el
        }
    };
    el.set_text_content(Some(FALLBACK_MESSAGE));
    dom::set_class(&el, HIDDEN_CLASS, false);
    if let Some(canvas) = document.get_element_by_id(CANVAS_ID) {
        dom::set_class(&canvas, HIDDEN_CLASS, true);
    }
}
