// Host-side tests for pointer gesture tracking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use constants::DRAG_THRESHOLD_PX;
use glam::Vec2;
use input::*;

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut t = DragTracker::default();
    t.press(Vec2::new(100.0, 50.0));
    assert!(t.is_pressed());
    assert_eq!(t.move_to(Vec2::new(101.0, 51.0)), None);
    let at = Vec2::new(101.0, 51.0);
    assert_eq!(t.release(at), Release::Click(at));
    assert!(!t.is_pressed());
}

#[test]
fn crossing_the_threshold_starts_a_drag() {
    let mut t = DragTracker::default();
    t.press(Vec2::ZERO);
    let far = Vec2::new(DRAG_THRESHOLD_PX + 2.0, 0.0);
    // first delta reports the full travel since the press
    assert_eq!(t.move_to(far), Some(far));
    assert!(t.is_dragging());
    assert_eq!(
        t.move_to(far + Vec2::new(0.0, 3.0)),
        Some(Vec2::new(0.0, 3.0))
    );
    assert_eq!(t.release(Vec2::ZERO), Release::DragEnd);
    assert!(!t.is_dragging());
}

#[test]
fn moves_without_a_press_are_ignored() {
    let mut t = DragTracker::default();
    assert_eq!(t.move_to(Vec2::new(300.0, 300.0)), None);
    assert_eq!(t.release(Vec2::ZERO), Release::Idle);
}

#[test]
fn cancel_drops_the_gesture() {
    let mut t = DragTracker::default();
    t.press(Vec2::ZERO);
    t.move_to(Vec2::new(50.0, 0.0));
    t.cancel();
    assert!(!t.is_pressed());
    assert_eq!(t.release(Vec2::ZERO), Release::Idle);
}

#[test]
fn local_position_subtracts_element_origin() {
    let p = local_position(Vec2::new(120.0, 80.0), Vec2::new(20.0, 30.0));
    assert_eq!(p, Vec2::new(100.0, 50.0));
}
