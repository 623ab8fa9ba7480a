// Follow camera and orbit layer behaviour on a headless scene.

use glam::Vec3;
use multiverse_core::constants::{CAMERA_OFFSET, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE};
use multiverse_core::*;

fn scene() -> Scene {
    Scene::new(SceneConfig {
        seed: Some(7),
        ..SceneConfig::default()
    })
}

#[test]
fn follow_distance_decays_geometrically() {
    let mut s = scene();
    let mut ui = UiState::new();
    ui.select(NodeId::Skills);
    s.rig.set_follow_target(NodeId::Skills.def().position);
    let mut prev = s.rig.distance_to_desired();
    for _ in 0..50 {
        s.tick(1.0 / 60.0, &ui);
        let d = s.rig.distance_to_desired();
        assert!(d <= 0.95 * prev + 1e-4, "{} > 0.95 * {}", d, prev);
        prev = d;
    }
}

#[test]
fn selecting_projects_settles_behind_and_above_it() {
    let mut s = scene();
    let mut ui = UiState::new();
    assert!(ui.apply(OverlayAction::Jump(NodeId::Projects)));
    for _ in 0..240 {
        s.tick(1.0 / 60.0, &ui);
    }
    let cam = &s.rig.camera;
    let expected = Vec3::new(0.0, 1.5, 0.0);
    assert!(cam.eye.distance(expected) < 0.01, "eye {:?}", cam.eye);
    assert_eq!(cam.target, Vec3::new(0.0, 0.0, -8.0));
    let look = cam.forward();
    let want = Vec3::new(0.0, -1.5, -8.0).normalize();
    assert!(look.dot(want) > 0.9999);
}

#[test]
fn reselecting_the_same_node_keeps_the_trajectory() {
    let mut a = scene();
    let mut b = scene();
    let mut ui_a = UiState::new();
    let mut ui_b = UiState::new();
    ui_a.select(NodeId::Now);
    ui_b.select(NodeId::Now);
    for i in 0..60 {
        if i % 7 == 0 {
            assert!(!ui_b.select(NodeId::Now));
        }
        a.tick(0.016, &ui_a);
        b.tick(0.016, &ui_b);
    }
    assert_eq!(a.rig.camera.eye, b.rig.camera.eye);
}

#[test]
fn empty_selection_follows_the_hub() {
    let rig = CameraRig::default();
    assert_eq!(rig.desired_eye(), Vec3::new(0.0, 1.5, 8.0));
    assert_eq!(desired_eye(Vec3::new(8.0, 0.0, 0.0)), Vec3::new(8.0, 1.5, 8.0));
}

#[test]
fn dragging_suspends_follow_by_default() {
    let mut rig = CameraRig::default();
    rig.set_follow_target(Vec3::new(-8.0, 0.0, 0.0));
    rig.orbit.begin_drag();
    let before = rig.camera.eye;
    rig.follow();
    assert_eq!(rig.camera.eye, before);
    rig.orbit.end_drag();
    rig.follow();
    assert_ne!(rig.camera.eye, before);
}

#[test]
fn shared_arbitration_keeps_following_during_drag() {
    let mut rig = CameraRig::new(OrbitArbitration::Shared);
    rig.set_follow_target(Vec3::new(-8.0, 0.0, 0.0));
    rig.orbit.begin_drag();
    let before = rig.distance_to_desired();
    rig.follow();
    assert!(rig.distance_to_desired() < before);
}

#[test]
fn orbit_rotation_preserves_radius() {
    let mut rig = CameraRig::default();
    let pivot = rig.follow_target();
    let r0 = rig.camera.eye.distance(pivot);
    let start = rig.camera.eye;
    rig.orbit.begin_drag();
    rig.orbit.rotate(120.0, 0.0, 800.0);
    for _ in 0..30 {
        rig.apply_orbit();
    }
    assert!((rig.camera.eye.distance(pivot) - r0).abs() < 1e-3);
    assert!(rig.camera.eye.distance(start) > 0.1);
    assert_eq!(rig.camera.target, pivot);
}

#[test]
fn orbit_never_flips_over_the_pole() {
    let mut rig = CameraRig::default();
    rig.orbit.rotate(0.0, 50_000.0, 800.0);
    for _ in 0..100 {
        rig.apply_orbit();
    }
    let offset = rig.camera.eye - rig.follow_target();
    assert!(offset.y > 0.0);
    assert!(offset.x.hypot(offset.z) > 1e-3);
}

#[test]
fn zoom_is_clamped_to_distance_limits() {
    let mut rig = CameraRig::default();
    for _ in 0..200 {
        rig.orbit.zoom(-1.0);
        rig.apply_orbit();
    }
    let d = rig.camera.eye.distance(rig.follow_target());
    assert!((d - ORBIT_MIN_DISTANCE).abs() < 1e-3, "near {}", d);

    for _ in 0..400 {
        rig.orbit.zoom(1.0);
        rig.apply_orbit();
    }
    let d = rig.camera.eye.distance(rig.follow_target());
    assert!((d - ORBIT_MAX_DISTANCE).abs() < 1e-2, "far {}", d);
}

#[test]
fn orbit_input_decays_to_rest() {
    let mut orbit = OrbitControls::default();
    let mut cam = Camera::default();
    orbit.rotate(40.0, 10.0, 600.0);
    assert!(orbit.is_settling());
    for _ in 0..400 {
        orbit.update(&mut cam, Vec3::ZERO);
    }
    assert!(!orbit.is_settling());
}

#[test]
fn disabled_orbit_ignores_input() {
    let mut orbit = OrbitControls::default();
    orbit.enabled = false;
    orbit.rotate(100.0, 100.0, 600.0);
    orbit.zoom(-1.0);
    orbit.begin_drag();
    assert!(!orbit.is_settling());
    assert!(!orbit.is_dragging());
}

fn settled_distance_after_zoom(arbitration: OrbitArbitration) -> (f32, f32) {
    let mut s = Scene::new(SceneConfig {
        seed: Some(7),
        arbitration,
        ..SceneConfig::default()
    });
    let ui = UiState::new();
    for _ in 0..240 {
        s.tick(1.0 / 60.0, &ui);
    }
    let start = s.rig.camera.eye.distance(s.rig.follow_target());
    for _ in 0..20 {
        s.rig.zoom(-1.0);
        s.tick(1.0 / 60.0, &ui);
    }
    for _ in 0..120 {
        s.tick(1.0 / 60.0, &ui);
    }
    (start, s.rig.camera.eye.distance(s.rig.follow_target()))
}

#[test]
fn wheel_zoom_persists_against_follow() {
    let (start, end) = settled_distance_after_zoom(OrbitArbitration::default());
    let expected = start * 0.95_f32.powf(0.6 * 20.0);
    assert!((end - expected).abs() < 0.05, "{} vs {}", end, expected);
}

#[test]
fn shared_arbitration_lets_follow_undo_zoom() {
    let (start, end) = settled_distance_after_zoom(OrbitArbitration::Shared);
    assert!((end - start).abs() < 0.05, "{} vs {}", end, start);
}

#[test]
fn follow_offset_dolly_is_clamped() {
    let mut rig = CameraRig::default();
    for _ in 0..500 {
        rig.zoom(-1.0);
    }
    let near = rig.desired_eye().distance(rig.follow_target());
    assert!((near - ORBIT_MIN_DISTANCE).abs() < 1e-3, "near {}", near);
    for _ in 0..1000 {
        rig.zoom(1.0);
    }
    let far = rig.desired_eye().distance(rig.follow_target());
    assert!((far - ORBIT_MAX_DISTANCE).abs() < 1e-2, "far {}", far);
    assert!((rig.dolly() * CAMERA_OFFSET.length() - far).abs() < 1e-2);
}
