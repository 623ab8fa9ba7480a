use glam::Vec3;
use multiverse_core::draw;
use multiverse_core::geometry::MeshKind;
use multiverse_core::*;

fn scene() -> Scene {
    Scene::new(SceneConfig {
        seed: Some(42),
        ..SceneConfig::default()
    })
}

fn ray(origin: Vec3, toward: Vec3) -> Ray {
    Ray {
        origin,
        dir: (toward - origin).normalize(),
    }
}

#[test]
fn update_order_runs_camera_after_animation() {
    assert_eq!(
        UPDATE_ORDER,
        [
            UpdateStage::Nodes,
            UpdateStage::Connections,
            UpdateStage::Starfield,
            UpdateStage::Sparkles,
            UpdateStage::FollowCamera,
            UpdateStage::OrbitControls,
        ]
    );
}

#[test]
fn mount_builds_every_layer() {
    let s = scene();
    assert_eq!(s.nodes.len(), 5);
    assert_eq!(s.connections.lines.len(), 4);
    assert_eq!(s.starfield.points.len(), 3000);
    assert_eq!(s.sparkles.points.len(), 400);
    assert_eq!(s.rig.camera.eye, Vec3::new(0.0, 2.0, 10.0));
    assert!((s.rig.camera.fovy_radians - 55f32.to_radians()).abs() < 1e-6);
    assert_eq!(s.env.fog_near, 40.0);
    assert_eq!(s.env.fog_far, 120.0);
}

#[test]
fn tick_advances_clock_and_ignores_bad_deltas() {
    let mut s = scene();
    let ui = UiState::new();
    s.tick(0.5, &ui);
    s.tick(-1.0, &ui);
    s.tick(f32::NAN, &ui);
    assert_eq!(s.clock.elapsed(), 0.5);
    assert_eq!(s.clock.frame(), 3);
    assert!((s.connections.offset + 0.2).abs() < 1e-6);
    assert!((s.sparkles.rotation_y - 0.01).abs() < 1e-6);
}

#[test]
fn picking_returns_nearest_node() {
    let s = scene();
    // straight down -Z through collab, hub and projects
    let r = ray(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
    assert_eq!(s.pick(&r), Some(NodeId::Collab));
    let r = ray(Vec3::new(0.0, 0.0, -20.0), Vec3::ZERO);
    assert_eq!(s.pick(&r), Some(NodeId::Projects));
    let r = ray(Vec3::new(0.0, 30.0, 0.0), Vec3::new(0.0, 31.0, 0.0));
    assert_eq!(s.pick(&r), None);
}

#[test]
fn hover_enters_and_leaves() {
    let mut s = scene();
    let over_skills = ray(Vec3::new(8.0, 0.0, 20.0), Vec3::new(8.0, 0.0, 0.0));
    let change = s.pointer_move(&over_skills);
    assert_eq!(change.entered, Some(NodeId::Skills));
    assert_eq!(change.left, None);
    assert!(s.node(NodeId::Skills).hovered);
    assert!(s.pointer_move(&over_skills).is_empty());

    let nowhere = ray(Vec3::new(8.0, 30.0, 20.0), Vec3::new(8.0, 40.0, 0.0));
    let change = s.pointer_move(&nowhere);
    assert_eq!(change.left, Some(NodeId::Skills));
    assert!(!s.node(NodeId::Skills).hovered);
    assert_eq!(s.hovered(), None);
}

#[test]
fn minimap_jump_matches_in_scene_click() {
    let mut a = scene();
    let mut b = scene();
    let mut ui_a = UiState::new();
    let mut ui_b = UiState::new();

    ui_a.apply(OverlayAction::Jump(NodeId::Collab));
    let r = ray(b.rig.camera.eye, NodeId::Collab.def().position);
    assert_eq!(b.click(&r, &mut ui_b), Some(NodeId::Collab));
    assert_eq!(ui_a.selected(), ui_b.selected());

    for _ in 0..90 {
        a.tick(1.0 / 60.0, &ui_a);
        b.tick(1.0 / 60.0, &ui_b);
    }
    assert_eq!(a.rig.camera.eye, b.rig.camera.eye);
    assert_eq!(a.rig.camera.target, Vec3::new(0.0, 0.0, 8.0));
}

#[test]
fn clicking_empty_space_keeps_selection() {
    let s = scene();
    let mut ui = UiState::new();
    ui.select(NodeId::Now);
    let r = ray(Vec3::new(0.0, 50.0, 0.0), Vec3::new(0.0, 60.0, 0.0));
    assert_eq!(s.click(&r, &mut ui), None);
    assert_eq!(ui.selected(), Some(NodeId::Now));
}

#[test]
fn screen_ray_through_center_looks_at_target() {
    let mut s = scene();
    s.set_viewport(800.0, 600.0);
    let r = s.screen_ray(400.0, 300.0, 800.0, 600.0);
    assert!(r.dir.dot(s.rig.camera.forward()) > 0.9999);
}

#[test]
fn captions_project_with_distance_scaling() {
    let mut s = scene();
    s.set_viewport(1000.0, 500.0);
    let captions = s.captions();
    assert_eq!(captions.len(), 5);
    assert_eq!(captions[0].key, CaptionKey::Intro);
    assert!(captions
        .iter()
        .all(|c| c.key != CaptionKey::Label(NodeId::Hub)));

    let screen = s.screen_captions(1000.0, 500.0);
    assert_eq!(screen.len(), 5);
    let intro = &screen[0];
    assert_eq!(intro.scale, 1.0);
    assert!((intro.pos.x - 500.0).abs() < 1e-2);
    assert!(intro.pos.y > 250.0);
    let eye = s.rig.camera.eye;
    for c in &screen[1..] {
        let CaptionKey::Label(id) = c.key else {
            panic!("unexpected caption {:?}", c.key);
        };
        let want = 8.0 / eye.distance(s.node(id).position);
        assert!((c.scale - want).abs() < 1e-5);
    }
    // nearer labels render larger
    let scale_of = |id| screen.iter().find(|c| c.key == CaptionKey::Label(id)).unwrap().scale;
    assert!(scale_of(NodeId::Collab) > scale_of(NodeId::Projects));
}

#[test]
fn draw_packing_covers_every_layer() {
    let mut s = scene();
    s.tick(0.25, &UiState::new());

    assert_eq!(std::mem::size_of::<draw::Globals>(), 256);
    assert_eq!(std::mem::size_of::<draw::PointInstance>(), 48);
    assert_eq!(std::mem::size_of::<draw::LineVertex>(), 28);
    assert_eq!(std::mem::size_of::<draw::MeshInstance>(), 160);

    let batches = draw::mesh_batches(&s);
    let total: usize = batches.iter().map(|b| b.instances.len()).sum();
    assert_eq!(total, 8);
    let cluster = batches
        .iter()
        .find(|b| b.mesh == MeshKind::Sphere { segments: 32 })
        .unwrap();
    assert_eq!(cluster.instances.len(), 3);

    assert_eq!(draw::point_instances(&s).len(), 3400);

    let mut lines = Vec::new();
    draw::connection_vertices(&s, &mut lines);
    assert!(!lines.is_empty());
    assert_eq!(lines.len() % 2, 0);

    let g = draw::globals(&s);
    assert_eq!(g.fog_time[0], 40.0);
    assert_eq!(g.fog_time[2], 0.25);
    assert_eq!(g.camera_pos[3], 1.0);
}

#[test]
fn every_selection_retargets_the_camera_in_one_tick() {
    for id in NodeId::ALL {
        let mut s = scene();
        let mut ui = UiState::new();
        ui.select(id);
        s.tick(1.0 / 60.0, &ui);
        assert_eq!(s.rig.follow_target(), id.def().position, "{}", id);
        assert_eq!(s.rig.desired_eye(), desired_eye(id.def().position), "{}", id);
        assert_eq!(s.rig.camera.target, id.def().position, "{}", id);
    }
}

#[test]
fn star_fade_selects_soft_points() {
    let mut s = scene();
    let soft = draw::point_instances(&s);
    assert!(soft.iter().all(|p| p.soft == 1.0));

    s.starfield.params.fade = false;
    let points = draw::point_instances(&s);
    let (stars, sparkles) = points.split_at(s.starfield.points.len());
    assert!(stars.iter().all(|p| p.soft == 0.0 && p.layer == 0.0));
    assert!(sparkles.iter().all(|p| p.soft == 1.0 && p.layer == 1.0));
}

#[test]
fn normals_stay_perpendicular_under_non_uniform_scale() {
    use glam::{Mat4, Quat};
    let model = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 0.8, 1.0),
        Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        Vec3::new(8.0, 0.0, 0.0),
    );
    let n = Vec3::new(1.0, 1.0, 0.0).normalize();
    let t = Vec3::new(1.0, -1.0, 0.0).normalize();
    let world_t = model.transform_vector3(t);
    let world_n = draw::normal_matrix(model) * n;
    assert!(world_n.normalize().dot(world_t.normalize()).abs() < 1e-5);

    // the plain model matrix skews the same normal
    let skewed = model.transform_vector3(n);
    assert!(skewed.normalize().dot(world_t.normalize()).abs() > 1e-2);

    let uniform = Mat4::from_rotation_y(0.7);
    let r = draw::normal_matrix(uniform) * n;
    assert!((r - uniform.transform_vector3(n)).length() < 1e-5);
}
