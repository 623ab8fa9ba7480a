use glam::Vec3;
use multiverse_core::connections::*;
use multiverse_core::{hub, NodeId};

fn lit(d: f32, offset: f32) -> bool {
    (d + offset).rem_euclid(0.5) < 0.3
}

#[test]
fn one_line_from_hub_to_each_satellite() {
    let lines = connections();
    assert_eq!(lines.len(), 4);
    for c in &lines {
        assert_eq!(c.from_pos, hub().position);
        assert_eq!(c.to_pos, c.to.def().position);
        assert_ne!(c.to, NodeId::Hub);
        assert!((c.length() - 8.0).abs() < 1e-6);
    }
}

#[test]
fn dashes_lie_on_the_line_and_respect_dash_size() {
    let from = Vec3::ZERO;
    let to = Vec3::new(8.0, 0.0, 0.0);
    for offset in [0.0_f32, -0.1, -0.37, -3.3] {
        let segs = dash_segments(from, to, offset);
        assert!(!segs.is_empty());
        let mut total = 0.0;
        for (a, b) in &segs {
            assert!(a.y == 0.0 && b.y == 0.0 && a.z == 0.0 && b.z == 0.0);
            assert!(a.x >= 0.0 && b.x <= 8.0 + 1e-5 && a.x < b.x);
            assert!(b.x - a.x <= 0.3 + 1e-5);
            total += b.x - a.x;
        }
        assert!((total - 4.8).abs() < 1e-3, "offset {} lit {}", offset, total);
    }
}

#[test]
fn dash_pattern_matches_offset_rule() {
    let from = Vec3::ZERO;
    let to = Vec3::new(0.0, 0.0, -8.0);
    let offset = dash_offset(1.3);
    let segs = dash_segments(from, to, offset);
    // sample away from dash edges
    for i in 0..160 {
        let d = i as f32 * 0.05 + 0.025;
        let phase = (d + offset).rem_euclid(0.5);
        if (phase - 0.3).abs() < 1e-3 || phase < 1e-3 || phase > 0.5 - 1e-3 {
            continue;
        }
        let covered = segs.iter().any(|(a, b)| {
            let (da, db) = (-a.z, -b.z);
            d >= da && d <= db
        });
        assert_eq!(covered, lit(d, offset), "d = {}", d);
    }
}

#[test]
fn offset_flows_at_constant_rate() {
    assert_eq!(dash_offset(0.0), 0.0);
    assert!((dash_offset(10.0) + 4.0).abs() < 1e-6);
    let mut lines = ConnectionLines::default();
    lines.update(2.5);
    assert!((lines.offset + 1.0).abs() < 1e-6);
    assert!(lines.segments().count() >= 4 * 15);
}
