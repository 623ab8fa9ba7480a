use multiverse_core::effects::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

#[test]
fn sparkles_fill_the_shell() {
    let mut rng = StdRng::seed_from_u64(11);
    let field = SparkleField::generate(&mut rng);
    assert_eq!(field.points.len(), 400);
    for p in &field.points {
        let r = p.position.length();
        assert!(r >= 18.0 - 1e-3 && r <= 58.0 + 1e-3, "r = {}", r);
    }
}

#[test]
fn sphere_directions_are_uniform_in_cos_theta() {
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 20_000;
    let field = SparkleField::generate_n(&mut rng, n);
    let mut bins = [0usize; 10];
    let mut near_pole = 0usize;
    let cap = 0.1 * PI;
    for p in &field.points {
        let cos_theta = p.position.y / p.position.length();
        let bin = (((cos_theta + 1.0) * 0.5 * 10.0) as usize).min(9);
        bins[bin] += 1;
        if cos_theta.clamp(-1.0, 1.0).acos() < cap {
            near_pole += 1;
        }
    }
    let expected = n / 10;
    for (i, b) in bins.iter().enumerate() {
        let dev = (*b as f32 - expected as f32).abs() / expected as f32;
        assert!(dev < 0.1, "bin {} has {}", i, b);
    }
    let frac = near_pole as f32 / n as f32;
    assert!((polar_cdf(cap) - 0.0245).abs() < 1e-3);
    assert!((frac - polar_cdf(cap)).abs() < 0.006, "pole fraction {}", frac);
}

#[test]
fn sparkle_rotation_tracks_elapsed_time() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = SparkleField::generate_n(&mut rng, 4);
    field.update(50.0);
    assert!((field.rotation_y - 1.0).abs() < 1e-6);
    let before: Vec<_> = field.points.iter().map(|p| p.position).collect();
    field.update(75.0);
    let after: Vec<_> = field.points.iter().map(|p| p.position).collect();
    assert_eq!(before, after);

    let p = field.points[0].position;
    let rotated = field.model_matrix().transform_point3(p);
    assert!((rotated.length() - p.length()).abs() < 1e-3);
    assert!((rotated.y - p.y).abs() < 1e-4);
}

#[test]
fn starfield_shell_and_twinkle() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut stars = Starfield::generate(&mut rng, StarfieldParams::default());
    assert_eq!(stars.points.len(), 3000);
    for s in &stars.points {
        let r = s.position.length();
        assert!(r >= 80.0 - 1e-2 && r <= 130.0 + 1e-2, "r = {}", r);
        assert!(s.size >= 2.0 && s.size <= 4.0);
    }
    for i in 0..200 {
        stars.update(i as f32 * 0.37);
        assert!(stars.twinkle >= 2.0 / 3.0 - 1e-6 && stars.twinkle <= 4.0 / 3.0 + 1e-6);
    }
    assert!((twinkle(0.0, 0.5) - (3.0 + 100f32.sin()) / 3.0).abs() < 1e-6);
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = SparkleField::generate(&mut StdRng::seed_from_u64(99));
    let b = SparkleField::generate(&mut StdRng::seed_from_u64(99));
    let pa: Vec<_> = a.points.iter().map(|p| p.position).collect();
    let pb: Vec<_> = b.points.iter().map(|p| p.position).collect();
    assert_eq!(pa, pb);
}
