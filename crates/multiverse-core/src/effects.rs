//! Ambient point clouds: the distant starfield and the rotating sparkle shell.
//!
//! Both are generated once at mount from a caller-supplied RNG. Point
//! positions are never touched afterwards; animation lives in a single
//! rotation angle (sparkles) or a global size multiplier (stars).

use crate::color::{hex_rgb, hsl_to_rgb};
use crate::constants::*;
use glam::{Mat4, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug)]
pub struct PointSprite {
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 3], // sRGB
    pub opacity: f32,
}

/// Point at radius `r` with a direction uniform over the sphere.
///
/// The polar angle comes from `acos(2u - 1)`; sampling it uniformly in
/// `[0, pi]` would bunch points at the poles.
pub fn uniform_sphere_point<R: Rng + ?Sized>(rng: &mut R, r: f32) -> Vec3 {
    let phi = rng.gen::<f32>() * TAU;
    let theta = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * theta.sin() * phi.cos(),
        r * theta.cos(),
        r * theta.sin() * phi.sin(),
    )
}

#[derive(Clone, Debug)]
pub struct SparkleField {
    pub points: Vec<PointSprite>,
    pub rotation_y: f32,
}

impl SparkleField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate_n(rng, SPARKLE_COUNT)
    }

    pub fn generate_n<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let color = hex_rgb(SPARKLE_COLOR);
        let points = (0..count)
            .map(|_| {
                let r = SPARKLE_INNER_RADIUS + rng.gen::<f32>() * SPARKLE_SHELL_DEPTH;
                PointSprite {
                    position: uniform_sphere_point(rng, r),
                    size: SPARKLE_SIZE,
                    color,
                    opacity: SPARKLE_OPACITY,
                }
            })
            .collect();
        Self {
            points,
            rotation_y: 0.0,
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        self.rotation_y = elapsed * SPARKLE_ROTATION_RATE;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StarfieldParams {
    pub radius: f32,
    pub depth: f32,
    pub count: usize,
    pub factor: f32,
    pub saturation: f32,
    pub fade: bool,
    pub speed: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            radius: STAR_RADIUS,
            depth: STAR_DEPTH,
            count: STAR_COUNT,
            factor: STAR_FACTOR,
            saturation: STAR_SATURATION,
            fade: true,
            speed: STAR_SPEED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Starfield {
    pub params: StarfieldParams,
    pub points: Vec<PointSprite>,
    pub twinkle: f32,
}

impl Starfield {
    /// Stars start at `radius + depth` and step inward by a random fraction of
    /// `depth / count` each, so the shell thins toward `radius`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: StarfieldParams) -> Self {
        let count = params.count.max(1);
        let increment = params.depth / count as f32;
        let mut r = params.radius + params.depth;
        let points = (0..params.count)
            .map(|i| {
                r -= increment * rng.gen::<f32>();
                let position = uniform_sphere_point(rng, r);
                let color = hsl_to_rgb(i as f32 / count as f32, params.saturation, STAR_LIGHTNESS);
                PointSprite {
                    position,
                    size: (0.5 + 0.5 * rng.gen::<f32>()) * params.factor,
                    color,
                    opacity: 1.0,
                }
            })
            .collect();
        Self {
            params,
            points,
            twinkle: twinkle(0.0, params.speed),
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        self.twinkle = twinkle(elapsed, self.params.speed);
    }
}

/// Global star size multiplier, in `[2/3, 4/3]`.
#[inline]
pub fn twinkle(elapsed: f32, speed: f32) -> f32 {
    (3.0 + (elapsed * speed + 100.0).sin()) / 3.0
}

/// Fraction of sphere-uniform points expected with polar angle below `theta`.
#[inline]
pub fn polar_cdf(theta: f32) -> f32 {
    (1.0 - theta.clamp(0.0, PI).cos()) * 0.5
}
