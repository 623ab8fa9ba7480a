//! Per-node visuals: an enum-keyed shape table plus the shared hover / bob /
//! spin animation every node runs each frame.

use crate::color::hex_rgb;
use crate::constants::*;
use crate::geometry::MeshKind;
use crate::nodes::{NodeDef, NodeId};
use glam::{Mat4, Quat, Vec3};
use smallvec::{smallvec, SmallVec};
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub transmission: f32,
}

impl Material {
    fn standard(color: u32) -> Self {
        Self {
            color: hex_rgb(color),
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            transmission: 0.0,
        }
    }

    fn glow(mut self, emissive: u32, intensity: f32) -> Self {
        self.emissive = hex_rgb(emissive);
        self.emissive_intensity = intensity;
        self
    }

    fn finish(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    /// Opacity the renderer should use once transmission is folded in.
    pub fn effective_opacity(&self) -> f32 {
        (self.opacity * (1.0 - 0.6 * self.transmission)).clamp(0.0, 1.0)
    }
}

/// One mesh placed inside a node's local frame.
#[derive(Clone, Debug)]
pub struct ShapePart {
    pub mesh: MeshKind,
    pub size: Vec3,
    pub offset: Vec3,
    pub rotation: Quat,
    pub material: Material,
}

impl ShapePart {
    fn new(mesh: MeshKind, size: Vec3, material: Material) -> Self {
        Self {
            mesh,
            size,
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            material,
        }
    }

    fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.size, self.rotation, self.offset)
    }
}

/// Idle animation a shape runs inside its node group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdleMotion {
    None,
    /// Uniform scale `1 + sin(rate * t) * amplitude`.
    Breathe { rate: f32, amplitude: f32 },
    /// Yaw `rate * t` radians.
    Yaw { rate: f32 },
}

impl IdleMotion {
    pub fn transform(self, elapsed: f32) -> Mat4 {
        match self {
            IdleMotion::None => Mat4::IDENTITY,
            IdleMotion::Breathe { rate, amplitude } => {
                Mat4::from_scale(Vec3::splat(1.0 + (elapsed * rate).sin() * amplitude))
            }
            IdleMotion::Yaw { rate } => Mat4::from_rotation_y(elapsed * rate),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    HexPrism,
    Cluster,
    Hourglass,
    GlassSphere,
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub parts: SmallVec<[ShapePart; 3]>,
    pub idle: IdleMotion,
    /// Radius of the sphere enclosing all parts at scale 1.
    pub bounds: f32,
}

const SPHERE_SEGMENTS: u32 = 48;
const CLUSTER_SEGMENTS: u32 = 32;
const CONE_SEGMENTS: u32 = 48;

fn hub_sphere() -> Shape {
    let mat = Material::standard(0x77e2ff)
        .glow(0x2ec5ff, 1.2)
        .finish(0.25, 0.2);
    Shape {
        kind: ShapeKind::Sphere,
        parts: smallvec![ShapePart::new(
            MeshKind::Sphere { segments: 64 },
            Vec3::splat(1.2),
            mat
        )],
        idle: IdleMotion::Breathe {
            rate: HUB_BREATH_RATE,
            amplitude: HUB_BREATH_AMPLITUDE,
        },
        bounds: 1.2 * (1.0 + HUB_BREATH_AMPLITUDE),
    }
}

fn hex_prism() -> Shape {
    let mat = Material::standard(0x00ffff)
        .glow(0x00ccff, 0.8)
        .finish(0.3, 0.3);
    Shape {
        kind: ShapeKind::HexPrism,
        parts: smallvec![ShapePart::new(
            MeshKind::Prism { sides: 6 },
            Vec3::new(1.0, 0.8, 1.0),
            mat
        )
        .rotated(Quat::from_rotation_x(FRAC_PI_2))],
        idle: IdleMotion::None,
        bounds: (1.0_f32 + 0.4 * 0.4).sqrt(),
    }
}

fn project_cluster() -> Shape {
    let mat = Material::standard(0xff88ff).glow(0xff55ff, 0.8);
    let ball = |offset: Vec3| {
        ShapePart::new(
            MeshKind::Sphere {
                segments: CLUSTER_SEGMENTS,
            },
            Vec3::splat(0.35),
            mat,
        )
        .at(offset)
    };
    let offsets = [
        Vec3::new(0.9, 0.0, 0.0),
        Vec3::new(-0.9, 0.3, -0.2),
        Vec3::new(0.2, -0.7, 0.4),
    ];
    let bounds = offsets
        .iter()
        .map(|o| o.length() + 0.35)
        .fold(0.0_f32, f32::max);
    Shape {
        kind: ShapeKind::Cluster,
        parts: offsets.into_iter().map(ball).collect(),
        idle: IdleMotion::Yaw {
            rate: CLUSTER_YAW_RATE,
        },
        bounds,
    }
}

fn hourglass() -> Shape {
    let mut mat = Material::standard(0xa78bfa).glow(0xa78bfa, 0.6);
    mat.opacity = 0.85;
    let cone = ShapePart::new(
        MeshKind::Cone {
            segments: CONE_SEGMENTS,
        },
        Vec3::new(0.9, 1.0, 0.9),
        mat,
    );
    Shape {
        kind: ShapeKind::Hourglass,
        parts: smallvec![
            cone.clone().at(Vec3::new(0.0, 0.5, 0.0)),
            cone.at(Vec3::new(0.0, -0.5, 0.0))
                .rotated(Quat::from_rotation_x(PI)),
        ],
        idle: IdleMotion::None,
        bounds: (0.9_f32 * 0.9 + 1.0).sqrt(),
    }
}

fn glass_sphere() -> Shape {
    let mut mat = Material::standard(0x64ffda).finish(0.1, 0.0);
    mat.transmission = 0.9;
    Shape {
        kind: ShapeKind::GlassSphere,
        parts: smallvec![ShapePart::new(
            MeshKind::Sphere {
                segments: SPHERE_SEGMENTS
            },
            Vec3::ONE,
            mat
        )],
        idle: IdleMotion::None,
        bounds: 1.0,
    }
}

/// Shape construction table keyed by node id.
pub fn shape_for(id: NodeId) -> Shape {
    let build: fn() -> Shape = match id {
        NodeId::Hub => hub_sphere,
        NodeId::Skills => hex_prism,
        NodeId::Projects => project_cluster,
        NodeId::Now => hourglass,
        NodeId::Collab => glass_sphere,
    };
    build()
}

/// Nodes that continuously spin about +Y.
#[inline]
pub fn spins(id: NodeId) -> bool {
    matches!(id, NodeId::Skills | NodeId::Projects)
}

/// Animated group transform for one node.
#[derive(Clone, Debug)]
pub struct NodeVisual {
    pub id: NodeId,
    pub base: Vec3,
    pub shape: Shape,
    pub hovered: bool,
    pub scale: f32,
    pub yaw: f32,
    pub position: Vec3,
    idle: Mat4,
}

impl NodeVisual {
    pub fn new(def: &NodeDef) -> Self {
        Self {
            id: def.id,
            base: def.position,
            shape: shape_for(def.id),
            hovered: false,
            scale: IDLE_SCALE,
            yaw: 0.0,
            position: def.position,
            idle: Mat4::IDENTITY,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    #[inline]
    pub fn target_scale(&self) -> f32 {
        if self.hovered {
            HOVER_SCALE
        } else {
            IDLE_SCALE
        }
    }

    /// One frame of the shared node animation.
    pub fn update(&mut self, elapsed: f32) {
        self.scale += (self.target_scale() - self.scale) * SCALE_LERP;
        self.position = Vec3::new(
            self.base.x,
            self.base.y + (elapsed + self.base.x).sin() * BOB_AMPLITUDE,
            self.base.z,
        );
        if spins(self.id) {
            self.yaw += SPIN_PER_FRAME;
        }
        self.idle = self.shape.idle.transform(elapsed);
    }

    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.yaw),
            self.position,
        )
    }

    /// World matrices of every part, in shape order.
    pub fn part_matrices(&self) -> impl Iterator<Item = (Mat4, &ShapePart)> + '_ {
        let parent = self.group_matrix() * self.idle;
        self.shape
            .parts
            .iter()
            .map(move |p| (parent * p.local_matrix(), p))
    }

    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.shape.bounds * self.scale
    }
}
