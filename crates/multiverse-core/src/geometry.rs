//! Triangle meshes for the node shapes, centred on the origin with +Y up.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, pos: [f32; 3], normal: [f32; 3]) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(MeshVertex { pos, normal });
        i
    }
}

/// Mesh primitives used by the node shapes. Parameters are fixed per kind so
/// the renderer can cache one GPU mesh per variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Sphere { segments: u32 },
    Prism { sides: u32 },
    Cone { segments: u32 },
}

impl MeshKind {
    /// Unit-sized mesh: sphere radius 1, prism radius 1 height 1, cone radius 1 height 1.
    /// Instances scale it to their dimensions.
    pub fn build(self) -> Mesh {
        match self {
            MeshKind::Sphere { segments } => uv_sphere(1.0, segments, segments),
            MeshKind::Prism { sides } => cylinder(1.0, 1.0, sides),
            MeshKind::Cone { segments } => cone(1.0, 1.0, segments),
        }
    }
}

pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = Mesh::default();
    for y in 0..=hs {
        let v = y as f32 / hs as f32;
        let phi = v * PI;
        for x in 0..=ws {
            let u = x as f32 / ws as f32;
            let theta = u * TAU;
            let n = [
                -theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            ];
            mesh.push([n[0] * radius, n[1] * radius, n[2] * radius], n);
        }
    }
    let row = ws + 1;
    for y in 0..hs {
        for x in 0..ws {
            let a = y * row + x;
            let b = a + row;
            let c = b + 1;
            let d = a + 1;
            if y != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if y != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Flat-sided cylinder; with few sides this is a prism.
pub fn cylinder(radius: f32, height: f32, sides: u32) -> Mesh {
    let sides = sides.max(3);
    let half = height * 0.5;
    let mut mesh = Mesh::default();
    for i in 0..sides {
        let a0 = i as f32 / sides as f32 * TAU;
        let a1 = (i + 1) as f32 / sides as f32 * TAU;
        let mid = (a0 + a1) * 0.5;
        let n = [mid.sin(), 0.0, mid.cos()];
        let p0 = [radius * a0.sin(), radius * a0.cos()];
        let p1 = [radius * a1.sin(), radius * a1.cos()];
        let b0 = mesh.push([p0[0], -half, p0[1]], n);
        let b1 = mesh.push([p1[0], -half, p1[1]], n);
        let t1 = mesh.push([p1[0], half, p1[1]], n);
        let t0 = mesh.push([p0[0], half, p0[1]], n);
        mesh.indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
    }
    cap(&mut mesh, radius, half, sides, 1.0);
    cap(&mut mesh, radius, -half, sides, -1.0);
    mesh
}

/// Cone with its apex at `+height/2` and base at `-height/2`.
pub fn cone(radius: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = radius / height;
    let mut mesh = Mesh::default();
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let mid = (a0 + a1) * 0.5;
        let normal = |a: f32| {
            let n = [a.sin(), slope, a.cos()];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            [n[0] / len, n[1] / len, n[2] / len]
        };
        let b0 = mesh.push([radius * a0.sin(), -half, radius * a0.cos()], normal(a0));
        let b1 = mesh.push([radius * a1.sin(), -half, radius * a1.cos()], normal(a1));
        let apex = mesh.push([0.0, half, 0.0], normal(mid));
        mesh.indices.extend_from_slice(&[b0, b1, apex]);
    }
    cap(&mut mesh, radius, -half, segments, -1.0);
    mesh
}

fn cap(mesh: &mut Mesh, radius: f32, y: f32, sides: u32, facing: f32) {
    let n = [0.0, facing, 0.0];
    let center = mesh.push([0.0, y, 0.0], n);
    let first = mesh.vertices.len() as u32;
    for i in 0..sides {
        let a = i as f32 / sides as f32 * TAU;
        mesh.push([radius * a.sin(), y, radius * a.cos()], n);
    }
    for i in 0..sides {
        let a = first + i;
        let b = first + (i + 1) % sides;
        if facing > 0.0 {
            mesh.indices.extend_from_slice(&[center, a, b]);
        } else {
            mesh.indices.extend_from_slice(&[center, b, a]);
        }
    }
}
