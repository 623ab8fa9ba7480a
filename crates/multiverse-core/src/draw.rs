//! Packs scene state into the plain-old-data layouts the renderer uploads.

use crate::color::{hex_rgb, linear_rgb};
use crate::constants::{CONNECTION_COLOR, CONNECTION_OPACITY, STAR_WORLD_SIZE};
use crate::effects::PointSprite;
use crate::geometry::MeshKind;
use crate::scene::Scene;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub fog_color: [f32; 4],
    /// near, far, elapsed, sparkle rotation
    pub fog_time: [f32; 4],
    /// ambient rgb * intensity, star twinkle
    pub ambient: [f32; 4],
    pub light_pos: [[f32; 4]; 2],
    pub light_color: [[f32; 4]; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    /// inverse-transpose of the model's upper 3x3, columns padded to vec4
    pub normal: [[f32; 4]; 3],
    /// linear rgb, opacity
    pub color: [f32; 4],
    /// linear rgb, intensity
    pub emissive: [f32; 4],
    /// roughness, metalness, transmission, unused
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    /// 1 for sparkles (rotated and fixed size), 0 for twinkling stars
    pub layer: f32,
    /// 1 for a soft radial falloff, 0 for a hard-edged disc
    pub soft: f32,
    pub _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

/// Mesh instances grouped by the mesh they draw.
#[derive(Clone, Debug)]
pub struct MeshBatch {
    pub mesh: MeshKind,
    pub instances: Vec<MeshInstance>,
}

pub fn globals(scene: &Scene) -> Globals {
    let cam = &scene.rig.camera;
    let env = &scene.env;
    let amb = linear_rgb([1.0, 1.0, 1.0]).map(|c| c * env.ambient);
    let light = |i: usize| {
        let l = &env.lights[i];
        let c = linear_rgb(l.color).map(|c| c * l.intensity);
        (l.position.extend(1.0).to_array(), [c[0], c[1], c[2], 1.0])
    };
    let (p0, c0) = light(0);
    let (p1, c1) = light(1);
    let fog = linear_rgb(env.fog_color);
    Globals {
        view: cam.view_matrix().to_cols_array_2d(),
        proj: cam.projection_matrix().to_cols_array_2d(),
        camera_pos: cam.eye.extend(1.0).to_array(),
        fog_color: [fog[0], fog[1], fog[2], 1.0],
        fog_time: [
            env.fog_near,
            env.fog_far,
            scene.clock.elapsed(),
            scene.sparkles.rotation_y,
        ],
        ambient: [amb[0], amb[1], amb[2], scene.starfield.twinkle],
        light_pos: [p0, p1],
        light_color: [c0, c1],
    }
}

/// Matrix that carries object-space normals to world space under `model`,
/// including non-uniform scale. Degenerate models fall back to the rotation
/// part as-is.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(model);
    if m.determinant().abs() < 1e-12 {
        return m;
    }
    m.inverse().transpose()
}

fn padded_columns(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

/// Instances for every node part, batched by mesh kind in first-seen order.
pub fn mesh_batches(scene: &Scene) -> Vec<MeshBatch> {
    let mut batches: Vec<MeshBatch> = Vec::new();
    for node in &scene.nodes {
        for (model, part) in node.part_matrices() {
            let m = &part.material;
            let c = linear_rgb(m.color);
            let e = linear_rgb(m.emissive);
            let inst = MeshInstance {
                model: model.to_cols_array_2d(),
                normal: padded_columns(normal_matrix(model)),
                color: [c[0], c[1], c[2], m.effective_opacity()],
                emissive: [e[0], e[1], e[2], m.emissive_intensity],
                params: [m.roughness, m.metalness, m.transmission, 0.0],
            };
            match batches.iter_mut().find(|b| b.mesh == part.mesh) {
                Some(b) => b.instances.push(inst),
                None => batches.push(MeshBatch {
                    mesh: part.mesh,
                    instances: vec![inst],
                }),
            }
        }
    }
    batches
}

fn pack_point(p: &PointSprite, size: f32, layer: f32, soft: bool) -> PointInstance {
    let c = linear_rgb(p.color);
    PointInstance {
        pos: p.position.to_array(),
        size,
        color: [c[0], c[1], c[2], p.opacity],
        layer,
        soft: if soft { 1.0 } else { 0.0 },
        _pad: [0.0; 2],
    }
}

/// Static point instances; generated once and uploaded at mount.
pub fn point_instances(scene: &Scene) -> Vec<PointInstance> {
    let fade = scene.starfield.params.fade;
    let stars = scene
        .starfield
        .points
        .iter()
        .map(|p| pack_point(p, p.size * STAR_WORLD_SIZE, 0.0, fade));
    let sparkles = scene
        .sparkles
        .points
        .iter()
        .map(|p| pack_point(p, p.size, 1.0, true));
    stars.chain(sparkles).collect()
}

/// Line-list vertices for the visible dashes this frame.
pub fn connection_vertices(scene: &Scene, out: &mut Vec<LineVertex>) {
    out.clear();
    let c = linear_rgb(hex_rgb(CONNECTION_COLOR));
    let color = [c[0], c[1], c[2], CONNECTION_OPACITY];
    let vertex = |p: Vec3| LineVertex {
        pos: p.to_array(),
        color,
    };
    for (a, b) in scene.connections.segments() {
        out.push(vertex(a));
        out.push(vertex(b));
    }
}
