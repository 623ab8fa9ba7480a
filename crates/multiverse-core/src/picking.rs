use crate::nodes::NodeId;
use crate::state::Ray;
use crate::visual::NodeVisual;
use glam::Vec3;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t = -b - sq;
    if t >= 0.0 {
        return Some(t);
    }
    // origin inside the sphere: take the exit point
    let t = -b + sq;
    (t >= 0.0).then_some(t)
}

/// Nearest node whose hit sphere the ray crosses. Only the nearest hit
/// counts, so a node in front shields the ones behind it.
pub fn pick_node(ray: &Ray, nodes: &[NodeVisual]) -> Option<NodeId> {
    let mut best = None::<(NodeId, f32)>;
    for n in nodes {
        if let Some(t) = ray_sphere(ray.origin, ray.dir, n.position, n.hit_radius()) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((n.id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}

/// Enter/leave transition produced by a pointer move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub entered: Option<NodeId>,
    pub left: Option<NodeId>,
}

impl HoverChange {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entered.is_none() && self.left.is_none()
    }
}

/// Tracks which node the pointer is over and emits enter/leave pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    current: Option<NodeId>,
}

impl HoverTracker {
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn update(&mut self, hit: Option<NodeId>) -> HoverChange {
        if hit == self.current {
            return HoverChange::default();
        }
        let change = HoverChange {
            entered: hit,
            left: self.current,
        };
        self.current = hit;
        change
    }
}
