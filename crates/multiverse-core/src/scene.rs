//! Scene root: environment, nodes, connections, ambient fields, captions and
//! the camera rig, advanced by one explicit per-frame driver.

use crate::camera::{CameraRig, OrbitArbitration};
use crate::clock::AnimationClock;
use crate::color::hex_rgb;
use crate::connections::ConnectionLines;
use crate::constants::*;
use crate::effects::{SparkleField, Starfield, StarfieldParams};
use crate::nodes::{NodeId, NODES};
use crate::picking::{pick_node, HoverChange, HoverTracker};
use crate::state::{Ray, UiState};
use crate::visual::NodeVisual;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, Default)]
pub struct SceneConfig {
    pub arbitration: OrbitArbitration,
    /// Fixed RNG seed for the ambient fields; `None` uses the thread RNG.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Environment {
    pub background: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient: f32,
    pub lights: [PointLight; 2],
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            background: hex_rgb(BACKGROUND_COLOR),
            fog_color: hex_rgb(BACKGROUND_COLOR),
            fog_near: FOG_NEAR,
            fog_far: FOG_FAR,
            ambient: AMBIENT_INTENSITY,
            lights: [
                PointLight {
                    position: Vec3::new(5.0, 5.0, 5.0),
                    color: hex_rgb(0x88ccff),
                    intensity: 1.2,
                },
                PointLight {
                    position: Vec3::new(-6.0, -3.0, -4.0),
                    color: hex_rgb(0xff99ff),
                    intensity: 0.8,
                },
            ],
        }
    }
}

pub const INTRO_LINES: [&str; 2] = [
    "Hey 👋 Interested in some fresh tech talks and collabs?….🙂",
    "I’m a developer with a curious mind and a passion for creating things that make a difference...",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptionKey {
    Intro,
    Label(NodeId),
}

/// Text anchored at a world position, resolved each frame.
#[derive(Clone, Debug)]
pub struct CaptionPlacement {
    pub key: CaptionKey,
    pub world: Vec3,
    /// Screen-space scale; node labels shrink with distance.
    pub distance_factor: Option<f32>,
}

#[derive(Clone, Copy, Debug)]
pub struct ScreenCaption {
    pub key: CaptionKey,
    pub pos: Vec2,
    pub scale: f32,
}

/// Per-frame update callbacks, run in this order by [`Scene::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStage {
    Nodes,
    Connections,
    Starfield,
    Sparkles,
    FollowCamera,
    OrbitControls,
}

/// Follow must run after node updates, and orbit after follow, since the
/// latter two write the same camera transform.
pub const UPDATE_ORDER: [UpdateStage; 6] = [
    UpdateStage::Nodes,
    UpdateStage::Connections,
    UpdateStage::Starfield,
    UpdateStage::Sparkles,
    UpdateStage::FollowCamera,
    UpdateStage::OrbitControls,
];

pub struct Scene {
    pub env: Environment,
    pub clock: AnimationClock,
    pub nodes: Vec<NodeVisual>,
    pub connections: ConnectionLines,
    pub starfield: Starfield,
    pub sparkles: SparkleField,
    pub rig: CameraRig,
    hover: HoverTracker,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_rng(config, &mut StdRng::seed_from_u64(seed)),
            None => Self::with_rng(config, &mut rand::thread_rng()),
        }
    }

    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let starfield = Starfield::generate(rng, StarfieldParams::default());
        let sparkles = SparkleField::generate(rng);
        log::info!(
            "[scene] mounted: {} nodes, {} stars, {} sparkles",
            NODES.len(),
            starfield.points.len(),
            sparkles.points.len()
        );
        Self {
            env: Environment::default(),
            clock: AnimationClock::new(),
            nodes: NODES.iter().map(NodeVisual::new).collect(),
            connections: ConnectionLines::default(),
            starfield,
            sparkles,
            rig: CameraRig::new(config.arbitration),
            hover: HoverTracker::default(),
        }
    }

    pub fn node(&self, id: NodeId) -> &NodeVisual {
        &self.nodes[id.index()]
    }

    /// Advance one rendered frame.
    pub fn tick(&mut self, dt_sec: f32, ui: &UiState) {
        self.clock.advance(dt_sec);
        for stage in UPDATE_ORDER {
            self.run_stage(stage, ui);
        }
    }

    fn run_stage(&mut self, stage: UpdateStage, ui: &UiState) {
        let t = self.clock.elapsed();
        match stage {
            UpdateStage::Nodes => {
                for n in &mut self.nodes {
                    n.update(t);
                }
            }
            UpdateStage::Connections => self.connections.update(t),
            UpdateStage::Starfield => self.starfield.update(t),
            UpdateStage::Sparkles => self.sparkles.update(t),
            UpdateStage::FollowCamera => {
                self.rig.set_follow_target(ui.focus().def().position);
                self.rig.follow();
            }
            UpdateStage::OrbitControls => self.rig.apply_orbit(),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.rig.camera.set_viewport(width, height);
    }

    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> Ray {
        self.rig.camera.screen_ray(sx, sy, width, height)
    }

    pub fn pick(&self, ray: &Ray) -> Option<NodeId> {
        pick_node(ray, &self.nodes)
    }

    /// Pointer moved: update hover flags from the nearest hit.
    pub fn pointer_move(&mut self, ray: &Ray) -> HoverChange {
        let hit = self.pick(ray);
        self.set_hovered(hit)
    }

    pub fn set_hovered(&mut self, hit: Option<NodeId>) -> HoverChange {
        let change = self.hover.update(hit);
        if let Some(id) = change.left {
            self.nodes[id.index()].set_hovered(false);
        }
        if let Some(id) = change.entered {
            self.nodes[id.index()].set_hovered(true);
            log::debug!("[hover] {}", id);
        }
        change
    }

    #[inline]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hover.current()
    }

    /// In-scene click: selects the nearest node under the ray, if any.
    pub fn click(&self, ray: &Ray, ui: &mut UiState) -> Option<NodeId> {
        let hit = self.pick(ray)?;
        ui.select(hit);
        Some(hit)
    }

    pub fn captions(&self) -> Vec<CaptionPlacement> {
        let mut out = vec![CaptionPlacement {
            key: CaptionKey::Intro,
            world: INTRO_CAPTION_ANCHOR,
            distance_factor: None,
        }];
        out.extend(
            self.nodes
                .iter()
                .filter(|n| n.id != NodeId::Hub)
                .map(|n| CaptionPlacement {
                    key: CaptionKey::Label(n.id),
                    world: n.position,
                    distance_factor: Some(LABEL_DISTANCE_FACTOR),
                }),
        );
        out
    }

    /// Captions projected into a `width` x `height` viewport; captions behind
    /// the camera are omitted.
    pub fn screen_captions(&self, width: f32, height: f32) -> Vec<ScreenCaption> {
        let cam = &self.rig.camera;
        self.captions()
            .into_iter()
            .filter_map(|c| {
                let pos = cam.project_to_screen(c.world, width, height)?;
                let scale = match c.distance_factor {
                    Some(f) => f / cam.eye.distance(c.world).max(1e-3),
                    None => 1.0,
                };
                Some(ScreenCaption {
                    key: c.key,
                    pos,
                    scale,
                })
            })
            .collect()
    }
}
