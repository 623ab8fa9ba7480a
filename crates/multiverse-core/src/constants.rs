use glam::Vec3;

// Shared scene tuning constants used by both web and native frontends.

// Scene layout
pub const NODE_DISTANCE: f32 = 8.0; // distance of every satellite node from the hub

// Node animation
pub const HOVER_SCALE: f32 = 1.08; // target scale while the pointer is over a node
pub const IDLE_SCALE: f32 = 1.0;
pub const SCALE_LERP: f32 = 0.1; // per-frame approach factor toward the target scale
pub const BOB_AMPLITUDE: f32 = 0.2; // vertical bob in world units
pub const SPIN_PER_FRAME: f32 = 0.01; // radians added per frame for spinning nodes
pub const HUB_BREATH_RATE: f32 = 2.0;
pub const HUB_BREATH_AMPLITUDE: f32 = 0.04;
pub const CLUSTER_YAW_RATE: f32 = 0.4; // radians per second

// Connections
pub const DASH_FLOW_RATE: f32 = 0.4; // dash offset units per second
pub const DASH_SIZE: f32 = 0.3;
pub const GAP_SIZE: f32 = 0.2;
pub const CONNECTION_COLOR: u32 = 0x7dd3fc;
pub const CONNECTION_OPACITY: f32 = 0.85;

// Starfield
pub const STAR_RADIUS: f32 = 80.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_COUNT: usize = 3000;
pub const STAR_FACTOR: f32 = 4.0;
pub const STAR_SATURATION: f32 = 0.0;
pub const STAR_LIGHTNESS: f32 = 0.9;
pub const STAR_SPEED: f32 = 0.5; // twinkle time multiplier
pub const STAR_WORLD_SIZE: f32 = 0.08; // world units per unit of star size

// Sparkle field
pub const SPARKLE_COUNT: usize = 400;
pub const SPARKLE_INNER_RADIUS: f32 = 18.0;
pub const SPARKLE_SHELL_DEPTH: f32 = 40.0; // outer radius = inner + depth
pub const SPARKLE_ROTATION_RATE: f32 = 0.02; // radians per second about +Y
pub const SPARKLE_SIZE: f32 = 0.04;
pub const SPARKLE_COLOR: u32 = 0xf5d142;
pub const SPARKLE_OPACITY: f32 = 0.8;

// Camera
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 8.0); // above and behind the target
pub const CAMERA_FOLLOW_LERP: f32 = 0.05;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 2.0, 10.0);
pub const CAMERA_FOV_DEGREES: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Orbit control
pub const ORBIT_ROTATE_SPEED: f32 = 0.6;
pub const ORBIT_ZOOM_SPEED: f32 = 0.6;
pub const ORBIT_DAMPING: f32 = 0.08;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;
pub const ORBIT_POLE_EPSILON: f32 = 1e-3;

// Environment
pub const BACKGROUND_COLOR: u32 = 0x020617;
pub const FOG_NEAR: f32 = 40.0;
pub const FOG_FAR: f32 = 120.0;
pub const AMBIENT_INTENSITY: f32 = 0.25;

// Captions
pub const INTRO_CAPTION_ANCHOR: Vec3 = Vec3::new(0.0, -2.2, 0.0);
pub const LABEL_DISTANCE_FACTOR: f32 = 8.0;
