pub mod camera;
pub mod clock;
pub mod color;
pub mod connections;
pub mod constants;
pub mod draw;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod nodes;
pub mod overlay;
pub mod picking;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod state;
pub mod visual;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use clock::*;
pub use error::*;
pub use nodes::*;
pub use overlay::*;
pub use scene::*;
pub use state::*;
pub use visual::*;
