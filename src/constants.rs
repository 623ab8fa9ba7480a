/// Web front-end tuning and DOM ids.
///
/// Scene tuning lives in `multiverse_core::constants`; this module only holds
/// what the browser shell needs.
// Pointer travel (CSS px) before a press turns into an orbit drag
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

// Wheel deltas smaller than this are treated as noise
pub const WHEEL_DEADZONE: f32 = 0.5;

// Element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const FALLBACK_ID: &str = "fallback";
pub const OVERLAY_ID: &str = "overlay";
pub const MINIMAP_ID: &str = "minimap";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const MUSIC_TOGGLE_ID: &str = "music-toggle";
pub const COLLAB_BUTTON_ID: &str = "collab-cta";
pub const CAPTION_LAYER_ID: &str = "captions";

// Class names toggled from Rust
pub const DARK_CLASS: &str = "dark";
pub const ACTIVE_CLASS: &str = "active";
pub const HOVER_CLASS: &str = "hovering";
pub const HIDDEN_CLASS: &str = "hidden";

pub const FALLBACK_MESSAGE: &str =
    "This page needs WebGPU. Try a recent Chrome, Edge or Safari Technology Preview.";
