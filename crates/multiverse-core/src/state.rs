//! Camera description and the user-facing UI state shared by both frontends.
//!
//! These types avoid platform-specific APIs. The web frontend holds the
//! [`UiState`] behind an `Rc<RefCell<_>>` so DOM callbacks and the frame loop
//! observe the same selection; the native frontend owns it directly.

use crate::constants::{CAMERA_FOV_DEGREES, CAMERA_START, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::nodes::NodeId;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_START,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// World-space ray with a normalized direction.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a pixel of a `width` x `height` viewport.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> Ray {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize_or_zero(),
        }
    }

    /// Pixel position of a world point, or `None` when it is behind the camera.
    pub fn project_to_screen(&self, world: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

/// Selection plus the two overlay toggles. Each field has exactly one
/// mutation entry point; `revision` moves only on an actual change.
#[derive(Clone, Debug)]
pub struct UiState {
    selected: Option<NodeId>,
    dark: bool,
    music_on: bool,
    revision: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected: Some(NodeId::Hub),
            dark: true,
            music_on: false,
            revision: 0,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Node the camera follows; an empty selection falls back to the hub.
    #[inline]
    pub fn focus(&self) -> NodeId {
        self.selected.unwrap_or(NodeId::Hub)
    }

    #[inline]
    pub fn dark(&self) -> bool {
        self.dark
    }

    #[inline]
    pub fn music_on(&self) -> bool {
        self.music_on
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns whether the selection changed.
    pub fn select(&mut self, id: NodeId) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        log::info!("[select] {} -> {}", self.focus(), id);
        self.selected = Some(id);
        self.revision += 1;
        true
    }

    pub fn set_dark(&mut self, dark: bool) -> bool {
        if self.dark == dark {
            return false;
        }
        log::info!("[theme] dark={}", dark);
        self.dark = dark;
        self.revision += 1;
        true
    }

    pub fn set_music(&mut self, on: bool) -> bool {
        if self.music_on == on {
            return false;
        }
        log::info!("[music] on={} (no audio output is wired)", on);
        self.music_on = on;
        self.revision += 1;
        true
    }
}
