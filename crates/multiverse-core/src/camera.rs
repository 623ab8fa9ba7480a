//! Damped follow camera with a user orbit layer on the same transform.
//!
//! Each frame the follow stage pulls the eye toward `target + CAMERA_OFFSET`
//! and re-aims at the target; the orbit stage then applies damped
//! rotate/zoom input around the same target. How the two layers share the
//! eye is decided by [`OrbitArbitration`]; under the default policy wheel
//! zoom also rescales the follow offset so the follow stage keeps the new
//! distance.

use crate::constants::*;
use crate::state::Camera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrbitArbitration {
    /// Skip the follow lerp while a drag is in progress, and let wheel zoom
    /// rescale the follow offset.
    #[default]
    SuspendFollowWhileDragging,
    /// Both layers write the eye every frame, follow first. Zoom is pulled
    /// back to the fixed offset by the follow lerp.
    Shared,
}

#[inline]
pub fn desired_eye(target: Vec3) -> Vec3 {
    target + CAMERA_OFFSET
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    dragging: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_pan: false,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            damping: ORBIT_DAMPING,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            dragging: false,
        }
    }
}

impl OrbitControls {
    pub fn begin_drag(&mut self) {
        if self.enabled {
            self.dragging = true;
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Queue a rotation from a pointer delta in pixels.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx_px / h * self.rotate_speed;
        self.delta_phi -= TAU * dy_px / h * self.rotate_speed;
    }

    /// Distance multiplier for one wheel notch; 1.0 when zoom is ignored.
    pub fn zoom_factor(&self, wheel_delta: f32) -> f32 {
        if !self.enabled || wheel_delta == 0.0 {
            return 1.0;
        }
        let step = 0.95_f32.powf(self.zoom_speed);
        if wheel_delta < 0.0 {
            step
        } else {
            1.0 / step
        }
    }

    /// Wheel zoom; negative `wheel_delta` dollies in.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.scale *= self.zoom_factor(wheel_delta);
    }

    /// Whether queued input still moves the camera noticeably.
    pub fn is_settling(&self) -> bool {
        self.delta_theta.abs() > 1e-5 || self.delta_phi.abs() > 1e-5 || self.scale != 1.0
    }

    /// Apply one damped step of queued input, orbiting `camera.eye` around `pivot`.
    pub fn update(&mut self, camera: &mut Camera, pivot: Vec3) {
        if !self.is_settling() {
            camera.look_at(pivot);
            return;
        }
        let offset = camera.eye - pivot;
        let radius = offset.length();
        if radius > f32::EPSILON && self.enabled {
            let mut theta = offset.x.atan2(offset.z);
            let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
            theta += self.delta_theta * self.damping;
            phi += self.delta_phi * self.damping;
            phi = phi.clamp(ORBIT_POLE_EPSILON, PI - ORBIT_POLE_EPSILON);
            let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
            let sin_phi = phi.sin();
            let new_offset = Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
            camera.eye = pivot + new_offset;
        }
        self.delta_theta *= 1.0 - self.damping;
        self.delta_phi *= 1.0 - self.damping;
        self.scale = 1.0;
        camera.look_at(pivot);
    }
}

/// Follow controller owning the single camera transform.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub arbitration: OrbitArbitration,
    follow_target: Vec3,
    dolly: f32,
}

impl CameraRig {
    pub fn new(arbitration: OrbitArbitration) -> Self {
        Self {
            camera: Camera::default(),
            orbit: OrbitControls::default(),
            arbitration,
            follow_target: Vec3::ZERO,
            dolly: 1.0,
        }
    }

    #[inline]
    pub fn follow_target(&self) -> Vec3 {
        self.follow_target
    }

    /// User zoom applied to the follow offset.
    #[inline]
    pub fn dolly(&self) -> f32 {
        self.dolly
    }

    #[inline]
    pub fn desired_eye(&self) -> Vec3 {
        self.follow_target + CAMERA_OFFSET * self.dolly
    }

    /// Wheel zoom through the rig. The orbit layer dollies the eye; under
    /// [`OrbitArbitration::SuspendFollowWhileDragging`] the follow offset is
    /// scaled by the same factor, clamped to the orbit distance limits.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let factor = self.orbit.zoom_factor(wheel_delta);
        self.orbit.zoom(wheel_delta);
        if self.arbitration == OrbitArbitration::SuspendFollowWhileDragging {
            let base = CAMERA_OFFSET.length();
            self.dolly = (self.dolly * factor).clamp(
                self.orbit.min_distance / base,
                self.orbit.max_distance / base,
            );
        }
    }

    pub fn set_follow_target(&mut self, target: Vec3) {
        self.follow_target = target;
    }

    fn follow_suspended(&self) -> bool {
        self.arbitration == OrbitArbitration::SuspendFollowWhileDragging
            && self.orbit.is_dragging()
    }

    /// Follow stage: position lags the target, orientation snaps to it.
    pub fn follow(&mut self) {
        if !self.follow_suspended() {
            let desired = self.desired_eye();
            self.camera.eye = self.camera.eye.lerp(desired, CAMERA_FOLLOW_LERP);
        }
        self.camera.look_at(self.follow_target);
    }

    /// Orbit stage, run after [`CameraRig::follow`] in the same frame.
    pub fn apply_orbit(&mut self) {
        let pivot = self.follow_target;
        self.orbit.update(&mut self.camera, pivot);
    }

    #[inline]
    pub fn distance_to_desired(&self) -> f32 {
        self.camera.eye.distance(self.desired_eye())
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(OrbitArbitration::default())
    }
}
