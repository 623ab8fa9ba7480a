// Pointer gesture tracking with no browser dependencies.

use crate::constants::DRAG_THRESHOLD_PX;
use glam::Vec2;

/// Outcome of releasing the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// Press and release without leaving the drag threshold.
    Click(Vec2),
    /// The press turned into an orbit drag.
    DragEnd,
    /// No press was active.
    Idle,
}

/// Separates clicks from orbit drags on the canvas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragTracker {
    origin: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

impl DragTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.origin = Some(pos);
        self.last = pos;
        self.dragging = false;
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer delta to feed the orbit controls, once the press has become a
    /// drag. The move that crosses the threshold reports the full travel
    /// since the press.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Vec2> {
        let origin = self.origin?;
        if !self.dragging {
            if origin.distance(pos) <= DRAG_THRESHOLD_PX {
                return None;
            }
            self.dragging = true;
            self.last = origin;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn release(&mut self, pos: Vec2) -> Release {
        let outcome = match self.origin {
            None => Release::Idle,
            Some(_) if self.dragging => Release::DragEnd,
            Some(_) => Release::Click(pos),
        };
        self.cancel();
        outcome
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.dragging = false;
    }
}

/// Pointer position relative to an element's top-left corner.
#[inline]
pub fn local_position(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}
