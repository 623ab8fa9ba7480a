//! Dashed hub-to-node connections with a flowing dash offset.

use crate::constants::{DASH_FLOW_RATE, DASH_SIZE, GAP_SIZE};
use crate::nodes::{hub, satellites, NodeId};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
pub struct Connection {
    pub to: NodeId,
    pub from_pos: Vec3,
    pub to_pos: Vec3,
}

impl Connection {
    #[inline]
    pub fn length(&self) -> f32 {
        self.from_pos.distance(self.to_pos)
    }
}

/// One connection per non-hub node, starting at the hub.
pub fn connections() -> Vec<Connection> {
    let h = hub();
    satellites()
        .map(|n| Connection {
            to: n.id,
            from_pos: h.position,
            to_pos: n.position,
        })
        .collect()
}

/// Dash offset at `elapsed` seconds; decreases linearly so dashes flow outward.
#[inline]
pub fn dash_offset(elapsed: f32) -> f32 {
    -elapsed * DASH_FLOW_RATE
}

pub type DashSegments = SmallVec<[(Vec3, Vec3); 32]>;

/// Visible dash sub-segments of `from -> to` for a given offset, ordered from
/// `from` to `to`. A point at distance `d` along the line is lit when
/// `(d + offset) mod (dash + gap) < dash`.
pub fn dash_segments(from: Vec3, to: Vec3, offset: f32) -> DashSegments {
    let mut out = DashSegments::new();
    let len = from.distance(to);
    if len <= f32::EPSILON {
        return out;
    }
    let dir = (to - from) / len;
    let period = DASH_SIZE + GAP_SIZE;
    let phase = offset.rem_euclid(period);
    // first dash start at or before 0 along the line
    let mut start = -phase;
    while start < len {
        let a = start.max(0.0);
        let b = (start + DASH_SIZE).min(len);
        if b > a {
            out.push((from + dir * a, from + dir * b));
        }
        start += period;
    }
    out
}

/// Per-frame connection state: the shared dash offset for all lines.
#[derive(Clone, Debug)]
pub struct ConnectionLines {
    pub lines: Vec<Connection>,
    pub offset: f32,
}

impl Default for ConnectionLines {
    fn default() -> Self {
        Self {
            lines: connections(),
            offset: 0.0,
        }
    }
}

impl ConnectionLines {
    pub fn update(&mut self, elapsed: f32) {
        self.offset = dash_offset(elapsed);
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.lines
            .iter()
            .flat_map(move |c| dash_segments(c.from_pos, c.to_pos, self.offset))
    }
}
