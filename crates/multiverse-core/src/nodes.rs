//! Static registry of the five portfolio nodes.

use crate::color::hex_rgb;
use crate::constants::NODE_DISTANCE;
use crate::error::ParseNodeIdError;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Hub,
    Skills,
    Projects,
    Now,
    Collab,
}

impl NodeId {
    /// Registry order; the mini-map lists nodes in this order.
    pub const ALL: [NodeId; 5] = [
        NodeId::Hub,
        NodeId::Skills,
        NodeId::Projects,
        NodeId::Now,
        NodeId::Collab,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::Hub => "hub",
            NodeId::Skills => "skills",
            NodeId::Projects => "projects",
            NodeId::Now => "now",
            NodeId::Collab => "collab",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static NodeDef {
        &NODES[self.index()]
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseNodeIdError(s.to_string()))
    }
}

#[derive(Clone, Debug)]
pub struct NodeDef {
    pub id: NodeId,
    pub position: Vec3,
    pub color: [f32; 3], // sRGB
    pub label: &'static str,
}

pub static NODES: [NodeDef; 5] = [
    NodeDef {
        id: NodeId::Hub,
        position: Vec3::ZERO,
        color: hex_rgb(0x77e2ff),
        label: "Welcome",
    },
    NodeDef {
        id: NodeId::Skills,
        position: Vec3::new(NODE_DISTANCE, 0.0, 0.0),
        color: hex_rgb(0x00ffff),
        label: "Skills",
    },
    NodeDef {
        id: NodeId::Projects,
        position: Vec3::new(0.0, 0.0, -NODE_DISTANCE),
        color: hex_rgb(0xff88ff),
        label: "Projects",
    },
    NodeDef {
        id: NodeId::Now,
        position: Vec3::new(-NODE_DISTANCE, 0.0, 0.0),
        color: hex_rgb(0xa78bfa),
        label: "Now Building",
    },
    NodeDef {
        id: NodeId::Collab,
        position: Vec3::new(0.0, 0.0, NODE_DISTANCE),
        color: hex_rgb(0x64ffda),
        label: "Collaborate",
    },
];

#[inline]
pub fn node(id: NodeId) -> &'static NodeDef {
    id.def()
}

#[inline]
pub fn hub() -> &'static NodeDef {
    node(NodeId::Hub)
}

/// Every node except the hub, in registry order.
pub fn satellites() -> impl Iterator<Item = &'static NodeDef> {
    NODES.iter().filter(|n| n.id != NodeId::Hub)
}
