//! Overlay model: the 2D controls around the scene and the actions they emit.
//! Frontends render these however they like; every action funnels through
//! [`UiState::apply`].

use crate::nodes::{NodeId, NODES};
use crate::state::UiState;

pub const DOCUMENT_TITLE: &str = "Multiverse Neural Portfolio | Full‑stack Dev";
pub const HEADER_NAME: &str = "Your Name";
pub const HEADER_TAGLINE: &str = "Full‑stack Dev | ML Enthusiast | Web3 Learner";
pub const MINIMAP_HEADING: &str = "Quick Jump";
pub const COLLABORATE_LABEL: &str = "Let’s Collaborate";
pub const THEME_TOGGLE_LABEL: &str = "Theme";
pub const MUSIC_TOGGLE_LABEL: &str = "Music";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiniMapEntry {
    pub id: NodeId,
    pub label: &'static str,
    pub aria_label: String,
}

/// One jump button per node, in registry order.
pub fn minimap_entries() -> Vec<MiniMapEntry> {
    NODES
        .iter()
        .map(|n| MiniMapEntry {
            id: n.id,
            label: n.label,
            aria_label: format!("Jump to {}", n.label),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    Jump(NodeId),
    SetDark(bool),
    SetMusic(bool),
    Collaborate,
}

impl UiState {
    /// Apply an overlay action; returns whether any state changed.
    pub fn apply(&mut self, action: OverlayAction) -> bool {
        match action {
            OverlayAction::Jump(id) => self.select(id),
            OverlayAction::Collaborate => self.select(NodeId::Collab),
            OverlayAction::SetDark(dark) => self.set_dark(dark),
            OverlayAction::SetMusic(on) => self.set_music(on),
        }
    }
}
