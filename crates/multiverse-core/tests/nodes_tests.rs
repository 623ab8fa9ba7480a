use glam::Vec3;
use multiverse_core::*;

#[test]
fn registry_has_five_nodes_in_plus_layout() {
    assert_eq!(NODES.len(), 5);
    for (i, n) in NODES.iter().enumerate() {
        assert_eq!(n.id.index(), i);
        assert_eq!(n.id.def().label, n.label);
    }
    assert_eq!(hub().position, Vec3::ZERO);
    for n in satellites() {
        assert!((n.position.length() - 8.0).abs() < 1e-6, "{}", n.id);
        assert_eq!(n.position.y, 0.0);
    }
    assert_eq!(satellites().count(), 4);
}

#[test]
fn node_ids_parse_and_display() {
    for id in NodeId::ALL {
        let parsed: NodeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
    assert_eq!("collab".parse::<NodeId>().unwrap(), NodeId::Collab);
    let err = "about".parse::<NodeId>().unwrap_err();
    assert_eq!(err.to_string(), "unknown node id `about`");
}

#[test]
fn selection_starts_on_hub_and_is_idempotent() {
    let mut ui = UiState::new();
    assert_eq!(ui.selected(), Some(NodeId::Hub));
    assert_eq!(ui.revision(), 0);

    assert!(!ui.select(NodeId::Hub));
    assert_eq!(ui.revision(), 0);

    for id in NodeId::ALL.into_iter().skip(1) {
        assert!(ui.select(id));
        assert_eq!(ui.selected(), Some(id));
        assert_eq!(ui.focus(), id);
    }
    let rev = ui.revision();
    assert!(!ui.select(NodeId::Collab));
    assert_eq!(ui.revision(), rev);
}

#[test]
fn toggles_bump_revision_only_on_change() {
    let mut ui = UiState::new();
    assert!(ui.dark());
    assert!(!ui.music_on());
    assert!(!ui.set_dark(true));
    assert!(ui.set_dark(false));
    assert!(!ui.dark());
    assert!(ui.set_music(true));
    assert!(ui.music_on());
    assert_eq!(ui.revision(), 2);
}

#[test]
fn overlay_actions_route_through_ui_state() {
    let entries = minimap_entries();
    let ids: Vec<NodeId> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, NodeId::ALL.to_vec());
    assert_eq!(entries[1].aria_label, "Jump to Skills");
    assert_eq!(entries[3].label, "Now Building");

    let mut ui = UiState::new();
    assert!(ui.apply(OverlayAction::Collaborate));
    assert_eq!(ui.selected(), Some(NodeId::Collab));
    assert!(!ui.apply(OverlayAction::Jump(NodeId::Collab)));
    assert!(ui.apply(OverlayAction::Jump(NodeId::Skills)));
    assert!(ui.apply(OverlayAction::SetDark(false)));
    assert!(ui.apply(OverlayAction::SetMusic(true)));
    assert!(!ui.apply(OverlayAction::SetMusic(true)));
}

#[test]
fn overlay_copy_matches_the_page() {
    assert_eq!(THEME_TOGGLE_LABEL, "Theme");
    assert_eq!(MUSIC_TOGGLE_LABEL, "Music");
    assert_eq!(MINIMAP_HEADING, "Quick Jump");
    assert!(HEADER_TAGLINE.contains("ML Enthusiast"));
}
