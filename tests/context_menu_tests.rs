use glam::{IVec2, Vec2};
use map_view_editor::app::{MenuAction, MenuEntry};
use map_view_editor::{
    EditRequest, EditorOptions, EditorSession, EntityIndex, EntityModel, EntityType, InputEvent,
    InteractionController, InteractionKind, MapHost, MapQuery, Rect, TileMap,
};

const A: EntityIndex = EntityIndex::new(0, 0);
const B: EntityIndex = EntityIndex::new(0, 1);
const NPC: EntityIndex = EntityIndex::new(0, 2);

/// Zwei Tiles und ein NPC mit vier Richtungen auf Layer 0.
fn make_test_session() -> EditorSession {
    let mut map = TileMap::new(0, 2);
    map.add_entity(EntityModel::tile("grass", Rect::new(0, 0, 16, 16), 0))
        .expect("Tile einfügbar");
    map.add_entity(EntityModel::tile("grass", Rect::new(32, 0, 16, 16), 0))
        .expect("Tile einfügbar");
    let mut npc = EntityModel::new(EntityType::Object, Rect::new(64, 0, 16, 16), 0)
        .with_directions(4, Some("Any"));
    npc.direction = Some(3);
    map.add_entity(npc).expect("NPC einfügbar");
    EditorSession::new(map)
}

#[test]
fn test_context_menu_request_in_idle_pops_up_menu() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[A]);

    controller
        .handle_event(
            &mut session,
            InputEvent::ContextMenuRequested {
                pos: Vec2::new(4.0, 4.0),
            },
        )
        .expect("Kontextmenü sollte ohne Fehler durchlaufen");

    let (menu, at) = session
        .last_context_menu()
        .expect("Kontextmenü angezeigt");
    assert_eq!(*at, IVec2::new(4, 4));
    assert!(menu.is_enabled(MenuAction::Edit));
    assert!(menu.is_enabled(MenuAction::Resize));
    assert_eq!(
        menu.label(MenuAction::ConvertTiles),
        Some("Convert to dynamic tile")
    );
    assert!(menu.is_checked(MenuAction::SetLayer(0)));
    assert!(!menu.is_checked(MenuAction::SetLayer(1)));
    assert!(menu.is_enabled(MenuAction::LayerUp));
    assert!(!menu.is_enabled(MenuAction::LayerDown));
    assert!(menu.is_enabled(MenuAction::Copy));
    assert!(!menu.is_enabled(MenuAction::Paste));
    assert!(matches!(
        menu.submenu("Direction"),
        Some(MenuEntry::Submenu { enabled: false, .. })
    ));
}

#[test]
fn test_context_menu_is_not_shown_outside_idle() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[A]);
    controller.start_resizing(&mut session);
    assert_eq!(controller.kind(), InteractionKind::Resize);

    controller
        .handle_event(
            &mut session,
            InputEvent::ContextMenuRequested {
                pos: Vec2::new(4.0, 4.0),
            },
        )
        .expect("Kontextmenü sollte ohne Fehler durchlaufen");

    assert!(session.last_context_menu().is_none());
}

#[test]
fn test_multi_selection_disables_edit_and_uses_plural_labels() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[B, A]);
    controller.copy(&session);

    let menu = controller.context_menu(&session);

    assert!(!menu.is_enabled(MenuAction::Edit));
    assert_eq!(
        menu.label(MenuAction::ConvertTiles),
        Some("Convert to dynamic tiles")
    );
    assert!(menu.is_enabled(MenuAction::Paste));
}

#[test]
fn test_mixed_selection_has_no_convert_entry() {
    let controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[A, NPC]);

    let menu = controller.context_menu(&session);

    assert!(menu.find(MenuAction::ConvertTiles).is_none());
    assert!(menu.is_enabled(MenuAction::Resize));
}

#[test]
fn test_empty_selection_only_offers_clipboard_actions() {
    let controller = InteractionController::new(EditorOptions::default());
    let session = make_test_session();

    let menu = controller.context_menu(&session);

    assert!(menu.find(MenuAction::Edit).is_none());
    assert!(menu.find(MenuAction::Remove).is_none());
    assert!(!menu.is_enabled(MenuAction::Cut));
    assert!(!menu.is_enabled(MenuAction::Copy));
    assert!(!menu.is_enabled(MenuAction::Paste));
}

#[test]
fn test_direction_submenu_checks_common_direction() {
    let controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[NPC]);

    let menu = controller.context_menu(&session);

    match menu.submenu("Direction") {
        Some(MenuEntry::Submenu {
            enabled: true,
            entries,
            ..
        }) => assert_eq!(entries.len(), 5),
        other => panic!("Unerwartetes Richtungs-Menü: {other:?}"),
    }
    assert_eq!(menu.label(MenuAction::SetDirection(None)), Some("Any"));
    assert_eq!(menu.label(MenuAction::SetDirection(Some(1))), Some("Up"));
    assert!(menu.is_checked(MenuAction::SetDirection(Some(3))));
    assert!(!menu.is_checked(MenuAction::SetDirection(None)));
    assert!(menu.is_enabled(MenuAction::Edit));
    assert!(!menu.is_enabled(MenuAction::Resize));
}

#[test]
fn test_trigger_set_direction_and_layer() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[NPC]);

    controller
        .trigger(&mut session, MenuAction::SetDirection(None))
        .expect("Richtung setzbar");
    let map = session.tile_map().expect("Karte vorhanden");
    assert_eq!(map.entity(NPC).expect("NPC vorhanden").direction, None);

    controller
        .trigger(&mut session, MenuAction::SetLayer(2))
        .expect("Layer setzbar");
    let moved = EntityIndex::new(2, 0);
    assert_eq!(session.selected_entities(), vec![moved]);
    assert_eq!(
        session
            .tile_map()
            .and_then(|map| map.entity(moved))
            .expect("NPC vorhanden")
            .layer,
        2
    );
}

#[test]
fn test_trigger_convert_and_reorder_keeps_sections_and_selection() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();
    session.set_selected_entities(&[A]);

    controller
        .trigger(&mut session, MenuAction::ConvertTiles)
        .expect("Umwandlung möglich");

    // A wird dynamisch und landet hinter dem NPC; B rückt auf Position 0.
    let converted = EntityIndex::new(0, 2);
    assert_eq!(session.selected_entities(), vec![converted]);
    let map = session.tile_map().expect("Karte vorhanden");
    assert_eq!(
        map.entity(converted).expect("Tile vorhanden").entity_type,
        EntityType::DynamicTile
    );

    controller
        .trigger(&mut session, MenuAction::BringToBack)
        .expect("Reihenfolge änderbar");
    // Anfang des dynamischen Abschnitts, direkt hinter dem einzigen statischen Tile
    assert_eq!(session.selected_entities(), vec![EntityIndex::new(0, 1)]);
    assert_eq!(
        session.command_log().last(),
        Some(&EditRequest::BringToBack {
            indexes: vec![converted]
        })
    );
}

#[test]
fn test_actions_on_empty_selection_are_no_ops() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut session = make_test_session();

    for action in [
        MenuAction::Remove,
        MenuAction::LayerUp,
        MenuAction::BringToFront,
        MenuAction::Edit,
    ] {
        controller
            .trigger(&mut session, action)
            .expect("Aktion ohne Selektion ist kein Fehler");
    }

    assert!(session.command_log().is_empty());
}

#[test]
fn test_set_layer_on_mixed_selection_reselects_all_entities() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut map = TileMap::new(0, 2);
    let chest = map
        .add_entity(EntityModel::new(
            EntityType::Object,
            Rect::new(0, 0, 16, 16),
            0,
        ))
        .expect("Objekt einfügbar");
    let floor = map
        .add_entity(EntityModel::tile("floor", Rect::new(16, 0, 16, 16), 1))
        .expect("Tile einfügbar");
    let mut session = EditorSession::new(map);
    session.set_selected_entities(&[chest, floor]);

    controller
        .trigger(&mut session, MenuAction::SetLayer(2))
        .expect("Layer setzbar");

    let mut selection = session.selected_entities();
    selection.sort();
    assert_eq!(
        selection,
        vec![EntityIndex::new(2, 0), EntityIndex::new(2, 1)]
    );
    let map = session.tile_map().expect("Karte vorhanden");
    let types: Vec<EntityType> = selection
        .iter()
        .map(|index| map.entity(*index).expect("Entity vorhanden").entity_type)
        .collect();
    assert_eq!(types, vec![EntityType::Tile, EntityType::Object]);

    controller
        .trigger(&mut session, MenuAction::LayerDown)
        .expect("Layer verringerbar");
    let mut selection = session.selected_entities();
    selection.sort();
    assert_eq!(
        selection,
        vec![EntityIndex::new(1, 0), EntityIndex::new(1, 1)]
    );
}
