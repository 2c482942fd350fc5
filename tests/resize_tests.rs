use glam::{IVec2, Vec2};
use map_view_editor::app::use_cases::resize::{ResizeCandidate, ResizeSession};
use map_view_editor::app::{EditorKey, Modifiers, PointerButton};
use map_view_editor::{
    EditRequest, EditorOptions, EditorSession, EntityIndex, EntityModel, EntityType, Feedback,
    InputEvent, InteractionController, InteractionKind, MapHost, MapQuery, Rect, ResizeMode,
    TileMap,
};

fn send(controller: &mut InteractionController, session: &mut EditorSession, event: InputEvent) {
    controller
        .handle_event(session, event)
        .expect("Event sollte ohne Fehler durchlaufen");
}

fn move_to(controller: &mut InteractionController, session: &mut EditorSession, x: f32, y: f32) {
    send(
        controller,
        session,
        InputEvent::PointerMoved {
            pos: Vec2::new(x, y),
        },
    );
}

fn key(controller: &mut InteractionController, session: &mut EditorSession, c: char) {
    send(
        controller,
        session,
        InputEvent::KeyPressed {
            key: EditorKey::Char(c),
        },
    );
}

fn bounding_box(session: &EditorSession, index: EntityIndex) -> Rect {
    session
        .tile_map()
        .and_then(|map| map.entity(index))
        .expect("Entity vorhanden")
        .bounding_box()
}

fn session_with_tile() -> (EditorSession, EntityIndex) {
    let mut map = TileMap::new(0, 1);
    let index = map
        .add_entity(EntityModel::tile("grass", Rect::new(0, 0, 16, 16), 0))
        .expect("Tile einfügbar");
    (EditorSession::new(map), index)
}

#[test]
fn test_resize_shortcut_grows_tile_in_base_size_steps() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let (mut session, tile) = session_with_tile();
    session.set_selected_entities(&[tile]);
    move_to(&mut controller, &mut session, 16.0, 16.0);

    key(&mut controller, &mut session, 'r');
    assert_eq!(controller.kind(), InteractionKind::Resize);

    move_to(&mut controller, &mut session, 40.0, 20.0);
    assert_eq!(bounding_box(&session, tile), Rect::new(0, 0, 32, 16));

    move_to(&mut controller, &mut session, 40.0, 40.0);
    assert_eq!(bounding_box(&session, tile), Rect::new(0, 0, 32, 32));

    send(
        &mut controller,
        &mut session,
        InputEvent::PointerReleased {
            pos: Vec2::new(40.0, 40.0),
            button: PointerButton::Primary,
        },
    );
    assert_eq!(controller.kind(), InteractionKind::Idle);
    assert_eq!(session.command_log().merge_flags(), vec![false, true]);
}

#[test]
fn test_resize_never_produces_empty_box() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let (mut session, tile) = session_with_tile();
    session.set_selected_entities(&[tile]);
    move_to(&mut controller, &mut session, 16.0, 16.0);
    key(&mut controller, &mut session, 'R');

    move_to(&mut controller, &mut session, -40.0, 10.0);

    let new_box = bounding_box(&session, tile);
    assert!(!new_box.is_empty());
    assert_eq!(new_box.size.x % 16, 0);
    assert_eq!(new_box.size.y % 16, 0);
}

#[test]
fn test_resize_of_non_resizable_selection_stays_idle() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut map = TileMap::new(0, 0);
    let chest = map
        .add_entity(EntityModel::new(
            EntityType::Object,
            Rect::new(0, 0, 16, 16),
            0,
        ))
        .expect("Objekt einfügbar");
    let mut session = EditorSession::new(map);
    session.set_selected_entities(&[chest]);

    key(&mut controller, &mut session, 'r');
    assert_eq!(controller.kind(), InteractionKind::Idle);

    session.clear_selection();
    controller.start_resizing(&mut session);
    assert_eq!(controller.kind(), InteractionKind::Idle);
}

#[test]
fn test_presses_during_resize_are_ignored() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let (mut session, tile) = session_with_tile();
    session.set_selected_entities(&[tile]);
    controller.start_resizing(&mut session);

    send(
        &mut controller,
        &mut session,
        InputEvent::PointerPressed {
            pos: Vec2::new(100.0, 100.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        },
    );

    assert_eq!(controller.kind(), InteractionKind::Resize);
    assert_eq!(session.selected_entities(), vec![tile]);
}

#[test]
fn test_horizontal_only_entity_follows_group_vertically() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let mut map = TileMap::new(0, 0);
    let free = map
        .add_entity(EntityModel::tile("floor", Rect::new(0, 0, 16, 16), 0))
        .expect("Tile einfügbar");
    let wall = map
        .add_entity(
            EntityModel::new(EntityType::Object, Rect::new(0, 16, 16, 8), 0)
                .with_resize_mode(ResizeMode::HorizontalOnly)
                .with_base_size(IVec2::new(8, 8)),
        )
        .expect("Wand einfügbar");
    let mut session = EditorSession::new(map);
    session.set_selected_entities(&[free, wall]);
    move_to(&mut controller, &mut session, 16.0, 16.0);
    controller.start_resizing(&mut session);

    move_to(&mut controller, &mut session, 20.0, 32.0);

    // Vertikal: das freie Tile wächst, die Wand liegt unterhalb der Mitte und rutscht mit.
    assert_eq!(bounding_box(&session, free), Rect::new(0, 0, 16, 32));
    assert_eq!(bounding_box(&session, wall), Rect::new(0, 32, 16, 8));
    match session.command_log().last() {
        Some(EditRequest::ResizeEntities { boxes, .. }) => {
            let indexes: Vec<EntityIndex> = boxes.iter().map(|(index, _)| *index).collect();
            assert_eq!(indexes, vec![free, wall]);
        }
        other => panic!("Unerwarteter letzter Request: {other:?}"),
    }
}

#[test]
fn test_secondary_release_stamps_clone_with_base_size() {
    let mut controller = InteractionController::new(EditorOptions::default());
    let (mut session, tile) = session_with_tile();
    session.set_selected_entities(&[tile]);
    move_to(&mut controller, &mut session, 16.0, 16.0);
    controller.start_resizing(&mut session);
    move_to(&mut controller, &mut session, 40.0, 20.0);
    assert_eq!(bounding_box(&session, tile), Rect::new(0, 0, 32, 16));

    send(
        &mut controller,
        &mut session,
        InputEvent::PointerReleased {
            pos: Vec2::new(40.0, 20.0),
            button: PointerButton::Secondary,
        },
    );

    assert_eq!(controller.kind(), InteractionKind::Place);
    match session.feedback() {
        Some(Feedback::PlacementPreview(entities)) => {
            assert_eq!(entities.len(), 1);
            assert_eq!(entities[0].size, IVec2::new(16, 16));
        }
        other => panic!("Unerwartetes Feedback: {other:?}"),
    }
}

#[test]
fn test_stamp_keeps_resized_size_when_reset_is_disabled() {
    let options = EditorOptions {
        reset_single_clone_size: false,
        ..EditorOptions::default()
    };
    let mut controller = InteractionController::new(options);
    let (mut session, tile) = session_with_tile();
    session.set_selected_entities(&[tile]);
    move_to(&mut controller, &mut session, 16.0, 16.0);
    controller.start_resizing(&mut session);
    move_to(&mut controller, &mut session, 40.0, 20.0);

    send(
        &mut controller,
        &mut session,
        InputEvent::PointerReleased {
            pos: Vec2::new(40.0, 20.0),
            button: PointerButton::Secondary,
        },
    );

    match session.feedback() {
        Some(Feedback::PlacementPreview(entities)) => {
            assert_eq!(entities[0].size, IVec2::new(32, 16));
        }
        other => panic!("Unerwartetes Feedback: {other:?}"),
    }
}

const ALL_MODES: [ResizeMode; 7] = [
    ResizeMode::None,
    ResizeMode::HorizontalOnly,
    ResizeMode::VerticalOnly,
    ResizeMode::SingleDimension,
    ResizeMode::Square,
    ResizeMode::MultiDimensionOne,
    ResizeMode::MultiDimensionAll,
];

#[test]
fn test_every_mode_yields_positive_box_for_any_pointer() {
    let old_box = Rect::new(16, 16, 16, 16);

    for mode in ALL_MODES {
        for base in [1, 8, 16] {
            let entity = ResizeCandidate {
                index: EntityIndex::new(0, 0),
                bounding_box: old_box,
                base_size: IVec2::splat(base),
                resize_mode: mode,
            };
            let session = ResizeSession::begin(vec![entity], IVec2::new(32, 32), 8)
                .expect("Leader vorhanden");

            // Zeiger auf beiden Seiten der Ecke oben links, auch zwischen Rasterlinien
            for x in (-80..=120).step_by(7) {
                for y in (-80..=120).step_by(7) {
                    let pointer = IVec2::new(x, y);
                    let (_, new_box) = session.compute(pointer)[0];
                    let context = format!("{mode:?}, Basis {base}, Zeiger {pointer:?}");

                    assert!(new_box.width() > 0, "{context}: {new_box:?}");
                    assert!(new_box.height() > 0, "{context}: {new_box:?}");

                    let width_changed = new_box.width() != old_box.width();
                    let height_changed = new_box.height() != old_box.height();
                    match mode {
                        ResizeMode::None => assert_eq!(new_box, old_box, "{context}"),
                        ResizeMode::Square => {
                            assert_eq!(new_box.width(), new_box.height(), "{context}")
                        }
                        ResizeMode::HorizontalOnly => assert!(!height_changed, "{context}"),
                        ResizeMode::VerticalOnly => assert!(!width_changed, "{context}"),
                        ResizeMode::SingleDimension | ResizeMode::MultiDimensionOne => {
                            assert!(!(width_changed && height_changed), "{context}")
                        }
                        ResizeMode::MultiDimensionAll => {}
                    }
                }
            }
        }
    }
}
