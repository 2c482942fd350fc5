//! Interaction Controller für die zentrale Event-Verarbeitung der Kartenansicht.

use super::context_menu::{build_context_menu, ContextMenu, MenuAction};
use super::events::{EditRequest, EditorKey, InputEvent};
use super::host::MapHost;
use super::interaction::{
    IdleState, InteractionKind, InteractionState, MoveState, PlaceState, RectangleSelectState,
    ResizeState, StateContext, Transition,
};
use super::use_cases::placement::tiles_from_patterns;
use super::use_cases::selection::sorted_selection;
use crate::core::{to_point, EntityIndex, EntityModel};
use crate::shared::EditorOptions;
use glam::Vec2;

/// Besitzt den aktiven Interaktionszustand und übersetzt Eingaben in Übergänge.
///
/// Der Zustand wird immer als Ganzes ersetzt: erst `stop` des alten, dann
/// `start` des neuen Zustands.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    options: EditorOptions,
    pointer: Vec2,
    clipboard: Vec<EntityModel>,
}

impl InteractionController {
    /// Erstellt einen Controller im Ruhezustand.
    pub fn new(options: EditorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> InteractionKind {
        self.state.kind()
    }

    /// Aktiver Zustand mit seinen Daten.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EditorOptions) {
        self.options = options;
    }

    /// Letzte bekannte Zeiger-Position in Karten-Koordinaten.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Zuletzt kopierte Entities.
    pub fn clipboard(&self) -> &[EntityModel] {
        &self.clipboard
    }

    /// Verarbeitet ein Eingabe-Event.
    pub fn handle_event(&mut self, host: &mut dyn MapHost, event: InputEvent) -> anyhow::Result<()> {
        if let Some(pos) = event.pointer_position() {
            self.pointer = pos;
        }

        if host.map().is_none() {
            if matches!(event, InputEvent::CancelRequested | InputEvent::TilesetChanged) {
                self.cancel(host);
            } else {
                log::debug!("Keine Karte geladen, Event ignoriert: {:?}", event);
            }
            return Ok(());
        }

        let transition = match event {
            InputEvent::PointerPressed {
                pos,
                button,
                modifiers,
            } => {
                let ctx = StateContext {
                    options: &self.options,
                    pointer: self.pointer,
                };
                self.state
                    .pointer_pressed(host, &ctx, pos, button, modifiers)?
            }
            InputEvent::PointerMoved { pos } => {
                let ctx = StateContext {
                    options: &self.options,
                    pointer: self.pointer,
                };
                self.state.pointer_moved(host, &ctx, pos)?
            }
            InputEvent::PointerReleased { pos, button } => {
                let ctx = StateContext {
                    options: &self.options,
                    pointer: self.pointer,
                };
                self.state.pointer_released(host, &ctx, pos, button)?
            }
            InputEvent::DoubleClicked { pos } => {
                if host.selected_entities().len() == 1 && host.entity_at(to_point(pos)).is_some() {
                    self.apply_transition(host, Transition::Idle);
                    self.edit_selected(host)?;
                }
                None
            }
            InputEvent::ContextMenuRequested { pos } => {
                if self.kind() == InteractionKind::Idle {
                    let menu = self.context_menu(host);
                    host.popup_context_menu(menu, to_point(pos));
                }
                None
            }
            InputEvent::KeyPressed { key } => {
                self.handle_key(host, key)?;
                None
            }
            InputEvent::PatternSelectionChanged => self.pattern_selection_changed(host),
            InputEvent::TilesetChanged | InputEvent::CancelRequested => Some(Transition::Idle),
        };

        if let Some(transition) = transition {
            self.apply_transition(host, transition);
        }
        Ok(())
    }

    /// Zurück in den Ruhezustand, unabhängig vom aktuellen Zustand.
    pub fn cancel(&mut self, host: &mut dyn MapHost) {
        self.apply_transition(host, Transition::Idle);
    }

    /// Startet die Größenänderung der Selektion.
    ///
    /// Ohne Karte oder ohne veränderbare Entity bleibt bzw. landet der
    /// Controller im Ruhezustand.
    pub fn start_resizing(&mut self, host: &mut dyn MapHost) {
        self.apply_transition(host, Transition::Resize);
    }

    /// Startet das Platzieren neuer Entities. Leere Eingabe wird ignoriert.
    pub fn start_placing(
        &mut self,
        host: &mut dyn MapHost,
        entities: Vec<EntityModel>,
        guess_layer: bool,
    ) {
        if entities.is_empty() {
            log::debug!("Platzieren ohne Entities ignoriert");
            return;
        }
        self.apply_transition(
            host,
            Transition::Place {
                entities,
                guess_layer,
            },
        );
    }

    /// Platziert je ein Tile pro gewähltem Muster des Tileset-Pickers.
    pub fn start_placing_from_patterns(&mut self, host: &mut dyn MapHost) {
        match tiles_from_patterns(&host.selected_patterns()) {
            Some((tiles, guess_layer)) => self.start_placing(host, tiles, guess_layer),
            None => log::debug!("Keine Muster gewählt"),
        }
    }

    /// Kopiert die Selektion (sortiert nach Index) in die Zwischenablage.
    pub fn copy(&mut self, host: &dyn MapHost) -> Vec<EntityModel> {
        let Some(map) = host.map() else {
            return Vec::new();
        };
        let entities: Vec<EntityModel> = sorted_selection(host)
            .into_iter()
            .filter_map(|index| map.entity(index).cloned())
            .collect();
        if !entities.is_empty() {
            self.clipboard = entities.clone();
        }
        entities
    }

    /// Kopiert die Selektion und entfernt sie von der Karte.
    pub fn cut(&mut self, host: &mut dyn MapHost) -> anyhow::Result<Vec<EntityModel>> {
        let entities = self.copy(host);
        if entities.is_empty() {
            return Ok(entities);
        }
        let indexes = sorted_selection(host);
        host.submit(EditRequest::RemoveEntities { indexes })?;
        Ok(entities)
    }

    /// Platziert den Inhalt der Zwischenablage.
    pub fn paste(&mut self, host: &mut dyn MapHost) {
        let entities = self.clipboard.clone();
        self.paste_entities(host, entities);
    }

    /// Platziert übergebene Entities mit festem Layer.
    pub fn paste_entities(&mut self, host: &mut dyn MapHost, entities: Vec<EntityModel>) {
        self.start_placing(host, entities, false);
    }

    /// Fordert das Bearbeiten der einzigen selektierten Entity an.
    pub fn edit_selected(&mut self, host: &mut dyn MapHost) -> anyhow::Result<()> {
        let selection = host.selected_entities();
        let [index] = selection.as_slice() else {
            log::debug!("Bearbeiten braucht genau eine Entity, selektiert: {}", selection.len());
            return Ok(());
        };
        host.submit(EditRequest::EditEntity { index: *index })
    }

    /// Kontextmenü für die aktuelle Selektion.
    pub fn context_menu(&self, host: &dyn MapHost) -> ContextMenu {
        build_context_menu(host, !self.clipboard.is_empty())
    }

    /// Führt eine Menü-Aktion aus.
    pub fn trigger(&mut self, host: &mut dyn MapHost, action: MenuAction) -> anyhow::Result<()> {
        match action {
            MenuAction::Edit => self.edit_selected(host),
            MenuAction::Resize => {
                self.start_resizing(host);
                Ok(())
            }
            MenuAction::Cut => self.cut(host).map(|_| ()),
            MenuAction::Copy => {
                self.copy(host);
                Ok(())
            }
            MenuAction::Paste => {
                self.paste(host);
                Ok(())
            }
            MenuAction::ConvertTiles => {
                submit_for_selection(host, |indexes| EditRequest::ConvertTiles { indexes })
            }
            MenuAction::SetLayer(layer) => {
                submit_for_selection(host, |indexes| EditRequest::SetLayer { indexes, layer })
            }
            MenuAction::LayerUp => {
                submit_for_selection(host, |indexes| EditRequest::IncreaseLayer { indexes })
            }
            MenuAction::LayerDown => {
                submit_for_selection(host, |indexes| EditRequest::DecreaseLayer { indexes })
            }
            MenuAction::BringToFront => {
                submit_for_selection(host, |indexes| EditRequest::BringToFront { indexes })
            }
            MenuAction::BringToBack => {
                submit_for_selection(host, |indexes| EditRequest::BringToBack { indexes })
            }
            MenuAction::Remove => {
                submit_for_selection(host, |indexes| EditRequest::RemoveEntities { indexes })
            }
            MenuAction::SetDirection(direction) => submit_for_selection(host, |indexes| {
                EditRequest::SetDirection { indexes, direction }
            }),
        }
    }

    fn handle_key(&mut self, host: &mut dyn MapHost, key: EditorKey) -> anyhow::Result<()> {
        let action = match key {
            EditorKey::Escape => {
                self.cancel(host);
                return Ok(());
            }
            EditorKey::Enter => MenuAction::Edit,
            EditorKey::Plus => MenuAction::LayerUp,
            EditorKey::Minus => MenuAction::LayerDown,
            EditorKey::Delete => MenuAction::Remove,
            EditorKey::Char(c) => match c.to_ascii_lowercase() {
                'r' => MenuAction::Resize,
                't' => MenuAction::BringToFront,
                'b' => MenuAction::BringToBack,
                _ => return Ok(()),
            },
        };
        self.trigger(host, action)
    }

    /// Reaktion auf eine geänderte Auswahl im Tileset-Picker.
    fn pattern_selection_changed(&self, host: &dyn MapHost) -> Option<Transition> {
        let tiles = tiles_from_patterns(&host.selected_patterns());
        match (self.kind(), tiles) {
            (InteractionKind::Idle | InteractionKind::Place, Some((entities, guess_layer))) => {
                Some(Transition::Place {
                    entities,
                    guess_layer,
                })
            }
            (InteractionKind::Place, None) => Some(Transition::Idle),
            _ => None,
        }
    }

    /// Ersetzt den Zustand: `stop` des alten, dann `start` des neuen.
    fn apply_transition(&mut self, host: &mut dyn MapHost, transition: Transition) {
        let ctx = StateContext {
            options: &self.options,
            pointer: self.pointer,
        };

        let mut next = match transition {
            Transition::Idle => InteractionState::Idle(IdleState::default()),
            Transition::RectangleSelect { anchor } => {
                InteractionState::RectangleSelect(RectangleSelectState::new(anchor))
            }
            Transition::Move { anchor } => InteractionState::Move(MoveState::new(anchor)),
            Transition::Resize => match ResizeState::begin(&*host, &ctx) {
                Some(state) => InteractionState::Resize(state),
                None => {
                    log::debug!("Resize abgelehnt: nichts Veränderbares selektiert");
                    InteractionState::Idle(IdleState::default())
                }
            },
            Transition::Place {
                entities,
                guess_layer,
            } => {
                if entities.is_empty() {
                    InteractionState::Idle(IdleState::default())
                } else {
                    InteractionState::Place(PlaceState::new(entities, guess_layer))
                }
            }
        };

        log::debug!("Zustand {:?} -> {:?}", self.state.kind(), next.kind());
        self.state.stop(host);
        next.start(host, &ctx);
        self.state = next;
    }
}

/// Schickt einen Request für die sortierte Selektion; leere Selektion ist ein No-op.
fn submit_for_selection(
    host: &mut dyn MapHost,
    request: impl FnOnce(Vec<EntityIndex>) -> EditRequest,
) -> anyhow::Result<()> {
    let indexes = sorted_selection(host);
    if indexes.is_empty() {
        log::debug!("Leere Selektion, Aktion ignoriert");
        return Ok(());
    }
    host.submit(request(indexes))
}
