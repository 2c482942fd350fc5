//! Referenz-Host: In-Memory-Karte mit Selektion, Feedback und Command-Log.

use super::command_log::CommandLog;
use super::context_menu::ContextMenu;
use super::events::EditRequest;
use super::handlers;
use super::host::{Feedback, MapHost};
use crate::core::{EntityIndex, MapQuery, Rect, TileMap, TilePattern};
use glam::IVec2;
use indexmap::IndexSet;

/// Editor-Sitzung über einer `TileMap`.
///
/// Hält die Selektion (in Einfüge-Reihenfolge), das aktuelle Feedback der
/// Kartenansicht, die Tileset-Auswahl und alle angenommenen Requests.
#[derive(Debug, Default)]
pub struct EditorSession {
    pub(crate) tile_map: Option<TileMap>,
    pub(crate) selection: IndexSet<EntityIndex>,
    feedback: Option<Feedback>,
    patterns: Vec<TilePattern>,
    pub(crate) command_log: CommandLog,
    selection_change_count: usize,
    last_context_menu: Option<(ContextMenu, IVec2)>,
}

impl EditorSession {
    /// Sitzung mit geladener Karte.
    pub fn new(tile_map: TileMap) -> Self {
        Self {
            tile_map: Some(tile_map),
            ..Self::default()
        }
    }

    /// Sitzung ohne Karte.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tile_map(&self) -> Option<&TileMap> {
        self.tile_map.as_ref()
    }

    /// Ersetzt die Karte; Selektion und Feedback werden verworfen.
    pub fn set_tile_map(&mut self, tile_map: Option<TileMap>) {
        self.tile_map = tile_map;
        self.selection.clear();
        self.feedback = None;
    }

    /// Selektion in Einfüge-Reihenfolge.
    pub fn selection(&self) -> &IndexSet<EntityIndex> {
        &self.selection
    }

    /// Aktuelles Feedback der Kartenansicht.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Setzt die Auswahl des Tileset-Pickers.
    pub fn set_selected_patterns(&mut self, patterns: Vec<TilePattern>) {
        self.patterns = patterns;
    }

    pub fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    /// Anzahl der Selektions-Änderungsmeldungen seit Start.
    pub fn selection_change_count(&self) -> usize {
        self.selection_change_count
    }

    /// Zuletzt angezeigtes Kontextmenü mit Position.
    pub fn last_context_menu(&self) -> Option<&(ContextMenu, IVec2)> {
        self.last_context_menu.as_ref()
    }

    /// Ersetzt die Selektion und meldet die Änderung einmal.
    pub(crate) fn replace_selection(&mut self, indexes: impl IntoIterator<Item = EntityIndex>) {
        self.selection = indexes.into_iter().collect();
        self.selection_change_count += 1;
    }
}

impl MapHost for EditorSession {
    fn map(&self) -> Option<&dyn MapQuery> {
        self.tile_map.as_ref().map(|map| map as &dyn MapQuery)
    }

    fn selected_entities(&self) -> Vec<EntityIndex> {
        self.selection.iter().copied().collect()
    }

    fn set_selected_entities(&mut self, indexes: &[EntityIndex]) {
        let new_selection: IndexSet<EntityIndex> = indexes.iter().copied().collect();
        if new_selection == self.selection {
            return;
        }
        self.replace_selection(new_selection);
    }

    fn select_entity(&mut self, index: EntityIndex, selected: bool) {
        let changed = if selected {
            self.selection.insert(index)
        } else {
            self.selection.shift_remove(&index)
        };
        if changed {
            self.selection_change_count += 1;
        }
    }

    fn is_selected(&self, index: EntityIndex) -> bool {
        self.selection.contains(&index)
    }

    fn entity_at(&self, point: IVec2) -> Option<EntityIndex> {
        self.tile_map.as_ref()?.entity_at(point)
    }

    fn entities_in_rectangle(&self, area: Rect) -> Vec<EntityIndex> {
        self.tile_map
            .as_ref()
            .map(|map| map.entities_in_rectangle(area))
            .unwrap_or_default()
    }

    fn layer_in_rectangle(&self, area: Rect) -> i32 {
        self.tile_map
            .as_ref()
            .map(|map| map.layer_in_rectangle(area))
            .unwrap_or_default()
    }

    fn set_feedback(&mut self, feedback: Option<Feedback>) {
        self.feedback = feedback;
    }

    fn selected_patterns(&self) -> Vec<TilePattern> {
        self.patterns.clone()
    }

    fn popup_context_menu(&mut self, menu: ContextMenu, at: IVec2) {
        self.last_context_menu = Some((menu, at));
    }

    fn submit(&mut self, request: EditRequest) -> anyhow::Result<()> {
        if let Err(e) = handlers::apply(self, &request) {
            log::warn!("Request {} abgelehnt: {:#}", request.name(), e);
            return Err(e);
        }
        self.command_log.record(&request);
        Ok(())
    }
}
