//! Schnittstelle zwischen Interaktionskern und seinen Kollaborateuren.

use super::context_menu::ContextMenu;
use super::events::EditRequest;
use crate::core::{EntityIndex, EntityModel, MapQuery, Rect, TilePattern};
use glam::IVec2;

/// Temporäres Feedback eines Interaktionszustands (Auswahlrechteck, Platzier-Vorschau).
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// Gelbes Auswahlrechteck während RectangleSelect
    SelectionRectangle(Rect),
    /// Vorschau der noch nicht eingefügten Entities während Place
    PlacementPreview(Vec<EntityModel>),
}

/// Alles, was der Interaktionskern von außen braucht.
///
/// Die Selektion gehört dem Host; der Kern liest und setzt sie nur und hält
/// keine eigene Kopie.
pub trait MapHost {
    /// Aktuelle Karte, `None` solange keine geladen ist.
    fn map(&self) -> Option<&dyn MapQuery>;

    /// Selektierte Entities in Host-Reihenfolge.
    fn selected_entities(&self) -> Vec<EntityIndex>;

    /// Ersetzt die Selektion in einem Schritt (eine einzige Änderungsmeldung).
    fn set_selected_entities(&mut self, indexes: &[EntityIndex]);

    /// Selektiert oder deselektiert eine einzelne Entity.
    fn select_entity(&mut self, index: EntityIndex, selected: bool);

    /// Prüft, ob eine Entity selektiert ist.
    fn is_selected(&self, index: EntityIndex) -> bool;

    /// Oberste Entity unter einem Punkt.
    fn entity_at(&self, point: IVec2) -> Option<EntityIndex>;

    /// Entities, deren Bounding-Box vollständig im Rechteck liegt.
    fn entities_in_rectangle(&self, area: Rect) -> Vec<EntityIndex>;

    /// Höchster belegter Layer unter einem Rechteck.
    fn layer_in_rectangle(&self, area: Rect) -> i32;

    /// Setzt oder entfernt das temporäre Feedback.
    fn set_feedback(&mut self, feedback: Option<Feedback>);

    /// Aktuell im Tileset-Picker gewählte Muster.
    fn selected_patterns(&self) -> Vec<TilePattern>;

    /// Zeigt ein Kontextmenü an.
    fn popup_context_menu(&mut self, _menu: ContextMenu, _at: IVec2) {}

    /// Übergibt einen Änderungswunsch an die Karte.
    fn submit(&mut self, request: EditRequest) -> anyhow::Result<()>;

    /// Hebt die Selektion auf.
    fn clear_selection(&mut self) {
        self.set_selected_entities(&[]);
    }

    /// `true`, wenn nichts selektiert ist.
    fn is_selection_empty(&self) -> bool {
        self.selected_entities().is_empty()
    }
}
