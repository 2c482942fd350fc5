use crate::core::{EntityIndex, EntityModel, Rect};
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Neue Entity mit dem Index, an dem sie eingefügt werden soll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddableEntity {
    pub entity: EntityModel,
    pub index: EntityIndex,
}

/// Änderungswunsch an die Karte.
///
/// Requests sind fire-and-forget: der Empfänger führt sie aus und verwaltet
/// Undo selbst. `merge_with_previous` markiert Folgeschritte derselben Geste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditRequest {
    /// Entities um ein Delta verschieben
    MoveEntities {
        indexes: Vec<EntityIndex>,
        translation: IVec2,
        merge_with_previous: bool,
    },
    /// Explizite Bounding-Boxen setzen (aufsteigend nach Index)
    ResizeEntities {
        boxes: Vec<(EntityIndex, Rect)>,
        merge_with_previous: bool,
    },
    /// Neue Entities an festen Indizes einfügen (aufsteigend sortiert)
    AddEntities { entities: Vec<AddableEntity> },
    /// Entities entfernen
    RemoveEntities { indexes: Vec<EntityIndex> },
    /// Entities auf einen Layer setzen
    SetLayer { indexes: Vec<EntityIndex>, layer: i32 },
    /// Entities einen Layer nach oben
    IncreaseLayer { indexes: Vec<EntityIndex> },
    /// Entities einen Layer nach unten
    DecreaseLayer { indexes: Vec<EntityIndex> },
    /// Entities ans Ende ihres Abschnitts
    BringToFront { indexes: Vec<EntityIndex> },
    /// Entities an den Anfang ihres Abschnitts
    BringToBack { indexes: Vec<EntityIndex> },
    /// Statische ↔ dynamische Tiles umwandeln
    ConvertTiles { indexes: Vec<EntityIndex> },
    /// Richtung setzen (`None` = keine Richtung)
    SetDirection {
        indexes: Vec<EntityIndex>,
        direction: Option<u32>,
    },
    /// Eigenschaften-Dialog für eine Entity öffnen
    EditEntity { index: EntityIndex },
}

impl EditRequest {
    /// Kurzname für Logausgaben.
    pub fn name(&self) -> &'static str {
        match self {
            EditRequest::MoveEntities { .. } => "move_entities",
            EditRequest::ResizeEntities { .. } => "resize_entities",
            EditRequest::AddEntities { .. } => "add_entities",
            EditRequest::RemoveEntities { .. } => "remove_entities",
            EditRequest::SetLayer { .. } => "set_layer",
            EditRequest::IncreaseLayer { .. } => "increase_layer",
            EditRequest::DecreaseLayer { .. } => "decrease_layer",
            EditRequest::BringToFront { .. } => "bring_to_front",
            EditRequest::BringToBack { .. } => "bring_to_back",
            EditRequest::ConvertTiles { .. } => "convert_tiles",
            EditRequest::SetDirection { .. } => "set_direction",
            EditRequest::EditEntity { .. } => "edit_entity",
        }
    }

    /// `true`, wenn der Request mit dem vorherigen zu einem Undo-Schritt verschmilzt.
    pub fn merges_with_previous(&self) -> bool {
        match self {
            EditRequest::MoveEntities {
                merge_with_previous,
                ..
            }
            | EditRequest::ResizeEntities {
                merge_with_previous,
                ..
            } => *merge_with_previous,
            _ => false,
        }
    }
}
