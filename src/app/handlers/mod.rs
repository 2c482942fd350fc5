//! Feature-Handler für die EditRequest-Verarbeitung.
//!
//! Jeder Handler gruppiert die Ausführung eines Feature-Bereichs.
//! Die Sitzung dispatcht über `apply` an die passende Handler-Funktion.

pub mod editing;
pub mod layers;

use super::events::EditRequest;
use super::session::EditorSession;
use crate::core::{EntityIndex, MapQuery, TileMap};
use anyhow::{bail, Context};

/// Führt einen Request auf der Sitzung aus.
pub fn apply(session: &mut EditorSession, request: &EditRequest) -> anyhow::Result<()> {
    match request {
        // === Geometrie ===
        EditRequest::MoveEntities {
            indexes,
            translation,
            ..
        } => editing::move_entities(session, indexes, *translation),
        EditRequest::ResizeEntities { boxes, .. } => editing::resize_entities(session, boxes),

        // === Einfügen & Entfernen ===
        EditRequest::AddEntities { entities } => editing::add_entities(session, entities),
        EditRequest::RemoveEntities { indexes } => editing::remove_entities(session, indexes),

        // === Eigenschaften ===
        EditRequest::SetDirection { indexes, direction } => {
            editing::set_direction(session, indexes, *direction)
        }
        EditRequest::EditEntity { index } => editing::edit_entity(session, *index),

        // === Layer & Reihenfolge ===
        EditRequest::SetLayer { indexes, layer } => layers::set_layer(session, indexes, *layer),
        EditRequest::IncreaseLayer { indexes } => layers::shift_layer(session, indexes, 1),
        EditRequest::DecreaseLayer { indexes } => layers::shift_layer(session, indexes, -1),
        EditRequest::BringToFront { indexes } => layers::reorder(session, indexes, true),
        EditRequest::BringToBack { indexes } => layers::reorder(session, indexes, false),
        EditRequest::ConvertTiles { indexes } => layers::convert_tiles(session, indexes),
    }
}

/// Karte der Sitzung oder Fehler, wenn keine geladen ist.
fn tile_map_mut(session: &mut EditorSession) -> anyhow::Result<&mut TileMap> {
    session
        .tile_map
        .as_mut()
        .context("Keine Karte geladen")
}

/// Prüft, dass alle Indizes auf existierende Entities zeigen.
fn ensure_entities_exist(map: &TileMap, indexes: &[EntityIndex]) -> anyhow::Result<()> {
    for index in indexes {
        if !map.entity_exists(*index) {
            bail!("Entity {index:?} existiert nicht");
        }
    }
    Ok(())
}
