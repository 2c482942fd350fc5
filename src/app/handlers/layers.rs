//! Handler für Layer-Wechsel, Reihenfolge und Tile-Umwandlung.

use super::{ensure_entities_exist, tile_map_mut};
use crate::app::session::EditorSession;
use crate::core::{EntityIndex, MapQuery};

/// Setzt alle Entities auf `layer` und selektiert sie an ihren neuen Indizes.
pub fn set_layer(session: &mut EditorSession, indexes: &[EntityIndex], layer: i32) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    let moves: Vec<(EntityIndex, i32)> = indexes.iter().map(|index| (*index, layer)).collect();
    let new_indexes = map.set_entities_layer(&moves)?;
    session.replace_selection(new_indexes);
    Ok(())
}

/// Verschiebt Entities um `delta` Layer; Entities am Rand bleiben liegen.
pub fn shift_layer(session: &mut EditorSession, indexes: &[EntityIndex], delta: i32) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    ensure_entities_exist(map, indexes)?;
    let moves: Vec<(EntityIndex, i32)> = indexes
        .iter()
        .map(|index| (*index, index.layer + delta))
        .filter(|(_, layer)| map.is_valid_layer(*layer))
        .collect();
    if moves.is_empty() {
        return Ok(());
    }

    let new_indexes = map.set_entities_layer(&moves)?;
    session.replace_selection(new_indexes);
    Ok(())
}

/// Ans Ende (`to_front`) oder an den Anfang des jeweiligen Abschnitts.
pub fn reorder(session: &mut EditorSession, indexes: &[EntityIndex], to_front: bool) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    let new_indexes = map.reorder_entities(indexes, to_front)?;
    session.replace_selection(new_indexes);
    Ok(())
}

/// Statische ↔ dynamische Tiles.
pub fn convert_tiles(session: &mut EditorSession, indexes: &[EntityIndex]) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    let new_indexes = map.convert_tiles(indexes)?;
    session.replace_selection(new_indexes);
    Ok(())
}
