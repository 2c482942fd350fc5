//! Handler für Verschieben, Größe, Einfügen, Entfernen und Eigenschaften.

use super::{ensure_entities_exist, tile_map_mut};
use crate::app::events::AddableEntity;
use crate::app::session::EditorSession;
use crate::core::{EntityIndex, MapQuery, Rect};
use anyhow::bail;
use glam::IVec2;

/// Verschiebt Entities um ein Delta.
pub fn move_entities(
    session: &mut EditorSession,
    indexes: &[EntityIndex],
    translation: IVec2,
) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    ensure_entities_exist(map, indexes)?;
    for index in indexes {
        if let Some(entity) = map.entity_mut(*index) {
            entity.top_left += translation;
        }
    }
    Ok(())
}

/// Setzt neue Bounding-Boxen.
pub fn resize_entities(
    session: &mut EditorSession,
    boxes: &[(EntityIndex, Rect)],
) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    for (index, bounding_box) in boxes {
        if bounding_box.is_empty() {
            bail!("Leere Bounding-Box {bounding_box:?} für {index:?}");
        }
    }
    let indexes: Vec<EntityIndex> = boxes.iter().map(|(index, _)| *index).collect();
    ensure_entities_exist(map, &indexes)?;

    for (index, bounding_box) in boxes {
        if let Some(entity) = map.entity_mut(*index) {
            entity.set_bounding_box(*bounding_box);
        }
    }
    Ok(())
}

/// Fügt Entities an ihren Indizes ein und selektiert sie.
pub fn add_entities(session: &mut EditorSession, entities: &[AddableEntity]) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    let mut sorted: Vec<&AddableEntity> = entities.iter().collect();
    sorted.sort_by_key(|addable| addable.index);

    for addable in &sorted {
        map.insert_entity(addable.entity.clone(), addable.index)?;
    }
    session.replace_selection(sorted.iter().map(|addable| addable.index));
    Ok(())
}

/// Entfernt Entities und leert die Selektion.
pub fn remove_entities(session: &mut EditorSession, indexes: &[EntityIndex]) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    let removed = map.remove_entities(indexes)?;
    log::debug!("{} Entities entfernt", removed.len());
    session.replace_selection([]);
    Ok(())
}

/// Setzt die Richtung; `None` nur, wenn die Entity "keine Richtung" erlaubt.
pub fn set_direction(
    session: &mut EditorSession,
    indexes: &[EntityIndex],
    direction: Option<u32>,
) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    ensure_entities_exist(map, indexes)?;
    for index in indexes {
        let Some(entity) = map.entity(*index) else {
            continue;
        };
        let valid = match direction {
            Some(d) => d < entity.num_directions,
            None => entity.no_direction_label.is_some(),
        };
        if !valid {
            bail!("Richtung {direction:?} ungültig für {index:?}");
        }
    }

    for index in indexes {
        if let Some(entity) = map.entity_mut(*index) {
            entity.direction = direction;
        }
    }
    Ok(())
}

/// Bearbeiten-Dialog gehört dem Aufrufer; hier wird nur geprüft und geloggt.
pub fn edit_entity(session: &mut EditorSession, index: EntityIndex) -> anyhow::Result<()> {
    let map = tile_map_mut(session)?;
    ensure_entities_exist(map, &[index])?;
    log::info!("Bearbeiten angefordert für {:?}", index);
    Ok(())
}
