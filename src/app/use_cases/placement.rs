//! Use-Case: Vorbereitung neuer Entities für das Platzieren.

use crate::core::{round_to_grid, EntityModel, TilePattern};
use glam::IVec2;

/// Mittelpunkt der gemeinsamen Bounding-Box (zwischen erstem und letztem Pixel).
pub fn entities_center(entities: &[EntityModel]) -> Option<IVec2> {
    let first = entities.first()?.bounding_box();
    let (min, max) = entities.iter().skip(1).fold(
        (first.top_left, first.bottom_right()),
        |(min, max), entity| {
            let bounding_box = entity.bounding_box();
            (
                min.min(bounding_box.top_left),
                max.max(bounding_box.bottom_right()),
            )
        },
    );
    Some((min + max) / 2)
}

/// Zentriert die Gruppe auf `point` und rastet jede Entity auf das Raster ein.
///
/// Die relative Anordnung bleibt bis auf das Einrasten erhalten.
pub fn center_on_point(entities: &mut [EntityModel], point: IVec2, grid_unit: i32) {
    let Some(center) = entities_center(entities) else {
        return;
    };
    for entity in entities.iter_mut() {
        let offset_in_group = center - entity.top_left;
        entity.top_left = round_to_grid(point - offset_in_group, grid_unit);
    }
}

/// Verschiebt alle Entities um `translation`.
pub fn translate_entities(entities: &mut [EntityModel], translation: IVec2) {
    for entity in entities.iter_mut() {
        entity.top_left += translation;
    }
}

/// Erstellt ein Tile pro gewähltem Muster, angeordnet wie im Tileset.
///
/// Liefert zusätzlich, ob der Layer geraten werden darf: nur wenn alle
/// Muster denselben Standard-Layer haben. `None` ohne verwendbare Muster.
pub fn tiles_from_patterns(patterns: &[TilePattern]) -> Option<(Vec<EntityModel>, bool)> {
    let common_layer = patterns.first()?.default_layer;
    let mut has_common_layer = true;
    let mut tiles = Vec::with_capacity(patterns.len());

    for pattern in patterns {
        if pattern.id.is_empty() {
            continue;
        }
        tiles.push(EntityModel::from_pattern(pattern));
        if pattern.default_layer != common_layer {
            has_common_layer = false;
        }
    }

    if tiles.is_empty() {
        return None;
    }
    Some((tiles, has_common_layer))
}
