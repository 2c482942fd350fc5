//! Use-Case: Ziel-Layer und Einfüge-Index für neu platzierte Entities.

use crate::app::events::AddableEntity;
use crate::core::{EntityIndex, EntityModel, MapQuery, Rect};
use std::collections::BTreeMap;

/// Bestimmt den Layer, auf dem eine Entity eingefügt wird.
///
/// Ohne `guess_layer` bleibt ein gültiger deklarierter Layer erhalten.
/// Sonst gewinnt der bevorzugte Layer, solange darunter nichts Höheres liegt.
pub fn find_best_layer(
    map: &dyn MapQuery,
    entity: &EntityModel,
    guess_layer: bool,
    layer_in_rectangle: impl Fn(Rect) -> i32,
) -> i32 {
    if !guess_layer && map.is_valid_layer(entity.layer) {
        return entity.layer;
    }

    let layer_under = layer_in_rectangle(entity.bounding_box());
    let Some(preferred_layer) = entity.preferred_layer else {
        return layer_under;
    };
    if !map.is_valid_layer(preferred_layer) {
        return layer_under;
    }
    if layer_under > preferred_layer {
        // Bevorzugter Layer wäre verdeckt
        return layer_under;
    }
    preferred_layer
}

/// Sortiert stabil nach Layer, auf gleichem Layer statische vor dynamischen.
pub fn sort_for_insertion(entities: &mut [EntityModel]) {
    entities.sort_by_key(|entity| (entity.layer, entity.is_dynamic()));
}

/// Vergibt Einfüge-Indizes für eine bereits sortierte Liste.
///
/// Statische Tiles landen hinter den vorhandenen Tiles ihres Layers,
/// dynamische Entities hinter allen Entities des Layers.
///
/// # Panics
/// Wenn die Indizes nicht streng aufsteigend sind (Liste war nicht sortiert).
pub fn assign_indexes(map: &dyn MapQuery, entities: Vec<EntityModel>) -> Vec<AddableEntity> {
    let mut num_tiles: BTreeMap<i32, i32> = BTreeMap::new();
    let mut num_dynamic: BTreeMap<i32, i32> = BTreeMap::new();
    let mut previous: Option<EntityIndex> = None;

    entities
        .into_iter()
        .map(|entity| {
            let layer = entity.layer;
            let tiles = *num_tiles
                .entry(layer)
                .or_insert_with(|| map.num_tiles(layer));
            let dynamic = num_dynamic
                .entry(layer)
                .or_insert_with(|| map.num_dynamic_entities(layer));

            let position = if entity.is_dynamic() {
                let position = tiles + *dynamic;
                *dynamic += 1;
                position
            } else {
                num_tiles.insert(layer, tiles + 1);
                tiles
            };

            let index = EntityIndex::new(layer, position);
            if let Some(previous) = previous {
                assert!(
                    index > previous,
                    "Einfüge-Indizes nicht aufsteigend: {previous:?} vor {index:?}"
                );
            }
            previous = Some(index);
            AddableEntity { entity, index }
        })
        .collect()
}

/// Layer bestimmen, sortieren und Indizes vergeben: fertig zum Einfügen.
pub fn prepare_addition(
    map: &dyn MapQuery,
    mut entities: Vec<EntityModel>,
    guess_layer: bool,
    layer_in_rectangle: impl Fn(Rect) -> i32,
) -> Vec<AddableEntity> {
    for entity in &mut entities {
        entity.layer = find_best_layer(map, entity, guess_layer, &layer_in_rectangle);
    }
    sort_for_insertion(&mut entities);
    assign_indexes(map, entities)
}
