//! Lesende Karten-Abfragen, die der Interaktionskern vom Karten-Modell braucht.

use super::entity::{EntityIndex, EntityModel, EntityType};

/// Read-only Sicht auf eine Karte mit Layern und indexierten Entities.
pub trait MapQuery {
    /// Entity an einem Index, falls vorhanden.
    fn entity(&self, index: EntityIndex) -> Option<&EntityModel>;

    /// Kleinster gültiger Layer.
    fn min_layer(&self) -> i32;

    /// Größter gültiger Layer.
    fn max_layer(&self) -> i32;

    /// Anzahl statischer Tiles auf einem Layer.
    fn num_tiles(&self, layer: i32) -> i32;

    /// Anzahl dynamischer Entities auf einem Layer.
    fn num_dynamic_entities(&self, layer: i32) -> i32;

    /// Prüft, ob an `index` eine Entity existiert.
    fn entity_exists(&self, index: EntityIndex) -> bool {
        self.entity(index).is_some()
    }

    /// Prüft, ob `layer` auf dieser Karte existiert.
    fn is_valid_layer(&self, layer: i32) -> bool {
        layer >= self.min_layer() && layer <= self.max_layer()
    }

    /// Gemeinsamer Layer aller Entities, `None` bei leerer Liste oder verschiedenen Layern.
    fn common_layer(&self, indexes: &[EntityIndex]) -> Option<i32> {
        common_value(indexes.iter().map(|index| index.layer))
    }

    /// Gemeinsamer Typ aller Entities.
    fn common_type(&self, indexes: &[EntityIndex]) -> Option<EntityType> {
        let types: Option<Vec<_>> = indexes
            .iter()
            .map(|index| self.entity(*index).map(|entity| entity.entity_type))
            .collect();
        common_value(types?.into_iter())
    }

    /// Gemeinsame Richtungsregeln: Anzahl Richtungen und optionaler "keine Richtung"-Text.
    fn common_direction_rules(&self, indexes: &[EntityIndex]) -> Option<(u32, Option<String>)> {
        let rules: Option<Vec<_>> = indexes
            .iter()
            .map(|index| {
                self.entity(*index)
                    .map(|entity| (entity.num_directions, entity.no_direction_label.clone()))
            })
            .collect();
        common_value(rules?.into_iter())
    }

    /// Gemeinsame Richtung (`Some(None)` = alle ohne Richtung).
    fn common_direction(&self, indexes: &[EntityIndex]) -> Option<Option<u32>> {
        let directions: Option<Vec<_>> = indexes
            .iter()
            .map(|index| self.entity(*index).map(|entity| entity.direction))
            .collect();
        common_value(directions?.into_iter())
    }
}

/// Liefert den Wert, wenn alle Elemente gleich sind (und mindestens eins existiert).
fn common_value<T: PartialEq>(mut values: impl Iterator<Item = T>) -> Option<T> {
    let first = values.next()?;
    for value in values {
        if value != first {
            return None;
        }
    }
    Some(first)
}
