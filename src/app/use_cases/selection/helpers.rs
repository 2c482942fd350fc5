//! Gemeinsame Hilfsfunktionen für Selektions-Use-Cases.

use crate::app::host::MapHost;
use crate::core::{EntityIndex, EntityModel, MapQuery};

/// Selektion aufsteigend nach Index sortiert.
pub fn sorted_selection(host: &dyn MapHost) -> Vec<EntityIndex> {
    let mut indexes = host.selected_entities();
    indexes.sort();
    indexes
}

/// Kopien der selektierten Entities in Selektions-Reihenfolge.
pub fn clone_selected_entities(host: &dyn MapHost) -> Vec<EntityModel> {
    let Some(map) = host.map() else {
        return Vec::new();
    };
    host.selected_entities()
        .into_iter()
        .filter_map(|index| map.entity(index).cloned())
        .collect()
}

/// `true`, wenn mindestens eine der Entities in der Größe veränderbar ist.
pub fn are_entities_resizable(map: &dyn MapQuery, indexes: &[EntityIndex]) -> bool {
    indexes
        .iter()
        .filter_map(|index| map.entity(*index))
        .any(EntityModel::is_resizable)
}
