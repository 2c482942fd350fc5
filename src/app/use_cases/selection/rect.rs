//! Use-Case: Rechteck-Selektion.

use crate::app::host::MapHost;
use crate::core::{EntityIndex, Rect};
use indexmap::IndexSet;

/// Selektiert alle Entities vollständig im Rechteck (inkl. Rand) plus die
/// Selektion von vor dem Drag, als eine einzige Änderung.
pub fn select_entities_in_rect(host: &mut dyn MapHost, area: Rect, initial_selection: &[EntityIndex]) {
    let mut selection: IndexSet<EntityIndex> = host.entities_in_rectangle(area).into_iter().collect();
    selection.extend(initial_selection.iter().copied());

    let selection: Vec<EntityIndex> = selection.into_iter().collect();
    host.set_selected_entities(&selection);
}
