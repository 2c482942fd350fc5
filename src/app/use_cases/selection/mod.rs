//! Use-Case-Funktionen für die Entity-Selektion.
//!
//! - `rect` — Rechteck-Selektion (Drag auf freier Fläche)
//! - `helpers` — Sortierte Selektion, Klone, Resize-Prüfung

mod helpers;
mod rect;

pub use helpers::{are_entities_resizable, clone_selected_entities, sorted_selection};
pub use rect::select_entities_in_rect;
