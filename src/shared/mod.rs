//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Konfiguration, die `app` und das Binary gemeinsam nutzen.

pub mod options;

pub use options::EditorOptions;
pub use options::{DEFAULT_RESIZE_UNIT, DRAG_THRESHOLD, GRID_UNIT};
