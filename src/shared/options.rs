//! Zentrale Konfiguration für den Karten-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Raster ──────────────────────────────────────────────────────────

/// Raster-Einheit für Verschiebe- und Platzier-Deltas (Karten-Pixel).
pub const GRID_UNIT: i32 = 8;

// ── Selektion ───────────────────────────────────────────────────────

/// Manhattan-Distanz, ab der ein Modifier-Klick zum Auswahlrechteck wird.
pub const DRAG_THRESHOLD: i32 = 4;

// ── Resize ──────────────────────────────────────────────────────────

/// Quantisierung pro Achse, wenn der Leader auf dieser Achse nicht wachsen kann.
pub const DEFAULT_RESIZE_UNIT: i32 = 8;

/// Stempeln: einzelner Klon nach echtem Resize wird auf Basisgröße zurückgesetzt.
pub const RESET_SINGLE_CLONE_SIZE: bool = true;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `map_view_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Raster-Einheit für Verschiebe- und Platzier-Deltas
    #[serde(default = "default_grid_unit")]
    pub grid_unit: i32,
    /// Drag-Schwelle (Manhattan) für verzögerte Modifier-Klicks
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: i32,
    /// Resize-Einheit für Achsen, auf denen der Leader nicht wachsen kann
    #[serde(default = "default_resize_unit")]
    pub default_resize_unit: i32,
    /// Einzelnen Klon nach Resize auf Basisgröße zurücksetzen
    #[serde(default = "default_reset_single_clone_size")]
    pub reset_single_clone_size: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_unit: GRID_UNIT,
            drag_threshold: DRAG_THRESHOLD,
            default_resize_unit: DEFAULT_RESIZE_UNIT,
            reset_single_clone_size: RESET_SINGLE_CLONE_SIZE,
        }
    }
}

/// Serde-Default für `grid_unit` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_grid_unit() -> i32 {
    GRID_UNIT
}

fn default_drag_threshold() -> i32 {
    DRAG_THRESHOLD
}

fn default_resize_unit() -> i32 {
    DEFAULT_RESIZE_UNIT
}

fn default_reset_single_clone_size() -> bool {
    RESET_SINGLE_CLONE_SIZE
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("map_view_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("map_view_editor.toml")
    }

    /// Raster-Einheit, mindestens 1.
    pub fn grid(&self) -> i32 {
        self.grid_unit.max(1)
    }
}
