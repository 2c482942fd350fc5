//! Toolkit-unabhängiges Kontextmenü der Kartenansicht.
//!
//! Aufbau (Trennlinien zwischen den Gruppen):
//! - Bearbeiten, Größe ändern, Richtung
//! - In dynamische/statische Tiles umwandeln
//! - Ausschneiden, Kopieren, Einfügen
//! - Layer N, eine Ebene hoch/runter, nach vorne/hinten
//! - Löschen

use super::host::MapHost;
use super::use_cases::selection::{are_entities_resizable, sorted_selection};
use crate::core::{EntityIndex, EntityType, MapQuery};

/// Auslösbare Menü-Aktion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Edit,
    Resize,
    ConvertTiles,
    Cut,
    Copy,
    Paste,
    SetLayer(i32),
    LayerUp,
    LayerDown,
    BringToFront,
    BringToBack,
    Remove,
    /// Richtung setzen (`None` = keine Richtung)
    SetDirection(Option<u32>),
}

/// Eintrag eines Menüs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Action {
        action: MenuAction,
        label: String,
        enabled: bool,
        /// `Some`, wenn der Eintrag ankreuzbar ist
        checked: Option<bool>,
    },
    Submenu {
        label: String,
        enabled: bool,
        entries: Vec<MenuEntry>,
    },
    Separator,
}

impl MenuEntry {
    fn action(action: MenuAction, label: impl Into<String>, enabled: bool) -> Self {
        MenuEntry::Action {
            action,
            label: label.into(),
            enabled,
            checked: None,
        }
    }

    fn checkable(action: MenuAction, label: impl Into<String>, checked: bool) -> Self {
        MenuEntry::Action {
            action,
            label: label.into(),
            enabled: true,
            checked: Some(checked),
        }
    }
}

/// Kontextmenü als Datenbaum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenu {
    pub entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Sucht den Eintrag einer Aktion (auch in Untermenüs).
    pub fn find(&self, action: MenuAction) -> Option<&MenuEntry> {
        find_in(&self.entries, action)
    }

    /// Sucht ein Untermenü nach Beschriftung.
    pub fn submenu(&self, label: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(
            |entry| matches!(entry, MenuEntry::Submenu { label: l, .. } if l == label),
        )
    }

    /// `true`, wenn die Aktion vorhanden und auslösbar ist.
    pub fn is_enabled(&self, action: MenuAction) -> bool {
        matches!(self.find(action), Some(MenuEntry::Action { enabled: true, .. }))
    }

    /// `true`, wenn die Aktion angekreuzt ist.
    pub fn is_checked(&self, action: MenuAction) -> bool {
        matches!(
            self.find(action),
            Some(MenuEntry::Action {
                checked: Some(true),
                ..
            })
        )
    }

    /// Beschriftung einer Aktion.
    pub fn label(&self, action: MenuAction) -> Option<&str> {
        match self.find(action)? {
            MenuEntry::Action { label, .. } => Some(label),
            _ => None,
        }
    }
}

fn find_in(entries: &[MenuEntry], action: MenuAction) -> Option<&MenuEntry> {
    entries.iter().find_map(|entry| match entry {
        MenuEntry::Action { action: a, .. } if *a == action => Some(entry),
        MenuEntry::Submenu { entries, .. } => find_in(entries, action),
        _ => None,
    })
}

/// Beschriftungen für `num_directions` Richtungen.
///
/// 4 und 8 Richtungen haben Namen, alle anderen Anzahlen werden von 0 an
/// durchnummeriert.
pub fn direction_labels(num_directions: u32) -> Vec<String> {
    match num_directions {
        4 => ["Right", "Up", "Left", "Down"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        8 => [
            "Right",
            "Right-up",
            "Up",
            "Left-up",
            "Left",
            "Left-down",
            "Down",
            "Right-down",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        n => (0..n).map(|i| i.to_string()).collect(),
    }
}

/// Baut das Kontextmenü für die aktuelle Selektion.
pub fn build_context_menu(host: &dyn MapHost, can_paste: bool) -> ContextMenu {
    let mut entries = Vec::new();
    let Some(map) = host.map() else {
        return ContextMenu { entries };
    };
    let indexes = sorted_selection(host);
    let has_selection = !indexes.is_empty();

    if has_selection {
        let single_selection = indexes.len() <= 1;
        entries.push(MenuEntry::action(MenuAction::Edit, "Edit", single_selection));
        entries.push(MenuEntry::action(
            MenuAction::Resize,
            "Resize",
            are_entities_resizable(map, &indexes),
        ));
        entries.push(direction_menu(map, &indexes));
        entries.push(MenuEntry::Separator);

        let label = match map.common_type(&indexes) {
            Some(EntityType::Tile) if single_selection => Some("Convert to dynamic tile"),
            Some(EntityType::Tile) => Some("Convert to dynamic tiles"),
            Some(EntityType::DynamicTile) if single_selection => Some("Convert to static tile"),
            Some(EntityType::DynamicTile) => Some("Convert to static tiles"),
            _ => None,
        };
        if let Some(label) = label {
            entries.push(MenuEntry::action(MenuAction::ConvertTiles, label, true));
            entries.push(MenuEntry::Separator);
        }
    }

    entries.push(MenuEntry::action(MenuAction::Cut, "Cut", has_selection));
    entries.push(MenuEntry::action(MenuAction::Copy, "Copy", has_selection));
    entries.push(MenuEntry::action(MenuAction::Paste, "Paste", can_paste));
    entries.push(MenuEntry::Separator);

    if has_selection {
        let common_layer = map.common_layer(&indexes);
        for layer in map.min_layer()..=map.max_layer() {
            entries.push(MenuEntry::checkable(
                MenuAction::SetLayer(layer),
                format!("Layer {layer}"),
                common_layer == Some(layer),
            ));
        }
        entries.push(MenuEntry::action(
            MenuAction::LayerUp,
            "One layer up",
            common_layer.map_or(true, |layer| layer < map.max_layer()),
        ));
        entries.push(MenuEntry::action(
            MenuAction::LayerDown,
            "One layer down",
            common_layer.map_or(true, |layer| layer > map.min_layer()),
        ));
        entries.push(MenuEntry::action(MenuAction::BringToFront, "Bring to front", true));
        entries.push(MenuEntry::action(MenuAction::BringToBack, "Bring to back", true));
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::action(MenuAction::Remove, "Delete", true));
    }

    ContextMenu { entries }
}

/// Untermenü "Direction"; deaktiviert bei unterschiedlichen Regeln oder ohne Richtungen.
fn direction_menu(map: &dyn MapQuery, indexes: &[EntityIndex]) -> MenuEntry {
    let disabled = MenuEntry::Submenu {
        label: "Direction".to_owned(),
        enabled: false,
        entries: Vec::new(),
    };
    let Some((num_directions, no_direction_label)) = map.common_direction_rules(indexes) else {
        return disabled;
    };
    if num_directions == 0 {
        return disabled;
    }

    let common_direction = map.common_direction(indexes);
    let mut entries = Vec::new();
    if let Some(label) = no_direction_label.filter(|label| !label.is_empty()) {
        entries.push(MenuEntry::checkable(
            MenuAction::SetDirection(None),
            label,
            common_direction == Some(None),
        ));
    }
    for (direction, label) in (0..num_directions).zip(direction_labels(num_directions)) {
        entries.push(MenuEntry::checkable(
            MenuAction::SetDirection(Some(direction)),
            label,
            common_direction == Some(Some(direction)),
        ));
    }

    MenuEntry::Submenu {
        label: "Direction".to_owned(),
        enabled: true,
        entries,
    }
}
