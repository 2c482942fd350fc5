use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Maustaste eines Zeiger-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Linke Taste
    Primary,
    /// Rechte Taste
    Secondary,
    /// Mittlere Taste
    Middle,
}

/// Gehaltene Modifier-Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Strg gehalten
    #[serde(default)]
    pub control: bool,
    /// Umschalt gehalten
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    /// Strg gehalten
    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        shift: false,
    };
    /// Umschalt gehalten
    pub const SHIFT: Modifiers = Modifiers {
        control: false,
        shift: true,
    };

    /// `true`, wenn Strg oder Umschalt gehalten wird.
    pub fn any(&self) -> bool {
        self.control || self.shift
    }
}

/// Tasten mit eigener Bedeutung in der Kartenansicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKey {
    Enter,
    Plus,
    Minus,
    Escape,
    Delete,
    /// Buchstaben-/Zeichentaste
    Char(char),
}

/// Eingabe aus Ansicht und Begleit-Widgets, bereits in Karten-Koordinaten.
///
/// Events sind Eingaben ohne direkte Mutationslogik; der aktive
/// Interaktionszustand entscheidet, was daraus wird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Maustaste gedrückt
    PointerPressed {
        pos: Vec2,
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Zeiger bewegt
    PointerMoved { pos: Vec2 },
    /// Maustaste losgelassen
    PointerReleased { pos: Vec2, button: PointerButton },
    /// Doppelklick
    DoubleClicked { pos: Vec2 },
    /// Kontextmenü angefordert (Rechtsklick oder Menütaste)
    ContextMenuRequested { pos: Vec2 },
    /// Taste gedrückt
    KeyPressed { key: EditorKey },
    /// Auswahl im Tileset-Picker hat sich geändert
    PatternSelectionChanged,
    /// Tileset wurde gewechselt oder neu geladen
    TilesetChanged,
    /// Expliziter Abbruch der laufenden Interaktion
    CancelRequested,
}

impl InputEvent {
    /// Zeiger-Position, falls das Event eine trägt.
    pub fn pointer_position(&self) -> Option<Vec2> {
        match self {
            InputEvent::PointerPressed { pos, .. }
            | InputEvent::PointerMoved { pos }
            | InputEvent::PointerReleased { pos, .. }
            | InputEvent::DoubleClicked { pos }
            | InputEvent::ContextMenuRequested { pos } => Some(*pos),
            InputEvent::KeyPressed { .. }
            | InputEvent::PatternSelectionChanged
            | InputEvent::TilesetChanged
            | InputEvent::CancelRequested => None,
        }
    }
}
