//! Entities der Karte: Index, Typ, Resize-Modus und Modell.

use super::geometry::Rect;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Position einer Entity auf der Karte: `(layer, position)`.
///
/// Die Ordnung ist lexikografisch nach Layer, dann Position. Innerhalb eines
/// Layers sind die Positionen lückenlos ab 0 vergeben.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityIndex {
    /// Layer der Entity
    pub layer: i32,
    /// Position innerhalb des Layers
    pub position: i32,
}

impl EntityIndex {
    /// Ungültiger Index ("keine Entity").
    pub const INVALID: EntityIndex = EntityIndex {
        layer: i32::MIN,
        position: -1,
    };

    /// Erstellt einen Index.
    pub const fn new(layer: i32, position: i32) -> Self {
        Self { layer, position }
    }

    /// `false` für den ungültigen Index.
    pub fn is_valid(&self) -> bool {
        self.position >= 0
    }
}

impl Default for EntityIndex {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Wie eine Entity in der Größe verändert werden darf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Nicht veränderbar
    #[default]
    None,
    /// Nur horizontal, Höhe fest auf Basisgröße
    HorizontalOnly,
    /// Nur vertikal, Breite fest auf Basisgröße
    VerticalOnly,
    /// Breite und Höhe bleiben gleich
    Square,
    /// Eine Achse nach Wahl, die andere fest auf Basisgröße
    SingleDimension,
    /// Eine Achse nach Wahl, die andere behält ihre aktuelle Größe
    MultiDimensionOne,
    /// Beide Achsen frei
    MultiDimensionAll,
}

impl ResizeMode {
    /// Reihenfolge bei der Leader-Wahl: frei veränderbare Modi zuerst.
    pub const PRIORITY: [ResizeMode; 7] = [
        ResizeMode::MultiDimensionAll,
        ResizeMode::MultiDimensionOne,
        ResizeMode::SingleDimension,
        ResizeMode::Square,
        ResizeMode::HorizontalOnly,
        ResizeMode::VerticalOnly,
        ResizeMode::None,
    ];

    /// Rang in `PRIORITY` (0 = höchste Priorität).
    pub fn priority_rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|mode| *mode == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// `true`, wenn überhaupt eine Größenänderung erlaubt ist.
    pub fn is_resizable(self) -> bool {
        self != ResizeMode::None
    }

    /// Darf horizontal wachsen? `SingleDimension` löst gegen die bevorzugte Achse auf.
    pub fn is_horizontally_resizable(self, horizontal_preferred: bool) -> bool {
        match self {
            ResizeMode::HorizontalOnly
            | ResizeMode::MultiDimensionAll
            | ResizeMode::MultiDimensionOne
            | ResizeMode::Square => true,
            ResizeMode::SingleDimension => horizontal_preferred,
            ResizeMode::None | ResizeMode::VerticalOnly => false,
        }
    }

    /// Darf vertikal wachsen? `SingleDimension` löst gegen die bevorzugte Achse auf.
    pub fn is_vertically_resizable(self, horizontal_preferred: bool) -> bool {
        match self {
            ResizeMode::VerticalOnly
            | ResizeMode::MultiDimensionAll
            | ResizeMode::MultiDimensionOne
            | ResizeMode::Square => true,
            ResizeMode::SingleDimension => !horizontal_preferred,
            ResizeMode::None | ResizeMode::HorizontalOnly => false,
        }
    }
}

/// Art einer Entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Statisches Tile (liegt vor allen dynamischen Entities des Layers)
    #[default]
    Tile,
    /// Dynamisches Tile
    DynamicTile,
    /// Sonstiges dynamisches Objekt (NPC, Truhe, Teleporter, …)
    Object,
}

impl EntityType {
    /// Alles außer statischen Tiles ist dynamisch.
    pub fn is_dynamic(self) -> bool {
        self != EntityType::Tile
    }
}

/// Muster aus dem Tileset-Picker, aus dem ein neues Tile entsteht.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePattern {
    /// Muster-ID im Tileset
    pub id: String,
    /// Rahmen des Musters im Tileset-Bild
    pub frame: Rect,
    /// Standard-Layer des Musters
    pub default_layer: i32,
}

/// Eine Entity der Karte bzw. eine noch nicht eingefügte Kopie davon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityModel {
    /// Art der Entity
    pub entity_type: EntityType,
    /// Muster-ID (nur Tiles)
    #[serde(default)]
    pub pattern: Option<String>,
    /// Layer, auf dem die Entity liegt bzw. landen soll
    pub layer: i32,
    /// Ecke oben links
    pub top_left: IVec2,
    /// Aktuelle Größe
    pub size: IVec2,
    /// Kleinste Größeneinheit pro Achse; die Größe bleibt ein Vielfaches davon
    pub base_size: IVec2,
    /// Erlaubte Größenänderung
    #[serde(default)]
    pub resize_mode: ResizeMode,
    /// Bevorzugter Layer beim Platzieren
    #[serde(default)]
    pub preferred_layer: Option<i32>,
    /// Anzahl möglicher Richtungen (0 = Entity hat keine Richtung)
    #[serde(default)]
    pub num_directions: u32,
    /// Beschriftung des Sonderwerts "keine Richtung", falls erlaubt
    #[serde(default)]
    pub no_direction_label: Option<String>,
    /// Aktuelle Richtung (`None` = keine Richtung)
    #[serde(default)]
    pub direction: Option<u32>,
}

impl EntityModel {
    /// Erstellt eine Entity mit Basisgröße = Größe und ohne Resize.
    pub fn new(entity_type: EntityType, bounding_box: Rect, layer: i32) -> Self {
        let size = bounding_box.size.max(IVec2::ONE);
        Self {
            entity_type,
            pattern: None,
            layer,
            top_left: bounding_box.top_left,
            size,
            base_size: size,
            resize_mode: ResizeMode::None,
            preferred_layer: None,
            num_directions: 0,
            no_direction_label: None,
            direction: None,
        }
    }

    /// Statisches Tile eines Musters; frei in beiden Achsen veränderbar.
    pub fn tile(pattern: impl Into<String>, bounding_box: Rect, layer: i32) -> Self {
        let mut tile = Self::new(EntityType::Tile, bounding_box, layer);
        tile.pattern = Some(pattern.into());
        tile.resize_mode = ResizeMode::MultiDimensionAll;
        tile
    }

    /// Erstellt ein Tile aus einem Tileset-Muster (Layer = bevorzugter Layer = Standard-Layer).
    pub fn from_pattern(pattern: &TilePattern) -> Self {
        Self::tile(pattern.id.clone(), pattern.frame, pattern.default_layer)
            .with_preferred_layer(pattern.default_layer)
    }

    /// Setzt den Resize-Modus.
    pub fn with_resize_mode(mut self, resize_mode: ResizeMode) -> Self {
        self.resize_mode = resize_mode;
        self
    }

    /// Setzt die Basisgröße (mindestens 1×1).
    pub fn with_base_size(mut self, base_size: IVec2) -> Self {
        self.base_size = base_size.max(IVec2::ONE);
        self
    }

    /// Setzt den bevorzugten Layer.
    pub fn with_preferred_layer(mut self, layer: i32) -> Self {
        self.preferred_layer = Some(layer);
        self
    }

    /// Setzt die Richtungsregeln.
    pub fn with_directions(mut self, num_directions: u32, no_direction_label: Option<&str>) -> Self {
        self.num_directions = num_directions;
        self.no_direction_label = no_direction_label.map(str::to_owned);
        self
    }

    /// Bounding-Box der Entity.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_top_left_size(self.top_left, self.size)
    }

    /// Setzt Position und Größe auf einmal.
    pub fn set_bounding_box(&mut self, bounding_box: Rect) {
        self.top_left = bounding_box.top_left;
        self.size = bounding_box.size;
    }

    /// Dynamische Entities liegen auf ihrem Layer hinter allen statischen Tiles.
    pub fn is_dynamic(&self) -> bool {
        self.entity_type.is_dynamic()
    }

    /// `true`, wenn der Resize-Modus eine Größenänderung erlaubt.
    pub fn is_resizable(&self) -> bool {
        self.resize_mode.is_resizable()
    }

    /// `true` für statische und dynamische Tiles.
    pub fn is_tile(&self) -> bool {
        matches!(
            self.entity_type,
            EntityType::Tile | EntityType::DynamicTile
        )
    }
}
