//! Ganzzahlige Geometrie für Karten-Koordinaten: Rechtecke und Raster-Snapping.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Achsen-aligniertes Rechteck in Karten-Pixeln (Ecke oben links + Größe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Ecke oben links
    pub top_left: IVec2,
    /// Breite und Höhe (nie negativ)
    pub size: IVec2,
}

impl Rect {
    /// Erstellt ein Rechteck aus Position und Größe.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            top_left: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Erstellt ein Rechteck aus Ecke oben links und Größe.
    pub const fn from_top_left_size(top_left: IVec2, size: IVec2) -> Self {
        Self { top_left, size }
    }

    /// Normalisiert ein Rechteck aus zwei beliebigen Eckpunkten.
    ///
    /// Ecke oben links = komponentenweises Minimum, Größe = komponentenweiser
    /// Betrag der Differenz. `(10,10)` und `(5,40)` ergeben `(5,10)` / `(5,30)`.
    pub fn from_two_points(a: IVec2, b: IVec2) -> Self {
        Self {
            top_left: a.min(b),
            size: (b - a).abs(),
        }
    }

    /// X-Koordinate der linken Kante
    pub fn x(&self) -> i32 {
        self.top_left.x
    }

    /// Y-Koordinate der oberen Kante
    pub fn y(&self) -> i32 {
        self.top_left.y
    }

    /// Breite
    pub fn width(&self) -> i32 {
        self.size.x
    }

    /// Höhe
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Letzter Pixel unten rechts (inklusive, `top_left + size - 1`).
    pub fn bottom_right(&self) -> IVec2 {
        self.top_left + self.size - IVec2::ONE
    }

    /// Ecke unten rechts hinter dem letzten Pixel (`top_left + size`).
    pub fn bottom_right_exclusive(&self) -> IVec2 {
        self.top_left + self.size
    }

    /// Ganzzahliger Mittelpunkt zwischen erstem und letztem Pixel.
    pub fn center(&self) -> IVec2 {
        let last = self.bottom_right();
        IVec2::new(
            (self.top_left.x + last.x) / 2,
            (self.top_left.y + last.y) / 2,
        )
    }

    /// `true`, wenn Breite oder Höhe nicht positiv ist.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Prüft, ob der Pixel `point` im Rechteck liegt.
    pub fn contains_point(&self, point: IVec2) -> bool {
        let end = self.bottom_right_exclusive();
        point.x >= self.top_left.x && point.x < end.x && point.y >= self.top_left.y && point.y < end.y
    }

    /// Prüft, ob `other` vollständig in diesem Rechteck liegt (Ränder inklusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let end = self.bottom_right_exclusive();
        let other_end = other.bottom_right_exclusive();
        other.top_left.x >= self.top_left.x
            && other.top_left.y >= self.top_left.y
            && other_end.x <= end.x
            && other_end.y <= end.y
    }

    /// Prüft, ob sich beide Rechtecke mindestens in einem Pixel überlappen.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let end = self.bottom_right_exclusive();
        let other_end = other.bottom_right_exclusive();
        self.top_left.x < other_end.x
            && other.top_left.x < end.x
            && self.top_left.y < other_end.y
            && other.top_left.y < end.y
    }

    /// Kleinstes Rechteck, das beide Rechtecke umschließt.
    pub fn united(&self, other: &Rect) -> Rect {
        let top_left = self.top_left.min(other.top_left);
        let end = self
            .bottom_right_exclusive()
            .max(other.bottom_right_exclusive());
        Rect::from_top_left_size(top_left, end - top_left)
    }

    /// Verschobene Kopie des Rechtecks.
    pub fn translated(&self, delta: IVec2) -> Rect {
        Rect::from_top_left_size(self.top_left + delta, self.size)
    }
}

/// Manhattan-Länge eines Vektors.
pub fn manhattan_length(v: IVec2) -> i32 {
    v.x.abs() + v.y.abs()
}

/// Rundet eine Zeiger-Position auf den nächsten Pixel.
pub fn to_point(pos: Vec2) -> IVec2 {
    pos.round().as_ivec2()
}

/// Rundet eine Zeiger-Position auf das darunterliegende Vielfache von `unit` ab.
///
/// Rundet Richtung minus unendlich: `(101, 101)` und `(103, 103)` ergeben bei
/// `unit = 8` beide `(96, 96)`, `(-1, 0)` ergibt `(-8, 0)`.
pub fn floor_to_grid(pos: Vec2, unit: i32) -> IVec2 {
    let unit_f = unit as f32;
    (pos / unit_f).floor().as_ivec2() * unit
}

/// Rundet einen Punkt auf das nächstgelegene Vielfache von `unit`.
pub fn round_to_grid(point: IVec2, unit: i32) -> IVec2 {
    let unit_f = unit as f32;
    (point.as_vec2() / unit_f).round().as_ivec2() * unit
}

/// Rundet jede Komponente betragsmäßig auf ein Vielfaches ihrer Einheit ab.
///
/// Das Vorzeichen bleibt erhalten (Abrunden Richtung null):
/// `(13, -13)` mit Einheit `(8, 8)` ergibt `(8, -8)`.
pub fn round_down(v: IVec2, unit: IVec2) -> IVec2 {
    IVec2::new(
        round_down_component(v.x, unit.x),
        round_down_component(v.y, unit.y),
    )
}

fn round_down_component(value: i32, unit: i32) -> i32 {
    if unit <= 0 {
        return value;
    }
    (value / unit) * unit
}
