//! Use-Case: Größe mehrerer Entities gemeinsam ändern.
//!
//! Ein Leader bestimmt die gemeinsame Referenz-Änderung; jede Entity
//! wendet sie unter Beachtung ihres Resize-Modus und ihrer Basisgröße an.

use crate::core::{manhattan_length, round_down, EntityIndex, MapQuery, Rect, ResizeMode};
use glam::IVec2;

/// Eingangsdaten einer Entity für die Größenänderung (Zustand bei Start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeCandidate {
    pub index: EntityIndex,
    /// Bounding-Box bei Start der Größenänderung
    pub bounding_box: Rect,
    pub base_size: IVec2,
    pub resize_mode: ResizeMode,
}

impl ResizeCandidate {
    /// Liest eine Entity aus der Karte.
    pub fn from_map(map: &dyn MapQuery, index: EntityIndex) -> Option<Self> {
        map.entity(index).map(|entity| Self {
            index,
            bounding_box: entity.bounding_box(),
            base_size: entity.base_size,
            resize_mode: entity.resize_mode,
        })
    }
}

/// Laufende Größenänderung: Originalboxen, Leader und Gruppenmittelpunkt.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    candidates: Vec<ResizeCandidate>,
    leader: usize,
    center: IVec2,
    num_free_entities: usize,
    default_unit: i32,
}

impl ResizeSession {
    /// Startet eine Größenänderung. `None` bei leerer Eingabe.
    ///
    /// `pointer` ist die Zeiger-Position bei Start; sie bestimmt den Leader.
    pub fn begin(
        mut candidates: Vec<ResizeCandidate>,
        pointer: IVec2,
        default_unit: i32,
    ) -> Option<Self> {
        candidates.sort_by_key(|candidate| candidate.index);
        candidates.dedup_by_key(|candidate| candidate.index);

        let leader = select_leader(&candidates, pointer)?;
        let total_box = candidates
            .iter()
            .skip(1)
            .fold(candidates[0].bounding_box, |total, candidate| {
                total.united(&candidate.bounding_box)
            });
        let num_free_entities = candidates
            .iter()
            .filter(|candidate| candidate.resize_mode == ResizeMode::MultiDimensionAll)
            .count();

        Some(Self {
            candidates,
            leader,
            center: total_box.center(),
            num_free_entities,
            default_unit: default_unit.max(1),
        })
    }

    /// Index des Leaders.
    pub fn leader(&self) -> EntityIndex {
        self.candidates[self.leader].index
    }

    /// Mittelpunkt der Gesamt-Bounding-Box bei Start.
    pub fn center(&self) -> IVec2 {
        self.center
    }

    /// Anzahl frei veränderbarer Entities (`MultiDimensionAll`).
    pub fn num_free_entities(&self) -> usize {
        self.num_free_entities
    }

    /// Referenz-Änderung für eine Zeiger-Position und die bevorzugte Achse
    /// (`true` = horizontal).
    pub fn reference_change(&self, pointer: IVec2) -> (IVec2, bool) {
        let leader = &self.candidates[self.leader];
        let leader_distance = pointer - leader.bounding_box.bottom_right_exclusive();
        let horizontal_preferred = leader_distance.x.abs() > leader_distance.y.abs();

        // Basisgröße des Leaders gibt die Schrittweite vor, wo er wachsen kann.
        let mut unit = IVec2::splat(self.default_unit);
        if leader.resize_mode.is_horizontally_resizable(horizontal_preferred) {
            unit.x = leader.base_size.x;
        }
        if leader.resize_mode.is_vertically_resizable(horizontal_preferred) {
            unit.y = leader.base_size.y;
        }
        let mut change = round_down(leader_distance, unit);

        // Keine Achse verschieben, auf der nichts wachsen kann.
        let resizing_horizontally = self
            .candidates
            .iter()
            .any(|c| c.resize_mode.is_horizontally_resizable(horizontal_preferred));
        let resizing_vertically = self
            .candidates
            .iter()
            .any(|c| c.resize_mode.is_vertically_resizable(horizontal_preferred));
        if !resizing_horizontally {
            change.x = 0;
        }
        if !resizing_vertically {
            change.y = 0;
        }

        (change, horizontal_preferred)
    }

    /// Neue Bounding-Boxen aller Entities für eine Zeiger-Position,
    /// aufsteigend nach Index.
    pub fn compute(&self, pointer: IVec2) -> Vec<(EntityIndex, Rect)> {
        let (change, horizontal_preferred) = self.reference_change(pointer);
        self.candidates
            .iter()
            .map(|candidate| {
                let new_box = update_box(
                    candidate,
                    change,
                    horizontal_preferred,
                    self.center,
                    self.num_free_entities,
                );
                (candidate.index, new_box)
            })
            .collect()
    }
}

/// Wählt den Leader: in der höchsten belegten Prioritätsgruppe die Entity,
/// deren Ecke unten rechts dem Zeiger am nächsten liegt (Manhattan).
///
/// Bei Gleichstand gewinnt die erste Entity in Eingabe-Reihenfolge.
pub fn select_leader(candidates: &[ResizeCandidate], pointer: IVec2) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, candidate)| {
            let distance =
                manhattan_length(candidate.bounding_box.bottom_right_exclusive() - pointer);
            (candidate.resize_mode.priority_rank(), distance)
        })
        .map(|(i, _)| i)
}

/// Berechnet die neue Bounding-Box einer Entity.
///
/// `A` ist die alte Ecke oben links, `B` die alte letzte Pixel-Ecke plus
/// Referenz-Änderung. Die Spanne A→B wird auf Vielfache der Basisgröße
/// gebracht; Achsen, auf denen die Entity nicht wachsen darf, folgen der
/// Gruppe nur per Verschiebung.
pub fn update_box(
    candidate: &ResizeCandidate,
    reference_change: IVec2,
    horizontal_preferred: bool,
    center: IVec2,
    num_free_entities: usize,
) -> Rect {
    let base = candidate.base_size.max(IVec2::ONE);
    let old_box = candidate.bounding_box;

    let mut mode = candidate.resize_mode;
    if num_free_entities > 1 && mode == ResizeMode::MultiDimensionAll {
        mode = ResizeMode::MultiDimensionOne;
    }

    let mut a = old_box.top_left;
    let mut b = old_box.bottom_right() + reference_change;

    let diff = b - a;
    let sign = IVec2::new(
        if diff.x >= 0 { 1 } else { -1 },
        if diff.y >= 0 { 1 } else { -1 },
    );
    b += sign * (base - (diff.abs() + base) % base);

    if mode == ResizeMode::Square {
        let abs_diff = (b - a).abs();
        let length = abs_diff.x.max(abs_diff.y);
        b = a + sign * length;
    } else {
        if mode == ResizeMode::SingleDimension {
            mode = if horizontal_preferred {
                ResizeMode::HorizontalOnly
            } else {
                ResizeMode::VerticalOnly
            };
        }

        // Horizontal
        if !mode.is_horizontally_resizable(horizontal_preferred) {
            a.x = if old_box.center().x > center.x {
                old_box.x() + reference_change.x
            } else {
                old_box.x()
            };
            b.x = a.x + old_box.width();
        } else {
            match mode {
                ResizeMode::MultiDimensionOne if !horizontal_preferred => {
                    b.x = a.x + old_box.width();
                }
                ResizeMode::MultiDimensionAll | ResizeMode::HorizontalOnly if b.x <= a.x => {
                    a.x += base.x;
                }
                _ => {}
            }
        }

        // Vertikal
        if !mode.is_vertically_resizable(horizontal_preferred) {
            a.y = if old_box.center().y > center.y {
                old_box.y() + reference_change.y
            } else {
                old_box.y()
            };
            b.y = a.y + old_box.height();
        } else {
            match mode {
                ResizeMode::MultiDimensionOne if horizontal_preferred => {
                    b.y = a.y + old_box.height();
                }
                ResizeMode::MultiDimensionAll | ResizeMode::VerticalOnly if b.y <= a.y => {
                    a.y += base.y;
                }
                _ => {}
            }
        }
    }

    Rect::from_top_left_size(a.min(b), (b - a).abs())
}
