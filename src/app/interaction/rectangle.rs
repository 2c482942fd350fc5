//! Auswahlrechteck aufziehen.

use crate::app::host::{Feedback, MapHost};
use crate::app::use_cases::selection::select_entities_in_rect;
use crate::core::{to_point, EntityIndex, Rect};
use glam::{IVec2, Vec2};

/// Zustand während des Aufziehens eines Auswahlrechtecks.
#[derive(Debug, Clone)]
pub struct RectangleSelectState {
    anchor: IVec2,
    current: IVec2,
    initial_selection: Vec<EntityIndex>,
}

impl RectangleSelectState {
    /// Rechteck mit fester Ecke `anchor`.
    pub fn new(anchor: IVec2) -> Self {
        Self {
            anchor,
            current: anchor,
            initial_selection: Vec::new(),
        }
    }

    /// Aktuelles Rechteck.
    pub fn area(&self) -> Rect {
        Rect::from_two_points(self.anchor, self.current)
    }

    pub(super) fn start(&mut self, host: &mut dyn MapHost) {
        self.initial_selection = host.selected_entities();
        host.set_feedback(Some(Feedback::SelectionRectangle(self.area())));
    }

    pub(super) fn pointer_moved(&mut self, host: &mut dyn MapHost, pos: Vec2) {
        let current = to_point(pos);
        if current == self.current {
            return;
        }
        self.current = current;

        let area = self.area();
        host.set_feedback(Some(Feedback::SelectionRectangle(area)));
        select_entities_in_rect(host, area, &self.initial_selection);
    }
}
