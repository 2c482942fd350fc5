//! Ruhezustand: Klick-Selektion und Start von Verschieben/Rechteck.

use super::{HandlerResult, StateContext, Transition};
use crate::app::events::{Modifiers, PointerButton};
use crate::app::host::MapHost;
use crate::core::{floor_to_grid, manhattan_length, to_point};
use glam::{IVec2, Vec2};

/// Ruhezustand.
///
/// Ein Modifier-Klick auf eine Entity wird zurückgestellt: Loslassen
/// schaltet ihre Selektion um, Ziehen über die Drag-Schwelle startet ein
/// Auswahlrechteck am Druckpunkt.
#[derive(Debug, Clone, Default)]
pub struct IdleState {
    pressed_point: IVec2,
    pending_toggle: bool,
}

impl IdleState {
    pub(super) fn pointer_pressed(
        &mut self,
        host: &mut dyn MapHost,
        ctx: &StateContext,
        pos: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> HandlerResult {
        if button == PointerButton::Middle {
            return Ok(None);
        }

        let point = to_point(pos);
        self.pressed_point = point;

        let item = host.entity_at(point);
        let keep_selection = modifiers.any() || item.is_some_and(|index| host.is_selected(index));
        if !keep_selection {
            host.clear_selection();
        }

        match (button, item) {
            (PointerButton::Primary, Some(_)) if modifiers.any() => {
                self.pending_toggle = true;
                Ok(None)
            }
            (PointerButton::Primary, Some(index)) => {
                if !host.is_selected(index) {
                    host.select_entity(index, true);
                }
                Ok(Some(Transition::Move {
                    anchor: floor_to_grid(pos, ctx.options.grid()),
                }))
            }
            (PointerButton::Primary, None) => {
                Ok(Some(Transition::RectangleSelect { anchor: point }))
            }
            (_, Some(index)) => {
                if !host.is_selected(index) {
                    host.select_entity(index, true);
                }
                Ok(None)
            }
            (_, None) => Ok(None),
        }
    }

    pub(super) fn pointer_moved(&mut self, ctx: &StateContext, pos: Vec2) -> Option<Transition> {
        if !self.pending_toggle {
            return None;
        }
        let distance = manhattan_length(to_point(pos) - self.pressed_point);
        if distance >= ctx.options.drag_threshold {
            return Some(Transition::RectangleSelect {
                anchor: self.pressed_point,
            });
        }
        None
    }

    pub(super) fn pointer_released(&mut self, host: &mut dyn MapHost, pos: Vec2, button: PointerButton) {
        if button != PointerButton::Primary || !self.pending_toggle {
            return;
        }
        if let Some(index) = host.entity_at(to_point(pos)) {
            let selected = host.is_selected(index);
            host.select_entity(index, !selected);
        }
        self.pending_toggle = false;
    }

    /// `true`, solange ein Modifier-Klick auf Loslassen oder Ziehen wartet.
    pub fn has_pending_toggle(&self) -> bool {
        self.pending_toggle
    }
}
