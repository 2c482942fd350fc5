//! Selektierte Entities rasterweise verschieben.

use super::{HandlerResult, StateContext};
use crate::app::events::EditRequest;
use crate::app::host::MapHost;
use crate::core::floor_to_grid;
use glam::{IVec2, Vec2};

/// Zustand während des Verschiebens.
///
/// Jedes Delta bezieht sich auf den vorherigen gerasterten Punkt. Nur das
/// erste Delta einer Geste verschmilzt nicht mit dem vorherigen Undo-Schritt.
#[derive(Debug, Clone)]
pub struct MoveState {
    last_point: IVec2,
    first_move_done: bool,
}

impl MoveState {
    /// Verschieben ab dem gerasterten Punkt `anchor`.
    pub fn new(anchor: IVec2) -> Self {
        Self {
            last_point: anchor,
            first_move_done: false,
        }
    }

    pub(super) fn pointer_moved(
        &mut self,
        host: &mut dyn MapHost,
        ctx: &StateContext,
        pos: Vec2,
    ) -> HandlerResult {
        let current = floor_to_grid(pos, ctx.options.grid());
        if current == self.last_point {
            return Ok(None);
        }

        let translation = current - self.last_point;
        self.last_point = current;

        let indexes = host.selected_entities();
        host.submit(EditRequest::MoveEntities {
            indexes,
            translation,
            merge_with_previous: self.first_move_done,
        })?;
        self.first_move_done = true;
        Ok(None)
    }
}
