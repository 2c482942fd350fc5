//! Größenänderung der Selektion.

use super::{HandlerResult, StateContext, Transition};
use crate::app::events::{EditRequest, PointerButton};
use crate::app::host::MapHost;
use crate::app::use_cases::resize::{ResizeCandidate, ResizeSession};
use crate::app::use_cases::selection::{are_entities_resizable, clone_selected_entities};
use crate::core::to_point;
use glam::Vec2;

/// Zustand während der Größenänderung.
#[derive(Debug, Clone)]
pub struct ResizeState {
    session: ResizeSession,
    first_resize_done: bool,
}

impl ResizeState {
    /// Startet die Größenänderung der aktuellen Selektion.
    ///
    /// `None`, wenn keine Karte geladen oder nichts in der Selektion
    /// veränderbar ist.
    pub fn begin(host: &dyn MapHost, ctx: &StateContext) -> Option<Self> {
        let map = host.map()?;
        let selection = host.selected_entities();
        if !are_entities_resizable(map, &selection) {
            return None;
        }

        let candidates = selection
            .iter()
            .filter_map(|index| ResizeCandidate::from_map(map, *index))
            .collect();
        let session = ResizeSession::begin(
            candidates,
            to_point(ctx.pointer),
            ctx.options.default_resize_unit,
        )?;
        log::debug!(
            "Resize gestartet: {} Entities, Leader {:?}",
            selection.len(),
            session.leader()
        );

        Some(Self {
            session,
            first_resize_done: false,
        })
    }

    /// Laufende Resize-Berechnung.
    pub fn session(&self) -> &ResizeSession {
        &self.session
    }

    pub(super) fn pointer_moved(&mut self, host: &mut dyn MapHost, pos: Vec2) -> HandlerResult {
        let boxes = self.session.compute(to_point(pos));
        host.submit(EditRequest::ResizeEntities {
            boxes,
            merge_with_previous: self.first_resize_done,
        })?;
        self.first_resize_done = true;
        Ok(None)
    }

    /// Sekundärtaste: Kopien der Selektion platzieren (Stempeln), sonst Ruhezustand.
    pub(super) fn pointer_released(
        &mut self,
        host: &mut dyn MapHost,
        ctx: &StateContext,
        button: PointerButton,
    ) -> Transition {
        if button != PointerButton::Secondary {
            return Transition::Idle;
        }

        let mut clones = clone_selected_entities(host);
        if clones.len() == 1 && self.first_resize_done && ctx.options.reset_single_clone_size {
            // Nach echtem Resize startet jeder neue Stempel wieder mit Basisgröße.
            let clone = &mut clones[0];
            clone.size = clone.base_size;
        }
        Transition::Place {
            entities: clones,
            guess_layer: false,
        }
    }
}
