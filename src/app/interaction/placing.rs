//! Neue Entities unter dem Zeiger platzieren.

use super::{HandlerResult, StateContext, Transition};
use crate::app::events::{EditRequest, PointerButton};
use crate::app::host::{Feedback, MapHost};
use crate::app::use_cases::layers::prepare_addition;
use crate::app::use_cases::placement::{center_on_point, translate_entities};
use crate::app::use_cases::selection::{are_entities_resizable, clone_selected_entities};
use crate::core::{floor_to_grid, EntityModel};
use glam::{IVec2, Vec2};

/// Zustand mit noch nicht eingefügten Entities, die dem Zeiger folgen.
#[derive(Debug, Clone)]
pub struct PlaceState {
    entities: Vec<EntityModel>,
    guess_layer: bool,
    last_point: IVec2,
}

impl PlaceState {
    /// Platzieren von `entities`; mit `guess_layer` wird der Layer aus
    /// bevorzugtem Layer und Belegung abgeleitet.
    pub fn new(entities: Vec<EntityModel>, guess_layer: bool) -> Self {
        Self {
            entities,
            guess_layer,
            last_point: IVec2::ZERO,
        }
    }

    /// Aktuelle Vorschau-Entities.
    pub fn entities(&self) -> &[EntityModel] {
        &self.entities
    }

    pub fn guess_layer(&self) -> bool {
        self.guess_layer
    }

    pub(super) fn start(&mut self, host: &mut dyn MapHost, ctx: &StateContext) {
        let grid = ctx.options.grid();
        self.last_point = floor_to_grid(ctx.pointer, grid);
        center_on_point(&mut self.entities, self.last_point, grid);
        host.set_feedback(Some(Feedback::PlacementPreview(self.entities.clone())));
    }

    pub(super) fn pointer_moved(&mut self, host: &mut dyn MapHost, ctx: &StateContext, pos: Vec2) {
        let current = floor_to_grid(pos, ctx.options.grid());
        if current == self.last_point {
            return;
        }

        translate_entities(&mut self.entities, current - self.last_point);
        self.last_point = current;
        host.set_feedback(Some(Feedback::PlacementPreview(self.entities.clone())));
    }

    /// Fügt die Entities ein und entscheidet über den Folgezustand.
    pub(super) fn pointer_pressed(&mut self, host: &mut dyn MapHost, button: PointerButton) -> HandlerResult {
        let Some(map) = host.map() else {
            return Ok(None);
        };
        let addable = prepare_addition(map, self.entities.clone(), self.guess_layer, |area| {
            host.layer_in_rectangle(area)
        });
        let count = addable.len();
        // Bei Ablehnung bleibt die Vorschau erhalten.
        host.submit(EditRequest::AddEntities { entities: addable })?;
        log::info!("{count} Entities platziert");
        self.entities.clear();

        let selection = host.selected_entities();
        let resizable = host
            .map()
            .is_some_and(|map| are_entities_resizable(map, &selection));
        if resizable {
            return Ok(Some(Transition::Resize));
        }
        if button == PointerButton::Secondary {
            return Ok(Some(Transition::Place {
                entities: clone_selected_entities(host),
                guess_layer: false,
            }));
        }
        Ok(Some(Transition::Idle))
    }
}
