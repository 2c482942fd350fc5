//! Interaktionszustände der Kartenansicht.
//!
//! Genau ein Zustand ist aktiv. Jeder Zustand bekommt beim Betreten `start`
//! und beim Verlassen `stop`; `stop` räumt das Feedback des Zustands ab.
//! Handler liefern optional einen `Transition`, den der Controller ausführt.

mod idle;
mod moving;
mod placing;
mod rectangle;
mod resizing;

pub use idle::IdleState;
pub use moving::MoveState;
pub use placing::PlaceState;
pub use rectangle::RectangleSelectState;
pub use resizing::ResizeState;

use super::events::{Modifiers, PointerButton};
use super::host::MapHost;
use crate::core::EntityModel;
use crate::shared::EditorOptions;
use glam::{IVec2, Vec2};

/// Art des aktiven Zustands (ohne Nutzdaten).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Idle,
    RectangleSelect,
    Move,
    Resize,
    Place,
}

/// Gewünschter Folgezustand.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Idle,
    /// Auswahlrechteck ab `anchor`
    RectangleSelect { anchor: IVec2 },
    /// Verschieben ab dem gerasterten Punkt `anchor`
    Move { anchor: IVec2 },
    /// Größenänderung der aktuellen Selektion
    Resize,
    /// Neue Entities platzieren
    Place {
        entities: Vec<EntityModel>,
        guess_layer: bool,
    },
}

impl Transition {
    /// Art des Zielzustands.
    pub fn kind(&self) -> InteractionKind {
        match self {
            Transition::Idle => InteractionKind::Idle,
            Transition::RectangleSelect { .. } => InteractionKind::RectangleSelect,
            Transition::Move { .. } => InteractionKind::Move,
            Transition::Resize => InteractionKind::Resize,
            Transition::Place { .. } => InteractionKind::Place,
        }
    }
}

/// Kontext, den jeder Handler bekommt.
#[derive(Debug, Clone, Copy)]
pub struct StateContext<'a> {
    pub options: &'a EditorOptions,
    /// Letzte bekannte Zeiger-Position
    pub pointer: Vec2,
}

/// Ergebnis eines Handlers.
pub type HandlerResult = anyhow::Result<Option<Transition>>;

/// Aktiver Interaktionszustand mit seinen Daten.
#[derive(Debug, Clone)]
pub enum InteractionState {
    Idle(IdleState),
    RectangleSelect(RectangleSelectState),
    Move(MoveState),
    Resize(ResizeState),
    Place(PlaceState),
}

impl Default for InteractionState {
    fn default() -> Self {
        InteractionState::Idle(IdleState::default())
    }
}

impl InteractionState {
    /// Art des Zustands.
    pub fn kind(&self) -> InteractionKind {
        match self {
            InteractionState::Idle(_) => InteractionKind::Idle,
            InteractionState::RectangleSelect(_) => InteractionKind::RectangleSelect,
            InteractionState::Move(_) => InteractionKind::Move,
            InteractionState::Resize(_) => InteractionKind::Resize,
            InteractionState::Place(_) => InteractionKind::Place,
        }
    }

    /// Wird beim Betreten aufgerufen.
    pub fn start(&mut self, host: &mut dyn MapHost, ctx: &StateContext) {
        match self {
            InteractionState::RectangleSelect(state) => state.start(host),
            InteractionState::Place(state) => state.start(host, ctx),
            InteractionState::Idle(_)
            | InteractionState::Move(_)
            | InteractionState::Resize(_) => {}
        }
    }

    /// Wird beim Verlassen aufgerufen.
    pub fn stop(&mut self, host: &mut dyn MapHost) {
        match self {
            InteractionState::RectangleSelect(_) | InteractionState::Place(_) => {
                host.set_feedback(None);
            }
            InteractionState::Idle(_)
            | InteractionState::Move(_)
            | InteractionState::Resize(_) => {}
        }
    }

    /// Maustaste gedrückt.
    pub fn pointer_pressed(
        &mut self,
        host: &mut dyn MapHost,
        ctx: &StateContext,
        pos: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> HandlerResult {
        match self {
            InteractionState::Idle(state) => state.pointer_pressed(host, ctx, pos, button, modifiers),
            InteractionState::Place(state) => state.pointer_pressed(host, button),
            InteractionState::RectangleSelect(_)
            | InteractionState::Move(_)
            | InteractionState::Resize(_) => Ok(None),
        }
    }

    /// Zeiger bewegt.
    pub fn pointer_moved(
        &mut self,
        host: &mut dyn MapHost,
        ctx: &StateContext,
        pos: Vec2,
    ) -> HandlerResult {
        match self {
            InteractionState::Idle(state) => Ok(state.pointer_moved(ctx, pos)),
            InteractionState::RectangleSelect(state) => {
                state.pointer_moved(host, pos);
                Ok(None)
            }
            InteractionState::Move(state) => state.pointer_moved(host, ctx, pos),
            InteractionState::Resize(state) => state.pointer_moved(host, pos),
            InteractionState::Place(state) => {
                state.pointer_moved(host, ctx, pos);
                Ok(None)
            }
        }
    }

    /// Maustaste losgelassen.
    pub fn pointer_released(
        &mut self,
        host: &mut dyn MapHost,
        ctx: &StateContext,
        pos: Vec2,
        button: PointerButton,
    ) -> HandlerResult {
        match self {
            InteractionState::Idle(state) => {
                state.pointer_released(host, pos, button);
                Ok(None)
            }
            InteractionState::RectangleSelect(_) | InteractionState::Move(_) => {
                Ok(Some(Transition::Idle))
            }
            InteractionState::Resize(state) => Ok(Some(state.pointer_released(host, ctx, button))),
            InteractionState::Place(_) => Ok(None),
        }
    }
}
