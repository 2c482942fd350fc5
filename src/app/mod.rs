//! Application-Layer: Interaktionskern, Events, Use-Cases und Referenz-Host.

pub mod command_log;
pub mod context_menu;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod host;
/// Interaktionszustände der Kartenansicht
///
/// Idle, RectangleSelect, Move, Resize und Place mit ihren Übergängen.
pub mod interaction;
pub mod session;
pub mod use_cases;

pub use command_log::CommandLog;
pub use context_menu::{ContextMenu, MenuAction, MenuEntry};
pub use controller::InteractionController;
pub use events::{AddableEntity, EditRequest, EditorKey, InputEvent, Modifiers, PointerButton};
pub use host::{Feedback, MapHost};
pub use interaction::{InteractionKind, InteractionState, Transition};
pub use session::EditorSession;
