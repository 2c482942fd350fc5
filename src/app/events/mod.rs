//! InputEvent- und EditRequest-Enums für den Eingabe/Änderungs-Datenfluss.

mod input;
mod request;

pub use input::{EditorKey, InputEvent, Modifiers, PointerButton};
pub use request::{AddableEntity, EditRequest};
