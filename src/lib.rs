//! Map View Editor Library.
//! Interaktionskern einer 2D-Kachelkarten-Ansicht als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    EditRequest, EditorSession, Feedback, InputEvent, InteractionController, InteractionKind,
    MapHost,
};
pub use crate::core::{
    EntityIndex, EntityModel, EntityType, MapQuery, Rect, ResizeMode, TileMap, TilePattern,
};
pub use shared::EditorOptions;
