//! Core-Domänentypen: Geometrie, Entities, Karten-Abfragen und die In-Memory-Karte.

pub mod entity;
pub mod geometry;
pub mod map_query;
/// Geschichtete In-Memory-Karte
///
/// Pro Layer liegen statische Tiles vor dynamischen Entities; alle
/// Operationen halten diese Reihenfolge ein.
pub mod tile_map;

pub use entity::{EntityIndex, EntityModel, EntityType, ResizeMode, TilePattern};
pub use geometry::{floor_to_grid, manhattan_length, round_down, round_to_grid, to_point, Rect};
pub use map_query::MapQuery;
pub use tile_map::TileMap;
