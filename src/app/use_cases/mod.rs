//! Use-Cases der Interaktions-Orchestrierung.

pub mod layers;
pub mod placement;
pub mod resize;
pub mod selection;
