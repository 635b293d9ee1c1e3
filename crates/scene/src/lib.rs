//! Scene registry: authored placements for every object category.
//!
//! # Invariants
//! - Placements are immutable once the registry is built.
//! - Iteration order is insertion order, so frame output is reproducible.
//!
//! The built-in level is [`SceneRegistry::default_level`]; a JSON scene file
//! with the same shape can replace it.

mod registry;

pub use registry::{EnemyPlacement, FloorPlacement, SceneError, SceneRegistry, WallPlacement};
