//! Shared types and transform glue used by every corridor crate.

mod types;

pub use types::{Viewport, normal_matrix};
