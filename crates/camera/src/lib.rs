//! Camera state: the single mutable piece of the scene.
//!
//! # Invariants
//! - `forward` always equals the direction derived from (yaw, pitch).
//! - Pitch stays within [-89, 89] degrees.
//! - `up` is fixed at +Y.
//! - Movement is per frame step, not per second; there is no delta time.

pub mod camera;
pub mod projection;
pub mod settings;

pub use camera::{CameraConfig, CameraState, forward_from_angles};
pub use projection::Projection;
pub use settings::{SettingsError, ViewSettings};
