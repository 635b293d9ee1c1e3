//! Input aggregation: raw device events collected between frames and handed
//! to the camera as one immutable snapshot.
//!
//! # Invariants
//! - A snapshot is consumed exactly once per frame.
//! - Mouse motion only accumulates while the pointer is captured.
//! - No windowing types leak into this crate; hosts map their key codes.

pub mod action;
pub mod state;

pub use action::MoveIntent;
pub use state::{InputCollector, InputState};
