use std::collections::BTreeSet;

use glam::Vec2;

use crate::action::MoveIntent;

/// Immutable input snapshot for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Movement intents held at the moment the snapshot was taken.
    pub held: BTreeSet<MoveIntent>,
    /// Whether the pointer was captured when the snapshot was taken.
    pub pointer_captured: bool,
    /// Mouse motion events since the previous snapshot, in arrival order and
    /// device units. Empty when the pointer is not captured.
    pub mouse_deltas: Vec<Vec2>,
}

impl InputState {
    pub fn is_held(&self, intent: MoveIntent) -> bool {
        self.held.contains(&intent)
    }

    /// Snapshot with the given intents held and no mouse motion.
    pub fn holding(intents: &[MoveIntent]) -> Self {
        Self {
            held: intents.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Sum of this frame's mouse motion.
    pub fn total_mouse_delta(&self) -> Vec2 {
        self.mouse_deltas.iter().copied().sum()
    }
}

/// Collects device events between frames.
///
/// Event callbacks write here; the frame loop calls [`InputCollector::snapshot`]
/// once per frame and hands the result to the camera update.
#[derive(Debug, Default)]
pub struct InputCollector {
    held: BTreeSet<MoveIntent>,
    pointer_captured: bool,
    pending_deltas: Vec<Vec2>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release of a movement intent.
    pub fn set_intent(&mut self, intent: MoveIntent, pressed: bool) {
        if pressed {
            self.held.insert(intent);
        } else {
            self.held.remove(&intent);
        }
    }

    /// Record one raw mouse motion event. Dropped unless the pointer is
    /// captured. Events are kept separate because pitch clamps per event.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.pointer_captured {
            self.pending_deltas.push(Vec2::new(dx, dy));
        }
    }

    pub fn set_pointer_captured(&mut self, captured: bool) {
        if self.pointer_captured != captured {
            tracing::debug!(captured, "pointer capture changed");
        }
        self.pointer_captured = captured;
        if !captured {
            self.pending_deltas.clear();
        }
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Release every held intent, e.g. when the window loses focus.
    pub fn clear_held(&mut self) {
        self.held.clear();
    }

    /// Take the frame snapshot. Held intents persist; mouse motion is drained.
    pub fn snapshot(&mut self) -> InputState {
        InputState {
            held: self.held.clone(),
            pointer_captured: self.pointer_captured,
            mouse_deltas: std::mem::take(&mut self.pending_deltas),
        }
    }
}
