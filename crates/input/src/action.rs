/// A discrete movement intent the camera understands.
///
/// Hosts translate their own key codes into intents, so the camera never
/// sees raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveIntent {
    /// Move along the look direction.
    Forward,
    /// Move against the look direction.
    Backward,
    /// Move along the negative right vector.
    StrafeLeft,
    /// Move along the right vector.
    StrafeRight,
}

impl MoveIntent {
    pub const ALL: [MoveIntent; 4] = [
        MoveIntent::Forward,
        MoveIntent::Backward,
        MoveIntent::StrafeLeft,
        MoveIntent::StrafeRight,
    ];

    /// Default WASD binding, case-insensitive.
    pub fn from_key_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(MoveIntent::Forward),
            's' => Some(MoveIntent::Backward),
            'a' => Some(MoveIntent::StrafeLeft),
            'd' => Some(MoveIntent::StrafeRight),
            _ => None,
        }
    }
}
