use corridor_input::{InputState, MoveIntent};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Startup values for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position in world units.
    pub position: Vec3,
    /// Yaw in degrees. -90 looks down -Z.
    pub yaw: f32,
    /// Pitch in degrees.
    pub pitch: f32,
    /// World units moved per frame step for each held intent.
    pub speed: f32,
    /// Degrees of rotation per unit of mouse motion.
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.75, 5.0),
            yaw: -90.0,
            pitch: 0.0,
            speed: 0.1,
            sensitivity: 0.1,
        }
    }
}

/// Horizontal look direction for the given angles in degrees.
///
/// The Y component is always zero; pitch only scales the horizontal
/// magnitude before normalisation, so the camera never tilts vertically.
pub fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), 0.0, yaw.sin() * pitch.cos()).normalize()
}

/// First-person camera: position plus yaw/pitch orientation.
///
/// Orientation fields are private so that `forward` cannot drift away from
/// the angles it is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    forward: Vec3,
    speed: f32,
    sensitivity: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraState {
    /// Fixed world up vector.
    pub const UP: Vec3 = Vec3::Y;
    /// Pitch bound in degrees, both directions.
    pub const PITCH_LIMIT: f32 = 89.0;

    pub fn new(config: CameraConfig) -> Self {
        let pitch = config.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        Self {
            position: config.position,
            yaw: config.yaw,
            pitch,
            forward: forward_from_angles(config.yaw, pitch),
            speed: config.speed,
            sensitivity: config.sensitivity,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Unit vector to the camera's right on the horizontal plane.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(Self::UP).normalize()
    }

    /// Set both angles at once. Pitch is clamped and `forward` re-derived.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.forward = forward_from_angles(self.yaw, self.pitch);
    }

    /// Turn by a mouse delta. Screen-down motion lowers the pitch.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.set_orientation(self.yaw + dx * sensitivity, self.pitch - dy * sensitivity);
    }

    /// Move one frame step for every held intent.
    ///
    /// Intents add up without normalisation, so diagonal movement covers more
    /// ground than a single key. Opposite intents cancel.
    pub fn step(&mut self, input: &InputState) {
        let right = self.right();
        if input.is_held(MoveIntent::Forward) {
            self.position += self.forward * self.speed;
        }
        if input.is_held(MoveIntent::Backward) {
            self.position += self.forward * -self.speed;
        }
        if input.is_held(MoveIntent::StrafeLeft) {
            self.position += right * -self.speed;
        }
        if input.is_held(MoveIntent::StrafeRight) {
            self.position += right * self.speed;
        }
    }

    /// Per-frame entry point: look (if captured) and then move.
    ///
    /// Mouse events are applied one at a time so the pitch clamp acts after
    /// each of them.
    pub fn update(&mut self, input: &InputState) {
        if input.pointer_captured {
            for delta in &input.mouse_deltas {
                self.apply_mouse_delta(delta.x, delta.y, self.sensitivity);
            }
        }
        self.step(input);
    }

    /// Look-at view matrix from the eye towards `position + forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, Self::UP)
    }
}
