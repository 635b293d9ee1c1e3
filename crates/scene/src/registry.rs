use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from building or loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} #{index}: {reason}")]
    InvalidPlacement {
        kind: &'static str,
        index: usize,
        reason: String,
    },
}

/// An enemy sprite. Rendered as a Y-axis billboard; it has no stored
/// rotation because it always turns to face the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub position: Vec3,
}

impl EnemyPlacement {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

/// A wall segment drawn with the sprite quad, scaled and turned about Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlacement {
    pub position: Vec3,
    pub scale: Vec3,
    /// Rotation about +Y in radians.
    #[serde(default)]
    pub rotation_y: f32,
}

/// The ground plane. One per scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorPlacement {
    pub scale: Vec3,
}

impl Default for FloorPlacement {
    fn default() -> Self {
        Self {
            scale: Vec3::new(100.0, 1.0, 100.0),
        }
    }
}

/// On-disk shape of a scene file.
#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    floor: FloorPlacement,
    #[serde(default)]
    walls: Vec<WallPlacement>,
    #[serde(default)]
    enemies: Vec<EnemyPlacement>,
}

/// Every placement in the scene, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneRegistry {
    floor: FloorPlacement,
    walls: Vec<WallPlacement>,
    enemies: Vec<EnemyPlacement>,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::default_level()
    }
}

impl SceneRegistry {
    /// Build a registry, rejecting placements that would produce a
    /// non-invertible or non-finite model matrix.
    pub fn new(
        floor: FloorPlacement,
        walls: Vec<WallPlacement>,
        enemies: Vec<EnemyPlacement>,
    ) -> Result<Self, SceneError> {
        check_scale("floor", 0, floor.scale)?;
        for (index, wall) in walls.iter().enumerate() {
            check_finite("wall", index, wall.position)?;
            check_scale("wall", index, wall.scale)?;
            if !wall.rotation_y.is_finite() {
                return Err(invalid("wall", index, "rotation_y is not finite"));
            }
        }
        for (index, enemy) in enemies.iter().enumerate() {
            check_finite("enemy", index, enemy.position)?;
        }
        Ok(Self {
            floor,
            walls,
            enemies,
        })
    }

    /// The built-in level: a 200x200 floor, three walls and five enemies.
    pub fn default_level() -> Self {
        Self {
            floor: FloorPlacement::default(),
            walls: vec![
                WallPlacement {
                    position: Vec3::new(0.0, 0.0, -10.0),
                    scale: Vec3::new(10.0, 2.0, 1.0),
                    rotation_y: 0.0,
                },
                WallPlacement {
                    position: Vec3::new(5.0, 0.0, -5.0),
                    scale: Vec3::new(1.0, 2.0, 10.0),
                    rotation_y: 0.0,
                },
                WallPlacement {
                    position: Vec3::new(-5.0, 0.0, -5.0),
                    scale: Vec3::new(1.0, 2.0, 10.0),
                    rotation_y: 0.0,
                },
            ],
            enemies: vec![
                EnemyPlacement::new(5.0, 0.0, -2.0),
                EnemyPlacement::new(15.0, 0.0, -15.0),
                EnemyPlacement::new(-2.0, 0.0, -12.0),
                EnemyPlacement::new(-23.0, 0.0, -9.0),
                EnemyPlacement::new(0.0, 0.0, -6.0),
            ],
        }
    }

    /// Parse a scene from JSON. Missing sections fall back to an empty list
    /// (or the default floor).
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let file: SceneFile = serde_json::from_str(json)?;
        Self::new(file.floor, file.walls, file.enemies)
    }

    /// Load a scene file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            walls = scene.walls.len(),
            enemies = scene.enemies.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn floor(&self) -> &FloorPlacement {
        &self.floor
    }

    /// Walls in insertion order.
    pub fn walls(&self) -> &[WallPlacement] {
        &self.walls
    }

    /// Enemies in insertion order.
    pub fn enemies(&self) -> &[EnemyPlacement] {
        &self.enemies
    }

    /// Number of draw calls one frame of this scene issues.
    pub fn draw_count(&self) -> usize {
        1 + self.walls.len() + self.enemies.len()
    }
}

fn invalid(kind: &'static str, index: usize, reason: impl Into<String>) -> SceneError {
    SceneError::InvalidPlacement {
        kind,
        index,
        reason: reason.into(),
    }
}

fn check_finite(kind: &'static str, index: usize, v: Vec3) -> Result<(), SceneError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(kind, index, format!("position {v} is not finite")))
    }
}

fn check_scale(kind: &'static str, index: usize, scale: Vec3) -> Result<(), SceneError> {
    if !scale.is_finite() || scale.cmpeq(Vec3::ZERO).any() {
        return Err(invalid(
            kind,
            index,
            format!("scale {scale} must be finite and non-zero"),
        ));
    }
    Ok(())
}
