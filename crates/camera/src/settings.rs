use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::projection::Projection;

/// Errors from reading a view settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Camera and projection tuning, loadable from a JSON file.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub camera: CameraConfig,
    pub projection: Projection,
}

impl ViewSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let c = &self.camera;
        let p = &self.projection;
        if !c.position.is_finite() {
            return invalid("camera.position", format!("{} is not finite", c.position));
        }
        if !(c.yaw.is_finite() && c.pitch.is_finite()) {
            return invalid("camera orientation", "yaw and pitch must be finite".into());
        }
        if !(c.speed.is_finite() && c.speed >= 0.0) {
            return invalid("camera.speed", format!("{} must be >= 0", c.speed));
        }
        if !c.sensitivity.is_finite() {
            return invalid("camera.sensitivity", format!("{} is not finite", c.sensitivity));
        }
        if !(p.fov_y_degrees > 0.0 && p.fov_y_degrees < 180.0) {
            return invalid(
                "projection.fov_y_degrees",
                format!("{} outside (0, 180)", p.fov_y_degrees),
            );
        }
        if !(p.near > 0.0 && p.far > p.near) {
            return invalid(
                "projection",
                format!("need 0 < near < far, got near={} far={}", p.near, p.far),
            );
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> Result<(), SettingsError> {
    Err(SettingsError::Invalid { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let s = ViewSettings::from_json_str(r#"{ "camera": { "speed": 0.25 } }"#).unwrap();
        assert_eq!(s.camera.speed, 0.25);
        assert_eq!(s.camera.yaw, -90.0);
        assert_eq!(s.projection, Projection::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewSettings::from_json_str("{}").unwrap(), ViewSettings::default());
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "camera": {{ "position": [1.0, 2.0, 3.0] }}, "projection": {{ "fov_y_degrees": 60.0 }} }}"#
        )
        .unwrap();
        let s = ViewSettings::load(file.path()).unwrap();
        assert_eq!(s.camera.position, glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.projection.fov_y_degrees, 60.0);
        assert_eq!(s.projection.far, 100.0);
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let err = ViewSettings::from_json_str(r#"{ "projection": { "near": 10.0, "far": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "projection", .. }));
    }

    #[test]
    fn rejects_negative_speed() {
        let err = ViewSettings::from_json_str(r#"{ "camera": { "speed": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "camera.speed", .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = ViewSettings::from_json_str("{ camera").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewSettings::load(dir.path().join("view.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
