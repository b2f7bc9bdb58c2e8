//! Editor configuration
//!
//! Settings are grouped per concern and serialized as RON. Every section is
//! `#[serde(default)]` so partial files keep working as fields are added.

use std::path::Path;

use serde::{Deserialize, Serialize};
use se_core::{FaceCulling, Scene};

use crate::camera::Projection;
use crate::constants::camera::{FOV_RANGE_DEGREES, MIN_NEAR};
use crate::gizmo::GizmoSpace;

/// Camera defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Projection used at startup
    pub projection: Projection,
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial distance from the orbit target
    pub distance: f32,
    /// Initial yaw in degrees
    pub yaw_degrees: f32,
    /// Initial pitch in degrees
    pub pitch_degrees: f32,
    /// Pan distance per pointer unit, relative to the orbit distance
    pub pan_sensitivity: f32,
    /// Degrees of rotation per pointer unit
    pub rotate_sensitivity: f32,
    /// Zoom factor per wheel step
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            fov_degrees: 40.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            distance: 5.0,
            yaw_degrees: 45.0,
            pitch_degrees: 30.0,
            pan_sensitivity: 0.002,
            rotate_sensitivity: 0.3,
            zoom_sensitivity: 0.1,
        }
    }
}

/// Gizmo appearance and behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GizmoConfig {
    /// Gizmo size as a fraction of the eye-to-pivot distance
    pub screen_scale: f32,
    /// Show the translate handles
    pub show_translate: bool,
    /// Show the rotate rings
    pub show_rotate: bool,
    /// Show the scale handles
    pub show_scale: bool,
    /// Orientation mode at startup
    pub space: GizmoSpace,
    /// X-axis color (RGBA)
    pub x_axis_color: [f32; 4],
    /// Y-axis color (RGBA)
    pub y_axis_color: [f32; 4],
    /// Z-axis color (RGBA)
    pub z_axis_color: [f32; 4],
    /// Color of the center handles (RGBA)
    pub center_color: [f32; 4],
    /// Half size of the camera-facing center handle, in gizmo units
    pub camera_handle_half_size: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            screen_scale: 0.15,
            show_translate: true,
            show_rotate: true,
            show_scale: true,
            space: GizmoSpace::Global,
            x_axis_color: [1.0, 0.2, 0.2, 1.0],
            y_axis_color: [0.2, 1.0, 0.2, 1.0],
            z_axis_color: [0.2, 0.2, 1.0, 1.0],
            center_color: [0.9, 0.9, 0.9, 1.0],
            camera_handle_half_size: 0.06,
        }
    }
}

/// Scene picking policy
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickingConfig {
    /// Whether back faces of scene geometry can be picked
    pub face_culling: FaceCulling,
}

impl PickingConfig {
    /// Apply the picking policy to a scene
    pub fn apply_to(&self, scene: &mut Scene) {
        scene.set_face_culling(self.face_culling);
    }
}

/// Drag snapping increments; `None` disables snapping for that mode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapConfig {
    /// Translation increment in world units
    pub translate: Option<f32>,
    /// Rotation increment in degrees
    pub rotate_degrees: Option<f32>,
    /// Scale ratio increment
    pub scale: Option<f32>,
}

/// Complete editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EditorConfig {
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Gizmo settings
    #[serde(default)]
    pub gizmo: GizmoConfig,
    /// Picking settings
    #[serde(default)]
    pub picking: PickingConfig,
    /// Snapping settings
    #[serde(default)]
    pub snap: SnapConfig,
}

impl EditorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_bytes()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::debug!(path = %path.display(), "Saved editor config");
        Ok(())
    }

    /// Serialize configuration to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load configuration from a file and clamp invalid values
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_bytes(&content)?;
        tracing::debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    /// Load configuration from bytes and clamp invalid values
    pub fn from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        let mut config: EditorConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate();
        Ok(config)
    }

    /// Clamp values that would break the camera or gizmo.
    ///
    /// Returns the number of fields that were changed.
    pub fn validate(&mut self) -> usize {
        let mut fixed = 0;
        let camera = &mut self.camera;

        if camera.near_plane.is_nan() || camera.near_plane <= 0.0 {
            tracing::warn!(near = camera.near_plane, "Clamped non-positive near plane");
            camera.near_plane = CameraConfig::default().near_plane.max(MIN_NEAR);
            fixed += 1;
        }
        if camera.far_plane.is_nan() || camera.far_plane <= camera.near_plane {
            tracing::warn!(far = camera.far_plane, "Clamped far plane behind near plane");
            camera.far_plane = camera.near_plane + 1.0;
            fixed += 1;
        }
        let (min_fov, max_fov) = FOV_RANGE_DEGREES;
        if !(min_fov..=max_fov).contains(&camera.fov_degrees) {
            tracing::warn!(fov = camera.fov_degrees, "Clamped field of view");
            camera.fov_degrees = if camera.fov_degrees.is_nan() {
                CameraConfig::default().fov_degrees
            } else {
                camera.fov_degrees.clamp(min_fov, max_fov)
            };
            fixed += 1;
        }
        if self.gizmo.screen_scale.is_nan() || self.gizmo.screen_scale <= 0.0 {
            tracing::warn!(scale = self.gizmo.screen_scale, "Reset non-positive gizmo scale");
            self.gizmo.screen_scale = GizmoConfig::default().screen_scale;
            fixed += 1;
        }

        fixed
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(String),
    /// The configuration could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// The file is not a valid configuration
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");

        let mut config = EditorConfig::new();
        config.camera.projection = Projection::Orthographic;
        config.gizmo.space = GizmoSpace::Local;
        config.picking.face_culling = FaceCulling::None;
        config.snap.rotate_degrees = Some(15.0);
        config.save(&path).unwrap();

        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = EditorConfig::from_bytes(b"(camera: (fov_degrees: 60.0))").unwrap();
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near_plane, CameraConfig::default().near_plane);
        assert_eq!(config.gizmo, GizmoConfig::default());
        assert!(config.snap.translate.is_none());
    }

    #[test]
    fn test_invalid_values_are_clamped() {
        let mut config = EditorConfig::new();
        config.camera.near_plane = -1.0;
        config.camera.far_plane = 0.0;
        config.camera.fov_degrees = 170.0;
        config.gizmo.screen_scale = 0.0;

        assert_eq!(config.validate(), 4);
        assert!(config.camera.near_plane > 0.0);
        assert!(config.camera.far_plane > config.camera.near_plane);
        assert_eq!(config.camera.fov_degrees, 120.0);
        assert!(config.gizmo.screen_scale > 0.0);
        assert_eq!(config.validate(), 0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EditorConfig::load(dir.path().join("missing.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_picking_policy_reaches_scene() {
        let mut scene = Scene::new();
        let picking = PickingConfig {
            face_culling: FaceCulling::None,
        };
        picking.apply_to(&mut scene);
        assert_eq!(scene.face_culling(), FaceCulling::None);
    }

    #[test]
    fn test_garbage_is_deserialize_error() {
        let result = EditorConfig::from_bytes(b"not a config");
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }
}
