//! Gizmo handle tags

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

/// Kind of transform a drag applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Move along an axis or in a plane
    Translate,
    /// Uniform scale about the pivot
    ScaleAll,
    /// Scale along X
    ScaleX,
    /// Scale along Y
    ScaleY,
    /// Scale along Z
    ScaleZ,
    /// Rotate about an axis through the pivot
    Rotate,
}

/// Identifies which gizmo handle a drawable belongs to.
///
/// Handles carry their tag as a string on the drawable; this enum is the
/// parsed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleTag {
    /// Arrow along X
    TranslateX,
    /// Arrow along Y
    TranslateY,
    /// Arrow along Z
    TranslateZ,
    /// Square in the YZ plane
    TranslateYz,
    /// Square in the XZ plane
    TranslateXz,
    /// Square in the XY plane
    TranslateXy,
    /// Camera-facing center square
    CameraPlane,
    /// Ring around X
    RotateX,
    /// Ring around Y
    RotateY,
    /// Ring around Z
    RotateZ,
    /// Cube on the X axis
    ScaleX,
    /// Cube on the Y axis
    ScaleY,
    /// Cube on the Z axis
    ScaleZ,
    /// Center cube
    ScaleAll,
}

impl HandleTag {
    /// Every handle tag
    pub const ALL: [HandleTag; 14] = [
        HandleTag::TranslateX,
        HandleTag::TranslateY,
        HandleTag::TranslateZ,
        HandleTag::TranslateYz,
        HandleTag::TranslateXz,
        HandleTag::TranslateXy,
        HandleTag::CameraPlane,
        HandleTag::RotateX,
        HandleTag::RotateY,
        HandleTag::RotateZ,
        HandleTag::ScaleX,
        HandleTag::ScaleY,
        HandleTag::ScaleZ,
        HandleTag::ScaleAll,
    ];

    /// Tag string stored on the drawable
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleTag::TranslateX => "translate_x",
            HandleTag::TranslateY => "translate_y",
            HandleTag::TranslateZ => "translate_z",
            HandleTag::TranslateYz => "translate_yz",
            HandleTag::TranslateXz => "translate_xz",
            HandleTag::TranslateXy => "translate_xy",
            HandleTag::CameraPlane => "camera_plane",
            HandleTag::RotateX => "rotate_x",
            HandleTag::RotateY => "rotate_y",
            HandleTag::RotateZ => "rotate_z",
            HandleTag::ScaleX => "scale_x",
            HandleTag::ScaleY => "scale_y",
            HandleTag::ScaleZ => "scale_z",
            HandleTag::ScaleAll => "scale_all",
        }
    }

    /// Drag mode started by this handle
    pub fn mode(&self) -> DragMode {
        match self {
            HandleTag::TranslateX
            | HandleTag::TranslateY
            | HandleTag::TranslateZ
            | HandleTag::TranslateYz
            | HandleTag::TranslateXz
            | HandleTag::TranslateXy
            | HandleTag::CameraPlane => DragMode::Translate,
            HandleTag::RotateX | HandleTag::RotateY | HandleTag::RotateZ => DragMode::Rotate,
            HandleTag::ScaleX => DragMode::ScaleX,
            HandleTag::ScaleY => DragMode::ScaleY,
            HandleTag::ScaleZ => DragMode::ScaleZ,
            HandleTag::ScaleAll => DragMode::ScaleAll,
        }
    }

    /// Gizmo-frame axis: the direction for arrows and scale cubes, the
    /// normal for plane squares, the rotation axis for rings.
    ///
    /// `None` for the center handles, whose constraint depends on the camera.
    pub fn axis(&self) -> Option<Vec3> {
        match self {
            HandleTag::TranslateX | HandleTag::TranslateYz | HandleTag::RotateX | HandleTag::ScaleX => {
                Some(Vec3::X)
            }
            HandleTag::TranslateY | HandleTag::TranslateXz | HandleTag::RotateY | HandleTag::ScaleY => {
                Some(Vec3::Y)
            }
            HandleTag::TranslateZ | HandleTag::TranslateXy | HandleTag::RotateZ | HandleTag::ScaleZ => {
                Some(Vec3::Z)
            }
            HandleTag::CameraPlane | HandleTag::ScaleAll => None,
        }
    }

    /// Whether this handle constrains motion to a plane
    pub fn is_planar(&self) -> bool {
        matches!(
            self,
            HandleTag::TranslateYz
                | HandleTag::TranslateXz
                | HandleTag::TranslateXy
                | HandleTag::CameraPlane
                | HandleTag::ScaleAll
        )
    }

    /// In-plane reference the rotation angle is measured from.
    ///
    /// Each ring uses the next axis in X, Y, Z order so the angle grows
    /// counter-clockwise about the ring axis.
    pub fn up_reference(&self) -> Option<Vec3> {
        match self {
            HandleTag::RotateX => Some(Vec3::Y),
            HandleTag::RotateY => Some(Vec3::Z),
            HandleTag::RotateZ => Some(Vec3::X),
            _ => None,
        }
    }
}

impl fmt::Display for HandleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a tag string that names no handle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gizmo handle tag: {0}")]
pub struct UnknownHandleTag(pub String);

impl FromStr for HandleTag {
    type Err = UnknownHandleTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandleTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownHandleTag(s.to_string()))
    }
}
