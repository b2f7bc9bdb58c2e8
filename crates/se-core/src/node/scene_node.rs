//! Transform node

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::math::{euler_degrees_from_quat, quat_from_euler_degrees};

/// Plain numeric view of a node transform for property editors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformValues {
    pub translation: [f32; 3],
    /// Euler angles in degrees, see [`crate::math::EULER_ORDER`]
    pub rotation_degrees: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for TransformValues {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// A node in the scene graph carrying a translation/rotation/scale transform.
///
/// The world matrix is derived: `T(translation) * R(rotation) * S(scale)`,
/// combined with the parent matrix handed to [`SceneNode::compute_transform`].
/// Euler angles are cached from `rotation` whenever it changes and are never
/// authoritative.
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    pub name: String,
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    euler_degrees: Vec3,
    derived_transform: Mat4,
    /// Parent matrix used in the last `compute_transform`
    parent_transform: Mat4,
    dirty: bool,
}

impl SceneNode {
    /// Create an identity node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            euler_degrees: Vec3::ZERO,
            derived_transform: Mat4::IDENTITY,
            parent_transform: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.set_translation(translation);
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.dirty = true;
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Replace the rotation (normalized) and refresh the Euler cache
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
        self.euler_degrees = euler_degrees_from_quat(self.rotation);
        self.dirty = true;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Cached Euler angles in degrees
    pub fn euler_angles(&self) -> Vec3 {
        self.euler_degrees
    }

    /// Replace the rotation from Euler angles in degrees
    pub fn set_rotation_from_euler(&mut self, x: f32, y: f32, z: f32) {
        self.set_rotation(quat_from_euler_degrees(x, y, z));
    }

    /// Right-multiply the current rotation by an incremental Euler rotation (degrees).
    ///
    /// The increment is applied in the node's own frame.
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.set_rotation(self.rotation * quat_from_euler_degrees(dx, dy, dz));
    }

    /// Local matrix `T * R * S`
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Recompute and store the derived matrix.
    ///
    /// With `prepend = true` the parent is the starting basis the local
    /// transform is built on: `parent * T * R * S`. Children then inherit the
    /// parent's rotation and scale outside their own.
    ///
    /// With `prepend = false` the local matrix is built first and the parent is
    /// applied inside it: `T * R * S * parent`. The order is `local * parent`,
    /// not `parent * local`.
    ///
    /// Without a parent the result is the local matrix.
    pub fn compute_transform(&mut self, parent: Option<&Mat4>, prepend: bool) -> Mat4 {
        let local = self.local_matrix();
        self.derived_transform = match parent {
            Some(parent) if prepend => *parent * local,
            Some(parent) => local * *parent,
            None => local,
        };
        self.parent_transform = parent.copied().unwrap_or(Mat4::IDENTITY);
        self.dirty = false;
        self.derived_transform
    }

    /// World matrix from the last `compute_transform`
    pub fn derived_transform(&self) -> Mat4 {
        self.derived_transform
    }

    /// Parent matrix from the last `compute_transform`
    pub fn parent_transform(&self) -> Mat4 {
        self.parent_transform
    }

    /// World-space origin of this node
    pub fn world_position(&self) -> Vec3 {
        self.derived_transform.transform_point3(Vec3::ZERO)
    }

    /// Whether the transform changed since the last `compute_transform`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn values(&self) -> TransformValues {
        TransformValues {
            translation: self.translation.to_array(),
            rotation_degrees: self.euler_degrees.to_array(),
            scale: self.scale.to_array(),
        }
    }

    /// Write values coming from a property editor.
    ///
    /// The rotation goes through [`SceneNode::set_rotation_from_euler`] so the
    /// quaternion stays authoritative.
    pub fn apply_values(&mut self, values: &TransformValues) {
        self.set_translation(Vec3::from_array(values.translation));
        let [x, y, z] = values.rotation_degrees;
        self.set_rotation_from_euler(x, y, z);
        self.set_scale(Vec3::from_array(values.scale));
    }
}
