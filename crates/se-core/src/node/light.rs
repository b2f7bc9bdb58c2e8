//! Light node

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::SceneNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightKind {
    #[default]
    Point,
    /// Shines along the node's local -Z axis
    Directional,
}

/// A light placed in the scene graph. Lights are never picked.
#[derive(Debug, Clone)]
pub struct LightNode {
    pub node: SceneNode,
    pub kind: LightKind,
    /// RGB
    pub color: [f32; 3],
    pub intensity: f32,
}

impl LightNode {
    pub fn new(name: impl Into<String>, kind: LightKind) -> Self {
        Self {
            node: SceneNode::new(name),
            kind,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }

    pub fn point(name: impl Into<String>) -> Self {
        Self::new(name, LightKind::Point)
    }

    pub fn directional(name: impl Into<String>) -> Self {
        Self::new(name, LightKind::Directional)
    }

    /// World-space direction the light shines in
    pub fn direction(&self) -> Vec3 {
        self.node
            .derived_transform()
            .transform_vector3(Vec3::NEG_Z)
            .normalize_or_zero()
    }
}
