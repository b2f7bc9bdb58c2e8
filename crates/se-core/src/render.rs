//! Records handed to the renderer
//!
//! Plain `#[repr(C)]` structs so the renderer can upload them with
//! `bytemuck::cast_slice` without touching the scene graph.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::node::{Drawable, LightKind, LightNode};
use crate::registry::PipelineHandle;

/// Per-drawable instance data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub pipeline: u32,
    /// 1 when selected or hovered, 0 otherwise
    pub highlighted: u32,
    pub _pad: [u32; 2],
}

impl RenderInstance {
    pub fn new(model: Mat4, color: [f32; 4], pipeline: PipelineHandle, highlighted: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            pipeline: pipeline.index(),
            highlighted: highlighted as u32,
            _pad: [0; 2],
        }
    }

    pub fn from_drawable(drawable: &Drawable, highlighted: bool) -> Self {
        Self::new(
            drawable.node.derived_transform(),
            drawable.color,
            drawable.pipeline,
            highlighted,
        )
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Light data in world space
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub position: [f32; 3],
    /// 0 = point, 1 = directional
    pub kind: u32,
    pub direction: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl LightRecord {
    pub fn from_light(light: &LightNode) -> Self {
        let kind = match light.kind {
            LightKind::Point => 0,
            LightKind::Directional => 1,
        };
        let direction = match light.kind {
            LightKind::Point => Vec3::ZERO,
            LightKind::Directional => light.direction(),
        };
        Self {
            position: light.node.world_position().to_array(),
            kind,
            direction: direction.to_array(),
            intensity: light.intensity,
            color: light.color,
            _pad: 0.0,
        }
    }
}
