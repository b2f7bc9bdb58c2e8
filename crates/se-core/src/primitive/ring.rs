//! Torus mesh generation for rotate handles

use std::f32::consts::TAU;

use super::MeshData;

/// Generate a torus in the XY plane (axis along Z)
///
/// # Arguments
/// * `radius` - Distance from the center to the middle of the tube
/// * `tube_radius` - Radius of the tube
pub fn generate_ring_mesh(radius: f32, tube_radius: f32) -> MeshData {
    use crate::constants::{RING_SEGMENTS, RING_TUBE_SEGMENTS};
    generate_ring_mesh_with_segments(radius, tube_radius, RING_SEGMENTS, RING_TUBE_SEGMENTS)
}

/// Generate a torus with custom resolution
pub fn generate_ring_mesh_with_segments(
    radius: f32,
    tube_radius: f32,
    segments: u32,
    tube_segments: u32,
) -> MeshData {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=segments {
        let theta = (i as f32 / segments as f32) * TAU;
        let (st, ct) = theta.sin_cos();
        for j in 0..=tube_segments {
            let phi = (j as f32 / tube_segments as f32) * TAU;
            let (sp, cp) = phi.sin_cos();
            let ring = radius + tube_radius * cp;
            vertices.push([ring * ct, ring * st, tube_radius * sp]);
            normals.push([cp * ct, cp * st, sp]);
        }
    }

    let stride = tube_segments + 1;
    for i in 0..segments {
        for j in 0..tube_segments {
            let current = i * stride + j;
            let next = current + stride;
            indices.extend_from_slice(&[current, next, current + 1, current + 1, next, next + 1]);
        }
    }

    (vertices, normals, indices)
}
