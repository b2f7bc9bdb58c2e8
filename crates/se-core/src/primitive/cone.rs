//! Cone mesh generation (arrow tips)

use std::f32::consts::TAU;

use super::MeshData;

/// Generate a cone along +Z with its base at `z = -height / 2` and apex at
/// `z = height / 2`
pub fn generate_cone_mesh(radius: f32, height: f32, segments: u32) -> MeshData {
    let half = height / 2.0;
    let slope = radius / height;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // One apex per segment so each side triangle gets its own normal
    for i in 0..segments {
        let a0 = (i as f32 / segments as f32) * TAU;
        let a1 = ((i + 1) as f32 / segments as f32) * TAU;
        let mid = (a0 + a1) * 0.5;
        let base = vertices.len() as u32;
        let n = glam::Vec3::new(mid.cos(), mid.sin(), slope).normalize().to_array();

        vertices.push([radius * a0.cos(), radius * a0.sin(), -half]);
        vertices.push([radius * a1.cos(), radius * a1.sin(), -half]);
        vertices.push([0.0, 0.0, half]);
        normals.extend_from_slice(&[n, n, n]);
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    let center = vertices.len() as u32;
    vertices.push([0.0, 0.0, -half]);
    normals.push([0.0, 0.0, -1.0]);
    let rim_start = vertices.len() as u32;
    for i in 0..=segments {
        let a = (i as f32 / segments as f32) * TAU;
        vertices.push([radius * a.cos(), radius * a.sin(), -half]);
        normals.push([0.0, 0.0, -1.0]);
    }
    for i in 0..segments {
        indices.extend_from_slice(&[center, rim_start + i + 1, rim_start + i]);
    }

    (vertices, normals, indices)
}
