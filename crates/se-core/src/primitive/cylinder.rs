//! Cylinder mesh generation (with end caps)

use std::f32::consts::TAU;

use super::MeshData;

/// Generate a cylinder mesh along the Z axis, centered on the origin
///
/// # Arguments
/// * `radius` - Cylinder radius
/// * `length` - Cylinder length (height along Z)
pub fn generate_cylinder_mesh(radius: f32, length: f32) -> MeshData {
    use crate::constants::CYLINDER_SEGMENTS;
    generate_cylinder_mesh_with_segments(radius, length, CYLINDER_SEGMENTS)
}

/// Generate a cylinder mesh with custom segment count
pub fn generate_cylinder_mesh_with_segments(radius: f32, length: f32, segments: u32) -> MeshData {
    let half_length = length / 2.0;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    let rim = |i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        (theta.cos(), theta.sin())
    };

    // Side: bottom/top vertex pairs
    for i in 0..=segments {
        let (c, s) = rim(i);
        for z in [-half_length, half_length] {
            vertices.push([radius * c, radius * s, z]);
            normals.push([c, s, 0.0]);
        }
    }
    for i in 0..segments {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }

    // Caps: center vertex plus their own rim so normals stay flat
    for (z, nz) in [(half_length, 1.0), (-half_length, -1.0)] {
        let center = vertices.len() as u32;
        vertices.push([0.0, 0.0, z]);
        normals.push([0.0, 0.0, nz]);

        let rim_start = vertices.len() as u32;
        for i in 0..=segments {
            let (c, s) = rim(i);
            vertices.push([radius * c, radius * s, z]);
            normals.push([0.0, 0.0, nz]);
        }
        for i in 0..segments {
            if nz > 0.0 {
                indices.extend_from_slice(&[center, rim_start + i, rim_start + i + 1]);
            } else {
                indices.extend_from_slice(&[center, rim_start + i + 1, rim_start + i]);
            }
        }
    }

    (vertices, normals, indices)
}
