//! Sphere mesh generation (UV sphere)

use std::f32::consts::{PI, TAU};

use super::MeshData;

/// Generate a UV sphere mesh
pub fn generate_sphere_mesh(radius: f32) -> MeshData {
    use crate::constants::{SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS};
    generate_sphere_mesh_with_segments(radius, SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS)
}

/// Generate a UV sphere mesh with custom resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `lat_segments` - Number of latitude bands
/// * `lon_segments` - Number of longitude segments
pub fn generate_sphere_mesh_with_segments(
    radius: f32,
    lat_segments: u32,
    lon_segments: u32,
) -> MeshData {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=lat_segments {
        let (sin_theta, cos_theta) = ((lat as f32 / lat_segments as f32) * PI).sin_cos();
        for lon in 0..=lon_segments {
            let (sin_phi, cos_phi) = ((lon as f32 / lon_segments as f32) * TAU).sin_cos();
            let n = [sin_theta * cos_phi, sin_theta * sin_phi, cos_theta];
            vertices.push(n.map(|c| c * radius));
            normals.push(n);
        }
    }

    let stride = lon_segments + 1;
    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let current = lat * stride + lon;
            let next = current + stride;
            indices.extend_from_slice(&[current, next, current + 1, current + 1, next, next + 1]);
        }
    }

    (vertices, normals, indices)
}
