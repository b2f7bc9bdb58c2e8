//! Flat quad mesh generation

use super::MeshData;

/// Generate a quad in the XY plane facing +Z
///
/// Only the front face is emitted; plane handles that must be pickable from
/// both sides use [`crate::math::FaceCulling::None`].
pub fn generate_quad_mesh(size: [f32; 2]) -> MeshData {
    let hx = size[0] / 2.0;
    let hy = size[1] / 2.0;
    let vertices = vec![[-hx, -hy, 0.0], [hx, -hy, 0.0], [hx, hy, 0.0], [-hx, hy, 0.0]];
    let normals = vec![[0.0, 0.0, 1.0]; 4];
    let indices = vec![0, 1, 2, 0, 2, 3];
    (vertices, normals, indices)
}
