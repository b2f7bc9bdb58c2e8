//! Primitive mesh generation
//!
//! Shapes used for scene objects and for the gizmo handles:
//! - Box (rectangular prism)
//! - Cylinder (with end caps) and cone
//! - Sphere (UV sphere)
//! - Quad (single square, for plane handles)
//! - Ring (torus, for rotate handles)
//!
//! Every generator is centered on the origin and winds triangles
//! counter-clockwise seen from outside.

mod box_mesh;
mod cone;
mod cylinder;
mod quad;
mod ring;
mod sphere;

pub use box_mesh::generate_box_mesh;
pub use cone::generate_cone_mesh;
pub use cylinder::{generate_cylinder_mesh, generate_cylinder_mesh_with_segments};
pub use quad::generate_quad_mesh;
pub use ring::{generate_ring_mesh, generate_ring_mesh_with_segments};
pub use sphere::{generate_sphere_mesh, generate_sphere_mesh_with_segments};

/// Mesh data: vertices, normals, and triangle indices
pub type MeshData = (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<u32>);
