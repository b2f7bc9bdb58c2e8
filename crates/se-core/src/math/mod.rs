//! Geometry kernel
//!
//! Pure functions shared by the scene graph and the viewport:
//!
//! - [`intersect_ray_triangle`] (Möller–Trumbore) and [`intersect_ray_plane`]
//! - [`closest_points_between_rays`] for single-axis drag constraints
//! - [`angle_about_axis`] for rotation handles
//! - implicit shape tests (sphere, capped cylinder, ring) used by gizmo handles
//! - Euler angle conversion with a fixed rotation order
//!
//! Geometric misses are reported as `None`. Degenerate input (parallel rays,
//! zero-length vectors) is detected with the thresholds in
//! [`crate::constants`] and also reported as `None`.

use glam::Mat4;

mod euler;
mod intersect;
mod shapes;

pub use euler::{EULER_ORDER, EulerOrder, euler_degrees_from_quat, quat_from_euler_degrees};
pub use intersect::{
    FaceCulling, TriangleHit, angle_about_axis, closest_points_between_rays, intersect_ray_plane,
    intersect_ray_triangle, intersect_ray_triangle_with,
};
pub use shapes::{intersect_ray_cylinder, intersect_ray_ring, intersect_ray_sphere};

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10f32.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Inverse of `matrix`, or `None` when it is singular.
///
/// Small but non-zero determinants are accepted as long as every entry of
/// the inverse is finite, so tiny uniformly scaled nodes stay invertible.
pub fn try_inverse(matrix: &Mat4) -> Option<Mat4> {
    let det = matrix.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inverse = matrix.inverse();
    inverse.is_finite().then_some(inverse)
}

/// Snap `value` to the nearest multiple of `increment`.
///
/// A non-positive increment leaves the value untouched.
pub fn snap_to(value: f32, increment: f32) -> f32 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}
