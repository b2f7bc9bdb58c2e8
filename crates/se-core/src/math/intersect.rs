//! Ray intersection primitives

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{PARALLEL_EPSILON, TRIANGLE_EPSILON};

/// Which triangle windings a ray test accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FaceCulling {
    /// Reject triangles facing away from the ray (clockwise as seen from the origin)
    #[default]
    Back,
    /// Accept both windings (double-sided surfaces such as plane handles)
    None,
}

/// Result of a successful ray/triangle test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter: the hit point is `origin + dir * t`
    pub t: f32,
    /// Barycentric weight of `v1`
    pub u: f32,
    /// Barycentric weight of `v2`
    pub v: f32,
}

/// Ray/triangle intersection with back-face culling.
///
/// See [`intersect_ray_triangle_with`].
pub fn intersect_ray_triangle(
    origin: Vec3,
    dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    intersect_ray_triangle_with(origin, dir, v0, v1, v2, FaceCulling::Back)
}

/// Möller–Trumbore ray/triangle intersection.
///
/// With [`FaceCulling::Back`] the determinant must be at least
/// [`TRIANGLE_EPSILON`]: triangles wound clockwise as seen from the ray are
/// rejected together with near-parallel ones. With [`FaceCulling::None`] only
/// `|det| < TRIANGLE_EPSILON` is rejected.
///
/// `dir` does not need to be normalized; `t` is expressed in units of `dir`.
/// Hits behind the origin (`t < 0`) are rejected.
pub fn intersect_ray_triangle_with(
    origin: Vec3,
    dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    culling: FaceCulling,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);

    let rejected = match culling {
        FaceCulling::Back => det < TRIANGLE_EPSILON,
        FaceCulling::None => det.abs() < TRIANGLE_EPSILON,
    };
    if rejected {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < 0.0 {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Ray/plane intersection.
///
/// Returns `None` when the ray is parallel to the plane
/// (`|dot(ray_dir, normal)| <= PARALLEL_EPSILON`) or when the plane lies
/// behind the ray origin.
pub fn intersect_ray_plane(
    plane_point: Vec3,
    plane_normal: Vec3,
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<Vec3> {
    let denom = ray_dir.dot(plane_normal);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }

    Some(ray_origin + ray_dir * t)
}

/// Closest points between two infinite lines `a(s) = origin_a + s * dir_a`
/// and `b(t) = origin_b + t * dir_b`.
///
/// Solves the 2×2 system given by requiring the connecting segment to be
/// orthogonal to both directions. Returns `(point_on_a, point_on_b)`.
///
/// Parallel (or zero-length) directions make the system singular; that case
/// returns `None` so the caller can keep its previous result.
pub fn closest_points_between_rays(
    origin_a: Vec3,
    dir_a: Vec3,
    origin_b: Vec3,
    dir_b: Vec3,
) -> Option<(Vec3, Vec3)> {
    let w0 = origin_a - origin_b;
    let a = dir_a.dot(dir_a);
    let b = dir_a.dot(dir_b);
    let c = dir_b.dot(dir_b);
    let d = dir_a.dot(w0);
    let e = dir_b.dot(w0);

    let denom = a * c - b * b;
    // Scale the threshold so it is independent of direction lengths
    if a <= PARALLEL_EPSILON || c <= PARALLEL_EPSILON || denom.abs() <= PARALLEL_EPSILON * a * c {
        return None;
    }

    let s = (b * e - c * d) / denom;
    let t = (a * e - b * d) / denom;

    Some((origin_a + dir_a * s, origin_b + dir_b * t))
}

/// Signed angle (radians) of a ray's hit point around `plane_normal`.
///
/// The ray is intersected with the plane through `pivot` with normal
/// `plane_normal`. The offset from the pivot is measured against
/// `up_reference` (projected into the plane) and its in-plane perpendicular
/// `normal × up`, so the angle grows counter-clockwise when looking down the
/// normal, matching a right-handed rotation about it.
///
/// Returns `None` when the ray misses the plane or `up_reference` is parallel
/// to the normal.
pub fn angle_about_axis(
    plane_normal: Vec3,
    up_reference: Vec3,
    pivot: Vec3,
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<f32> {
    let hit = intersect_ray_plane(pivot, plane_normal, ray_origin, ray_dir)?;

    let normal = plane_normal.normalize_or_zero();
    let up = (up_reference - normal * up_reference.dot(normal)).normalize_or_zero();
    if normal == Vec3::ZERO || up == Vec3::ZERO {
        return None;
    }
    let side = normal.cross(up);

    let offset = hit - pivot;
    Some(offset.dot(side).atan2(offset.dot(up)))
}
