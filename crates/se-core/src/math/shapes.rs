//! Implicit shape tests for handles that are not worth triangulating
//!
//! All functions accept an un-normalized ray direction and return the ray
//! parameter `t` of the nearest hit in front of the origin. Because `t` is
//! never rescaled, a ray transformed into a node's model space yields the
//! same `t` as the original world-space ray.

use glam::Vec3;

use crate::constants::PARALLEL_EPSILON;

/// Ray/sphere test for a sphere of `radius` centered at `center`.
pub fn intersect_ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let a = ray_dir.dot(ray_dir);
    if a <= PARALLEL_EPSILON {
        return None;
    }
    let b = 2.0 * oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / (2.0 * a);
    if near >= 0.0 {
        return Some(near);
    }
    // Origin inside the sphere
    let far = (-b + sqrt_d) / (2.0 * a);
    (far >= 0.0).then_some(far)
}

/// Ray test against the side of a finite cylinder running from `start` to `end`.
///
/// The ray and the offset to the axis are projected onto the plane
/// perpendicular to the axis, which reduces the test to a 2D circle
/// quadratic. The hit is then rejected when it falls outside the segment.
/// Rays running parallel to the axis never hit the side.
pub fn intersect_ray_cylinder(
    ray_origin: Vec3,
    ray_dir: Vec3,
    start: Vec3,
    end: Vec3,
    radius: f32,
) -> Option<f32> {
    let span = end - start;
    let length = span.length();
    if length <= PARALLEL_EPSILON {
        return None;
    }
    let axis = span / length;

    let d = ray_dir - axis * ray_dir.dot(axis);
    let offset = ray_origin - start;
    let o = offset - axis * offset.dot(axis);

    let a = d.dot(d);
    if a <= PARALLEL_EPSILON {
        return None;
    }
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    [(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)]
        .into_iter()
        .filter(|t| *t >= 0.0)
        .find(|t| {
            let along = (ray_origin + ray_dir * *t - start).dot(axis);
            (0.0..=length).contains(&along)
        })
}

/// Ray test against a flat ring (annulus) centered at `center`.
///
/// The ring lies in the plane with the given `normal`; a hit counts when the
/// plane intersection is within `thickness` of the circle of `radius`.
pub fn intersect_ray_ring(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    thickness: f32,
) -> Option<f32> {
    let denom = ray_dir.dot(normal);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = (center - ray_origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }

    let hit = ray_origin + ray_dir * t;
    let in_plane = hit - center;
    let in_plane = in_plane - normal * (in_plane.dot(normal) / normal.length_squared());

    ((in_plane.length() - radius).abs() <= thickness).then_some(t)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_ray_hits_sphere_front() {
        let t = intersect_ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0)
            .expect("ray aimed at center should hit");
        assert_abs_diff_eq!(t, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_inside_sphere_hits_far_side() {
        let t = intersect_ray_sphere(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0)
            .expect("origin inside the sphere should hit the far side");
        assert_abs_diff_eq!(t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses_sphere() {
        assert!(intersect_ray_sphere(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).is_none());
        assert!(intersect_ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_ray_hits_cylinder() {
        let t = intersect_ray_cylinder(
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            0.1,
        )
        .expect("ray across the shaft should hit");
        assert_abs_diff_eq!(t, 0.9, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_outside_cylinder_bounds() {
        assert!(
            intersect_ray_cylinder(Vec3::new(2.0, 0.0, 1.0), Vec3::NEG_Z, Vec3::ZERO, Vec3::X, 0.1)
                .is_none()
        );
    }

    #[test]
    fn test_ray_along_cylinder_axis() {
        assert!(
            intersect_ray_cylinder(Vec3::new(-1.0, 0.0, 0.0), Vec3::X, Vec3::ZERO, Vec3::X, 0.1)
                .is_none()
        );
    }

    #[test]
    fn test_unnormalized_direction_keeps_parameter_scale() {
        let t = intersect_ray_cylinder(
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::ZERO,
            Vec3::X,
            0.1,
        )
        .expect("scaled direction should still hit");
        assert_abs_diff_eq!(t, 0.45, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_hits_ring_band() {
        let t = intersect_ray_ring(
            Vec3::new(0.8, 0.0, 2.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::Z,
            0.8,
            0.1,
        )
        .expect("ray through the band should hit");
        assert_abs_diff_eq!(t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_through_ring_hole_misses() {
        assert!(
            intersect_ray_ring(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, Vec3::ZERO, Vec3::Z, 0.8, 0.1)
                .is_none()
        );
    }
}
