//! Renderable leaf node

use glam::Vec3;

use super::{NodeId, SceneNode};
use crate::constants::DEFAULT_COLOR;
use crate::math::{
    FaceCulling, intersect_ray_cylinder, intersect_ray_ring, intersect_ray_sphere, try_inverse,
};
use crate::mesh::Geometry;
use crate::registry::PipelineHandle;

/// What a drawable is tested against when picking.
///
/// Implicit shapes are expressed in the drawable's model space and are used
/// for thin gizmo handles where a triangle test would be too unforgiving.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HitShape {
    /// The geometry's own triangles
    #[default]
    Triangles,
    Sphere {
        radius: f32,
    },
    /// Finite cylinder side from `start` to `end`
    Cylinder {
        start: Vec3,
        end: Vec3,
        radius: f32,
    },
    /// Annulus centered at the origin
    Ring {
        normal: Vec3,
        radius: f32,
        thickness: f32,
    },
}

/// Result of a successful pick
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub node_id: NodeId,
    /// Tag of the drawable that was hit (empty for plain scene geometry)
    pub tag: String,
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
}

/// A scene node with geometry attached
#[derive(Debug, Clone)]
pub struct Drawable {
    pub node: SceneNode,
    pub geometry: Geometry,
    pub shape: HitShape,
    pub culling: FaceCulling,
    /// Classifies the drawable for the gizmo; empty for scene objects
    pub tag: String,
    /// RGBA
    pub color: [f32; 4],
    pub pipeline: PipelineHandle,
    pub visible: bool,
}

impl Drawable {
    pub fn new(name: impl Into<String>, geometry: Geometry, pipeline: PipelineHandle) -> Self {
        Self {
            node: SceneNode::new(name),
            geometry,
            shape: HitShape::Triangles,
            culling: FaceCulling::Back,
            tag: String::new(),
            color: DEFAULT_COLOR,
            pipeline,
            visible: true,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: HitShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_culling(mut self, culling: FaceCulling) -> Self {
        self.culling = culling;
        self
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Center of the geometry's bounding box in model space
    pub fn local_centroid(&self) -> Vec3 {
        self.geometry.local_centroid()
    }

    /// Test a world-space ray against this drawable.
    ///
    /// The ray is carried into model space with the inverse of the derived
    /// transform. The direction is not renormalized, so the returned `t` is
    /// valid on the original world ray. Hidden drawables and drawables with a
    /// singular transform (e.g. zero scale) never hit.
    pub fn hit_test(&self, origin: Vec3, dir: Vec3) -> Option<Hit> {
        if !self.visible {
            return None;
        }
        let inverse = try_inverse(&self.node.derived_transform())?;
        let local_origin = inverse.transform_point3(origin);
        let local_dir = inverse.transform_vector3(dir);

        let t = match self.shape {
            HitShape::Triangles => self
                .geometry
                .intersect(local_origin, local_dir, self.culling)
                .map(|hit| hit.t),
            HitShape::Sphere { radius } => {
                intersect_ray_sphere(local_origin, local_dir, Vec3::ZERO, radius)
            }
            HitShape::Cylinder { start, end, radius } => {
                intersect_ray_cylinder(local_origin, local_dir, start, end, radius)
            }
            HitShape::Ring {
                normal,
                radius,
                thickness,
            } => intersect_ray_ring(local_origin, local_dir, Vec3::ZERO, normal, radius, thickness),
        }?;

        Some(Hit {
            node_id: self.id(),
            tag: self.tag.clone(),
            t,
            point: origin + dir * t,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::{Mat4, Quat};

    use super::*;
    use crate::primitive::{generate_box_mesh, generate_quad_mesh};

    fn cube() -> Drawable {
        Drawable::new(
            "cube",
            Geometry::from_primitive(generate_box_mesh([1.0, 1.0, 1.0])),
            PipelineHandle::default(),
        )
    }

    #[test]
    fn test_cube_hit_at_expected_distance() {
        let mut cube = cube();
        cube.node.compute_transform(None, true);
        let hit = cube.hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_abs_diff_eq!(hit.t, 4.5, epsilon = 1e-5);
        assert!(hit.point.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
    }

    #[test]
    fn test_scaled_cube_keeps_world_parameter() {
        let mut cube = cube();
        cube.node.set_scale(Vec3::splat(2.0));
        cube.node.compute_transform(None, true);
        let hit = cube.hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_parent_transform_moves_hit() {
        let mut cube = cube();
        cube.node.compute_transform(Some(&Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0))), true);
        assert!(cube.hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
        assert!(cube.hit_test(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z).is_some());
    }

    #[test]
    fn test_zero_scale_never_hits() {
        let mut cube = cube();
        cube.node.set_scale(Vec3::new(0.0, 1.0, 1.0));
        cube.node.compute_transform(None, true);
        assert!(cube.hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn test_tiny_uniform_scale_still_hits() {
        let mut cube = cube();
        cube.node.set_scale(Vec3::splat(1e-5));
        cube.node.compute_transform(None, true);
        let hit = cube.hit_test(Vec3::new(1e-6, 2e-6, 5.0), Vec3::NEG_Z).unwrap();
        assert_abs_diff_eq!(hit.t, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn test_hidden_drawable_never_hits() {
        let mut cube = cube();
        cube.visible = false;
        cube.node.compute_transform(None, true);
        assert!(cube.hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn test_quad_culling_policy() {
        // Quad in the XY plane facing +Z, viewed from behind
        let geometry = Geometry::from_primitive(generate_quad_mesh([1.0, 1.0]));
        let mut one_sided = Drawable::new("q", geometry.clone(), PipelineHandle::default());
        one_sided.node.compute_transform(None, true);
        let mut two_sided = Drawable::new("q2", geometry, PipelineHandle::default())
            .with_culling(FaceCulling::None);
        two_sided.node.compute_transform(None, true);

        let origin = Vec3::new(0.0, 0.0, -2.0);
        assert!(one_sided.hit_test(origin, Vec3::Z).is_none());
        assert!(two_sided.hit_test(origin, Vec3::Z).is_some());
    }

    #[test]
    fn test_cylinder_shape_follows_rotation() {
        let mut arrow = cube().with_shape(HitShape::Cylinder {
            start: Vec3::ZERO,
            end: Vec3::X,
            radius: 0.1,
        });
        // Rotate the X arrow onto +Y
        arrow.node.set_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        arrow.node.compute_transform(None, true);

        assert!(arrow.hit_test(Vec3::new(0.0, 0.5, 2.0), Vec3::NEG_Z).is_some());
        assert!(arrow.hit_test(Vec3::new(0.5, 0.0, 2.0), Vec3::NEG_Z).is_none());
    }
}
