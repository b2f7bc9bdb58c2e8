//! State captured at pointer-down and the per-move delta math

use glam::{Mat3, Mat4, Quat, Vec3};
use se_core::constants::SCALE_DECIMALS;
use se_core::math::{
    angle_about_axis, closest_points_between_rays, intersect_ray_plane, round_to, snap_to, try_inverse,
};
use se_core::{Node, NodeId, SceneNode, SelectionList};

use crate::config::SnapConfig;
use crate::constants::gizmo::MIN_SCALE_DISTANCE;
use crate::gizmo::{DragMode, GizmoSpace, HandleTag};

/// What the pointer ray is intersected with during a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Constraint {
    /// Plane through the pivot
    Plane { normal: Vec3 },
    /// Line through the pivot
    Axis { vector: Vec3 },
    /// Plane through the pivot, angle measured from `up`.
    /// `axis` is the handle's axis before the Local frame was applied.
    Rotation {
        normal: Vec3,
        up: Vec3,
        axis: Vec3,
        starting_angle: f32,
    },
}

impl Constraint {
    fn intersect(&self, pivot: Vec3, origin: Vec3, dir: Vec3) -> Option<Vec3> {
        match *self {
            Constraint::Plane { normal } | Constraint::Rotation { normal, .. } => {
                intersect_ray_plane(pivot, normal, origin, dir)
            }
            Constraint::Axis { vector } => {
                closest_points_between_rays(pivot, vector, origin, dir).map(|(on_axis, _)| on_axis)
            }
        }
    }
}

/// A selected node's transform at drag start
#[derive(Debug, Clone)]
pub(crate) struct NodeSnapshot {
    pub id: NodeId,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Maps world vectors into the node's parent space
    pub parent_inverse: Mat4,
    pub parent_rotation: Quat,
}

impl NodeSnapshot {
    /// `None` when the parent matrix cannot be inverted
    pub fn capture(node: &Node) -> Option<Self> {
        let scene_node: &SceneNode = node.scene_node();
        let parent = scene_node.parent_transform();
        let parent_inverse = try_inverse(&parent)?;
        let (_, parent_rotation, _) = parent.to_scale_rotation_translation();
        Some(Self {
            id: node.id(),
            translation: scene_node.translation(),
            rotation: scene_node.rotation(),
            scale: scene_node.scale(),
            parent_inverse,
            parent_rotation,
        })
    }

    pub fn restore(&self, node: &mut SceneNode) {
        node.set_translation(self.translation);
        node.set_rotation(self.rotation);
        node.set_scale(self.scale);
    }
}

/// Result of one pointer move, common to every selected node
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Change {
    /// World-space offset
    Translate(Vec3),
    /// Per-axis factor in the gizmo frame
    Scale(Vec3),
    /// Angle in radians about the locked axis
    Rotate(f32),
}

/// Everything a drag needs between pointer-down and pointer-up
#[derive(Debug, Clone)]
pub(crate) struct DragSession {
    pub mode: DragMode,
    pub tag: HandleTag,
    pub space: GizmoSpace,
    pub pivot: Vec3,
    pub anchor: Vec3,
    pub constraint: Constraint,
    pub initial_distance: f32,
    pub snapshots: Vec<NodeSnapshot>,
    pub selection: SelectionList,
    /// Last good intersection, kept when the ray degenerates
    current: Vec3,
    current_angle: f32,
}

impl DragSession {
    /// Lock the constraint for `tag` and find the anchor under the ray.
    ///
    /// Axis, plane and ring constraints are rotated by `frame`. The center
    /// handles use the camera plane. Returns `None` when the ray does not meet
    /// the constraint, or a scale drag would start on the pivot.
    #[allow(clippy::too_many_arguments)]
    pub fn begin(
        tag: HandleTag,
        space: GizmoSpace,
        frame: Quat,
        pivot: Vec3,
        camera_forward: Vec3,
        origin: Vec3,
        dir: Vec3,
        selection: SelectionList,
    ) -> Option<Self> {
        let mode = tag.mode();
        let constraint = match (mode, tag.axis()) {
            (DragMode::Rotate, Some(axis)) => {
                let normal = frame * axis;
                let up = frame * tag.up_reference()?;
                let starting_angle = angle_about_axis(normal, up, pivot, origin, dir)?;
                Constraint::Rotation {
                    normal,
                    up,
                    axis,
                    starting_angle,
                }
            }
            (_, None) => Constraint::Plane {
                normal: camera_forward,
            },
            (_, Some(axis)) if tag.is_planar() => Constraint::Plane {
                normal: frame * axis,
            },
            (_, Some(axis)) => Constraint::Axis {
                vector: frame * axis,
            },
        };

        let anchor = constraint.intersect(pivot, origin, dir)?;
        let initial_distance = (anchor - pivot).length();
        let is_scale = !matches!(mode, DragMode::Translate | DragMode::Rotate);
        if is_scale && initial_distance < MIN_SCALE_DISTANCE {
            return None;
        }

        let current_angle = match constraint {
            Constraint::Rotation { starting_angle, .. } => starting_angle,
            _ => 0.0,
        };

        Some(Self {
            mode,
            tag,
            space,
            pivot,
            anchor,
            constraint,
            initial_distance,
            snapshots: Vec::new(),
            selection,
            current: anchor,
            current_angle,
        })
    }

    /// Intersect a new pointer ray and turn it into a change relative to the
    /// drag start. A ray that misses the constraint repeats the last change.
    pub fn update(&mut self, origin: Vec3, dir: Vec3, snap: &SnapConfig) -> Change {
        if let Constraint::Rotation {
            normal,
            up,
            starting_angle,
            ..
        } = self.constraint
        {
            if let Some(angle) = angle_about_axis(normal, up, self.pivot, origin, dir) {
                self.current_angle = angle;
            }
            let degrees = snapped((self.current_angle - starting_angle).to_degrees(), snap.rotate_degrees);
            return Change::Rotate(degrees.to_radians());
        }

        if let Some(point) = self.constraint.intersect(self.pivot, origin, dir) {
            self.current = point;
        }

        match self.mode {
            DragMode::Translate => Change::Translate(self.translation_delta(snap.translate)),
            DragMode::Rotate => panic!("Rotate drag without a rotation constraint"),
            DragMode::ScaleAll => Change::Scale(Vec3::splat(self.scale_ratio(snap.scale))),
            DragMode::ScaleX => Change::Scale(Vec3::new(self.scale_ratio(snap.scale), 1.0, 1.0)),
            DragMode::ScaleY => Change::Scale(Vec3::new(1.0, self.scale_ratio(snap.scale), 1.0)),
            DragMode::ScaleZ => Change::Scale(Vec3::new(1.0, 1.0, self.scale_ratio(snap.scale))),
        }
    }

    fn translation_delta(&self, increment: Option<f32>) -> Vec3 {
        let delta = self.current - self.anchor;
        match self.constraint {
            Constraint::Axis { vector } => {
                let direction = vector.normalize_or_zero();
                direction * snapped(delta.dot(direction), increment)
            }
            _ => Vec3::new(
                snapped(delta.x, increment),
                snapped(delta.y, increment),
                snapped(delta.z, increment),
            ),
        }
    }

    fn scale_ratio(&self, increment: Option<f32>) -> f32 {
        snapped((self.current - self.pivot).length() / self.initial_distance, increment)
    }

    /// Write the snapshot with `change` applied into `node`
    pub fn apply(&self, snapshot: &NodeSnapshot, change: Change, node: &mut SceneNode) {
        match change {
            Change::Translate(delta) => {
                node.set_translation(snapshot.translation + snapshot.parent_inverse.transform_vector3(delta));
            }
            Change::Scale(factor) => {
                let factor = match self.space {
                    GizmoSpace::Global => {
                        world_factor_in_node_axes(snapshot.parent_rotation * snapshot.rotation, factor)
                    }
                    GizmoSpace::Local => factor,
                };
                let scale = (factor * snapshot.scale).abs();
                node.set_scale(Vec3::new(
                    round_to(scale.x, SCALE_DECIMALS),
                    round_to(scale.y, SCALE_DECIMALS),
                    round_to(scale.z, SCALE_DECIMALS),
                ));
            }
            Change::Rotate(angle) => {
                let Constraint::Rotation { normal, axis, .. } = self.constraint else {
                    panic!("Rotate drag without a rotation constraint");
                };
                let rotation = match self.space {
                    GizmoSpace::Global => {
                        let parent_axis = (snapshot.parent_rotation.inverse() * normal).normalize();
                        Quat::from_axis_angle(parent_axis, angle) * snapshot.rotation
                    }
                    GizmoSpace::Local => snapshot.rotation * Quat::from_axis_angle(axis, angle),
                };
                node.set_rotation(rotation.normalize());
            }
        }
    }
}

fn snapped(value: f32, increment: Option<f32>) -> f32 {
    increment.map_or(value, |increment| snap_to(value, increment))
}

/// Diagonal of `Rᵀ · diag(factor) · R`: a world-axis scale seen from the
/// node's own axes.
fn world_factor_in_node_axes(rotation: Quat, factor: Vec3) -> Vec3 {
    let r = Mat3::from_quat(rotation);
    let m = r.transpose() * Mat3::from_diagonal(factor) * r;
    Vec3::new(m.x_axis.x, m.y_axis.y, m.z_axis.z)
}
