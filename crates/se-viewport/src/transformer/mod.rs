//! Gizmo drag state machine
//!
//! The transformer owns the [`Gizmo`] and turns pointer events into
//! transform changes on the selected nodes:
//!
//! ```text
//!            hit_test (handle hit)            release / cancel
//!   Idle ─────────────────────────▶ Dragging ─────────────────▶ Idle
//!    ▲                               │    ▲
//!    │ hit_test (geometry or miss)   └────┘ drag (pointer move)
//!    └──┘
//! ```
//!
//! Every drag works from snapshots taken at pointer-down, so each move
//! recomputes the result from the start state rather than accumulating
//! increments.

mod drag;

use glam::{Quat, Vec3};
use se_core::{Hit, NodeId, PipelineRegistry, RenderInstance, Scene, SelectionList};

use crate::camera::Camera;
use crate::config::{EditorConfig, GizmoConfig, SnapConfig};
use crate::gizmo::{DragMode, Gizmo, GizmoSpace, HandleGroup, HandleTag};
use drag::{DragSession, NodeSnapshot};

/// Transformer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformerState {
    /// No drag in progress
    #[default]
    Idle,
    /// A handle is being dragged
    Dragging(DragMode),
}

/// Result of a pointer-down hit test
#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    /// A gizmo handle was hit and a drag started
    Gizmo {
        /// Mode of the started drag
        mode: DragMode,
        /// Handle that was hit
        tag: HandleTag,
    },
    /// No handle was hit but scene geometry was. No drag starts.
    Geometry(Hit),
    /// Nothing was hit
    Miss,
}

/// Nodes touched by one pointer move
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    /// Mode of the running drag
    pub mode: DragMode,
    /// Nodes whose transform was written
    pub updated: Vec<NodeId>,
    /// Nodes that have left the scene since the drag started
    pub skipped: Vec<NodeId>,
}

/// Drives gizmo picking and dragging
#[derive(Debug, Clone)]
pub struct Transformer {
    gizmo: Gizmo,
    space: GizmoSpace,
    snap: SnapConfig,
    hovered: Option<HandleTag>,
    session: Option<DragSession>,
}

impl Transformer {
    /// Create a transformer with its gizmo
    pub fn new(gizmo: &GizmoConfig, snap: SnapConfig, registry: &mut PipelineRegistry) -> Self {
        Self {
            gizmo: Gizmo::new(gizmo, registry),
            space: gizmo.space,
            snap,
            hovered: None,
            session: None,
        }
    }

    /// Create a transformer from the editor configuration
    pub fn from_config(config: &EditorConfig, registry: &mut PipelineRegistry) -> Self {
        Self::new(&config.gizmo, config.snap.clone(), registry)
    }

    /// Current state
    pub fn state(&self) -> TransformerState {
        self.session
            .as_ref()
            .map_or(TransformerState::Idle, |session| TransformerState::Dragging(session.mode))
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Orientation mode
    pub fn space(&self) -> GizmoSpace {
        self.space
    }

    /// Change the orientation mode. A running drag keeps the mode it
    /// started with.
    pub fn set_space(&mut self, space: GizmoSpace) {
        self.space = space;
    }

    /// Snapping increments
    pub fn snap(&self) -> &SnapConfig {
        &self.snap
    }

    /// Replace the snapping increments
    pub fn set_snap(&mut self, snap: SnapConfig) {
        self.snap = snap;
    }

    /// Show or hide a handle group
    pub fn set_visible(&mut self, group: HandleGroup, visible: bool) {
        self.gizmo.set_visible(group, visible);
    }

    /// The gizmo
    pub fn gizmo(&self) -> &Gizmo {
        &self.gizmo
    }

    /// Handle to draw highlighted: the dragged one, else the hovered one
    pub fn highlighted(&self) -> Option<HandleTag> {
        self.session.as_ref().map(|session| session.tag).or(self.hovered)
    }

    /// Instance records for the gizmo handles
    pub fn render_instances(&self) -> Vec<RenderInstance> {
        self.gizmo.render_instances(self.highlighted())
    }

    /// Move the gizmo onto the selection, or hide it when nothing is
    /// selected. Expects up-to-date scene transforms.
    pub fn sync(&mut self, camera: &Camera, scene: &Scene, selection: &SelectionList) {
        place_gizmo(&mut self.gizmo, self.space, camera, scene, selection);
    }

    /// Track the handle under the pointer for highlighting
    pub fn hover(
        &mut self,
        ndc_x: f32,
        ndc_y: f32,
        camera: &Camera,
        scene: &Scene,
        selection: &SelectionList,
    ) -> Option<HandleTag> {
        if self.is_dragging() {
            return self.highlighted();
        }
        self.sync(camera, scene, selection);
        let (origin, dir) = camera.screen_to_ray(ndc_x, ndc_y);
        self.hovered = self.gizmo.hit_test(origin, dir).map(|(tag, _)| tag);
        self.hovered
    }

    /// Pointer-down.
    ///
    /// Handles are tested first; a handle hit snapshots the selection and
    /// starts a drag. Otherwise the scene geometry is picked and the caller
    /// decides what to do with it.
    pub fn hit_test(
        &mut self,
        ndc_x: f32,
        ndc_y: f32,
        camera: &Camera,
        scene: &mut Scene,
        selection: &SelectionList,
    ) -> HitOutcome {
        if self.is_dragging() {
            self.release();
        }
        scene.update_transforms();
        self.sync(camera, scene, selection);

        let (origin, dir) = camera.screen_to_ray(ndc_x, ndc_y);
        if let Some((tag, _)) = self.gizmo.hit_test(origin, dir)
            && let Some(session) = self.begin(tag, camera, scene, selection, origin, dir)
        {
            tracing::debug!(
                mode = ?session.mode,
                tag = %tag,
                nodes = session.snapshots.len(),
                "Drag started"
            );
            let mode = session.mode;
            self.session = Some(session);
            self.hovered = Some(tag);
            return HitOutcome::Gizmo { mode, tag };
        }

        tracing::debug!("No gizmo handle hit, picking scene geometry");
        match scene.hit_test(origin, dir) {
            Some(hit) => HitOutcome::Geometry(hit),
            None => HitOutcome::Miss,
        }
    }

    fn begin(
        &self,
        tag: HandleTag,
        camera: &Camera,
        scene: &Scene,
        selection: &SelectionList,
        origin: Vec3,
        dir: Vec3,
    ) -> Option<DragSession> {
        let mut session = DragSession::begin(
            tag,
            self.space,
            self.gizmo.rotation(),
            self.gizmo.pivot(),
            camera.forward(),
            origin,
            dir,
            selection.clone(),
        )?;

        for id in selection.ids() {
            let Some(node) = scene.node(id) else {
                tracing::warn!(%id, "Selected node is not in the scene");
                continue;
            };
            match NodeSnapshot::capture(node) {
                Some(snapshot) => session.snapshots.push(snapshot),
                None => tracing::warn!(%id, "Parent transform is singular, node left out of the drag"),
            }
        }

        (!session.snapshots.is_empty()).then_some(session)
    }

    /// Pointer-move during a drag.
    ///
    /// Every snapshotted node is rewritten from its start state, then scene
    /// transforms are propagated and the gizmo follows the selection.
    ///
    /// # Panics
    ///
    /// Panics when no drag is in progress.
    pub fn drag(&mut self, ndc_x: f32, ndc_y: f32, camera: &Camera, scene: &mut Scene) -> DragUpdate {
        let Some(session) = self.session.as_mut() else {
            panic!("Transformer::drag called without an active drag");
        };

        let (origin, dir) = camera.screen_to_ray(ndc_x, ndc_y);
        let change = session.update(origin, dir, &self.snap);

        let mut update = DragUpdate {
            mode: session.mode,
            updated: Vec::with_capacity(session.snapshots.len()),
            skipped: Vec::new(),
        };
        for snapshot in &session.snapshots {
            match scene.node_mut(snapshot.id) {
                Some(node) => {
                    session.apply(snapshot, change, node.scene_node_mut());
                    update.updated.push(snapshot.id);
                }
                None => {
                    tracing::warn!(id = %snapshot.id, "Dragged node left the scene, skipping");
                    update.skipped.push(snapshot.id);
                }
            }
        }
        scene.update_transforms();
        place_gizmo(&mut self.gizmo, session.space, camera, scene, &session.selection);

        tracing::trace!(mode = ?update.mode, updated = update.updated.len(), "Drag update");
        update
    }

    /// Pointer-up. Returns the mode of the drag that ended.
    pub fn release(&mut self) -> Option<DragMode> {
        let session = self.session.take()?;
        tracing::debug!(mode = ?session.mode, "Drag ended");
        Some(session.mode)
    }

    /// Abort the drag and put every node back where it started.
    /// Returns `false` when no drag was in progress.
    pub fn cancel(&mut self, camera: &Camera, scene: &mut Scene) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        for snapshot in &session.snapshots {
            if let Some(node) = scene.node_mut(snapshot.id) {
                snapshot.restore(node.scene_node_mut());
            }
        }
        scene.update_transforms();
        place_gizmo(&mut self.gizmo, session.space, camera, scene, &session.selection);
        tracing::debug!(mode = ?session.mode, "Drag cancelled");
        true
    }
}

/// Local mode orients the gizmo by the world rotation of the first selected
/// node, so the handles line up with its visible axes under rotated parents
fn gizmo_rotation(space: GizmoSpace, scene: &Scene, selection: &SelectionList) -> Quat {
    match space {
        GizmoSpace::Global => Quat::IDENTITY,
        GizmoSpace::Local => selection
            .first()
            .and_then(|id| scene.node(id))
            .map_or(Quat::IDENTITY, |node| {
                let (_, rotation, _) = node.scene_node().derived_transform().to_scale_rotation_translation();
                rotation.normalize()
            }),
    }
}

fn place_gizmo(
    gizmo: &mut Gizmo,
    space: GizmoSpace,
    camera: &Camera,
    scene: &Scene,
    selection: &SelectionList,
) {
    match selection.centroid(scene) {
        Some(centroid) => gizmo.place(centroid, gizmo_rotation(space, scene, selection), camera),
        None => gizmo.hide(),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use se_core::math::closest_points_between_rays;
    use se_core::primitive::generate_box_mesh;
    use se_core::{Drawable, Geometry, PipelineHandle};

    use super::*;

    struct Fixture {
        camera: Camera,
        scene: Scene,
        selection: SelectionList,
        transformer: Transformer,
        cube: NodeId,
    }

    fn fixture(snap: SnapConfig) -> Fixture {
        let mut camera = Camera::new(1.0);
        camera.set_angles(0.0, 0.0);
        camera.distance = 10.0;

        let mut scene = Scene::new();
        let cube = Drawable::new(
            "cube",
            Geometry::from_primitive(generate_box_mesh([1.0, 1.0, 1.0])),
            PipelineHandle::DEFAULT,
        );
        let id = scene.add(cube).unwrap();
        scene.update_transforms();

        let mut selection = SelectionList::new();
        selection.insert(scene.node(id).unwrap());

        let mut registry = PipelineRegistry::new();
        let mut transformer = Transformer::new(&GizmoConfig::default(), snap, &mut registry);
        transformer.sync(&camera, &scene, &selection);

        Fixture {
            camera,
            scene,
            selection,
            transformer,
            cube: id,
        }
    }

    impl Fixture {
        /// NDC of a world point
        fn ndc(&self, point: Vec3) -> (f32, f32) {
            let view_proj = self.camera.projection_matrix() * self.camera.view_matrix();
            let ndc = view_proj.project_point3(point);
            (ndc.x, ndc.y)
        }

        fn press(&mut self, point: Vec3) -> HitOutcome {
            let (x, y) = self.ndc(point);
            self.transformer
                .hit_test(x, y, &self.camera, &mut self.scene, &self.selection)
        }

        fn move_to(&mut self, point: Vec3) -> DragUpdate {
            let (x, y) = self.ndc(point);
            self.transformer.drag(x, y, &self.camera, &mut self.scene)
        }

        fn gizmo_size(&self) -> f32 {
            self.transformer.gizmo().size()
        }

        fn cube_node(&self) -> &se_core::SceneNode {
            self.scene.node(self.cube).unwrap().scene_node()
        }

        fn set_cube_euler(&mut self, x: f32, y: f32, z: f32) {
            self.scene
                .node_mut(self.cube)
                .unwrap()
                .scene_node_mut()
                .set_rotation_from_euler(x, y, z);
        }

        /// Move the cube under a new group with the given rotation
        fn nest_cube(&mut self, group_rotation: Quat) {
            let cube = self.scene.remove(self.cube).unwrap();
            let mut group = se_core::ContainerNode::new("group");
            group.node.set_rotation(group_rotation);
            let group_id = self.scene.add(group).unwrap();
            self.scene.add_to(group_id, cube).unwrap();
            self.scene.update_transforms();
        }

        /// Drag the ring around the gizmo normal from +45° to +135°
        fn quarter_turn(&mut self) -> HitOutcome {
            let r = 0.8 * self.gizmo_size();
            let diagonal = std::f32::consts::FRAC_1_SQRT_2;
            let outcome = self.press(Vec3::new(r * diagonal, r * diagonal, 0.0));
            self.move_to(Vec3::new(-r * diagonal, r * diagonal, 0.0));
            outcome
        }

        fn world_rotation(&self) -> Quat {
            let (_, rotation, _) = self.cube_node().derived_transform().to_scale_rotation_translation();
            rotation
        }
    }

    fn assert_same_rotation(actual: Quat, expected: Quat) {
        assert!(
            actual.normalize().dot(expected.normalize()).abs() > 1.0 - 1e-5,
            "{actual:?} != {expected:?}"
        );
    }

    fn quarter(axis: Vec3) -> Quat {
        Quat::from_axis_angle(axis, std::f32::consts::FRAC_PI_2)
    }

    #[test]
    fn test_camera_plane_translate_moves_by_world_delta() {
        let mut f = fixture(SnapConfig::default());
        let outcome = f.press(Vec3::ZERO);
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Translate,
                tag: HandleTag::CameraPlane
            }
        );
        assert_eq!(f.transformer.state(), TransformerState::Dragging(DragMode::Translate));

        let update = f.move_to(Vec3::X);
        assert_eq!(update.updated, vec![f.cube]);
        assert!(update.skipped.is_empty());
        let t = f.cube_node().translation();
        assert!(t.abs_diff_eq(Vec3::X, 1e-4), "{t:?}");

        // Each move is relative to the drag start, not the previous move
        f.move_to(Vec3::X);
        assert!(f.cube_node().translation().abs_diff_eq(Vec3::X, 1e-4));

        assert_eq!(f.transformer.release(), Some(DragMode::Translate));
        assert_eq!(f.transformer.state(), TransformerState::Idle);
        assert!(f.transformer.gizmo().pivot().abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn test_axis_translate_stays_on_axis() {
        let mut f = fixture(SnapConfig::default());
        let size = f.gizmo_size();
        let start = Vec3::new(0.4 * size, 0.03 * size, 0.0);
        let outcome = f.press(start);
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Translate,
                tag: HandleTag::TranslateX
            }
        );

        let end = start + Vec3::new(1.0, 0.5, 0.0);
        f.move_to(end);

        let on_axis = |point: Vec3| {
            let (x, y) = f.ndc(point);
            let (origin, dir) = f.camera.screen_to_ray(x, y);
            closest_points_between_rays(Vec3::ZERO, Vec3::X, origin, dir).unwrap().0
        };
        let expected = on_axis(end) - on_axis(start);
        let t = f.cube_node().translation();
        assert!(t.abs_diff_eq(expected, 1e-4), "{t:?} != {expected:?}");
        assert_eq!(t.y, 0.0);
        assert_eq!(t.z, 0.0);
    }

    #[test]
    fn test_scale_x_doubles_with_snapping() {
        let mut f = fixture(SnapConfig {
            scale: Some(0.5),
            ..Default::default()
        });
        let size = f.gizmo_size();
        let start = Vec3::new(1.2 * size, 0.02 * size, 0.0);
        let outcome = f.press(start);
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::ScaleX,
                tag: HandleTag::ScaleX
            }
        );

        f.move_to(Vec3::new(start.x * 2.0, start.y, 0.0));
        assert_eq!(f.cube_node().scale(), Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotate_z_by_quarter_turn() {
        let mut f = fixture(SnapConfig {
            rotate_degrees: Some(5.0),
            ..Default::default()
        });
        let r = 0.8 * f.gizmo_size();
        let diagonal = std::f32::consts::FRAC_1_SQRT_2;
        let outcome = f.press(Vec3::new(r * diagonal, r * diagonal, 0.0));
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Rotate,
                tag: HandleTag::RotateZ
            }
        );

        f.move_to(Vec3::new(-r * diagonal, r * diagonal, 0.0));
        let euler = f.cube_node().euler_angles();
        assert_abs_diff_eq!(euler.z, 90.0, epsilon = 1e-3);
        assert_abs_diff_eq!(euler.x, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(euler.y, 0.0, epsilon = 1e-3);
        // Rotating about the pivot leaves the translation alone
        assert_eq!(f.cube_node().translation(), Vec3::ZERO);
    }

    #[test]
    fn test_global_rotation_composes_outside_node_rotation() {
        let mut f = fixture(SnapConfig {
            rotate_degrees: Some(5.0),
            ..Default::default()
        });
        f.set_cube_euler(90.0, 0.0, 0.0);

        let outcome = f.quarter_turn();
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Rotate,
                tag: HandleTag::RotateZ
            }
        );
        assert_same_rotation(f.cube_node().rotation(), quarter(Vec3::Z) * quarter(Vec3::X));
    }

    #[test]
    fn test_local_rotation_composes_inside_node_rotation() {
        let mut f = fixture(SnapConfig {
            rotate_degrees: Some(5.0),
            ..Default::default()
        });
        f.set_cube_euler(90.0, 0.0, 0.0);
        f.transformer.set_space(GizmoSpace::Local);

        // Turned 90° about X, the local Y ring faces the camera
        let outcome = f.quarter_turn();
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Rotate,
                tag: HandleTag::RotateY
            }
        );
        assert_same_rotation(f.cube_node().rotation(), quarter(Vec3::X) * quarter(Vec3::Y));
    }

    #[test]
    fn test_global_rotation_under_rotated_parent_turns_about_world_axis() {
        let mut f = fixture(SnapConfig {
            rotate_degrees: Some(5.0),
            ..Default::default()
        });
        f.nest_cube(quarter(Vec3::X));

        f.quarter_turn();
        assert_same_rotation(f.world_rotation(), quarter(Vec3::Z) * quarter(Vec3::X));
        // Stored relative to the parent
        assert_same_rotation(f.cube_node().rotation(), quarter(Vec3::Y));
    }

    #[test]
    fn test_unsnapped_scale_is_rounded() {
        let mut f = fixture(SnapConfig::default());
        let size = f.gizmo_size();
        let start = Vec3::new(1.2 * size, 0.02 * size, 0.0);
        f.press(start);
        let end = Vec3::new(start.x * 1.37, start.y, 0.0);
        f.move_to(end);

        let on_axis = |point: Vec3| {
            let (x, y) = f.ndc(point);
            let (origin, dir) = f.camera.screen_to_ray(x, y);
            closest_points_between_rays(Vec3::ZERO, Vec3::X, origin, dir).unwrap().0
        };
        let ratio = on_axis(end).length() / on_axis(start).length();

        let scale = f.cube_node().scale();
        assert_abs_diff_eq!(scale.x, ratio, epsilon = 1e-4);
        assert_eq!(scale.x, (scale.x * 1e4).round() / 1e4);
        assert_eq!(scale.y, 1.0);
        assert_eq!(scale.z, 1.0);
    }

    #[test]
    fn test_scale_all_on_camera_plane() {
        let mut f = fixture(SnapConfig::default());
        let size = f.gizmo_size();
        let start = Vec3::new(0.08 * size, 0.08 * size, 0.0);
        let outcome = f.press(start);
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::ScaleAll,
                tag: HandleTag::ScaleAll
            }
        );

        f.move_to(start * 3.0);
        assert_eq!(f.cube_node().scale(), Vec3::splat(3.0));
    }

    #[test]
    fn test_global_scale_x_grows_rotated_node_y() {
        let mut f = fixture(SnapConfig {
            scale: Some(0.5),
            ..Default::default()
        });
        f.set_cube_euler(0.0, 0.0, 90.0);
        let size = f.gizmo_size();
        let start = Vec3::new(1.2 * size, 0.02 * size, 0.0);
        f.press(start);

        f.move_to(Vec3::new(start.x * 2.0, start.y, 0.0));
        assert_eq!(f.cube_node().scale(), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_local_space_uses_world_rotation_under_rotated_parent() {
        let mut f = fixture(SnapConfig {
            translate: Some(0.5),
            ..Default::default()
        });
        f.nest_cube(quarter(Vec3::Z));
        f.transformer.set_space(GizmoSpace::Local);

        // The node's X axis points along world Y through its parent
        let size = f.gizmo_size();
        let start = Vec3::new(0.03 * size, 0.4 * size, 0.0);
        let outcome = f.press(start);
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Translate,
                tag: HandleTag::TranslateX
            }
        );
        assert_same_rotation(f.transformer.gizmo().rotation(), quarter(Vec3::Z));

        f.move_to(start + Vec3::Y);
        let node = f.cube_node();
        assert!(node.world_position().abs_diff_eq(Vec3::Y, 1e-4), "{:?}", node.world_position());
        assert!(node.translation().abs_diff_eq(Vec3::X, 1e-4), "{:?}", node.translation());
    }

    #[test]
    fn test_local_space_follows_node_rotation() {
        let mut f = fixture(SnapConfig {
            translate: Some(0.5),
            ..Default::default()
        });
        f.scene
            .node_mut(f.cube)
            .unwrap()
            .scene_node_mut()
            .set_rotation_from_euler(0.0, 0.0, 90.0);
        f.transformer.set_space(GizmoSpace::Local);

        // The local X arrow now points along world Y
        let size = f.gizmo_size();
        let start = Vec3::new(0.03 * size, 0.4 * size, 0.0);
        let outcome = f.press(start);
        assert_eq!(
            outcome,
            HitOutcome::Gizmo {
                mode: DragMode::Translate,
                tag: HandleTag::TranslateX
            }
        );

        f.move_to(start + Vec3::Y);
        let t = f.cube_node().translation();
        assert!(t.abs_diff_eq(Vec3::Y, 1e-5), "{t:?}");
    }

    #[test]
    fn test_nested_node_moves_by_world_delta() {
        let mut f = fixture(SnapConfig::default());
        let cube = f.scene.remove(f.cube).unwrap();
        let mut group = se_core::ContainerNode::new("group");
        group.node.set_scale(Vec3::splat(2.0));
        let group_id = f.scene.add(group).unwrap();
        f.scene.add_to(group_id, cube).unwrap();
        f.scene.update_transforms();

        f.press(Vec3::ZERO);
        f.move_to(Vec3::X);

        let node = f.cube_node();
        assert!(node.translation().abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-4));
        assert!(node.world_position().abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn test_geometry_hit_without_selection() {
        let mut f = fixture(SnapConfig::default());
        f.selection.clear();
        let outcome = f.press(Vec3::ZERO);
        let HitOutcome::Geometry(hit) = outcome else {
            panic!("expected a geometry hit, got {outcome:?}");
        };
        assert_eq!(hit.node_id, f.cube);
        assert_eq!(f.transformer.state(), TransformerState::Idle);
        assert!(!f.transformer.gizmo().is_active());
    }

    #[test]
    fn test_miss_stays_idle() {
        let mut f = fixture(SnapConfig::default());
        let outcome = f.transformer.hit_test(0.95, 0.95, &f.camera, &mut f.scene, &f.selection);
        assert_eq!(outcome, HitOutcome::Miss);
        assert_eq!(f.transformer.state(), TransformerState::Idle);
        assert_eq!(f.transformer.release(), None);
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut f = fixture(SnapConfig::default());
        f.press(Vec3::ZERO);
        f.move_to(Vec3::new(2.0, 1.0, 0.0));
        assert!(!f.cube_node().translation().abs_diff_eq(Vec3::ZERO, 1e-3));

        assert!(f.transformer.cancel(&f.camera, &mut f.scene));
        assert_eq!(f.cube_node().translation(), Vec3::ZERO);
        assert_eq!(f.transformer.state(), TransformerState::Idle);
        assert!(!f.transformer.cancel(&f.camera, &mut f.scene));
    }

    #[test]
    fn test_removed_node_is_skipped() {
        let mut f = fixture(SnapConfig::default());
        f.press(Vec3::ZERO);
        f.scene.remove(f.cube).unwrap();

        let update = f.move_to(Vec3::X);
        assert!(update.updated.is_empty());
        assert_eq!(update.skipped, vec![f.cube]);
    }

    #[test]
    fn test_hover_highlights_handle() {
        let mut f = fixture(SnapConfig::default());
        let (x, y) = f.ndc(Vec3::ZERO);
        let tag = f.transformer.hover(x, y, &f.camera, &f.scene, &f.selection);
        assert_eq!(tag, Some(HandleTag::CameraPlane));
        assert_eq!(f.transformer.highlighted(), Some(HandleTag::CameraPlane));
        assert_eq!(
            f.transformer
                .render_instances()
                .iter()
                .filter(|i| i.highlighted == 1)
                .count(),
            1
        );
    }

    #[test]
    #[should_panic(expected = "without an active drag")]
    fn test_drag_without_press_panics() {
        let mut f = fixture(SnapConfig::default());
        f.transformer.drag(0.0, 0.0, &f.camera, &mut f.scene);
    }
}
