//! Transform gizmo
//!
//! The gizmo is three sub-graphs of tagged drawables (translate, rotate,
//! scale) hanging off one frame node, plus a camera-facing center handle that
//! is tested on its own. The frame sits on the selection pivot and is scaled
//! with the eye distance so the handles keep a constant size on screen.

mod handle;

pub use handle::{DragMode, HandleTag, UnknownHandleTag};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use se_core::math::FaceCulling;
use se_core::primitive::{
    generate_box_mesh, generate_cone_mesh, generate_cylinder_mesh_with_segments, generate_quad_mesh,
    generate_ring_mesh,
};
use se_core::{ContainerNode, Drawable, Geometry, Hit, HitShape, PipelineHandle, PipelineRegistry};
use se_core::{RenderInstance, SceneNode};

use crate::camera::Camera;
use crate::config::GizmoConfig;
use crate::constants::gizmo as constants;

/// Name of the pipeline gizmo handles are drawn with
pub const GIZMO_PIPELINE: &str = "gizmo";

/// Gizmo coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoSpace {
    /// Handles follow the world axes
    #[default]
    Global,
    /// Handles follow the primary selected node's rotation
    Local,
}

/// One of the three handle sub-graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleGroup {
    /// Arrows and plane squares
    Translate,
    /// Rings
    Rotate,
    /// Axis cubes and the center cube
    Scale,
}

/// The on-screen manipulation handles
#[derive(Debug, Clone)]
pub struct Gizmo {
    frame: SceneNode,
    translator: ContainerNode,
    scaler: ContainerNode,
    rotator: ContainerNode,
    camera_handle: Drawable,
    screen_scale: f32,
    show_translate: bool,
    show_rotate: bool,
    show_scale: bool,
    active: bool,
}

impl Gizmo {
    /// Build every handle. Registers the gizmo pipeline.
    pub fn new(config: &GizmoConfig, registry: &mut PipelineRegistry) -> Self {
        let pipeline = registry.register(GIZMO_PIPELINE);
        let axes = [
            (Vec3::X, config.x_axis_color),
            (Vec3::Y, config.y_axis_color),
            (Vec3::Z, config.z_axis_color),
        ];

        let camera_size = config.camera_handle_half_size * 2.0;
        let camera_handle = tagged(
            HandleTag::CameraPlane,
            Geometry::from_primitive(generate_quad_mesh([camera_size, camera_size])),
            pipeline,
            config.center_color,
        )
        .with_culling(FaceCulling::None);

        Self {
            frame: SceneNode::new("gizmo"),
            translator: build_translator(&axes, pipeline),
            scaler: build_scaler(&axes, config.center_color, pipeline),
            rotator: build_rotator(&axes, pipeline),
            camera_handle,
            screen_scale: config.screen_scale,
            show_translate: config.show_translate,
            show_rotate: config.show_rotate,
            show_scale: config.show_scale,
            active: false,
        }
    }

    /// Move the gizmo onto `pivot`, oriented by `rotation`, sized for `camera`
    pub fn place(&mut self, pivot: Vec3, rotation: Quat, camera: &Camera) {
        let size = (self.screen_scale * (camera.position() - pivot).length()).max(f32::EPSILON);

        self.frame.set_translation(pivot);
        self.frame.set_rotation(rotation);
        self.frame.set_scale(Vec3::splat(size));
        let world = self.frame.compute_transform(None, true);

        self.translator.update_transforms(&world);
        self.scaler.update_transforms(&world);
        self.rotator.update_transforms(&world);

        let node = &mut self.camera_handle.node;
        node.set_translation(pivot);
        node.set_rotation(camera.orientation());
        node.set_scale(Vec3::splat(size));
        node.compute_transform(None, true);

        self.active = true;
    }

    /// Hide the gizmo (nothing selected)
    pub fn hide(&mut self) {
        self.active = false;
    }

    /// Whether the gizmo is placed and pickable
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current pivot
    pub fn pivot(&self) -> Vec3 {
        self.frame.translation()
    }

    /// Current orientation
    pub fn rotation(&self) -> Quat {
        self.frame.rotation()
    }

    /// World size of one gizmo unit
    pub fn size(&self) -> f32 {
        self.frame.scale().x
    }

    /// Show or hide one handle group
    pub fn set_visible(&mut self, group: HandleGroup, visible: bool) {
        match group {
            HandleGroup::Translate => self.show_translate = visible,
            HandleGroup::Rotate => self.show_rotate = visible,
            HandleGroup::Scale => self.show_scale = visible,
        }
    }

    /// Whether a handle group is shown
    pub fn is_visible(&self, group: HandleGroup) -> bool {
        match group {
            HandleGroup::Translate => self.show_translate,
            HandleGroup::Rotate => self.show_rotate,
            HandleGroup::Scale => self.show_scale,
        }
    }

    fn visible_groups(&self) -> impl Iterator<Item = &ContainerNode> {
        [
            (self.show_translate, &self.translator),
            (self.show_scale, &self.scaler),
            (self.show_rotate, &self.rotator),
        ]
        .into_iter()
        .filter_map(|(shown, group)| shown.then_some(group))
    }

    /// Drawable for a handle, if the gizmo has one with that tag
    pub fn handle(&self, tag: HandleTag) -> Option<&Drawable> {
        if tag == HandleTag::CameraPlane {
            return Some(&self.camera_handle);
        }
        let mut found = None;
        for group in [&self.translator, &self.scaler, &self.rotator] {
            group.visit(&mut |node| {
                if let Some(drawable) = node.as_drawable()
                    && found.is_none()
                    && drawable.tag == tag.as_str()
                {
                    found = Some(drawable);
                }
            });
        }
        found
    }

    /// Pick a handle with a world ray.
    ///
    /// The camera-facing center handle wins outright. Otherwise the nearest
    /// tagged drawable across the visible groups is taken; on equal distance
    /// the translate group beats scale, which beats rotate.
    pub fn hit_test(&self, origin: Vec3, dir: Vec3) -> Option<(HandleTag, Hit)> {
        if !self.active {
            return None;
        }
        if let Some(hit) = self.camera_handle.hit_test(origin, dir) {
            return Some((HandleTag::CameraPlane, hit));
        }

        let pickable = |d: &Drawable| !d.tag.is_empty() && d.tag != HandleTag::CameraPlane.as_str();
        let mut best: Option<Hit> = None;
        for group in self.visible_groups() {
            if let Some(hit) = group.model_hit_test(origin, dir, Some(&pickable))
                && best.as_ref().is_none_or(|b| hit.t < b.t)
            {
                best = Some(hit);
            }
        }

        let hit = best?;
        match hit.tag.parse::<HandleTag>() {
            Ok(tag) => Some((tag, hit)),
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        }
    }

    /// Instance records for the visible handles
    pub fn render_instances(&self, highlighted: Option<HandleTag>) -> Vec<RenderInstance> {
        if !self.active {
            return Vec::new();
        }
        let is_highlighted = |d: &Drawable| highlighted.is_some_and(|tag| d.tag == tag.as_str());

        let mut instances = Vec::new();
        for group in self.visible_groups() {
            group.visit(&mut |node| {
                if let Some(drawable) = node.as_drawable() {
                    instances.push(RenderInstance::from_drawable(drawable, is_highlighted(drawable)));
                }
            });
        }
        instances.push(RenderInstance::from_drawable(
            &self.camera_handle,
            is_highlighted(&self.camera_handle),
        ));
        instances
    }
}

/// Rotation taking the +Z axis of a generated mesh onto `axis`
fn axis_rotation(axis: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Z, axis)
}

fn tagged(tag: HandleTag, geometry: Geometry, pipeline: PipelineHandle, color: [f32; 4]) -> Drawable {
    Drawable::new(tag.as_str(), geometry, pipeline)
        .with_tag(tag.as_str())
        .with_color(color)
}

/// Untagged drawable: drawn but never picked
fn decoration(name: &str, geometry: Geometry, pipeline: PipelineHandle, color: [f32; 4]) -> Drawable {
    Drawable::new(name, geometry, pipeline).with_color(color)
}

fn placed(mut drawable: Drawable, translation: Vec3, rotation: Quat) -> Drawable {
    drawable.node.set_translation(translation);
    drawable.node.set_rotation(rotation);
    drawable
}

fn add_all(group: &mut ContainerNode, drawables: impl IntoIterator<Item = Drawable>) {
    for drawable in drawables {
        group
            .add_child(drawable)
            .expect("gizmo handles are created with fresh ids");
    }
}

fn build_translator(axes: &[(Vec3, [f32; 4]); 3], pipeline: PipelineHandle) -> ContainerNode {
    use constants::*;

    let mut group = ContainerNode::new("translator");
    let shaft_length = ARROW_LENGTH - ARROW_TIP_LENGTH;
    let arrow_tags = [HandleTag::TranslateX, HandleTag::TranslateY, HandleTag::TranslateZ];
    let plane_tags = [HandleTag::TranslateYz, HandleTag::TranslateXz, HandleTag::TranslateXy];

    for ((axis, color), (arrow_tag, plane_tag)) in axes.iter().zip(arrow_tags.into_iter().zip(plane_tags)) {
        let rotation = axis_rotation(*axis);

        // Shaft picks along the whole arrow including the tip
        let shaft = tagged(
            arrow_tag,
            Geometry::from_primitive(generate_cylinder_mesh_with_segments(
                SHAFT_RADIUS,
                shaft_length,
                HANDLE_SEGMENTS,
            )),
            pipeline,
            *color,
        )
        .with_shape(HitShape::Cylinder {
            start: Vec3::new(0.0, 0.0, -shaft_length / 2.0),
            end: Vec3::new(0.0, 0.0, shaft_length / 2.0 + ARROW_TIP_LENGTH),
            radius: HIT_RADIUS,
        });
        let tip = decoration(
            "arrow_tip",
            Geometry::from_primitive(generate_cone_mesh(ARROW_TIP_RADIUS, ARROW_TIP_LENGTH, HANDLE_SEGMENTS)),
            pipeline,
            *color,
        );

        let mut plane_color = *color;
        plane_color[3] = 0.5;
        let plane = tagged(
            plane_tag,
            Geometry::from_primitive(generate_quad_mesh([PLANE_SIZE, PLANE_SIZE])),
            pipeline,
            plane_color,
        )
        .with_culling(FaceCulling::None);

        add_all(
            &mut group,
            [
                placed(shaft, *axis * (shaft_length / 2.0), rotation),
                placed(tip, *axis * (shaft_length + ARROW_TIP_LENGTH / 2.0), rotation),
                placed(plane, (Vec3::ONE - *axis) * (PLANE_OFFSET + PLANE_SIZE / 2.0), rotation),
            ],
        );
    }
    group
}

fn build_rotator(axes: &[(Vec3, [f32; 4]); 3], pipeline: PipelineHandle) -> ContainerNode {
    use constants::*;

    let mut group = ContainerNode::new("rotator");
    let tags = [HandleTag::RotateX, HandleTag::RotateY, HandleTag::RotateZ];
    for ((axis, color), tag) in axes.iter().zip(tags) {
        let ring = tagged(
            tag,
            Geometry::from_primitive(generate_ring_mesh(RING_RADIUS, RING_TUBE_RADIUS)),
            pipeline,
            *color,
        )
        .with_shape(HitShape::Ring {
            normal: Vec3::Z,
            radius: RING_RADIUS,
            thickness: RING_HIT_THICKNESS,
        });
        add_all(&mut group, [placed(ring, Vec3::ZERO, axis_rotation(*axis))]);
    }
    group
}

fn build_scaler(
    axes: &[(Vec3, [f32; 4]); 3],
    center_color: [f32; 4],
    pipeline: PipelineHandle,
) -> ContainerNode {
    use constants::*;

    let mut group = ContainerNode::new("scaler");
    let tags = [HandleTag::ScaleX, HandleTag::ScaleY, HandleTag::ScaleZ];
    let shaft_length = SCALE_AXIS_LENGTH - SCALE_CUBE_SIZE / 2.0;
    for ((axis, color), tag) in axes.iter().zip(tags) {
        let shaft = decoration(
            "scale_shaft",
            Geometry::from_primitive(generate_cylinder_mesh_with_segments(
                SHAFT_RADIUS,
                shaft_length,
                HANDLE_SEGMENTS,
            )),
            pipeline,
            *color,
        );
        let cube = tagged(
            tag,
            Geometry::from_primitive(generate_box_mesh([SCALE_CUBE_SIZE; 3])),
            pipeline,
            *color,
        );
        let rotation = axis_rotation(*axis);
        add_all(
            &mut group,
            [
                placed(shaft, *axis * (shaft_length / 2.0), rotation),
                placed(cube, *axis * SCALE_AXIS_LENGTH, rotation),
            ],
        );
    }

    let center = tagged(
        HandleTag::ScaleAll,
        Geometry::from_primitive(generate_box_mesh([SCALE_ALL_SIZE; 3])),
        pipeline,
        center_color,
    );
    add_all(&mut group, [center]);
    group
}
