//! Scene Editor Viewport
//!
//! Interaction layer on top of `se-core`: the orbit camera, the transform
//! gizmo and the drag state machine that turns pointer rays into node
//! transforms.
//!
//! # Architecture
//!
//! - [`camera::Camera`] - Orbit camera, projection and screen-to-ray
//! - [`gizmo::Gizmo`] - Translate, rotate and scale handle sub-graphs
//! - [`transformer::Transformer`] - Pointer-down/move/up state machine
//! - [`config::EditorConfig`] - RON-backed settings
//!
//! # Module Structure
//!
//! ```text
//! se-viewport/
//! ├── camera.rs      # Camera, CameraUniform
//! ├── config.rs      # EditorConfig and its sections
//! ├── constants.rs   # Camera limits, gizmo dimensions
//! ├── gizmo/         # Handle construction, placement and picking
//! └── transformer/   # Drag sessions and the state machine
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod gizmo;
pub mod transformer;

pub use camera::{Camera, CameraUniform, Projection};
pub use config::{CameraConfig, ConfigError, EditorConfig, GizmoConfig, PickingConfig, SnapConfig};
pub use gizmo::{DragMode, Gizmo, GizmoSpace, HandleGroup, HandleTag};
pub use transformer::{DragUpdate, HitOutcome, Transformer, TransformerState};
