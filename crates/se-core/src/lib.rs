//! Scene Editor Core
//!
//! Geometry and scene-graph logic for the scene editor, with no rendering or
//! windowing dependencies.
//!
//! # Module Structure
//!
//! ```text
//! se-core/
//! ├── math/        # Ray tests, closest points, Euler conversion
//! ├── node/        # SceneNode, ContainerNode, Drawable, LightNode
//! ├── primitive/   # Box, cylinder, cone, sphere, quad, ring meshes
//! ├── mesh.rs      # MeshRecord validation into Geometry
//! ├── selection.rs # SelectionList and its centroid
//! ├── scene.rs     # Scene root, SharedScene
//! ├── registry.rs  # PipelineRegistry
//! └── render.rs    # Pod records for the renderer
//! ```

pub mod bounds;
pub mod constants;
pub mod math;
pub mod mesh;
pub mod node;
pub mod primitive;
pub mod registry;
pub mod render;
pub mod scene;
pub mod selection;

pub use bounds::BoundingBox;
pub use math::FaceCulling;
pub use mesh::{Geometry, MeshError, MeshRecord};
pub use node::{
    ContainerNode, Drawable, Hit, HitShape, LightKind, LightNode, Node, NodeId, SceneNode,
    TransformValues,
};
pub use registry::{PipelineHandle, PipelineRegistry};
pub use render::{LightRecord, RenderInstance};
pub use scene::{Scene, SceneError, SharedScene};
pub use selection::{SelectionEntry, SelectionList};
