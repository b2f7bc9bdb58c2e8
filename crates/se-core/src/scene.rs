//! Scene root

use std::sync::Arc;

use glam::{Mat4, Vec3};
use parking_lot::Mutex;

use crate::math::FaceCulling;
use crate::node::{ContainerNode, Hit, Node, NodeId};
use crate::render::{LightRecord, RenderInstance};
use crate::selection::SelectionList;

/// Scene graph errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Node already in the scene: {0}")]
    DuplicateNode(NodeId),
    #[error("Node is not a container: {0}")]
    NotAContainer(NodeId),
}

/// Scene shared with a renderer on another thread
pub type SharedScene = Arc<Mutex<Scene>>;

/// The scene graph root.
///
/// All objects live under one root container whose transform is the world
/// frame.
#[derive(Debug, Clone)]
pub struct Scene {
    root: ContainerNode,
    face_culling: FaceCulling,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: ContainerNode::new("root"),
            face_culling: FaceCulling::Back,
        }
    }

    pub fn into_shared(self) -> SharedScene {
        Arc::new(Mutex::new(self))
    }

    pub fn root(&self) -> &ContainerNode {
        &self.root
    }

    /// Add a top-level node
    pub fn add(&mut self, node: impl Into<Node>) -> Result<NodeId, SceneError> {
        let mut node = node.into();
        self.apply_culling(&mut node);
        self.root.add_child(node)
    }

    /// Add a node under an existing container
    pub fn add_to(&mut self, parent: NodeId, node: impl Into<Node>) -> Result<NodeId, SceneError> {
        let mut node = node.into();
        let mut incoming = Vec::new();
        node.collect_ids(&mut incoming);
        if let Some(duplicate) = incoming.into_iter().find(|id| self.contains(*id)) {
            return Err(SceneError::DuplicateNode(duplicate));
        }
        self.apply_culling(&mut node);

        if parent == self.root.id() {
            return self.root.add_child(node);
        }
        self.root
            .find_mut(parent)
            .ok_or(SceneError::NodeNotFound(parent))?
            .as_container_mut()
            .ok_or(SceneError::NotAContainer(parent))?
            .add_child(node)
    }

    pub fn remove(&mut self, id: NodeId) -> Result<Node, SceneError> {
        self.root.remove_child(id).ok_or(SceneError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id == self.root.id() || self.root.find(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.root.find_mut(id)
    }

    /// Propagate world matrices through the whole graph.
    ///
    /// Every node is recomputed so parent changes always reach children.
    /// Returns whether anything had changed since the previous call.
    pub fn update_transforms(&mut self) -> bool {
        let dirty = self.root.is_dirty();
        self.root.update_transforms(&Mat4::IDENTITY);
        dirty
    }

    /// Whether any node changed since the last [`Scene::update_transforms`]
    pub fn is_dirty(&self) -> bool {
        self.root.is_dirty()
    }

    pub fn face_culling(&self) -> FaceCulling {
        self.face_culling
    }

    /// Set the picking policy for every drawable in the scene, now and later
    pub fn set_face_culling(&mut self, culling: FaceCulling) {
        self.face_culling = culling;
        for child in self.root.children_mut() {
            set_culling(child, culling);
        }
    }

    fn apply_culling(&self, node: &mut Node) {
        set_culling(node, self.face_culling);
    }

    /// Nearest scene geometry along a world ray
    pub fn hit_test(&self, origin: Vec3, dir: Vec3) -> Option<Hit> {
        self.root.model_hit_test(origin, dir, None)
    }

    /// Instance records for every visible drawable, selected ones highlighted
    pub fn render_instances(&self, selection: Option<&SelectionList>) -> Vec<RenderInstance> {
        let mut instances = Vec::new();
        self.root.visit(&mut |node| {
            if let Some(drawable) = node.as_drawable()
                && drawable.visible
            {
                let selected = selection.is_some_and(|s| s.contains(drawable.id()));
                instances.push(RenderInstance::from_drawable(drawable, selected));
            }
        });
        instances
    }

    pub fn lights(&self) -> Vec<LightRecord> {
        let mut lights = Vec::new();
        self.root.visit(&mut |node| {
            if let Some(light) = node.as_light() {
                lights.push(LightRecord::from_light(light));
            }
        });
        lights
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn set_culling(node: &mut Node, culling: FaceCulling) {
    match node {
        Node::Mesh(drawable) => drawable.culling = culling,
        Node::Group(container) => {
            for child in container.children_mut() {
                set_culling(child, culling);
            }
        }
        Node::Light(_) => {}
    }
}
