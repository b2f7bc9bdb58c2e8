//! Scene graph nodes
//!
//! The hierarchy is a closed set of node kinds wrapped in [`Node`]:
//! meshes ([`Drawable`]), groups ([`ContainerNode`]) and lights
//! ([`LightNode`]). Every kind embeds a [`SceneNode`] for its transform.

mod container;
mod drawable;
mod light;
mod scene_node;

use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use container::ContainerNode;
pub use drawable::{Drawable, Hit, HitShape};
pub use light::{LightKind, LightNode};
pub use scene_node::{SceneNode, TransformValues};

/// Stable, globally unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Any node that can live in a container
#[derive(Debug, Clone)]
pub enum Node {
    Mesh(Drawable),
    Group(ContainerNode),
    Light(LightNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.scene_node().id()
    }

    pub fn name(&self) -> &str {
        &self.scene_node().name
    }

    pub fn scene_node(&self) -> &SceneNode {
        match self {
            Node::Mesh(drawable) => &drawable.node,
            Node::Group(container) => &container.node,
            Node::Light(light) => &light.node,
        }
    }

    pub fn scene_node_mut(&mut self) -> &mut SceneNode {
        match self {
            Node::Mesh(drawable) => &mut drawable.node,
            Node::Group(container) => &mut container.node,
            Node::Light(light) => &mut light.node,
        }
    }

    pub fn as_drawable(&self) -> Option<&Drawable> {
        match self {
            Node::Mesh(drawable) => Some(drawable),
            _ => None,
        }
    }

    pub fn as_drawable_mut(&mut self) -> Option<&mut Drawable> {
        match self {
            Node::Mesh(drawable) => Some(drawable),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Node::Group(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerNode> {
        match self {
            Node::Group(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&LightNode> {
        match self {
            Node::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Recompute this node's world matrix and, for groups, the whole subtree.
    pub fn update_transforms(&mut self, parent: &Mat4) {
        match self {
            Node::Group(container) => container.update_transforms(parent),
            other => {
                other.scene_node_mut().compute_transform(Some(parent), true);
            }
        }
    }

    /// True if this node or any descendant has an uncommitted transform change
    pub fn is_dirty(&self) -> bool {
        match self {
            Node::Group(container) => container.is_dirty(),
            other => other.scene_node().is_dirty(),
        }
    }

    /// Find `id` in this node or its descendants
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        self.as_container().and_then(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id() == id {
            return Some(self);
        }
        self.as_container_mut().and_then(|c| c.find_mut(id))
    }

    /// Collect the ids of this node and all descendants, depth-first
    pub fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id());
        if let Node::Group(container) = self {
            for child in container.children() {
                child.collect_ids(out);
            }
        }
    }
}

impl From<Drawable> for Node {
    fn from(drawable: Drawable) -> Self {
        Node::Mesh(drawable)
    }
}

impl From<ContainerNode> for Node {
    fn from(container: ContainerNode) -> Self {
        Node::Group(container)
    }
}

impl From<LightNode> for Node {
    fn from(light: LightNode) -> Self {
        Node::Light(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_downcast_helpers() {
        let group: Node = ContainerNode::new("group").into();
        assert!(group.as_container().is_some());
        assert!(group.as_drawable().is_none());

        let light: Node = LightNode::point("lamp").into();
        assert!(light.as_light().is_some());
        assert!(light.as_container().is_none());
        assert_eq!(light.name(), "lamp");
    }
}
