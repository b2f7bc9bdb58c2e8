//! Grouping node

use glam::{Mat4, Vec3};

use super::{Drawable, Hit, Node, NodeId, SceneNode};
use crate::scene::SceneError;

/// A node owning an ordered list of children.
///
/// Child order is traversal order; it only matters for breaking ties between
/// hits at the same distance (the first one found wins).
#[derive(Debug, Clone)]
pub struct ContainerNode {
    pub node: SceneNode,
    children: Vec<Node>,
}

impl ContainerNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: SceneNode::new(name),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child.
    ///
    /// Fails if the child (or anything below it) shares an id with this
    /// container's subtree.
    pub fn add_child(&mut self, child: impl Into<Node>) -> Result<NodeId, SceneError> {
        let child = child.into();
        let mut incoming = Vec::new();
        child.collect_ids(&mut incoming);
        if let Some(duplicate) = incoming
            .iter()
            .copied()
            .find(|id| *id == self.id() || self.find(*id).is_some())
        {
            return Err(SceneError::DuplicateNode(duplicate));
        }

        let id = child.id();
        self.children.push(child);
        Ok(id)
    }

    /// Remove a node anywhere below this container
    pub fn remove_child(&mut self, id: NodeId) -> Option<Node> {
        if let Some(index) = self.children.iter().position(|c| c.id() == id) {
            return Some(self.children.remove(index));
        }
        self.children
            .iter_mut()
            .filter_map(Node::as_container_mut)
            .find_map(|c| c.remove_child(id))
    }

    /// Find a descendant by id (not including this container itself)
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Visit every descendant depth-first, parents before children
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        for child in &self.children {
            f(child);
            if let Node::Group(container) = child {
                container.visit(f);
            }
        }
    }

    /// Recompute this container's matrix from `parent`, then every child's
    /// from this container's, depth-first.
    pub fn update_transforms(&mut self, parent: &Mat4) {
        let world = self.node.compute_transform(Some(parent), true);
        for child in &mut self.children {
            child.update_transforms(&world);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.node.is_dirty() || self.children.iter().any(Node::is_dirty)
    }

    /// Nearest drawable hit in this subtree.
    ///
    /// Each drawable tests the ray in its own model space. The smallest `t`
    /// wins; on equal `t` the first drawable in traversal order is kept.
    /// `filter` can exclude drawables (for example untagged ones).
    pub fn model_hit_test(
        &self,
        origin: Vec3,
        dir: Vec3,
        filter: Option<&dyn Fn(&Drawable) -> bool>,
    ) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for child in &self.children {
            let hit = match child {
                Node::Mesh(drawable) => {
                    if filter.is_some_and(|accept| !accept(drawable)) {
                        continue;
                    }
                    drawable.hit_test(origin, dir)
                }
                Node::Group(container) => container.model_hit_test(origin, dir, filter),
                Node::Light(_) => None,
            };
            if let Some(hit) = hit
                && best.as_ref().is_none_or(|b| hit.t < b.t)
            {
                best = Some(hit);
            }
        }
        best
    }
}
