//! Selected nodes and their pivot

use glam::Vec3;

use crate::node::{Node, NodeId};
use crate::scene::Scene;

/// One selected node with its model-space centroid captured on insert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionEntry {
    pub id: NodeId,
    pub local_centroid: Vec3,
}

/// Ordered set of selected nodes.
///
/// The first entry is the primary selection; it provides the frame for local
/// orientation mode.
#[derive(Debug, Clone, Default)]
pub struct SelectionList {
    entries: Vec<SelectionEntry>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false if it was already selected.
    ///
    /// Drawables contribute their geometry's bounding box center; groups and
    /// lights use their origin.
    pub fn insert(&mut self, node: &Node) -> bool {
        let id = node.id();
        if self.contains(id) {
            return false;
        }
        let local_centroid = node
            .as_drawable()
            .map(|d| d.local_centroid())
            .unwrap_or(Vec3::ZERO);
        self.entries.push(SelectionEntry { id, local_centroid });
        true
    }

    /// Replace the whole selection with a single node
    pub fn select_only(&mut self, node: &Node) {
        self.entries.clear();
        self.insert(node);
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.entries.first().map(|e| e.id)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    /// Mean of every selected node's centroid in world space.
    ///
    /// Nodes no longer present in `scene` are ignored. `None` when nothing
    /// selected is left.
    pub fn centroid(&self, scene: &Scene) -> Option<Vec3> {
        let (sum, count) = self
            .entries
            .iter()
            .filter_map(|entry| {
                let node = scene.node(entry.id)?;
                Some(
                    node.scene_node()
                        .derived_transform()
                        .transform_point3(entry.local_centroid),
                )
            })
            .fold((Vec3::ZERO, 0usize), |(sum, count), p| (sum + p, count + 1));
        (count > 0).then(|| sum / count as f32)
    }
}
