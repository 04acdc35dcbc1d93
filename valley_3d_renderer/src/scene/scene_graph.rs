/// Scene graph - arena-backed tree of scene nodes.
///
/// Nodes live in a slotmap keyed by `SceneNodeKey`; parent→child edges
/// are exclusive ownership, so removing a node drops its whole subtree.
/// `update` propagates world transforms top-down and advances every
/// animation clock in one pre-order traversal.

use glam::Mat4;
use slotmap::SlotMap;

use crate::error::Result;
use crate::engine_bail;
use super::scene_node::SceneNode;

slotmap::new_key_type! {
    /// Stable handle to a node in a `SceneGraph`
    pub struct SceneNodeKey;
}

/// Tree of scene nodes rooted at an empty, mesh-less node.
pub struct SceneGraph {
    nodes: SlotMap<SceneNodeKey, SceneNode>,
    root: SceneNodeKey,
}

impl SceneGraph {
    /// Create a graph holding only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new());

        Self { nodes, root }
    }

    /// Key of the root node
    pub fn root(&self) -> SceneNodeKey {
        self.root
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node
    pub fn node(&self, key: SceneNodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, key: SceneNodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Child keys of a node (empty slice for a stale key)
    pub fn children(&self, key: SceneNodeKey) -> &[SceneNodeKey] {
        self.nodes.get(key).map(|n| n.children()).unwrap_or(&[])
    }

    /// Insert `node` as the last child of `parent`.
    ///
    /// Fails if `parent` is not a live key of this graph.
    pub fn add_child(&mut self, parent: SceneNodeKey, mut node: SceneNode) -> Result<SceneNodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!("valley3d::SceneGraph", "Cannot add child: parent key is stale");
        }

        node.parent = Some(parent);
        let key = self.nodes.insert(node);
        // contains_key checked above
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(key);
        }

        Ok(key)
    }

    /// Remove a node and its entire subtree.
    ///
    /// The root cannot be removed. Returns true if anything was removed.
    pub fn remove(&mut self, key: SceneNodeKey) -> bool {
        if key == self.root || !self.nodes.contains_key(key) {
            return false;
        }

        // Detach from the parent's child list first
        if let Some(parent) = self.nodes.get(key).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&child| child != key);
            }
        }

        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children());
            }
        }

        true
    }

    /// Advance the graph by `dt` seconds.
    ///
    /// One pre-order traversal: every node's world transform is recomputed
    /// as `parent.world * local` (the root's parent being the identity),
    /// and every animated node's clock advances by `dt`. Parents are always
    /// visited before their children, so a frame never mixes old and new
    /// transforms along a path to the root.
    pub fn update(&mut self, dt: f32) {
        let mut stack = vec![(self.root, Mat4::IDENTITY)];

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };

            let world = parent_world * *node.local_transform();
            node.set_world_transform(world);

            if let Some(clip) = node.animation().cloned() {
                node.animation_state_mut().advance(dt, &clip);
            }

            for &child in self.nodes[key].children() {
                stack.push((child, world));
            }
        }
    }

    /// Rewind every animation clock to frame zero
    pub fn reset_animations(&mut self) {
        for node in self.nodes.values_mut() {
            node.animation_state_mut().reset();
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
