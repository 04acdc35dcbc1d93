/// Render buckets - per-frame visibility and draw-order scheduler.
///
/// Each frame the scheduler walks the scene graph, tests every node's
/// bounding sphere against the frustum, and files the survivors into an
/// opaque and a transparent list. The lists are sorted by shader index
/// first (minimizing pipeline switches) and camera distance second:
/// opaque front-to-back for early-z, transparent back-to-front for
/// correct alpha blending.

use glam::Vec3;

use crate::camera::Frustum;
use crate::device::ShaderIndex;
use super::scene_graph::{SceneGraph, SceneNodeKey};

/// Opaque and transparent draw lists, rebuilt every frame.
pub struct RenderBuckets {
    opaque: Vec<SceneNodeKey>,
    transparent: Vec<SceneNodeKey>,
}

impl RenderBuckets {
    pub fn new() -> Self {
        Self {
            opaque: Vec::new(),
            transparent: Vec::new(),
        }
    }

    /// Opaque draw list, in draw order after `sort_node_lists`
    pub fn opaque(&self) -> &[SceneNodeKey] {
        &self.opaque
    }

    /// Transparent draw list, in draw order after `sort_node_lists`
    pub fn transparent(&self) -> &[SceneNodeKey] {
        &self.transparent
    }

    /// Walk the graph, cull against `frustum`, and file visible nodes.
    ///
    /// Culling a node never culls its subtree: children are visited
    /// unconditionally, since a child's bounding sphere may lie inside
    /// the frustum while its parent's does not. Each visible node's
    /// squared distance to `camera_position` is cached on the node for
    /// the sort pass.
    pub fn build_node_lists(
        &mut self,
        graph: &mut SceneGraph,
        frustum: &Frustum,
        camera_position: Vec3,
    ) {
        let mut stack = vec![graph.root()];

        while let Some(key) = stack.pop() {
            stack.extend(graph.children(key));

            let Some(node) = graph.node_mut(key) else {
                continue;
            };

            let position = node.world_position();
            if !frustum.inside_frustum(position, node.bounding_radius()) {
                continue;
            }

            node.set_camera_distance_sq((position - camera_position).length_squared());

            if node.is_transparent() {
                self.transparent.push(key);
            } else {
                self.opaque.push(key);
            }
        }
    }

    /// Sort both lists into draw order.
    ///
    /// Primary key: shader index ascending, so equal-shader runs batch
    /// together. Secondary key: squared camera distance, ascending for
    /// the opaque list and descending for the transparent one. Keeping
    /// shader as the primary key trades some blending fidelity between
    /// different-shader transparent nodes for fewer pipeline switches.
    pub fn sort_node_lists(&mut self, graph: &SceneGraph) {
        let sort_key = |key: SceneNodeKey| -> (ShaderIndex, f32) {
            graph
                .node(key)
                .map(|n| (n.shader_index(), n.camera_distance_sq()))
                .unwrap_or((ShaderIndex(0), 0.0))
        };

        self.opaque.sort_by(|&a, &b| {
            let (shader_a, dist_a) = sort_key(a);
            let (shader_b, dist_b) = sort_key(b);
            shader_a.cmp(&shader_b).then(dist_a.total_cmp(&dist_b))
        });

        self.transparent.sort_by(|&a, &b| {
            let (shader_a, dist_a) = sort_key(a);
            let (shader_b, dist_b) = sort_key(b);
            shader_a.cmp(&shader_b).then(dist_b.total_cmp(&dist_a))
        });
    }

    /// Empty both lists; keys never survive into the next frame
    pub fn clear_node_lists(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
    }
}

impl Default for RenderBuckets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "render_buckets_tests.rs"]
mod tests;
