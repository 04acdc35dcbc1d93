//! Scene management module
//!
//! Provides the scene graph (hierarchical nodes with exclusive ownership),
//! the skeletal animation sampler, and the per-frame visibility and
//! draw-order buckets.

mod scene_node;
mod scene_graph;
mod animation;
mod render_buckets;

pub use scene_node::{SceneNode, DrawKind};
pub use scene_graph::{SceneGraph, SceneNodeKey};
pub use animation::{AnimationClip, AnimationState, joint_matrices};
pub use render_buckets::RenderBuckets;
