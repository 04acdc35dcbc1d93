use std::sync::Arc;
use glam::{Mat4, Vec3};
use super::*;
use crate::scene::{AnimationClip, SceneNode};

fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

fn two_frame_clip() -> Arc<AnimationClip> {
    let clip = AnimationClip::new(1, 2, 10.0, vec![Mat4::IDENTITY; 2]);
    Arc::new(clip.unwrap())
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_new_graph_has_only_root() {
    let graph = SceneGraph::new();

    assert_eq!(graph.len(), 1);
    assert!(graph.node(graph.root()).is_some());
    assert!(graph.children(graph.root()).is_empty());
}

#[test]
fn test_add_child_links_both_directions() {
    let mut graph = SceneGraph::new();
    let root = graph.root();

    let child = graph.add_child(root, SceneNode::new()).unwrap();

    assert_eq!(graph.children(root), &[child]);
    assert_eq!(graph.node(child).unwrap().parent(), Some(root));
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_add_child_to_stale_parent_fails() {
    let mut graph = SceneGraph::new();
    let child = graph.add_child(graph.root(), SceneNode::new()).unwrap();
    graph.remove(child);

    assert!(graph.add_child(child, SceneNode::new()).is_err());
}

#[test]
fn test_remove_drops_whole_subtree() {
    let mut graph = SceneGraph::new();
    let parent = graph.add_child(graph.root(), SceneNode::new()).unwrap();
    let child = graph.add_child(parent, SceneNode::new()).unwrap();
    let grandchild = graph.add_child(child, SceneNode::new()).unwrap();

    assert!(graph.remove(parent));

    assert_eq!(graph.len(), 1);
    assert!(graph.node(parent).is_none());
    assert!(graph.node(child).is_none());
    assert!(graph.node(grandchild).is_none());
    assert!(graph.children(graph.root()).is_empty());
}

#[test]
fn test_remove_root_is_refused() {
    let mut graph = SceneGraph::new();
    assert!(!graph.remove(graph.root()));
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_remove_stale_key_returns_false() {
    let mut graph = SceneGraph::new();
    let child = graph.add_child(graph.root(), SceneNode::new()).unwrap();
    assert!(graph.remove(child));
    assert!(!graph.remove(child));
}

// ============================================================================
// World-transform propagation
// ============================================================================

#[test]
fn test_update_composes_world_transforms() {
    let mut graph = SceneGraph::new();
    let parent = graph
        .add_child(graph.root(), SceneNode::new().with_transform(translation(1.0, 0.0, 0.0)))
        .unwrap();
    let child = graph
        .add_child(parent, SceneNode::new().with_transform(translation(0.0, 1.0, 0.0)))
        .unwrap();

    graph.update(0.016);

    let world = graph.node(child).unwrap().world_position();
    assert!((world - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
}

#[test]
fn test_update_reflects_parent_edit_in_same_frame() {
    let mut graph = SceneGraph::new();
    let parent = graph
        .add_child(graph.root(), SceneNode::new().with_transform(translation(1.0, 0.0, 0.0)))
        .unwrap();
    let child = graph
        .add_child(parent, SceneNode::new().with_transform(translation(0.0, 1.0, 0.0)))
        .unwrap();
    graph.update(0.016);

    graph
        .node_mut(parent)
        .unwrap()
        .set_local_transform(translation(10.0, 0.0, 0.0));
    graph.update(0.016);

    // Parents are visited before children, so the child never sees the
    // parent's previous world transform.
    let world = graph.node(child).unwrap().world_position();
    assert!((world - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-6);
}

#[test]
fn test_root_world_transform_is_its_local() {
    let mut graph = SceneGraph::new();
    graph
        .node_mut(graph.root())
        .unwrap()
        .set_local_transform(translation(0.0, 5.0, 0.0));

    graph.update(0.0);

    let root = graph.root();
    let world = graph.node(root).unwrap().world_position();
    assert!((world - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-6);
}

// ============================================================================
// Animation clocks
// ============================================================================

#[test]
fn test_update_advances_animation_clocks() {
    let mut graph = SceneGraph::new();
    let animated = graph
        .add_child(graph.root(), SceneNode::new().with_animation(two_frame_clip()))
        .unwrap();

    // 10 fps clip: 0.05s crosses the first frame boundary
    graph.update(0.05);

    assert_eq!(graph.node(animated).unwrap().animation_state().current_frame(), 1);
}

#[test]
fn test_update_with_zero_dt_is_idempotent() {
    let mut graph = SceneGraph::new();
    let animated = graph
        .add_child(graph.root(), SceneNode::new().with_animation(two_frame_clip()))
        .unwrap();

    graph.update(0.0);
    graph.update(0.0);

    assert_eq!(graph.node(animated).unwrap().animation_state().current_frame(), 0);
}

#[test]
fn test_reset_animations_rewinds_every_clock() {
    let mut graph = SceneGraph::new();
    let a = graph
        .add_child(graph.root(), SceneNode::new().with_animation(two_frame_clip()))
        .unwrap();
    let b = graph
        .add_child(graph.root(), SceneNode::new().with_animation(two_frame_clip()))
        .unwrap();
    graph.update(0.05);

    graph.reset_animations();

    assert_eq!(graph.node(a).unwrap().animation_state().current_frame(), 0);
    assert_eq!(graph.node(b).unwrap().animation_state().current_frame(), 0);
}
