use std::sync::Arc;
use glam::{Mat4, Vec3, Vec4};
use super::*;
use crate::camera::Frustum;
use crate::device::ShaderIndex;
use crate::resource::Material;
use crate::scene::SceneNode;

/// An orthographic box around the origin: everything nearby is visible
fn wide_open_frustum() -> Frustum {
    let projection = Mat4::orthographic_rh(
        -1000.0, 1000.0,
        -1000.0, 1000.0,
        -1000.0, 1000.0,
    );
    Frustum::from_matrix(&projection)
}

fn node_at(x: f32, y: f32, z: f32) -> SceneNode {
    SceneNode::new().with_transform(Mat4::from_translation(Vec3::new(x, y, z)))
}

fn material(shader: u32) -> Arc<Material> {
    Arc::new(Material::new(ShaderIndex(shader)))
}

// ============================================================================
// build_node_lists
// ============================================================================

#[test]
fn test_alpha_routes_nodes_to_buckets() {
    let mut graph = SceneGraph::new();
    let opaque = graph
        .add_child(graph.root(), node_at(1.0, 0.0, 0.0))
        .unwrap();
    let transparent = graph
        .add_child(
            graph.root(),
            node_at(2.0, 0.0, 0.0).with_colour(Vec4::new(1.0, 1.0, 1.0, 0.5)),
        )
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);

    assert!(buckets.opaque().contains(&opaque));
    assert!(!buckets.opaque().contains(&transparent));
    assert!(buckets.transparent().contains(&transparent));
}

#[test]
fn test_out_of_frustum_node_is_skipped() {
    let mut graph = SceneGraph::new();
    let far_away = graph
        .add_child(graph.root(), node_at(5000.0, 0.0, 0.0))
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);

    assert!(!buckets.opaque().contains(&far_away));
    assert!(!buckets.transparent().contains(&far_away));
}

#[test]
fn test_visible_child_of_culled_parent_is_kept() {
    let mut graph = SceneGraph::new();
    let parent = graph
        .add_child(graph.root(), node_at(5000.0, 0.0, 0.0))
        .unwrap();
    // Child's local transform pulls it back inside the frustum
    let child = graph
        .add_child(parent, node_at(-5000.0, 0.0, 0.0))
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);

    assert!(!buckets.opaque().contains(&parent));
    assert!(buckets.opaque().contains(&child));
}

#[test]
fn test_sphere_straddling_boundary_is_kept() {
    let mut graph = SceneGraph::new();
    let straddling = graph
        .add_child(
            graph.root(),
            node_at(1004.0, 0.0, 0.0).with_bounding_radius(10.0),
        )
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);

    assert!(buckets.opaque().contains(&straddling));
}

#[test]
fn test_build_caches_squared_camera_distance() {
    let mut graph = SceneGraph::new();
    let key = graph
        .add_child(graph.root(), node_at(3.0, 4.0, 0.0))
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);

    assert!((graph.node(key).unwrap().camera_distance_sq() - 25.0).abs() < 1e-5);
}

#[test]
fn test_meshless_root_is_filed_but_harmless() {
    let mut graph = SceneGraph::new();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);

    // Draw routines skip nodes without a mesh, so filing the root is fine
    assert!(buckets.opaque().contains(&graph.root()));
}

// ============================================================================
// sort_node_lists
// ============================================================================

#[test]
fn test_opaque_sorts_by_shader_then_nearest_first() {
    let mut graph = SceneGraph::new();
    let far_b = graph
        .add_child(graph.root(), node_at(0.0, 0.0, -30.0).with_material(material(2)))
        .unwrap();
    let near_b = graph
        .add_child(graph.root(), node_at(0.0, 0.0, -10.0).with_material(material(2)))
        .unwrap();
    let far_a = graph
        .add_child(graph.root(), node_at(0.0, 0.0, -50.0).with_material(material(1)))
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);
    buckets.sort_node_lists(&graph);

    let order: Vec<_> = buckets
        .opaque()
        .iter()
        .filter(|&&k| k != graph.root())
        .copied()
        .collect();
    // Shader 1 before shader 2, then nearest-first within shader 2
    assert_eq!(order, vec![far_a, near_b, far_b]);
}

#[test]
fn test_transparent_sorts_farthest_first_within_shader() {
    let mut graph = SceneGraph::new();
    let glass = |z: f32| {
        node_at(0.0, 0.0, z)
            .with_material(material(3))
            .with_colour(Vec4::new(1.0, 1.0, 1.0, 0.4))
    };
    let near = graph.add_child(graph.root(), glass(-10.0)).unwrap();
    let far = graph.add_child(graph.root(), glass(-40.0)).unwrap();
    let middle = graph.add_child(graph.root(), glass(-25.0)).unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);
    buckets.sort_node_lists(&graph);

    assert_eq!(buckets.transparent(), &[far, middle, near]);
}

#[test]
fn test_transparent_shader_key_still_dominates_distance() {
    let mut graph = SceneGraph::new();
    let near_low_shader = graph
        .add_child(
            graph.root(),
            node_at(0.0, 0.0, -5.0)
                .with_material(material(1))
                .with_colour(Vec4::new(1.0, 1.0, 1.0, 0.4)),
        )
        .unwrap();
    let far_high_shader = graph
        .add_child(
            graph.root(),
            node_at(0.0, 0.0, -90.0)
                .with_material(material(2))
                .with_colour(Vec4::new(1.0, 1.0, 1.0, 0.4)),
        )
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);
    buckets.sort_node_lists(&graph);

    assert_eq!(buckets.transparent(), &[near_low_shader, far_high_shader]);
}

// ============================================================================
// clear_node_lists
// ============================================================================

#[test]
fn test_build_then_clear_round_trip() {
    let mut graph = SceneGraph::new();
    graph.add_child(graph.root(), node_at(1.0, 0.0, 0.0)).unwrap();
    graph
        .add_child(
            graph.root(),
            node_at(2.0, 0.0, 0.0).with_colour(Vec4::new(1.0, 1.0, 1.0, 0.5)),
        )
        .unwrap();
    graph.update(0.0);

    let mut buckets = RenderBuckets::new();
    buckets.build_node_lists(&mut graph, &wide_open_frustum(), Vec3::ZERO);
    assert!(!buckets.opaque().is_empty());
    assert!(!buckets.transparent().is_empty());

    buckets.clear_node_lists();

    assert!(buckets.opaque().is_empty());
    assert!(buckets.transparent().is_empty());
}
