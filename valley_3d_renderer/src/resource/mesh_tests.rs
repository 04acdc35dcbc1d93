use glam::Mat4;
use crate::error::Error;
use super::*;

// ============================================================================
// Mesh construction
// ============================================================================

#[test]
fn test_mesh_requires_submeshes() {
    let result = Mesh::new("empty", Vec::new());
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_mesh_submesh_access() {
    let mesh = Mesh::new(
        "tree",
        vec![
            SubMesh { index_start: 0, index_count: 300 },
            SubMesh { index_start: 300, index_count: 120 },
        ],
    )
    .unwrap();

    assert_eq!(mesh.name(), "tree");
    assert_eq!(mesh.sub_mesh_count(), 2);
    assert_eq!(mesh.sub_mesh(1).unwrap().index_start, 300);
    assert!(mesh.sub_mesh(2).is_none());
    assert!(mesh.skeleton().is_none());
}

#[test]
fn test_generate_quad() {
    let quad = Mesh::generate_quad();
    assert_eq!(quad.name(), "quad");
    assert_eq!(quad.sub_mesh_count(), 1);
    assert_eq!(quad.sub_mesh(0).unwrap().index_count, 6);
}

// ============================================================================
// Skeleton
// ============================================================================

#[test]
fn test_skeleton_requires_joints() {
    assert!(matches!(
        Skeleton::new(Vec::new()),
        Err(Error::InvalidResource(_))
    ));
}

#[test]
fn test_skinned_mesh_exposes_skeleton() {
    let skeleton = Skeleton::new(vec![Mat4::IDENTITY; 3]).unwrap();
    let mesh = Mesh::with_skeleton(
        "creature",
        vec![SubMesh { index_start: 0, index_count: 90 }],
        skeleton,
    )
    .unwrap();

    let skeleton = mesh.skeleton().unwrap();
    assert_eq!(skeleton.joint_count(), 3);
    assert!(skeleton.inverse_bind_pose(2).is_some());
    assert!(skeleton.inverse_bind_pose(3).is_none());
}
