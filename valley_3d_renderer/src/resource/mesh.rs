/// Mesh resource - submesh layout plus optional skinning data.
///
/// Geometry buffers live in the backend; the core keeps only what the
/// scheduler and sampler need: submesh ranges for draw submission and,
/// for skinned meshes, the skeleton's inverse bind pose.

use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;

/// One drawable index range within a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    /// First index of the range
    pub index_start: u32,
    /// Number of indices to draw
    pub index_count: u32,
}

/// Skinning data for an animated mesh.
///
/// The inverse bind pose maps a vertex from bind pose into joint-local
/// space; the sampler multiplies the current frame's joint transform on
/// the left to produce the final skinning matrix.
#[derive(Debug, Clone)]
pub struct Skeleton {
    joint_count: usize,
    inverse_bind_pose: Vec<Mat4>,
}

impl Skeleton {
    /// Create a skeleton, validating that the inverse bind pose covers
    /// every joint.
    pub fn new(inverse_bind_pose: Vec<Mat4>) -> Result<Self> {
        if inverse_bind_pose.is_empty() {
            engine_bail!("valley3d::Skeleton", "Skeleton has no joints");
        }
        Ok(Self {
            joint_count: inverse_bind_pose.len(),
            inverse_bind_pose,
        })
    }

    /// Number of joints
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// Inverse bind pose matrix of one joint
    pub fn inverse_bind_pose(&self, joint: usize) -> Option<&Mat4> {
        self.inverse_bind_pose.get(joint)
    }
}

/// Shared mesh resource.
///
/// Shared across nodes via `Arc<Mesh>`; never mutated after creation.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    sub_meshes: Vec<SubMesh>,
    skeleton: Option<Skeleton>,
}

impl Mesh {
    /// Create a static mesh
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh has no submeshes.
    pub fn new(name: &str, sub_meshes: Vec<SubMesh>) -> Result<Self> {
        if sub_meshes.is_empty() {
            engine_bail!("valley3d::Mesh", "Mesh '{}' has no submeshes", name);
        }
        Ok(Self {
            name: name.to_string(),
            sub_meshes,
            skeleton: None,
        })
    }

    /// Create a skinned mesh
    pub fn with_skeleton(
        name: &str,
        sub_meshes: Vec<SubMesh>,
        skeleton: Skeleton,
    ) -> Result<Self> {
        let mut mesh = Self::new(name, sub_meshes)?;
        mesh.skeleton = Some(skeleton);
        Ok(mesh)
    }

    /// Generate the unit quad used for water, skybox and present passes
    pub fn generate_quad() -> Self {
        Self {
            name: "quad".to_string(),
            sub_meshes: vec![SubMesh { index_start: 0, index_count: 6 }],
            skeleton: None,
        }
    }

    /// Mesh name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of submeshes
    pub fn sub_mesh_count(&self) -> usize {
        self.sub_meshes.len()
    }

    /// One submesh by index
    pub fn sub_mesh(&self, index: usize) -> Option<&SubMesh> {
        self.sub_meshes.get(index)
    }

    /// Skinning data, if this mesh is skinned
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
