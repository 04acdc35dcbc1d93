/// Central resource registry.
///
/// Stores name-keyed meshes and materials as shared handles. Scene
/// assembly registers resources once, then hands `Arc` clones to any
/// number of nodes.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Result, Error};
use crate::engine_error;
use super::mesh::Mesh;
use super::material::Material;

/// Name-keyed registries for shared meshes and materials.
///
/// Duplicate registration is a startup resource failure: the scene
/// assembly is expected to abort rather than silently shadow a resource.
pub struct ResourceManager {
    meshes: FxHashMap<String, Arc<Mesh>>,
    materials: FxHashMap<String, Arc<Material>>,
}

impl ResourceManager {
    /// Create a new empty resource manager
    pub fn new() -> Self {
        Self {
            meshes: FxHashMap::default(),
            materials: FxHashMap::default(),
        }
    }

    /// Register a mesh under a unique name
    ///
    /// Returns the shared handle handed to scene nodes.
    pub fn register_mesh(&mut self, name: &str, mesh: Mesh) -> Result<Arc<Mesh>> {
        if self.meshes.contains_key(name) {
            engine_error!("valley3d::ResourceManager",
                "Mesh '{}' already registered", name);
            return Err(Error::ResourceFailure(format!(
                "Mesh '{}' already registered", name
            )));
        }

        let mesh = Arc::new(mesh);
        self.meshes.insert(name.to_string(), mesh.clone());
        Ok(mesh)
    }

    /// Register a material under a unique name
    pub fn register_material(
        &mut self,
        name: &str,
        material: Material,
    ) -> Result<Arc<Material>> {
        if self.materials.contains_key(name) {
            engine_error!("valley3d::ResourceManager",
                "Material '{}' already registered", name);
            return Err(Error::ResourceFailure(format!(
                "Material '{}' already registered", name
            )));
        }

        let material = Arc::new(material);
        self.materials.insert(name.to_string(), material.clone());
        Ok(material)
    }

    /// Get a mesh by name
    pub fn mesh(&self, name: &str) -> Option<Arc<Mesh>> {
        self.meshes.get(name).cloned()
    }

    /// Get a material by name
    pub fn material(&self, name: &str) -> Option<Arc<Material>> {
        self.materials.get(name).cloned()
    }

    /// Number of registered meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of registered materials
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Remove all registered resources
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.materials.clear();
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
