//! Shared visual resources
//!
//! Meshes and materials are reference-shared (`Arc`) across scene nodes.
//! Sharing a mesh is never a graph edge: the scene graph's parent→child
//! ownership is exclusive, resource sharing is orthogonal to it.

mod mesh;
mod material;
mod resource_manager;

pub use mesh::{Mesh, SubMesh, Skeleton};
pub use material::Material;
pub use resource_manager::ResourceManager;
