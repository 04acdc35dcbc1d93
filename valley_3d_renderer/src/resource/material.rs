/// Material resource - shader program plus texture bindings.
///
/// Shared across nodes via `Arc<Material>`. A node without a material is
/// skipped at draw time; a material without a texture falls back to
/// `TextureHandle::MISSING` rather than aborting the frame.

use crate::device::{ShaderIndex, TextureHandle, CubeMapHandle};

/// Shared material: which program draws the node and what it samples
#[derive(Debug, Clone)]
pub struct Material {
    shader: ShaderIndex,
    diffuse_texture: Option<TextureHandle>,
    cube_map: Option<CubeMapHandle>,
}

impl Material {
    /// Create a material for a shader program
    pub fn new(shader: ShaderIndex) -> Self {
        Self {
            shader,
            diffuse_texture: None,
            cube_map: None,
        }
    }

    /// Set the diffuse texture
    pub fn with_diffuse(mut self, texture: TextureHandle) -> Self {
        self.diffuse_texture = Some(texture);
        self
    }

    /// Set the environment cube map (reflective materials)
    pub fn with_cube_map(mut self, cube_map: CubeMapHandle) -> Self {
        self.cube_map = Some(cube_map);
        self
    }

    /// Shader program index (primary draw-order sort key)
    pub fn shader(&self) -> ShaderIndex {
        self.shader
    }

    /// Diffuse texture, falling back to the missing-texture handle
    pub fn diffuse_texture(&self) -> TextureHandle {
        self.diffuse_texture.unwrap_or(TextureHandle::MISSING)
    }

    /// Environment cube map, if any
    pub fn cube_map(&self) -> Option<CubeMapHandle> {
        self.cube_map
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
