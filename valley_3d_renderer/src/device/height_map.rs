/// HeightMap - terrain capability consumed by the frame pipeline.
///
/// The surface geometry itself lives in the backend; the core only needs
/// the world-space size (camera placement, water quad extents) and the
/// bindings required to draw the ground pass.

use glam::{Vec3, Vec4};
use super::graphics_device::{ShaderIndex, TextureHandle};

/// Drawable terrain surface.
///
/// The world-space size drives scene layout: the camera starts at
/// `size * (0.5, 1.0, 0.5)` and the water quad spans half the size,
/// centred over the valley floor. The displacement and grass parameters
/// feed the ground shader as uniforms each frame.
#[derive(Debug, Clone)]
pub struct HeightMap {
    size: Vec3,
    shader: ShaderIndex,
    terrain_texture: TextureHandle,
    displacement_texture: TextureHandle,
    displacement_factor: f32,
    grass_height: f32,
    blade_width: f32,
    colour_base: Vec4,
    colour_top: Vec4,
}

impl HeightMap {
    /// Create a height map capability from backend handles.
    ///
    /// Displacement and grass parameters start at the valley defaults;
    /// use the `with_*` setters to override them.
    pub fn new(
        size: Vec3,
        shader: ShaderIndex,
        terrain_texture: TextureHandle,
        displacement_texture: TextureHandle,
    ) -> Self {
        Self {
            size,
            shader,
            terrain_texture,
            displacement_texture,
            displacement_factor: 0.1,
            grass_height: 20.0,
            blade_width: 5.0,
            colour_base: Vec4::new(0.0, 0.8, 0.0, 1.0),
            colour_top: Vec4::new(1.0, 1.0, 0.0, 1.0),
        }
    }

    /// Override the displacement strength
    pub fn with_displacement_factor(mut self, factor: f32) -> Self {
        self.displacement_factor = factor;
        self
    }

    /// Override the grass shell height and blade width
    pub fn with_grass_shape(mut self, height: f32, width: f32) -> Self {
        self.grass_height = height;
        self.blade_width = width;
        self
    }

    /// Override the root and tip grass colours
    pub fn with_grass_colours(mut self, base: Vec4, top: Vec4) -> Self {
        self.colour_base = base;
        self.colour_top = top;
        self
    }

    /// World-space size of the terrain
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Shader program for the ground pass
    pub fn shader(&self) -> ShaderIndex {
        self.shader
    }

    /// Diffuse terrain texture
    pub fn terrain_texture(&self) -> TextureHandle {
        self.terrain_texture
    }

    /// Displacement map sampled by the ground shader
    pub fn displacement_texture(&self) -> TextureHandle {
        self.displacement_texture
    }

    /// Scale applied to displacement samples
    pub fn displacement_factor(&self) -> f32 {
        self.displacement_factor
    }

    /// Extruded grass shell height
    pub fn grass_height(&self) -> f32 {
        self.grass_height
    }

    /// Grass blade width
    pub fn blade_width(&self) -> f32 {
        self.blade_width
    }

    /// Grass colour at the root
    pub fn colour_base(&self) -> Vec4 {
        self.colour_base
    }

    /// Grass colour at the tip
    pub fn colour_top(&self) -> Vec4 {
        self.colour_top
    }
}
