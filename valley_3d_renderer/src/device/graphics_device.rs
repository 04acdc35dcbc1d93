/// GraphicsDevice trait - the opaque rendering backend interface
///
/// The core renderer drives a backend exclusively through this trait:
/// target binds, clears, fixed-function state, shader binds, uniform
/// uploads and draw submission. Shader compilation, texture upload and
/// window handling happen outside the core; the core only sees the
/// opaque handles defined here.

use glam::{Mat4, Vec3, Vec4};
use crate::error::Result;
use crate::resource::Mesh;
use super::height_map::HeightMap;

// ============================================================================
// Opaque handles
// ============================================================================

/// Opaque 2D texture identifier.
///
/// `TextureHandle::MISSING` (0) is the documented fallback binding for a
/// node whose material lacks a texture: the draw proceeds rather than
/// aborting the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Fallback handle bound when a material has no texture
    pub const MISSING: TextureHandle = TextureHandle(0);
}

/// Opaque cube map identifier (environment/skybox sampling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeMapHandle(pub u32);

/// Identifier of a compiled shader program.
///
/// Doubles as the primary draw-order sort key: grouping draws by shader
/// index minimizes program state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderIndex(pub u32);

// ============================================================================
// Fixed-function state
// ============================================================================

/// Identifies a render target bindable by the device.
///
/// The pipeline owns two off-screen colour targets (0 and 1) that share one
/// depth/stencil attachment; `Backbuffer` is the default framebuffer used
/// for the final present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    /// Off-screen colour target (index 0 or 1)
    Offscreen(u8),
    /// Default framebuffer
    Backbuffer,
}

bitflags::bitflags! {
    /// Attachment clear selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Stencil configuration for a pass.
///
/// `WriteRef` marks every rendered pixel with the reference value
/// (ALWAYS test, REPLACE on pass). `EqualRef` restricts rendering to
/// pixels whose stencil value equals the reference (EQUAL test, KEEP).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilState {
    Disabled,
    WriteRef(u8),
    EqualRef(u8),
}

/// Blend configuration for a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendState {
    /// No blending; source overwrites destination
    Opaque,
    /// Standard alpha blending (src_alpha, one_minus_src_alpha)
    Alpha,
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Backend interface the frame pipeline renders through.
///
/// All operations are fallible: a backend failure surfaces as
/// `Error::BackendError`, a rejected shader bind as `Error::ResourceFailure`.
pub trait GraphicsDevice: Send + Sync {
    /// Bind a render target for subsequent draws
    fn bind_target(&mut self, target: TargetId) -> Result<()>;

    /// Clear the selected attachments of the bound target
    fn clear(&mut self, flags: ClearFlags) -> Result<()>;

    /// Set the stencil test/write configuration
    fn set_stencil(&mut self, state: StencilState) -> Result<()>;

    /// Enable or disable depth writes
    fn set_depth_write(&mut self, enabled: bool) -> Result<()>;

    /// Set the blend configuration
    fn set_blend(&mut self, state: BlendState) -> Result<()>;

    /// Bind a shader program
    fn bind_shader(&mut self, shader: ShaderIndex) -> Result<()>;

    /// Upload a matrix uniform to the bound shader
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) -> Result<()>;

    /// Upload a matrix array uniform (joint matrices) to the bound shader
    fn set_uniform_mat4_array(&mut self, name: &str, values: &[Mat4]) -> Result<()>;

    /// Upload a vec3 uniform to the bound shader
    fn set_uniform_vec3(&mut self, name: &str, value: Vec3) -> Result<()>;

    /// Upload a vec4 uniform to the bound shader
    fn set_uniform_vec4(&mut self, name: &str, value: Vec4) -> Result<()>;

    /// Upload a float uniform to the bound shader
    fn set_uniform_f32(&mut self, name: &str, value: f32) -> Result<()>;

    /// Bind a 2D texture to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) -> Result<()>;

    /// Bind a cube map to a texture unit
    fn bind_cube_map(&mut self, unit: u32, cube_map: CubeMapHandle) -> Result<()>;

    /// Bind an off-screen colour target as a sampled texture
    /// (post-process and present inputs)
    fn bind_target_colour(&mut self, unit: u32, target: TargetId) -> Result<()>;

    /// Draw one submesh of a mesh with the bound state
    fn draw_mesh(&mut self, mesh: &Mesh, submesh: usize) -> Result<()>;

    /// Draw the terrain surface with the bound state
    fn draw_height_map(&mut self, height_map: &HeightMap) -> Result<()>;

    /// Copy an off-screen colour target to the default framebuffer
    fn blit_to_default(&mut self, source: TargetId) -> Result<()>;

    /// Present the default framebuffer (swap buffers)
    fn present(&mut self) -> Result<()>;
}
