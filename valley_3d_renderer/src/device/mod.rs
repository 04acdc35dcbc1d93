//! Graphics device module
//!
//! The opaque service boundary of the renderer: render targets, fixed-function
//! state, shader binds, uniforms and draw submission. Backends implement the
//! `GraphicsDevice` trait; the core never issues a graphics-API call directly.

mod graphics_device;
mod height_map;
mod mock_graphics_device;

pub use graphics_device::{
    GraphicsDevice,
    TextureHandle, CubeMapHandle, ShaderIndex,
    TargetId, ClearFlags, StencilState, BlendState,
};
pub use height_map::HeightMap;
pub use mock_graphics_device::{MockGraphicsDevice, DeviceCommand};
