/// Mock GraphicsDevice for unit tests and headless runs (no GPU required)
///
/// Records every call as a typed `DeviceCommand` so tests can assert on
/// pass ordering (stencil before ground, skybox masking, present counts)
/// without depending on a real backend.

use glam::{Mat4, Vec3, Vec4};
use crate::error::{Result, Error};
use crate::resource::Mesh;
use super::graphics_device::{
    GraphicsDevice, TextureHandle, CubeMapHandle, ShaderIndex,
    TargetId, ClearFlags, StencilState, BlendState,
};
use super::height_map::HeightMap;

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    BindTarget(TargetId),
    Clear(ClearFlags),
    SetStencil(StencilState),
    SetDepthWrite(bool),
    SetBlend(BlendState),
    BindShader(ShaderIndex),
    SetUniformMat4 { name: String },
    SetUniformMat4Array { name: String, count: usize, byte_len: usize },
    SetUniformVec3 { name: String, value: Vec3 },
    SetUniformVec4 { name: String, value: Vec4 },
    SetUniformF32 { name: String, value: f32 },
    BindTexture { unit: u32, texture: TextureHandle },
    BindCubeMap { unit: u32, cube_map: CubeMapHandle },
    BindTargetColour { unit: u32, target: TargetId },
    DrawMesh { mesh: String, submesh: usize },
    DrawHeightMap,
    BlitToDefault(TargetId),
    Present,
}

/// Command-recording device.
///
/// `fail_on_shader` injects a `ResourceFailure` on a chosen shader bind,
/// exercising the fatal-at-startup error path.
pub struct MockGraphicsDevice {
    commands: Vec<DeviceCommand>,
    fail_on_shader: Option<ShaderIndex>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fail_on_shader: None,
        }
    }

    /// All commands recorded so far, in call order
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drop all recorded commands
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of present calls recorded
    pub fn present_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::Present))
            .count()
    }

    /// Make the next bind of `shader` fail with `Error::ResourceFailure`
    pub fn fail_on_shader(&mut self, shader: ShaderIndex) {
        self.fail_on_shader = Some(shader);
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn bind_target(&mut self, target: TargetId) -> Result<()> {
        self.commands.push(DeviceCommand::BindTarget(target));
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags) -> Result<()> {
        self.commands.push(DeviceCommand::Clear(flags));
        Ok(())
    }

    fn set_stencil(&mut self, state: StencilState) -> Result<()> {
        self.commands.push(DeviceCommand::SetStencil(state));
        Ok(())
    }

    fn set_depth_write(&mut self, enabled: bool) -> Result<()> {
        self.commands.push(DeviceCommand::SetDepthWrite(enabled));
        Ok(())
    }

    fn set_blend(&mut self, state: BlendState) -> Result<()> {
        self.commands.push(DeviceCommand::SetBlend(state));
        Ok(())
    }

    fn bind_shader(&mut self, shader: ShaderIndex) -> Result<()> {
        if self.fail_on_shader == Some(shader) {
            return Err(Error::ResourceFailure(format!(
                "shader program {} failed to bind",
                shader.0
            )));
        }
        self.commands.push(DeviceCommand::BindShader(shader));
        Ok(())
    }

    fn set_uniform_mat4(&mut self, name: &str, _value: &Mat4) -> Result<()> {
        self.commands.push(DeviceCommand::SetUniformMat4 {
            name: name.to_string(),
        });
        Ok(())
    }

    fn set_uniform_mat4_array(&mut self, name: &str, values: &[Mat4]) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(values);
        self.commands.push(DeviceCommand::SetUniformMat4Array {
            name: name.to_string(),
            count: values.len(),
            byte_len: bytes.len(),
        });
        Ok(())
    }

    fn set_uniform_vec3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.commands.push(DeviceCommand::SetUniformVec3 {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn set_uniform_vec4(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.commands.push(DeviceCommand::SetUniformVec4 {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn set_uniform_f32(&mut self, name: &str, value: f32) -> Result<()> {
        self.commands.push(DeviceCommand::SetUniformF32 {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) -> Result<()> {
        self.commands.push(DeviceCommand::BindTexture { unit, texture });
        Ok(())
    }

    fn bind_cube_map(&mut self, unit: u32, cube_map: CubeMapHandle) -> Result<()> {
        self.commands.push(DeviceCommand::BindCubeMap { unit, cube_map });
        Ok(())
    }

    fn bind_target_colour(&mut self, unit: u32, target: TargetId) -> Result<()> {
        self.commands.push(DeviceCommand::BindTargetColour { unit, target });
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &Mesh, submesh: usize) -> Result<()> {
        self.commands.push(DeviceCommand::DrawMesh {
            mesh: mesh.name().to_string(),
            submesh,
        });
        Ok(())
    }

    fn draw_height_map(&mut self, _height_map: &HeightMap) -> Result<()> {
        self.commands.push(DeviceCommand::DrawHeightMap);
        Ok(())
    }

    fn blit_to_default(&mut self, source: TargetId) -> Result<()> {
        self.commands.push(DeviceCommand::BlitToDefault(source));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.commands.push(DeviceCommand::Present);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
