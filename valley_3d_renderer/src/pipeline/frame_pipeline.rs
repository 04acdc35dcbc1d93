/// Frame pipeline - fixed multi-pass sequencer for one rendered frame.
///
/// Every frame runs the same pass order against the active scene:
///
/// 1. bind the current offscreen target and clear colour/depth/stencil
/// 2. ground pass under an ALWAYS/REPLACE stencil write
/// 3. scene buckets: build, sort, draw opaque then transparent, clear
/// 4. water quad, alpha-blended, scrolling its texture matrix
/// 5. skybox, masked to stencil 0 with depth writes off
/// 6. optional post-process ping-pong between the two offscreen targets
/// 7. blit the finished target to the backbuffer and present
///
/// The stencil write stays active from the ground pass through the scene
/// and water draws, so every rendered pixel carries the reference value.
/// The skybox runs last under the EQUAL-0 mask: it can only shade pixels
/// nothing else touched, so it never overdraws the terrain, scene or
/// water footprint.

use glam::{Mat4, Vec3};

use crate::camera::{Camera, Frustum};
use crate::device::{
    BlendState, ClearFlags, CubeMapHandle, GraphicsDevice, HeightMap, ShaderIndex, StencilState,
    TextureHandle,
};
use crate::error::Result;
use crate::resource::Mesh;
use crate::scene::{joint_matrices, DrawKind, RenderBuckets, SceneGraph, SceneNodeKey};
use std::sync::Arc;
use super::render_targets::TargetSet;

/// Stencil reference written by the ground pass. The skybox draws only
/// where the stencil is still zero.
const STENCIL_TERRAIN_REF: u8 = 2;

/// Vertical drop of the water plane below the terrain midpoint
const WATER_LEVEL_DROP: f32 = 2.4 * 255.0;

/// Shader programs the fixed passes bind directly
#[derive(Debug, Clone, Copy)]
pub struct PipelineShaders {
    pub skybox: ShaderIndex,
    pub water: ShaderIndex,
    pub post_process: ShaderIndex,
}

/// Water surface animation state, advanced by the scene update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterParams {
    /// Texture rotation in degrees
    pub rotate: f32,
    /// Texture scroll offset
    pub cycle: f32,
}

impl WaterParams {
    pub fn new() -> Self {
        Self { rotate: 0.0, cycle: 0.0 }
    }

    /// Advance the surface animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.rotate += dt;
        self.cycle += dt * 0.05;
    }

    /// Rewind the surface animation (scene transitions)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for WaterParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one frame reads from the active scene
pub struct FrameInputs<'a> {
    pub graph: &'a mut SceneGraph,
    pub camera: &'a Camera,
    pub frustum: &'a Frustum,
    pub height_map: &'a HeightMap,
    pub water: WaterParams,
    pub post_process: bool,
}

/// The fixed pass sequencer. Owns the offscreen target pair, the scene
/// buckets, and the shared quad the water/skybox/post-process passes draw.
pub struct FramePipeline {
    quad: Arc<Mesh>,
    shaders: PipelineShaders,
    water_texture: TextureHandle,
    environment: CubeMapHandle,
    targets: TargetSet,
    buckets: RenderBuckets,
}

impl FramePipeline {
    pub fn new(
        quad: Arc<Mesh>,
        shaders: PipelineShaders,
        water_texture: TextureHandle,
        environment: CubeMapHandle,
    ) -> Self {
        Self {
            quad,
            shaders,
            water_texture,
            environment,
            targets: TargetSet::new(),
            buckets: RenderBuckets::new(),
        }
    }

    /// Offscreen target the next frame renders into
    pub fn current_target(&self) -> crate::device::TargetId {
        self.targets.current()
    }

    /// Render one frame of the active scene.
    ///
    /// Pass order is fixed; see the module docs. The bucket lists are
    /// cleared before returning, so keys never leak across frames.
    pub fn render_frame(
        &mut self,
        device: &mut dyn GraphicsDevice,
        inputs: FrameInputs<'_>,
    ) -> Result<()> {
        let view_proj = inputs.camera.view_projection_matrix();
        let camera_position = inputs.camera.position();

        device.bind_target(self.targets.current())?;
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL)?;

        // Every pass up to the skybox marks its pixels with the reference
        // value; the skybox mask depends on it
        device.set_stencil(StencilState::WriteRef(STENCIL_TERRAIN_REF))?;
        self.draw_ground(device, inputs.height_map, &view_proj, camera_position)?;

        self.buckets
            .build_node_lists(inputs.graph, inputs.frustum, camera_position);
        self.buckets.sort_node_lists(inputs.graph);
        let draw_result =
            self.draw_nodes(device, inputs.graph, &view_proj, camera_position);
        self.buckets.clear_node_lists();
        draw_result?;

        self.draw_water(device, inputs.height_map, inputs.water, &view_proj, camera_position)?;
        self.draw_skybox(device, &view_proj)?;

        if inputs.post_process {
            self.post_process_pass(device)?;
        }

        device.blit_to_default(self.targets.current())?;
        device.present()?;

        Ok(())
    }

    // ===== FIXED PASSES =====

    /// Ground pass: terrain with displacement and grass shell parameters.
    ///
    /// Runs under the frame's stencil write; the stencil state is left
    /// untouched so the scene and water draws keep marking pixels.
    fn draw_ground(
        &self,
        device: &mut dyn GraphicsDevice,
        height_map: &HeightMap,
        view_proj: &Mat4,
        camera_position: Vec3,
    ) -> Result<()> {
        device.bind_shader(height_map.shader())?;
        device.set_uniform_mat4("viewProjMatrix", view_proj)?;
        device.set_uniform_vec3("cameraPos", camera_position)?;
        device.bind_texture(0, height_map.terrain_texture())?;
        device.bind_texture(1, height_map.displacement_texture())?;
        device.set_uniform_f32("dispFactor", height_map.displacement_factor())?;
        device.set_uniform_f32("grassHeight", height_map.grass_height())?;
        device.set_uniform_f32("bladeWidth", height_map.blade_width())?;
        device.set_uniform_vec4("colourBase", height_map.colour_base())?;
        device.set_uniform_vec4("colourTop", height_map.colour_top())?;
        device.draw_height_map(height_map)?;

        Ok(())
    }

    /// Draw both bucket lists, transparent after opaque under alpha blending
    fn draw_nodes(
        &self,
        device: &mut dyn GraphicsDevice,
        graph: &SceneGraph,
        view_proj: &Mat4,
        camera_position: Vec3,
    ) -> Result<()> {
        for &key in self.buckets.opaque() {
            self.draw_node(device, graph, key, view_proj, camera_position)?;
        }

        if !self.buckets.transparent().is_empty() {
            device.set_blend(BlendState::Alpha)?;
            for &key in self.buckets.transparent() {
                self.draw_node(device, graph, key, view_proj, camera_position)?;
            }
            device.set_blend(BlendState::Opaque)?;
        }

        Ok(())
    }

    /// Draw one node, dispatching on its draw kind.
    ///
    /// Nodes without a mesh or material were still filed by the scheduler;
    /// they are skipped here.
    fn draw_node(
        &self,
        device: &mut dyn GraphicsDevice,
        graph: &SceneGraph,
        key: SceneNodeKey,
        view_proj: &Mat4,
        camera_position: Vec3,
    ) -> Result<()> {
        let Some(node) = graph.node(key) else {
            return Ok(());
        };
        let (Some(mesh), Some(material)) = (node.mesh(), node.material()) else {
            return Ok(());
        };

        let model = *node.world_transform() * Mat4::from_scale(node.model_scale());

        device.bind_shader(material.shader())?;
        device.set_uniform_mat4("viewProjMatrix", view_proj)?;
        device.set_uniform_mat4("modelMatrix", &model)?;
        device.set_uniform_vec4("nodeColour", node.colour())?;
        device.bind_texture(0, material.diffuse_texture())?;

        match node.draw_kind() {
            DrawKind::Static => {}
            DrawKind::Skinned => {
                if let (Some(clip), Some(skeleton)) = (node.animation(), mesh.skeleton()) {
                    let palette = joint_matrices(clip, node.animation_state(), skeleton);
                    device.set_uniform_mat4_array("jointMatrices", &palette)?;
                }
            }
            DrawKind::Reflective => {
                let cube_map = material.cube_map().unwrap_or(self.environment);
                device.bind_cube_map(2, cube_map)?;
                device.set_uniform_vec3("cameraPos", camera_position)?;
            }
        }

        for submesh in 0..mesh.sub_mesh_count() {
            device.draw_mesh(mesh, submesh)?;
        }

        Ok(())
    }

    /// Water pass: one alpha-blended quad spanning the valley, its texture
    /// matrix scrolling and rotating with the surface animation.
    fn draw_water(
        &self,
        device: &mut dyn GraphicsDevice,
        height_map: &HeightMap,
        water: WaterParams,
        view_proj: &Mat4,
        camera_position: Vec3,
    ) -> Result<()> {
        let size = height_map.size();
        let centre = (size - Vec3::new(0.0, WATER_LEVEL_DROP, 0.0)) * 0.5;
        let model = Mat4::from_translation(centre)
            * Mat4::from_scale(size * 0.5)
            * Mat4::from_axis_angle(Vec3::new(-1.0, 0.0, 0.0), 90.0_f32.to_radians());
        let texture_matrix = Mat4::from_translation(Vec3::new(water.cycle, 0.0, water.cycle))
            * Mat4::from_scale(Vec3::splat(10.0))
            * Mat4::from_rotation_z(water.rotate.to_radians());

        device.set_blend(BlendState::Alpha)?;
        device.bind_shader(self.shaders.water)?;
        device.set_uniform_mat4("viewProjMatrix", view_proj)?;
        device.set_uniform_mat4("modelMatrix", &model)?;
        device.set_uniform_mat4("textureMatrix", &texture_matrix)?;
        device.set_uniform_vec3("cameraPos", camera_position)?;
        device.bind_texture(0, self.water_texture)?;
        device.bind_cube_map(2, self.environment)?;
        device.draw_mesh(&self.quad, 0)?;
        device.set_blend(BlendState::Opaque)?;

        Ok(())
    }

    /// Skybox pass: a fullscreen quad masked to untouched pixels.
    ///
    /// Depth writes stay off so the box never occludes anything drawn in
    /// later frames' passes; the stencil EQUAL-0 test keeps it out of the
    /// terrain and scene footprint entirely.
    fn draw_skybox(&self, device: &mut dyn GraphicsDevice, view_proj: &Mat4) -> Result<()> {
        device.set_depth_write(false)?;
        device.set_stencil(StencilState::EqualRef(0))?;
        device.bind_shader(self.shaders.skybox)?;
        device.set_uniform_mat4("viewProjMatrix", view_proj)?;
        device.bind_cube_map(2, self.environment)?;
        device.draw_mesh(&self.quad, 0)?;
        device.set_stencil(StencilState::Disabled)?;
        device.set_depth_write(true)?;

        Ok(())
    }

    /// Post-process pass: read the current target, write the other, flip.
    ///
    /// After the flip the processed image is again `current`, so the final
    /// blit needs no special case.
    fn post_process_pass(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        device.bind_target(self.targets.other())?;
        device.clear(ClearFlags::COLOR)?;
        device.set_depth_write(false)?;
        device.bind_shader(self.shaders.post_process)?;
        device.bind_target_colour(0, self.targets.current())?;
        device.draw_mesh(&self.quad, 0)?;
        device.set_depth_write(true)?;
        self.targets.flip();

        Ok(())
    }
}

#[cfg(test)]
#[path = "frame_pipeline_tests.rs"]
mod tests;
