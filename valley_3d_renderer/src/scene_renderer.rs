/// Scene renderer - the crate's top-level facade.
///
/// Owns two scene graphs, the shared camera and frustum, the water
/// animation clock and the frame pipeline, and exposes the four calls a
/// host loop drives: `update_scene`, `render_scene`, `change_scene` and
/// `toggle_post_process`. Only one scene is active at a time; the other
/// keeps its structure and resumes where its animations were reset when
/// it last became active.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec3};

use crate::camera::{Camera, Frustum};
use crate::device::{CubeMapHandle, GraphicsDevice, HeightMap, ShaderIndex, TextureHandle};
use crate::error::{Error, Result};
use crate::pipeline::{FrameInputs, FramePipeline, PipelineShaders, SceneTransition, WaterParams};
use crate::resource::Mesh;
use crate::scene::SceneGraph;
use crate::{engine_debug, engine_info};

/// Which of the two scene graphs is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSlot {
    First,
    Second,
}

impl SceneSlot {
    /// The slot this one swaps with
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Frame-level switches read by the pipeline each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    pub active_scene: SceneSlot,
    pub post_process: bool,
}

/// Backend bindings the renderer needs beyond the height map
#[derive(Debug, Clone, Copy)]
pub struct SceneRendererDesc {
    pub shaders: PipelineShaders,
    /// Flat-colour shader used by the transition strobe
    pub flat_shader: ShaderIndex,
    pub water_texture: TextureHandle,
    pub environment: CubeMapHandle,
    pub projection: Mat4,
}

/// Top-level renderer driving two scenes through the fixed pipeline.
pub struct SceneRenderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    graphs: [SceneGraph; 2],
    config: FrameConfig,
    camera: Camera,
    frustum: Frustum,
    height_map: HeightMap,
    water: WaterParams,
    pipeline: FramePipeline,
    transition: SceneTransition,
}

impl SceneRenderer {
    /// Create a renderer over a device, starting on the first scene.
    ///
    /// The camera spawns above the centre of the terrain, looking back
    /// across the valley.
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        height_map: HeightMap,
        desc: SceneRendererDesc,
    ) -> Self {
        let quad = Arc::new(Mesh::generate_quad());
        let camera = Camera::new(
            -40.0,
            270.0,
            height_map.size() * Vec3::new(0.5, 1.0, 0.5),
            desc.projection,
        );
        let frustum = Frustum::from_matrix(&camera.view_projection_matrix());
        let pipeline = FramePipeline::new(
            Arc::clone(&quad),
            desc.shaders,
            desc.water_texture,
            desc.environment,
        );
        let transition = SceneTransition::strobe(desc.flat_shader, quad);

        Self {
            device,
            graphs: [SceneGraph::new(), SceneGraph::new()],
            config: FrameConfig {
                active_scene: SceneSlot::First,
                post_process: false,
            },
            camera,
            frustum,
            height_map,
            water: WaterParams::new(),
            pipeline,
            transition,
        }
    }

    // ===== SCENE ACCESS =====

    /// The currently rendered slot
    pub fn active_scene(&self) -> SceneSlot {
        self.config.active_scene
    }

    /// Whether the post-process pass runs
    pub fn post_process_enabled(&self) -> bool {
        self.config.post_process
    }

    /// Borrow one scene graph (active or not) for population
    pub fn scene_graph(&self, slot: SceneSlot) -> &SceneGraph {
        &self.graphs[slot.index()]
    }

    /// Mutably borrow one scene graph
    pub fn scene_graph_mut(&mut self, slot: SceneSlot) -> &mut SceneGraph {
        &mut self.graphs[slot.index()]
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    // ===== FRAME API =====

    /// Advance the active scene by `dt` seconds.
    ///
    /// Rebuilds the frustum from the camera, scrolls the water surface
    /// and propagates transforms and animation clocks through the active
    /// graph. The inactive graph does not advance.
    pub fn update_scene(&mut self, dt: f32) {
        self.water.advance(dt);
        self.frustum = Frustum::from_matrix(&self.camera.view_projection_matrix());
        self.graphs[self.config.active_scene.index()].update(dt);
    }

    /// Render one frame of the active scene through the fixed pipeline
    pub fn render_scene(&mut self) -> Result<()> {
        let mut device = self
            .device
            .lock()
            .map_err(|_| Error::BackendError("graphics device mutex poisoned".to_string()))?;

        let graph = &mut self.graphs[self.config.active_scene.index()];
        self.pipeline.render_frame(
            &mut *device,
            FrameInputs {
                graph,
                camera: &self.camera,
                frustum: &self.frustum,
                height_map: &self.height_map,
                water: self.water,
                post_process: self.config.post_process,
            },
        )
    }

    /// Swap the active scene behind a blocking strobe transition.
    ///
    /// Runs the whole strobe to completion, then flips the active slot
    /// exactly once, rewinds the water surface and restarts the incoming
    /// scene's animations from frame zero.
    pub fn change_scene(&mut self) -> Result<()> {
        {
            let mut device = self
                .device
                .lock()
                .map_err(|_| Error::BackendError("graphics device mutex poisoned".to_string()))?;
            self.transition.run(&mut *device)?;
        }

        self.config.active_scene = self.config.active_scene.other();
        self.water.reset();
        self.graphs[self.config.active_scene.index()].reset_animations();

        engine_info!(
            "valley3d::SceneRenderer",
            "Switched active scene to {:?}",
            self.config.active_scene
        );

        Ok(())
    }

    /// Flip the post-process pass on or off, returning the new state
    pub fn toggle_post_process(&mut self) -> bool {
        self.config.post_process = !self.config.post_process;
        engine_debug!(
            "valley3d::SceneRenderer",
            "Post-processing {}",
            if self.config.post_process { "enabled" } else { "disabled" }
        );
        self.config.post_process
    }
}

#[cfg(test)]
#[path = "scene_renderer_tests.rs"]
mod tests;
