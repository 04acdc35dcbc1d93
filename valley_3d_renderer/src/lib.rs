/*!
# Valley 3D Renderer

Core scene management and frame sequencing for the Valley3D renderer.

This crate provides the platform-agnostic rendering core: a hierarchical
scene graph with frustum culling and draw-order scheduling, a skeletal
animation sampler, and a fixed multi-pass frame pipeline (terrain, scene,
water, skybox, post-processing). Backends implement the `GraphicsDevice`
trait; a command-recording mock ships in-crate so the whole core runs
headless.

## Architecture

- **SceneRenderer**: top-level facade a host loop drives
- **SceneGraph**: arena-backed node tree with world-transform propagation
- **RenderBuckets**: per-frame visibility and draw-order scheduler
- **FramePipeline**: fixed pass sequencer over a ping-pong target pair
- **GraphicsDevice**: backend trait (state, uniforms, draws, present)

Scenes are swapped behind a blocking strobe transition; only the active
scene advances and renders.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod device;
pub mod resource;
pub mod camera;
pub mod scene;
pub mod pipeline;
mod scene_renderer;

// Main valley3d namespace module
pub mod valley3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Top-level renderer facade
    pub use crate::scene_renderer::{FrameConfig, SceneRenderer, SceneRendererDesc, SceneSlot};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Device sub-module with the backend trait and handle types
    pub mod device {
        pub use crate::device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Camera and culling sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Frame pipeline sub-module
    pub mod pipeline {
        pub use crate::pipeline::*;
    }
}

// Re-export math library at crate root
pub use glam;
