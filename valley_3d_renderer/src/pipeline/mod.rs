//! Frame pipeline module
//!
//! Fixed multi-pass frame sequencing: offscreen target management,
//! the per-frame pass order (ground, scene buckets, water, skybox,
//! post-process, present), and the blocking scene-transition strobe.

mod render_targets;
mod frame_pipeline;
mod transition;

pub use render_targets::TargetSet;
pub use frame_pipeline::{FramePipeline, FrameInputs, PipelineShaders, WaterParams};
pub use transition::{SceneTransition, TransitionStep};
