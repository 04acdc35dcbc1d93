/// Scene transition - blocking flat-colour strobe between scenes.
///
/// The transition runs to completion before the next scene frame: each
/// step binds the backbuffer directly, fills it with a flat colour and
/// presents, so the swap between scene graphs is hidden behind a short
/// black/white flicker rather than a visible pop.

use glam::Vec4;
use std::sync::Arc;

use crate::device::{ClearFlags, GraphicsDevice, ShaderIndex, TargetId};
use crate::error::Result;
use crate::resource::Mesh;

/// One flat-colour step of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStep {
    pub colour: Vec4,
    /// Number of presented frames the colour is held
    pub hold_frames: u32,
}

/// Blocking full-screen colour sequence.
pub struct SceneTransition {
    steps: Vec<TransitionStep>,
    flat_shader: ShaderIndex,
    quad: Arc<Mesh>,
}

impl SceneTransition {
    const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
    const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

    /// The black/white strobe used when swapping scenes: four single-frame
    /// steps alternating black and white.
    pub fn strobe(flat_shader: ShaderIndex, quad: Arc<Mesh>) -> Self {
        let steps = vec![
            TransitionStep { colour: Self::BLACK, hold_frames: 1 },
            TransitionStep { colour: Self::WHITE, hold_frames: 1 },
            TransitionStep { colour: Self::BLACK, hold_frames: 1 },
            TransitionStep { colour: Self::WHITE, hold_frames: 1 },
        ];
        Self { steps, flat_shader, quad }
    }

    /// Total frames the transition presents
    pub fn frame_count(&self) -> u32 {
        self.steps.iter().map(|s| s.hold_frames).sum()
    }

    /// Run the whole sequence, presenting one frame per held step.
    ///
    /// Blocks the caller; no scene state is read or written.
    pub fn run(&self, device: &mut dyn GraphicsDevice) -> Result<()> {
        for step in &self.steps {
            for _ in 0..step.hold_frames {
                device.bind_target(TargetId::Backbuffer)?;
                device.clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;
                device.bind_shader(self.flat_shader)?;
                device.set_uniform_vec4("flatColour", step.colour)?;
                device.draw_mesh(&self.quad, 0)?;
                device.present()?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
