/// Skeletal animation sampling.
///
/// An `AnimationClip` is an immutable bank of pre-baked joint transforms,
/// stored frame-major. Each animated node carries its own `AnimationState`
/// clock, so several nodes can share one clip while playing at different
/// phases. Sampling snaps to the current frame; no inter-frame blending.

use glam::Mat4;

use crate::error::Result;
use crate::engine_bail;
use crate::resource::Skeleton;

/// Immutable bank of joint transforms, `frame_count` frames of
/// `joint_count` matrices each.
pub struct AnimationClip {
    joint_count: usize,
    frame_count: usize,
    frame_rate: f32,
    /// Frame-major: `frames[frame * joint_count + joint]`
    frames: Vec<Mat4>,
}

impl AnimationClip {
    /// Create a clip, validating shape and rate.
    pub fn new(
        joint_count: usize,
        frame_count: usize,
        frame_rate: f32,
        frames: Vec<Mat4>,
    ) -> Result<Self> {
        if joint_count == 0 || frame_count == 0 {
            engine_bail!("valley3d::AnimationClip", "Clip must have at least one joint and one frame");
        }
        if frame_rate <= 0.0 {
            engine_bail!("valley3d::AnimationClip", "Clip frame rate must be positive, got {}", frame_rate);
        }
        if frames.len() != joint_count * frame_count {
            engine_bail!(
                "valley3d::AnimationClip",
                "Clip data length {} does not match {} frames x {} joints",
                frames.len(),
                frame_count,
                joint_count
            );
        }

        Ok(Self {
            joint_count,
            frame_count,
            frame_rate,
            frames,
        })
    }

    /// Joints per frame
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// Number of key frames
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Playback rate in frames per second
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// Seconds each frame is held
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Transform of one joint at one frame.
    ///
    /// Out-of-range indices return None rather than wrapping.
    pub fn joint_transform(&self, frame: usize, joint: usize) -> Option<&Mat4> {
        if frame >= self.frame_count || joint >= self.joint_count {
            return None;
        }
        self.frames.get(frame * self.joint_count + joint)
    }
}

/// Per-node playback clock for an `AnimationClip`.
///
/// The clock counts down the remaining hold time of the current frame;
/// a large `dt` can step several frames in one advance, wrapping at the
/// end of the clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    current_frame: usize,
    frame_time: f32,
}

impl AnimationState {
    /// Start at frame zero with no accumulated time
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            frame_time: 0.0,
        }
    }

    /// Frame the sampler snaps to
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Remaining hold time of the current frame, in seconds
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    /// Advance the clock by `dt` seconds against `clip`.
    ///
    /// `dt = 0` never changes the frame. A `dt` longer than one frame
    /// steps multiple frames; crossing the last frame wraps to zero.
    pub fn advance(&mut self, dt: f32, clip: &AnimationClip) {
        self.frame_time -= dt;
        while self.frame_time < 0.0 {
            self.current_frame = (self.current_frame + 1) % clip.frame_count();
            self.frame_time += clip.frame_duration();
        }
    }

    /// Rewind to frame zero
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.frame_time = 0.0;
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample the skinning palette for the clock's current frame.
///
/// Each entry is `frame_transform * inverse_bind_pose`, mapping bind-pose
/// model space into the posed joint's space. The palette length is the
/// smaller of the clip's and skeleton's joint counts, so a clip baked for
/// a different rig never indexes out of range.
pub fn joint_matrices(
    clip: &AnimationClip,
    state: &AnimationState,
    skeleton: &Skeleton,
) -> Vec<Mat4> {
    let joints = clip.joint_count().min(skeleton.joint_count());
    let frame = state.current_frame();

    let mut palette = Vec::with_capacity(joints);
    for joint in 0..joints {
        let frame_transform = clip
            .joint_transform(frame, joint)
            .copied()
            .unwrap_or(Mat4::IDENTITY);
        let inverse_bind = skeleton
            .inverse_bind_pose(joint)
            .copied()
            .unwrap_or(Mat4::IDENTITY);
        palette.push(frame_transform * inverse_bind);
    }

    palette
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
