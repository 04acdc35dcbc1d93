/// Ping-pong pair of offscreen colour targets.
///
/// The frame is always rendered into `current`; a post-process pass
/// reads `current` while writing `other`, then flips so the finished
/// image is again `current` when it is blitted to the backbuffer.

use crate::device::TargetId;

/// Two offscreen colour targets with a current/other flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSet {
    current: u8,
}

impl TargetSet {
    pub fn new() -> Self {
        Self { current: 0 }
    }

    /// Target the frame is being rendered into
    pub fn current(&self) -> TargetId {
        TargetId::Offscreen(self.current)
    }

    /// The other target of the pair
    pub fn other(&self) -> TargetId {
        TargetId::Offscreen(1 - self.current)
    }

    /// Swap current and other
    pub fn flip(&mut self) {
        self.current = 1 - self.current;
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "render_targets_tests.rs"]
mod tests;
