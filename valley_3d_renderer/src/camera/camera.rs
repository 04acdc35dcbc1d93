/// Camera - world position and orientation, view matrix on demand.
///
/// The camera computes nothing per frame on its own; the surrounding
/// application drives position/pitch/yaw (input handling is outside the
/// core) and the renderer rebuilds the view matrix and frustum each
/// update.

use glam::{Mat4, Vec3};

/// Pitch/yaw camera over a world position.
///
/// Angles are in degrees. The view matrix is the inverse of the camera's
/// world transform: rotate by -pitch then -yaw, translate by -position.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    pitch: f32,
    yaw: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera at a position with the given orientation
    pub fn new(pitch: f32, yaw: f32, position: Vec3, projection: Mat4) -> Self {
        Self {
            position,
            pitch,
            yaw,
            projection,
        }
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the world position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set pitch in degrees
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Set yaw in degrees
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Projection matrix (perspective for the valley scene)
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Set the projection matrix
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// Build the view matrix from the current position and orientation
    pub fn build_view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x((-self.pitch).to_radians())
            * Mat4::from_rotation_y((-self.yaw).to_radians())
            * Mat4::from_translation(-self.position)
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.build_view_matrix()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
