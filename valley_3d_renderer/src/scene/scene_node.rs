/// Scene node - one entity of the hierarchical scene graph.
///
/// A node owns its spatial state (local/world transform, model scale,
/// bounding sphere) and render attributes (colour, mesh, material,
/// animation). Mesh and material are reference-shared across nodes;
/// the parent→child edges are exclusive ownership and live in the
/// SceneGraph arena.

use std::sync::Arc;
use glam::{Mat4, Vec3, Vec4};
use crate::device::ShaderIndex;
use crate::resource::{Mesh, Material};
use super::animation::{AnimationClip, AnimationState};
use super::scene_graph::SceneNodeKey;

/// How the pass sequencer draws a node.
///
/// A tagged variant instead of branching on shader identity: the draw
/// routine dispatches to one of three pure paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Textured static mesh
    Static,
    /// Skinned mesh consuming sampled joint matrices
    Skinned,
    /// Mesh sampling the environment cube map
    Reflective,
}

/// A tree entity of the scene graph.
///
/// Invariants maintained by `SceneGraph::update`:
/// - `world_transform = parent.world_transform * local_transform`
/// - a node with `colour.w < 1.0` is always classified transparent
/// - `bounding_radius` bounds the mesh in local space scaled by
///   `model_scale`
pub struct SceneNode {
    local_transform: Mat4,
    model_scale: Vec3,
    world_transform: Mat4,
    colour: Vec4,
    bounding_radius: f32,
    /// Squared distance to the camera, written by the scheduler each frame
    camera_distance_sq: f32,
    draw_kind: DrawKind,
    mesh: Option<Arc<Mesh>>,
    material: Option<Arc<Material>>,
    animation: Option<Arc<AnimationClip>>,
    animation_state: AnimationState,
    pub(super) parent: Option<SceneNodeKey>,
    pub(super) children: Vec<SceneNodeKey>,
}

impl SceneNode {
    /// Create an empty node (no mesh, opaque white, unit bounding radius)
    pub fn new() -> Self {
        Self {
            local_transform: Mat4::IDENTITY,
            model_scale: Vec3::ONE,
            world_transform: Mat4::IDENTITY,
            colour: Vec4::ONE,
            bounding_radius: 1.0,
            camera_distance_sq: 0.0,
            draw_kind: DrawKind::Static,
            mesh: None,
            material: None,
            animation: None,
            animation_state: AnimationState::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    // ===== BUILDER SETTERS =====

    /// Set the local transform
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.local_transform = transform;
        self
    }

    /// Set the model scale
    pub fn with_model_scale(mut self, scale: Vec3) -> Self {
        self.model_scale = scale;
        self
    }

    /// Set the RGBA colour (alpha < 1.0 classifies the node transparent)
    pub fn with_colour(mut self, colour: Vec4) -> Self {
        self.colour = colour;
        self
    }

    /// Set the bounding sphere radius
    pub fn with_bounding_radius(mut self, radius: f32) -> Self {
        self.bounding_radius = radius;
        self
    }

    /// Attach a shared mesh
    pub fn with_mesh(mut self, mesh: Arc<Mesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Attach a shared material
    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Attach an animation clip (and mark the node skinned)
    pub fn with_animation(mut self, clip: Arc<AnimationClip>) -> Self {
        self.animation = Some(clip);
        self.draw_kind = DrawKind::Skinned;
        self
    }

    /// Set the draw dispatch variant
    pub fn with_draw_kind(mut self, kind: DrawKind) -> Self {
        self.draw_kind = kind;
        self
    }

    // ===== ACCESSORS =====

    /// Local transform
    pub fn local_transform(&self) -> &Mat4 {
        &self.local_transform
    }

    /// Replace the local transform
    pub fn set_local_transform(&mut self, transform: Mat4) {
        self.local_transform = transform;
    }

    /// Cached world transform (valid after the last `SceneGraph::update`)
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    pub(super) fn set_world_transform(&mut self, world: Mat4) {
        self.world_transform = world;
    }

    /// World-space position (translation of the world transform)
    pub fn world_position(&self) -> Vec3 {
        self.world_transform.col(3).truncate()
    }

    /// Model scale applied at draw time
    pub fn model_scale(&self) -> Vec3 {
        self.model_scale
    }

    /// RGBA colour
    pub fn colour(&self) -> Vec4 {
        self.colour
    }

    /// Set the RGBA colour
    pub fn set_colour(&mut self, colour: Vec4) {
        self.colour = colour;
    }

    /// A node with alpha < 1.0 is always classified transparent
    pub fn is_transparent(&self) -> bool {
        self.colour.w < 1.0
    }

    /// Bounding sphere radius
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Squared camera distance written by the last bucket build
    pub fn camera_distance_sq(&self) -> f32 {
        self.camera_distance_sq
    }

    pub(super) fn set_camera_distance_sq(&mut self, distance_sq: f32) {
        self.camera_distance_sq = distance_sq;
    }

    /// Draw dispatch variant
    pub fn draw_kind(&self) -> DrawKind {
        self.draw_kind
    }

    /// Shared mesh, if any
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    /// Shared material, if any
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    /// Shader index used as the primary draw-order sort key.
    ///
    /// Nodes without a material sort under index 0 (they are skipped at
    /// draw time anyway).
    pub fn shader_index(&self) -> ShaderIndex {
        self.material
            .as_ref()
            .map(|m| m.shader())
            .unwrap_or(ShaderIndex(0))
    }

    /// Animation clip, if the node is animated
    pub fn animation(&self) -> Option<&Arc<AnimationClip>> {
        self.animation.as_ref()
    }

    /// Animation clock state
    pub fn animation_state(&self) -> &AnimationState {
        &self.animation_state
    }

    pub(super) fn animation_state_mut(&mut self) -> &mut AnimationState {
        &mut self.animation_state
    }

    /// Child node keys
    pub fn children(&self) -> &[SceneNodeKey] {
        &self.children
    }

    /// Parent node key (None for the root)
    pub fn parent(&self) -> Option<SceneNodeKey> {
        self.parent
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}
