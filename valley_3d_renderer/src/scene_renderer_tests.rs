use glam::{Mat4, Vec3};
use std::sync::{Arc, Mutex};
use super::*;
use crate::device::{
    CubeMapHandle, DeviceCommand, HeightMap, MockGraphicsDevice, ShaderIndex, TargetId,
    TextureHandle,
};
use crate::pipeline::PipelineShaders;
use crate::scene::{AnimationClip, SceneNode};

fn renderer() -> (SceneRenderer, Arc<Mutex<MockGraphicsDevice>>) {
    let device = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let height_map = HeightMap::new(
        Vec3::new(4080.0, 1020.0, 4080.0),
        ShaderIndex(1),
        TextureHandle(1),
        TextureHandle(2),
    );
    let desc = SceneRendererDesc {
        shaders: PipelineShaders {
            skybox: ShaderIndex(2),
            water: ShaderIndex(3),
            post_process: ShaderIndex(4),
        },
        flat_shader: ShaderIndex(5),
        water_texture: TextureHandle(7),
        environment: CubeMapHandle(8),
        projection: Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 1.0, 15000.0),
    };

    let renderer = SceneRenderer::new(device.clone(), height_map, desc);
    (renderer, device)
}

fn animated_node() -> SceneNode {
    let clip = AnimationClip::new(1, 4, 10.0, vec![Mat4::IDENTITY; 4]).unwrap();
    SceneNode::new().with_animation(Arc::new(clip))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_starts_on_first_scene_without_post_process() {
    let (renderer, _) = renderer();

    assert_eq!(renderer.active_scene(), SceneSlot::First);
    assert!(!renderer.post_process_enabled());
}

#[test]
fn test_camera_spawns_over_terrain_centre() {
    let (renderer, _) = renderer();

    let position = renderer.camera().position();
    assert_eq!(position, Vec3::new(2040.0, 1020.0, 2040.0));
}

// ============================================================================
// update_scene
// ============================================================================

#[test]
fn test_update_advances_only_active_scene() {
    let (mut renderer, _) = renderer();
    let first_root = renderer.scene_graph(SceneSlot::First).root();
    let second_root = renderer.scene_graph(SceneSlot::Second).root();
    let active = renderer
        .scene_graph_mut(SceneSlot::First)
        .add_child(first_root, animated_node())
        .unwrap();
    let inactive = renderer
        .scene_graph_mut(SceneSlot::Second)
        .add_child(second_root, animated_node())
        .unwrap();

    renderer.update_scene(0.05);

    let first = renderer.scene_graph(SceneSlot::First);
    let second = renderer.scene_graph(SceneSlot::Second);
    assert_eq!(first.node(active).unwrap().animation_state().current_frame(), 1);
    assert_eq!(second.node(inactive).unwrap().animation_state().current_frame(), 0);
}

// ============================================================================
// render_scene
// ============================================================================

#[test]
fn test_render_scene_presents_one_frame() {
    let (mut renderer, device) = renderer();
    renderer.update_scene(0.016);

    renderer.render_scene().unwrap();

    let device = device.lock().unwrap();
    assert_eq!(device.present_count(), 1);
    assert_eq!(
        device.commands()[0],
        DeviceCommand::BindTarget(TargetId::Offscreen(0))
    );
}

#[test]
fn test_toggle_enables_post_process_pass() {
    let (mut renderer, device) = renderer();
    renderer.update_scene(0.016);

    assert!(renderer.toggle_post_process());
    renderer.render_scene().unwrap();

    assert!(device
        .lock()
        .unwrap()
        .commands()
        .iter()
        .any(|c| matches!(c, DeviceCommand::BindTargetColour { .. })));

    assert!(!renderer.toggle_post_process());
}

// ============================================================================
// change_scene
// ============================================================================

#[test]
fn test_change_scene_flips_active_slot_once() {
    let (mut renderer, device) = renderer();

    renderer.change_scene().unwrap();
    assert_eq!(renderer.active_scene(), SceneSlot::Second);
    assert_eq!(device.lock().unwrap().present_count(), 4);

    renderer.change_scene().unwrap();
    assert_eq!(renderer.active_scene(), SceneSlot::First);
}

#[test]
fn test_change_scene_strobes_before_swapping() {
    let (mut renderer, device) = renderer();
    renderer.change_scene().unwrap();

    let device = device.lock().unwrap();
    let strobe_binds = device
        .commands()
        .iter()
        .filter(|c| matches!(c, DeviceCommand::BindTarget(TargetId::Backbuffer)))
        .count();
    assert_eq!(strobe_binds, 4);
}

#[test]
fn test_change_scene_restarts_incoming_animations() {
    let (mut renderer, _) = renderer();
    let first_root = renderer.scene_graph(SceneSlot::First).root();
    let animated = renderer
        .scene_graph_mut(SceneSlot::First)
        .add_child(first_root, animated_node())
        .unwrap();
    renderer.update_scene(0.05);

    // Away from the first scene and back again: its clocks restart
    renderer.change_scene().unwrap();
    renderer.change_scene().unwrap();

    let first = renderer.scene_graph(SceneSlot::First);
    assert_eq!(first.node(animated).unwrap().animation_state().current_frame(), 0);
}

// ============================================================================
// SceneSlot
// ============================================================================

#[test]
fn test_scene_slot_other_swaps() {
    assert_eq!(SceneSlot::First.other(), SceneSlot::Second);
    assert_eq!(SceneSlot::Second.other(), SceneSlot::First);
}
