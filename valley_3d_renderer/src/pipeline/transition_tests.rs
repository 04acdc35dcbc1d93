use glam::Vec4;
use std::sync::Arc;
use super::*;
use crate::device::{DeviceCommand, MockGraphicsDevice, ShaderIndex, TargetId};
use crate::resource::Mesh;

fn strobe() -> SceneTransition {
    SceneTransition::strobe(ShaderIndex(9), Arc::new(Mesh::generate_quad()))
}

#[test]
fn test_strobe_presents_four_frames() {
    let transition = strobe();
    let mut device = MockGraphicsDevice::new();

    transition.run(&mut device).unwrap();

    assert_eq!(transition.frame_count(), 4);
    assert_eq!(device.present_count(), 4);
}

#[test]
fn test_strobe_alternates_black_and_white() {
    let transition = strobe();
    let mut device = MockGraphicsDevice::new();
    transition.run(&mut device).unwrap();

    let colours: Vec<Vec4> = device
        .commands()
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::SetUniformVec4 { name, value } if name == "flatColour" => Some(*value),
            _ => None,
        })
        .collect();

    let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
    let white = Vec4::ONE;
    assert_eq!(colours, vec![black, white, black, white]);
}

#[test]
fn test_strobe_draws_to_backbuffer() {
    let transition = strobe();
    let mut device = MockGraphicsDevice::new();
    transition.run(&mut device).unwrap();

    let binds: Vec<_> = device
        .commands()
        .iter()
        .filter(|c| matches!(c, DeviceCommand::BindTarget(_)))
        .collect();

    assert_eq!(binds.len(), 4);
    assert!(binds
        .iter()
        .all(|c| matches!(c, DeviceCommand::BindTarget(TargetId::Backbuffer))));
}

#[test]
fn test_each_frame_draws_then_presents() {
    let transition = strobe();
    let mut device = MockGraphicsDevice::new();
    transition.run(&mut device).unwrap();

    // Within every frame the quad draw precedes the present
    let mut last_draw: Option<usize> = None;
    for (i, command) in device.commands().iter().enumerate() {
        match command {
            DeviceCommand::DrawMesh { .. } => last_draw = Some(i),
            DeviceCommand::Present => {
                assert!(last_draw.is_some_and(|d| d < i));
                last_draw = None;
            }
            _ => {}
        }
    }
}

#[test]
fn test_shader_bind_failure_aborts_transition() {
    let transition = strobe();
    let mut device = MockGraphicsDevice::new();
    device.fail_on_shader(ShaderIndex(9));

    assert!(transition.run(&mut device).is_err());
    assert_eq!(device.present_count(), 0);
}
