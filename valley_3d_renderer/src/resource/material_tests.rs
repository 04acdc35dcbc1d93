use crate::device::{ShaderIndex, TextureHandle, CubeMapHandle};
use super::*;

#[test]
fn test_material_shader_index() {
    let material = Material::new(ShaderIndex(4));
    assert_eq!(material.shader(), ShaderIndex(4));
}

#[test]
fn test_missing_texture_falls_back_to_zero_handle() {
    let material = Material::new(ShaderIndex(1));
    assert_eq!(material.diffuse_texture(), TextureHandle::MISSING);
    assert_eq!(material.diffuse_texture().0, 0);
}

#[test]
fn test_material_with_bindings() {
    let material = Material::new(ShaderIndex(2))
        .with_diffuse(TextureHandle(7))
        .with_cube_map(CubeMapHandle(3));

    assert_eq!(material.diffuse_texture(), TextureHandle(7));
    assert_eq!(material.cube_map(), Some(CubeMapHandle(3)));
}
