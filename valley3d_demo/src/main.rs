//! Valley3D demo - drives the renderer headless over the mock device.
//!
//! Builds two seasonal variants of the valley scene, runs a few frames of
//! each, swaps between them behind the strobe transition and toggles the
//! post-process pass, logging what the host loop does along the way.

use std::sync::Arc;

use valley_3d_renderer::glam::{Mat4, Vec3, Vec4};
use valley_3d_renderer::valley3d::device::{
    CubeMapHandle, HeightMap, MockGraphicsDevice, ShaderIndex, TextureHandle,
};
use valley_3d_renderer::valley3d::pipeline::PipelineShaders;
use valley_3d_renderer::valley3d::resource::{Material, Mesh, ResourceManager, Skeleton, SubMesh};
use valley_3d_renderer::valley3d::scene::{AnimationClip, DrawKind, SceneNode};
use valley_3d_renderer::valley3d::{
    Engine, Result, SceneRenderer, SceneRendererDesc, SceneSlot,
};
use valley_3d_renderer::engine_info;

// Shader program slots as the backend would hand them out
const GROUND_SHADER: ShaderIndex = ShaderIndex(1);
const SKYBOX_SHADER: ShaderIndex = ShaderIndex(2);
const WATER_SHADER: ShaderIndex = ShaderIndex(3);
const POST_SHADER: ShaderIndex = ShaderIndex(4);
const FLAT_SHADER: ShaderIndex = ShaderIndex(5);
const SCENE_SHADER: ShaderIndex = ShaderIndex(6);
const SKIN_SHADER: ShaderIndex = ShaderIndex(7);

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    Engine::initialize()?;
    Engine::create_graphics_device(MockGraphicsDevice::new())?;
    let device = Engine::graphics_device()?;

    let height_map = HeightMap::new(
        Vec3::new(4080.0, 1020.0, 4080.0),
        GROUND_SHADER,
        TextureHandle(1),
        TextureHandle(2),
    );
    let desc = SceneRendererDesc {
        shaders: PipelineShaders {
            skybox: SKYBOX_SHADER,
            water: WATER_SHADER,
            post_process: POST_SHADER,
        },
        flat_shader: FLAT_SHADER,
        water_texture: TextureHandle(3),
        environment: CubeMapHandle(1),
        projection: Mat4::perspective_rh(
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            1.0,
            15000.0,
        ),
    };

    let mut renderer = SceneRenderer::new(device, height_map, desc);
    let resources = load_resources()?;
    populate_scene(&mut renderer, &resources, SceneSlot::First, Vec4::ONE)?;
    populate_scene(
        &mut renderer,
        &resources,
        SceneSlot::Second,
        Vec4::new(0.7, 0.8, 1.0, 1.0),
    )?;

    engine_info!("demo", "Rendering the first scene");
    run_frames(&mut renderer, 120)?;

    engine_info!("demo", "Enabling post-processing");
    renderer.toggle_post_process();
    run_frames(&mut renderer, 60)?;

    engine_info!("demo", "Switching scenes");
    renderer.change_scene()?;
    run_frames(&mut renderer, 120)?;

    engine_info!("demo", "Done, shutting down");
    Engine::shutdown();

    Ok(())
}

fn run_frames(renderer: &mut SceneRenderer, count: usize) -> Result<()> {
    for _ in 0..count {
        renderer.update_scene(FRAME_DT);
        renderer.render_scene()?;
    }
    Ok(())
}

/// Register every mesh and material the demo scenes share.
///
/// Resource failures here are fatal: better to abort at startup than to
/// render a broken frame.
fn load_resources() -> Result<ResourceManager> {
    let mut resources = ResourceManager::new();

    resources.register_mesh(
        "tree",
        Mesh::new(
            "tree",
            vec![
                SubMesh { index_start: 0, index_count: 512 },
                SubMesh { index_start: 512, index_count: 1024 },
            ],
        )?,
    )?;
    resources.register_mesh(
        "walker",
        Mesh::with_skeleton(
            "walker",
            vec![SubMesh { index_start: 0, index_count: 2048 }],
            Skeleton::new(vec![Mat4::IDENTITY; 20])?,
        )?,
    )?;
    resources.register_mesh(
        "orb",
        Mesh::new("orb", vec![SubMesh { index_start: 0, index_count: 960 }])?,
    )?;

    resources.register_material(
        "foliage",
        Material::new(SCENE_SHADER).with_diffuse(TextureHandle(4)),
    )?;
    resources.register_material(
        "walker_skin",
        Material::new(SKIN_SHADER).with_diffuse(TextureHandle(5)),
    )?;
    resources.register_material(
        "mirror",
        Material::new(SCENE_SHADER).with_cube_map(CubeMapHandle(1)),
    )?;

    engine_info!("demo", "Registered {} meshes, {} materials",
        resources.mesh_count(), resources.material_count());

    Ok(resources)
}

fn named(resources: &ResourceManager, mesh: &str, material: &str) -> Result<(Arc<Mesh>, Arc<Material>)> {
    let mesh = resources
        .mesh(mesh)
        .ok_or_else(|| valley_3d_renderer::engine_err!("demo", "Mesh '{}' missing", mesh))?;
    let material = resources
        .material(material)
        .ok_or_else(|| valley_3d_renderer::engine_err!("demo", "Material '{}' missing", material))?;
    Ok((mesh, material))
}

/// Fill one scene slot with the valley set dressing: a ring of trees, a
/// patrolling animated figure and a reflective orb over the water.
fn populate_scene(
    renderer: &mut SceneRenderer,
    resources: &ResourceManager,
    slot: SceneSlot,
    tint: Vec4,
) -> Result<()> {
    let terrain_size = Vec3::new(4080.0, 1020.0, 4080.0);
    let centre = terrain_size * Vec3::new(0.5, 0.4, 0.5);

    let (tree_mesh, tree_material) = named(resources, "tree", "foliage")?;
    let (walker_mesh, walker_material) = named(resources, "walker", "walker_skin")?;
    let (orb_mesh, orb_material) = named(resources, "orb", "mirror")?;
    let walk_clip = Arc::new(AnimationClip::new(20, 30, 24.0, vec![Mat4::IDENTITY; 600])?);

    let graph = renderer.scene_graph_mut(slot);
    let root = graph.root();

    for i in 0..8 {
        let angle = (i as f32) * std::f32::consts::TAU / 8.0;
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * 600.0;
        let tree = SceneNode::new()
            .with_transform(Mat4::from_translation(centre + offset))
            .with_mesh(Arc::clone(&tree_mesh))
            .with_material(Arc::clone(&tree_material))
            .with_colour(tint)
            .with_bounding_radius(120.0);
        graph.add_child(root, tree)?;
    }

    // Animated figure on the valley floor
    let walker = SceneNode::new()
        .with_transform(Mat4::from_translation(centre))
        .with_mesh(walker_mesh)
        .with_material(walker_material)
        .with_animation(walk_clip)
        .with_bounding_radius(50.0);
    graph.add_child(root, walker)?;

    // Reflective orb hovering over the water
    let orb = SceneNode::new()
        .with_transform(Mat4::from_translation(centre + Vec3::new(0.0, 200.0, 0.0)))
        .with_mesh(orb_mesh)
        .with_material(orb_material)
        .with_draw_kind(DrawKind::Reflective)
        .with_colour(Vec4::new(1.0, 1.0, 1.0, 0.8))
        .with_bounding_radius(60.0);
    graph.add_child(root, orb)?;

    engine_info!("demo", "Populated scene {:?}", slot);

    Ok(())
}
