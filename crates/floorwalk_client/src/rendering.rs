use bevy::core_pipeline::Skybox;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use floorwalk_navigation::layout::FurnitureSpec;
use floorwalk_navigation::{
    log_info, log_warning, FurniturePiece, NavTarget, NavigatorCamera, SceneLayout, TargetKind,
};

use crate::assets::SceneAssets;

/// Three-style intensity (0..~2) → фотометрические единицы Bevy
const AMBIENT_BRIGHTNESS_SCALE: f32 = 400.0;
const SUN_ILLUMINANCE_SCALE: f32 = 8_000.0;

/// Зазор между логотипом и гранью booth (против z-fighting)
const LOGO_GAP: f32 = 0.01;

pub struct SceneRenderPlugin;

impl Plugin for SceneRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_lighting, setup_floor, setup_static_props))
            .add_systems(Update, (attach_target_visuals, attach_camera_view));
    }
}

/// Layout, из которого client рисует сцену
#[derive(Resource, Debug, Clone)]
pub struct ActiveLayout(pub SceneLayout);

/// `0xRRGGBB` → sRGB color
pub fn hex_color(rgb: u32, alpha: f32) -> Color {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    Color::srgba(channel(16), channel(8), channel(0), alpha)
}

fn solid_material(color: u32, metalness: f32, roughness: f32, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: hex_color(color, opacity),
        metallic: metalness,
        perceptual_roughness: roughness,
        alpha_mode: if opacity < 1.0 { AlphaMode::Blend } else { AlphaMode::Opaque },
        ..default()
    }
}

/// (стол, диван)
fn furniture_materials(furniture: &FurnitureSpec) -> (StandardMaterial, StandardMaterial) {
    (
        solid_material(furniture.table_color, furniture.table_metalness, furniture.table_roughness, 1.0),
        solid_material(furniture.sofa_color, furniture.sofa_metalness, furniture.sofa_roughness, 1.0),
    )
}

/// Солнце смотрит в начало координат; для вертикального солнца up = Z
pub fn sun_transform(position: Vec3) -> Transform {
    let direction = -position.normalize_or_zero();
    let up = if direction.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    Transform::from_translation(position).looking_at(Vec3::ZERO, up)
}

fn setup_lighting(mut commands: Commands, layout: Res<ActiveLayout>) {
    let lighting = &layout.0.lighting;

    commands.insert_resource(AmbientLight {
        color: hex_color(lighting.ambient_color, 1.0),
        brightness: lighting.ambient_intensity * AMBIENT_BRIGHTNESS_SCALE,
        affects_lightmapped_meshes: false,
    });

    // Directional light (sun)
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: lighting.sun_intensity * SUN_ILLUMINANCE_SCALE,
            shadows_enabled: lighting.sun_shadows,
            ..default()
        },
        sun_transform(lighting.sun_position),
    ));
}

/// Пол: плоскость + повторяющаяся текстура (repeat sampler + uv_transform)
fn setup_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut scene_assets: ResMut<SceneAssets>,
    layout: Res<ActiveLayout>,
) {
    let floor = &layout.0.floor;

    let base_color_texture = floor.texture.as_ref().map(|path| {
        let texture: Handle<Image> =
            asset_server.load_with_settings(path.clone(), |settings: &mut ImageLoaderSettings| {
                settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                    address_mode_u: ImageAddressMode::Repeat,
                    address_mode_v: ImageAddressMode::Repeat,
                    ..default()
                });
            });
        scene_assets.track("floor texture", texture.id());
        texture
    });

    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, floor.size * 0.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture,
            uv_transform: Affine2::from_scale(Vec2::splat(floor.texture_repeat)),
            perceptual_roughness: floor.roughness,
            ..default()
        })),
        Transform::default(),
    ));
}

/// Всё некликабельное: booth (если он не target), логотип, мебель
fn setup_static_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut scene_assets: ResMut<SceneAssets>,
    layout: Res<ActiveLayout>,
) {
    let layout = &layout.0;
    let booth = &layout.booth;

    // Navigable booth получит mesh через attach_target_visuals
    if !booth.navigable {
        commands.spawn((
            Name::new("Booth"),
            Mesh3d(meshes.add(Cuboid::from_size(booth.size))),
            MeshMaterial3d(materials.add(solid_material(booth.color, booth.metalness, booth.roughness, 1.0))),
            Transform::from_translation(booth.position),
        ));
    }

    if let Some(path) = &booth.logo_texture {
        let logo: Handle<Image> = asset_server.load(path.clone());
        scene_assets.track("booth logo", logo.id());

        // Передняя грань (+Z), чуть меньше самой грани
        let front = booth.position + Vec3::Z * (booth.size.z * 0.5 + LOGO_GAP);
        commands.spawn((
            Name::new("BoothLogo"),
            Mesh3d(meshes.add(Rectangle::new(booth.size.x * 0.9, booth.size.y * 0.8))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(logo),
                metallic: booth.metalness,
                perceptual_roughness: booth.roughness,
                ..default()
            })),
            Transform::from_translation(front),
        ));
    }

    let Some(furniture) = layout.furniture else {
        return;
    };
    let pieces = layout.furniture_pieces();

    let (table_material, sofa_material) = furniture_materials(&furniture);
    let table_mesh = meshes.add(Cylinder::new(furniture.table_radius, furniture.table_thickness));
    let table_material = materials.add(table_material);
    let sofa_mesh = meshes.add(Cuboid::from_size(furniture.sofa_size));
    let sofa_material = materials.add(sofa_material);

    for piece in &pieces {
        match *piece {
            FurniturePiece::Table { position } => {
                commands.spawn((
                    Name::new("Table"),
                    Mesh3d(table_mesh.clone()),
                    MeshMaterial3d(table_material.clone()),
                    Transform::from_translation(position),
                ));
            }
            FurniturePiece::Sofa { position, yaw } => {
                commands.spawn((
                    Name::new("Sofa"),
                    Mesh3d(sofa_mesh.clone()),
                    MeshMaterial3d(sofa_material.clone()),
                    Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
                ));
            }
        }
    }

    log_info(&format!("Scene props spawned: {} furniture pieces", pieces.len()));
}

/// Mesh + material для новых target entities (включая пересозданную session)
fn attach_target_visuals(
    mut commands: Commands,
    targets: Query<(Entity, &NavTarget), Added<NavTarget>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<ActiveLayout>,
) {
    for (entity, target) in targets.iter() {
        let material = match target.kind {
            TargetKind::Landmark => {
                let booth = &layout.0.booth;
                solid_material(booth.color, booth.metalness, booth.roughness, 1.0)
            }
            TargetKind::Zone => match layout.0.zones.get(target.id.0 as usize) {
                Some(zone) => solid_material(zone.color, zone.metalness, zone.roughness, zone.opacity),
                None => {
                    log_warning(&format!(
                        "attach_target_visuals: no zone spec for target {:?}, using default material",
                        target.id
                    ));
                    StandardMaterial::default()
                }
            },
        };

        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::from_size(target.size))),
            MeshMaterial3d(materials.add(material)),
        ));
    }
}

/// Превращает core camera entity в Bevy камеру: Camera3d, projection, env map
fn attach_camera_view(
    mut commands: Commands,
    cameras: Query<Entity, Added<NavigatorCamera>>,
    asset_server: Res<AssetServer>,
    mut scene_assets: ResMut<SceneAssets>,
    layout: Res<ActiveLayout>,
) {
    let layout = &layout.0;

    for entity in cameras.iter() {
        let mut camera = commands.entity(entity);
        camera.insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: layout.camera.fov_degrees.to_radians(),
                near: layout.camera.near,
                far: layout.camera.far,
                ..default()
            }),
        ));

        let Some(environment) = &layout.environment else {
            continue;
        };
        let diffuse_map: Handle<Image> = asset_server.load(environment.diffuse_map.clone());
        let specular_map: Handle<Image> = asset_server.load(environment.specular_map.clone());
        scene_assets.track("environment diffuse", diffuse_map.id());
        scene_assets.track("environment specular", specular_map.id());

        if environment.as_background {
            camera.insert(Skybox {
                image: specular_map.clone(),
                brightness: environment.intensity,
                rotation: Quat::IDENTITY,
            });
        }
        camera.insert(EnvironmentMapLight {
            diffuse_map,
            specular_map,
            intensity: environment.intensity,
            ..default()
        });
    }
}
