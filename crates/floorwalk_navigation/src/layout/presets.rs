//! Built-in layouts: lounge (6 стеклянных зон) и nightclub (7 plates + мебель)

use bevy::prelude::*;

use super::*;
use crate::config::{AdvanceMode, NavigatorConfig, DEFAULT_ARRIVAL_EPSILON};

/// Цвета plates в nightclub (по индексу plate)
const NIGHTCLUB_PLATE_COLORS: [u32; 10] = [
    0x1a1a2e, 0x16213e, 0x0f3460, 0xe94560, 0x533483, 0x3a0ca3, 0x7209b7, 0x560bad, 0x480ca8,
    0x3f37c9,
];

/// (x, z, width, depth)
const NIGHTCLUB_PLATES: [(f32, f32, f32, f32); 7] = [
    (1.93, -12.925, 11.42, 4.15),
    (-5.71, -7.57, 3.86, 6.56),
    (-9.57, -7.57, 3.86, 6.56),
    (9.57, -7.57, 3.86, 6.56),
    (-1.93, 0.47, 19.14, 9.52),
    (-1.93, 10.37, 19.14, 10.28),
    (9.57, 5.61, 3.86, 19.8),
];

/// (x, z, width, depth)
const LOUNGE_ZONES: [(f32, f32, f32, f32); 6] = [
    (-2.0, -2.0, 2.0, 2.0),
    (2.0, -2.0, 3.0, 2.0),
    (-4.0, 1.0, 3.0, 3.0),
    (1.0, 1.0, 2.0, 3.0),
    (-2.0, 3.0, 2.0, 2.0),
    (3.0, 3.0, 3.0, 2.0),
];

impl SceneLayout {
    /// Небольшой lounge: 6 полупрозрачных зон, booth только декорация
    pub fn lounge() -> Self {
        let booth_position = Vec3::new(-3.0, 0.35, -3.0);

        Self {
            name: "lounge".to_string(),
            camera: CameraSpec {
                position: Vec3::new(0.0, 5.0, 10.0),
                fov_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
            },
            navigator: NavigatorConfig {
                speed: 0.08,
                hover_height: 2.0,
                arrival_epsilon: DEFAULT_ARRIVAL_EPSILON,
                look_target: booth_position,
                advance_mode: AdvanceMode::PerTick,
            },
            floor: FloorSpec {
                size: Vec2::splat(20.0),
                texture: Some("textures/floor.jpg".to_string()),
                texture_repeat: 4.0,
                roughness: 0.6,
            },
            lighting: LightingSpec {
                ambient_color: 0xffffff,
                ambient_intensity: 0.4,
                sun_position: Vec3::new(5.0, 10.0, 5.0),
                sun_intensity: 1.0,
                sun_shadows: true,
            },
            booth: BoothSpec {
                position: booth_position,
                size: Vec3::new(1.5, 0.7, 2.5),
                color: 0xff0000,
                metalness: 0.8,
                roughness: 0.3,
                navigable: false,
                logo_texture: None,
            },
            zones: LOUNGE_ZONES
                .iter()
                .map(|&(x, z, width, depth)| ZoneSpec {
                    position: Vec3::new(x, 0.1, z),
                    size: Vec3::new(width, 0.2, depth),
                    color: 0x00ff00,
                    metalness: 0.4,
                    roughness: 0.2,
                    opacity: 0.7,
                })
                .collect(),
            furniture: None,
            environment: Some(EnvironmentSpec {
                diffuse_map: "environment_maps/venue_diffuse_rgb9e5_zstd.ktx2".to_string(),
                specular_map: "environment_maps/venue_specular_rgb9e5_zstd.ktx2".to_string(),
                intensity: 900.0,
                as_background: true,
            }),
        }
    }

    /// Nightclub: 7 цветных plates со столами/диванами, booth кликабелен
    pub fn nightclub() -> Self {
        let booth_position = Vec3::new(1.93, 0.75, -6.0);

        Self {
            name: "nightclub".to_string(),
            camera: CameraSpec {
                position: Vec3::new(0.0, 10.0, 20.0),
                fov_degrees: 75.0,
                near: 0.1,
                far: 200.0,
            },
            navigator: NavigatorConfig {
                speed: 0.05,
                hover_height: 5.0,
                arrival_epsilon: DEFAULT_ARRIVAL_EPSILON,
                look_target: booth_position,
                advance_mode: AdvanceMode::PerTick,
            },
            floor: FloorSpec {
                size: Vec2::splat(50.0),
                texture: Some("textures/floor.jpg".to_string()),
                texture_repeat: 6.0,
                roughness: 0.4,
            },
            lighting: LightingSpec {
                ambient_color: 0xffffff,
                ambient_intensity: 0.6,
                sun_position: Vec3::new(0.0, 20.0, 0.0),
                sun_intensity: 1.5,
                sun_shadows: true,
            },
            booth: BoothSpec {
                position: booth_position,
                size: Vec3::new(3.0, 1.5, 2.0),
                color: 0x555555,
                metalness: 0.8,
                roughness: 0.3,
                navigable: true,
                logo_texture: Some("textures/logo.jpg".to_string()),
            },
            zones: NIGHTCLUB_PLATES
                .iter()
                .enumerate()
                .map(|(index, &(x, z, width, depth))| ZoneSpec {
                    position: Vec3::new(x, 0.5, z),
                    size: Vec3::new(width, 1.0, depth),
                    color: NIGHTCLUB_PLATE_COLORS[index % NIGHTCLUB_PLATE_COLORS.len()],
                    metalness: 0.6,
                    roughness: 0.4,
                    opacity: 1.0,
                })
                .collect(),
            furniture: Some(FurnitureSpec {
                table_height: 1.2,
                table_radius: 0.5,
                table_thickness: 0.3,
                table_color: 0xdddddd,
                table_metalness: 0.5,
                table_roughness: 0.3,
                sofa_height: 1.0,
                sofa_size: Vec3::new(1.2, 0.6, 0.6),
                sofa_offset: 1.2,
                sofa_yaw_degrees: 30.0,
                sofa_color: 0x292929,
                sofa_metalness: 0.4,
                sofa_roughness: 0.5,
            }),
            environment: Some(EnvironmentSpec {
                diffuse_map: "environment_maps/venue_diffuse_rgb9e5_zstd.ktx2".to_string(),
                specular_map: "environment_maps/venue_specular_rgb9e5_zstd.ktx2".to_string(),
                intensity: 600.0,
                as_background: false,
            }),
        }
    }
}
