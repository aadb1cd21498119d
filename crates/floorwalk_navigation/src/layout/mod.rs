//! Scene layout: статичные данные сцены (camera, свет, пол, booth, зоны, мебель)
//!
//! Layout - это config, не поведение. Core берёт из него только navigator config,
//! camera start и targets; всё остальное рисует client.
//!
//! Формат: JSON (serde). Векторы - массивы `[x, y, z]`, цвета - `0xRRGGBB` числом.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{NavTarget, PerspectiveRig};
use crate::config::NavigatorConfig;
use crate::error::{NavigationError, NavigationResult};

mod presets;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub name: String,
    pub camera: CameraSpec,
    pub navigator: NavigatorConfig,
    pub floor: FloorSpec,
    pub lighting: LightingSpec,
    pub booth: BoothSpec,
    pub zones: Vec<ZoneSpec>,
    #[serde(default)]
    pub furniture: Option<FurnitureSpec>,
    #[serde(default)]
    pub environment: Option<EnvironmentSpec>,
}

/// Стартовая позиция и perspective параметры
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraSpec {
    pub fn rig(&self, aspect: f32) -> PerspectiveRig {
        PerspectiveRig {
            fov_y: self.fov_degrees.to_radians(),
            aspect,
            near: self.near,
            far: self.far,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    pub size: Vec2,
    /// Путь в assets/, None - однотонный пол
    #[serde(default)]
    pub texture: Option<String>,
    /// Сколько раз текстура повторяется по каждой оси
    pub texture_repeat: f32,
    pub roughness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingSpec {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub sun_position: Vec3,
    pub sun_intensity: f32,
    pub sun_shadows: bool,
}

/// DJ booth: визуальный центр сцены и (опционально) landmark target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothSpec {
    pub position: Vec3,
    pub size: Vec3,
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    /// true - booth кликабелен и перекрывает зоны
    #[serde(default)]
    pub navigable: bool,
    /// Текстура логотипа на передней грани
    #[serde(default)]
    pub logo_texture: Option<String>,
}

/// Кликабельная зона / floor plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Центр box'а
    pub position: Vec3,
    pub size: Vec3,
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    /// < 1.0 - полупрозрачное "стекло"
    #[serde(default = "opaque")]
    pub opacity: f32,
}

fn opaque() -> f32 {
    1.0
}

/// Генератор мебели: стол в центре каждой зоны + 4 дивана вокруг
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FurnitureSpec {
    pub table_height: f32,
    pub table_radius: f32,
    pub table_thickness: f32,
    pub table_color: u32,
    pub table_metalness: f32,
    pub table_roughness: f32,
    pub sofa_height: f32,
    pub sofa_size: Vec3,
    /// Смещение дивана от центра стола (по X и Z)
    pub sofa_offset: f32,
    pub sofa_yaw_degrees: f32,
    pub sofa_color: u32,
    pub sofa_metalness: f32,
    pub sofa_roughness: f32,
}

/// Один предмет мебели, посчитанный из FurnitureSpec
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FurniturePiece {
    Table { position: Vec3 },
    Sofa { position: Vec3, yaw: f32 },
}

/// Environment map (prefiltered cubemap pair, ktx2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub diffuse_map: String,
    pub specular_map: String,
    pub intensity: f32,
    /// Показывать specular map как фон (skybox)
    #[serde(default)]
    pub as_background: bool,
}

impl SceneLayout {
    /// Built-in preset по имени (`lounge`, `nightclub`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "lounge" => Some(Self::lounge()),
            "nightclub" => Some(Self::nightclub()),
            _ => None,
        }
    }

    pub fn from_json_str(json: &str) -> NavigationResult<Self> {
        let layout: SceneLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: impl AsRef<Path>) -> NavigationResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NavigationError::LayoutIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Имя preset'а или путь к JSON файлу
    pub fn resolve(spec: &str) -> NavigationResult<Self> {
        match Self::preset(spec) {
            Some(layout) => Ok(layout),
            None => Self::load(spec),
        }
    }

    pub fn to_json_pretty(&self) -> NavigationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> NavigationResult<()> {
        self.navigator.validate()?;

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(NavigationError::invalid(
                "camera.fov_degrees",
                format!("must be in (0, 180), got {}", camera.fov_degrees),
            ));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(NavigationError::invalid(
                "camera.near/far",
                format!("need 0 < near < far, got {} / {}", camera.near, camera.far),
            ));
        }
        if !self.booth.size.cmpgt(Vec3::ZERO).all() {
            return Err(NavigationError::invalid(
                "booth.size",
                format!("all extents must be > 0, got {}", self.booth.size),
            ));
        }
        for zone in &self.zones {
            if !zone.size.cmpgt(Vec3::ZERO).all() {
                return Err(NavigationError::invalid(
                    "zones[].size",
                    format!("all extents must be > 0, got {}", zone.size),
                ));
            }
            if !(0.0..=1.0).contains(&zone.opacity) {
                return Err(NavigationError::invalid(
                    "zones[].opacity",
                    format!("must be in [0, 1], got {}", zone.opacity),
                ));
            }
        }
        Ok(())
    }

    /// Targets в порядке спавна: зоны (id = индекс), затем booth если navigable
    pub fn targets(&self) -> Vec<(NavTarget, Vec3)> {
        let mut targets: Vec<(NavTarget, Vec3)> = self
            .zones
            .iter()
            .enumerate()
            .map(|(index, zone)| {
                (
                    NavTarget::zone(index as u32, format!("zone-{}", index), zone.size),
                    zone.position,
                )
            })
            .collect();

        if self.booth.navigable {
            targets.push((
                NavTarget::landmark(self.zones.len() as u32, "booth", self.booth.size),
                self.booth.position,
            ));
        }
        targets
    }

    /// Мебель для всех зон (пусто если furniture не задан)
    pub fn furniture_pieces(&self) -> Vec<FurniturePiece> {
        let Some(furniture) = self.furniture else {
            return Vec::new();
        };

        let yaw = furniture.sofa_yaw_degrees.to_radians();
        let offset = furniture.sofa_offset;
        let mut pieces = Vec::with_capacity(self.zones.len() * 5);

        for zone in &self.zones {
            let (x, z) = (zone.position.x, zone.position.z);
            pieces.push(FurniturePiece::Table {
                position: Vec3::new(x, furniture.table_height, z),
            });
            for (dx, dz) in [(offset, 0.0), (-offset, 0.0), (0.0, offset), (0.0, -offset)] {
                pieces.push(FurniturePiece::Sofa {
                    position: Vec3::new(x + dx, furniture.sofa_height, z + dz),
                    yaw,
                });
            }
        }
        pieces
    }
}

#[cfg(test)]
mod layout_tests;
