//! Camera компоненты: маркер navigator camera + perspective rig для rays

use bevy::math::Ray3d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Маркер: этой camera entity управляет Navigator
///
/// Ровно одна на session. Navigator двигает её `Transform` каждый tick.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, PerspectiveRig)]
pub struct NavigatorCamera;

/// Параметры perspective проекции, нужные для построения ray из NDC
///
/// Headless аналог `Projection::Perspective` (рендер в core не подключён).
/// Client синхронизирует aspect при resize.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct PerspectiveRig {
    /// Вертикальный FOV (радианы)
    pub fov_y: f32,
    /// width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveRig {
    fn default() -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveRig {
    /// Ray из позиции камеры через точку `ndc` на near plane
    ///
    /// `ndc` в [-1, 1]², x слева направо, y снизу вверх. None если направление
    /// вырождено (NaN в transform).
    pub fn ray_through(&self, ndc: Vec2, camera: &Transform) -> Option<Ray3d> {
        let half_height = (self.fov_y * 0.5).tan();
        let local = Vec3::new(ndc.x * half_height * self.aspect, ndc.y * half_height, -1.0);
        let direction = Dir3::new(camera.rotation * local).ok()?;
        Some(Ray3d::new(camera.translation, direction))
    }
}

/// Пиксели окна → NDC
///
/// Ось y переворачивается: экранный y растёт вниз, NDC y - вверх.
/// None для вырожденного viewport (свернутое окно).
pub fn pointer_to_ndc(pointer: Vec2, viewport_size: Vec2) -> Option<Vec2> {
    if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (pointer.x / viewport_size.x) * 2.0 - 1.0,
        -(pointer.y / viewport_size.y) * 2.0 + 1.0,
    ))
}
