//! Navigation targets: зоны и landmark (booth)

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use serde::{Deserialize, Serialize};

/// Stable ID target'а внутри layout (порядок спавна)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Роль target'а при picking
///
/// Zones проверяются вместе (nearest wins), Landmark - отдельно, и его hit
/// перекрывает выбор зоны.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Zone,
    Landmark,
}

/// Кликабельная область
///
/// Неизменяема после спавна. Hit shape - rapier `Collider` на той же entity,
/// позиция - `Transform::translation`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct NavTarget {
    pub id: TargetId,
    pub label: String,
    pub kind: TargetKind,
    /// Полные размеры box'а (для mesh в client и для collider)
    pub size: Vec3,
}

impl NavTarget {
    pub fn zone(id: u32, label: impl Into<String>, size: Vec3) -> Self {
        Self {
            id: TargetId(id),
            label: label.into(),
            kind: TargetKind::Zone,
            size,
        }
    }

    pub fn landmark(id: u32, label: impl Into<String>, size: Vec3) -> Self {
        Self {
            id: TargetId(id),
            label: label.into(),
            kind: TargetKind::Landmark,
            size,
        }
    }

    /// Box collider совпадающий с визуальным mesh
    pub fn collider(&self) -> Collider {
        let half = self.size * 0.5;
        Collider::cuboid(half.x, half.y, half.z)
    }

    pub fn is_landmark(&self) -> bool {
        self.kind == TargetKind::Landmark
    }
}

/// Bundle для спавна target'а: NavTarget + Collider + Transform
pub fn target_bundle(target: NavTarget, position: Vec3) -> (NavTarget, Collider, Transform) {
    let collider = target.collider();
    (target, collider, Transform::from_translation(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_constructors() {
        let zone = NavTarget::zone(3, "zone-3", Vec3::new(2.0, 0.2, 3.0));
        assert_eq!(zone.id, TargetId(3));
        assert!(!zone.is_landmark());

        let booth = NavTarget::landmark(7, "dj-booth", Vec3::new(3.0, 1.5, 2.0));
        assert!(booth.is_landmark());
        assert_eq!(booth.kind, TargetKind::Landmark);
    }

    #[test]
    fn test_collider_matches_size() {
        let zone = NavTarget::zone(0, "zone", Vec3::new(2.0, 0.2, 4.0));
        let collider = zone.collider();

        // Луч сверху вниз через центр: top face на y = +0.1
        let toi = collider.cast_ray(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::NEG_Y,
            f32::MAX,
            true,
        );
        let toi = toi.expect("луч через центр должен попасть");
        assert!((toi - 4.9).abs() < 1e-4);

        // Мимо по X (half-extent 1.0)
        let miss = collider.cast_ray(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::new(1.5, 5.0, 0.0),
            Vec3::NEG_Y,
            f32::MAX,
            true,
        );
        assert!(miss.is_none());
    }
}
