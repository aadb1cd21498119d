//! Picking: ray → упорядоченный список hit'ов (nearest first)
//!
//! Navigator не знает как устроен hit test - только контракт `Picker`:
//! - hits отсортированы по distance (ascending)
//! - равные distance - в порядке candidates (детерминизм)
//! - пустой Vec = miss (не ошибка)

use bevy::math::Ray3d;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use crate::components::NavTarget;

/// Кандидат для hit test (snapshot entity на момент клика)
#[derive(Debug, Clone)]
pub struct PickCandidate {
    pub entity: Entity,
    pub target: NavTarget,
    pub position: Vec3,
    pub rotation: Quat,
    pub collider: Collider,
}

impl PickCandidate {
    pub fn new(entity: Entity, target: &NavTarget, transform: &Transform, collider: &Collider) -> Self {
        Self {
            entity,
            target: target.clone(),
            position: transform.translation,
            rotation: transform.rotation,
            collider: collider.clone(),
        }
    }

    /// Кандидат с box collider по размеру target'а
    pub fn from_target(entity: Entity, target: NavTarget, position: Vec3) -> Self {
        let collider = target.collider();
        Self {
            entity,
            target,
            position,
            rotation: Quat::IDENTITY,
            collider,
        }
    }
}

/// Результат hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    /// Индекс в исходном списке candidates
    pub index: usize,
    /// Расстояние от ray.origin до точки входа
    pub distance: f32,
}

/// Ray intersection primitive
pub trait Picker {
    fn intersect(&self, ray: Ray3d, candidates: &[PickCandidate]) -> Vec<PickHit>;
}

/// Picker на rapier colliders (`Collider::cast_ray`, solid)
///
/// Physics step не нужен: cast идёт напрямую по shape в pose кандидата.
/// Solid: если камера внутри box'а, distance = 0.
#[derive(Debug, Clone, Copy)]
pub struct ColliderPicker {
    pub max_distance: f32,
}

impl Default for ColliderPicker {
    fn default() -> Self {
        Self {
            max_distance: f32::MAX,
        }
    }
}

impl Picker for ColliderPicker {
    fn intersect(&self, ray: Ray3d, candidates: &[PickCandidate]) -> Vec<PickHit> {
        let mut hits: Vec<PickHit> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                candidate
                    .collider
                    .cast_ray(
                        candidate.position,
                        candidate.rotation,
                        ray.origin,
                        *ray.direction,
                        self.max_distance,
                        true,
                    )
                    .map(|distance| PickHit {
                        entity: candidate.entity,
                        index,
                        distance,
                    })
            })
            .collect();

        sort_hits(&mut hits);
        hits
    }
}

/// Nearest first, ties по индексу кандидата
pub fn sort_hits(hits: &mut [PickHit]) {
    hits.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.index.cmp(&b.index))
    });
}
