//! Navigator: click → destination, tick → exponential approach
//!
//! State machine:
//! - Idle --(click hits target)--> Moving
//! - Moving --(tick, distance < ε)--> Idle
//! - Moving --(click hits target)--> Moving (destination заменяется, latest click wins)
//!
//! Остановка по proximity: камера остаётся там, где tick её оставил (НЕ snap в destination).

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::components::{PerspectiveRig, TargetKind};
use crate::config::NavigatorConfig;
use crate::error::NavigationResult;
use crate::logger;
use crate::picking::{PickCandidate, PickHit, Picker};

/// Квадрат минимальной длины look direction (меньше - ориентацию не трогаем)
const MIN_LOOK_DISTANCE_SQ: f32 = 1e-8;

/// Фаза навигации
///
/// Инвариант "moving ⇒ destination defined" держится типом: destination живёт
/// только внутри `Moving`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NavigationPhase {
    #[default]
    Idle,
    Moving {
        destination: Vec3,
        /// Entity target'а, в который летим
        target: Entity,
    },
}

/// Команды Navigator'а (click и frame tick в явном виде)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationCommand {
    /// Ray уже построен из pointer + camera
    Navigate { ray: Ray3d },
    /// Один rendered frame длительностью `dt` секунд
    Advance { dt: f32 },
}

/// Результат обработки клика
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigateOutcome {
    /// Ни один target не пересечён - state не изменился
    Missed,
    Started {
        target: Entity,
        destination: Vec3,
        /// true если прервали движение к другому target'у
        redirected: bool,
    },
}

/// Результат одного tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Не двигались (no-op)
    Idle,
    Moved { remaining: f32 },
    Arrived { target: Entity, position: Vec3 },
}

/// Итог `apply(command)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    Navigate(NavigateOutcome),
    Advance(TickOutcome),
}

/// Navigation controller (один на session)
#[derive(Resource, Debug, Clone)]
pub struct Navigator {
    config: NavigatorConfig,
    phase: NavigationPhase,
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> NavigationResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: NavigationPhase::Idle,
        })
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.phase, NavigationPhase::Moving { .. })
    }

    /// Текущая цель (None в Idle)
    pub fn destination(&self) -> Option<Vec3> {
        match self.phase {
            NavigationPhase::Idle => None,
            NavigationPhase::Moving { destination, .. } => Some(destination),
        }
    }

    pub fn look_target(&self) -> Vec3 {
        self.config.look_target
    }

    pub fn speed(&self) -> f32 {
        self.config.speed
    }

    /// Click в NDC: строим ray через rig камеры и делегируем в `navigate`
    pub fn handle_pointer_click(
        &mut self,
        ndc: Vec2,
        rig: &PerspectiveRig,
        camera: &Transform,
        candidates: &[PickCandidate],
        picker: &impl Picker,
    ) -> NavigateOutcome {
        match rig.ray_through(ndc, camera) {
            Some(ray) => self.navigate(ray, candidates, picker),
            None => {
                logger::log_warning(&format!(
                    "Navigator: degenerate ray for click at {:?}, ignored",
                    ndc
                ));
                NavigateOutcome::Missed
            }
        }
    }

    /// Pick по ray и (если попали) новая destination
    ///
    /// Zones и landmarks проверяются раздельно. Hit по landmark перекрывает
    /// зону, даже если зона ближе.
    pub fn navigate(
        &mut self,
        ray: Ray3d,
        candidates: &[PickCandidate],
        picker: &impl Picker,
    ) -> NavigateOutcome {
        let zones = partition(candidates, TargetKind::Zone);
        let landmarks = partition(candidates, TargetKind::Landmark);

        let zone_hit = nearest(picker, ray, &zones);
        let landmark_hit = nearest(picker, ray, &landmarks);

        let Some(chosen) = landmark_hit.or(zone_hit) else {
            logger::log(&format!(
                "Navigator: click missed all {} targets",
                candidates.len()
            ));
            return NavigateOutcome::Missed;
        };

        let mut destination = chosen.position;
        destination.y = self.config.hover_height;

        let redirected = self.is_moving();
        self.phase = NavigationPhase::Moving {
            destination,
            target: chosen.entity,
        };

        logger::log_info(&format!(
            "Navigator: {} → '{}' ({:?}), destination {}",
            if redirected { "Moving (redirect)" } else { "Idle → Moving" },
            chosen.target.label,
            chosen.entity,
            destination
        ));

        NavigateOutcome::Started {
            target: chosen.entity,
            destination,
            redirected,
        }
    }

    /// Один frame: lerp к destination, поворот на look target, проверка прибытия
    pub fn tick(&mut self, camera: &mut Transform, dt: f32) -> TickOutcome {
        let NavigationPhase::Moving { destination, target } = self.phase else {
            return TickOutcome::Idle;
        };

        let factor = self.config.step_factor(dt);
        camera.translation = camera.translation.lerp(destination, factor);
        face_point(camera, self.config.look_target);

        let remaining = camera.translation.distance(destination);
        if remaining < self.config.arrival_epsilon {
            self.phase = NavigationPhase::Idle;
            logger::log_info(&format!(
                "Navigator: Moving → Idle, stopped at {} ({:.3} from destination)",
                camera.translation, remaining
            ));
            return TickOutcome::Arrived {
                target,
                position: camera.translation,
            };
        }

        TickOutcome::Moved { remaining }
    }

    /// Command form: Navigate / Advance
    pub fn apply(
        &mut self,
        command: NavigationCommand,
        camera: &mut Transform,
        candidates: &[PickCandidate],
        picker: &impl Picker,
    ) -> CommandOutcome {
        match command {
            NavigationCommand::Navigate { ray } => {
                CommandOutcome::Navigate(self.navigate(ray, candidates, picker))
            }
            NavigationCommand::Advance { dt } => CommandOutcome::Advance(self.tick(camera, dt)),
        }
    }

    /// Сбросить pending destination (Moving → Idle), камера не трогается
    pub fn cancel(&mut self) -> bool {
        let was_moving = self.is_moving();
        self.phase = NavigationPhase::Idle;
        if was_moving {
            logger::log_info("Navigator: movement cancelled");
        }
        was_moving
    }
}

/// Верхняя граница числа tick'ов до остановки при PerTick approach
///
/// `ceil(ln(ε/d0) / ln(1 - s))`, минимум 1 (первый tick всегда выполняется).
pub fn ticks_to_arrive(initial_distance: f32, speed: f32, epsilon: f32) -> u32 {
    if speed >= 1.0 || initial_distance < epsilon {
        return 1;
    }
    let ratio = (epsilon as f64 / initial_distance as f64).ln();
    let per_tick = (1.0 - speed as f64).ln();
    ((ratio / per_tick).ceil() as u32).max(1)
}

/// Повернуть камеру на точку; вырожденное направление → ориентация без изменений
fn face_point(camera: &mut Transform, point: Vec3) {
    let direction = point - camera.translation;
    if direction.length_squared() < MIN_LOOK_DISTANCE_SQ {
        return;
    }
    camera.look_at(point, Vec3::Y);
}

fn partition(candidates: &[PickCandidate], kind: TargetKind) -> Vec<PickCandidate> {
    candidates
        .iter()
        .filter(|c| c.target.kind == kind)
        .cloned()
        .collect()
}

fn nearest<'a>(
    picker: &impl Picker,
    ray: Ray3d,
    candidates: &'a [PickCandidate],
) -> Option<&'a PickCandidate> {
    if candidates.is_empty() {
        return None;
    }
    let hits: Vec<PickHit> = picker.intersect(ray, candidates);
    hits.first().and_then(|hit| candidates.get(hit.index))
}
