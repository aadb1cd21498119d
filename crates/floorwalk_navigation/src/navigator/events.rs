//! Navigation events
//!
//! Input (client → core): PointerClicked / NavigateRequested
//! Output (core → client, UI, тесты): NavigationStarted / NavigationArrived

use bevy::math::Ray3d;
use bevy::prelude::*;

/// Клик в normalized device coordinates
///
/// Ray строится через `PerspectiveRig` navigator camera.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerClicked {
    pub ndc: Vec2,
}

/// Клик, для которого ray уже посчитан снаружи
///
/// Client использует `Camera::viewport_to_world` и шлёт готовый ray.
#[derive(Event, Debug, Clone, Copy)]
pub struct NavigateRequested {
    pub ray: Ray3d,
}

/// Navigator выбрал target и начал (или перенаправил) движение
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NavigationStarted {
    pub target: Entity,
    pub destination: Vec3,
    pub redirected: bool,
}

/// Камера подошла ближе arrival_epsilon и остановилась
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NavigationArrived {
    pub target: Entity,
    /// Фактическая позиция камеры (НЕ destination)
    pub position: Vec3,
}
