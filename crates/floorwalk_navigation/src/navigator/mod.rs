//! Click-to-navigate camera controller
//!
//! Pointer click → ray → pick (zones + landmark) → destination на hover height.
//! Каждый кадр камера закрывает `speed` оставшейся дистанции и смотрит на look target.
//!
//! Navigator сам по себе - обычная структура (тестируется без App).
//! Plugin только прокидывает events и queries.

use bevy::prelude::*;

pub mod events;
pub mod state;
pub mod systems;


pub use events::{NavigateRequested, NavigationArrived, NavigationStarted, PointerClicked};
pub use state::{
    ticks_to_arrive, CommandOutcome, NavigateOutcome, NavigationCommand, NavigationPhase,
    Navigator, TickOutcome,
};

/// Набор систем навигации (client вешает input системы `.before(NavigationSet)`)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationSet;

/// Navigation Plugin
///
/// Регистрирует системы в Update (частота = частота кадров).
/// Порядок выполнения:
/// 1. handle_pointer_clicks - NDC → ray
/// 2. handle_navigate_requests - ray → pick → destination
/// 3. advance_navigator_camera - один tick
///
/// `Navigator` resource вставляет `NavigationSession::create`, не plugin.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerClicked>()
            .add_event::<NavigateRequested>()
            .add_event::<NavigationStarted>()
            .add_event::<NavigationArrived>();

        app.add_systems(
            Update,
            (
                systems::handle_pointer_clicks,
                systems::handle_navigate_requests,
                systems::advance_navigator_camera,
            )
                .chain() // Последовательное выполнение: клик виден tick'у этого же кадра
                .in_set(NavigationSet),
        );
    }
}
