//! floorwalk navigation core
//!
//! Click-to-navigate camera controller на Bevy ECS 0.16 (headless).
//!
//! АРХИТЕКТУРА:
//! - Navigator (resource) = вся логика: pick → destination, tick → exponential approach
//! - Picker (trait) = hit test; по умолчанию rapier colliders
//! - NavigationSession = явный lifecycle (create / teardown), никаких глобальных scene объектов
//! - Rendering, ассеты, input - в floorwalk_client

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod error;
pub mod layout;
pub mod logger;
pub mod navigator;
pub mod picking;
pub mod session;

// Re-export основных типов
pub use components::{
    pointer_to_ndc, target_bundle, NavTarget, NavigatorCamera, PerspectiveRig, TargetId, TargetKind,
};
pub use config::{AdvanceMode, NavigatorConfig, DEFAULT_ARRIVAL_EPSILON};
pub use error::{NavigationError, NavigationResult};
pub use layout::{FurniturePiece, SceneLayout};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigator::{
    ticks_to_arrive, CommandOutcome, NavigateOutcome, NavigateRequested, NavigationArrived,
    NavigationCommand, NavigationPhase, NavigationPlugin, NavigationSet, NavigationStarted,
    Navigator, PointerClicked, TickOutcome,
};
pub use picking::{ColliderPicker, PickCandidate, PickHit, Picker};
pub use session::NavigationSession;

/// Создаёт minimal Bevy App для headless навигации (без окна и рендера)
///
/// Session не создаётся - вызывающий решает, какой layout загрузить.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(NavigationPlugin);

    app
}

/// Headless app + session из layout
pub fn create_headless_session(layout: &SceneLayout) -> NavigationResult<App> {
    let mut app = create_headless_app();
    NavigationSession::create(app.world_mut(), layout)?;
    Ok(app)
}
