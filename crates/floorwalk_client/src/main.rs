use bevy::prelude::*;
use floorwalk_navigation::{
    init_logger, log_error, log_info, NavigationPlugin, NavigationSession, SceneLayout,
};

mod assets;
mod camera;
mod rendering;

use assets::SceneAssetsPlugin;
use camera::{OrbitCameraPlugin, PointerInputPlugin};
use rendering::{ActiveLayout, SceneRenderPlugin};

/// `lounge`, `nightclub` или путь к JSON layout'у
const LAYOUT_ENV: &str = "FLOORWALK_LAYOUT";
const DEFAULT_LAYOUT: &str = "nightclub";

fn main() {
    init_logger();

    let spec = std::env::var(LAYOUT_ENV).unwrap_or_else(|_| DEFAULT_LAYOUT.to_string());
    let layout = match SceneLayout::resolve(&spec) {
        Ok(layout) => layout,
        Err(err) => {
            log_error(&format!("cannot load layout '{}': {}", spec, err));
            std::process::exit(1);
        }
    };

    let mut app = App::new();
    app
        // Bevy defaults (rendering, input, assets, time)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("floorwalk - {}", layout.name),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Navigation core (headless ECS logic)
        .add_plugins(NavigationPlugin)
        // Async asset readiness (textures, env map)
        .add_plugins(SceneAssetsPlugin)
        // Layout → meshes, lights, camera view
        .add_plugins(SceneRenderPlugin)
        // Left click → PointerClicked
        .add_plugins(PointerInputPlugin)
        // Right drag / wheel → orbit вокруг look target
        .add_plugins(OrbitCameraPlugin)
        .insert_resource(ActiveLayout(layout.clone()));

    // Session до run(): target/camera entities уже есть к первому Update
    if let Err(err) = NavigationSession::create(app.world_mut(), &layout) {
        log_error(&format!("cannot create session: {}", err));
        std::process::exit(1);
    }

    log_info(&format!("Starting floorwalk client (layout: {})", layout.name));
    app.run();
}

#[cfg(test)]
mod tests {
    use floorwalk_navigation::{AdvanceMode, SceneLayout, TargetKind};

    #[test]
    fn test_bundled_gallery_layout() {
        let json = include_str!("../assets/layouts/gallery.layout.json");
        let layout = SceneLayout::from_json_str(json).unwrap();

        assert_eq!(layout.name, "gallery");
        assert_eq!(
            layout.navigator.advance_mode,
            AdvanceMode::FrameRateIndependent { reference_hz: 60.0 }
        );
        // Не указан в JSON → default
        assert_eq!(layout.navigator.arrival_epsilon, 0.1);
        assert_eq!(layout.zones[2].opacity, 1.0);
        assert!(layout.furniture.is_none());

        let targets = layout.targets();
        assert_eq!(targets.len(), 4);
        assert_eq!(targets[3].0.kind, TargetKind::Landmark);
    }
}
