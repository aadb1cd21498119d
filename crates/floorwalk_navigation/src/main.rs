//! Headless прогон навигации
//!
//! Обходит все targets layout'а по очереди (клик сверху по центру target'а)
//! и печатает, за сколько кадров камера остановилась.
//!
//! `floorwalk_headless [lounge|nightclub|path/to/layout.json]`

use bevy::math::Ray3d;
use bevy::prelude::*;
use floorwalk_navigation::{
    create_headless_session, log_error, log_info, ticks_to_arrive, NavTarget, NavigateRequested,
    NavigationSession, Navigator, NavigatorCamera, SceneLayout,
};

/// Предохранитель на случай невалидного speed (не должен срабатывать)
const MAX_FRAMES_PER_LEG: u32 = 10_000;

fn main() {
    let spec = std::env::args().nth(1).unwrap_or_else(|| "nightclub".to_string());

    let layout = match SceneLayout::resolve(&spec) {
        Ok(layout) => layout,
        Err(err) => {
            floorwalk_navigation::init_logger();
            log_error(&format!("cannot load layout '{}': {}", spec, err));
            std::process::exit(1);
        }
    };

    let mut app = match create_headless_session(&layout) {
        Ok(app) => app,
        Err(err) => {
            log_error(&format!("cannot create session: {}", err));
            std::process::exit(1);
        }
    };

    log_info(&format!("Starting floorwalk headless tour (layout: {})", layout.name));

    let stops: Vec<(String, Vec3)> = {
        let world = app.world_mut();
        let mut query = world.query::<(&NavTarget, &Transform)>();
        let mut stops: Vec<_> = query
            .iter(world)
            .map(|(target, transform)| (target.id, target.label.clone(), transform.translation))
            .collect();
        stops.sort_by_key(|(id, _, _)| *id);
        stops.into_iter().map(|(_, label, position)| (label, position)).collect()
    };

    for (label, position) in stops {
        let ray = Ray3d::new(position + Vec3::Y * 50.0, Dir3::NEG_Y);
        app.world_mut().send_event(NavigateRequested { ray });

        let start = camera_position(&mut app);
        let mut frames = 0;
        loop {
            app.update();
            frames += 1;
            let moving = app.world().resource::<Navigator>().is_moving();
            if !moving || frames >= MAX_FRAMES_PER_LEG {
                break;
            }
        }

        let end = camera_position(&mut app);
        let navigator = app.world().resource::<Navigator>();
        let mut destination = position;
        destination.y = navigator.config().hover_height;
        let bound = ticks_to_arrive(
            start.distance(destination),
            navigator.speed(),
            navigator.config().arrival_epsilon,
        );

        println!(
            "{:>8}: {} frames (bound {}), stopped at {:.3} ({:.4} from destination)",
            label,
            frames,
            bound,
            end,
            end.distance(destination)
        );
    }

    NavigationSession::teardown(app.world_mut());
    log_info("Tour complete!");
}

fn camera_position(app: &mut App) -> Vec3 {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<NavigatorCamera>>();
    query
        .iter(world)
        .next()
        .map(|transform| transform.translation)
        .unwrap_or(Vec3::ZERO)
}
