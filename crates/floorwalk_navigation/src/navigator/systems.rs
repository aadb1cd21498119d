//! ECS системы Navigator'а
//!
//! Порядок внутри кадра (chain): клики → ray requests → tick.
//! Клик, пришедший в этом кадре, двигает камеру уже в этом же кадре.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use super::events::{NavigateRequested, NavigationArrived, NavigationStarted, PointerClicked};
use super::state::{NavigateOutcome, Navigator, TickOutcome};
use crate::components::{NavTarget, NavigatorCamera, PerspectiveRig};
use crate::logger;
use crate::picking::{ColliderPicker, PickCandidate};

/// Snapshot всех targets в детерминированном порядке (по TargetId)
pub fn collect_candidates(
    targets: &Query<(Entity, &NavTarget, &Transform, &Collider)>,
) -> Vec<PickCandidate> {
    let mut candidates: Vec<PickCandidate> = targets
        .iter()
        .map(|(entity, target, transform, collider)| {
            PickCandidate::new(entity, target, transform, collider)
        })
        .collect();
    candidates.sort_by_key(|c| c.target.id);
    candidates
}

/// Система: PointerClicked (NDC) → ray через rig камеры → NavigateRequested
pub fn handle_pointer_clicks(
    mut clicks: EventReader<PointerClicked>,
    camera: Query<(&Transform, &PerspectiveRig), With<NavigatorCamera>>,
    mut requests: EventWriter<NavigateRequested>,
) {
    if clicks.is_empty() {
        return;
    }

    let Ok((transform, rig)) = camera.single() else {
        logger::log_warning("handle_pointer_clicks: navigator camera not found, clicks dropped");
        clicks.clear();
        return;
    };

    for click in clicks.read() {
        match rig.ray_through(click.ndc, transform) {
            Some(ray) => {
                requests.write(NavigateRequested { ray });
            }
            None => logger::log_warning(&format!(
                "handle_pointer_clicks: degenerate ray at {:?}",
                click.ndc
            )),
        }
    }
}

/// Система: NavigateRequested → pick → destination
///
/// Несколько кликов за кадр обрабатываются по порядку, последний hit побеждает.
pub fn handle_navigate_requests(
    mut requests: EventReader<NavigateRequested>,
    navigator: Option<ResMut<Navigator>>,
    targets: Query<(Entity, &NavTarget, &Transform, &Collider)>,
    mut started: EventWriter<NavigationStarted>,
) {
    if requests.is_empty() {
        return;
    }

    // Session уже закрыта (teardown) - клики некуда применять
    let Some(mut navigator) = navigator else {
        requests.clear();
        return;
    };

    let candidates = collect_candidates(&targets);
    let picker = ColliderPicker::default();

    for request in requests.read() {
        if let NavigateOutcome::Started {
            target,
            destination,
            redirected,
        } = navigator.navigate(request.ray, &candidates, &picker)
        {
            started.write(NavigationStarted {
                target,
                destination,
                redirected,
            });
        }
    }
}

/// Система: один tick за кадр (dt из `Time`)
pub fn advance_navigator_camera(
    navigator: Option<ResMut<Navigator>>,
    mut camera: Query<&mut Transform, With<NavigatorCamera>>,
    time: Res<Time>,
    mut arrived: EventWriter<NavigationArrived>,
) {
    // Idle - камеру не трогаем вообще (иначе Changed<Transform> сработает зря)
    let Some(mut navigator) = navigator.filter(|n| n.is_moving()) else {
        return;
    };

    let Ok(mut transform) = camera.single_mut() else {
        logger::log_warning("advance_navigator_camera: navigator camera not found");
        return;
    };

    if let TickOutcome::Arrived { target, position } =
        navigator.tick(&mut transform, time.delta_secs())
    {
        arrived.write(NavigationArrived { target, position });
    }
}
