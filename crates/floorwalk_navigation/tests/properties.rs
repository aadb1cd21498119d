//! Property-based тесты Navigator'а
//!
//! Случайные target sets / позиции / speed через ChaCha8 с фиксированным seed -
//! прогон воспроизводим, при падении seed + итерация в сообщении.

use bevy::math::Ray3d;
use bevy::prelude::*;
use floorwalk_navigation::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEED: u64 = 42;
const ITERATIONS: usize = 200;

/// Сетка непересекающихся зон: ячейка 4×4, зона внутри ячейки меньше ячейки
fn random_targets(rng: &mut ChaCha8Rng, world: &mut World) -> Vec<PickCandidate> {
    let count = rng.gen_range(1..=12);
    (0..count)
        .map(|index| {
            let cell_x = (index % 4) as f32 * 4.0 - 6.0;
            let cell_z = (index / 4) as f32 * 4.0 - 6.0;
            let size = Vec3::new(
                rng.gen_range(0.5..3.5),
                rng.gen_range(0.1..1.0),
                rng.gen_range(0.5..3.5),
            );
            let position = Vec3::new(cell_x, size.y * 0.5, cell_z);
            PickCandidate::from_target(
                world.spawn_empty().id(),
                NavTarget::zone(index as u32, format!("zone-{}", index), size),
                position,
            )
        })
        .collect()
}

fn random_config(rng: &mut ChaCha8Rng) -> NavigatorConfig {
    NavigatorConfig {
        speed: rng.gen_range(0.01..=1.0),
        hover_height: rng.gen_range(1.0..8.0),
        look_target: Vec3::new(rng.gen_range(-5.0..5.0), 0.5, rng.gen_range(-5.0..5.0)),
        ..Default::default()
    }
}

fn random_camera(rng: &mut ChaCha8Rng) -> Transform {
    Transform::from_xyz(
        rng.gen_range(-30.0..30.0),
        rng.gen_range(3.0..30.0),
        rng.gen_range(-30.0..30.0),
    )
}

fn down_ray(x: f32, z: f32) -> Ray3d {
    Ray3d::new(Vec3::new(x, 50.0, z), Dir3::NEG_Y)
}

#[test]
fn test_hit_sets_adjusted_destination() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let picker = ColliderPicker::default();

    for iteration in 0..ITERATIONS {
        let mut world = World::new();
        let candidates = random_targets(&mut rng, &mut world);
        let config = random_config(&mut rng);
        let hover_height = config.hover_height;
        let mut navigator = Navigator::new(config).unwrap();

        let chosen = &candidates[rng.gen_range(0..candidates.len())];
        let outcome = navigator.navigate(
            down_ray(chosen.position.x, chosen.position.z),
            &candidates,
            &picker,
        );

        let expected = Vec3::new(chosen.position.x, hover_height, chosen.position.z);
        assert_eq!(
            outcome,
            NavigateOutcome::Started {
                target: chosen.entity,
                destination: expected,
                redirected: false,
            },
            "seed {} iteration {}",
            SEED,
            iteration
        );
        assert!(navigator.is_moving());
    }
}

#[test]
fn test_miss_never_changes_state() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED + 1);
    let picker = ColliderPicker::default();

    for iteration in 0..ITERATIONS {
        let mut world = World::new();
        let candidates = random_targets(&mut rng, &mut world);
        let mut navigator = Navigator::new(random_config(&mut rng)).unwrap();

        // Половина прогонов - уже в движении
        if rng.gen_bool(0.5) {
            let first = &candidates[0];
            navigator.navigate(down_ray(first.position.x, first.position.z), &candidates, &picker);
        }
        let before = navigator.phase();

        // Сетка в [-8, 8]; всё за её пределами - miss
        let x = rng.gen_range(20.0..60.0) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let z = rng.gen_range(-60.0..60.0);
        let outcome = navigator.navigate(down_ray(x, z), &candidates, &picker);

        assert_eq!(outcome, NavigateOutcome::Missed, "seed {} iteration {}", SEED + 1, iteration);
        assert_eq!(navigator.phase(), before);
    }
}

#[test]
fn test_convergence_is_monotonic_and_bounded() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED + 2);
    let picker = ColliderPicker::default();

    for iteration in 0..ITERATIONS {
        let mut world = World::new();
        let candidates = random_targets(&mut rng, &mut world);
        let config = random_config(&mut rng);
        let (speed, epsilon) = (config.speed, config.arrival_epsilon);
        let mut navigator = Navigator::new(config).unwrap();
        let mut camera = random_camera(&mut rng);

        let chosen = &candidates[rng.gen_range(0..candidates.len())];
        navigator.navigate(down_ray(chosen.position.x, chosen.position.z), &candidates, &picker);
        let destination = navigator.destination().unwrap();

        let initial = camera.translation.distance(destination);
        // +1 на погрешность f32 около границы ceil
        let bound = ticks_to_arrive(initial, speed, epsilon) + 1;

        let mut previous = initial;
        let mut ticks = 0;
        while navigator.is_moving() {
            navigator.tick(&mut camera, 1.0 / 60.0);
            ticks += 1;
            let current = camera.translation.distance(destination);
            assert!(
                current < previous || current == 0.0,
                "seed {} iteration {}: distance не уменьшилась ({} → {})",
                SEED + 2,
                iteration,
                previous,
                current
            );
            previous = current;
            assert!(ticks <= bound, "seed {} iteration {}: > {} ticks", SEED + 2, iteration, bound);
        }

        assert!(previous < epsilon);
    }
}

#[test]
fn test_idle_tick_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED + 3);

    for _ in 0..ITERATIONS {
        let config = random_config(&mut rng);
        let look_target = config.look_target;
        let mut navigator = Navigator::new(config).unwrap();
        let mut camera = random_camera(&mut rng).looking_at(Vec3::ZERO, Vec3::Y);
        let before = camera;

        for _ in 0..rng.gen_range(1..20) {
            assert_eq!(navigator.tick(&mut camera, rng.gen_range(0.0..0.1)), TickOutcome::Idle);
        }

        assert_eq!(camera, before);
        assert_eq!(navigator.look_target(), look_target);
    }
}

#[test]
fn test_latest_click_wins_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED + 4);
    let picker = ColliderPicker::default();

    for iteration in 0..ITERATIONS {
        let mut world = World::new();
        let candidates = random_targets(&mut rng, &mut world);
        if candidates.len() < 2 {
            continue;
        }
        let config = NavigatorConfig {
            speed: rng.gen_range(0.01..0.5),
            ..random_config(&mut rng)
        };
        let hover_height = config.hover_height;
        let mut navigator = Navigator::new(config).unwrap();
        let mut camera = random_camera(&mut rng);

        let a = &candidates[0];
        let b = &candidates[candidates.len() - 1];
        navigator.navigate(down_ray(a.position.x, a.position.z), &candidates, &picker);
        for _ in 0..rng.gen_range(0..3) {
            navigator.tick(&mut camera, 1.0 / 60.0);
        }
        navigator.navigate(down_ray(b.position.x, b.position.z), &candidates, &picker);

        let expected = Vec3::new(b.position.x, hover_height, b.position.z);
        assert_eq!(navigator.destination(), Some(expected), "iteration {}", iteration);

        let mut arrived_at = None;
        for _ in 0..10_000 {
            if let TickOutcome::Arrived { target, .. } = navigator.tick(&mut camera, 1.0 / 60.0) {
                arrived_at = Some(target);
                break;
            }
        }
        assert_eq!(arrived_at, Some(b.entity), "iteration {}", iteration);
    }
}
