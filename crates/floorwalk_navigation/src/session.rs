//! Navigation session: явный lifecycle вместо глобальных scene/camera объектов
//!
//! `create` - Navigator resource + camera entity + target entities.
//! `teardown` - despawn всего, что создали, и удаление resources.
//! Повторный `create` сначала закрывает старую session.

use bevy::prelude::*;

use crate::components::{target_bundle, NavigatorCamera};
use crate::error::NavigationResult;
use crate::layout::SceneLayout;
use crate::logger;
use crate::navigator::Navigator;

/// Aspect по умолчанию до первого resize (client перезапишет)
const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Handles всего, что принадлежит текущей session
#[derive(Resource, Debug, Clone)]
pub struct NavigationSession {
    layout_name: String,
    camera: Entity,
    targets: Vec<Entity>,
}

impl NavigationSession {
    pub fn create(world: &mut World, layout: &SceneLayout) -> NavigationResult<Entity> {
        layout.validate()?;
        let navigator = Navigator::new(layout.navigator.clone())?;

        if world.contains_resource::<NavigationSession>() {
            logger::log_warning("NavigationSession::create: previous session still alive, tearing down");
            Self::teardown(world);
        }

        let camera_transform = initial_camera_transform(layout);
        let rig = layout.camera.rig(DEFAULT_ASPECT);

        let camera = world
            .spawn((
                Name::new("NavigatorCamera"),
                NavigatorCamera,
                camera_transform,
                rig,
            ))
            .id();
        let targets: Vec<Entity> = layout
            .targets()
            .into_iter()
            .map(|(target, position)| world.spawn(target_bundle(target, position)).id())
            .collect();

        logger::log_info(&format!(
            "NavigationSession: '{}' created, {} targets, camera at {}",
            layout.name,
            targets.len(),
            camera_transform.translation
        ));

        world.insert_resource(navigator);
        world.insert_resource(NavigationSession {
            layout_name: layout.name.clone(),
            camera,
            targets,
        });

        Ok(camera)
    }

    /// Закрыть session. false если закрывать нечего.
    pub fn teardown(world: &mut World) -> bool {
        let Some(session) = world.remove_resource::<NavigationSession>() else {
            return false;
        };

        if let Some(mut navigator) = world.remove_resource::<Navigator>() {
            navigator.cancel();
        }

        let mut despawned = 0;
        for entity in std::iter::once(session.camera).chain(session.targets.iter().copied()) {
            if world.despawn(entity) {
                despawned += 1;
            }
        }

        logger::log_info(&format!(
            "NavigationSession: '{}' torn down, {} entities despawned",
            session.layout_name, despawned
        ));
        true
    }

    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    pub fn camera(&self) -> Entity {
        self.camera
    }

    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }
}

/// Стартовая позиция из layout, взгляд на look target
fn initial_camera_transform(layout: &SceneLayout) -> Transform {
    let position = layout.camera.position;
    let look_target = layout.navigator.look_target;
    if (look_target - position).length_squared() < 1e-8 {
        return Transform::from_translation(position);
    }
    Transform::from_translation(position).looking_at(look_target, Vec3::Y)
}
