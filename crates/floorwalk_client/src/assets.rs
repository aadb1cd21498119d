//! Asset readiness: текстуры и environment map грузятся асинхронно
//!
//! Рендер их не ждёт. `SceneAssets` только следит за состоянием каждого handle
//! и один раз логирует переход Pending → Ready / Failed.

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;
use floorwalk_navigation::{log_info, log_warning};

pub struct SceneAssetsPlugin;

impl Plugin for SceneAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneAssets>()
            .add_systems(Update, poll_scene_assets);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetReadiness {
    Pending,
    Ready,
    Failed,
}

impl AssetReadiness {
    pub fn from_load_state(state: Option<&LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => AssetReadiness::Ready,
            Some(LoadState::Failed(_)) => AssetReadiness::Failed,
            _ => AssetReadiness::Pending,
        }
    }
}

#[derive(Debug)]
struct TrackedAsset {
    label: String,
    id: UntypedAssetId,
    readiness: AssetReadiness,
}

#[derive(Resource, Debug, Default)]
pub struct SceneAssets {
    tracked: Vec<TrackedAsset>,
}

impl SceneAssets {
    /// Начать следить за handle. Повторный track того же asset'а игнорируется.
    pub fn track(&mut self, label: impl Into<String>, id: impl Into<UntypedAssetId>) -> bool {
        let id = id.into();
        if self.tracked.iter().any(|tracked| tracked.id == id) {
            return false;
        }
        self.tracked.push(TrackedAsset {
            label: label.into(),
            id,
            readiness: AssetReadiness::Pending,
        });
        true
    }

    pub fn readiness(&self, label: &str) -> Option<AssetReadiness> {
        self.tracked
            .iter()
            .find(|tracked| tracked.label == label)
            .map(|tracked| tracked.readiness)
    }

    /// Нет Pending (пустой набор тоже считается settled)
    pub fn all_settled(&self) -> bool {
        self.tracked
            .iter()
            .all(|tracked| tracked.readiness != AssetReadiness::Pending)
    }

    /// Применить новый статус. Возвращает true только при смене статуса.
    fn transition(&mut self, index: usize, readiness: AssetReadiness) -> bool {
        match self.tracked.get_mut(index) {
            Some(tracked) if tracked.readiness != readiness => {
                tracked.readiness = readiness;
                true
            }
            _ => false,
        }
    }
}

fn poll_scene_assets(asset_server: Res<AssetServer>, mut assets: ResMut<SceneAssets>) {
    if assets.all_settled() {
        return;
    }

    for index in 0..assets.tracked.len() {
        let tracked = &assets.tracked[index];
        if tracked.readiness != AssetReadiness::Pending {
            continue;
        }

        let state = asset_server.get_load_state(tracked.id);
        let readiness = AssetReadiness::from_load_state(state.as_ref());
        let label = tracked.label.clone();

        if !assets.transition(index, readiness) {
            continue;
        }
        match (readiness, state) {
            (AssetReadiness::Failed, Some(LoadState::Failed(err))) => {
                log_warning(&format!("asset '{}' failed to load: {} (keeping default visuals)", label, err));
            }
            _ => log_info(&format!("asset '{}' ready", label)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_id(index: u32) -> UntypedAssetId {
        let handle: Handle<Image> = Handle::weak_from_u128(index as u128 + 1);
        handle.id().untyped()
    }

    #[test]
    fn test_track_is_idempotent() {
        let mut assets = SceneAssets::default();
        assert!(assets.track("floor", image_id(0)));
        assert!(!assets.track("floor again", image_id(0)));
        assert!(assets.track("logo", image_id(1)));

        assert_eq!(assets.readiness("floor"), Some(AssetReadiness::Pending));
        assert_eq!(assets.readiness("floor again"), None);
    }

    #[test]
    fn test_transition_only_on_change() {
        let mut assets = SceneAssets::default();
        assets.track("floor", image_id(0));
        assert!(!assets.all_settled());

        assert!(!assets.transition(0, AssetReadiness::Pending));
        assert!(assets.transition(0, AssetReadiness::Ready));
        assert!(!assets.transition(0, AssetReadiness::Ready));
        assert!(assets.all_settled());
    }

    #[test]
    fn test_readiness_from_load_state() {
        assert_eq!(AssetReadiness::from_load_state(None), AssetReadiness::Pending);
        assert_eq!(
            AssetReadiness::from_load_state(Some(&LoadState::Loading)),
            AssetReadiness::Pending
        );
        assert_eq!(
            AssetReadiness::from_load_state(Some(&LoadState::Loaded)),
            AssetReadiness::Ready
        );
    }

    #[test]
    fn test_empty_set_is_settled() {
        assert!(SceneAssets::default().all_settled());
    }
}
