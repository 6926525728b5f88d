//! Environment lifecycle: every scene mounts the same way, from its
//! descriptor, and tears down the same way.

pub mod court;
pub mod descriptor;
pub mod field;
pub mod home;
pub mod view;

pub use court::CourtScene;
pub use descriptor::EnvironmentDescriptor;
pub use field::FieldScene;
pub use home::HomeScene;
pub use view::{AffordanceView, EnvironmentView, ambient_audio_active, describe};

use bevy::prelude::*;
use bevy::state::prelude::{OnEnter, OnExit};
use common::SceneId;

use crate::AppState;
use crate::exercise;
use crate::settings::SettingsResource;

pub trait SceneController: Send + Sync + 'static {
    fn register(app: &mut App);

    fn scene_id() -> SceneId;

    fn descriptor() -> &'static EnvironmentDescriptor {
        descriptor_for(Self::scene_id())
    }
}

pub struct SceneControllerPlugin<C: SceneController> {
    _marker: std::marker::PhantomData<C>,
}

impl<C: SceneController> Default for SceneControllerPlugin<C> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<C: SceneController> Plugin for SceneControllerPlugin<C> {
    fn build(&self, app: &mut App) {
        C::register(app);
    }
}

pub fn descriptor_for(scene: SceneId) -> &'static EnvironmentDescriptor {
    match scene {
        SceneId::Field => &field::FIELD,
        SceneId::Court => &court::COURT,
        SceneId::Home => &home::HOME,
    }
}

/// Root of everything an environment spawns. Despawning it tears the
/// environment down.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnvironmentRoot {
    pub scene: SceneId,
}

impl EnvironmentRoot {
    pub fn descriptor(&self) -> &'static EnvironmentDescriptor {
        descriptor_for(self.scene)
    }
}

pub fn register_environment_lifecycle<C: SceneController>(app: &mut App) {
    let state = AppState::Environment(C::scene_id());
    app.add_systems(OnEnter(state), setup_environment::<C>)
        .add_systems(OnExit(state), cleanup_environment);
}

fn setup_environment<C: SceneController>(mut commands: Commands, settings: Res<SettingsResource>) {
    let scene = C::scene_id();
    let duration_secs = settings.current.exercise.effective_duration_secs();

    info!(
        "Setting up {} environment ({}s exercises)",
        scene.label(),
        duration_secs
    );

    exercise::mount_session(&mut commands, duration_secs);
    commands.spawn((
        EnvironmentRoot { scene },
        Transform::default(),
        Visibility::Visible,
    ));
}

fn cleanup_environment(mut commands: Commands, roots: Query<(Entity, &EnvironmentRoot)>) {
    for (entity, root) in &roots {
        info!("Cleaning up {} environment", root.scene.label());
        commands.entity(entity).try_despawn();
    }

    exercise::unmount_session(&mut commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::ExerciseSession;
    use crate::settings::StudioSettings;
    use bevy::state::app::AppExtStates;

    fn count_roots(world: &mut World, scene: SceneId) -> usize {
        let mut query = world.query::<&EnvironmentRoot>();
        query.iter(world).filter(|root| root.scene == scene).count()
    }

    #[test]
    fn descriptors_match_their_scene() {
        for scene in SceneId::ALL {
            assert_eq!(descriptor_for(scene).scene, scene);
        }
        assert_eq!(CourtScene::descriptor().scene, SceneId::Court);
        assert_eq!(HomeScene::scene_id(), SceneId::Home);
    }

    #[test]
    fn field_sky_carries_the_full_star_field() {
        let stars: Vec<usize> = field::FIELD
            .decor
            .iter()
            .filter_map(|decor| match decor {
                descriptor::Decor::StarField { count, .. } => Some(*count),
                _ => None,
            })
            .collect();
        assert_eq!(stars, [15_000]);
    }

    #[test]
    fn environment_mounts_and_tears_down_its_session() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
            .insert_resource(SettingsResource::new(StudioSettings::default()))
            .init_state::<AppState>();

        FieldScene::register(&mut app);

        app.update();
        assert_eq!(count_roots(app.world_mut(), SceneId::Field), 1);
        assert_eq!(
            app.world().resource::<ExerciseSession>().duration_secs(),
            20
        );

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Blank);
        app.update();

        assert_eq!(count_roots(app.world_mut(), SceneId::Field), 0);
        assert!(!app.world().contains_resource::<ExerciseSession>());
        assert!(!app.world().contains_resource::<exercise::ExerciseTick>());
    }
}
