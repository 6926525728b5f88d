//! Scene router: owns which environment is active.
//!
//! Requests carry raw keys and are never rejected. A key that names no
//! environment routes to [`AppState::Blank`].

use bevy::prelude::*;

use crate::AppState;

/// Replace the active scene with the one named by the key.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest(pub String);

impl SceneRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

pub struct SceneRouterPlugin;

impl Plugin for SceneRouterPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SceneRequest>()
            .add_systems(Update, route_scene_requests);
    }
}

pub fn request_scene(next_state: &mut NextState<AppState>, key: &str) {
    next_state.set(AppState::from_key(key));
}

/// Apply this frame's scene requests. Only the last one counts.
pub fn route_scene_requests(
    mut requests: MessageReader<SceneRequest>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(SceneRequest(key)) = requests.read().last() else {
        return;
    };

    let target = AppState::from_key(key);
    if target == *state.get() {
        debug!("Scene '{}' is already active", key);
        return;
    }

    match target {
        AppState::Environment(scene) => info!("Switching to {} environment", scene.label()),
        AppState::Blank => warn!("Scene key '{}' matches no environment; showing nothing", key),
    }
    request_scene(&mut next_state, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::AppExtStates;
    use common::SceneId;

    fn router_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
            .init_state::<AppState>()
            .add_plugins(SceneRouterPlugin);
        app
    }

    #[test]
    fn request_scene_updates_state_machine() {
        let mut app = router_app();

        request_scene(
            &mut app.world_mut().resource_mut::<NextState<AppState>>(),
            "court",
        );
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Environment(SceneId::Court)
        );
    }

    #[test]
    fn last_request_of_a_frame_wins() {
        let mut app = router_app();

        for key in ["court", "", "home", "field", "court"] {
            app.world_mut().write_message(SceneRequest::new(key));
        }
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Environment(SceneId::Court)
        );
    }

    #[test]
    fn unknown_key_blanks_the_composition() {
        let mut app = router_app();

        app.world_mut().write_message(SceneRequest::new("gym"));
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Blank
        );
    }
}
