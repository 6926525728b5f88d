use bevy::app::PluginGroupBuilder;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::state::app::AppExtStates;
use bevy_egui::EguiPlugin;

use crate::AppState;
use crate::character::CharacterPlugin;
use crate::environments::{CourtScene, FieldScene, HomeScene, SceneControllerPlugin};
use crate::exercise::ExercisePlugin;
use crate::presentation::StudioPresentationPlugin;
use crate::router::SceneRouterPlugin;
use crate::settings::{self, SettingsPlugin, SettingsResource, StudioSettings};

const WINDOW_TITLE: &str = "Healthify Studio";

pub fn configure_studio_app(app: &mut App, startup_settings: &StudioSettings) {
    let startup_state = AppState::from_key(&settings::startup_scene_key(startup_settings));

    app.insert_resource(SettingsResource::new(startup_settings.clone()))
        .add_plugins(studio_default_plugins(startup_settings))
        .insert_resource(startup_settings.graphics.winit_settings())
        .add_plugins(EguiPlugin::default())
        .add_plugins(SettingsPlugin)
        .insert_state(startup_state)
        .add_plugins(SceneRouterPlugin)
        .add_plugins(ExercisePlugin)
        .add_plugins(CharacterPlugin)
        .add_plugins(SceneControllerPlugin::<FieldScene>::default())
        .add_plugins(SceneControllerPlugin::<CourtScene>::default())
        .add_plugins(SceneControllerPlugin::<HomeScene>::default())
        .add_plugins(StudioPresentationPlugin);
}

/// Window sized from the settings file; models and audio load from the
/// workspace `assets/` directory.
fn studio_default_plugins(startup_settings: &StudioSettings) -> PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(startup_settings.graphics.primary_window(WINDOW_TITLE)),
            ..default()
        })
        .set(AssetPlugin {
            file_path: concat!(env!("CARGO_MANIFEST_DIR"), "/../assets").into(),
            ..default()
        })
}
