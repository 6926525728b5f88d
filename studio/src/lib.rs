#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod app;
pub mod character;
pub mod composition;
pub mod environments;
pub mod exercise;
pub mod presentation;
pub mod router;
pub mod settings;

pub use app::state::AppState;

use bevy::prelude::App;

use crate::composition::studio_runtime::configure_studio_app;
use crate::settings::StudioSettings;

pub fn run_studio_app() {
    let startup_settings = load_startup_settings();
    let mut app = App::new();
    configure_studio_app(&mut app, &startup_settings);
    app.run();
}

fn load_startup_settings() -> StudioSettings {
    let startup_settings = settings::load_settings_or_default();
    if let Err(error) = settings::ensure_settings_file_exists(&startup_settings) {
        eprintln!(
            "Failed to ensure startup settings file '{}': {}",
            settings::SETTINGS_FILE_PATH,
            error
        );
    }
    startup_settings
}
