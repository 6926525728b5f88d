//! Everything that needs a window: stage, ambient audio and the egui HUD.
//! Headless apps leave this plugin out.

pub mod audio;
pub mod hud;
pub mod stage;

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::state::prelude::OnEnter;
use bevy_egui::EguiPrimaryContextPass;

use crate::AppState;
use crate::exercise::ExerciseSystems;

pub struct StudioPresentationPlugin;

impl Plugin for StudioPresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<hud::HudUiState>()
            .insert_resource(GlobalAmbientLight {
                color: Color::WHITE,
                brightness: 0.3,
                affects_lightmapped_meshes: true,
            })
            .add_systems(Startup, stage::setup_stage_camera)
            .add_systems(OnEnter(AppState::Blank), stage::clear_stage)
            .add_systems(
                Update,
                (
                    stage::spawn_environment_stage,
                    (stage::sync_character_visibility, audio::sync_ambient_audio)
                        .after(ExerciseSystems),
                    stage::draw_grid_decor,
                    hud::toggle_settings_modal_with_escape,
                ),
            )
            .add_systems(
                Update,
                hud::reset_hud_state.run_if(state_changed::<AppState>),
            )
            .add_systems(EguiPrimaryContextPass, hud::draw_hud_egui);
    }
}
