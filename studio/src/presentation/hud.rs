use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use common::{AnimationName, SceneId};

use crate::AppState;
use crate::environments::{AffordanceView, EnvironmentRoot, EnvironmentView, describe};
use crate::exercise::{Affordance, ExerciseCommand, ExerciseSession, SessionPhase};
use crate::router::SceneRequest;
use crate::settings::{
    self, FpsLimitSetting, MAX_EXERCISE_SECS, ResolutionSetting, SettingsResource, StudioSettings,
    WindowModeSetting,
};

const SCENE_PLACEHOLDER: &str = "Select Scene";
const AFFORDANCE_TEXT_SIZE: f32 = 26.0;
const COUNTDOWN_TEXT_SIZE: f32 = 96.0;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Graphics,
    Audio,
    Exercise,
}

#[derive(Resource, Default)]
pub struct HudUiState {
    settings_open: bool,
    settings_tab: SettingsTab,
    draft: StudioSettings,
}

impl HudUiState {
    fn open_settings(&mut self, current: &StudioSettings) {
        self.settings_open = true;
        self.settings_tab = SettingsTab::Graphics;
        self.draft = current.clone();
    }
}

pub fn reset_hud_state(mut hud_state: ResMut<HudUiState>, settings: Res<SettingsResource>) {
    hud_state.settings_open = false;
    hud_state.settings_tab = SettingsTab::Graphics;
    hud_state.draft = settings.current.clone();
}

pub fn toggle_settings_modal_with_escape(
    keys: Res<ButtonInput<KeyCode>>,
    settings_resource: Res<SettingsResource>,
    mut hud_state: ResMut<HudUiState>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    if hud_state.settings_open {
        hud_state.settings_open = false;
    } else {
        hud_state.open_settings(&settings_resource.current);
    }
}

pub fn draw_hud_egui(
    mut contexts: EguiContexts,
    mut hud_state: ResMut<HudUiState>,
    mut settings_resource: ResMut<SettingsResource>,
    app_state: Res<State<AppState>>,
    session: Option<Res<ExerciseSession>>,
    roots: Query<&EnvironmentRoot>,
    mut scene_requests: MessageWriter<SceneRequest>,
    mut exercise_commands: MessageWriter<ExerciseCommand>,
    mut theme_initialized: Local<bool>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !*theme_initialized {
        apply_studio_hud_theme(ctx);
        *theme_initialized = true;
    }

    if let (Some(session), Ok(root)) = (session.as_deref(), roots.single()) {
        let view = describe(root.descriptor(), session);
        draw_title(ctx, view.title);
        draw_countdown(ctx, view.countdown);
        draw_exercise_menu(ctx, session, &view, &mut exercise_commands);
        if let Some(pose) = view.pose_picker {
            let running = session.phase() == SessionPhase::Running;
            draw_pose_picker(ctx, pose, running, &mut exercise_commands);
        }
    }

    draw_scene_selector(ctx, app_state.get().scene(), &mut scene_requests);
    draw_bottom_bar(&mut hud_state, &settings_resource, ctx);

    if hud_state.settings_open {
        draw_settings_modal(&mut hud_state, &mut settings_resource, ctx);
    }
}

fn apply_studio_hud_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(14);
    style.visuals.window_corner_radius = egui::CornerRadius::same(12);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(10);
    ctx.set_style(style);
}

fn draw_title(ctx: &egui::Context, title: &str) {
    egui::Area::new(egui::Id::new("hud_title"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 18.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(title)
                    .size(30.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            );
        });
}

fn draw_countdown(ctx: &egui::Context, countdown: Option<u32>) {
    let Some(seconds) = countdown else {
        return;
    };

    egui::Area::new(egui::Id::new("hud_countdown"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 70.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(seconds.to_string())
                    .size(COUNTDOWN_TEXT_SIZE)
                    .strong()
                    .color(egui::Color32::from_rgb(255, 196, 0)),
            );
        });
}

fn draw_exercise_menu(
    ctx: &egui::Context,
    session: &ExerciseSession,
    view: &EnvironmentView,
    exercise_commands: &mut MessageWriter<ExerciseCommand>,
) {
    if view.start_prompt.is_none() && view.exercise_options.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("hud_exercise_menu"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -110.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(prompt) = &view.start_prompt {
                    draw_affordance(ui, session, prompt, exercise_commands);
                }
                for option in &view.exercise_options {
                    draw_affordance(ui, session, option, exercise_commands);
                }
            });
        });
}

fn draw_affordance(
    ui: &mut egui::Ui,
    session: &ExerciseSession,
    affordance: &AffordanceView,
    exercise_commands: &mut MessageWriter<ExerciseCommand>,
) {
    let response = ui.add(
        egui::Button::new(
            egui::RichText::new(affordance.label)
                .size(AFFORDANCE_TEXT_SIZE * affordance.scale)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .frame(false),
    );

    let hovered = response.hovered();
    if hovered != session.is_hovered(affordance.affordance) {
        exercise_commands.write(ExerciseCommand::Hover(affordance.affordance, hovered));
    }

    if response.clicked() {
        exercise_commands.write(match affordance.affordance {
            Affordance::StartExercise => ExerciseCommand::StartExercise,
            Affordance::Exercise(name) => ExerciseCommand::Select(name),
        });
    }
}

fn draw_pose_picker(
    ctx: &egui::Context,
    pose: Option<AnimationName>,
    running: bool,
    exercise_commands: &mut MessageWriter<ExerciseCommand>,
) {
    egui::Area::new(egui::Id::new("hud_pose_picker"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
        .show(ctx, |ui| {
            ui.add_enabled_ui(!running, |ui| {
                let selected = pose.unwrap_or(AnimationName::DEFAULT);
                egui::ComboBox::from_id_salt("hud_pose_picker_combo")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for name in AnimationName::ALL {
                            if ui.selectable_label(selected == name, name.label()).clicked()
                                && pose != Some(name)
                            {
                                exercise_commands.write(ExerciseCommand::PickPose(name));
                            }
                        }
                    });
            });
        });
}

fn draw_scene_selector(
    ctx: &egui::Context,
    active: Option<SceneId>,
    scene_requests: &mut MessageWriter<SceneRequest>,
) {
    egui::Area::new(egui::Id::new("hud_scene_selector"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(ctx, |ui| {
            egui::ComboBox::from_id_salt("hud_scene_selector_combo")
                .selected_text(active.map_or(SCENE_PLACEHOLDER, |scene| scene.label()))
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(active.is_none(), SCENE_PLACEHOLDER)
                        .clicked()
                    {
                        scene_requests.write(SceneRequest::new(""));
                    }
                    for scene in SceneId::ALL {
                        if ui
                            .selectable_label(active == Some(scene), scene.label())
                            .clicked()
                        {
                            scene_requests.write(SceneRequest::new(scene.key()));
                        }
                    }
                });
        });
}

fn draw_bottom_bar(
    hud_state: &mut HudUiState,
    settings_resource: &SettingsResource,
    ctx: &egui::Context,
) {
    egui::TopBottomPanel::bottom("hud_bottom_bar")
        .resizable(false)
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal_centered(|ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 128))
                    .corner_radius(egui::CornerRadius::same(12))
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        if ui
                            .add_sized(egui::vec2(42.0, 42.0), egui::Button::new("Menu"))
                            .clicked()
                        {
                            hud_state.open_settings(&settings_resource.current);
                        }
                    });
            });
            ui.add_space(8.0);
        });
}

fn draw_settings_modal(
    hud_state: &mut HudUiState,
    settings_resource: &mut SettingsResource,
    ctx: &egui::Context,
) {
    let mut window_open = hud_state.settings_open;
    let mut should_apply = false;
    let mut should_close = false;

    egui::Window::new("Settings")
        .open(&mut window_open)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .default_width(520.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut hud_state.settings_tab,
                    SettingsTab::Graphics,
                    "Graphics",
                );
                ui.selectable_value(&mut hud_state.settings_tab, SettingsTab::Audio, "Audio");
                ui.selectable_value(
                    &mut hud_state.settings_tab,
                    SettingsTab::Exercise,
                    "Exercise",
                );
            });

            ui.separator();

            match hud_state.settings_tab {
                SettingsTab::Graphics => draw_graphics_settings_tab(ui, &mut hud_state.draft),
                SettingsTab::Audio => draw_audio_settings_tab(ui, &mut hud_state.draft),
                SettingsTab::Exercise => draw_exercise_settings_tab(ui, &mut hud_state.draft),
            }

            ui.separator();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                should_apply = ui.button("Apply").clicked();
                should_close = ui.button("Close").clicked();
            });
        });

    if should_apply {
        settings_resource.current = hud_state.draft.clone();
        if let Err(error) = settings_resource.save_to_disk() {
            warn!(
                "Failed to save settings file '{}': {}",
                settings::SETTINGS_FILE_PATH,
                error
            );
        }
    }

    if should_close {
        window_open = false;
    }

    if !window_open {
        hud_state.draft = settings_resource.current.clone();
    }
    hud_state.settings_open = window_open;
}

fn draw_graphics_settings_tab(ui: &mut egui::Ui, draft: &mut StudioSettings) {
    egui::ComboBox::from_label("Window mode")
        .selected_text(draft.graphics.window_mode.label())
        .show_ui(ui, |ui| {
            for option in WindowModeSetting::ALL {
                ui.selectable_value(&mut draft.graphics.window_mode, option, option.label());
            }
        });

    egui::ComboBox::from_label("Resolution")
        .selected_text(draft.graphics.resolution.label())
        .show_ui(ui, |ui| {
            for option in ResolutionSetting::presets() {
                ui.selectable_value(&mut draft.graphics.resolution, *option, option.label());
            }
        });

    egui::ComboBox::from_label("FPS limit")
        .selected_text(draft.graphics.fps_limit.label())
        .show_ui(ui, |ui| {
            for option in FpsLimitSetting::ALL {
                ui.selectable_value(&mut draft.graphics.fps_limit, option, option.label());
            }
        });

    ui.checkbox(&mut draft.graphics.vsync, "VSync");
}

fn draw_audio_settings_tab(ui: &mut egui::Ui, draft: &mut StudioSettings) {
    ui.checkbox(&mut draft.audio.ambient_enabled, "Ambient music");
}

fn draw_exercise_settings_tab(ui: &mut egui::Ui, draft: &mut StudioSettings) {
    ui.add(
        egui::Slider::new(&mut draft.exercise.duration_secs, 1..=MAX_EXERCISE_SECS)
            .text("Exercise length (s)"),
    );
    ui.add(
        egui::Slider::new(&mut draft.animation.crossfade_ms, 0..=1_000)
            .text("Animation crossfade (ms)"),
    );
    ui.add(
        egui::Slider::new(&mut draft.animation.playback_speed, 0.25..=2.0)
            .text("Playback speed"),
    );
    ui.label("Exercise changes take effect on the next scene switch.");
}
