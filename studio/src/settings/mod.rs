use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, PrimaryWindow, WindowMode, WindowResolution};
use bevy::winit::{UpdateMode, WinitSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const SETTINGS_FILE_PATH: &str = "./settings.yaml";
pub const START_SCENE_ENV: &str = "STUDIO_START_SCENE";

const RESOLUTION_PRESETS: [ResolutionSetting; 4] = [
    ResolutionSetting {
        width: 1280,
        height: 720,
    },
    ResolutionSetting {
        width: 1600,
        height: 900,
    },
    ResolutionSetting {
        width: 1920,
        height: 1080,
    },
    ResolutionSetting {
        width: 2560,
        height: 1440,
    },
];

/// Longest countdown the settings modal offers.
pub const MAX_EXERCISE_SECS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WindowModeSetting {
    #[default]
    Windowed,
    Fullscreen,
}

impl WindowModeSetting {
    pub const ALL: [Self; 2] = [Self::Windowed, Self::Fullscreen];

    pub fn to_bevy(self) -> WindowMode {
        match self {
            Self::Windowed => WindowMode::Windowed,
            Self::Fullscreen => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Windowed => "Windowed",
            Self::Fullscreen => "Fullscreen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FpsLimitSetting {
    #[default]
    Default60,
    Monitor,
    Unlimited,
}

impl FpsLimitSetting {
    pub const ALL: [Self; 3] = [Self::Default60, Self::Monitor, Self::Unlimited];

    pub fn to_update_mode(self) -> UpdateMode {
        match self {
            Self::Default60 => UpdateMode::reactive(Duration::from_secs_f64(1.0 / 60.0)),
            Self::Monitor | Self::Unlimited => UpdateMode::Continuous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default60 => "60 FPS",
            Self::Monitor => "Monitor",
            Self::Unlimited => "Unlimited",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionSetting {
    pub width: u32,
    pub height: u32,
}

impl Default for ResolutionSetting {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl ResolutionSetting {
    pub fn presets() -> &'static [Self] {
        &RESOLUTION_PRESETS
    }

    pub fn label(self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    pub window_mode: WindowModeSetting,
    pub resolution: ResolutionSetting,
    pub vsync: bool,
    pub fps_limit: FpsLimitSetting,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            window_mode: WindowModeSetting::Windowed,
            resolution: ResolutionSetting::default(),
            vsync: true,
            fps_limit: FpsLimitSetting::Default60,
        }
    }
}

impl GraphicsSettings {
    pub fn primary_window(&self, title: &str) -> Window {
        let mut window = Window {
            title: title.to_string(),
            resizable: true,
            ..Default::default()
        };
        self.apply_to_window(&mut window);
        window
    }

    pub fn apply_to_window(&self, window: &mut Window) {
        let target_mode = self.window_mode.to_bevy();
        window.mode = target_mode;

        // Borderless fullscreen keeps the monitor's native size.
        if matches!(target_mode, WindowMode::Windowed) {
            window.resolution = WindowResolution::new(self.resolution.width, self.resolution.height);
        }

        window.present_mode = present_mode_for(self);
    }

    pub fn winit_settings(&self) -> WinitSettings {
        let update_mode = self.fps_limit.to_update_mode();
        WinitSettings {
            focused_mode: update_mode,
            unfocused_mode: update_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub ambient_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ambient_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseSettings {
    /// Countdown length started by picking an exercise.
    pub duration_secs: u32,
}

impl Default for ExerciseSettings {
    fn default() -> Self {
        Self { duration_secs: 20 }
    }
}

impl ExerciseSettings {
    /// A zero-length countdown would leave an animation requested with
    /// nothing left on the clock.
    pub fn effective_duration_secs(&self) -> u32 {
        self.duration_secs.clamp(1, MAX_EXERCISE_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Blend time between clips. 0 switches with a hard cut.
    pub crossfade_ms: u64,
    pub playback_speed: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            crossfade_ms: 0,
            playback_speed: 1.0,
        }
    }
}

impl AnimationSettings {
    pub fn crossfade(&self) -> Duration {
        Duration::from_millis(self.crossfade_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct StudioSettings {
    pub graphics: GraphicsSettings,
    pub audio: AudioSettings,
    pub exercise: ExerciseSettings,
    pub animation: AnimationSettings,
    /// Raw scene key, routed like any selector choice.
    pub startup_scene: String,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            graphics: GraphicsSettings::default(),
            audio: AudioSettings::default(),
            exercise: ExerciseSettings::default(),
            animation: AnimationSettings::default(),
            startup_scene: common::SceneId::DEFAULT.key().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsIoError {
    #[error("failed to read settings file: {0}")]
    Read(std::io::Error),
    #[error("failed to write settings file: {0}")]
    Write(std::io::Error),
    #[error("failed to decode YAML settings: {0}")]
    Deserialize(serde_yaml::Error),
    #[error("failed to encode YAML settings: {0}")]
    Serialize(serde_yaml::Error),
}

#[derive(Resource, Clone)]
pub struct SettingsResource {
    pub current: StudioSettings,
    path: PathBuf,
}

impl SettingsResource {
    pub fn new(current: StudioSettings) -> Self {
        Self {
            current,
            path: PathBuf::from(SETTINGS_FILE_PATH),
        }
    }

    pub fn save_to_disk(&self) -> Result<(), SettingsIoError> {
        write_settings_to_path(&self.current, &self.path)
    }
}

/// Audio categories as last applied from settings.
#[derive(Resource, Clone, Debug)]
pub struct AudioCategoryState {
    pub ambient_enabled: bool,
}

impl Default for AudioCategoryState {
    fn default() -> Self {
        Self {
            ambient_enabled: true,
        }
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioCategoryState>()
            .add_systems(Update, apply_runtime_settings);
    }
}

pub fn load_settings_or_default() -> StudioSettings {
    let path = Path::new(SETTINGS_FILE_PATH);

    if !path.exists() {
        return StudioSettings::default();
    }

    match load_settings_from_path(path) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!(
                "Failed to load settings from '{}': {}. Falling back to defaults.",
                SETTINGS_FILE_PATH, error
            );
            StudioSettings::default()
        }
    }
}

pub fn ensure_settings_file_exists(settings: &StudioSettings) -> Result<(), SettingsIoError> {
    let path = Path::new(SETTINGS_FILE_PATH);
    if path.exists() {
        return Ok(());
    }

    write_settings_to_path(settings, path)
}

/// Startup scene key, with `STUDIO_START_SCENE` taking precedence.
pub fn startup_scene_key(settings: &StudioSettings) -> String {
    resolve_startup_scene(settings, std::env::var(START_SCENE_ENV).ok())
}

fn resolve_startup_scene(settings: &StudioSettings, env_override: Option<String>) -> String {
    match env_override {
        Some(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => settings.startup_scene.clone(),
    }
}

pub fn present_mode_for(graphics: &GraphicsSettings) -> PresentMode {
    if matches!(graphics.fps_limit, FpsLimitSetting::Unlimited) {
        PresentMode::AutoNoVsync
    } else if graphics.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    }
}

fn decode_settings(raw: &str) -> Result<StudioSettings, SettingsIoError> {
    serde_yaml::from_str::<StudioSettings>(raw).map_err(SettingsIoError::Deserialize)
}

fn load_settings_from_path(path: &Path) -> Result<StudioSettings, SettingsIoError> {
    let raw = fs::read_to_string(path).map_err(SettingsIoError::Read)?;
    decode_settings(&raw)
}

fn write_settings_to_path(settings: &StudioSettings, path: &Path) -> Result<(), SettingsIoError> {
    let encoded = serde_yaml::to_string(settings).map_err(SettingsIoError::Serialize)?;
    fs::write(path, encoded).map_err(SettingsIoError::Write)
}

fn apply_runtime_settings(
    settings: Res<SettingsResource>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    winit_settings: Option<ResMut<WinitSettings>>,
    mut audio_categories: ResMut<AudioCategoryState>,
    mut last_applied: Local<Option<StudioSettings>>,
) {
    if last_applied.as_ref() == Some(&settings.current) {
        return;
    }

    let graphics = &settings.current.graphics;
    if let Ok(mut window) = windows.single_mut() {
        graphics.apply_to_window(&mut window);
    }

    if let Some(mut winit_settings) = winit_settings {
        *winit_settings = graphics.winit_settings();
    }

    audio_categories.ambient_enabled = settings.current.audio.ambient_enabled;

    *last_applied = Some(settings.current.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let settings = decode_settings("exercise:\n  duration_secs: 10\n").unwrap();

        assert_eq!(settings.exercise.duration_secs, 10);
        assert_eq!(settings.animation, AnimationSettings::default());
        assert_eq!(settings.startup_scene, "field");
        assert!(settings.audio.ambient_enabled);
    }

    #[test]
    fn malformed_yaml_is_a_decode_error() {
        let error = decode_settings("exercise: [1, 2").unwrap_err();
        assert!(matches!(error, SettingsIoError::Deserialize(_)));
    }

    #[test]
    fn settings_survive_yaml_encoding() {
        let mut settings = StudioSettings::default();
        settings.startup_scene = "court".to_string();
        settings.animation.crossfade_ms = 250;

        let encoded = serde_yaml::to_string(&settings).unwrap();
        assert_eq!(decode_settings(&encoded).unwrap(), settings);
    }

    #[test]
    fn exercise_duration_is_clamped() {
        let zero = ExerciseSettings { duration_secs: 0 };
        let huge = ExerciseSettings { duration_secs: 10_000 };

        assert_eq!(zero.effective_duration_secs(), 1);
        assert_eq!(huge.effective_duration_secs(), MAX_EXERCISE_SECS);
        assert_eq!(ExerciseSettings::default().effective_duration_secs(), 20);
    }

    #[test]
    fn primary_window_reflects_graphics_settings() {
        let mut graphics = GraphicsSettings::default();
        graphics.resolution = ResolutionSetting {
            width: 1600,
            height: 900,
        };

        let window = graphics.primary_window("Healthify Studio");
        assert_eq!(window.title, "Healthify Studio");
        assert_eq!(window.mode, WindowMode::Windowed);
        assert_eq!(window.resolution.physical_width(), 1600);
        assert_eq!(window.present_mode, PresentMode::AutoVsync);

        graphics.fps_limit = FpsLimitSetting::Unlimited;
        assert_eq!(
            graphics.primary_window("Healthify Studio").present_mode,
            PresentMode::AutoNoVsync
        );
    }

    #[test]
    fn env_override_wins_over_file_scene() {
        let settings = StudioSettings::default();

        assert_eq!(resolve_startup_scene(&settings, None), "field");
        assert_eq!(resolve_startup_scene(&settings, Some(" home ".into())), "home");
        assert_eq!(resolve_startup_scene(&settings, Some("   ".into())), "field");
    }
}
