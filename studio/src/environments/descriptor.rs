//! Data record describing one environment.
//!
//! Field, Court and Home differ only in these values; one lifecycle and one
//! set of presenters interpret all three.

use bevy::prelude::{Color, Vec3};
use common::{AnimationName, SceneId};

#[derive(Debug, Clone)]
pub struct EnvironmentDescriptor {
    pub scene: SceneId,
    pub title: &'static str,
    pub clear_color: Color,
    pub camera: CameraRig,
    pub ambient: AmbientRig,
    pub lights: &'static [LightRig],
    pub decor: &'static [Decor],
    pub character: CharacterPlacement,
    pub exercise_menu: Option<ExerciseMenu>,
    /// Offer the free pose drop-down.
    pub pose_picker: bool,
    pub ambient_audio: Option<AmbientAudio>,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fog: Option<FogRig>,
}

#[derive(Debug, Clone, Copy)]
pub struct FogRig {
    pub color: Color,
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct AmbientRig {
    pub color: Color,
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy)]
pub enum LightRig {
    Directional {
        position: Vec3,
        illuminance: f32,
        shadows: bool,
    },
    Spot {
        position: Vec3,
        intensity: f32,
        outer_angle: f32,
        shadows: bool,
    },
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
        range: f32,
        shadows: bool,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum Decor {
    /// Invisible ground that only darkens where shadows land.
    ShadowCatcher { position: Vec3, size: f32, opacity: f32 },
    StarField { radius: f32, depth: f32, count: usize },
    Grid {
        position: Vec3,
        cells: u32,
        spacing: f32,
        color: Color,
    },
    Model {
        path: &'static str,
        position: Vec3,
        scale: f32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterPlacement {
    pub position: Vec3,
    pub scale: f32,
    /// Only show the character once the exercise menu has been opened.
    pub requires_menu: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ExerciseMenu {
    pub prompt: &'static str,
    pub options: &'static [AnimationName],
    /// Keep the options on screen during a countdown.
    pub visible_while_running: bool,
}

/// Looping positional sound tied to one exercise.
#[derive(Debug, Clone, Copy)]
pub struct AmbientAudio {
    pub source: &'static str,
    pub position: Vec3,
    /// Plays only while this exercise is counting down.
    pub gate: AnimationName,
}
