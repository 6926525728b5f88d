use bevy::prelude::*;
use common::{AnimationName, SceneId};

use super::descriptor::*;
use super::{SceneController, register_environment_lifecycle};

pub const COURT: EnvironmentDescriptor = EnvironmentDescriptor {
    scene: SceneId::Court,
    title: "Healthify Studio",
    clear_color: Color::srgb(0.55, 0.62, 0.7),
    camera: CameraRig {
        position: Vec3::new(0.0, 0.0, 5.0),
        look_at: Vec3::new(0.0, 0.0, -1.0),
        fog: Some(FogRig {
            color: Color::srgb(0.5, 0.0, 0.5),
            start: 0.0,
            end: 130.0,
        }),
    },
    ambient: AmbientRig {
        color: Color::WHITE,
        brightness: 80.0,
    },
    lights: &[
        LightRig::Spot {
            position: Vec3::new(-200.0, 218.0, -100.0),
            intensity: 40_000_000.0,
            outer_angle: 0.1,
            shadows: true,
        },
        LightRig::Spot {
            position: Vec3::new(-250.0, 118.0, -200.0),
            intensity: 4_000_000.0,
            outer_angle: 0.1,
            shadows: false,
        },
        LightRig::Spot {
            position: Vec3::new(250.0, 118.0, 200.0),
            intensity: 4_000_000.0,
            outer_angle: 0.1,
            shadows: false,
        },
    ],
    decor: &[Decor::Model {
        path: "models/court.glb",
        position: Vec3::new(0.0, -2.0, 0.0),
        scale: 1.0,
    }],
    character: CharacterPlacement {
        position: Vec3::new(0.0, -1.6, 2.0),
        scale: 0.014,
        requires_menu: true,
    },
    exercise_menu: Some(ExerciseMenu {
        prompt: "Choose Exercise",
        options: &[AnimationName::JumpRope, AnimationName::Dance, AnimationName::Jump],
        visible_while_running: false,
    }),
    pose_picker: true,
    ambient_audio: None,
};

pub struct CourtScene;

impl SceneController for CourtScene {
    fn register(app: &mut App) {
        register_environment_lifecycle::<Self>(app);
    }

    fn scene_id() -> SceneId {
        SceneId::Court
    }
}
