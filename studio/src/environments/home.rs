use bevy::prelude::*;
use common::{AnimationName, SceneId};

use super::descriptor::*;
use super::{SceneController, register_environment_lifecycle};

pub const HOME: EnvironmentDescriptor = EnvironmentDescriptor {
    scene: SceneId::Home,
    title: "Healthify Studio",
    clear_color: Color::srgb(0.12, 0.09, 0.07),
    camera: CameraRig {
        position: Vec3::new(0.0, 1.6, 6.0),
        look_at: Vec3::new(0.0, 1.0, 0.0),
        fog: None,
    },
    ambient: AmbientRig {
        color: Color::srgb(1.0, 0.92, 0.8),
        brightness: 250.0,
    },
    lights: &[
        LightRig::Point {
            position: Vec3::new(1.5, 3.2, 1.5),
            color: Color::srgb(1.0, 0.85, 0.65),
            intensity: 600_000.0,
            range: 30.0,
            shadows: true,
        },
        LightRig::Directional {
            position: Vec3::new(-6.0, 10.0, 4.0),
            illuminance: 1_500.0,
            shadows: false,
        },
    ],
    decor: &[Decor::Model {
        path: "models/home.glb",
        position: Vec3::ZERO,
        scale: 1.0,
    }],
    character: CharacterPlacement {
        position: Vec3::ZERO,
        scale: 0.01,
        requires_menu: false,
    },
    exercise_menu: Some(ExerciseMenu {
        prompt: "Choose Exercise",
        options: &[
            AnimationName::JumpRope,
            AnimationName::Dance,
            AnimationName::Jump,
            AnimationName::Golf,
        ],
        visible_while_running: true,
    }),
    pose_picker: false,
    ambient_audio: Some(AmbientAudio {
        source: "audio/dance_loop.ogg",
        position: Vec3::new(2.0, 1.0, -1.0),
        gate: AnimationName::Dance,
    }),
};

pub struct HomeScene;

impl SceneController for HomeScene {
    fn register(app: &mut App) {
        register_environment_lifecycle::<Self>(app);
    }

    fn scene_id() -> SceneId {
        SceneId::Home
    }
}
