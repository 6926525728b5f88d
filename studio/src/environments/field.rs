use bevy::prelude::*;
use common::SceneId;

use super::descriptor::*;
use super::{SceneController, register_environment_lifecycle};

pub const FIELD: EnvironmentDescriptor = EnvironmentDescriptor {
    scene: SceneId::Field,
    title: "Healthify Studio",
    clear_color: Color::BLACK,
    camera: CameraRig {
        position: Vec3::new(0.0, 3.0, 18.0),
        look_at: Vec3::new(0.0, -4.0, -17.0),
        fog: None,
    },
    // Hemisphere light: black sky over a green ground.
    ambient: AmbientRig {
        color: Color::srgb(0.25, 0.6, 0.25),
        brightness: 300.0,
    },
    lights: &[LightRig::Directional {
        position: Vec3::new(-8.0, 20.0, 8.0),
        illuminance: 6_000.0,
        shadows: true,
    }],
    decor: &[
        Decor::ShadowCatcher {
            position: Vec3::new(0.0, -10.0, 0.0),
            size: 500.0,
            opacity: 0.2,
        },
        Decor::StarField {
            radius: 100.0,
            depth: 50.0,
            count: 15_000,
        },
        Decor::Grid {
            position: Vec3::new(0.0, -10.0, 0.0),
            cells: 100,
            spacing: 1.0,
            color: Color::srgb(0.0, 0.5, 0.0),
        },
    ],
    character: CharacterPlacement {
        position: Vec3::new(0.0, -10.0, -17.0),
        scale: 0.08,
        requires_menu: false,
    },
    exercise_menu: None,
    pose_picker: true,
    ambient_audio: None,
};

pub struct FieldScene;

impl SceneController for FieldScene {
    fn register(app: &mut App) {
        register_environment_lifecycle::<Self>(app);
    }

    fn scene_id() -> SceneId {
        SceneId::Field
    }
}
