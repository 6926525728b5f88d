//! Turns an environment descriptor into camera, lights, decor and the
//! character.

use bevy::camera::ClearColorConfig;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

use crate::character::{CharacterClipPlayer, CharacterRoot, stacy_scene};
use crate::environments::descriptor::{
    CameraRig, CharacterPlacement, Decor, EnvironmentDescriptor, LightRig,
};
use crate::environments::{EnvironmentRoot, describe};
use crate::exercise::ExerciseSession;

const STAR_RADIUS: f32 = 0.15;

/// The one camera, re-rigged by each environment.
#[derive(Component)]
pub struct StageCamera;

/// Ground grid drawn with gizmos every frame.
#[derive(Component)]
pub struct GridDecor {
    cells: u32,
    spacing: f32,
    color: Color,
}

pub fn setup_stage_camera(mut commands: Commands) {
    commands.spawn((
        StageCamera,
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..Default::default()
        },
        SpatialListener::new(0.3),
        Transform::from_xyz(0.0, 3.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn spawn_environment_stage(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<GlobalAmbientLight>,
    new_roots: Query<(Entity, &EnvironmentRoot), Added<EnvironmentRoot>>,
    mut cameras: Query<(Entity, &mut Camera, &mut Transform), With<StageCamera>>,
) {
    for (root_entity, root) in &new_roots {
        let descriptor = root.descriptor();
        debug!("Staging {} environment", descriptor.scene.label());

        for (camera_entity, mut camera, mut transform) in &mut cameras {
            rig_camera(
                &mut commands,
                camera_entity,
                &mut camera,
                &mut transform,
                descriptor,
            );
        }

        ambient.color = descriptor.ambient.color;
        ambient.brightness = descriptor.ambient.brightness;

        commands.entity(root_entity).with_children(|stage| {
            for light in descriptor.lights {
                spawn_light(stage, *light);
            }
            for decor in descriptor.decor {
                spawn_decor(stage, *decor, &asset_server, &mut meshes, &mut materials);
            }
            spawn_character(stage, descriptor.character, &asset_server);
        });
    }
}

/// Blank composition: nothing but the cleared camera.
pub fn clear_stage(mut commands: Commands, mut cameras: Query<(Entity, &mut Camera), With<StageCamera>>) {
    for (entity, mut camera) in &mut cameras {
        camera.clear_color = ClearColorConfig::Custom(Color::BLACK);
        commands.entity(entity).remove::<DistanceFog>();
    }
}

fn rig_camera(
    commands: &mut Commands,
    camera_entity: Entity,
    camera: &mut Camera,
    transform: &mut Transform,
    descriptor: &EnvironmentDescriptor,
) {
    let CameraRig {
        position,
        look_at,
        fog,
    } = descriptor.camera;

    camera.clear_color = ClearColorConfig::Custom(descriptor.clear_color);
    *transform = Transform::from_translation(position).looking_at(look_at, Vec3::Y);

    match fog {
        Some(fog) => {
            commands.entity(camera_entity).insert(DistanceFog {
                color: fog.color,
                falloff: FogFalloff::Linear {
                    start: fog.start,
                    end: fog.end,
                },
                ..default()
            });
        }
        None => {
            commands.entity(camera_entity).remove::<DistanceFog>();
        }
    }
}

fn spawn_light(stage: &mut ChildSpawnerCommands, light: LightRig) {
    match light {
        LightRig::Directional {
            position,
            illuminance,
            shadows,
        } => {
            stage.spawn((
                DirectionalLight {
                    illuminance,
                    shadows_enabled: shadows,
                    ..default()
                },
                Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
            ));
        }
        LightRig::Spot {
            position,
            intensity,
            outer_angle,
            shadows,
        } => {
            stage.spawn((
                SpotLight {
                    intensity,
                    outer_angle,
                    inner_angle: outer_angle * 0.8,
                    range: position.length() * 2.0,
                    shadows_enabled: shadows,
                    ..default()
                },
                Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
            ));
        }
        LightRig::Point {
            position,
            color,
            intensity,
            range,
            shadows,
        } => {
            stage.spawn((
                PointLight {
                    color,
                    intensity,
                    range,
                    shadows_enabled: shadows,
                    ..default()
                },
                Transform::from_translation(position),
            ));
        }
    }
}

fn spawn_decor(
    stage: &mut ChildSpawnerCommands,
    decor: Decor,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    match decor {
        Decor::ShadowCatcher {
            position,
            size,
            opacity,
        } => {
            stage.spawn((
                Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(0.0, 0.0, 0.0, opacity),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    ..default()
                })),
                Transform::from_translation(position),
            ));
        }
        Decor::StarField {
            radius,
            depth,
            count,
        } => {
            let mesh = meshes.add(Sphere::new(STAR_RADIUS).mesh().uv(6, 4));
            let material = materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..default()
            });
            let mut rng = rand::thread_rng();
            for _ in 0..count {
                let direction = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                )
                .normalize_or_zero();
                if direction == Vec3::ZERO {
                    continue;
                }
                let distance = radius + rng.gen_range(0.0..depth);
                stage.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(direction * distance),
                ));
            }
        }
        Decor::Grid {
            position,
            cells,
            spacing,
            color,
        } => {
            stage.spawn((
                GridDecor {
                    cells,
                    spacing,
                    color,
                },
                Transform::from_translation(position),
            ));
        }
        Decor::Model {
            path,
            position,
            scale,
        } => {
            stage.spawn((
                SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path))),
                Transform::from_translation(position).with_scale(Vec3::splat(scale)),
            ));
        }
    }
}

fn spawn_character(
    stage: &mut ChildSpawnerCommands,
    placement: CharacterPlacement,
    asset_server: &AssetServer,
) {
    stage.spawn((
        CharacterRoot,
        CharacterClipPlayer::default(),
        stacy_scene(asset_server),
        Transform::from_translation(placement.position)
            .with_scale(Vec3::splat(placement.scale)),
        if placement.requires_menu {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        },
    ));
}

pub fn sync_character_visibility(
    session: Option<Res<ExerciseSession>>,
    roots: Query<&EnvironmentRoot>,
    mut characters: Query<&mut Visibility, With<CharacterRoot>>,
) {
    let (Some(session), Ok(root)) = (session, roots.single()) else {
        return;
    };
    if !session.is_changed() {
        return;
    }

    let target = if describe(root.descriptor(), &session).character_visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut characters {
        visibility.set_if_neq(target);
    }
}

pub fn draw_grid_decor(mut gizmos: Gizmos, grids: Query<(&GridDecor, &GlobalTransform)>) {
    for (grid, transform) in &grids {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        gizmos.grid(
            Isometry3d::new(translation, rotation * Quat::from_rotation_x(FRAC_PI_2)),
            UVec2::splat(grid.cells),
            Vec2::splat(grid.spacing),
            grid.color,
        );
    }
}
