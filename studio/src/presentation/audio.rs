use bevy::prelude::*;

use crate::environments::{EnvironmentRoot, ambient_audio_active};
use crate::exercise::ExerciseSession;
use crate::settings::AudioCategoryState;

#[derive(Component)]
pub struct AmbientAudioEmitter;

/// Start or stop the environment's looping sound to match the session.
pub fn sync_ambient_audio(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    categories: Res<AudioCategoryState>,
    session: Option<Res<ExerciseSession>>,
    roots: Query<(Entity, &EnvironmentRoot)>,
    emitters: Query<Entity, With<AmbientAudioEmitter>>,
) {
    let Ok((root_entity, root)) = roots.single() else {
        return;
    };
    let descriptor = root.descriptor();
    let Some(audio) = descriptor.ambient_audio else {
        return;
    };

    let should_play = categories.ambient_enabled
        && session.is_some_and(|session| ambient_audio_active(descriptor, &session));

    if should_play && emitters.is_empty() {
        debug!("Starting ambient audio '{}'", audio.source);
        let emitter = commands
            .spawn((
                AmbientAudioEmitter,
                AudioPlayer::new(asset_server.load(audio.source)),
                PlaybackSettings::LOOP.with_spatial(true),
                Transform::from_translation(audio.position),
            ))
            .id();
        commands.entity(root_entity).add_child(emitter);
    } else if !should_play {
        for entity in &emitters {
            debug!("Stopping ambient audio '{}'", audio.source);
            commands.entity(entity).try_despawn();
        }
    }
}
