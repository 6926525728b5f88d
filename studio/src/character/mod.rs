pub mod animation;
pub mod player;
pub mod registry;
pub mod types;

pub use animation::{
    StacyAnimationLibrary, apply_character_animation_changes, bind_character_animation_players,
    initialize_stacy_animation_library, load_stacy_animation_library, sync_requested_animation,
};
pub use player::{CharacterClipPlayer, ClipCut};
pub use registry::AnimationRegistry;
pub use types::{CharacterRoot, STACY_MODEL_PATH, stacy_scene};

use bevy::prelude::*;

use crate::exercise::ExerciseSystems;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_stacy_animation_library).add_systems(
            Update,
            (
                initialize_stacy_animation_library,
                sync_requested_animation,
                bind_character_animation_players,
                apply_character_animation_changes,
            )
                .chain()
                .after(ExerciseSystems),
        );
    }
}
