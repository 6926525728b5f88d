//! Exercise flow of the mounted environment: menu, countdown and the
//! animation it requests.

pub mod session;
pub mod timer;

pub use session::{Affordance, ExerciseSession, SessionPhase, SessionTick};
pub use timer::{ExerciseTick, advance_exercise_timer, apply_exercise_commands};

use bevy::prelude::*;
use common::AnimationName;

/// User intents aimed at the active session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseCommand {
    StartExercise,
    Select(AnimationName),
    PickPose(AnimationName),
    Hover(Affordance, bool),
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExerciseSystems;

pub struct ExercisePlugin;

impl Plugin for ExercisePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ExerciseCommand>().add_systems(
            Update,
            (apply_exercise_commands, advance_exercise_timer)
                .chain()
                .in_set(ExerciseSystems),
        );
    }
}

/// Give a freshly entered environment its own session.
pub fn mount_session(commands: &mut Commands, duration_secs: u32) {
    commands.insert_resource(ExerciseSession::new(duration_secs));
    commands.insert_resource(ExerciseTick::default());
}

/// Drop the session together with its pending tick.
pub fn unmount_session(commands: &mut Commands) {
    commands.remove_resource::<ExerciseTick>();
    commands.remove_resource::<ExerciseSession>();
}
