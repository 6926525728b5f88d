use bevy::prelude::*;
use std::time::Duration;

use super::session::{ExerciseSession, SessionPhase, SessionTick};
use super::ExerciseCommand;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The next pending one-second tick of the active session.
///
/// One-shot: after firing it stays disarmed until the countdown re-arms it.
/// Lives and dies with the session resource, so a torn-down environment has
/// nothing left that could fire.
#[derive(Resource, Debug, Default)]
pub struct ExerciseTick {
    pending: Option<Timer>,
    /// Armed by a selection this frame; the frame's delta predates it.
    armed_this_frame: bool,
}

impl ExerciseTick {
    pub fn arm(&mut self) {
        self.pending = Some(Timer::new(TICK_PERIOD, TimerMode::Once));
    }

    /// Arm a full second starting from the current frame, for a fresh
    /// countdown. The delta of the frame it was armed in is not counted.
    pub fn restart(&mut self) {
        self.arm();
        self.armed_this_frame = true;
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.armed_this_frame = false;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance the pending tick; true exactly when it fires.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.pending.as_mut() else {
            return false;
        };
        if std::mem::take(&mut self.armed_this_frame) {
            return false;
        }
        if !timer.tick(delta).just_finished() {
            return false;
        }
        self.pending = None;
        true
    }
}

pub fn apply_exercise_commands(
    mut commands_reader: MessageReader<ExerciseCommand>,
    session: Option<ResMut<ExerciseSession>>,
    tick: Option<ResMut<ExerciseTick>>,
) {
    let (Some(mut session), Some(mut tick)) = (session, tick) else {
        let dropped = commands_reader.read().count();
        if dropped > 0 {
            debug!("Dropped {} exercise command(s): no environment mounted", dropped);
        }
        return;
    };

    for command in commands_reader.read() {
        match *command {
            ExerciseCommand::StartExercise => {
                session.start_exercise();
            }
            ExerciseCommand::Select(name) => {
                info!(
                    "Exercise '{}' started for {}s",
                    name.label(),
                    session.duration_secs()
                );
                session.select_exercise(name);
                // A fresh countdown never inherits a half-elapsed tick.
                tick.restart();
            }
            ExerciseCommand::PickPose(name) => {
                if !session.pick_pose(name) {
                    debug!("Ignoring pose '{}' while a countdown runs", name.key());
                }
            }
            ExerciseCommand::Hover(affordance, hovered) => {
                if session.is_hovered(affordance) != hovered {
                    session.set_hovered(affordance, hovered);
                }
            }
        }
    }
}

pub fn advance_exercise_timer(
    time: Res<Time>,
    session: Option<ResMut<ExerciseSession>>,
    tick: Option<ResMut<ExerciseTick>>,
) {
    let (Some(mut session), Some(mut tick)) = (session, tick) else {
        return;
    };

    if session.phase() != SessionPhase::Running {
        if tick.is_armed() {
            tick.cancel();
        }
        return;
    }

    if !tick.is_armed() {
        tick.arm();
    }

    if !tick.advance(time.delta()) {
        return;
    }

    match session.tick() {
        SessionTick::Counting { .. } => tick.arm(),
        SessionTick::Elapsed { finished } => {
            info!("Exercise '{}' finished", finished.label());
        }
        SessionTick::Inactive => {}
    }
}
