use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::AppExtStates;
use bevy::time::TimeUpdateStrategy;
use common::AnimationName;

use studio::AppState;
use studio::environments::{CourtScene, HomeScene, SceneControllerPlugin};
use studio::exercise::{ExerciseCommand, ExercisePlugin, ExerciseSession, SessionPhase};
use studio::router::{SceneRequest, SceneRouterPlugin};
use studio::settings::{SettingsResource, StudioSettings};

const FRAME: Duration = Duration::from_millis(200);
const FRAMES_PER_SECOND: usize = 5;

fn court_app(duration_secs: u32) -> App {
    let mut settings = StudioSettings::default();
    settings.exercise.duration_secs = duration_secs;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(SettingsResource::new(settings))
        .insert_state(AppState::from_key("court"))
        .add_plugins(SceneRouterPlugin)
        .add_plugins(ExercisePlugin)
        .add_plugins(SceneControllerPlugin::<CourtScene>::default())
        .add_plugins(SceneControllerPlugin::<HomeScene>::default());
    app.update();
    app
}

fn run_seconds(app: &mut App, seconds: usize) {
    for _ in 0..seconds * FRAMES_PER_SECOND {
        app.update();
    }
}

fn select(app: &mut App, name: AnimationName) {
    app.world_mut().write_message(ExerciseCommand::StartExercise);
    app.world_mut().write_message(ExerciseCommand::Select(name));
    app.update();
}

fn session(app: &App) -> &ExerciseSession {
    app.world().resource::<ExerciseSession>()
}

#[test]
fn countdown_runs_down_and_releases_the_animation() {
    let mut app = court_app(20);
    select(&mut app, AnimationName::Dance);

    assert_eq!(session(&app).remaining_seconds(), 20);
    assert_eq!(session(&app).countdown_overlay(), Some(20));
    assert_eq!(
        session(&app).requested_animation(),
        Some(AnimationName::Dance)
    );

    run_seconds(&mut app, 5);
    assert_eq!(session(&app).remaining_seconds(), 15);
    assert_eq!(
        session(&app).requested_animation(),
        Some(AnimationName::Dance)
    );

    run_seconds(&mut app, 20);
    assert_eq!(session(&app).remaining_seconds(), 0);
    assert_eq!(session(&app).requested_animation(), None);
    assert_eq!(session(&app).countdown_overlay(), None);
    assert_eq!(session(&app).phase(), SessionPhase::Idle);
    assert!(session(&app).is_menu_visible());
}

#[test]
fn first_tick_lands_a_full_second_after_selection() {
    let mut app = court_app(20);
    select(&mut app, AnimationName::Jump);

    for _ in 0..FRAMES_PER_SECOND - 1 {
        app.update();
        assert_eq!(session(&app).remaining_seconds(), 20);
    }
    app.update();
    assert_eq!(session(&app).remaining_seconds(), 19);
}

#[test]
fn selecting_again_restarts_the_countdown() {
    let mut app = court_app(6);
    select(&mut app, AnimationName::Jump);
    run_seconds(&mut app, 3);
    assert!(session(&app).remaining_seconds() < 6);

    select(&mut app, AnimationName::JumpRope);
    assert_eq!(session(&app).remaining_seconds(), 6);
    assert_eq!(
        session(&app).requested_animation(),
        Some(AnimationName::JumpRope)
    );
}

#[test]
fn poses_are_ignored_while_counting_down() {
    let mut app = court_app(3);
    select(&mut app, AnimationName::Jump);

    app.world_mut()
        .write_message(ExerciseCommand::PickPose(AnimationName::Golf));
    app.update();
    assert_eq!(session(&app).pose(), None);
    assert_eq!(
        session(&app).effective_animation(),
        Some(AnimationName::Jump)
    );

    run_seconds(&mut app, 4);
    app.world_mut()
        .write_message(ExerciseCommand::PickPose(AnimationName::Golf));
    app.update();
    assert_eq!(
        session(&app).effective_animation(),
        Some(AnimationName::Golf)
    );
}

#[test]
fn teardown_stops_the_countdown() {
    let mut app = court_app(10);
    select(&mut app, AnimationName::Dance);
    run_seconds(&mut app, 2);

    app.world_mut().write_message(SceneRequest::new(""));
    app.update();
    app.update();
    assert!(!app.world().contains_resource::<ExerciseSession>());

    run_seconds(&mut app, 3);

    app.world_mut().write_message(SceneRequest::new("home"));
    app.update();
    app.update();
    run_seconds(&mut app, 2);

    assert_eq!(session(&app).remaining_seconds(), 0);
    assert_eq!(session(&app).requested_animation(), None);
}
