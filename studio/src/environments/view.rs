//! Session state → what the environment should show this frame.

use common::AnimationName;

use super::descriptor::EnvironmentDescriptor;
use crate::exercise::{Affordance, ExerciseSession};

const HOVER_SCALE: f32 = 1.2;

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentView {
    pub title: &'static str,
    /// Seconds on the countdown overlay.
    pub countdown: Option<u32>,
    pub start_prompt: Option<AffordanceView>,
    pub exercise_options: Vec<AffordanceView>,
    /// Current pick of the pose drop-down, when the environment offers one.
    pub pose_picker: Option<Option<AnimationName>>,
    pub character_visible: bool,
    /// Animation handed to the character; `None` rests on idle.
    pub requested_animation: Option<AnimationName>,
    pub ambient_audio_playing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AffordanceView {
    pub affordance: Affordance,
    pub label: &'static str,
    pub scale: f32,
}

fn affordance_view(
    session: &ExerciseSession,
    affordance: Affordance,
    label: &'static str,
) -> AffordanceView {
    AffordanceView {
        affordance,
        label,
        scale: if session.is_hovered(affordance) {
            HOVER_SCALE
        } else {
            1.0
        },
    }
}

pub fn describe(descriptor: &EnvironmentDescriptor, session: &ExerciseSession) -> EnvironmentView {
    let countdown = session.countdown_overlay();
    let running = countdown.is_some();

    let (start_prompt, exercise_options) = match descriptor.exercise_menu {
        Some(menu) if !session.is_menu_visible() => (
            Some(affordance_view(session, Affordance::StartExercise, menu.prompt)),
            Vec::new(),
        ),
        Some(menu) if menu.visible_while_running || !running => (
            None,
            menu.options
                .iter()
                .map(|name| affordance_view(session, Affordance::Exercise(*name), name.label()))
                .collect(),
        ),
        _ => (None, Vec::new()),
    };

    EnvironmentView {
        title: descriptor.title,
        countdown,
        start_prompt,
        exercise_options,
        pose_picker: descriptor.pose_picker.then_some(session.pose()),
        character_visible: !descriptor.character.requires_menu || session.is_menu_visible(),
        requested_animation: session.effective_animation(),
        ambient_audio_playing: ambient_audio_active(descriptor, session),
    }
}

/// Ambient audio plays only while its gating exercise counts down.
pub fn ambient_audio_active(descriptor: &EnvironmentDescriptor, session: &ExerciseSession) -> bool {
    descriptor.ambient_audio.is_some_and(|audio| {
        session.countdown_overlay().is_some() && session.requested_animation() == Some(audio.gate)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::court::COURT;
    use crate::environments::field::FIELD;
    use crate::environments::home::HOME;

    #[test]
    fn court_walks_through_the_exercise_flow() {
        let mut session = ExerciseSession::new(10);

        let view = describe(&COURT, &session);
        assert_eq!(view.countdown, None);
        assert!(!view.character_visible);
        assert_eq!(
            view.start_prompt.map(|prompt| prompt.label),
            Some("Choose Exercise")
        );
        assert!(view.exercise_options.is_empty());

        session.start_exercise();
        let view = describe(&COURT, &session);
        assert!(view.character_visible);
        assert_eq!(view.start_prompt, None);
        let labels: Vec<_> = view.exercise_options.iter().map(|option| option.label).collect();
        assert_eq!(labels, ["Jump Rope", "Dance", "Jump"]);

        session.select_exercise(AnimationName::Dance);
        let view = describe(&COURT, &session);
        assert_eq!(view.countdown, Some(10));
        assert!(view.exercise_options.is_empty());
        assert_eq!(view.requested_animation, Some(AnimationName::Dance));

        for _ in 0..10 {
            session.tick();
        }
        let view = describe(&COURT, &session);
        assert_eq!(view.countdown, None);
        assert_eq!(view.exercise_options.len(), 3);
        assert_eq!(view.requested_animation, None);
    }

    #[test]
    fn hovered_affordances_grow() {
        let mut session = ExerciseSession::new(10);
        session.set_hovered(Affordance::StartExercise, true);
        assert_eq!(describe(&COURT, &session).start_prompt.map(|p| p.scale), Some(1.2));

        session.start_exercise();
        session.set_hovered(Affordance::Exercise(AnimationName::Jump), true);
        let scales: Vec<_> = describe(&COURT, &session)
            .exercise_options
            .iter()
            .map(|option| option.scale)
            .collect();
        assert_eq!(scales, [1.0, 1.0, 1.2]);
    }

    #[test]
    fn field_has_no_menu_but_a_pose_picker() {
        let mut session = ExerciseSession::new(20);
        session.pick_pose(AnimationName::Hello);

        let view = describe(&FIELD, &session);
        assert_eq!(view.start_prompt, None);
        assert!(view.exercise_options.is_empty());
        assert!(view.character_visible);
        assert_eq!(view.pose_picker, Some(Some(AnimationName::Hello)));
        assert_eq!(view.requested_animation, Some(AnimationName::Hello));
    }

    #[test]
    fn home_music_follows_the_dance_countdown() {
        let mut session = ExerciseSession::new(3);
        session.start_exercise();
        assert!(!describe(&HOME, &session).ambient_audio_playing);

        session.select_exercise(AnimationName::Jump);
        assert!(!describe(&HOME, &session).ambient_audio_playing);

        session.select_exercise(AnimationName::Dance);
        let view = describe(&HOME, &session);
        assert!(view.ambient_audio_playing);
        // Home keeps its options up during a countdown.
        assert_eq!(view.exercise_options.len(), 4);
        assert_eq!(view.pose_picker, None);

        for _ in 0..3 {
            session.tick();
        }
        assert!(!describe(&HOME, &session).ambient_audio_playing);
    }
}
