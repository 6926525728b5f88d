use bevy::prelude::Resource;
use common::AnimationName;
use std::collections::HashSet;

/// Clickable items an environment can offer around the exercise flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    StartExercise,
    Exercise(AnimationName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Selecting,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTick {
    /// Nothing was counting down.
    Inactive,
    Counting { remaining: u32 },
    /// The countdown just hit zero and the exercise was cleared.
    Elapsed { finished: AnimationName },
}

/// Exercise state of one mounted environment.
///
/// `remaining_seconds == 0` always implies `requested_animation == None`.
/// Mutators keep that true; there is no way to set either field on its own.
#[derive(Resource, Debug, Clone)]
pub struct ExerciseSession {
    phase: SessionPhase,
    requested_animation: Option<AnimationName>,
    remaining_seconds: u32,
    duration_secs: u32,
    menu_visible: bool,
    hovered: HashSet<Affordance>,
    pose: Option<AnimationName>,
}

impl ExerciseSession {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            requested_animation: None,
            remaining_seconds: 0,
            duration_secs: duration_secs.max(1),
            menu_visible: false,
            hovered: HashSet::new(),
            pose: None,
        }
    }

    /// Expiry returns to `Idle` even when the menu stays on screen.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn requested_animation(&self) -> Option<AnimationName> {
        self.requested_animation
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_menu_visible(&self) -> bool {
        self.menu_visible
    }

    pub fn pose(&self) -> Option<AnimationName> {
        self.pose
    }

    /// What the character should be doing: the running exercise, else the
    /// picked pose. `None` means rest.
    pub fn effective_animation(&self) -> Option<AnimationName> {
        self.requested_animation.or(self.pose)
    }

    /// Seconds to show on the countdown overlay, if any.
    pub fn countdown_overlay(&self) -> Option<u32> {
        (self.remaining_seconds > 0 && self.remaining_seconds <= self.duration_secs)
            .then_some(self.remaining_seconds)
    }

    pub fn start_exercise(&mut self) {
        self.menu_visible = true;
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::Selecting;
        }
    }

    /// Start (or restart) a countdown for `name`, replacing whatever ran before.
    pub fn select_exercise(&mut self, name: AnimationName) {
        self.phase = SessionPhase::Running;
        self.requested_animation = Some(name);
        self.remaining_seconds = self.duration_secs;
        self.pose = None;
    }

    /// Set a free pose. Ignored while a countdown runs; returns whether it took.
    pub fn pick_pose(&mut self, name: AnimationName) -> bool {
        if self.phase() == SessionPhase::Running {
            return false;
        }
        self.pose = Some(name);
        true
    }

    /// Apply one elapsed second.
    pub fn tick(&mut self) -> SessionTick {
        if self.remaining_seconds == 0 {
            return SessionTick::Inactive;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds > 0 {
            return SessionTick::Counting {
                remaining: self.remaining_seconds,
            };
        }

        self.phase = SessionPhase::Idle;
        match self.requested_animation.take() {
            Some(finished) => SessionTick::Elapsed { finished },
            None => SessionTick::Inactive,
        }
    }

    pub fn set_hovered(&mut self, affordance: Affordance, hovered: bool) {
        if hovered {
            self.hovered.insert(affordance);
        } else {
            self.hovered.remove(&affordance);
        }
    }

    pub fn is_hovered(&self, affordance: Affordance) -> bool {
        self.hovered.contains(&affordance)
    }
}
