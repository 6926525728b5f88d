use bevy::prelude::Component;
use common::AnimationName;

use super::registry::AnimationRegistry;

/// A clip switch the animation players must carry out: stop everything,
/// then start `clip` from its first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipCut<H> {
    pub name: AnimationName,
    pub clip: H,
}

/// Which clip the character should be showing.
///
/// Tracks the externally requested name and turns every change of it into a
/// single [`ClipCut`]. Cuts are produced lazily so a request made before the
/// clips are loaded is honoured once they are.
#[derive(Component, Debug, Clone)]
pub struct CharacterClipPlayer {
    requested: Option<AnimationName>,
    active: Option<AnimationName>,
    pending: bool,
}

impl Default for CharacterClipPlayer {
    fn default() -> Self {
        Self {
            requested: None,
            active: None,
            pending: true,
        }
    }
}

impl CharacterClipPlayer {
    pub fn requested(&self) -> Option<AnimationName> {
        self.requested
    }

    /// Clip most recently cut to.
    pub fn active(&self) -> Option<AnimationName> {
        self.active
    }

    pub fn has_pending_cut(&self) -> bool {
        self.pending
    }

    /// Record a new request; returns false when it equals the current one.
    pub fn request(&mut self, requested: Option<AnimationName>) -> bool {
        if self.requested == requested {
            return false;
        }
        self.requested = requested;
        self.pending = true;
        true
    }

    /// Consume the pending change, if the registry can serve it.
    pub fn take_cut<H: Copy>(&mut self, registry: &AnimationRegistry<H>) -> Option<ClipCut<H>> {
        if !self.pending {
            return None;
        }
        let (name, clip) = registry.resolve(self.requested)?;
        self.pending = false;
        self.active = Some(name);
        Some(ClipCut { name, clip })
    }

    /// The cut for players that join after the last switch.
    pub fn current_cut<H: Copy>(&self, registry: &AnimationRegistry<H>) -> Option<ClipCut<H>> {
        registry
            .resolve(self.requested)
            .map(|(name, clip)| ClipCut { name, clip })
    }
}
