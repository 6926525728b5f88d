use bevy::prelude::States;
use common::SceneId;

/// Which composition is on screen.
///
/// `Blank` is what an unrecognised scene key routes to: no environment, no
/// HUD, just the cleared camera.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AppState {
    Environment(SceneId),
    Blank,
}

impl Default for AppState {
    fn default() -> Self {
        Self::Environment(SceneId::DEFAULT)
    }
}

impl AppState {
    /// Map a raw scene key onto a state. Never fails.
    pub fn from_key(key: &str) -> Self {
        SceneId::from_key(key).map_or(Self::Blank, Self::Environment)
    }

    pub fn scene(&self) -> Option<SceneId> {
        match self {
            Self::Environment(scene) => Some(*scene),
            Self::Blank => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_route_to_blank() {
        assert_eq!(AppState::from_key("court"), AppState::Environment(SceneId::Court));
        assert_eq!(AppState::from_key(""), AppState::Blank);
        assert_eq!(AppState::from_key("Court"), AppState::Blank);
        assert_eq!(AppState::Blank.scene(), None);
        assert_eq!(AppState::default().scene(), Some(SceneId::Field));
    }
}
