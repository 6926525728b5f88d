//! Healthify Studio catalogs
//!
//! This crate defines the fixed sets the studio is built around: the
//! selectable environments and the character's animation catalog.
//!
//! Both catalogs round-trip through short string keys. The keys are what the
//! UI and the settings file pass around, so parsing never panics: unknown keys
//! surface as [`UnknownSceneId`] / [`UnknownAnimationName`] and callers decide
//! the fallback.

use std::fmt;
use std::str::FromStr;

/// Top-level environments the character can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    /// Home: living room, added in the later revision
    Home,

    /// Field: night sky over an open grid
    Field,

    /// Court: indoor gymnasium
    Court,
}

impl SceneId {
    /// Catalog order used by the scene selector.
    pub const ALL: [SceneId; 3] = [SceneId::Field, SceneId::Court, SceneId::Home];

    /// Scene shown when nothing else is configured.
    pub const DEFAULT: SceneId = SceneId::Field;

    pub fn key(&self) -> &'static str {
        match self {
            SceneId::Home => "home",
            SceneId::Field => "field",
            SceneId::Court => "court",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SceneId::Home => "Home",
            SceneId::Field => "Field",
            SceneId::Court => "Court",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scene| scene.key() == key)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SceneId {
    type Err = UnknownSceneId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownSceneId(s.to_string()))
    }
}

/// A scene key that matches no environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSceneId(pub String);

impl fmt::Display for UnknownSceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scene id '{}'", self.0)
    }
}

impl std::error::Error for UnknownSceneId {}

/// Animations baked into the character asset.
///
/// Discriminants are the clip indices inside `stacy.glb`: the asset ships its
/// clips in exactly this order, and the registry relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AnimationName {
    CheckPockets = 0,
    JumpRope = 1,
    Dance = 2,
    Jump = 3,
    Scared = 4,
    IDunno = 5,
    Hello = 6,
    Golf = 7,

    /// Rest pose, and the fallback for anything unresolved
    Idle = 8,
}

impl AnimationName {
    pub const ALL: [AnimationName; 9] = [
        AnimationName::CheckPockets,
        AnimationName::JumpRope,
        AnimationName::Dance,
        AnimationName::Jump,
        AnimationName::Scared,
        AnimationName::IDunno,
        AnimationName::Hello,
        AnimationName::Golf,
        AnimationName::Idle,
    ];

    pub const DEFAULT: AnimationName = AnimationName::Idle;

    pub fn key(&self) -> &'static str {
        match self {
            AnimationName::CheckPockets => "checkPockets",
            AnimationName::JumpRope => "jumprope",
            AnimationName::Dance => "dance",
            AnimationName::Jump => "jump",
            AnimationName::Scared => "scared",
            AnimationName::IDunno => "idunno",
            AnimationName::Hello => "hello",
            AnimationName::Golf => "golf",
            AnimationName::Idle => "idle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnimationName::CheckPockets => "Check Pockets",
            AnimationName::JumpRope => "Jump Rope",
            AnimationName::Dance => "Dance",
            AnimationName::Jump => "Jump",
            AnimationName::Scared => "Scared",
            AnimationName::IDunno => "I Dunno",
            AnimationName::Hello => "Hello",
            AnimationName::Golf => "Golf Swing",
            AnimationName::Idle => "Idle",
        }
    }

    /// Position of this animation's clip in the character asset.
    pub fn clip_index(&self) -> usize {
        *self as usize
    }

    pub fn from_clip_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

impl fmt::Display for AnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AnimationName {
    type Err = UnknownAnimationName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownAnimationName(s.to_string()))
    }
}

/// An animation key that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAnimationName(pub String);

impl fmt::Display for UnknownAnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown animation '{}'", self.0)
    }
}

impl std::error::Error for UnknownAnimationName {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_indices_follow_catalog_order() {
        for (index, name) in AnimationName::ALL.iter().enumerate() {
            assert_eq!(name.clip_index(), index);
            assert_eq!(AnimationName::from_clip_index(index), Some(*name));
        }
        assert_eq!(AnimationName::Golf.clip_index(), 7);
        assert_eq!(AnimationName::Idle.clip_index(), 8);
        assert_eq!(AnimationName::from_clip_index(9), None);
    }

    #[test]
    fn test_animation_keys() {
        assert_eq!(AnimationName::from_key("checkPockets"), Some(AnimationName::CheckPockets));
        assert_eq!(AnimationName::from_key("jumprope"), Some(AnimationName::JumpRope));
        assert_eq!(AnimationName::from_key("idle"), Some(AnimationName::Idle));
        assert_eq!(AnimationName::from_key("Idle"), None);
        assert_eq!(AnimationName::from_key(""), None);
    }

    #[test]
    fn test_animation_parse_error() {
        let err = "notARealName".parse::<AnimationName>().unwrap_err();
        assert_eq!(err, UnknownAnimationName("notARealName".to_string()));
        assert_eq!(err.to_string(), "unknown animation 'notARealName'");
    }

    #[test]
    fn test_scene_keys() {
        for scene in SceneId::ALL {
            assert_eq!(SceneId::from_key(scene.key()), Some(scene));
        }
        assert_eq!(SceneId::from_key(""), None);
        assert_eq!(SceneId::from_key("gym"), None);
        assert_eq!(SceneId::DEFAULT, SceneId::Field);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SceneId::Court), "court");
        assert_eq!(format!("{}", AnimationName::IDunno), "idunno");
        assert_eq!(
            "pool".parse::<SceneId>().unwrap_err().to_string(),
            "unknown scene id 'pool'"
        );
    }
}
