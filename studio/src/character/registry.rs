use common::AnimationName;

/// Clip handles of the character asset, keyed by catalog name.
///
/// Built once from the asset's ordered clip list: clip `i` belongs to
/// `AnimationName::ALL[i]`. Anything that does not resolve falls back to
/// [`AnimationName::Idle`].
#[derive(Debug, Clone)]
pub struct AnimationRegistry<H> {
    clips: Vec<Option<H>>,
}

impl<H> Default for AnimationRegistry<H> {
    fn default() -> Self {
        Self { clips: Vec::new() }
    }
}

impl<H: Copy> AnimationRegistry<H> {
    /// Surplus clips beyond the catalog are ignored.
    pub fn from_clips(clips: impl IntoIterator<Item = H>) -> Self {
        let mut slots: Vec<Option<H>> = vec![None; AnimationName::ALL.len()];
        for (slot, clip) in slots.iter_mut().zip(clips) {
            *slot = Some(clip);
        }
        Self { clips: slots }
    }

    pub fn is_empty(&self) -> bool {
        self.clips.iter().all(Option::is_none)
    }

    /// Number of catalog names backed by a clip.
    pub fn len(&self) -> usize {
        self.clips.iter().filter(|clip| clip.is_some()).count()
    }

    pub fn get(&self, name: AnimationName) -> Option<H> {
        self.clips.get(name.clip_index()).copied().flatten()
    }

    /// Resolve a request, substituting idle for unset or missing names.
    pub fn resolve(&self, requested: Option<AnimationName>) -> Option<(AnimationName, H)> {
        requested
            .and_then(|name| self.get(name).map(|clip| (name, clip)))
            .or_else(|| {
                self.get(AnimationName::Idle)
                    .map(|clip| (AnimationName::Idle, clip))
            })
    }

    /// [`resolve`](Self::resolve) for a raw key coming from outside the catalog.
    pub fn resolve_key(&self, key: Option<&str>) -> Option<(AnimationName, H)> {
        self.resolve(key.and_then(AnimationName::from_key))
    }
}
