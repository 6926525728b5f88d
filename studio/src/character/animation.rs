use super::player::{CharacterClipPlayer, ClipCut};
use super::registry::AnimationRegistry;
use super::types::{CharacterRoot, STACY_MODEL_PATH};
use crate::exercise::ExerciseSession;
use crate::settings::SettingsResource;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use common::AnimationName;
use std::time::Duration;

/// Animation graph and clip registry built from stacy.glb.
///
/// Loaded once for the whole run; environments come and go but the character
/// asset and its clips stay resident.
#[derive(Resource)]
pub struct StacyAnimationLibrary {
    pub gltf_handle: Handle<Gltf>,
    pub graph_handle: Option<Handle<AnimationGraph>>,
    pub registry: AnimationRegistry<AnimationNodeIndex>,
    pub initialized: bool,
}

impl StacyAnimationLibrary {
    pub fn new(gltf_handle: Handle<Gltf>) -> Self {
        Self {
            gltf_handle,
            graph_handle: None,
            registry: AnimationRegistry::default(),
            initialized: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.graph_handle.is_some() && !self.registry.is_empty()
    }
}

pub fn load_stacy_animation_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(StacyAnimationLibrary::new(
        asset_server.load(STACY_MODEL_PATH),
    ));
}

/// Build the animation graph once the stacy.glb Gltf asset is loaded.
pub fn initialize_stacy_animation_library(
    mut library: ResMut<StacyAnimationLibrary>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    if library.initialized {
        return;
    }

    let Some(gltf) = gltfs.get(&library.gltf_handle) else {
        return;
    };

    library.initialized = true;

    if gltf.animations.is_empty() {
        warn!("{} loaded but has no animations; the character stays in its bind pose", STACY_MODEL_PATH);
        return;
    }

    if gltf.animations.len() != AnimationName::ALL.len() {
        warn!(
            "{} carries {} clip(s), expected {}; missing names will rest on idle",
            STACY_MODEL_PATH,
            gltf.animations.len(),
            AnimationName::ALL.len()
        );
    }

    let mut graph = AnimationGraph::new();
    let nodes: Vec<AnimationNodeIndex> = graph
        .add_clips(gltf.animations.iter().cloned(), 1.0, graph.root)
        .collect();

    library.registry = AnimationRegistry::from_clips(nodes);
    library.graph_handle = Some(graphs.add(graph));

    info!(
        "StacyAnimationLibrary: {} catalog clip(s) bound from {}",
        library.registry.len(),
        STACY_MODEL_PATH
    );
}

/// Feed the session's current animation into every character.
pub fn sync_requested_animation(
    session: Option<Res<ExerciseSession>>,
    mut characters: Query<&mut CharacterClipPlayer, With<CharacterRoot>>,
) {
    let requested = session.and_then(|session| session.effective_animation());

    for mut clip_player in &mut characters {
        if clip_player.requested() != requested {
            clip_player.request(requested);
        }
    }
}

/// Marks an `AnimationPlayer` as driven by the character it belongs to.
#[derive(Component)]
pub struct CharacterAnimationBound {
    pub character: Entity,
}

/// An `AnimationPlayer` that belongs to environment decor, not a character.
#[derive(Component)]
pub struct DecorAnimationPlayer;

/// Attach the shared graph to animation players spawned under a character
/// and start whatever that character currently shows.
pub fn bind_character_animation_players(
    mut commands: Commands,
    library: Res<StacyAnimationLibrary>,
    settings: Res<SettingsResource>,
    characters: Query<&CharacterClipPlayer, With<CharacterRoot>>,
    parents: Query<&ChildOf>,
    mut players: Query<
        (Entity, &mut AnimationPlayer),
        (Without<CharacterAnimationBound>, Without<DecorAnimationPlayer>),
    >,
) {
    let Some(graph_handle) = library.graph_handle.clone() else {
        return;
    };
    let speed = settings.current.animation.playback_speed.max(0.001);

    for (player_entity, mut player) in &mut players {
        // Scene instances arrive with their full hierarchy, so a player with
        // no character ancestor never gains one.
        let Some(character) = find_character_root(player_entity, &parents, &characters) else {
            commands.entity(player_entity).insert(DecorAnimationPlayer);
            continue;
        };
        let Ok(clip_player) = characters.get(character) else {
            continue;
        };

        let mut transitions = AnimationTransitions::new();
        if let Some(cut) = clip_player.current_cut(&library.registry) {
            transitions
                .play(&mut player, cut.clip, Duration::ZERO)
                .set_speed(speed)
                .repeat();
        }

        commands.entity(player_entity).insert((
            AnimationGraphHandle(graph_handle.clone()),
            transitions,
            CharacterAnimationBound { character },
        ));
    }
}

/// Carry out pending clip switches on every bound player of the character.
pub fn apply_character_animation_changes(
    library: Res<StacyAnimationLibrary>,
    settings: Res<SettingsResource>,
    mut characters: Query<(Entity, &mut CharacterClipPlayer), With<CharacterRoot>>,
    mut players: Query<(
        &CharacterAnimationBound,
        &mut AnimationPlayer,
        &mut AnimationTransitions,
    )>,
) {
    if !library.is_ready() {
        return;
    }

    let animation_settings = &settings.current.animation;
    let crossfade = animation_settings.crossfade();
    let speed = animation_settings.playback_speed.max(0.001);

    for (character, mut clip_player) in &mut characters {
        if !clip_player.has_pending_cut() {
            continue;
        }
        let Some(cut) = clip_player.take_cut(&library.registry) else {
            continue;
        };

        debug!("Character {:?} switching to '{}'", character, cut.name.key());

        for (bound, mut player, mut transitions) in &mut players {
            if bound.character == character {
                cut_to(&mut player, &mut transitions, cut, crossfade, speed);
            }
        }
    }
}

fn cut_to(
    player: &mut AnimationPlayer,
    transitions: &mut AnimationTransitions,
    cut: ClipCut<AnimationNodeIndex>,
    crossfade: Duration,
    speed: f32,
) {
    // Both branches go through the transitions so its main animation always
    // names the clip on screen, even when the crossfade setting changes live.
    if crossfade.is_zero() {
        player.stop_all();
    }
    transitions
        .play(player, cut.clip, crossfade)
        .set_speed(speed)
        .repeat();
}

fn find_character_root(
    entity: Entity,
    parents: &Query<&ChildOf>,
    characters: &Query<&CharacterClipPlayer, With<CharacterRoot>>,
) -> Option<Entity> {
    let mut current = entity;
    loop {
        if characters.contains(current) {
            return Some(current);
        }
        current = parents.get(current).ok()?.parent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::animation::transition::{advance_transitions, expire_completed_transitions};
    use bevy::time::TimeUpdateStrategy;
    use std::collections::HashSet;

    use crate::settings::StudioSettings;

    struct Clips {
        idle: AnimationNodeIndex,
        dance: AnimationNodeIndex,
        golf: AnimationNodeIndex,
    }

    fn clips() -> Clips {
        let mut graph = AnimationGraph::new();
        let root = graph.root;
        Clips {
            idle: graph.add_clip(Handle::default(), 1.0, root),
            dance: graph.add_clip(Handle::default(), 1.0, root),
            golf: graph.add_clip(Handle::default(), 1.0, root),
        }
    }

    fn cut(name: AnimationName, clip: AnimationNodeIndex) -> ClipCut<AnimationNodeIndex> {
        ClipCut { name, clip }
    }

    fn playing(player: &AnimationPlayer) -> HashSet<AnimationNodeIndex> {
        player.playing_animations().map(|(index, _)| *index).collect()
    }

    #[test]
    fn hard_cut_leaves_only_the_new_clip_playing() {
        let clips = clips();
        let mut player = AnimationPlayer::default();
        let mut transitions = AnimationTransitions::new();

        transitions.play(&mut player, clips.idle, Duration::ZERO);
        cut_to(
            &mut player,
            &mut transitions,
            cut(AnimationName::Dance, clips.dance),
            Duration::ZERO,
            1.0,
        );

        assert_eq!(playing(&player), HashSet::from([clips.dance]));
        assert_eq!(transitions.get_main_animation(), Some(clips.dance));

        cut_to(
            &mut player,
            &mut transitions,
            cut(AnimationName::Golf, clips.golf),
            Duration::ZERO,
            1.0,
        );
        assert_eq!(playing(&player), HashSet::from([clips.golf]));
    }

    #[test]
    fn crossfade_after_hard_cut_fades_out_the_visible_clip() {
        let clips = clips();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_systems(
                Update,
                (advance_transitions, expire_completed_transitions).chain(),
            );

        let mut player = AnimationPlayer::default();
        let mut transitions = AnimationTransitions::new();
        transitions.play(&mut player, clips.idle, Duration::ZERO);
        cut_to(
            &mut player,
            &mut transitions,
            cut(AnimationName::Dance, clips.dance),
            Duration::ZERO,
            1.0,
        );
        cut_to(
            &mut player,
            &mut transitions,
            cut(AnimationName::Golf, clips.golf),
            Duration::from_millis(300),
            1.0,
        );
        assert_eq!(transitions.get_main_animation(), Some(clips.golf));

        let entity = app.world_mut().spawn((player, transitions)).id();
        for _ in 0..10 {
            app.update();
        }

        let player = app.world().get::<AnimationPlayer>(entity).expect("player");
        assert_eq!(playing(player), HashSet::from([clips.golf]));
    }

    #[test]
    fn decor_players_are_tagged_and_character_players_bound() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SettingsResource::new(StudioSettings::default()))
            .insert_resource(StacyAnimationLibrary {
                graph_handle: Some(Handle::default()),
                ..StacyAnimationLibrary::new(Handle::default())
            })
            .add_systems(Update, bind_character_animation_players);

        let character = app
            .world_mut()
            .spawn((CharacterRoot, CharacterClipPlayer::default()))
            .id();
        let character_player = app
            .world_mut()
            .spawn((AnimationPlayer::default(), ChildOf(character)))
            .id();
        let decor = app.world_mut().spawn(Transform::default()).id();
        let decor_player = app
            .world_mut()
            .spawn((AnimationPlayer::default(), ChildOf(decor)))
            .id();

        app.update();

        let world = app.world();
        assert_eq!(
            world
                .get::<CharacterAnimationBound>(character_player)
                .map(|bound| bound.character),
            Some(character)
        );
        assert!(world.get::<DecorAnimationPlayer>(character_player).is_none());
        assert!(world.get::<DecorAnimationPlayer>(decor_player).is_some());
        assert!(world.get::<CharacterAnimationBound>(decor_player).is_none());
    }
}
