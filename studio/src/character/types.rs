use bevy::prelude::*;

/// Stacy: skinned mesh plus all catalog clips, in catalog order.
pub const STACY_MODEL_PATH: &str = "models/stacy.glb";

/// Marker for the character root entity.
#[derive(Component)]
pub struct CharacterRoot;

/// Scene asset for the character's meshes and skeleton.
pub fn stacy_scene(asset_server: &AssetServer) -> SceneRoot {
    SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(STACY_MODEL_PATH)))
}
