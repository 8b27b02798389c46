/// Asset lookup boundary.  The core only ever holds handles; decoding and
/// storage belong to the AssetStore implementation.

use crate::error::Result;

/// Opaque reference to an image, carrying its size in play-field units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageHandle {
    pub id: usize,
    pub width: f32,
    pub height: f32,
}

impl ImageHandle {
    pub const fn new(id: usize, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundHandle {
    pub id: usize,
    pub key: String,
}

pub trait AssetStore {
    /// Fails with `GameError::AssetNotFound` for an unknown key.
    fn image(&self, key: &str) -> Result<ImageHandle>;
    fn animation_frames(&self, key: &str) -> Result<Vec<ImageHandle>>;
    fn sound(&self, key: &str) -> Result<SoundHandle>;
}

/// Every handle the session needs, resolved once before the loop starts.
#[derive(Clone, Debug)]
pub struct GameAssets {
    pub player_frames: Vec<ImageHandle>,
    pub enemy: ImageHandle,
    pub start_button: ImageHandle,
    pub menu_background: ImageHandle,
    pub hit_sound: SoundHandle,
    pub game_over_sound: SoundHandle,
    pub music: SoundHandle,
}

impl GameAssets {
    pub fn load(store: &impl AssetStore) -> Result<Self> {
        let player_frames = store.animation_frames("player")?;
        if player_frames.is_empty() {
            return Err(crate::error::GameError::AssetNotFound(
                "player (no animation frames)".to_string(),
            ));
        }
        Ok(Self {
            player_frames,
            enemy: store.image("enemy")?,
            start_button: store.image("start_button")?,
            menu_background: store.image("menu_bg")?,
            hit_sound: store.sound("hit")?,
            game_over_sound: store.sound("game_over")?,
            music: store.sound("background")?,
        })
    }
}
