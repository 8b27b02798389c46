/// Built-in glyph-art assets for the terminal backend.

use std::collections::HashMap;

use crate::assets::{AssetStore, ImageHandle, SoundHandle};
use crate::entities::Color;
use crate::error::{GameError, Result};

use super::{CELL_HEIGHT, CELL_WIDTH};

#[derive(Clone, Debug)]
pub struct Sprite {
    pub rows: Vec<&'static str>,
    pub color: Color,
}

impl Sprite {
    fn new(rows: &[&'static str], color: Color) -> Self {
        Self { rows: rows.to_vec(), color }
    }

    /// Size in cells: widest row × row count.
    pub fn cells(&self) -> (usize, usize) {
        let w = self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        (w, self.rows.len())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpriteAtlas {
    sprites: Vec<Sprite>,
    images: HashMap<&'static str, usize>,
    animations: HashMap<&'static str, Vec<usize>>,
    sounds: HashMap<&'static str, usize>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every asset the game asks for.
    pub fn builtin() -> Self {
        let mut atlas = Self::new();

        // Player: ship tip over fuselage, wings flapping between frames.
        atlas.add_animation(
            "player",
            vec![
                Sprite::new(&[" ▲ ", "/█\\"], Color::WHITE),
                Sprite::new(&[" ▲ ", "/|\\"], Color::WHITE),
            ],
        );
        atlas.add_image("enemy", Sprite::new(&["(◎)", "╰─╯"], Color::RED));
        atlas.add_image(
            "start_button",
            Sprite::new(
                &[
                    "╔═══════════════╗",
                    "║  ▶  START  ◀  ║",
                    "╚═══════════════╝",
                ],
                Color::GREEN,
            ),
        );
        atlas.add_image(
            "menu_bg",
            Sprite::new(
                &[
                    "★  S I S T E R ' S   Q U E S T  ★",
                    "     ~ the arcade adventure ~     ",
                ],
                Color::CYAN,
            ),
        );

        for key in ["hit", "game_over", "background"] {
            atlas.add_sound(key);
        }
        atlas
    }

    pub fn add_image(&mut self, key: &'static str, sprite: Sprite) {
        self.sprites.push(sprite);
        self.images.insert(key, self.sprites.len() - 1);
    }

    pub fn add_animation(&mut self, key: &'static str, frames: Vec<Sprite>) {
        let ids = frames
            .into_iter()
            .map(|sprite| {
                self.sprites.push(sprite);
                self.sprites.len() - 1
            })
            .collect();
        self.animations.insert(key, ids);
    }

    pub fn add_sound(&mut self, key: &'static str) {
        let id = self.sounds.len();
        self.sounds.insert(key, id);
    }

    pub fn sprite(&self, image: &ImageHandle) -> Option<&Sprite> {
        self.sprites.get(image.id)
    }

    fn handle(&self, id: usize) -> ImageHandle {
        let (w, h) = self.sprites[id].cells();
        ImageHandle::new(id, w as f32 * CELL_WIDTH, h as f32 * CELL_HEIGHT)
    }
}

impl AssetStore for SpriteAtlas {
    fn image(&self, key: &str) -> Result<ImageHandle> {
        self.images
            .get(key)
            .map(|&id| self.handle(id))
            .ok_or_else(|| GameError::AssetNotFound(key.to_string()))
    }

    fn animation_frames(&self, key: &str) -> Result<Vec<ImageHandle>> {
        self.animations
            .get(key)
            .map(|ids| ids.iter().map(|&id| self.handle(id)).collect())
            .ok_or_else(|| GameError::AssetNotFound(key.to_string()))
    }

    fn sound(&self, key: &str) -> Result<SoundHandle> {
        self.sounds
            .get(key)
            .map(|&id| SoundHandle { id, key: key.to_string() })
            .ok_or_else(|| GameError::AssetNotFound(key.to_string()))
    }
}
