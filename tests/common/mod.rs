#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use sisters_quest::assets::{AssetStore, GameAssets, ImageHandle, SoundHandle};
use sisters_quest::config::GameConfig;
use sisters_quest::entities::{Color, Rect, Vec2};
use sisters_quest::error::{GameError, Result};
use sisters_quest::audio::AudioPlayer;
use sisters_quest::player::Player;
use sisters_quest::render::{Fill, Renderer, TextStyle};
use sisters_quest::GameSession;

pub const PLAYER_SIZE: f32 = 50.0;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Config with no random power-up spawns and plenty of lives, so a test
/// only sees what it sets up.
pub fn quiet_config() -> GameConfig {
    GameConfig { powerup_spawn_chance: 0.0, initial_lives: 1_000, ..GameConfig::default() }
}

pub fn field() -> Rect {
    Rect::new(0.0, 0.0, 900.0, 700.0)
}

pub fn player_frames() -> Vec<ImageHandle> {
    vec![
        ImageHandle::new(0, PLAYER_SIZE, PLAYER_SIZE),
        ImageHandle::new(1, PLAYER_SIZE, PLAYER_SIZE),
        ImageHandle::new(2, PLAYER_SIZE, PLAYER_SIZE),
    ]
}

pub fn player_at(center: Vec2) -> Player {
    Player::new(player_frames(), center, &GameConfig::default())
}

// ── Stub asset store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StubAssets {
    /// Keys that report `AssetNotFound`.
    pub missing: Vec<&'static str>,
}

impl StubAssets {
    fn check(&self, key: &str) -> Result<()> {
        if self.missing.contains(&key) {
            return Err(GameError::AssetNotFound(key.to_string()));
        }
        Ok(())
    }
}

impl AssetStore for StubAssets {
    fn image(&self, key: &str) -> Result<ImageHandle> {
        self.check(key)?;
        Ok(match key {
            "enemy" => ImageHandle::new(10, 60.0, 60.0),
            "start_button" => ImageHandle::new(11, 200.0, 80.0),
            _ => ImageHandle::new(12, 900.0, 700.0),
        })
    }

    fn animation_frames(&self, key: &str) -> Result<Vec<ImageHandle>> {
        self.check(key)?;
        Ok(player_frames())
    }

    fn sound(&self, key: &str) -> Result<SoundHandle> {
        self.check(key)?;
        Ok(SoundHandle { id: 0, key: key.to_string() })
    }
}

pub fn assets() -> GameAssets {
    GameAssets::load(&StubAssets::default()).expect("stub assets load")
}

pub fn session(config: GameConfig, seed: u64) -> GameSession<StdRng> {
    GameSession::new(config, assets(), rng(seed))
}

// ── Recording collaborators ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect(Rect, Color, u8, Fill),
    Circle(Vec2, f32, Color, Fill),
    Text(String, Vec2, TextStyle),
    Image(ImageHandle, Vec2, u8),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    pub presented: usize,
}

impl RecordingRenderer {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, alpha: u8, fill: Fill) {
        self.calls.push(DrawCall::Rect(rect, color, alpha, fill));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, fill: Fill) {
        self.calls.push(DrawCall::Circle(center, radius, color, fill));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), pos, *style));
    }

    fn draw_image(&mut self, image: &ImageHandle, pos: Vec2, alpha: u8) {
        self.calls.push(DrawCall::Image(*image, pos, alpha));
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAudio {
    pub sounds: Vec<String>,
    pub music: Option<String>,
    pub music_started: usize,
    pub music_stopped: usize,
    /// Every playback call fails when set.
    pub broken: bool,
}

impl AudioPlayer for RecordingAudio {
    fn play_sound(&mut self, sound: &SoundHandle) -> Result<()> {
        if self.broken {
            return Err(GameError::AudioPlayback(sound.key.clone()));
        }
        self.sounds.push(sound.key.clone());
        Ok(())
    }

    fn play_music_loop(&mut self, sound: &SoundHandle) -> Result<()> {
        if self.broken {
            return Err(GameError::AudioPlayback(sound.key.clone()));
        }
        self.music = Some(sound.key.clone());
        self.music_started += 1;
        Ok(())
    }

    fn stop_music(&mut self) {
        self.music = None;
        self.music_stopped += 1;
    }
}
