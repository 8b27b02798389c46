/// Two-line story exchange shown once the score crosses the trigger.

use crate::assets::ImageHandle;
use crate::entities::{Color, Rect, Vec2};
use crate::render::{Renderer, TextStyle};

pub const MESSAGES: [&str; 2] = [
    "We're trapped here forever and you'll never see your sister again",
    "I don't care, I will keep looking!",
];

/// Vertical gap between a speaker's top edge and their line.
const SPEECH_OFFSET: f32 = 40.0;

#[derive(Clone, Debug)]
pub struct Cutscene {
    enemy: ImageHandle,
    active: bool,
    stage: usize,
    stage_start: u64,
    enemy_rect: Option<Rect>,
    message_duration_ms: u64,
}

impl Cutscene {
    pub fn new(enemy: ImageHandle, message_duration_ms: u64) -> Self {
        Self {
            enemy,
            active: false,
            stage: 0,
            stage_start: 0,
            enemy_rect: None,
            message_duration_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn enemy_rect(&self) -> Option<Rect> {
        self.enemy_rect
    }

    /// Activate at stage 0 with the antagonist just left of the player.
    pub fn start(&mut self, player_rect: &Rect, now: u64) {
        self.active = true;
        self.stage = 0;
        self.stage_start = now;
        self.enemy_rect = Some(Rect::new(
            player_rect.x - self.enemy.width,
            player_rect.y - self.enemy.height / 2.0,
            self.enemy.width,
            self.enemy.height,
        ));
    }

    /// Returns `true` once every line has been shown (and when inactive).
    pub fn update(&mut self, now: u64) -> bool {
        if !self.active {
            return true;
        }

        if now.saturating_sub(self.stage_start) >= self.message_duration_ms {
            self.stage += 1;
            if self.stage >= MESSAGES.len() {
                self.active = false;
                return true;
            }
            self.stage_start = now;
        }

        false
    }

    pub fn draw(&self, renderer: &mut impl Renderer, player_rect: &Rect) {
        let Some(enemy_rect) = self.enemy_rect.filter(|_| self.active) else {
            return;
        };

        renderer.draw_image(&self.enemy, Vec2::new(enemy_rect.x, enemy_rect.y), 255);

        let Some(message) = MESSAGES.get(self.stage) else {
            return;
        };
        // Line 0 is the antagonist's, line 1 the player's.
        let speaker = if self.stage == 0 { enemy_rect } else { *player_rect };
        let pos = Vec2::new(speaker.x, speaker.y - SPEECH_OFFSET);
        renderer.draw_text(message, pos, &TextStyle::new(30.0, Color::WHITE));
    }
}
