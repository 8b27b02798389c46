/// The player sprite: movement, dash, animation and timed power-up effects.

use crate::assets::ImageHandle;
use crate::config::GameConfig;
use crate::entities::{Color, Rect, Vec2};
use crate::input::{InputSnapshot, Key};
use crate::powerup::PowerUpKind;
use crate::render::{Fill, Renderer};

/// Per-axis factor applied to a diagonal dash.
const DIAGONAL: f32 = 0.707;
const TRAIL_POINTS: usize = 5;
const TRAIL_START_ALPHA: i32 = 150;
const TRAIL_ALPHA_STEP: i32 = 30;
/// Player speed multiplier while slow-time is active.
const SLOW_TIME_SPEEDUP: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Shield,
    RapidFire,
    SlowTime,
}

/// Expiry timestamps (ms) for each timed effect; `None` means inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimedEffects {
    shield: Option<u64>,
    rapid_fire: Option<u64>,
    slow_time: Option<u64>,
}

impl TimedEffects {
    fn slot(&mut self, effect: Effect) -> &mut Option<u64> {
        match effect {
            Effect::Shield => &mut self.shield,
            Effect::RapidFire => &mut self.rapid_fire,
            Effect::SlowTime => &mut self.slow_time,
        }
    }

    pub fn expires_at(&self, effect: Effect) -> Option<u64> {
        match effect {
            Effect::Shield => self.shield,
            Effect::RapidFire => self.rapid_fire,
            Effect::SlowTime => self.slow_time,
        }
    }

    pub fn is_active(&self, effect: Effect) -> bool {
        self.expires_at(effect).is_some()
    }

    /// Activate or refresh; never stacks.
    pub fn activate(&mut self, effect: Effect, expiry: u64) {
        *self.slot(effect) = Some(expiry);
    }

    fn expire(&mut self, now: u64) {
        for effect in [Effect::Shield, Effect::RapidFire, Effect::SlowTime] {
            let slot = self.slot(effect);
            if slot.is_some_and(|expiry| expiry <= now) {
                *slot = None;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub center: Vec2,
    pub alpha: i32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub frozen: bool,
    pub effects: TimedEffects,
    frames: Vec<ImageHandle>,
    current_frame: usize,
    frame_counter: u32,
    last_dash: Option<u64>,
    dash_trail: Vec<TrailPoint>,
    speed: f32,
    frame_delay: u32,
    dash_distance: f32,
    dash_cooldown_ms: u64,
    effect_duration_ms: u64,
}

impl Player {
    /// `frames` must not be empty; the first frame sets the hitbox size.
    pub fn new(frames: Vec<ImageHandle>, center: Vec2, config: &GameConfig) -> Self {
        let (w, h) = frames.first().map_or((0.0, 0.0), |f| (f.width, f.height));
        Self {
            rect: Rect::from_center(center, w, h),
            frozen: false,
            effects: TimedEffects::default(),
            frames,
            current_frame: 0,
            frame_counter: 0,
            last_dash: None,
            dash_trail: Vec::new(),
            speed: config.player_speed,
            frame_delay: config.player_frame_delay_ticks,
            dash_distance: config.dash_distance,
            dash_cooldown_ms: config.dash_cooldown_ms,
            effect_duration_ms: config.powerup_duration_ms,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn dash_trail(&self) -> &[TrailPoint] {
        &self.dash_trail
    }

    pub fn last_dash(&self) -> Option<u64> {
        self.last_dash
    }

    pub fn shield_active(&self) -> bool {
        self.effects.is_active(Effect::Shield)
    }

    pub fn rapid_fire_active(&self) -> bool {
        self.effects.is_active(Effect::RapidFire)
    }

    pub fn slow_time_active(&self) -> bool {
        self.effects.is_active(Effect::SlowTime)
    }

    pub fn dash_ready(&self, now: u64) -> bool {
        self.last_dash
            .map_or(true, |last| now.saturating_sub(last) > self.dash_cooldown_ms)
    }

    /// Put the player back at `center` with no effects, trail or cooldown.
    pub fn reset(&mut self, center: Vec2) {
        self.rect.set_center(center);
        self.frozen = false;
        self.effects = TimedEffects::default();
        self.current_frame = 0;
        self.frame_counter = 0;
        self.last_dash = None;
        self.dash_trail.clear();
    }

    pub fn update(&mut self, now: u64) {
        if !self.frozen {
            self.frame_counter += 1;
            if self.frame_counter >= self.frame_delay {
                self.frame_counter = 0;
                self.current_frame = (self.current_frame + 1) % self.frames.len().max(1);
            }
        }

        self.effects.expire(now);

        for point in &mut self.dash_trail {
            point.alpha -= TRAIL_ALPHA_STEP;
        }
        self.dash_trail.retain(|p| p.alpha > 0);
    }

    pub fn move_by_input(&mut self, input: &InputSnapshot, bounds: &Rect) {
        if self.frozen {
            return;
        }

        let mut speed = self.speed;
        if self.slow_time_active() {
            speed *= SLOW_TIME_SPEEDUP;
        }

        if input.is_held(Key::Left) {
            self.rect.x -= speed;
        }
        if input.is_held(Key::Right) {
            self.rect.x += speed;
        }
        if input.is_held(Key::Up) {
            self.rect.y -= speed;
        }
        if input.is_held(Key::Down) {
            self.rect.y += speed;
        }

        self.rect.clamp_within(bounds);
    }

    /// Teleport along the held direction if the cooldown has elapsed and a
    /// dash key is held.  Returns whether a dash happened.
    pub fn try_dash(&mut self, input: &InputSnapshot, now: u64, bounds: &Rect) -> bool {
        if !input.dash_requested() || !self.dash_ready(now) {
            return false;
        }

        let (mut dx, mut dy) = input.direction();
        if dx == 0.0 && dy == 0.0 {
            dx = 1.0;
        }
        if dx != 0.0 && dy != 0.0 {
            dx *= DIAGONAL;
            dy *= DIAGONAL;
        }

        let old_center = self.rect.center();
        self.rect.x += dx * self.dash_distance;
        self.rect.y += dy * self.dash_distance;
        self.rect.clamp_within(bounds);
        let new_center = self.rect.center();

        for i in 0..TRAIL_POINTS {
            let t = i as f32 / TRAIL_POINTS as f32;
            self.dash_trail.push(TrailPoint {
                center: old_center.lerp(new_center, t),
                alpha: TRAIL_START_ALPHA - i as i32 * TRAIL_ALPHA_STEP,
            });
        }

        self.last_dash = Some(now);
        true
    }

    pub fn activate(&mut self, effect: Effect, now: u64) {
        self.effects.activate(effect, now + self.effect_duration_ms);
    }

    /// Start the timed effect behind `kind`.  Kinds without one are ignored.
    pub fn activate_powerup(&mut self, kind: PowerUpKind, now: u64) {
        if let Some(effect) = kind.timed_effect() {
            self.activate(effect, now);
        }
    }

    pub fn draw(&self, renderer: &mut impl Renderer, now: u64) {
        let Some(frame) = self.frames.get(self.current_frame) else {
            return;
        };

        for point in &self.dash_trail {
            let pos = Vec2::new(
                point.center.x - self.rect.w / 2.0,
                point.center.y - self.rect.h / 2.0,
            );
            renderer.draw_image(frame, pos, point.alpha.clamp(0, 255) as u8);
        }

        renderer.draw_image(frame, Vec2::new(self.rect.x, self.rect.y), 255);

        if self.shield_active() {
            let pulse = (now as f32 * 0.01).sin().abs();
            let alpha = (100.0 * pulse) as u8;
            renderer.draw_rect(
                self.rect.inflate(10.0, 10.0),
                Color::BLUE,
                alpha,
                Fill::Solid,
            );
        }
    }
}
