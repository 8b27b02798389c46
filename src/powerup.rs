/// Timed collectibles and the table of what each one does when picked up.

use rand::Rng;

use crate::entities::{Color, Rect, Vec2};
use crate::player::{Effect, Player};
use crate::render::{Align, Fill, Renderer, TextStyle};

const BOB_FREQUENCY: f32 = 0.005;
const BOB_AMPLITUDE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    SlowTime,
    MultiLife,
}

/// What a collected power-up may touch.
pub struct Collector<'a> {
    pub player: &'a mut Player,
    pub lives: &'a mut u32,
}

pub type EffectFn = fn(&mut Collector<'_>, u64);

/// Indexed by `PowerUpKind as usize`.
const EFFECTS: [EffectFn; 4] = [shield, rapid_fire, slow_time, extra_life];

fn shield(c: &mut Collector<'_>, now: u64) {
    c.player.activate(Effect::Shield, now);
}

fn rapid_fire(c: &mut Collector<'_>, now: u64) {
    c.player.activate(Effect::RapidFire, now);
}

fn slow_time(c: &mut Collector<'_>, now: u64) {
    c.player.activate(Effect::SlowTime, now);
}

fn extra_life(c: &mut Collector<'_>, _now: u64) {
    *c.lives += 1;
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::SlowTime,
        PowerUpKind::MultiLife,
    ];

    pub fn effect(self) -> EffectFn {
        EFFECTS[self as usize]
    }

    pub fn timed_effect(self) -> Option<Effect> {
        match self {
            PowerUpKind::Shield => Some(Effect::Shield),
            PowerUpKind::RapidFire => Some(Effect::RapidFire),
            PowerUpKind::SlowTime => Some(Effect::SlowTime),
            PowerUpKind::MultiLife => None,
        }
    }

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::Shield => Color::BLUE,
            PowerUpKind::RapidFire => Color::RED,
            PowerUpKind::SlowTime => Color::PURPLE,
            PowerUpKind::MultiLife => Color::GREEN,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "S",
            PowerUpKind::RapidFire => "R",
            PowerUpKind::SlowTime => "T",
            PowerUpKind::MultiLife => "+",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub spawn_time: u64,
    bob_phase: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, size: f32, now: u64, bob_phase: f32) -> Self {
        Self { kind, rect: Rect::new(pos.x, pos.y, size, size), spawn_time: now, bob_phase }
    }

    /// Random kind and bob phase at `pos`.
    pub fn spawn(pos: Vec2, size: f32, now: u64, rng: &mut impl Rng) -> Self {
        let kind = PowerUpKind::random(rng);
        let phase = rng.gen_range(0.0..std::f32::consts::TAU);
        Self::new(kind, pos, size, now, phase)
    }

    /// Bob for one tick.  Returns `false` once `lifespan_ms` has elapsed.
    pub fn update(&mut self, now: u64, lifespan_ms: u64) -> bool {
        let alive = now.saturating_sub(self.spawn_time);
        self.rect.y += (alive as f32 * BOB_FREQUENCY + self.bob_phase).sin() * BOB_AMPLITUDE;
        alive < lifespan_ms
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        let color = self.kind.color();
        let center = self.rect.center();

        for i in 0..3u8 {
            let grow = i as f32 * 4.0;
            renderer.draw_rect(self.rect.inflate(grow, grow), color, 50 - i * 15, Fill::Solid);
        }

        let radius = self.rect.w / 2.0;
        renderer.draw_circle(center, radius, color, Fill::Solid);
        renderer.draw_circle(center, radius, Color::WHITE, Fill::Outline(2.0));

        let style = TextStyle { size: 20.0, color: Color::WHITE, align: Align::Center };
        renderer.draw_text(self.kind.symbol(), center, &style);
    }
}
