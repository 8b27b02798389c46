/// Enemy fire: spawning, advancement, culling and collision with the player.

use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Color, Rect};
use crate::player::Player;
use crate::render::{Fill, Renderer};

const TRAIL_LEN: usize = 5;
/// World speed while the player's slow-time effect is active.
const SLOW_TIME_FACTOR: f32 = 0.3;
/// At or above this difficulty two projectiles spawn per volley.
const DOUBLE_VOLLEY_DIFFICULTY: f32 = 2.0;

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    pub speed: f32,
    trail: VecDeque<(f32, f32)>,
}

impl Projectile {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self { rect, speed, trail: VecDeque::with_capacity(TRAIL_LEN + 1) }
    }

    /// Recent centre positions, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.trail.iter().copied()
    }

    /// Advance one tick.  Returns `false` once fully past `right_edge`.
    fn update(&mut self, time_multiplier: f32, right_edge: f32) -> bool {
        let c = self.rect.center();
        self.trail.push_back((c.x, c.y));
        if self.trail.len() > TRAIL_LEN {
            self.trail.pop_front();
        }

        self.rect.x += self.speed * time_multiplier;
        self.rect.x <= right_edge
    }

    fn draw(&self, renderer: &mut impl Renderer) {
        let trail_color = Color::RED.brightened(50);
        // The newest trail point sits under the body; skip it.
        let shown = self.trail.len().saturating_sub(1);
        for (i, &(cx, cy)) in self.trail.iter().take(shown).enumerate() {
            let alpha = ((i + 1) * 40).min(255) as u8;
            let ghost = Rect::new(cx - self.rect.w / 2.0, cy - self.rect.h / 2.0, self.rect.w, self.rect.h);
            renderer.draw_rect(ghost, trail_color, alpha, Fill::Solid);
        }

        renderer.draw_rect(self.rect, Color::RED, 255, Fill::Solid);
        renderer.draw_rect(self.rect, Color::WHITE, 255, Fill::Outline(1.0));
    }
}

#[derive(Clone, Debug)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    fire_counter: u32,
    active: bool,
    difficulty: f32,
    base_fire_delay: f32,
    base_speed: f32,
    size: (f32, f32),
    step_score: u32,
    step: f32,
}

impl ProjectileManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            projectiles: Vec::new(),
            fire_counter: 0,
            active: true,
            difficulty: 1.0,
            base_fire_delay: config.projectile_fire_delay_ticks,
            base_speed: config.projectile_speed,
            size: (config.projectile_width, config.projectile_height),
            step_score: config.difficulty_step_score.max(1),
            step: config.difficulty_step,
        }
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    /// Ticks between volleys for the current difficulty and player effects.
    /// Rapid-fire on the player halves the enemy fire rate.
    pub fn fire_delay(&self, player: &Player) -> f32 {
        let delay = self.base_fire_delay / self.difficulty;
        if player.rapid_fire_active() {
            delay * 2.0
        } else {
            delay
        }
    }

    pub fn push(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn update(&mut self, player: &Player, bounds: &Rect, rng: &mut impl Rng) {
        if !self.active {
            return;
        }

        let fire_delay = self.fire_delay(player);
        let time_multiplier = if player.slow_time_active() { SLOW_TIME_FACTOR } else { 1.0 };

        self.fire_counter += 1;
        if self.fire_counter as f32 >= fire_delay {
            self.fire_counter = 0;
            let volley = if self.difficulty < DOUBLE_VOLLEY_DIFFICULTY { 1 } else { 2 };
            for _ in 0..volley {
                self.spawn(bounds, rng);
            }
        }

        let right_edge = bounds.right();
        self.projectiles.retain_mut(|p| p.update(time_multiplier, right_edge));
    }

    fn spawn(&mut self, bounds: &Rect, rng: &mut impl Rng) {
        let (w, h) = self.size;
        let max_y = (bounds.h - h).max(0.0);
        let y = bounds.y + rng.gen_range(0.0..=max_y);
        let speed = self.base_speed * rng.gen_range(0.8..=1.2) * self.difficulty;
        self.projectiles.push(Projectile::new(Rect::new(bounds.x, y, w, h), speed));
    }

    /// Register at most one hit: removes the first projectile overlapping
    /// `player_bounds`.  Never hits while the shield is up.
    pub fn check_collision(&mut self, player_bounds: &Rect, player: &Player) -> bool {
        if player.shield_active() {
            return false;
        }

        match self.projectiles.iter().position(|p| p.rect.intersects(player_bounds)) {
            Some(i) => {
                self.projectiles.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn update_difficulty(&mut self, score: u32) {
        let next = difficulty_for(score, self.step_score, self.step);
        if next != self.difficulty {
            debug!(score, difficulty = next, "difficulty changed");
        }
        self.difficulty = next;
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        for projectile in &self.projectiles {
            projectile.draw(renderer);
        }
    }
}

/// `1.0 + floor(score / step_score) * step`.
pub fn difficulty_for(score: u32, step_score: u32, step: f32) -> f32 {
    1.0 + (score / step_score.max(1)) as f32 * step
}
