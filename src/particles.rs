/// Cosmetic particle effects.  Nothing in gameplay reads these back.

use rand::Rng;

use crate::entities::{Color, Vec2};
use crate::render::{Fill, Renderer};

const GRAVITY: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub radius: f32,
}

impl Particle {
    /// Advance one tick.  Returns `false` once the particle has expired.
    fn update(&mut self) -> bool {
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
        self.vel.y += GRAVITY;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }

    /// Remaining fraction of life, 1.0 at spawn down to 0.0.
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Burst of `count` particles thrown outwards and upwards.
    pub fn add_explosion(&mut self, pos: Vec2, color: Color, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let vel = Vec2::new(rng.gen_range(-3.0..=3.0), rng.gen_range(-5.0..=-1.0));
            let lifetime = rng.gen_range(20..=40);
            self.spawn(pos, vel, color, lifetime, rng);
        }
    }

    /// Single slow, short-lived particle.
    pub fn add_trail(&mut self, pos: Vec2, color: Color, rng: &mut impl Rng) {
        let vel = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        let lifetime = rng.gen_range(10..=20);
        self.spawn(pos, vel, color, lifetime, rng);
    }

    fn spawn(&mut self, pos: Vec2, vel: Vec2, color: Color, lifetime: u32, rng: &mut impl Rng) {
        self.particles.push(Particle {
            pos,
            vel,
            color,
            lifetime,
            max_lifetime: lifetime,
            radius: rng.gen_range(2..=5) as f32,
        });
    }

    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::update);
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        for p in &self.particles {
            let alpha = p.alpha();
            if alpha > 0.0 {
                renderer.draw_circle(p.pos, p.radius, p.color.scaled(alpha), Fill::Solid);
            }
        }
    }
}
