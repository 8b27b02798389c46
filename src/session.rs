/// Top-level state machine: owns every entity and drives one tick at a time.
///
/// `OpeningCrawl → Menu → Playing ⇄ Cutscene`, `Playing → GameOver → Menu`.
/// The session never reads the clock or polls devices itself: each tick is
/// `(state, now, input) → state'`, with all randomness drawn from the
/// injected `rng`.

use rand::Rng;
use tracing::{debug, info};

use crate::assets::{AssetStore, GameAssets};
use crate::audio::{self, AudioPlayer};
use crate::config::GameConfig;
use crate::crawl::OpeningCrawl;
use crate::cutscene::Cutscene;
use crate::entities::{Color, GameStatus, Rect, Vec2};
use crate::error::Result;
use crate::input::{InputEvent, InputSnapshot};
use crate::particles::ParticleSystem;
use crate::player::{Effect, Player};
use crate::powerup::{Collector, PowerUp};
use crate::projectile::ProjectileManager;
use crate::render::{Renderer, Shifted, TextStyle};

/// Power-ups spawn at least this far inside the field edges.
const POWERUP_MARGIN: f32 = 50.0;

pub struct GameSession<R: Rng> {
    config: GameConfig,
    assets: GameAssets,
    status: GameStatus,
    lives: u32,
    score: u32,
    field: Rect,
    player: Player,
    projectiles: ProjectileManager,
    particles: ParticleSystem,
    powerups: Vec<PowerUp>,
    cutscene: Cutscene,
    crawl: OpeningCrawl,
    cutscene_triggered: bool,
    screen_shake: u32,
    shake_offset: Vec2,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: GameConfig, assets: GameAssets, rng: R) -> Self {
        let field = Rect::new(0.0, 0.0, config.screen_width, config.screen_height);
        let player = Player::new(assets.player_frames.clone(), field.center(), &config);
        let cutscene = Cutscene::new(assets.enemy, config.cutscene_message_duration_ms);
        Self {
            projectiles: ProjectileManager::new(&config),
            crawl: OpeningCrawl::new(field.w, field.h),
            lives: config.initial_lives,
            status: GameStatus::OpeningCrawl,
            score: 0,
            particles: ParticleSystem::new(),
            powerups: Vec::new(),
            cutscene_triggered: false,
            screen_shake: 0,
            shake_offset: Vec2::ZERO,
            field,
            player,
            cutscene,
            assets,
            config,
            rng,
        }
    }

    /// Resolve every asset up front; a missing key aborts before play.
    pub fn from_store(config: GameConfig, store: &impl AssetStore, rng: R) -> Result<Self> {
        let assets = GameAssets::load(store)?;
        Ok(Self::new(config, assets, rng))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut ProjectileManager {
        &mut self.projectiles
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    pub fn add_powerup(&mut self, powerup: PowerUp) {
        self.powerups.push(powerup);
    }

    pub fn cutscene(&self) -> &Cutscene {
        &self.cutscene
    }

    pub fn cutscene_triggered(&self) -> bool {
        self.cutscene_triggered
    }

    pub fn crawl(&self) -> &OpeningCrawl {
        &self.crawl
    }

    pub fn screen_shake(&self) -> u32 {
        self.screen_shake
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    /// Where the menu's start button sits for the current field size.
    pub fn start_button(&self) -> Rect {
        let button = &self.assets.start_button;
        Rect::from_center(self.field.center(), button.width, button.height)
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    pub fn skip_to_menu(&mut self) {
        self.status = GameStatus::Menu;
        info!("opening crawl skipped");
    }

    /// Menu → Playing with a fresh round.
    pub fn start_game<A: AudioPlayer + ?Sized>(&mut self, audio: &mut A) {
        self.status = GameStatus::Playing;
        self.lives = self.config.initial_lives;
        self.score = 0;
        self.cutscene_triggered = false;
        self.player.reset(self.field.center());
        self.projectiles.clear();
        self.projectiles.set_active(true);
        self.projectiles.update_difficulty(0);
        self.powerups.clear();
        self.particles.clear();
        self.screen_shake = 0;
        self.shake_offset = Vec2::ZERO;
        audio::play_music_loop(audio, &self.assets.music);
        info!(lives = self.lives, "new game started");
    }

    /// GameOver → Menu.
    pub fn return_to_menu<A: AudioPlayer + ?Sized>(&mut self, audio: &mut A) {
        self.status = GameStatus::Menu;
        audio.stop_music();
        info!("returned to menu");
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Rect::new(0.0, 0.0, width.max(1.0), height.max(1.0));
        self.player.rect.clamp_within(&self.field);
        self.crawl.resize(self.field.w, self.field.h);
        debug!(width = self.field.w, height = self.field.h, "play-field resized");
    }

    /// Apply one discrete event.  Returns `false` when the game should quit.
    pub fn handle_event<A: AudioPlayer + ?Sized>(&mut self, event: &InputEvent, audio: &mut A) -> bool {
        let status = self.status;
        match *event {
            InputEvent::Quit => return false,
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::PointerDown(pos) => match status {
                GameStatus::Menu if self.start_button().contains_point(pos) => self.start_game(audio),
                GameStatus::GameOver => self.return_to_menu(audio),
                _ => {}
            },
            InputEvent::Confirm => match status {
                GameStatus::Menu => self.start_game(audio),
                GameStatus::GameOver => self.return_to_menu(audio),
                GameStatus::OpeningCrawl if self.crawl.can_skip() => self.skip_to_menu(),
                _ => {}
            },
            InputEvent::AnyKey => {
                if status == GameStatus::OpeningCrawl && self.crawl.can_skip() {
                    self.skip_to_menu();
                }
            }
        }
        true
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    pub fn update<A: AudioPlayer + ?Sized>(&mut self, input: &InputSnapshot, now: u64, audio: &mut A) {
        match self.status {
            GameStatus::OpeningCrawl => {
                if self.crawl.update() {
                    self.status = GameStatus::Menu;
                    info!("opening crawl finished");
                }
            }
            GameStatus::Playing => self.update_playing(input, now, audio),
            GameStatus::Cutscene => {
                if self.cutscene.update(now) {
                    self.status = GameStatus::Playing;
                    self.player.frozen = false;
                    self.projectiles.set_active(true);
                    info!(score = self.score, "cutscene finished");
                }
            }
            GameStatus::Menu | GameStatus::GameOver => {}
        }
    }

    fn update_playing<A: AudioPlayer + ?Sized>(&mut self, input: &InputSnapshot, now: u64, audio: &mut A) {
        if !self.cutscene_triggered && self.score >= self.config.cutscene_trigger_score {
            self.cutscene_triggered = true;
            self.status = GameStatus::Cutscene;
            self.cutscene.start(&self.player.rect, now);
            self.player.frozen = true;
            self.projectiles.set_active(false);
            info!(score = self.score, "cutscene started");
            return;
        }

        self.player.move_by_input(input, &self.field);
        if self.player.try_dash(input, now, &self.field) {
            self.particles.add_trail(self.player.center(), Color::CYAN, &mut self.rng);
            debug!(now, "dash");
        }
        self.player.update(now);

        self.projectiles.update_difficulty(self.score);
        self.projectiles.update(&self.player, &self.field, &mut self.rng);
        self.particles.update();

        self.update_powerups(now);
        self.collect_powerups(now);
        self.resolve_hit(audio);

        if self.screen_shake > 0 {
            self.screen_shake -= 1;
            let s = self.screen_shake as i32;
            self.shake_offset = Vec2::new(
                self.rng.gen_range(-s..=s) as f32,
                self.rng.gen_range(-s..=s) as f32,
            );
        } else {
            self.shake_offset = Vec2::ZERO;
        }

        self.score += 1;
    }

    fn update_powerups(&mut self, now: u64) {
        let lifespan = self.config.powerup_lifespan_ms;
        self.powerups.retain_mut(|p| p.update(now, lifespan));

        if self.rng.gen_bool(self.config.powerup_spawn_chance.clamp(0.0, 1.0)) {
            let size = self.config.powerup_size;
            let x = self.random_interior(self.field.x, self.field.right());
            let y = self.random_interior(self.field.y, self.field.bottom());
            let powerup = PowerUp::spawn(Vec2::new(x, y), size, now, &mut self.rng);
            debug!(kind = ?powerup.kind, x, y, "power-up spawned");
            self.powerups.push(powerup);
        }
    }

    fn random_interior(&mut self, min: f32, max: f32) -> f32 {
        let lo = min + POWERUP_MARGIN;
        let hi = (max - POWERUP_MARGIN).max(lo);
        self.rng.gen_range(lo..=hi)
    }

    fn collect_powerups(&mut self, now: u64) {
        let mut remaining = Vec::with_capacity(self.powerups.len());
        for powerup in std::mem::take(&mut self.powerups) {
            if !powerup.rect.intersects(&self.player.rect) {
                remaining.push(powerup);
                continue;
            }

            let apply = powerup.kind.effect();
            apply(&mut Collector { player: &mut self.player, lives: &mut self.lives }, now);
            self.particles.add_explosion(
                powerup.rect.center(),
                powerup.kind.color(),
                self.config.explosion_particles,
                &mut self.rng,
            );
            debug!(kind = ?powerup.kind, lives = self.lives, "power-up collected");
        }
        self.powerups = remaining;
    }

    fn resolve_hit<A: AudioPlayer + ?Sized>(&mut self, audio: &mut A) {
        if !self.projectiles.check_collision(&self.player.rect, &self.player) {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        audio::play_sound(audio, &self.assets.hit_sound);
        self.screen_shake = self.config.screen_shake_ticks;
        self.particles.add_explosion(
            self.player.center(),
            Color::RED,
            self.config.explosion_particles,
            &mut self.rng,
        );
        debug!(lives = self.lives, "player hit");

        if self.lives == 0 {
            self.status = GameStatus::GameOver;
            audio.stop_music();
            audio::play_sound(audio, &self.assets.game_over_sound);
            info!(score = self.score, "game over");
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Issue the draw calls for the current state.  Presenting the frame is
    /// left to the caller.
    pub fn draw<D: Renderer>(&mut self, renderer: &mut D, now: u64) {
        match self.status {
            GameStatus::OpeningCrawl => self.crawl.draw(renderer, &mut self.rng),
            GameStatus::Menu => self.draw_menu(renderer),
            GameStatus::Playing => self.draw_game(renderer, now),
            GameStatus::Cutscene => {
                self.draw_game(renderer, now);
                self.cutscene.draw(renderer, &self.player.rect);
            }
            GameStatus::GameOver => self.draw_game_over(renderer),
        }
    }

    fn draw_menu<D: Renderer>(&self, renderer: &mut D) {
        renderer.clear(Color::BACKGROUND);

        let bg = &self.assets.menu_background;
        let bg_pos = Vec2::new((self.field.w - bg.width) / 2.0, self.field.h * 0.15);
        renderer.draw_image(bg, bg_pos, 255);

        let button = self.start_button();
        renderer.draw_image(&self.assets.start_button, Vec2::new(button.x, button.y), 255);

        let controls = [
            "Controls:",
            "WASD or Arrow Keys - Move",
            "Space or Tab - Dash",
            "",
            "Power-ups:",
            "S - Shield",
            "R - Slow Projectiles",
            "T - Slow Time",
            "+ - Extra Life",
        ];
        for (i, text) in controls.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let style = if i == 0 || i == 4 {
                TextStyle::new(40.0, Color::YELLOW)
            } else {
                TextStyle::new(24.0, Color::WHITE)
            };
            renderer.draw_text(text, Vec2::new(50.0, 50.0 + i as f32 * 25.0), &style);
        }
    }

    fn draw_game<D: Renderer>(&self, renderer: &mut D, now: u64) {
        renderer.clear(Color::BACKGROUND);
        {
            let mut shaken = Shifted::new(&mut *renderer, self.shake_offset);
            self.player.draw(&mut shaken, now);
            self.projectiles.draw(&mut shaken);
            self.particles.draw(&mut shaken);
            for powerup in &self.powerups {
                powerup.draw(&mut shaken);
            }
        }
        self.draw_hud(renderer, now);
    }

    fn draw_hud<D: Renderer>(&self, renderer: &mut D, now: u64) {
        let big = TextStyle::new(40.0, Color::WHITE);
        renderer.draw_text(&format!("Lives: {}", self.lives), Vec2::new(10.0, 10.0), &big);
        renderer.draw_text(&format!("Score: {}", self.score), Vec2::new(10.0, 50.0), &big);

        let difficulty = (self.projectiles.difficulty() * 10.0).floor() / 10.0;
        renderer.draw_text(
            &format!("Difficulty: {difficulty:.1}x"),
            Vec2::new(10.0, 90.0),
            &TextStyle::new(24.0, Color::YELLOW),
        );

        let right = self.field.w - 150.0;
        let (dash_text, dash_color) = if self.player.dash_ready(now) {
            ("DASH READY", Color::GREEN)
        } else {
            ("DASH COOLDOWN", Color::RED)
        };
        renderer.draw_text(dash_text, Vec2::new(right, 10.0), &TextStyle::new(24.0, dash_color));

        let effects = &self.player.effects;
        let indicators = [
            (effects.expires_at(Effect::Shield), "SHIELD", Color::BLUE, right),
            (
                effects.expires_at(Effect::RapidFire),
                "SLOW PROJECTILES",
                Color::RED,
                self.field.w - 200.0,
            ),
            (effects.expires_at(Effect::SlowTime), "SLOW TIME", Color::PURPLE, right),
        ];
        let mut y = 40.0;
        for (expiry, label, color, x) in indicators {
            let Some(expiry) = expiry else { continue };
            let secs = expiry.saturating_sub(now) as f32 / 1000.0;
            renderer.draw_text(
                &format!("{label}: {secs:.1}s"),
                Vec2::new(x, y),
                &TextStyle::new(24.0, color),
            );
            y += 25.0;
        }

        let trigger = self.config.cutscene_trigger_score;
        if !self.cutscene_triggered && self.score < trigger {
            renderer.draw_text(
                &format!("Story Event in: {}", trigger - self.score),
                Vec2::new(self.field.w / 2.0, 30.0),
                &TextStyle::centered(24.0, Color::CYAN),
            );
        }
    }

    fn draw_game_over<D: Renderer>(&self, renderer: &mut D) {
        renderer.clear(Color::BACKGROUND);
        let cx = self.field.w / 2.0;
        let cy = self.field.h / 2.0;

        let glow = TextStyle::centered(40.0, Color::rgb(100, 0, 0));
        for (dx, dy) in [(2.0, 2.0), (-2.0, -2.0), (2.0, -2.0), (-2.0, 2.0)] {
            renderer.draw_text("Game Over!", Vec2::new(cx + dx, cy - 50.0 + dy), &glow);
        }
        renderer.draw_text("Game Over!", Vec2::new(cx, cy - 50.0), &TextStyle::centered(40.0, Color::RED));

        renderer.draw_text(
            &format!("Final Score: {}", self.score),
            Vec2::new(cx, cy),
            &TextStyle::centered(40.0, Color::WHITE),
        );

        let (label, color) = rating(self.score);
        renderer.draw_text(label, Vec2::new(cx, cy + 30.0), &TextStyle::centered(24.0, color));

        renderer.draw_text(
            "Click anywhere or press Enter to return to menu",
            Vec2::new(cx, cy + 80.0),
            &TextStyle::centered(24.0, Color::WHITE),
        );
    }
}

/// Performance label shown on the game-over screen.
pub fn rating(score: u32) -> (&'static str, Color) {
    match score {
        5000.. => ("LEGENDARY!", Color::YELLOW),
        3000.. => ("AMAZING!", Color::ORANGE),
        1500.. => ("GREAT!", Color::GREEN),
        1000.. => ("GOOD!", Color::BLUE),
        _ => ("Keep Trying!", Color::WHITE),
    }
}
