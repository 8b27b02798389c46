/// Tunable game constants.
///
/// Timings suffixed `_ms` compare against the per-tick millisecond
/// timestamp; timings suffixed `_ticks` count update passes.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_frame_delay_ticks: u32,
    pub dash_distance: f32,
    pub dash_cooldown_ms: u64,

    // ── Projectiles ───────────────────────────────────────────────────────────
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    pub projectile_fire_delay_ticks: f32,

    // ── Power-ups ─────────────────────────────────────────────────────────────
    /// Chance per tick that a power-up appears.
    pub powerup_spawn_chance: f64,
    pub powerup_size: f32,
    /// How long a collected timed effect lasts.
    pub powerup_duration_ms: u64,
    /// How long an uncollected power-up stays on the field.
    pub powerup_lifespan_ms: u64,

    // ── Session ───────────────────────────────────────────────────────────────
    pub initial_lives: u32,
    pub cutscene_trigger_score: u32,
    pub cutscene_message_duration_ms: u64,
    pub difficulty_step_score: u32,
    pub difficulty_step: f32,
    pub screen_shake_ticks: u32,
    pub explosion_particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 900.0,
            screen_height: 700.0,
            fps: 60,

            player_speed: 5.0,
            player_frame_delay_ticks: 5,
            dash_distance: 80.0,
            dash_cooldown_ms: 1000,

            projectile_width: 20.0,
            projectile_height: 10.0,
            projectile_speed: 7.0,
            projectile_fire_delay_ticks: 14.0,

            powerup_spawn_chance: 0.002,
            powerup_size: 25.0,
            powerup_duration_ms: 5000,
            powerup_lifespan_ms: 10_000,

            initial_lives: 3,
            cutscene_trigger_score: 1000,
            cutscene_message_duration_ms: 3000,
            difficulty_step_score: 500,
            difficulty_step: 0.3,
            screen_shake_ticks: 10,
            explosion_particles: 15,
        }
    }
}
