mod common;

use sisters_quest::entities::{Rect, Vec2};
use sisters_quest::input::{InputSnapshot, Key};
use sisters_quest::player::Effect;
use sisters_quest::powerup::PowerUpKind;

use common::{field, player_at, PLAYER_SIZE};

fn held(keys: &[Key]) -> InputSnapshot {
    keys.iter().fold(InputSnapshot::new(), |s, &k| s.with(k))
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn moves_by_speed_per_held_key() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.move_by_input(&held(&[Key::Right, Key::Down]), &field());
    assert_eq!(player.center(), Vec2::new(455.0, 355.0));

    player.move_by_input(&held(&[Key::Left, Key::Up]), &field());
    assert_eq!(player.center(), Vec2::new(450.0, 350.0));
}

#[test]
fn slow_time_speeds_the_player_up() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.activate(Effect::SlowTime, 0);
    player.move_by_input(&held(&[Key::Right]), &field());
    assert_eq!(player.center().x, 457.5);
}

#[test]
fn movement_is_clamped_to_the_field() {
    let mut player = player_at(Vec2::new(30.0, 30.0));
    for _ in 0..20 {
        player.move_by_input(&held(&[Key::Left, Key::Up]), &field());
    }
    assert_eq!((player.rect.x, player.rect.y), (0.0, 0.0));
}

#[test]
fn frozen_player_ignores_input_and_does_not_animate() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.frozen = true;
    player.move_by_input(&held(&[Key::Right]), &field());
    for t in 0..20 {
        player.update(t);
    }
    assert_eq!(player.center(), Vec2::new(450.0, 350.0));
    assert_eq!(player.current_frame(), 0);
}

#[test]
fn animation_advances_every_frame_delay_ticks_and_wraps() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    for t in 0..4 {
        player.update(t);
    }
    assert_eq!(player.current_frame(), 0);
    player.update(4);
    assert_eq!(player.current_frame(), 1);

    // Three frames, five ticks each
    for t in 5..15 {
        player.update(t);
    }
    assert_eq!(player.current_frame(), 0);
}

// ── Dash ──────────────────────────────────────────────────────────────────────

#[test]
fn fresh_player_can_dash_immediately() {
    let player = player_at(Vec2::new(450.0, 350.0));
    assert!(player.dash_ready(0));
    assert_eq!(player.last_dash(), None);
}

#[test]
fn dash_without_direction_goes_right_and_leaves_trail() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    assert!(player.try_dash(&held(&[Key::Dash]), 5_000, &field()));

    assert_eq!(player.center(), Vec2::new(530.0, 350.0));
    assert_eq!(player.last_dash(), Some(5_000));

    let alphas: Vec<i32> = player.dash_trail().iter().map(|p| p.alpha).collect();
    assert_eq!(alphas, vec![150, 120, 90, 60, 30]);

    // First trail point sits at the old position, the rest lerp towards the new one
    let expected = [450.0, 466.0, 482.0, 498.0, 514.0];
    for (point, x) in player.dash_trail().iter().zip(expected) {
        assert!((point.center.x - x).abs() < 1e-3, "{} vs {x}", point.center.x);
        assert_eq!(point.center.y, 350.0);
    }
}

#[test]
fn diagonal_dash_is_scaled_per_axis() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    assert!(player.try_dash(&held(&[Key::DashAlt, Key::Right, Key::Up]), 0, &field()));

    let c = player.center();
    assert!((c.x - (450.0 + 80.0 * 0.707)).abs() < 1e-3);
    assert!((c.y - (350.0 - 80.0 * 0.707)).abs() < 1e-3);
}

#[test]
fn dash_respects_cooldown() {
    let mut player = player_at(Vec2::new(200.0, 350.0));
    let dash = held(&[Key::Dash, Key::Right]);

    assert!(player.try_dash(&dash, 5_000, &field()));
    let after_first = player.center();

    assert!(!player.try_dash(&dash, 5_500, &field()));
    assert!(!player.try_dash(&dash, 6_000, &field()));
    assert_eq!(player.center(), after_first);

    assert!(player.try_dash(&dash, 6_001, &field()));
    assert_eq!(player.center().x, after_first.x + 80.0);
}

#[test]
fn dash_needs_a_dash_key() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    assert!(!player.try_dash(&held(&[Key::Right]), 0, &field()));
    assert!(player.dash_trail().is_empty());
}

#[test]
fn dash_is_clamped_to_the_field() {
    let mut player = player_at(Vec2::new(870.0, 350.0));
    assert!(player.try_dash(&held(&[Key::Dash]), 0, &field()));
    assert_eq!(player.rect.right(), 900.0);
}

#[test]
fn trail_fades_and_is_dropped_at_zero() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.try_dash(&held(&[Key::Dash]), 0, &field());

    player.update(1);
    let alphas: Vec<i32> = player.dash_trail().iter().map(|p| p.alpha).collect();
    assert_eq!(alphas, vec![120, 90, 60, 30]);

    for t in 2..6 {
        player.update(t);
    }
    assert!(player.dash_trail().is_empty());
}

// ── Timed effects ─────────────────────────────────────────────────────────────

#[test]
fn effects_expire_once_their_time_is_reached() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.activate(Effect::Shield, 1_000);
    assert_eq!(player.effects.expires_at(Effect::Shield), Some(6_000));

    player.update(5_999);
    assert!(player.shield_active());

    player.update(6_000);
    assert!(!player.shield_active());
    assert_eq!(player.effects.expires_at(Effect::Shield), None);
}

#[test]
fn reactivation_refreshes_instead_of_stacking() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.activate(Effect::RapidFire, 1_000);
    player.activate(Effect::RapidFire, 3_000);
    assert_eq!(player.effects.expires_at(Effect::RapidFire), Some(8_000));
}

#[test]
fn powerup_kinds_map_to_their_effects() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.activate_powerup(PowerUpKind::SlowTime, 0);
    player.activate_powerup(PowerUpKind::MultiLife, 0);

    assert!(player.slow_time_active());
    assert!(!player.shield_active());
    assert!(!player.rapid_fire_active());
}

#[test]
fn reset_clears_effects_trail_and_cooldown() {
    let mut player = player_at(Vec2::new(450.0, 350.0));
    player.activate(Effect::Shield, 0);
    player.try_dash(&held(&[Key::Dash]), 100, &field());
    player.frozen = true;

    player.reset(Vec2::new(100.0, 100.0));
    assert_eq!(player.center(), Vec2::new(100.0, 100.0));
    assert_eq!(player.rect, Rect::from_center(Vec2::new(100.0, 100.0), PLAYER_SIZE, PLAYER_SIZE));
    assert!(!player.frozen);
    assert!(!player.shield_active());
    assert!(player.dash_trail().is_empty());
    assert!(player.dash_ready(100));
}
