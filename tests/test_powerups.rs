mod common;

use std::collections::HashSet;

use sisters_quest::entities::{Color, Vec2};
use sisters_quest::player::Effect;
use sisters_quest::powerup::{Collector, PowerUp, PowerUpKind};
use sisters_quest::render::Align;

use common::{player_at, rng, DrawCall, RecordingRenderer};

#[test]
fn every_kind_has_a_handler() {
    for kind in PowerUpKind::ALL {
        let mut player = player_at(Vec2::new(450.0, 350.0));
        let mut lives = 3;
        let apply = kind.effect();
        apply(&mut Collector { player: &mut player, lives: &mut lives }, 2_000);

        match kind {
            PowerUpKind::MultiLife => {
                assert_eq!(lives, 4);
                assert_eq!(player.effects, Default::default());
            }
            _ => {
                assert_eq!(lives, 3);
                let effect = kind.timed_effect().expect("timed kind");
                assert_eq!(player.effects.expires_at(effect), Some(7_000));
            }
        }
    }
}

#[test]
fn timed_kinds_map_to_matching_effects() {
    assert_eq!(PowerUpKind::Shield.timed_effect(), Some(Effect::Shield));
    assert_eq!(PowerUpKind::RapidFire.timed_effect(), Some(Effect::RapidFire));
    assert_eq!(PowerUpKind::SlowTime.timed_effect(), Some(Effect::SlowTime));
    assert_eq!(PowerUpKind::MultiLife.timed_effect(), None);
}

#[test]
fn kinds_have_distinct_colors_and_symbols() {
    assert_eq!(PowerUpKind::Shield.color(), Color::BLUE);
    assert_eq!(PowerUpKind::RapidFire.color(), Color::RED);
    assert_eq!(PowerUpKind::SlowTime.color(), Color::PURPLE);
    assert_eq!(PowerUpKind::MultiLife.color(), Color::GREEN);

    let symbols: HashSet<&str> = PowerUpKind::ALL.iter().map(|k| k.symbol()).collect();
    assert_eq!(symbols.len(), 4);
}

#[test]
fn random_spawns_cover_every_kind() {
    let mut rng = rng(3);
    let kinds: HashSet<PowerUpKind> = (0..200)
        .map(|_| PowerUp::spawn(Vec2::new(100.0, 100.0), 25.0, 0, &mut rng).kind)
        .collect();
    assert_eq!(kinds.len(), 4);
}

#[test]
fn powerup_expires_after_its_lifespan() {
    let mut powerup = PowerUp::new(PowerUpKind::Shield, Vec2::new(100.0, 100.0), 25.0, 1_000, 0.0);
    assert!(powerup.update(1_000, 10_000));
    assert!(powerup.update(10_999, 10_000));
    assert!(!powerup.update(11_000, 10_000));
}

#[test]
fn powerup_bobs_vertically_only() {
    let mut powerup = PowerUp::new(PowerUpKind::SlowTime, Vec2::new(100.0, 100.0), 25.0, 0, 0.0);

    // sin(0) = 0: no movement on the spawn tick
    powerup.update(0, 10_000);
    assert_eq!(powerup.rect.y, 100.0);

    powerup.update(100, 10_000);
    let expected = 100.0 + (0.5f32).sin() * 0.5;
    assert!((powerup.rect.y - expected).abs() < 1e-4);
    assert_eq!(powerup.rect.x, 100.0);
}

#[test]
fn draw_shows_glow_body_and_symbol() {
    let powerup = PowerUp::new(PowerUpKind::MultiLife, Vec2::new(100.0, 100.0), 25.0, 0, 0.0);
    let mut renderer = RecordingRenderer::default();
    powerup.draw(&mut renderer);

    let glows: Vec<u8> = renderer
        .calls
        .iter()
        .filter_map(|c| match c {
            DrawCall::Rect(_, color, alpha, _) if *color == Color::GREEN => Some(*alpha),
            _ => None,
        })
        .collect();
    assert_eq!(glows, vec![50, 35, 20]);

    let symbol = renderer.calls.iter().find_map(|c| match c {
        DrawCall::Text(text, pos, style) => Some((text.clone(), *pos, style.align)),
        _ => None,
    });
    assert_eq!(symbol, Some(("+".to_string(), Vec2::new(112.5, 112.5), Align::Center)));
}
