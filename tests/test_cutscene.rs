mod common;

use sisters_quest::assets::ImageHandle;
use sisters_quest::cutscene::{Cutscene, MESSAGES};
use sisters_quest::entities::{Rect, Vec2};

use common::{DrawCall, RecordingRenderer};

fn cutscene() -> Cutscene {
    Cutscene::new(ImageHandle::new(10, 60.0, 60.0), 3_000)
}

#[test]
fn inactive_cutscene_reports_finished() {
    let mut scene = cutscene();
    assert!(!scene.is_active());
    assert!(scene.update(0));
}

#[test]
fn start_places_enemy_left_of_player() {
    let mut scene = cutscene();
    scene.start(&Rect::new(400.0, 300.0, 50.0, 50.0), 10_000);

    assert!(scene.is_active());
    assert_eq!(scene.stage(), 0);
    assert_eq!(scene.enemy_rect(), Some(Rect::new(340.0, 270.0, 60.0, 60.0)));
}

#[test]
fn each_line_shows_for_the_message_duration() {
    let mut scene = cutscene();
    scene.start(&Rect::new(400.0, 300.0, 50.0, 50.0), 10_000);

    assert!(!scene.update(12_999));
    assert_eq!(scene.stage(), 0);

    assert!(!scene.update(13_000));
    assert_eq!(scene.stage(), 1);

    assert!(!scene.update(15_999));
    assert!(scene.update(16_000));
    assert!(!scene.is_active());
}

#[test]
fn draw_puts_each_line_above_its_speaker() {
    let player = Rect::new(400.0, 300.0, 50.0, 50.0);
    let mut scene = cutscene();
    scene.start(&player, 0);

    let mut renderer = RecordingRenderer::default();
    scene.draw(&mut renderer, &player);
    assert!(renderer.calls.contains(&DrawCall::Image(
        ImageHandle::new(10, 60.0, 60.0),
        Vec2::new(340.0, 270.0),
        255,
    )));
    let line = renderer.calls.iter().find_map(|c| match c {
        DrawCall::Text(text, pos, _) => Some((text.clone(), *pos)),
        _ => None,
    });
    assert_eq!(line, Some((MESSAGES[0].to_string(), Vec2::new(340.0, 230.0))));

    scene.update(3_000);
    let mut renderer = RecordingRenderer::default();
    scene.draw(&mut renderer, &player);
    assert!(renderer.has_text(MESSAGES[1]));
    assert!(renderer.calls.iter().any(|c| matches!(c, DrawCall::Text(_, pos, _) if *pos == Vec2::new(400.0, 260.0))));
}

#[test]
fn finished_cutscene_draws_nothing() {
    let player = Rect::new(400.0, 300.0, 50.0, 50.0);
    let mut scene = cutscene();
    scene.start(&player, 0);
    scene.update(3_000);
    scene.update(6_000);

    let mut renderer = RecordingRenderer::default();
    scene.draw(&mut renderer, &player);
    assert!(renderer.calls.is_empty());
}
