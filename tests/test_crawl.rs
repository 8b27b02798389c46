mod common;

use sisters_quest::crawl::{perspective_scale, OpeningCrawl, SCRIPT};
use sisters_quest::entities::Color;

use common::{rng, DrawCall, RecordingRenderer};

#[test]
fn lines_start_below_the_field_spaced_evenly() {
    let crawl = OpeningCrawl::new(900.0, 700.0);
    let positions = crawl.positions();
    assert_eq!(positions.len(), SCRIPT.len());
    assert_eq!(positions[0], 700.0);
    assert_eq!(positions[1], 750.0);
    assert_eq!(*positions.last().unwrap(), 1850.0);
}

#[test]
fn skip_is_allowed_after_sixty_ticks() {
    let mut crawl = OpeningCrawl::new(900.0, 700.0);
    for _ in 0..60 {
        crawl.update();
    }
    assert!(!crawl.can_skip());
    crawl.update();
    assert!(crawl.can_skip());
}

#[test]
fn completes_once_when_the_last_line_clears_the_top() {
    let mut crawl = OpeningCrawl::new(900.0, 700.0);
    for tick in 1..=1300 {
        assert!(!crawl.update(), "completed early at tick {tick}");
    }
    assert!(crawl.update());

    // Latched: later ticks neither report completion again nor scroll
    let last = *crawl.positions().last().unwrap();
    assert!(!crawl.update());
    assert_eq!(*crawl.positions().last().unwrap(), last);
}

#[test]
fn reset_rewinds_the_scroll() {
    let mut crawl = OpeningCrawl::new(900.0, 700.0);
    for _ in 0..100 {
        crawl.update();
    }
    crawl.reset();
    assert_eq!(crawl.positions()[0], 700.0);
    assert!(!crawl.can_skip());
}

#[test]
fn perspective_shrinks_lines_near_the_top() {
    assert_eq!(perspective_scale(500.0, 700.0), 1.0);
    assert_eq!(perspective_scale(280.0, 700.0), 1.0);
    assert!((perspective_scale(90.0, 700.0) - 0.5).abs() < 1e-4);
    assert_eq!(perspective_scale(-100.0, 700.0), 0.3);
}

#[test]
fn draw_shows_stars_and_only_visible_lines() {
    let crawl = OpeningCrawl::new(900.0, 700.0);
    let mut renderer = RecordingRenderer::default();
    crawl.draw(&mut renderer, &mut rng(1));

    assert_eq!(renderer.calls[0], DrawCall::Clear(Color::CRAWL_BACKGROUND));
    let stars = renderer.calls.iter().filter(|c| matches!(c, DrawCall::Circle(..))).count();
    assert_eq!(stars, 50);
    assert_eq!(renderer.texts(), vec![SCRIPT[0].1, SCRIPT[1].1]);
}

#[test]
fn skip_hint_appears_once_skippable() {
    let mut crawl = OpeningCrawl::new(900.0, 700.0);
    for _ in 0..61 {
        crawl.update();
    }
    let mut renderer = RecordingRenderer::default();
    crawl.draw(&mut renderer, &mut rng(1));
    assert!(renderer.has_text("Press any key to skip"));
}
