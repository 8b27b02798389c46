/// Scrolling-text opening sequence.

use rand::Rng;

use crate::entities::{Color, Vec2};
use crate::render::{Fill, Renderer, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Intro,
    Title,
    Text,
    Blank,
}

impl LineStyle {
    fn text_style(self) -> TextStyle {
        match self {
            LineStyle::Intro => TextStyle::centered(32.0, Color::CYAN),
            LineStyle::Title => TextStyle::centered(48.0, Color::YELLOW),
            LineStyle::Text | LineStyle::Blank => TextStyle::centered(28.0, Color::YELLOW),
        }
    }
}

pub const SCRIPT: [(LineStyle, &str); 24] = [
    (LineStyle::Intro, "A long time ago in a galaxy far,"),
    (LineStyle::Intro, "far away...."),
    (LineStyle::Blank, ""),
    (LineStyle::Title, "THE ARCADE ADVENTURE"),
    (LineStyle::Title, "SISTER'S QUEST"),
    (LineStyle::Blank, ""),
    (LineStyle::Text, "In a digital realm of endless"),
    (LineStyle::Text, "projectiles and ancient evils,"),
    (LineStyle::Text, "a brave hero searches for"),
    (LineStyle::Text, "their missing sister."),
    (LineStyle::Blank, ""),
    (LineStyle::Text, "Armed only with quick reflexes"),
    (LineStyle::Text, "and mysterious power-ups,"),
    (LineStyle::Text, "they must survive the"),
    (LineStyle::Text, "relentless assault while"),
    (LineStyle::Text, "uncovering the truth behind"),
    (LineStyle::Text, "their sister's disappearance."),
    (LineStyle::Blank, ""),
    (LineStyle::Text, "The enemy grows stronger"),
    (LineStyle::Text, "with each passing moment,"),
    (LineStyle::Text, "but hope remains as long"),
    (LineStyle::Text, "as the hero keeps fighting..."),
    (LineStyle::Blank, ""),
    (LineStyle::Text, "Will you find her?"),
];

const LINE_SPACING: f32 = 50.0;
const SCROLL_SPEED: f32 = 1.5;
/// Lines this far outside the field are neither drawn nor "on screen".
const MARGIN: f32 = 100.0;
const SKIP_AFTER_TICKS: u32 = 60;
const STAR_COUNT: usize = 50;
/// Lines above this fraction of the field height shrink with distance.
const PERSPECTIVE_ZONE: f32 = 0.4;
const MIN_SCALE: f32 = 0.3;

#[derive(Clone, Copy, Debug)]
struct CrawlLine {
    style: TextStyle,
    text: &'static str,
}

#[derive(Clone, Debug)]
pub struct OpeningCrawl {
    lines: Vec<CrawlLine>,
    positions: Vec<f32>,
    skip_timer: u32,
    can_skip: bool,
    complete: bool,
    width: f32,
    height: f32,
}

impl OpeningCrawl {
    pub fn new(width: f32, height: f32) -> Self {
        let lines = SCRIPT
            .iter()
            .map(|&(style, text)| CrawlLine { style: style.text_style(), text })
            .collect();
        let mut crawl = Self {
            lines,
            positions: Vec::new(),
            skip_timer: 0,
            can_skip: false,
            complete: false,
            width,
            height,
        };
        crawl.reset();
        crawl
    }

    /// Rewind to the first frame: every line below the bottom edge.
    pub fn reset(&mut self) {
        self.positions = (0..self.lines.len())
            .map(|i| self.height + i as f32 * LINE_SPACING)
            .collect();
        self.skip_timer = 0;
        self.can_skip = false;
        self.complete = false;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn can_skip(&self) -> bool {
        self.can_skip
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Scroll one tick.  Returns `true` on the single tick the last line
    /// clears the top margin.
    pub fn update(&mut self) -> bool {
        if self.complete {
            return false;
        }

        for y in &mut self.positions {
            *y -= SCROLL_SPEED;
        }

        if self.positions.last().map_or(true, |&y| y < -MARGIN) {
            self.complete = true;
            return true;
        }

        self.skip_timer += 1;
        if self.skip_timer > SKIP_AFTER_TICKS {
            self.can_skip = true;
        }

        false
    }

    pub fn draw(&self, renderer: &mut impl Renderer, rng: &mut impl Rng) {
        renderer.clear(Color::CRAWL_BACKGROUND);

        // Fresh stars every frame, which reads as twinkling.
        for _ in 0..STAR_COUNT {
            let x = rng.gen_range(0.0..=self.width);
            let y = rng.gen_range(0.0..=self.height);
            let b: u8 = rng.gen_range(100..=255);
            renderer.draw_circle(Vec2::new(x, y), 1.0, Color::rgb(b, b, b), Fill::Solid);
        }

        let cx = self.width / 2.0;
        for (line, &y) in self.lines.iter().zip(&self.positions) {
            if y <= -MARGIN || y >= self.height + MARGIN || line.text.is_empty() {
                continue;
            }
            let scale = perspective_scale(y, self.height);
            let style = line.style.scaled(scale);
            // Centre-aligned text is positioned by its middle.
            let pos = Vec2::new(cx, y + style.size / 2.0);
            renderer.draw_text(line.text, pos, &style);
        }

        if self.can_skip {
            let hint = TextStyle::new(24.0, Color::WHITE);
            renderer.draw_text("Press any key to skip...", Vec2::new(10.0, self.height - 30.0), &hint);
        }
    }
}

/// 1.0 in the lower field; shrinking towards `MIN_SCALE` as a line rises
/// through the upper `PERSPECTIVE_ZONE` of the field.
pub fn perspective_scale(y: f32, height: f32) -> f32 {
    let zone = height * PERSPECTIVE_ZONE;
    if y >= zone {
        return 1.0;
    }
    ((y + MARGIN) / (zone + MARGIN)).clamp(MIN_SCALE, 1.0)
}
