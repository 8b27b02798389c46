/// Shared value types: geometry, colours and the top-level game status.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`.
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned box in play-field units.  `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Grow (or shrink) around the same centre.
    pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
        Rect::from_center(self.center(), self.w + dw, self.h + dh)
    }

    /// Move the rect so it lies inside `bounds`.  A rect larger than the
    /// bounds on an axis is centred on that axis instead.
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        self.y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
    }
}

fn clamp_axis(pos: f32, len: f32, min: f32, span: f32) -> f32 {
    if len >= span {
        min + (span - len) / 2.0
    } else if pos < min {
        min
    } else if pos + len > min + span {
        min + span - len
    } else {
        pos
    }
}

// ── Colour ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 100, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const BACKGROUND: Color = Color::rgb(15, 15, 25);
    pub const CRAWL_BACKGROUND: Color = Color::rgb(5, 5, 15);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel multiplied by `factor` (clamped to 0..=1).
    pub fn scaled(self, factor: f32) -> Color {
        let f = factor.clamp(0.0, 1.0);
        Color::rgb(
            (self.r as f32 * f) as u8,
            (self.g as f32 * f) as u8,
            (self.b as f32 * f) as u8,
        )
    }

    /// Each channel raised by `amount`, saturating at 255.
    pub fn brightened(self, amount: u8) -> Color {
        Color::rgb(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }
}

// ── Top-level status ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    OpeningCrawl,
    Menu,
    Playing,
    Cutscene,
    GameOver,
}
