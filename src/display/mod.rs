/// Terminal backend.  All terminal I/O lives here.
///
/// Draw calls rasterise the logical play-field into a grid of character
/// cells; `present` sends only the cells that changed since the previous
/// frame.  No game logic is performed in this module.

pub mod audio;
pub mod input;
pub mod sprites;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::ImageHandle;
use crate::entities::{Color, Rect, Vec2};
use crate::error::Result;
use crate::render::{Align, Fill, Renderer, TextStyle};

pub use self::audio::TerminalAudio;
pub use self::input::InputTracker;
pub use self::sprites::SpriteAtlas;

/// Logical play-field units covered by one terminal cell.
pub const CELL_WIDTH: f32 = 9.0;
pub const CELL_HEIGHT: f32 = 18.0;

/// Play-field size for a terminal of `cols` × `rows` cells.
pub fn logical_size(cols: u16, rows: u16) -> (f32, f32) {
    (cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

/// Centre of the cell at (`col`, `row`) in play-field units.
pub fn cell_center(col: u16, row: u16) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

// ── Frame buffer ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: Color::WHITE, bg }
    }
}

/// Mix `src` over `dst` with 0..=255 opacity.
fn blend(src: Color, dst: Color, alpha: u8) -> Color {
    let a = alpha as f32 / 255.0;
    let mix = |s: u8, d: u8| (d as f32 + (s as f32 - d as f32) * a).round() as u8;
    Color::rgb(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b))
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<'a, W: Write> {
    out: W,
    atlas: &'a SpriteAtlas,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    /// What the terminal currently shows; `None` forces a full redraw.
    shown: Option<Vec<Cell>>,
}

impl<'a, W: Write> TerminalRenderer<'a, W> {
    pub fn new(out: W, atlas: &'a SpriteAtlas, cols: u16, rows: u16) -> Self {
        Self {
            out,
            atlas,
            cols,
            rows,
            cells: vec![Cell::blank(Color::BACKGROUND); cols as usize * rows as usize],
            shown: None,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Text of one row, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row).map(|c| c.ch))
            .collect()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Adopt a new play-field size given in logical units.
    pub fn resize_logical(&mut self, width: f32, height: f32) {
        let cols = (width / CELL_WIDTH).floor().max(1.0) as u16;
        let rows = (height / CELL_HEIGHT).floor().max(1.0) as u16;
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::blank(Color::BACKGROUND); cols as usize * rows as usize];
        self.shown = None;
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(idx)
    }

    /// Inclusive cell span touched by `rect`.
    fn cell_span(rect: &Rect) -> (i32, i32, i32, i32) {
        let c0 = (rect.x / CELL_WIDTH).floor() as i32;
        let r0 = (rect.y / CELL_HEIGHT).floor() as i32;
        let c1 = ((rect.right() - 0.01) / CELL_WIDTH).floor() as i32;
        let r1 = ((rect.bottom() - 0.01) / CELL_HEIGHT).floor() as i32;
        (c0, r0, c1.max(c0), r1.max(r0))
    }

    fn put_char(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<'_, W> {
    fn clear(&mut self, color: Color) {
        self.cells.fill(Cell::blank(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, alpha: u8, fill: Fill) {
        let (c0, r0, c1, r1) = Self::cell_span(&rect);
        match fill {
            Fill::Solid => {
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        if let Some(cell) = self.cell_mut(col, row) {
                            cell.bg = blend(color, cell.bg, alpha);
                        }
                    }
                }
            }
            Fill::Outline(_) if r0 == r1 => {
                if c1 > c0 {
                    self.put_char(c0, r0, '[', color);
                    self.put_char(c1, r0, ']', color);
                }
            }
            Fill::Outline(_) => {
                for col in c0..=c1 {
                    self.put_char(col, r0, '─', color);
                    self.put_char(col, r1, '─', color);
                }
                for row in r0..=r1 {
                    self.put_char(c0, row, '│', color);
                    self.put_char(c1, row, '│', color);
                }
                self.put_char(c0, r0, '┌', color);
                self.put_char(c1, r0, '┐', color);
                self.put_char(c0, r1, '└', color);
                self.put_char(c1, r1, '┘', color);
            }
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, fill: Fill) {
        let bounds = Rect::from_center(center, radius * 2.0, radius * 2.0);
        let (c0, r0, c1, r1) = Self::cell_span(&bounds);
        let mut covered = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if col < 0 || row < 0 {
                    continue;
                }
                let mid = cell_center(col as u16, row as u16);
                let (dx, dy) = (mid.x - center.x, mid.y - center.y);
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                if let Some(cell) = self.cell_mut(col, row) {
                    covered = true;
                    match fill {
                        Fill::Solid => cell.bg = color,
                        Fill::Outline(_) => cell.fg = color,
                    }
                }
            }
        }

        // Too small to cover a cell centre: mark the cell it sits in.
        if !covered && matches!(fill, Fill::Solid) {
            let col = (center.x / CELL_WIDTH).floor() as i32;
            let row = (center.y / CELL_HEIGHT).floor() as i32;
            self.put_char(col, row, '•', color);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        let len = text.chars().count() as i32;
        let row = (pos.y / CELL_HEIGHT).floor() as i32;
        let mut col = (pos.x / CELL_WIDTH).floor() as i32;
        if style.align == Align::Center {
            col -= len / 2;
        }
        for (i, ch) in text.chars().enumerate() {
            self.put_char(col + i as i32, row, ch, style.color);
        }
    }

    fn draw_image(&mut self, image: &ImageHandle, pos: Vec2, alpha: u8) {
        let Some(sprite) = self.atlas.sprite(image) else {
            return;
        };
        let col0 = (pos.x / CELL_WIDTH).round() as i32;
        let row0 = (pos.y / CELL_HEIGHT).round() as i32;
        for (dy, line) in sprite.rows.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                if let Some(cell) = self.cell_mut(col0 + dx as i32, row0 + dy as i32) {
                    cell.ch = ch;
                    cell.fg = blend(sprite.color, cell.bg, alpha);
                }
            }
        }
    }

    fn present(&mut self) -> Result<()> {
        if self.shown.is_none() {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut last_colors: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row as usize * self.cols as usize + col as usize;
                let cell = self.cells[idx];
                let unchanged = self
                    .shown
                    .as_ref()
                    .and_then(|shown| shown.get(idx))
                    .is_some_and(|old| *old == cell);
                if unchanged {
                    continue;
                }

                self.out.queue(cursor::MoveTo(col, row))?;
                if last_colors != Some((cell.fg, cell.bg)) {
                    self.out.queue(style::SetForegroundColor(term_color(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(term_color(cell.bg)))?;
                    last_colors = Some((cell.fg, cell.bg));
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        self.shown = Some(self.cells.clone());
        Ok(())
    }
}
