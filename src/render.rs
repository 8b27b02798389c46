/// Drawing boundary between the simulation and a display backend.
///
/// All coordinates are logical play-field units.  Draw calls are
/// fire-and-forget; only `present` reports failure, and only the loop
/// driver looks at it.

use crate::assets::ImageHandle;
use crate::entities::{Color, Rect, Vec2};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid,
    /// Outline of the given stroke width.
    Outline(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `pos` is the top-left corner of the text.
    Left,
    /// `pos` is the centre of the text.
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Nominal glyph height in play-field units.
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self { size, color, align: Align::Left }
    }

    pub const fn centered(size: f32, color: Color) -> Self {
        Self { size, color, align: Align::Center }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self { size: self.size * factor, ..self }
    }
}

pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color, alpha: u8, fill: Fill);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, fill: Fill);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
    fn draw_image(&mut self, image: &ImageHandle, pos: Vec2, alpha: u8);
    fn present(&mut self) -> Result<()>;
}

/// Offsets every draw call by a fixed amount (used for screen shake).
pub struct Shifted<'a, R: Renderer + ?Sized> {
    inner: &'a mut R,
    offset: Vec2,
}

impl<'a, R: Renderer + ?Sized> Shifted<'a, R> {
    pub fn new(inner: &'a mut R, offset: Vec2) -> Self {
        Self { inner, offset }
    }
}

impl<R: Renderer + ?Sized> Renderer for Shifted<'_, R> {
    fn clear(&mut self, color: Color) {
        self.inner.clear(color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, alpha: u8, fill: Fill) {
        let moved = Rect::new(rect.x + self.offset.x, rect.y + self.offset.y, rect.w, rect.h);
        self.inner.draw_rect(moved, color, alpha, fill);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, fill: Fill) {
        self.inner.draw_circle(center + self.offset, radius, color, fill);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.inner.draw_text(text, pos + self.offset, style);
    }

    fn draw_image(&mut self, image: &ImageHandle, pos: Vec2, alpha: u8) {
        self.inner.draw_image(image, pos + self.offset, alpha);
    }

    fn present(&mut self) -> Result<()> {
        self.inner.present()
    }
}
