//! Page geometry, drawing primitives and the per-render vertical cursor.
//!
//! Coordinates are millimetres from the top-left corner of an A4 portrait
//! page. Text `y` is the baseline.

use super::palette::Rgb;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const TOP: f32 = 20.0;
/// Lowest `y` a block may reach before the page-break rule starts a new page.
pub const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 20.0;
pub const FOOTER_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Rgb) -> Self {
        Self { face, size, color, align: Align::Left }
    }

    pub const fn centered(self) -> Self {
        Self { align: Align::Center, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text { x: f32, y: f32, text: String, style: TextStyle },
    Circle { cx: f32, cy: f32, r: f32, fill: Rgb },
    RoundedRect { x: f32, y: f32, w: f32, h: f32, r: f32, fill: Rgb },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = (f32, f32, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }
}

/// Pages laid out so far plus the cursor into the last one.
///
/// Owned by exactly one render call.
#[derive(Debug)]
pub struct PageFlow {
    pages: Vec<Page>,
    y: f32,
}

impl PageFlow {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Start a new page when a block of `height` would cross the bottom limit.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.y + height > BOTTOM_LIMIT {
            self.pages.push(Page::default());
            self.y = TOP;
            true
        } else {
            false
        }
    }

    pub fn draw(&mut self, op: DrawOp) {
        let index = self.page_index();
        self.pages[index].ops.push(op);
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.draw(DrawOp::Text { x, y, text: text.into(), style });
    }

    /// Draw `lines` from the cursor down, `line_height` apart, and move the
    /// cursor below them.
    pub fn text_lines(&mut self, x: f32, lines: &[String], line_height: f32, style: TextStyle) {
        let top = self.y;
        for (i, line) in lines.iter().enumerate() {
            self.text(x, top + i as f32 * line_height, line.clone(), style);
        }
        self.y = top + lines.len() as f32 * line_height;
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl Default for PageFlow {
    fn default() -> Self {
        Self::new()
    }
}
