//! FrameBuffer and page painting.
//!
//! The FrameBuffer is a 2D grid of cells holding what the viewport shows.
//! [`paint`] fills one from a [`Page`]: in-flow elements first, shifted by
//! the scroll position, then fixed elements on top at their placement.

use unicode_width::UnicodeWidthChar;

use crate::document::{Document, Page};
use crate::types::{ElementFlags, ElementId, ElementKind};

/// Marks the second column of a wide character.
const CONTINUATION: char = '\0';

bitflags::bitflags! {
    /// Cell attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const INVERSE = 1 << 1;
    }
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attrs: Attr::NONE,
        }
    }
}

impl Cell {
    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells, row-major: `index = y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    /// One row of cells.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Set a cell; out-of-bounds coordinates are clipped.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return;
        }
        let index = self.index(x as u16, y as u16);
        self.cells[index] = cell;
    }

    /// Draw a single line of text starting at (x, y), clipped.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, attrs: Attr) {
        let mut column = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            self.set(column, y, Cell { ch, attrs });
            if width == 2 {
                self.set(column + 1, y, Cell { ch: CONTINUATION, attrs });
            }
            column += width;
        }
    }

    /// Fill a rectangle with blanks carrying `attrs`, clipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, attrs: Attr) {
        let blank = Cell { ch: ' ', attrs };
        for row in y..y + height {
            for column in x..x + width {
                self.set(column, row, blank);
            }
        }
    }

    /// Row contents as a string (continuation cells skipped).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }
}

// =============================================================================
// Painting
// =============================================================================

/// Paint the page's viewport.
pub fn paint(page: &Page) -> FrameBuffer {
    let (width, height) = page.viewport_size();
    let mut buffer = FrameBuffer::new(width, height);
    let scroll_top = page.scroll_top();

    let mut fixed = Vec::new();
    paint_subtree(page, &mut buffer, page.body(), scroll_top, Attr::NONE, Some(&mut fixed));

    // Fixed elements cover whatever scrolled underneath them, drawn inverse
    // so a stuck clone reads apart from the content below it
    for el in fixed {
        let origin = page.offset(el);
        buffer.fill_rect(
            origin.left.round() as i32,
            (origin.top - scroll_top).round() as i32,
            page.width(el).round() as i32,
            page.outer_height(el).round() as i32,
            Attr::INVERSE,
        );
        paint_subtree(page, &mut buffer, el, scroll_top, Attr::INVERSE, None);
    }

    buffer
}

/// Paint an element and its children, every cell carrying `base`. Fixed
/// elements met along the way are collected into `fixed` for a later pass
/// (`None` when already painting one).
fn paint_subtree(
    page: &Page,
    buffer: &mut FrameBuffer,
    el: ElementId,
    scroll_top: f32,
    base: Attr,
    mut fixed: Option<&mut Vec<ElementId>>,
) {
    let flags = page.flags(el);
    if flags.intersects(ElementFlags::HIDDEN | ElementFlags::INVISIBLE) {
        return;
    }
    if flags.contains(ElementFlags::FIXED) {
        if let Some(fixed) = fixed.as_deref_mut() {
            fixed.push(el);
            return;
        }
    }

    let text = page.text(el);
    if !text.is_empty() {
        let origin = page.offset(el);
        let kind = page.kind(el);
        let padding = if kind.is_some_and(ElementKind::is_cell) { 1 } else { 0 };
        let attrs = if kind == Some(ElementKind::HeaderCell) { base | Attr::BOLD } else { base };
        let x = origin.left.round() as i32 + padding;
        let y = (origin.top - scroll_top).round() as i32;
        for (line, content) in text.lines().enumerate() {
            buffer.put_str(x, y + line as i32, content, attrs);
        }
    }

    for child in page.children(el) {
        paint_subtree(page, buffer, child, scroll_top, base, fixed.as_deref_mut());
    }
}

// =============================================================================
// Tests
// =============================================================================
