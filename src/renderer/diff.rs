//! Differential renderer.
//!
//! The DiffRenderer compares the current frame to the previous one and only
//! rewrites rows that changed. Output is wrapped in a synchronized update so
//! the terminal never shows half a frame.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::{Attr, Cell, FrameBuffer};

/// Row-diffing renderer.
pub struct DiffRenderer {
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Render a frame, writing only changed rows.
    ///
    /// Returns true if anything was written.
    pub fn render<W: Write>(&mut self, out: &mut W, buffer: &FrameBuffer) -> io::Result<bool> {
        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        let changed: Vec<u16> = (0..buffer.height())
            .filter(|&y| previous.is_none_or(|prev| prev.row(y) != buffer.row(y)))
            .collect();

        if changed.is_empty() {
            return Ok(false);
        }

        queue!(out, BeginSynchronizedUpdate)?;
        for y in changed {
            queue!(out, MoveTo(0, y))?;
            write_row(out, buffer.row(y))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(true)
    }

    /// Forget the previous frame. Next render redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[Cell]) -> io::Result<()> {
    let mut current = Attr::NONE;
    for cell in cells.iter().filter(|cell| !cell.is_continuation()) {
        if cell.attrs != current {
            queue!(out, SetAttribute(Attribute::Reset))?;
            if cell.attrs.contains(Attr::BOLD) {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if cell.attrs.contains(Attr::INVERSE) {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            current = cell.attrs;
        }
        queue!(out, Print(cell.ch))?;
    }
    if current != Attr::NONE {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_writes_everything() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(4, 2);
        buffer.put_str(0, 0, "ab", Attr::NONE);
        buffer.put_str(0, 1, "cd", Attr::BOLD);

        let mut out = Vec::new();
        assert!(renderer.render(&mut out, &buffer).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ab  "));
        assert!(text.contains("cd"));
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut renderer = DiffRenderer::new();
        let buffer = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        renderer.render(&mut out, &buffer).unwrap();

        let mut second = Vec::new();
        assert!(!renderer.render(&mut second, &buffer).unwrap());
        assert!(second.is_empty());
    }

    #[test]
    fn test_only_changed_rows() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(6, 2);
        buffer.put_str(0, 0, "top", Attr::NONE);
        renderer.render(&mut Vec::new(), &buffer).unwrap();

        buffer.put_str(0, 1, "bottom", Attr::NONE);
        let mut out = Vec::new();
        assert!(renderer.render(&mut out, &buffer).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("bottom"));
        assert!(!text.contains("top"));
    }

    #[test]
    fn test_attributes_written() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(4, 1);
        buffer.put_str(0, 0, "ab", Attr::INVERSE);
        buffer.put_str(2, 0, "c", Attr::BOLD | Attr::INVERSE);

        let mut out = Vec::new();
        renderer.render(&mut out, &buffer).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[7mab"));
        assert!(text.contains("\x1b[1m\x1b[7mc"));
        assert!(text.contains("\x1b[0m "));
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&mut Vec::new(), &FrameBuffer::new(2, 2)).unwrap();
        renderer.invalidate();
        assert!(!renderer.has_previous());
    }
}
