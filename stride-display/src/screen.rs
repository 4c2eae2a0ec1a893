//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows (64 px / 8 px font)
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns (128 px / 5 px font)
pub const SCREEN_COLS: usize = 25;

/// Bytes reserved per line, enough for a full row of multi-byte characters
pub const LINE_CAPACITY: usize = SCREEN_COLS * 4;

/// Horizontal placement of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Longest prefix of `text` that is at most `max_chars` characters
fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn push_spaces(line: &mut String<LINE_CAPACITY>, count: usize) {
    for _ in 0..count {
        let _ = line.push(' ');
    }
}

/// Screen buffer for text-mode displays
///
/// Lines never exceed [`SCREEN_COLS`] characters; longer text is cut at a
/// character boundary.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_CAPACITY>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = true;
    }

    /// Set the content of a specific row, left aligned
    pub fn set_line(&mut self, row: usize, text: &str) {
        self.set_aligned(row, text, Align::Left);
    }

    /// Set the content of a specific row with the given alignment
    pub fn set_aligned(&mut self, row: usize, text: &str, align: Align) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let text = clip(text, SCREEN_COLS);
        let pad = SCREEN_COLS - text.chars().count();

        line.clear();
        match align {
            Align::Left => {}
            Align::Center => push_spaces(line, pad / 2),
            Align::Right => push_spaces(line, pad),
        }
        let _ = line.push_str(text);
        self.dirty = true;
    }

    /// Put `left` at the start of a row and `right` at its end
    ///
    /// The right part wins when both do not fit; at least one space
    /// separates them.
    pub fn set_split(&mut self, row: usize, left: &str, right: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let right = clip(right, SCREEN_COLS);
        let right_len = right.chars().count();
        let left = clip(left, SCREEN_COLS.saturating_sub(right_len + 1));
        let left_len = left.chars().count();

        line.clear();
        let _ = line.push_str(left);
        push_spaces(line, SCREEN_COLS - left_len - right_len);
        let _ = line.push_str(right);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draw every line to `backend` and mark the screen clean
    pub fn render<B: DisplayBackend + ?Sized>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line)?;
            }
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
