//! Display backend trait
//!
//! A backend is anything that can put a row of text at a character cell:
//! the SH1106 framebuffer on the watch, a recording mock in tests.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the panel failed
    Communication,
    /// Row or column outside the character grid
    InvalidCoordinates,
    /// Panel has not been initialised yet
    NotInitialized,
}

/// Character-grid drawing surface
///
/// Drawing only touches the backend's buffer. Pushing the buffer to the
/// glass is left to the concrete driver, which usually does it
/// asynchronously.
pub trait DisplayBackend {
    /// Blank the whole surface
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw `text` starting at character cell (`row`, `col`), both 0-based
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Grid size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);

    /// Check if the surface accepts drawing
    fn is_ready(&self) -> bool;
}
