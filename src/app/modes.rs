//! Input mode of the selection screen.
//!
//! The screen is either browsing cards or typing into the search box. The
//! mode decides how a key press is interpreted (typing `1` in search mode
//! edits the query; in normal mode it is ignored) and which hints the
//! footer shows.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Cursor navigation, card activation and filter toggles.
    ///
    /// Keys: j/k (move), Enter/Space (select or unselect), / (search),
    /// r/w (filters), c (continue), R (retry), q (quit).
    #[default]
    Normal,

    /// Typing into the search box.
    ///
    /// Characters and backspace edit the query, Enter keeps it and returns
    /// to normal mode, Esc clears it.
    Search,
}
