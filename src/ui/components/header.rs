//! Header component renderer.
//!
//! Renders the screen title with the visible offering count and the dimmed
//! subtitle below it.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the two header lines starting at `row`.
///
/// # Returns
///
/// The next available row position (row + 2)
///
/// # Layout
///
/// ```text
/// [left padding] Choose Your Skip Size (5) [right padding]
/// [left padding] Select the skip size that best suits... [right padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print_centered(&header.title, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&header.subtitle, cols);
    print!("{}", Theme::reset());

    row + 2
}
