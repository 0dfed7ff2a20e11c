//! Footer component renderer.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the centered keybinding hints at `row`, truncated to the pane
/// width.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&footer.keybindings, cols);
    print!("{}", Theme::reset());
    row + 1
}
