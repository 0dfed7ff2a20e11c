//! Notices and the non-card body states: loading, error and empty.

use crate::ui::helpers::{position_cursor, print_centered, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, ErrorInfo, Notice, NoticeKind};

/// Renders one line per notice starting at `row`.
///
/// # Returns
///
/// The next available row position (row + number of notices)
pub fn render_notices(row: usize, notices: &[Notice], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for notice in notices {
        let (glyph, color) = match notice.kind {
            NoticeKind::Info => ("ℹ", &theme.colors.notice_fg),
            NoticeKind::Warning => ("⚠", &theme.colors.error_fg),
        };
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(color));
        print!(" {}", truncate(&format!("{glyph} {}", notice.text), cols.saturating_sub(1)));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

/// Renders the loading indicator two rows below `row`.
pub fn render_loading(row: usize, theme: &Theme, cols: usize) {
    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered("◌ Loading skip sizes…", cols);
    print!("{}", Theme::reset());
}

/// Renders the error panel: message and retry hint, centered.
pub fn render_error(row: usize, error: &ErrorInfo, theme: &Theme, cols: usize) {
    position_cursor(row + 2, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
    print_centered(&error.message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&error.retry_hint, cols);
    print!("{}", Theme::reset());
}

/// Renders the empty state message and its dimmed subtitle, centered.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(&empty.message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
    print!("{}", Theme::reset());
}
