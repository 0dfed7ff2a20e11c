//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`progress`]: Checkout progress strip
//! - [`header`]: Title and subtitle
//! - [`filters`]: Search box and requirement checkboxes
//! - [`status`]: Notices, loading, error and empty states
//! - [`cards`]: Offering card list
//! - [`summary`]: Summary bar for the selected offering
//! - [`footer`]: Keybinding hints

mod cards;
mod filters;
mod footer;
mod header;
mod progress;
mod status;
mod summary;

use crate::app::state::SUMMARY_ROWS;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyState, UIViewModel};

use cards::{render_card_footnotes, render_card_headers, render_card_rows, render_cursor_detail};
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use progress::render_progress;
use status::{render_empty_state, render_error, render_loading, render_notices};
use summary::render_summary;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole selection screen.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Progress]
/// [Header - 2 lines]
/// [Border]
/// [Filter box - 3 lines]
/// [Notices]
/// [Card headers]            or  [Loading / Error / Empty]
/// [Card rows]
/// [Badge legend, narrow panes]
/// [Disclaimer]
/// [Cursor detail]
/// [Summary - 3 lines, while selected or closing]
/// [Border]
/// [Footer]
/// ```
///
/// The bottom block is anchored to the last row; the card window computed
/// by the view model fits between the two.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_progress(current_row, &vm.progress, theme, cols);
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(current_row, &vm.filter_bar, theme, cols);
    current_row = render_notices(current_row, &vm.notices, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let summary_row = border_row.saturating_sub(SUMMARY_ROWS);
    let detail_row = if vm.summary.is_some() {
        summary_row.saturating_sub(1)
    } else {
        border_row.saturating_sub(1)
    };

    match &vm.body {
        BodyState::Loading => render_loading(current_row, theme, cols),
        BodyState::Error(error) => render_error(current_row, error, theme, cols),
        BodyState::Empty(empty) => render_empty_state(current_row, empty, theme, cols),
        BodyState::Cards(list) => {
            current_row = render_card_headers(current_row, theme, cols);
            let _current_row = render_card_rows(current_row, &list.items, theme, cols);
            render_card_footnotes(detail_row, list, theme, cols);
            if let Some(detail) = &list.cursor_detail {
                render_cursor_detail(detail_row, detail, theme, cols);
            }
        }
    }

    if let Some(summary) = &vm.summary {
        render_summary(summary_row, summary, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
