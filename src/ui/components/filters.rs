//! Filter panel component renderer.
//!
//! Renders the search box and the two requirement checkboxes inside one
//! bordered frame.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Horizontal margin for the filter box (spaces on left and right).
const FILTER_BOX_MARGIN: usize = 2;

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Renders the filter box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, the box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────────────────────────────┐ [margin]
/// [margin] │ Search: 1_          r [x] Allowed on road  w [ ] Heavy … │ [margin]
/// [margin] └──────────────────────────────────────────────────────────┘ [margin]
/// ```
///
/// The border takes the `search_bar_border` color while typing and the
/// plain `border` color otherwise.
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if filters.typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let caret = if filters.typing { "_" } else { "" };
    let search_text = format!(" Search size: {}{caret}", filters.query);
    let toggles = format!(
        "r {} Allowed on road  w {} Heavy waste ",
        checkbox(filters.allowed_on_road),
        checkbox(filters.allows_heavy_waste)
    );
    let search_text = truncate(&search_text, inner_width.saturating_sub(text_width(&toggles)));
    let gap = inner_width.saturating_sub(text_width(&search_text) + text_width(&toggles));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(gap));
    print!("{}", truncate(&toggles, inner_width));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
