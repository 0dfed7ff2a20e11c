//! Offering card list renderer.
//!
//! Each offering is one row: selection marker, title, size badge, price,
//! hire period, notes (restriction badges and secondary costs) and the
//! primary action label aligned right.

use crate::app::state::COMPACT_WIDTH;
use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Badge, CardItem, CardList};

const TITLE_WIDTH: usize = 14;
const SIZE_WIDTH: usize = 10;
const PRICE_WIDTH: usize = 8;
const HIRE_WIDTH: usize = 20;

/// Renders the column headers at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_card_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let headers = format!(
        "  {:<TITLE_WIDTH$}{:<SIZE_WIDTH$}{:<PRICE_WIDTH$}{:<HIRE_WIDTH$}NOTES",
        "SKIP", "SIZE", "PRICE", "HIRE"
    );
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&headers, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the card rows starting at `row`.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_card_rows(row: usize, items: &[CardItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_card_row(current_row, item, theme, cols);
    }
    current_row
}

fn badge_color(badge: Badge, theme: &Theme) -> &str {
    match badge {
        Badge::Forbidden => &theme.colors.badge_danger_fg,
        Badge::NotAllowedOnRoad | Badge::NoHeavyWaste => &theme.colors.badge_warning_fg,
    }
}

/// Renders a single card row.
///
/// # Styling Precedence
///
/// 1. Cursor row: full row in selection colors
/// 2. Otherwise each column in its own color (price, badges, marker)
///
/// Narrow panes show badge glyphs instead of labels.
fn render_card_row(row: usize, item: &CardItem, theme: &Theme, cols: usize) -> usize {
    let compact = cols < COMPACT_WIDTH;
    let colors = &theme.colors;

    let mut segments: Vec<(&str, String)> = vec![
        (
            colors.selected_fg.as_str(),
            if item.is_selected { "● " } else { "  " }.to_string(),
        ),
        (colors.text_normal.as_str(), format!("{:<TITLE_WIDTH$}", item.title)),
        (colors.text_dim.as_str(), format!("{:<SIZE_WIDTH$}", item.size_badge)),
        (colors.price_fg.as_str(), format!("{:<PRICE_WIDTH$}", item.price)),
        (colors.text_dim.as_str(), format!("{:<HIRE_WIDTH$}", item.hire_period)),
    ];
    for badge in &item.badges {
        let text = if compact {
            format!("{} ", badge.glyph())
        } else {
            format!("{} {}  ", badge.glyph(), badge.label())
        };
        segments.push((badge_color(*badge, theme), text));
    }
    if !compact {
        for extra in &item.extras {
            segments.push((colors.text_dim.as_str(), format!("{extra}  ")));
        }
    }

    let action = format!("[{}]", item.action_label);
    let action_color = if item.is_selected {
        &colors.selected_fg
    } else {
        &colors.text_dim
    };
    let mut budget = cols.saturating_sub(text_width(&action) + 1);

    position_cursor(row, 1);
    if item.is_cursor {
        print!("{}", Theme::fg(&colors.selection_fg));
        print!("{}", Theme::bg(&colors.selection_bg));
    }

    for (color, text) in segments {
        if budget == 0 {
            break;
        }
        let text = truncate(&text, budget);
        budget -= text_width(&text);
        if !item.is_cursor {
            print!("{}", Theme::fg(color));
        }
        print!("{text}");
    }

    print!("{}", " ".repeat(budget + 1));
    if !item.is_cursor {
        print!("{}", Theme::fg(action_color));
    }
    if item.is_selected {
        print!("{}", Theme::bold());
    }
    print!("{}", truncate(&action, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the dimmed detail line for the card under the cursor.
pub fn render_cursor_detail(row: usize, detail: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  {}", truncate(detail, cols.saturating_sub(2)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the badge legend (compact layout only) and the disclaimer,
/// ending on the row above `detail_row`.
pub fn render_card_footnotes(detail_row: usize, list: &CardList, theme: &Theme, cols: usize) {
    let rows = usize::from(list.legend.is_some()) + 1;
    let mut row = detail_row.saturating_sub(rows);

    if let Some(legend) = &list.legend {
        position_cursor(row, 1);
        print!("{}", Theme::fg(&theme.colors.badge_warning_fg));
        print!("  {}", truncate(legend, cols.saturating_sub(2)));
        print!("{}", Theme::reset());
        row += 1;
    }

    position_cursor(row, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("  {}", truncate(list.disclaimer, cols.saturating_sub(2)));
    print!("{}", Theme::reset());
}
