//! Summary bar for the selected offering.
//!
//! Pinned above the footer while an offering is selected. During the
//! closing phase it stays on screen dimmed, then disappears when the close
//! timer fires.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SummaryInfo;

/// Renders the three summary rows starting at `row`.
///
/// # Layout
///
/// ```text
/// ────────────────────────────────────────────────
///  8 Yard Skip  £354  14 day hire period  Transport: £30
///  c: continue   Enter: unselect
/// ```
///
/// # Returns
///
/// The next available row position (row + 3)
pub fn render_summary(row: usize, summary: &SummaryInfo, theme: &Theme, cols: usize) -> usize {
    let colors = &theme.colors;
    let lead = if summary.closing { Theme::dim() } else { "" };

    position_cursor(row, 1);
    print!("{lead}{}{}", Theme::fg(&colors.selected_fg), "━".repeat(cols));
    print!("{}", Theme::reset());

    let mut details = format!(" {}  ", summary.title);
    let price = format!("{}  ", summary.price);
    let mut rest = summary.hire_period.clone();
    for extra in &summary.extras {
        rest.push_str("  ");
        rest.push_str(extra);
    }
    if summary.forbidden {
        details = format!(" ✖ {}", details.trim_start());
    }
    let line = truncate(&format!("{details}{price}{rest}"), cols);

    position_cursor(row + 1, 1);
    print!("{lead}{}", Theme::bg(&colors.summary_bg));
    print!("{}{}", Theme::bold(), Theme::fg(&colors.text_normal));
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(text_width(&line))));
    print!("{}", Theme::reset());

    let hint = if summary.closing {
        " Selection cleared"
    } else if summary.forbidden {
        " Forbidden at this location  c: continue anyway   Enter: unselect"
    } else {
        " c: continue   Enter: unselect"
    };
    let hint_color = if summary.forbidden && !summary.closing {
        &colors.badge_danger_fg
    } else {
        &colors.text_dim
    };
    let hint = truncate(hint, cols);

    position_cursor(row + 2, 1);
    print!("{lead}{}{}", Theme::bg(&colors.summary_bg), Theme::fg(hint_color));
    print!("{hint}");
    print!("{}", " ".repeat(cols.saturating_sub(text_width(&hint))));
    print!("{}", Theme::reset());

    row + 3
}
