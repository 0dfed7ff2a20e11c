//! Checkout progress strip.

use crate::domain::StepStatus;
use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ProgressInfo;

const CONNECTOR: &str = " ── ";

fn status_color(status: StepStatus, theme: &Theme) -> &str {
    match status {
        StepStatus::Completed => &theme.colors.step_completed_fg,
        StepStatus::Current => &theme.colors.step_current_fg,
        StepStatus::Upcoming => &theme.colors.step_upcoming_fg,
    }
}

/// Renders the progress strip at `row`, centered.
///
/// Wide layout draws every step joined by connectors, the current one in
/// bold. Compact layout draws the current step followed by its position.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_progress(row: usize, progress: &ProgressInfo, theme: &Theme, cols: usize) -> usize {
    let labels: Vec<String> = progress
        .steps
        .iter()
        .map(|step| format!("{} {}", step.glyph, step.label))
        .collect();

    let mut width = labels.iter().map(|l| text_width(l)).sum::<usize>()
        + text_width(CONNECTOR) * labels.len().saturating_sub(1);
    if let Some(position) = &progress.position {
        width += 2 + text_width(position);
    }

    position_cursor(row, 1);
    print!("{}", " ".repeat(cols.saturating_sub(width) / 2));

    for (idx, (step, label)) in progress.steps.iter().zip(&labels).enumerate() {
        if idx > 0 {
            let connector_color = if step.status == StepStatus::Upcoming {
                &theme.colors.step_upcoming_fg
            } else {
                &theme.colors.step_completed_fg
            };
            print!("{}{CONNECTOR}", Theme::fg(connector_color));
        }
        if step.status == StepStatus::Current {
            print!("{}", Theme::bold());
        }
        print!("{}{label}{}", Theme::fg(status_color(step.status, theme)), Theme::reset());
    }

    if let Some(position) = &progress.position {
        print!("{}  {position}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }

    row + 1
}
