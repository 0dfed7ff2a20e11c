//! Top-level rendering coordinator.
//!
//! Two steps: compute the [`UIViewModel`] from [`AppState`] for the pane
//! size, then hand it to the component layer.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with `print!`. Does not clear the screen;
/// Zellij hands the plugin a fresh frame on every render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_screen(&viewmodel, &state.theme, cols, rows);
}
