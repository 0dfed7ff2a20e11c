//! Theme management and ANSI escape sequence generation.
//!
//! Colors are defined in TOML, either built in (Catppuccin variants bundled
//! with `include_str!`) or loaded from a user file.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! selected_fg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#89b4fa"
//! price_fg = "#89b4fa"
//! badge_warning_fg = "#f9e2af"
//! badge_danger_fg = "#f38ba8"
//! step_completed_fg = "#a6e3a1"
//! step_current_fg = "#89b4fa"
//! step_upcoming_fg = "#6c7086"
//! summary_bg = "#313244"
//! notice_fg = "#89dceb"
//! error_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! ```

use crate::domain::error::{Result, SkipHireError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Card row under the cursor.
    pub selection_fg: String,
    pub selection_bg: String,

    /// Accent of the selected card (marker and action label).
    pub selected_fg: String,

    pub text_normal: String,
    /// Secondary text: hire period, footer, image references.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    pub price_fg: String,

    /// "Not allowed on the road" and "no heavy waste" badges.
    pub badge_warning_fg: String,
    /// "Forbidden" badge.
    pub badge_danger_fg: String,

    pub step_completed_fg: String,
    pub step_current_fg: String,
    pub step_upcoming_fg: String,

    pub summary_bg: String,

    /// Informational notices such as the fallback data note.
    pub notice_fg: String,
    /// Error panel and warning notices.
    pub error_fg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    ///
    /// ```rust
    /// use skiphire::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SkipHireError::Theme`] if the file cannot be read or its
    /// TOML does not describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SkipHireError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| SkipHireError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Monochrome palette, used only if the bundled default fails to parse.
    fn plain() -> Self {
        let white = || "#ffffff".to_string();
        let grey = || "#808080".to_string();
        Self {
            name: "plain".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                selection_fg: "#000000".to_string(),
                selection_bg: white(),
                selected_fg: white(),
                text_normal: white(),
                text_dim: grey(),
                border: grey(),
                search_bar_border: white(),
                price_fg: white(),
                badge_warning_fg: white(),
                badge_danger_fg: white(),
                step_completed_fg: white(),
                step_current_fg: white(),
                step_upcoming_fg: grey(),
                summary_bg: "#303030".to_string(),
                notice_fg: white(),
                error_fg: white(),
                empty_state_fg: white(),
            },
        }
    }

    /// Converts a hex color to an RGB tuple, white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn strikethrough() -> &'static str {
        "\u{001b}[9m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!("bundled default theme failed to parse, using plain colors");
            Self::plain()
        })
    }
}
