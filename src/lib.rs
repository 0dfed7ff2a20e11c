//! Skiphire: a Zellij plugin for choosing a skip size during skip-hire
//! checkout.
//!
//! The plugin shows the available skip sizes as cards with their
//! VAT-inclusive price and hire period, lets the user narrow them with a
//! size search and two requirement filters, and keeps a single selection
//! that can be handed on to the next checkout stage.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Selection lifecycle                              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch Layer   │
//! │ (ui/)         │   │ (fetch/)      │
//! │ - Rendering   │   │ - Request ids │
//! │ - Theming     │   │ - Payloads    │
//! └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Offering, pricing, checkout steps (domain/)      │
//! │  - Error types (domain/error)                       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + OpenTelemetry, JSON-lines span log     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/skiphire.wasm" {
//!         endpoint "https://app.wewantwaste.co.uk/api/skips/by-location?postcode=NR32&area=Lowestoft"
//!         closing_delay_ms "300"
//!         steps "Postcode,Waste Type,Select Skip,Permit Check,Choose Date,Payment"
//!         current_step "Select Skip"
//!         continue_plugin "file:/path/to/permit-check.wasm"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Without `endpoint` the plugin shows a built-in fallback list and says so.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use skiphire::{handle_event, initialize, Config, Event};
//!
//! let config = Config::from_zellij(&BTreeMap::new())?;
//! let mut state = initialize(&config);
//!
//! for event in [Event::CursorDown, Event::ActivateCard, Event::Continue] {
//!     let (_render, actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! #   let _ = actions;
//! }
//! # Ok::<(), skiphire::SkipHireError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Handoff, InputMode, ScreenSettings};
pub use domain::{Offering, Result, SkipHireError};
pub use ui::Theme;

use domain::{ProgressSteps, StepId, DEFAULT_ASSET_BASE_URL};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default length of the closing phase in milliseconds.
pub const DEFAULT_CLOSING_DELAY_MS: u64 = 300;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pricing endpoint returning a JSON array of offerings.
    ///
    /// `None` shows the fallback list.
    pub endpoint: Option<String>,

    /// Base URL of the skip images. Default: the public skip image bucket.
    pub asset_base_url: String,

    /// Length of the closing phase. Default: 300 ms.
    pub closing_delay: Duration,

    /// Checkout steps and the current one. Default: the six-step checkout
    /// at "Select Skip".
    pub steps: ProgressSteps,

    /// Plugin URL receiving the `skip_selected` pipe message on continue.
    ///
    /// `None` broadcasts the message to every listening plugin.
    pub continue_plugin: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` resolves under `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the span log. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            closing_delay: Duration::from_millis(DEFAULT_CLOSING_DELAY_MS),
            steps: ProgressSteps::checkout(),
            continue_plugin: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

fn non_empty(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(String::from)
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `endpoint`, `asset_base_url`, `continue_plugin`, `theme`,
    ///   `theme_file`, `trace_level`: trimmed strings, blank means unset
    /// - `closing_delay_ms`: non-negative integer
    /// - `steps`: comma-separated step names (`"Select Skip"`, `select_skip`
    ///   and `select-skip` all work)
    /// - `current_step`: a step name contained in `steps`
    ///
    /// # Errors
    ///
    /// Returns [`SkipHireError::Config`] for a malformed `closing_delay_ms`,
    /// an unknown step name, duplicate steps or a current step missing from
    /// the list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use skiphire::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "https://api.example/skips".to_string());
    /// map.insert("closing_delay_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_zellij(&map)?;
    /// assert_eq!(config.endpoint.as_deref(), Some("https://api.example/skips"));
    /// assert_eq!(config.closing_delay.as_millis(), 150);
    /// # Ok::<(), skiphire::SkipHireError>(())
    /// ```
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Result<Self> {
        let mut parsed = Self::from_plain_keys(config);
        parsed.closing_delay = Self::parse_closing_delay(config)?;
        parsed.steps = Self::parse_steps(config)?;
        Ok(parsed)
    }

    /// Like [`from_zellij`](Self::from_zellij), but never fails.
    ///
    /// On a configuration error the checkout keys (`steps`, `current_step`,
    /// `closing_delay_ms`) fall back to their defaults and the error is
    /// returned alongside so it can be shown.
    #[must_use]
    pub fn from_zellij_or_defaults(config: &BTreeMap<String, String>) -> (Self, Option<SkipHireError>) {
        match Self::from_zellij(config) {
            Ok(parsed) => (parsed, None),
            Err(e) => (Self::from_plain_keys(config), Some(e)),
        }
    }

    fn from_plain_keys(config: &BTreeMap<String, String>) -> Self {
        Self {
            endpoint: non_empty(config, "endpoint"),
            asset_base_url: non_empty(config, "asset_base_url")
                .unwrap_or_else(|| DEFAULT_ASSET_BASE_URL.to_string()),
            continue_plugin: non_empty(config, "continue_plugin"),
            theme_name: non_empty(config, "theme"),
            theme_file: non_empty(config, "theme_file"),
            trace_level: non_empty(config, "trace_level"),
            ..Self::default()
        }
    }

    fn parse_closing_delay(config: &BTreeMap<String, String>) -> Result<Duration> {
        let Some(raw) = non_empty(config, "closing_delay_ms") else {
            return Ok(Duration::from_millis(DEFAULT_CLOSING_DELAY_MS));
        };
        raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
            SkipHireError::Config(format!("closing_delay_ms `{raw}` is not a number of milliseconds: {e}"))
        })
    }

    fn parse_steps(config: &BTreeMap<String, String>) -> Result<ProgressSteps> {
        let steps = match non_empty(config, "steps") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::parse::<StepId>)
                .collect::<Result<Vec<_>>>()?,
            None => StepId::ALL.to_vec(),
        };

        let current = match non_empty(config, "current_step") {
            Some(raw) => raw.parse::<StepId>()?,
            None => StepId::SelectSkip,
        };

        ProgressSteps::new(steps, current)
    }

    /// Settings of the selection screen derived from this configuration.
    #[must_use]
    pub fn screen_settings(&self) -> ScreenSettings {
        ScreenSettings {
            endpoint: self.endpoint.clone(),
            asset_base_url: self.asset_base_url.clone(),
            closing_delay: self.closing_delay,
            steps: self.steps.clone(),
        }
    }

    /// Theme from `theme_file`, else `theme`, else the default.
    ///
    /// Load failures are logged and fall back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the selection screen for `config`.
///
/// The returned state shows fallback data (or waits for the endpoint) with
/// no selection and empty filters. No request is issued yet; the plugin
/// sends [`Event::EndpointChanged`] once network access is granted.
///
/// # Example
///
/// ```rust
/// use skiphire::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.visible_offerings.len(), 5);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(live = config.endpoint.is_some(), "initializing skiphire plugin");

    let mut state = AppState::new(config.screen_settings(), config.load_theme());
    state.apply_filters();
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new()).unwrap();
        assert_eq!(config.endpoint, None);
        assert_eq!(config.asset_base_url, DEFAULT_ASSET_BASE_URL);
        assert_eq!(config.closing_delay, Duration::from_millis(300));
        assert_eq!(config.steps.len(), 6);
        assert_eq!(config.steps.current(), StepId::SelectSkip);
    }

    #[test]
    fn blank_endpoint_means_fallback() {
        let config = Config::from_zellij(&map(&[("endpoint", "   ")])).unwrap();
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn custom_steps_are_parsed_in_order() {
        let config = Config::from_zellij(&map(&[
            ("steps", "waste_type, select-skip ,Payment"),
            ("current_step", "Payment"),
        ]))
        .unwrap();
        assert_eq!(config.steps.current_position(), 3);
        assert_eq!(config.steps.len(), 3);
    }

    #[test]
    fn unknown_step_is_a_config_error() {
        let err = Config::from_zellij(&map(&[("steps", "Postcode,Skip Dance")])).unwrap_err();
        assert!(matches!(err, SkipHireError::Config(_)));
    }

    #[test]
    fn bad_delay_falls_back_but_keeps_plain_keys() {
        let (config, err) = Config::from_zellij_or_defaults(&map(&[
            ("closing_delay_ms", "soon"),
            ("endpoint", "https://api.example/skips"),
        ]));
        assert!(matches!(err, Some(SkipHireError::Config(_))));
        assert_eq!(config.closing_delay, Duration::from_millis(DEFAULT_CLOSING_DELAY_MS));
        assert_eq!(config.endpoint.as_deref(), Some("https://api.example/skips"));
    }

    #[test]
    fn theme_file_takes_precedence_over_name() {
        let mut theme = Theme::default();
        theme.name = "from-file".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&theme).unwrap().as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "from-file");
    }

    #[test]
    fn unknown_theme_name_uses_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }
}
