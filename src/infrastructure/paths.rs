//! Locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which Zellij points at the
//! directory it was started from (usually the user's home).

use std::path::PathBuf;

/// Base name of the span log.
pub const TRACE_FILE_NAME: &str = "skiphire-spans.jsonl";

/// Directory for files the plugin writes.
///
/// ```
/// use skiphire::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/skiphire"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("skiphire")
}

/// Path of the span log within [`get_data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps a user-supplied path onto the sandbox.
///
/// `~` and `~/…` resolve under `/host`; other paths are returned unchanged.
///
/// ```
/// use skiphire::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/skiphire.toml"), "/etc/skiphire.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
