//! Where `recall` looks for its user-level settings.
//!
//! The scoring defaults (`[scoring] z`, `[input]` sniffing options and the
//! `[output]` directory) can be pinned per user in
//! `$XDG_CONFIG_HOME/recall/config.toml`. A project-level
//! `.recall/config.toml` is layered on top by the CLI; this crate only
//! resolves the user side.

use std::path::PathBuf;

/// Directory name under the XDG config root.
pub const APP_DIR: &str = "recall";

/// File name of the user-level configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the recall config directory.
///
/// Returns `$XDG_CONFIG_HOME/recall` when the variable holds an absolute
/// path, otherwise `~/.config/recall`. Empty or relative values are ignored,
/// as the XDG base directory rules require.
///
/// # Examples
///
/// ```
/// use recall_paths::config_dir;
///
/// let settings = config_dir().join("config.toml");
/// assert!(settings.ends_with("recall/config.toml"));
/// ```
pub fn config_dir() -> PathBuf {
    let xdg_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|root| root.is_absolute());
    match (xdg_root, dirs::home_dir()) {
        (Some(root), _) => root.join(APP_DIR),
        (None, Some(home)) => home.join(".config").join(APP_DIR),
        (None, None) => PathBuf::from(".config").join(APP_DIR),
    }
}

/// Path of the user-level configuration file, written by `recall config init`.
pub fn user_config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
