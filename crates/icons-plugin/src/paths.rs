//! Default location of the plugin configuration directory.
//!
//! When the host does not pass a directory explicitly, options documents
//! live under the per-user config directory:
//!
//! | Platform | Directory                                                       |
//! |----------|-----------------------------------------------------------------|
//! | Windows  | `%APPDATA%\EmbyIcons\plugins\configurations`                    |
//! | Linux    | `$XDG_CONFIG_HOME/embyicons/plugins/configurations`             |
//! | macOS    | `~/Library/Application Support/EmbyIcons/plugins/configurations`|

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Sub-path of the data directory where plugins keep their documents.
const CONFIGURATIONS_SUBDIR: [&str; 2] = ["plugins", "configurations"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// None of the environment variables the platform directory is derived
    /// from is set.
    #[error("cannot determine the config directory: none of {0} is set")]
    NoPlatformConfigDir(&'static str),
}

/// Returns `<data_dir>/plugins/configurations`.
pub fn configurations_dir(data_dir: &Path) -> PathBuf {
    CONFIGURATIONS_SUBDIR
        .iter()
        .fold(data_dir.to_path_buf(), |path, part| path.join(part))
}

/// Resolves the default configuration directory from the process
/// environment.
///
/// # Errors
///
/// Returns [`PathError::NoPlatformConfigDir`] when the variables the
/// platform directory is derived from are unset or empty.
pub fn default_config_dir() -> Result<PathBuf, PathError> {
    let data_dir = platform_data_dir(|name| std::env::var_os(name))?;
    Ok(configurations_dir(&data_dir))
}

/// Looks up a variable, treating an empty value as unset.
fn non_empty(lookup: &impl Fn(&str) -> Option<OsString>, name: &str) -> Option<PathBuf> {
    lookup(name).filter(|value| !value.is_empty()).map(PathBuf::from)
}

#[cfg(target_os = "windows")]
fn platform_data_dir(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf, PathError> {
    non_empty(&lookup, "APPDATA")
        .map(|appdata| appdata.join("EmbyIcons"))
        .ok_or(PathError::NoPlatformConfigDir("APPDATA"))
}

#[cfg(target_os = "macos")]
fn platform_data_dir(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf, PathError> {
    non_empty(&lookup, "HOME")
        .map(|home| home.join("Library").join("Application Support").join("EmbyIcons"))
        .ok_or(PathError::NoPlatformConfigDir("HOME"))
}

/// XDG layout, used on Linux and other Unix-likes.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_data_dir(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf, PathError> {
    non_empty(&lookup, "XDG_CONFIG_HOME")
        .or_else(|| non_empty(&lookup, "HOME").map(|home| home.join(".config")))
        .map(|base| base.join("embyicons"))
        .ok_or(PathError::NoPlatformConfigDir("XDG_CONFIG_HOME, HOME"))
}
