//! # icons-plugin
//!
//! The EmbyIcons plugin's side of option handling, built on
//! [`icons_store`]:
//!
//! - [`options`] – [`PluginUiOptions`], the settings record shown on the
//!   plugin's settings page and persisted as `EmbyIcons.json`.
//! - [`services`] – [`PluginServices`], the container created once at
//!   plugin load that owns the options store and the plugin logger.
//! - [`edit`] – `KEY=VALUE` editing used by the `icons-plugin set` command.
//! - [`paths`] – the default configuration directory per platform.

pub mod edit;
pub mod options;
pub mod paths;
pub mod services;

pub use options::{IconAlignment, PluginUiOptions};
pub use services::{PluginOptionsStore, PluginServices, PLUGIN_NAME};
