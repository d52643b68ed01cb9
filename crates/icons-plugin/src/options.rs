//! PluginUiOptions: the EmbyIcons settings record.
//!
//! Persisted fields keep the PascalCase names used by earlier releases of
//! the plugin (`IconSize`, `AudioLanguages`, ...) so existing
//! `EmbyIcons.json` documents load unchanged.
//!
//! Transient fields hold what the settings page needs for display only:
//! section captions and the option lists the host fills in from its media
//! library before showing the page.  They are `#[serde(skip)]` and absent
//! from [`PluginUiOptions::PERSISTED_FIELDS`].
//!
//! # Example document
//!
//! ```json
//! {
//!   "IconsFolder": "/srv/emby/icons",
//!   "IconSize": 10,
//!   "SelectedLibraries": "",
//!   "AudioIconAlignment": "TopLeft",
//!   "AudioIconVerticalOffset": 0,
//!   "AudioLanguages": "eng,dan,fre,ger,spa,pol,jpn",
//!   "ShowAudioIcons": true,
//!   "ShowSeriesIconsIfAllEpisodesHaveLanguage": true,
//!   "SubtitleIconAlignment": "BottomLeft",
//!   "SubtitleIconVerticalOffset": 0,
//!   "SubtitleLanguages": "eng,dan,fre,ger,spa,pol,jpn",
//!   "ShowSubtitleIcons": true
//! }
//! ```

use serde::{Deserialize, Serialize};

use icons_store::{SettingsRecord, ValidationError};

/// Language codes offered when no document exists yet.
pub const DEFAULT_LANGUAGES: &str = "eng,dan,fre,ger,spa,pol,jpn";

/// Corner of the poster an icon strip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IconAlignment {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Section heading shown on the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptionItem {
    pub text: String,
}

impl CaptionItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Button shown on the settings page; `command` is sent back to the host
/// when it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonItem {
    pub icon: &'static str,
    pub caption: &'static str,
    pub command: &'static str,
}

/// One entry of a multi-select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSelectOption {
    pub value: String,
    pub name: String,
    pub is_enabled: bool,
}

impl EditorSelectOption {
    pub fn enabled(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
            is_enabled: true,
        }
    }
}

fn general_caption() -> CaptionItem {
    CaptionItem::new("General Settings")
}

fn audio_caption() -> CaptionItem {
    CaptionItem::new("Audio Settings")
}

fn subtitle_caption() -> CaptionItem {
    CaptionItem::new("Subtitle Settings")
}

/// Settings for the EmbyIcons overlay plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginUiOptions {
    #[serde(skip, default = "general_caption")]
    pub general_settings: CaptionItem,

    /// Folder containing the language icon files.
    pub icons_folder: Option<String>,

    /// Icon size as a percentage of the poster's shorter side.
    pub icon_size: i32,

    /// Libraries offered in the "restrict to libraries" picker.
    #[serde(skip)]
    pub libraries: Vec<EditorSelectOption>,

    /// Comma-separated library names; empty means every library.
    pub selected_libraries: String,

    #[serde(skip, default = "audio_caption")]
    pub audio_settings: CaptionItem,

    pub audio_icon_alignment: IconAlignment,

    /// Vertical offset in percent of the shorter side; positive moves down.
    pub audio_icon_vertical_offset: i32,

    #[serde(skip)]
    pub audio_language_options: Vec<EditorSelectOption>,

    /// Comma-separated audio language codes that get an icon.
    pub audio_languages: String,

    pub show_audio_icons: bool,

    /// Show icons on a series poster when every episode has the language.
    pub show_series_icons_if_all_episodes_have_language: bool,

    #[serde(skip, default = "subtitle_caption")]
    pub subtitle_settings: CaptionItem,

    pub subtitle_icon_alignment: IconAlignment,

    pub subtitle_icon_vertical_offset: i32,

    #[serde(skip)]
    pub subtitle_language_options: Vec<EditorSelectOption>,

    /// Comma-separated subtitle language codes that get an icon.
    pub subtitle_languages: String,

    pub show_subtitle_icons: bool,
}

impl Default for PluginUiOptions {
    fn default() -> Self {
        Self {
            general_settings: general_caption(),
            icons_folder: None,
            icon_size: 10,
            libraries: Vec::new(),
            selected_libraries: String::new(),
            audio_settings: audio_caption(),
            audio_icon_alignment: IconAlignment::TopLeft,
            audio_icon_vertical_offset: 0,
            audio_language_options: Vec::new(),
            audio_languages: DEFAULT_LANGUAGES.to_string(),
            show_audio_icons: true,
            show_series_icons_if_all_episodes_have_language: true,
            subtitle_settings: subtitle_caption(),
            subtitle_icon_alignment: IconAlignment::BottomLeft,
            subtitle_icon_vertical_offset: 0,
            subtitle_language_options: Vec::new(),
            subtitle_languages: DEFAULT_LANGUAGES.to_string(),
            show_subtitle_icons: true,
        }
    }
}

/// Splits a comma-joined list into trimmed, non-empty items.
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

impl PluginUiOptions {
    pub const SAVE_CONFIG: ButtonItem = ButtonItem {
        icon: "save",
        caption: "Save Config Options",
        command: "SaveConfig",
    };

    pub const RUN_JOB: ButtonItem = ButtonItem {
        icon: "run_circle",
        caption: "Make Overlays",
        command: "RunJob",
    };

    pub fn audio_language_codes(&self) -> Vec<&str> {
        split_list(&self.audio_languages)
    }

    pub fn subtitle_language_codes(&self) -> Vec<&str> {
        split_list(&self.subtitle_languages)
    }

    pub fn selected_library_names(&self) -> Vec<&str> {
        split_list(&self.selected_libraries)
    }

    /// `true` when `library` should be processed: no restriction is set, or
    /// the name is in the selection (case-insensitive).
    pub fn includes_library(&self, library: &str) -> bool {
        let selected = self.selected_library_names();
        selected.is_empty()
            || selected
                .iter()
                .any(|name| name.eq_ignore_ascii_case(library))
    }
}

const OFFSET_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

impl SettingsRecord for PluginUiOptions {
    const PERSISTED_FIELDS: &'static [&'static str] = &[
        "IconsFolder",
        "IconSize",
        "SelectedLibraries",
        "AudioIconAlignment",
        "AudioIconVerticalOffset",
        "AudioLanguages",
        "ShowAudioIcons",
        "ShowSeriesIconsIfAllEpisodesHaveLanguage",
        "SubtitleIconAlignment",
        "SubtitleIconVerticalOffset",
        "SubtitleLanguages",
        "ShowSubtitleIcons",
    ];

    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=100).contains(&self.icon_size) {
            return Err(ValidationError::new(
                "IconSize",
                format!("must be between 1 and 100, got {}", self.icon_size),
            ));
        }
        if !OFFSET_RANGE.contains(&self.audio_icon_vertical_offset) {
            return Err(ValidationError::new(
                "AudioIconVerticalOffset",
                format!(
                    "must be between -100 and 100, got {}",
                    self.audio_icon_vertical_offset
                ),
            ));
        }
        if !OFFSET_RANGE.contains(&self.subtitle_icon_vertical_offset) {
            return Err(ValidationError::new(
                "SubtitleIconVerticalOffset",
                format!(
                    "must be between -100 and 100, got {}",
                    self.subtitle_icon_vertical_offset
                ),
            ));
        }
        Ok(())
    }
}
