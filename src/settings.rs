use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Section name inside tabsort.conf
const SECTION: &str = "tabSort";
const KEY_SORT_MODE: &str = "sortMode";
const KEY_AUTO_SORT: &str = "autoSort";

/// Ordering key applied to the tab strip.
///
/// The discriminants are the integer codes stored in the config file and
/// the ids of the keybindings, so their order must not change.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(into = "i64")]
pub enum SortMode {
    ByBasenameAscending = 0,
    ByPathAscending = 1,
    ByBasenameDescending = 2,
    ByPathDescending = 3,
}

impl Default for SortMode {
    fn default() -> Self {
        Self::ByBasenameAscending
    }
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        Self::ByBasenameAscending,
        Self::ByPathAscending,
        Self::ByBasenameDescending,
        Self::ByPathDescending,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn is_basename(self) -> bool {
        matches!(self, Self::ByBasenameAscending | Self::ByBasenameDescending)
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::ByBasenameDescending | Self::ByPathDescending)
    }

    /// Stable identifier the host stores keybindings under.
    pub fn keybinding_name(self) -> &'static str {
        match self {
            Self::ByBasenameAscending => "sortTabsByBaseName",
            Self::ByPathAscending => "sortTabsByPathName",
            Self::ByBasenameDescending => "sortTabsByBaseNameReverse",
            Self::ByPathDescending => "sortTabsByPathNameReverse",
        }
    }

    /// Label shown in the host's keybinding preferences.
    pub fn keybinding_label(self) -> &'static str {
        match self {
            Self::ByBasenameAscending => "Sort Tabs by Basename",
            Self::ByPathAscending => "Sort Tabs by Pathname",
            Self::ByBasenameDescending => "Sort Tabs by Basename Reversed",
            Self::ByPathDescending => "Sort Tabs by Pathname Reversed",
        }
    }

    /// Label of the entry under the "Sort Tabs" submenu.
    pub fn menu_label(self) -> &'static str {
        match self {
            Self::ByBasenameAscending => "By Basename",
            Self::ByPathAscending => "By Pathname",
            Self::ByBasenameDescending => "By Basename Reversed",
            Self::ByPathDescending => "By Pathname Reversed",
        }
    }

    /// Short name used on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::ByBasenameAscending => "basename",
            Self::ByPathAscending => "path",
            Self::ByBasenameDescending => "basename-desc",
            Self::ByPathDescending => "path-desc",
        }
    }
}

impl From<SortMode> for i64 {
    fn from(mode: SortMode) -> Self {
        mode.code()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.cli_name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.cli_name()).collect();
                format!("unknown sort mode '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to create config directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The persisted plugin state: nothing else survives a restart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sort_mode: SortMode,
    pub auto_sort: bool,
}

/// On-disk layout: a single `[tabSort]` group.
#[derive(Serialize)]
struct ConfigFile<'a> {
    #[serde(rename = "tabSort")]
    tab_sort: &'a Settings,
}

impl Settings {
    /// `<config_dir>/plugins/tabsort.conf`
    pub fn get_path(config_dir: &Path) -> PathBuf {
        config_dir.join("plugins").join("tabsort.conf")
    }

    /// Loads settings, falling back to defaults for anything missing or
    /// unreadable. Never fails.
    pub fn load(path: &Path) -> Self {
        Self::load_onto(Self::default(), path)
    }

    /// Loads settings on top of `base`: every key that is missing or
    /// unreadable keeps its value from `base`, and a missing or unreadable
    /// file returns `base` unchanged.
    pub fn load_onto(base: Self, path: &Path) -> Self {
        let mut settings = base;

        if !path.exists() {
            log::debug!("config file '{}' does not exist, keeping current settings", path.display());
            return settings;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("failed to load config file '{}': {}", path.display(), e);
                return settings;
            }
        };

        let group = read_group(&content, SECTION);

        match group.get(KEY_SORT_MODE) {
            Some(value) => match value.parse::<i64>().ok().and_then(SortMode::from_code) {
                Some(mode) => settings.sort_mode = mode,
                None => log::debug!("unable to read '{}' key: invalid value '{}'", KEY_SORT_MODE, value),
            },
            None => log::debug!("unable to read '{}' key: key not found", KEY_SORT_MODE),
        }

        match group.get(KEY_AUTO_SORT) {
            Some(value) => match parse_bool(value) {
                Some(auto_sort) => settings.auto_sort = auto_sort,
                None => log::debug!("unable to read '{}' key: invalid value '{}'", KEY_AUTO_SORT, value),
            },
            None => log::debug!("unable to read '{}' key: key not found", KEY_AUTO_SORT),
        }

        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let tmp_path = path.with_extension("tmp");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string(&ConfigFile { tab_sort: self })?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        fs::write(&tmp_path, contents).map_err(|source| SettingsError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, path).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("saved settings to '{}'", path.display());
        Ok(())
    }
}

/// Raw `key=value` pairs of one `[group]` of a key file.
///
/// Read line by line: lines that belong to other groups, comments, and lines
/// that are not key/value pairs never affect the keys of `group`. A key that
/// appears twice keeps its last value.
fn read_group(content: &str, group: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    let mut in_group = false;

    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_group = name.trim() == group;
            continue;
        }
        if !in_group {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => log::debug!("ignoring line {} of [{}]: not a key/value pair", n + 1, group),
        }
    }

    values
}

/// Key-file booleans are `true`/`false`, but `1`/`0` are accepted as well.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
