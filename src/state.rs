// Shared document/tab types used by the host traits, the engine and the
// in-memory session. No host toolkit types in here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the sort needs to know about one open document.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Absolute file path; `None` for unsaved/new buffers.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Host-provided label, used when there is no path ("untitled", ...).
    #[serde(default)]
    pub display_name: String,
}

impl Document {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = basename(&path);
        Self {
            path: Some(path),
            display_name,
        }
    }

    pub fn unsaved(display_name: impl Into<String>) -> Self {
        Self {
            path: None,
            display_name: display_name.into(),
        }
    }

    /// Final path component, or the display name for unsaved buffers.
    pub fn basename(&self) -> String {
        match &self.path {
            Some(path) => basename(path),
            None => self.display_name.clone(),
        }
    }

    /// Full path, or the display name for unsaved buffers.
    pub fn full_path(&self) -> String {
        match &self.path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => self.display_name.clone(),
        }
    }
}

// A root such as "/" has no final component; fall back to the whole path.
fn basename(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
