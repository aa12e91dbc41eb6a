// In-memory host: a serializable tab strip + document list.
// Persistence layer follows the tmp + rename pattern from settings.rs.

use crate::host::{DocumentRegistry, TabStrip};
use crate::settings::SortMode;
use crate::state::Document;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid session file: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_reorderable() -> bool {
    true
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionTab {
    pub id: u64,
    #[serde(flatten)]
    pub document: Document,
    #[serde(default = "default_reorderable")]
    pub reorderable: bool,
}

/// Open tabs in strip order. Tab handles are the `id`s, which survive moves.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub tabs: Vec<SessionTab>,
}

impl Session {
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut session = Self::default();
        for doc in documents {
            session.open(doc);
        }
        session
    }

    /// Appends a tab for `document` and returns its id.
    pub fn open(&mut self, document: Document) -> u64 {
        let id = self.tabs.iter().map(|t| t.id + 1).max().unwrap_or(0);
        self.tabs.push(SessionTab {
            id,
            document,
            reorderable: true,
        });
        id
    }

    pub fn close(&mut self, id: u64) -> Option<Document> {
        let index = self.index_of(id)?;
        Some(self.tabs.remove(index).document)
    }

    pub fn ids(&self) -> Vec<u64> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.tabs.iter().map(|t| t.document.clone()).collect()
    }

    /// Tab labels as the editor shows them (basename or display name).
    pub fn labels(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.document.basename()).collect()
    }

    /// The strings `mode` sorts on, in strip order.
    pub fn labels_by(&self, mode: SortMode) -> Vec<String> {
        self.tabs
            .iter()
            .map(|t| {
                if mode.is_basename() {
                    t.document.basename()
                } else {
                    t.document.full_path()
                }
            })
            .collect()
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let json = fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let tmp_path = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&tmp_path, json).map_err(|source| SessionError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, path).map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}

impl DocumentRegistry for Session {
    fn document_at(&self, index: usize) -> Option<Document> {
        self.tabs.get(index).map(|t| t.document.clone())
    }
}

impl TabStrip for Session {
    type Tab = u64;

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn tab_at(&self, index: usize) -> Option<u64> {
        self.tabs.get(index).map(|t| t.id)
    }

    fn move_tab(&mut self, tab: &u64, position: usize) {
        let Some(from) = self.index_of(*tab) else {
            log::warn!("move of unknown tab {}", tab);
            return;
        };
        let moved = self.tabs.remove(from);
        // Out-of-range positions mean "last", like a notebook reorder
        let to = position.min(self.tabs.len());
        self.tabs.insert(to, moved);
    }

    fn set_tab_reorderable(&mut self, tab: &u64, reorderable: bool) {
        if let Some(index) = self.index_of(*tab) {
            self.tabs[index].reorderable = reorderable;
        }
    }
}
