// Tab Sort library entry point.
// Exposes all modules so the command-line driver (main.rs) and host
// embeddings can use them, and so they can be tested independently.

// Persisted settings (tabsort.conf)
pub mod settings;

// Shared document types
pub mod state;

// Collaborator traits implemented by the host editor
pub mod host;

// Pure logic modules (no host toolkit imports)
pub mod modules;

// Top-level context: owns the settings, dispatches triggers
pub mod plugin;

pub use host::{DocumentRegistry, Host, TabStrip};
pub use modules::tabs::{set_tabs_reorderable, sort_tabs, sorted_order};
pub use plugin::{DialogResponse, HostEvent, Preferences, TabSortPlugin, Trigger};
pub use settings::{Settings, SettingsError, SortMode};
pub use state::Document;
