// Plugin context: owns the settings and turns host triggers into sorts.
// The host keeps one TabSortPlugin, calls `loaded` once its tabs exist,
// connects the events from `subscriptions` and the bindings from
// `keybindings`, and forwards each of them to `handle`. The preferences
// dialog reports its response through `configure`.

use std::path::{Path, PathBuf};

use crate::host::{Host, TabStrip};
use crate::modules::tabs::{set_tabs_reorderable, sort_tabs};
use crate::settings::{Settings, SortMode};

/// Name of the keybinding group registered with the host.
pub const KEYBINDING_GROUP: &str = "tabsort";
/// Label of the submenu holding the manual sort entries.
pub const MENU_LABEL: &str = "Sort Tabs";

/// Host notifications the plugin listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    DocumentNew,
    DocumentOpen,
    DocumentClose,
    StartupComplete,
}

/// Everything that can make the plugin act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Menu(SortMode),
    Keybinding(SortMode),
    Event(HostEvent),
}

/// How the preferences dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Ok,
    Apply,
    Cancel,
}

/// Values shown in (and read back from) the preferences dialog.
pub type Preferences = Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    /// Group the binding is registered under.
    pub group: &'static str,
    /// Index inside the group; equals the mode's config code.
    pub id: usize,
    pub name: &'static str,
    pub label: &'static str,
    pub mode: SortMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub mode: SortMode,
}

pub struct TabSortPlugin {
    settings: Settings,
    config_path: PathBuf,
}

impl TabSortPlugin {
    /// Loads `<config_dir>/plugins/tabsort.conf`; missing or broken files
    /// leave the defaults in place.
    pub fn init(config_dir: &Path) -> Self {
        let config_path = Settings::get_path(config_dir);
        let settings = Settings::load(&config_path);
        log::debug!(
            "tabsort loaded: mode={}, auto_sort={}",
            settings.sort_mode,
            settings.auto_sort
        );
        Self {
            settings,
            config_path,
        }
    }

    /// Last step of loading: with auto-sort on, the tabs that are already
    /// open get sorted right away instead of at the next document event.
    pub fn loaded<H: Host + ?Sized>(&self, host: &mut H) {
        self.documents_changed(host);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn subscriptions(&self) -> &'static [HostEvent] {
        &[
            HostEvent::DocumentClose,
            HostEvent::DocumentNew,
            HostEvent::DocumentOpen,
            HostEvent::StartupComplete,
        ]
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        SortMode::ALL
            .into_iter()
            .enumerate()
            .map(|(id, mode)| Keybinding {
                group: KEYBINDING_GROUP,
                id,
                name: mode.keybinding_name(),
                label: mode.keybinding_label(),
                mode,
            })
            .collect()
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        SortMode::ALL
            .into_iter()
            .map(|mode| MenuItem {
                label: mode.menu_label(),
                mode,
            })
            .collect()
    }

    /// Label of the submenu the items from [`Self::menu_items`] live in.
    pub fn menu_label(&self) -> &'static str {
        MENU_LABEL
    }

    /// The manual sort menu is hidden while auto-sort keeps tabs ordered.
    pub fn menu_visible(&self) -> bool {
        !self.settings.auto_sort
    }

    /// Resolves a keybinding id from the host back to its mode.
    pub fn keybinding_mode(&self, id: usize) -> Option<SortMode> {
        SortMode::ALL.get(id).copied()
    }

    pub fn handle<H: Host + ?Sized>(&self, host: &mut H, trigger: Trigger) {
        match trigger {
            Trigger::Menu(mode) | Trigger::Keybinding(mode) => sort_tabs(host, mode),
            Trigger::Event(HostEvent::StartupComplete) => {
                set_tabs_reorderable(host, !self.settings.auto_sort);
                self.documents_changed(host);
            }
            Trigger::Event(_) => self.documents_changed(host),
        }
    }

    fn documents_changed<H: Host + ?Sized>(&self, host: &mut H) {
        if self.settings.auto_sort {
            sort_tabs(host, self.settings.sort_mode);
        }
    }

    /// Values to preload into the preferences dialog.
    ///
    /// Re-reads the config file first, like the dialog does when it opens.
    /// Anything the file does not provide keeps its current value.
    pub fn preferences(&mut self) -> Preferences {
        self.settings = Settings::load_onto(self.settings, &self.config_path);
        self.settings
    }

    /// Handles a preferences dialog response. Returns `true` when the dialog
    /// should close.
    pub fn configure<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        response: DialogResponse,
        preferences: Preferences,
    ) -> bool {
        match response {
            DialogResponse::Ok | DialogResponse::Apply => {
                self.settings = preferences;
                set_tabs_reorderable(host, !self.settings.auto_sort);
                if let Err(e) = self.settings.save(&self.config_path) {
                    log::warn!("{}", e);
                }
                self.documents_changed(host);
                response == DialogResponse::Ok
            }
            DialogResponse::Cancel => true,
        }
    }

    /// Gives drag-reordering back to the user when the plugin unloads.
    pub fn cleanup<H: TabStrip + ?Sized>(&self, host: &mut H) {
        set_tabs_reorderable(host, true);
    }
}
