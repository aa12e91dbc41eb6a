// Collaborator interfaces the host editor implements.
// The engine only ever sees these traits. A real embedding wires them to
// its notebook widget and document list; tests and the command-line driver
// use `modules::session::Session`.

use crate::state::Document;

/// The editor's list of open documents, indexed by tab position.
pub trait DocumentRegistry {
    /// Document shown in the tab at `index`, if any.
    fn document_at(&self, index: usize) -> Option<Document>;
}

/// The editor's tab strip.
pub trait TabStrip {
    /// Opaque handle that stays valid while tabs move around.
    type Tab: Clone;

    fn tab_count(&self) -> usize;

    fn tab_at(&self, index: usize) -> Option<Self::Tab>;

    /// Moves `tab` to `position`, shifting the tabs in between.
    fn move_tab(&mut self, tab: &Self::Tab, position: usize);

    /// Enables or disables drag-reordering for `tab`.
    fn set_tab_reorderable(&mut self, tab: &Self::Tab, reorderable: bool);
}

/// Everything the plugin needs from the host.
pub trait Host: DocumentRegistry + TabStrip {}

impl<T: DocumentRegistry + TabStrip + ?Sized> Host for T {}
