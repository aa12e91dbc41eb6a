// Tab ordering engine - pure logic over the host traits.
// Follows the same pattern as the rest of `modules`: no toolkit imports.

use crate::host::{Host, TabStrip};
use crate::modules::collation::{collation_key_for_filename, Collation, CollationKey};
use crate::settings::SortMode;
use crate::state::Document;

/// Collation key of `doc` under `mode`.
///
/// Basename modes use the final path component, path modes the full path;
/// either way an unsaved document falls back to its display name.
pub fn sort_key(doc: &Document, mode: SortMode) -> CollationKey {
    let source = if mode.is_basename() {
        doc.basename()
    } else {
        doc.full_path()
    };
    collation_key_for_filename(&source)
}

/// Stable sort on the key; descending modes invert the comparison rather
/// than reversing the result, so equal keys keep their original order.
fn order_by_key<T>(entries: &mut [(CollationKey, T)], mode: SortMode) {
    let mut collation = Collation::new();
    if mode.is_descending() {
        entries.sort_by(|a, b| collation.compare(&b.0, &a.0));
    } else {
        entries.sort_by(|a, b| collation.compare(&a.0, &b.0));
    }
}

/// Pure half of [`sort_tabs`]: the original indices of `documents` in their
/// sorted order.
pub fn sorted_order(documents: &[Document], mode: SortMode) -> Vec<usize> {
    let mut entries: Vec<(CollationKey, usize)> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| (sort_key(doc, mode), i))
        .collect();
    order_by_key(&mut entries, mode);
    entries.into_iter().map(|(_, i)| i).collect()
}

/// Reorders the host's tabs by `mode`.
///
/// Snapshots every tab together with its document, sorts the snapshot, then
/// moves the tab that sorted into position k to position k, for k in 0..N.
/// Only existing tabs are moved; none are created or closed.
pub fn sort_tabs<H: Host + ?Sized>(host: &mut H, mode: SortMode) {
    let n = host.tab_count();
    if n < 2 {
        log::debug!("sort by {}: {} tab(s), nothing to do", mode, n);
        return;
    }

    let mut entries: Vec<(CollationKey, H::Tab)> = Vec::with_capacity(n);
    for i in 0..n {
        let Some(tab) = host.tab_at(i) else {
            log::warn!("no tab at index {} of {}", i, n);
            continue;
        };
        let doc = host.document_at(i).unwrap_or_else(|| {
            log::warn!("no document for tab {}, sorting it by an empty name", i);
            Document::default()
        });
        entries.push((sort_key(&doc, mode), tab));
    }

    order_by_key(&mut entries, mode);

    for (position, (_, tab)) in entries.iter().enumerate() {
        host.move_tab(tab, position);
    }

    log::debug!("sorted {} tabs by {}", entries.len(), mode);
}

/// Enables or disables drag-reordering on every tab.
pub fn set_tabs_reorderable<H: TabStrip + ?Sized>(host: &mut H, reorderable: bool) {
    let n = host.tab_count();
    for i in 0..n {
        if let Some(tab) = host.tab_at(i) {
            host.set_tab_reorderable(&tab, reorderable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::session::Session;
    use rstest::rstest;

    fn example_session() -> Session {
        Session::from_documents(vec![
            Document::from_path("/a/zeta.txt"),
            Document::from_path("/a/alpha.txt"),
            Document::unsaved("untitled1"),
        ])
    }

    fn sorted_ids(session: &Session) -> Vec<u64> {
        let mut ids = session.ids();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_basename_ascending() {
        let mut session = example_session();
        sort_tabs(&mut session, SortMode::ByBasenameAscending);
        assert_eq!(session.labels(), vec!["alpha.txt", "untitled1", "zeta.txt"]);
    }

    #[test]
    fn test_path_ascending() {
        let mut session = example_session();
        sort_tabs(&mut session, SortMode::ByPathAscending);
        // Absolute paths start with '/', which sorts before letters
        assert_eq!(
            session.labels_by(SortMode::ByPathAscending),
            vec!["/a/alpha.txt", "/a/zeta.txt", "untitled1"]
        );
    }

    #[test]
    fn test_path_mode_compares_directories() {
        let mut session = Session::from_documents(vec![
            Document::from_path("/src/b/alpha.rs"),
            Document::from_path("/src/a/zeta.rs"),
        ]);

        sort_tabs(&mut session, SortMode::ByBasenameAscending);
        assert_eq!(session.labels(), vec!["alpha.rs", "zeta.rs"]);

        sort_tabs(&mut session, SortMode::ByPathAscending);
        assert_eq!(session.labels(), vec!["zeta.rs", "alpha.rs"]);
    }

    #[rstest]
    #[case(SortMode::ByBasenameDescending)]
    #[case(SortMode::ByPathDescending)]
    fn test_descending_reverses_sorted_input(#[case] mode: SortMode) {
        let mut session = Session::from_documents(vec![
            Document::from_path("/x/alpha.txt"),
            Document::from_path("/x/beta.txt"),
            Document::from_path("/x/gamma.txt"),
        ]);
        sort_tabs(&mut session, mode);
        assert_eq!(session.labels(), vec!["gamma.txt", "beta.txt", "alpha.txt"]);
    }

    #[test]
    fn test_natural_number_order() {
        let mut session = Session::from_documents(vec![
            Document::from_path("/p/file10.txt"),
            Document::from_path("/p/file2.txt"),
            Document::from_path("/p/File1.txt"),
        ]);
        sort_tabs(&mut session, SortMode::ByBasenameAscending);
        assert_eq!(session.labels(), vec!["File1.txt", "file2.txt", "file10.txt"]);
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        let mut session = Session::from_documents(vec![
            Document::from_path("/p/zeta.txt"),
            Document::from_path("/p/fig.txt"),
            Document::from_path("/p/émile.txt"),
            Document::from_path("/p/dune.txt"),
        ]);
        sort_tabs(&mut session, SortMode::ByBasenameAscending);
        assert_eq!(
            session.labels(),
            vec!["dune.txt", "émile.txt", "fig.txt", "zeta.txt"]
        );
    }

    #[test]
    fn test_empty_and_single_are_noops() {
        let mut empty = Session::default();
        sort_tabs(&mut empty, SortMode::ByPathDescending);
        assert_eq!(empty.tab_count(), 0);

        let mut single = Session::from_documents(vec![Document::unsaved("untitled")]);
        sort_tabs(&mut single, SortMode::ByPathDescending);
        assert_eq!(single.labels(), vec!["untitled"]);
    }

    #[rstest]
    #[case(SortMode::ByBasenameAscending)]
    #[case(SortMode::ByPathAscending)]
    #[case(SortMode::ByBasenameDescending)]
    #[case(SortMode::ByPathDescending)]
    fn test_properties(#[case] mode: SortMode) {
        let mut session = Session::from_documents(vec![
            Document::from_path("/b/main.rs"),
            Document::unsaved("untitled 2"),
            Document::from_path("/a/lib.rs"),
            Document::from_path("/a/main.rs"),
            Document::from_path("/c/Cargo.toml"),
            Document::unsaved("untitled 10"),
            Document::from_path("/b/lib.rs"),
        ]);
        let before = sorted_ids(&session);

        sort_tabs(&mut session, mode);

        // Permutation: same tabs, none added or lost
        assert_eq!(sorted_ids(&session), before);

        // Keys are monotonic in the requested direction
        let keys: Vec<CollationKey> = session
            .documents()
            .iter()
            .map(|d| sort_key(d, mode))
            .collect();
        let mut collation = Collation::new();
        for pair in keys.windows(2) {
            let ord = collation.compare(&pair[0], &pair[1]);
            if mode.is_descending() {
                assert_ne!(ord, std::cmp::Ordering::Less);
            } else {
                assert_ne!(ord, std::cmp::Ordering::Greater);
            }
        }

        // Idempotent
        let once = session.ids();
        sort_tabs(&mut session, mode);
        assert_eq!(session.ids(), once);
    }

    #[rstest]
    #[case(SortMode::ByBasenameAscending)]
    #[case(SortMode::ByBasenameDescending)]
    fn test_equal_keys_keep_relative_order(#[case] mode: SortMode) {
        // Same basename in different directories
        let mut session = Session::from_documents(vec![
            Document::from_path("/b/mod.rs"),
            Document::from_path("/z/other.rs"),
            Document::from_path("/a/mod.rs"),
            Document::from_path("/c/mod.rs"),
        ]);
        let mod_ids: Vec<u64> = vec![0, 2, 3];

        sort_tabs(&mut session, mode);

        let order: Vec<u64> = session
            .ids()
            .into_iter()
            .filter(|id| mod_ids.contains(id))
            .collect();
        assert_eq!(order, mod_ids);
    }

    #[test]
    fn test_sorted_order_matches_sort_tabs() {
        let docs = vec![
            Document::from_path("/a/zeta.txt"),
            Document::from_path("/a/alpha.txt"),
            Document::unsaved("untitled1"),
        ];
        assert_eq!(sorted_order(&docs, SortMode::ByBasenameAscending), vec![1, 2, 0]);
        assert_eq!(sorted_order(&docs, SortMode::ByBasenameDescending), vec![0, 2, 1]);
        assert_eq!(sorted_order(&docs, SortMode::ByPathAscending), vec![1, 0, 2]);
        assert!(sorted_order(&[], SortMode::ByPathAscending).is_empty());
    }

    #[test]
    fn test_set_tabs_reorderable() {
        let mut session = example_session();
        set_tabs_reorderable(&mut session, false);
        assert!(session.tabs.iter().all(|t| !t.reorderable));
        set_tabs_reorderable(&mut session, true);
        assert!(session.tabs.iter().all(|t| t.reorderable));
    }
}
