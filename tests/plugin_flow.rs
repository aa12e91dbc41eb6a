// Drives the plugin the way a host would over a whole editing session:
// startup, preferences changes, documents opening and closing.

use tabsort::modules::session::Session;
use tabsort::{
    DialogResponse, Document, HostEvent, Preferences, Settings, SortMode, TabSortPlugin, Trigger,
};
use tempfile::TempDir;

fn labels(session: &Session) -> Vec<String> {
    session.labels()
}

#[test]
fn auto_sort_session() {
    let config_dir = TempDir::new().unwrap();
    let mut session = Session::from_documents(vec![
        Document::from_path("/work/src/lib.rs"),
        Document::from_path("/work/Cargo.toml"),
        Document::unsaved("untitled"),
    ]);

    // First run: no config yet, nothing happens on startup
    let mut plugin = TabSortPlugin::init(config_dir.path());
    plugin.handle(&mut session, Trigger::Event(HostEvent::StartupComplete));
    assert_eq!(labels(&session), vec!["lib.rs", "Cargo.toml", "untitled"]);

    // User enables auto-sort by path, then applies
    let mut prefs = plugin.preferences();
    prefs.sort_mode = SortMode::ByPathAscending;
    prefs.auto_sort = true;
    assert!(!plugin.configure(&mut session, DialogResponse::Apply, prefs));
    assert_eq!(labels(&session), vec!["Cargo.toml", "lib.rs", "untitled"]);

    // Opening a file re-sorts
    session.open(Document::from_path("/work/build.rs"));
    plugin.handle(&mut session, Trigger::Event(HostEvent::DocumentOpen));
    assert_eq!(
        labels(&session),
        vec!["build.rs", "Cargo.toml", "lib.rs", "untitled"]
    );

    // Closing one keeps the rest in order
    let cargo = session.ids()[1];
    session.close(cargo);
    plugin.handle(&mut session, Trigger::Event(HostEvent::DocumentClose));
    assert_eq!(labels(&session), vec!["build.rs", "lib.rs", "untitled"]);

    // Next start picks the saved settings up again
    plugin.cleanup(&mut session);
    let restarted = TabSortPlugin::init(config_dir.path());
    assert_eq!(
        *restarted.settings(),
        Settings {
            sort_mode: SortMode::ByPathAscending,
            auto_sort: true,
        }
    );

    let mut next = Session::from_documents(vec![
        Document::from_path("/work/src/main.rs"),
        Document::from_path("/work/README.md"),
    ]);
    restarted.handle(&mut next, Trigger::Event(HostEvent::StartupComplete));
    assert_eq!(labels(&next), vec!["README.md", "main.rs"]);
    assert!(next.tabs.iter().all(|t| !t.reorderable));
}

#[test]
fn config_round_trip_through_plugin() {
    let config_dir = TempDir::new().unwrap();
    let mut plugin = TabSortPlugin::init(config_dir.path());
    let mut session = Session::default();

    let prefs = Preferences {
        sort_mode: SortMode::ByPathDescending,
        auto_sort: true,
    };
    assert!(plugin.configure(&mut session, DialogResponse::Ok, prefs));

    let reloaded = TabSortPlugin::init(config_dir.path());
    assert_eq!(reloaded.settings().sort_mode, SortMode::ByPathDescending);
    assert!(reloaded.settings().auto_sort);
}

#[test]
fn keybinding_ids_resolve_to_sorts() {
    let config_dir = TempDir::new().unwrap();
    let plugin = TabSortPlugin::init(config_dir.path());
    let mut session = Session::from_documents(vec![
        Document::from_path("/x/alpha.txt"),
        Document::from_path("/x/beta.txt"),
        Document::from_path("/x/gamma.txt"),
    ]);

    for binding in plugin.keybindings() {
        let mode = plugin.keybinding_mode(binding.id).unwrap();
        plugin.handle(&mut session, Trigger::Keybinding(mode));
        let expected = if mode.is_descending() {
            vec!["gamma.txt", "beta.txt", "alpha.txt"]
        } else {
            vec!["alpha.txt", "beta.txt", "gamma.txt"]
        };
        assert_eq!(labels(&session), expected, "{}", binding.name);
    }
}
