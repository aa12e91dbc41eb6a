use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tabsort::modules::session::Session;
use tabsort::{SortMode, TabSortPlugin, Trigger};

#[derive(Parser)]
#[command(name = "tabsort")]
#[command(about = "Sort editor tabs by filename or full path")]
#[command(version)]
struct Cli {
    /// Editor config directory (tabsort.conf lives in <DIR>/plugins)
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort the tabs of a JSON session snapshot
    Sort {
        /// Session file: {"tabs": [{"id", "path", "displayName"}, ...]}
        session: PathBuf,

        /// basename, path, basename-desc or path-desc (default: configured mode)
        #[arg(short, long)]
        mode: Option<SortMode>,

        /// Write the sorted session back to the file
        #[arg(long)]
        write: bool,
    },
    /// Show or change the persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configured mode and auto-sort flag
    Show,
    /// Update the configured mode and/or auto-sort flag
    Set {
        #[arg(short, long)]
        mode: Option<SortMode>,

        #[arg(long)]
        auto_sort: Option<bool>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays the sorted listing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut plugin = TabSortPlugin::init(&cli.config_dir);

    match cli.command {
        Command::Sort {
            session: session_path,
            mode,
            write,
        } => {
            let mut session = Session::load(&session_path)
                .with_context(|| format!("loading session {}", session_path.display()))?;
            let mode = mode.unwrap_or(plugin.settings().sort_mode);

            plugin.handle(&mut session, Trigger::Menu(mode));

            for label in session.labels_by(mode) {
                println!("{}", label);
            }

            if write {
                session
                    .save(&session_path)
                    .with_context(|| format!("saving session {}", session_path.display()))?;
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Show => print_settings(&plugin),
            ConfigAction::Set { mode, auto_sort } => {
                let mut prefs = plugin.preferences();
                if let Some(mode) = mode {
                    prefs.sort_mode = mode;
                }
                if let Some(auto_sort) = auto_sort {
                    prefs.auto_sort = auto_sort;
                }
                prefs.save(plugin.config_path())?;
                // Reload so the output reflects what is on disk
                plugin.preferences();
                print_settings(&plugin);
            }
        },
    }

    Ok(())
}

fn print_settings(plugin: &TabSortPlugin) {
    let settings = plugin.settings();
    println!("config:    {}", plugin.config_path().display());
    println!("sortMode:  {} ({})", settings.sort_mode.code(), settings.sort_mode);
    println!("autoSort:  {}", settings.auto_sort);
}
