//! Command-line host for the field notebook.
//!
//! # Responsibility
//! - Map subcommands onto `EntryStore` and theme operations.
//! - Print the refreshed display after every operation.

use clap::{Parser, Subcommand};
use fieldnote_core::{
    core_version, init_logging, Entry, EntryDisplay, EntryStore, NotebookConfig, Outcome,
    SqliteStore, Theme, ThemePreference,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "fieldnote", version, about = "Field notebook entries from the terminal")]
struct Cli {
    /// SQLite file holding the notebook records.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List entries with their positions.
    List,
    /// Show the entry at the cursor.
    Show {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Save fields at the cursor (or as the first entry).
    Save {
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        weather: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Notes markup.
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete the entry at the cursor.
    Delete {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Move to the next entry, wrapping around.
    Next {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Move to the previous entry, wrapping around.
    Prev {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Print the stored theme, or store a new one.
    Theme { name: Option<String> },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = NotebookConfig::resolve(cli.db, cli.log_level, cli.log_dir);

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &NotebookConfig) -> Result<(), String> {
    if let Command::Version = command {
        println!("fieldnote_core version={}", core_version());
        return Ok(());
    }

    let store = SqliteStore::open(&config.storage_path).map_err(|err| {
        format!(
            "failed to open notebook at `{}`: {err}",
            config.storage_path.display()
        )
    })?;
    let mut notebook = EntryStore::load(store);
    info!(
        "event=cli_command module=cli status=start entries={}",
        notebook.len()
    );

    match command {
        Command::List => {
            if notebook.is_empty() {
                println!("{}", notebook.display().as_markup());
            }
            for (index, entry) in notebook.entries().iter().enumerate() {
                println!("{index}\t{}\t{}\t{}", entry.date, entry.weather, entry.location);
            }
        }
        Command::Show { index } => {
            position(&mut notebook, index);
            print_display(&notebook.display());
        }
        Command::Save {
            index,
            date,
            weather,
            location,
            notes,
        } => {
            position(&mut notebook, index);
            let display = notebook.save(Entry::new(date, weather, location, notes));
            print_display(&display);
        }
        Command::Delete { index } => {
            position(&mut notebook, index);
            print_outcome(notebook.delete());
        }
        Command::Next { index } => {
            position(&mut notebook, index);
            print_outcome(notebook.next());
        }
        Command::Prev { index } => {
            position(&mut notebook, index);
            print_outcome(notebook.prev());
        }
        Command::Theme { name } => {
            let store = notebook.storage_mut();
            match name {
                Some(name) => {
                    let theme = Theme::from_id(&name);
                    ThemePreference::save(store, &theme)
                        .map_err(|err| format!("failed to save theme: {err}"))?;
                    println!("theme={}", theme.id());
                }
                None => println!("theme={}", ThemePreference::load(&*store).id()),
            }
        }
        Command::Version => {}
    }
    Ok(())
}

fn position(notebook: &mut EntryStore<SqliteStore>, index: Option<usize>) {
    if let Some(index) = index {
        // An empty notebook has no cursor to move; the command itself reports it.
        let _ = notebook.seek(index);
    }
}

fn print_outcome(outcome: Outcome<EntryDisplay>) {
    match outcome {
        Outcome::Applied(display) => print_display(&display),
        Outcome::Skipped(reason) => println!("skipped: {reason}"),
    }
}

fn print_display(display: &EntryDisplay) {
    println!("{}", display.as_markup());
}
