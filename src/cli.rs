// ReelPick CLI binary

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use serde::Serialize;

use reelpick_lib::constants::DEFAULT_BIAS_PERCENT;
use reelpick_lib::db::get_db_path;
use reelpick_lib::{rating_color, App, HistoryStore, ReelPickError, Result, SystemLauncher, VideoEntry};

#[derive(Parser)]
#[command(name = "reelpick")]
#[command(about = "ReelPick - open a random video and keep a rated history", long_about = None)]
#[command(version)]
struct Cli {
    /// History database (defaults to $REELPICK_DB_PATH or ~/.reelpick/history.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a random video, record it and open it
    Pick {
        /// 0 = only the folder itself, 100 = only its subfolders
        #[arg(short, long, default_value_t = DEFAULT_BIAS_PERCENT, value_parser = clap::value_parser!(u8).range(0..=100))]
        bias: u8,
        /// Folder to pick from (defaults to the remembered one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Record the pick but don't launch a player
        #[arg(long)]
        no_open: bool,
    },

    /// Show or set the remembered folder
    Dir {
        /// New folder to remember
        path: Option<PathBuf>,
    },

    /// List history, newest first
    History {
        /// Only names containing this text (case-insensitive)
        term: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently opened video
    Recent,

    /// Add a video to history without opening it
    Add {
        path: PathBuf,
    },

    /// Rate a video 0-10 (empty string clears the rating)
    Rate {
        path: PathBuf,
        rating: String,
    },

    /// Rename a video file (extension is kept) and update history
    Rename {
        path: PathBuf,
        new_name: String,
    },

    /// Remove a video from history (the file is kept)
    Delete {
        path: PathBuf,
    },

    /// Restore the last deleted history entry
    Undo,

    /// Open a video from history without recording it again
    Open {
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_recoverable() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = get_db_path(cli.db.as_deref())?;
    let store = HistoryStore::open(&db_path)?;
    let mut app = App::new(store, SystemLauncher::new());

    match cli.command {
        Commands::Pick { bias, dir, no_open } => cmd_pick(&mut app, bias, dir, no_open),
        Commands::Dir { path } => cmd_dir(&app, path),
        Commands::History { term, json } => cmd_history(&app, term, json),
        Commands::Recent => cmd_recent(&app),
        Commands::Add { path } => cmd_add(&app, path),
        Commands::Rate { path, rating } => cmd_rate(&app, path, rating),
        Commands::Rename { path, new_name } => cmd_rename(&mut app, path, new_name),
        Commands::Delete { path } => cmd_delete(&mut app, path),
        Commands::Undo => cmd_undo(&mut app),
        Commands::Open { path } => cmd_open(&app, path),
    }
}

type CliApp = App<SystemLauncher>;

fn cmd_pick(app: &mut CliApp, bias: u8, dir: Option<PathBuf>, no_open: bool) -> Result<()> {
    let bias = f64::from(bias) / 100.0;
    let dir = dir.map(|d| resolve_path(&d));

    let entry = if no_open {
        app.pick_only(bias, dir.as_deref())?
    } else {
        app.open_random(bias, dir.as_deref())?
    };

    println!("{}", entry.path);
    Ok(())
}

fn cmd_dir(app: &CliApp, path: Option<PathBuf>) -> Result<()> {
    match path {
        Some(p) => {
            let stored = app.choose_directory(&p)?;
            println!("Remembering {}", stored.display());
        }
        None => match app.current_directory()? {
            Some(dir) => println!("{}", dir.display()),
            None => println!("No directory selected. Use 'reelpick dir <path>' to choose one."),
        },
    }
    Ok(())
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    #[serde(flatten)]
    entry: &'a VideoEntry,
    color: String,
}

fn cmd_history(app: &CliApp, term: Option<String>, json: bool) -> Result<()> {
    let entries = app.history().search(term.as_deref().unwrap_or(""))?;

    if json {
        let rows: Vec<HistoryRow> = entries
            .iter()
            .map(|entry| HistoryRow { entry, color: rating_color(entry.rating).hex() })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No history yet. Use 'reelpick pick' or 'reelpick add <path>'.");
        return Ok(());
    }

    println!("{:>5}  {:>6}  {:>7}  {:>19}  {}", "ID", "Rating", "Color", "Opened", "Name");
    println!("{}", "-".repeat(70));

    for entry in &entries {
        println!("{:>5}  {:>6}  {:>7}  {:>19}  {}",
            entry.id,
            format_rating(entry.rating),
            rating_color(entry.rating).hex(),
            entry.opened_at,
            entry.name
        );
    }

    if let Some(pending) = app.history().pending_undo() {
        println!();
        println!("'reelpick undo' restores {}", pending.name);
    }

    Ok(())
}

fn cmd_recent(app: &CliApp) -> Result<()> {
    match app.history().most_recent()? {
        Some(entry) => {
            println!("Most recent: {}", entry.name);
            println!("Path:        {}", entry.path);
            println!("Opened:      {}", entry.opened_at);
            println!("Rating:      {}", format_rating(entry.rating));
        }
        None => println!("Most recent: None"),
    }
    Ok(())
}

fn cmd_add(app: &CliApp, path: PathBuf) -> Result<()> {
    let path = resolve_path(&path);
    if !path.is_file() {
        return Err(ReelPickError::InvalidPath(format!("File not found: {}", path.display())));
    }

    let entry = app.history().add_manually(&path)?;
    println!("\"{}\" was added to the history.", entry.name);
    Ok(())
}

fn cmd_rate(app: &CliApp, path: PathBuf, rating: String) -> Result<()> {
    let path = resolve_path(&path);
    let rating = app.history().set_rating(&path, &rating)?;
    println!("Rating for {} set to {}", path.display(), format_rating(rating));
    Ok(())
}

fn cmd_rename(app: &mut CliApp, path: PathBuf, new_name: String) -> Result<()> {
    let path = resolve_path(&path);
    let new_path = app.history_mut().rename(&path, &new_name)?;
    println!("Renamed to {}", new_path.display());
    Ok(())
}

fn cmd_delete(app: &mut CliApp, path: PathBuf) -> Result<()> {
    let path = resolve_path(&path);
    let removed = app.history_mut().delete(&path)?;
    println!("\"{}\" deleted from history. The video file was not touched.", removed.name);
    Ok(())
}

fn cmd_undo(app: &mut CliApp) -> Result<()> {
    let restored = app.history_mut().undo()?;
    println!("\"{}\" has been restored to history.", restored.name);
    Ok(())
}

fn cmd_open(app: &CliApp, path: PathBuf) -> Result<()> {
    let path = resolve_path(&path);
    app.open_entry(&path)
}

// --- Helper Functions ---

/// Match how paths are stored: absolute, canonical when the file still exists
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            return cwd.join(path);
        }
    }
    path.to_path_buf()
}

fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string())
}
