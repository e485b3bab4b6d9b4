//! # Codebook CLI (`cbk`)
//!
//! Browse a static codebook from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! cbk [--config ./config/codebook.toml] [--dataset data/codebook.json] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cbk macros` | List macro-categories with their code counts |
//! | `cbk list` | List codes, optionally filtered by macro and search text |
//! | `cbk show <id>` | Show one code and all of its items |
//! | `cbk stats` | Dataset sizes and unresolved references |
//! | `cbk completions <shell>` | Print a shell completion script |
//!
//! If the dataset cannot be loaded, or has no macros or no codes, every
//! command except `completions` prints a "could not load codebook" message
//! and exits with status 1.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use codebook::{config, list, load, logging, macros, show, stats};
use codebook_core::Codebook;

/// Codebook CLI: browse macro-categories, codes, and their annotated items.
#[derive(Parser)]
#[command(
    name = "cbk",
    about = "Codebook — browse macro-categories, codes, and their annotated items",
    version,
    long_about = "Loads a static codebook document (macros, codes, items), indexes items by \
    code, and lets you filter codes by macro-category or search text and inspect each code's \
    definitions, inclusion/exclusion rules, examples, border rules, and analytic notes."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, `./config/codebook.toml` is used if it exists,
    /// otherwise built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the codebook JSON document. Overrides `[dataset].path`.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Log debug diagnostics to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List macro-categories.
    ///
    /// Prints every macro with the number of codes under it, preceded by
    /// an "All areas" row with the total.
    Macros,

    /// List codes.
    ///
    /// Codes are shown in dataset order. The macro filter is applied first,
    /// then the search filter. Each code is printed as a card with a
    /// truncated definition and, when present, a truncated border rule.
    List {
        /// Only show codes in this macro-category (by id).
        #[arg(long = "macro")]
        macro_id: Option<String>,

        /// Case-insensitive substring match on code name or key.
        #[arg(long, short)]
        search: Option<String>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show a code and all its items in display order.
    Show {
        /// Code id.
        id: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show dataset statistics.
    ///
    /// Collection sizes, items per kind, codes whose macro does not
    /// resolve, items whose code does not exist, and skipped records.
    Stats,

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Commands that don't need the dataset
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "cbk", &mut std::io::stdout());
        return Ok(());
    }

    let mut cfg = config::resolve_config(cli.config.as_deref())?;
    if let Some(path) = cli.dataset {
        cfg.dataset.path = path;
    }

    let (source, dataset) = load::load_dataset(&cfg.dataset.path);
    let codebook = match Codebook::new(dataset) {
        Ok(cb) => cb,
        Err(e) => {
            eprintln!("{}", load::failure_message(&source, &e));
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Macros => {
            macros::run_macros(&codebook)?;
        }
        Commands::List {
            macro_id,
            search,
            json,
        } => {
            let view = list::view_from_args(&codebook, macro_id.as_deref(), search.as_deref());
            list::run_list(&codebook, &view, cfg.preview.budget(), json)?;
        }
        Commands::Show { id, json } => {
            show::run_show(&codebook, &id, json)?;
        }
        Commands::Stats => {
            stats::run_stats(&source, &codebook)?;
        }
        Commands::Completions { .. } => {
            // Handled above (before dataset loading)
            unreachable!()
        }
    }

    Ok(())
}
