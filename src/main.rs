use anyhow::Context;
use bfce::{AppConfig, CategorySelection, LoadedProfile};
use clap::{Parser, Subcommand};
use std::{io::Write, path::PathBuf};

#[derive(Parser)]
#[command(name = "bfce", version, about = bfce::statics::EN_APP_TITLE)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not restore or persist the editor session
    #[arg(long, global = true)]
    no_cache: bool,

    /// Location of the session cache
    #[arg(long, global = true, env = "BFCE_CACHE_FILE")]
    cache_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the editor, optionally with a profile already loaded
    Open {
        /// PROFSAVE_profile, .cfg or .txt
        file: Option<PathBuf>,
    },
    /// Re-export a profile in normalized `Category.Key "Value"` form
    Export {
        file: PathBuf,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List settings whose key or value contains QUERY
    Search {
        file: PathBuf,
        #[arg(default_value = "")]
        query: String,
        /// Only look in this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bfce::logging::init(cli.verbose);

    match cli.command {
        None => run_editor(None, cli.no_cache, cli.cache_file),
        Some(Command::Open { file }) => run_editor(file, cli.no_cache, cli.cache_file),
        Some(Command::Export { file, output }) => {
            let mut profile = LoadedProfile::load_path(&file)?;
            match output {
                Some(path) => profile.save_to_path(&path),
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{}", profile.export_text()).context("writing stdout")
                }
            }
        }
        Some(Command::Search {
            file,
            query,
            category,
        }) => {
            let profile = LoadedProfile::load_path(&file)?;
            let selection = category.map_or(CategorySelection::All, CategorySelection::Named);
            let mut stdout = std::io::stdout().lock();
            for entry in profile.document.filter(&selection, &query) {
                writeln!(stdout, "{} = {}", entry.full_key(), entry.value)
                    .context("writing stdout")?;
            }
            Ok(())
        }
    }
}

fn run_editor(file: Option<PathBuf>, no_cache: bool, cache_file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = AppConfig::new(file, no_cache, cache_file);
    bfce::run_gui(config).map_err(|e| anyhow::anyhow!("{e}"))
}
