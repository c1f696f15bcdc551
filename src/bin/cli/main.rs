mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vocab-cli", about = "Vocabulary bank with spaced repetition review", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word to the bank
    Add {
        word: String,
        #[arg(long, default_value = "")]
        definition: String,
        /// Example sentence the word was seen in
        #[arg(long, default_value = "")]
        context: String,
        /// Provenance tag (defaults to the configured value)
        #[arg(long)]
        suggested_by: Option<String>,
    },

    /// List every word in the bank
    List,

    /// List words due for review today
    Due,

    /// Show due/total/learned counts
    Stats,

    /// Show the interval each rating would give a word
    Preview {
        /// Word (case-insensitive)
        word: String,
    },

    /// Submit a single review
    Rate {
        /// Entry id
        id: String,
        /// again, hard, good, easy (or 1-4)
        rating: String,
    },

    /// Review today's due words interactively
    Review,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Add {
            word,
            definition,
            context,
            suggested_by,
        } => {
            commands::add::run(
                &app,
                &word,
                &definition,
                &context,
                suggested_by.as_deref(),
                &cli.format,
                use_color,
            )?;
        }
        Command::List => {
            commands::list::run(&app, false, &cli.format, use_color)?;
        }
        Command::Due => {
            commands::list::run(&app, true, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Preview { word } => {
            commands::preview::run(&app, &word, &cli.format, use_color)?;
        }
        Command::Rate { id, rating } => {
            commands::review::run_rate(&app, &id, &rating, &cli.format, use_color)?;
        }
        Command::Review => {
            commands::review::run_session(&app, use_color)?;
        }
    }

    Ok(())
}
