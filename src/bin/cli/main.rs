mod app;
mod commands;
mod render;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "studyloop-cli", about = "Spaced-repetition study tracker", version)]
struct Cli {
    /// Directory holding subjects.json and topics.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

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
    /// Manage subjects
    #[command(subcommand)]
    Subject(SubjectCommand),

    /// Add a topic to a subject
    Add {
        /// Subject name (case-insensitive prefix match)
        subject: String,
        /// Topic title
        title: String,
    },

    /// Mark a topic reviewed, or undo that
    Toggle {
        /// Topic id or title (case-insensitive prefix match)
        topic: String,
    },

    /// Flip a topic's priority flag
    Priority {
        /// Topic id or title
        topic: String,
    },

    /// Replace a topic's notes
    Note {
        /// Topic id or title
        topic: String,
        /// Notes text (use "-" to read from stdin)
        notes: String,
    },

    /// Delete a topic
    Rm {
        /// Topic id or title
        topic: String,
    },

    /// List topics, priority first
    List {
        /// Only topics due now and not yet reviewed
        #[arg(long, conflicts_with = "subject")]
        today: bool,
        /// Only topics of this subject
        #[arg(long)]
        subject: Option<String>,
        /// Keep topics whose title or notes contain this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show how topics are spread across the interval ladder
    Stats,
}

#[derive(Subcommand)]
enum SubjectCommand {
    /// Create a subject
    Add {
        name: String,
    },

    /// List subjects with topic counts
    List,

    /// Delete a subject and all of its topics
    Rm {
        /// Subject name (case-insensitive prefix match)
        name: String,
    },
}

/// Resolve "-" as stdin
fn resolve_text(text: String) -> anyhow::Result<String> {
    read_text_from(text, std::io::stdin())
}

fn read_text_from(text: String, mut input: impl Read) -> anyhow::Result<String> {
    if text != "-" {
        return Ok(text);
    }
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read notes from stdin")?;
    Ok(buf.trim_end().to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir, cli.config.as_deref(), &cli.format, use_color)?;

    match cli.command {
        Command::Subject(subcmd) => match subcmd {
            SubjectCommand::Add { name } => {
                commands::subject::run_add(&mut app, &name, &cli.format)?;
            }
            SubjectCommand::List => {
                commands::subject::run_list(&app, &cli.format, use_color)?;
            }
            SubjectCommand::Rm { name } => {
                commands::subject::run_rm(&mut app, &name, &cli.format)?;
            }
        },
        Command::Add { subject, title } => {
            commands::topic::run_add(&mut app, &subject, &title, &cli.format)?;
        }
        Command::Toggle { topic } => {
            commands::topic::run_toggle(&mut app, &topic, &cli.format, use_color)?;
        }
        Command::Priority { topic } => {
            commands::topic::run_priority(&mut app, &topic, &cli.format)?;
        }
        Command::Note { topic, notes } => {
            let notes = resolve_text(notes)?;
            commands::topic::run_note(&mut app, &topic, notes, &cli.format)?;
        }
        Command::Rm { topic } => {
            commands::topic::run_rm(&mut app, &topic, &cli.format)?;
        }
        Command::List { today, subject, search } => {
            commands::list::run(
                &app,
                today,
                subject.as_deref(),
                search.as_deref(),
                &cli.format,
                use_color,
            )?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
    }

    Ok(())
}
