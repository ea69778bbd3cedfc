//! CLI argument definitions for the `novel-studio` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "novel-studio",
    version,
    about = "Novel Writing Studio - manage and draft novels from the terminal",
    long_about = "Manage a library of novels: create, inspect, and export \
                  manuscripts, move whole libraries through JSON backups, and \
                  run AI writing assistance against the configured provider."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Library directory (default: the per-user data directory).
    #[arg(long = "library", value_name = "DIR", global = true)]
    pub library: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all novels in the library.
    List,

    /// Create a new novel.
    Create(CreateArgs),

    /// Show a novel's chapters with word counts.
    Show {
        /// Novel id (or unique id prefix) or exact title.
        novel: String,
    },

    /// Manuscript statistics for a novel.
    Stats {
        /// Novel id (or unique id prefix) or exact title.
        novel: String,
    },

    /// Export the whole library as a JSON backup.
    ExportBackup {
        /// Output file.
        #[arg(long = "out", value_name = "FILE")]
        out: PathBuf,
    },

    /// Replace the whole library from a JSON backup.
    ImportBackup {
        /// Backup file to import.
        file: PathBuf,
    },

    /// Export a novel's manuscript.
    Export {
        /// Novel id (or unique id prefix) or exact title.
        novel: String,

        /// Output format.
        #[arg(long = "format", value_enum, default_value = "markdown")]
        format: ManuscriptFormatArg,

        /// Output file.
        #[arg(long = "out", value_name = "FILE")]
        out: PathBuf,
    },

    /// Run AI writing assistance on a chapter.
    Assist {
        /// What to do with the chapter.
        #[arg(value_enum)]
        action: AssistAction,

        /// Novel id (or unique id prefix) or exact title.
        novel: String,

        /// Chapter number (1-based; default: the last-open chapter).
        #[arg(long = "chapter", value_name = "N")]
        chapter: Option<usize>,
    },
}

#[derive(Parser)]
pub struct CreateArgs {
    /// Working title.
    #[arg(long = "title")]
    pub title: String,

    /// Author name shown on exports.
    #[arg(long = "author")]
    pub author: Option<String>,

    /// Genre label.
    #[arg(long = "genre")]
    pub genre: Option<String>,

    /// Language code for prose and AI assistance (e.g., "en", "nl").
    #[arg(long = "language")]
    pub language: Option<String>,

    /// Back-cover synopsis.
    #[arg(long = "synopsis")]
    pub synopsis: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ManuscriptFormatArg {
    Markdown,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AssistAction {
    /// Continue the story from the end of the chapter.
    Continue,
    /// Correct spelling, grammar, and punctuation.
    Proofread,
    /// Polish flow and word choice without changing meaning.
    Enhance,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
