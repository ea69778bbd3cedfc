//! Novel Writing Studio CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_assist, run_create, run_export, run_export_backup, run_import_backup, run_list, run_show,
    run_stats,
};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let library = cli.library.as_deref();
    let result = match cli.command {
        Command::List => run_list(library),
        Command::Create(ref args) => run_create(library, args),
        Command::Show { ref novel } => run_show(library, novel),
        Command::Stats { ref novel } => run_stats(library, novel),
        Command::ExportBackup { ref out } => run_export_backup(library, out),
        Command::ImportBackup { ref file } => run_import_backup(library, file),
        Command::Export {
            ref novel,
            format,
            ref out,
        } => run_export(library, novel, format, out),
        Command::Assist {
            action,
            ref novel,
            chapter,
        } => run_assist(library, action, novel, chapter),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
