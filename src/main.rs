//! audiomark CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use audiomark::cli::{Cli, Commands, ConfigCommands, SeekCommands, TimeCommands};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "AUDIOMARK_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, format, json } => commands::parse::handle(&file, format, json),
        Commands::Time(cmd) => match cmd {
            TimeCommands::Format { seconds } => commands::time::handle_format(seconds),
            TimeCommands::Parse { text } => commands::time::handle_parse(&text),
        },
        Commands::Seek(args) => {
            let mut slot = commands::seek::open_slot(args.slot)?;
            match args.command {
                SeekCommands::Write { time, lines } => {
                    commands::seek::handle_write(&mut slot, &time, lines)
                }
                SeekCommands::Read => commands::seek::handle_read(&slot),
                SeekCommands::Clear => commands::seek::handle_clear(&mut slot),
            }
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
