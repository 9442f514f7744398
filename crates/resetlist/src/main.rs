//! CLI entry point for resetlist.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use resetlist_app::config::Config;
use resetlist_app::service::TodoService;
use resetlist_store_file::FileStore;

mod commands;
mod server;

/// Checklist for tasks that reset on daily and weekly cadences.
#[derive(Parser, Debug)]
#[command(
    name = "resetlist",
    version,
    about = "resetlist: have I done this since the last reset?"
)]
struct Cli {
    /// Path to the append-only event log.
    #[arg(long, default_value = "resetlist.events.jsonl")]
    store: String,

    /// Path to the configuration file.
    #[arg(long, default_value = "resetlist.toml")]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Socket address to bind.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },

    /// Print the checklist.
    Ls {
        #[arg(long, value_enum, default_value = "table")]
        format: LsFormat,
    },

    /// Add a todo tracked against a catalog reset.
    Add {
        #[arg(long)]
        text: String,
        /// Catalog name of the reset cadence, e.g. "Duty reset".
        #[arg(long)]
        reset: String,
        #[arg(long, default_value = "resetlist")]
        actor: String,
    },

    /// Mark a todo as done for the current window.
    Check {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "resetlist")]
        actor: String,
    },

    /// Clear a todo's completion mark.
    Uncheck {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "resetlist")]
        actor: String,
    },

    /// Replace a todo's display text.
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "resetlist")]
        actor: String,
    },

    /// Remove a todo.
    Rm {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "resetlist")]
        actor: String,
    },
}

/// Output format for `ls`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LsFormat {
    /// Plain text table.
    Table,
    /// Pretty-printed JSON views.
    Json,
}

fn main() -> Result<()> {
    install_tracing();

    let Cli { store, config, cmd } = Cli::parse();
    let config = Config::load(&config)?;
    let mut service = TodoService::load(FileStore::open(store), config)?;

    match cmd {
        Command::Serve { addr } => server::run(&addr, service),
        other => commands::run(other, &mut service),
    }
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "resetlist",
            "--store",
            "todos.jsonl",
            "add",
            "--text",
            "Duty roulette",
            "--reset",
            "Duty reset",
            "--actor",
            "alice",
        ]);

        assert_eq!(cli.store, "todos.jsonl");
        match cli.cmd {
            Command::Add { text, reset, actor } => {
                assert_eq!(text, "Duty roulette");
                assert_eq!(reset, "Duty reset");
                assert_eq!(actor, "alice");
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_check_command() {
        let cli = Cli::parse_from([
            "resetlist",
            "check",
            "--id",
            "0191b5a6-5be0-7d02-b9a4-123456789abc",
        ]);

        match cli.cmd {
            Command::Check { id, actor } => {
                assert_eq!(id, "0191b5a6-5be0-7d02-b9a4-123456789abc");
                assert_eq!(actor, "resetlist");
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn parse_serve_command_with_default_addr() {
        let cli = Cli::parse_from(["resetlist", "serve"]);
        match cli.cmd {
            Command::Serve { addr } => assert_eq!(addr, "127.0.0.1:3000"),
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn ls_defaults_to_table_format() {
        let cli = Cli::parse_from(["resetlist", "ls"]);
        match cli.cmd {
            Command::Ls { format } => assert!(matches!(format, LsFormat::Table)),
            _ => panic!("expected ls command"),
        }
    }
}
