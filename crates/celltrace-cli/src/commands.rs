use super::args::{ChemistryCommand, Cli, Commands, ConfigCommand, SessionCommand};
use super::handlers;
use crate::types::LogLevel;
use anyhow::Result;
use celltrace_runtime::{Config, SessionStore, resolve_workspace_path};
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let workspace = resolve_workspace_path(cli.data_dir.as_deref())?;
    log::debug!("workspace: {}", workspace.display());

    let Some(command) = cli.command else {
        show_guidance(&workspace);
        return Ok(());
    };

    match command {
        Commands::Chemistry { command } => match command {
            ChemistryCommand::List => handlers::chemistry::handle(cli.format),
        },

        Commands::Session { command } => {
            let store = SessionStore::in_workspace(&workspace);

            match command {
                SessionCommand::List => handlers::session_list::handle(&store, cli.format),
                SessionCommand::Stats { name } => {
                    handlers::session_stats::handle(&store, &name, cli.format)
                }
                SessionCommand::Compare { current, previous } => {
                    handlers::session_compare::handle(&store, &current, &previous, cli.format)
                }
                SessionCommand::Export { name, output } => {
                    let config = Config::load_from(&Config::path_in(&workspace))?;
                    handlers::session_export::handle(&store, &config, &name, output)
                }
                SessionCommand::Import { file, name } => {
                    let config = Config::load_from(&Config::path_in(&workspace))?;
                    handlers::session_import::handle(&store, &config, &file, name)
                }
            }
        }

        Commands::Config { command } => {
            let config_path = Config::path_in(&workspace);

            match command {
                ConfigCommand::Show => handlers::config::show(&config_path, cli.format),
                ConfigCommand::SetBench { name, group } => {
                    handlers::config::set_bench(&config_path, name, group)
                }
            }
        }
    }
}

/// Install the stderr logger. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.to_filter());
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    // A logger may already be installed when `run` is called more than once.
    let _ = builder.try_init();
}

fn show_guidance(workspace: &Path) {
    println!("celltrace - battery cell session analytics");
    println!();
    println!("Workspace: {}", workspace.display());
    println!();
    println!("Get started:");
    println!("  celltrace chemistry list             Show supported chemistries");
    println!("  celltrace session import <file>      Add a recorded session");
    println!("  celltrace session stats <name>       Summarize a session");
    println!("  celltrace session compare <a> <b>    Compare two sessions");
    println!("  celltrace session export <name>      Export a session as CSV");
    println!();
    println!("Run 'celltrace --help' for all commands.");
}
