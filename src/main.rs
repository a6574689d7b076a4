mod cli;
mod commands;
mod error;
mod page_range;
mod pdf;
mod server;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Extract {
            path,
            start,
            end,
            output,
        } => {
            let output = output.unwrap_or_else(|| commands::default_output_path(&path));
            commands::extract::run(&path, start, end, &output)?;
        }
        Commands::Pick {
            path,
            pages,
            output,
        } => {
            let output = output.unwrap_or_else(|| commands::default_output_path(&path));
            commands::pick::run(&path, &pages, &output)?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Serve(args) => {
            server::run(args.into()).await?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the server logs at info and the batch
/// commands only warn, with each `-v` going one level up.
fn init_logging(cli: &Cli) {
    const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];
    let base = match cli.command {
        Commands::Serve(_) => 1,
        _ => 0,
    };
    let level = LEVELS[(base + cli.verbose as usize).min(LEVELS.len() - 1)];
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(level));
}
