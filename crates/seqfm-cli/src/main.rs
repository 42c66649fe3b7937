//! seqfm: list directories with numbered image files grouped into sequences.
//!
//! This binary parses arguments, loads the configuration, runs one
//! subcommand and prints its lines to stdout. Logs go to stderr.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, ListArgs};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seqfm=info,seqfm_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    let lines = match cli.command {
        None => commands::list(&config, &ListArgs::default())?,
        Some(Command::List(args)) => commands::list(&config, &args)?,
        Some(Command::Expand { text }) => commands::expand(&text),
        Some(Command::Compact { frames, pad }) => vec![commands::compact(&frames, pad)],
        Some(Command::Split { name }) => commands::describe_split(&name),
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
