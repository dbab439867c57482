mod cli;
mod commands;

use clap::Parser;

use crate::cli::{CliArgs, Commands};

pub type CliResult<T> = stega_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Hide(args) => args.run(),
        Commands::Unveil(args) => args.run(),
        Commands::Quality(args) => args.run(),
    }
}
