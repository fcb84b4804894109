use clap::Parser;
use env_logger::Env;

mod cli;
mod commands;
mod progress;

use cli::{CliArgs, Commands};

pub type CliResult<T> = pixstash_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let options = args.codec_options();

    match args.command {
        Commands::Hide(args) => args.run(options),
        Commands::Extract(args) => args.run(options),
        Commands::Capacity(args) => args.run(options),
    }
}
