mod commands;
mod config;
mod main_lib;
mod render;

use clap::Parser;
use commands::Cli;
use main_lib::{build_state, init_tracing};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = cli.resolve_config(|key| std::env::var(key).ok())?;
    init_tracing();

    let state = build_state(&config)?;
    commands::run(&cli, &config, &state)
}
