use anyhow::Context;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;
use zipf::{Args, Config};

fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(err) = try_main(args.into()) {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn try_main(config: Config) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = zipf::run(&config, &mut out)
        .with_context(|| format!("failed to rank words in {}", config.search_pattern()))?;
    tracing::debug!("ranked {} files", summary.files);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
