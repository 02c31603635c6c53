use anyhow::Result;
use clap::Parser;
use goalpost::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the workspace config. Logs go to stderr so
    // `--json` output on stdout stays parseable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = goalpost::configured_log_level().unwrap_or_else(|| "warn".to_string());
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    goalpost::run(cli)
}
