use anyhow::Result;
use clap::Parser;
use tracing::debug;

use ridl::cli::{self, Cli};
use ridl::core::Engine;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(cli::default_log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // No arguments at all behaves like --version, without touching the
    // snapshot.
    if !cli.list && cli.service.is_none() {
        cli::print_version();
        return Ok(());
    }

    debug!("Starting ridl v{}", env!("CARGO_PKG_VERSION"));

    let engine = Engine::from_paths(cli.config.as_deref(), cli.snapshot.as_deref())?;

    cli.execute(engine).await
}
