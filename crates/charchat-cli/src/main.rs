//! Character Chat entry point.
//!
//! Binary name: `charchat`
//!
//! Loads `.env`, parses CLI arguments, sets up tracing, then runs one
//! interactive chat session.

mod cli;

use clap::Parser;

use charchat_infra::secret::load_dotenv;
use charchat_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = cli::chat::runner::run_session(&cli).await;

    shutdown_tracing();
    result
}
