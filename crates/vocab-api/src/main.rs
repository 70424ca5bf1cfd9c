//! `vocabd` — the vocab API server binary.
//!
//! Loads layered configuration (defaults → TOML → `VOCAB_*` env), opens the
//! database fail-fast, and serves the HTTP API until terminated.

use clap::Parser;

use vocab_config::VocabConfig;

mod error;
mod handlers;
mod server;

#[derive(Parser)]
#[command(name = "vocabd", about = "Vocabulary backend API server")]
struct Cli {
    /// Override the configured bind address (e.g. 0.0.0.0:8080).
    #[arg(long)]
    bind: Option<String>,

    /// Override the configured database path.
    #[arg(long)]
    db: Option<String>,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Log debug output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("vocabd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = VocabConfig::load_with_dotenv()?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(db) = cli.db {
        config.database.path = db;
    }

    server::run_server(&config).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("VOCAB_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
