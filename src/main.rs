use clap::Parser;
use nestkv::{session, CheckpointMode, CommitPolicy, Config, Dispatcher};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// In-memory key/value store with nested transactions
#[derive(Parser, Debug)]
#[command(name = "nestkv", version, about)]
struct Cli {
    /// Command files to run in order; reads stdin interactively when empty
    files: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the checkpoint strategy
    #[arg(long, value_enum)]
    checkpoint_mode: Option<CheckpointMode>,

    /// Override the commit semantics
    #[arg(long, value_enum)]
    commit_policy: Option<CommitPolicy>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("nestkv: {:#}", e);
            std::process::exit(1);
        }
    };
    if let Some(mode) = cli.checkpoint_mode {
        config.checkpoint_mode = mode;
    }
    if let Some(policy) = cli.commit_policy {
        config.commit_policy = policy;
    }

    // Logs go to stderr; stdout carries replies only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        checkpoint_mode = ?config.checkpoint_mode,
        commit_policy = ?config.commit_policy,
        "NestKV starting..."
    );

    let mut dispatcher = Dispatcher::with_config(&config);

    let result = if cli.files.is_empty() {
        session::run_stdin(&mut dispatcher).await
    } else {
        session::run_files(&cli.files, &mut dispatcher).await
    };

    let stats = dispatcher.context().store.stats();
    match result {
        Ok(end) => info!(?end, ?stats, "Session finished"),
        Err(e) => {
            error!("Session error: {:#}", e);
            std::process::exit(1);
        }
    }
}
