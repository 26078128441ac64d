//! Session module
//!
//! Feeds command lines from stdin or from script files into a dispatcher.
//! This module is responsible for the input loop and delegates command
//! processing to the dispatcher.

mod stream;

use crate::dispatch::Dispatcher;
use anyhow::Context;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

pub use stream::{InputMode, Session, SessionEnd};

/// Run an interactive session on stdin/stdout
pub async fn run_stdin(dispatcher: &mut Dispatcher) -> anyhow::Result<SessionEnd> {
    info!("Reading commands from stdin");

    let reader = BufReader::new(tokio::io::stdin());
    let mut session = Session::new(reader, tokio::io::stdout(), InputMode::Interactive);

    session.run(dispatcher).await
}

/// Run script files in order, as one continuous command stream
///
/// All files share the dispatcher's store. A terminating line in any file
/// ends the whole run.
pub async fn run_files(paths: &[PathBuf], dispatcher: &mut Dispatcher) -> anyhow::Result<SessionEnd> {
    let mut stdout = tokio::io::stdout();

    for path in paths {
        info!("Reading commands from {}", path.display());

        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("failed to open script {}", path.display()))?;

        let mut session = Session::new(BufReader::new(file), &mut stdout, InputMode::Script);
        if session.run(dispatcher).await? == SessionEnd::Terminated {
            return Ok(SessionEnd::Terminated);
        }
    }

    Ok(SessionEnd::EndOfInput)
}
