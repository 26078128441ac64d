//! Line stream handling
//!
//! Reads command lines from an input stream, dispatches them, and writes
//! replies to an output stream.

use crate::dispatch::{Dispatch, Dispatcher};
use crate::protocol::{LineEncoder, Reply};
use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// How the input stream is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typed input: unknown lines print ILLEGAL COMMAND and are skipped
    Interactive,
    /// Command files: the first unknown line ends the run
    Script,
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The input stream was exhausted
    EndOfInput,
    /// END or, in script mode, an unknown line was read
    Terminated,
}

/// A command stream bound to one input and one output
pub struct Session<R, W> {
    reader: R,

    writer: W,

    mode: InputMode,

    /// Encoded reply buffer
    write_buffer: BytesMut,

    /// Lines read so far
    lines_read: usize,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a new session
    pub fn new(reader: R, writer: W, mode: InputMode) -> Self {
        Session {
            reader,
            writer,
            mode,
            write_buffer: BytesMut::with_capacity(256),
            lines_read: 0,
        }
    }

    /// Run until END, a terminating line, or end of input
    pub async fn run(&mut self, dispatcher: &mut Dispatcher) -> anyhow::Result<SessionEnd> {
        let mut line = Vec::new();

        loop {
            line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut line)
                .await
                .context("failed to read command line")?;

            if n == 0 {
                debug!("End of input after {} lines", self.lines_read);
                return Ok(SessionEnd::EndOfInput);
            }
            self.lines_read += 1;

            match dispatcher.dispatch_line(&line) {
                Dispatch::Reply(reply) => self.send_reply(&reply).await?,
                Dispatch::End => {
                    info!("END received after {} lines", self.lines_read);
                    return Ok(SessionEnd::Terminated);
                }
                Dispatch::Unknown(e) => match self.mode {
                    InputMode::Interactive => self.send_reply(&Reply::illegal()).await?,
                    InputMode::Script => {
                        info!("Script stopped at line {}: {}", self.lines_read, e);
                        return Ok(SessionEnd::Terminated);
                    }
                },
            }
        }
    }

    /// Number of lines read so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Consume the session, returning its output stream
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Send a reply to the output stream
    async fn send_reply(&mut self, reply: &Reply) -> anyhow::Result<()> {
        if reply.is_silent() {
            return Ok(());
        }

        self.write_buffer.clear();
        LineEncoder::encode_to(&mut self.write_buffer, reply);

        self.writer
            .write_all(&self.write_buffer)
            .await
            .context("failed to write reply")?;
        self.writer.flush().await.context("failed to flush reply")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;
    use tokio_test::io::Builder;

    async fn run_script(
        input: &[u8],
        mode: InputMode,
        dispatcher: &mut Dispatcher,
    ) -> (SessionEnd, String) {
        let reader = BufReader::new(Builder::new().read(input).build());
        let mut session = Session::new(reader, Vec::new(), mode);

        let end = session.run(dispatcher).await.unwrap();
        let output = String::from_utf8(session.into_writer()).unwrap();
        (end, output)
    }

    #[tokio::test]
    async fn test_basic_scenario() {
        let mut dispatcher = Dispatcher::new();
        let input = b"SET a 10\nGET a\nSET b 10\nNUMEQUALTO 10\nUNSET a\nGET a\nNUMEQUALTO 10\nEND\n";

        let (end, output) = run_script(input, InputMode::Interactive, &mut dispatcher).await;
        assert_eq!(end, SessionEnd::Terminated);
        assert_eq!(output, "10\n2\nNULL\n1\n");
    }

    #[tokio::test]
    async fn test_nested_rollback_scenario() {
        let mut dispatcher = Dispatcher::new();
        let input = b"BEGIN\nSET a 10\nBEGIN\nSET a 20\nROLLBACK\nGET a\nROLLBACK\nGET a\nROLLBACK\nEND\n";

        let (_, output) = run_script(input, InputMode::Interactive, &mut dispatcher).await;
        assert_eq!(output, "10\nNULL\nNO TRANSACTION\n");
    }

    #[tokio::test]
    async fn test_commit_scenario() {
        let mut dispatcher = Dispatcher::new();
        let input = b"BEGIN\nSET a 10\nCOMMIT\nSET b 20\nGET a\nGET b\nEND\n";

        let (_, output) = run_script(input, InputMode::Interactive, &mut dispatcher).await;
        assert_eq!(output, "NO TRANSACTION\n10\nNULL\n");
    }

    #[tokio::test]
    async fn test_interactive_illegal_command() {
        let mut dispatcher = Dispatcher::new();
        let input = b"SET a 10\nFROB\n\nset a 20\nGET a\nEND\nGET a\n";

        let (end, output) = run_script(input, InputMode::Interactive, &mut dispatcher).await;
        assert_eq!(end, SessionEnd::Terminated);
        assert_eq!(output, "ILLEGAL COMMAND\nILLEGAL COMMAND\nILLEGAL COMMAND\n10\n");
    }

    #[tokio::test]
    async fn test_interactive_end_of_input() {
        let mut dispatcher = Dispatcher::new();
        let (end, output) = run_script(b"SET a 1\nGET a", InputMode::Interactive, &mut dispatcher).await;

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(output, "1\n");
    }

    #[tokio::test]
    async fn test_script_stops_at_unknown_command() {
        let mut dispatcher = Dispatcher::new();
        let input = b"SET a 10\nGET a\nFROB\nGET a\n";

        let (end, output) = run_script(input, InputMode::Script, &mut dispatcher).await;
        assert_eq!(end, SessionEnd::Terminated);
        assert_eq!(output, "10\n");
    }

    #[tokio::test]
    async fn test_malformed_line_in_script_continues() {
        let mut dispatcher = Dispatcher::new();
        let input = b"SET a\nSET a 5\nGET a\n";

        let (end, output) = run_script(input, InputMode::Script, &mut dispatcher).await;
        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(output, "ILLEGAL COMMAND\n5\n");
    }

    #[tokio::test]
    async fn test_crlf_lines() {
        let mut dispatcher = Dispatcher::new();
        let (_, output) =
            run_script(b"SET a 10\r\nGET a\r\n", InputMode::Script, &mut dispatcher).await;
        assert_eq!(output, "10\n");
    }

    #[tokio::test]
    async fn test_non_utf8_input_keeps_session_alive() {
        let mut dispatcher = Dispatcher::new();
        let input = b"SET a 10\nSET k \xff\xfe\nGET a\nGET k\n\xff\nNUMEQUALTO \xff\xfe\nEND\n";
        let reader = BufReader::new(Builder::new().read(input).build());
        let mut session = Session::new(reader, Vec::new(), InputMode::Interactive);

        let end = session.run(&mut dispatcher).await.unwrap();
        assert_eq!(end, SessionEnd::Terminated);
        assert_eq!(
            session.into_writer(),
            b"10\n\xff\xfe\nILLEGAL COMMAND\n1\n".to_vec()
        );
    }

    #[tokio::test]
    async fn test_chunked_input() {
        let mut dispatcher = Dispatcher::new();
        let reader = BufReader::new(
            Builder::new()
                .read(b"SET a 1")
                .read(b"0\nGE")
                .read(b"T a\n")
                .build(),
        );
        let writer = Builder::new().write(b"10\n").build();

        let mut session = Session::new(reader, writer, InputMode::Interactive);
        let end = session.run(&mut dispatcher).await.unwrap();

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(session.lines_read(), 2);
    }

    #[tokio::test]
    async fn test_store_survives_across_sessions() {
        let mut dispatcher = Dispatcher::new();
        run_script(b"BEGIN\nSET a 10\n", InputMode::Script, &mut dispatcher).await;

        let (_, output) = run_script(b"GET a\nROLLBACK\nGET a\n", InputMode::Script, &mut dispatcher).await;
        assert_eq!(output, "10\nNULL\n");
    }
}
