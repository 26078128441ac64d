//! Line parser and encoder
//!
//! One command per line, whitespace-separated tokens; one reply per line.

use super::types::{CommandLine, ProtocolError, Reply};
use bytes::{BufMut, Bytes, BytesMut};

const LF: &[u8] = b"\n";

/// Command line parser
pub struct LineParser;

impl LineParser {
    /// Tokenize a single raw line, terminator included or not
    ///
    /// Tokens are split on ASCII whitespace; arguments stay binary. The command
    /// name is kept as typed; matching is case-sensitive.
    pub fn parse(line: impl AsRef<[u8]>) -> Result<CommandLine, ProtocolError> {
        let mut tokens = line
            .as_ref()
            .split(|b| b.is_ascii_whitespace())
            .filter(|t| !t.is_empty());

        let raw_name = tokens.next().ok_or(ProtocolError::Empty)?;
        let name = std::str::from_utf8(raw_name).map_err(|_| {
            ProtocolError::UnknownCommand(String::from_utf8_lossy(raw_name).into_owned())
        })?;
        let args = tokens.map(Bytes::copy_from_slice).collect();

        Ok(CommandLine::new(name, args))
    }
}

/// Reply encoder
pub struct LineEncoder;

impl LineEncoder {
    /// Encode a reply to bytes
    pub fn encode(reply: &Reply) -> Bytes {
        let mut buf = BytesMut::new();
        Self::encode_to(&mut buf, reply);
        buf.freeze()
    }

    /// Encode a reply into an existing buffer; silent replies write nothing
    pub fn encode_to(buf: &mut BytesMut, reply: &Reply) {
        match reply {
            Reply::Silent => return,
            Reply::Value(bytes) => buf.put_slice(bytes),
            Reply::Null => buf.put_slice(b"NULL"),
            Reply::Count(n) => buf.put_slice(n.to_string().as_bytes()),
            Reply::Error(e) => buf.put_slice(e.as_str().as_bytes()),
        }
        buf.put_slice(LF);
    }
}
