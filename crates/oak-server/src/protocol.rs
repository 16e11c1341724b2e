//! Request framing and command parsing.
//!
//! Requests arrive as an array of bulk strings:
//!
//! ```text
//! *3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n
//! ```
//!
//! One command per request. Plain-text requests are re-framed into
//! this form by the connection adapter before parsing.

use oak_common::{OakError, Result};

const COMMAND_SET: &str = "SET";
const COMMAND_GET: &str = "GET";
const COMMAND_DEL: &str = "DEL";

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Del { key: String },
}

fn protocol_err(reason: impl Into<String>) -> OakError {
    OakError::Protocol(reason.into())
}

/// Encodes tokens as an array of bulk strings.
pub fn encode_array(tokens: &[&str]) -> String {
    let mut out = format!("*{}\r\n", tokens.len());
    for token in tokens {
        out.push_str(&format!("${}\r\n{}\r\n", token.len(), token));
    }
    out
}

/// Splits one framed request into its tokens.
fn parse_array(frame: &str) -> Result<Vec<String>> {
    let mut lines = frame.split("\r\n");

    let header = lines.next().ok_or_else(|| protocol_err("empty frame"))?;
    let count: usize = header
        .strip_prefix('*')
        .ok_or_else(|| protocol_err("missing array header"))?
        .parse()
        .map_err(|_| protocol_err("malformed array header"))?;

    let mut tokens = Vec::with_capacity(count);
    for _ in 0..count {
        let length: usize = lines
            .next()
            .and_then(|line| line.strip_prefix('$'))
            .and_then(|line| line.parse().ok())
            .ok_or_else(|| protocol_err("malformed bulk length"))?;
        let token = lines
            .next()
            .ok_or_else(|| protocol_err("truncated frame"))?;
        if token.len() != length {
            return Err(protocol_err("bulk length mismatch"));
        }
        tokens.push(token.to_string());
    }
    Ok(tokens)
}

/// Parses one framed request into a [`Command`].
pub fn parse_command(frame: &str) -> Result<Command> {
    let mut tokens = parse_array(frame)?;

    match tokens.first().map(String::as_str) {
        Some(COMMAND_SET) => {
            if tokens.len() != 3 {
                return Err(protocol_err("wrong number of parameters"));
            }
            let value = tokens.remove(2);
            let key = tokens.remove(1);
            Ok(Command::Set { key, value })
        }
        Some(COMMAND_GET) => {
            if tokens.len() != 2 {
                return Err(protocol_err("wrong number of parameters"));
            }
            Ok(Command::Get {
                key: tokens.remove(1),
            })
        }
        Some(COMMAND_DEL) => {
            if tokens.len() != 2 {
                return Err(protocol_err("wrong number of parameters"));
            }
            Ok(Command::Del {
                key: tokens.remove(1),
            })
        }
        _ => Err(protocol_err("invalid or unknown command")),
    }
}
