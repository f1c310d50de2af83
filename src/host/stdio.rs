//! Newline-delimited JSON-RPC server over stdin/stdout.
//!
//! Reads one request per line, answers protocol methods inline and runs each
//! `tools/call` on its own task so slow fetches do not block other calls.
//! Response frames are written whole under one writer lock and flushed.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinSet};

use crate::error::{Result, ServerError};
use crate::host::contract::{McpMethod, PARSE_ERROR, RpcRequest, RpcResponse};
use crate::host::handler::McpHandler;

type SharedWriter<W> = Arc<Mutex<BufWriter<W>>>;

/// Serve the protocol on the process stdin/stdout until stdin closes.
pub async fn run_stdio_server(handler: McpHandler) -> Result<()> {
    serve(tokio::io::stdin(), tokio::io::stdout(), handler).await
}

/// Serve the protocol on an arbitrary reader/writer pair.
///
/// On EOF the loop stops reading, waits for every in-flight tool call to
/// write its response, then shuts the handler down.
pub async fn serve<R, W>(reader: R, writer: W, handler: McpHandler) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let handler = Arc::new(handler);
    let writer: SharedWriter<W> = Arc::new(Mutex::new(BufWriter::new(writer)));
    let mut in_flight: JoinSet<Result<()>> = JoinSet::new();

    let read_result = read_loop(reader, &writer, &handler, &mut in_flight).await;

    while let Some(joined) = in_flight.join_next().await {
        log_call_outcome(joined);
    }

    match Arc::try_unwrap(handler) {
        Ok(handler) => handler.shutdown(),
        Err(_) => tracing::warn!("handler still shared at shutdown"),
    }
    tracing::info!("stdio server stopped");
    read_result
}

async fn read_loop<R, W>(
    reader: R,
    writer: &SharedWriter<W>,
    handler: &Arc<McpHandler>,
    in_flight: &mut JoinSet<Result<()>>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let bytes_read = reader.read_until(b'\n', &mut buf).await?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); draining in-flight calls");
            return Ok(());
        }

        while let Some(joined) = in_flight.try_join_next() {
            log_call_outcome(joined);
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "request line is not valid UTF-8");
                let response =
                    RpcResponse::error(Value::Null, PARSE_ERROR, format!("parse error: {e}"));
                write_response(writer, &response).await?;
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request: RpcRequest = match serde_json::from_str(trimmed) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse request line");
                let response =
                    RpcResponse::error(Value::Null, PARSE_ERROR, format!("parse error: {e}"));
                write_response(writer, &response).await?;
                continue;
            }
        };

        if McpMethod::parse(&request.method) == Some(McpMethod::ToolsCall) {
            let handler = Arc::clone(handler);
            let writer = Arc::clone(writer);
            in_flight.spawn(async move {
                match handler.handle(request).await {
                    Some(response) => write_response(&writer, &response).await,
                    None => Ok(()),
                }
            });
        } else if let Some(response) = handler.handle(request).await {
            write_response(writer, &response).await?;
        }
    }
}

/// Serialize one response and write it as a single flushed line.
async fn write_response<W>(writer: &SharedWriter<W>, response: &RpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)
        .map_err(|e| ServerError::Protocol(format!("failed to serialize response: {e}")))?;
    let mut w = writer.lock().await;
    w.write_all(json.as_bytes()).await?;
    w.write_all(b"\n").await?;
    w.flush().await?;
    Ok(())
}

fn log_call_outcome(joined: std::result::Result<Result<()>, JoinError>) {
    match joined {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "failed to write tool call response"),
        Err(e) => tracing::error!(error = %e, "tool call task failed"),
    }
}
