//! Stdio transport
//!
//! Newline-delimited JSON-RPC: one message per line in, one response per line
//! out. Stdout carries protocol messages only.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::MCPError;
use crate::protocol::JsonRpcResponse;
use crate::server::McpServer;

/// Serve messages from `reader` until EOF, writing responses to `writer`
///
/// Messages are handled one at a time in arrival order. A line that is not
/// UTF-8 is answered with a parse error and the session goes on.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "Received message");
                server.handle_message(line).await
            }
            Err(e) => {
                warn!(error = %e, "Discarding message that is not UTF-8");
                let err = MCPError::ParseError(e.to_string());
                Some(JsonRpcResponse::failure(Value::Null, err.to_rpc_error()))
            }
        };

        if let Some(response) = response {
            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }
    }

    info!("Input closed, ending session");
    Ok(())
}

/// Serve over the process's stdin and stdout
pub async fn serve_stdio(server: &McpServer) -> Result<()> {
    info!(tools = server.tool_count(), "Serving MCP over stdio");
    serve(
        server,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
