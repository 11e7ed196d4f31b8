// Newline-delimited JSON-RPC over stdio

use crate::error::{McpError, McpResult};
use crate::protocol::{JsonRpcError, JsonRpcResponse};
use crate::server::McpServer;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

/// Upper bound for one inbound frame
const MAX_FRAME_BYTES: usize = 4 * 1024 * 1024;

/// One inbound line, or the marker for a line that was too long to keep
#[derive(Debug, PartialEq)]
enum Frame {
    Line(String),
    Oversized,
}

/// `LinesCodec` that reports an oversized line as a frame instead of an error.
///
/// After `MaxLineLengthExceeded` the inner codec discards input up to the next
/// newline, so decoding resumes at the following message.
struct FrameCodec(LinesCodec);

impl FrameCodec {
    fn new(max_length: usize) -> Self {
        Self(LinesCodec::new_with_max_length(max_length))
    }

    fn map(result: Result<Option<String>, LinesCodecError>) -> Result<Option<Frame>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(Frame::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Frame::Oversized)),
            Err(e) => Err(e),
        }
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::map(self.0.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::map(self.0.decode_eof(buf))
    }
}

/// Serve MCP over the process's stdin/stdout until stdin closes
pub async fn run_stdio(server: McpServer) -> McpResult<()> {
    info!("Serving MCP over stdio");
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve MCP over any line-oriented byte stream pair.
///
/// Each request runs on its own task; responses are funneled through one
/// writer task so frames never interleave. A line longer than the frame limit
/// is answered with a parse error and skipped. On EOF, or an I/O error, the
/// loop stops reading and returns once every in-flight request has been
/// answered.
pub async fn serve<R, W>(server: McpServer, reader: R, writer: W) -> McpResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut frames = FramedRead::new(reader, FrameCodec::new(MAX_FRAME_BYTES));
    let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let writer_task = tokio::spawn(write_responses(rx, writer));

    let mut read_result = Ok(());
    while let Some(frame) = frames.next().await {
        let line = match frame {
            Ok(Frame::Line(line)) => line,
            Ok(Frame::Oversized) => {
                warn!(limit = MAX_FRAME_BYTES, "Discarding oversized frame");
                let response = JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(format!("message exceeds {} bytes", MAX_FRAME_BYTES)),
                );
                if tx.send(response).is_err() {
                    debug!("Writer closed before response could be sent");
                }
                continue;
            }
            Err(e) => {
                error!(error = %e, "Failed to read frame, closing transport");
                read_result = Err(McpError::from(e));
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = server.handle_message(&line).await {
                if tx.send(response).is_err() {
                    debug!("Writer closed before response could be sent");
                }
            }
        });
    }

    drop(tx);
    let write_result = writer_task
        .await
        .map_err(|e| McpError::Io(std::io::Error::other(e.to_string())))?;

    info!("Input closed, stdio transport stopped");
    read_result.and(write_result)
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>, writer: W) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, LinesCodec::new());
    while let Some(response) = rx.recv().await {
        let line = serde_json::to_string(&response)?;
        sink.send(line).await?;
    }
    Ok(())
}
