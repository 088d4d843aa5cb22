//! Per-connection request/response state machine.
//!
//! A [`Connection`] owns one accepted socket and drives it through exactly
//! one read-headers → read-body → dispatch → write-response exchange, then
//! closes. Header bytes are capped cumulatively (nothing announces their
//! length upfront), the body is capped against the parsed `content-length`,
//! and each read phase is independently time-bounded.
//!
//! Failure handling follows one rule: if the peer sent something we can
//! refuse, answer 400; if the handler broke, answer 500; if the peer went
//! silent or hung up before a complete request arrived, just close — there
//! is nobody worth answering.

use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::config::Limits;
use crate::handler::Handler;
use crate::http::codec;
use crate::http::response::Response;

const READ_CHUNK: usize = 1024;

pub struct Connection {
    stream: TcpStream,
    root: Arc<dyn Handler>,
    limits: Limits,
}

/// Outcome of the header-read phase.
enum HeadRead {
    /// Complete header block, plus any bytes read past the blank line
    /// (the start of the body).
    Complete { head: BytesMut, rest: BytesMut },
    /// Peer closed before the blank line arrived.
    Eof,
    /// Cumulative header bytes exceeded the configured cap.
    TooLarge,
}

impl Connection {
    pub fn new(stream: TcpStream, root: Arc<dyn Handler>, limits: Limits) -> Self {
        Self {
            stream,
            root,
            limits,
        }
    }

    /// Runs the single request/response exchange and closes the socket.
    ///
    /// The socket is shut down on every exit path, including silent aborts.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.exchange().await;
        let _ = self.stream.shutdown().await;
        result
    }

    async fn exchange(&mut self) -> anyhow::Result<()> {
        let read_timeout = self.limits.read_timeout();

        // Phase 1: headers, under their own timeout.
        let head = match timeout(read_timeout, self.read_head()).await {
            Err(_) => {
                debug!("Timed out waiting for request headers, closing");
                return Ok(());
            }
            Ok(read) => read?,
        };

        let (head, rest) = match head {
            HeadRead::Eof => {
                debug!("Peer disconnected before end of headers");
                return Ok(());
            }
            HeadRead::TooLarge => {
                warn!(
                    limit = self.limits.max_header_bytes,
                    "Request headers exceeded size limit"
                );
                return self.reject(Response::bad_request()).await;
            }
            HeadRead::Complete { head, rest } => (head, rest),
        };

        // Phase 2: parse.
        let mut request = match codec::parse_request_head(&head) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Invalid HTTP request");
                return self.reject(Response::bad_request()).await;
            }
        };

        // Phase 3: body length from content-length, checked before reading.
        let content_length = match request.header("content-length") {
            None => 0,
            Some(value) => match value.parse::<usize>() {
                Ok(n) => n,
                Err(_) => {
                    warn!(value, "Invalid content-length header");
                    return self.reject(Response::bad_request()).await;
                }
            },
        };
        if content_length > self.limits.max_body_bytes {
            warn!(
                declared = content_length,
                limit = self.limits.max_body_bytes,
                "Request body exceeds size limit"
            );
            return self.reject(Response::bad_request()).await;
        }

        // Phase 4: body, under its own timeout.
        match timeout(read_timeout, self.read_body(rest, content_length)).await {
            Err(_) => {
                debug!("Timed out waiting for request body, closing");
                return Ok(());
            }
            Ok(read) => match read? {
                Some(body) => request.body = body,
                None => {
                    debug!("Peer disconnected before end of body");
                    return Ok(());
                }
            },
        }

        // Phase 5: dispatch.
        let response = match self.root.handle(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Handler failed");
                Response::internal_error()
            }
        };

        // Phase 6: write.
        self.stream.write_all(&codec::pack_response(&response)).await?;
        Ok(())
    }

    /// Reads until the blank-line terminator, enforcing the header size cap.
    async fn read_head(&mut self) -> anyhow::Result<HeadRead> {
        let mut buffer = BytesMut::with_capacity(READ_CHUNK);
        loop {
            if let Some(end) = codec::find_blank_line(&buffer) {
                let head = buffer.split_to(end);
                buffer.advance(4);
                return Ok(HeadRead::Complete {
                    head,
                    rest: buffer,
                });
            }

            if buffer.len() > self.limits.max_header_bytes {
                return Ok(HeadRead::TooLarge);
            }

            let n = self.stream.read_buf(&mut buffer).await?;
            if n == 0 {
                return Ok(HeadRead::Eof);
            }
        }
    }

    /// Reads exactly `length` body bytes, starting from whatever was already
    /// buffered past the header terminator. Returns `None` on EOF.
    async fn read_body(
        &mut self,
        mut buffered: BytesMut,
        length: usize,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        let mut body = Vec::with_capacity(length);
        let take = buffered.len().min(length);
        body.extend_from_slice(&buffered[..take]);
        buffered.advance(take);

        while body.len() < length {
            let mut chunk = [0u8; READ_CHUNK];
            let want = (length - body.len()).min(READ_CHUNK);
            let n = self.stream.read(&mut chunk[..want]).await?;
            if n == 0 {
                return Ok(None);
            }
            body.extend_from_slice(&chunk[..n]);
        }

        Ok(Some(body))
    }

    /// Writes an error response, swallowing write failures. The exchange is
    /// over either way and the socket closes next.
    async fn reject(&mut self, response: Response) -> anyhow::Result<()> {
        if let Err(e) = self.stream.write_all(&codec::pack_response(&response)).await {
            debug!(error = %e, "Failed to write error response");
        }
        Ok(())
    }
}
