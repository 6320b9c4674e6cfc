//! Connection dispatcher
//!
//! The accept loop hands each connection to a worker pool. A worker reads
//! until the accumulated buffer holds a blank-line terminator, parses the
//! request, and consults the handler table: matchers are evaluated in
//! registration order, first match wins, and a miss falls through to the
//! 404 handler. Handlers write their response bytes directly to the
//! session and decide whether the connection keeps serving requests.
//!
//! A handler that upgrades to WebSocket runs its fragment loop and then
//! returns [`Flow::Close`]; it never re-enters the HTTP loop.
//!
//! Errors are logged here and tear the connection down; a malformed
//! request closes the connection without a response.

use super::pool::WorkerPool;
use super::{parse_request, reason_phrase, Error, Request, Result, CRLF};
use crate::net::{Session, TcpTransport, Transport};
use bytes::{BufMut, BytesMut};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;

/// What the connection loop does after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next request on the same connection.
    Continue,
    /// Tear the connection down.
    Close,
}

/// A predicate over a parsed request, used for routing.
pub type Matcher = Box<dyn Fn(&Request<'_>) -> bool + Send + Sync>;

/// A request handler. Writes its response through the session.
pub type Handler =
    Box<dyn Fn(&mut Session<TcpTransport>, &Request<'_>) -> Result<Flow> + Send + Sync>;

/// Cap on the bytes accumulated for one request head.
const RECV_BUFFER_SIZE: usize = 64 * 1024;

const DEFAULT_POOL_SIZE: usize = 1000;

/// HTTP server: a handler table and an accept loop.
pub struct Server {
    handlers: Vec<(Matcher, Handler)>,
    not_found: Handler,
    pool_size: usize,
}

impl Server {
    pub fn new() -> Self {
        Server {
            handlers: Vec::new(),
            not_found: Box::new(|session, _| {
                respond_empty(session, 404)?;
                Ok(Flow::Continue)
            }),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Set the worker pool size (default 1000).
    pub fn pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    /// Register a handler. Matchers are consulted in registration order;
    /// the first that accepts wins.
    pub fn register(&mut self, matcher: Matcher, handler: Handler) {
        self.handlers.push((matcher, handler));
    }

    /// Replace the fallback handler used when no matcher accepts.
    pub fn set_not_found(&mut self, handler: Handler) {
        self.not_found = handler;
    }

    /// Accept connections indefinitely, dispatching each to the pool.
    /// Accept failures are logged and do not stop the loop.
    pub fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let server = Arc::new(self);
        let pool = WorkerPool::new(server.pool_size);
        log::debug!("listening on {:?}", listener.local_addr()?);

        loop {
            match listener.accept() {
                Ok((stream, peer)) => {
                    let server = Arc::clone(&server);
                    pool.execute(move || {
                        log::debug!("connection from {}", peer);
                        if let Err(err) = server.handle_connection(stream) {
                            log::warn!("connection from {}: {}", peer, err);
                        }
                    });
                }
                Err(err) => {
                    log::error!("accept failed: {}", err);
                }
            }
        }
    }

    /// Serve one connection until it closes or a handler ends it.
    fn handle_connection(&self, stream: TcpStream) -> Result<()> {
        let mut session = Session::new(TcpTransport::new(stream));
        // Starts small and grows; the cap is enforced while reading.
        let mut buffer = BytesMut::with_capacity(4096);

        loop {
            buffer.clear();
            if !read_request_bytes(&mut session, &mut buffer)? {
                return Ok(());
            }

            let request = match parse_request(&buffer) {
                Ok(request) => request,
                Err(err) => {
                    // Parsing failed before we knew what was asked, so no
                    // response is owed; just close.
                    log::warn!("unparseable request: {}", err);
                    return Ok(());
                }
            };

            let handler = self
                .handlers
                .iter()
                .find(|(matcher, _)| matcher(&request))
                .map(|(_, handler)| handler)
                .unwrap_or(&self.not_found);

            match handler(&mut session, &request)? {
                Flow::Continue => {}
                Flow::Close => return Ok(()),
            }
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

/// Read until `buffer` holds a header terminator. Returns `false` when
/// the peer closed before sending anything.
fn read_request_bytes(
    session: &mut Session<TcpTransport>,
    buffer: &mut BytesMut,
) -> Result<bool> {
    let mut chunk = [0u8; 4096];
    loop {
        let n = session.read(&mut chunk)?;
        if n == 0 {
            if buffer.is_empty() {
                return Ok(false);
            }
            return Err(Error::Protocol("connection closed mid-request".into()));
        }
        buffer.put_slice(&chunk[..n]);
        if has_header_terminator(buffer) {
            return Ok(true);
        }
        if buffer.len() > RECV_BUFFER_SIZE {
            return Err(Error::Protocol(format!(
                "request head exceeds {} bytes",
                RECV_BUFFER_SIZE
            )));
        }
    }
}

/// Scan the whole accumulated buffer; the terminator can straddle reads.
fn has_header_terminator(buffer: &[u8]) -> bool {
    buffer.windows(4).any(|window| window == b"\r\n\r\n")
}

/// Write a response with the given status and an empty body.
pub fn respond_empty<T: Transport>(session: &mut Session<T>, status: u16) -> Result<()> {
    let mut buf = BytesMut::new();
    buf.put_slice(format!("HTTP/1.1 {} {}{}", status, reason_phrase(status), CRLF).as_bytes());
    buf.put_slice(b"Content-Length: 0\r\n\r\n");
    session.write_all(&buf)?;
    Ok(())
}

/// Write a response with a body and minimal headers.
pub fn respond<T: Transport>(
    session: &mut Session<T>,
    status: u16,
    content_type: &str,
    body: &[u8],
) -> Result<()> {
    let mut buf = BytesMut::new();
    buf.put_slice(format!("HTTP/1.1 {} {}{}", status, reason_phrase(status), CRLF).as_bytes());
    buf.put_slice(format!("Content-Type: {}{}", content_type, CRLF).as_bytes());
    buf.put_slice(format!("Content-Length: {}{}{}", body.len(), CRLF, CRLF).as_bytes());
    buf.put_slice(body);
    session.write_all(&buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_scan_spans_reads() {
        // Terminator split across two appends is still found
        let mut buffer = BytesMut::new();
        buffer.put_slice(b"GET / HTTP/1.1\r\n\r");
        assert!(!has_header_terminator(&buffer));
        buffer.put_slice(b"\n");
        assert!(has_header_terminator(&buffer));
    }

    #[test]
    fn test_terminator_anywhere_in_buffer() {
        assert!(has_header_terminator(b"GET / HTTP/1.1\r\n\r\ntrailing"));
        assert!(!has_header_terminator(b"GET / HTTP/1.1\r\n"));
    }
}
