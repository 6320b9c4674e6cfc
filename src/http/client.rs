//! HTTP client
//!
//! A blocking client over any [`Transport`]: send a request, read until
//! the header terminator (plus any declared body), and parse the
//! accumulated bytes. The WebSocket upgrade path builds the RFC 6455
//! GET, sends it, and verifies the echoed accept value.

use super::{parse_response, Error, Headers, Method, Request, Response, Result};
use crate::net::{Session, TcpTransport, Transport};
use crate::ws;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Everything between `://` (or the start of the URL) and the first `/`
/// (or the end).
pub fn host_from_url(url: &str) -> &str {
    let after_scheme = match url.find("://") {
        Some(at) => &url[at + 3..],
        None => url,
    };
    match after_scheme.find('/') {
        Some(at) => &after_scheme[..at],
        None => after_scheme,
    }
}

/// Everything from the first `/` after the host, or `/` when the URL has
/// no path.
pub fn path_from_url(url: &str) -> &str {
    let after_scheme = match url.find("://") {
        Some(at) => &url[at + 3..],
        None => url,
    };
    match after_scheme.find('/') {
        Some(at) => &after_scheme[at..],
        None => "/",
    }
}

/// HTTP client
pub struct HttpClient<T: Transport> {
    session: Session<T>,
    buffer: Vec<u8>,
}

impl HttpClient<TcpTransport> {
    /// Connect over plain TCP.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr).map_err(crate::net::Error::from)?;
        Ok(HttpClient::new(TcpTransport::new(stream)))
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        HttpClient {
            session: Session::new(transport),
            buffer: Vec::with_capacity(8192),
        }
    }

    /// Set the deadline applied to each read and write.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.session.set_timeout(Some(timeout));
    }

    /// Send a request.
    pub fn send_request(&mut self, request: &Request<'_>) -> Result<()> {
        self.session.write_all(&request.to_wire())?;
        Ok(())
    }

    /// Receive a response.
    ///
    /// Reads until the header terminator arrives, then keeps reading
    /// until any `Content-Length`-declared body is complete. The parsed
    /// response borrows this client's buffer and lives until the next
    /// call.
    pub fn receive_response(&mut self) -> Result<Response<'_>> {
        self.buffer.clear();
        let mut chunk = [0u8; 4096];

        while !contains_terminator(&self.buffer) {
            let n = self.session.read(&mut chunk)?;
            if n == 0 {
                return Err(crate::net::Error::ConnectionClosed.into());
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }

        loop {
            let missing = {
                let response =
                    parse_response(&self.buffer).map_err(|err| Error::Parse(err.to_string()))?;
                match response.headers.get("Content-Length") {
                    Some(length) => {
                        let length: usize = length.parse().map_err(|_| {
                            Error::Parse(format!("invalid Content-Length: {}", length))
                        })?;
                        length.saturating_sub(response.body.len())
                    }
                    None => 0,
                }
            };
            if missing == 0 {
                break;
            }
            let n = self.session.read(&mut chunk)?;
            if n == 0 {
                return Err(crate::net::Error::ConnectionClosed.into());
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }

        parse_response(&self.buffer).map_err(|err| Error::Parse(err.to_string()))
    }

    /// Send a GET and receive the response.
    pub fn get(&mut self, host: &str, path: &str) -> Result<Response<'_>> {
        let mut headers = Headers::new();
        headers.insert("Host", host.to_string());
        let request = Request {
            method: Method::Get,
            path,
            protocol: "HTTP/1.1",
            headers,
        };
        self.send_request(&request)?;
        self.receive_response()
    }

    /// Upgrade this connection to WebSocket.
    ///
    /// Generates the 16-byte nonce, sends the upgrade GET for `url` with
    /// any caller-supplied headers (a caller `Host` is preserved), and
    /// verifies the `101` status and the echoed accept value. On success
    /// the connection speaks fragments; wrap it with
    /// [`WsSession::client`](crate::ws::WsSession::client) via
    /// [`session_mut`](Self::session_mut).
    pub fn upgrade(&mut self, url: &str, extra_headers: &Headers<'_>) -> Result<()> {
        let key = ws::handshake::client_key();
        let request = ws::handshake::upgrade_request(url, &key, extra_headers);
        self.send_request(&request)?;

        let expected = ws::handshake::accept_key(&key);
        let response = self.receive_response()?;
        if response.status != 101 {
            return Err(Error::Protocol(format!(
                "upgrade refused with status {}",
                response.status
            )));
        }
        if response.headers.get("Sec-WebSocket-Accept") != Some(expected.as_str()) {
            return Err(Error::Protocol("accept value mismatch".into()));
        }
        Ok(())
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<T> {
        &mut self.session
    }
}

fn contains_terminator(buffer: &[u8]) -> bool {
    buffer.windows(4).any(|window| window == b"\r\n\r\n")
}
