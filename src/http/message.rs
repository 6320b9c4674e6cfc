//! HTTP message types
//!
//! Requests and responses are plain records whose string fields borrow
//! from the buffer they were parsed out of. The client path builds them
//! from literals and owned header values, then serializes with
//! [`Request::to_wire`].

use super::{Headers, CRLF};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// HTTP methods. The parser accepts `GET` only; `POST` exists in the data
/// model and carries its body with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method<'a> {
    Get,
    Post { data: &'a str },
}

impl Method<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post { .. } => "POST",
        }
    }
}

impl fmt::Display for Method<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP request
///
/// Invariant: `path` is non-empty and starts with `/` (enforced by the
/// parser; builders are trusted).
#[derive(Debug, Clone, PartialEq)]
pub struct Request<'a> {
    pub method: Method<'a>,
    pub path: &'a str,
    pub protocol: &'a str,
    pub headers: Headers<'a>,
}

impl Request<'_> {
    /// Serialize the request to wire format.
    pub fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_slice(self.method.as_str().as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.path.as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.protocol.as_bytes());
        buf.put_slice(CRLF.as_bytes());
        self.headers.write_wire(&mut buf);
        if let Method::Post { data } = self.method {
            buf.put_slice(data.as_bytes());
        }
        buf.freeze()
    }
}

/// HTTP response
///
/// Invariant: 100 <= `status` <= 599 (enforced by the parser).
#[derive(Debug, Clone, PartialEq)]
pub struct Response<'a> {
    pub protocol: &'a str,
    pub status: u16,
    pub message: &'a str,
    pub headers: Headers<'a>,
    pub body: &'a [u8],
}
