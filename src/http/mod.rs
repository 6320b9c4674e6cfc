//! HTTP/1.1 implementation
//!
//! This module provides HTTP/1.1 parsing, a connection dispatcher, and a
//! client. Parsing is tokenizer-driven and borrows from the input buffer;
//! the dispatcher owns the buffers, so parsed records never outlive the
//! connection that produced them.
//!
//! # Examples
//!
//! ```
//! use minnow::http::parse_response;
//!
//! let data = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n";
//! let response = parse_response(data).unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(response.headers.get("Content-Type"), Some("text/html"));
//! ```

pub mod client;
pub mod headers;
pub mod message;
pub mod parser;
pub mod pool;
pub mod server;

pub use client::{host_from_url, path_from_url, HttpClient};
pub use headers::Headers;
pub use message::{Method, Request, Response};
pub use parser::{parse_headers, parse_request, parse_response};
pub use server::{respond, respond_empty, Flow, Handler, Matcher, Server};

use crate::lexer;

/// Result type for transport-level HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for the parsers, borrowing from the parsed input
pub type ParseResult<'a, T> = std::result::Result<T, ParseError<'a>>;

/// Errors crossing the transport boundary. Parse errors are stringified
/// here because they borrow from buffers that do not outlive the
/// connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] crate::net::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Typed parse errors with source locations where the tokenizer provides
/// them. Everything borrows from the parsed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError<'a> {
    #[error("{0}")]
    Lex(lexer::Error<'a>),

    #[error("header block of {length} bytes exceeds the cap")]
    HeadersTooLong { length: usize },

    #[error("end of input while reading a header name: {data:?}")]
    ExpectedHeaderNameEnd { data: &'a str },

    #[error("end of input while reading the value of {name:?}: {data:?}")]
    ExpectedHeaderValueEnd { name: &'a str, data: &'a str },

    #[error("header block is missing its terminating blank line")]
    ExpectedHeaderEndMarker { data: &'a str },

    #[error("invalid protocol: {protocol:?}")]
    InvalidProtocol { protocol: &'a str },

    #[error("invalid status: {status:?}")]
    InvalidStatus { status: &'a str },

    #[error("invalid request path: {path:?}")]
    InvalidPath { path: &'a str },
}

impl<'a> From<lexer::Error<'a>> for ParseError<'a> {
    fn from(err: lexer::Error<'a>) -> Self {
        ParseError::Lex(err)
    }
}

/// Cap on the size of a header block accepted by [`parse_headers`].
pub const MAX_HEADERS_LENGTH: usize = 32 * 1024;

/// CRLF line ending
pub const CRLF: &str = "\r\n";

/// Canonical reason phrase for the status codes this crate emits itself.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        101 => "Switching Protocols",
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
