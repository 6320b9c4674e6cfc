//! minnow - HTTP/1.1 + WebSocket protocol toolkit
//!
//! This crate provides a small, blocking HTTP/1.1 and WebSocket (RFC 6455)
//! implementation built on three cores: a position-tracking character
//! tokenizer, a tokenizer-driven HTTP message parser, and a byte-exact
//! WebSocket fragment codec. A connection dispatcher ties them together
//! with a matcher-based handler table and a bounded worker pool.
//!
//! # Architecture
//!
//! - [`lexer`] is the shared substrate for line-oriented text protocols:
//!   HTTP start lines and header blocks are consumed by peeking, expecting,
//!   and scanning for end markers.
//! - [`http`] parses requests and responses into records that borrow the
//!   receive buffer, and hosts the server dispatcher and client.
//! - [`ws`] parses and serializes one WebSocket fragment at a time,
//!   applying RFC 6455 masking in place on the caller's buffer.
//! - [`net`] abstracts the transport behind a poll-capable trait so the
//!   HTTP and WebSocket layers are transparent to the underlying socket.
//!
//! # Examples
//!
//! ```no_run
//! use minnow::http::{HttpClient, Request, Method, Headers};
//! use minnow::net::TcpTransport;
//! use std::net::TcpStream;
//!
//! let stream = TcpStream::connect("127.0.0.1:8080").unwrap();
//! let mut client = HttpClient::new(TcpTransport::new(stream));
//!
//! let mut headers = Headers::new();
//! headers.insert("Host", "localhost");
//! let request = Request {
//!     method: Method::Get,
//!     path: "/",
//!     protocol: "HTTP/1.1",
//!     headers,
//! };
//! client.send_request(&request).unwrap();
//! let response = client.receive_response().unwrap();
//! assert_eq!(response.status, 200);
//! ```

pub mod hmac;
pub mod http;
pub mod lexer;
pub mod net;
pub mod ws;
