//! WebSocket (RFC 6455) implementation
//!
//! One fragment at a time: the codec parses and serializes single frames,
//! applying client-side masking in place on the caller's buffer. Message
//! reassembly across continuation fragments is a caller concern.
//!
//! # Examples
//!
//! ```
//! use minnow::ws::{parse_fragment, FragmentData};
//!
//! // An unmasked text fragment carrying "hi"
//! let mut wire = vec![0x81, 0x02, b'h', b'i'];
//! let (fragment, remaining) = parse_fragment(&mut wire).unwrap();
//! assert!(fragment.fin);
//! assert!(matches!(fragment.data, FragmentData::Text(_)));
//! assert_eq!(fragment.data.payload(), b"hi");
//! assert!(remaining.is_empty());
//! ```

pub mod codec;
pub mod frame;
pub mod handshake;
pub mod session;

pub use codec::{apply_mask, parse_fragment, serialize_fragment};
pub use frame::{Fragment, FragmentData};
pub use handshake::{accept_key, check_upgrade, client_key, handshake_response, upgrade};
pub use session::{Message, WsSession};

/// Result type for WebSocket operations
pub type Result<T> = std::result::Result<T, Error>;

/// WebSocket errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid opcode: {opcode:#x}")]
    InvalidOpcode { opcode: u8 },

    #[error("buffer too small: {required_size} bytes required")]
    BufferTooSmall { required_size: usize },

    #[error("fragment truncated: {needed} bytes needed, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("network error: {0}")]
    Network(#[from] crate::net::Error),
}
