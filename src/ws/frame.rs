//! WebSocket fragment types
//!
//! A [`Fragment`] is one frame on the wire. Payloads are mutable slices
//! into the buffer the fragment was parsed from (or is about to be
//! serialized from): unmasking and masking both happen in place.

use super::{Error, Result};

/// RFC 6455 cap on control-fragment payloads. Not enforced by the codec;
/// callers must not send oversized control fragments.
pub const MAX_CONTROL_PAYLOAD: usize = 125;

/// Fragment payload tagged by opcode.
#[derive(Debug, PartialEq)]
pub enum FragmentData<'a> {
    Continuation(&'a mut [u8]),
    Text(&'a mut [u8]),
    Binary(&'a mut [u8]),
    Close(&'a mut [u8]),
    Ping(&'a mut [u8]),
    Pong(&'a mut [u8]),
}

impl<'a> FragmentData<'a> {
    /// Map a wire opcode to a data variant.
    pub fn from_opcode(opcode: u8, payload: &'a mut [u8]) -> Result<Self> {
        match opcode {
            0x0 => Ok(FragmentData::Continuation(payload)),
            0x1 => Ok(FragmentData::Text(payload)),
            0x2 => Ok(FragmentData::Binary(payload)),
            0x8 => Ok(FragmentData::Close(payload)),
            0x9 => Ok(FragmentData::Ping(payload)),
            0xA => Ok(FragmentData::Pong(payload)),
            _ => Err(Error::InvalidOpcode { opcode }),
        }
    }

    /// The wire opcode for this variant.
    pub fn opcode(&self) -> u8 {
        match self {
            FragmentData::Continuation(_) => 0x0,
            FragmentData::Text(_) => 0x1,
            FragmentData::Binary(_) => 0x2,
            FragmentData::Close(_) => 0x8,
            FragmentData::Ping(_) => 0x9,
            FragmentData::Pong(_) => 0xA,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FragmentData::Continuation(_) => "CONTINUATION",
            FragmentData::Text(_) => "TEXT",
            FragmentData::Binary(_) => "BINARY",
            FragmentData::Close(_) => "CLOSE",
            FragmentData::Ping(_) => "PING",
            FragmentData::Pong(_) => "PONG",
        }
    }

    /// Close, Ping, and Pong are control fragments.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            FragmentData::Close(_) | FragmentData::Ping(_) | FragmentData::Pong(_)
        )
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            FragmentData::Continuation(p)
            | FragmentData::Text(p)
            | FragmentData::Binary(p)
            | FragmentData::Close(p)
            | FragmentData::Ping(p)
            | FragmentData::Pong(p) => p,
        }
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        match self {
            FragmentData::Continuation(p)
            | FragmentData::Text(p)
            | FragmentData::Binary(p)
            | FragmentData::Close(p)
            | FragmentData::Ping(p)
            | FragmentData::Pong(p) => p,
        }
    }
}

/// One WebSocket frame.
///
/// `mask_key` is meaningful only when `mask` is set; server-to-client
/// fragments leave it zeroed.
#[derive(Debug, PartialEq)]
pub struct Fragment<'a> {
    pub data: FragmentData<'a>,
    pub fin: bool,
    pub mask: bool,
    pub mask_key: [u8; 4],
}

impl<'a> Fragment<'a> {
    fn unmasked(data: FragmentData<'a>) -> Self {
        Fragment {
            data,
            fin: true,
            mask: false,
            mask_key: [0; 4],
        }
    }

    /// A final text fragment.
    pub fn text(payload: &'a mut [u8]) -> Self {
        Self::unmasked(FragmentData::Text(payload))
    }

    /// A final binary fragment.
    pub fn binary(payload: &'a mut [u8]) -> Self {
        Self::unmasked(FragmentData::Binary(payload))
    }

    /// A close fragment.
    pub fn close(payload: &'a mut [u8]) -> Self {
        Self::unmasked(FragmentData::Close(payload))
    }

    /// A ping fragment.
    pub fn ping(payload: &'a mut [u8]) -> Self {
        Self::unmasked(FragmentData::Ping(payload))
    }

    /// A pong fragment.
    pub fn pong(payload: &'a mut [u8]) -> Self {
        Self::unmasked(FragmentData::Pong(payload))
    }

    /// Request client-side masking with the given key.
    pub fn masked(mut self, mask_key: [u8; 4]) -> Self {
        self.mask = true;
        self.mask_key = mask_key;
        self
    }
}
