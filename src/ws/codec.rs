//! WebSocket fragment encoding and decoding
//!
//! Wire format (RFC 6455 section 5.2):
//!
//! ```text
//! byte 0:  FIN(1) RSV(3) OPCODE(4)
//! byte 1:  MASK(1) LEN7(7)
//!          LEN7 = 126 -> bytes 2..4  carry a 16-bit length, big-endian
//!          LEN7 = 127 -> bytes 2..10 carry a 64-bit length, big-endian
//! if MASK: 4-byte masking key
//! payload: LEN bytes
//! ```
//!
//! Masking is applied in place: parsing unmasks the input buffer, and
//! serializing a masked fragment XORs the caller's payload before copying
//! it out. Serializing the same masked fragment twice therefore does not
//! produce the same wire bytes; exactly one masking pass yields the wire
//! form.

use super::frame::{Fragment, FragmentData};
use super::{Error, Result};

/// XOR `payload` in place with `key`, repeating the key every 4 bytes.
/// Applying the same key twice restores the original bytes.
pub fn apply_mask(payload: &mut [u8], key: [u8; 4]) {
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte ^= key[i % 4];
    }
}

/// Parse one fragment from the front of `buf`, unmasking the payload in
/// place when the MASK bit is set. Returns the fragment, whose payload
/// slices the (now unmasked) input, and the bytes after it.
pub fn parse_fragment(buf: &mut [u8]) -> Result<(Fragment<'_>, &mut [u8])> {
    if buf.len() < 2 {
        return Err(Error::Truncated {
            needed: 2,
            available: buf.len(),
        });
    }

    let fin = buf[0] & 0x80 != 0;
    let opcode = buf[0] & 0x0F;
    let mask = buf[1] & 0x80 != 0;

    let (payload_len, mut offset) = match buf[1] & 0x7F {
        126 => {
            if buf.len() < 4 {
                return Err(Error::Truncated {
                    needed: 4,
                    available: buf.len(),
                });
            }
            (u64::from(u16::from_be_bytes([buf[2], buf[3]])), 4)
        }
        127 => {
            if buf.len() < 10 {
                return Err(Error::Truncated {
                    needed: 10,
                    available: buf.len(),
                });
            }
            let mut length = [0u8; 8];
            length.copy_from_slice(&buf[2..10]);
            (u64::from_be_bytes(length), 10)
        }
        len7 => (u64::from(len7), 2),
    };

    let mask_key = if mask {
        if buf.len() < offset + 4 {
            return Err(Error::Truncated {
                needed: offset + 4,
                available: buf.len(),
            });
        }
        let key = [buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]];
        offset += 4;
        key
    } else {
        [0; 4]
    };

    let payload_len = usize::try_from(payload_len).map_err(|_| Error::Truncated {
        needed: usize::MAX,
        available: buf.len(),
    })?;
    let total = offset
        .checked_add(payload_len)
        .ok_or(Error::Truncated {
            needed: usize::MAX,
            available: buf.len(),
        })?;
    if buf.len() < total {
        return Err(Error::Truncated {
            needed: total,
            available: buf.len(),
        });
    }

    let (frame, remaining) = buf.split_at_mut(total);
    let payload = &mut frame[offset..];
    if mask {
        apply_mask(payload, mask_key);
    }

    let data = FragmentData::from_opcode(opcode, payload)?;
    Ok((
        Fragment {
            data,
            fin,
            mask,
            mask_key,
        },
        remaining,
    ))
}

/// Serialize `fragment` into the front of `buffer` and return the written
/// prefix.
///
/// Byte 1 is written once, as MASK | LEN7, after the length has been
/// classified. When `fragment.mask` is set the mask key is appended and
/// the fragment's payload is XORed in place before being copied; the
/// caller's payload IS mutated.
///
/// The total size is checked against the buffer before anything is
/// written.
pub fn serialize_fragment<'b>(
    buffer: &'b mut [u8],
    fragment: &mut Fragment<'_>,
) -> Result<&'b [u8]> {
    let payload_len = fragment.data.payload().len();
    let extension = if payload_len <= 125 {
        0
    } else if payload_len <= 65535 {
        2
    } else {
        8
    };
    let key_len = if fragment.mask { 4 } else { 0 };
    let required_size = 2 + extension + key_len + payload_len;
    if buffer.len() < required_size {
        return Err(Error::BufferTooSmall { required_size });
    }

    buffer[0] = fragment.data.opcode() | if fragment.fin { 0x80 } else { 0 };

    let mask_bit = if fragment.mask { 0x80 } else { 0 };
    let mut offset = 2;
    match extension {
        0 => buffer[1] = mask_bit | payload_len as u8,
        2 => {
            buffer[1] = mask_bit | 126;
            buffer[2..4].copy_from_slice(&(payload_len as u16).to_be_bytes());
            offset = 4;
        }
        _ => {
            buffer[1] = mask_bit | 127;
            buffer[2..10].copy_from_slice(&(payload_len as u64).to_be_bytes());
            offset = 10;
        }
    }

    if fragment.mask {
        buffer[offset..offset + 4].copy_from_slice(&fragment.mask_key);
        offset += 4;
        apply_mask(fragment.data.payload_mut(), fragment.mask_key);
    }

    buffer[offset..offset + payload_len].copy_from_slice(fragment.data.payload());
    Ok(&buffer[..offset + payload_len])
}
