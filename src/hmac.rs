//! HMAC-SHA-256
//!
//! Keyed message authentication per RFC 2104, with SHA-256 as the
//! underlying hash (block size 64, digest size 32).

use sha2::{Digest, Sha256};

/// SHA-256 input block size in bytes.
const BLOCK_SIZE: usize = 64;

/// HMAC output size in bytes.
pub const MAC_SIZE: usize = 32;

/// Compute `HMAC-SHA-256(key, data)`.
///
/// A key longer than one block is replaced by its SHA-256 digest; the key
/// is then zero-padded to the block size before the inner and outer pads
/// are derived.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; MAC_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let digest = Sha256::digest(key);
        block[..digest.len()].copy_from_slice(&digest);
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    let mut inner_pad = [0u8; BLOCK_SIZE];
    let mut outer_pad = [0u8; BLOCK_SIZE];
    for i in 0..BLOCK_SIZE {
        inner_pad[i] = block[i] ^ 0x36;
        outer_pad[i] = block[i] ^ 0x5C;
    }

    let mut inner = Sha256::new();
    inner.update(inner_pad);
    inner.update(data);

    let mut outer = Sha256::new();
    outer.update(outer_pad);
    outer.update(inner.finalize());
    outer.finalize().into()
}
