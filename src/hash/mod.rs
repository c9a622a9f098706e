//! Digest engines: MD5, SHA-1, SHA-2, SHA-3/Keccak, BLAKE2, SipHash,
//! xxHash and the CRC table family.
//!
//! Every streaming engine is a fixed-size context driven as
//! `new() → update()* → finalize()`; `finalize` consumes the context, so
//! feeding a finished hash is unrepresentable. One-shot free functions
//! cover the common case. The [`Digest`] trait is the seam the MAC/KDF
//! tier composes over.

mod blake2;
mod crc;
mod md5;
mod sha1;
mod sha2;
mod sha3;
mod siphash;
mod xxhash;

pub use blake2::{blake2b, blake2s, Blake2Error, Blake2b, Blake2b512, Blake2s, Blake2s256};
pub use crc::{
    crc16, crc16_table, crc16_update_lsb, crc16_update_msb, crc32, crc32_table,
    crc32_update_lsb, crc32_update_msb, crc64, crc64_table, crc64_update_lsb,
    crc64_update_msb, Crc16Kind, Crc32Kind, Crc64Kind,
};
pub use md5::{md5, Md5};
pub use sha1::{sha1, Sha1};
pub use sha2::{sha224, sha256, sha384, sha512, Sha224, Sha256, Sha384, Sha512};
pub use sha3::{
    keccak_f1600, sha3_224, sha3_256, sha3_384, sha3_512, Sha3, Sha3Xof, Sha3_224, Sha3_256,
    Sha3_384, Sha3_512, Sha3Variant, KECCAK_LANES,
};
pub use siphash::{siphash24, siphashx24};
pub use xxhash::{xxh32, xxh64, Xxh32, Xxh64};

/// Streaming digest interface for the constructions layered on top
/// (HMAC, HKDF, PBKDF2, TOTP).
///
/// `BLOCK_SIZE` is the compression block in bytes (the sponge rate for the
/// SHA-3 wrappers), `OUTPUT_LEN` the digest size. `finish_into` consumes
/// the engine and writes exactly `OUTPUT_LEN` bytes into `out[..OUTPUT_LEN]`.
pub trait Digest: Clone {
    const BLOCK_SIZE: usize;
    const OUTPUT_LEN: usize;

    fn init() -> Self;
    fn update(&mut self, data: &[u8]);
    fn finish_into(self, out: &mut [u8]);
}

/// Scratch-pad sizing bound for the generic MAC/KDF code: the largest
/// sponge rate (SHAKE128's 168 bytes), headroom over every bundled
/// [`Digest`] block size.
pub const DIGEST_BLOCK_MAX: usize = 168;

/// Largest `OUTPUT_LEN` of any bundled [`Digest`].
pub const DIGEST_OUT_MAX: usize = 64;
