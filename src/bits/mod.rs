//! LSB-first bit streams over small fixed staging buffers.
//!
//! The reader and writer both stage whole bytes plus a bit cursor into the
//! current byte, so callers can interleave bit-granular and byte-granular
//! access without ever touching a heap. The DEFLATE decoder drives
//! [`BitReader`]; [`BitWriter`] is its encoding-side counterpart.

mod reader;
mod writer;

pub use reader::{BitReader, BITS_GET_BUFSIZE};
pub use writer::{BitWriter, BITS_ADD_BUFSIZE};

/// Low-`n`-bits masks for 0..=8 bits.
pub(crate) const BIT_MASK: [u8; 9] = [0x00, 0x01, 0x03, 0x07, 0x0f, 0x1f, 0x3f, 0x7f, 0xff];
