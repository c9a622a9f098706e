//! primkit: freestanding cryptographic, checksum and codec primitives
//! over caller-owned buffers.
//!
//! Five layers, each using only the ones below it:
//!
//! 1. byte/bit plumbing: endian shims, constant-time compare,
//!    [`BitReader`] / [`BitWriter`];
//! 2. containers over borrowed storage: [`RingBuf`], [`MinHeap`],
//!    [`ListArena`], [`SwissTable`];
//! 3. digest engines: MD5, SHA-1, SHA-2, SHA-3/SHAKE, BLAKE2b/2s,
//!    SipHash-2-4, XXH32/64, the CRC-16/32/64 family;
//! 4. symmetric cores: AES (+CBC/CFB/OFB/CTR), DES, Blowfish, RC4,
//!    Salsa20/XSalsa20, ChaCha20/XChaCha20, Poly1305;
//! 5. constructions: HMAC, HKDF, PBKDF2, bcrypt, scrypt, TOTP, the
//!    base-16/32/64 codecs, and the streaming DEFLATE [`Inflate`] decoder.
//!
//! Every context is a plain fixed-size value the caller owns; nothing
//! here allocates, registers global state, or spawns anything. Distinct
//! contexts are freely usable from different threads; one context is one
//! thread's business.

pub mod bits;
pub mod cipher;
pub mod codec;
pub mod ds;
pub mod hash;
pub mod inflate;
pub mod kdf;
pub mod util;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level re-exports for the common entry points
// ─────────────────────────────────────────────────────────────────────────────

/// LSB-first bit extraction over a refillable staging buffer.
pub use bits::BitReader;
/// LSB-first bit accumulation into a staging buffer.
pub use bits::BitWriter;
/// Byte FIFO over a borrowed buffer with wrapping counters.
pub use ds::RingBuf;
/// Comparator-per-call binary heap over borrowed slots.
pub use ds::MinHeap;
/// Index-linked doubly linked list over a borrowed arena.
pub use ds::ListArena;
/// Group-of-4 SWAR Swiss table over borrowed control/bucket storage.
pub use ds::SwissTable;
/// Streaming digest interface consumed by the MAC/KDF constructions.
pub use hash::Digest;
/// Streaming DEFLATE decoder with a zero-copy emission window.
pub use inflate::Inflate;
/// HMAC over any bundled digest.
pub use kdf::Hmac;
/// Constant-time byte-slice equality.
pub use util::ct_eq;
