//! Symmetric ciphers and the Poly1305 authenticator.
//!
//! Block ciphers expose an expanded key schedule plus in-place block
//! operations; chaining modes mutate a caller-held IV or counter so
//! streaming is plain composition. Stream ciphers XOR their keystream into
//! the buffer, making `crypto` its own inverse.
//!
//! None of the table-driven cores (AES, DES, Blowfish) are hardened
//! against cache-timing observers; that trade-off is documented per
//! module rather than papered over.

mod aes;
mod blowfish;
mod chacha20;
mod des;
mod poly1305;
mod rc4;
mod salsa20;

pub use aes::{Aes, AesError, AES_BLOCK};
pub use blowfish::{Blowfish, BLOWFISH_BLOCK};
pub use chacha20::{
    hchacha20, ChaCha20, XChaCha20, CHACHA20_BLOCK, CHACHA20_IETF_NONCE_LEN, CHACHA20_KEY_LEN,
    CHACHA20_NONCE_LEN, XCHACHA20_NONCE_LEN,
};
pub use des::Des;
pub use poly1305::{
    poly1305, poly1305_verify, Poly1305, POLY1305_BLOCK, POLY1305_KEY_LEN, POLY1305_TAG_LEN,
};
pub use rc4::Rc4;
pub use salsa20::{
    hsalsa20, Salsa20, XSalsa20, SALSA20_BLOCK, SALSA20_KEY_LEN, SALSA20_NONCE_LEN,
    XSALSA20_NONCE_LEN,
};
