//! Keyed constructions composed from the digest tier: HMAC and the key
//! derivation / password hashing functions built on it, plus TOTP.

mod bcrypt;
mod hkdf;
mod hmac;
mod pbkdf2;
mod scrypt;
mod totp;

pub use bcrypt::{bcrypt_auth, bcrypt_hashpass, BCRYPT_HASHPASS_LEN, BCRYPT_SALT_LEN};
pub use hkdf::{hkdf, KdfError};
pub use hmac::Hmac;
pub use pbkdf2::pbkdf2;
pub use scrypt::{scrypt, scrypt_scratch_len, ScryptError};
pub use totp::totp;
