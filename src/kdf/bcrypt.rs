//! bcrypt password hashing over the Blowfish expensive key schedule.
//!
//! Produces the raw 24-byte digest; radix-64 framing (`$2b$…`) is a
//! caller-side format. Password and salt bytes are used exactly as given;
//! whether to append a terminating NUL or cap the password at 72 bytes is
//! the caller's compatibility policy.

use crate::cipher::Blowfish;
use crate::util::ct_eq;

/// Raw digest length: "OrpheanBeholderScryDoubt" re-encrypted 64 times.
pub const BCRYPT_HASHPASS_LEN: usize = 24;
/// Conventional salt length.
pub const BCRYPT_SALT_LEN: usize = 16;

// "OrpheanBeholderScryDoubt" as six big-endian words.
const MAGIC: [u32; 6] = [
    0x4f727068, 0x65616e42, 0x65686f6c, 0x64657253, 0x63727944, 0x6f756274,
];

/// Hash `pass` under `salt` with work factor `2^cost`.
///
/// Schedule: π-initialized Blowfish, one salted expensive pass, then
/// `2^cost` alternating plain passes over password and salt. Output is the
/// 64-times-encrypted magic block, serialized big-endian.
pub fn bcrypt_hashpass(pass: &[u8], salt: &[u8], cost: u32) -> [u8; BCRYPT_HASHPASS_LEN] {
    debug_assert!(!pass.is_empty() && !salt.is_empty());

    let mut bf = Blowfish::new(&[]);
    bf.expand_key_with_salt(salt, pass);
    for _ in 0..1u64 << cost {
        bf.expand_key(pass);
        bf.expand_key(salt);
    }

    let mut block = MAGIC;
    for _ in 0..64 {
        for pair in block.chunks_mut(2) {
            let (mut l, mut r) = (pair[0], pair[1]);
            bf.encrypt(&mut l, &mut r);
            pair[0] = l;
            pair[1] = r;
        }
    }

    let mut out = [0u8; BCRYPT_HASHPASS_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(block.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Constant-time comparison of two raw bcrypt digests.
pub fn bcrypt_auth(a: &[u8; BCRYPT_HASHPASS_LEN], b: &[u8; BCRYPT_HASHPASS_LEN]) -> bool {
    ct_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_and_salt_change_the_digest() {
        let salt = [7u8; BCRYPT_SALT_LEN];
        let a = bcrypt_hashpass(b"hunter2", &salt, 4);
        assert_eq!(a, bcrypt_hashpass(b"hunter2", &salt, 4));
        assert_ne!(a, bcrypt_hashpass(b"hunter2", &salt, 5));
        assert_ne!(a, bcrypt_hashpass(b"hunter2", &[8u8; 16], 4));
        assert!(bcrypt_auth(&a, &a));
        let mut b = a;
        b[23] ^= 1;
        assert!(!bcrypt_auth(&a, &b));
    }
}
