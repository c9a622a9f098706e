//! PBKDF2 (RFC 8018), generic over any [`Digest`].

use crate::hash::{Digest, DIGEST_OUT_MAX};
use crate::kdf::Hmac;

/// Fill `dk` with PBKDF2(H) output.
///
/// Block `i` is `U_1 ⊕ … ⊕ U_iters` with `U_1 = HMAC(pass,
/// salt || BE32(i))` and `U_j = HMAC(pass, U_{j-1})`. `iters == 0` is
/// treated as 1 (the chain below `U_1` is empty either way).
pub fn pbkdf2<H: Digest>(pass: &[u8], salt: &[u8], iters: u32, dk: &mut [u8]) {
    let hlen = H::OUTPUT_LEN;

    for (i, chunk) in dk.chunks_mut(hlen).enumerate() {
        let block_index = (i + 1) as u32;

        let mut u = [0u8; DIGEST_OUT_MAX];
        let mut mac = Hmac::<H>::new(pass);
        mac.update(salt);
        mac.update(&block_index.to_be_bytes());
        mac.finish_into(&mut u);

        let mut acc = u;
        for _ in 1..iters {
            let mut next = [0u8; DIGEST_OUT_MAX];
            let mut mac = Hmac::<H>::new(pass);
            mac.update(&u[..hlen]);
            mac.finish_into(&mut next);
            u = next;
            for (a, b) in acc[..hlen].iter_mut().zip(u[..hlen].iter()) {
                *a ^= b;
            }
        }

        chunk.copy_from_slice(&acc[..chunk.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha1;

    #[test]
    fn single_iteration_is_prf_of_salt_and_index() {
        let mut dk = [0u8; 20];
        pbkdf2::<Sha1>(b"password", b"salt", 1, &mut dk);

        let mut direct = [0u8; 20];
        let mut mac = Hmac::<Sha1>::new(b"password");
        mac.update(b"salt");
        mac.update(&1u32.to_be_bytes());
        mac.finish_into(&mut direct);

        assert_eq!(dk, direct);
    }
}
