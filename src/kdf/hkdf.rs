//! HKDF extract-and-expand (RFC 5869), generic over any [`Digest`].

use crate::hash::{Digest, DIGEST_OUT_MAX};
use crate::kdf::Hmac;

/// Derivation parameter failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KdfError {
    /// Output length is zero or exceeds `255 × H::OUTPUT_LEN`.
    OkmLength,
}

impl core::fmt::Display for KdfError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("hkdf output length out of range")
    }
}

impl std::error::Error for KdfError {}

/// Fill `okm` with HKDF(H) output.
///
/// Extract: `PRK = HMAC(salt, ikm)`. Expand: `T_i = HMAC(PRK,
/// T_{i-1} || info || i)` concatenated. Longer outputs are prefixes of
/// shorter ones for the same inputs.
pub fn hkdf<H: Digest>(ikm: &[u8], salt: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), KdfError> {
    let hlen = H::OUTPUT_LEN;
    if okm.is_empty() || okm.len() > 255 * hlen {
        return Err(KdfError::OkmLength);
    }

    let mut prk = [0u8; DIGEST_OUT_MAX];
    Hmac::<H>::mac(salt, ikm, &mut prk);
    let prk = &prk[..hlen];

    let mut t = [0u8; DIGEST_OUT_MAX];
    let mut t_len = 0usize;
    for (i, chunk) in okm.chunks_mut(hlen).enumerate() {
        let mut mac = Hmac::<H>::new(prk);
        mac.update(&t[..t_len]);
        mac.update(info);
        mac.update(&[(i + 1) as u8]);
        mac.finish_into(&mut t);
        t_len = hlen;

        chunk.copy_from_slice(&t[..chunk.len()]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256;

    #[test]
    fn length_bounds() {
        let mut none: [u8; 0] = [];
        assert_eq!(hkdf::<Sha256>(b"ikm", b"", b"", &mut none), Err(KdfError::OkmLength));
        let mut too_long = vec![0u8; 255 * 32 + 1];
        assert_eq!(
            hkdf::<Sha256>(b"ikm", b"", b"", &mut too_long),
            Err(KdfError::OkmLength)
        );
        let mut max = vec![0u8; 255 * 32];
        assert!(hkdf::<Sha256>(b"ikm", b"", b"", &mut max).is_ok());
    }

    #[test]
    fn longer_output_extends_shorter() {
        let mut short = [0u8; 40];
        let mut long = [0u8; 90];
        hkdf::<Sha256>(b"input keying material", b"salt", b"ctx", &mut short).unwrap();
        hkdf::<Sha256>(b"input keying material", b"salt", b"ctx", &mut long).unwrap();
        assert_eq!(short, long[..40]);
    }
}
