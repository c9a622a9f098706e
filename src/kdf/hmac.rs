//! HMAC (RFC 2104), generic over any [`Digest`].

use crate::hash::{Digest, DIGEST_BLOCK_MAX, DIGEST_OUT_MAX};
use crate::util::ct_eq;

/// Keyed MAC context over a hash `H`.
///
/// Construction: a key longer than the hash block collapses through `H`;
/// the padded key XOR 0x36 seeds the inner hash, XOR 0x5C the outer.
/// `update` streams into the inner hash; `finish_into` chains inner digest
/// through the outer.
#[derive(Clone)]
pub struct Hmac<H: Digest> {
    inner: H,
    outer: H,
}

impl<H: Digest> Hmac<H> {
    pub fn new(key: &[u8]) -> Self {
        debug_assert!(H::BLOCK_SIZE <= DIGEST_BLOCK_MAX && H::OUTPUT_LEN <= DIGEST_OUT_MAX);

        let mut kbuf = [0u8; DIGEST_OUT_MAX];
        let key = if key.len() > H::BLOCK_SIZE {
            let mut h = H::init();
            h.update(key);
            h.finish_into(&mut kbuf);
            &kbuf[..H::OUTPUT_LEN]
        } else {
            key
        };

        let mut ipad = [0x36u8; DIGEST_BLOCK_MAX];
        let mut opad = [0x5cu8; DIGEST_BLOCK_MAX];
        for (i, &k) in key.iter().enumerate() {
            ipad[i] ^= k;
            opad[i] ^= k;
        }

        let mut inner = H::init();
        inner.update(&ipad[..H::BLOCK_SIZE]);
        let mut outer = H::init();
        outer.update(&opad[..H::BLOCK_SIZE]);

        Hmac { inner, outer }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Write the `H::OUTPUT_LEN`-byte tag into `out[..H::OUTPUT_LEN]`.
    pub fn finish_into(mut self, out: &mut [u8]) {
        let mut digest = [0u8; DIGEST_OUT_MAX];
        self.inner.finish_into(&mut digest);
        self.outer.update(&digest[..H::OUTPUT_LEN]);
        self.outer.finish_into(out);
    }

    /// One-shot MAC into `out[..H::OUTPUT_LEN]`.
    pub fn mac(key: &[u8], data: &[u8], out: &mut [u8]) {
        let mut h = Self::new(key);
        h.update(data);
        h.finish_into(out);
    }

    /// Constant-time verification of a full-length tag.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
        let mut out = [0u8; DIGEST_OUT_MAX];
        Self::mac(key, data, &mut out);
        ct_eq(&out[..H::OUTPUT_LEN], tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{sha256, Sha256};

    #[test]
    fn long_keys_collapse_through_the_hash() {
        let key = [0xaau8; 100];
        let hashed_key = sha256(&key);

        let mut a = [0u8; 32];
        Hmac::<Sha256>::mac(&key, b"msg", &mut a);
        let mut b = [0u8; 32];
        Hmac::<Sha256>::mac(&hashed_key, b"msg", &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn verify_rejects_wrong_tag() {
        let mut tag = [0u8; 32];
        Hmac::<Sha256>::mac(b"k", b"payload", &mut tag);
        assert!(Hmac::<Sha256>::verify(b"k", b"payload", &tag));
        tag[31] ^= 1;
        assert!(!Hmac::<Sha256>::verify(b"k", b"payload", &tag));
    }
}
