//! ChaCha20 and XChaCha20 (Bernstein; RFC 8439 for the IETF layout).
//!
//! Constants occupy words 0–3. Two initializers cover the deployed
//! layouts: the original 64-bit counter + 64-bit nonce, and the IETF
//! 32-bit counter + 96-bit nonce. XChaCha20 reduces (key, first 16 nonce
//! bytes) through HChaCha20 and continues with the remaining 8 bytes of a
//! 24-byte nonce.

use crate::util::le32;

/// Keystream block size in bytes.
pub const CHACHA20_BLOCK: usize = 64;
/// Key length in bytes.
pub const CHACHA20_KEY_LEN: usize = 32;
/// Nonce length of the original layout.
pub const CHACHA20_NONCE_LEN: usize = 8;
/// Nonce length of the IETF layout.
pub const CHACHA20_IETF_NONCE_LEN: usize = 12;
/// Nonce length of XChaCha20.
pub const XCHACHA20_NONCE_LEN: usize = 24;

const SIGMA: &[u8; 16] = b"expand 32-byte k";

macro_rules! qr {
    ($x:ident, $a:expr, $b:expr, $c:expr, $d:expr) => {
        $x[$a] = $x[$a].wrapping_add($x[$b]);
        $x[$d] = ($x[$d] ^ $x[$a]).rotate_left(16);
        $x[$c] = $x[$c].wrapping_add($x[$d]);
        $x[$b] = ($x[$b] ^ $x[$c]).rotate_left(12);
        $x[$a] = $x[$a].wrapping_add($x[$b]);
        $x[$d] = ($x[$d] ^ $x[$a]).rotate_left(8);
        $x[$c] = $x[$c].wrapping_add($x[$d]);
        $x[$b] = ($x[$b] ^ $x[$c]).rotate_left(7);
    };
}

fn double_rounds(x: &mut [u32; 16], rounds: u32) {
    for _ in 0..rounds / 2 {
        // column
        qr!(x, 0, 4, 8, 12);
        qr!(x, 1, 5, 9, 13);
        qr!(x, 2, 6, 10, 14);
        qr!(x, 3, 7, 11, 15);
        // diagonal
        qr!(x, 0, 5, 10, 15);
        qr!(x, 1, 6, 11, 12);
        qr!(x, 2, 7, 8, 13);
        qr!(x, 3, 4, 9, 14);
    }
}

fn key_layout(state: &mut [u32; 16], key: &[u8; CHACHA20_KEY_LEN]) {
    for i in 0..4 {
        state[i] = le32(SIGMA, 4 * i);
    }
    for i in 0..8 {
        state[4 + i] = le32(key, 4 * i);
    }
}

/// ChaCha20 stream context.
#[derive(Clone)]
pub struct ChaCha20 {
    state: [u32; 16],
}

impl ChaCha20 {
    /// Original layout: 64-bit counter in words 12–13, 64-bit nonce in
    /// words 14–15.
    pub fn new(key: &[u8; CHACHA20_KEY_LEN], nonce: &[u8; CHACHA20_NONCE_LEN], counter: u64) -> Self {
        let mut state = [0u32; 16];
        key_layout(&mut state, key);
        state[12] = counter as u32;
        state[13] = (counter >> 32) as u32;
        state[14] = le32(nonce, 0);
        state[15] = le32(nonce, 4);
        ChaCha20 { state }
    }

    /// IETF layout (RFC 8439): 32-bit counter in word 12, 96-bit nonce in
    /// words 13–15.
    pub fn new_ietf(
        key: &[u8; CHACHA20_KEY_LEN],
        nonce: &[u8; CHACHA20_IETF_NONCE_LEN],
        counter: u32,
    ) -> Self {
        let mut state = [0u32; 16];
        key_layout(&mut state, key);
        state[12] = counter;
        state[13] = le32(nonce, 0);
        state[14] = le32(nonce, 4);
        state[15] = le32(nonce, 8);
        ChaCha20 { state }
    }

    /// Keystream block for the current counter; does not advance it.
    pub fn block(&self, rounds: u32, out: &mut [u8; CHACHA20_BLOCK]) {
        let mut x = self.state;
        double_rounds(&mut x, rounds);
        for (i, w) in x.iter().enumerate() {
            let sum = w.wrapping_add(self.state[i]);
            out[4 * i..4 * i + 4].copy_from_slice(&sum.to_le_bytes());
        }
    }

    /// XOR the ChaCha20/20 keystream into `buf`, advancing the counter per
    /// block. The carry runs into word 13, which the IETF layout treats
    /// as nonce; IETF callers bound a single message below 256 GiB.
    pub fn crypto(&mut self, buf: &mut [u8]) {
        let mut ks = [0u8; CHACHA20_BLOCK];
        for chunk in buf.chunks_mut(CHACHA20_BLOCK) {
            self.block(20, &mut ks);
            for (b, k) in chunk.iter_mut().zip(ks.iter()) {
                *b ^= k;
            }
            self.state[12] = self.state[12].wrapping_add(1);
            if self.state[12] == 0 {
                self.state[13] = self.state[13].wrapping_add(1);
            }
        }
    }
}

/// The HChaCha20 reduction: 20 rounds over (key, 16-byte input) without
/// the feed-forward; returns words 0–3 and 12–15 as the 32-byte subkey.
pub fn hchacha20(key: &[u8; CHACHA20_KEY_LEN], input: &[u8; 16]) -> [u8; CHACHA20_KEY_LEN] {
    let mut x = [0u32; 16];
    key_layout(&mut x, key);
    for i in 0..4 {
        x[12 + i] = le32(input, 4 * i);
    }
    double_rounds(&mut x, 20);

    let mut out = [0u8; CHACHA20_KEY_LEN];
    for (i, &w) in [x[0], x[1], x[2], x[3], x[12], x[13], x[14], x[15]].iter().enumerate() {
        out[4 * i..4 * i + 4].copy_from_slice(&w.to_le_bytes());
    }
    out
}

/// XChaCha20: ChaCha20 under an HChaCha20-derived subkey, 24-byte nonce.
#[derive(Clone)]
pub struct XChaCha20(ChaCha20);

impl XChaCha20 {
    pub fn new(
        key: &[u8; CHACHA20_KEY_LEN],
        nonce: &[u8; XCHACHA20_NONCE_LEN],
        counter: u64,
    ) -> Self {
        let subkey = hchacha20(key, nonce[..16].try_into().unwrap());
        XChaCha20(ChaCha20::new(&subkey, nonce[16..].try_into().unwrap(), counter))
    }

    pub fn crypto(&mut self, buf: &mut [u8]) {
        self.0.crypto(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hchacha20_draft_vector() {
        let key: [u8; 32] = core::array::from_fn(|i| i as u8);
        let input = [
            0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00, 0x31, 0x41,
            0x59, 0x27,
        ];
        assert_eq!(
            hchacha20(&key, &input),
            [
                0x82, 0x41, 0x3b, 0x42, 0x27, 0xb2, 0x7b, 0xfe, 0xd3, 0x0e, 0x42, 0x50, 0x8a,
                0x87, 0x7d, 0x73, 0xa0, 0xf9, 0xe4, 0xd5, 0x8a, 0x74, 0xa8, 0x53, 0xc1, 0x2e,
                0xc4, 0x13, 0x26, 0xd3, 0xec, 0xdc,
            ]
        );
    }

    #[test]
    fn crypto_is_an_involution() {
        let key: [u8; 32] = core::array::from_fn(|i| (i * 3) as u8);
        let nonce = [7u8; CHACHA20_NONCE_LEN];
        let msg: Vec<u8> = (0u32..300).map(|i| i as u8).collect();

        let mut buf = msg.clone();
        ChaCha20::new(&key, &nonce, 5).crypto(&mut buf);
        assert_ne!(buf, msg);
        ChaCha20::new(&key, &nonce, 5).crypto(&mut buf);
        assert_eq!(buf, msg);
    }
}
