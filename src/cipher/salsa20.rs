//! Salsa20 and XSalsa20 (Bernstein).
//!
//! Sixteen 32-bit state words with the "expand 32-byte k" constant at the
//! corner positions; twenty rounds of column/diagonal quarter-rounds
//! produce 64-byte keystream blocks added to the input state. The 64-bit
//! block counter lives in words 8–9. XSalsa20 first reduces (key, first 16
//! nonce bytes) through HSalsa20 and continues with the remaining 8 nonce
//! bytes, extending the nonce to 24 bytes.

use crate::util::le32;

/// Keystream block size in bytes.
pub const SALSA20_BLOCK: usize = 64;
/// Key length in bytes.
pub const SALSA20_KEY_LEN: usize = 32;
/// Nonce length of plain Salsa20.
pub const SALSA20_NONCE_LEN: usize = 8;
/// Nonce length of XSalsa20.
pub const XSALSA20_NONCE_LEN: usize = 24;

const SIGMA: &[u8; 16] = b"expand 32-byte k";

macro_rules! qr {
    ($x:ident, $a:expr, $b:expr, $c:expr, $d:expr) => {
        $x[$b] ^= $x[$a].wrapping_add($x[$d]).rotate_left(7);
        $x[$c] ^= $x[$b].wrapping_add($x[$a]).rotate_left(9);
        $x[$d] ^= $x[$c].wrapping_add($x[$b]).rotate_left(13);
        $x[$a] ^= $x[$d].wrapping_add($x[$c]).rotate_left(18);
    };
}

fn double_rounds(x: &mut [u32; 16], rounds: u32) {
    for _ in 0..rounds / 2 {
        // column
        qr!(x, 0, 4, 8, 12);
        qr!(x, 5, 9, 13, 1);
        qr!(x, 10, 14, 2, 6);
        qr!(x, 15, 3, 7, 11);
        // diagonal
        qr!(x, 0, 1, 2, 3);
        qr!(x, 5, 6, 7, 4);
        qr!(x, 10, 11, 8, 9);
        qr!(x, 15, 12, 13, 14);
    }
}

fn key_layout(state: &mut [u32; 16], key: &[u8; SALSA20_KEY_LEN]) {
    state[0] = le32(SIGMA, 0);
    state[5] = le32(SIGMA, 4);
    state[10] = le32(SIGMA, 8);
    state[15] = le32(SIGMA, 12);
    for i in 0..4 {
        state[1 + i] = le32(key, 4 * i);
        state[11 + i] = le32(key, 16 + 4 * i);
    }
}

/// Salsa20 stream context.
#[derive(Clone)]
pub struct Salsa20 {
    state: [u32; 16],
}

impl Salsa20 {
    /// Key/nonce/counter layout per the Salsa20 spec; `counter` is the
    /// little-endian 64-bit starting block index.
    pub fn new(key: &[u8; SALSA20_KEY_LEN], nonce: &[u8; SALSA20_NONCE_LEN], counter: u64) -> Self {
        let mut state = [0u32; 16];
        key_layout(&mut state, key);
        state[6] = le32(nonce, 0);
        state[7] = le32(nonce, 4);
        state[8] = counter as u32;
        state[9] = (counter >> 32) as u32;
        Salsa20 { state }
    }

    /// Generate the keystream block for the current counter without
    /// advancing it. `rounds` is even; 20 for the standard cipher, 8 for
    /// the scrypt core.
    pub fn block(&self, rounds: u32, out: &mut [u8; SALSA20_BLOCK]) {
        let mut x = self.state;
        double_rounds(&mut x, rounds);
        for (i, w) in x.iter().enumerate() {
            let sum = w.wrapping_add(self.state[i]);
            out[4 * i..4 * i + 4].copy_from_slice(&sum.to_le_bytes());
        }
    }

    /// XOR the Salsa20/20 keystream into `buf`, advancing the counter per
    /// consumed block. Concatenated calls continue the same keystream.
    pub fn crypto(&mut self, buf: &mut [u8]) {
        let mut ks = [0u8; SALSA20_BLOCK];
        for chunk in buf.chunks_mut(SALSA20_BLOCK) {
            self.block(20, &mut ks);
            for (b, k) in chunk.iter_mut().zip(ks.iter()) {
                *b ^= k;
            }
            self.state[8] = self.state[8].wrapping_add(1);
            if self.state[8] == 0 {
                self.state[9] = self.state[9].wrapping_add(1);
            }
        }
    }
}

/// The HSalsa20 reduction: 20 rounds over (key, 16-byte input) without the
/// final feed-forward addition; returns the 32-byte subkey from words
/// 0, 5, 10, 15, 6, 7, 8, 9.
pub fn hsalsa20(key: &[u8; SALSA20_KEY_LEN], input: &[u8; 16]) -> [u8; SALSA20_KEY_LEN] {
    let mut x = [0u32; 16];
    key_layout(&mut x, key);
    for i in 0..4 {
        x[6 + i] = le32(input, 4 * i);
    }
    double_rounds(&mut x, 20);

    let mut out = [0u8; SALSA20_KEY_LEN];
    for (i, &w) in [x[0], x[5], x[10], x[15], x[6], x[7], x[8], x[9]].iter().enumerate() {
        out[4 * i..4 * i + 4].copy_from_slice(&w.to_le_bytes());
    }
    out
}

/// XSalsa20: Salsa20 under an HSalsa20-derived subkey, 24-byte nonce.
#[derive(Clone)]
pub struct XSalsa20(Salsa20);

impl XSalsa20 {
    pub fn new(
        key: &[u8; SALSA20_KEY_LEN],
        nonce: &[u8; XSALSA20_NONCE_LEN],
        counter: u64,
    ) -> Self {
        let subkey = hsalsa20(key, nonce[..16].try_into().unwrap());
        XSalsa20(Salsa20::new(&subkey, nonce[16..].try_into().unwrap(), counter))
    }

    pub fn crypto(&mut self, buf: &mut [u8]) {
        self.0.crypto(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecrypt_set1_vector0() {
        let mut key = [0u8; 32];
        key[0] = 0x80;
        let mut s = Salsa20::new(&key, &[0; 8], 0);
        let mut buf = [0u8; 32];
        s.crypto(&mut buf);
        assert_eq!(
            buf,
            [
                0xe3, 0xbe, 0x8f, 0xdd, 0x8b, 0xec, 0xa2, 0xe3, 0xea, 0x8e, 0xf9, 0x47, 0x5b,
                0x29, 0xa6, 0xe7, 0x00, 0x39, 0x51, 0xe1, 0x09, 0x7a, 0x5c, 0x38, 0xd2, 0x3b,
                0x7a, 0x5f, 0xad, 0x9f, 0x68, 0x44,
            ]
        );
    }

    #[test]
    fn hsalsa20_core_vector() {
        // the NaCl "firstkey" derivation
        let shared = [
            0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1, 0x72, 0x8e, 0x3b, 0xf4, 0x80, 0x35,
            0x0f, 0x25, 0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33, 0x76, 0xf0, 0x9b, 0x3c,
            0x1e, 0x16, 0x17, 0x42,
        ];
        let firstkey = hsalsa20(&shared, &[0; 16]);
        assert_eq!(
            firstkey,
            [
                0x1b, 0x27, 0x55, 0x64, 0x73, 0xe9, 0x85, 0xd4, 0x62, 0xcd, 0x51, 0x19, 0x7a,
                0x9a, 0x46, 0xc7, 0x60, 0x09, 0x54, 0x9e, 0xac, 0x64, 0x74, 0xf2, 0x06, 0xc4,
                0xee, 0x08, 0x44, 0xf6, 0x83, 0x89,
            ]
        );
    }
}
