//! BLAKE2b and BLAKE2s (RFC 7693).
//!
//! Initialization XORs a parameter block into the IV; the final compression
//! carries the inverted `f0` flag, so the last (possibly partial) block is
//! held back until `finalize`. Digests are little-endian state prefixes of
//! the configured length.

use crate::hash::Digest;

const IV_B: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

const IV_S: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// BLAKE2 parameter errors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Blake2Error {
    /// Digest length zero or over the variant maximum (64 for 2b, 32 for 2s).
    DigestLen,
    /// Key longer than the variant maximum (64 for 2b, 32 for 2s).
    KeyLen,
}

impl core::fmt::Display for Blake2Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Blake2Error::DigestLen => "blake2 digest length out of range",
            Blake2Error::KeyLen => "blake2 key length out of range",
        })
    }
}

impl std::error::Error for Blake2Error {}

// ─────────────────────────────────────────────────────────────────────────────
// BLAKE2b
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming BLAKE2b context (1..=64 byte digests, 128-byte blocks).
#[derive(Clone, Debug)]
pub struct Blake2b {
    h: [u64; 8],
    t: [u64; 2],
    buf: [u8; 128],
    fill: usize,
    dlen: usize,
}

impl Blake2b {
    pub fn new(dlen: usize) -> Result<Self, Blake2Error> {
        Self::new_keyed(dlen, &[])
    }

    /// Keyed initialization: the key length enters the parameter block and
    /// the zero-padded key becomes the first compressed block.
    pub fn new_keyed(dlen: usize, key: &[u8]) -> Result<Self, Blake2Error> {
        if dlen == 0 || dlen > 64 {
            return Err(Blake2Error::DigestLen);
        }
        if key.len() > 64 {
            return Err(Blake2Error::KeyLen);
        }
        let mut h = IV_B;
        // parameter block word 0: digest_length | key_length << 8
        // | fanout << 16 | depth << 24, sequential mode
        h[0] ^= dlen as u64 | (key.len() as u64) << 8 | (1 << 16) | (1 << 24);
        let mut ctx = Blake2b { h, t: [0; 2], buf: [0; 128], fill: 0, dlen };
        if !key.is_empty() {
            let mut block = [0u8; 128];
            block[..key.len()].copy_from_slice(key);
            ctx.update(&block);
        }
        Ok(ctx)
    }

    pub fn update(&mut self, mut data: &[u8]) {
        if data.is_empty() {
            return;
        }
        // the final block must see the finalization flag, so a full buffer
        // is compressed only when more input arrives
        if self.fill + data.len() > 128 {
            let take = 128 - self.fill;
            self.buf[self.fill..].copy_from_slice(&data[..take]);
            self.bump(128);
            let block = self.buf;
            self.compress(&block, false);
            self.fill = 0;
            data = &data[take..];
            while data.len() > 128 {
                let (block, rest) = data.split_at(128);
                self.bump(128);
                self.compress(block.try_into().unwrap(), false);
                data = rest;
            }
        }
        self.buf[self.fill..self.fill + data.len()].copy_from_slice(data);
        self.fill += data.len();
    }

    pub fn finalize_into(mut self, out: &mut [u8]) {
        self.bump(self.fill as u64);
        self.buf[self.fill..].fill(0);
        let block = self.buf;
        self.compress(&block, true);

        for (i, byte) in out[..self.dlen].iter_mut().enumerate() {
            *byte = (self.h[i / 8] >> (8 * (i % 8))) as u8;
        }
    }

    #[inline]
    pub fn digest_len(&self) -> usize {
        self.dlen
    }

    fn bump(&mut self, n: u64) {
        self.t[0] = self.t[0].wrapping_add(n);
        if self.t[0] < n {
            self.t[1] = self.t[1].wrapping_add(1);
        }
    }

    fn compress(&mut self, block: &[u8; 128], last: bool) {
        let mut m = [0u64; 16];
        for (i, w) in m.iter_mut().enumerate() {
            *w = u64::from_le_bytes(block[8 * i..8 * i + 8].try_into().unwrap());
        }

        let mut v = [0u64; 16];
        v[..8].copy_from_slice(&self.h);
        v[8..].copy_from_slice(&IV_B);
        v[12] ^= self.t[0];
        v[13] ^= self.t[1];
        if last {
            v[14] = !v[14];
        }

        for s in SIGMA.iter().cycle().take(12) {
            g_b(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
            g_b(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
            g_b(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
            g_b(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
            g_b(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
            g_b(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
            g_b(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
            g_b(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
        }

        for i in 0..8 {
            self.h[i] ^= v[i] ^ v[i + 8];
        }
    }
}

#[inline]
fn g_b(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

// ─────────────────────────────────────────────────────────────────────────────
// BLAKE2s
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming BLAKE2s context (1..=32 byte digests, 64-byte blocks).
#[derive(Clone, Debug)]
pub struct Blake2s {
    h: [u32; 8],
    t: [u32; 2],
    buf: [u8; 64],
    fill: usize,
    dlen: usize,
}

impl Blake2s {
    pub fn new(dlen: usize) -> Result<Self, Blake2Error> {
        Self::new_keyed(dlen, &[])
    }

    /// Keyed initialization, as for [`Blake2b::new_keyed`].
    pub fn new_keyed(dlen: usize, key: &[u8]) -> Result<Self, Blake2Error> {
        if dlen == 0 || dlen > 32 {
            return Err(Blake2Error::DigestLen);
        }
        if key.len() > 32 {
            return Err(Blake2Error::KeyLen);
        }
        let mut h = IV_S;
        h[0] ^= dlen as u32 | (key.len() as u32) << 8 | (1 << 16) | (1 << 24);
        let mut ctx = Blake2s { h, t: [0; 2], buf: [0; 64], fill: 0, dlen };
        if !key.is_empty() {
            let mut block = [0u8; 64];
            block[..key.len()].copy_from_slice(key);
            ctx.update(&block);
        }
        Ok(ctx)
    }

    pub fn update(&mut self, mut data: &[u8]) {
        if data.is_empty() {
            return;
        }
        if self.fill + data.len() > 64 {
            let take = 64 - self.fill;
            self.buf[self.fill..].copy_from_slice(&data[..take]);
            self.bump(64);
            let block = self.buf;
            self.compress(&block, false);
            self.fill = 0;
            data = &data[take..];
            while data.len() > 64 {
                let (block, rest) = data.split_at(64);
                self.bump(64);
                self.compress(block.try_into().unwrap(), false);
                data = rest;
            }
        }
        self.buf[self.fill..self.fill + data.len()].copy_from_slice(data);
        self.fill += data.len();
    }

    pub fn finalize_into(mut self, out: &mut [u8]) {
        self.bump(self.fill as u32);
        self.buf[self.fill..].fill(0);
        let block = self.buf;
        self.compress(&block, true);

        for (i, byte) in out[..self.dlen].iter_mut().enumerate() {
            *byte = (self.h[i / 4] >> (8 * (i % 4))) as u8;
        }
    }

    #[inline]
    pub fn digest_len(&self) -> usize {
        self.dlen
    }

    fn bump(&mut self, n: u32) {
        self.t[0] = self.t[0].wrapping_add(n);
        if self.t[0] < n {
            self.t[1] = self.t[1].wrapping_add(1);
        }
    }

    fn compress(&mut self, block: &[u8; 64], last: bool) {
        let mut m = [0u32; 16];
        for (i, w) in m.iter_mut().enumerate() {
            *w = u32::from_le_bytes(block[4 * i..4 * i + 4].try_into().unwrap());
        }

        let mut v = [0u32; 16];
        v[..8].copy_from_slice(&self.h);
        v[8..].copy_from_slice(&IV_S);
        v[12] ^= self.t[0];
        v[13] ^= self.t[1];
        if last {
            v[14] = !v[14];
        }

        for s in SIGMA.iter().take(10) {
            g_s(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
            g_s(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
            g_s(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
            g_s(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
            g_s(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
            g_s(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
            g_s(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
            g_s(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
        }

        for i in 0..8 {
            self.h[i] ^= v[i] ^ v[i + 8];
        }
    }
}

#[inline]
fn g_s(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(12);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(8);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(7);
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shots and fixed-size trait wrappers
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot BLAKE2b; `out.len()` (1..=64) selects the digest size.
pub fn blake2b(data: &[u8], out: &mut [u8]) -> Result<(), Blake2Error> {
    let mut h = Blake2b::new(out.len())?;
    h.update(data);
    h.finalize_into(out);
    Ok(())
}

/// One-shot BLAKE2s; `out.len()` (1..=32) selects the digest size.
pub fn blake2s(data: &[u8], out: &mut [u8]) -> Result<(), Blake2Error> {
    let mut h = Blake2s::new(out.len())?;
    h.update(data);
    h.finalize_into(out);
    Ok(())
}

/// BLAKE2b-512 with the [`Digest`] interface for the MAC/KDF tier.
#[derive(Clone, Debug)]
pub struct Blake2b512(Blake2b);

impl Digest for Blake2b512 {
    const BLOCK_SIZE: usize = 128;
    const OUTPUT_LEN: usize = 64;

    fn init() -> Self {
        Blake2b512(Blake2b::new(64).unwrap())
    }

    fn update(&mut self, data: &[u8]) {
        self.0.update(data)
    }

    fn finish_into(self, out: &mut [u8]) {
        self.0.finalize_into(out)
    }
}

/// BLAKE2s-256 with the [`Digest`] interface for the MAC/KDF tier.
#[derive(Clone, Debug)]
pub struct Blake2s256(Blake2s);

impl Digest for Blake2s256 {
    const BLOCK_SIZE: usize = 64;
    const OUTPUT_LEN: usize = 32;

    fn init() -> Self {
        Blake2s256(Blake2s::new(32).unwrap())
    }

    fn update(&mut self, data: &[u8]) {
        self.0.update(data)
    }

    fn finish_into(self, out: &mut [u8]) {
        self.0.finalize_into(out)
    }
}
