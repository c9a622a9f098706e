//! SHA-1 (FIPS 180-4). Broken for collision resistance; present for HMAC
//! and legacy interop (TOTP, PBKDF2 vectors).

use crate::hash::Digest;

const BLOCK_SIZE: usize = 64;
const DIGEST_LEN: usize = 20;

const K1: u32 = 0x5a827999;
const K2: u32 = 0x6ed9eba1;
const K3: u32 = 0x8f1bbcdc;
const K4: u32 = 0xca62c1d6;

/// Streaming SHA-1 context.
#[derive(Clone, Debug)]
pub struct Sha1 {
    state: [u32; 5],
    buf: [u8; BLOCK_SIZE],
    fill: usize,
    total: u64,
}

impl Sha1 {
    pub fn new() -> Self {
        Sha1 {
            state: [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0],
            buf: [0; BLOCK_SIZE],
            fill: 0,
            total: 0,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.total = self.total.wrapping_add(data.len() as u64);

        if self.fill != 0 {
            let take = (BLOCK_SIZE - self.fill).min(data.len());
            self.buf[self.fill..self.fill + take].copy_from_slice(&data[..take]);
            self.fill += take;
            if self.fill != BLOCK_SIZE {
                return;
            }
            let block = self.buf;
            self.compress(&block);
            self.fill = 0;
            data = &data[take..];
        }

        while data.len() >= BLOCK_SIZE {
            let (block, rest) = data.split_at(BLOCK_SIZE);
            self.compress(block.try_into().unwrap());
            data = rest;
        }

        self.buf[..data.len()].copy_from_slice(data);
        self.fill = data.len();
    }

    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        let bits = self.total.wrapping_mul(8);
        let mut pad = [0u8; BLOCK_SIZE];
        pad[0] = 0x80;
        let padlen = 1 + ((119 - (self.total % 64)) % 64) as usize;
        self.update(&pad[..padlen]);
        self.update(&bits.to_be_bytes());
        debug_assert_eq!(self.fill, 0);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    fn compress(&mut self, block: &[u8; BLOCK_SIZE]) {
        let mut m = [0u32; 80];
        for i in 0..16 {
            m[i] = u32::from_be_bytes(block[4 * i..4 * i + 4].try_into().unwrap());
        }
        for i in 16..80 {
            m[i] = (m[i - 3] ^ m[i - 8] ^ m[i - 14] ^ m[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;
        for (i, &w) in m.iter().enumerate() {
            let (f, k) = match i / 20 {
                0 => (d ^ (b & (c ^ d)), K1),
                1 => (b ^ c ^ d, K2),
                2 => ((b & c) | (d & (b | c)), K3),
                _ => (b ^ c ^ d, K4),
            };
            let tmp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(w);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = tmp;
        }

        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
        self.state[4] = self.state[4].wrapping_add(e);
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Digest for Sha1 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const OUTPUT_LEN: usize = DIGEST_LEN;

    fn init() -> Self {
        Self::new()
    }

    fn update(&mut self, data: &[u8]) {
        Sha1::update(self, data)
    }

    fn finish_into(self, out: &mut [u8]) {
        out[..DIGEST_LEN].copy_from_slice(&self.finalize());
    }
}

/// One-shot SHA-1.
pub fn sha1(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut h = Sha1::new();
    h.update(data);
    h.finalize()
}
