//! XXH32 and XXH64: fast non-cryptographic checksums with streaming
//! contexts.
//!
//! Four seeded accumulators absorb 16-byte (XXH32) or 32-byte (XXH64)
//! stripes; finalization merges them, folds in the total length, consumes
//! the tail, and avalanches.

use crate::util::{le32, le64};

const P32_1: u32 = 0x9e3779b1;
const P32_2: u32 = 0x85ebca77;
const P32_3: u32 = 0xc2b2ae3d;
const P32_4: u32 = 0x27d4eb2f;
const P32_5: u32 = 0x165667b1;

const P64_1: u64 = 0x9e3779b185ebca87;
const P64_2: u64 = 0xc2b2ae3d27d4eb4f;
const P64_3: u64 = 0x165667b19e3779f9;
const P64_4: u64 = 0x85ebca77c2b2ae63;
const P64_5: u64 = 0x27d4eb2f165667c5;

// ─────────────────────────────────────────────────────────────────────────────
// XXH32
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming XXH32 context.
#[derive(Clone, Debug)]
pub struct Xxh32 {
    acc: [u32; 4],
    buf: [u8; 16],
    fill: usize,
    total: u64,
    seed: u32,
}

impl Xxh32 {
    pub fn new(seed: u32) -> Self {
        Xxh32 {
            acc: [
                seed.wrapping_add(P32_1).wrapping_add(P32_2),
                seed.wrapping_add(P32_2),
                seed,
                seed.wrapping_sub(P32_1),
            ],
            buf: [0; 16],
            fill: 0,
            total: 0,
            seed,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.total += data.len() as u64;

        if self.fill != 0 {
            let take = (16 - self.fill).min(data.len());
            self.buf[self.fill..self.fill + take].copy_from_slice(&data[..take]);
            self.fill += take;
            if self.fill != 16 {
                return;
            }
            let block = self.buf;
            self.stripe(&block);
            self.fill = 0;
            data = &data[take..];
        }

        while data.len() >= 16 {
            let (block, rest) = data.split_at(16);
            self.stripe(block.try_into().unwrap());
            data = rest;
        }

        self.buf[..data.len()].copy_from_slice(data);
        self.fill = data.len();
    }

    pub fn finalize(&self) -> u32 {
        let mut h = if self.total >= 16 {
            self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18))
        } else {
            self.seed.wrapping_add(P32_5)
        };
        h = h.wrapping_add(self.total as u32);

        let tail = &self.buf[..self.fill];
        let mut chunks = tail.chunks_exact(4);
        for chunk in &mut chunks {
            h = h.wrapping_add(le32(chunk, 0).wrapping_mul(P32_3));
            h = h.rotate_left(17).wrapping_mul(P32_4);
        }
        for &b in chunks.remainder() {
            h = h.wrapping_add(u32::from(b).wrapping_mul(P32_5));
            h = h.rotate_left(11).wrapping_mul(P32_1);
        }

        h ^= h >> 15;
        h = h.wrapping_mul(P32_2);
        h ^= h >> 13;
        h = h.wrapping_mul(P32_3);
        h ^= h >> 16;
        h
    }

    fn stripe(&mut self, block: &[u8; 16]) {
        for (i, acc) in self.acc.iter_mut().enumerate() {
            *acc = acc
                .wrapping_add(le32(block, 4 * i).wrapping_mul(P32_2))
                .rotate_left(13)
                .wrapping_mul(P32_1);
        }
    }
}

/// One-shot XXH32.
pub fn xxh32(data: &[u8], seed: u32) -> u32 {
    let mut h = Xxh32::new(seed);
    h.update(data);
    h.finalize()
}

// ─────────────────────────────────────────────────────────────────────────────
// XXH64
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming XXH64 context.
#[derive(Clone, Debug)]
pub struct Xxh64 {
    acc: [u64; 4],
    buf: [u8; 32],
    fill: usize,
    total: u64,
    seed: u64,
}

#[inline]
fn round64(acc: u64, lane: u64) -> u64 {
    acc.wrapping_add(lane.wrapping_mul(P64_2))
        .rotate_left(31)
        .wrapping_mul(P64_1)
}

impl Xxh64 {
    pub fn new(seed: u64) -> Self {
        Xxh64 {
            acc: [
                seed.wrapping_add(P64_1).wrapping_add(P64_2),
                seed.wrapping_add(P64_2),
                seed,
                seed.wrapping_sub(P64_1),
            ],
            buf: [0; 32],
            fill: 0,
            total: 0,
            seed,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.total += data.len() as u64;

        if self.fill != 0 {
            let take = (32 - self.fill).min(data.len());
            self.buf[self.fill..self.fill + take].copy_from_slice(&data[..take]);
            self.fill += take;
            if self.fill != 32 {
                return;
            }
            let block = self.buf;
            self.stripe(&block);
            self.fill = 0;
            data = &data[take..];
        }

        while data.len() >= 32 {
            let (block, rest) = data.split_at(32);
            self.stripe(block.try_into().unwrap());
            data = rest;
        }

        self.buf[..data.len()].copy_from_slice(data);
        self.fill = data.len();
    }

    pub fn finalize(&self) -> u64 {
        let mut h = if self.total >= 32 {
            let mut h = self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18));
            for &acc in &self.acc {
                h = (h ^ round64(0, acc)).wrapping_mul(P64_1).wrapping_add(P64_4);
            }
            h
        } else {
            self.seed.wrapping_add(P64_5)
        };
        h = h.wrapping_add(self.total);

        let tail = &self.buf[..self.fill];
        let mut off = 0;
        while off + 8 <= tail.len() {
            h = (h ^ round64(0, le64(tail, off)))
                .rotate_left(27)
                .wrapping_mul(P64_1)
                .wrapping_add(P64_4);
            off += 8;
        }
        if off + 4 <= tail.len() {
            h = (h ^ u64::from(le32(tail, off)).wrapping_mul(P64_1))
                .rotate_left(23)
                .wrapping_mul(P64_2)
                .wrapping_add(P64_3);
            off += 4;
        }
        for &b in &tail[off..] {
            h = (h ^ u64::from(b).wrapping_mul(P64_5))
                .rotate_left(11)
                .wrapping_mul(P64_1);
        }

        h ^= h >> 33;
        h = h.wrapping_mul(P64_2);
        h ^= h >> 29;
        h = h.wrapping_mul(P64_3);
        h ^= h >> 32;
        h
    }

    fn stripe(&mut self, block: &[u8; 32]) {
        for (i, acc) in self.acc.iter_mut().enumerate() {
            *acc = round64(*acc, le64(block, 8 * i));
        }
    }
}

/// One-shot XXH64.
pub fn xxh64(data: &[u8], seed: u64) -> u64 {
    let mut h = Xxh64::new(seed);
    h.update(data);
    h.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_parity() {
        assert_eq!(xxh32(b"", 0), 0x02cc5d05);
        assert_eq!(xxh64(b"", 0), 0xef46db3751d8e999);
    }

    #[test]
    fn differential_against_reference_crate() {
        let data: Vec<u8> = (0u32..4096).map(|i| (i * 31 % 251) as u8).collect();
        for len in [0, 1, 3, 4, 15, 16, 17, 31, 32, 33, 255, 4096] {
            assert_eq!(
                xxh32(&data[..len], 7),
                xxhash_rust::xxh32::xxh32(&data[..len], 7),
                "xxh32 len {len}"
            );
            assert_eq!(
                xxh64(&data[..len], 7),
                xxhash_rust::xxh64::xxh64(&data[..len], 7),
                "xxh64 len {len}"
            );
        }
    }

    #[test]
    fn streaming_equals_oneshot_across_splits() {
        let data: Vec<u8> = (0u32..257).map(|i| i as u8).collect();
        for split in [1, 7, 15, 16, 17, 32, 100] {
            let mut h32 = Xxh32::new(42);
            h32.update(&data[..split]);
            h32.update(&data[split..]);
            assert_eq!(h32.finalize(), xxh32(&data, 42));

            let mut h64 = Xxh64::new(42);
            h64.update(&data[..split]);
            h64.update(&data[split..]);
            assert_eq!(h64.finalize(), xxh64(&data, 42));
        }
    }
}
