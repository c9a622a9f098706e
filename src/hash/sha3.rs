//! SHA-3 and SHAKE over Keccak-f[1600] (FIPS 202).
//!
//! The permutation works on a flat 25-lane state indexed `x + 5y`; the
//! sponge absorbs rate-sized blocks, pads with the domain byte (0x06 for
//! SHA-3, 0x1F for SHAKE) plus the final-bit 0x80, and squeezes. SHAKE
//! output is extendable through [`Sha3Xof`].

use crate::hash::Digest;

/// Number of 64-bit lanes in the Keccak-f[1600] state.
pub const KECCAK_LANES: usize = 25;

const ROUNDS: usize = 24;

// Iota round constants from the degree-8 LFSR.
const RC: [u64; ROUNDS] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
    0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
    0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

// Rho rotation offsets, lane order x + 5y.
const RHO: [u32; KECCAK_LANES] = [
    0, 1, 62, 28, 27,
    36, 44, 6, 55, 20,
    3, 10, 43, 25, 39,
    41, 45, 15, 21, 8,
    18, 2, 61, 56, 14,
];

/// The Keccak-f[1600] permutation: 24 rounds of θ, ρ, π, χ, ι.
pub fn keccak_f1600(a: &mut [u64; KECCAK_LANES]) {
    for rc in RC {
        // θ
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                a[x + 5 * y] ^= d;
            }
        }

        // ρ and π
        let mut b = [0u64; KECCAK_LANES];
        for x in 0..5 {
            for y in 0..5 {
                b[y + 5 * ((2 * x + 3 * y) % 5)] = a[x + 5 * y].rotate_left(RHO[x + 5 * y]);
            }
        }

        // χ
        for y in 0..5 {
            for x in 0..5 {
                a[x + 5 * y] = b[x + 5 * y] ^ (!b[(x + 1) % 5 + 5 * y] & b[(x + 2) % 5 + 5 * y]);
            }
        }

        // ι
        a[0] ^= rc;
    }
}

/// Variant selector: fixed-output SHA-3 sizes plus the two SHAKE XOFs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sha3Variant {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Shake128,
    Shake256,
}

impl Sha3Variant {
    /// Bytes of state XORed per absorbed block.
    #[inline]
    pub fn rate(self) -> usize {
        match self {
            Sha3Variant::Sha3_224 => 144,
            Sha3Variant::Sha3_256 => 136,
            Sha3Variant::Sha3_384 => 104,
            Sha3Variant::Sha3_512 => 72,
            Sha3Variant::Shake128 => 168,
            Sha3Variant::Shake256 => 136,
        }
    }

    /// Default digest size; SHAKE variants have none (caller-chosen).
    #[inline]
    pub fn digest_len(self) -> Option<usize> {
        match self {
            Sha3Variant::Sha3_224 => Some(28),
            Sha3Variant::Sha3_256 => Some(32),
            Sha3Variant::Sha3_384 => Some(48),
            Sha3Variant::Sha3_512 => Some(64),
            Sha3Variant::Shake128 | Sha3Variant::Shake256 => None,
        }
    }

    /// Domain-separation byte appended after the message.
    #[inline]
    fn pad_byte(self) -> u8 {
        match self {
            Sha3Variant::Shake128 | Sha3Variant::Shake256 => 0x1f,
            _ => 0x06,
        }
    }
}

/// Streaming sponge context for all SHA-3/SHAKE variants.
#[derive(Clone, Debug)]
pub struct Sha3 {
    state: [u64; KECCAK_LANES],
    fill: usize,
    variant: Sha3Variant,
}

impl Sha3 {
    pub fn new(variant: Sha3Variant) -> Self {
        Sha3 { state: [0; KECCAK_LANES], fill: 0, variant }
    }

    #[inline]
    pub fn variant(&self) -> Sha3Variant {
        self.variant
    }

    /// XOR bytes into the leading `rate` bytes of the state, permuting on
    /// every full block. Partial tails stay XORed in place; `fill` tracks
    /// the next absorb offset, always `< rate`.
    pub fn update(&mut self, data: &[u8]) {
        let rate = self.variant.rate();
        for &byte in data {
            xor_state_byte(&mut self.state, self.fill, byte);
            self.fill += 1;
            if self.fill == rate {
                keccak_f1600(&mut self.state);
                self.fill = 0;
            }
        }
    }

    fn pad(&mut self) {
        let rate = self.variant.rate();
        xor_state_byte(&mut self.state, self.fill, self.variant.pad_byte());
        xor_state_byte(&mut self.state, rate - 1, 0x80);
        keccak_f1600(&mut self.state);
        self.fill = 0;
    }

    /// Finish a fixed-output variant into its default-size digest prefix of
    /// `out`; for SHAKE, `out.len()` chooses the output size.
    pub fn finalize_into(mut self, out: &mut [u8]) {
        self.pad();
        squeeze(&mut self.state, self.variant.rate(), out);
    }

    /// Switch a SHAKE context into its squeeze phase.
    pub fn into_xof(mut self) -> Sha3Xof {
        self.pad();
        Sha3Xof { state: self.state, rate: self.variant.rate(), pos: 0 }
    }
}

/// Extendable-output squeeze handle; [`squeeze`](Sha3Xof::squeeze) may be
/// called any number of times and the outputs concatenate.
#[derive(Clone, Debug)]
pub struct Sha3Xof {
    state: [u64; KECCAK_LANES],
    rate: usize,
    pos: usize,
}

impl Sha3Xof {
    pub fn squeeze(&mut self, out: &mut [u8]) {
        for byte in out.iter_mut() {
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
            }
            *byte = state_byte(&self.state, self.pos);
            self.pos += 1;
        }
    }
}

#[inline]
fn xor_state_byte(state: &mut [u64; KECCAK_LANES], off: usize, byte: u8) {
    state[off / 8] ^= u64::from(byte) << (8 * (off % 8));
}

#[inline]
fn state_byte(state: &[u64; KECCAK_LANES], off: usize) -> u8 {
    (state[off / 8] >> (8 * (off % 8))) as u8
}

fn squeeze(state: &mut [u64; KECCAK_LANES], rate: usize, out: &mut [u8]) {
    let mut pos = 0;
    for byte in out.iter_mut() {
        if pos == rate {
            keccak_f1600(state);
            pos = 0;
        }
        *byte = state_byte(state, pos);
        pos += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-variant wrappers for the construction tier
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! sha3_fixed {
    ($name:ident, $variant:expr, $rate:expr, $dlen:expr, $oneshot:ident) => {
        #[doc = concat!("Fixed-output ", stringify!($name), " (block size = sponge rate).")]
        #[derive(Clone, Debug)]
        pub struct $name(Sha3);

        impl $name {
            pub fn new() -> Self {
                $name(Sha3::new($variant))
            }

            pub fn update(&mut self, data: &[u8]) {
                self.0.update(data)
            }

            pub fn finalize(self) -> [u8; $dlen] {
                let mut out = [0u8; $dlen];
                self.0.finalize_into(&mut out);
                out
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Digest for $name {
            const BLOCK_SIZE: usize = $rate;
            const OUTPUT_LEN: usize = $dlen;

            fn init() -> Self {
                Self::new()
            }

            fn update(&mut self, data: &[u8]) {
                $name::update(self, data)
            }

            fn finish_into(self, out: &mut [u8]) {
                out[..$dlen].copy_from_slice(&self.finalize());
            }
        }

        #[doc = concat!("One-shot ", stringify!($name), ".")]
        pub fn $oneshot(data: &[u8]) -> [u8; $dlen] {
            let mut h = $name::new();
            h.update(data);
            h.finalize()
        }
    };
}

sha3_fixed!(Sha3_224, Sha3Variant::Sha3_224, 144, 28, sha3_224);
sha3_fixed!(Sha3_256, Sha3Variant::Sha3_256, 136, 32, sha3_256);
sha3_fixed!(Sha3_384, Sha3Variant::Sha3_384, 104, 48, sha3_384);
sha3_fixed!(Sha3_512, Sha3Variant::Sha3_512, 72, 64, sha3_512);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_changes_zero_state() {
        let mut st = [0u64; KECCAK_LANES];
        keccak_f1600(&mut st);
        // first lane of Keccak-f applied to the all-zero state
        assert_eq!(st[0], 0xf1258f7940e1dde7);
    }

    #[test]
    fn shake_incremental_squeeze_concatenates() {
        let mut h = Sha3::new(Sha3Variant::Shake128);
        h.update(b"incremental");
        let mut whole = [0u8; 400];
        h.clone().finalize_into(&mut whole);

        let mut xof = h.into_xof();
        let mut parts = [0u8; 400];
        let (a, rest) = parts.split_at_mut(7);
        let (b, c) = rest.split_at_mut(200);
        xof.squeeze(a);
        xof.squeeze(b);
        xof.squeeze(c);
        assert_eq!(parts, whole);
    }
}
