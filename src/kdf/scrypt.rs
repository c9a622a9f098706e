//! scrypt (RFC 7914): memory-hard password KDF over PBKDF2-SHA256 and a
//! Salsa20/8 block mixer.
//!
//! The caller provides the scratch memory (`B ‖ V ‖ Y`, laid out exactly in
//! that order); [`scrypt_scratch_len`] sizes it. Nothing here allocates.

use crate::hash::Sha256;
use crate::kdf::pbkdf2;
use crate::util::le32;

const ELEMENT: usize = 64;
const BLOCK: usize = 128;

/// scrypt parameter failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScryptError {
    /// `n` must be a power of two greater than 1.
    CostNotPowerOfTwo,
    /// `r` or `p` is zero or `r * p` is out of the RFC bound.
    BlockParams,
    /// The scratch slice is not exactly `scrypt_scratch_len(n, r, p)`.
    ScratchLen,
}

impl ScryptError {
    pub fn error_name(&self) -> &'static str {
        match self {
            ScryptError::CostNotPowerOfTwo => "scrypt cost must be a power of two > 1",
            ScryptError::BlockParams => "scrypt r*p out of range",
            ScryptError::ScratchLen => "scrypt scratch length mismatch",
        }
    }
}

impl core::fmt::Display for ScryptError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.error_name())
    }
}

impl std::error::Error for ScryptError {}

/// Required scratch size in bytes for parameters `(n, r, p)`:
/// `128·r·p + 128·r·n + 128·r`.
pub const fn scrypt_scratch_len(n: u32, r: u32, p: u32) -> usize {
    let r = r as usize;
    BLOCK * r * (p as usize) + BLOCK * r * (n as usize) + BLOCK * r
}

/// Salsa20/8 core over a 64-byte element in place.
fn salsa20_8(block: &mut [u8]) {
    let mut x = [0u32; 16];
    for (i, w) in x.iter_mut().enumerate() {
        *w = le32(block, 4 * i);
    }
    let input = x;

    macro_rules! qr {
        ($a:expr, $b:expr, $c:expr, $d:expr) => {
            x[$b] ^= x[$a].wrapping_add(x[$d]).rotate_left(7);
            x[$c] ^= x[$b].wrapping_add(x[$a]).rotate_left(9);
            x[$d] ^= x[$c].wrapping_add(x[$b]).rotate_left(13);
            x[$a] ^= x[$d].wrapping_add(x[$c]).rotate_left(18);
        };
    }
    for _ in 0..4 {
        qr!(0, 4, 8, 12);
        qr!(5, 9, 13, 1);
        qr!(10, 14, 2, 6);
        qr!(15, 3, 7, 11);
        qr!(0, 1, 2, 3);
        qr!(5, 6, 7, 4);
        qr!(10, 11, 8, 9);
        qr!(15, 12, 13, 14);
    }

    for (i, w) in x.iter().enumerate() {
        let sum = w.wrapping_add(input[i]);
        block[4 * i..4 * i + 4].copy_from_slice(&sum.to_le_bytes());
    }
}

/// BlockMix: interleave `2r` Salsa20/8 applications over `b` (one 128·r
/// block) using `y` as the shuffle scratch, writing the standard
/// even/odd permutation back into `b`.
fn block_mix(b: &mut [u8], y: &mut [u8], r: usize) {
    let w = BLOCK * r;
    debug_assert!(b.len() >= w && y.len() >= w);

    // running X starts as the last element of B
    let mut x = [0u8; ELEMENT];
    x.copy_from_slice(&b[w - ELEMENT..w]);

    for i in 0..2 * r {
        for (xb, bb) in x.iter_mut().zip(b[i * ELEMENT..(i + 1) * ELEMENT].iter()) {
            *xb ^= bb;
        }
        salsa20_8(&mut x);

        // Y[i] lands at the standard even/odd position
        let dst = if i % 2 == 0 { (i / 2) * ELEMENT } else { (r + i / 2) * ELEMENT };
        y[dst..dst + ELEMENT].copy_from_slice(&x);
    }

    b[..w].copy_from_slice(&y[..w]);
}

/// ROMix over one 128·r chunk: `n` sequential fills of `v`, then `n`
/// data-dependent gathers indexed by the low word of the chunk's last
/// element.
fn ro_mix(b: &mut [u8], n: u32, r: usize, v: &mut [u8], y: &mut [u8]) {
    let w = BLOCK * r;

    for i in 0..n as usize {
        v[i * w..(i + 1) * w].copy_from_slice(&b[..w]);
        block_mix(b, y, r);
    }

    for _ in 0..n {
        let j = (le32(b, w - ELEMENT) & (n - 1)) as usize;
        for (bb, vb) in b[..w].iter_mut().zip(v[j * w..(j + 1) * w].iter()) {
            *bb ^= vb;
        }
        block_mix(b, y, r);
    }
}

/// Derive `dk.len()` bytes from `pass` and `salt` with parameters
/// `(n, r, p)`, using caller-provided `scratch`.
pub fn scrypt(
    pass: &[u8],
    salt: &[u8],
    n: u32,
    r: u32,
    p: u32,
    scratch: &mut [u8],
    dk: &mut [u8],
) -> Result<(), ScryptError> {
    if n < 2 || !n.is_power_of_two() {
        return Err(ScryptError::CostNotPowerOfTwo);
    }
    // r*p < 2^30 per the RFC
    if r == 0 || p == 0 || (r as u64) * (p as u64) >= 1 << 30 {
        return Err(ScryptError::BlockParams);
    }
    if scratch.len() != scrypt_scratch_len(n, r, p) {
        return Err(ScryptError::ScratchLen);
    }

    let r = r as usize;
    let b_len = BLOCK * r * p as usize;
    let v_len = BLOCK * r * n as usize;
    let (b, rest) = scratch.split_at_mut(b_len);
    let (v, y) = rest.split_at_mut(v_len);

    pbkdf2::<Sha256>(pass, salt, 1, b);

    for chunk in b.chunks_mut(BLOCK * r) {
        ro_mix(chunk, n, r, v, y);
    }

    pbkdf2::<Sha256>(pass, b, 1, dk);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_validation() {
        let mut dk = [0u8; 16];
        let mut scratch = vec![0u8; scrypt_scratch_len(16, 1, 1)];
        assert_eq!(
            scrypt(b"p", b"s", 15, 1, 1, &mut scratch, &mut dk),
            Err(ScryptError::CostNotPowerOfTwo)
        );
        assert_eq!(
            scrypt(b"p", b"s", 16, 0, 1, &mut scratch, &mut dk),
            Err(ScryptError::BlockParams)
        );
        assert_eq!(
            scrypt(b"p", b"s", 32, 1, 1, &mut scratch, &mut dk),
            Err(ScryptError::ScratchLen)
        );
        assert!(scrypt(b"p", b"s", 16, 1, 1, &mut scratch, &mut dk).is_ok());
    }
}
