//! Base64 with the standard `+` `/` alphabet and `=` padding.

use super::{BaseDecError, BAD, PAD};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const DECODE: [u8; 256] = super::decode_table(ALPHABET, true);

/// Encoded size of `len` input bytes, padding included.
#[inline]
pub const fn base64_encoded_len(len: usize) -> usize {
    4 * ((len + 2) / 3)
}

/// Upper bound on the decoded size of `len` encoded bytes.
#[inline]
pub const fn base64_decoded_len(len: usize) -> usize {
    3 * len / 4
}

/// Encode into `dst`, stopping when it fills. Returns bytes written.
pub fn base64_encode(src: &[u8], dst: &mut [u8]) -> usize {
    let mut n = 0;
    let mut push = |b: u8, n: &mut usize| {
        if *n < dst.len() {
            dst[*n] = b;
            *n += 1;
            true
        } else {
            false
        }
    };

    for group in src.chunks(3) {
        let b0 = group[0];
        let b1 = group.get(1).copied().unwrap_or(0);
        let b2 = group.get(2).copied().unwrap_or(0);

        let ok = push(ALPHABET[usize::from(b0 >> 2)], &mut n)
            && push(ALPHABET[usize::from(((b0 << 4) | (b1 >> 4)) & 0x3f)], &mut n)
            && push(
                if group.len() > 1 { ALPHABET[usize::from(((b1 << 2) | (b2 >> 6)) & 0x3f)] } else { b'=' },
                &mut n,
            )
            && push(if group.len() > 2 { ALPHABET[usize::from(b2 & 0x3f)] } else { b'=' }, &mut n);
        if !ok {
            break;
        }
    }
    n
}

/// Decode one whole 4-character group; stray pad layouts are malformed.
fn decode_group(g: &[u8; 4], dst: &mut [u8], written: usize) -> Result<usize, BaseDecError> {
    let c0 = g[0];
    let c1 = g[1];
    let c2 = g[2];
    let c3 = g[3];

    if c0 == PAD || c1 == PAD {
        return Err(BaseDecError::Incomplete);
    }

    if written == dst.len() {
        return Err(BaseDecError::OutputFull);
    }
    dst[written] = (c0 << 2) | (c1 >> 4);

    if c2 == PAD {
        // two pads → one byte; "x=y=" is malformed
        if c3 != PAD {
            return Err(BaseDecError::Incomplete);
        }
        return Ok(1);
    }

    if written + 1 == dst.len() {
        return Err(BaseDecError::OutputFull);
    }
    dst[written + 1] = ((c1 << 4) & 0xf0) | (c2 >> 2);

    if c3 == PAD {
        return Ok(2);
    }

    if written + 2 == dst.len() {
        return Err(BaseDecError::OutputFull);
    }
    dst[written + 2] = ((c2 << 6) & 0xc0) | c3;
    Ok(3)
}

/// Decode into `dst`. Returns bytes written.
pub fn base64_decode(src: &[u8], dst: &mut [u8]) -> Result<usize, BaseDecError> {
    let mut group = [0u8; 4];
    let mut k = 0;
    let mut written = 0;

    for (i, &c) in src.iter().enumerate() {
        let v = DECODE[usize::from(c)];
        if v == BAD {
            return Err(BaseDecError::InvalidByte { pos: i + 1 });
        }
        group[k] = v;
        k += 1;
        if k == 4 {
            written += decode_group(&group, dst, written)?;
            k = 0;
        }
    }

    if k != 0 {
        return Err(BaseDecError::Incomplete);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4648_vectors() {
        let cases: [(&[u8], &[u8]); 5] = [
            (b"f", b"Zg=="),
            (b"fo", b"Zm8="),
            (b"foo", b"Zm9v"),
            (b"foob", b"Zm9vYg=="),
            (b"Hello", b"SGVsbG8="),
        ];
        for (plain, enc) in cases {
            let mut buf = [0u8; 16];
            let n = base64_encode(plain, &mut buf);
            assert_eq!(&buf[..n], enc);

            let mut back = [0u8; 16];
            let m = base64_decode(enc, &mut back).unwrap();
            assert_eq!(&back[..m], plain);
        }
    }

    #[test]
    fn error_positions_and_truncation() {
        let mut out = [0u8; 16];
        assert_eq!(
            base64_decode(b"SGV%bG8=", &mut out),
            Err(BaseDecError::InvalidByte { pos: 4 })
        );
        assert_eq!(base64_decode(b"SGVsbG8", &mut out), Err(BaseDecError::Incomplete));

        let mut tiny = [0u8; 2];
        assert_eq!(base64_decode(b"SGVsbG8=", &mut tiny), Err(BaseDecError::OutputFull));
    }
}
