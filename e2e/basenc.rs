//! E2E suite: base codec round trips over random data, truncation
//! accounting, and decoder error reporting.

use primkit::codec::{
    base16_decode, base16_encode, base16_encoded_len, base32_decode, base32_encode,
    base32_encoded_len, base64_decode, base64_encode, base64_encoded_len, BaseDecError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn round_trip_all_lengths() {
    let mut rng = StdRng::seed_from_u64(21);

    for len in 0..=67 {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        let mut enc = vec![0u8; base16_encoded_len(len)];
        let n = base16_encode(&data, &mut enc);
        assert_eq!(n, enc.len());
        let mut dec = vec![0u8; len];
        assert_eq!(base16_decode(&enc, &mut dec), Ok(len));
        assert_eq!(dec, data);

        let mut enc = vec![0u8; base32_encoded_len(len)];
        let n = base32_encode(&data, &mut enc);
        assert_eq!(n, enc.len());
        let mut dec = vec![0u8; len];
        assert_eq!(base32_decode(&enc, &mut dec), Ok(len), "base32 len {len}");
        assert_eq!(dec, data);

        let mut enc = vec![0u8; base64_encoded_len(len)];
        let n = base64_encode(&data, &mut enc);
        assert_eq!(n, enc.len());
        let mut dec = vec![0u8; len];
        assert_eq!(base64_decode(&enc, &mut dec), Ok(len), "base64 len {len}");
        assert_eq!(dec, data);
    }
}

#[test]
fn encoder_truncation_is_detectable() {
    let data = b"truncation probe";
    let needed = base64_encoded_len(data.len());

    let mut short = vec![0u8; needed - 1];
    let written = base64_encode(data, &mut short);
    assert!(written < needed, "written {written} must fall short of {needed}");

    let mut exact = vec![0u8; needed];
    assert_eq!(base64_encode(data, &mut exact), needed);
}

#[test]
fn invalid_byte_positions_are_one_based() {
    let mut out = [0u8; 32];
    assert_eq!(
        base64_decode(b"\x01GVsbG8=", &mut out),
        Err(BaseDecError::InvalidByte { pos: 1 })
    );
    assert_eq!(
        base32_decode(b"MZXW6YT!", &mut out),
        Err(BaseDecError::InvalidByte { pos: 8 })
    );
    assert_eq!(
        base16_decode(b"00FFxy", &mut out),
        Err(BaseDecError::InvalidByte { pos: 5 })
    );
}

#[test]
fn padding_shapes() {
    let mut out = [0u8; 16];

    // base64: 2 pads → 1 byte, 1 pad → 2 bytes
    assert_eq!(base64_decode(b"QQ==", &mut out), Ok(1));
    assert_eq!(out[0], b'A');
    assert_eq!(base64_decode(b"QUI=", &mut out), Ok(2));
    assert_eq!(&out[..2], b"AB");

    // base32 pad cases 6/4/3/1 → 1/2/3/4 bytes
    assert_eq!(base32_decode(b"IE======", &mut out), Ok(1));
    assert_eq!(out[0], b'A');
    assert_eq!(base32_decode(b"IFBA====", &mut out), Ok(2));
    assert_eq!(&out[..2], b"AB");
    assert_eq!(base32_decode(b"IFBEG===", &mut out), Ok(3));
    assert_eq!(&out[..3], b"ABC");
    assert_eq!(base32_decode(b"IFBEGRA=", &mut out), Ok(4));
    assert_eq!(&out[..4], b"ABCD");
}
