//! E2E suite: DEFLATE decoding of stored, fixed and dynamic blocks, gzip
//! framing with trailer CRC verification, chunked feeding, and the error
//! paths.

use primkit::hash::{crc32_table, crc32_update_lsb, Crc32Kind};
use primkit::inflate::{Inflate, InflateError, Step};

// zlib-produced raw deflate stream (dynamic blocks) for PAYLOAD below.
const REAL_STREAM: [u8; 337] = [
    0x0b, 0xc9, 0x48, 0x55, 0x28, 0x2c, 0xcd, 0x4c, 0xce, 0x56, 0x48, 0x2a, 0xca, 0x2f, 0xcf,
    0x53, 0x48, 0xcb, 0xaf, 0x50, 0xc8, 0x2a, 0xcd, 0x2d, 0x28, 0x56, 0xc8, 0x2f, 0x4b, 0x2d,
    0x52, 0x28, 0x01, 0x4a, 0xe7, 0x24, 0x56, 0x55, 0x2a, 0xa4, 0xe4, 0xa7, 0xeb, 0x29, 0x84,
    0x8c, 0x2a, 0x1e, 0x55, 0x3c, 0xaa, 0x78, 0x54, 0xf1, 0xa8, 0xe2, 0x51, 0xc5, 0xc3, 0x4b,
    0x31, 0x03, 0x23, 0x13, 0x33, 0x0b, 0x2b, 0x1b, 0x3b, 0x07, 0x27, 0x17, 0x37, 0x0f, 0x2f,
    0x1f, 0xbf, 0x80, 0xa0, 0x90, 0xb0, 0x88, 0xa8, 0x98, 0xb8, 0x84, 0xa4, 0x94, 0xb4, 0x8c,
    0xac, 0x9c, 0xbc, 0x82, 0xa2, 0x92, 0xb2, 0x8a, 0xaa, 0x9a, 0xba, 0x86, 0xa6, 0x96, 0xb6,
    0x8e, 0xae, 0x9e, 0xbe, 0x81, 0xa1, 0x91, 0xb1, 0x89, 0xa9, 0x99, 0xb9, 0x85, 0xa5, 0x95,
    0xb5, 0x8d, 0xad, 0x9d, 0xbd, 0x83, 0xa3, 0x93, 0xb3, 0x8b, 0xab, 0x9b, 0xbb, 0x87, 0xa7,
    0x97, 0xb7, 0x8f, 0xaf, 0x9f, 0x7f, 0x40, 0x60, 0x50, 0x70, 0x48, 0x68, 0x58, 0x78, 0x44,
    0x64, 0x54, 0x74, 0x4c, 0x6c, 0x5c, 0x7c, 0x42, 0x62, 0x52, 0x72, 0x4a, 0x6a, 0x5a, 0x7a,
    0x46, 0x66, 0x56, 0x76, 0x4e, 0x6e, 0x5e, 0x7e, 0x41, 0x61, 0x51, 0x71, 0x49, 0x69, 0x59,
    0x79, 0x45, 0x65, 0x55, 0x75, 0x4d, 0x6d, 0x5d, 0x7d, 0x43, 0x63, 0x53, 0x73, 0x4b, 0x6b,
    0x5b, 0x7b, 0x47, 0x67, 0x57, 0x77, 0x4f, 0x6f, 0x5f, 0xff, 0x84, 0x89, 0x93, 0x26, 0x4f,
    0x99, 0x3a, 0x6d, 0xfa, 0x8c, 0x99, 0xb3, 0x66, 0xcf, 0x99, 0x3b, 0x6f, 0xfe, 0x82, 0x85,
    0x8b, 0x16, 0x2f, 0x59, 0xba, 0x6c, 0xf9, 0x8a, 0x95, 0xab, 0x56, 0xaf, 0x59, 0xbb, 0x6e,
    0xfd, 0x86, 0x8d, 0x9b, 0x36, 0x6f, 0xd9, 0xba, 0x6d, 0xfb, 0x8e, 0x9d, 0xbb, 0x76, 0xef,
    0xd9, 0xbb, 0x6f, 0xff, 0x81, 0x83, 0x87, 0x0e, 0x1f, 0x39, 0x7a, 0xec, 0xf8, 0x89, 0x93,
    0xa7, 0x4e, 0x9f, 0x39, 0x7b, 0xee, 0xfc, 0x85, 0x8b, 0x97, 0x2e, 0x5f, 0xb9, 0x7a, 0xed,
    0xfa, 0x8d, 0x9b, 0xb7, 0x6e, 0xdf, 0xb9, 0x7b, 0xef, 0xfe, 0x83, 0x87, 0x8f, 0x1e, 0x3f,
    0x79, 0xfa, 0xec, 0xf9, 0x8b, 0x97, 0xaf, 0x5e, 0xbf, 0x79, 0xfb, 0xee, 0xfd, 0x87, 0x8f,
    0x9f, 0x3e, 0x7f, 0xf9, 0xfa, 0xed, 0xfb, 0x8f, 0x9f, 0xbf, 0x7e, 0xff, 0xf9, 0xfb, 0xef,
    0xff, 0xa8, 0xff, 0x47, 0xb6, 0xff, 0x01,
];

fn payload() -> Vec<u8> {
    let mut p: Vec<u8> = b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(45 * 40)
        .collect();
    for _ in 0..3 {
        p.extend(0u8..=255);
    }
    p
}

fn inflate_all(mut stream: &[u8]) -> Result<Vec<u8>, InflateError> {
    let mut ctx = Inflate::new();
    let mut out = Vec::new();
    let src = &mut stream;
    loop {
        match ctx.inflate(src, true)? {
            Step::Emit => out.extend_from_slice(ctx.output()),
            Step::End => {
                out.extend_from_slice(ctx.output());
                return Ok(out);
            }
            Step::NeedInput => unreachable!(),
        }
    }
}

#[test]
fn real_dynamic_stream() {
    assert_eq!(inflate_all(&REAL_STREAM).unwrap(), payload());
}

#[test]
fn gunzip_stored_member_with_trailer_check() {
    // gzip member: header, stored deflate block of "123456789", CRC32 +
    // ISIZE trailer
    let gz: Vec<u8> = [
        &[0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03][..],
        &[0x01, 0x09, 0x00, 0xf6, 0xff],
        b"123456789",
        &[0x26, 0x39, 0xf4, 0xcb], // CRC32("123456789") little-endian
        &[0x09, 0x00, 0x00, 0x00],
    ]
    .concat();

    // header: magic, deflate method, no flags
    assert_eq!(&gz[..3], &[0x1f, 0x8b, 0x08]);
    let mut src = &gz[10..];

    let mut ctx = Inflate::new();
    let table = crc32_table(Crc32Kind::IeeeLsb);
    let mut crc = !0u32;
    let mut out = Vec::new();

    loop {
        match ctx.inflate(&mut src, true).unwrap() {
            Step::Emit => {
                crc = crc32_update_lsb(table, crc, ctx.output());
                out.extend_from_slice(ctx.output());
            }
            Step::End => {
                crc = crc32_update_lsb(table, crc, ctx.output());
                out.extend_from_slice(ctx.output());
                break;
            }
            Step::NeedInput => unreachable!(),
        }
    }
    crc ^= !0;

    assert_eq!(out, b"123456789");

    // trailer = unread reader bytes ++ unconsumed source
    let mut trailer = ctx.leftover().to_vec();
    trailer.extend_from_slice(src);
    assert_eq!(trailer.len(), 8);
    assert_eq!(crc, u32::from_le_bytes(trailer[..4].try_into().unwrap()));
    assert_eq!(out.len() as u32, u32::from_le_bytes(trailer[4..].try_into().unwrap()));
}

#[test]
fn gunzip_real_member_chunked() {
    let payload = payload();
    let table = crc32_table(Crc32Kind::IeeeLsb);
    let payload_crc = crc32_update_lsb(table, !0, &payload) ^ !0;

    let mut gz = vec![0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03];
    gz.extend_from_slice(&REAL_STREAM);
    gz.extend_from_slice(&payload_crc.to_le_bytes());
    gz.extend_from_slice(&(payload.len() as u32).to_le_bytes());

    let body = &gz[10..];
    let mut ctx = Inflate::new();
    let mut crc = !0u32;
    let mut out = Vec::new();
    let mut trailer = Vec::new();

    let mut chunks = body.chunks(7).peekable();
    'outer: while let Some(chunk) = chunks.next() {
        let last = chunks.peek().is_none();
        let mut src = chunk;
        loop {
            match ctx.inflate(&mut src, last).unwrap() {
                Step::NeedInput => break,
                Step::Emit => {
                    crc = crc32_update_lsb(table, crc, ctx.output());
                    out.extend_from_slice(ctx.output());
                }
                Step::End => {
                    crc = crc32_update_lsb(table, crc, ctx.output());
                    out.extend_from_slice(ctx.output());
                    trailer.extend_from_slice(ctx.leftover());
                    trailer.extend_from_slice(src);
                    for rest in chunks.by_ref() {
                        trailer.extend_from_slice(rest);
                    }
                    break 'outer;
                }
            }
        }
    }
    crc ^= !0;

    assert_eq!(out, payload);
    assert_eq!(crc, payload_crc);
    assert_eq!(trailer.len(), 8);
    assert_eq!(crc, u32::from_le_bytes(trailer[..4].try_into().unwrap()));
}

#[test]
fn output_crosses_the_window_boundary() {
    // stored blocks totalling > 64 KiB force a wrap emission mid-stream
    let mut stream = Vec::new();
    let chunk = [0xabu8; 0xffff];
    for last in [0u8, 0, 1] {
        stream.push(last);
        stream.extend_from_slice(&[0xff, 0xff, 0x00, 0x00]);
        stream.extend_from_slice(&chunk);
    }

    let out = inflate_all(&stream).unwrap();
    assert_eq!(out.len(), 3 * 0xffff);
    assert!(out.iter().all(|&b| b == 0xab));
}

#[test]
fn fixed_block_follows_stored_block() {
    // a large stored block, then a fixed-Huffman block whose match copies
    // bytes written earlier in the same window
    let mut stream = Vec::new();
    stream.push(0x00);
    stream.extend_from_slice(&[0x00, 0x80, 0xff, 0x7f]); // LEN 0x8000
    stream.extend((0..0x8000u32).map(|i| (i % 251) as u8));
    stream.extend_from_slice(&[0x4b, 0x4c, 0x2a, 0x4a, 0x4c, 0x4e, 0x4c, 0x01, 0x51, 0x00]);

    let out = inflate_all(&stream).unwrap();
    assert_eq!(out.len(), 0x8000 + 11);
    assert_eq!(&out[0x8000..], b"abracadabra");
}

#[test]
fn error_paths() {
    // LEN != !NLEN
    assert_eq!(
        inflate_all(&[0x01, 0x09, 0x00, 0xf6, 0xfe, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Err(InflateError::StoredHeader)
    );
    // reserved block type 11
    assert_eq!(inflate_all(&[0x07]), Err(InflateError::DynHeader));
    // truncated fixed block under flush
    assert_eq!(
        inflate_all(&[0x4b, 0x4c, 0x2a]),
        Err(InflateError::Incomplete)
    );
    // dynamic header with an oversubscribed bit-length code: HLIT=0,
    // HDIST=0, HCLEN=15 (19 entries), every clen symbol claiming length 1
    let mut bits = Vec::new();
    bits.extend([1u8, 0, 1]); // BFINAL, BTYPE=10 (LSB first)
    bits.extend([0; 5]); // HLIT
    bits.extend([0; 5]); // HDIST
    bits.extend([1, 1, 1, 1]); // HCLEN = 15 → 19 entries
    for _ in 0..19 {
        bits.extend([1, 0, 0]); // length 1 for every clen symbol
    }
    let mut stream = vec![0u8; (bits.len() + 7) / 8];
    for (i, b) in bits.iter().enumerate() {
        stream[i / 8] |= b << (i % 8);
    }
    assert_eq!(inflate_all(&stream), Err(InflateError::DynBitLenTree));
}

#[test]
fn reset_reuses_the_context() {
    let mut ctx = Inflate::new();
    let mut src: &[u8] = &[0x4b, 0x4c, 0x2a, 0x4a, 0x4c, 0x4e, 0x4c, 0x01, 0x51, 0x00];
    let mut out = Vec::new();
    loop {
        match ctx.inflate(&mut src, true).unwrap() {
            Step::Emit => out.extend_from_slice(ctx.output()),
            Step::End => {
                out.extend_from_slice(ctx.output());
                break;
            }
            Step::NeedInput => unreachable!(),
        }
    }
    assert_eq!(out, b"abracadabra");

    ctx.reset();
    let mut src: &[u8] = &[0x01, 0x02, 0x00, 0xfd, 0xff, b'h', b'i'];
    assert_eq!(ctx.inflate(&mut src, true).unwrap(), Step::End);
    assert_eq!(ctx.output(), b"hi");
}
