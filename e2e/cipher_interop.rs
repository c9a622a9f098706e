//! E2E suite: symmetric ciphers against the reference vectors and the
//! encrypt∘decrypt / crypto∘crypto inverses under random keys.

use primkit::cipher::{
    hchacha20, hsalsa20, poly1305, Aes, Blowfish, ChaCha20, Des, Rc4, Salsa20, XChaCha20,
    XSalsa20, AES_BLOCK,
};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// AES (FIPS 197 appendix C)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn aes_fips197_vectors() {
    let pt: [u8; 16] = core::array::from_fn(|i| (i * 0x11) as u8);

    let cases: [(&[u8], &str); 3] = [
        (&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f],
         "69c4e0d86a7b0430d8cdb78070b4c55a"),
        (&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
           0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17],
         "dda97ca4864cdfe06eaf70a0ec0d7191"),
        (&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
           0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f],
         "8ea2b7ca516745bfeafc49904b496089"),
    ];

    for (key, want) in cases {
        let aes = Aes::new(key).unwrap();
        let mut block = pt;
        aes.encrypt(&mut block);
        assert_eq!(hex(&block), want, "key length {}", key.len());
        aes.decrypt(&mut block);
        assert_eq!(block, pt);
    }
}

#[test]
fn aes_modes_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let aes = Aes::new(&key).unwrap();

    let plain: Vec<u8> = (0..1024).map(|_| rng.gen()).collect();

    // CBC / CFB over whole blocks
    let mut iv0 = [0u8; AES_BLOCK];
    rng.fill_bytes(&mut iv0);

    let mut cbc = plain.clone();
    let mut iv = iv0;
    for block in cbc.chunks_exact_mut(AES_BLOCK) {
        aes.encrypt_cbc(&mut iv, block.try_into().unwrap());
    }
    assert_ne!(cbc, plain);
    let mut iv = iv0;
    for block in cbc.chunks_exact_mut(AES_BLOCK) {
        aes.decrypt_cbc(&mut iv, block.try_into().unwrap());
    }
    assert_eq!(cbc, plain);

    let mut cfb = plain.clone();
    let mut iv = iv0;
    for block in cfb.chunks_exact_mut(AES_BLOCK) {
        aes.encrypt_cfb(&mut iv, block.try_into().unwrap());
    }
    let mut iv = iv0;
    for block in cfb.chunks_exact_mut(AES_BLOCK) {
        aes.decrypt_cfb(&mut iv, block.try_into().unwrap());
    }
    assert_eq!(cfb, plain);

    // OFB / CTR are involutions on arbitrary lengths
    let mut ofb = plain[..1000].to_vec();
    let mut iv = iv0;
    aes.crypto_ofb(&mut iv, &mut ofb);
    let mut iv = iv0;
    aes.crypto_ofb(&mut iv, &mut ofb);
    assert_eq!(ofb, plain[..1000]);

    let mut ctr = plain[..1000].to_vec();
    let mut c = iv0;
    aes.crypto_ctr(&mut c, &mut ctr);
    let mut c = iv0;
    aes.crypto_ctr(&mut c, &mut ctr);
    assert_eq!(ctr, plain[..1000]);

    // CTR chaining: two calls continue the counter
    let mut whole = plain[..640].to_vec();
    let mut c = iv0;
    aes.crypto_ctr(&mut c, &mut whole);
    let mut parts = plain[..640].to_vec();
    let mut c = iv0;
    let (a, b) = parts.split_at_mut(320);
    aes.crypto_ctr(&mut c, a);
    aes.crypto_ctr(&mut c, b);
    assert_eq!(whole, parts);
}

// ─────────────────────────────────────────────────────────────────────────────
// DES / Blowfish / RC4
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn des_vectors() {
    let des = Des::new(&0x1334_5779_9bbc_dff1_u64.to_be_bytes());
    let mut block = 0x0123_4567_89ab_cdef_u64.to_be_bytes();
    des.crypt(&mut block, false);
    assert_eq!(hex(&block), "85e813540f0ab405");
    des.crypt(&mut block, true);
    assert_eq!(u64::from_be_bytes(block), 0x0123_4567_89ab_cdef);

    let des = Des::new(&[0u8; 8]);
    let mut block = [0u8; 8];
    des.crypt(&mut block, false);
    assert_eq!(hex(&block), "8ca64de9c1b123a7");
}

#[test]
fn blowfish_vectors() {
    let bf = Blowfish::new(&[0u8; 8]);
    let (mut l, mut r) = (0u32, 0u32);
    bf.encrypt(&mut l, &mut r);
    assert_eq!((l, r), (0x4ef9_9745, 0x6198_dd78));
    bf.decrypt(&mut l, &mut r);
    assert_eq!((l, r), (0, 0));
}

#[test]
fn rc4_vector() {
    let mut rc4 = Rc4::new(b"Secret");
    let mut buf = *b"Attack at dawn";
    rc4.crypto(&mut buf);
    assert_eq!(hex(&buf), "45a01f645fc35b383552544b9bf5");
}

// ─────────────────────────────────────────────────────────────────────────────
// Salsa / ChaCha families
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn salsa20_keystream_vectors() {
    // ECRYPT Set 1 vector 0 (256-bit key, high bit of key[0] set)
    let mut key = [0u8; 32];
    key[0] = 0x80;
    let mut buf = [0u8; 16];
    Salsa20::new(&key, &[0; 8], 0).crypto(&mut buf);
    assert_eq!(hex(&buf), "e3be8fdd8beca2e3ea8ef9475b29a6e7");

    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let mut buf = [0u8; 32];
    Salsa20::new(&key, &[0; 8], 0).crypto(&mut buf);
    assert_eq!(
        hex(&buf),
        "b580f7671c76e5f7441af87c146d6b513910dc8b4146ef1b3211cf12af4a4b49"
    );
}

#[test]
fn xsalsa20_subkey_and_stream() {
    let shared = [
        0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1, 0x72, 0x8e, 0x3b, 0xf4, 0x80, 0x35,
        0x0f, 0x25, 0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33, 0x76, 0xf0, 0x9b, 0x3c,
        0x1e, 0x16, 0x17, 0x42,
    ];
    assert_eq!(
        hex(&hsalsa20(&shared, &[0; 16])),
        "1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389"
    );

    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let nonce: [u8; 24] = core::array::from_fn(|i| i as u8);
    let mut buf = [0u8; 32];
    XSalsa20::new(&key, &nonce, 0).crypto(&mut buf);
    assert_eq!(
        hex(&buf),
        "7cb660afdd9ec6468f57dd6d2433f93428fd82cd7386c5471a24d8ad2a525b6e"
    );
}

#[test]
fn chacha20_rfc8439_encryption() {
    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let nonce = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00];
    let mut buf = *b"Ladies and Gentlemen of the class of '99: If I could offer you \
                     only one tip for the future, sunscreen would be it.";
    ChaCha20::new_ietf(&key, &nonce, 1).crypto(&mut buf);
    assert_eq!(
        hex(&buf),
        "6e2e359a2568f98041ba0728dd0d6981e97e7aec1d4360c20a27afccfd9fae0b\
         f91b65c5524733ab8f593dabcd62b3571639d624e65152ab8f530c359f0861d8\
         07ca0dbf500d6a6156a38e088a22b65e52bc514d16ccf806818ce91ab7793736\
         5af90bbf74a35be6b40b8eedf2785e42874d"
    );
}

#[test]
fn xchacha20_subkey_and_stream() {
    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let input = [
        0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00, 0x31, 0x41,
        0x59, 0x27,
    ];
    assert_eq!(
        hex(&hchacha20(&key, &input)),
        "82413b4227b27bfed30e42508a877d73a0f9e4d58a74a853c12ec41326d3ecdc"
    );

    let nonce: [u8; 24] = core::array::from_fn(|i| i as u8);
    let mut buf = [0u8; 32];
    XChaCha20::new(&key, &nonce, 0).crypto(&mut buf);
    assert_eq!(
        hex(&buf),
        "e53a61cef151e81401067de33adfc02e90ab205361b49b539fda7f0e63b1bc7d"
    );
}

#[test]
fn stream_ciphers_invert_and_chain() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let nonce: [u8; 8] = rng.gen();
    let msg: Vec<u8> = (0..333).map(|_| rng.gen()).collect();

    let mut buf = msg.clone();
    Salsa20::new(&key, &nonce, 9).crypto(&mut buf);
    Salsa20::new(&key, &nonce, 9).crypto(&mut buf);
    assert_eq!(buf, msg);

    // counter-continuity across chunked calls
    let mut whole = msg.clone();
    ChaCha20::new(&key, &nonce, 0).crypto(&mut whole);
    let mut parts = msg.clone();
    let mut c = ChaCha20::new(&key, &nonce, 0);
    let (a, rest) = parts.split_at_mut(64);
    let (b, tail) = rest.split_at_mut(100);
    c.crypto(a);
    c.crypto(b);
    c.crypto(tail);
    assert_eq!(whole, parts);
}

// ─────────────────────────────────────────────────────────────────────────────
// Poly1305
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn poly1305_rfc8439() {
    let key = [
        0x85, 0xd6, 0xbe, 0x78, 0x57, 0x55, 0x6d, 0x33, 0x7f, 0x44, 0x52, 0xfe, 0x42, 0xd5,
        0x06, 0xa8, 0x01, 0x03, 0x80, 0x8a, 0xfb, 0x0d, 0xb2, 0xfd, 0x4a, 0xbf, 0xf6, 0xaf,
        0x41, 0x49, 0xf5, 0x1b,
    ];
    assert_eq!(
        hex(&poly1305(&key, b"Cryptographic Forum Research Group")),
        "a8061dc1305136c6c22b8baf0c0127a9"
    );
}
