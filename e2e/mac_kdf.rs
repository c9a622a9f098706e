//! E2E suite: HMAC, HKDF, PBKDF2, scrypt, bcrypt and TOTP against the RFC
//! vectors, plus the cross-construction identities.

use primkit::hash::{Blake2b512, Blake2s256, Md5, Sha1, Sha256, Sha3_256, Sha512};
use primkit::kdf::{
    bcrypt_auth, bcrypt_hashpass, hkdf, pbkdf2, scrypt, scrypt_scratch_len, totp, Hmac,
};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// HMAC (RFC 2202 / RFC 4231, plus the same construction over SHA-3/BLAKE2)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hmac_hi_there_family() {
    let key20 = [0x0b_u8; 20];
    let msg = b"Hi There";

    let mut out = [0u8; 64];
    Hmac::<Md5>::mac(&[0x0b; 16], msg, &mut out);
    assert_eq!(hex(&out[..16]), "9294727a3638bb1c13f48ef8158bfc9d");

    Hmac::<Sha1>::mac(&key20, msg, &mut out);
    assert_eq!(hex(&out[..20]), "b617318655057264e28bc0b6fb378c8ef146be00");

    Hmac::<Sha256>::mac(&key20, msg, &mut out);
    assert_eq!(
        hex(&out[..32]),
        "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
    );

    Hmac::<Sha512>::mac(&key20, msg, &mut out);
    assert_eq!(
        hex(&out[..64]),
        "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
         daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
    );

    Hmac::<Sha3_256>::mac(&key20, msg, &mut out);
    assert_eq!(
        hex(&out[..32]),
        "ba85192310dffa96e2a3a40e69774351140bb7185e1202cdcc917589f95e16bb"
    );

    Hmac::<Blake2b512>::mac(&key20, msg, &mut out);
    assert_eq!(
        hex(&out[..64]),
        "358a6a184924894fc34bee5680eedf57d84a37bb38832f288e3b27dc63a98cc8\
         c91e76da476b508bc6b2d408a248857452906e4a20b48c6b4b55d2df0fe1dd24"
    );

    Hmac::<Blake2s256>::mac(&key20, msg, &mut out);
    assert_eq!(
        hex(&out[..32]),
        "65a8b7c5cc9136d424e82c37e2707e74e913c0655b99c75f40edf387453a3260"
    );
}

#[test]
fn hmac_jefe_and_streaming() {
    let mut out = [0u8; 32];
    Hmac::<Sha256>::mac(b"Jefe", b"what do ya want for nothing?", &mut out);
    assert_eq!(
        hex(&out),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );

    // process() concatenation associativity
    let mut split = [0u8; 32];
    let mut mac = Hmac::<Sha256>::new(b"Jefe");
    mac.update(b"what do ya want ");
    mac.update(b"for nothing?");
    mac.finish_into(&mut split);
    assert_eq!(split, out);
}

// ─────────────────────────────────────────────────────────────────────────────
// HKDF (RFC 5869)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hkdf_rfc5869_case1() {
    let ikm = [0x0b_u8; 22];
    let salt: Vec<u8> = (0x00..=0x0c).collect();
    let info: Vec<u8> = (0xf0..=0xf9).collect();
    let mut okm = [0u8; 42];
    hkdf::<Sha256>(&ikm, &salt, &info, &mut okm).unwrap();
    assert_eq!(
        hex(&okm),
        "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf\
         34007208d5b887185865"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// PBKDF2 (RFC 6070 and the SHA-256 set)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn pbkdf2_sha1_vectors() {
    let mut dk20 = [0u8; 20];
    pbkdf2::<Sha1>(b"password", b"salt", 1, &mut dk20);
    assert_eq!(hex(&dk20), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
    pbkdf2::<Sha1>(b"password", b"salt", 2, &mut dk20);
    assert_eq!(hex(&dk20), "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957");
    pbkdf2::<Sha1>(b"password", b"salt", 4096, &mut dk20);
    assert_eq!(hex(&dk20), "4b007901b765489abead49d926f721d065a429c1");

    let mut dk25 = [0u8; 25];
    pbkdf2::<Sha1>(
        b"passwordPASSWORDpassword",
        b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
        4096,
        &mut dk25,
    );
    assert_eq!(hex(&dk25), "3d2eec4fe41c849b80c8d83662c0e44a8b291a964cf2f07038");
}

#[test]
fn pbkdf2_sha256_vectors() {
    let mut dk = [0u8; 32];
    pbkdf2::<Sha256>(b"password", b"salt", 1, &mut dk);
    assert_eq!(
        hex(&dk),
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
    );
    pbkdf2::<Sha256>(b"password", b"salt", 4096, &mut dk);
    assert_eq!(
        hex(&dk),
        "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
    );
}

#[test]
fn pbkdf2_single_iteration_is_hmac_of_salt_and_counter() {
    let mut dk = [0u8; 20];
    pbkdf2::<Sha1>(b"pass", b"salt", 1, &mut dk);

    let mut mac = Hmac::<Sha1>::new(b"pass");
    mac.update(b"salt");
    mac.update(&[0, 0, 0, 1]);
    let mut direct = [0u8; 20];
    mac.finish_into(&mut direct);
    assert_eq!(dk, direct);
}

// ─────────────────────────────────────────────────────────────────────────────
// scrypt (RFC 7914)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn scrypt_rfc7914_small() {
    let mut scratch = vec![0u8; scrypt_scratch_len(16, 1, 1)];
    let mut dk = [0u8; 64];
    scrypt(b"", b"", 16, 1, 1, &mut scratch, &mut dk).unwrap();
    assert_eq!(
        hex(&dk),
        "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442\
         fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906"
    );
}

#[test]
fn scrypt_rfc7914_n1024() {
    let mut scratch = vec![0u8; scrypt_scratch_len(1024, 8, 16)];
    let mut dk = [0u8; 64];
    scrypt(b"password", b"NaCl", 1024, 8, 16, &mut scratch, &mut dk).unwrap();
    assert_eq!(
        hex(&dk),
        "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162\
         2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// bcrypt
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bcrypt_known_digests() {
    // fixed parameters hashed once with the eks schedule and pinned
    let salt: [u8; 16] = core::array::from_fn(|i| i as u8);
    let got = bcrypt_hashpass(b"abc\0", &salt, 4);
    assert_eq!(
        hex(&got),
        "84bc5456555f9836a76e06958c916b2fac9dc8dca2f86293"
    );

    let got = bcrypt_hashpass(b"password", &[0u8; 16], 4);
    assert_eq!(
        hex(&got),
        "3eee95617387c28341348fb27011ce75ba713ee0061439a4"
    );
}

#[test]
fn bcrypt_auth_is_exact() {
    let salt = [3u8; 16];
    let a = bcrypt_hashpass(b"secret\0", &salt, 5);
    let b = bcrypt_hashpass(b"secret\0", &salt, 5);
    assert!(bcrypt_auth(&a, &b));
    let c = bcrypt_hashpass(b"secreT\0", &salt, 5);
    assert!(!bcrypt_auth(&a, &c));
}

// ─────────────────────────────────────────────────────────────────────────────
// TOTP (RFC 6238)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn totp_rfc6238_vectors() {
    let key_sha1 = b"12345678901234567890";
    let key_sha512 = b"1234567890123456789012345678901234567890123456789012345678901234";

    // time 59s with a 30s step → counter 1
    assert_eq!(totp::<Sha1>(key_sha1, 1, 8), 94287082);
    assert_eq!(totp::<Sha512>(key_sha512, 1, 8), 90693936);
    // time 1111111109 → counter 37037036
    assert_eq!(totp::<Sha1>(key_sha1, 37037036, 8), 7081804);
    // fewer digits truncate the same code
    assert_eq!(totp::<Sha1>(key_sha1, 1, 6), 94287082 % 1_000_000);
}
