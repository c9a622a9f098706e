//! E2E suite: digest engines against their published test vectors, plus
//! the streaming-equals-one-shot invariant at awkward split points.

use primkit::hash::{
    blake2b, blake2s, crc32, md5, sha1, sha224, sha256, sha384, sha3_224, sha3_256, sha3_384,
    sha3_512, sha512, siphash24, xxh32, xxh64, Blake2b, Crc32Kind, Md5, Sha1, Sha256, Sha3,
    Sha3Variant, Sha512, Xxh64,
};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed vectors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn md5_vectors() {
    assert_eq!(hex(&md5(b"")), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(hex(&md5(b"abc")), "900150983cd24fb0d6963f7d28e17f72");
    assert_eq!(
        hex(&md5(b"The quick brown fox jumps over the lazy dog")),
        "9e107d9d372bb6826bd81d3542a419d6"
    );
}

#[test]
fn sha1_vectors() {
    assert_eq!(hex(&sha1(b"")), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    assert_eq!(hex(&sha1(b"abc")), "a9993e364706816aba3e25717850c26c9cd0d89d");
}

#[test]
fn sha1_million_a() {
    let mut h = Sha1::new();
    let chunk = [b'a'; 1000];
    for _ in 0..1000 {
        h.update(&chunk);
    }
    assert_eq!(hex(&h.finalize()), "34aa973cd4c4daa4f61eeb2bdbad27316534016f");
}

#[test]
fn sha2_vectors() {
    assert_eq!(
        hex(&sha224(b"abc")),
        "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
    );
    assert_eq!(
        hex(&sha256(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        hex(&sha256(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")),
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    );
    assert_eq!(
        hex(&sha384(b"abc")),
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
         8086072ba1e7cc2358baeca134c825a7"
    );
    assert_eq!(
        hex(&sha512(b"abc")),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
    assert_eq!(
        hex(&sha512(
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmno\
              ijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu"
        )),
        "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018\
         501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909"
    );
}

#[test]
fn sha3_vectors() {
    assert_eq!(
        hex(&sha3_224(b"")),
        "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7"
    );
    assert_eq!(
        hex(&sha3_256(b"")),
        "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
    );
    assert_eq!(
        hex(&sha3_256(b"abc")),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
    assert_eq!(
        hex(&sha3_384(b"abc")),
        "ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b2\
         98d88cea927ac7f539f1edf228376d25"
    );
    assert_eq!(
        hex(&sha3_512(b"abc")),
        "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
         10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
    );
}

#[test]
fn shake_vectors() {
    let mut h = Sha3::new(Sha3Variant::Shake128);
    let mut out = [0u8; 32];
    h.finalize_into(&mut out);
    assert_eq!(
        hex(&out),
        "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
    );

    let mut h = Sha3::new(Sha3Variant::Shake256);
    h.update(b"abc");
    let mut out = [0u8; 64];
    h.finalize_into(&mut out);
    assert_eq!(
        hex(&out),
        "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739\
         d5a15bef186a5386c75744c0527e1faa9f8726e462a12a4feb06bd8801e751e4"
    );
}

#[test]
fn blake2_vectors() {
    let mut out = [0u8; 64];
    blake2b(b"abc", &mut out).unwrap();
    assert_eq!(
        hex(&out),
        "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
         7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
    );
    blake2b(b"", &mut out).unwrap();
    assert_eq!(
        hex(&out),
        "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
         d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
    );

    let mut out = [0u8; 32];
    blake2s(b"abc", &mut out).unwrap();
    assert_eq!(
        hex(&out),
        "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"
    );
    blake2s(b"", &mut out).unwrap();
    assert_eq!(
        hex(&out),
        "69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9"
    );

    // truncated digest lengths are their own parameterization, not a prefix
    let mut out = [0u8; 20];
    blake2b(b"abc", &mut out).unwrap();
    assert_eq!(hex(&out), "384264f676f39536840523f284921cdc68b6846b");
}

#[test]
fn blake2_keyed_vectors() {
    let key64: Vec<u8> = (0u8..64).collect();
    let mut h = Blake2b::new_keyed(64, &key64).unwrap();
    h.update(b"abc");
    let mut out = [0u8; 64];
    h.finalize_into(&mut out);
    assert_eq!(
        hex(&out),
        "06bbc3dedf13a31139498655251b7588ccd3bb5aaa071b2d44d8e0a04095579e\
         d590fbfdcf941f4370ce5ce623624e7a76d33e7a8109dcda9b57d72f8f8efa51"
    );

    // empty message: the key block is the final block
    let h = Blake2b::new_keyed(64, b"secret key").unwrap();
    let mut out = [0u8; 64];
    h.finalize_into(&mut out);
    assert_eq!(
        hex(&out[..32]),
        "539b065507dd7df78d6f8049562ac7ab3991797a3e19d4b1260f8dd205d05e1b"
    );

    let key32: Vec<u8> = (0u8..32).collect();
    let mut h = primkit::hash::Blake2s::new_keyed(32, &key32).unwrap();
    h.update(b"abc");
    let mut out = [0u8; 32];
    h.finalize_into(&mut out);
    assert_eq!(
        hex(&out),
        "a281f725754969a702f6fe36fc591b7def866e4b70173ece402fc01c064d6b65"
    );

    let mut h = Blake2b::new_keyed(32, b"k").unwrap();
    h.update(b"data");
    let mut out = [0u8; 32];
    h.finalize_into(&mut out);
    assert_eq!(
        hex(&out),
        "ab4308ad2f242bab22f9cb195139ada6811965e91432a4042169bf0c02ebbeb4"
    );
}

#[test]
fn fast_hash_vectors() {
    assert_eq!(xxh32(b"Nobody inspects the spammish repetition", 0), 0xe229_3b2f);
    assert_eq!(xxh32(b"abc", 0), 0x32d1_53ff);
    assert_eq!(xxh64(b"Nobody inspects the spammish repetition", 0), 0xfbce_a83c_8a37_8bf1);
    assert_eq!(xxh64(b"abc", 0), 0x44bc_2cf5_ad77_0999);

    let key: [u8; 16] = core::array::from_fn(|i| i as u8);
    assert_eq!(siphash24(&key, &[]), 0x726f_db47_dd0e_0e31);

    assert_eq!(crc32(b"123456789", Crc32Kind::IeeeLsb), 0xcbf4_3926);
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming == one-shot, across every split of a two-block message
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn streaming_split_invariance() {
    let data: Vec<u8> = (0u32..300).map(|i| (i * 7 % 256) as u8).collect();

    for split in 0..data.len() {
        let (a, b) = data.split_at(split);

        let mut h = Md5::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), md5(&data), "md5 split {split}");

        let mut h = Sha256::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), sha256(&data), "sha256 split {split}");

        let mut h = Sha512::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), sha512(&data), "sha512 split {split}");
    }

    // sponge and the wide-block engines at the rate boundaries
    for split in [0, 1, 71, 72, 73, 103, 104, 135, 136, 137, 167, 168, 250] {
        let (a, b) = data.split_at(split);

        let mut h = primkit::hash::Sha3_256::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), sha3_256(&data), "sha3 split {split}");

        let mut h = Blake2b::new(64).unwrap();
        h.update(a);
        h.update(b);
        let mut got = [0u8; 64];
        h.finalize_into(&mut got);
        let mut want = [0u8; 64];
        blake2b(&data, &mut want).unwrap();
        assert_eq!(got, want, "blake2b split {split}");

        let mut h = Xxh64::new(99);
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), xxh64(&data, 99), "xxh64 split {split}");
    }
}
