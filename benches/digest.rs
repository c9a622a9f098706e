//! Criterion benchmarks for the digest engines and CRC tables.
//!
//! Run with:
//!   cargo bench --bench digest

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use primkit::hash::{
    blake2b, crc32, md5, sha256, sha3_256, sha512, xxh64, Crc32Kind,
};

fn corpus(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 % 251) as u8).collect()
}

fn bench_digests(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");

    for &len in &[1_024usize, 65_536] {
        let data = corpus(len);
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("md5", len), &data, |b, d| {
            b.iter(|| md5(d))
        });
        group.bench_with_input(BenchmarkId::new("sha256", len), &data, |b, d| {
            b.iter(|| sha256(d))
        });
        group.bench_with_input(BenchmarkId::new("sha512", len), &data, |b, d| {
            b.iter(|| sha512(d))
        });
        group.bench_with_input(BenchmarkId::new("sha3_256", len), &data, |b, d| {
            b.iter(|| sha3_256(d))
        });
        group.bench_with_input(BenchmarkId::new("blake2b_512", len), &data, |b, d| {
            b.iter(|| {
                let mut out = [0u8; 64];
                blake2b(d, &mut out).unwrap();
                out
            })
        });
        group.bench_with_input(BenchmarkId::new("xxh64", len), &data, |b, d| {
            b.iter(|| xxh64(d, 0))
        });
        group.bench_with_input(BenchmarkId::new("crc32_ieee", len), &data, |b, d| {
            b.iter(|| crc32(d, Crc32Kind::IeeeLsb))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_digests);
criterion_main!(benches);
