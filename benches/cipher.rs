//! Criterion benchmarks for the symmetric cores and the inflate engine.
//!
//! Run with:
//!   cargo bench --bench cipher

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use primkit::cipher::{Aes, ChaCha20, Poly1305, Salsa20, AES_BLOCK};
use primkit::inflate::{Inflate, Step};

fn corpus(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 % 251) as u8).collect()
}

fn bench_ciphers(c: &mut Criterion) {
    let mut group = c.benchmark_group("cipher");
    let len = 65_536usize;
    let data = corpus(len);
    group.throughput(Throughput::Bytes(len as u64));

    let key32: [u8; 32] = core::array::from_fn(|i| i as u8);

    {
        let aes = Aes::new(&key32).unwrap();
        let mut buf = data.clone();
        group.bench_with_input(BenchmarkId::new("aes256_ctr", len), &(), |b, _| {
            b.iter(|| {
                let mut ctr = [0u8; AES_BLOCK];
                aes.crypto_ctr(&mut ctr, &mut buf);
            })
        });
    }

    {
        let mut buf = data.clone();
        group.bench_with_input(BenchmarkId::new("chacha20", len), &(), |b, _| {
            b.iter(|| ChaCha20::new(&key32, &[0; 8], 0).crypto(&mut buf))
        });
    }

    {
        let mut buf = data.clone();
        group.bench_with_input(BenchmarkId::new("salsa20", len), &(), |b, _| {
            b.iter(|| Salsa20::new(&key32, &[0; 8], 0).crypto(&mut buf))
        });
    }

    group.bench_with_input(BenchmarkId::new("poly1305", len), &data, |b, d| {
        b.iter(|| {
            let mut p = Poly1305::new(&key32);
            p.update(d);
            p.finalize()
        })
    });

    group.finish();
}

fn bench_inflate(c: &mut Criterion) {
    // stored blocks only: measures the state machine and window plumbing
    let payload_len = 256 * 1024;
    let mut stream = Vec::new();
    for (i, chunk) in corpus(payload_len).chunks(0xffff).enumerate() {
        let last = (i + 1) * 0xffff >= payload_len;
        stream.push(u8::from(last));
        let len = chunk.len() as u16;
        stream.extend_from_slice(&len.to_le_bytes());
        stream.extend_from_slice(&(!len).to_le_bytes());
        stream.extend_from_slice(chunk);
    }

    let mut group = c.benchmark_group("inflate");
    group.throughput(Throughput::Bytes(payload_len as u64));
    group.bench_function("stored_blocks", |b| {
        b.iter(|| {
            let mut ctx = Inflate::new();
            let mut src: &[u8] = &stream;
            let mut total = 0usize;
            loop {
                match ctx.inflate(&mut src, true).unwrap() {
                    Step::Emit => total += ctx.output().len(),
                    Step::End => {
                        total += ctx.output().len();
                        break;
                    }
                    Step::NeedInput => unreachable!(),
                }
            }
            total
        })
    });
    group.finish();
}

criterion_group!(benches, bench_ciphers, bench_inflate);
criterion_main!(benches);
