use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rscoder::{GaloisField, ReedSolomonCoder};
use std::hint::black_box;
use std::sync::Arc;

fn create_message(size: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..size).map(|_| rng.random()).collect()
}

fn coder(k: usize, e: usize) -> ReedSolomonCoder {
    ReedSolomonCoder::new(Arc::new(GaloisField::gf256()), k, e).unwrap()
}

/// Corrupt `errors` distinct bytes in every codeword
fn corrupt(encoded: &[u8], codeword_length: usize, errors: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(errors as u64);
    let mut noisy = encoded.to_vec();
    for block in noisy.chunks_mut(codeword_length) {
        for position in rand::seq::index::sample(&mut rng, block.len(), errors.min(block.len())) {
            block[position] ^= rng.random_range(1..=255u8);
        }
    }
    noisy
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let message = create_message(64 * 1024);
    group.throughput(Throughput::Bytes(message.len() as u64));

    for (k, e) in [(223, 32), (239, 16), (64, 8)] {
        let rs = coder(k, e);
        // Warm the generator cache outside the measurement
        rs.encode(&message[..k]).unwrap();
        group.bench_with_input(
            BenchmarkId::new("rs", format!("{}+{}", k, e)),
            &message,
            |b, message| b.iter(|| rs.encode(black_box(message)).unwrap()),
        );
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_223_32");
    let rs = coder(223, 32);
    let message = create_message(64 * 1024);
    let encoded = rs.encode(&message).unwrap();
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    for errors in [0usize, 1, 8, 16] {
        let noisy = corrupt(&encoded, rs.codeword_length(), errors);
        group.bench_with_input(
            BenchmarkId::new("errors_per_block", errors),
            &noisy,
            |b, noisy| b.iter(|| rs.decode(black_box(noisy))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
