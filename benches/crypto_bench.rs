use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use keynest::core::crypto;

/// Generate a payload of given size.
fn generate_payload(size: usize) -> String {
    "x".repeat(size)
}

/// Benchmark encrypt/decrypt roundtrip with varying payload sizes.
///
/// Key derivation dominates: every call re-runs PBKDF2, so keep the sample
/// counts low.
fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt_decrypt");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(10));

    let sizes = [32, 1024, 16384];

    for size in sizes {
        let payload = generate_payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("roundtrip", format!("{}B", size)),
            &payload,
            |b, payload| {
                b.iter(|| {
                    let encrypted =
                        crypto::encrypt(black_box(payload), black_box("bench-password")).unwrap();
                    let decrypted =
                        crypto::decrypt(black_box(&encrypted), black_box("bench-password"))
                            .unwrap();
                    black_box(decrypted);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark encryption only.
fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(10));

    let sizes = [32, 1024, 16384];

    for size in sizes {
        let payload = generate_payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("seal", format!("{}B", size)),
            &payload,
            |b, payload| {
                b.iter(|| {
                    let encrypted =
                        crypto::encrypt(black_box(payload), black_box("bench-password")).unwrap();
                    black_box(encrypted);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_encrypt_decrypt, bench_encrypt);
criterion_main!(benches);
