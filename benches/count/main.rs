use core::time::Duration;
use criterion::*;
#[cfg(feature = "bench")]
use element_count::bench::*;
use element_count::{
    count_u16, count_u16_scalar, count_u32, count_u32_scalar, count_u8, count_u8_scalar, Backend,
    Counter,
};
use std::hint::black_box;

// Payload sizes for benchmarking
pub const PAYLOAD_SIZES: &[usize] = &[
    4096,     // 4 KiB, fits L1
    65536,    // 64 KiB
    1048576,  // 1 MiB
    33554432, // 32 MiB
];

/// Multiplier spreading 256 probe values over the whole u16/u32 range.
const VALUE_MULTIPLIER: u32 = 0x12341357;

// Fills with xorshift noise, deterministic for a given seed.
pub fn generate_test_data(size: usize) -> Vec<u8> {
    let mut y = 0x0123456789abcdef_u64;
    (0..size)
        .map(|_| {
            y ^= y << 11;
            y ^= y >> 31;
            y ^= y << 18;
            y as u8
        })
        .collect()
}

/// Like [`generate_test_data`], but every element is one of the 256 probe values.
pub fn generate_test_data_wide(size: usize, width: usize) -> Vec<u8> {
    let noise = generate_test_data(size.div_ceil(width));
    let mut data: Vec<u8> = noise
        .iter()
        .flat_map(|&x| {
            let value = (x as u32).wrapping_mul(VALUE_MULTIPLIER);
            value.to_ne_bytes().into_iter().take(width)
        })
        .collect();
    data.truncate(size);
    data
}

fn supported_counters() -> impl Iterator<Item = Counter> {
    Backend::ALL
        .into_iter()
        .filter_map(Counter::with_backend)
        .filter(|counter| counter.is_vectorized())
}

/// Checks that every implementation agrees with the scalar one for all 256 probe values.
fn verify(data: &[u8]) {
    for v in 0..=255u32 {
        let wide = v.wrapping_mul(VALUE_MULTIPLIER);
        let expected = (
            count_u8_scalar(data, v as u8),
            count_u16_scalar(data, wide as u16),
            count_u32_scalar(data, wide),
        );

        for counter in supported_counters() {
            let actual = (
                counter.count_u8(data, v as u8),
                counter.count_u16(data, wide as u16),
                counter.count_u32(data, wide),
            );
            assert_eq!(actual, expected, "{} disagrees for value {}", counter.backend().name(), v);
        }
    }
}

pub fn get_benchmark_config() -> Criterion {
    Criterion::default()
}

// Each iteration counts all 256 probe values.
pub fn run_count_u8_benchmarks(c: &mut Criterion) {
    #[cfg(not(feature = "bench"))]
    println!("Note: Use the 'bench' feature to enable additional benchmarks");

    for &size in PAYLOAD_SIZES {
        let mut group = c.benchmark_group("count_u8");
        group.throughput(Throughput::Bytes(size as u64 * 256));
        group.warm_up_time(Duration::from_secs(3));
        group.measurement_time(Duration::from_secs(5));

        let data = generate_test_data(size);
        verify(&data);

        #[cfg(feature = "bench")]
        group.bench_with_input(BenchmarkId::new("naive", size), &data, |b, data| {
            b.iter(|| (0..=255u8).map(|v| count_naive(black_box(data), v)).sum::<usize>())
        });

        #[cfg(feature = "bench")]
        group.bench_with_input(BenchmarkId::new("unroll4", size), &data, |b, data| {
            b.iter(|| {
                (0..=255u8)
                    .map(|v| count_branchless_unroll_4(black_box(data), v))
                    .sum::<usize>()
            })
        });

        group.bench_with_input(BenchmarkId::new("scalar", size), &data, |b, data| {
            b.iter(|| (0..=255u8).map(|v| count_u8_scalar(black_box(data), v)).sum::<usize>())
        });

        for counter in supported_counters() {
            group.bench_with_input(
                BenchmarkId::new(counter.backend().name(), size),
                &data,
                |b, data| {
                    b.iter(|| {
                        (0..=255u8)
                            .map(|v| counter.count_u8(black_box(data), v))
                            .sum::<usize>()
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("default", size), &data, |b, data| {
            b.iter(|| (0..=255u8).map(|v| count_u8(black_box(data), v)).sum::<usize>())
        });

        group.finish();
    }
}

pub fn run_count_u16_benchmarks(c: &mut Criterion) {
    for &size in PAYLOAD_SIZES {
        let mut group = c.benchmark_group("count_u16");
        group.throughput(Throughput::Bytes(size as u64 * 256));

        let data = generate_test_data_wide(size, 2);
        verify(&data);
        let values: Vec<u16> = (0..=255u32)
            .map(|v| v.wrapping_mul(VALUE_MULTIPLIER) as u16)
            .collect();

        #[cfg(feature = "bench")]
        group.bench_with_input(BenchmarkId::new("naive", size), &data, |b, data| {
            b.iter(|| values.iter().map(|&v| count_naive(black_box(data), v)).sum::<usize>())
        });

        group.bench_with_input(BenchmarkId::new("scalar", size), &data, |b, data| {
            b.iter(|| {
                values
                    .iter()
                    .map(|&v| count_u16_scalar(black_box(data), v))
                    .sum::<usize>()
            })
        });

        for counter in supported_counters() {
            group.bench_with_input(
                BenchmarkId::new(counter.backend().name(), size),
                &data,
                |b, data| {
                    b.iter(|| {
                        values
                            .iter()
                            .map(|&v| counter.count_u16(black_box(data), v))
                            .sum::<usize>()
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("default", size), &data, |b, data| {
            b.iter(|| values.iter().map(|&v| count_u16(black_box(data), v)).sum::<usize>())
        });

        group.finish();
    }
}

pub fn run_count_u32_benchmarks(c: &mut Criterion) {
    for &size in PAYLOAD_SIZES {
        let mut group = c.benchmark_group("count_u32");
        group.throughput(Throughput::Bytes(size as u64 * 256));

        let data = generate_test_data_wide(size, 4);
        verify(&data);
        let values: Vec<u32> = (0..=255u32)
            .map(|v| v.wrapping_mul(VALUE_MULTIPLIER))
            .collect();

        #[cfg(feature = "bench")]
        group.bench_with_input(BenchmarkId::new("naive", size), &data, |b, data| {
            b.iter(|| values.iter().map(|&v| count_naive(black_box(data), v)).sum::<usize>())
        });

        group.bench_with_input(BenchmarkId::new("scalar", size), &data, |b, data| {
            b.iter(|| {
                values
                    .iter()
                    .map(|&v| count_u32_scalar(black_box(data), v))
                    .sum::<usize>()
            })
        });

        for counter in supported_counters() {
            group.bench_with_input(
                BenchmarkId::new(counter.backend().name(), size),
                &data,
                |b, data| {
                    b.iter(|| {
                        values
                            .iter()
                            .map(|&v| counter.count_u32(black_box(data), v))
                            .sum::<usize>()
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("default", size), &data, |b, data| {
            b.iter(|| values.iter().map(|&v| count_u32(black_box(data), v)).sum::<usize>())
        });

        group.finish();
    }
}

pub fn run_all_benchmarks(c: &mut Criterion) {
    run_count_u8_benchmarks(c);
    run_count_u16_benchmarks(c);
    run_count_u32_benchmarks(c);
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = get_benchmark_config().with_profiler(
        pprof::criterion::PProfProfiler::new(100, pprof::criterion::Output::Flamegraph(None))
    );
    targets = run_all_benchmarks
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = get_benchmark_config();
    targets = run_all_benchmarks
}

criterion_main!(benches);
