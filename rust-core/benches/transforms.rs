//! Transform engine benchmarks
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spectra::window::{self, WindowType};
use spectra::{Dft, Fft, Stft, StftConfig};

fn test_signal(len: usize) -> Vec<f64> {
    (0..len).map(|i| (i as f64 * 0.013).sin() + 0.25 * (i as f64 * 0.29).cos()).collect()
}

fn bench_dft(c: &mut Criterion) {
    let mut group = c.benchmark_group("dft");

    for size in [500, 1000, 2000] {
        let signal = test_signal(size);
        let cached = Dft::new(size, 0, false).unwrap();
        let uncached = Dft::new(size, 0, true).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("cached", size), &size, |b, _| {
            b.iter(|| cached.execute(black_box(&signal)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("uncached", size), &size, |b, _| {
            b.iter(|| uncached.execute(black_box(&signal)).unwrap())
        });
    }

    group.finish();
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");

    for size in [1024, 4096, 16384, 65536] {
        let signal = test_signal(size);
        let fft = Fft::new(size, 0).unwrap();
        let spectrum = fft.direct(&signal).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("direct", size), &size, |b, _| {
            b.iter(|| fft.direct(black_box(&signal)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("inverse", size), &size, |b, _| {
            b.iter(|| fft.inverse(black_box(&spectrum)).unwrap())
        });
    }

    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_coefficients");

    for window_type in [WindowType::Hann, WindowType::Fthp, WindowType::Hft248D] {
        group.bench_function(window_type.name(), |b| {
            b.iter(|| window::coefficients(black_box(window_type), 4096))
        });
    }

    group.finish();
}

fn bench_stft(c: &mut Criterion) {
    let signal = test_signal(48_000);
    let stft = Stft::new(StftConfig::default()).unwrap();
    let result = stft.direct(&signal).unwrap();

    c.bench_function("stft_direct_1s", |b| b.iter(|| stft.direct(black_box(&signal)).unwrap()));
    c.bench_function("stft_inverse_1s", |b| b.iter(|| stft.inverse(black_box(&result)).unwrap()));
}

criterion_group!(benches, bench_dft, bench_fft, bench_window, bench_stft);
criterion_main!(benches);
