use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use kdct::slow;
use kdct::{CosTableRegistry, ForwardDct, InverseDct};

const ORDERS: [u32; 4] = [6, 8, 10, 12];

fn signal(n: usize) -> Vec<f32> {
    (0..n).map(|i| ((i * 7) % 13) as f32 - 6.0).collect()
}

fn bench_dct2(c: &mut Criterion) {
    let tables = CosTableRegistry::<f32>::new();
    let mut group = c.benchmark_group("dct2");
    for bits in ORDERS {
        let n = 1usize << bits;
        let input = signal(n);
        let mut dct = ForwardDct::new(bits, &tables).expect("order in range");
        let mut data = input.clone();
        group.bench_function(BenchmarkId::new("fast", n), |b| {
            b.iter(|| {
                data.copy_from_slice(&input);
                dct.compute(black_box(&mut data)).expect("length matches");
            })
        });
        if bits <= 10 {
            group.bench_function(BenchmarkId::new("slow", n), |b| {
                b.iter(|| slow::dct2(black_box(&input)))
            });
        }
    }
    group.finish();
}

fn bench_dct3(c: &mut Criterion) {
    let tables = CosTableRegistry::<f32>::new();
    let mut group = c.benchmark_group("dct3");
    for bits in ORDERS {
        let n = 1usize << bits;
        let input = signal(n);
        let mut dct = InverseDct::new(bits, &tables).expect("order in range");
        let mut data = input.clone();
        group.bench_function(BenchmarkId::new("fast", n), |b| {
            b.iter(|| {
                data.copy_from_slice(&input);
                dct.compute(black_box(&mut data)).expect("length matches");
            })
        });
        if bits <= 10 {
            group.bench_function(BenchmarkId::new("slow", n), |b| {
                b.iter(|| slow::dct3(black_box(&input)))
            });
        }
    }
    group.finish();
}

/// Context construction with a warm and a cold table cache.
fn bench_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("setup");
    for bits in ORDERS {
        let warm = CosTableRegistry::<f32>::new();
        group.bench_function(BenchmarkId::new("warm", 1usize << bits), |b| {
            b.iter(|| ForwardDct::new(black_box(bits), &warm).expect("order in range"))
        });
        group.bench_function(BenchmarkId::new("cold", 1usize << bits), |b| {
            b.iter(|| {
                let cold = CosTableRegistry::<f32>::new();
                ForwardDct::new(black_box(bits), &cold).expect("order in range")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dct2, bench_dct3, bench_setup);
criterion_main!(benches);
