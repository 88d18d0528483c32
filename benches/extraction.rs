use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num::BigInt;
use pool_of_entropy::{EntropyPool, ModifiedGenerator, NO_ADJUSTMENTS};

fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("mix");
    for size in [1usize, 16, 256] {
        let mut pool = EntropyPool::blank(size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| pool.mix(black_box(b"user data")))
        });
    }
    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut pool = EntropyPool::blank(1).unwrap();
    c.bench_function("read_bytes", |b| b.iter(|| pool.read_bytes(NO_ADJUSTMENTS)));
    c.bench_function("read_bytes_adjusted", |b| {
        b.iter(|| pool.read_bytes(black_box(&["modifier"])))
    });
    c.bench_function("read_float", |b| b.iter(|| pool.read_float(NO_ADJUSTMENTS)));
}

fn bench_generate_integer(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_integer");
    for bits in [8u32, 64, 128, 1024] {
        let top = (BigInt::from(1) << bits) - BigInt::from(3);
        let mut pool = EntropyPool::blank(1).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(bits), &top, |b, top| {
            b.iter(|| pool.generate_integer(top, NO_ADJUSTMENTS).unwrap())
        });
    }
    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let mut generator = ModifiedGenerator::new(EntropyPool::blank(4).unwrap());
    generator.modify_all(Some("campaign"));
    let twenty = BigInt::from(20);
    c.bench_function("generator_d20", |b| {
        b.iter(|| generator.rand_integer(black_box(&twenty)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_mix,
    bench_reads,
    bench_generate_integer,
    bench_generator
);
criterion_main!(benches);
