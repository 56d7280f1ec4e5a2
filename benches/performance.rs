use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use growvec::GrowVec;

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("doubling_growth", size), size, |b, &size| {
            b.iter(|| {
                let mut v: GrowVec<usize> = GrowVec::new();
                for i in 0..size {
                    black_box(v.push(i).unwrap());
                }
                black_box(v.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("pre_reserved", size), size, |b, &size| {
            b.iter(|| {
                let mut v: GrowVec<usize> = GrowVec::with_capacity(size).unwrap();
                for i in 0..size {
                    black_box(v.push(i).unwrap());
                }
                black_box(v.len())
            });
        });
    }
    group.finish();
}

fn bench_front_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_insert");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("shift_heavy", size), size, |b, &size| {
            b.iter(|| {
                let mut v: GrowVec<usize> = GrowVec::new();
                for i in 0..size {
                    v.insert(0, i).unwrap();
                }
                black_box(v.len())
            });
        });
    }
    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("sum_by_ref", size), size, |b, &size| {
            let v = GrowVec::try_from_iter(0..size).unwrap();
            b.iter(|| {
                let sum: usize = v.iter().sum();
                black_box(sum)
            });
        });
    }
    group.finish();
}

fn bench_clone_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_and_drain");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("try_clone", size), size, |b, &size| {
            let v = GrowVec::try_from_iter(0..size).unwrap();
            b.iter(|| black_box(v.try_clone().unwrap().len()));
        });

        group.bench_with_input(BenchmarkId::new("pop_all", size), size, |b, &size| {
            b.iter(|| {
                let mut v = GrowVec::try_from_iter(0..size).unwrap();
                while let Some(value) = v.pop() {
                    black_box(value);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_front_insert,
    bench_iteration,
    bench_clone_and_drain
);
criterion_main!(benches);
