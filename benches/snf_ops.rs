use bitsnf::{BitMatrix, Gf2Matrix, SparseBitMatrix};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};
use std::hint::black_box;

fn snf_dense(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    for size in [64, 256] {
        let m = BitMatrix::random(&mut rng, size, size);
        c.bench_function(&format!("snf_dense_{}", size), |b| {
            b.iter(|| {
                let mut m = black_box(m.clone());
                m.smith_normal_form().unwrap();
                m
            })
        });
    }
}

fn snf_sparse(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    for size in [64, 256] {
        let m = SparseBitMatrix::random(&mut rng, size, size, 0.05);
        c.bench_function(&format!("snf_sparse_{}", size), |b| {
            b.iter(|| {
                let mut m = black_box(m.clone());
                m.smith_normal_form().unwrap();
                m
            })
        });
    }
}

fn rank(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let m = BitMatrix::random(&mut rng, 128, 128);
    c.bench_function("rank_dense_128", |b| b.iter(|| black_box(&m).rank().unwrap()));
}

criterion_group!(benches, snf_dense, snf_sparse, rank);
criterion_main!(benches);
