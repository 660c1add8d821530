//! Throughput comparison of the scalar and lane-parallel engines over a
//! batch of short pairs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wide::{i16x8, i8x16};

use simd_pairwise::tracker::Global;
use simd_pairwise::{AlignerBuilder, GapModel, SubstitutionMatrix};

fn random_pairs(rng: &mut StdRng, n: usize, len: usize) -> Vec<(Vec<u8>, Vec<u8>)> {
    (0..n)
        .map(|_| {
            let mut draw = |rng: &mut StdRng| -> Vec<u8> {
                (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
            };
            let a = draw(rng);
            let b = draw(rng);
            (a, b)
        })
        .collect()
}

fn bench_engines(c: &mut Criterion) {
    let matrix = SubstitutionMatrix::<4>::uniform(*b"ACGT", 2, -1).unwrap();
    let gaps = GapModel::new(-4, -1);
    let mut rng = StdRng::seed_from_u64(42);
    let pairs = random_pairs(&mut rng, 64, 24);
    let borrowed: Vec<(&[u8], &[u8])> = pairs
        .iter()
        .map(|(a, b)| (a.as_slice(), b.as_slice()))
        .collect();

    let scalar = AlignerBuilder::new(matrix.clone(), gaps)
        .build::<i32, Global, 8>()
        .unwrap();
    let lanes16 = AlignerBuilder::new(matrix.clone(), gaps)
        .build::<i16x8, Global, 8>()
        .unwrap();
    let lanes8 = AlignerBuilder::new(matrix, gaps)
        .build::<i8x16, Global, 8>()
        .unwrap();

    let mut group = c.benchmark_group("global_batch_64x24");
    group.bench_function("scalar_i32", |b| {
        b.iter(|| scalar.align_all(black_box(&borrowed)).unwrap())
    });
    group.bench_function("lanes_i16x8", |b| {
        b.iter(|| lanes16.align_all(black_box(&borrowed)).unwrap())
    });
    group.bench_function("lanes_i8x16", |b| {
        b.iter(|| lanes8.align_all(black_box(&borrowed)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
