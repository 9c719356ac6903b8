//! Benchmarks for chunk slicing and the raw-count check.

use census_util::{
    array_chunker, is_nonnegative_integral, par_is_nonnegative_integral, ChunkConfig, CsrMatrix,
    Matrix,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random count matrix with roughly `per_row` values in each row
fn random_counts(nrows: usize, ncols: usize, per_row: usize) -> Matrix<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(nrows * per_row);
    let mut indices = Vec::with_capacity(nrows * per_row);
    let mut indptr = Vec::with_capacity(nrows + 1);
    indptr.push(0);

    for _ in 0..nrows {
        let mut cols: Vec<usize> = (0..per_row).map(|_| rng.gen_range(0..ncols)).collect();
        cols.sort_unstable();
        cols.dedup();
        for col in cols {
            indices.push(col);
            data.push(rng.gen_range(1..100) as f32);
        }
        indptr.push(indices.len());
    }

    Matrix::Csr(CsrMatrix::try_new(nrows, ncols, data, indices, indptr).unwrap())
}

fn bench_chunk_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_iteration");
    let matrix = random_counts(20_000, 2_000, 50);

    for target in [1_000, 50_000, 1_000_000].iter() {
        let config = ChunkConfig::with_target_nnz(*target);
        group.bench_with_input(BenchmarkId::from_parameter(target), target, |b, _| {
            b.iter(|| {
                array_chunker(black_box(&matrix), &config)
                    .unwrap()
                    .map(|chunk| chunk.nnz())
                    .sum::<usize>()
            });
        });
    }

    group.finish();
}

fn bench_integrity(c: &mut Criterion) {
    let mut group = c.benchmark_group("nonnegative_integral");
    let matrix = random_counts(20_000, 2_000, 50);

    group.bench_function("sequential", |b| {
        b.iter(|| is_nonnegative_integral(black_box(&matrix)))
    });
    group.bench_function("rayon", |b| {
        b.iter(|| par_is_nonnegative_integral(black_box(&matrix)))
    });

    group.finish();
}

criterion_group!(benches, bench_chunk_iteration, bench_integrity);
criterion_main!(benches);
