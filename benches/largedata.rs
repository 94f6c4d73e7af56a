use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kmmatching::{maximum_weight_matching, Weight, WeightMatrix};

fn random_matrix(n: usize, rng: &mut StdRng) -> WeightMatrix {
    let rows = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(0..100) as Weight).collect())
        .collect();
    WeightMatrix::from_rows(rows).expect("square by construction")
}

fn largedata_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("kuhn_munkres");
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[10usize, 50, 100] {
        let weights = random_matrix(n, &mut rng);
        group.bench_with_input(BenchmarkId::new("random", n), &weights, |b, w| {
            b.iter(|| maximum_weight_matching(black_box(w)))
        });
    }

    group.bench_function("all_zero_100", |b| {
        let weights = WeightMatrix::zeros(100);
        b.iter(|| maximum_weight_matching(black_box(&weights)))
    });

    group.finish();
}

criterion_group!(benches, largedata_benchmark);
criterion_main!(benches);
