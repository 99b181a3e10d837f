use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rankcount::{count_ranks_with, RankConfig, RankMethod, SampleMatrix};

fn random_samples(n_alt: usize, n_iter: usize, seed: u64) -> SampleMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..n_alt * n_iter).map(|_| rng.gen::<f64>()).collect();
    SampleMatrix::from_column_major(n_alt, n_iter, data).expect("matrix shape")
}

fn bench_rank_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_count");
    group.sample_size(20);

    for &n_alt in &[4usize, 12, 32] {
        let samples = random_samples(n_alt, 20_000, 42);
        for method in [RankMethod::Quadratic, RankMethod::Sorted] {
            let config = RankConfig::new().method(method);
            group.bench_function(format!("{method}_{n_alt}"), |b| {
                b.iter(|| count_ranks_with::<u64>(black_box(&samples), &config))
            });
        }
        let parallel = RankConfig::new().parallel(true).chunk_size(2_048);
        group.bench_function(format!("parallel_{n_alt}"), |b| {
            b.iter(|| count_ranks_with::<u64>(black_box(&samples), &parallel))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rank_count);
criterion_main!(benches);
