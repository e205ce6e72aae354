use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ldpc_demo::ecc::{ChannelModel, ParityCheckMatrix, Session, SumProductEngine};

/// Banded matrix where check `c` covers variables `c..c + weight` (mod n)
fn banded_matrix(n_c: usize, n_v: usize, weight: usize) -> ParityCheckMatrix {
    let rows: Vec<Vec<bool>> = (0..n_c)
        .map(|c| (0..n_v).map(|v| (v + n_v - c % n_v) % n_v < weight).collect())
        .collect();
    ParityCheckMatrix::new(&rows).unwrap()
}

fn bench_reference(c: &mut Criterion) {
    let session = Session::reference().unwrap();
    let engine = SumProductEngine::new();

    c.bench_function("resolve_reference", |b| {
        b.iter(|| {
            engine
                .resolve(black_box(session.matrix()), black_box(session.channel()))
                .unwrap()
        })
    });
}

fn bench_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_banded");

    for &n_v in &[12, 48, 96] {
        let matrix = banded_matrix(n_v / 2, n_v, 4);
        let probabilities: Vec<f64> = (0..n_v).map(|v| 0.2 + 0.6 * (v % 2) as f64).collect();
        let channel = ChannelModel::from_probabilities(n_v, &probabilities).unwrap();
        let engine = SumProductEngine::new().with_iterations(8);

        group.bench_with_input(BenchmarkId::from_parameter(n_v), &n_v, |b, _| {
            b.iter(|| engine.resolve(black_box(&matrix), black_box(&channel)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reference, bench_sizes);
criterion_main!(benches);
