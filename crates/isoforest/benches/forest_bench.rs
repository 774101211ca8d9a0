//! 아이솔레이션 포레스트 벤치마크
//!
//! 학습과 점수화 처리량을 트리 수별로 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use isoprobe_core::frame::Frame;
use isoprobe_isoforest::{IsolationForestEstimator, IsolationForestParams};

/// 결정적 합성 프레임 (행 x 열)
fn synthetic_frame(rows: usize, cols: usize) -> Frame {
    let names = (0..cols).map(|c| format!("C{}", c + 1)).collect();
    let columns = (0..cols)
        .map(|c| {
            (0..rows)
                .map(|r| ((r * 31 + c * 17) % 97) as f64 / 97.0)
                .collect()
        })
        .collect();
    Frame::new(names, columns).unwrap()
}

fn estimator(ntrees: usize) -> IsolationForestEstimator {
    let params = IsolationForestParams::builder()
        .ntrees(ntrees)
        .seed(42)
        .build()
        .unwrap();
    IsolationForestEstimator::new(params)
}

fn bench_train(c: &mut Criterion) {
    let frame = synthetic_frame(1_000, 32);
    let mut group = c.benchmark_group("train");

    for ntrees in [7usize, 50, 200] {
        group.throughput(Throughput::Elements(ntrees as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ntrees), &ntrees, |b, &n| {
            let est = estimator(n);
            b.iter(|| est.fit(black_box(&frame)).unwrap())
        });
    }

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let train = synthetic_frame(1_000, 32);
    let model = estimator(50).fit(&train).unwrap();
    let mut group = c.benchmark_group("score");

    // ECG 스모크 테스트 크기
    let small = synthetic_frame(23, 32);
    group.throughput(Throughput::Elements(23));
    group.bench_function("rows_23", |b| {
        b.iter(|| model.score_frame(black_box(&small)).unwrap())
    });

    group.throughput(Throughput::Elements(10_000));
    let large = synthetic_frame(10_000, 32);
    group.bench_function("rows_10000", |b| {
        b.iter(|| model.score_frame(black_box(&large)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_train, bench_score);
criterion_main!(benches);
