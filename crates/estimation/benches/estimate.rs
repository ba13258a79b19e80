use criterion::{black_box, criterion_group, criterion_main, Criterion};
use estimation::{
    EstimationMethod, Estimator, InputValue, KalmanFilter, MovingAverage, MovingMedian,
};

fn warmed_up(mut estimator: Estimator) -> Estimator {
    for i in 0..64 {
        estimator.estimate(InputValue::new(i as f64, 0.01));
    }
    estimator
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut iir = MovingAverage::with_window_size(16).unwrap();
    iir.set_weighting_coefficients_out(&[1.0; 15]).unwrap();

    let cases: Vec<(&str, Estimator)> = vec![
        ("moving_average_fir_16", MovingAverage::with_window_size(16).unwrap().into()),
        ("moving_average_iir_16", iir.into()),
        ("moving_median_15", MovingMedian::with_window_size(15).unwrap().into()),
        ("kalman", KalmanFilter::new().into()),
    ];

    for (name, estimator) in cases {
        let mut estimator = warmed_up(estimator);
        let mut x = 0.0;
        c.bench_function(name, |b| {
            b.iter(|| {
                x += 1.0;
                black_box(estimator.estimate(black_box(InputValue::new(x, 0.01))))
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
