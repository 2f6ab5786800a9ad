use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use housing_eda::datasets::DatasetBase;
use housing_eda::estimators::{Lasso, LinearRegression, Ridge};
use housing_eda::helpers::helpers::compute_alpha_max;
use housing_eda::helpers::test_helpers::{generate_linear_housing_data, generate_random_data};
use housing_eda::traits::Fit;

fn bench_lasso(c: &mut Criterion) {
    let mut group = c.benchmark_group("lasso");
    group.sample_size(10);

    for n_samples in [10, 100] {
        for n_features in [100, 1000] {
            for reg in [0.1, 0.01, 0.005] {
                let (x, y) = generate_random_data(n_samples, n_features);

                let alpha_max = compute_alpha_max(x.view(), y.view());
                let alpha = alpha_max * reg;
                let dataset = DatasetBase::from((x, y));

                let clf = Lasso::params().alpha(alpha).verbose(false);
                let config = (n_samples, n_features, reg);
                let config_string = format!("{}, {}, {}", n_samples, n_features, reg);

                group.bench_with_input(
                    BenchmarkId::new("coordinate_descent", config_string),
                    &config,
                    |b, _| b.iter(|| clf.fit(&dataset).unwrap()),
                );
            }
        }
    }

    group.finish();
}

fn bench_housing_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("housing");

    let (x, y) = generate_linear_housing_data(404);
    let dataset = DatasetBase::from((x, y));

    group.bench_function("linear_regression", |b| {
        b.iter(|| LinearRegression::params().fit(&dataset).unwrap())
    });
    group.bench_function("ridge", |b| {
        b.iter(|| Ridge::params().alpha(1.).fit(&dataset).unwrap())
    });
    group.bench_function("lasso", |b| {
        b.iter(|| Lasso::params().alpha(0.1).fit(&dataset).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_lasso, bench_housing_models);
criterion_main!(benches);
