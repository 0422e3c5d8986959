//! Benchmarks for tercile-model ranking and portfolio construction.
#![allow(missing_docs)]

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use tercile_model::{CrossSectionalRanker, PortfolioBuilder, RankerConfig};
use tercile_primitives::{Period, ReturnObservation, SignalPanel, SignalRecord};

fn random_signals(n_firms: usize, n_periods: i32) -> SignalPanel {
    let mut rng = rand::thread_rng();
    let mut records = Vec::with_capacity(n_firms * n_periods as usize);
    for firm in 0..n_firms {
        for year in 2001..2001 + n_periods {
            records.push(SignalRecord {
                entity: format!("F{firm:05}").into(),
                period: Period(year),
                as_of: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default(),
                current_ratio: rng.r#gen::<f64>() * 4.0,
                sales_growth: rng.r#gen::<f64>() - 0.3,
            });
        }
    }
    SignalPanel::new(records)
}

fn random_returns(n_firms: usize, year: i32, n_days: u64) -> Vec<ReturnObservation> {
    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
    (0..n_days)
        .flat_map(|d| (0..n_firms).map(move |f| (d, f)))
        .map(|(d, f)| {
            ReturnObservation::new(
                format!("F{f:05}"),
                start + Days::new(d),
                rng.r#gen::<f64>() * 0.04 - 0.02,
            )
        })
        .collect()
}

fn bench_ranker(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_sectional_ranker");
    group.sample_size(30);

    for n_firms in [100, 1000, 3000] {
        let signals = random_signals(n_firms, 20);
        group.throughput(Throughput::Elements(signals.len() as u64));

        for parallel in [false, true] {
            let ranker = CrossSectionalRanker::with_config(RankerConfig {
                parallel,
                ..Default::default()
            });
            let mode = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(mode, n_firms), &signals, |b, signals| {
                b.iter(|| black_box(ranker.rank(black_box(signals))))
            });
        }
    }

    group.finish();
}

fn bench_portfolio_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_build");
    group.sample_size(20);

    for n_firms in [100, 1000] {
        let signals = random_signals(n_firms, 1);
        let Ok((ranked, _)) = CrossSectionalRanker::new().rank(&signals) else {
            continue;
        };
        let returns = random_returns(n_firms, 2001, 252);
        group.throughput(Throughput::Elements(returns.len() as u64));

        group.bench_with_input(BenchmarkId::new("one_year", n_firms), &returns, |b, returns| {
            let builder = PortfolioBuilder::new();
            b.iter(|| black_box(builder.build(black_box(&ranked), black_box(returns))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ranker, bench_portfolio_build);
criterion_main!(benches);
