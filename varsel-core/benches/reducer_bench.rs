#[macro_use]
extern crate criterion;

use std::time::Duration;

use criterion::Criterion;
use tokio::time::Instant;

use varsel_core::history::{AlertHistory, AlertRecord};
use varsel_core::status::{reduce, Severity};

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("status_reduce");

    for record_count in [1usize, 64, 1024] {
        group.throughput(criterion::Throughput::Elements(record_count as u64));
        group.bench_function(format!("records_{}", record_count), |b| {
            let base = Instant::now();
            let mut history = AlertHistory::new();
            for i in 0..record_count {
                let severity = if i % 3 == 0 { Severity::Critical } else { Severity::Warning };
                history.record_push(AlertRecord::new(
                    base + Duration::from_secs(i as u64 + 1),
                    severity,
                    format!("record {i}"),
                ));
            }
            b.iter(|| {
                reduce(&history, false, Severity::Unknown, Duration::from_secs(60), None)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
