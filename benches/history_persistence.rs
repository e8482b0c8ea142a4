use std::hint::black_box;
use std::io::Write;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use line_history::{History, HistoryConfig};
use tempfile::TempDir;

/// Write a synthetic timestamped history file with N entries, about a quarter duplicates
fn generate_history_dir(num_entries: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    let mut file = std::fs::File::create(dir.path().join("history")).unwrap();

    for i in 0..num_entries {
        let millis = 1_700_000_000_000u64 + i as u64;
        let change = i % (num_entries * 3 / 4 + 1);
        writeln!(file, "{millis}:git commit -m 'change {change}'").unwrap();
    }

    file.flush().unwrap();
    dir
}

fn config(dir: &TempDir, size: usize) -> HistoryConfig {
    HistoryConfig { size, file_size: size, incremental: false, ..HistoryConfig::default() }
        .with_file(dir.path().join("history"))
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_history");

    for size in [100, 1_000, 10_000].iter() {
        let dir = generate_history_dir(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| History::open(black_box(config(&dir, size))).unwrap());
        });
    }

    group.finish();
}

fn bench_trim(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim_history");
    group.sample_size(10);

    for size in [100, 1_000, 5_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || generate_history_dir(size),
                |dir| {
                    let mut history = History::new(config(&dir, size));
                    history.trim(None, size / 2).unwrap();
                    dir
                },
                criterion::BatchSize::PerIteration,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_trim);
criterion_main!(benches);
