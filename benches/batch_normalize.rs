use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use lead_normalizer::{BatchOptions, batch, fields::canonical_matcher};
use tempfile::TempDir;

fn generate_exports(files: usize, rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    for file_idx in 0..files {
        let path = temp_dir.path().join(format!("export_{file_idx:02}.csv"));
        let mut file = File::create(&path).expect("create csv");
        writeln!(
            file,
            "Contact Name,Mobile Phone,Business Phone,Company Name,State,Zip,Email,Notes"
        )
        .expect("header");
        for i in 0..rows {
            let state = match i % 4 {
                0 => "Florida",
                1 => "TX",
                2 => "Oregon",
                _ => "",
            };
            let business = if i % 3 == 0 {
                format!("\"555-{:03}-{:04}, 555-{:03}-{:04}\"", i % 1000, i % 10000, (i + 7) % 1000, (i + 3) % 10000)
            } else {
                String::new()
            };
            writeln!(
                file,
                "Lead {i} Person,1-555-{:03}-{:04},{business},Company {file_idx},{state},{:05}.0,lead{i}@example.test,note",
                i % 1000,
                i % 10000,
                (i * 7) % 100000
            )
            .expect("row");
        }
    }
    let dir = temp_dir.path().to_path_buf();
    (temp_dir, dir)
}

fn bench_normalize(c: &mut Criterion) {
    let (_guard, dir) = generate_exports(8, 2_000);
    let options = BatchOptions::default();
    let filtered = BatchOptions {
        state_filter: true,
        ..BatchOptions::default()
    };

    let mut group = c.benchmark_group("normalize_inputs");
    group.bench_function("8x2000", |b| {
        b.iter(|| batch::normalize_inputs(&dir, &options, canonical_matcher()).expect("normalize"))
    });
    group.bench_function("8x2000_state_filter", |b| {
        b.iter(|| batch::normalize_inputs(&dir, &filtered, canonical_matcher()).expect("normalize"))
    });
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
