use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pvstack::assemble::decode_record;
use pvstack::batch::{write_documents, BatchOptions};
use pvstack::config::TranscoderConfig;
use pvstack::encode::encode_record;
use pvstack::table::{split, split_frame, Delimiter, LabelIndex, PaddingPolicy};
use tempfile::TempDir;

/// Generate a synthetic device column with `positions` layer positions,
/// each holding `sublayers` sublayers of three deposition steps
fn generate_device(positions: usize, sublayers: usize) -> LabelIndex {
    let mut rows: Vec<(String, String)> = vec![
        ("Ref. DOI number".to_string(), "10.1000/bench".to_string()),
        ("Cell. Architecture".to_string(), "nip".to_string()),
    ];

    let repeat = |cell: &str| vec![cell; sublayers].join(" | ");
    for position in 1..=positions {
        let prefix = format!("Layer {}", position);
        let names: Vec<String> = (0..sublayers).map(|i| format!("M{}x{}", position, i)).collect();
        let fields = [
            ("Layer exists", "true".to_string()),
            ("Name", names.join(" | ")),
            ("Thickness [nm]", repeat("120")),
            ("Deposition. Procedure", repeat("Spin-coating >> Evaporation >> CBD")),
            ("Deposition. Solvents", repeat("DMF; DMSO >> Unknown >> Water")),
            ("Deposition. Solvents. Mixing ratios", repeat("4; 1 >> Unknown >> 1")),
            (
                "Deposition. Reaction solutions. Compounds",
                repeat("PbI2; MAI >> Unknown >> CdSO4"),
            ),
            (
                "Deposition. Reaction solutions. Concentrations",
                repeat("1.2 M; 10 mg/ml >> Unknown >> 0.1 M"),
            ),
            ("Deposition. Rate [nm/s]", repeat("Unknown >> 0.5 >> Unknown")),
            ("Thermal annealing. Temperature [°C]", repeat("100 >> Unknown >> 80")),
            ("Thermal annealing. Time [min]", repeat("10 >> Unknown >> 30")),
        ];
        for (field, value) in fields {
            rows.push((format!("{}. {}", prefix, field), value));
        }
    }

    rows.push(("Measurements. JV. Scan direction".to_string(), "Reverse | Forward".to_string()));
    rows.push(("Measurements. JV. Voc [V]".to_string(), "1.1 | 1.05".to_string()));
    LabelIndex::from_rows(rows)
}

/// Benchmark decoding one record column into the nested model
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_record");
    let config = TranscoderConfig::default();

    for (positions, sublayers) in [(4, 1), (8, 2), (16, 3)] {
        let device = generate_device(positions, sublayers);
        group.throughput(Throughput::Elements((positions * sublayers) as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}pos_{}sub", positions, sublayers)),
            &device,
            |b, device| b.iter(|| decode_record("bench", black_box(device), &config)),
        );
    }

    group.finish();
}

/// Benchmark encoding a decoded record back to flat rows
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_record");
    let config = TranscoderConfig::default();

    for (positions, sublayers) in [(4, 1), (8, 2), (16, 3)] {
        let record = decode_record("bench", &generate_device(positions, sublayers), &config);
        group.throughput(Throughput::Elements(record.layers.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}pos_{}sub", positions, sublayers)),
            &record,
            |b, record| b.iter(|| encode_record(black_box(record), &config)),
        );
    }

    group.finish();
}

/// Benchmark the tiered split of one layer scope
fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for sublayers in [1, 4, 16] {
        let scope = generate_device(1, sublayers).scoped("Layer 1");
        group.throughput(Throughput::Elements(scope.len() as u64));

        for policy in [PaddingPolicy::RepeatLast, PaddingPolicy::FillUnknown] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), sublayers),
                &scope,
                |b, scope| {
                    b.iter(|| {
                        let layers = split(black_box(scope), Delimiter::Layer, policy);
                        split_frame(&layers, Delimiter::Step, policy)
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark writing record documents to a directory
fn bench_write_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_documents");
    let config = TranscoderConfig::default();

    for count in [10, 100] {
        let records: Vec<_> = (0..count)
            .map(|i| decode_record(&format!("dev-{}", i), &generate_device(6, 1), &config))
            .collect();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter_batched(
                || TempDir::new().unwrap(),
                |temp_dir| {
                    let report =
                        write_documents(records, None, temp_dir.path(), BatchOptions::default());
                    assert!(!report.has_failures());
                    temp_dir
                },
                criterion::BatchSize::PerIteration,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_split, bench_write_documents);
criterion_main!(benches);
