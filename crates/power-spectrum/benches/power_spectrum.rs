use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use power_spectrum::{FeatureParams, PowerSpectrum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_target(true)
        .finish();
    // Criterion calls every bench function in the same process
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// `seconds` of a 440 Hz tone at 16 kHz
fn tone(seconds: usize) -> Vec<f32> {
    (0..16000 * seconds)
        .map(|i| (0.3 * (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 16000.0).sin()) as f32)
        .collect()
}

fn bench_apply(c: &mut Criterion) {
    init_logging();
    let engine = PowerSpectrum::new(FeatureParams::htk()).expect("valid params");
    let signal = tone(1);

    c.bench_function("apply_1s_htk", |b| {
        b.iter(|| engine.apply(black_box(&signal)).expect("apply"))
    });
}

fn bench_batch_apply(c: &mut Criterion) {
    init_logging();
    let engine = PowerSpectrum::new(FeatureParams::htk()).expect("valid params");
    let mut group = c.benchmark_group("batch_apply_1s");

    for batch_size in [1usize, 4, 16] {
        let input = tone(batch_size);
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &input, |b, input| {
            b.iter(|| engine.batch_apply(black_box(input), batch_size).expect("batch_apply"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_apply, bench_batch_apply);
criterion_main!(benches);
