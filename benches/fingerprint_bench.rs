//! Per-stage and end-to-end fingerprinting throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use audio_detective::fingerprinting::{
    extract_subfingerprint, FrameBuffer, PitchBinner, SpectralAnalyzer,
};
use audio_detective::sample_source::SliceSampleSource;
use audio_detective::{Detective, DetectiveConfig};

fn sine_wave(seconds: f32, frequency: f32, sample_rate: f32) -> Vec<f32> {
    let count = (seconds * sample_rate) as usize;
    (0..count)
        .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate).sin())
        .collect()
}

fn bench_spectral_and_binning(c: &mut Criterion) {
    let config = DetectiveConfig::default();
    let mut analyzer = SpectralAnalyzer::new(config.window_size);
    let binner = PitchBinner::new(
        config.window_size,
        config.processing_sample_rate,
        config.pitch_steps,
    );
    let frame = sine_wave(
        config.window_size as f32 / config.processing_sample_rate as f32,
        1000.0,
        config.processing_sample_rate as f32,
    );

    c.bench_function("spectral_analyze_and_bin", |b| {
        b.iter(|| {
            let magnitudes = analyzer.analyze(black_box(&frame));
            let row = binner.bin(&magnitudes);
            black_box(row);
        });
    });
}

fn bench_haar_decomposition(c: &mut Criterion) {
    let config = DetectiveConfig::default();
    let rows: Vec<Vec<f32>> = (0..config.subfingerprint_length)
        .map(|r| {
            (0..config.pitch_steps)
                .map(|p| ((r * config.pitch_steps + p) as f32).sin())
                .collect()
        })
        .collect();

    c.bench_function("haar_decompose", |b| {
        b.iter(|| {
            let mut frame = FrameBuffer::new(config.subfingerprint_length, config.pitch_steps);
            for row in &rows {
                frame.push_row(row);
            }
            frame.decompose();
            black_box(frame.coefficients().len());
        });
    });
}

fn bench_top_k_extraction(c: &mut Criterion) {
    let config = DetectiveConfig::default();
    let coefficients: Vec<f32> = (0..config.frame_cells())
        .map(|i| ((i as f32) * 0.37).sin() * 10.0)
        .collect();

    c.bench_function("extract_subfingerprint", |b| {
        b.iter(|| {
            black_box(extract_subfingerprint(
                black_box(&coefficients),
                config.top_wavelets,
            ));
        });
    });
}

fn bench_end_to_end_fingerprinting(c: &mut Criterion) {
    let config = DetectiveConfig::default();
    let samples = sine_wave(12.0, 1000.0, config.processing_sample_rate as f32);

    c.bench_function("fingerprint_12s_of_audio", |b| {
        b.iter(|| {
            let mut detective = Detective::with_config(config.clone()).unwrap();
            let mut source = SliceSampleSource::new(&samples, config.processing_sample_rate);
            let fingerprint = detective.process_bounded(&mut source).unwrap();
            black_box(fingerprint.count());
        });
    });
}

criterion_group!(
    benches,
    bench_spectral_and_binning,
    bench_haar_decomposition,
    bench_top_k_extraction,
    bench_end_to_end_fingerprinting
);
criterion_main!(benches);
