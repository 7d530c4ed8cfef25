use audio_detective::{Detective, DetectiveConfig, DetectiveState, Fingerprint};

use audio_detective::sample_source::SliceSampleSource;

fn sine_wave(seconds: f32, frequency: f32, sample_rate: f32) -> Vec<f32> {
    let count = (seconds * sample_rate) as usize;
    (0..count)
        .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate).sin())
        .collect()
}

/// E1: 4096 samples of silence at the default config yield zero
/// subfingerprints (insufficient rows to fill a frame).
#[test]
fn e1_silence_yields_no_subfingerprints() {
    let config = DetectiveConfig::default();
    let samples = vec![0.0f32; 4096];
    let mut source = SliceSampleSource::new(&samples, config.processing_sample_rate);
    let mut detective = Detective::with_config(config).unwrap();

    let fingerprint = detective.process_bounded(&mut source).unwrap();
    assert_eq!(fingerprint.count(), 0);
    assert!(detective.last_exhausted());
}

/// E2: 16s of a 1kHz sine produces at least one subfingerprint, is
/// self-similar, and is dissimilar from silence.
#[test]
fn e2_sine_tone_self_similarity_and_silence_contrast() {
    let config = DetectiveConfig::default();
    let sample_rate = config.processing_sample_rate as f32;
    let tone = sine_wave(16.0, 1000.0, sample_rate);
    let silence = vec![0.0f32; tone.len()];

    let mut detective_a = Detective::with_config(config.clone()).unwrap();
    let mut source_a = SliceSampleSource::new(&tone, config.processing_sample_rate);
    let fingerprint_a = detective_a.process_bounded(&mut source_a).unwrap();
    assert!(fingerprint_a.count() >= 1);

    let mut detective_b = Detective::with_config(config.clone()).unwrap();
    let mut source_b = SliceSampleSource::new(&tone, config.processing_sample_rate);
    let fingerprint_b = detective_b.process_bounded(&mut source_b).unwrap();

    let self_similarity = Fingerprint::fingerprint_similarity(
        &fingerprint_a,
        &fingerprint_b,
        config.subfingerprint_bits(),
    )
    .unwrap();
    assert!((self_similarity - 1.0).abs() < 1e-6);

    let mut detective_c = Detective::with_config(config.clone()).unwrap();
    let mut source_c = SliceSampleSource::new(&silence, config.processing_sample_rate);
    let fingerprint_c = detective_c.process_bounded(&mut source_c).unwrap();

    let silence_similarity = Fingerprint::fingerprint_similarity(
        &fingerprint_a,
        &fingerprint_c,
        config.subfingerprint_bits(),
    )
    .unwrap();
    assert!(silence_similarity <= 0.6);
}

/// E3: the same signal concatenated with itself produces a fingerprint
/// whose first half matches its second half closely, bitwise.
#[test]
fn e3_repeated_signal_halves_match() {
    let config = DetectiveConfig::default();
    let sample_rate = config.processing_sample_rate as f32;
    let tone = sine_wave(16.0, 1000.0, sample_rate);
    let mut doubled = tone.clone();
    doubled.extend_from_slice(&tone);

    let mut detective = Detective::with_config(config.clone()).unwrap();
    let mut source = SliceSampleSource::new(&doubled, config.processing_sample_rate);
    let fingerprint = detective.process_bounded(&mut source).unwrap();

    assert!(fingerprint.count() >= 2);
    let half = fingerprint.count() / 2;
    let similarity = Fingerprint::subfingerprint_similarity(
        fingerprint.at(0),
        fingerprint.at(half),
        config.subfingerprint_bits(),
    )
    .unwrap();
    assert!(similarity >= 0.95);
}

/// E4: scaling a signal's amplitude does not change the relative wavelet
/// ranking, so the fingerprints are identical.
#[test]
fn e4_amplitude_scaling_preserves_fingerprint() {
    let config = DetectiveConfig::default();
    let sample_rate = config.processing_sample_rate as f32;
    let tone = sine_wave(16.0, 1000.0, sample_rate);
    let scaled: Vec<f32> = tone.iter().map(|&s| s * 0.5).collect();

    let mut detective_a = Detective::with_config(config.clone()).unwrap();
    let mut source_a = SliceSampleSource::new(&tone, config.processing_sample_rate);
    let fingerprint_a = detective_a.process_bounded(&mut source_a).unwrap();

    let mut detective_b = Detective::with_config(config.clone()).unwrap();
    let mut source_b = SliceSampleSource::new(&scaled, config.processing_sample_rate);
    let fingerprint_b = detective_b.process_bounded(&mut source_b).unwrap();

    assert!(fingerprint_a.equals(&fingerprint_b));
}

/// E6: two distinct pure tones are not similar above a loose threshold.
#[test]
fn e6_distinct_tones_are_dissimilar() {
    let config = DetectiveConfig::default();
    let sample_rate = config.processing_sample_rate as f32;
    let low = sine_wave(8.0, 1000.0, sample_rate);
    let high = sine_wave(8.0, 1500.0, sample_rate);

    let mut detective_a = Detective::with_config(config.clone()).unwrap();
    let mut source_a = SliceSampleSource::new(&low, config.processing_sample_rate);
    let fingerprint_a = detective_a.process_bounded(&mut source_a).unwrap();

    let mut detective_b = Detective::with_config(config.clone()).unwrap();
    let mut source_b = SliceSampleSource::new(&high, config.processing_sample_rate);
    let fingerprint_b = detective_b.process_bounded(&mut source_b).unwrap();

    let similarity = Fingerprint::fingerprint_similarity(
        &fingerprint_a,
        &fingerprint_b,
        config.subfingerprint_bits(),
    )
    .unwrap();
    assert!(similarity < 0.8);
}

#[test]
fn detective_state_machine_transitions() {
    let mut detective = Detective::new();
    assert_eq!(detective.state(), DetectiveState::Idle);

    detective.start();
    assert_eq!(detective.state(), DetectiveState::Running);

    detective.pause();
    assert_eq!(detective.state(), DetectiveState::Paused);

    detective.resume();
    assert_eq!(detective.state(), DetectiveState::Running);

    detective.stop();
    assert_eq!(detective.state(), DetectiveState::Stopped);

    detective.reset();
    assert_eq!(detective.state(), DetectiveState::Idle);
}

#[test]
fn configuration_mutation_allowed_only_while_idle() {
    let mut detective = Detective::new();
    assert!(detective
        .set_config(DetectiveConfig::default().with_window_size(2048))
        .is_ok());

    detective.start();
    assert!(detective
        .set_config(DetectiveConfig::default().with_window_size(4096))
        .is_err());
}

#[test]
fn compare_convenience_matches_manual_fingerprinting() {
    let config = DetectiveConfig::default();
    let sample_rate = config.processing_sample_rate as f32;
    let tone = sine_wave(16.0, 1000.0, sample_rate);

    let mut source_a = SliceSampleSource::new(&tone, config.processing_sample_rate);
    let mut source_b = SliceSampleSource::new(&tone, config.processing_sample_rate);

    let similarity =
        Detective::compare(&config, &mut source_a, &mut source_b, config.subfingerprint_bits())
            .unwrap();
    assert!((similarity - 1.0).abs() < 1e-6);
}
