use qubitone::{
    compression_metrics, generate_pixel_field, simulate_probabilities, spectral_analysis,
    PixelField, SpectralMode,
};

const ALL_MODES: [SpectralMode; 4] = [
    SpectralMode::FreqQubits,
    SpectralMode::AmpPhase,
    SpectralMode::HarmEnt,
    SpectralMode::QpixlBi,
];

#[test]
fn pixel_values_bounded_for_all_modes_and_coherences() {
    let dist = simulate_probabilities(4, 0.5, 0.75);
    for mode in ALL_MODES {
        for coherence in [0.0, 0.3, 0.7, 1.0] {
            let field = generate_pixel_field(&dist, 8, mode, coherence);
            assert_eq!(field.len(), 64);
            for &v in &field.values {
                assert!(
                    (0.0..=1.0).contains(&v),
                    "pixel {} out of range in {:?}",
                    v,
                    mode
                );
            }
        }
    }
}

#[test]
fn freq_qubits_field_is_reproducible() {
    let dist = simulate_probabilities(4, 0.5, 0.5);
    let a = generate_pixel_field(&dist, 4, SpectralMode::FreqQubits, 0.5);
    let b = generate_pixel_field(&dist, 4, SpectralMode::FreqQubits, 0.5);
    assert_eq!(a.values.len(), 16);
    assert_eq!(a.values, b.values);
    for &v in &a.values {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn empty_field_lookups_fall_back() {
    let field = PixelField::from_values(Vec::new());
    assert_eq!(field.pixel(0), 0.5);
    assert_eq!(field.pixel(1234), 0.5);
    assert_eq!(field.average(), 0.5);
}

#[test]
fn pixel_lookup_wraps() {
    let field = PixelField::from_values(vec![0.1, 0.2, 0.3, 0.4]);
    assert_eq!(field.pixel(0), 0.1);
    assert_eq!(field.pixel(5), 0.2);
}

#[test]
fn spectral_analysis_covers_one_octave_either_side() {
    let dist = simulate_probabilities(4, 0.4, 0.6);
    let field = generate_pixel_field(&dist, 8, SpectralMode::AmpPhase, 0.5);
    let analysis = spectral_analysis(&field);

    assert_eq!(analysis.frequencies.len(), 128);
    assert_eq!(analysis.amplitudes.len(), 128);
    assert!((analysis.frequencies[0] - 220.0).abs() < 0.01);
    assert!((analysis.frequencies[127] - 880.0).abs() < 0.01);
    // One ratio every 12th bin.
    assert_eq!(analysis.harmonic_ratios.len(), 11);
    for &a in &analysis.amplitudes {
        assert!((0.0..=1.0).contains(&a));
    }
    for &r in &analysis.harmonic_ratios {
        assert!(r.is_finite() && r >= 0.0);
    }
}

#[test]
fn coarser_quantization_never_raises_complexity() {
    let dist = simulate_probabilities(5, 0.6, 0.8);
    let field = generate_pixel_field(&dist, 8, SpectralMode::FreqQubits, 0.5);

    let fine = compression_metrics(&field, 0.0);
    let coarse = compression_metrics(&field, 0.9);

    assert!(fine.original_complexity >= 0.0);
    assert!(
        coarse.compressed_complexity <= fine.compressed_complexity + 1e-12,
        "coarse {} > fine {}",
        coarse.compressed_complexity,
        fine.compressed_complexity
    );
    // Two-level quantization puts every pixel at 0 or 1: zero entropy.
    assert!(coarse.compressed_complexity.abs() < 1e-12);
}

#[test]
fn compression_ratio_is_bounded_and_finite() {
    let dist = simulate_probabilities(4, 0.3, 0.9);
    let field = generate_pixel_field(&dist, 8, SpectralMode::HarmEnt, 0.2);
    for threshold in [0.0, 0.3, 0.6, 0.9] {
        let m = compression_metrics(&field, threshold);
        assert!(m.compression_ratio.is_finite());
        assert!(m.compression_ratio >= 0.0);
    }
}
