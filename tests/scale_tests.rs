use qubitone::{map_value_to_frequency, midi_to_freq, note_name_to_midi, ScaleType};

#[test]
fn midi_to_freq_matches_a4_and_octaves() {
    assert!((midi_to_freq(69.0) - 440.0).abs() < 1e-3);
    assert!((midi_to_freq(81.0) - 880.0).abs() < 1e-2);
    assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-2);
}

#[test]
fn chromatic_boundaries_stay_in_reachable_range() {
    let root = midi_to_freq(60.0);
    // The octave offset spans -1..+1 around the root and the interval adds
    // up to 11 semitones, so the reachable range is [root/2, root*2^(23/12)].
    let lo = root / 2.0 - 0.5;
    let hi = root * 2f32.powf(23.0 / 12.0) + 0.5;

    for value in [0.0, 0.999_999] {
        let freq = map_value_to_frequency(value, ScaleType::Chromatic, 60.0, 2.0);
        assert!(freq > 0.0, "non-positive frequency at value {}", value);
        assert!(
            (lo..=hi).contains(&freq),
            "frequency {} outside [{}, {}] at value {}",
            freq,
            lo,
            hi,
            value
        );
    }

    // value 0 lands exactly one octave below the root.
    let at_zero = map_value_to_frequency(0.0, ScaleType::Chromatic, 60.0, 2.0);
    assert!((at_zero - root / 2.0).abs() < 1e-2);
}

#[test]
fn standard_scales_snap_to_their_interval_tables() {
    // Middle third of the value range keeps the octave offset at zero.
    let freq = map_value_to_frequency(0.4, ScaleType::MajorPentatonic, 60.0, 2.0);
    // index = floor(0.4 * 5) = 2 -> interval 4 semitones.
    assert!((freq - midi_to_freq(64.0)).abs() < 1e-2);

    let freq = map_value_to_frequency(0.5, ScaleType::WholeTone, 60.0, 2.0);
    // index = floor(0.5 * 6) = 3 -> interval 6 semitones.
    assert!((freq - midi_to_freq(66.0)).abs() < 1e-2);
}

#[test]
fn microtonal_octave_segmented_spans_one_octave_above_root() {
    let root = midi_to_freq(60.0);
    let low = map_value_to_frequency(0.0, ScaleType::MicrotonalOctaveSegmented, 60.0, 2.0);
    assert!((low - root).abs() < 1e-2);

    let mid = map_value_to_frequency(0.5, ScaleType::MicrotonalOctaveSegmented, 60.0, 2.0);
    // Half the octave: 6 semitones up, continuous (not snapped).
    assert!((mid - midi_to_freq(66.0)).abs() < 1e-2);

    let near_top = map_value_to_frequency(0.999, ScaleType::MicrotonalOctaveSegmented, 60.0, 2.0);
    assert!(near_top > root && near_top < root * 2.0);
}

#[test]
fn microtonal_full_range_spans_octave_range_symmetrically() {
    let root = midi_to_freq(60.0);
    let center = map_value_to_frequency(0.5, ScaleType::MicrotonalFullRange, 60.0, 2.0);
    assert!((center - root).abs() < 1e-2);

    let bottom = map_value_to_frequency(0.0, ScaleType::MicrotonalFullRange, 60.0, 2.0);
    let top = map_value_to_frequency(1.0, ScaleType::MicrotonalFullRange, 60.0, 2.0);
    // ±1 octave for octave_range = 2.
    assert!((bottom - root / 2.0).abs() < 1e-2);
    assert!((top - root * 2.0).abs() < 1e-1);
}

#[test]
fn mapping_always_returns_positive_frequency() {
    let scales = [
        ScaleType::Chromatic,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::WholeTone,
        ScaleType::MicrotonalOctaveSegmented,
        ScaleType::MicrotonalFullRange,
    ];
    for scale in scales {
        for step in 0..=20 {
            let value = step as f32 / 20.0;
            let freq = map_value_to_frequency(value, scale, 48.0, 2.0);
            assert!(freq > 0.0 && freq.is_finite(), "{:?} at {}", scale, value);
        }
    }
}

#[test]
fn note_names_parse_to_midi() {
    assert_eq!(note_name_to_midi("C3"), Some(48));
    assert_eq!(note_name_to_midi("A4"), Some(69));
    assert_eq!(note_name_to_midi("FS2"), Some(42));
    assert_eq!(note_name_to_midi("Bb3"), Some(58));
    assert_eq!(note_name_to_midi("H2"), None);
    assert_eq!(note_name_to_midi(""), None);
}
