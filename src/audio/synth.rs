use std::f32::consts::PI;

use rand::Rng;

use super::params::{AdvancedSettings, AmplitudeProfile, HarmonicMapping, Waveform};
use super::qpixl::PixelField;

/// Closed-form oscillator sample at absolute time `t` seconds.
///
/// These are the time-indexed forms (not phase accumulators) so a sample
/// is a pure function of (waveform, frequency, time) — the renderer relies
/// on that for bit-identical re-renders. `QuantumNoise` is handled
/// separately because it draws from a random source.
pub fn waveform_sample(waveform: Waveform, freq: f32, t: f32) -> f32 {
    let ft = freq * t;
    match waveform {
        Waveform::Sine => (2.0 * PI * ft).sin(),
        Waveform::Square => (2.0 * PI * ft).sin().signum(),
        Waveform::Triangle => 2.0 * (2.0 * (ft - (ft + 0.5).floor())).abs() - 1.0,
        Waveform::Sawtooth => 2.0 * (ft - ft.floor()),
        // Callers route QuantumNoise through quantum_noise_sample.
        Waveform::QuantumNoise => (2.0 * PI * ft).sin(),
    }
}

/// Quantum-noise oscillator: a sine carrier blended with uniform noise,
/// weighted by the normalized superposition and entanglement factors.
/// Non-reproducible by design.
pub fn quantum_noise_sample<R: Rng>(
    freq: f32,
    t: f32,
    superposition: f32,
    entanglement: f32,
    rng: &mut R,
) -> f32 {
    let noise = rng.gen::<f32>() * 2.0 - 1.0;
    let carrier = (2.0 * PI * freq * t).sin();
    carrier * (1.0 - superposition) + noise * superposition * entanglement
}

/// Additive synthesis: sum `num_partials` harmonics of the base frequency,
/// each modulated by a pixel drawn from the field at `(sample_index * h)`,
/// normalized by `1/sqrt(H)`. Zero partials yields silence rather than a
/// divide-by-zero.
pub fn additive_sample(
    freq: f32,
    t: f32,
    sample_index: usize,
    settings: &AdvancedSettings,
    field: &PixelField,
) -> f32 {
    let partials = settings.num_partials as usize;
    if partials == 0 {
        return 0.0;
    }

    let mut sum = 0.0f32;
    for h in 1..=partials {
        let pixel = field.pixel(sample_index.wrapping_mul(h));
        let hf = h as f32;

        let mut amplitude = match settings.harmonic_amplitude_profile {
            AmplitudeProfile::Harmonic => 1.0 / hf,
            AmplitudeProfile::Flat => 1.0 / partials as f32,
            AmplitudeProfile::HarmonicSquared => 1.0 / (hf * hf),
            AmplitudeProfile::QpixlShaped => pixel / hf,
        };

        let mut partial_freq = freq * hf;
        let mut phase_offset = 0.0f32;

        match settings.harmonic_control_mapping {
            HarmonicMapping::Amplitudes => amplitude *= 0.5 + 0.5 * pixel,
            HarmonicMapping::Frequencies => {
                partial_freq *= 1.0 + (pixel - 0.5) * settings.harmonic_spread_factor * hf;
            }
            HarmonicMapping::Phases => phase_offset = pixel * 2.0 * PI,
        }

        sum += amplitude * (2.0 * PI * partial_freq * t + phase_offset).sin();
    }

    sum / (partials as f32).sqrt()
}
