use rand::Rng;

use super::params::{AdvancedSettings, NoteSelection, SynthesisParams, Waveform};
use super::qpixl::{
    compression_metrics, generate_pixel_field, spectral_analysis, CompressionMetrics, PixelField,
    SpectralAnalysis,
};
use super::quantum::{circuit_summary, simulate_probabilities, CircuitSummary, ProbabilityDistribution};
use super::scale::map_value_to_frequency;
use super::spectral::{modulate, SpectralConfig};
use super::synth::{additive_sample, quantum_noise_sample, waveform_sample};

/// Fixed render length in seconds.
pub const RENDER_DURATION_SECS: f32 = 4.0;

const ATTACK_SECS: f32 = 0.1;
const RELEASE_SECS: f32 = 0.3;
/// Headroom applied to every sample before the final clamp.
const HEADROOM: f32 = 0.5;

/// Planar multi-channel PCM buffer, all samples in [-1,1].
#[derive(Debug, Clone)]
pub struct RenderedBuffer {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl RenderedBuffer {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples_per_channel() as f32 / self.sample_rate as f32
    }

    /// Frame-interleaved copy for playback and WAV export.
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.samples_per_channel();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for i in 0..frames {
            for ch in &self.channels {
                out.push(ch[i]);
            }
        }
        out
    }
}

/// Everything a render produces: the buffer plus the intermediate
/// artifacts the visualization panels consume.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub buffer: RenderedBuffer,
    pub probabilities: ProbabilityDistribution,
    pub pixel_field: PixelField,
    pub circuit: CircuitSummary,
    pub spectral_analysis: Option<SpectralAnalysis>,
    pub compression_metrics: Option<CompressionMetrics>,
}

fn envelope(t: f32, duration: f32) -> f32 {
    if t < ATTACK_SECS {
        t / ATTACK_SECS
    } else if t > duration - RELEASE_SECS {
        ((duration - t) / RELEASE_SECS).max(0.0)
    } else {
        1.0
    }
}

/// Pick the scalar that drives scale-mapped note selection. One value per
/// render: the buffer holds a single sustained note.
fn select_note_value<R: Rng>(
    field: &PixelField,
    method: NoteSelection,
    rng: &mut R,
) -> f32 {
    match method {
        NoteSelection::First => field.pixel(0),
        NoteSelection::Average => field.average(),
        NoteSelection::Random => {
            if field.is_empty() {
                field.pixel(0)
            } else {
                field.pixel(rng.gen_range(0..field.len()))
            }
        }
    }
}

/// Render a complete buffer from the parameter set.
///
/// Fresh zeroed per-channel filter state; see `render_with_filter_state`
/// for threading IIR continuity across renders.
pub fn render_audio_buffer<R: Rng>(
    params: &SynthesisParams,
    advanced: &AdvancedSettings,
    external_field: Option<&PixelField>,
    sample_rate: u32,
    rng: &mut R,
) -> RenderOutput {
    let channels = if params.stereo { 2 } else { 1 };
    let mut filter_state = vec![0.0f32; channels];
    render_with_filter_state(params, advanced, external_field, sample_rate, rng, &mut filter_state)
}

/// Render with caller-owned IIR filter memory, one cell per channel.
/// Passing the state back in on the next call carries the smoothing
/// filter's tail across otherwise independent renders.
pub fn render_with_filter_state<R: Rng>(
    params: &SynthesisParams,
    advanced: &AdvancedSettings,
    external_field: Option<&PixelField>,
    sample_rate: u32,
    rng: &mut R,
    filter_state: &mut [f32],
) -> RenderOutput {
    let entanglement = params.entanglement / 100.0;
    let superposition = params.superposition / 100.0;
    let coherence = params.temporal_coherence / 100.0;
    let filter_k = params.quantum_filter / 100.0;
    let threshold = params.compression_threshold / 100.0;

    let probabilities = simulate_probabilities(
        params.qubits,
        entanglement as f64,
        superposition as f64,
    );

    // An externally supplied (cached) field skips generation entirely.
    let pixel_field = match external_field {
        Some(field) => field.clone(),
        None => generate_pixel_field(
            &probabilities,
            params.pixel_dimensions(),
            params.spectral_mapping,
            coherence,
        ),
    };

    let base_freq = if advanced.enable_musical_scale {
        let value = select_note_value(&pixel_field, advanced.qpixl_note_selection, rng);
        map_value_to_frequency(
            value,
            advanced.scale_type,
            advanced.root_note,
            advanced.microtonal_octave_range,
        )
    } else {
        220.0 + params.superposition * 2.0
    };

    let spectral_config = SpectralConfig {
        mode: params.spectral_mapping,
        coherence,
        harmony: params.quantum_harmony,
        threshold,
    };

    let total_samples = (RENDER_DURATION_SECS * sample_rate as f32) as usize;
    let channel_count = if params.stereo { 2 } else { 1 };
    let mut buffers: Vec<Vec<f32>> = Vec::with_capacity(channel_count);

    // Channels render in strict left-to-right order: the right channel's
    // entanglement coupling reads the finished left channel.
    for channel in 0..channel_count {
        let mut data = vec![0.0f32; total_samples];
        let mut prev = filter_state.get(channel).copied().unwrap_or(0.0);

        for i in 0..total_samples {
            let t = i as f32 / sample_rate as f32;

            let mut sample = if advanced.enable_additive {
                additive_sample(base_freq, t, i, advanced, &pixel_field)
            } else {
                let raw = match params.waveform {
                    Waveform::QuantumNoise => quantum_noise_sample(
                        base_freq,
                        t,
                        superposition,
                        entanglement,
                        rng,
                    ),
                    w => waveform_sample(w, base_freq, t),
                };
                // Spectral modulation only applies to the non-additive
                // path; the two synthesis routes are mutually exclusive.
                if params.qpixl_integration {
                    let position = i as f32 / total_samples as f32;
                    modulate(raw, base_freq, t, position, &pixel_field, &spectral_config)
                } else {
                    raw
                }
            };

            // Single-pole IIR smoothing, one memory cell per channel.
            if filter_k > 0.0 {
                sample = sample * (1.0 - filter_k) + prev * filter_k;
                prev = sample;
            }

            // Right channel drifts toward the left channel's previous
            // output when entanglement is active.
            if channel == 1 && entanglement > 0.0 && i > 0 {
                let coupling = entanglement / 2.0;
                sample = sample * (1.0 - coupling) + buffers[0][i - 1] * coupling;
            }

            let scaled =
                sample * envelope(t, RENDER_DURATION_SECS) * HEADROOM * advanced.master_volume;
            data[i] = scaled.clamp(-1.0, 1.0);
        }

        if let Some(cell) = filter_state.get_mut(channel) {
            *cell = prev;
        }
        buffers.push(data);
    }

    let (spectral, compression) = if params.qpixl_integration {
        (
            Some(spectral_analysis(&pixel_field)),
            Some(compression_metrics(&pixel_field, threshold)),
        )
    } else {
        (None, None)
    };

    RenderOutput {
        buffer: RenderedBuffer {
            sample_rate,
            channels: buffers,
        },
        probabilities,
        pixel_field,
        circuit: circuit_summary(params),
        spectral_analysis: spectral,
        compression_metrics: compression,
    }
}
