use serde::Serialize;

use super::params::SpectralMode;
use super::quantum::ProbabilityDistribution;

/// Fallback pixel value used whenever a lookup hits an empty field.
pub const EMPTY_PIXEL: f32 = 0.5;

/// Square grid of scalars in [0,1] derived from a probability
/// distribution. Generated once per render and shared by every sample,
/// harmonic and channel.
#[derive(Debug, Clone, Serialize)]
pub struct PixelField {
    pub side: usize,
    pub values: Vec<f32>,
}

impl PixelField {
    pub fn from_values(values: Vec<f32>) -> Self {
        let side = (values.len() as f64).sqrt().floor() as usize;
        Self {
            side: side.min(16),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Wrapping lookup; empty fields yield `EMPTY_PIXEL`, never a panic.
    pub fn pixel(&self, index: usize) -> f32 {
        if self.values.is_empty() {
            return EMPTY_PIXEL;
        }
        self.values[index % self.values.len()]
    }

    pub fn average(&self) -> f32 {
        if self.values.is_empty() {
            return EMPTY_PIXEL;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }
}

/// Generate the pixel field from a distribution summary.
///
/// Every mode is a deterministic trigonometric interference pattern over
/// the normalized grid, keyed by the distribution's quantum seed and
/// normalized into [0,1] with `* 0.5 + 0.5`.
pub fn generate_pixel_field(
    distribution: &ProbabilityDistribution,
    side: usize,
    mode: SpectralMode,
    coherence: f32,
) -> PixelField {
    let seed = distribution.quantum_seed() as f32;
    let mut values = Vec::with_capacity(side * side);

    for y in 0..side {
        for x in 0..side {
            let nx = x as f32 / side as f32;
            let ny = y as f32 / side as f32;
            let v = match mode {
                SpectralMode::FreqQubits => {
                    // Triple-sine interference sum, weights totalling 1.
                    (nx * 5.0 + seed).sin() * 0.5
                        + (ny * 7.0 + seed * 1.3).sin() * 0.3
                        + ((nx + ny) * 11.0 + seed * 0.7).sin() * 0.2
                }
                SpectralMode::AmpPhase => (nx * 6.0 + seed).sin() * (ny * 4.0 + seed * 0.5).cos(),
                SpectralMode::HarmEnt => {
                    let r = ((nx - 0.5).powi(2) + (ny - 0.5).powi(2)).sqrt();
                    (r * 12.0 + seed * 2.0).sin()
                }
                SpectralMode::QpixlBi => {
                    let dx = nx - 0.5;
                    let dy = ny - 0.5;
                    let r = (dx * dx + dy * dy).sqrt();
                    let theta = dy.atan2(dx);
                    (r * 10.0 * (1.0 + coherence) + theta * 3.0 + seed).sin()
                }
            };
            values.push(v * 0.5 + 0.5);
        }
    }

    PixelField { side, values }
}

/// Derived frequency-domain summary of a pixel field: 128 bins spread
/// logarithmically one octave either side of 440 Hz, with harmonic ratios
/// sampled every 12th bin.
#[derive(Debug, Clone, Serialize)]
pub struct SpectralAnalysis {
    pub frequencies: Vec<f32>,
    pub amplitudes: Vec<f32>,
    pub harmonic_ratios: Vec<f32>,
}

pub const SPECTRAL_BINS: usize = 128;

pub fn spectral_analysis(field: &PixelField) -> SpectralAnalysis {
    let mut frequencies = Vec::with_capacity(SPECTRAL_BINS);
    let mut amplitudes = Vec::with_capacity(SPECTRAL_BINS);
    let mut harmonic_ratios = Vec::new();
    let third = (field.len() / 3).max(1);

    for i in 0..SPECTRAL_BINS {
        let octave = -1.0 + 2.0 * i as f32 / (SPECTRAL_BINS - 1) as f32;
        frequencies.push(440.0 * 2f32.powf(octave));
        let amp = field.pixel(i);
        amplitudes.push(amp);
        if i % 12 == 0 {
            harmonic_ratios.push(field.pixel(i + third) / amp.max(1e-6));
        }
    }

    SpectralAnalysis {
        frequencies,
        amplitudes,
        harmonic_ratios,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompressionMetrics {
    pub original_complexity: f64,
    pub compressed_complexity: f64,
    pub compression_ratio: f64,
}

fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
}

fn mean_entropy(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.map(binary_entropy).sum::<f64>() / count as f64
}

/// Entropy-like complexity of the field before and after quantizing each
/// pixel to `max(2, floor(16 * (1 - threshold)))` levels. `threshold` is
/// normalized [0,1]; higher thresholds quantize more coarsely.
pub fn compression_metrics(field: &PixelField, threshold: f32) -> CompressionMetrics {
    let levels = ((16.0 * (1.0 - threshold as f64)).floor() as u32).max(2);
    let steps = (levels - 1) as f64;

    let original = mean_entropy(field.values.iter().map(|&v| v as f64), field.len());
    let compressed = mean_entropy(
        field
            .values
            .iter()
            .map(|&v| ((v as f64 * steps).round() / steps).clamp(0.0, 1.0)),
        field.len(),
    );

    let ratio = if original > 0.0 {
        compressed / original
    } else {
        1.0
    };

    CompressionMetrics {
        original_complexity: original,
        compressed_complexity: compressed,
        compression_ratio: ratio,
    }
}
