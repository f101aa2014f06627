use std::f32::consts::PI;

use super::params::SpectralMode;
use super::qpixl::PixelField;

/// Per-sample QPIXL spectral modulation settings, fixed for a render.
#[derive(Debug, Clone, Copy)]
pub struct SpectralConfig {
    pub mode: SpectralMode,
    /// Normalized [0,1] modulation depth.
    pub coherence: f32,
    pub harmony: bool,
    /// Normalized [0,1] soft-compression threshold.
    pub threshold: f32,
}

/// Post-process `base` using the pixel field. `position` is the sample's
/// normalized position in the buffer and selects the driving pixel; `freq`
/// and `t` let the frequency-domain modes re-synthesize sines in place.
pub fn modulate(
    base: f32,
    freq: f32,
    t: f32,
    position: f32,
    field: &PixelField,
    config: &SpectralConfig,
) -> f32 {
    let len = field.len().max(1);
    let index = ((position * len as f32).floor() as usize).min(len - 1);
    let pixel = field.pixel(index);

    match config.mode {
        SpectralMode::FreqQubits => {
            // Re-synthesize at a pixel-scaled frequency multiplier;
            // coherence controls the multiplier's depth around 1.
            let mult = 1.0 + (pixel - 0.5) * 2.0 * config.coherence;
            (2.0 * PI * freq * mult * t).sin()
        }
        SpectralMode::AmpPhase => {
            let secondary = (2.0 * PI * freq * t + pixel * 2.0 * PI).sin() * pixel;
            let mix = 0.5 * config.coherence;
            base * (1.0 - mix) + secondary * mix
        }
        SpectralMode::HarmEnt => {
            let neighbor = field.pixel(index + 1);
            base * 0.7 + (2.0 * PI * freq * 2.0 * t).sin() * neighbor * 0.3
        }
        SpectralMode::QpixlBi => {
            let mut s = if config.harmony {
                // Average three pixels spaced at thirds of the field.
                let third = len / 3;
                let avg =
                    (pixel + field.pixel(index + third) + field.pixel(index + 2 * third)) / 3.0;
                avg * 2.0 - 1.0
            } else {
                pixel * 2.0 - 1.0
            };
            if config.threshold > 0.0 {
                s = (s * (1.0 + config.threshold * 2.0)).tanh();
            }
            s
        }
    }
}
