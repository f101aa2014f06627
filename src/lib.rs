pub mod audio;

pub use audio::engine::{AudioCommand, AudioEngine, AudioState};
pub use audio::params::{
    AdvancedOverlay, AdvancedSettings, AmplitudeProfile, HarmonicMapping, NoteSelection,
    ScaleType, SpectralMode, SynthesisParams, Waveform,
};
pub use audio::qpixl::{
    compression_metrics, generate_pixel_field, spectral_analysis, CompressionMetrics, PixelField,
    SpectralAnalysis,
};
pub use audio::quantum::{
    circuit_summary, simulate_probabilities, CircuitSummary, ProbabilityDistribution,
};
pub use audio::renderer::{
    render_audio_buffer, render_with_filter_state, RenderOutput, RenderedBuffer,
    RENDER_DURATION_SECS,
};
pub use audio::scale::{map_value_to_frequency, midi_to_freq, note_name_to_midi};
pub use audio::wav::save_wav;
