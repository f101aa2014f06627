use serde::{Deserialize, Serialize};

/// Waveform families for the non-additive synthesis path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    QuantumNoise,
}

/// QPIXL spectral mapping modes. Also selects the pixel field's
/// interference formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralMode {
    #[serde(rename = "freq_qubits")]
    FreqQubits,
    #[serde(rename = "amp_phase")]
    AmpPhase,
    #[serde(rename = "harm_ent")]
    HarmEnt,
    #[serde(rename = "qpixl_bi")]
    QpixlBi,
}

/// How one harmonic's pixel value modulates the partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmonicMapping {
    Amplitudes,
    Frequencies,
    Phases,
}

/// Base amplitude rolloff per partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmplitudeProfile {
    #[serde(rename = "1/h")]
    Harmonic,
    Flat,
    #[serde(rename = "1/h^2")]
    HarmonicSquared,
    #[serde(rename = "QPIXL-Shaped")]
    QpixlShaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleType {
    Chromatic,
    #[serde(rename = "Major Pentatonic")]
    MajorPentatonic,
    #[serde(rename = "Minor Pentatonic")]
    MinorPentatonic,
    Blues,
    #[serde(rename = "Whole Tone")]
    WholeTone,
    #[serde(rename = "Microtonal QPIXL (Octave Segmented)")]
    MicrotonalOctaveSegmented,
    #[serde(rename = "Microtonal QPIXL (Full Range)")]
    MicrotonalFullRange,
}

/// Which pixel of the field picks the note when scale mapping is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteSelection {
    #[serde(rename = "First QPIXL Value")]
    First,
    #[serde(rename = "Average QPIXL Value")]
    Average,
    #[serde(rename = "Random QPIXL Value")]
    Random,
}

/// Main synthesis parameters, supplied per render call.
///
/// Knob/slider ranges match the front panel: `entanglement`,
/// `superposition`, `quantum_filter`, `temporal_coherence` and
/// `compression_threshold` are all 0..=100, `qubits` is 2..=8.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisParams {
    pub qubits: u32,
    pub entanglement: f32,
    pub superposition: f32,
    pub quantum_filter: f32,
    pub waveform: Waveform,
    pub stereo: bool,
    pub reverb: bool,
    pub reverb_mix: f32,
    pub chorus: bool,
    pub qpixl_integration: bool,
    pub spectral_mapping: SpectralMode,
    pub temporal_coherence: f32,
    pub quantum_harmony: bool,
    pub compression_threshold: f32,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            qubits: 4,
            entanglement: 50.0,
            superposition: 75.0,
            quantum_filter: 60.0,
            waveform: Waveform::Sine,
            stereo: true,
            reverb: true,
            reverb_mix: 30.0,
            chorus: false,
            qpixl_integration: false,
            spectral_mapping: SpectralMode::FreqQubits,
            temporal_coherence: 50.0,
            quantum_harmony: false,
            compression_threshold: 30.0,
        }
    }
}

impl SynthesisParams {
    /// Clamp every field into its documented range. The core assumes
    /// pre-clamped input; this is the interface-level guard for callers
    /// holding raw UI or JSON values.
    pub fn clamped(mut self) -> Self {
        self.qubits = self.qubits.clamp(2, 8);
        self.entanglement = self.entanglement.clamp(0.0, 100.0);
        self.superposition = self.superposition.clamp(0.0, 100.0);
        self.quantum_filter = self.quantum_filter.clamp(0.0, 100.0);
        self.reverb_mix = self.reverb_mix.clamp(0.0, 100.0);
        self.temporal_coherence = self.temporal_coherence.clamp(0.0, 100.0);
        self.compression_threshold = self.compression_threshold.clamp(0.0, 100.0);
        self
    }

    /// Default pixel field side length for this qubit count.
    pub fn pixel_dimensions(&self) -> usize {
        1usize << self.qubits.saturating_sub(2).min(4)
    }
}

/// Advanced synthesis settings with resolved values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    // Additive synthesis
    pub enable_additive: bool,
    pub num_partials: u32,
    pub harmonic_control_mapping: HarmonicMapping,
    pub harmonic_spread_factor: f32,
    pub harmonic_amplitude_profile: AmplitudeProfile,
    // Musical scale mapping
    pub enable_musical_scale: bool,
    pub scale_type: ScaleType,
    pub root_note: f32,
    pub qpixl_note_selection: NoteSelection,
    pub microtonal_octave_range: f32,
    // Output
    pub master_volume: f32,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            enable_additive: false,
            num_partials: 4,
            harmonic_control_mapping: HarmonicMapping::Amplitudes,
            harmonic_spread_factor: 0.02,
            harmonic_amplitude_profile: AmplitudeProfile::Harmonic,
            enable_musical_scale: false,
            scale_type: ScaleType::Chromatic,
            root_note: 48.0, // C3
            qpixl_note_selection: NoteSelection::First,
            microtonal_octave_range: 2.0,
            master_volume: 0.7,
        }
    }
}

impl AdvancedSettings {
    pub fn clamped(mut self) -> Self {
        self.num_partials = self.num_partials.min(16);
        self.harmonic_spread_factor = self.harmonic_spread_factor.clamp(0.0, 0.1);
        self.root_note = self.root_note.clamp(0.0, 127.0);
        self.microtonal_octave_range = self.microtonal_octave_range.clamp(1.0, 4.0);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self
    }
}

/// Partial overlay for `AdvancedSettings`: every field optional, merged
/// over the defaults (or any base) with `apply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedOverlay {
    pub enable_additive: Option<bool>,
    pub num_partials: Option<u32>,
    pub harmonic_control_mapping: Option<HarmonicMapping>,
    pub harmonic_spread_factor: Option<f32>,
    pub harmonic_amplitude_profile: Option<AmplitudeProfile>,
    pub enable_musical_scale: Option<bool>,
    pub scale_type: Option<ScaleType>,
    pub root_note: Option<f32>,
    pub qpixl_note_selection: Option<NoteSelection>,
    pub microtonal_octave_range: Option<f32>,
    pub master_volume: Option<f32>,
}

impl AdvancedOverlay {
    pub fn apply(&self, base: &AdvancedSettings) -> AdvancedSettings {
        let mut out = base.clone();
        if let Some(v) = self.enable_additive {
            out.enable_additive = v;
        }
        if let Some(v) = self.num_partials {
            out.num_partials = v;
        }
        if let Some(v) = self.harmonic_control_mapping {
            out.harmonic_control_mapping = v;
        }
        if let Some(v) = self.harmonic_spread_factor {
            out.harmonic_spread_factor = v;
        }
        if let Some(v) = self.harmonic_amplitude_profile {
            out.harmonic_amplitude_profile = v;
        }
        if let Some(v) = self.enable_musical_scale {
            out.enable_musical_scale = v;
        }
        if let Some(v) = self.scale_type {
            out.scale_type = v;
        }
        if let Some(v) = self.root_note {
            out.root_note = v;
        }
        if let Some(v) = self.qpixl_note_selection {
            out.qpixl_note_selection = v;
        }
        if let Some(v) = self.microtonal_octave_range {
            out.microtonal_octave_range = v;
        }
        if let Some(v) = self.master_volume {
            out.master_volume = v;
        }
        out.clamped()
    }
}
