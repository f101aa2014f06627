use std::time::Duration;

use qubitone::audio::engine::AudioEngine;
use qubitone::audio::params::{
    AdvancedOverlay, AdvancedSettings, SpectralMode, SynthesisParams, Waveform,
};
use qubitone::audio::renderer::render_audio_buffer;
use qubitone::audio::scale::note_name_to_midi;
use qubitone::audio::wav::save_wav;

const DEFAULT_SAMPLE_RATE: u32 = 44100;

fn usage() -> ! {
    eprintln!(
        "Usage: qubitone [options]\n\
         \n\
         Options:\n\
           --qubits N            qubit count, 2-8 (default 4)\n\
           --entanglement N      0-100 (default 50)\n\
           --superposition N     0-100 (default 75)\n\
           --filter N            quantum filter 0-100 (default 60)\n\
           --waveform NAME       sine|square|triangle|sawtooth|quantumNoise\n\
           --mono                render a single channel\n\
           --qpixl               enable QPIXL spectral integration\n\
           --mapping MODE        freq_qubits|amp_phase|harm_ent|qpixl_bi\n\
           --coherence N         temporal coherence 0-100 (default 50)\n\
           --harmony             enable quantum harmony averaging\n\
           --threshold N         compression threshold 0-100 (default 30)\n\
           --root NOTE           scale root, MIDI number or name like C3\n\
           --settings FILE       advanced settings overlay (JSON)\n\
           --out FILE            write a 16-bit WAV\n\
           --play                play the render on the default device\n\
           --json                print the render report as JSON"
    );
    std::process::exit(2);
}

struct CliArgs {
    params: SynthesisParams,
    overlay: AdvancedOverlay,
    settings_file: Option<String>,
    out_file: Option<String>,
    play: bool,
    json: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut params = SynthesisParams::default();
    let mut overlay = AdvancedOverlay::default();
    let mut settings_file = None;
    let mut out_file = None;
    let mut play = false;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| -> Result<String, String> {
            args.next().ok_or(format!("{} requires a value", name))
        };
        match arg.as_str() {
            "--qubits" => {
                params.qubits = value("--qubits")?
                    .parse()
                    .map_err(|e| format!("Bad qubit count: {}", e))?;
            }
            "--entanglement" => {
                params.entanglement = value("--entanglement")?
                    .parse()
                    .map_err(|e| format!("Bad entanglement: {}", e))?;
            }
            "--superposition" => {
                params.superposition = value("--superposition")?
                    .parse()
                    .map_err(|e| format!("Bad superposition: {}", e))?;
            }
            "--filter" => {
                params.quantum_filter = value("--filter")?
                    .parse()
                    .map_err(|e| format!("Bad filter amount: {}", e))?;
            }
            "--waveform" => {
                params.waveform = match value("--waveform")?.as_str() {
                    "sine" => Waveform::Sine,
                    "square" => Waveform::Square,
                    "triangle" => Waveform::Triangle,
                    "sawtooth" => Waveform::Sawtooth,
                    "quantumNoise" => Waveform::QuantumNoise,
                    other => return Err(format!("Unknown waveform: {}", other)),
                };
            }
            "--mono" => params.stereo = false,
            "--qpixl" => params.qpixl_integration = true,
            "--mapping" => {
                params.spectral_mapping = match value("--mapping")?.as_str() {
                    "freq_qubits" => SpectralMode::FreqQubits,
                    "amp_phase" => SpectralMode::AmpPhase,
                    "harm_ent" => SpectralMode::HarmEnt,
                    "qpixl_bi" => SpectralMode::QpixlBi,
                    other => return Err(format!("Unknown mapping mode: {}", other)),
                };
            }
            "--coherence" => {
                params.temporal_coherence = value("--coherence")?
                    .parse()
                    .map_err(|e| format!("Bad coherence: {}", e))?;
            }
            "--harmony" => params.quantum_harmony = true,
            "--threshold" => {
                params.compression_threshold = value("--threshold")?
                    .parse()
                    .map_err(|e| format!("Bad threshold: {}", e))?;
            }
            "--root" => {
                let raw = value("--root")?;
                let midi = raw
                    .parse::<f32>()
                    .ok()
                    .or_else(|| note_name_to_midi(&raw).map(f32::from))
                    .ok_or(format!("Bad root note: {}", raw))?;
                overlay.root_note = Some(midi);
            }
            "--settings" => settings_file = Some(value("--settings")?),
            "--out" => out_file = Some(value("--out")?),
            "--play" => play = true,
            "--json" => json = true,
            "--help" | "-h" => usage(),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(CliArgs {
        params: params.clamped(),
        overlay,
        settings_file,
        out_file,
        play,
        json,
    })
}

fn run() -> Result<(), String> {
    let cli = parse_args()?;

    // Settings file first, command-line overrides on top.
    let mut advanced = AdvancedSettings::default();
    if let Some(path) = &cli.settings_file {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?;
        let file_overlay: AdvancedOverlay =
            serde_json::from_str(&raw).map_err(|e| format!("Bad settings JSON: {}", e))?;
        advanced = file_overlay.apply(&advanced);
    }
    advanced = cli.overlay.apply(&advanced);

    eprintln!(
        "[render] {} qubits, waveform {:?}, {} channel(s), qpixl={}",
        cli.params.qubits,
        cli.params.waveform,
        if cli.params.stereo { 2 } else { 1 },
        cli.params.qpixl_integration,
    );

    let mut rng = rand::thread_rng();
    let output = render_audio_buffer(
        &cli.params,
        &advanced,
        None,
        DEFAULT_SAMPLE_RATE,
        &mut rng,
    );

    eprintln!(
        "[render] {} samples/channel at {} Hz, seed {:.3}",
        output.buffer.samples_per_channel(),
        output.buffer.sample_rate,
        output.probabilities.quantum_seed(),
    );

    if cli.json {
        let report = serde_json::json!({
            "probabilities": output.probabilities.entries(),
            "quantumSeed": output.probabilities.quantum_seed(),
            "pixelField": &output.pixel_field,
            "circuit": &output.circuit,
            "spectralAnalysis": &output.spectral_analysis,
            "compressionMetrics": &output.compression_metrics,
        });
        println!("{}", serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?);
    } else {
        for (label, prob) in output.probabilities.entries() {
            println!("|{}>  {:.4}", label, prob);
        }
        if let Some(metrics) = &output.compression_metrics {
            println!(
                "complexity {:.4} -> {:.4} (ratio {:.3})",
                metrics.original_complexity,
                metrics.compressed_complexity,
                metrics.compression_ratio,
            );
        }
    }

    if let Some(path) = &cli.out_file {
        let msg = save_wav(path, &output.buffer)?;
        eprintln!("[wav] {}", msg);
    }

    if cli.play {
        let engine = AudioEngine::new()?;
        engine.send_command(qubitone::audio::engine::AudioCommand::SetEffects {
            reverb: cli.params.reverb,
            reverb_mix: cli.params.reverb_mix / 100.0,
            chorus: cli.params.chorus,
        })?;
        engine.play(&output.buffer)?;
        eprintln!("[play] Playing {:.1}s...", output.buffer.duration_secs());
        std::thread::sleep(Duration::from_secs_f32(
            output.buffer.duration_secs() + 0.5,
        ));
        engine.stop()?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("[error] {}", e);
        std::process::exit(1);
    }
}
