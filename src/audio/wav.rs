use super::renderer::RenderedBuffer;

/// Write a rendered buffer as a standard RIFF/WAVE file, 16-bit signed
/// PCM, channels interleaved. Pure serialization; no synthesis logic.
pub fn save_wav(path: &str, buffer: &RenderedBuffer) -> Result<String, String> {
    if buffer.samples_per_channel() == 0 {
        return Err("Buffer is empty".to_string());
    }

    let spec = hound::WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| format!("Failed to create file: {}", e))?;

    for sample in buffer.interleaved() {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(quantized)
            .map_err(|e| format!("Failed to write: {}", e))?;
    }

    writer
        .finalize()
        .map_err(|e| format!("Failed to finalize: {}", e))?;

    Ok(format!(
        "Saved {} samples x {} channels ({:.1}s) to {}",
        buffer.samples_per_channel(),
        buffer.channel_count(),
        buffer.duration_secs(),
        path
    ))
}
