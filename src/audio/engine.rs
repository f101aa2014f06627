use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

use super::effects::EffectChain;
use super::renderer::RenderedBuffer;

/// Messages sent from the main thread to the audio thread.
#[derive(Debug, Clone)]
pub enum AudioCommand {
    /// Start playing a rendered buffer, replacing any active playback.
    PlayBuffer {
        channels: Vec<Vec<f32>>,
        sample_rate: u32,
    },
    Stop,
    SetMasterVolume(f32),
    SetEffects {
        reverb: bool,
        reverb_mix: f32,
        chorus: bool,
    },
}

/// Shared audio state: the waveform tap the visualization layer reads.
pub struct AudioState {
    pub waveform_buffer: Vec<f32>,
    pub is_playing: bool,
    pub master_volume: f32,
    pub sample_rate: u32,
}

impl Default for AudioState {
    fn default() -> Self {
        Self {
            waveform_buffer: vec![0.0; 2048],
            is_playing: false,
            master_volume: 1.0,
            sample_rate: 44100,
        }
    }
}

struct Playback {
    channels: Vec<Vec<f32>>,
    position: f64,
    /// Source-rate / device-rate ratio for on-the-fly resampling.
    rate: f64,
    done: bool,
}

impl Playback {
    /// Cubic Hermite interpolation at the current position, falling back
    /// to linear at the buffer edges.
    fn sample(&self, channel: usize) -> f32 {
        let data = &self.channels[channel.min(self.channels.len() - 1)];
        let idx = self.position as usize;
        let len = data.len();
        if idx + 1 >= len {
            return data.get(idx).copied().unwrap_or(0.0);
        }
        let frac = (self.position - idx as f64) as f32;
        if idx >= 1 && idx + 2 < len {
            let y0 = data[idx - 1];
            let y1 = data[idx];
            let y2 = data[idx + 1];
            let y3 = data[idx + 2];
            let c0 = y1;
            let c1 = 0.5 * (y2 - y0);
            let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
            let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);
            ((c3 * frac + c2) * frac + c1) * frac + c0
        } else {
            data[idx] * (1.0 - frac) + data[idx + 1] * frac
        }
    }

    fn advance(&mut self) {
        self.position += self.rate;
        if self.position as usize + 1 >= self.channels[0].len() {
            self.done = true;
        }
    }
}

/// cpal-backed playback engine. Owns the output stream and the audio
/// thread's mixing loop; the render path never touches it, so a missing
/// output device only fails playback, recoverably.
pub struct AudioEngine {
    pub state: Arc<Mutex<AudioState>>,
    command_tx: Sender<AudioCommand>,
    _stream: Mutex<Option<cpal::Stream>>,
}

// Safety: the Stream is only accessed through the Mutex and is never moved
// between threads after construction.
unsafe impl Send for AudioEngine {}
unsafe impl Sync for AudioEngine {}

impl AudioEngine {
    pub fn new() -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No output device found")?;

        let supported = device
            .default_output_config()
            .map_err(|e| format!("No default config: {}", e))?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;

        let config = StreamConfig {
            channels: supported.channels(),
            sample_rate: supported.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let state = Arc::new(Mutex::new(AudioState {
            sample_rate,
            ..Default::default()
        }));

        let (cmd_tx, cmd_rx): (Sender<AudioCommand>, Receiver<AudioCommand>) = bounded(256);

        let state_clone = state.clone();
        let mut playback: Option<Playback> = None;
        let mut master_volume: f32 = 1.0;
        let mut effect_chain = EffectChain::new(sample_rate as f32);
        let mut tap_write_pos: usize = 0;

        let stream = match supported.sample_format() {
            SampleFormat::F32 => device.build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Ok(cmd) = cmd_rx.try_recv() {
                        match cmd {
                            AudioCommand::PlayBuffer {
                                channels: buf,
                                sample_rate: src_sr,
                            } => {
                                if !buf.is_empty() && !buf[0].is_empty() {
                                    playback = Some(Playback {
                                        channels: buf,
                                        position: 0.0,
                                        rate: src_sr as f64 / sample_rate as f64,
                                        done: false,
                                    });
                                }
                            }
                            AudioCommand::Stop => {
                                playback = None;
                                let mut s = state_clone.lock();
                                s.is_playing = false;
                            }
                            AudioCommand::SetMasterVolume(vol) => {
                                master_volume = vol;
                                let mut s = state_clone.lock();
                                s.master_volume = vol;
                            }
                            AudioCommand::SetEffects {
                                reverb,
                                reverb_mix,
                                chorus,
                            } => {
                                effect_chain.set_reverb(reverb, reverb_mix);
                                effect_chain.set_chorus(chorus);
                            }
                        }
                    }

                    let frames = data.len() / channels;
                    for frame in 0..frames {
                        let (mut left, mut right) = match playback.as_mut() {
                            Some(pb) if !pb.done => {
                                let l = pb.sample(0);
                                let r = if pb.channels.len() > 1 { pb.sample(1) } else { l };
                                pb.advance();
                                (l, r)
                            }
                            _ => (0.0, 0.0),
                        };

                        let (proc_l, proc_r) = effect_chain.process(left, right);
                        left = (proc_l * master_volume).clamp(-1.0, 1.0);
                        right = (proc_r * master_volume).clamp(-1.0, 1.0);

                        for ch in 0..channels {
                            data[frame * channels + ch] = if ch % 2 == 0 { left } else { right };
                        }

                        // Mono tap for the waveform display.
                        let mono = (left + right) * 0.5;
                        {
                            let mut s = state_clone.lock();
                            let len = s.waveform_buffer.len();
                            s.waveform_buffer[tap_write_pos % len] = mono;
                            tap_write_pos += 1;
                            s.is_playing =
                                playback.as_ref().map(|pb| !pb.done).unwrap_or(false);
                        }
                    }

                    if playback.as_ref().map(|pb| pb.done).unwrap_or(false) {
                        playback = None;
                    }
                },
                |err| eprintln!("[engine] Audio stream error: {}", err),
                None,
            ),
            _ => {
                return Err(format!(
                    "Unsupported sample format: {:?}",
                    supported.sample_format()
                ));
            }
        }
        .map_err(|e| format!("Failed to build stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to play stream: {}", e))?;

        Ok(Self {
            state,
            command_tx: cmd_tx,
            _stream: Mutex::new(Some(stream)),
        })
    }

    pub fn send_command(&self, cmd: AudioCommand) -> Result<(), String> {
        self.command_tx
            .try_send(cmd)
            .map_err(|e| format!("Failed to send command: {}", e))
    }

    pub fn play(&self, buffer: &RenderedBuffer) -> Result<(), String> {
        self.send_command(AudioCommand::PlayBuffer {
            channels: buffer.channels.clone(),
            sample_rate: buffer.sample_rate,
        })
    }

    pub fn stop(&self) -> Result<(), String> {
        self.send_command(AudioCommand::Stop)
    }

    pub fn device_sample_rate(&self) -> u32 {
        self.state.lock().sample_rate
    }

    pub fn get_waveform(&self) -> Vec<f32> {
        self.state.lock().waveform_buffer.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().is_playing
    }
}
