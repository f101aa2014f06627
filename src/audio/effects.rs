use std::f32::consts::PI;

// ────────────────── Schroeder reverb ──────────────────

struct CombFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
}

impl CombFilter {
    fn new(delay_samples: usize, feedback: f32) -> Self {
        Self {
            buffer: vec![0.0; delay_samples],
            write_pos: 0,
            feedback,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];
        self.buffer[self.write_pos] = input + output * self.feedback;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }
}

struct AllpassFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    feedback: f32,
}

impl AllpassFilter {
    fn new(delay_samples: usize, feedback: f32) -> Self {
        Self {
            buffer: vec![0.0; delay_samples],
            write_pos: 0,
            feedback,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        let output = -input + delayed;
        self.buffer[self.write_pos] = input + delayed * self.feedback;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }
}

/// Schroeder reverb: parallel combs with prime-ish delays feeding series
/// allpass filters, with a damping low-pass on the tail.
struct SchroederReverb {
    comb_filters: Vec<CombFilter>,
    allpass_filters: Vec<AllpassFilter>,
    mix: f32,
    damping_lp: f32,
}

impl SchroederReverb {
    fn new(sample_rate: f32) -> Self {
        let sr = sample_rate as usize;
        let comb_delays = [
            sr * 29 / 1000,
            sr * 31 / 1000,
            sr * 37 / 1000,
            sr * 41 / 1000,
            sr * 43 / 1000,
            sr * 47 / 1000,
            sr * 53 / 1000,
            sr * 59 / 1000,
        ];
        let comb_filters = comb_delays
            .iter()
            .map(|&d| CombFilter::new(d.max(1), 0.84))
            .collect();

        let allpass_delays = [sr * 5 / 1000, sr * 2 / 1000, sr / 1000];
        let allpass_filters = allpass_delays
            .iter()
            .map(|&d| AllpassFilter::new(d.max(1), 0.7))
            .collect();

        Self {
            comb_filters,
            allpass_filters,
            mix: 0.3,
            damping_lp: 0.0,
        }
    }

    fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    fn process(&mut self, input: f32) -> f32 {
        let mut comb_sum = 0.0f32;
        for comb in self.comb_filters.iter_mut() {
            comb_sum += comb.process(input);
        }
        comb_sum /= self.comb_filters.len() as f32;

        let damp = 0.3;
        self.damping_lp = self.damping_lp * damp + comb_sum * (1.0 - damp);

        let mut output = self.damping_lp;
        for allpass in self.allpass_filters.iter_mut() {
            output = allpass.process(output);
        }

        input * (1.0 - self.mix) + output * self.mix
    }
}

// ────────────────── Chorus ──────────────────

/// Chorus: a ~30 ms delay line whose read position wobbles with a slow
/// LFO, mixed back against the dry signal.
struct Chorus {
    buffer: Vec<f32>,
    write_pos: usize,
    lfo_phase: f32,
    lfo_rate: f32,
    base_delay: f32,
    depth: f32,
    sample_rate: f32,
}

impl Chorus {
    fn new(sample_rate: f32) -> Self {
        let max_delay = (sample_rate * 0.05) as usize; // 50ms headroom
        Self {
            buffer: vec![0.0; max_delay.max(1)],
            write_pos: 0,
            lfo_phase: 0.0,
            lfo_rate: 0.8,
            base_delay: 0.03,
            depth: 0.004,
            sample_rate,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        self.buffer[self.write_pos] = input;

        let lfo = (self.lfo_phase * 2.0 * PI).sin();
        self.lfo_phase += self.lfo_rate / self.sample_rate;
        if self.lfo_phase >= 1.0 {
            self.lfo_phase -= 1.0;
        }

        let delay_secs = self.base_delay + self.depth * lfo;
        let delay_samples = (delay_secs * self.sample_rate) as usize;
        let len = self.buffer.len();
        let read_pos = (self.write_pos + len - delay_samples.min(len - 1)) % len;
        let delayed = self.buffer[read_pos];

        self.write_pos = (self.write_pos + 1) % len;
        input * 0.7 + delayed * 0.3
    }
}

// ────────────────── Chain ──────────────────

/// Playback-time effect routing: reverb and chorus, each bypassed when
/// disabled. Synthesis itself never touches this chain.
pub struct EffectChain {
    reverb_l: SchroederReverb,
    reverb_r: SchroederReverb,
    chorus_l: Chorus,
    chorus_r: Chorus,
    reverb_enabled: bool,
    chorus_enabled: bool,
}

impl EffectChain {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            reverb_l: SchroederReverb::new(sample_rate),
            reverb_r: SchroederReverb::new(sample_rate),
            chorus_l: Chorus::new(sample_rate),
            chorus_r: Chorus::new(sample_rate),
            reverb_enabled: false,
            chorus_enabled: false,
        }
    }

    pub fn set_reverb(&mut self, enabled: bool, mix: f32) {
        self.reverb_enabled = enabled;
        self.reverb_l.set_mix(mix);
        self.reverb_r.set_mix(mix);
    }

    pub fn set_chorus(&mut self, enabled: bool) {
        self.chorus_enabled = enabled;
    }

    pub fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mut l = left;
        let mut r = right;

        if self.chorus_enabled {
            l = self.chorus_l.process(l);
            r = self.chorus_r.process(r);
        }

        if self.reverb_enabled {
            l = self.reverb_l.process(l);
            r = self.reverb_r.process(r);
        }

        (l, r)
    }
}
