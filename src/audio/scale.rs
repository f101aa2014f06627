use super::params::ScaleType;

/// Convert a (possibly fractional) MIDI note number to frequency.
/// Standard 12-TET, A4 = 440 Hz.
pub fn midi_to_freq(midi: f32) -> f32 {
    440.0 * 2f32.powf((midi - 69.0) / 12.0)
}

const CHROMATIC: &[i32] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
const MAJOR_PENTATONIC: &[i32] = &[0, 2, 4, 7, 9];
const MINOR_PENTATONIC: &[i32] = &[0, 3, 5, 7, 10];
const BLUES: &[i32] = &[0, 3, 5, 6, 7, 10];
const WHOLE_TONE: &[i32] = &[0, 2, 4, 6, 8, 10];

fn intervals(scale: ScaleType) -> &'static [i32] {
    match scale {
        ScaleType::Chromatic => CHROMATIC,
        ScaleType::MajorPentatonic => MAJOR_PENTATONIC,
        ScaleType::MinorPentatonic => MINOR_PENTATONIC,
        ScaleType::Blues => BLUES,
        ScaleType::WholeTone => WHOLE_TONE,
        // Microtonal modes never index the table; fall back to chromatic.
        _ => CHROMATIC,
    }
}

/// Map a scalar in [0,1] to an output frequency under the selected scale.
///
/// Standard scales snap to a 12-TET interval table with an octave offset
/// drawn from `floor(value * 3) - 1`. The microtonal modes bypass the
/// table: Octave Segmented spreads the fractional value over 0-12
/// continuous semitones above the root, Full Range maps the value to an
/// octave shift spanning `±octave_range / 2`.
pub fn map_value_to_frequency(
    value: f32,
    scale: ScaleType,
    root_note: f32,
    octave_range: f32,
) -> f32 {
    let value = value.clamp(0.0, 1.0);

    match scale {
        ScaleType::MicrotonalOctaveSegmented => {
            let semitones = value.fract() * 12.0;
            midi_to_freq(root_note + semitones)
        }
        ScaleType::MicrotonalFullRange => {
            let shift = (value - 0.5) * octave_range;
            midi_to_freq(root_note) * 2f32.powf(shift)
        }
        _ => {
            let table = intervals(scale);
            let index = ((value * table.len() as f32).floor() as usize).min(table.len() - 1);
            let octave = (value * 3.0).floor() as i32 - 1;
            midi_to_freq(root_note + table[index] as f32 + octave as f32 * 12.0)
        }
    }
}

/// Convert a note name like "C3", "FS4" or "A#2" to a MIDI number.
pub fn note_name_to_midi(name: &str) -> Option<u8> {
    let name = name.trim().to_uppercase();
    let (note_part, octave_str) = if name.len() >= 2 {
        if name.chars().nth(1) == Some('S') || name.chars().nth(1) == Some('#') {
            (&name[..2], &name[2..])
        } else if name.chars().nth(1) == Some('B') && name.len() > 2 {
            (&name[..2], &name[2..])
        } else {
            (&name[..1], &name[1..])
        }
    } else {
        return None;
    };

    let base = match note_part {
        "C" => 0,
        "CS" | "C#" | "DB" => 1,
        "D" => 2,
        "DS" | "D#" | "EB" => 3,
        "E" => 4,
        "F" => 5,
        "FS" | "F#" | "GB" => 6,
        "G" => 7,
        "GS" | "G#" | "AB" => 8,
        "A" => 9,
        "AS" | "A#" | "BB" => 10,
        "B" => 11,
        _ => return None,
    };

    let octave: i32 = octave_str.parse().ok()?;
    let midi = (octave + 1) * 12 + base;
    if (0..=127).contains(&midi) {
        Some(midi as u8)
    } else {
        None
    }
}
