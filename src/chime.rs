pub const CHIME_PATH: &str = "/assets/chime.wav";

const SAMPLE_RATE: u32 = 44_100;
const FREQUENCY: f32 = 880.0;
const DURATION_SECS: f32 = 0.5;
const DECAY_SECS: f32 = 1.0;
const DECAY_FLOOR: f32 = 0.01;

pub fn chime_wav() -> Vec<u8> {
    encode_wav(&synthesize())
}

fn synthesize() -> Vec<i16> {
    let total = (SAMPLE_RATE as f32 * DURATION_SECS) as usize;
    (0..total)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE as f32;
            let gain = DECAY_FLOOR.powf(t / DECAY_SECS);
            let sample = triangle(t * FREQUENCY) * gain;
            (sample * f32::from(i16::MAX)) as i16
        })
        .collect()
}

fn triangle(phase: f32) -> f32 {
    let cycle = phase.fract();
    if cycle < 0.25 {
        4.0 * cycle
    } else if cycle < 0.75 {
        2.0 - 4.0 * cycle
    } else {
        4.0 * cycle - 4.0
    }
}

fn encode_wav(samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(wav: &[u8]) -> Vec<i16> {
        wav[44..]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    #[test]
    fn wav_header_is_well_formed() {
        let wav = chime_wav();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        let riff_len = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        let data_len = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(wav.len() as u32, 8 + riff_len);
        assert_eq!(wav.len() as u32, 44 + data_len);

        let rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(rate, SAMPLE_RATE);
    }

    #[test]
    fn tone_lasts_half_a_second() {
        let wav = chime_wav();
        assert_eq!(samples(&wav).len(), 22_050);
    }

    #[test]
    fn tone_decays_over_time() {
        let wav = chime_wav();
        let samples = samples(&wav);
        let peak = |window: &[i16]| window.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);

        let start = peak(&samples[..500]);
        let end = peak(&samples[samples.len() - 500..]);
        assert!(start > 2 * end, "expected decay, got {start} -> {end}");
        assert!(end > 0);
    }

    #[test]
    fn triangle_hits_its_extremes() {
        assert_eq!(triangle(0.0), 0.0);
        assert_eq!(triangle(0.25), 1.0);
        assert_eq!(triangle(0.5), 0.0);
        assert_eq!(triangle(0.75), -1.0);
    }
}
