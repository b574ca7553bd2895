//! Procedural sound effects: oscillator tones with a short attack and an
//! exponential release, layered at fixed offsets into one buffer per effect.

use crate::audio::sound::DecodedSound;

pub const SAMPLE_RATE: u32 = 22_050;

/// Attack time of every tone
const ATTACK_S: f32 = 0.01;
/// Level the exponential release reaches at the end of a tone
const RELEASE_FLOOR: f32 = 0.01;
/// Combo pitch stops rising after this many steps
const COMBO_PITCH_CAP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample at phase `p` (cycles, any real value)
    fn sample(self, p: f32) -> f32 {
        let frac = p - p.floor();
        match self {
            Waveform::Sine => (frac * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if frac < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (frac - (frac + 0.5).floor()),
            Waveform::Triangle => 4.0 * (frac - 0.5).abs() - 1.0,
        }
    }
}

/// One note of an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub duration_s: f32,
    pub waveform: Waveform,
    pub volume: f32,
    /// Start time relative to the effect start
    pub offset_s: f32,
}

impl Tone {
    const fn new(freq: f32, duration_s: f32, waveform: Waveform, volume: f32, offset_s: f32) -> Self {
        Self { freq, duration_s, waveform, volume, offset_s }
    }

    /// Gain at time `t` into the tone: linear ramp from 0 over the attack,
    /// then exponential decay to [`RELEASE_FLOOR`] at the end
    pub fn envelope(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration_s {
            return 0.0;
        }
        if t < ATTACK_S {
            return self.volume * t / ATTACK_S;
        }
        let span = (self.duration_s - ATTACK_S).max(f32::EPSILON);
        let ratio = (RELEASE_FLOOR / self.volume).max(f32::EPSILON);
        self.volume * ratio.powf((t - ATTACK_S) / span)
    }

    fn end_s(&self) -> f32 {
        self.offset_s + self.duration_s
    }
}

/// A named effect from the game's sound set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Success,
    Error,
    TruckSpawn,
    /// Rising ping for the n-th consecutive correct drop
    Combo(u32),
    GameStart,
    GameOver,
    /// Warning beeps for a rush of arrivals
    RushHour,
}

impl Sfx {
    /// Resolve an effect by name, the way the game asks for them.
    /// `combo` takes the combo count as its argument (missing or 0 means 1).
    pub fn from_name(name: &str, arg: Option<u32>) -> Option<Sfx> {
        match name {
            "success" => Some(Sfx::Success),
            "error" => Some(Sfx::Error),
            "truck_spawn" => Some(Sfx::TruckSpawn),
            "combo" => Some(Sfx::Combo(arg.filter(|&n| n > 0).unwrap_or(1))),
            "game_start" => Some(Sfx::GameStart),
            "game_over" => Some(Sfx::GameOver),
            "rush_hour" => Some(Sfx::RushHour),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sfx::Success => "success",
            Sfx::Error => "error",
            Sfx::TruckSpawn => "truck_spawn",
            Sfx::Combo(_) => "combo",
            Sfx::GameStart => "game_start",
            Sfx::GameOver => "game_over",
            Sfx::RushHour => "rush_hour",
        }
    }

    /// Effects that render identically share a key
    pub fn cache_key(&self) -> Sfx {
        match self {
            Sfx::Combo(n) => Sfx::Combo((*n).min(COMBO_PITCH_CAP)),
            other => *other,
        }
    }

    /// The notes that make up this effect
    pub fn tones(&self) -> Vec<Tone> {
        use Waveform::*;
        match self {
            // A major chord, notes 50 ms apart
            Sfx::Success => [440.0, 554.37, 659.25]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(f, 0.3, Sine, 0.25, i as f32 * 0.05))
                .collect(),
            // Descending dissonant pair
            Sfx::Error => vec![
                Tone::new(220.0, 0.2, Sawtooth, 0.3, 0.0),
                Tone::new(185.0, 0.3, Sawtooth, 0.2, 0.1),
            ],
            Sfx::TruckSpawn => vec![Tone::new(800.0, 0.1, Square, 0.15, 0.0)],
            Sfx::Combo(n) => {
                let freq = 440.0 * 1.2f32.powi((*n).min(COMBO_PITCH_CAP) as i32);
                vec![Tone::new(freq, 0.2, Sine, 0.2, 0.0)]
            }
            // C-E-G-C fanfare
            Sfx::GameStart => [523.25, 659.25, 783.99, 1046.5]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(f, 0.3, Triangle, 0.25, i as f32 * 0.2))
                .collect(),
            // A-E-C-G descending
            Sfx::GameOver => [880.0, 659.25, 523.25, 392.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(f, 0.5, Sine, 0.2, i as f32 * 0.3))
                .collect(),
            Sfx::RushHour => (0..5)
                .map(|i| Tone::new(1000.0, 0.1, Square, 0.2, i as f32 * 0.15))
                .collect(),
        }
    }
}

/// Mix tones into a mono sample buffer
pub fn render_tones(tones: &[Tone], sample_rate: u32) -> Vec<f32> {
    let total_s = tones.iter().map(Tone::end_s).fold(0.0f32, f32::max);
    let len = (total_s * sample_rate as f32).ceil() as usize;
    let mut buf = vec![0.0f32; len];
    let dt = 1.0 / sample_rate as f32;

    for tone in tones {
        let start = (tone.offset_s * sample_rate as f32).round() as usize;
        let count = (tone.duration_s * sample_rate as f32).round() as usize;
        for i in 0..count {
            let Some(slot) = buf.get_mut(start + i) else {
                break;
            };
            let t = i as f32 * dt;
            *slot += tone.waveform.sample(tone.freq * t) * tone.envelope(t);
        }
    }

    for s in &mut buf {
        *s = s.clamp(-1.0, 1.0);
    }
    buf
}

/// Render an effect to PCM
pub fn render(sfx: Sfx) -> DecodedSound {
    let samples = render_tones(&sfx.tones(), SAMPLE_RATE);
    DecodedSound::from_samples(&samples, SAMPLE_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_both_ways() {
        for sfx in [Sfx::Success, Sfx::Error, Sfx::TruckSpawn, Sfx::GameStart, Sfx::GameOver, Sfx::RushHour] {
            assert_eq!(Sfx::from_name(sfx.name(), None), Some(sfx));
        }
        assert_eq!(Sfx::from_name("combo", Some(4)), Some(Sfx::Combo(4)));
        assert_eq!(Sfx::from_name("combo", None), Some(Sfx::Combo(1)));
        assert_eq!(Sfx::from_name("combo", Some(0)), Some(Sfx::Combo(1)));
        assert_eq!(Sfx::from_name("rush_hour", Some(3)), Some(Sfx::RushHour));
        assert_eq!(Sfx::from_name("siren", None), None);
    }

    #[test]
    fn combo_pitch_rises_then_caps() {
        let f = |n| Sfx::Combo(n).tones()[0].freq;
        assert!((f(1) - 528.0).abs() < 0.01);
        assert!(f(5) > f(4));
        assert_eq!(f(10), f(25));
        assert_eq!(Sfx::Combo(25).cache_key(), Sfx::Combo(10));
    }

    #[test]
    fn envelope_attack_and_release() {
        let tone = Tone::new(440.0, 0.3, Waveform::Sine, 0.25, 0.0);
        assert_eq!(tone.envelope(0.0), 0.0);
        assert!((tone.envelope(0.005) - 0.125).abs() < 1e-4);
        assert!((tone.envelope(ATTACK_S) - 0.25).abs() < 1e-4);
        let tail = tone.envelope(0.2999);
        assert!(tail < 0.011 && tail > 0.0099, "tail {}", tail);
        assert_eq!(tone.envelope(0.3), 0.0);
    }

    #[test]
    fn waveforms_stay_in_range() {
        for w in [Waveform::Sine, Waveform::Square, Waveform::Sawtooth, Waveform::Triangle] {
            for i in 0..100 {
                let v = w.sample(i as f32 * 0.037);
                assert!((-1.0..=1.0).contains(&v), "{:?} at {} = {}", w, i, v);
            }
        }
        assert_eq!(Waveform::Triangle.sample(0.0), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.5), -1.0);
    }

    #[test]
    fn effect_lengths_follow_note_offsets() {
        // last note of the game-over melody starts at 0.9 s and lasts 0.5 s
        assert_eq!(render(Sfx::GameOver).duration_ms(), 1400);
        assert_eq!(render(Sfx::Error).duration_ms(), 400);
        assert_eq!(render(Sfx::TruckSpawn).duration_ms(), 100);
        // five beeps 150 ms apart, the last one 100 ms long
        assert_eq!(render(Sfx::RushHour).duration_ms(), 700);
    }

    #[test]
    fn rush_hour_beeps_leave_gaps() {
        let tones = Sfx::RushHour.tones();
        assert_eq!(tones.len(), 5);
        assert!(tones.iter().all(|t| t.freq == 1000.0 && t.waveform == Waveform::Square));

        let samples = render_tones(&tones, SAMPLE_RATE);
        let at = |ms: f32| (ms / 1000.0 * SAMPLE_RATE as f32) as usize;
        assert!(samples[at(20.0)..at(80.0)].iter().any(|s| s.abs() > 0.0));
        assert!(samples[at(105.0)..at(145.0)].iter().all(|s| *s == 0.0), "silence between beeps");
    }

    #[test]
    fn second_error_tone_starts_late() {
        let samples = render_tones(&Sfx::Error.tones(), SAMPLE_RATE);
        let at_250ms = (0.25 * SAMPLE_RATE as f32) as usize;
        let window = &samples[at_250ms..at_250ms + 200];
        assert!(window.iter().any(|s| s.abs() > 0.0), "second tone should still sound at 250 ms");
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
    }
}
