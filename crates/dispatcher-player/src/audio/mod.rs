//! Sound-effect synthesis
//!
//!   synth: tone recipes per effect, mixed to f32 samples
//!   sound: 16-bit PCM buffers and WAV encoding for playback

pub mod sound;
pub mod synth;
