//! Sound engine: audio playback via rodio
//!
//! Plays the synthesized effects (Sfx → PCM → WAV → rodio). Rendered WAVs are
//! cached per effect, one-shot sinks are kept alive until they finish.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::audio::synth::{self, Sfx};

/// Central sound engine: Manages output stream and active playback channels
pub struct SoundEngine {
    /// rodio output stream (must be kept alive)
    _stream: OutputStream,
    /// Handle for creating new sinks
    handle: OutputStreamHandle,
    /// One-shot sound effects (kept alive until finished)
    sfx_sinks: Vec<Sink>,
    /// Rendered WAV bytes per effect
    cache: HashMap<Sfx, Arc<[u8]>>,
    /// Master volume (0.0 – 1.0)
    volume: f32,
    enabled: bool,
}

impl SoundEngine {
    /// Create a new sound engine. Returns None if audio device unavailable.
    pub fn new(volume: f32, enabled: bool) -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!("Audio output initialized");
                Some(Self {
                    _stream: stream,
                    handle,
                    sfx_sinks: Vec::new(),
                    cache: HashMap::new(),
                    volume: volume.clamp(0.0, 1.0),
                    enabled,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}", e);
                None
            }
        }
    }

    /// Play an effect by name, e.g. `play_named("combo", Some(3))`.
    /// Unknown names are logged and ignored.
    pub fn play_named(&mut self, name: &str, arg: Option<u32>) -> Option<Sfx> {
        let sfx = Sfx::from_name(name, arg);
        match sfx {
            Some(sfx) => self.play(sfx),
            None => tracing::warn!("Unknown sound: {}", name),
        }
        sfx
    }

    /// Play a one-shot sound effect
    pub fn play(&mut self, sfx: Sfx) {
        if !self.enabled {
            return;
        }

        let Some(wav) = self.wav_for(sfx) else {
            return;
        };
        match decoder_for(&wav) {
            Ok(source) => match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(self.volume);
                    sink.append(source);
                    self.sfx_sinks.push(sink);
                    tracing::trace!("Playing {:?}", sfx);
                }
                Err(e) => tracing::warn!("Failed to create SFX sink: {}", e),
            },
            Err(e) => tracing::warn!("Failed to decode WAV for {}: {}", sfx.name(), e),
        }
    }

    fn wav_for(&mut self, sfx: Sfx) -> Option<Arc<[u8]>> {
        let key = sfx.cache_key();
        if let Some(wav) = self.cache.get(&key) {
            return Some(Arc::clone(wav));
        }
        let sound = synth::render(key);
        tracing::debug!("Rendered {} ({} ms)", key.name(), sound.duration_ms());
        match sound.to_wav() {
            Ok(bytes) => {
                let wav: Arc<[u8]> = Arc::from(bytes);
                self.cache.insert(key, Arc::clone(&wav));
                Some(wav)
            }
            Err(e) => {
                tracing::warn!("Failed to encode {}: {}", sfx.name(), e);
                None
            }
        }
    }

    /// Toggle audio on/off. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.stop_all();
        }
        tracing::info!("Sound {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stop all sounds
    pub fn stop_all(&mut self) {
        for sink in self.sfx_sinks.drain(..) {
            sink.stop();
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set master volume (0.0 – 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        for sink in &self.sfx_sinks {
            sink.set_volume(self.volume);
        }
        tracing::debug!("Volume {:.1}", self.volume);
    }

    /// Block until every playing effect has finished
    pub fn wait_idle(&mut self) {
        for sink in self.sfx_sinks.drain(..) {
            sink.sleep_until_end();
        }
    }

    /// Clean up finished SFX sinks (called periodically from game loop).
    pub fn gc(&mut self) {
        self.sfx_sinks.retain(|s| !s.empty());
    }
}

/// Decoder reading straight from the cached WAV bytes
fn decoder_for(wav: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, DecoderError> {
    Decoder::new(Cursor::new(Arc::clone(wav)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::Source;

    #[test]
    fn cached_wav_is_shared_not_copied() {
        let bytes = synth::render(Sfx::TruckSpawn).to_wav().unwrap();
        let wav: Arc<[u8]> = Arc::from(bytes);

        let first = decoder_for(&wav).unwrap();
        let second = decoder_for(&wav).unwrap();
        assert_eq!(Arc::strong_count(&wav), 3);
        assert_eq!(first.sample_rate(), synth::SAMPLE_RATE);
        assert_eq!(second.channels(), 1);

        drop((first, second));
        assert_eq!(Arc::strong_count(&wav), 1);
    }
}
