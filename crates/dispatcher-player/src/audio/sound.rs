//! PCM buffers for synthesized effects
//!
//! Effects are mixed as `f32` samples, quantized to 16-bit signed PCM and
//! wrapped in a RIFF/WAVE container so rodio's decoder can play them.

use byteorder::{LittleEndian, WriteBytesExt};

/// Rendered sound ready for playback
#[derive(Debug, Clone)]
pub struct DecodedSound {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub pcm_data: Vec<u8>,
}

impl DecodedSound {
    /// Quantize mono `f32` samples (clamped to -1.0..=1.0) to 16-bit PCM
    pub fn from_samples(samples: &[f32], sample_rate: u32) -> Self {
        let mut pcm_data = Vec::with_capacity(samples.len() * 2);
        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
            pcm_data.extend_from_slice(&v.to_le_bytes());
        }

        DecodedSound {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
            pcm_data,
        }
    }

    /// Playback length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        let bytes_per_sec = self.sample_rate as u64 * self.channels as u64 * self.bits_per_sample as u64 / 8;
        if bytes_per_sec == 0 {
            return 0;
        }
        (self.pcm_data.len() as u64 * 1000 / bytes_per_sec) as u32
    }

    /// Encode as WAV file bytes
    pub fn to_wav(&self) -> std::io::Result<Vec<u8>> {
        let byte_rate =
            self.sample_rate * self.channels as u32 * self.bits_per_sample as u32 / 8;
        let block_align = self.channels * self.bits_per_sample / 8;
        let data_len = self.pcm_data.len() as u32;
        let file_len = 36 + data_len;

        let mut wav = Vec::with_capacity(file_len as usize + 8);

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.write_u32::<LittleEndian>(file_len)?;
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.write_u32::<LittleEndian>(16)?; // chunk size
        wav.write_u16::<LittleEndian>(1)?; // PCM format
        wav.write_u16::<LittleEndian>(self.channels)?;
        wav.write_u32::<LittleEndian>(self.sample_rate)?;
        wav.write_u32::<LittleEndian>(byte_rate)?;
        wav.write_u16::<LittleEndian>(block_align)?;
        wav.write_u16::<LittleEndian>(self.bits_per_sample)?;

        // data chunk
        wav.extend_from_slice(b"data");
        wav.write_u32::<LittleEndian>(data_len)?;
        wav.extend_from_slice(&self.pcm_data);

        Ok(wav)
    }
}
