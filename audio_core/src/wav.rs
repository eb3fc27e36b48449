use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};

/// Encode PCM f32 samples as 16-bit PCM WAV (RIFF).
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> anyhow::Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    // WAV header (44 bytes) + 2 bytes per sample
    let estimated_size = 44 + samples.len() * 2;
    let mut cursor = Cursor::new(Vec::<u8>::with_capacity(estimated_size));

    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| anyhow::anyhow!("wav write err: {e}"))?;

        const I16_MAX_F32: f32 = i16::MAX as f32;
        for &s in samples {
            // Clamp and convert f32 [-1.0, 1.0] -> i16
            let v = (s.clamp(-1.0, 1.0) * I16_MAX_F32) as i16;
            writer
                .write_sample(v)
                .map_err(|e| anyhow::anyhow!("wav sample err: {e}"))?;
        }
        // `writer` drops here, which finalizes the WAV header/footer
    }

    Ok(cursor.into_inner())
}

/// Convenience: WAV bytes as Base64.
pub fn encode_wav_base64(samples: &[f32], sample_rate: u32) -> anyhow::Result<String> {
    let bytes = encode_wav(samples, sample_rate)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
