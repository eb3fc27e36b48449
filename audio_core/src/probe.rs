use std::io::Cursor;

use anyhow::Context;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Read the natural duration of an in-memory audio container.
///
/// `Ok(None)` means the container parsed but carries no frame count.
pub(crate) fn probe_duration(bytes: &[u8], mime: &str) -> anyhow::Result<Option<f32>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension_for(mime) {
        hint.with_extension(ext);
    }

    let format_opts = FormatOptions {
        enable_gapless: false,
        ..Default::default()
    };

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &MetadataOptions::default())
        .context("unreadable audio container")?;

    let track = probed
        .format
        .default_track()
        .context("no audio tracks found")?;

    let params = &track.codec_params;
    let duration = if let (Some(time_base), Some(n_frames)) = (params.time_base, params.n_frames) {
        let seconds_per_frame = f64::from(time_base.numer) / f64::from(time_base.denom);
        Some((n_frames as f64 * seconds_per_frame) as f32)
    } else if let (Some(sample_rate), Some(n_frames)) = (params.sample_rate, params.n_frames) {
        Some(n_frames as f32 / sample_rate as f32)
    } else {
        None
    };

    Ok(duration)
}

fn extension_for(mime: &str) -> Option<&'static str> {
    // The hint only guides probing; unknown MIME types still get sniffed.
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    match essence {
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/ogg" | "application/ogg" => Some("ogg"),
        "audio/flac" => Some("flac"),
        _ => None,
    }
}
