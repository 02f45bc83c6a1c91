use crate::{
    foundation::core::{Fps, FrameIndex},
    record::model::Caption,
};

/// Spoken length of the caption track in seconds, or `fallback_secs` when it is empty.
///
/// Only the last caption's `end` is consulted; the track is assumed ascending.
pub fn total_duration_secs(captions: &[Caption], fallback_secs: f64) -> f64 {
    match captions.last() {
        Some(last) => last.end as f64 / 1000.0,
        None => fallback_secs,
    }
}

/// Fractional timeline length in frames.
pub fn total_duration_frames(captions: &[Caption], fallback_secs: f64, fps: Fps) -> f64 {
    fps.secs_to_frames(total_duration_secs(captions, fallback_secs))
}

/// Text of the first caption covering `frame`, or `""`.
pub fn caption_at(captions: &[Caption], fps: Fps, frame: FrameIndex) -> &str {
    let now_ms = fps.frame_to_ms(frame);
    captions
        .iter()
        .find(|c| c.covers(now_ms))
        .map(|c| c.text.as_str())
        .unwrap_or("")
}

#[cfg(test)]
#[path = "../../tests/unit/timing/captions.rs"]
mod tests;
