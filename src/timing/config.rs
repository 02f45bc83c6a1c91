use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{StoryreelError, StoryreelResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tunable constants of the slideshow timing.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid config.
pub struct TimingConfig {
    /// Timeline length in seconds when the caption track is empty.
    #[serde(default = "default_fallback_duration_secs")]
    pub fallback_duration_secs: f64,
    /// Scale reached at the middle of each image slot.
    #[serde(default = "default_zoom_peak")]
    pub zoom_peak: f64,
    /// Frames before the slot end at which the image reaches zero opacity.
    #[serde(default = "default_fade_out_frames")]
    pub fade_out_frames: f64,
    /// Frames an image stays mounted past its slot end.
    #[serde(default = "default_overlap_frames")]
    pub overlap_frames: f64,
}

fn default_fallback_duration_secs() -> f64 {
    30.0
}

fn default_zoom_peak() -> f64 {
    1.8
}

fn default_fade_out_frames() -> f64 {
    5.0
}

fn default_overlap_frames() -> f64 {
    10.0
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fallback_duration_secs: default_fallback_duration_secs(),
            zoom_peak: default_zoom_peak(),
            fade_out_frames: default_fade_out_frames(),
            overlap_frames: default_overlap_frames(),
        }
    }
}

impl TimingConfig {
    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryreelError::validation(format!("open timing config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| StoryreelError::serde(format!("parse timing config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> StoryreelResult<()> {
        if !self.fallback_duration_secs.is_finite() || self.fallback_duration_secs <= 0.0 {
            return Err(StoryreelError::validation(
                "fallback_duration_secs must be finite and > 0",
            ));
        }
        for (name, value) in [
            ("zoom_peak", self.zoom_peak),
            ("fade_out_frames", self.fade_out_frames),
            ("overlap_frames", self.overlap_frames),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StoryreelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/config.rs"]
mod tests;
