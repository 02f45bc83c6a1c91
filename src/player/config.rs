use crate::{
    foundation::core::{Canvas, Fps},
    foundation::error::{StoryreelError, StoryreelResult},
    foundation::math::round_frames,
    record::model::VideoRecord,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Player sizing handed to the downstream renderer.
pub struct PlayerConfig {
    /// Timeline length; placeholder until the first duration notification.
    #[serde(default = "default_duration_in_frames")]
    pub duration_in_frames: u64,
    #[serde(default = "default_composition_width")]
    pub composition_width: u32,
    #[serde(default = "default_composition_height")]
    pub composition_height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_duration_in_frames() -> u64 {
    100
}

fn default_composition_width() -> u32 {
    300
}

fn default_composition_height() -> u32 {
    450
}

fn default_fps() -> u32 {
    30
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            duration_in_frames: default_duration_in_frames(),
            composition_width: default_composition_width(),
            composition_height: default_composition_height(),
            fps: default_fps(),
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> StoryreelResult<()> {
        if self.composition_width == 0 || self.composition_height == 0 {
            return Err(StoryreelError::validation(
                "composition width/height must be > 0",
            ));
        }
        if self.fps == 0 {
            return Err(StoryreelError::validation("player fps must be > 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.composition_width,
            height: self.composition_height,
        }
    }

    pub fn timeline_fps(&self) -> StoryreelResult<Fps> {
        Fps::integer(self.fps)
    }

    /// Take a fractional timeline length, rounded half away from zero.
    pub fn apply_duration(&mut self, total_frames: f64) {
        self.duration_in_frames = round_frames(total_frames);
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Complete renderer input: player sizing plus the record as input props.
pub struct RendererInput {
    #[serde(flatten)]
    pub player: PlayerConfig,
    pub input_props: VideoRecord,
}

#[cfg(test)]
#[path = "../../tests/unit/player/config.rs"]
mod tests;
