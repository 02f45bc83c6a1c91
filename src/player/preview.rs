use crate::{
    foundation::error::StoryreelResult,
    player::config::{PlayerConfig, RendererInput},
    record::model::RecordId,
    record::source::RecordSource,
    timing::calculator::TimingCalculator,
    timing::config::TimingConfig,
    timing::notify::DurationTracker,
};

/// Outcome of opening a preview for one record.
#[derive(Clone, Debug)]
pub enum Preview {
    /// The record was found; the player is sized to its timeline.
    Ready {
        /// Renderer input with the notified duration applied.
        input: RendererInput,
        /// Calculator for per-frame evaluation.
        calculator: TimingCalculator,
    },
    /// The store has no record with this id.
    NotFound {
        /// Requested id.
        id: RecordId,
    },
    /// The store could not be read.
    FetchFailed {
        /// Underlying error text.
        message: String,
    },
}

impl Preview {
    /// User-facing line describing the outcome.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "Your video is ready!",
            Self::NotFound { .. } => "Video not found!",
            Self::FetchFailed { .. } => "Failed to fetch video data.",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Single-lookup preview opener.
pub struct PreviewSession;

impl PreviewSession {
    /// Fetch `id` once and size `player` to its timeline.
    ///
    /// Missing records and store failures are outcomes, not errors; `Err` is reserved for
    /// invalid player or timing configuration. There is no retry.
    #[tracing::instrument(skip(source, player, timing))]
    pub fn open(
        source: &dyn RecordSource,
        id: &RecordId,
        player: PlayerConfig,
        timing: TimingConfig,
    ) -> StoryreelResult<Preview> {
        player.validate()?;
        timing.validate()?;

        let record = match source.fetch(id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::info!(%id, "video record not found");
                return Ok(Preview::NotFound { id: id.clone() });
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "fetching video record failed");
                return Ok(Preview::FetchFailed {
                    message: e.to_string(),
                });
            }
        };

        let calculator = TimingCalculator::from_record(&record, player.timeline_fps()?, timing)?
            .with_canvas(player.canvas())?;

        let mut player = player;
        let mut tracker = DurationTracker::new(|total| player.apply_duration(total));
        tracker.observe(&calculator);
        drop(tracker);

        Ok(Preview::Ready {
            input: RendererInput {
                player,
                input_props: record,
            },
            calculator,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/preview.rs"]
mod tests;
