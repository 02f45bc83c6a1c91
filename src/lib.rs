//! storyreel computes the timeline of a short-form "story" video: still images shown one after
//! another with a zoom and fade, captions synced to narration, and a background audio track.
//!
//! # Pipeline overview
//!
//! 1. **Fetch**: `RecordSource + RecordId -> VideoRecord` (or a not-found / fetch-failed notice)
//! 2. **Time**: `VideoRecord -> TimingCalculator` (timeline length, image slots)
//! 3. **Evaluate**: `TimingCalculator + FrameIndex -> FrameState` (caption text, per-image
//!    scale/opacity/visibility)
//! 4. **Plan** (optional): evaluate every frame into a serializable `FramePlan`
//!
//! Evaluation is pure: the same calculator and frame always give the same state. The only
//! stateful piece is [`DurationTracker`], which reports the timeline length to a host once per
//! data-set change.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod player;
mod record;
mod timing;

pub use animation::curve::{Curve, Knot, interpolate};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Transform2D, Vec2};
pub use foundation::error::{StoryreelError, StoryreelResult};
pub use player::config::{PlayerConfig, RendererInput};
pub use player::preview::{Preview, PreviewSession};
pub use record::model::{Caption, RecordId, VideoRecord};
pub use record::source::{JsonRecordSource, MemoryRecordSource, RecordSource};
pub use timing::calculator::{
    AudioCue, DEFAULT_CANVAS, FrameState, ImageState, ImageTransform, TimingCalculator,
};
pub use timing::captions::{caption_at, total_duration_frames, total_duration_secs};
pub use timing::config::TimingConfig;
pub use timing::notify::DurationTracker;
pub use timing::plan::{FramePlan, PlanOpts};
pub use timing::slots::ImageSlot;
