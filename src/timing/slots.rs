use crate::{
    animation::curve::Curve, foundation::error::StoryreelResult, timing::config::TimingConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Frame window during which one image is the active visual.
pub struct ImageSlot {
    /// Position of the image in the record's image list.
    pub index: usize,
    /// First frame of the slot (fractional).
    pub start: f64,
    /// Slot length in frames.
    pub duration: f64,
}

impl ImageSlot {
    /// Slot `index` of `count` images over a `total_frames` timeline.
    ///
    /// The timeline is divided into `count + 1` equal parts so the last image finishes its
    /// fade before the timeline ends. With no images the single slot spans the timeline.
    pub fn new(index: usize, count: usize, total_frames: f64) -> Self {
        let duration = if count == 0 {
            total_frames
        } else {
            total_frames / (count as f64 + 1.0)
        };
        Self {
            index,
            start: index as f64 * duration,
            duration,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn mid(&self) -> f64 {
        self.start + self.duration / 2.0
    }

    /// Whether the image is mounted at `frame`: `[start, end + overlap)`.
    pub fn is_visible(&self, frame: f64, overlap_frames: f64) -> bool {
        frame >= self.start && frame < self.end() + overlap_frames
    }

    /// Zoom in to `zoom_peak` at the slot middle and back to 1 at the end.
    pub fn scale_curve(&self, cfg: &TimingConfig) -> StoryreelResult<Curve> {
        Curve::linear(
            &[self.start, self.mid(), self.end()],
            &[1.0, cfg.zoom_peak, 1.0],
        )
    }

    /// Fully opaque through the slot middle, then fade to 0 by `end - fade_out_frames`.
    ///
    /// The fade end never precedes the middle, so short slots keep ordered knots.
    pub fn opacity_curve(&self, cfg: &TimingConfig) -> StoryreelResult<Curve> {
        let mid = self.mid();
        let end = self.end();
        let fade_end = (end - cfg.fade_out_frames).max(mid);
        Curve::linear(&[self.start, mid, fade_end, end], &[1.0, 1.0, 0.0, 0.0])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/slots.rs"]
mod tests;
