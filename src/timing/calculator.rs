use crate::{
    foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Transform2D},
    foundation::error::{StoryreelError, StoryreelResult},
    foundation::math::{Fnv1a64, round_frames},
    record::model::{Caption, VideoRecord},
    timing::captions::{caption_at, total_duration_frames},
    timing::config::TimingConfig,
    timing::slots::ImageSlot,
};

/// Preview canvas of the short-form player (portrait 2:3).
pub const DEFAULT_CANVAS: Canvas = Canvas {
    width: 300,
    height: 450,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Animated state of one image at one frame, before visibility is applied.
pub struct ImageTransform {
    /// Zoom factor.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether the image is mounted at this frame.
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A visible image at one frame.
pub struct ImageState {
    /// Index into the image list.
    pub index: usize,
    /// Image reference as stored in the record.
    pub source: String,
    /// Slot the image belongs to.
    pub slot: ImageSlot,
    /// Zoom factor.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Zoom about the canvas centre.
    pub transform: Affine,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Background audio placement.
pub struct AudioCue {
    /// Audio reference as stored in the record.
    pub source: String,
    /// Timeline range the audio plays over.
    pub range: FrameRange,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the renderer needs for one frame.
pub struct FrameState {
    /// Evaluated frame.
    pub frame: FrameIndex,
    /// Active caption text, empty when none.
    ///
    /// Filled from the caption track alone, even on frames with no mounted image.
    pub caption: String,
    /// Whether the caption is drawn: it is overlaid on mounted images only.
    pub caption_visible: bool,
    /// Mounted images in list order (later images paint on top).
    pub images: Vec<ImageState>,
    /// Background audio, if the record has one.
    pub audio: Option<AudioCue>,
}

/// Pure per-frame timing for an image slideshow with captions.
///
/// Built once per data set; every query is a pure function of the frame.
#[derive(Clone, Debug)]
pub struct TimingCalculator {
    fps: Fps,
    canvas: Canvas,
    config: TimingConfig,
    captions: Vec<Caption>,
    images: Vec<String>,
    audio: Option<String>,
    has_script: bool,
    total_frames: f64,
}

impl TimingCalculator {
    pub fn new(
        fps: Fps,
        captions: Vec<Caption>,
        images: Vec<String>,
        config: TimingConfig,
    ) -> StoryreelResult<Self> {
        Fps::new(fps.num, fps.den)?;
        config.validate()?;
        let total_frames = total_duration_frames(&captions, config.fallback_duration_secs, fps);
        Ok(Self {
            fps,
            canvas: DEFAULT_CANVAS,
            config,
            captions,
            images,
            audio: None,
            has_script: true,
            total_frames,
        })
    }

    /// Build from a stored record, logging (not rejecting) caption track problems.
    pub fn from_record(
        record: &VideoRecord,
        fps: Fps,
        config: TimingConfig,
    ) -> StoryreelResult<Self> {
        for issue in record.caption_issues() {
            tracing::warn!(record = %record.id, "{issue}");
        }
        let mut calc = Self::new(
            fps,
            record.captions.clone(),
            record.image_list.clone(),
            config,
        )?;
        calc.has_script = record.has_script();
        if !record.audio_file_url.trim().is_empty() {
            calc.audio = Some(record.audio_file_url.clone());
        }
        Ok(calc)
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> StoryreelResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(StoryreelError::validation("canvas width/height must be > 0"));
        }
        self.canvas = canvas;
        Ok(self)
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Fractional timeline length in frames.
    pub fn total_frames(&self) -> f64 {
        self.total_frames
    }

    /// Timeline length rounded to whole frames, as handed to the player.
    pub fn duration_in_frames(&self) -> u64 {
        round_frames(self.total_frames)
    }

    /// Active caption text at `frame`, or `""`.
    pub fn caption_at(&self, frame: FrameIndex) -> &str {
        caption_at(&self.captions, self.fps, frame)
    }

    pub fn slot(&self, index: usize) -> ImageSlot {
        ImageSlot::new(index, self.images.len(), self.total_frames)
    }

    /// Scale, opacity and visibility of image `index` at `frame`.
    pub fn image_transform(
        &self,
        index: usize,
        frame: FrameIndex,
    ) -> StoryreelResult<ImageTransform> {
        let slot = self.slot(index);
        let t = frame.0 as f64;
        Ok(ImageTransform {
            scale: slot.scale_curve(&self.config)?.sample(t),
            opacity: slot.opacity_curve(&self.config)?.sample(t).clamp(0.0, 1.0),
            visible: slot.is_visible(t, self.config.overlap_frames),
        })
    }

    /// Evaluate one frame within `[0, duration_in_frames)`.
    #[tracing::instrument(skip(self))]
    pub fn eval_frame(&self, frame: FrameIndex) -> StoryreelResult<FrameState> {
        if frame.0 >= self.duration_in_frames() {
            return Err(StoryreelError::evaluation("frame is out of bounds"));
        }

        let audio = self.audio.as_ref().map(|source| AudioCue {
            source: source.clone(),
            range: FrameRange {
                start: FrameIndex(0),
                end: FrameIndex(self.duration_in_frames()),
            },
        });

        if !self.has_script {
            return Ok(FrameState {
                frame,
                caption: String::new(),
                caption_visible: false,
                images: Vec::new(),
                audio,
            });
        }

        let mut images = Vec::new();
        for (index, source) in self.images.iter().enumerate() {
            let tr = self.image_transform(index, frame)?;
            if !tr.visible {
                continue;
            }
            images.push(ImageState {
                index,
                source: source.clone(),
                slot: self.slot(index),
                scale: tr.scale,
                opacity: tr.opacity,
                transform: Transform2D::zoom_about(self.canvas.center(), tr.scale).to_affine(),
            });
        }

        let caption = self.caption_at(frame).to_string();
        Ok(FrameState {
            frame,
            caption_visible: !caption.is_empty() && !images.is_empty(),
            caption,
            images,
            audio,
        })
    }

    /// Stable fingerprint of everything that determines the timeline length and layout.
    pub fn dataset_fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.fps.num);
        h.write_u32(self.fps.den);
        h.write_u64(self.config.fallback_duration_secs.to_bits());
        h.write_u64(self.captions.len() as u64);
        for c in &self.captions {
            h.write_str(&c.text);
            h.write_u64(c.start);
            h.write_u64(c.end);
        }
        h.write_u64(self.images.len() as u64);
        for img in &self.images {
            h.write_str(img);
        }
        h.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/calculator.rs"]
mod tests;
