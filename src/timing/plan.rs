use rayon::prelude::*;

use crate::{
    foundation::core::{Fps, FrameIndex},
    foundation::error::{StoryreelError, StoryreelResult},
    timing::calculator::{FrameState, TimingCalculator},
};

#[derive(Clone, Copy, Debug, Default)]
/// How a [`FramePlan`] is evaluated.
pub struct PlanOpts {
    /// Evaluate frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Every frame of a timeline, evaluated up front.
pub struct FramePlan {
    /// Whole-frame timeline length.
    pub duration_in_frames: u64,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Fractional timeline length before rounding.
    pub total_frames: f64,
    /// Frame states in timeline order.
    pub frames: Vec<FrameState>,
}

impl FramePlan {
    #[tracing::instrument(skip(calc))]
    pub fn build(calc: &TimingCalculator, opts: PlanOpts) -> StoryreelResult<Self> {
        let n = calc.duration_in_frames();
        let frames = if opts.parallel {
            let pool = build_thread_pool(opts.threads)?;
            pool.install(|| {
                (0..n)
                    .into_par_iter()
                    .map(|f| calc.eval_frame(FrameIndex(f)))
                    .collect::<StoryreelResult<Vec<_>>>()
            })?
        } else {
            (0..n)
                .map(|f| calc.eval_frame(FrameIndex(f)))
                .collect::<StoryreelResult<Vec<_>>>()?
        };
        tracing::debug!(frames = frames.len(), "frame plan built");

        Ok(Self {
            duration_in_frames: n,
            fps: calc.fps(),
            total_frames: calc.total_frames(),
            frames,
        })
    }
}

fn build_thread_pool(threads: Option<usize>) -> StoryreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StoryreelError::validation(
            "plan threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryreelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/timing/plan.rs"]
mod tests;
