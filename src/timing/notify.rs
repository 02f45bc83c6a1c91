use crate::timing::calculator::TimingCalculator;

/// One-shot timeline length notification.
///
/// The host player needs the timeline length before it can size its scrubber, but the
/// length is only known once the data set is. `observe` may be called every frame; the
/// callback fires with [`TimingCalculator::total_frames`] only on the first call and
/// whenever [`TimingCalculator::dataset_fingerprint`] differs from the last notified one.
pub struct DurationTracker<F>
where
    F: FnMut(f64),
{
    last: Option<u64>,
    notify: F,
}

impl<F> DurationTracker<F>
where
    F: FnMut(f64),
{
    pub fn new(notify: F) -> Self {
        Self { last: None, notify }
    }

    /// Returns `true` when the callback fired.
    pub fn observe(&mut self, calc: &TimingCalculator) -> bool {
        let fingerprint = calc.dataset_fingerprint();
        if self.last == Some(fingerprint) {
            return false;
        }
        self.last = Some(fingerprint);
        tracing::debug!(
            total_frames = calc.total_frames(),
            fingerprint,
            "timeline duration changed"
        );
        (self.notify)(calc.total_frames());
        true
    }

    /// Forget the last data set so the next `observe` fires again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/notify.rs"]
mod tests;
