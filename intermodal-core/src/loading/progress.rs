//! Progress reporting for the import pipeline

/// Receives import progress as a fraction between 0 and 1.
///
/// Called synchronously on the importing thread, so implementations should
/// return quickly. Any `FnMut(f32, bool)` closure is a callback.
pub trait ProgressCallback {
    fn progress(&mut self, fraction: f32, finished: bool);
}

impl<F> ProgressCallback for F
where
    F: FnMut(f32, bool),
{
    fn progress(&mut self, fraction: f32, finished: bool) {
        self(fraction, finished);
    }
}

/// Callback used when the caller does not supply one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn progress(&mut self, _fraction: f32, _finished: bool) {}
}

/// Splits the `[0, 1]` range into equal slots, one per pipeline phase
pub(crate) struct PhaseProgress<'a> {
    callback: &'a mut dyn ProgressCallback,
    phases: usize,
}

impl<'a> PhaseProgress<'a> {
    pub(crate) fn new(callback: &'a mut dyn ProgressCallback, phases: usize) -> Self {
        Self { callback, phases }
    }

    /// Reports that row `row` of `total` in phase `phase` is being processed
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub(crate) fn row(&mut self, phase: usize, row: usize, total: usize) {
        if total == 0 {
            return;
        }
        let slot = 1.0 / self.phases as f64;
        let fraction = slot * phase as f64 + slot * (row as f64 / total as f64);
        self.callback.progress(fraction as f32, false);
    }

    pub(crate) fn finish(&mut self) {
        self.callback.progress(1.0, true);
    }
}
