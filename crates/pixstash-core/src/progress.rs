//! Coarse grained progress reporting for embedding and extraction.

/// Percentage step between two progress reports.
pub const PROGRESS_STEP: u8 = 5;

/// Receives progress updates from long running codec operations.
///
/// Called with multiples of [`PROGRESS_STEP`] in increasing order, the last
/// call is always `100`.
pub trait ProgressObserver {
    fn on_progress(&mut self, percent: u8);
}

impl<F> ProgressObserver for F
where
    F: FnMut(u8),
{
    fn on_progress(&mut self, percent: u8) {
        self(percent)
    }
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

/// Turns a count of processed elements into step wise observer calls.
pub(crate) struct ProgressTracker<'a> {
    observer: &'a mut dyn ProgressObserver,
    total: usize,
    next_at: usize,
    reported: Option<u8>,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(observer: &'a mut dyn ProgressObserver, total: usize) -> Self {
        let mut tracker = ProgressTracker {
            observer,
            total,
            next_at: 0,
            reported: None,
        };
        tracker.schedule(PROGRESS_STEP);
        tracker
    }

    /// `done` elements out of `total` have been processed.
    #[inline]
    pub fn advance(&mut self, done: usize) {
        if done < self.next_at {
            return;
        }

        let percent = (done.min(self.total) * 100 / self.total) as u8;
        let percent = percent - percent % PROGRESS_STEP;
        self.report(percent);
        self.schedule(percent + PROGRESS_STEP);
    }

    pub fn finish(mut self) {
        if self.reported != Some(100) {
            self.report(100);
        }
    }

    fn report(&mut self, percent: u8) {
        self.observer.on_progress(percent);
        self.reported = Some(percent);
    }

    fn schedule(&mut self, percent: u8) {
        self.next_at = if percent > 100 || self.total == 0 {
            usize::MAX
        } else {
            // first element count at which `percent` is reached
            (self.total * percent as usize).div_ceil(100)
        };
    }
}
