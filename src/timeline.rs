//! Timed playback of a canned log sequence.
//!
//! Line k is scheduled at the absolute offset (k + 1) * delay from the start
//! instant rather than chained off the previous reveal. Total drift stays
//! bounded by one timer's jitter, and cancellation invalidates every pending
//! reveal at once instead of chasing a chain.

use crate::console::LogLine;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// State machine: idle until `start`, running while reveals remain, idle again
/// after the final reveal or `cancel`.
pub struct LogTimeline {
    cancelled: Arc<AtomicBool>,
    revealed: Arc<AtomicUsize>,
    total: usize,
    handle: JoinHandle<()>,
}

impl LogTimeline {
    /// Begin playback. `on_reveal` fires once per line, strictly in index
    /// order, no earlier than (index + 1) * delay after this call.
    /// `on_complete` fires after the final reveal unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, C>(
        lines: Vec<LogLine>,
        delay: Duration,
        mut on_reveal: F,
        on_complete: C,
    ) -> Self
    where
        F: FnMut(usize, LogLine) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let revealed = Arc::new(AtomicUsize::new(0));
        let total = lines.len();
        let flag = Arc::clone(&cancelled);
        let cursor = Arc::clone(&revealed);
        let started = Instant::now();

        debug!("starting timeline: {} lines, {:?} apart", total, delay);
        let handle = tokio::spawn(async move {
            for (index, line) in lines.into_iter().enumerate() {
                let step = u32::try_from(index + 1).unwrap_or(u32::MAX);
                tokio::time::sleep_until(started + delay * step).await;
                if flag.load(Ordering::Acquire) {
                    return;
                }
                on_reveal(index, line);
                cursor.store(index + 1, Ordering::Release);
            }
            if !flag.load(Ordering::Acquire) {
                on_complete();
            }
        });

        Self {
            cancelled,
            revealed,
            total,
            handle,
        }
    }

    /// Stop playback. No further callbacks fire for this instance, even if
    /// scheduled time later passes every pending deadline.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.handle.abort();
    }

    /// Reveal cursor: how many lines have been delivered so far. Monotonic,
    /// bounded by `total`.
    pub fn revealed(&self) -> usize {
        self.revealed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished() && !self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for LogTimeline {
    fn drop(&mut self) {
        // A superseded timeline must not keep firing into a buffer it no
        // longer owns.
        self.cancel();
    }
}
