//! Sample-tick deadline monitor
//!
//! Missing a tick is a real-time failure: the DAC repeats a stale sample and
//! the waveform loses its shape. The monitor counts those events so the
//! firmware can report them; it never tries to recover.
//!
//! Two kinds of overrun are counted:
//! - re-entry: the tick fired again while the previous `next_sample()` was
//!   still running (interrupt-driven drivers)
//! - late ticks reported by the driver (polled drivers that notice they
//!   woke up after the next deadline had already passed)

use core::sync::atomic::{AtomicU32, Ordering};

/// Overrun counter shared between the tick and the reporting task
#[derive(Debug)]
pub struct DeadlineMonitor {
    /// Ticks currently in progress
    depth: AtomicU32,
    overruns: AtomicU32,
    ticks: AtomicU32,
}

impl DeadlineMonitor {
    /// Create a monitor with zero counts
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth: AtomicU32::new(0),
            overruns: AtomicU32::new(0),
            ticks: AtomicU32::new(0),
        }
    }

    /// Mark the start of one tick's work
    ///
    /// The returned guard marks the end when dropped. Every entry made
    /// while another tick is still in progress counts as one overrun.
    #[must_use = "the tick ends when the guard is dropped"]
    pub fn enter(&self) -> TickGuard<'_> {
        if self.depth.fetch_add(1, Ordering::Acquire) > 0 {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
        self.ticks.fetch_add(1, Ordering::Relaxed);
        TickGuard { monitor: self }
    }

    /// Record ticks the driver found it had missed
    pub fn record_missed(&self, missed: u32) {
        if missed > 0 {
            self.overruns.fetch_add(missed, Ordering::Relaxed);
        }
    }

    /// Overruns counted so far
    #[must_use]
    pub fn overruns(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Ticks entered so far
    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Read and clear the overrun count
    pub fn take_overruns(&self) -> u32 {
        self.overruns.swap(0, Ordering::Relaxed)
    }
}

impl Default for DeadlineMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Ends a tick when dropped
#[derive(Debug)]
pub struct TickGuard<'a> {
    monitor: &'a DeadlineMonitor,
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.monitor.depth.fetch_sub(1, Ordering::Release);
    }
}
