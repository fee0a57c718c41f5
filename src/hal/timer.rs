//! Timer Abstractions
//!
//! Sample-rate tick generation for the modulator task.

use embassy_time::{Duration, Instant, Ticker};

/// Periodic sample tick that reports how many deadlines it slipped
pub struct SampleClock {
    /// Period between samples in nanoseconds
    period_ns: u64,
    ticker: Ticker,
    /// Deadline of the tick being waited for
    deadline: Instant,
}

impl SampleClock {
    /// Create a sample clock from sample rate
    #[must_use]
    pub fn from_rate(sample_rate: u32) -> Self {
        let period_ns = 1_000_000_000 / u64::from(sample_rate);
        let period = Duration::from_nanos(period_ns);
        Self {
            period_ns,
            ticker: Ticker::every(period),
            deadline: Instant::now() + period,
        }
    }

    /// Get the sample rate in Hz
    #[must_use]
    pub const fn rate_hz(&self) -> u64 {
        1_000_000_000 / self.period_ns
    }

    /// Get period duration
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_nanos(self.period_ns)
    }

    /// Wait for the next tick
    ///
    /// Returns the number of whole periods that had already elapsed past the
    /// deadline when the task woke up; zero on time.
    pub async fn tick(&mut self) -> u32 {
        self.ticker.next().await;
        let now = Instant::now();
        let late = now.saturating_duration_since(self.deadline);
        self.deadline += self.period();

        let missed = late.as_ticks() / self.period().as_ticks().max(1);
        if missed > 0 {
            // Resynchronize instead of bursting to catch up.
            self.ticker.reset();
            self.deadline = now + self.period();
        }
        u32::try_from(missed).unwrap_or(u32::MAX)
    }
}

impl defmt::Format for SampleClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SampleClock({}Hz)", self.rate_hz());
    }
}
