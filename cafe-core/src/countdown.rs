//! Delivery countdown state and the tick sources that drive it.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remaining delivery time. Only the order flow holds one, and only while the
/// order is on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(u32),
    Expired,
}

impl Countdown {
    #[must_use]
    pub const fn start(duration_secs: u32) -> Self {
        Self {
            remaining: duration_secs,
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advance by one second.
    pub const fn tick(&mut self) -> CountdownTick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Remaining(self.remaining)
        }
    }

    #[must_use]
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as zero-padded `MM:SS`.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// A repeating one-second tick source.
///
/// Dropping the ticker cancels it; nothing is delivered after that.
#[async_trait(?Send)]
pub trait Ticker {
    async fn tick(&mut self);
}

/// Ticks without waiting. Used by simulations and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTicker;

#[async_trait(?Send)]
impl Ticker for ImmediateTicker {
    async fn tick(&mut self) {}
}

/// Wall-clock ticker backed by a tokio interval.
#[cfg(feature = "async")]
pub struct IntervalTicker {
    interval: tokio::time::Interval,
}

#[cfg(feature = "async")]
impl IntervalTicker {
    #[must_use]
    pub fn new(period: std::time::Duration) -> Self {
        let start = tokio::time::Instant::now() + period;
        Self {
            interval: tokio::time::interval_at(start, period),
        }
    }

    #[must_use]
    pub fn every_second() -> Self {
        Self::new(std::time::Duration::from_millis(u64::from(
            crate::constants::TICK_INTERVAL_MS,
        )))
    }
}

#[cfg(feature = "async")]
#[async_trait(?Send)]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DELIVERY_COUNTDOWN_SECS;

    #[test]
    fn full_countdown_expires_after_exact_tick_count() {
        let mut countdown = Countdown::start(DELIVERY_COUNTDOWN_SECS);
        let mut expirations = 0;
        for n in 1..=DELIVERY_COUNTDOWN_SECS {
            match countdown.tick() {
                CountdownTick::Remaining(left) => assert_eq!(left, DELIVERY_COUNTDOWN_SECS - n),
                CountdownTick::Expired => {
                    expirations += 1;
                    assert_eq!(n, DELIVERY_COUNTDOWN_SECS);
                }
            }
        }
        assert_eq!(expirations, 1);
        assert!(countdown.is_expired());
    }

    #[test]
    fn ticking_past_zero_stays_expired() {
        let mut countdown = Countdown::start(1);
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(1200), "20:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(Countdown::start(599).clock(), "09:59");
    }

    #[test]
    fn immediate_ticker_resolves() {
        let mut ticker = ImmediateTicker;
        futures::executor::block_on(ticker.tick());
    }
}
