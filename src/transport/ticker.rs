use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Fixed-period timer owned by a single session.
///
/// The first fire comes one full period after creation. A late tick pushes
/// the schedule back instead of bursting to catch up, so a session never
/// sends two snapshots back to back because a previous send was slow.
#[derive(Debug)]
pub struct TickScheduler {
    interval: Interval,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_tick_waits_a_full_period() {
        let period = Duration::from_millis(40);
        let mut ticker = TickScheduler::new(period);
        assert_eq!(ticker.period(), period);

        let started = std::time::Instant::now();
        ticker.tick().await;
        assert!(started.elapsed() >= Duration::from_millis(35));
    }

    #[tokio::test]
    async fn slow_consumer_delays_instead_of_bursting() {
        let period = Duration::from_millis(20);
        let mut ticker = TickScheduler::new(period);
        ticker.tick().await;
        tokio::time::sleep(Duration::from_millis(70)).await;

        // The overdue tick fires at once; the one after it waits a full period.
        ticker.tick().await;
        let after_overdue = std::time::Instant::now();
        ticker.tick().await;
        assert!(after_overdue.elapsed() >= Duration::from_millis(15));
    }
}
