use std::time::{Duration, Instant};

/// One-shot timer that re-arms itself every time it fires.
///
/// The next deadline is measured from the instant the timer actually fired, not from
/// the missed deadline, so a late host never produces a burst of catch-up samples.
#[derive(Debug, Clone)]
pub struct SampleTimer {
    period: Duration,
    deadline: Instant,
    fired: u64,
}

impl SampleTimer {
    /// Arms the timer for `now + period`.
    ///
    /// A zero period is raised to one millisecond; a timer that is always due would
    /// starve the frame loop.
    pub fn start(now: Instant, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            deadline: now + period,
            fired: 0,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Fires if due and re-arms for `now + period`. Returns whether it fired.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.deadline = now + self.period;
        self.fired += 1;
        true
    }

    /// Number of times the timer has fired.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn not_due_before_period() {
        let t0 = Instant::now();
        let mut timer = SampleTimer::start(t0, ms(1000));

        assert!(!timer.is_due(t0 + ms(999)));
        assert!(!timer.fire(t0 + ms(999)));
        assert_eq!(timer.fired(), 0);
    }

    #[test]
    fn fires_at_deadline_and_rearms() {
        let t0 = Instant::now();
        let mut timer = SampleTimer::start(t0, ms(1000));

        assert!(timer.fire(t0 + ms(1000)));
        assert_eq!(timer.deadline(), t0 + ms(2000));
        assert!(!timer.fire(t0 + ms(1000)));
        assert_eq!(timer.fired(), 1);
    }

    #[test]
    fn late_fire_rearms_from_fire_time() {
        let t0 = Instant::now();
        let mut timer = SampleTimer::start(t0, ms(1000));

        assert!(timer.fire(t0 + ms(3500)));
        assert_eq!(timer.deadline(), t0 + ms(4500));
        // No catch-up for the windows the host slept through.
        assert!(!timer.fire(t0 + ms(3600)));
    }

    #[test]
    fn zero_period_is_raised() {
        let t0 = Instant::now();
        let timer = SampleTimer::start(t0, Duration::ZERO);
        assert_eq!(timer.deadline(), t0 + ms(1));
    }
}
