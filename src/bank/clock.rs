use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Source of the current time for timestamps and maturity checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall time. The clock to hand to `Bank::in_memory` when requests arrive live rather than
/// from a replayed file; the binary only reads it once to start its replay clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        return Utc::now();
    }
}

/// Clock that only moves when told to. Used for replaying commands and in tests.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        return Self {
            now: RwLock::new(now),
        };
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        return *self.now.read().unwrap_or_else(PoisonError::into_inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};

    #[test]
    fn system_clock_follows_wall_time() {
        let before = Utc::now();
        let now = SystemClock.now();

        assert!(before <= now && now <= Utc::now());
    }

    #[test]
    fn manual_clock_only_moves_when_set() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);

        clock.set(start + Duration::days(30));
        assert_eq!(clock.now(), start + Duration::days(30));
    }
}
