//! Failed-login tracking record for per-identifier lockout.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Per-identifier record of consecutive failed login attempts.
///
/// All transitions take the current instant as an argument so the lockout
/// state machine can be driven with simulated clocks in tests. The record
/// is removed entirely on a successful login or when an expired lock is
/// observed; absence means a clean slate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttemptRecord {
    /// Consecutive failures since the last success or reset
    pub failed_count: u32,

    /// Timestamp of the most recent failure
    pub last_attempt_at: DateTime<Utc>,

    /// End of the lockout window, if the threshold has been reached
    pub locked_until: Option<DateTime<Utc>>,
}

impl LoginAttemptRecord {
    /// Record for the first failure of a fresh identifier
    pub fn first_failure(now: DateTime<Utc>) -> Self {
        Self {
            failed_count: 1,
            last_attempt_at: now,
            locked_until: None,
        }
    }

    /// Registers another failure. Once `failed_count` reaches `threshold`
    /// the lockout window opens. Returns `true` if this call locked the
    /// identifier.
    pub fn record_failure(
        &mut self,
        now: DateTime<Utc>,
        threshold: u32,
        lockout: Duration,
    ) -> bool {
        self.failed_count += 1;
        self.last_attempt_at = now;

        if self.failed_count >= threshold && self.locked_until.is_none() {
            self.locked_until = Some(now + lockout);
            return true;
        }
        false
    }

    /// Whether the identifier is currently locked out
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) => now < until,
            None => false,
        }
    }

    /// Whether a lockout window was set and has already passed
    pub fn lock_expired(&self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) => now >= until,
            None => false,
        }
    }

    /// Seconds until the lockout window ends (0 when not locked)
    pub fn remaining_lockout_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.locked_until {
            Some(until) if now < until => (until - now).num_seconds().max(1),
            _ => 0,
        }
    }

    /// Applies a failure to an optional existing record.
    ///
    /// A record whose lockout window has already passed starts over from
    /// a single failure, so an old stale lock never compounds into an
    /// immediate re-lock. Attempt stores share this transition.
    pub fn apply_failure(
        existing: Option<LoginAttemptRecord>,
        now: DateTime<Utc>,
        threshold: u32,
        lockout: Duration,
    ) -> LoginAttemptRecord {
        match existing {
            Some(mut record) if !record.lock_expired(now) => {
                record.record_failure(now, threshold, lockout);
                record
            }
            _ => LoginAttemptRecord::first_failure(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: u32 = 5;

    fn lockout() -> Duration {
        Duration::minutes(15)
    }

    #[test]
    fn test_first_failure() {
        let now = Utc::now();
        let record = LoginAttemptRecord::first_failure(now);

        assert_eq!(record.failed_count, 1);
        assert!(!record.is_locked(now));
        assert_eq!(record.remaining_lockout_seconds(now), 0);
    }

    #[test]
    fn test_threshold_triggers_lock() {
        let now = Utc::now();
        let mut record = LoginAttemptRecord::first_failure(now);

        for i in 2..THRESHOLD {
            assert!(!record.record_failure(now, THRESHOLD, lockout()));
            assert_eq!(record.failed_count, i);
            assert!(!record.is_locked(now));
        }

        // The fifth failure opens the window
        assert!(record.record_failure(now, THRESHOLD, lockout()));
        assert_eq!(record.failed_count, THRESHOLD);
        assert!(record.is_locked(now));
    }

    #[test]
    fn test_one_below_threshold_does_not_lock() {
        let now = Utc::now();
        let mut record = LoginAttemptRecord::first_failure(now);
        for _ in 1..(THRESHOLD - 1) {
            record.record_failure(now, THRESHOLD, lockout());
        }
        assert_eq!(record.failed_count, THRESHOLD - 1);
        assert!(!record.is_locked(now));
    }

    #[test]
    fn test_lock_expires() {
        let now = Utc::now();
        let mut record = LoginAttemptRecord::first_failure(now);
        for _ in 1..THRESHOLD {
            record.record_failure(now, THRESHOLD, lockout());
        }
        assert!(record.is_locked(now));

        let later = now + Duration::minutes(16);
        assert!(!record.is_locked(later));
        assert!(record.lock_expired(later));
        assert_eq!(record.remaining_lockout_seconds(later), 0);
    }

    #[test]
    fn test_remaining_lockout_seconds() {
        let now = Utc::now();
        let mut record = LoginAttemptRecord::first_failure(now);
        for _ in 1..THRESHOLD {
            record.record_failure(now, THRESHOLD, lockout());
        }

        let five_minutes_in = now + Duration::minutes(5);
        let remaining = record.remaining_lockout_seconds(five_minutes_in);
        assert!(remaining > 9 * 60 && remaining <= 10 * 60);
    }

    #[test]
    fn test_apply_failure_starts_fresh_after_expired_lock() {
        let now = Utc::now();
        let mut record = LoginAttemptRecord::first_failure(now);
        for _ in 1..THRESHOLD {
            record.record_failure(now, THRESHOLD, lockout());
        }

        let later = now + Duration::minutes(20);
        let updated = LoginAttemptRecord::apply_failure(Some(record), later, THRESHOLD, lockout());

        assert_eq!(updated.failed_count, 1);
        assert!(!updated.is_locked(later));
    }

    #[test]
    fn test_apply_failure_without_existing_record() {
        let now = Utc::now();
        let record = LoginAttemptRecord::apply_failure(None, now, THRESHOLD, lockout());

        assert_eq!(record.failed_count, 1);
        assert_eq!(record.locked_until, None);
    }

    #[test]
    fn test_remaining_rounds_up_to_one_second() {
        let now = Utc::now();
        let mut record = LoginAttemptRecord::first_failure(now);
        for _ in 1..THRESHOLD {
            record.record_failure(now, THRESHOLD, lockout());
        }

        // A sliver of the window left still reports at least one second
        let almost_over = now + lockout() - Duration::milliseconds(200);
        assert!(record.is_locked(almost_over));
        assert_eq!(record.remaining_lockout_seconds(almost_over), 1);
    }
}
