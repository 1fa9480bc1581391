// Wall-clock source for envelope timestamps

use chrono::{Local, NaiveDateTime, Timelike};

/// Source of the `last_updated` timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Current time rendered for an envelope.
    fn timestamp(&self) -> String {
        isoformat(self.now())
    }
}

/// Local wall-clock time of the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// ISO-8601 without offset, microsecond precision, fraction dropped when zero.
pub fn isoformat(at: NaiveDateTime) -> String {
    let micros = at.nanosecond() / 1_000;
    if micros == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", at.format("%Y-%m-%dT%H:%M:%S"), micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 14)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_isoformat_whole_seconds() {
        assert_eq!(isoformat(at(10, 0, 0, 0)), "2025-07-14T10:00:00");
    }

    #[test]
    fn test_isoformat_with_micros() {
        assert_eq!(isoformat(at(9, 45, 3, 120)), "2025-07-14T09:45:03.000120");
    }

    #[test]
    fn test_fixed_clock_timestamp() {
        let clock = FixedClock(at(10, 0, 0, 0));
        assert_eq!(clock.timestamp(), "2025-07-14T10:00:00");
    }

    #[test]
    fn test_local_clock_parses_back() {
        let stamp = LocalClock.timestamp();
        let parsed = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M:%S%.f");
        assert!(parsed.is_ok(), "not ISO-8601: {stamp}");
    }
}
