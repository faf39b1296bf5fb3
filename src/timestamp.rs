//! Wall-clock access and the `DD-MM-YYYY HH:MM` display format.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Display format for update times and "last updated" stamps.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Source of local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn minute_of_hour(&self) -> u32 {
        self.now().minute()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Returns `None` for an invalid date or time.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_zero_padded_24h() {
        let clock = FixedClock::at(2025, 3, 7, 9, 5).unwrap();
        assert_eq!(format_timestamp(&clock.now()), "07-03-2025 09:05");

        let clock = FixedClock::at(2024, 12, 31, 23, 59).unwrap();
        assert_eq!(format_timestamp(&clock.now()), "31-12-2024 23:59");
    }

    #[test]
    fn test_minute_of_hour() {
        let clock = FixedClock::at(2025, 1, 1, 14, 42).unwrap();
        assert_eq!(clock.minute_of_hour(), 42);
    }

    #[test]
    fn test_fixed_clock_rejects_invalid() {
        assert!(FixedClock::at(2025, 2, 30, 0, 0).is_none());
        assert!(FixedClock::at(2025, 1, 1, 24, 0).is_none());
    }
}
