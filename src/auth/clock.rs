//! Timestamp sources for request signing

use chrono::Utc;

/// Supplies the Unix timestamp embedded in signed requests
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds, formatted as a decimal string
    fn timestamp(&self) -> String;
}

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Utc::now().timestamp().to_string()
    }
}

/// Always returns the same timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1_500_000_000).timestamp(), "1500000000");
    }

    #[test]
    fn test_system_clock_is_unix_seconds() {
        let ts: i64 = SystemClock.timestamp().parse().unwrap();
        let now = Utc::now().timestamp();
        assert!((now - ts).abs() <= 1);
    }
}
