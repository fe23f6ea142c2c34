//! Rate sheet: a tariff table plus the moment it was last synchronised

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::TariffTable;

/// Sheets older than this are flagged for refresh (weekly sync).
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSheet {
    pub last_updated: DateTime<Utc>,
    #[serde(rename = "rates")]
    pub table: TariffTable,
}

impl RateSheet {
    pub fn new(last_updated: DateTime<Utc>, table: TariffTable) -> Self {
        Self {
            last_updated,
            table,
        }
    }

    /// Fractional days elapsed since `last_updated`.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        (now - self.last_updated).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0 * 24.0)
    }

    /// True once strictly more than `stale_after_days` have passed.
    pub fn needs_update(&self, now: DateTime<Utc>, stale_after_days: i64) -> bool {
        self.age_days(now) > stale_after_days as f64
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sheet() -> RateSheet {
        RateSheet::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            TariffTable::new(),
        )
    }

    #[test]
    fn fresh_within_window() {
        let s = sheet();
        let now = s.last_updated + Duration::days(3);
        assert!((s.age_days(now) - 3.0).abs() < 1e-9);
        assert!(!s.needs_update(now, DEFAULT_STALE_AFTER_DAYS));
    }

    #[test]
    fn exactly_seven_days_is_not_stale() {
        let s = sheet();
        let now = s.last_updated + Duration::days(7);
        assert!(!s.needs_update(now, 7));
    }

    #[test]
    fn stale_just_past_window() {
        let s = sheet();
        let now = s.last_updated + Duration::days(7) + Duration::minutes(1);
        assert!(s.needs_update(now, 7));
    }

    #[test]
    fn custom_window() {
        let s = sheet();
        let now = s.last_updated + Duration::days(20);
        assert!(!s.needs_update(now, 30));
        assert!(s.needs_update(now, 14));
    }
}
