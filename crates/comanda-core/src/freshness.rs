//! Ticket Freshness
//!
//! Elapsed time since an order was placed and the urgency tier derived from it.
//! Everything takes an explicit `now`; nothing here reads the clock.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::config::UrgencyThresholds;
use crate::models::TicketStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyTier {
    Ok,
    Warn,
    Danger,
}

impl UrgencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Ok => "ok",
            UrgencyTier::Warn => "warn",
            UrgencyTier::Danger => "danger",
        }
    }
}

/// Parse an API timestamp. Naive timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Whole minutes from `ordered_at` to `now`.
///
/// Missing, unparsable or future timestamps count as 0 (fresh).
pub fn elapsed_minutes(ordered_at: Option<&str>, now: DateTime<Utc>) -> i64 {
    ordered_at
        .and_then(parse_timestamp)
        .map(|t| (now - t).num_minutes().max(0))
        .unwrap_or(0)
}

pub fn urgency_tier(minutes: i64, thresholds: &UrgencyThresholds) -> UrgencyTier {
    if minutes >= thresholds.danger_after {
        UrgencyTier::Danger
    } else if minutes >= thresholds.warn_after {
        UrgencyTier::Warn
    } else {
        UrgencyTier::Ok
    }
}

/// Age badge data for one ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    pub minutes: i64,
    pub tier: UrgencyTier,
    /// Overdue and still in the kitchen
    pub alarming: bool,
}

impl Freshness {
    pub fn of(
        ordered_at: Option<&str>,
        status: TicketStatus,
        now: DateTime<Utc>,
        thresholds: &UrgencyThresholds,
    ) -> Self {
        let minutes = elapsed_minutes(ordered_at, now);
        let tier = urgency_tier(minutes, thresholds);
        Self {
            minutes,
            tier,
            alarming: tier == UrgencyTier::Danger && status.is_active(),
        }
    }
}

/// `HH:MM` in the browser's local time, `—` when unknown
pub fn format_clock(ts: Option<&str>) -> String {
    ts.and_then(parse_timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_elapsed_minutes() {
        assert_eq!(elapsed_minutes(Some("2026-10-16T12:00:00+00:00"), now()), 30);
        assert_eq!(elapsed_minutes(Some("2026-10-16T07:00:00-05:00"), now()), 30);
        assert_eq!(elapsed_minutes(Some("2026-10-16T12:29:59.900"), now()), 0);
        assert_eq!(elapsed_minutes(Some("2026-10-16T12:18:00Z"), now()), 12);
    }

    #[test]
    fn test_elapsed_minutes_fails_open() {
        assert_eq!(elapsed_minutes(None, now()), 0);
        assert_eq!(elapsed_minutes(Some(""), now()), 0);
        assert_eq!(elapsed_minutes(Some("ayer"), now()), 0);
        // Clock skew: order "in the future"
        assert_eq!(elapsed_minutes(Some("2026-10-16T13:00:00Z"), now()), 0);
    }

    #[test]
    fn test_elapsed_never_negative() {
        for minutes_ago in [0i64, 1, 59, 600, 100_000] {
            let t = now() - chrono::Duration::minutes(minutes_ago);
            let elapsed = elapsed_minutes(Some(&t.to_rfc3339()), now());
            assert!(elapsed >= 0);
            assert_eq!(elapsed, minutes_ago);
        }
    }

    #[test]
    fn test_tier_boundaries() {
        let th = UrgencyThresholds::DEFAULT;
        assert_eq!(urgency_tier(0, &th), UrgencyTier::Ok);
        assert_eq!(urgency_tier(th.warn_after - 1, &th), UrgencyTier::Ok);
        assert_eq!(urgency_tier(th.warn_after, &th), UrgencyTier::Warn);
        assert_eq!(urgency_tier(th.danger_after - 1, &th), UrgencyTier::Warn);
        assert_eq!(urgency_tier(th.danger_after, &th), UrgencyTier::Danger);
    }

    #[test]
    fn test_tier_monotonic() {
        let th = UrgencyThresholds { warn_after: 3, danger_after: 7 };
        let tiers: Vec<_> = (0..20).map(|m| urgency_tier(m, &th)).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_alarming_only_for_active() {
        let th = UrgencyThresholds::DEFAULT;
        let old = Some("2026-10-16T11:00:00Z");
        assert!(Freshness::of(old, TicketStatus::Partial, now(), &th).alarming);
        assert!(!Freshness::of(old, TicketStatus::Ready, now(), &th).alarming);
        assert!(!Freshness::of(None, TicketStatus::Pending, now(), &th).alarming);
    }

    #[test]
    fn test_format_clock_placeholder() {
        assert_eq!(format_clock(None), "—");
        assert_eq!(format_clock(Some("no-date")), "—");
        assert_eq!(format_clock(Some("2026-10-16T12:00:00Z")).len(), 5);
    }
}
