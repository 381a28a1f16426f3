use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default timezone for valuation dates.
/// This is the canonical timezone used to convert UTC instants to domain
/// dates. The tracked funds trade on mainland exchanges, so Asia/Shanghai
/// is the natural default.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::Asia::Shanghai;

/// Converts a UTC instant to a valuation date in the given timezone.
///
/// Use this whenever a "business date" is needed from a timestamp, so the
/// holding-duration math stays consistent across the codebase.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Convenience function that uses the default valuation timezone.
pub fn valuation_date_today() -> NaiveDate {
    valuation_date_from_utc(Utc::now(), DEFAULT_VALUATION_TZ)
}
