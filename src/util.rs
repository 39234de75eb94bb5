use crate::error::{RelstatError, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::time::Duration;

/// Parse a window bound: RFC3339, `YYYY-MM-DD` (midnight UTC), or "<n> days|weeks|months ago".
pub fn parse_date(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    // Relative duration (e.g., "2 weeks ago")
    if let Some(duration) = parse_natural_duration(input) {
        let duration = chrono::Duration::from_std(duration)
            .map_err(|_| RelstatError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return now
            .checked_sub_signed(duration)
            .ok_or_else(|| RelstatError::InvalidDate(format!("Duration overflow for '{input}'")));
    }

    Err(RelstatError::InvalidDate(format!(
        "'{input}' is not YYYY-MM-DD, RFC3339, or '<n> days ago'"
    )))
}

pub fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    let units = [(" days ago", 1u64), (" weeks ago", 7), (" months ago", 30)];
    for (suffix, days_per_unit) in units {
        if let Some(count) = input.strip_suffix(suffix) {
            if let Ok(n) = count.trim().parse::<u64>() {
                return n
                    .checked_mul(days_per_unit * 86400)
                    .map(Duration::from_secs);
            }
        }
    }

    None
}
