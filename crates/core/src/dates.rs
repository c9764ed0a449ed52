//! Flexible date deserialization.
//!
//! Start dates arrive from clients either as a full RFC 3339 timestamp or
//! as a plain `YYYY-MM-DD` date; both normalize to a UTC timestamp (plain
//! dates at midnight UTC) before reaching storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::types::Timestamp;

/// Parse an RFC 3339 timestamp or a plain ISO date into a UTC timestamp.
pub fn parse_flexible(raw: &str) -> Result<Timestamp, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        // Plain dates normalize to midnight UTC.
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    Err(format!("'{raw}' n'est pas une date valide"))
}

/// Serde helper for optional date fields: accepts a string (RFC 3339 or
/// `YYYY-MM-DD`) or null/absent.
pub fn deserialize_opt_flexible<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_flexible(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339() {
        let ts = parse_flexible("2024-03-15T10:30:00Z").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn parses_plain_date_at_midnight_utc() {
        let ts = parse_flexible("2024-03-15").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.to_rfc3339(), "2024-03-15T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_flexible("15/03/2024").is_err());
        assert!(parse_flexible("not a date").is_err());
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let ts = parse_flexible("2024-03-15T10:30:00+01:00").unwrap();
        assert_eq!(ts.hour(), 9);
    }
}
