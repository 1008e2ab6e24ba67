//! Turning field values into cell text.

use anyhow::Context;
use lectern_kernel::settings::ConsoleSettings;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::{self, BorrowedFormatItem, OwnedFormatItem};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Shown for a timestamp that cannot be read, as browsers do.
pub const INVALID_DATE: &str = "Invalid Date";

const US_LAYOUT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
);

/// Zone-less layouts some backends use; read as UTC.
const NAIVE_LAYOUTS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
];

/// Renders cell values with the configured timestamp layout and offset.
#[derive(Debug, Clone)]
pub struct CellFormatter {
    timestamp_format: OwnedFormatItem,
    offset: UtcOffset,
}

impl CellFormatter {
    pub fn from_settings(settings: &ConsoleSettings) -> anyhow::Result<Self> {
        let timestamp_format = format_description::parse_owned::<1>(&settings.timestamp_format)
            .with_context(|| {
                format!(
                    "invalid console.timestamp_format '{}'",
                    settings.timestamp_format
                )
            })?;
        let offset = UtcOffset::from_whole_seconds(settings.utc_offset_minutes.saturating_mul(60))
            .with_context(|| {
                format!(
                    "console.utc_offset_minutes {} is out of range",
                    settings.utc_offset_minutes
                )
            })?;

        Ok(Self {
            timestamp_format,
            offset,
        })
    }

    pub fn text(&self, value: Option<&str>) -> String {
        value.unwrap_or_default().to_string()
    }

    pub fn number(&self, value: Option<i64>) -> String {
        value.map(|n| n.to_string()).unwrap_or_default()
    }

    pub fn flag(&self, value: Option<bool>) -> String {
        match value {
            Some(true) => "Yes".to_string(),
            Some(false) => "No".to_string(),
            None => String::new(),
        }
    }

    /// Local rendering of a backend timestamp. Absent timestamps render empty.
    pub fn timestamp(&self, value: Option<&str>) -> String {
        let Some(raw) = value else {
            return String::new();
        };

        parse_timestamp(raw)
            .and_then(|instant| {
                instant
                    .to_offset(self.offset)
                    .format(&self.timestamp_format)
                    .ok()
            })
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self {
            timestamp_format: OwnedFormatItem::from(US_LAYOUT),
            offset: UtcOffset::UTC,
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();

    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(instant);
    }

    // HTTP dates name the zone instead of giving an offset.
    let http_date = raw
        .strip_suffix(" GMT")
        .or_else(|| raw.strip_suffix(" UTC"))
        .map(|head| format!("{head} +0000"));
    if let Ok(instant) = OffsetDateTime::parse(http_date.as_deref().unwrap_or(raw), &Rfc2822) {
        return Some(instant);
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| PrimitiveDateTime::parse(raw, *layout).ok())
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_in_us_layout() {
        let fmt = CellFormatter::default();
        assert_eq!(
            fmt.timestamp(Some("2024-03-01T14:05:09Z")),
            "3/1/2024, 2:05:09 PM"
        );
        assert_eq!(
            fmt.timestamp(Some("2024-03-01T14:05:09.250+01:00")),
            "3/1/2024, 1:05:09 PM"
        );
    }

    #[test]
    fn reads_http_dates_and_naive_timestamps() {
        let fmt = CellFormatter::default();
        assert_eq!(
            fmt.timestamp(Some("Fri, 01 Mar 2024 14:05:09 GMT")),
            "3/1/2024, 2:05:09 PM"
        );
        assert_eq!(
            fmt.timestamp(Some("2024-03-01 09:30:00.123000")),
            "3/1/2024, 9:30:00 AM"
        );
    }

    #[test]
    fn applies_configured_offset_and_layout() {
        let settings = ConsoleSettings {
            timestamp_format: "[year]-[month]-[day] [hour]:[minute]".to_string(),
            utc_offset_minutes: 120,
            ..ConsoleSettings::default()
        };
        let fmt = CellFormatter::from_settings(&settings).unwrap();
        assert_eq!(fmt.timestamp(Some("2024-12-31T23:30:00Z")), "2025-01-01 01:30");
    }

    #[test]
    fn default_settings_match_default_formatter() {
        let fmt = CellFormatter::from_settings(&ConsoleSettings::default()).unwrap();
        assert_eq!(
            fmt.timestamp(Some("2024-07-04T00:00:00Z")),
            CellFormatter::default().timestamp(Some("2024-07-04T00:00:00Z"))
        );
    }

    #[test]
    fn unreadable_timestamps() {
        let fmt = CellFormatter::default();
        assert_eq!(fmt.timestamp(Some("yesterday")), INVALID_DATE);
        assert_eq!(fmt.timestamp(None), "");
    }

    #[test]
    fn rejects_bad_settings() {
        let bad_layout = ConsoleSettings {
            timestamp_format: "[nonsense]".to_string(),
            ..ConsoleSettings::default()
        };
        assert!(CellFormatter::from_settings(&bad_layout).is_err());

        let bad_offset = ConsoleSettings {
            utc_offset_minutes: 60 * 48,
            ..ConsoleSettings::default()
        };
        assert!(CellFormatter::from_settings(&bad_offset).is_err());
    }

    #[test]
    fn scalar_cells() {
        let fmt = CellFormatter::default();
        assert_eq!(fmt.flag(Some(true)), "Yes");
        assert_eq!(fmt.flag(Some(false)), "No");
        assert_eq!(fmt.flag(None), "");
        assert_eq!(fmt.number(Some(1965)), "1965");
        assert_eq!(fmt.text(None), "");
    }
}
