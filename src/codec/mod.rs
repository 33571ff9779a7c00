//! Field codec: conversions between raw cell text and semantic values.
//!
//! All functions here are pure. In particular, date display formats depend
//! on an explicit [`DateLocale`] parameter and never on ambient process
//! state.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Result of parsing a date-like cell.
///
/// A value that matches neither accepted textual shape is passed through
/// unchanged as [`DateValue::Raw`]; the caller decides whether a raw value
/// is acceptable in its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// A successfully parsed date-time (UTC).
    Timestamp(DateTime<Utc>),
    /// The original text, unparseable as a date.
    Raw(String),
}

impl DateValue {
    /// Returns the timestamp, if this value parsed as a date.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Raw(_) => None,
        }
    }
}

/// Date display style, selected per conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    /// `dd.mm.yyyy`-style patterns (any `de*` locale tag).
    German,
    /// `mm/dd/yyyy`-style patterns (everything else).
    #[default]
    Us,
}

impl DateLocale {
    /// Maps a BCP-47-ish locale tag to a date style.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with("de") {
            Self::German
        } else {
            Self::Us
        }
    }
}

/// Parses a date-like cell value.
///
/// Two textual shapes are accepted:
///
/// - `yyyy-mm-ddThh:mm:ss+00` — the start/end-date form; the two-digit
///   offset is completed to `+0000` before parsing,
/// - `mm/dd/yyyy` — the last-modified form, taken as midnight UTC.
///
/// A value containing `T` and `+` is only ever tried against the first
/// shape; everything else against the second. Anything that fails comes
/// back as [`DateValue::Raw`].
#[must_use]
pub fn parse_date_time(raw: &str) -> DateValue {
    let trimmed = raw.trim();
    if trimmed.contains('T') && trimmed.contains('+') {
        if let Ok(parsed) =
            DateTime::parse_from_str(&format!("{trimmed}00"), "%Y-%m-%dT%H:%M:%S%z")
        {
            return DateValue::Timestamp(parsed.with_timezone(&Utc));
        }
    } else if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return DateValue::Timestamp(Utc.from_utc_datetime(&midnight));
        }
    }
    DateValue::Raw(raw.to_string())
}

/// Formats a start/end date for the delimited representation.
#[must_use]
pub fn format_start_end(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S+00").to_string()
}

/// Formats a last-modified date for the delimited representation.
#[must_use]
pub fn format_last_modified(ts: DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y").to_string()
}

/// Selects the spreadsheet display format for a date-like cell.
///
/// The source text decides whether a time component is shown (the
/// ISO-with-offset shape carries one, the `/`-form does not); the locale
/// decides day-first versus month-first. Returns `None` for text that is
/// not date-shaped at all.
#[must_use]
pub fn display_number_format(raw: &str, locale: DateLocale) -> Option<&'static str> {
    if raw.contains('T') && raw.contains('+') {
        Some(match locale {
            DateLocale::German => "dd.mm.yyyy hh:mm:ss",
            DateLocale::Us => "mm/dd/yyyy hh:mm:ss",
        })
    } else if raw.contains('/') {
        Some(match locale {
            DateLocale::German => "dd.mm.yyyy",
            DateLocale::Us => "mm/dd/yyyy",
        })
    } else {
        None
    }
}

/// Coerces the `Match Similar Keywords` cell.
///
/// Only the literal tokens `"true"` and `"false"` are recognized; anything
/// else is a validation failure, not a coercion.
#[must_use]
pub fn parse_match_similar(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Coerces the `Use AAD Location` cell.
///
/// Only the literal tokens `"True"` and `"False"` are recognized.
#[must_use]
pub fn parse_use_aad_location(raw: &str) -> Option<bool> {
    match raw {
        "True" => Some(true),
        "False" => Some(false),
        _ => None,
    }
}

/// Splits a `;`-separated cell into tokens.
#[must_use]
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(';').map(str::to_string).collect()
}

/// Joins tokens back into a `;`-separated cell.
#[must_use]
pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(";")
}

/// Lower-cases tokens and drops duplicates, preserving first-seen order.
#[must_use]
pub fn dedup_lowercase(tokens: &[String]) -> Vec<String> {
    let mut unique = Vec::with_capacity(tokens.len());
    for token in tokens {
        let lowered = token.to_lowercase();
        if !unique.contains(&lowered) {
            unique.push(lowered);
        }
    }
    unique
}

/// Collapses the doubled-double-quote escaping convention (`""` to `"`)
/// used by the source representation of the variations cell.
#[must_use]
pub fn unescape_variations(raw: &str) -> String {
    raw.replace("\"\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use test_case::test_case;

    #[test]
    fn test_parse_iso_offset_form() {
        let value = parse_date_time("2031-02-20T09:30:00+00");
        let ts = value.as_timestamp().unwrap();
        assert_eq!(ts.hour(), 9);
        assert_eq!(format_start_end(ts), "2031-02-20T09:30:00+00");
    }

    #[test]
    fn test_parse_us_date_form() {
        let value = parse_date_time("02/20/2031");
        let ts = value.as_timestamp().unwrap();
        assert_eq!(format_last_modified(ts), "02/20/2031");
        assert_eq!(ts.hour(), 0);
    }

    #[test_case("not a date")]
    #[test_case("2031-02-20")]
    #[test_case("2031-02-20T09:30:00+00:00" ; "full offset form is rejected")]
    #[test_case("20.02.2031" ; "german form is rejected")]
    fn test_unparseable_passes_through(raw: &str) {
        assert_eq!(parse_date_time(raw), DateValue::Raw(raw.to_string()));
    }

    #[test]
    fn test_display_format_selection() {
        let iso = "2031-02-20T09:30:00+00";
        assert_eq!(
            display_number_format(iso, DateLocale::Us),
            Some("mm/dd/yyyy hh:mm:ss")
        );
        assert_eq!(
            display_number_format(iso, DateLocale::German),
            Some("dd.mm.yyyy hh:mm:ss")
        );
        assert_eq!(
            display_number_format("02/20/2031", DateLocale::German),
            Some("dd.mm.yyyy")
        );
        assert_eq!(display_number_format("plain text", DateLocale::Us), None);
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(DateLocale::from_tag("de"), DateLocale::German);
        assert_eq!(DateLocale::from_tag("de_DE.UTF-8"), DateLocale::German);
        assert_eq!(DateLocale::from_tag("en_US"), DateLocale::Us);
        assert_eq!(DateLocale::from_tag(""), DateLocale::Us);
    }

    #[test_case("true", Some(true))]
    #[test_case("false", Some(false))]
    #[test_case("True", None)]
    #[test_case("1", None)]
    #[test_case("", None)]
    fn test_match_similar_tokens(raw: &str, expected: Option<bool>) {
        assert_eq!(parse_match_similar(raw), expected);
    }

    #[test_case("True", Some(true))]
    #[test_case("False", Some(false))]
    #[test_case("true", None)]
    #[test_case("FALSE", None)]
    fn test_aad_location_tokens(raw: &str, expected: Option<bool>) {
        assert_eq!(parse_use_aad_location(raw), expected);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let tokens = split_tokens("Test;TESTRR;test;test_rr");
        assert_eq!(dedup_lowercase(&tokens), vec!["test", "testrr", "test_rr"]);
    }

    #[test]
    fn test_join_tokens() {
        let tokens = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_tokens(&tokens), "a;b");
    }

    #[test]
    fn test_unescape_variations() {
        assert_eq!(
            unescape_variations(r#"[{""title"":""Test""}]"#),
            r#"[{"title":"Test"}]"#
        );
    }
}
