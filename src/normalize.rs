//! Normalizers turning raw cell text into typed values

use crate::error::FormatError;
use crate::types::DateRange;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use phonenumber::{Mode, country};
use regex::Regex;
use std::sync::LazyLock;

/// Region assumed for ten-digit numbers written without a country code
pub const DEFAULT_REGION: country::Id = country::Id::US;

/// Literal separating the two endpoints of a date range
pub const RANGE_SEPARATOR: &str = " to ";

const NATIONAL_NUMBER_DIGITS: usize = 10;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%b %d, %Y %H:%M:%S %z",
    "%m/%d/%Y %H:%M:%S %z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %H:%M",
    "%b %d %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%a %b %d %H:%M:%S %Y",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%a, %b %d, %Y",
];

// Trailing zone designators that carry no offset beyond UTC
static UTC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:UTC|GMT|Z)$").unwrap());

/// Normalize a phone number to E.164.
///
/// Any `+` signs are dropped and exactly one is re-added before parsing, so
/// `"15551234567"` and `"+1 555 123 4567"` yield the same result. A
/// ten-digit number that is not valid with a leading country code is read
/// as a national number of [`DEFAULT_REGION`].
pub fn normalize_phone(text: &str) -> Result<String, FormatError> {
    let bare = text.trim().replace('+', "");
    let international = phonenumber::parse(None, format!("+{bare}"));

    if let Ok(number) = &international
        && phonenumber::is_valid(number)
    {
        return Ok(to_e164(number));
    }

    let digits = bare.chars().filter(char::is_ascii_digit).count();
    if digits == NATIONAL_NUMBER_DIGITS
        && let Ok(number) = phonenumber::parse(Some(DEFAULT_REGION), &bare)
    {
        return Ok(to_e164(&number));
    }

    international
        .map(|number| to_e164(&number))
        .map_err(|e| FormatError::Phone {
            input: text.to_string(),
            details: e.to_string(),
        })
}

fn to_e164(number: &phonenumber::PhoneNumber) -> String {
    number.format().mode(Mode::E164).to_string()
}

/// Parse a free-text date/time into Unix epoch seconds.
///
/// Text without an explicit offset is taken as UTC. Sub-second precision is
/// truncated.
pub fn normalize_date(text: &str) -> Result<i64, FormatError> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.timestamp());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt.timestamp());
        }
    }

    let naive = UTC_SUFFIX.replace(trimmed, "");
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&naive, format) {
            return Ok(dt.and_utc().timestamp());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&naive, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp());
        }
    }

    Err(FormatError::Date(text.to_string()))
}

/// Parse `"<date> to <date>"` into a [`DateRange`]
pub fn normalize_date_range(text: &str) -> Result<DateRange, FormatError> {
    let segments: Vec<&str> = text.split(RANGE_SEPARATOR).collect();

    let [from, to] = segments.as_slice() else {
        return Err(FormatError::DateRange {
            input: text.to_string(),
            segments: segments.len(),
        });
    };

    Ok(DateRange {
        from: normalize_date(from)?,
        to: normalize_date(to)?,
    })
}

/// Parse a base-10 integer, ignoring surrounding whitespace
pub fn normalize_int(text: &str) -> Result<i64, FormatError> {
    text.trim()
        .parse()
        .map_err(|_| FormatError::Integer(text.to_string()))
}
