//! Row-mapping input boundary.
//!
//! Tabular reading (CSV/INI, header-to-column mapping) is owned by an
//! external collaborator; it hands this crate one string-keyed mapping per
//! input row. This module provides the typed extraction helpers every
//! component uses to pull fields out of those mappings: a missing mandatory
//! field or an unparsable value is a fatal malformed-row error.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// One input row: column name → raw string value.
pub type Row = HashMap<String, String>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Returns a mandatory field, failing if the column is absent.
///
/// An empty value is allowed; only a missing column is an error.
pub fn field<'a>(row: &'a Row, table: &'static str, name: &str) -> Result<&'a str> {
    row.get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::MissingField {
            table,
            field: name.to_string(),
        })
}

/// Returns a field that may be absent. Absent and empty are both `None`.
pub fn field_opt<'a>(row: &'a Row, name: &str) -> Option<&'a str> {
    row.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parses a mandatory integer field.
pub fn field_u32(row: &Row, table: &'static str, name: &str) -> Result<u32> {
    let value = field(row, table, name)?;
    parse_u32(value, table, name)
}

/// Parses an integer value, reporting the offending field on failure.
pub fn parse_u32(value: &str, table: &'static str, name: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| Error::InvalidField {
        table,
        field: name.to_string(),
        value: value.to_string(),
    })
}

/// Parses an ISO date (`2024-06-12`).
///
/// Slashes are normalized to dashes first: spreadsheet exports routinely
/// write `2024/06/12` while claiming ISO 8601.
pub fn parse_date(value: &str, table: &'static str, name: &str) -> Result<NaiveDate> {
    let normalized = value.replace('/', "-");
    NaiveDate::parse_from_str(&normalized, DATE_FORMAT).map_err(|_| Error::InvalidField {
        table,
        field: name.to_string(),
        value: value.to_string(),
    })
}

/// Parses a wall-clock time (`09:30`) on the given day.
///
/// Times are carried as full date-times; clock arithmetic across a session
/// is simpler on a combined value than on a bare time of day.
pub fn parse_time_on(
    day: NaiveDate,
    value: &str,
    table: &'static str,
    name: &str,
) -> Result<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        Error::InvalidField {
            table,
            field: name.to_string(),
            value: value.to_string(),
        }
    })?;
    Ok(day.and_time(time))
}
