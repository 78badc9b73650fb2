// src/repositories/mapping.rs
//
// Column decoding shared by the SQLite repositories.
//
// Parse failures become explicit rusqlite conversion errors so that
// `query_map` callers see them, never silent defaults.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;
use uuid::Uuid;

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

fn column_index(row: &Row, column: &str) -> usize {
    row.as_ref().column_index(column).unwrap_or(0)
}

pub fn uuid_column(row: &Row, column: &str) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(column)?;
    Uuid::parse_str(&raw).map_err(|e| {
        conversion_error(
            column_index(row, column),
            format!("Invalid UUID in {} '{}': {}", column, raw, e),
        )
    })
}

/// NULL and empty strings both read as absent
pub fn optional_uuid_column(row: &Row, column: &str) -> rusqlite::Result<Option<Uuid>> {
    let raw: Option<String> = row.get(column)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value).map(Some).map_err(|e| {
            conversion_error(
                column_index(row, column),
                format!("Invalid UUID in {} '{}': {}", column, value, e),
            )
        }),
    }
}

pub fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    parse_timestamp(row, column, &raw)
}

pub fn optional_timestamp_column(row: &Row, column: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(column)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(row, column, value).map(Some),
    }
}

fn parse_timestamp(row: &Row, column: &str, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            conversion_error(
                column_index(row, column),
                format!("Invalid {} timestamp '{}': {}", column, raw, e),
            )
        })
}

/// Decode a text column through the type's `FromStr`
pub fn enum_column<T>(row: &Row, column: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(column)?;
    raw.parse::<T>()
        .map_err(|e| conversion_error(column_index(row, column), e))
}
