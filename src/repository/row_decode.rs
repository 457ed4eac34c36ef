//! MySQL row to ordered JSON record.
//!
//! Integers and floats become JSON numbers. DECIMAL stays a string so no
//! precision is lost. Temporal values become ISO-8601 strings.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::model::Record;

/// Decode every column of `row`, keeping column order.
pub fn decode_row(row: &MySqlRow) -> Result<Record, sqlx::Error> {
    let mut record = Record::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn decode_column(row: &MySqlRow, idx: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::from(row.try_get::<bool, _>(idx)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::from(row.try_get::<i64, _>(idx)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => Value::from(row.try_get::<u64, _>(idx)?),
        "YEAR" | "BIT" => match row.try_get::<u64, _>(idx) {
            Ok(n) => Value::from(n),
            Err(_) => decode_text(row, idx)?,
        },
        "FLOAT" => Value::from(f64::from(row.try_get::<f32, _>(idx)?)),
        "DOUBLE" => Value::from(row.try_get::<f64, _>(idx)?),
        "DECIMAL" => Value::String(row.try_get::<BigDecimal, _>(idx)?.to_string()),
        "DATE" => Value::String(row.try_get::<NaiveDate, _>(idx)?.to_string()),
        "TIME" => Value::String(time_text(&row.try_get::<MySqlTime, _>(idx)?)),
        "DATETIME" => Value::String(
            row.try_get::<NaiveDateTime, _>(idx)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        "TIMESTAMP" => Value::String(
            row.try_get::<DateTime<Utc>, _>(idx)?
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        _ => decode_text(row, idx)?,
    };
    Ok(value)
}

/// TIME is an interval in MySQL: it may be negative or exceed 24 hours.
/// Clock times keep the zero-padded `HH:MM:SS` form.
fn time_text(time: &MySqlTime) -> String {
    if !time.is_valid_time_of_day() {
        return time.to_string();
    }
    let mut text = format!(
        "{:02}:{:02}:{:02}",
        time.hours(),
        time.minutes(),
        time.seconds()
    );
    if time.microseconds() != 0 {
        text.push_str(&format!(".{:06}", time.microseconds()));
    }
    text
}

/// Text columns, falling back to lossy UTF-8 for binary ones.
fn decode_text(row: &MySqlRow, idx: usize) -> Result<Value, sqlx::Error> {
    match row.try_get::<String, _>(idx) {
        Ok(s) => Ok(Value::String(s)),
        Err(_) => {
            let bytes: Vec<u8> = row.try_get(idx)?;
            Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        }
    }
}
