use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::contract::{IndexItem, NotificationRecord};
use crate::error::MalformedRecordError;

/// Largest magnitude, in milliseconds from the epoch, that a JS `Date` accepts.
///
/// chrono's calendar ends earlier (around year 262142), so epoch values past
/// that point are rejected even though they fall inside this bound.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

pub fn transform(record: &NotificationRecord) -> Result<IndexItem, MalformedRecordError> {
    let key = record
        .object_key()
        .ok_or_else(|| MalformedRecordError::new("record is missing s3.object.key"))?;
    let event_time = record
        .event_time
        .as_ref()
        .ok_or_else(|| MalformedRecordError::new("record is missing eventTime"))?;

    Ok(IndexItem {
        key: key.to_string(),
        timestamp: normalize_event_time(event_time)?,
    })
}

/// Renders an event time as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Years outside
/// 0000..=9999 use the signed six-digit form, e.g. `+010000-01-01T00:00:00.000Z`.
pub fn normalize_event_time(event_time: &Value) -> Result<String, MalformedRecordError> {
    let parsed = match event_time {
        Value::String(text) => parse_timestamp_text(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .and_then(from_epoch_millis),
        _ => None,
    };

    parsed
        .map(to_iso_string)
        .ok_or_else(|| MalformedRecordError::new(format!("invalid eventTime: {event_time}")))
}

fn to_iso_string(timestamp: DateTime<Utc>) -> String {
    let year = timestamp.year();
    if (0..=9999).contains(&year) {
        return timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
    }

    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{sign}{:06}{}",
        year.unsigned_abs(),
        timestamp.format("-%m-%dT%H:%M:%S%.3fZ")
    )
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_rfc2822(text)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    if !(-MAX_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&millis) {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::contract::decode_record;

    fn record(value: Value) -> NotificationRecord {
        decode_record(value).expect("record should decode")
    }

    fn s3_record(key: &str, event_time: Value) -> NotificationRecord {
        record(json!({
            "eventTime": event_time,
            "s3": {"object": {"key": key}}
        }))
    }

    #[test]
    fn creates_item_from_s3_record() {
        let item = transform(&s3_record("testFileName", json!("2023-01-01T00:00:00.000Z")))
            .expect("transform should succeed");

        assert_eq!(
            item,
            IndexItem {
                key: "testFileName".to_string(),
                timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            }
        );
    }

    #[test]
    fn key_passes_through_verbatim() {
        for key in [
            "folder/sub folder/file+name%20.txt",
            "  padded  ",
            "unicode/ファイル.png",
            "",
        ] {
            let item = transform(&s3_record(key, json!("2023-01-01T00:00:00Z")))
                .expect("transform should succeed");
            assert_eq!(item.key, key);
        }
    }

    #[test]
    fn normalizes_timestamp_variants_to_millisecond_utc() {
        let cases = [
            (json!("2023-01-01T00:00:00Z"), "2023-01-01T00:00:00.000Z"),
            (json!("2023-01-01T00:00:00.5Z"), "2023-01-01T00:00:00.500Z"),
            (json!("2023-01-01T00:00:00.123456789Z"), "2023-01-01T00:00:00.123Z"),
            (json!("2023-01-01T02:30:00+02:00"), "2023-01-01T00:30:00.000Z"),
            (json!("2022-12-31T19:00:00.250-05:00"), "2023-01-01T00:00:00.250Z"),
            (json!("2023-01-01T00:00:00"), "2023-01-01T00:00:00.000Z"),
            (json!("2023-01-01T08:15"), "2023-01-01T08:15:00.000Z"),
            (json!("2023-01-01"), "2023-01-01T00:00:00.000Z"),
            (json!("Sun, 01 Jan 2023 00:00:00 +0000"), "2023-01-01T00:00:00.000Z"),
            (json!(" 2023-01-01T00:00:00Z "), "2023-01-01T00:00:00.000Z"),
            (json!(1_672_531_200_000_i64), "2023-01-01T00:00:00.000Z"),
            (json!(1_672_531_200_123.9), "2023-01-01T00:00:00.123Z"),
            (json!(0), "1970-01-01T00:00:00.000Z"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                normalize_event_time(&input).expect("timestamp should parse"),
                expected,
                "input: {input}"
            );
        }
    }

    #[test]
    fn expanded_years_render_with_six_digits() {
        let cases = [
            (json!(253_402_300_800_000_i64), "+010000-01-01T00:00:00.000Z"),
            (json!(-62_198_755_200_000_i64), "-000001-01-01T00:00:00.000Z"),
            (json!(-62_167_219_200_000_i64), "0000-01-01T00:00:00.000Z"),
            (json!(253_402_300_799_999_i64), "9999-12-31T23:59:59.999Z"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                normalize_event_time(&input).expect("timestamp should parse"),
                expected,
                "input: {input}"
            );
        }
    }

    #[test]
    fn epoch_beyond_chrono_calendar_is_rejected() {
        let error = normalize_event_time(&json!(MAX_EPOCH_MILLIS))
            .expect_err("year 275760 is outside chrono's range");
        assert!(error.message().starts_with("invalid eventTime"));
    }

    #[test]
    fn transform_is_deterministic() {
        let record = s3_record("a.txt", json!("2023-06-15T12:00:00.000+01:00"));
        let first = transform(&record).expect("transform should succeed");
        let second = transform(&record).expect("transform should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_missing_key() {
        let error = transform(&record(json!({"eventTime": "2023-01-01T00:00:00Z"})))
            .expect_err("missing key should fail");
        assert_eq!(error.message(), "record is missing s3.object.key");
    }

    #[test]
    fn rejects_missing_event_time() {
        let error = transform(&record(json!({"s3": {"object": {"key": "a"}}})))
            .expect_err("missing eventTime should fail");
        assert_eq!(error.message(), "record is missing eventTime");
    }

    #[test]
    fn rejects_unparsable_event_times() {
        for input in [
            json!("not a date"),
            json!(""),
            json!("2023-13-01T00:00:00Z"),
            json!("1672531200000"),
            json!(true),
            json!({"seconds": 1}),
            json!(9_000_000_000_000_000_i64),
        ] {
            let error = transform(&s3_record("a", input.clone()))
                .expect_err("invalid eventTime should fail");
            assert!(
                error.message().starts_with("invalid eventTime"),
                "input: {input}"
            );
        }
    }
}
