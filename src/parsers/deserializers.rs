use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an exporter timestamp into the wall-clock time it was written in.
///
/// Accepts naive ISO-8601 (`2021-03-04T10:20:30`) and RFC 3339 with an offset.
/// An offset is kept as written rather than converted, so the calendar day
/// always matches the one the exporter used for `date_index.json`.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DateTime::<FixedOffset>::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

/// Custom deserializer for message timestamps: ISO-8601 strings or Unix milliseconds
pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => parse_datetime(&s)
            .ok_or_else(|| Error::custom(format!("invalid ISO-8601 timestamp: {}", s))),
        _ => Err(Error::custom("datetime must be a string or number")),
    }
}

pub fn serialize_datetime<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Treat an explicit `null` list the same as a missing one
pub fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;
    use crate::models::Message;

    fn message_json(datetime: &str) -> String {
        format!(r#"{{"datetime": {}, "author": {{"name": "A", "role": "other"}}}}"#, datetime)
    }

    #[test]
    fn test_naive_iso_timestamp() {
        let msg: Message = serde_json::from_str(&message_json(r#""2019-12-31T23:59:59""#)).unwrap();
        assert_eq!(msg.day(), NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
        assert_eq!(msg.datetime.hour(), 23);
    }

    #[test]
    fn test_offset_timestamp_keeps_written_day() {
        // 23:30 at +03:00 is 20:30 UTC, but the written day must stay the same
        let msg: Message =
            serde_json::from_str(&message_json(r#""2019-12-31T23:30:00+03:00""#)).unwrap();
        assert_eq!(msg.day(), NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
        assert_eq!(msg.datetime.hour(), 23);

        let msg: Message =
            serde_json::from_str(&message_json(r#""2020-01-01T01:00:00-05:00""#)).unwrap();
        assert_eq!(msg.day(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_fractional_seconds_and_space_separator() {
        assert!(parse_datetime("2021-01-02T03:04:05.123456").is_some());
        assert!(parse_datetime("2021-01-02 03:04:05").is_some());
    }

    #[test]
    fn test_millisecond_timestamp() {
        let msg: Message = serde_json::from_str(&message_json("1609459200000")).unwrap();
        assert_eq!(msg.day(), NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        assert!(serde_json::from_str::<Message>(&message_json(r#""yesterday""#)).is_err());
        assert!(serde_json::from_str::<Message>(&message_json("true")).is_err());
    }

    #[test]
    fn test_serialize_roundtrips_written_time() {
        let msg: Message = serde_json::from_str(&message_json(r#""2021-03-04T10:20:30""#)).unwrap();
        let out = serde_json::to_string(&msg).unwrap();
        assert!(out.contains(r#""datetime":"2021-03-04T10:20:30""#));
    }
}
