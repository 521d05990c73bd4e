//! Custom serde helpers for the portal's wire formats.

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Portal timestamps.
///
/// The portal writes `DateTimeOffset` values with an offset and plain
/// `DateTime` values without one. Offset-less values are taken as UTC.
/// Serializes as RFC 3339 in UTC.
pub mod portal_datetime {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", raw)))
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[test]
    fn test_parse_offset_and_naive() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(portal_datetime::parse("2024-01-15T10:30:00Z"), Some(expected));
        assert_eq!(portal_datetime::parse("2024-01-15T12:30:00+02:00"), Some(expected));
        assert_eq!(portal_datetime::parse("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(
            portal_datetime::parse("2024-01-15T10:30:00.1234567"),
            Some(expected + chrono::Duration::nanoseconds(123_456_700))
        );
        assert_eq!(portal_datetime::parse("yesterday"), None);
    }

    #[test]
    fn test_null_as_default() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[serde(deserialize_with = "null_as_default")]
            tags: Vec<String>,
        }
        let row: Row = serde_json::from_str(r#"{"tags":null}"#).unwrap();
        assert!(row.tags.is_empty());
    }

    #[test]
    fn test_serialize_is_utc_rfc3339() {
        #[derive(serde::Serialize)]
        struct Row {
            #[serde(with = "portal_datetime")]
            at: DateTime<Utc>,
        }
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            serde_json::to_string(&Row { at }).unwrap(),
            r#"{"at":"2024-01-15T10:30:00.000Z"}"#
        );
    }
}
