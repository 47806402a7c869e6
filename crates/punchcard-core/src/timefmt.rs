//! Serde helpers for the `YYYY-MM-DD HH:MM:SS` wire format.
//!
//! Output records use space-separated date-times with seconds precision, not
//! chrono's default RFC 3339 rendering. Annotate fields with
//! `#[serde(with = "crate::timefmt")]`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format for full date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "crate::timefmt")]
        at: NaiveDateTime,
    }

    #[test]
    fn serializes_space_separated() {
        let at = NaiveDateTime::parse_from_str("2025-03-01 21:30:05", super::DATETIME_FORMAT)
            .expect("valid test timestamp");
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        assert_eq!(json, r#"{"at":"2025-03-01 21:30:05"}"#);
    }

    #[test]
    fn rejects_rfc3339_input() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"at":"2025-03-01T21:30:05Z"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn roundtrips() {
        let json = r#"{"at":"2024-12-31 23:59:59"}"#;
        let parsed: Wrapper = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }
}
