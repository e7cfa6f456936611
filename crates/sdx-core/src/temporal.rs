//! # Temporal Types
//!
//! UTC-only timestamp type for issuance dates and proof creation times.
//! All timestamps serialize in one fixed format: ISO 8601 with a `Z`
//! suffix, truncated to seconds (`2026-01-15T12:00:00Z`). Subsecond
//! precision would leak into signing input and break re-verification of
//! re-serialized documents.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A UTC timestamp with second-level precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build from a `chrono::DateTime<Utc>`, truncating to seconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let truncated = dt
            .with_nanosecond(0)
            .unwrap_or(dt);
        Self(truncated)
    }

    /// Parse from an RFC 3339 string (any offset), normalizing to UTC.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(value)?;
        Ok(Self::from_datetime(dt.with_timezone(&Utc)))
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The wire form: ISO 8601 UTC with `Z` suffix, second precision.
    pub fn to_wire_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_string_has_fixed_format() {
        let ts = Timestamp::parse("2026-01-15T12:00:00.987654321Z").unwrap();
        assert_eq!(ts.to_wire_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn parse_normalizes_offsets_to_utc() {
        let ts = Timestamp::parse("2026-01-15T13:00:00+01:00").unwrap();
        assert_eq!(ts.to_wire_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn serde_roundtrip_preserves_value() {
        let ts = Timestamp::parse("2026-06-01T08:30:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#""2026-06-01T08:30:00Z""#);
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn now_is_second_precision() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn deserialize_rejects_garbage() {
        let result: Result<Timestamp, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());
    }
}
