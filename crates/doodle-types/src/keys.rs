use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Invalid partition key - must be YY-MM-DD.")]
    DayBucket(String),

    #[error("Invalid sort key - Must be something like 2023-02-24T04:04:38.569Z.")]
    Timestamp(String),
}

impl KeyError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        match self {
            Self::DayBucket(s) | Self::Timestamp(s) => s,
        }
    }
}

/// Partition key: the UTC calendar day a doodle was created on, as `YY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayBucket(String);

impl DayBucket {
    /// Accepts exactly two digits, dash, two digits, dash, two digits.
    /// Calendar validity is not checked; an impossible day simply holds no doodles.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let b = s.as_bytes();
        let well_formed = b.len() == 8
            && b.iter().enumerate().all(|(i, &c)| match i {
                2 | 5 => c == b'-',
                _ => c.is_ascii_digit(),
            });
        if !well_formed {
            return Err(KeyError::DayBucket(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Bucket for the current UTC day.
    pub fn today() -> Self {
        Self::from(&Timestamp::now())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Timestamp> for DayBucket {
    fn from(ts: &Timestamp) -> Self {
        Self(ts.0.format("%y-%m-%d").to_string())
    }
}

impl fmt::Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort key: creation time in UTC with millisecond precision,
/// always rendered as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Accepts a string only if it is already in canonical form, i.e. parsing
    /// and formatting it again gives back the same text.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let parsed = DateTime::parse_from_rfc3339(s)
            .map_err(|_| KeyError::Timestamp(s.to_string()))?
            .with_timezone(&Utc);
        let ts = Self(parsed);
        if ts.to_string() != s {
            return Err(KeyError::Timestamp(s.to_string()));
        }
        Ok(ts)
    }

    /// Current UTC time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(3))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn day_bucket(&self) -> DayBucket {
        DayBucket::from(self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for DayBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DayBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_bucket_pattern() {
        assert!(DayBucket::parse("23-02-24").is_ok());
        assert!(DayBucket::parse("99-99-99").is_ok());

        for bad in ["2023-02-24", "23-2-24", "23_02_24", "23-02-2a", "", "23-02-24 "] {
            assert_eq!(DayBucket::parse(bad), Err(KeyError::DayBucket(bad.to_string())));
        }
    }

    #[test]
    fn timestamp_must_be_canonical() {
        let ts = Timestamp::parse("2023-02-24T04:04:38.569Z").unwrap();
        assert_eq!(ts.to_string(), "2023-02-24T04:04:38.569Z");

        for bad in [
            "2023-02-24T04:04:38Z",
            "2023-02-24T04:04:38.5690Z",
            "2023-02-24T04:04:38.569+00:00",
            "2023-02-24t04:04:38.569z",
            "2023-02-30T04:04:38.569Z",
            "2023-02-24 04:04:38.569Z",
            "not a date",
        ] {
            assert!(Timestamp::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn bucket_derives_from_utc_date() {
        let dt = Utc.with_ymd_and_hms(2023, 2, 24, 23, 59, 59).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.day_bucket().as_str(), "23-02-24");
        assert_eq!(ts.to_string(), "2023-02-24T23:59:59.000Z");
    }

    #[test]
    fn now_has_millisecond_precision() {
        let ts = Timestamp::now();
        assert_eq!(Timestamp::parse(&ts.to_string()).unwrap(), ts);
        assert_eq!(ts.as_datetime().timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn keys_serialize_as_strings() {
        let ts = Timestamp::parse("2023-02-24T04:04:38.569Z").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2023-02-24T04:04:38.569Z\"");
        assert!(serde_json::from_str::<DayBucket>("\"2023-02-24\"").is_err());
    }
}
