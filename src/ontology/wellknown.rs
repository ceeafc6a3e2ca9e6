//! Timestamps, durations and 64-bit integers in their proto3 JSON mapping.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-)?(\d+)(?:\.(\d{1,9}))?s$").expect("valid duration regex"));

const NANOS_PER_SECOND: u32 = 1_000_000_000;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A point in time, serialized as RFC 3339 in UTC (`2024-01-01T00:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s).map(|at| Self(at.with_timezone(&Utc)))
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
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid duration '{0}', expected decimal seconds with an 's' suffix")]
pub struct ParseDurationError(String);

/// A signed span of time, serialized as decimal seconds (`"172800s"`, `"1.5s"`).
///
/// Seconds and nanos always carry the same sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: i64,
    nanos: i32,
}

impl Duration {
    pub const ZERO: Duration = Duration {
        seconds: 0,
        nanos: 0,
    };

    pub fn from_secs(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Saturates at the `i64` second range.
    pub fn from_days(days: i64) -> Self {
        Self::from_secs(days.saturating_mul(SECONDS_PER_DAY))
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> i32 {
        self.nanos
    }
}

/// Spans beyond `i64::MAX` seconds saturate.
impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        match i64::try_from(d.as_secs()) {
            Ok(seconds) => Self {
                seconds,
                nanos: d.subsec_nanos() as i32,
            },
            Err(_) => Self {
                seconds: i64::MAX,
                nanos: NANOS_PER_SECOND as i32 - 1,
            },
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds < 0 || self.nanos < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", self.seconds.unsigned_abs())?;

        let nanos = self.nanos.unsigned_abs();
        if nanos != 0 {
            let digits = format!("{nanos:09}");
            let frac = if nanos % 1_000_000 == 0 {
                &digits[..3]
            } else if nanos % 1_000 == 0 {
                &digits[..6]
            } else {
                &digits[..]
            };
            write!(f, ".{frac}")?;
        }

        f.write_str("s")
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DURATION_RE
            .captures(s)
            .ok_or_else(|| ParseDurationError(s.to_string()))?;

        let seconds: i64 = caps[2]
            .parse()
            .map_err(|_| ParseDurationError(s.to_string()))?;
        let nanos = match caps.get(3) {
            Some(frac) => {
                let padded = format!("{:0<9}", frac.as_str());
                padded
                    .parse::<u32>()
                    .map_err(|_| ParseDurationError(s.to_string()))?
            }
            None => 0,
        };
        debug_assert!(nanos < NANOS_PER_SECOND);

        let sign = if caps.get(1).is_some() { -1 } else { 1 };
        Ok(Self {
            seconds: sign * seconds,
            nanos: sign as i32 * nanos as i32,
        })
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// 64-bit integers travel as JSON strings but are accepted as numbers too.
pub mod int64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
            Repr::Number(n) => Ok(n),
        }
    }
}
