use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use steem_proc_macros::{NumBytes, Read, Write};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Seconds since the unix epoch, encoded as a little-endian u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Read, Write, NumBytes)]
pub struct TimePointSec {
    utc_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError(String);

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timestamp: {}", self.0)
    }
}

impl std::error::Error for TimeParseError {}

impl TimePointSec {
    #[inline]
    #[must_use]
    pub const fn new(utc_seconds: u32) -> Self {
        Self { utc_seconds }
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        self.utc_seconds
    }

    /// Current wall clock time, truncated to whole seconds.
    pub fn now() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64);
        Self::new(seconds as u32)
    }

    #[must_use]
    pub const fn plus_seconds(&self, seconds: u32) -> Self {
        Self::new(self.utc_seconds.saturating_add(seconds))
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.utc_seconds as i64, 0) {
            Some(datetime) => write!(f, "{}", datetime.format(FORMAT)),
            None => Err(fmt::Error),
        }
    }
}

impl FromStr for TimePointSec {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('Z').unwrap_or(s);
        let parsed = NaiveDateTime::parse_from_str(trimmed, FORMAT)
            .map_err(|e| TimeParseError(format!("{s}: {e}")))?;

        let seconds = parsed.and_utc().timestamp();
        if seconds < 0 || seconds > u32::MAX as i64 {
            return Err(TimeParseError(format!("{s} is out of range")));
        }
        Ok(TimePointSec::new(seconds as u32))
    }
}

impl Serialize for TimePointSec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimePointSecVisitor;

        impl<'de> serde::de::Visitor<'de> for TimePointSecVisitor {
            type Value = TimePointSec;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a timestamp string like 2016-04-06T08:29:29")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                TimePointSec::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TimePointSecVisitor)
    }
}
