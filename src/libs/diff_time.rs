//! Time-of-day values that subtract without reference to a calendar date.
//!
//! A [`DiffTime`] keeps hour, minute, second and microsecond fields only.
//! Subtraction projects both operands onto the same dummy date first, so the
//! result is always the signed distance between two wall-clock readings.

use crate::libs::error::{Result, TimesheetError};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

const MICROS_PER_SECOND: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiffTime {
    time: NaiveTime,
}

impl DiffTime {
    /// 00:00:00
    pub const MIN: DiffTime = DiffTime { time: NaiveTime::MIN };

    /// Builds a value from its components, rejecting out-of-range fields.
    pub fn new(hour: u32, minute: u32, second: u32, microsecond: u32) -> Result<Self> {
        NaiveTime::from_hms_micro_opt(hour, minute, second, microsecond)
            .map(|time| DiffTime { time })
            .ok_or_else(|| {
                TimesheetError::validation(format!(
                    "Invalid time of day {:02}:{:02}:{:02}.{:06}",
                    hour, minute, second, microsecond
                ))
            })
    }

    /// 23:59:59.999999
    pub fn max() -> Self {
        Self::from_time(&NaiveTime::from_hms_micro_opt(23, 59, 59, MICROS_PER_SECOND - 1).unwrap_or(NaiveTime::MIN))
    }

    /// Copies the time-of-day fields of any chrono time value, dropping date and zone.
    pub fn from_time<T: Timelike>(value: &T) -> Self {
        // Leap seconds carry nanoseconds past one second; clamp them into the last microsecond.
        let micro = (value.nanosecond() / 1_000).min(MICROS_PER_SECOND - 1);
        let time = NaiveTime::from_hms_micro_opt(value.hour(), value.minute(), value.second(), micro).unwrap_or(NaiveTime::MIN);
        DiffTime { time }
    }

    /// Current local wall-clock time.
    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn second(&self) -> u32 {
        self.time.second()
    }

    pub fn microsecond(&self) -> u32 {
        self.time.nanosecond() / 1_000
    }

    /// Signed duration `self - other`, measured on a shared dummy date.
    pub fn subtract(&self, other: &DiffTime) -> Duration {
        self.on_dummy_date() - other.on_dummy_date()
    }

    fn on_dummy_date(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default().and_time(self.time)
    }
}

impl Sub for DiffTime {
    type Output = Duration;

    fn sub(self, other: DiffTime) -> Duration {
        self.subtract(&other)
    }
}

impl From<NaiveTime> for DiffTime {
    fn from(time: NaiveTime) -> Self {
        Self::from_time(&time)
    }
}

impl From<NaiveDateTime> for DiffTime {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_time(&datetime)
    }
}

impl fmt::Display for DiffTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.microsecond() == 0 {
            write!(f, "{}", self.time.format("%H:%M:%S"))
        } else {
            write!(f, "{}", self.time.format("%H:%M:%S%.6f"))
        }
    }
}

impl FromStr for DiffTime {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(|time| Self::from_time(&time))
            .map_err(|_| TimesheetError::validation(format!("{:?} is not an ISO-formatted time", s)))
    }
}

impl Serialize for DiffTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiffTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
