//! Wall clock samples and time sources

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

/// Length of a Bluetooth Current Time Service payload
pub const CTS_LEN: usize = 10;

/// Time fields needed to draw one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSample {
    /// Dial hour, 1-12
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// Day of month, 1-31
    pub day: u8,
}

impl ClockSample {
    /// Create a sample from a 12 or 24 hour clock reading.
    ///
    /// The dial has no zero position, so midnight and noon become 12.
    pub fn new(hour: u8, minute: u8, day: u8) -> Self {
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        Self { hour, minute, day }
    }

    /// Sample a local date and time
    pub fn from_datetime(time: NaiveDateTime) -> Self {
        Self::new(time.hour() as u8, time.minute() as u8, time.day() as u8)
    }
}

/// Source of the current wall clock time (UTC)
pub trait ClockSource {
    fn now(&self) -> NaiveDateTime;
}

/// Shift a UTC time into local time. Out of range results keep the UTC time.
pub fn local_time(utc: NaiveDateTime, utc_offset_secs: i32) -> NaiveDateTime {
    utc.checked_add_signed(TimeDelta::seconds(i64::from(utc_offset_secs)))
        .unwrap_or(utc)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    #[error("current time payload is too short")]
    Truncated,
    #[error("current time payload holds an invalid date")]
    InvalidDate,
    #[error("current time payload holds an invalid time of day")]
    InvalidTime,
}

/// Convert Current Time Service bytes to a date and time
pub fn parse_cts(bytes: &[u8]) -> Result<NaiveDateTime, TimeError> {
    let bytes: &[u8; CTS_LEN] = bytes
        .get(..CTS_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(TimeError::Truncated)?;

    let year = i32::from(u16::from_le_bytes([bytes[0], bytes[1]]));
    let month = u32::from(bytes[2]);
    let day = u32::from(bytes[3]);
    let hour = u32::from(bytes[4]);
    let min = u32::from(bytes[5]);
    let sec = u32::from(bytes[6]);
    // bytes[7] is the day of week, bytes[9] the adjust reason
    let milli = u32::from(bytes[8]) * 1000 / 256; // fractions_256 to milliseconds

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(TimeError::InvalidDate)?
        .and_hms_milli_opt(hour, min, sec, milli)
        .ok_or(TimeError::InvalidTime)
}
