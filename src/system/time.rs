//! Time keeping module for PineTime

use core::cell::Cell;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike};
use embassy_sync::blocking_mutex::{raw::ThreadModeRawMutex, Mutex};
use embassy_time::{Duration, Instant};
use helium::{clock::TimeError, ClockSource};

/// Wall clock time paired with the system time it was taken at
#[derive(Clone, Copy)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime) -> Self {
        Self {
            time,
            instant: Instant::now(),
        }
    }

    /// Create new time reference from a UNIX timestamp
    pub fn from_timestamp(secs: i64) -> Self {
        let time = DateTime::from_timestamp(secs, 0)
            .unwrap_or_default()
            .naive_utc();
        Self::from_datetime(time)
    }

    /// Create new time reference from Current Time Service data
    pub fn from_cts_bytes(bytes: &[u8]) -> Result<Self, TimeError> {
        helium::clock::parse_cts(bytes).map(Self::from_datetime)
    }

    fn at(&self, now: Instant) -> NaiveDateTime {
        let elapsed = now.duration_since(self.instant).as_micros() as i64;
        self.time
            .checked_add_signed(TimeDelta::microseconds(elapsed))
            .unwrap_or(self.time)
    }
}

static REFERENCE: Mutex<ThreadModeRawMutex, Cell<Option<TimeReference>>> =
    Mutex::new(Cell::new(None));

/// Handle to the system wall clock (UTC)
#[derive(Clone, Copy)]
pub struct TimeManager;

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference) -> Self {
        let manager = Self;
        manager.set_time(reference);
        manager
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let now = Instant::now();
        REFERENCE
            .lock(|reference| reference.get())
            .map(|reference| reference.at(now))
            .unwrap_or_default()
    }

    /// Update time reference
    pub fn set_time(&self, reference: TimeReference) {
        REFERENCE.lock(|cell| cell.set(Some(reference)));
    }

    /// Time left until the next full minute
    pub fn until_next_minute(&self) -> Duration {
        let time = self.get_time();
        // Leap seconds report more than 1e9 ns
        let millis = time.second() * 1_000 + (time.nanosecond() / 1_000_000).min(999);
        Duration::from_millis(u64::from(60_000 - millis))
    }
}

impl ClockSource for TimeManager {
    fn now(&self) -> NaiveDateTime {
        self.get_time()
    }
}
