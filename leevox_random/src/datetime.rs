// Tick-based timestamp used by the date/time draws.
//
// A `DateTime` counts 100-nanosecond ticks since 0001-01-01T00:00:00 in the
// proleptic Gregorian calendar, up to the last tick of 9999-12-31. Random
// date/time draws are linear draws over this tick count, so the tick is the
// finest granularity a drawn value can have.
//
// Conversion to and from `std::time::SystemTime` goes through the Unix epoch,
// which sits at a fixed tick offset.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use leevox_prng::{RandomError, Result};

pub const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;
const MAX_TICKS: i64 = 3_155_378_975_999_999_999;
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// A point in time with 100 ns resolution over years 1 through 9999.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "i64")
)]
pub struct DateTime {
    ticks: i64,
}

impl DateTime {
    /// 0001-01-01T00:00:00.
    pub const MIN: DateTime = DateTime { ticks: 0 };
    /// 9999-12-31T23:59:59.9999999.
    pub const MAX: DateTime = DateTime { ticks: MAX_TICKS };
    /// 1970-01-01T00:00:00.
    pub const UNIX_EPOCH: DateTime = DateTime {
        ticks: UNIX_EPOCH_TICKS,
    };

    pub fn from_ticks(ticks: i64) -> Result<Self> {
        if !(0..=MAX_TICKS).contains(&ticks) {
            return Err(RandomError::InvalidArgument {
                name: "ticks",
                reason: format!("{ticks} is outside [0, {MAX_TICKS}]"),
            });
        }
        Ok(DateTime { ticks })
    }

    /// Caller guarantees `ticks` is within `[0, MAX_TICKS]`.
    pub(crate) fn from_ticks_in_range(ticks: i64) -> Self {
        debug_assert!((0..=MAX_TICKS).contains(&ticks));
        DateTime { ticks }
    }

    pub fn ticks(self) -> i64 {
        self.ticks
    }

    /// Ticks from `earlier` to `self`; negative when `earlier` is later.
    pub fn ticks_since(self, earlier: DateTime) -> i64 {
        self.ticks - earlier.ticks
    }

    /// Shift by a signed number of ticks, failing outside the valid range.
    pub fn add_ticks(self, ticks: i64) -> Result<Self> {
        match self.ticks.checked_add(ticks) {
            Some(sum) => Self::from_ticks(sum),
            None => Err(RandomError::InvalidArgument {
                name: "ticks",
                reason: format!("adding {ticks} to {} overflows", self.ticks),
            }),
        }
    }

    /// Convert a `SystemTime`, truncating to whole ticks.
    pub fn from_system_time(time: SystemTime) -> Result<Self> {
        let offset_nanos: i128 = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_nanos() as i128,
            Err(before) => -(before.duration().as_nanos() as i128),
        };
        let ticks = UNIX_EPOCH_TICKS as i128 + offset_nanos / NANOS_PER_TICK as i128;
        let ticks = i64::try_from(ticks).map_err(|_| RandomError::InvalidArgument {
            name: "time",
            reason: format!("{ticks} ticks does not fit a DateTime"),
        })?;
        Self::from_ticks(ticks)
    }

    /// Convert to a `SystemTime`, or `None` if the platform cannot represent
    /// this instant.
    pub fn to_system_time(self) -> Option<SystemTime> {
        let offset = self.ticks - UNIX_EPOCH_TICKS;
        let magnitude = offset.unsigned_abs();
        let span = Duration::new(
            magnitude / TICKS_PER_SECOND as u64,
            ((magnitude % TICKS_PER_SECOND as u64) * NANOS_PER_TICK as u64) as u32,
        );
        if offset >= 0 {
            UNIX_EPOCH.checked_add(span)
        } else {
            UNIX_EPOCH.checked_sub(span)
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({} ticks)", self.ticks)
    }
}

impl TryFrom<i64> for DateTime {
    type Error = RandomError;

    fn try_from(ticks: i64) -> Result<Self> {
        Self::from_ticks(ticks)
    }
}

impl From<DateTime> for i64 {
    fn from(value: DateTime) -> i64 {
        value.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_enforced() {
        assert_eq!(DateTime::from_ticks(0), Ok(DateTime::MIN));
        assert_eq!(DateTime::from_ticks(MAX_TICKS), Ok(DateTime::MAX));
        assert!(DateTime::from_ticks(-1).is_err());
        assert!(DateTime::from_ticks(MAX_TICKS + 1).is_err());
        assert!(DateTime::MAX.add_ticks(1).is_err());
        assert!(DateTime::MIN.add_ticks(i64::MIN).is_err());
    }

    #[test]
    fn unix_epoch_round_trips() {
        assert_eq!(
            DateTime::from_system_time(UNIX_EPOCH),
            Ok(DateTime::UNIX_EPOCH)
        );
        assert_eq!(DateTime::UNIX_EPOCH.to_system_time(), Some(UNIX_EPOCH));
    }

    #[test]
    fn system_time_truncates_to_ticks() {
        let t = UNIX_EPOCH + Duration::new(1, 250);
        let dt = DateTime::from_system_time(t).unwrap();
        assert_eq!(dt.ticks_since(DateTime::UNIX_EPOCH), TICKS_PER_SECOND + 2);
        assert_eq!(
            dt.to_system_time(),
            Some(UNIX_EPOCH + Duration::new(1, 200))
        );
    }

    #[test]
    fn before_epoch_is_supported() {
        let t = UNIX_EPOCH - Duration::from_secs(86_400);
        let dt = DateTime::from_system_time(t).unwrap();
        assert_eq!(dt.ticks(), UNIX_EPOCH_TICKS - 86_400 * TICKS_PER_SECOND);
        assert_eq!(dt.to_system_time(), Some(t));
    }

    #[test]
    fn display_shows_ticks() {
        assert_eq!(DateTime::MIN.to_string(), "DateTime(0 ticks)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_and_validation() {
        let json = serde_json::to_string(&DateTime::UNIX_EPOCH).unwrap();
        assert_eq!(json, UNIX_EPOCH_TICKS.to_string());
        let back: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DateTime::UNIX_EPOCH);
        assert!(serde_json::from_str::<DateTime>("-5").is_err());
    }
}
