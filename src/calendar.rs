// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-range calendar adapters.
//!
//! Conventional clock types cover a vanishing slice of the range a
//! [`Duration`] spans, so the conversions here are asymmetric: going
//! *from* `std::time::Duration` or `chrono::Duration` is total, going
//! *back* fails with an overflow condition once the magnitude leaves the
//! target's range. Sub-nanosecond remainders truncate toward zero on the
//! way out — the fixed-range types simply cannot carry them.

use crate::duration::Duration;
use crate::error::Error;
use crate::units::NANOS_PER_SECOND;
use chrono::{DateTime, TimeDelta, Utc};

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Duration::from_nanoseconds(value.as_nanos() as i128)
    }
}

impl From<TimeDelta> for Duration {
    fn from(value: TimeDelta) -> Self {
        let nanos =
            value.num_seconds() as i128 * NANOS_PER_SECOND as i128 + value.subsec_nanos() as i128;
        Duration::from_nanoseconds(nanos)
    }
}

impl TryFrom<&Duration> for TimeDelta {
    type Error = Error;

    /// Whole-nanosecond conversion; fails with an overflow condition
    /// beyond `chrono`'s range.
    fn try_from(value: &Duration) -> Result<Self, Error> {
        const TARGET: &str = "chrono::TimeDelta";
        if value.is_perpetual() {
            return Err(Error::RangeOverflow(TARGET));
        }

        // aeon-range magnitudes are out of range for chrono outright
        let magnitude = value.abs();
        if !magnitude.aeon_sequence().is_zero() {
            return Err(Error::RangeOverflow(TARGET));
        }
        let total_nanos = magnitude.year_remainder() as u128
            * crate::units::NANOS_PER_YEAR as u128
            + magnitude.nanosecond_remainder() as u128;

        let seconds = total_nanos / NANOS_PER_SECOND as u128;
        let subsec = (total_nanos % NANOS_PER_SECOND as u128) as u32;
        let seconds = i64::try_from(seconds).map_err(|_| Error::RangeOverflow(TARGET))?;
        let delta =
            TimeDelta::new(seconds, subsec).ok_or(Error::RangeOverflow(TARGET))?;
        Ok(if value.is_negative() { -delta } else { delta })
    }
}

impl TryFrom<Duration> for TimeDelta {
    type Error = Error;

    fn try_from(value: Duration) -> Result<Self, Error> {
        TimeDelta::try_from(&value)
    }
}

impl Duration {
    /// Elapsed time between two wall-clock instants.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Duration {
        Duration::from(end - start)
    }
}
