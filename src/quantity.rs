// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed-quantity boundary.
//!
//! The float-facing edge of the crate speaks `qtty` quantities, so call
//! sites keep their units in the type system:
//!
//! ```
//! use deeptime::Duration;
//! use qtty::Days;
//!
//! let d = Duration::try_from(Days::new(365.25))?;
//! assert_eq!(d.year_remainder(), 1);
//! # Ok::<(), deeptime::Error>(())
//! ```
//!
//! Conversions go through the scalar factories, so NaN quantities fail
//! with the same invalid-argument condition and ±∞ map to the perpetual
//! values.

use crate::duration::Duration;
use crate::error::Error;
use qtty::{Days, JulianYears, Seconds};

impl TryFrom<Days> for Duration {
    type Error = Error;

    fn try_from(value: Days) -> Result<Self, Error> {
        Duration::from_days(value.value())
    }
}

impl TryFrom<Seconds> for Duration {
    type Error = Error;

    fn try_from(value: Seconds) -> Result<Self, Error> {
        Duration::from_seconds(value.value())
    }
}

impl TryFrom<JulianYears> for Duration {
    type Error = Error;

    fn try_from(value: JulianYears) -> Result<Self, Error> {
        Duration::from_years(value.value())
    }
}

impl Duration {
    /// Approximate total as a `qtty` day quantity.
    pub fn as_days(&self) -> Days {
        Days::new(self.total_days_f64())
    }

    /// Approximate total as a `qtty` second quantity.
    pub fn as_seconds(&self) -> Seconds {
        Seconds::new(self.total_seconds_f64())
    }

    /// Approximate total as a `qtty` Julian-year quantity.
    pub fn as_julian_years(&self) -> JulianYears {
        JulianYears::new(self.total_years_f64())
    }
}
