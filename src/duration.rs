// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Mixed-radix duration value.
//!
//! [`Duration`] spans Planck time (~5.4 × 10⁻⁴⁴ s) to beyond 10¹⁸⁰⁷ years
//! without precision loss by storing five remainder layers instead of one
//! tick counter:
//!
//! | Layer | Type | Capacity (exclusive) |
//! |-------|------|----------------------|
//! | `planck` | `f64` | [`PLANCK_PER_YOCTOSECOND`] (≈1.85 × 10²⁰) |
//! | `yoctos` | `u64` | [`YOCTOS_PER_NANOSECOND`] (10¹⁵) |
//! | `nanos` | `u64` | [`NANOS_PER_YEAR`] (31 557 600 × 10⁹) |
//! | `years` | `u32` | [`YEARS_PER_AEON`] (10⁶) |
//! | `aeons` | [`AeonSequence`] | 10¹⁸ per term, ≤ 100 terms |
//!
//! Each field is a true remainder, strictly below its own capacity; the
//! sign applies to the whole value, and ±infinity ("perpetual") values
//! carry only the sign. Values are immutable: every constructor and
//! every algebraic operation re-runs the normalization pipeline.
//!
//! Arithmetic saturates to ±infinity when the aeon layer would outgrow
//! its 100-term bound; constructors surface the same condition as an
//! overflow error instead.

use crate::aeon::AeonSequence;
use crate::error::{Error, Result};
use crate::units::{
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICROSECOND, NANOS_PER_MILLISECOND,
    NANOS_PER_MINUTE, NANOS_PER_SECOND, NANOS_PER_YEAR, PLANCK_PER_YOCTOSECOND,
    SECONDS_PER_YEAR, YEARS_PER_AEON, YOCTOS_PER_ATTOSECOND, YOCTOS_PER_FEMTOSECOND,
    YOCTOS_PER_NANOSECOND, YOCTOS_PER_PICOSECOND, YOCTOS_PER_YEAR_F64,
    YOCTOS_PER_ZEPTOSECOND,
};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Duration
// ═══════════════════════════════════════════════════════════════════════════

/// A signed span of time on the cosmological scale.
///
/// See the module docs for the layer layout. Construct via the scalar
/// factories ([`Duration::from_years`], [`Duration::from_nanoseconds`], …),
/// the multi-unit [`Duration::builder`], or parsing (`"5y 3d".parse()`).
#[derive(Debug, Clone, PartialEq)]
pub struct Duration {
    negative: bool,
    perpetual: bool,
    planck: f64,
    yoctos: u64,
    nanos: u64,
    years: u32,
    aeons: AeonSequence,
}

// `planck` is never NaN (factories reject NaN before a value exists), so
// the derived partial equality is total.
impl Eq for Duration {}

impl Duration {
    /// The unique zero value.
    pub const ZERO: Duration = Duration {
        negative: false,
        perpetual: false,
        planck: 0.0,
        yoctos: 0,
        nanos: 0,
        years: 0,
        aeons: AeonSequence::new(),
    };

    /// Positive infinity — larger than any finite duration.
    pub const POSITIVE_INFINITY: Duration = Duration {
        negative: false,
        perpetual: true,
        planck: 0.0,
        yoctos: 0,
        nanos: 0,
        years: 0,
        aeons: AeonSequence::new(),
    };

    /// Negative infinity — smaller than any finite duration.
    pub const NEGATIVE_INFINITY: Duration = Duration {
        negative: true,
        perpetual: true,
        planck: 0.0,
        yoctos: 0,
        nanos: 0,
        years: 0,
        aeons: AeonSequence::new(),
    };

    // ── accessors ─────────────────────────────────────────────────────

    /// True when the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True for ±infinity.
    pub fn is_perpetual(&self) -> bool {
        self.perpetual
    }

    /// True for any non-perpetual value.
    pub fn is_finite(&self) -> bool {
        !self.perpetual
    }

    /// True only for [`Duration::ZERO`].
    pub fn is_zero(&self) -> bool {
        !self.perpetual
            && self.planck == 0.0
            && self.yoctos == 0
            && self.nanos == 0
            && self.years == 0
            && self.aeons.is_zero()
    }

    /// −1, 0 or +1.
    pub fn sign(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// Sub-yoctosecond remainder in Planck-time units.
    pub fn planck_remainder(&self) -> f64 {
        self.planck
    }

    /// Sub-nanosecond remainder in yoctoseconds.
    pub fn yoctosecond_remainder(&self) -> u64 {
        self.yoctos
    }

    /// Sub-year remainder in nanoseconds.
    pub fn nanosecond_remainder(&self) -> u64 {
        self.nanos
    }

    /// Sub-aeon remainder in years.
    pub fn year_remainder(&self) -> u32 {
        self.years
    }

    /// Aeon count beyond the year remainder.
    pub fn aeon_sequence(&self) -> &AeonSequence {
        &self.aeons
    }

    // ── scalar factories ──────────────────────────────────────────────

    /// Duration of `value` Julian years. `value` may be fractional or
    /// astronomically large; ±∞ map to the perpetual values and NaN is an
    /// invalid argument.
    pub fn from_years(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_years_f64(v))
    }

    /// Duration of `value` aeons (10⁶ years each). Exact for exactly
    /// representable integers: `from_aeons(1e18)` yields the two-term
    /// sequence `[0, 1]`.
    pub fn from_aeons(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_aeons_f64(v))
    }

    /// Duration of `value` fixed 86 400 s days.
    pub fn from_days(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_unit_f64(v, NANOS_PER_DAY))
    }

    /// Duration of `value` hours.
    pub fn from_hours(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_unit_f64(v, NANOS_PER_HOUR))
    }

    /// Duration of `value` minutes.
    pub fn from_minutes(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_unit_f64(v, NANOS_PER_MINUTE))
    }

    /// Duration of `value` seconds.
    pub fn from_seconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_unit_f64(v, NANOS_PER_SECOND))
    }

    /// Duration of `value` milliseconds.
    pub fn from_milliseconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_unit_f64(v, NANOS_PER_MILLISECOND))
    }

    /// Duration of `value` microseconds.
    pub fn from_microseconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| acc.add_unit_f64(v, NANOS_PER_MICROSECOND))
    }

    /// Exact duration of `value` whole nanoseconds.
    pub fn from_nanoseconds(value: i128) -> Duration {
        if value == 0 {
            return Duration::ZERO;
        }
        let mut acc = Accumulator::default();
        acc.add_nanos(value.unsigned_abs());
        acc.finish_saturating(value < 0)
    }

    /// Duration of `value` picoseconds.
    pub fn from_picoseconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| {
            acc.add_yoctos_f64(v * YOCTOS_PER_PICOSECOND as f64)
        })
    }

    /// Duration of `value` femtoseconds.
    pub fn from_femtoseconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| {
            acc.add_yoctos_f64(v * YOCTOS_PER_FEMTOSECOND as f64)
        })
    }

    /// Duration of `value` attoseconds.
    pub fn from_attoseconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| {
            acc.add_yoctos_f64(v * YOCTOS_PER_ATTOSECOND as f64)
        })
    }

    /// Duration of `value` zeptoseconds.
    pub fn from_zeptoseconds(value: f64) -> Result<Duration> {
        Self::try_from_f64(value, |acc, v| {
            acc.add_yoctos_f64(v * YOCTOS_PER_ZEPTOSECOND as f64)
        })
    }

    /// Exact duration of `value` whole yoctoseconds.
    pub fn from_yoctoseconds(value: i128) -> Duration {
        if value == 0 {
            return Duration::ZERO;
        }
        let mut acc = Accumulator::default();
        acc.add_yoctos(value.unsigned_abs());
        acc.finish_saturating(value < 0)
    }

    /// Duration of `value` Planck-time units.
    ///
    /// Planck input cannot carry a sign: anything below zero (including
    /// −∞) clamps to [`Duration::ZERO`].
    pub fn from_planck(value: f64) -> Result<Duration> {
        if value.is_nan() {
            return Err(Error::NanInput);
        }
        if value <= 0.0 {
            return Ok(Duration::ZERO);
        }
        if value.is_infinite() {
            return Ok(Duration::POSITIVE_INFINITY);
        }
        let mut acc = Accumulator::default();
        acc.add_planck(value)?;
        acc.finish(false)
    }

    /// Exact duration of `value` whole Julian years. Never fails.
    pub fn from_whole_years(value: u64) -> Duration {
        let mut acc = Accumulator::default();
        acc.add_years(value as u128);
        acc.finish_saturating(false)
    }

    /// Exact duration of `value` whole seconds. Never fails.
    pub fn from_whole_seconds(value: u64) -> Duration {
        let mut acc = Accumulator::default();
        acc.add_nanos(value as u128 * NANOS_PER_SECOND as u128);
        acc.finish_saturating(false)
    }

    /// Multi-unit constructor.
    pub fn builder() -> DurationBuilder {
        DurationBuilder::default()
    }

    fn try_from_f64(
        value: f64,
        add: impl FnOnce(&mut Accumulator, f64) -> Result<()>,
    ) -> Result<Duration> {
        if value.is_nan() {
            return Err(Error::NanInput);
        }
        if value == 0.0 {
            return Ok(Duration::ZERO);
        }
        if value.is_infinite() {
            return Ok(if value < 0.0 {
                Duration::NEGATIVE_INFINITY
            } else {
                Duration::POSITIVE_INFINITY
            });
        }
        let negative = value < 0.0;
        let mut acc = Accumulator::default();
        add(&mut acc, value.abs())?;
        acc.finish(negative)
    }

    // ── raw persistence form ──────────────────────────────────────────

    /// The seven persisted fields, verbatim.
    pub fn to_raw(&self) -> RawDuration {
        RawDuration {
            is_negative: self.negative,
            is_perpetual: self.perpetual,
            planck_time: self.planck,
            total_yoctoseconds: self.yoctos,
            total_nanoseconds: self.nanos,
            years: self.years,
            aeon_sequence: self.aeons.terms().to_vec(),
        }
    }

    /// Reconstruct from persisted fields without re-running
    /// normalization, so an encoded value decodes to exactly the value
    /// that was encoded. The caller is trusted to supply fields within
    /// their documented capacities.
    pub fn from_raw(raw: RawDuration) -> Duration {
        Duration {
            negative: raw.is_negative,
            perpetual: raw.is_perpetual,
            planck: raw.planck_time,
            yoctos: raw.total_yoctoseconds,
            nanos: raw.total_nanoseconds,
            years: raw.years,
            aeons: AeonSequence::from_terms_unchecked(raw.aeon_sequence),
        }
    }

    // ── totals ────────────────────────────────────────────────────────

    /// Approximate total in Julian years (±∞ for perpetual values).
    pub fn total_years_f64(&self) -> f64 {
        if self.perpetual {
            return if self.negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        let magnitude = self.aeons.to_f64() * YEARS_PER_AEON as f64
            + self.years as f64
            + self.nanos as f64 / NANOS_PER_YEAR as f64
            + self.yoctos as f64 / YOCTOS_PER_YEAR_F64
            + self.planck / (PLANCK_PER_YOCTOSECOND * YOCTOS_PER_YEAR_F64);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Approximate total in fixed 86 400 s days.
    pub fn total_days_f64(&self) -> f64 {
        self.total_seconds_f64() / crate::units::SECONDS_PER_DAY as f64
    }

    /// Approximate total in seconds.
    pub fn total_seconds_f64(&self) -> f64 {
        if self.perpetual {
            return if self.negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        let yoctos_per_second = YOCTOS_PER_NANOSECOND as f64 * NANOS_PER_SECOND as f64;
        let magnitude = (self.aeons.to_f64() * YEARS_PER_AEON as f64 + self.years as f64)
            * SECONDS_PER_YEAR as f64
            + self.nanos as f64 / NANOS_PER_SECOND as f64
            + self.yoctos as f64 / yoctos_per_second
            + self.planck / (PLANCK_PER_YOCTOSECOND * yoctos_per_second);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Approximate total in nanoseconds.
    pub fn total_nanoseconds_f64(&self) -> f64 {
        self.total_seconds_f64() * NANOS_PER_SECOND as f64
    }

    // ── algebra ───────────────────────────────────────────────────────

    /// Negation: flips the sign, leaves the magnitude untouched. Zero
    /// stays non-negative.
    pub fn negate(&self) -> Duration {
        if self.is_zero() {
            return Duration::ZERO;
        }
        let mut out = self.clone();
        out.negative = !self.negative;
        out
    }

    /// Magnitude with a non-negative sign.
    pub fn abs(&self) -> Duration {
        if self.negative {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Saturating addition.
    ///
    /// Infinity arithmetic: ∞ + finite = ∞, and the opposing perpetual
    /// pair ∞ + (−∞) cancels to [`Duration::ZERO`] — the crate's defined
    /// policy. Finite magnitudes that outgrow the aeon bound saturate to
    /// ±infinity.
    pub fn saturating_add(&self, other: &Duration) -> Duration {
        match (self.perpetual, other.perpetual) {
            (true, true) => {
                if self.negative == other.negative {
                    self.clone()
                } else {
                    Duration::ZERO
                }
            }
            (true, false) => self.clone(),
            (false, true) => other.clone(),
            (false, false) => self.add_finite(other),
        }
    }

    /// Saturating subtraction: `self + (−other)`.
    pub fn saturating_sub(&self, other: &Duration) -> Duration {
        self.saturating_add(&other.negate())
    }

    fn add_finite(&self, other: &Duration) -> Duration {
        if self.negative == other.negative {
            match Self::magnitude_add(self, other) {
                Ok(parts) => Self::from_magnitude(self.negative, parts),
                Err(_) => Self::infinity(self.negative),
            }
        } else {
            match Self::magnitude_cmp(self, other) {
                Ordering::Equal => Duration::ZERO,
                Ordering::Greater => {
                    Self::from_magnitude(self.negative, Self::magnitude_sub(self, other))
                }
                Ordering::Less => {
                    Self::from_magnitude(other.negative, Self::magnitude_sub(other, self))
                }
            }
        }
    }

    /// Multiply by a real factor, renormalizing the full pipeline.
    ///
    /// Defined corner cases: a NaN factor is an invalid argument;
    /// perpetual × 0 is [`Duration::ZERO`] (the annihilator wins); an
    /// infinite factor over a non-zero magnitude is perpetual.
    pub fn checked_scale(&self, factor: f64) -> Result<Duration> {
        if factor.is_nan() {
            return Err(Error::NanInput);
        }
        Ok(self.scale_saturating(factor))
    }

    fn scale_saturating(&self, factor: f64) -> Duration {
        if factor.is_nan() {
            return Duration::ZERO;
        }
        if self.perpetual {
            if factor == 0.0 {
                return Duration::ZERO;
            }
            return Self::infinity(self.negative ^ (factor < 0.0));
        }
        if factor == 0.0 || self.is_zero() {
            return Duration::ZERO;
        }
        if factor.is_infinite() {
            return Self::infinity(self.negative ^ (factor < 0.0));
        }

        let negative = self.negative ^ (factor < 0.0);
        let f = factor.abs();
        let mut acc = Accumulator::default();
        let scaled = (|| -> Result<()> {
            acc.add_planck(self.planck * f)?;
            acc.add_yoctos_f64(self.yoctos as f64 * f)?;
            acc.add_nanos_f64(self.nanos as f64 * f);
            acc.add_years_f64(self.years as f64 * f)?;
            for (position, &term) in self.aeons.terms().iter().enumerate() {
                acc.add_aeons_scaled(term as f64 * f, position)?;
            }
            Ok(())
        })();
        match scaled {
            Ok(()) => acc.finish_saturating(negative),
            Err(_) => Self::infinity(negative),
        }
    }

    /// Divide by a real divisor. Division of a non-zero finite value by
    /// zero saturates to ±infinity; `0 / 0` is [`Duration::ZERO`].
    pub fn checked_div(&self, divisor: f64) -> Result<Duration> {
        if divisor.is_nan() {
            return Err(Error::NanInput);
        }
        Ok(self.scale_saturating(1.0 / divisor))
    }

    fn infinity(negative: bool) -> Duration {
        if negative {
            Duration::NEGATIVE_INFINITY
        } else {
            Duration::POSITIVE_INFINITY
        }
    }

    // ── magnitude helpers ─────────────────────────────────────────────

    fn magnitude_add(a: &Duration, b: &Duration) -> Result<MagnitudeParts> {
        let mut planck = a.planck + b.planck;
        let mut carry_yocto = 0u64;
        while planck >= PLANCK_PER_YOCTOSECOND {
            planck -= PLANCK_PER_YOCTOSECOND;
            carry_yocto += 1;
        }

        let yocto_sum = a.yoctos + b.yoctos + carry_yocto;
        let carry_nano = yocto_sum / YOCTOS_PER_NANOSECOND;
        let yoctos = yocto_sum % YOCTOS_PER_NANOSECOND;

        let nano_sum = a.nanos + b.nanos + carry_nano;
        let carry_year = nano_sum / NANOS_PER_YEAR;
        let nanos = nano_sum % NANOS_PER_YEAR;

        let year_sum = a.years as u64 + b.years as u64 + carry_year;
        let carry_aeon = year_sum / YEARS_PER_AEON;
        let years = (year_sum % YEARS_PER_AEON) as u32;

        let mut aeons = a.aeons.checked_add(&b.aeons)?;
        if carry_aeon > 0 {
            aeons.add_scalar(carry_aeon as u128)?;
        }
        Ok((planck, yoctos, nanos, years, aeons))
    }

    /// Layer-wise subtraction with borrows. Requires `|a| >= |b|`.
    fn magnitude_sub(a: &Duration, b: &Duration) -> MagnitudeParts {
        let mut borrow_yocto = 0u64;
        let mut planck = a.planck - b.planck;
        if planck < 0.0 {
            planck += PLANCK_PER_YOCTOSECOND;
            borrow_yocto = 1;
            // a subtrahend below the float resolution at the capacity
            // rounds the borrow result back up to the capacity itself;
            // fold it back and cancel the borrow
            if planck >= PLANCK_PER_YOCTOSECOND {
                planck -= PLANCK_PER_YOCTOSECOND;
                borrow_yocto = 0;
            }
        }
        planck = planck.max(0.0);

        let mut borrow_nano = 0u64;
        let b_yoctos = b.yoctos + borrow_yocto;
        let yoctos = if a.yoctos >= b_yoctos {
            a.yoctos - b_yoctos
        } else {
            borrow_nano = 1;
            a.yoctos + YOCTOS_PER_NANOSECOND - b_yoctos
        };

        let mut borrow_year = 0u64;
        let b_nanos = b.nanos + borrow_nano;
        let nanos = if a.nanos >= b_nanos {
            a.nanos - b_nanos
        } else {
            borrow_year = 1;
            a.nanos + NANOS_PER_YEAR - b_nanos
        };

        let mut borrow_aeon = false;
        let b_years = b.years as u64 + borrow_year;
        let years = if a.years as u64 >= b_years {
            a.years as u64 - b_years
        } else {
            borrow_aeon = true;
            a.years as u64 + YEARS_PER_AEON - b_years
        };

        let mut aeons = a.aeons.borrowing_sub(&b.aeons);
        if borrow_aeon {
            aeons = aeons.borrowing_sub(&AeonSequence::one());
        }

        (planck, yoctos, nanos, years as u32, aeons)
    }

    fn magnitude_cmp(a: &Duration, b: &Duration) -> Ordering {
        a.aeons
            .cmp_magnitude(&b.aeons)
            .then(a.years.cmp(&b.years))
            .then(a.nanos.cmp(&b.nanos))
            .then(a.yoctos.cmp(&b.yoctos))
            .then(a.planck.total_cmp(&b.planck))
    }

    fn from_magnitude(negative: bool, parts: MagnitudeParts) -> Duration {
        let (planck, yoctos, nanos, years, aeons) = parts;
        let planck = if planck <= 0.0 { 0.0 } else { planck };
        let zero =
            planck == 0.0 && yoctos == 0 && nanos == 0 && years == 0 && aeons.is_zero();
        Duration {
            negative: negative && !zero,
            perpetual: false,
            planck,
            yoctos,
            nanos,
            years,
            aeons,
        }
    }
}

type MagnitudeParts = (f64, u64, u64, u32, AeonSequence);

impl Default for Duration {
    fn default() -> Self {
        Duration::ZERO
    }
}

// ── ordering / hashing ────────────────────────────────────────────────────

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.sign(), other.sign());
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == 0 {
            return Ordering::Equal;
        }
        let magnitude = match (self.perpetual, other.perpetual) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Self::magnitude_cmp(self, other),
        };
        if sa < 0 {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.perpetual.hash(state);
        self.planck.to_bits().hash(state);
        self.yoctos.hash(state);
        self.nanos.hash(state);
        self.years.hash(state);
        self.aeons.hash(state);
    }
}

// ── operators ─────────────────────────────────────────────────────────────

impl Neg for Duration {
    type Output = Duration;
    fn neg(self) -> Duration {
        self.negate()
    }
}

impl Neg for &Duration {
    type Output = Duration;
    fn neg(self) -> Duration {
        self.negate()
    }
}

impl Add for Duration {
    type Output = Duration;
    fn add(self, rhs: Duration) -> Duration {
        self.saturating_add(&rhs)
    }
}

impl Add for &Duration {
    type Output = Duration;
    fn add(self, rhs: &Duration) -> Duration {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = self.saturating_add(&rhs);
    }
}

impl Sub for Duration {
    type Output = Duration;
    fn sub(self, rhs: Duration) -> Duration {
        self.saturating_sub(&rhs)
    }
}

impl Sub for &Duration {
    type Output = Duration;
    fn sub(self, rhs: &Duration) -> Duration {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = self.saturating_sub(&rhs);
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;
    fn mul(self, rhs: f64) -> Duration {
        self.scale_saturating(rhs)
    }
}

impl Mul<f64> for &Duration {
    type Output = Duration;
    fn mul(self, rhs: f64) -> Duration {
        self.scale_saturating(rhs)
    }
}

impl Div<f64> for Duration {
    type Output = Duration;
    fn div(self, rhs: f64) -> Duration {
        self.scale_saturating(1.0 / rhs)
    }
}

// ── text boundary ─────────────────────────────────────────────────────────

impl fmt::Display for Duration {
    /// Renders the extensible format under the default locale.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::render_extensible(
            self,
            &crate::locale::Locale::default(),
        ))
    }
}

impl FromStr for Duration {
    type Err = Error;

    /// Best-effort scan over the known standard formats.
    fn from_str(s: &str) -> Result<Duration> {
        crate::format::parse(s, &crate::locale::Locale::default())
    }
}

// ── serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&crate::format::render_round_trip(
            self,
            &crate::locale::Locale::INVARIANT,
        ))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        crate::format::parse_round_trip(&text, &crate::locale::Locale::INVARIANT)
            .map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RawDuration — the structured persistence mirror
// ═══════════════════════════════════════════════════════════════════════════

/// The seven persisted fields of a [`Duration`], exactly as stored.
///
/// Structured encodings carry this mirror and reconstruct via
/// [`Duration::from_raw`], which deliberately skips normalization so a
/// decoded value is bit-for-bit the encoded one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawDuration {
    pub is_negative: bool,
    pub is_perpetual: bool,
    pub planck_time: f64,
    pub total_yoctoseconds: u64,
    pub total_nanoseconds: u64,
    pub years: u32,
    pub aeon_sequence: Vec<u64>,
}

// ═══════════════════════════════════════════════════════════════════════════
// DurationBuilder — the multi-unit constructor
// ═══════════════════════════════════════════════════════════════════════════

/// Simultaneous magnitudes in every supported unit.
///
/// Individually negative unit values subtract from the running total;
/// the net magnitude takes the sign of the larger side, and
/// [`DurationBuilder::negative`] then flips the net result. The Planck
/// component alone cannot carry a sign — below zero it clamps to zero.
///
/// ```
/// use deeptime::Duration;
///
/// let d = Duration::builder().years(2.0).hours(3.0).seconds(1.5).build()?;
/// assert_eq!(d.year_remainder(), 2);
/// # Ok::<(), deeptime::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DurationBuilder {
    negative: bool,
    aeon_sequence: Option<AeonSequence>,
    years: f64,
    days: f64,
    hours: f64,
    minutes: f64,
    seconds: f64,
    milliseconds: f64,
    microseconds: f64,
    nanoseconds: f64,
    picoseconds: f64,
    femtoseconds: f64,
    attoseconds: f64,
    zeptoseconds: f64,
    yoctoseconds: f64,
    planck: f64,
}

macro_rules! builder_setter {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub fn $name(mut self, value: f64) -> Self {
            self.$name = value;
            self
        }
    };
}

impl DurationBuilder {
    builder_setter!(
        /// Julian years (may be fractional).
        years
    );
    builder_setter!(
        /// Fixed 86 400 s days.
        days
    );
    builder_setter!(
        /// Hours.
        hours
    );
    builder_setter!(
        /// Minutes.
        minutes
    );
    builder_setter!(
        /// Seconds.
        seconds
    );
    builder_setter!(
        /// Milliseconds.
        milliseconds
    );
    builder_setter!(
        /// Microseconds.
        microseconds
    );
    builder_setter!(
        /// Nanoseconds.
        nanoseconds
    );
    builder_setter!(
        /// Picoseconds.
        picoseconds
    );
    builder_setter!(
        /// Femtoseconds.
        femtoseconds
    );
    builder_setter!(
        /// Attoseconds.
        attoseconds
    );
    builder_setter!(
        /// Zeptoseconds.
        zeptoseconds
    );
    builder_setter!(
        /// Yoctoseconds.
        yoctoseconds
    );
    builder_setter!(
        /// Planck-time units. Clamped to zero when negative.
        planck
    );

    /// Sign of the whole value, applied after the units are summed.
    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Caller-supplied aeon sequence, added on top of any aeons carried
    /// out of the year layer.
    pub fn aeon_sequence(mut self, sequence: AeonSequence) -> Self {
        self.aeon_sequence = Some(sequence);
        self
    }

    /// Normalize into a [`Duration`].
    ///
    /// Fails with an invalid-argument condition for NaN inputs and with
    /// an overflow condition when aeon carry propagation would exceed
    /// 100 terms. Any infinite component collapses the whole value to a
    /// perpetual one.
    pub fn build(self) -> Result<Duration> {
        let components = [
            self.years,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
            self.microseconds,
            self.nanoseconds,
            self.picoseconds,
            self.femtoseconds,
            self.attoseconds,
            self.zeptoseconds,
            self.yoctoseconds,
            self.planck,
        ];
        if components.iter().any(|v| v.is_nan()) {
            return Err(Error::NanInput);
        }
        if let Some(&inf) = components.iter().find(|v| v.is_infinite()) {
            let negative = (inf < 0.0) ^ self.negative;
            return Ok(Duration::infinity(negative));
        }

        let mut positive = Accumulator::default();
        let mut negated = Accumulator::default();

        fn route(
            positive: &mut Accumulator,
            negated: &mut Accumulator,
            value: f64,
            add: impl Fn(&mut Accumulator, f64) -> Result<()>,
        ) -> Result<()> {
            if value > 0.0 {
                add(positive, value)
            } else if value < 0.0 {
                add(negated, -value)
            } else {
                Ok(())
            }
        }

        route(&mut positive, &mut negated, self.years, |a, v| {
            a.add_years_f64(v)
        })?;
        route(&mut positive, &mut negated, self.days, |a, v| {
            a.add_unit_f64(v, NANOS_PER_DAY)
        })?;
        route(&mut positive, &mut negated, self.hours, |a, v| {
            a.add_unit_f64(v, NANOS_PER_HOUR)
        })?;
        route(&mut positive, &mut negated, self.minutes, |a, v| {
            a.add_unit_f64(v, NANOS_PER_MINUTE)
        })?;
        route(&mut positive, &mut negated, self.seconds, |a, v| {
            a.add_unit_f64(v, NANOS_PER_SECOND)
        })?;
        route(&mut positive, &mut negated, self.milliseconds, |a, v| {
            a.add_unit_f64(v, NANOS_PER_MILLISECOND)
        })?;
        route(&mut positive, &mut negated, self.microseconds, |a, v| {
            a.add_unit_f64(v, NANOS_PER_MICROSECOND)
        })?;
        route(&mut positive, &mut negated, self.nanoseconds, |a, v| {
            a.add_unit_f64(v, 1)
        })?;
        route(&mut positive, &mut negated, self.picoseconds, |a, v| {
            a.add_yoctos_f64(v * YOCTOS_PER_PICOSECOND as f64)
        })?;
        route(&mut positive, &mut negated, self.femtoseconds, |a, v| {
            a.add_yoctos_f64(v * YOCTOS_PER_FEMTOSECOND as f64)
        })?;
        route(&mut positive, &mut negated, self.attoseconds, |a, v| {
            a.add_yoctos_f64(v * YOCTOS_PER_ATTOSECOND as f64)
        })?;
        route(&mut positive, &mut negated, self.zeptoseconds, |a, v| {
            a.add_yoctos_f64(v * YOCTOS_PER_ZEPTOSECOND as f64)
        })?;
        route(&mut positive, &mut negated, self.yoctoseconds, |a, v| {
            a.add_yoctos_f64(v)
        })?;
        if self.planck > 0.0 {
            positive.add_planck(self.planck)?;
        }
        if let Some(sequence) = &self.aeon_sequence {
            positive.add_aeons(sequence)?;
        }

        let gains = positive.finish(false)?;
        let losses = negated.finish(false)?;
        let net = gains.saturating_sub(&losses);
        Ok(if self.negative { net.negate() } else { net })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Accumulator — the shared normalization pipeline
// ═══════════════════════════════════════════════════════════════════════════

/// Bottom-up accumulator over the five layers.
///
/// Intermediate sums are held wide (`u128`, unbounded `f64` Planck) and
/// collapsed into true remainders by [`Accumulator::finish`]: Planck
/// carries into yoctoseconds, yoctoseconds into nanoseconds at 10¹⁵,
/// nanoseconds into years at one Julian year, years into aeons at 10⁶,
/// and aeon carries propagate term-by-term under the 100-term bound.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    planck: f64,
    yoctos: u128,
    nanos: u128,
    years: u128,
    aeons: AeonSequence,
}

impl Accumulator {
    pub(crate) fn add_planck(&mut self, value: f64) -> Result<()> {
        if value <= 0.0 {
            return Ok(());
        }
        if value >= PLANCK_PER_YOCTOSECOND {
            let yoctos = (value / PLANCK_PER_YOCTOSECOND).trunc();
            let remainder = (value - yoctos * PLANCK_PER_YOCTOSECOND).max(0.0);
            self.add_yoctos_f64(yoctos)?;
            self.planck += remainder;
        } else {
            self.planck += value;
        }
        Ok(())
    }

    pub(crate) fn add_yoctos(&mut self, value: u128) {
        self.yoctos += value;
    }

    pub(crate) fn add_nanos(&mut self, value: u128) {
        self.nanos += value;
    }

    pub(crate) fn add_years(&mut self, value: u128) {
        self.years += value;
    }

    pub(crate) fn add_aeons(&mut self, sequence: &AeonSequence) -> Result<()> {
        self.aeons = self.aeons.checked_add(sequence)?;
        Ok(())
    }

    /// Fractional nanoseconds: the whole part lands in the nanosecond
    /// layer, the rest cascades through yoctoseconds into Planck units.
    pub(crate) fn add_nanos_f64(&mut self, value: f64) {
        if value <= 0.0 {
            return;
        }
        let whole = value.trunc();
        self.add_nanos(whole as u128);
        let fraction_yoctos = (value - whole) * YOCTOS_PER_NANOSECOND as f64;
        let whole_yoctos = fraction_yoctos.trunc();
        self.add_yoctos(whole_yoctos as u128);
        self.planck += (fraction_yoctos - whole_yoctos) * PLANCK_PER_YOCTOSECOND;
    }

    /// A float yoctosecond count of any size; whole years split off first
    /// so the `u128` cast below stays exact.
    pub(crate) fn add_yoctos_f64(&mut self, value: f64) -> Result<()> {
        if value <= 0.0 {
            return Ok(());
        }
        let years = (value / YOCTOS_PER_YEAR_F64).trunc();
        if years >= 1.0 {
            self.add_years_f64(years)?;
        }
        let remainder = (value - years * YOCTOS_PER_YEAR_F64).max(0.0);
        let whole = remainder.trunc();
        self.add_yoctos(whole as u128);
        self.planck += (remainder - whole) * PLANCK_PER_YOCTOSECOND;
        Ok(())
    }

    /// A float magnitude of a nanosecond-layer unit (seconds, hours, …).
    pub(crate) fn add_unit_f64(&mut self, value: f64, nanos_per_unit: u64) -> Result<()> {
        if value <= 0.0 {
            return Ok(());
        }
        let years_equiv = value * (nanos_per_unit as f64 / NANOS_PER_YEAR as f64);
        if years_equiv >= YEARS_PER_AEON as f64 {
            // aeon-scale input: route through the year decomposition
            return self.add_years_f64(years_equiv);
        }
        let whole = value.trunc();
        self.add_nanos(whole as u128 * nanos_per_unit as u128);
        self.add_nanos_f64((value - whole) * nanos_per_unit as f64);
        Ok(())
    }

    /// A float year count: whole aeons split into the sequence, whole
    /// years stay in the year layer, the fractional year cascades down.
    pub(crate) fn add_years_f64(&mut self, value: f64) -> Result<()> {
        if value <= 0.0 {
            return Ok(());
        }
        let aeons = (value / YEARS_PER_AEON as f64).trunc();
        if aeons >= 1.0 {
            self.aeons = self.aeons.checked_add(&AeonSequence::from_f64(aeons))?;
        }
        let remainder = (value - aeons * YEARS_PER_AEON as f64).max(0.0);
        let whole = remainder.trunc();
        self.add_years(whole as u128);
        self.add_nanos_f64((remainder - whole) * NANOS_PER_YEAR as f64);
        Ok(())
    }

    /// A float aeon count, split at the whole-aeon boundary so exactly
    /// representable integers (e.g. `1e18`) decompose without drift.
    pub(crate) fn add_aeons_f64(&mut self, value: f64) -> Result<()> {
        if value <= 0.0 {
            return Ok(());
        }
        let whole = value.trunc();
        if whole >= 1.0 {
            self.aeons = self.aeons.checked_add(&AeonSequence::from_f64(whole))?;
        }
        self.add_years_f64((value - whole) * YEARS_PER_AEON as f64)
    }

    /// A float aeon count positioned `position` terms up the sequence
    /// (i.e. scaled by 10¹⁸ᵖ). Fractions cascade to the term below.
    pub(crate) fn add_aeons_scaled(&mut self, value: f64, position: usize) -> Result<()> {
        if value <= 0.0 {
            return Ok(());
        }
        if !value.is_finite() {
            return Err(Error::AeonOverflow);
        }
        let whole = value.trunc();
        if whole >= 1.0 {
            let shifted = AeonSequence::from_f64(whole).shifted(position)?;
            self.aeons = self.aeons.checked_add(&shifted)?;
        }
        let fraction = value - whole;
        if fraction > 0.0 {
            if position == 0 {
                self.add_years_f64(fraction * YEARS_PER_AEON as f64)?;
            } else {
                self.add_aeons_scaled(
                    fraction * crate::aeon::TERM_BASE as f64,
                    position - 1,
                )?;
            }
        }
        Ok(())
    }

    /// Collapse the wide sums into true remainders.
    pub(crate) fn finish(self, negative: bool) -> Result<Duration> {
        let mut planck = self.planck.max(0.0);
        let mut yoctos = self.yoctos;
        if planck >= PLANCK_PER_YOCTOSECOND {
            let carry = (planck / PLANCK_PER_YOCTOSECOND).floor();
            planck -= carry * PLANCK_PER_YOCTOSECOND;
            yoctos += carry as u128;
        }
        while planck >= PLANCK_PER_YOCTOSECOND {
            planck -= PLANCK_PER_YOCTOSECOND;
            yoctos += 1;
        }
        planck = planck.max(0.0);

        let nanos = self.nanos + yoctos / YOCTOS_PER_NANOSECOND as u128;
        let yoctos = (yoctos % YOCTOS_PER_NANOSECOND as u128) as u64;

        let years = self.years + nanos / NANOS_PER_YEAR as u128;
        let nanos = (nanos % NANOS_PER_YEAR as u128) as u64;

        let aeon_carry = years / YEARS_PER_AEON as u128;
        let years = (years % YEARS_PER_AEON as u128) as u32;

        let mut aeons = self.aeons;
        if aeon_carry > 0 {
            aeons.add_scalar(aeon_carry)?;
        }

        Ok(Duration::from_magnitude(
            negative,
            (planck, yoctos, nanos, years, aeons),
        ))
    }

    /// [`Accumulator::finish`], saturating to ±infinity on aeon overflow.
    pub(crate) fn finish_saturating(self, negative: bool) -> Duration {
        match self.finish(negative) {
            Ok(duration) => duration,
            Err(_) => Duration::infinity(negative),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::NANOS_PER_YEAR;

    fn invariants_hold(d: &Duration) {
        assert!(d.planck_remainder() >= 0.0);
        assert!(d.planck_remainder() < PLANCK_PER_YOCTOSECOND);
        assert!(d.yoctosecond_remainder() < YOCTOS_PER_NANOSECOND);
        assert!(d.nanosecond_remainder() < NANOS_PER_YEAR);
        assert!((d.year_remainder() as u64) < YEARS_PER_AEON);
        if let Some(&top) = d.aeon_sequence().terms().last() {
            assert_ne!(top, 0);
        }
        if d.is_zero() {
            assert!(!d.is_negative());
        }
    }

    #[test]
    fn carry_correctness_across_layer_boundaries() {
        let year = Duration::from_nanoseconds(NANOS_PER_YEAR as i128);
        assert_eq!(year, Duration::from_years(1.0).unwrap());

        let aeon = Duration::from_years(1_000_000.0).unwrap();
        assert_eq!(aeon, Duration::from_aeons(1.0).unwrap());

        let second_term = Duration::from_aeons(1e18).unwrap();
        assert_eq!(second_term.aeon_sequence().terms(), &[0, 1]);
        invariants_hold(&second_term);
    }

    #[test]
    fn scalar_factories_special_case_degenerate_floats() {
        assert_eq!(Duration::from_years(0.0).unwrap(), Duration::ZERO);
        assert_eq!(
            Duration::from_days(f64::INFINITY).unwrap(),
            Duration::POSITIVE_INFINITY
        );
        assert_eq!(
            Duration::from_seconds(f64::NEG_INFINITY).unwrap(),
            Duration::NEGATIVE_INFINITY
        );
        assert_eq!(Duration::from_hours(f64::NAN), Err(Error::NanInput));
    }

    #[test]
    fn planck_input_cannot_carry_a_sign() {
        assert_eq!(Duration::from_planck(-12.5).unwrap(), Duration::ZERO);
        assert_eq!(
            Duration::from_planck(f64::NEG_INFINITY).unwrap(),
            Duration::ZERO
        );
        let builder = Duration::builder().planck(-3.0).seconds(1.0).build().unwrap();
        assert_eq!(builder, Duration::from_seconds(1.0).unwrap());
    }

    #[test]
    fn fractional_seconds_cascade_into_lower_layers() {
        let d = Duration::from_seconds(1.5).unwrap();
        assert_eq!(d.nanosecond_remainder(), 1_500_000_000);
        assert_eq!(d.yoctosecond_remainder(), 0);
        invariants_hold(&d);
    }

    #[test]
    fn builder_mixes_units_with_carries() {
        let d = Duration::builder()
            .days(365.0)
            .hours(6.0)
            .build()
            .unwrap();
        // 365 d + 6 h is exactly one Julian year
        assert_eq!(d, Duration::from_years(1.0).unwrap());

        let mixed = Duration::builder()
            .years(2.0)
            .minutes(90.0)
            .nanoseconds(250.0)
            .build()
            .unwrap();
        assert_eq!(mixed.year_remainder(), 2);
        assert_eq!(
            mixed.nanosecond_remainder(),
            90 * NANOS_PER_MINUTE + 250
        );
        invariants_hold(&mixed);
    }

    #[test]
    fn builder_sums_signed_components() {
        let d = Duration::builder()
            .hours(1.0)
            .minutes(-30.0)
            .build()
            .unwrap();
        assert_eq!(d, Duration::from_minutes(30.0).unwrap());

        let flipped = Duration::builder()
            .hours(1.0)
            .negative(true)
            .build()
            .unwrap();
        assert_eq!(flipped, Duration::from_hours(-1.0).unwrap());
    }

    #[test]
    fn builder_rejects_nan_and_bounds_the_aeon_layer() {
        assert_eq!(
            Duration::builder().days(f64::NAN).build(),
            Err(Error::NanInput)
        );
        let wide = AeonSequence::from_terms(vec![
            crate::aeon::TERM_BASE - 1;
            crate::aeon::MAX_TERMS
        ])
        .unwrap();
        let overflowing = Duration::builder()
            .aeon_sequence(wide)
            .years(2_000_000.0)
            .build();
        assert_eq!(overflowing, Err(Error::AeonOverflow));
    }

    #[test]
    fn addition_borrows_across_every_layer() {
        let year = Duration::from_years(1.0).unwrap();
        let nano = Duration::from_nanoseconds(1);
        let rest = year.saturating_sub(&nano);
        assert_eq!(rest.year_remainder(), 0);
        assert_eq!(rest.nanosecond_remainder(), NANOS_PER_YEAR - 1);
        invariants_hold(&rest);
        assert_eq!(rest.saturating_add(&nano), year);

        let aeon = Duration::from_aeons(1.0).unwrap();
        let back = aeon.saturating_sub(&Duration::from_yoctoseconds(1));
        assert!(back.aeon_sequence().is_zero());
        assert_eq!(back.year_remainder(), 999_999);
        invariants_hold(&back);
    }

    #[test]
    fn subtracting_a_planck_unit_from_a_second_stays_normalized() {
        // the borrow lands below the Planck layer's float resolution
        let second = Duration::from_seconds(1.0).unwrap();
        let tick = Duration::from_planck(1.0).unwrap();
        let rest = second.saturating_sub(&tick);
        invariants_hold(&rest);
        assert!(rest.sign() > 0);
        assert!(rest <= second);
    }

    #[test]
    fn opposite_signs_take_the_larger_side() {
        let five = Duration::from_seconds(5.0).unwrap();
        let three_neg = Duration::from_seconds(-3.0).unwrap();
        assert_eq!(
            five.saturating_add(&three_neg),
            Duration::from_seconds(2.0).unwrap()
        );
        assert_eq!(
            three_neg.saturating_add(&five),
            Duration::from_seconds(2.0).unwrap()
        );
        assert_eq!(
            five.saturating_add(&five.negate()),
            Duration::ZERO
        );
    }

    #[test]
    fn infinity_arithmetic_saturates() {
        let finite = Duration::from_days(12.0).unwrap();
        assert_eq!(
            Duration::POSITIVE_INFINITY.saturating_add(&finite),
            Duration::POSITIVE_INFINITY
        );
        assert_eq!(
            finite.saturating_add(&Duration::NEGATIVE_INFINITY),
            Duration::NEGATIVE_INFINITY
        );
        // the crate's defined policy for the opposing perpetual pair
        assert_eq!(
            Duration::POSITIVE_INFINITY.saturating_add(&Duration::NEGATIVE_INFINITY),
            Duration::ZERO
        );
    }

    #[test]
    fn aeon_overflow_saturates_in_addition() {
        let top = Duration::from_raw(RawDuration {
            is_negative: false,
            is_perpetual: false,
            planck_time: 0.0,
            total_yoctoseconds: 0,
            total_nanoseconds: 0,
            years: 0,
            aeon_sequence: vec![crate::aeon::TERM_BASE - 1; crate::aeon::MAX_TERMS],
        });
        assert_eq!(
            top.saturating_add(&top),
            Duration::POSITIVE_INFINITY
        );
        assert_eq!(
            top.negate().saturating_add(&top.negate()),
            Duration::NEGATIVE_INFINITY
        );
    }

    #[test]
    fn scaling_renormalizes_across_layers() {
        let minute = Duration::from_seconds(30.0).unwrap() * 2.0;
        assert_eq!(minute, Duration::from_minutes(1.0).unwrap());

        let halved = Duration::from_years(1.0).unwrap() * 0.5;
        assert_eq!(halved.year_remainder(), 0);
        assert_eq!(halved.nanosecond_remainder(), NANOS_PER_YEAR / 2);

        let doubled_aeons = Duration::from_aeons(6e17).unwrap() * 4.0;
        assert_eq!(doubled_aeons.aeon_sequence().terms(), &[400_000_000_000_000_000, 2]);
    }

    #[test]
    fn scaling_corner_cases_follow_the_documented_policy() {
        assert_eq!(Duration::POSITIVE_INFINITY * 0.0, Duration::ZERO);
        assert_eq!(
            Duration::POSITIVE_INFINITY * -2.0,
            Duration::NEGATIVE_INFINITY
        );
        assert_eq!(
            Duration::from_seconds(1.0).unwrap() / 0.0,
            Duration::POSITIVE_INFINITY
        );
        assert_eq!(
            Duration::from_seconds(-1.0).unwrap() / 0.0,
            Duration::NEGATIVE_INFINITY
        );
        assert_eq!(Duration::ZERO / 0.0, Duration::ZERO);
        assert_eq!(
            Duration::from_seconds(1.0).unwrap().checked_scale(f64::NAN),
            Err(Error::NanInput)
        );
    }

    #[test]
    fn ordering_is_sign_first_then_coarsest_layer_first() {
        let mut values = vec![
            Duration::POSITIVE_INFINITY,
            Duration::from_years(-2.0).unwrap(),
            Duration::ZERO,
            Duration::from_aeons(1.0).unwrap(),
            Duration::from_nanoseconds(1),
            Duration::NEGATIVE_INFINITY,
            Duration::from_years(3.0).unwrap(),
        ];
        values.sort();
        assert_eq!(values[0], Duration::NEGATIVE_INFINITY);
        assert_eq!(values[1], Duration::from_years(-2.0).unwrap());
        assert_eq!(values[2], Duration::ZERO);
        assert_eq!(values[3], Duration::from_nanoseconds(1));
        assert_eq!(values[4], Duration::from_years(3.0).unwrap());
        assert_eq!(values[5], Duration::from_aeons(1.0).unwrap());
        assert_eq!(values[6], Duration::POSITIVE_INFINITY);
    }

    #[test]
    fn comparison_laws() {
        let a = Duration::from_seconds(90.0).unwrap();
        let b = Duration::from_minutes(1.0).unwrap();
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        assert_eq!(a.negate().negate(), a);
        assert_eq!(Duration::ZERO.sign(), 0);
        assert_eq!(Duration::ZERO.negate(), Duration::ZERO);
        assert!(!Duration::ZERO.negate().is_negative());
        // negative values order by magnitude reversed
        assert!(Duration::from_years(-3.0).unwrap() < Duration::from_years(-2.0).unwrap());
    }

    #[test]
    fn equality_is_field_exact() {
        // same magnitude, different layer split, must not compare equal
        let normalized = Duration::from_years(1.0).unwrap();
        let denormalized = Duration::from_raw(RawDuration {
            is_negative: false,
            is_perpetual: false,
            planck_time: 0.0,
            total_yoctoseconds: 0,
            total_nanoseconds: NANOS_PER_YEAR,
            years: 0,
            aeon_sequence: vec![],
        });
        assert_ne!(normalized, denormalized);
    }

    #[test]
    fn raw_round_trip_is_verbatim() {
        let original = Duration::builder()
            .years(5.0)
            .seconds(1.25)
            .planck(42.5)
            .build()
            .unwrap();
        let back = Duration::from_raw(original.to_raw());
        assert_eq!(back, original);
    }

    #[test]
    fn totals_are_consistent_between_units() {
        let d = Duration::from_days(365.25).unwrap();
        assert!((d.total_years_f64() - 1.0).abs() < 1e-12);
        assert!((d.total_seconds_f64() - SECONDS_PER_YEAR as f64).abs() < 1e-3);
        assert_eq!(
            Duration::POSITIVE_INFINITY.total_years_f64(),
            f64::INFINITY
        );
    }
}
