// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch-segmented timelines.
//!
//! A [`CosmicTime`] is an ordered list of [`Epoch`]s (earliest first),
//! the name of the open-ended era following the last listed epoch, and a
//! mutable present [`Instant`]. An instant is `(epoch index, offset)`;
//! index [`Instant::CURRENT_EPOCH`] (−1) addresses the open era.
//!
//! Navigation saturates instead of wrapping: walking before the first
//! epoch clamps to `(0, zero)`, and a positive-infinite offset walks off
//! the end into the current era, still infinite.
//!
//! Appending an epoch never invalidates existing instants. Inserting,
//! removing, or resizing any other epoch invalidates every instant that
//! references it or a later epoch — tracking that is the caller's
//! responsibility; instants carry no owning timeline reference, so
//! cross-timeline comparisons are likewise on the caller.
//!
//! Everything here is an immutable value except the present instant,
//! which only [`CosmicTime::add_time`]/[`CosmicTime::subtract_time`]
//! rewrite; a timeline shared across threads needs external
//! synchronization for those two calls alone.

use crate::duration::Duration;
use crate::epoch::Epoch;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A position within some timeline: an epoch index plus a non-negative
/// offset from that epoch's start.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instant {
    epoch: i32,
    offset: Duration,
}

impl Instant {
    /// Sentinel index for the open-ended current epoch.
    pub const CURRENT_EPOCH: i32 = -1;

    /// Build an instant. Any negative index is the current-epoch
    /// sentinel; the offset must be non-negative (it may be +∞).
    pub fn new(epoch: i32, offset: Duration) -> Result<Self> {
        if offset.is_negative() {
            return Err(Error::NegativeOffset);
        }
        Ok(Self::from_parts(epoch, offset))
    }

    /// An instant in the current epoch.
    pub fn current(offset: Duration) -> Result<Self> {
        Self::new(Self::CURRENT_EPOCH, offset)
    }

    /// The very start of the first epoch.
    pub fn origin() -> Self {
        Self::from_parts(0, Duration::ZERO)
    }

    /// Internal constructor for offsets already known non-negative.
    pub(crate) fn from_parts(epoch: i32, offset: Duration) -> Self {
        let epoch = if epoch < 0 { Self::CURRENT_EPOCH } else { epoch };
        Instant { epoch, offset }
    }

    /// The epoch index ([`Instant::CURRENT_EPOCH`] for the open era).
    pub fn epoch(&self) -> i32 {
        self.epoch
    }

    /// Offset from the epoch's start.
    pub fn offset(&self) -> &Duration {
        &self.offset
    }

    /// True when this instant sits in the open-ended current epoch.
    pub fn is_current(&self) -> bool {
        self.epoch == Self::CURRENT_EPOCH
    }
}

/// Ordering is only defined between instants of the same epoch index;
/// across epochs the comparison is `None` (the indices alone say nothing
/// about relative position without a timeline).
impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.epoch != other.epoch {
            return None;
        }
        Some(self.offset.cmp(&other.offset))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_current() {
            write!(f, "current+{}", self.offset)
        } else {
            write!(f, "epoch[{}]+{}", self.epoch, self.offset)
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Instant", 2)?;
        s.serialize_field("epoch", &self.epoch)?;
        s.serialize_field("offset", &self.offset)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            epoch: i32,
            offset: Duration,
        }

        let raw = Raw::deserialize(deserializer)?;
        Instant::new(raw.epoch, raw.offset).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CosmicTime
// ═══════════════════════════════════════════════════════════════════════════

/// An epoch-segmented timeline with a mutable present instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CosmicTime {
    epochs: Vec<Epoch>,
    current_epoch_name: Option<String>,
    now: Instant,
}

impl CosmicTime {
    /// A timeline over `epochs` with the present at the start of the
    /// current era.
    pub fn new(epochs: Vec<Epoch>, current_epoch_name: Option<String>) -> Self {
        CosmicTime {
            epochs,
            current_epoch_name,
            now: Instant::from_parts(Instant::CURRENT_EPOCH, Duration::ZERO),
        }
    }

    /// The epoch list, earliest first.
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Name of the open-ended era after the last listed epoch.
    pub fn current_epoch_name(&self) -> Option<&str> {
        self.current_epoch_name.as_deref()
    }

    /// The present instant.
    pub fn now(&self) -> &Instant {
        &self.now
    }

    /// Append an epoch to the end of the list. This never invalidates
    /// existing instants.
    pub fn push_epoch(&mut self, epoch: Epoch) {
        self.epochs.push(epoch);
    }

    /// The span of the epoch at `index`, if it is a list index.
    pub fn epoch_duration(&self, index: i32) -> Option<&Duration> {
        if index < 0 {
            return None;
        }
        self.epochs.get(index as usize).map(Epoch::duration)
    }

    /// Sum of all listed epoch spans.
    pub fn total_span(&self) -> Duration {
        self.epochs
            .iter()
            .fold(Duration::ZERO, |sum, epoch| sum.saturating_add(epoch.duration()))
    }

    /// Out-of-range indices address the current era.
    fn clamp_index(&self, epoch: i32) -> i32 {
        if epoch < 0 || epoch as usize >= self.epochs.len() {
            Instant::CURRENT_EPOCH
        } else {
            epoch
        }
    }

    /// Rank of an index along the walk order, with the current era after
    /// every listed epoch.
    fn rank(&self, epoch: i32) -> usize {
        if epoch < 0 || epoch as usize >= self.epochs.len() {
            self.epochs.len()
        } else {
            epoch as usize
        }
    }

    // ── navigation ────────────────────────────────────────────────────

    /// `instant + delta`, walking epoch boundaries as needed.
    ///
    /// A negative running offset steps earlier epoch by epoch, adding
    /// each span back in, and saturates at `(epoch 0, zero)` rather than
    /// stepping before the list. A positive-infinite offset steps later
    /// until it leaves the list, ending at `(current, +∞)`.
    pub fn add(&self, instant: &Instant, delta: &Duration) -> Instant {
        let mut offset = instant.offset().saturating_add(delta);
        let mut epoch = self.clamp_index(instant.epoch());
        if self.epochs.is_empty() {
            if offset.is_negative() {
                offset = Duration::ZERO;
            }
            return Instant::from_parts(epoch, offset);
        }
        while offset.is_negative() {
            if epoch == Instant::CURRENT_EPOCH {
                epoch = self.epochs.len() as i32 - 1;
            } else if epoch == 0 {
                return Instant::origin();
            } else {
                epoch -= 1;
            }
            offset = offset.saturating_add(self.epochs[epoch as usize].duration());
        }
        if offset.is_perpetual() {
            while epoch != Instant::CURRENT_EPOCH {
                offset = offset.saturating_sub(self.epochs[epoch as usize].duration());
                epoch = if epoch as usize == self.epochs.len() - 1 {
                    Instant::CURRENT_EPOCH
                } else {
                    epoch + 1
                };
            }
        }
        Instant::from_parts(epoch, offset)
    }

    /// Advance the present instant by `delta`, one epoch boundary per
    /// step, keeping the offset canonical within its epoch. Zero and
    /// perpetual deltas are no-ops.
    pub fn add_time(&mut self, delta: &Duration) {
        if delta.is_zero() || delta.is_perpetual() {
            return;
        }
        self.now = self.advance(self.now.clone(), delta.clone());
    }

    /// [`CosmicTime::add_time`] of the negated delta.
    pub fn subtract_time(&mut self, delta: &Duration) {
        self.add_time(&delta.negate());
    }

    fn advance(&self, from: Instant, delta: Duration) -> Instant {
        let offset = from.offset().saturating_add(&delta);
        let epoch = self.clamp_index(from.epoch());
        if offset.is_negative() {
            if self.epochs.is_empty() {
                return Instant::from_parts(epoch, Duration::ZERO);
            }
            let previous = if epoch == Instant::CURRENT_EPOCH {
                self.epochs.len() as i32 - 1
            } else if epoch == 0 {
                return Instant::origin();
            } else {
                epoch - 1
            };
            let span = self.epochs[previous as usize].duration().clone();
            // re-enter the previous epoch at its end, one boundary per step
            return self.advance(Instant::from_parts(previous, span), offset);
        }
        if epoch != Instant::CURRENT_EPOCH {
            let span = self.epochs[epoch as usize].duration();
            if &offset >= span {
                let next = if epoch as usize == self.epochs.len() - 1 {
                    Instant::CURRENT_EPOCH
                } else {
                    epoch + 1
                };
                let remaining = offset.saturating_sub(span);
                return self.advance(Instant::from_parts(next, Duration::ZERO), remaining);
            }
        }
        Instant::from_parts(epoch, offset)
    }

    /// Elapsed time from `first` to `second` (positive when `second` is
    /// later), walking whole epoch spans between the two indices.
    /// Accumulation saturates to ±∞ when the gap outgrows the duration
    /// range. Antisymmetric: `difference(a, b) == -difference(b, a)`.
    pub fn difference(&self, first: &Instant, second: &Instant) -> Duration {
        let target = self.rank(second.epoch());
        let mut index = self.rank(first.epoch());
        let mut accumulated = first.offset().clone();
        while index != target {
            if index < target {
                accumulated = accumulated.saturating_sub(self.epochs[index].duration());
                index += 1;
            } else {
                index -= 1;
                accumulated = accumulated.saturating_add(self.epochs[index].duration());
            }
        }
        second.offset().saturating_sub(&accumulated)
    }

    /// Index of the epoch containing an age measured from the start of
    /// the timeline, or [`Instant::CURRENT_EPOCH`] when the age is
    /// negative, perpetual, beyond every listed epoch, or the list is
    /// empty.
    pub fn epoch_of(&self, age: &Duration) -> i32 {
        if self.epochs.is_empty() || age.is_negative() || age.is_perpetual() {
            return Instant::CURRENT_EPOCH;
        }
        let mut remaining = age.clone();
        for (index, epoch) in self.epochs.iter().enumerate() {
            remaining = remaining.saturating_sub(epoch.duration());
            if remaining.is_negative() {
                return index as i32;
            }
        }
        Instant::CURRENT_EPOCH
    }
}

impl Default for CosmicTime {
    /// The standard cosmological catalogue with the present roughly
    /// 12.8 billion years into the Stelliferous era.
    fn default() -> Self {
        let mut timeline =
            CosmicTime::new(Epoch::standard_epochs(), Some("Stelliferous".into()));
        timeline.now = Instant::from_parts(
            Instant::CURRENT_EPOCH,
            Duration::from_whole_years(12_800_000_000),
        );
        timeline
    }
}

impl fmt::Display for CosmicTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} epochs, now at {}", self.epochs.len(), self.now)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CosmicTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("CosmicTime", 3)?;
        s.serialize_field("epochs", &self.epochs)?;
        s.serialize_field("current_epoch_name", &self.current_epoch_name)?;
        s.serialize_field("now", &self.now)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CosmicTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            epochs: Vec<Epoch>,
            current_epoch_name: Option<String>,
            now: Instant,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut timeline = CosmicTime::new(raw.epochs, raw.current_epoch_name);
        timeline.now = raw.now;
        Ok(timeline)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(value: f64) -> Duration {
        Duration::from_seconds(value).unwrap()
    }

    fn three_epochs() -> CosmicTime {
        CosmicTime::new(
            vec![
                Epoch::named(seconds(10.0), "first").unwrap(),
                Epoch::named(seconds(20.0), "second").unwrap(),
                Epoch::named(seconds(30.0), "third").unwrap(),
            ],
            Some("open".into()),
        )
    }

    #[test]
    fn instant_offsets_must_be_non_negative() {
        assert_eq!(
            Instant::new(0, seconds(-1.0)),
            Err(Error::NegativeOffset)
        );
        assert_eq!(
            Instant::current(Duration::NEGATIVE_INFINITY),
            Err(Error::NegativeOffset)
        );
        let open_ended = Instant::current(Duration::POSITIVE_INFINITY).unwrap();
        assert!(open_ended.offset().is_perpetual());
        assert_eq!(Instant::new(-7, Duration::ZERO).unwrap().epoch(), -1);
    }

    #[test]
    fn instants_only_order_within_one_epoch() {
        let a = Instant::new(1, seconds(5.0)).unwrap();
        let b = Instant::new(1, seconds(9.0)).unwrap();
        let elsewhere = Instant::new(2, seconds(1.0)).unwrap();
        assert!(a < b);
        assert_eq!(a.partial_cmp(&elsewhere), None);
    }

    #[test]
    fn add_saturates_at_the_origin() {
        let timeline = three_epochs();
        let start = Instant::origin();
        let nudged = timeline.add(&start, &seconds(-0.5));
        assert_eq!(nudged, Instant::origin());
        assert!(!nudged.offset().is_negative());
    }

    #[test]
    fn add_walks_backwards_through_epochs() {
        let timeline = three_epochs();
        let from = Instant::new(2, seconds(5.0)).unwrap();
        let back = timeline.add(&from, &seconds(-10.0));
        assert_eq!(back.epoch(), 1);
        assert_eq!(back.offset(), &seconds(15.0));

        // far enough back to clamp
        let clamped = timeline.add(&from, &seconds(-120.0));
        assert_eq!(clamped, Instant::origin());
    }

    #[test]
    fn add_wraps_the_current_sentinel_to_the_last_epoch() {
        let timeline = three_epochs();
        let now = Instant::current(seconds(1.0)).unwrap();
        let back = timeline.add(&now, &seconds(-6.0));
        assert_eq!(back.epoch(), 2);
        assert_eq!(back.offset(), &seconds(25.0));
    }

    #[test]
    fn positive_infinity_walks_off_the_end() {
        let timeline = three_epochs();
        let start = Instant::origin();
        let end = timeline.add(&start, &Duration::POSITIVE_INFINITY);
        assert!(end.is_current());
        assert_eq!(end.offset(), &Duration::POSITIVE_INFINITY);
    }

    #[test]
    fn empty_timeline_clamps_negative_offsets() {
        let timeline = CosmicTime::new(Vec::new(), None);
        let moved = timeline.add(
            &Instant::current(Duration::ZERO).unwrap(),
            &seconds(-3.0),
        );
        assert!(moved.is_current());
        assert!(moved.offset().is_zero());
    }

    #[test]
    fn add_time_steps_one_boundary_at_a_time() {
        let mut timeline = three_epochs();
        // present starts at the beginning of the open era
        timeline.subtract_time(&seconds(55.0));
        assert_eq!(timeline.now().epoch(), 0);
        assert_eq!(timeline.now().offset(), &seconds(5.0));

        timeline.add_time(&seconds(7.0));
        assert_eq!(timeline.now().epoch(), 1);
        assert_eq!(timeline.now().offset(), &seconds(2.0));

        timeline.add_time(&seconds(48.0));
        assert!(timeline.now().is_current());
        assert_eq!(timeline.now().offset(), &Duration::ZERO);
    }

    #[test]
    fn add_time_ignores_zero_and_perpetual_deltas() {
        let mut timeline = three_epochs();
        let before = timeline.now().clone();
        timeline.add_time(&Duration::ZERO);
        timeline.add_time(&Duration::POSITIVE_INFINITY);
        timeline.subtract_time(&Duration::POSITIVE_INFINITY);
        assert_eq!(timeline.now(), &before);
    }

    #[test]
    fn subtract_time_saturates_at_the_origin() {
        let mut timeline = three_epochs();
        timeline.subtract_time(&seconds(1e6));
        assert_eq!(timeline.now(), &Instant::origin());
    }

    #[test]
    fn difference_measures_elapsed_time() {
        let timeline = three_epochs();
        let early = Instant::new(0, seconds(5.0)).unwrap();
        let late = Instant::new(1, seconds(5.0)).unwrap();
        assert_eq!(timeline.difference(&early, &late), seconds(10.0));
        assert_eq!(timeline.difference(&late, &early), seconds(-10.0));

        let now = Instant::current(Duration::ZERO).unwrap();
        assert_eq!(timeline.difference(&early, &now), seconds(55.0));
    }

    #[test]
    fn difference_is_antisymmetric() {
        let timeline = three_epochs();
        let instants = [
            Instant::origin(),
            Instant::new(1, seconds(3.0)).unwrap(),
            Instant::new(2, seconds(29.0)).unwrap(),
            Instant::current(seconds(100.0)).unwrap(),
        ];
        for a in &instants {
            for b in &instants {
                assert_eq!(
                    timeline.difference(a, b),
                    timeline.difference(b, a).negate(),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn epoch_lookup_by_age() {
        let timeline = CosmicTime::new(
            vec![
                Epoch::anonymous(seconds(10.0)).unwrap(),
                Epoch::anonymous(seconds(20.0)).unwrap(),
            ],
            None,
        );
        assert_eq!(timeline.epoch_of(&seconds(5.0)), 0);
        assert_eq!(timeline.epoch_of(&seconds(15.0)), 1);
        assert_eq!(timeline.epoch_of(&seconds(35.0)), Instant::CURRENT_EPOCH);
        assert_eq!(
            timeline.epoch_of(&seconds(-1.0)),
            Instant::CURRENT_EPOCH
        );
        assert_eq!(
            timeline.epoch_of(&Duration::POSITIVE_INFINITY),
            Instant::CURRENT_EPOCH
        );
        let empty = CosmicTime::new(Vec::new(), None);
        assert_eq!(empty.epoch_of(&seconds(1.0)), Instant::CURRENT_EPOCH);
    }

    #[test]
    fn appending_epochs_keeps_instants_valid() {
        let mut timeline = three_epochs();
        let pinned = Instant::new(1, seconds(4.0)).unwrap();
        let before = timeline.difference(&Instant::origin(), &pinned);
        timeline.push_epoch(Epoch::anonymous(seconds(40.0)).unwrap());
        assert_eq!(
            timeline.difference(&Instant::origin(), &pinned),
            before
        );
        assert_eq!(timeline.epochs().len(), 4);
    }

    #[test]
    fn default_timeline_is_the_standard_catalogue() {
        let timeline = CosmicTime::default();
        assert_eq!(timeline.epochs().len(), 10);
        assert_eq!(timeline.current_epoch_name(), Some("Stelliferous"));
        assert!(timeline.now().is_current());
        assert!(timeline.total_span() > Duration::from_whole_years(1_000_000_000));
    }
}
