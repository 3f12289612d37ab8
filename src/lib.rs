// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Cosmic Time Module
//!
//! This crate provides duration and timeline primitives for time scales
//! conventional clock types cannot reach — from Planck time
//! (~5.4 × 10⁻⁴⁴ s) to spans beyond 10¹⁸⁰⁷ years — without precision
//! loss, plus a round-trippable text format for them.
//!
//! # Core types
//!
//! - [`Duration`] — mixed-radix signed span across five precision layers.
//! - [`DurationBuilder`] — the simultaneous multi-unit constructor.
//! - [`AeonSequence`] — bounded base-10¹⁸ aeon counter (1 aeon = 10⁶ years).
//! - [`Epoch`] — a named, finite, strictly positive timeline segment.
//! - [`Instant`] — an epoch index plus a non-negative offset.
//! - [`CosmicTime`] — ordered epochs, a current-era name, and a mutable
//!   present instant with saturating navigation.
//! - [`Locale`] — explicit symbol provider for parsing and rendering.
//! - [`StandardFormat`] — the named text formats (`d D F g G o O t T e E`).
//! - [`RawDuration`] — the seven persisted fields, for structured encodings.
//!
//! # Precision layers
//!
//! | Layer | Capacity |
//! |-------|----------|
//! | Planck remainder | < ≈1.85 × 10²⁰ Planck units (one yoctosecond) |
//! | yoctoseconds | < 10¹⁵ (one nanosecond) |
//! | nanoseconds | < 31 557 600 × 10⁹ (one Julian year) |
//! | years | < 10⁶ (one aeon) |
//! | aeons | base-10¹⁸ terms, at most 100 |
//!
//! The unit system is calendar-agnostic: a day is exactly 86 400 s and a
//! year is the Julian year of 31 557 600 s. No time zones, no leap
//! years.
//!
//! # Quick example
//!
//! ```
//! use deeptime::{format, parse, CosmicTime, Duration, Locale};
//!
//! let age = Duration::builder().years(2.0).days(10.0).seconds(5.5).build()?;
//! let locale = Locale::default();
//!
//! // the round-trip format reproduces the value exactly
//! let text = format(&age, "o", &locale)?;
//! assert_eq!(parse(&text, &locale)?, age);
//!
//! // navigate the standard cosmological timeline
//! let mut timeline = CosmicTime::default();
//! timeline.add_time(&Duration::from_years(1.0)?);
//! # Ok::<(), deeptime::Error>(())
//! ```

mod aeon;
mod calendar;
mod duration;
mod epoch;
mod error;
pub mod format;
mod locale;
mod pattern;
mod quantity;
mod timeline;
pub mod units;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use aeon::{AeonSequence, MAX_TERMS, TERM_BASE};
pub use duration::{Duration, DurationBuilder, RawDuration};
pub use epoch::Epoch;
pub use error::{Error, ErrorKind, Result};
pub use format::{
    format, parse, parse_round_trip, parse_with_format, render_extensible,
    render_round_trip, try_parse, try_parse_with_format,
};
pub use locale::Locale;
pub use pattern::{StandardFormat, ROUND_TRIP_PATTERN};
pub use timeline::{CosmicTime, Instant};
pub use units::Unit;
