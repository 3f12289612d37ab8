// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Crate-wide error type.
//!
//! Every fallible operation in the crate returns [`Error`] through the
//! [`Result`] alias. Variants fall into three families, exposed via
//! [`Error::kind`]:
//!
//! | Family | Variants |
//! |--------|----------|
//! | [`ErrorKind::InvalidArgument`] | [`Error::NanInput`], [`Error::InvalidEpoch`], [`Error::NegativeOffset`], [`Error::InvalidAeonTerm`] |
//! | [`ErrorKind::Overflow`] | [`Error::AeonOverflow`], [`Error::RangeOverflow`] |
//! | [`ErrorKind::Parse`] | [`Error::EmptyInput`], [`Error::UnknownFormat`], [`Error::MalformedPattern`], [`Error::ParseFailure`] |
//!
//! Construction-time errors are surfaced immediately by the constructor —
//! no partial value is ever produced. Saturating arithmetic (addition,
//! timeline walks) never errors; it clamps to ±infinity or the zero
//! instant instead.

use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A numeric or structural input was rejected outright.
    InvalidArgument,
    /// A magnitude exceeded a fixed capacity.
    Overflow,
    /// Text did not match the requested format.
    Parse,
}

/// Errors produced by `deeptime` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A floating-point factory received a NaN input.
    #[error("numeric input is NaN")]
    NanInput,

    /// An epoch was constructed from a zero, negative, or perpetual span.
    #[error("epoch duration must be a positive, finite span")]
    InvalidEpoch,

    /// An instant was constructed with a negative offset.
    #[error("instant offset must be non-negative")]
    NegativeOffset,

    /// A caller-supplied aeon-sequence term is outside `[0, 10^18)`.
    #[error("aeon sequence term {0} is outside [0, 10^18)")]
    InvalidAeonTerm(u64),

    /// Carry propagation would push the aeon sequence past its 100-term
    /// bound.
    #[error("aeon sequence would exceed {max} terms", max = crate::aeon::MAX_TERMS)]
    AeonOverflow,

    /// The magnitude does not fit the requested fixed-range target type.
    #[error("duration exceeds the range of {0}")]
    RangeOverflow(&'static str),

    /// The input was empty or whitespace-only.
    #[error("cannot parse an empty or whitespace-only input")]
    EmptyInput,

    /// A single-character format specifier is not a known standard format.
    #[error("unknown standard format specifier {0:?}")]
    UnknownFormat(char),

    /// A custom pattern is itself malformed (e.g. a dangling `%`).
    #[error("malformed format pattern: {0}")]
    MalformedPattern(String),

    /// The input does not match the requested format.
    #[error("input does not match format: {0}")]
    ParseFailure(String),
}

impl Error {
    /// The family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NanInput
            | Error::InvalidEpoch
            | Error::NegativeOffset
            | Error::InvalidAeonTerm(_) => ErrorKind::InvalidArgument,
            Error::AeonOverflow | Error::RangeOverflow(_) => ErrorKind::Overflow,
            Error::EmptyInput
            | Error::UnknownFormat(_)
            | Error::MalformedPattern(_)
            | Error::ParseFailure(_) => ErrorKind::Parse,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
