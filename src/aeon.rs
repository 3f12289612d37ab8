// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bounded base-10¹⁸ aeon counter.
//!
//! [`AeonSequence`] is the coarsest layer of a duration: an owned,
//! little-endian digit array in base 10¹⁸ counting whole aeons
//! (1 aeon = 10⁶ years). The bound of [`MAX_TERMS`] terms puts the
//! representable ceiling above 10¹⁸⁰⁰ aeons, and every carry loop is
//! bounded by a plain length check — no linked structure, no recursion.
//!
//! Invariants held by every constructed value:
//! - each term is `< 10¹⁸`;
//! - the most-significant (last) term is non-zero, so zero is uniquely the
//!   empty sequence;
//! - the term count never exceeds [`MAX_TERMS`].

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Maximum number of base-10¹⁸ terms a sequence may hold.
pub const MAX_TERMS: usize = 100;

/// The positional base of one term.
pub const TERM_BASE: u64 = 1_000_000_000_000_000_000;

/// Decimal digits per full term.
const DIGITS_PER_TERM: usize = 18;

/// Aeon count as a bounded little-endian digit array in base 10¹⁸.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AeonSequence {
    terms: Vec<u64>,
}

impl AeonSequence {
    /// The empty (zero) sequence.
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// The sequence holding exactly one aeon.
    pub(crate) fn one() -> Self {
        Self { terms: vec![1] }
    }

    /// Adopt terms verbatim, trusting the caller for every invariant.
    ///
    /// Used by the non-normalizing persistence path, which must not
    /// silently repair a round-trip-breaking encoded state.
    pub(crate) fn from_terms_unchecked(terms: Vec<u64>) -> Self {
        Self { terms }
    }

    /// Build from caller-supplied terms, least-significant first.
    ///
    /// Trailing zero terms are trimmed (a sequence whose only term is zero
    /// normalizes to empty). Fails with an invalid-argument condition if a
    /// term is `≥ 10¹⁸` and with an overflow condition past [`MAX_TERMS`].
    pub fn from_terms(terms: Vec<u64>) -> Result<Self> {
        if let Some(&bad) = terms.iter().find(|&&t| t >= TERM_BASE) {
            return Err(Error::InvalidAeonTerm(bad));
        }
        let mut terms = terms;
        while terms.last() == Some(&0) {
            terms.pop();
        }
        if terms.len() > MAX_TERMS {
            return Err(Error::AeonOverflow);
        }
        Ok(Self { terms })
    }

    /// The terms, least-significant first. Empty means zero.
    pub fn terms(&self) -> &[u64] {
        &self.terms
    }

    /// True for the zero sequence.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no terms are present (same as [`AeonSequence::is_zero`]).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Add a scalar aeon count in place, propagating carries.
    pub(crate) fn add_scalar(&mut self, value: u128) -> Result<()> {
        let base = TERM_BASE as u128;
        let mut carry = value;
        let mut i = 0;
        while carry != 0 {
            if i == self.terms.len() {
                if self.terms.len() == MAX_TERMS {
                    return Err(Error::AeonOverflow);
                }
                self.terms.push(0);
            }
            let sum = self.terms[i] as u128 + carry % base;
            self.terms[i] = (sum % base) as u64;
            carry = carry / base + sum / base;
            i += 1;
        }
        Ok(())
    }

    /// Term-wise addition with carry propagation.
    pub(crate) fn checked_add(&self, other: &Self) -> Result<Self> {
        let base = TERM_BASE as u128;
        let len = self.terms.len().max(other.terms.len());
        let mut terms = Vec::with_capacity(len + 1);
        let mut carry = 0u128;
        for i in 0..len {
            let a = self.terms.get(i).copied().unwrap_or(0) as u128;
            let b = other.terms.get(i).copied().unwrap_or(0) as u128;
            let sum = a + b + carry;
            terms.push((sum % base) as u64);
            carry = sum / base;
        }
        if carry != 0 {
            terms.push(carry as u64);
        }
        if terms.len() > MAX_TERMS {
            return Err(Error::AeonOverflow);
        }
        Ok(Self { terms })
    }

    /// Term-wise subtraction with borrow. Requires `self >= other`.
    pub(crate) fn borrowing_sub(&self, other: &Self) -> Self {
        debug_assert!(self.cmp_magnitude(other) != Ordering::Less);
        let mut terms = Vec::with_capacity(self.terms.len());
        let mut borrow = 0u64;
        for i in 0..self.terms.len() {
            let a = self.terms[i];
            let b = other.terms.get(i).copied().unwrap_or(0) + borrow;
            if a >= b {
                terms.push(a - b);
                borrow = 0;
            } else {
                terms.push(a + TERM_BASE - b);
                borrow = 1;
            }
        }
        while terms.last() == Some(&0) {
            terms.pop();
        }
        Self { terms }
    }

    /// Magnitude ordering: term count first, then terms most-significant
    /// first.
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match self.terms.len().cmp(&other.terms.len()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        for (a, b) in self.terms.iter().rev().zip(other.terms.iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    /// Prepend `count` zero terms (multiply by 10¹⁸ᶜ).
    pub(crate) fn shifted(&self, count: usize) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::new());
        }
        if self.terms.len() + count > MAX_TERMS {
            return Err(Error::AeonOverflow);
        }
        let mut terms = vec![0u64; count];
        terms.extend_from_slice(&self.terms);
        Ok(Self { terms })
    }

    // ── numeric conversions ───────────────────────────────────────────

    /// Decompose a non-negative, finite float into terms.
    ///
    /// `f64::MAX` needs 18 terms, so this never hits the term bound; the
    /// result is exact whenever `value` is an exactly-representable
    /// integer (e.g. `1e18`).
    pub(crate) fn from_f64(value: f64) -> Self {
        debug_assert!(value.is_finite() && value >= 0.0);
        let base = TERM_BASE as f64;
        let mut v = value.trunc();
        let mut terms = Vec::new();
        while v >= 1.0 {
            let mut q = (v / base).trunc();
            let mut r = v - q * base;
            if r < 0.0 {
                q -= 1.0;
                r += base;
            } else if r >= base {
                q += 1.0;
                r -= base;
            }
            terms.push(r as u64);
            v = q;
        }
        while terms.last() == Some(&0) {
            terms.pop();
        }
        Self { terms }
    }

    /// Approximate aeon count as a float. Saturates to `f64::INFINITY`
    /// for sequences beyond the float range.
    pub(crate) fn to_f64(&self) -> f64 {
        let base = TERM_BASE as f64;
        let mut total = 0.0f64;
        for &term in self.terms.iter().rev() {
            total = total * base + term as f64;
        }
        total
    }

    // ── decimal sub-format ────────────────────────────────────────────

    /// Render as a plain decimal digit string (`"0"` when zero).
    pub fn to_decimal(&self) -> String {
        match self.terms.split_last() {
            None => "0".to_string(),
            Some((most, rest)) => {
                let mut out = most.to_string();
                for term in rest.iter().rev() {
                    out.push_str(&format!("{term:0width$}", width = DIGITS_PER_TERM));
                }
                out
            }
        }
    }

    /// Parse a plain decimal digit run, regrouping 18 digits at a time
    /// from the right. A single all-zero group is dropped.
    pub fn from_decimal(digits: &str) -> Result<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::ParseFailure(format!(
                "aeon digit run {digits:?} is not a decimal integer"
            )));
        }
        let bytes = digits.as_bytes();
        let mut terms = Vec::with_capacity(bytes.len() / DIGITS_PER_TERM + 1);
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(DIGITS_PER_TERM);
            // the slice is pure ASCII digits, checked above
            let group = std::str::from_utf8(&bytes[start..end]).unwrap_or("0");
            let term: u64 = group
                .parse()
                .map_err(|_| Error::ParseFailure(format!("aeon group {group:?}")))?;
            terms.push(term);
            end = start;
        }
        Self::from_terms(terms)
    }
}

impl fmt::Display for AeonSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal())
    }
}
