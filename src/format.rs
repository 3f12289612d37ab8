// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rendering and parsing of durations.
//!
//! Three surfaces share one accumulator pipeline:
//!
//! - **Custom patterns** (and the standard formats that expand to them):
//!   rendered token by token, parsed slot by slot. A slot's value is
//!   delimited by the literal that follows it in the pattern, by the
//!   field's fixed width otherwise, or by the end of input for the final
//!   slot.
//! - **The extensible format** (`e`): only the non-zero units, each with
//!   an SI-style suffix (`12y 3d 10min 2s 500ms … 42tP`), parsed as
//!   alternating digit and suffix runs.
//! - **The round-trip format** (`o`): the fixed custom pattern
//!   [`ROUND_TRIP_PATTERN`](crate::pattern::ROUND_TRIP_PATTERN), the
//!   durable serialization contract.
//!
//! Perpetual durations ignore the requested format and always render as
//! the locale's infinity symbol; parsing accepts those symbols for any
//! format. Missing trailing units parse as zero; empty or
//! whitespace-only input is a parse failure.

use crate::aeon::AeonSequence;
use crate::duration::{Accumulator, Duration};
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::pattern::{tokenize, FieldKind, StandardFormat, Token};
use crate::units::{
    Unit, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICROSECOND, NANOS_PER_MILLISECOND,
    NANOS_PER_MINUTE, NANOS_PER_SECOND, PLANCK_PER_YOCTOSECOND, YOCTOS_PER_ATTOSECOND,
    YOCTOS_PER_FEMTOSECOND, YOCTOS_PER_PICOSECOND, YOCTOS_PER_ZEPTOSECOND,
};

// ═══════════════════════════════════════════════════════════════════════════
// Public entry points
// ═══════════════════════════════════════════════════════════════════════════

/// Render `duration` under `spec`: a single standard-format specifier
/// (`d D F g G o O t T e E`), a custom pattern, or empty for the
/// extensible default.
pub fn format(duration: &Duration, spec: &str, locale: &Locale) -> Result<String> {
    let mut chars = spec.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(render_extensible(duration, locale)),
        (Some(specifier), None) => match StandardFormat::from_specifier(specifier) {
            Some(standard) => Ok(render_standard(duration, standard, locale)),
            None => Err(Error::UnknownFormat(specifier)),
        },
        _ => {
            let tokens = tokenize(spec)?;
            Ok(render_with_tokens(duration, &tokens, locale))
        }
    }
}

/// Render under a named standard format. Never fails.
pub fn render_standard(
    duration: &Duration,
    standard: StandardFormat,
    locale: &Locale,
) -> String {
    match standard.pattern() {
        None => render_extensible(duration, locale),
        Some(pattern) => match tokenize(pattern) {
            Ok(tokens) => render_with_tokens(duration, &tokens, locale),
            // standard expansions are static and always tokenize
            Err(_) => render_extensible(duration, locale),
        },
    }
}

/// The round-trip text form (the `o` format).
pub fn render_round_trip(duration: &Duration, locale: &Locale) -> String {
    render_standard(duration, StandardFormat::RoundTrip, locale)
}

/// Best-effort parse: tries the infinity symbols, then every known
/// standard format in a fixed order.
pub fn parse(text: &str, locale: &Locale) -> Result<Duration> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(perpetual) = parse_infinity(trimmed, locale) {
        return Ok(perpetual);
    }
    for standard in StandardFormat::SCAN_ORDER {
        if let Ok(duration) = parse_standard(trimmed, standard, locale) {
            return Ok(duration);
        }
    }
    Err(Error::ParseFailure(format!(
        "{trimmed:?} does not match any known format"
    )))
}

/// Best-effort parse returning `None` instead of an error.
pub fn try_parse(text: &str, locale: &Locale) -> Option<Duration> {
    parse(text, locale).ok()
}

/// Parse under `spec`: a standard-format specifier or a custom pattern.
pub fn parse_with_format(text: &str, spec: &str, locale: &Locale) -> Result<Duration> {
    let mut chars = spec.chars();
    match (chars.next(), chars.next()) {
        (None, _) => parse_standard(text, StandardFormat::Extensible, locale),
        (Some(specifier), None) => match StandardFormat::from_specifier(specifier) {
            Some(standard) => parse_standard(text, standard, locale),
            None => Err(Error::UnknownFormat(specifier)),
        },
        _ => {
            let tokens = tokenize(spec)?;
            parse_with_tokens(text, &tokens, locale)
        }
    }
}

/// [`parse_with_format`] returning `None` instead of an error.
pub fn try_parse_with_format(text: &str, spec: &str, locale: &Locale) -> Option<Duration> {
    parse_with_format(text, spec, locale).ok()
}

/// Parse under a named standard format.
pub fn parse_standard(
    text: &str,
    standard: StandardFormat,
    locale: &Locale,
) -> Result<Duration> {
    match standard.pattern() {
        None => parse_extensible(text, locale),
        Some(pattern) => {
            let tokens = tokenize(pattern)?;
            parse_with_tokens(text, &tokens, locale)
        }
    }
}

/// Parse the round-trip text form (the `o` format).
pub fn parse_round_trip(text: &str, locale: &Locale) -> Result<Duration> {
    parse_standard(text, StandardFormat::RoundTrip, locale)
}

// ═══════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════

fn render_with_tokens(duration: &Duration, tokens: &[Token], locale: &Locale) -> String {
    if duration.is_perpetual() {
        return infinity_symbol(duration, locale);
    }
    let mut out = String::new();
    if duration.is_negative() {
        out.push_str(&locale.negative_sign);
    }
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Field { kind, width } => {
                render_field(&mut out, duration, *kind, *width, locale)
            }
        }
    }
    out
}

fn render_field(
    out: &mut String,
    duration: &Duration,
    kind: FieldKind,
    width: usize,
    locale: &Locale,
) {
    let nanos = duration.nanosecond_remainder();
    let yoctos = duration.yoctosecond_remainder();
    let value = match kind {
        FieldKind::Years => {
            push_padded(out, &years_digits(duration), width);
            return;
        }
        FieldKind::Planck => {
            out.push_str(&float_digits(
                duration.planck_remainder(),
                width,
                locale,
            ));
            return;
        }
        FieldKind::Fraction { trim } => {
            let digits = fraction_digits(duration);
            let mut cut: String = digits.chars().take(width).collect();
            while cut.chars().count() < width {
                cut.push('0');
            }
            if trim {
                let trimmed = cut.trim_end_matches('0');
                out.push_str(trimmed);
            } else {
                out.push_str(&cut);
            }
            return;
        }
        FieldKind::Days => nanos / NANOS_PER_DAY,
        FieldKind::Hours => nanos % NANOS_PER_DAY / NANOS_PER_HOUR,
        FieldKind::Minutes => nanos % NANOS_PER_HOUR / NANOS_PER_MINUTE,
        FieldKind::Seconds => nanos % NANOS_PER_MINUTE / NANOS_PER_SECOND,
        FieldKind::Milliseconds => nanos % NANOS_PER_SECOND / NANOS_PER_MILLISECOND,
        FieldKind::Microseconds => {
            nanos % NANOS_PER_MILLISECOND / NANOS_PER_MICROSECOND
        }
        FieldKind::Nanoseconds => nanos % NANOS_PER_MICROSECOND,
        FieldKind::Picoseconds => yoctos / YOCTOS_PER_PICOSECOND,
        FieldKind::Femtoseconds => yoctos % YOCTOS_PER_PICOSECOND / YOCTOS_PER_FEMTOSECOND,
        FieldKind::Attoseconds => yoctos % YOCTOS_PER_FEMTOSECOND / YOCTOS_PER_ATTOSECOND,
        FieldKind::Zeptoseconds => yoctos % YOCTOS_PER_ATTOSECOND / YOCTOS_PER_ZEPTOSECOND,
        FieldKind::Yoctoseconds => yoctos % YOCTOS_PER_ZEPTOSECOND,
    };
    push_padded(out, &value.to_string(), width);
}

fn push_padded(out: &mut String, digits: &str, width: usize) {
    for _ in digits.chars().count()..width {
        out.push('0');
    }
    out.push_str(digits);
}

/// Year digit run with the aeon sequence folded in: the aeon decimal
/// followed by the year remainder padded to six digits.
fn years_digits(duration: &Duration) -> String {
    let aeons = duration.aeon_sequence();
    if aeons.is_zero() {
        duration.year_remainder().to_string()
    } else {
        format!("{}{:06}", aeons.to_decimal(), duration.year_remainder())
    }
}

/// Full sub-second digit run: 9 nanosecond digits, 15 yoctosecond
/// digits, then the Planck remainder as a fraction of one yoctosecond.
fn fraction_digits(duration: &Duration) -> String {
    let mut digits = format!(
        "{:09}{:015}",
        duration.nanosecond_remainder() % NANOS_PER_SECOND,
        duration.yoctosecond_remainder()
    );
    let planck_fraction = duration.planck_remainder() / PLANCK_PER_YOCTOSECOND;
    if planck_fraction > 0.0 {
        let rendered = format!("{planck_fraction}");
        if let Some(rest) = rendered.strip_prefix("0.") {
            digits.push_str(rest);
        }
    }
    digits
}

/// Decimal rendering of a float with the locale's decimal separator and
/// a minimum integer-part width.
fn float_digits(value: f64, min_width: usize, locale: &Locale) -> String {
    let rendered = format!("{value}");
    let (integer, fraction) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };
    let mut out = String::new();
    for _ in integer.chars().count()..min_width {
        out.push('0');
    }
    out.push_str(&integer);
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(&fraction);
    }
    out
}

fn infinity_symbol(duration: &Duration, locale: &Locale) -> String {
    if duration.is_negative() {
        locale.negative_infinity.to_string()
    } else {
        locale.positive_infinity.to_string()
    }
}

// ── extensible rendering ──────────────────────────────────────────────────

/// Render only the units with non-zero magnitude, SI-style suffixes,
/// space separated; zero renders as `"0s"`.
pub fn render_extensible(duration: &Duration, locale: &Locale) -> String {
    if duration.is_perpetual() {
        return infinity_symbol(duration, locale);
    }
    let nanos = duration.nanosecond_remainder();
    let yoctos = duration.yoctosecond_remainder();
    let mut parts: Vec<String> = Vec::new();

    let years = years_digits(duration);
    if years != "0" {
        parts.push(format!("{years}{}", Unit::Year.suffix()));
    }
    for (value, unit) in [
        (nanos / NANOS_PER_DAY, Unit::Day),
        (nanos % NANOS_PER_DAY / NANOS_PER_HOUR, Unit::Hour),
        (nanos % NANOS_PER_HOUR / NANOS_PER_MINUTE, Unit::Minute),
        (nanos % NANOS_PER_MINUTE / NANOS_PER_SECOND, Unit::Second),
        (nanos % NANOS_PER_SECOND / NANOS_PER_MILLISECOND, Unit::Millisecond),
        (nanos % NANOS_PER_MILLISECOND / NANOS_PER_MICROSECOND, Unit::Microsecond),
        (nanos % NANOS_PER_MICROSECOND, Unit::Nanosecond),
        (yoctos / YOCTOS_PER_PICOSECOND, Unit::Picosecond),
        (yoctos % YOCTOS_PER_PICOSECOND / YOCTOS_PER_FEMTOSECOND, Unit::Femtosecond),
        (yoctos % YOCTOS_PER_FEMTOSECOND / YOCTOS_PER_ATTOSECOND, Unit::Attosecond),
        (yoctos % YOCTOS_PER_ATTOSECOND / YOCTOS_PER_ZEPTOSECOND, Unit::Zeptosecond),
        (yoctos % YOCTOS_PER_ZEPTOSECOND, Unit::Yoctosecond),
    ] {
        if value != 0 {
            parts.push(format!("{value}{}", unit.suffix()));
        }
    }
    if duration.planck_remainder() != 0.0 {
        parts.push(format!(
            "{}{}",
            float_digits(duration.planck_remainder(), 1, locale),
            Unit::Planck.suffix()
        ));
    }

    if parts.is_empty() {
        return format!("0{}", Unit::Second.suffix());
    }
    let body = parts.join(" ");
    if duration.is_negative() {
        format!("{}{body}", locale.negative_sign)
    } else {
        body
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Custom-pattern parsing
// ═══════════════════════════════════════════════════════════════════════════

struct Slot<'p> {
    kind: FieldKind,
    width: usize,
    /// The literal immediately following this field, if any; its first
    /// character delimits the slot's value.
    terminator: Option<&'p str>,
}

fn build_slots<'p>(tokens: &'p [Token]) -> (Option<&'p str>, Vec<Slot<'p>>) {
    let mut leading = None;
    let mut slots: Vec<Slot<'p>> = Vec::new();
    for token in tokens {
        match token {
            Token::Literal(text) => match slots.last_mut() {
                Some(last) if last.terminator.is_none() => {
                    last.terminator = Some(text.as_str())
                }
                Some(_) => {}
                None => leading = Some(text.as_str()),
            },
            Token::Field { kind, width } => slots.push(Slot {
                kind: *kind,
                width: *width,
                terminator: None,
            }),
        }
    }
    (leading, slots)
}

fn parse_with_tokens(text: &str, tokens: &[Token], locale: &Locale) -> Result<Duration> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(perpetual) = parse_infinity(trimmed, locale) {
        return Ok(perpetual);
    }

    // a leading negative sign is consumed only at the very first slot
    let (negative, mut input) = strip_sign(trimmed, locale);

    let (leading, slots) = build_slots(tokens);
    if let Some(lead) = leading {
        input = input.strip_prefix(lead).ok_or_else(|| {
            Error::ParseFailure(format!("expected leading literal {lead:?}"))
        })?;
    }

    let mut acc = Accumulator::default();
    let last = slots.len().saturating_sub(1);
    for (index, slot) in slots.iter().enumerate() {
        if input.is_empty() {
            // missing trailing units parse as zero
            break;
        }
        let (slice, remainder) = split_slot(input, slot, index == last, locale)?;
        accumulate_slot(&mut acc, slot.kind, slice, locale)?;
        input = remainder;
    }
    if !input.is_empty() {
        return Err(Error::ParseFailure(format!(
            "unexpected trailing input {input:?}"
        )));
    }
    acc.finish(negative)
}

fn split_slot<'i>(
    input: &'i str,
    slot: &Slot<'_>,
    is_last: bool,
    locale: &Locale,
) -> Result<(&'i str, &'i str)> {
    if let Some(terminator) = slot.terminator {
        let Some(sep) = terminator.chars().next() else {
            return Ok((input, ""));
        };
        return match input.find(sep) {
            Some(position) => {
                let slice = &input[..position];
                let rest = &input[position..];
                match rest.strip_prefix(terminator) {
                    Some(after) => Ok((slice, after)),
                    None => Err(Error::ParseFailure(format!(
                        "expected separator {terminator:?}"
                    ))),
                }
            }
            // trailing omission: the slot takes the rest of the input
            None => Ok((input, "")),
        };
    }
    if is_last {
        return Ok((input, ""));
    }
    if slot.kind.is_variable_width() || matches!(slot.kind, FieldKind::Fraction { .. }) {
        let end = number_run_end(input, locale);
        if end == 0 {
            return Err(Error::ParseFailure(format!(
                "expected a digit at {input:?}"
            )));
        }
        return Ok(input.split_at(end));
    }
    // fixed-width slot: consume the letter run's width in characters
    let end = input
        .char_indices()
        .nth(slot.width)
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    Ok(input.split_at(end))
}

/// Length of the leading digit run (digits plus locale separators).
fn number_run_end(input: &str, locale: &Locale) -> usize {
    let mut end = 0;
    for (i, ch) in input.char_indices() {
        if ch.is_ascii_digit()
            || ch == locale.group_separator
            || ch == locale.decimal_separator
        {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    end
}

fn accumulate_slot(
    acc: &mut Accumulator,
    kind: FieldKind,
    slice: &str,
    locale: &Locale,
) -> Result<()> {
    let cleaned: String = slice
        .chars()
        .filter(|&ch| ch != locale.group_separator)
        .collect();
    if cleaned.is_empty() {
        return Err(Error::ParseFailure(format!(
            "empty value for a {kind:?} slot"
        )));
    }
    match kind {
        FieldKind::Years => accumulate_years_digits(acc, &cleaned),
        FieldKind::Planck => {
            acc.add_planck(parse_float(&cleaned, locale)?)?;
            Ok(())
        }
        FieldKind::Fraction { .. } => accumulate_fraction_of_second(acc, &cleaned),
        FieldKind::Days => accumulate_integer(acc, &cleaned, NANOS_PER_DAY),
        FieldKind::Hours => accumulate_integer(acc, &cleaned, NANOS_PER_HOUR),
        FieldKind::Minutes => accumulate_integer(acc, &cleaned, NANOS_PER_MINUTE),
        FieldKind::Seconds => accumulate_integer(acc, &cleaned, NANOS_PER_SECOND),
        FieldKind::Milliseconds => accumulate_integer(acc, &cleaned, NANOS_PER_MILLISECOND),
        FieldKind::Microseconds => {
            accumulate_integer(acc, &cleaned, NANOS_PER_MICROSECOND)
        }
        FieldKind::Nanoseconds => accumulate_integer(acc, &cleaned, 1),
        FieldKind::Picoseconds => {
            acc.add_yoctos(parse_u128(&cleaned)? * YOCTOS_PER_PICOSECOND as u128);
            Ok(())
        }
        FieldKind::Femtoseconds => {
            acc.add_yoctos(parse_u128(&cleaned)? * YOCTOS_PER_FEMTOSECOND as u128);
            Ok(())
        }
        FieldKind::Attoseconds => {
            acc.add_yoctos(parse_u128(&cleaned)? * YOCTOS_PER_ATTOSECOND as u128);
            Ok(())
        }
        FieldKind::Zeptoseconds => {
            acc.add_yoctos(parse_u128(&cleaned)? * YOCTOS_PER_ZEPTOSECOND as u128);
            Ok(())
        }
        FieldKind::Yoctoseconds => {
            acc.add_yoctos(parse_u128(&cleaned)?);
            Ok(())
        }
    }
}

fn accumulate_integer(acc: &mut Accumulator, digits: &str, nanos_per_unit: u64) -> Result<()> {
    acc.add_nanos(parse_u128(digits)? * nanos_per_unit as u128);
    Ok(())
}

fn parse_u128(digits: &str) -> Result<u128> {
    digits
        .parse::<u128>()
        .map_err(|_| Error::ParseFailure(format!("{digits:?} is not a decimal integer")))
}

fn parse_float(text: &str, locale: &Locale) -> Result<f64> {
    let normalized: String = text
        .chars()
        .map(|ch| if ch == locale.decimal_separator { '.' } else { ch })
        .collect();
    if !normalized
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch == '.' || ch == 'e' || ch == 'E' || ch == '+' || ch == '-')
    {
        return Err(Error::ParseFailure(format!("{text:?} is not a number")));
    }
    normalized
        .parse::<f64>()
        .map_err(|_| Error::ParseFailure(format!("{text:?} is not a number")))
}

/// Year digit run → year layer plus regrouped aeon sequence.
fn accumulate_years_digits(acc: &mut Accumulator, digits: &str) -> Result<()> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::ParseFailure(format!(
            "{digits:?} is not a year digit run"
        )));
    }
    if digits.len() <= 6 {
        acc.add_years(parse_u128(digits)?);
    } else {
        let (aeon_digits, year_digits) = digits.split_at(digits.len() - 6);
        acc.add_years(parse_u128(year_digits)?);
        let sequence = AeonSequence::from_decimal(aeon_digits)?;
        acc.add_aeons(&sequence)?;
    }
    Ok(())
}

/// Fractional-second digit run, split at the storage layers' digit
/// boundaries: 9 nanosecond digits, 15 yoctosecond digits, and the rest
/// as a fraction of one yoctosecond in Planck units.
fn accumulate_fraction_of_second(acc: &mut Accumulator, digits: &str) -> Result<()> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::ParseFailure(format!(
            "{digits:?} is not a fraction digit run"
        )));
    }
    let nano_digits = &digits[..digits.len().min(9)];
    if !nano_digits.is_empty() {
        let value = parse_u128(nano_digits)? * 10u128.pow(9 - nano_digits.len() as u32);
        acc.add_nanos(value);
    }
    if digits.len() > 9 {
        let yocto_digits = &digits[9..digits.len().min(24)];
        let value = parse_u128(yocto_digits)? * 10u128.pow(15 - yocto_digits.len() as u32);
        acc.add_yoctos(value);
    }
    if digits.len() > 24 {
        let rest = &digits[24..];
        let fraction: f64 = format!("0.{rest}")
            .parse()
            .map_err(|_| Error::ParseFailure(format!("{rest:?} fraction digits")))?;
        acc.add_planck(fraction * PLANCK_PER_YOCTOSECOND)?;
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Extensible parsing
// ═══════════════════════════════════════════════════════════════════════════

fn parse_extensible(text: &str, locale: &Locale) -> Result<Duration> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(perpetual) = parse_infinity(trimmed, locale) {
        return Ok(perpetual);
    }
    let (negative, mut input) = strip_sign(trimmed, locale);

    let mut acc = Accumulator::default();
    let mut pairs = 0usize;
    while !input.is_empty() {
        input = input.trim_start();
        if input.is_empty() {
            break;
        }
        let (number, after_number) = scan_number(input, locale);
        if number.is_empty() {
            return Err(Error::ParseFailure(format!(
                "expected a digit at {input:?}"
            )));
        }
        let (suffix, rest) = scan_suffix(after_number.trim_start());
        let unit = Unit::from_suffix(suffix).ok_or_else(|| {
            Error::ParseFailure(format!("{suffix:?} is not a unit suffix"))
        })?;
        accumulate_extensible(&mut acc, number, unit, locale)?;
        pairs += 1;
        input = rest;
    }
    if pairs == 0 {
        return Err(Error::ParseFailure("no unit values found".into()));
    }
    acc.finish(negative)
}

/// Leading digit run of the extensible format: digits, locale
/// separators, and a scientific-notation exponent embedded between
/// digits.
fn scan_number<'i>(input: &'i str, locale: &Locale) -> (&'i str, &'i str) {
    let mut end = 0usize;
    let mut index = 0usize;
    let mut previous_was_digit = false;
    while index < input.len() {
        let Some(ch) = input[index..].chars().next() else {
            break;
        };
        let width = ch.len_utf8();
        if ch.is_ascii_digit() {
            previous_was_digit = true;
            index += width;
            end = index;
            continue;
        }
        if ch == locale.group_separator || ch == locale.decimal_separator {
            previous_was_digit = false;
            index += width;
            end = index;
            continue;
        }
        if (ch == 'e' || ch == 'E') && previous_was_digit {
            let exponent = &input[index + width..];
            let unsigned = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            if unsigned.starts_with(|c: char| c.is_ascii_digit()) {
                index += width;
                if exponent.starts_with(['+', '-']) {
                    index += 1;
                }
                while index < input.len() && input.as_bytes()[index].is_ascii_digit() {
                    index += 1;
                }
                end = index;
                continue;
            }
        }
        break;
    }
    input.split_at(end)
}

fn scan_suffix(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, ch)| !ch.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    input.split_at(end)
}

fn accumulate_extensible(
    acc: &mut Accumulator,
    number: &str,
    unit: Unit,
    locale: &Locale,
) -> Result<()> {
    let cleaned: String = number
        .chars()
        .filter(|&ch| ch != locale.group_separator)
        .map(|ch| if ch == locale.decimal_separator { '.' } else { ch })
        .collect();
    let is_plain_integer = !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit());

    match unit {
        Unit::Year => {
            if is_plain_integer {
                accumulate_years_digits(acc, &cleaned)
            } else {
                acc.add_years_f64(parse_float(&cleaned, locale)?)
            }
        }
        Unit::Second => {
            if let Some((whole, fraction)) = cleaned.split_once('.') {
                if whole.bytes().all(|b| b.is_ascii_digit())
                    && fraction.bytes().all(|b| b.is_ascii_digit())
                {
                    if !whole.is_empty() {
                        accumulate_integer(acc, whole, NANOS_PER_SECOND)?;
                    }
                    if !fraction.is_empty() {
                        accumulate_fraction_of_second(acc, fraction)?;
                    }
                    return Ok(());
                }
            }
            if is_plain_integer {
                accumulate_integer(acc, &cleaned, NANOS_PER_SECOND)
            } else {
                acc.add_unit_f64(parse_float(&cleaned, locale)?, NANOS_PER_SECOND)
            }
        }
        Unit::Day | Unit::Hour | Unit::Minute | Unit::Millisecond | Unit::Microsecond
        | Unit::Nanosecond => {
            // at and above nanosecond resolution
            let nanos_per_unit = unit.nanos_per_unit().unwrap_or(1);
            if is_plain_integer {
                accumulate_integer(acc, &cleaned, nanos_per_unit)
            } else {
                acc.add_unit_f64(parse_float(&cleaned, locale)?, nanos_per_unit)
            }
        }
        Unit::Picosecond | Unit::Femtosecond | Unit::Attosecond | Unit::Zeptosecond
        | Unit::Yoctosecond => {
            let yoctos_per_unit = unit.yoctos_per_unit().unwrap_or(1);
            if is_plain_integer {
                acc.add_yoctos(parse_u128(&cleaned)? * yoctos_per_unit as u128);
                Ok(())
            } else {
                acc.add_yoctos_f64(parse_float(&cleaned, locale)? * yoctos_per_unit as f64)
            }
        }
        Unit::Planck => {
            acc.add_planck(parse_float(&cleaned, locale)?)?;
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Shared helpers
// ═══════════════════════════════════════════════════════════════════════════

fn parse_infinity(text: &str, locale: &Locale) -> Option<Duration> {
    if text == locale.positive_infinity.as_ref() {
        return Some(Duration::POSITIVE_INFINITY);
    }
    if text == locale.negative_infinity.as_ref() {
        return Some(Duration::NEGATIVE_INFINITY);
    }
    let negated = format!("{}{}", locale.negative_sign, locale.positive_infinity);
    if text == negated {
        return Some(Duration::NEGATIVE_INFINITY);
    }
    None
}

fn strip_sign<'i>(input: &'i str, locale: &Locale) -> (bool, &'i str) {
    if let Some(rest) = input.strip_prefix(locale.negative_sign.as_ref()) {
        return (true, rest);
    }
    if let Some(rest) = input.strip_prefix('-') {
        return (true, rest);
    }
    (false, input)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::NANOS_PER_DAY;

    fn locale() -> Locale {
        Locale::default()
    }

    fn round_trip(duration: &Duration) {
        let text = render_round_trip(duration, &locale());
        let back = parse_round_trip(&text, &locale()).unwrap();
        assert_eq!(&back, duration, "round-trip through {text:?}");
    }

    #[test]
    fn round_trip_layout_is_stable() {
        let d = Duration::builder()
            .years(2.0)
            .days(3.0)
            .hours(4.0)
            .minutes(5.0)
            .seconds(6.0)
            .build()
            .unwrap();
        assert_eq!(
            render_round_trip(&d, &locale()),
            "2:3:4:5:6:0:0:0:0:0:0:0:0:0"
        );
        round_trip(&d);
    }

    #[test]
    fn round_trip_zero_and_negative() {
        assert_eq!(
            render_round_trip(&Duration::ZERO, &locale()),
            "0:0:0:0:0:0:0:0:0:0:0:0:0:0"
        );
        round_trip(&Duration::ZERO);
        round_trip(&Duration::from_seconds(-90.5).unwrap());
    }

    #[test]
    fn round_trip_covers_every_layer() {
        let d = Duration::builder()
            .years(1234.0)
            .days(250.0)
            .hours(23.0)
            .minutes(59.0)
            .seconds(58.0)
            .milliseconds(999.0)
            .microseconds(888.0)
            .nanoseconds(777.0)
            .picoseconds(666.0)
            .femtoseconds(555.0)
            .attoseconds(444.0)
            .zeptoseconds(333.0)
            .yoctoseconds(222.0)
            .planck(111.5)
            .build()
            .unwrap();
        round_trip(&d);
    }

    #[test]
    fn round_trip_preserves_aeon_terms_exactly() {
        let d = Duration::builder()
            .aeon_sequence(AeonSequence::from_terms(vec![42, 0, 7]).unwrap())
            .years(17.0)
            .build()
            .unwrap();
        let text = render_round_trip(&d, &locale());
        let back = parse_round_trip(&text, &locale()).unwrap();
        assert_eq!(back.aeon_sequence().terms(), &[42, 0, 7]);
        assert_eq!(back, d);
    }

    #[test]
    fn perpetual_rendering_ignores_the_format() {
        for spec in ["o", "e", "G", "y:d"] {
            assert_eq!(
                format(&Duration::POSITIVE_INFINITY, spec, &locale()).unwrap(),
                "∞"
            );
            assert_eq!(
                format(&Duration::NEGATIVE_INFINITY, spec, &locale()).unwrap(),
                "-∞"
            );
        }
        assert_eq!(
            parse("∞", &locale()).unwrap(),
            Duration::POSITIVE_INFINITY
        );
        assert_eq!(
            parse_round_trip("-∞", &locale()).unwrap(),
            Duration::NEGATIVE_INFINITY
        );
    }

    #[test]
    fn extensible_renders_only_non_zero_units() {
        let d = Duration::builder()
            .years(5.0)
            .minutes(10.0)
            .milliseconds(500.0)
            .build()
            .unwrap();
        assert_eq!(render_extensible(&d, &locale()), "5y 10min 500ms");
        assert_eq!(render_extensible(&Duration::ZERO, &locale()), "0s");
        assert_eq!(
            render_extensible(&d.negate(), &locale()),
            "-5y 10min 500ms"
        );
    }

    #[test]
    fn extensible_parses_its_own_output() {
        let d = Duration::builder()
            .years(5.0)
            .days(12.0)
            .minutes(10.0)
            .seconds(2.0)
            .milliseconds(500.0)
            .picoseconds(9.0)
            .build()
            .unwrap();
        let text = render_extensible(&d, &locale());
        assert_eq!(parse_standard(&text, StandardFormat::Extensible, &locale()).unwrap(), d);
        assert_eq!(
            parse_standard("0s", StandardFormat::Extensible, &locale()).unwrap(),
            Duration::ZERO
        );
    }

    #[test]
    fn extensible_tolerates_separators_and_sign() {
        let parsed =
            parse_standard("-1,000y 500ms", StandardFormat::Extensible, &locale())
                .unwrap();
        let expected = Duration::builder()
            .years(1000.0)
            .milliseconds(500.0)
            .negative(true)
            .build()
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn extensible_accepts_scientific_aeon_runs() {
        let parsed = parse_standard("2e21y", StandardFormat::Extensible, &locale()).unwrap();
        let expected = Duration::from_years(2e21).unwrap();
        assert_eq!(parsed, expected);
        assert!(!parsed.aeon_sequence().is_zero());
    }

    #[test]
    fn long_fraction_runs_split_at_layer_boundaries() {
        let parsed = parse_standard(
            "0.123456789123456789123456789s",
            StandardFormat::Extensible,
            &locale(),
        )
        .unwrap();
        assert_eq!(parsed.nanosecond_remainder(), 123_456_789);
        assert_eq!(parsed.yoctosecond_remainder(), 123_456_789_123_456);
        assert!(parsed.planck_remainder() > 0.0);
        assert!(parsed.planck_remainder() < PLANCK_PER_YOCTOSECOND);
    }

    #[test]
    fn aeon_digit_runs_regroup_from_the_right() {
        let parsed = parse_standard(
            "7000000000000000456000000000000000123000042y",
            StandardFormat::Extensible,
            &locale(),
        )
        .unwrap();
        assert_eq!(parsed.year_remainder(), 42);
        assert_eq!(parsed.aeon_sequence().terms(), &[123, 456, 7]);
    }

    #[test]
    fn standard_formats_render_and_parse() {
        let d = Duration::builder()
            .years(2.0)
            .days(10.0)
            .hours(5.0)
            .minutes(30.0)
            .seconds(15.0)
            .build()
            .unwrap();
        assert_eq!(format(&d, "d", &locale()).unwrap(), "2:10");
        assert_eq!(format(&d, "D", &locale()).unwrap(), "2 years 10 days");
        assert_eq!(format(&d, "F", &locale()).unwrap(), "2 years 10 days 05:30:15");
        assert_eq!(format(&d, "g", &locale()).unwrap(), "2:10:05:30:15");
        assert_eq!(format(&d, "t", &locale()).unwrap(), "05:30");
        assert_eq!(format(&d, "T", &locale()).unwrap(), "05:30:15");

        for spec in ["d", "D", "F", "g", "G"] {
            let text = format(&d, spec, &locale()).unwrap();
            let back = parse_with_format(&text, spec, &locale()).unwrap();
            let expected = match spec {
                "d" | "D" => Duration::builder().years(2.0).days(10.0).build().unwrap(),
                _ => d.clone(),
            };
            assert_eq!(back, expected, "{spec}: {text}");
        }
    }

    #[test]
    fn general_long_carries_nanosecond_fractions() {
        let d = Duration::builder()
            .years(1.0)
            .seconds(2.0)
            .nanoseconds(123_456_789.0)
            .build()
            .unwrap();
        let text = format(&d, "G", &locale()).unwrap();
        assert_eq!(text, "1:0:00:00:02.123456789");
        assert_eq!(parse_with_format(&text, "G", &locale()).unwrap(), d);
    }

    #[test]
    fn custom_patterns_honor_widths_and_literals() {
        let d = Duration::builder()
            .hours(7.0)
            .minutes(8.0)
            .seconds(9.0)
            .build()
            .unwrap();
        assert_eq!(format(&d, "hhmmss", &locale()).unwrap(), "070809");
        assert_eq!(
            parse_with_format("070809", "hhmmss", &locale()).unwrap(),
            d
        );
        assert_eq!(
            format(&d, "h' h 'm' m 's' s'", &locale()).unwrap(),
            "7 h 8 m 9 s"
        );
        assert_eq!(
            parse_with_format("7 h 8 m 9 s", "h' h 'm' m 's' s'", &locale()).unwrap(),
            d
        );
    }

    #[test]
    fn missing_trailing_units_parse_as_zero() {
        let parsed = parse_with_format("5", "y:d", &locale()).unwrap();
        assert_eq!(parsed, Duration::from_whole_years(5));
        let partial = parse_round_trip("12:30", &locale()).unwrap();
        assert_eq!(partial.year_remainder(), 12);
        assert_eq!(partial.nanosecond_remainder(), 30 * NANOS_PER_DAY);
    }

    #[test]
    fn malformed_input_is_a_parse_failure() {
        assert_eq!(parse("", &locale()), Err(Error::EmptyInput));
        assert_eq!(parse("   ", &locale()), Err(Error::EmptyInput));
        assert!(matches!(
            parse_with_format("ab:cd", "y:d", &locale()),
            Err(Error::ParseFailure(_))
        ));
        assert!(matches!(
            parse_with_format("5q", "e", &locale()),
            Err(Error::ParseFailure(_))
        ));
        assert!(matches!(
            parse("not a duration", &locale()),
            Err(Error::ParseFailure(_))
        ));
        assert_eq!(
            format(&Duration::ZERO, "q", &locale()),
            Err(Error::UnknownFormat('q'))
        );
    }

    #[test]
    fn try_parse_never_errors() {
        assert_eq!(try_parse("garbage!!", &locale()), None);
        assert_eq!(
            try_parse("90min", &locale()),
            Some(Duration::from_minutes(90.0).unwrap())
        );
        assert_eq!(try_parse_with_format("x", "o", &locale()), None);
    }

    #[test]
    fn best_effort_scan_prefers_round_trip_then_extensible() {
        assert_eq!(
            parse("5y 3d", &locale()).unwrap(),
            Duration::builder().years(5.0).days(3.0).build().unwrap()
        );
        let colon = parse("12:300", &locale()).unwrap();
        assert_eq!(colon.year_remainder(), 12);
    }

    #[test]
    fn negative_sign_is_consumed_only_at_the_front() {
        let d = parse_round_trip("-1:0:0:0:30", &locale()).unwrap();
        assert!(d.is_negative());
        assert_eq!(d.abs().year_remainder(), 1);
        assert!(matches!(
            parse_round_trip("1:-2", &locale()),
            Err(Error::ParseFailure(_))
        ));
    }

    #[test]
    fn fraction_rendering_pads_and_trims() {
        let d = Duration::builder().seconds(1.0).milliseconds(250.0).build().unwrap();
        assert_eq!(format(&d, "s.fffff", &locale()).unwrap(), "1.25000");
        assert_eq!(format(&d, "s.FFFFF", &locale()).unwrap(), "1.25");
    }

    #[test]
    fn planck_fields_render_with_locale_decimals() {
        let d = Duration::from_planck(1234.5).unwrap();
        assert_eq!(format(&d, "P' tP'", &locale()).unwrap(), "1234.5 tP");
        let comma = crate::locale::Locale::comma_decimal();
        assert_eq!(format(&d, "P' tP'", &comma).unwrap(), "1234,5 tP");
        assert_eq!(
            parse_with_format("1234,5 tP", "P' tP'", &comma).unwrap(),
            d
        );
    }

    #[test]
    fn year_runs_beyond_one_aeon_round_trip_exactly() {
        let d = Duration::builder()
            .aeon_sequence(AeonSequence::from_terms(vec![999, 1]).unwrap())
            .years(123_456.0)
            .build()
            .unwrap();
        round_trip(&d);
        let text = render_round_trip(&d, &locale());
        assert!(text.starts_with("1000000000000000999123456:"));
    }
}
