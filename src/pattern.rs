// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Format-string tokenizer and the standard-format table.
//!
//! A custom pattern is scanned left to right into [`Token`]s. Outside
//! quotes, a maximal run of one unit letter becomes a single
//! [`Token::Field`] whose width is the run length — the minimum digit
//! count for fixed-width units, the minimum integer width for the
//! variable-width ones. Everything else copies through literally.
//!
//! # Unit letters
//!
//! | Letter | Unit | Width |
//! |--------|------|-------|
//! | `y` | years (aeons included in the digit run) | variable |
//! | `d` | days | fixed |
//! | `h` | hours | fixed |
//! | `m` | minutes | fixed |
//! | `s` | seconds | fixed |
//! | `i` | milliseconds | fixed |
//! | `u` | microseconds | fixed |
//! | `n` | nanoseconds | fixed |
//! | `p` | picoseconds | fixed |
//! | `e` | femtoseconds | fixed |
//! | `a` | attoseconds | fixed |
//! | `z` | zeptoseconds | fixed |
//! | `c` | yoctoseconds | fixed |
//! | `P` | Planck time | variable |
//! | `f`/`F` | fractional seconds to the run's precision (`F` trims trailing zeros) | run length |
//!
//! Single (`'`) and double (`"`) quotes suspend letter recognition, `\`
//! escapes one character, and `%` forces the next character to be read
//! as a unit letter even where a single character would otherwise be
//! taken as a standard-format specifier.

use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// Field kinds and tokens
// ═══════════════════════════════════════════════════════════════════════════

/// The unit a [`Token::Field`] renders or parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Years,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    Picoseconds,
    Femtoseconds,
    Attoseconds,
    Zeptoseconds,
    Yoctoseconds,
    Planck,
    /// Fractional seconds; `trim` drops trailing zeros when rendering.
    Fraction { trim: bool },
}

impl FieldKind {
    /// Variable-width fields have no inherent digit count, so parsing
    /// them relies on a separator (or end of input).
    pub(crate) fn is_variable_width(self) -> bool {
        matches!(self, FieldKind::Years | FieldKind::Planck)
    }
}

/// Static letter → unit table.
pub(crate) fn lookup(letter: char) -> Option<FieldKind> {
    Some(match letter {
        'y' => FieldKind::Years,
        'd' => FieldKind::Days,
        'h' => FieldKind::Hours,
        'm' => FieldKind::Minutes,
        's' => FieldKind::Seconds,
        'i' => FieldKind::Milliseconds,
        'u' => FieldKind::Microseconds,
        'n' => FieldKind::Nanoseconds,
        'p' => FieldKind::Picoseconds,
        'e' => FieldKind::Femtoseconds,
        'a' => FieldKind::Attoseconds,
        'z' => FieldKind::Zeptoseconds,
        'c' => FieldKind::Yoctoseconds,
        'P' => FieldKind::Planck,
        'f' => FieldKind::Fraction { trim: false },
        'F' => FieldKind::Fraction { trim: true },
        _ => return None,
    })
}

/// One element of a resolved pattern.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// A unit slot; `width` is the letter-run length.
    Field { kind: FieldKind, width: usize },
    /// Text copied through verbatim.
    Literal(String),
}

// ═══════════════════════════════════════════════════════════════════════════
// Tokenizer
// ═══════════════════════════════════════════════════════════════════════════

/// Scan a custom pattern into tokens.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut quote: Option<char> = None;
    let mut chars = pattern.chars().peekable();

    fn flush(tokens: &mut Vec<Token>, literal: &mut String) {
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(literal)));
        }
    }

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            } else {
                literal.push(ch);
            }
            continue;
        }
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => literal.push(escaped),
                None => {
                    return Err(Error::MalformedPattern(
                        "dangling escape at end of pattern".into(),
                    ))
                }
            },
            '\'' | '"' => quote = Some(ch),
            '%' => {
                let Some(forced) = chars.next() else {
                    return Err(Error::MalformedPattern(
                        "dangling '%' at end of pattern".into(),
                    ));
                };
                match lookup(forced) {
                    Some(kind) => {
                        flush(&mut tokens, &mut literal);
                        tokens.push(Token::Field { kind, width: 1 });
                    }
                    None => {
                        return Err(Error::MalformedPattern(format!(
                            "'%{forced}' does not name a unit"
                        )))
                    }
                }
            }
            _ => match lookup(ch) {
                Some(kind) => {
                    flush(&mut tokens, &mut literal);
                    let mut width = 1;
                    while chars.peek() == Some(&ch) {
                        chars.next();
                        width += 1;
                    }
                    tokens.push(Token::Field { kind, width });
                }
                None => literal.push(ch),
            },
        }
    }
    if quote.is_some() {
        return Err(Error::MalformedPattern("unterminated quote".into()));
    }
    flush(&mut tokens, &mut literal);
    Ok(tokens)
}

// ═══════════════════════════════════════════════════════════════════════════
// Standard formats
// ═══════════════════════════════════════════════════════════════════════════

/// Round-trip custom pattern: every layer in fixed order, each
/// variable-width field delimited by a literal `:`. This exact layout is
/// the durable serialization contract.
pub const ROUND_TRIP_PATTERN: &str = "y:d:h:m:s:i:u:n:p:e:a:z:c:P";

/// The named standard formats, each a fixed expansion to a custom
/// pattern (the extensible format has its own engine instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFormat {
    /// `d` — years and days, compact.
    ShortDate,
    /// `D` — years and days, worded.
    LongDate,
    /// `F` — worded date portion plus a full clock time.
    Full,
    /// `g` — compact date and clock time.
    GeneralShort,
    /// `G` — compact date and clock time with nanosecond fraction.
    GeneralLong,
    /// `o`/`O` — the round-trip layout of [`ROUND_TRIP_PATTERN`].
    RoundTrip,
    /// `t` — hours and minutes.
    ShortTime,
    /// `T` — hours, minutes and seconds.
    LongTime,
    /// `e`/`E` — only the non-zero units, SI-style suffixes.
    Extensible,
}

impl StandardFormat {
    /// Resolve a single-letter specifier.
    pub fn from_specifier(specifier: char) -> Option<Self> {
        Some(match specifier {
            'd' => StandardFormat::ShortDate,
            'D' => StandardFormat::LongDate,
            'F' => StandardFormat::Full,
            'g' => StandardFormat::GeneralShort,
            'G' => StandardFormat::GeneralLong,
            'o' | 'O' => StandardFormat::RoundTrip,
            't' => StandardFormat::ShortTime,
            'T' => StandardFormat::LongTime,
            'e' | 'E' => StandardFormat::Extensible,
            _ => return None,
        })
    }

    /// The underlying custom pattern; `None` for the extensible format.
    pub fn pattern(self) -> Option<&'static str> {
        Some(match self {
            StandardFormat::ShortDate => "y:d",
            StandardFormat::LongDate => "y' years 'd' days'",
            StandardFormat::Full => "y' years 'd' days 'hh:mm:ss",
            StandardFormat::GeneralShort => "y:d:hh:mm:ss",
            StandardFormat::GeneralLong => "y:d:hh:mm:ss.fffffffff",
            StandardFormat::RoundTrip => ROUND_TRIP_PATTERN,
            StandardFormat::ShortTime => "hh:mm",
            StandardFormat::LongTime => "hh:mm:ss",
            StandardFormat::Extensible => return None,
        })
    }

    /// Order the best-effort parser scans the known formats in.
    pub(crate) const SCAN_ORDER: [StandardFormat; 9] = [
        StandardFormat::RoundTrip,
        StandardFormat::Extensible,
        StandardFormat::GeneralLong,
        StandardFormat::GeneralShort,
        StandardFormat::Full,
        StandardFormat::LongDate,
        StandardFormat::ShortDate,
        StandardFormat::LongTime,
        StandardFormat::ShortTime,
    ];
}
