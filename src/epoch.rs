// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Named, finite timeline segments.
//!
//! An [`Epoch`] is an immutable `(duration, name)` pair. The duration
//! must be a positive, finite, non-zero span — a timeline made of
//! zero-width or unbounded segments could not be walked — and the
//! constructor enforces exactly that.
//!
//! [`Epoch::standard_epochs`] provides the conventional cosmological
//! catalogue (Planck era through the Galactic era) used to seed
//! [`CosmicTime::default`](crate::CosmicTime::default).

use crate::duration::Duration;
use crate::error::{Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One finite, strictly positive segment of a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epoch {
    duration: Duration,
    name: Option<String>,
}

impl Epoch {
    /// Build an epoch, failing with an invalid-argument condition if the
    /// span is zero, negative, or perpetual.
    pub fn new(duration: Duration, name: Option<String>) -> Result<Self> {
        if duration.is_perpetual() || duration.is_negative() || duration.is_zero() {
            return Err(Error::InvalidEpoch);
        }
        Ok(Epoch { duration, name })
    }

    /// A named epoch.
    pub fn named(duration: Duration, name: impl Into<String>) -> Result<Self> {
        Self::new(duration, Some(name.into()))
    }

    /// An unnamed epoch.
    pub fn anonymous(duration: Duration) -> Result<Self> {
        Self::new(duration, None)
    }

    /// The epoch's span.
    pub fn duration(&self) -> &Duration {
        &self.duration
    }

    /// The epoch's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The conventional cosmological epoch catalogue, earliest first.
    ///
    /// Durations follow the usual textbook boundaries (the Planck era up
    /// to ~10⁻⁴³ s, inflation to ~10⁻³² s, …, the Galactic era ending
    /// roughly one billion years after the start). The era after the
    /// last entry — the Stelliferous era — is the open-ended "current"
    /// epoch of a default timeline.
    pub fn standard_epochs() -> Vec<Epoch> {
        let catalogue: [(&str, Result<Duration>); 10] = [
            ("Planck", Duration::from_planck(1.0)),
            ("Grand Unification", Duration::from_seconds(1e-36)),
            ("Inflationary", Duration::from_seconds(1e-32)),
            ("Electroweak", Duration::from_seconds(1e-12)),
            ("Quark", Duration::from_seconds(1e-6)),
            ("Hadron", Duration::from_seconds(1.0)),
            ("Lepton", Duration::from_seconds(10.0)),
            ("Photon", Duration::from_years(380_000.0)),
            ("Dark Ages", Duration::from_years(150.0e6)),
            ("Galactic", Duration::from_years(850.0e6)),
        ];
        // every duration above is a positive finite constant
        catalogue
            .into_iter()
            .filter_map(|(name, duration)| {
                duration.ok().and_then(|d| Epoch::named(d, name).ok())
            })
            .collect()
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.duration),
            None => write!(f, "({})", self.duration),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Epoch {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Epoch", 2)?;
        s.serialize_field("duration", &self.duration)?;
        s.serialize_field("name", &self.name)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Epoch {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            duration: Duration,
            name: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Epoch::new(raw.duration, raw.name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_negative_and_perpetual_spans() {
        assert_eq!(
            Epoch::anonymous(Duration::ZERO),
            Err(Error::InvalidEpoch)
        );
        assert_eq!(
            Epoch::anonymous(Duration::from_seconds(-1.0).unwrap()),
            Err(Error::InvalidEpoch)
        );
        assert_eq!(
            Epoch::anonymous(Duration::POSITIVE_INFINITY),
            Err(Error::InvalidEpoch)
        );
        assert_eq!(
            Epoch::anonymous(Duration::NEGATIVE_INFINITY),
            Err(Error::InvalidEpoch)
        );
    }

    #[test]
    fn accepts_any_positive_finite_span() {
        let tiny = Epoch::named(Duration::from_planck(1.0).unwrap(), "tick").unwrap();
        assert_eq!(tiny.name(), Some("tick"));
        assert!(tiny.duration().planck_remainder() > 0.0);

        let vast = Epoch::anonymous(Duration::from_aeons(1e20).unwrap()).unwrap();
        assert_eq!(vast.name(), None);
    }

    #[test]
    fn standard_catalogue_is_ordered_and_positive() {
        let epochs = Epoch::standard_epochs();
        assert_eq!(epochs.len(), 10);
        assert_eq!(epochs[0].name(), Some("Planck"));
        assert_eq!(epochs[9].name(), Some("Galactic"));
        for epoch in &epochs {
            assert!(epoch.duration().sign() > 0);
            assert!(epoch.duration().is_finite());
        }
        // later catalogue entries span longer eras
        assert!(epochs[9].duration() > epochs[7].duration());
    }
}
