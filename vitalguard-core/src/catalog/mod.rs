//! Threshold Catalog: Versioned, Immutable Clinical Range Tables
//!
//! ## Overview
//!
//! The catalog is the engine's configuration: per-vital threshold bands
//! keyed by age band and, where a guideline defines one, by chronic
//! condition. It is constructed once at process start, verified, and then
//! only read - a version swap is a new catalog value, never an in-place
//! mutation.
//!
//! ## Selection Precedence
//!
//! `lookup` resolves a band for a reading in three steps:
//!
//! 1. **Condition override** - if the patient has a condition with a
//!    published override for this vital, the highest-priority matching
//!    condition wins (COPD > asthma > CHD > diabetes, the order of the
//!    guideline hierarchy the overrides were sourced from).
//! 2. **Age band** - infant (< 1 year), child (< 18 years), adult.
//! 3. **Conservative adult fallback** - when age is unknown (for example a
//!    failed context fetch), the adult table applies and the selection is
//!    flagged low-confidence so the alert message can be softened.
//!
//! Lookup is total: clinical code paths must not throw, so a band always
//! comes back, whatever the context looks like.

mod bands;
mod tables;

pub use bands::{Deviation, ThresholdBand};

use crate::constants::{AGE_ADULT_MIN_YEARS, AGE_CHILD_MIN_YEARS};
use crate::errors::CatalogError;
use crate::vitals::{ConditionType, VitalType};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Age bands used for threshold selection
///
/// Boundaries are fixed at ages 1 and 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgeBand {
    /// Under one year
    Infant,
    /// One to seventeen years
    Child,
    /// Eighteen and over
    Adult,
}

impl AgeBand {
    /// Band for an age in whole years
    pub const fn from_years(years: u8) -> Self {
        if years < AGE_CHILD_MIN_YEARS {
            AgeBand::Infant
        } else if years < AGE_ADULT_MIN_YEARS {
            AgeBand::Child
        } else {
            AgeBand::Adult
        }
    }

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            AgeBand::Infant => "infant",
            AgeBand::Child => "child",
            AgeBand::Adult => "adult",
        }
    }
}

/// Threshold bands for one vital: primary scalar plus the diastolic band
/// for blood pressure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalBands {
    /// Band for the primary value (systolic, for blood pressure)
    pub primary: ThresholdBand,
    /// Band for the secondary value (diastolic), blood pressure only
    pub secondary: Option<ThresholdBand>,
}

impl VitalBands {
    /// Single-valued vital
    pub const fn single(primary: ThresholdBand) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Paired vital (blood pressure)
    pub const fn paired(primary: ThresholdBand, secondary: ThresholdBand) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

/// How a band was selected, for message composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandSource {
    /// A condition-specific override matched
    Condition(ConditionType),
    /// Selected by the patient's age band
    Age(AgeBand),
    /// Age unknown; conservative adult tables applied
    AdultFallback,
}

impl BandSource {
    /// Short phrase naming the range that was applied
    pub const fn describe(&self) -> &'static str {
        match self {
            BandSource::Condition(ConditionType::Copd) => "COPD-adjusted range",
            BandSource::Condition(ConditionType::Asthma) => "asthma-adjusted range",
            BandSource::Condition(ConditionType::Chd) => "CHD-adjusted range",
            BandSource::Condition(ConditionType::Diabetes) => "diabetes-adjusted range",
            BandSource::Age(AgeBand::Infant) => "infant reference range",
            BandSource::Age(AgeBand::Child) => "paediatric reference range",
            BandSource::Age(AgeBand::Adult) => "adult reference range",
            BandSource::AdultFallback => "general adult reference range",
        }
    }
}

/// Result of a catalog lookup
#[derive(Debug, Clone, Copy)]
pub struct BandSelection {
    /// The bands to classify against
    pub bands: &'static VitalBands,
    /// How the bands were chosen
    pub source: BandSource,
    /// True when the selection fell back because age was unknown; the
    /// resulting message is softened, never withheld
    pub low_confidence: bool,
}

/// Immutable, versioned threshold tables
///
/// Process-wide configuration: build one with [`ThresholdCatalog::builtin`]
/// at startup, share it by reference, never mutate it.
#[derive(Debug)]
pub struct ThresholdCatalog {
    version: &'static str,
    by_age: &'static [tables::AgeEntry],
    by_condition: &'static [tables::ConditionEntry],
}

impl ThresholdCatalog {
    /// The built-in guideline tables shipped with this crate
    pub fn builtin() -> Self {
        let catalog = Self {
            version: tables::CATALOG_VERSION,
            by_age: tables::AGE_TABLE,
            by_condition: tables::CONDITION_TABLE,
        };
        debug_assert!(catalog.verify().is_ok());
        catalog
    }

    /// Catalog version identifier (guideline revision, not crate version)
    pub const fn version(&self) -> &'static str {
        self.version
    }

    /// Verify every shipped band partitions the value domain
    ///
    /// Run once at construction (and by tests); per-call lookups rely on it.
    pub fn verify(&self) -> Result<(), CatalogError> {
        for entry in self.by_age {
            Self::verify_bands(entry.vital, &entry.bands)?;
        }
        for entry in self.by_condition {
            Self::verify_bands(entry.vital, &entry.bands)?;
        }
        Ok(())
    }

    fn verify_bands(vital: VitalType, bands: &VitalBands) -> Result<(), CatalogError> {
        if !bands.primary.is_partition() {
            return Err(CatalogError::BrokenPartition {
                vital: vital.name(),
            });
        }
        if let Some(secondary) = &bands.secondary {
            if !secondary.is_partition() {
                return Err(CatalogError::BrokenPartition {
                    vital: vital.name(),
                });
            }
        }
        Ok(())
    }

    /// Select the threshold bands for a reading
    ///
    /// Total: always returns a selection, falling back to conservative
    /// adult bands when age is unknown or (defensively) a table entry is
    /// missing.
    pub fn lookup(
        &self,
        vital: VitalType,
        age_years: Option<u8>,
        conditions: &[ConditionType],
    ) -> BandSelection {
        // Condition overrides first, in fixed priority order
        for candidate in ConditionType::PRIORITY {
            if !conditions.contains(&candidate) {
                continue;
            }
            if let Some(entry) = self
                .by_condition
                .iter()
                .find(|e| e.vital == vital && e.condition == candidate)
            {
                return BandSelection {
                    bands: &entry.bands,
                    source: BandSource::Condition(candidate),
                    low_confidence: false,
                };
            }
        }

        // Age band next; unknown age degrades to adult with low confidence
        let (age_band, low_confidence) = match age_years {
            Some(years) => (AgeBand::from_years(years), false),
            None => (AgeBand::Adult, true),
        };
        if low_confidence {
            log_warn!(
                "age unavailable; applying adult bands for {}",
                vital.name()
            );
        }

        if let Some(entry) = self
            .by_age
            .iter()
            .find(|e| e.vital == vital && e.age == age_band)
        {
            return BandSelection {
                bands: &entry.bands,
                source: if low_confidence {
                    BandSource::AdultFallback
                } else {
                    BandSource::Age(age_band)
                },
                low_confidence,
            };
        }

        // The built-in tables cover every (vital, age band) pair, so this is
        // unreachable with shipped data; a hand-built catalog missing an
        // entry still gets a usable answer.
        log_warn!("no table entry for {}; applying wide fallback", vital.name());
        BandSelection {
            bands: &tables::GENERAL_FALLBACK,
            source: BandSource::AdultFallback,
            low_confidence: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::AlertLevel;

    #[test]
    fn builtin_catalog_verifies() {
        let catalog = ThresholdCatalog::builtin();
        assert!(catalog.verify().is_ok());
        assert!(!catalog.version().is_empty());
    }

    #[test]
    fn age_band_boundaries() {
        assert_eq!(AgeBand::from_years(0), AgeBand::Infant);
        assert_eq!(AgeBand::from_years(1), AgeBand::Child);
        assert_eq!(AgeBand::from_years(17), AgeBand::Child);
        assert_eq!(AgeBand::from_years(18), AgeBand::Adult);
    }

    #[test]
    fn condition_override_beats_age() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(
            VitalType::OxygenSaturation,
            Some(64),
            &[ConditionType::Copd],
        );
        assert_eq!(selection.source, BandSource::Condition(ConditionType::Copd));
        assert!(!selection.low_confidence);

        // 93% is normal for a COPD patient, warning for the general adult
        assert_eq!(selection.bands.primary.classify(93.0).0, AlertLevel::Normal);
        let general = catalog.lookup(VitalType::OxygenSaturation, Some(64), &[]);
        assert_eq!(general.bands.primary.classify(93.0).0, AlertLevel::Warning);
    }

    #[test]
    fn condition_priority_order_applies() {
        let catalog = ThresholdCatalog::builtin();
        // Diabetes has the glucose override; asthma outranks it but has no
        // glucose entry, so the diabetes bands still apply.
        let selection = catalog.lookup(
            VitalType::BloodGlucose,
            Some(40),
            &[ConditionType::Diabetes, ConditionType::Asthma],
        );
        assert_eq!(
            selection.source,
            BandSource::Condition(ConditionType::Diabetes)
        );
        assert_eq!(selection.bands.primary.classify(170.0).0, AlertLevel::Normal);
    }

    #[test]
    fn unrelated_condition_falls_through_to_age() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(VitalType::Temperature, Some(30), &[ConditionType::Copd]);
        assert_eq!(selection.source, BandSource::Age(AgeBand::Adult));
    }

    #[test]
    fn missing_age_falls_back_low_confidence() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(VitalType::HeartRate, None, &[]);
        assert_eq!(selection.source, BandSource::AdultFallback);
        assert!(selection.low_confidence);
        // Still a fully usable band
        assert_eq!(selection.bands.primary.classify(72.0).0, AlertLevel::Normal);
    }

    #[test]
    fn pediatric_tables_differ_from_adult() {
        let catalog = ThresholdCatalog::builtin();
        // 110 bpm is tachycardic for an adult but normal for a toddler
        let adult = catalog.lookup(VitalType::HeartRate, Some(40), &[]);
        let toddler = catalog.lookup(VitalType::HeartRate, Some(2), &[]);
        assert_eq!(adult.bands.primary.classify(110.0).0, AlertLevel::Warning);
        assert_eq!(toddler.bands.primary.classify(110.0).0, AlertLevel::Normal);
    }
}
