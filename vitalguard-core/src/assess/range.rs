//! Range Classification Against Selected Threshold Bands
//!
//! ## Overview
//!
//! The range classifier answers the absolute question: where does this
//! value sit against the band the catalog selected for this patient? It
//! knows nothing about baselines or co-occurring vitals - that is the other
//! analyzers' business.
//!
//! ## Paired Values
//!
//! Blood pressure classifies systolic and diastolic independently, each
//! against its own band, and reports the **worse of the two** (critical
//! beats warning beats normal). A reading of 118/125 is critical on the
//! diastolic alone, however unremarkable the systolic looks. The verdict
//! records which component drove the outcome so the alert message can name
//! it.

use crate::catalog::{BandSelection, Deviation};
use crate::vitals::{AlertLevel, VitalReading};

use super::Assessment;

/// Which half of a paired reading drove the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureComponent {
    /// Primary value of a blood pressure pair
    Systolic,
    /// Secondary value of a blood pressure pair
    Diastolic,
}

impl PressureComponent {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            PressureComponent::Systolic => "systolic",
            PressureComponent::Diastolic => "diastolic",
        }
    }
}

/// Outcome of range classification for one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeVerdict {
    /// Alert level from the absolute range check
    pub level: AlertLevel,
    /// True when every classified value sat inside its normal interval
    pub within_normal: bool,
    /// Side of the normal interval the deciding value fell on
    pub deviation: Deviation,
    /// The normal-ward boundary the deciding value crossed, when finite
    pub bound: Option<f32>,
    /// Component that drove the verdict, paired vitals only
    pub component: Option<PressureComponent>,
    /// The value that drove the verdict (diastolic when that half is worse)
    pub deciding_value: f32,
}

impl Assessment for RangeVerdict {
    fn level(&self) -> AlertLevel {
        self.level
    }
}

/// Classifies scalar (or paired scalar) values against threshold bands
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeClassifier;

impl RangeClassifier {
    /// Create a classifier
    pub const fn new() -> Self {
        Self
    }

    /// Classify a structurally valid reading against its band selection
    pub fn classify(&self, reading: &VitalReading<'_>, selection: &BandSelection) -> RangeVerdict {
        let vital = reading.vital();
        let value = reading.value();
        let value2 = reading.value2();
        let primary_band = &selection.bands.primary;
        let (primary_level, primary_dev) = primary_band.classify(value);

        let mut verdict = RangeVerdict {
            level: primary_level,
            within_normal: primary_level == AlertLevel::Normal,
            deviation: primary_dev,
            bound: primary_band.breached_bound(primary_level, primary_dev),
            component: vital.has_second_value().then_some(PressureComponent::Systolic),
            deciding_value: value,
        };

        // Paired vital: classify the second half and keep the worse verdict.
        // Ties go to the primary, so systolic is named on equal severity.
        if let (Some(secondary_band), Some(v2)) = (&selection.bands.secondary, value2) {
            let (secondary_level, secondary_dev) = secondary_band.classify(v2);
            verdict.within_normal =
                verdict.within_normal && secondary_level == AlertLevel::Normal;
            if secondary_level > verdict.level {
                verdict.level = secondary_level;
                verdict.deviation = secondary_dev;
                verdict.bound = secondary_band.breached_bound(secondary_level, secondary_dev);
                verdict.component = Some(PressureComponent::Diastolic);
                verdict.deciding_value = v2;
            }
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ThresholdCatalog;
    use crate::vitals::{Unit, VitalType};

    fn bp(systolic: f32, diastolic: f32) -> VitalReading<'static> {
        VitalReading::new(
            VitalType::BloodPressure,
            systolic,
            Some(diastolic),
            Unit::MmHg,
            0,
        )
        .unwrap()
    }

    #[test]
    fn normal_adult_pressure() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(VitalType::BloodPressure, Some(45), &[]);
        let verdict = RangeClassifier::new().classify(&bp(118.0, 76.0), &selection);

        assert_eq!(verdict.level, AlertLevel::Normal);
        assert!(verdict.within_normal);
        assert_eq!(verdict.deviation, Deviation::Within);
        assert!(verdict.bound.is_none());
    }

    #[test]
    fn pair_takes_the_worse_component() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(VitalType::BloodPressure, Some(45), &[]);

        // Systolic normal, diastolic critical
        let verdict = RangeClassifier::new().classify(&bp(118.0, 125.0), &selection);
        assert_eq!(verdict.level, AlertLevel::Critical);
        assert_eq!(verdict.component, Some(PressureComponent::Diastolic));
        assert_eq!(verdict.deciding_value, 125.0);
        assert!(!verdict.within_normal);

        // Both abnormal at equal severity: systolic is named
        let verdict = RangeClassifier::new().classify(&bp(130.0, 85.0), &selection);
        assert_eq!(verdict.level, AlertLevel::Warning);
        assert_eq!(verdict.component, Some(PressureComponent::Systolic));
    }

    #[test]
    fn exact_edge_reads_normal() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(VitalType::BloodPressure, Some(45), &[]);
        let verdict = RangeClassifier::new().classify(&bp(120.0, 80.0), &selection);
        assert_eq!(verdict.level, AlertLevel::Normal);
    }

    #[test]
    fn breached_bound_surfaces_for_messaging() {
        let catalog = ThresholdCatalog::builtin();
        let selection = catalog.lookup(VitalType::HeartRate, Some(45), &[]);
        let reading =
            VitalReading::new(VitalType::HeartRate, 115.0, None, Unit::Bpm, 0).unwrap();
        let verdict = RangeClassifier::new().classify(&reading, &selection);

        assert_eq!(verdict.level, AlertLevel::Warning);
        assert_eq!(verdict.deviation, Deviation::AboveNormal);
        assert_eq!(verdict.bound, Some(100.0));
    }
}
