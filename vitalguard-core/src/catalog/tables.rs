//! Built-In Guideline Threshold Tables
//!
//! This module defines the shipped range tables based on published clinical
//! guidelines. Every band lists its four cut points in value order:
//! critical-low, warning-low, warning-high, critical-high (see
//! [`super::bands`] for the boundary policy).
//!
//! Primary sources:
//! - **Blood pressure**: ACC/AHA 2017 hypertension guideline categories
//!   (normal < 120/80, hypertensive crisis > 180/120)
//! - **Blood glucose**: ADA Standards of Care (level-2 hypoglycemia < 54
//!   mg/dL; glycemic targets 70-180 mg/dL for people with diabetes)
//! - **Oxygen saturation**: BTS emergency oxygen guideline (target 94-98%
//!   general, 88-92% for patients at risk of hypercapnic failure)
//! - **Respiratory rate**: NEWS2 scoring bands (12-20 scores 0, extremes
//!   score 3); PALS reference ranges for children and infants
//! - **Heart rate**: AHA resting ranges; PALS pediatric ranges
//! - **Temperature**: NICE fever guidance (infant thresholds are tighter)
//! - **Peak flow**: BTS/SIGN asthma guideline; absolute floors only -
//!   personal-best zones are handled by the trend analyzer
//!
//! Weight bands are intentionally wide plausibility rails: weight alerting
//! is driven by deviation from the patient's own baseline, not population
//! tables.

use super::bands::ThresholdBand;
use super::{AgeBand, VitalBands};
use crate::vitals::{ConditionType, VitalType};

/// Guideline revision the shipped tables were transcribed from
pub(super) const CATALOG_VERSION: &str = "2026.1";

/// Band set keyed by vital type and age band
#[derive(Debug)]
pub(super) struct AgeEntry {
    pub vital: VitalType,
    pub age: AgeBand,
    pub bands: VitalBands,
}

/// Band set keyed by vital type and condition override
#[derive(Debug)]
pub(super) struct ConditionEntry {
    pub vital: VitalType,
    pub condition: ConditionType,
    pub bands: VitalBands,
}

const fn single(
    vital: VitalType,
    age: AgeBand,
    critical_low: f32,
    warning_low: f32,
    warning_high: f32,
    critical_high: f32,
) -> AgeEntry {
    AgeEntry {
        vital,
        age,
        bands: VitalBands::single(ThresholdBand::new(
            critical_low,
            warning_low,
            warning_high,
            critical_high,
        )),
    }
}

/// Age-band tables for all vitals
pub(super) static AGE_TABLE: &[AgeEntry] = &[
    // ----- Blood glucose (mg/dL) -----
    single(VitalType::BloodGlucose, AgeBand::Adult, 54.0, 70.0, 140.0, 250.0),
    single(VitalType::BloodGlucose, AgeBand::Child, 54.0, 70.0, 150.0, 250.0),
    // Neonatal hypoglycemia thresholds sit lower than older children's
    single(VitalType::BloodGlucose, AgeBand::Infant, 36.0, 47.0, 150.0, 250.0),
    // ----- Blood pressure (mmHg, systolic / diastolic) -----
    AgeEntry {
        vital: VitalType::BloodPressure,
        age: AgeBand::Adult,
        bands: VitalBands::paired(
            ThresholdBand::new(80.0, 90.0, 120.0, 180.0),
            ThresholdBand::new(50.0, 60.0, 80.0, 120.0),
        ),
    },
    AgeEntry {
        vital: VitalType::BloodPressure,
        age: AgeBand::Child,
        bands: VitalBands::paired(
            ThresholdBand::new(70.0, 85.0, 115.0, 150.0),
            ThresholdBand::new(45.0, 55.0, 75.0, 100.0),
        ),
    },
    AgeEntry {
        vital: VitalType::BloodPressure,
        age: AgeBand::Infant,
        bands: VitalBands::paired(
            ThresholdBand::new(60.0, 70.0, 100.0, 130.0),
            ThresholdBand::new(35.0, 45.0, 65.0, 90.0),
        ),
    },
    // ----- Heart rate (bpm) -----
    single(VitalType::HeartRate, AgeBand::Adult, 40.0, 60.0, 100.0, 130.0),
    single(VitalType::HeartRate, AgeBand::Child, 50.0, 70.0, 120.0, 160.0),
    single(VitalType::HeartRate, AgeBand::Infant, 80.0, 100.0, 160.0, 190.0),
    // ----- Oxygen saturation (%), floor only -----
    AgeEntry {
        vital: VitalType::OxygenSaturation,
        age: AgeBand::Adult,
        bands: VitalBands::single(ThresholdBand::floor_only(92.0, 95.0)),
    },
    AgeEntry {
        vital: VitalType::OxygenSaturation,
        age: AgeBand::Child,
        bands: VitalBands::single(ThresholdBand::floor_only(92.0, 95.0)),
    },
    AgeEntry {
        vital: VitalType::OxygenSaturation,
        age: AgeBand::Infant,
        bands: VitalBands::single(ThresholdBand::floor_only(92.0, 95.0)),
    },
    // ----- Temperature (°C) -----
    single(VitalType::Temperature, AgeBand::Adult, 35.0, 36.1, 37.5, 39.5),
    single(VitalType::Temperature, AgeBand::Child, 35.0, 36.1, 37.5, 39.0),
    // Fever of 38°C in an infant is an urgent finding in its own right
    single(VitalType::Temperature, AgeBand::Infant, 35.5, 36.3, 37.5, 38.0),
    // ----- Weight (kg), plausibility rails only -----
    single(VitalType::Weight, AgeBand::Adult, 30.0, 40.0, 200.0, 350.0),
    single(VitalType::Weight, AgeBand::Child, 8.0, 12.0, 100.0, 150.0),
    single(VitalType::Weight, AgeBand::Infant, 1.5, 2.5, 12.0, 20.0),
    // ----- Respiratory rate (breaths/min) -----
    single(VitalType::RespiratoryRate, AgeBand::Adult, 8.0, 12.0, 20.0, 24.0),
    single(VitalType::RespiratoryRate, AgeBand::Child, 14.0, 18.0, 30.0, 40.0),
    single(VitalType::RespiratoryRate, AgeBand::Infant, 20.0, 30.0, 53.0, 60.0),
    // ----- Peak flow (L/min), floor only -----
    AgeEntry {
        vital: VitalType::PeakFlow,
        age: AgeBand::Adult,
        bands: VitalBands::single(ThresholdBand::floor_only(100.0, 250.0)),
    },
    AgeEntry {
        vital: VitalType::PeakFlow,
        age: AgeBand::Child,
        bands: VitalBands::single(ThresholdBand::floor_only(70.0, 150.0)),
    },
    AgeEntry {
        vital: VitalType::PeakFlow,
        age: AgeBand::Infant,
        bands: VitalBands::single(ThresholdBand::floor_only(40.0, 80.0)),
    },
];

/// Condition-specific overrides
///
/// Only combinations a guideline actually publishes get an entry; every
/// other (condition, vital) pair falls through to the age tables.
pub(super) static CONDITION_TABLE: &[ConditionEntry] = &[
    // BTS oxygen guideline: 88-92% target for patients at risk of
    // hypercapnic respiratory failure. The floor sits below the general
    // population floor, but breaching it is immediately critical.
    ConditionEntry {
        vital: VitalType::OxygenSaturation,
        condition: ConditionType::Copd,
        bands: VitalBands::single(ThresholdBand::floor_only(90.0, 92.0)),
    },
    // ADA glycemic targets for people with diabetes: 70-180 mg/dL
    ConditionEntry {
        vital: VitalType::BloodGlucose,
        condition: ConditionType::Diabetes,
        bands: VitalBands::single(ThresholdBand::new(54.0, 70.0, 180.0, 300.0)),
    },
    // Conservative absolute floors for diagnosed asthma when no personal
    // best is on file; personal-best zones live in the trend analyzer
    ConditionEntry {
        vital: VitalType::PeakFlow,
        condition: ConditionType::Asthma,
        bands: VitalBands::single(ThresholdBand::floor_only(150.0, 300.0)),
    },
    // Rate-controlled CHD patients: resting bradycardia from beta-blockade
    // is expected, exertional tachycardia is concerning earlier
    ConditionEntry {
        vital: VitalType::HeartRate,
        condition: ConditionType::Chd,
        bands: VitalBands::single(ThresholdBand::new(45.0, 55.0, 90.0, 120.0)),
    },
];

/// Wide last-resort bands for a catalog missing an entry
///
/// Never reached with the shipped tables; keeps hand-built catalogs total.
pub(super) static GENERAL_FALLBACK: VitalBands = VitalBands::single(ThresholdBand::new(
    f32::NEG_INFINITY,
    f32::NEG_INFINITY,
    f32::INFINITY,
    f32::INFINITY,
));
