//! Vital Sign Vocabulary and Reading Value Type
//!
//! ## Overview
//!
//! This module defines the closed vocabulary the whole engine is written
//! against: which vital signs exist, which units they are reported in, which
//! chronic conditions adjust their thresholds, and the three-level alert
//! scale every classifier speaks.
//!
//! ## Why Closed Enumerations?
//!
//! Portal back-ends tend to pass vitals around as free-form strings
//! ("bloodPressure", "bp", "BLOOD_PRESSURE"), which pushes every typo to
//! runtime. Here the vocabulary is a set of tagged enums so that:
//!
//! - every `match` over a vital or condition is exhaustive - adding a vital
//!   type is a compile-time-visible change everywhere it matters;
//! - threshold tables can be indexed by discriminant with no hashing;
//! - readings cannot be constructed with a unit that disagrees with the
//!   vital they claim to measure.
//!
//! ## The Reading Boundary
//!
//! [`VitalReading::new`] is the single structural admission point. A reading
//! that passes it is finite, correctly paired (blood pressure carries both
//! systolic and diastolic), and in its canonical unit. Everything downstream
//! may therefore classify without re-checking, and nothing downstream is
//! allowed to refuse the reading.

use crate::errors::{ReadingError, ReadingResult};

/// Timestamp in milliseconds since epoch, supplied by the caller
pub type Timestamp = u64;

/// Number of vital types, for fixed-size per-vital storage
pub const VITAL_TYPE_COUNT: usize = 8;

/// Vital sign type enumeration
///
/// Maps to specific threshold tables and trend rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VitalType {
    /// Capillary blood glucose (mg/dL)
    BloodGlucose = 0,
    /// Arterial blood pressure, systolic/diastolic pair (mmHg)
    BloodPressure = 1,
    /// Resting heart rate (bpm)
    HeartRate = 2,
    /// Peripheral oxygen saturation, SpO2 (%)
    OxygenSaturation = 3,
    /// Body temperature (°C)
    Temperature = 4,
    /// Body weight (kg)
    Weight = 5,
    /// Respiratory rate (breaths/min)
    RespiratoryRate = 6,
    /// Peak expiratory flow (L/min)
    PeakFlow = 7,
}

impl VitalType {
    /// All vital types, in discriminant order
    pub const ALL: [VitalType; VITAL_TYPE_COUNT] = [
        VitalType::BloodGlucose,
        VitalType::BloodPressure,
        VitalType::HeartRate,
        VitalType::OxygenSaturation,
        VitalType::Temperature,
        VitalType::Weight,
        VitalType::RespiratoryRate,
        VitalType::PeakFlow,
    ];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            VitalType::BloodGlucose => "blood glucose",
            VitalType::BloodPressure => "blood pressure",
            VitalType::HeartRate => "heart rate",
            VitalType::OxygenSaturation => "oxygen saturation",
            VitalType::Temperature => "temperature",
            VitalType::Weight => "weight",
            VitalType::RespiratoryRate => "respiratory rate",
            VitalType::PeakFlow => "peak flow",
        }
    }

    /// Sentence-leading label for composed messages
    pub const fn label(&self) -> &'static str {
        match self {
            VitalType::BloodGlucose => "Blood glucose",
            VitalType::BloodPressure => "Blood pressure",
            VitalType::HeartRate => "Heart rate",
            VitalType::OxygenSaturation => "Oxygen saturation",
            VitalType::Temperature => "Temperature",
            VitalType::Weight => "Weight",
            VitalType::RespiratoryRate => "Respiratory rate",
            VitalType::PeakFlow => "Peak flow",
        }
    }

    /// Get canonical unit of measurement
    pub const fn unit(&self) -> Unit {
        match self {
            VitalType::BloodGlucose => Unit::MgPerDl,
            VitalType::BloodPressure => Unit::MmHg,
            VitalType::HeartRate => Unit::Bpm,
            VitalType::OxygenSaturation => Unit::Percent,
            VitalType::Temperature => Unit::Celsius,
            VitalType::Weight => Unit::Kg,
            VitalType::RespiratoryRate => Unit::BreathsPerMin,
            VitalType::PeakFlow => Unit::LitersPerMin,
        }
    }

    /// Whether readings of this vital carry a second value
    ///
    /// Only blood pressure does: systolic as the primary value, diastolic
    /// as the secondary.
    pub const fn has_second_value(&self) -> bool {
        matches!(self, VitalType::BloodPressure)
    }

    /// Stable index for per-vital storage
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Canonical measurement units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Unit {
    /// Milligrams per decilitre (blood glucose)
    MgPerDl = 0,
    /// Millimetres of mercury (blood pressure)
    MmHg = 1,
    /// Beats per minute (heart rate)
    Bpm = 2,
    /// Percentage (oxygen saturation)
    Percent = 3,
    /// Degrees Celsius (body temperature)
    Celsius = 4,
    /// Kilograms (body weight)
    Kg = 5,
    /// Breaths per minute (respiratory rate)
    BreathsPerMin = 6,
    /// Litres per minute (peak expiratory flow)
    LitersPerMin = 7,
}

impl Unit {
    /// Display symbol for the unit
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::MgPerDl => "mg/dL",
            Unit::MmHg => "mmHg",
            Unit::Bpm => "bpm",
            Unit::Percent => "%",
            Unit::Celsius => "°C",
            Unit::Kg => "kg",
            Unit::BreathsPerMin => "breaths/min",
            Unit::LitersPerMin => "L/min",
        }
    }
}

/// Known chronic conditions that adjust threshold selection
///
/// The discriminant order is the fixed guideline priority used when a
/// patient has more than one condition with an override for the same vital:
/// COPD beats asthma beats coronary heart disease beats diabetes. The order
/// reflects the hierarchy of the guideline documents each override was
/// sourced from, not clinical severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ConditionType {
    /// Chronic obstructive pulmonary disease
    Copd = 0,
    /// Asthma
    Asthma = 1,
    /// Coronary heart disease
    Chd = 2,
    /// Diabetes mellitus (either type)
    Diabetes = 3,
}

impl ConditionType {
    /// Conditions in fixed override-priority order, highest first
    pub const PRIORITY: [ConditionType; 4] = [
        ConditionType::Copd,
        ConditionType::Asthma,
        ConditionType::Chd,
        ConditionType::Diabetes,
    ];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            ConditionType::Copd => "COPD",
            ConditionType::Asthma => "asthma",
            ConditionType::Chd => "coronary heart disease",
            ConditionType::Diabetes => "diabetes",
        }
    }
}

/// Three-level alert scale shared by every classifier
///
/// Ordered so that the resolver's merge is a plain `max`:
/// `Normal < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlertLevel {
    /// Reading is inside the expected range, no action needed
    Normal = 0,
    /// Reading warrants attention but is not an emergency
    Warning = 1,
    /// Reading indicates a potentially dangerous state
    Critical = 2,
}

impl AlertLevel {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

/// A single patient-submitted physiological reading
///
/// Immutable once constructed. Fields are private so the structural
/// invariants checked by [`VitalReading::new`] cannot be broken afterwards:
///
/// - `value` (and `value2` when present) is finite
/// - `value2` is present if and only if the vital is blood pressure
/// - `unit` is the vital type's canonical unit
///
/// Free-text notes ride along for the caller's benefit; the engine never
/// reads them and never stores them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalReading<'a> {
    vital: VitalType,
    value: f32,
    value2: Option<f32>,
    unit: Unit,
    timestamp: Timestamp,
    notes: Option<&'a str>,
}

impl<'a> VitalReading<'a> {
    /// Construct a reading, enforcing the structural invariants
    ///
    /// This is the only place the engine can refuse an input. A reading that
    /// passes here is guaranteed a classification result downstream.
    pub fn new(
        vital: VitalType,
        value: f32,
        value2: Option<f32>,
        unit: Unit,
        timestamp: Timestamp,
    ) -> ReadingResult<Self> {
        if !value.is_finite() {
            return Err(ReadingError::NonFiniteValue);
        }
        if let Some(v2) = value2 {
            if !v2.is_finite() {
                return Err(ReadingError::NonFiniteValue);
            }
        }
        if vital.has_second_value() && value2.is_none() {
            return Err(ReadingError::MissingSecondValue);
        }
        if !vital.has_second_value() && value2.is_some() {
            return Err(ReadingError::UnexpectedSecondValue);
        }
        if unit != vital.unit() {
            return Err(ReadingError::UnitMismatch {
                expected: vital.unit(),
                found: unit,
            });
        }

        Ok(Self {
            vital,
            value,
            value2,
            unit,
            timestamp,
            notes: None,
        })
    }

    /// Attach free-text notes to the reading
    pub fn with_notes(mut self, notes: &'a str) -> Self {
        self.notes = Some(notes);
        self
    }

    /// The vital sign this reading measures
    pub const fn vital(&self) -> VitalType {
        self.vital
    }

    /// Primary scalar (systolic for blood pressure)
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Secondary scalar (diastolic), present only for blood pressure
    pub const fn value2(&self) -> Option<f32> {
        self.value2
    }

    /// Unit the reading is expressed in (always the canonical unit)
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Submission timestamp in milliseconds
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Free-text notes supplied by the patient, if any
    pub const fn notes(&self) -> Option<&'a str> {
        self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(vital: VitalType, value: f32, value2: Option<f32>) -> ReadingResult<VitalReading<'static>> {
        VitalReading::new(vital, value, value2, vital.unit(), 1000)
    }

    #[test]
    fn valid_single_reading() {
        let r = reading(VitalType::HeartRate, 72.0, None).unwrap();
        assert_eq!(r.vital(), VitalType::HeartRate);
        assert_eq!(r.value(), 72.0);
        assert!(r.value2().is_none());
    }

    #[test]
    fn valid_blood_pressure_pair() {
        let r = reading(VitalType::BloodPressure, 118.0, Some(76.0)).unwrap();
        assert_eq!(r.value(), 118.0);
        assert_eq!(r.value2(), Some(76.0));
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(
            reading(VitalType::Temperature, f32::NAN, None),
            Err(ReadingError::NonFiniteValue)
        );
        assert_eq!(
            reading(VitalType::BloodPressure, 120.0, Some(f32::INFINITY)),
            Err(ReadingError::NonFiniteValue)
        );
    }

    #[test]
    fn rejects_unpaired_blood_pressure() {
        assert_eq!(
            reading(VitalType::BloodPressure, 120.0, None),
            Err(ReadingError::MissingSecondValue)
        );
    }

    #[test]
    fn rejects_spurious_second_value() {
        assert_eq!(
            reading(VitalType::HeartRate, 72.0, Some(80.0)),
            Err(ReadingError::UnexpectedSecondValue)
        );
    }

    #[test]
    fn rejects_unit_mismatch() {
        let result = VitalReading::new(VitalType::BloodGlucose, 5.4, None, Unit::Percent, 0);
        assert!(matches!(result, Err(ReadingError::UnitMismatch { .. })));
    }

    #[test]
    fn alert_levels_are_ordered() {
        assert!(AlertLevel::Normal < AlertLevel::Warning);
        assert!(AlertLevel::Warning < AlertLevel::Critical);
        assert_eq!(
            AlertLevel::Warning.max(AlertLevel::Critical),
            AlertLevel::Critical
        );
    }

    #[test]
    fn notes_ride_along() {
        let r = reading(VitalType::Weight, 82.0, None)
            .unwrap()
            .with_notes("after breakfast");
        assert_eq!(r.notes(), Some("after breakfast"));
    }
}
