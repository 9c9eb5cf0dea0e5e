//! Cross-Vital Pattern Correlation
//!
//! ## Overview
//!
//! Some deteriorations never trip a single-vital threshold: three readings
//! each sitting just inside their warning bands can together be a textbook
//! picture of respiratory distress. The correlator looks across the current
//! reading plus the bounded recent window for named multi-signal patterns
//! and escalates when one matches.
//!
//! ## Shipped Patterns
//!
//! - **Respiratory distress triad**: oxygen saturation at or below its
//!   warning floor AND respiratory rate elevated AND heart rate elevated,
//!   all within the correlation window. Classic decompensation picture -
//!   each signal alone is "keep an eye on it", together they are critical.
//! - **Hypotension with tachycardia**: systolic pressure below its warning
//!   floor AND heart rate elevated. Compensatory tachycardia is the
//!   standard two-signal hypoperfusion picture.
//!
//! ## Escalation Is One-Directional
//!
//! A pattern verdict is either neutral or critical. It can only raise the
//! final level, never lower what any single vital already earned - the
//! resolver merges by max severity, so this holds by construction. When
//! fewer than the required contributing vitals are present in the window,
//! the verdict is neutral.

use crate::catalog::{Deviation, ThresholdCatalog};
use crate::constants::PATTERN_WINDOW_MS;
use crate::context::PatientContext;
use crate::vitals::{AlertLevel, VitalReading, VitalType};

use super::Assessment;

/// Named multi-vital signatures the correlator can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// Falling SpO2 + rising respiratory rate + rising heart rate
    RespiratoryDistressTriad,
    /// Low systolic pressure + rising heart rate
    HypotensionTachycardia,
}

impl Pattern {
    /// Stable identifier used in alert messages and downstream routing
    pub const fn name(&self) -> &'static str {
        match self {
            Pattern::RespiratoryDistressTriad => "respiratory_distress_triad",
            Pattern::HypotensionTachycardia => "hypotension_tachycardia",
        }
    }
}

/// Outcome of pattern correlation for one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternVerdict {
    /// Alert level from correlation; `Normal` unless a pattern fired
    pub level: AlertLevel,
    /// The pattern that fired, if any
    pub pattern: Option<Pattern>,
}

impl PatternVerdict {
    /// Neutral verdict: no pattern evidence
    pub const fn neutral() -> Self {
        Self {
            level: AlertLevel::Normal,
            pattern: None,
        }
    }

    const fn fired(pattern: Pattern) -> Self {
        Self {
            level: AlertLevel::Critical,
            pattern: Some(pattern),
        }
    }
}

impl Assessment for PatternVerdict {
    fn level(&self) -> AlertLevel {
        self.level
    }
}

/// One contributing signal: level plus which side of normal it sits on
#[derive(Debug, Clone, Copy)]
struct Signal {
    level: AlertLevel,
    deviation: Deviation,
}

impl Signal {
    fn warning_low(&self) -> bool {
        self.level >= AlertLevel::Warning && self.deviation == Deviation::BelowNormal
    }

    fn warning_high(&self) -> bool {
        self.level >= AlertLevel::Warning && self.deviation == Deviation::AboveNormal
    }
}

/// Detects known multi-vital patterns over the recent window
#[derive(Debug, Clone, Copy)]
pub struct PatternCorrelator<'a> {
    catalog: &'a ThresholdCatalog,
    horizon_ms: u64,
}

impl<'a> PatternCorrelator<'a> {
    /// Correlator with the default co-occurrence window
    pub fn new(catalog: &'a ThresholdCatalog) -> Self {
        Self {
            catalog,
            horizon_ms: PATTERN_WINDOW_MS,
        }
    }

    /// Correlator with a custom co-occurrence window
    pub fn new_with_horizon(catalog: &'a ThresholdCatalog, horizon_ms: u64) -> Self {
        Self {
            catalog,
            horizon_ms,
        }
    }

    /// Look for a pattern around the current reading
    ///
    /// The current reading must itself be one of the fired pattern's
    /// contributing vitals; a weight reading submitted mid-distress does
    /// not re-raise the pattern alert.
    pub fn correlate(
        &self,
        reading: &VitalReading<'_>,
        context: &PatientContext,
    ) -> PatternVerdict {
        let vital = reading.vital();

        // Respiratory distress triad
        if matches!(
            vital,
            VitalType::OxygenSaturation | VitalType::RespiratoryRate | VitalType::HeartRate
        ) {
            let spo2 = self.signal(reading, context, VitalType::OxygenSaturation);
            let resp = self.signal(reading, context, VitalType::RespiratoryRate);
            let heart = self.signal(reading, context, VitalType::HeartRate);

            if let (Some(spo2), Some(resp), Some(heart)) = (spo2, resp, heart) {
                if spo2.warning_low() && resp.warning_high() && heart.warning_high() {
                    return PatternVerdict::fired(Pattern::RespiratoryDistressTriad);
                }
            }
        }

        // Hypotension with compensatory tachycardia
        if matches!(vital, VitalType::BloodPressure | VitalType::HeartRate) {
            let systolic = self.signal(reading, context, VitalType::BloodPressure);
            let heart = self.signal(reading, context, VitalType::HeartRate);

            if let (Some(systolic), Some(heart)) = (systolic, heart) {
                if systolic.warning_low() && heart.warning_high() {
                    return PatternVerdict::fired(Pattern::HypotensionTachycardia);
                }
            }
        }

        PatternVerdict::neutral()
    }

    /// Range signal for one vital: the current reading if it matches,
    /// otherwise the freshest window record within the horizon
    ///
    /// Only the primary value is consulted (systolic, for blood pressure);
    /// the shipped patterns are defined on primary scalars.
    fn signal(
        &self,
        reading: &VitalReading<'_>,
        context: &PatientContext,
        vital: VitalType,
    ) -> Option<Signal> {
        let value = if reading.vital() == vital {
            reading.value()
        } else {
            context
                .recent()
                .latest_within(vital, reading.timestamp(), self.horizon_ms)?
                .value
        };

        let selection = self
            .catalog
            .lookup(vital, context.age_years, context.conditions());
        let (level, deviation) = selection.bands.primary.classify(value);
        Some(Signal { level, deviation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::Unit;
    use crate::window::RecordedVital;

    fn reading(vital: VitalType, value: f32, timestamp: u64) -> VitalReading<'static> {
        VitalReading::new(vital, value, None, vital.unit(), timestamp).unwrap()
    }

    fn record(vital: VitalType, value: f32, timestamp: u64) -> RecordedVital {
        RecordedVital {
            vital,
            value,
            value2: None,
            timestamp,
        }
    }

    fn adult_context() -> PatientContext {
        let mut ctx = PatientContext::new();
        ctx.age_years = Some(40);
        ctx
    }

    #[test]
    fn triad_fires_when_all_three_signals_align() {
        let catalog = ThresholdCatalog::builtin();
        let correlator = PatternCorrelator::new(&catalog);

        let mut ctx = adult_context();
        // SpO2 93% (warning-low) and respiratory rate 22 (warning-high)
        ctx.record(record(VitalType::OxygenSaturation, 93.0, 60_000));
        ctx.record(record(VitalType::RespiratoryRate, 22.0, 120_000));

        // Heart rate 110 (warning-high) completes the triad
        let verdict = correlator.correlate(&reading(VitalType::HeartRate, 110.0, 180_000), &ctx);
        assert_eq!(verdict.level, AlertLevel::Critical);
        assert_eq!(verdict.pattern, Some(Pattern::RespiratoryDistressTriad));
    }

    #[test]
    fn triad_needs_all_contributors_in_window() {
        let catalog = ThresholdCatalog::builtin();
        let correlator = PatternCorrelator::new(&catalog);

        let mut ctx = adult_context();
        ctx.record(record(VitalType::OxygenSaturation, 93.0, 60_000));

        // Respiratory rate missing entirely
        let verdict = correlator.correlate(&reading(VitalType::HeartRate, 110.0, 120_000), &ctx);
        assert_eq!(verdict, PatternVerdict::neutral());
    }

    #[test]
    fn stale_contributors_do_not_count() {
        let catalog = ThresholdCatalog::builtin();
        let correlator = PatternCorrelator::new(&catalog);

        let mut ctx = adult_context();
        // Two hours earlier - outside the co-occurrence window
        ctx.record(record(VitalType::OxygenSaturation, 93.0, 0));
        ctx.record(record(VitalType::RespiratoryRate, 22.0, 1_000));

        let verdict =
            correlator.correlate(&reading(VitalType::HeartRate, 110.0, 7_200_000), &ctx);
        assert_eq!(verdict, PatternVerdict::neutral());
    }

    #[test]
    fn healthy_signals_do_not_fire() {
        let catalog = ThresholdCatalog::builtin();
        let correlator = PatternCorrelator::new(&catalog);

        let mut ctx = adult_context();
        ctx.record(record(VitalType::OxygenSaturation, 98.0, 60_000));
        ctx.record(record(VitalType::RespiratoryRate, 14.0, 120_000));

        let verdict = correlator.correlate(&reading(VitalType::HeartRate, 72.0, 180_000), &ctx);
        assert_eq!(verdict, PatternVerdict::neutral());
    }

    #[test]
    fn hypotension_tachycardia_pair() {
        let catalog = ThresholdCatalog::builtin();
        let correlator = PatternCorrelator::new(&catalog);

        let mut ctx = adult_context();
        // Systolic 85 is warning-low for an adult
        ctx.record(RecordedVital {
            vital: VitalType::BloodPressure,
            value: 85.0,
            value2: Some(58.0),
            timestamp: 60_000,
        });

        let verdict = correlator.correlate(&reading(VitalType::HeartRate, 112.0, 90_000), &ctx);
        assert_eq!(verdict.level, AlertLevel::Critical);
        assert_eq!(verdict.pattern, Some(Pattern::HypotensionTachycardia));
    }

    #[test]
    fn unrelated_vital_does_not_re_raise() {
        let catalog = ThresholdCatalog::builtin();
        let correlator = PatternCorrelator::new(&catalog);

        let mut ctx = adult_context();
        ctx.record(record(VitalType::OxygenSaturation, 93.0, 60_000));
        ctx.record(record(VitalType::RespiratoryRate, 22.0, 90_000));
        ctx.record(record(VitalType::HeartRate, 110.0, 120_000));

        // The triad is live, but a weight reading is not a contributor
        let weight = VitalReading::new(VitalType::Weight, 80.0, None, Unit::Kg, 150_000).unwrap();
        let verdict = correlator.correlate(&weight, &ctx);
        assert_eq!(verdict, PatternVerdict::neutral());
    }
}
