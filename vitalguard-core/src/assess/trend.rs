//! Trend Analysis Against Personal Baselines
//!
//! ## Overview
//!
//! Population range tables say nothing about what is normal *for this
//! patient*. A peak flow of 320 L/min sits comfortably inside the generic
//! adult band - and is an emergency for the asthmatic whose personal best
//! is 650. The trend analyzer compares a reading to the patient's own
//! baseline and escalates on percentage deviation, independently of the
//! absolute range check.
//!
//! ## Where Baselines Are Meaningful
//!
//! Only vitals with an established self-monitoring baseline practice get
//! trend rules:
//!
//! - **Peak flow** against personal best - the written asthma action plan
//!   zones: a drop of 20% or more is a warning, 50% or more is critical.
//! - **Weight** against dry/target weight - rapid change in either
//!   direction is the heart-failure self-care signal.
//!
//! For every other vital, and whenever no baseline is on file, the verdict
//! is neutral. Missing context never escalates - and never blocks.

use libm::fabsf;

use crate::constants::{
    PEAK_FLOW_CRITICAL_DROP_PCT, PEAK_FLOW_WARNING_DROP_PCT, WEIGHT_CRITICAL_DEVIATION_PCT,
    WEIGHT_WARNING_DEVIATION_PCT,
};
use crate::context::PatientContext;
use crate::vitals::{AlertLevel, VitalReading, VitalType};

use super::Assessment;

/// Outcome of trend analysis for one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendVerdict {
    /// Alert level from baseline deviation
    pub level: AlertLevel,
    /// Signed deviation from baseline in percent (negative = drop);
    /// `None` when no meaningful baseline applied
    pub delta_pct: Option<f32>,
}

impl TrendVerdict {
    /// Neutral verdict: no baseline evidence either way
    pub const fn neutral() -> Self {
        Self {
            level: AlertLevel::Normal,
            delta_pct: None,
        }
    }
}

impl Assessment for TrendVerdict {
    fn level(&self) -> AlertLevel {
        self.level
    }
}

/// Compares readings against the patient's personal baselines
///
/// Thresholds default to the published self-monitoring zones; deployments
/// with their own action-plan parameters can construct custom ones.
#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer {
    /// Peak flow drop (%) that triggers a warning
    peak_flow_warning_drop_pct: f32,
    /// Peak flow drop (%) that triggers a critical alert
    peak_flow_critical_drop_pct: f32,
    /// Weight deviation (%) that triggers a warning
    weight_warning_deviation_pct: f32,
    /// Weight deviation (%) that triggers a critical alert
    weight_critical_deviation_pct: f32,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self {
            peak_flow_warning_drop_pct: PEAK_FLOW_WARNING_DROP_PCT,
            peak_flow_critical_drop_pct: PEAK_FLOW_CRITICAL_DROP_PCT,
            weight_warning_deviation_pct: WEIGHT_WARNING_DEVIATION_PCT,
            weight_critical_deviation_pct: WEIGHT_CRITICAL_DEVIATION_PCT,
        }
    }
}

impl TrendAnalyzer {
    /// Analyzer with the published default zones
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with custom deviation thresholds
    pub fn new_with_thresholds(
        peak_flow_warning_drop_pct: f32,
        peak_flow_critical_drop_pct: f32,
        weight_warning_deviation_pct: f32,
        weight_critical_deviation_pct: f32,
    ) -> Self {
        Self {
            peak_flow_warning_drop_pct: fabsf(peak_flow_warning_drop_pct),
            peak_flow_critical_drop_pct: fabsf(peak_flow_critical_drop_pct),
            weight_warning_deviation_pct: fabsf(weight_warning_deviation_pct),
            weight_critical_deviation_pct: fabsf(weight_critical_deviation_pct),
        }
    }

    /// Compare a reading to the patient's baseline for that vital
    pub fn analyze(&self, reading: &VitalReading<'_>, context: &PatientContext) -> TrendVerdict {
        let vital = reading.vital();

        // A baseline only carries trend meaning for self-monitored vitals
        let baseline = match vital {
            VitalType::PeakFlow | VitalType::Weight => context.baseline(vital),
            _ => None,
        };

        let Some(baseline) = baseline else {
            return TrendVerdict::neutral();
        };
        // Guard the division; a zero baseline is a data-entry artifact
        if baseline <= 0.0 {
            return TrendVerdict::neutral();
        }

        let delta_pct = (reading.value() - baseline) / baseline * 100.0;

        let level = match vital {
            VitalType::PeakFlow => {
                // Only drops matter; a reading above personal best is good news
                let drop_pct = -delta_pct;
                if drop_pct >= self.peak_flow_critical_drop_pct {
                    AlertLevel::Critical
                } else if drop_pct >= self.peak_flow_warning_drop_pct {
                    AlertLevel::Warning
                } else {
                    AlertLevel::Normal
                }
            }
            VitalType::Weight => {
                let deviation_pct = fabsf(delta_pct);
                if deviation_pct >= self.weight_critical_deviation_pct {
                    AlertLevel::Critical
                } else if deviation_pct >= self.weight_warning_deviation_pct {
                    AlertLevel::Warning
                } else {
                    AlertLevel::Normal
                }
            }
            _ => AlertLevel::Normal,
        };

        TrendVerdict {
            level,
            delta_pct: Some(delta_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::Unit;

    fn peak_flow(value: f32) -> VitalReading<'static> {
        VitalReading::new(VitalType::PeakFlow, value, None, Unit::LitersPerMin, 0).unwrap()
    }

    fn weight(value: f32) -> VitalReading<'static> {
        VitalReading::new(VitalType::Weight, value, None, Unit::Kg, 0).unwrap()
    }

    #[test]
    fn neutral_without_baseline() {
        let analyzer = TrendAnalyzer::new();
        let ctx = PatientContext::default();
        let verdict = analyzer.analyze(&peak_flow(200.0), &ctx);
        assert_eq!(verdict, TrendVerdict::neutral());
    }

    #[test]
    fn peak_flow_zones() {
        let analyzer = TrendAnalyzer::new();
        let mut ctx = PatientContext::new();
        ctx.set_baseline(VitalType::PeakFlow, 500.0);

        // 10% drop: green zone
        assert_eq!(analyzer.analyze(&peak_flow(450.0), &ctx).level, AlertLevel::Normal);

        // Exactly 20% drop: warning starts at the boundary
        assert_eq!(analyzer.analyze(&peak_flow(400.0), &ctx).level, AlertLevel::Warning);

        // 45% drop: still warning
        assert_eq!(analyzer.analyze(&peak_flow(275.0), &ctx).level, AlertLevel::Warning);

        // Exactly 50% drop: critical
        assert_eq!(analyzer.analyze(&peak_flow(250.0), &ctx).level, AlertLevel::Critical);

        // Above personal best is not a deviation worth flagging
        assert_eq!(analyzer.analyze(&peak_flow(520.0), &ctx).level, AlertLevel::Normal);
    }

    #[test]
    fn weight_deviation_is_two_sided() {
        let analyzer = TrendAnalyzer::new();
        let mut ctx = PatientContext::new();
        ctx.set_baseline(VitalType::Weight, 80.0);

        assert_eq!(analyzer.analyze(&weight(81.0), &ctx).level, AlertLevel::Normal);
        // +6% gain
        assert_eq!(analyzer.analyze(&weight(84.8), &ctx).level, AlertLevel::Warning);
        // -12% loss
        assert_eq!(analyzer.analyze(&weight(70.4), &ctx).level, AlertLevel::Critical);

        let verdict = analyzer.analyze(&weight(84.8), &ctx);
        let delta = verdict.delta_pct.unwrap();
        assert!((delta - 6.0).abs() < 0.01);
    }

    #[test]
    fn zero_baseline_is_ignored() {
        let analyzer = TrendAnalyzer::new();
        let mut ctx = PatientContext::new();
        ctx.set_baseline(VitalType::PeakFlow, 0.0);
        assert_eq!(analyzer.analyze(&peak_flow(100.0), &ctx), TrendVerdict::neutral());
    }

    #[test]
    fn baseline_on_other_vitals_is_not_trended() {
        let analyzer = TrendAnalyzer::new();
        let mut ctx = PatientContext::new();
        ctx.set_baseline(VitalType::HeartRate, 60.0);

        let hr = VitalReading::new(VitalType::HeartRate, 120.0, None, Unit::Bpm, 0).unwrap();
        assert_eq!(analyzer.analyze(&hr, &ctx), TrendVerdict::neutral());
    }
}
