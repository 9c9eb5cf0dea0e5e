//! Alert Resolution: Merging Verdicts Into One Result
//!
//! ## Overview
//!
//! The resolver takes the three independent verdicts and produces the
//! single `VitalValidationResult` the caller persists and routes. Its rules
//! are deliberately small:
//!
//! - **Final level** is the maximum severity across the verdicts. The
//!   `AlertLevel` ordering makes this a plain `max` - no tie-breaking
//!   table, no precedence matrix, and monotonic escalation for free: a
//!   reading can never be silently downgraded below what any analyzer saw.
//! - **Provider notification** fires on critical, and on warnings that came
//!   from trend or pattern evidence: chronic drift and multi-signal
//!   pictures are provider-notifiable even when a single out-of-range but
//!   stable reading is not.
//! - **Emergency options** are shown exactly when the final level is
//!   critical.
//!
//! ## The Never-Block Invariant
//!
//! `is_valid` is always `true`. This component classifies and annotates; it
//! is not admission control. Rejecting a structurally valid reading here -
//! whatever the clinical picture - would block a patient from recording
//! their own vital sign and is treated as a defect, not a feature.
//!
//! ## Messages
//!
//! The message is composed from the winning verdict's rationale into a
//! fixed-capacity string: vital name, value with unit, the breached
//! boundary where one is known, and - when a pattern fired - the pattern's
//! name, so the recipient understands why the escalation went beyond the
//! raw number. Low-confidence band selections (age unknown) soften the
//! wording instead of withholding the result.

use core::fmt::Write;

use crate::assess::pattern::PatternVerdict;
use crate::assess::range::RangeVerdict;
use crate::assess::trend::TrendVerdict;
use crate::assess::Assessment;
use crate::catalog::{BandSelection, Deviation};
use crate::constants::MESSAGE_CAPACITY;
use crate::vitals::{AlertLevel, Unit, VitalReading, VitalType};

/// Fixed-capacity composed alert message
pub type AlertMessage = heapless::String<MESSAGE_CAPACITY>;

/// Final outcome for one evaluated reading
///
/// Constructed once per call, immutable, owned by the caller afterwards.
/// Persisting it and routing the flags to messaging subsystems is the
/// surrounding product's job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VitalValidationResult {
    /// Always `true`: the engine never refuses a structurally valid reading
    pub is_valid: bool,
    /// Merged alert level
    pub alert_level: AlertLevel,
    /// Human-readable rationale for the level
    pub message: AlertMessage,
    /// Optional guidance for the patient
    pub recommendation: Option<&'static str>,
    /// Whether the care provider should be notified
    pub notify_provider: bool,
    /// Whether the UI should surface emergency escalation options
    pub show_emergency_options: bool,
}

/// Which analyzer's rationale leads the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contribution {
    Range,
    Trend,
    Pattern,
}

/// Merges range, trend, and pattern verdicts into the final result
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertResolver;

impl AlertResolver {
    /// Create a resolver
    pub const fn new() -> Self {
        Self
    }

    /// Merge the three verdicts for a reading
    pub fn resolve(
        &self,
        reading: &VitalReading<'_>,
        selection: &BandSelection,
        range: &RangeVerdict,
        trend: &TrendVerdict,
        pattern: &PatternVerdict,
    ) -> VitalValidationResult {
        let alert_level = range.level.max(trend.level).max(pattern.level);

        // Rationale precedence at equal severity: a fired pattern explains
        // the most, then personal-trend evidence, then the absolute range.
        let contribution = if pattern.pattern.is_some() && pattern.level == alert_level {
            Contribution::Pattern
        } else if trend.level == alert_level
            && alert_level > AlertLevel::Normal
            && trend.delta_pct.is_some()
        {
            Contribution::Trend
        } else {
            Contribution::Range
        };

        let notify_provider = alert_level == AlertLevel::Critical
            || (alert_level == AlertLevel::Warning
                && (trend.is_escalated() || pattern.is_escalated()));

        VitalValidationResult {
            is_valid: true,
            alert_level,
            message: self.compose_message(
                reading,
                selection,
                range,
                trend,
                pattern,
                contribution,
                alert_level,
            ),
            recommendation: self.recommendation(reading.vital(), alert_level, contribution),
            notify_provider,
            show_emergency_options: alert_level == AlertLevel::Critical,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn compose_message(
        &self,
        reading: &VitalReading<'_>,
        selection: &BandSelection,
        range: &RangeVerdict,
        trend: &TrendVerdict,
        pattern: &PatternVerdict,
        contribution: Contribution,
        alert_level: AlertLevel,
    ) -> AlertMessage {
        let mut msg = AlertMessage::new();

        write_value_phrase(&mut msg, reading);

        match contribution {
            Contribution::Range if alert_level == AlertLevel::Normal => {
                let _ = write!(msg, " is within the {}", selection.source.describe());
            }
            Contribution::Range => {
                write_range_clause(&mut msg, selection, range, alert_level);
            }
            Contribution::Trend => {
                write_trend_clause(&mut msg, reading.vital(), trend);
            }
            Contribution::Pattern => {
                // Lead with whatever single-vital evidence exists, then name
                // the pattern explicitly
                if range.is_escalated() {
                    write_range_clause(&mut msg, selection, range, range.level);
                } else if trend.is_escalated() {
                    write_trend_clause(&mut msg, reading.vital(), trend);
                }
                if let Some(p) = pattern.pattern {
                    let _ = write!(
                        msg,
                        "; co-occurring vitals match the {} pattern",
                        p.name()
                    );
                }
            }
        }

        if selection.low_confidence && contribution != Contribution::Range {
            let _ = write!(msg, " (general adult ranges applied; age unknown)");
        }

        msg
    }

    fn recommendation(
        &self,
        vital: VitalType,
        level: AlertLevel,
        contribution: Contribution,
    ) -> Option<&'static str> {
        match (level, contribution) {
            (AlertLevel::Critical, Contribution::Pattern) => Some(
                "These readings together need urgent clinical review; \
                 contact your care team or emergency services now",
            ),
            (AlertLevel::Critical, _) => {
                Some("Seek urgent medical attention or contact emergency services now")
            }
            (AlertLevel::Warning, Contribution::Trend) => match vital {
                VitalType::PeakFlow => {
                    Some("Follow the worsening-symptoms steps of your asthma action plan")
                }
                VitalType::Weight => Some(
                    "Review fluid intake and medications with your care team \
                     if the change persists",
                ),
                _ => Some("Keep monitoring and share this trend with your care team"),
            },
            (AlertLevel::Warning, _) => Some(
                "Recheck in a few minutes; contact your care team if readings \
                 stay outside the expected range",
            ),
            (AlertLevel::Normal, _) => None,
        }
    }
}

/// "Blood pressure 118/76 mmHg" / "Oxygen saturation 89%"
fn write_value_phrase(msg: &mut AlertMessage, reading: &VitalReading<'_>) {
    let vital = reading.vital();
    let _ = write!(msg, "{} ", vital.label());
    let _ = match reading.value2() {
        Some(v2) => write!(msg, "{}/{}", reading.value(), v2),
        None => write!(msg, "{}", reading.value()),
    };
    write_unit(msg, vital.unit());
}

fn write_unit(msg: &mut AlertMessage, unit: Unit) {
    let _ = match unit {
        Unit::Percent => write!(msg, "%"),
        other => write!(msg, " {}", other.symbol()),
    };
}

fn write_range_clause(
    msg: &mut AlertMessage,
    selection: &BandSelection,
    range: &RangeVerdict,
    level: AlertLevel,
) {
    let side = match range.deviation {
        Deviation::BelowNormal => "below",
        _ => "above",
    };
    let limit_kind = match level {
        AlertLevel::Critical => "critical",
        _ => "warning",
    };

    if let Some(component) = range.component {
        let _ = write!(msg, ": {} value {}", component.name(), range.deciding_value);
    }

    match range.bound {
        Some(bound) => {
            let _ = write!(msg, " is {side} the {limit_kind} limit of {bound}");
        }
        None => {
            let _ = write!(msg, " is {side} the expected range");
        }
    }
    let _ = write!(msg, " ({})", selection.source.describe());
}

fn write_trend_clause(msg: &mut AlertMessage, vital: VitalType, trend: &TrendVerdict) {
    let Some(delta_pct) = trend.delta_pct else {
        return;
    };
    let side = if delta_pct < 0.0 { "below" } else { "above" };
    let magnitude = libm::fabsf(delta_pct);
    let reference = match vital {
        VitalType::PeakFlow => "this patient's personal best",
        _ => "this patient's baseline",
    };
    let _ = write!(msg, " is {magnitude:.0}% {side} {reference}");
}
