//! Threshold Band Representation and Boundary Policy
//!
//! ## The Partition Invariant
//!
//! A band must assign every representable value to exactly one of the three
//! alert levels - no gaps, no double classification. Rather than storing
//! three intervals and checking they tile the line, a band stores four
//! ordered cut points:
//!
//! ```text
//!        critical      warning        NORMAL        warning      critical
//!  ──────────────┬──────────────┬──────────────┬──────────────┬──────────────▶
//!          critical_low    warning_low    warning_high   critical_high
//! ```
//!
//! One-sided bands (oxygen saturation has no "too high") use infinite cut
//! points, which keeps classification total without special cases.
//!
//! ## Boundary Policy
//!
//! An edge value classifies into the band on the side nearer normal: exactly
//! 120 mmHg systolic is normal when the normal/warning cut sits at 120, and
//! a value exactly on a critical cut is still warning. Concretely the normal
//! interval is closed, warning is half-open against normal and closed
//! against critical, and critical is open. Each point therefore maps to
//! exactly one level.

use crate::vitals::AlertLevel;

/// Which side of the normal interval a value falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deviation {
    /// Below the normal interval
    BelowNormal,
    /// Inside the normal interval
    Within,
    /// Above the normal interval
    AboveNormal,
}

/// Threshold intervals for one vital under one age/condition context
///
/// Constructed in const context by the catalog tables; the ordering
/// invariant is verified once at catalog construction via
/// [`ThresholdBand::is_partition`], never per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBand {
    /// Values strictly below this are critical
    critical_low: f32,
    /// Values strictly below this (but not critical) are warning
    warning_low: f32,
    /// Values strictly above this (but not critical) are warning
    warning_high: f32,
    /// Values strictly above this are critical
    critical_high: f32,
}

impl ThresholdBand {
    /// Build a band from its four cut points
    ///
    /// Callers must keep `critical_low <= warning_low <= warning_high <=
    /// critical_high`; the catalog verifies this once for every shipped
    /// table.
    pub const fn new(
        critical_low: f32,
        warning_low: f32,
        warning_high: f32,
        critical_high: f32,
    ) -> Self {
        Self {
            critical_low,
            warning_low,
            warning_high,
            critical_high,
        }
    }

    /// Band with no upper warning/critical region
    pub const fn floor_only(critical_low: f32, warning_low: f32) -> Self {
        Self::new(critical_low, warning_low, f32::INFINITY, f32::INFINITY)
    }

    /// Classify a value, applying the normal-ward boundary policy
    pub fn classify(&self, value: f32) -> (AlertLevel, Deviation) {
        if value > self.critical_high {
            (AlertLevel::Critical, Deviation::AboveNormal)
        } else if value > self.warning_high {
            (AlertLevel::Warning, Deviation::AboveNormal)
        } else if value >= self.warning_low {
            (AlertLevel::Normal, Deviation::Within)
        } else if value >= self.critical_low {
            (AlertLevel::Warning, Deviation::BelowNormal)
        } else {
            (AlertLevel::Critical, Deviation::BelowNormal)
        }
    }

    /// The normal-ward boundary a deviating value crossed, for messaging
    ///
    /// Returns `None` for in-range values and for unbounded sides.
    pub fn breached_bound(&self, level: AlertLevel, deviation: Deviation) -> Option<f32> {
        let bound = match (level, deviation) {
            (AlertLevel::Warning, Deviation::AboveNormal) => self.warning_high,
            (AlertLevel::Critical, Deviation::AboveNormal) => self.critical_high,
            (AlertLevel::Warning, Deviation::BelowNormal) => self.warning_low,
            (AlertLevel::Critical, Deviation::BelowNormal) => self.critical_low,
            _ => return None,
        };
        bound.is_finite().then_some(bound)
    }

    /// Check the cut points partition the value domain
    ///
    /// Infinite cut points are allowed (one-sided bands); NaN anywhere, or
    /// out-of-order cuts, breaks the partition.
    pub fn is_partition(&self) -> bool {
        let cuts = [
            self.critical_low,
            self.warning_low,
            self.warning_high,
            self.critical_high,
        ];
        if cuts.iter().any(|c| c.is_nan()) {
            return false;
        }
        self.critical_low <= self.warning_low
            && self.warning_low <= self.warning_high
            && self.warning_high <= self.critical_high
    }

    /// Lower edge of the normal interval
    pub const fn normal_floor(&self) -> f32 {
        self.warning_low
    }

    /// Upper edge of the normal interval
    pub const fn normal_ceiling(&self) -> f32 {
        self.warning_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTOLIC: ThresholdBand = ThresholdBand::new(80.0, 90.0, 120.0, 180.0);

    #[test]
    fn classifies_each_region() {
        assert_eq!(SYSTOLIC.classify(110.0), (AlertLevel::Normal, Deviation::Within));
        assert_eq!(SYSTOLIC.classify(130.0), (AlertLevel::Warning, Deviation::AboveNormal));
        assert_eq!(SYSTOLIC.classify(185.0), (AlertLevel::Critical, Deviation::AboveNormal));
        assert_eq!(SYSTOLIC.classify(85.0), (AlertLevel::Warning, Deviation::BelowNormal));
        assert_eq!(SYSTOLIC.classify(70.0), (AlertLevel::Critical, Deviation::BelowNormal));
    }

    #[test]
    fn edges_classify_normal_ward() {
        // Exactly on the normal/warning cut: normal
        assert_eq!(SYSTOLIC.classify(120.0).0, AlertLevel::Normal);
        assert_eq!(SYSTOLIC.classify(90.0).0, AlertLevel::Normal);

        // Exactly on the warning/critical cut: warning
        assert_eq!(SYSTOLIC.classify(180.0).0, AlertLevel::Warning);
        assert_eq!(SYSTOLIC.classify(80.0).0, AlertLevel::Warning);

        // Just past the critical cut: critical
        assert_eq!(SYSTOLIC.classify(180.1).0, AlertLevel::Critical);
    }

    #[test]
    fn floor_only_band_has_no_upper_region() {
        let spo2 = ThresholdBand::floor_only(92.0, 95.0);
        assert_eq!(spo2.classify(100.0).0, AlertLevel::Normal);
        assert_eq!(spo2.classify(95.0).0, AlertLevel::Normal);
        assert_eq!(spo2.classify(93.0).0, AlertLevel::Warning);
        assert_eq!(spo2.classify(91.9).0, AlertLevel::Critical);
        assert!(spo2.is_partition());
    }

    #[test]
    fn breached_bound_reports_normal_ward_edge() {
        assert_eq!(
            SYSTOLIC.breached_bound(AlertLevel::Warning, Deviation::AboveNormal),
            Some(120.0)
        );
        assert_eq!(
            SYSTOLIC.breached_bound(AlertLevel::Critical, Deviation::BelowNormal),
            Some(80.0)
        );
        assert_eq!(SYSTOLIC.breached_bound(AlertLevel::Normal, Deviation::Within), None);

        let spo2 = ThresholdBand::floor_only(92.0, 95.0);
        assert_eq!(
            spo2.breached_bound(AlertLevel::Critical, Deviation::AboveNormal),
            None
        );
    }

    #[test]
    fn partition_check_catches_disorder() {
        assert!(SYSTOLIC.is_partition());
        assert!(!ThresholdBand::new(90.0, 80.0, 120.0, 180.0).is_partition());
        assert!(!ThresholdBand::new(f32::NAN, 90.0, 120.0, 180.0).is_partition());
    }
}
