//! Independent Reading Analyzers
//!
//! ## Overview
//!
//! Three analyzers look at every reading, each from a different angle, and
//! none of them sees the others' output:
//!
//! - [`range::RangeClassifier`] - where does the value sit against the
//!   threshold band selected for this patient?
//! - [`trend::TrendAnalyzer`] - how far has the value moved from the
//!   patient's own baseline, regardless of absolute range?
//! - [`pattern::PatternCorrelator`] - do the co-occurring vitals in the
//!   recent window form a known multi-signal picture?
//!
//! The resolver merges their verdicts afterwards. Keeping the analyzers
//! blind to each other makes each one independently testable and keeps the
//! precedence rules in exactly one place.
//!
//! ## Degradation
//!
//! Every analyzer is total over structurally valid readings: missing
//! baselines, empty windows, and unknown ages degrade to a neutral verdict.
//! Only the catalog's range verdict can carry low confidence - the other
//! two simply report "no evidence".

pub mod pattern;
pub mod range;
pub mod trend;

use crate::vitals::AlertLevel;

/// Common surface of the three verdict types
///
/// The resolver only needs the level to merge verdicts; everything else a
/// verdict carries is for message composition.
pub trait Assessment {
    /// Alert level this analyzer assigns to the reading
    fn level(&self) -> AlertLevel;

    /// Whether the analyzer found anything above normal
    fn is_escalated(&self) -> bool {
        self.level() > AlertLevel::Normal
    }
}
