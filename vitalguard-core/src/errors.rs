//! Error Types for Structural Reading Failures
//!
//! ## Design Philosophy
//!
//! VitalGuard keeps two failure classes strictly apart:
//!
//! 1. **Structural errors** (this module): a reading that is malformed before
//!    any clinical meaning can be attached — a NaN value, a blood pressure
//!    without its diastolic half, a glucose reading submitted in mmHg. These
//!    are rejected at the [`crate::VitalReading::new`] boundary and never
//!    reach the classifiers.
//!
//! 2. **Clinical-context gaps** (NOT errors): a missing age, an unknown
//!    baseline, an empty recent-readings window. Every classifier degrades to
//!    a neutral or low-confidence verdict instead of failing, so a patient is
//!    never prevented from recording a vital sign merely because supporting
//!    context is absent.
//!
//! Error values follow the same constraints as the rest of the crate:
//!
//! - **Small size**: every variant is a few bytes; errors are returned in hot
//!   paths and may be queued on constrained targets.
//! - **No heap allocation**: all error data is inline - no String, only
//!   enum payloads. This ensures deterministic memory usage.
//! - **Copy semantics**: errors implement Copy for efficient return from
//!   functions without move semantics complications.

use thiserror_no_std::Error;

use crate::vitals::Unit;

/// Result type for the structural admission boundary
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Structural reading errors - the only refusal path in the engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingError {
    /// Value is NaN or infinite - carries no clinical meaning
    #[error("Reading value is not a finite number")]
    NonFiniteValue,

    /// Paired vital submitted without its second component
    #[error("Blood pressure requires both systolic and diastolic values")]
    MissingSecondValue,

    /// Second component supplied for a single-valued vital
    #[error("Vital type does not carry a second value")]
    UnexpectedSecondValue,

    /// Reading unit does not match the vital type's canonical unit
    #[error("Unit {found:?} does not match canonical unit {expected:?}")]
    UnitMismatch {
        /// Canonical unit for the submitted vital type
        expected: Unit,
        /// Unit the reading was actually submitted in
        found: Unit,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReadingError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NonFiniteValue =>
                defmt::write!(fmt, "Non-finite value"),
            Self::MissingSecondValue =>
                defmt::write!(fmt, "Missing diastolic value"),
            Self::UnexpectedSecondValue =>
                defmt::write!(fmt, "Unexpected second value"),
            Self::UnitMismatch { expected, found } =>
                defmt::write!(fmt, "Unit {} != {}", found.symbol(), expected.symbol()),
        }
    }
}

/// Threshold table construction errors
///
/// Raised only by [`crate::catalog::ThresholdCatalog::verify`] when a band
/// fails the partition invariant. The built-in catalog is verified by tests;
/// per-call lookups never see this error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// A band's cut points are unordered or NaN, leaving a gap or overlap
    #[error("Threshold band for {vital} does not partition the value domain")]
    BrokenPartition {
        /// Human-readable name of the vital whose band is broken
        vital: &'static str,
    },
}
