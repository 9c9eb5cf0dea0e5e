//! Core validation engine for VitalGuard
//!
//! Classifies patient-submitted vital signs against guideline-sourced,
//! context-aware thresholds and produces a structured alert outcome -
//! without ever blocking the reading from being saved.
//!
//! Key guarantees:
//! - Total: every structurally valid reading yields a result
//! - Never-block: `is_valid` is always true past the admission boundary
//! - Monotonic: the final level is the max of all analyzer verdicts
//!
//! ```
//! use vitalguard_core::{
//!     PatientContext, ThresholdCatalog, Unit, VitalEngine, VitalReading, VitalType,
//! };
//!
//! let catalog = ThresholdCatalog::builtin();
//! let engine = VitalEngine::new(&catalog);
//!
//! let reading = VitalReading::new(VitalType::HeartRate, 72.0, None, Unit::Bpm, 0)?;
//! let result = engine.evaluate(&reading, &PatientContext::default());
//!
//! assert!(result.is_valid);
//! # Ok::<(), vitalguard_core::ReadingError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod assess;
pub mod catalog;
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod resolve;
pub mod vitals;
pub mod window;

// Public API
pub use assess::pattern::{Pattern, PatternCorrelator, PatternVerdict};
pub use assess::range::{PressureComponent, RangeClassifier, RangeVerdict};
pub use assess::trend::{TrendAnalyzer, TrendVerdict};
pub use assess::Assessment;
pub use catalog::{
    AgeBand, BandSelection, BandSource, Deviation, ThresholdBand, ThresholdCatalog, VitalBands,
};
pub use context::{BaselineStore, PatientContext};
pub use engine::VitalEngine;
pub use errors::{CatalogError, ReadingError, ReadingResult};
pub use resolve::{AlertMessage, AlertResolver, VitalValidationResult};
pub use vitals::{AlertLevel, ConditionType, Timestamp, Unit, VitalReading, VitalType};
pub use window::{ReadingWindow, RecordedVital};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
