//! Engine Facade: One Reading In, One Result Out
//!
//! ## Overview
//!
//! [`VitalEngine`] wires the catalog, the three analyzers, and the resolver
//! into the single entry point the surrounding product calls:
//!
//! ```text
//! reading + context ──┬─► RangeClassifier ───┐
//!                     ├─► TrendAnalyzer  ────┼─► AlertResolver ─► result
//!                     └─► PatternCorrelator ─┘
//! ```
//!
//! Data flows one way; no analyzer sees another's output.
//!
//! ## Concurrency
//!
//! The engine is a pure, synchronous computation: no interior mutability,
//! no I/O, no waiting. It borrows the process-wide immutable catalog and
//! receives a fresh caller-owned context per call, so one engine value can
//! serve any number of threads or requests simultaneously. Work per call is
//! O(window size), bounded and fast; whatever timeout policy governs the
//! surrounding request needs no cooperation from here.

use crate::assess::pattern::PatternCorrelator;
use crate::assess::range::RangeClassifier;
use crate::assess::trend::TrendAnalyzer;
use crate::catalog::ThresholdCatalog;
use crate::context::{BaselineStore, PatientContext};
use crate::resolve::{AlertResolver, VitalValidationResult};
use crate::vitals::VitalReading;

/// The vital-sign validation and alerting engine
///
/// Construct once per process next to the catalog and share freely:
///
/// ```
/// use vitalguard_core::{
///     PatientContext, ThresholdCatalog, Unit, VitalEngine, VitalReading, VitalType,
/// };
///
/// let catalog = ThresholdCatalog::builtin();
/// let engine = VitalEngine::new(&catalog);
///
/// let reading = VitalReading::new(
///     VitalType::BloodPressure, 118.0, Some(76.0), Unit::MmHg, 0,
/// )?;
/// let result = engine.evaluate(&reading, &PatientContext::default());
/// assert!(result.is_valid);
/// # Ok::<(), vitalguard_core::ReadingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VitalEngine<'a> {
    catalog: &'a ThresholdCatalog,
    range: RangeClassifier,
    trend: TrendAnalyzer,
    pattern: PatternCorrelator<'a>,
    resolver: AlertResolver,
}

impl<'a> VitalEngine<'a> {
    /// Engine over a catalog, with default analyzer parameters
    pub fn new(catalog: &'a ThresholdCatalog) -> Self {
        Self {
            catalog,
            range: RangeClassifier::new(),
            trend: TrendAnalyzer::new(),
            pattern: PatternCorrelator::new(catalog),
            resolver: AlertResolver::new(),
        }
    }

    /// Engine with a custom trend analyzer and pattern correlator
    ///
    /// For deployments tuning action-plan zones or the co-occurrence
    /// window; the catalog and resolver rules are not configurable.
    pub fn new_with_analyzers(
        catalog: &'a ThresholdCatalog,
        trend: TrendAnalyzer,
        pattern: PatternCorrelator<'a>,
    ) -> Self {
        Self {
            catalog,
            range: RangeClassifier::new(),
            trend,
            pattern,
            resolver: AlertResolver::new(),
        }
    }

    /// The catalog this engine classifies against
    pub const fn catalog(&self) -> &'a ThresholdCatalog {
        self.catalog
    }

    /// Evaluate one structurally valid reading against a patient snapshot
    ///
    /// Total: every reading that passed [`VitalReading::new`] produces a
    /// result with `is_valid == true`, whatever the context holds.
    pub fn evaluate(
        &self,
        reading: &VitalReading<'_>,
        context: &PatientContext,
    ) -> VitalValidationResult {
        let selection =
            self.catalog
                .lookup(reading.vital(), context.age_years, context.conditions());

        let range = self.range.classify(reading, &selection);
        let trend = self.trend.analyze(reading, context);
        let pattern = self.pattern.correlate(reading, context);

        self.resolver
            .resolve(reading, &selection, &range, &trend, &pattern)
    }

    /// Evaluate after fetching the snapshot from a baseline store
    ///
    /// The store fetch is the only suspension point in the whole flow, and
    /// it happens before the pure computation starts.
    pub fn evaluate_from<S: BaselineStore>(
        &self,
        reading: &VitalReading<'_>,
        store: &S,
    ) -> VitalValidationResult {
        let context = store.patient_context(reading.timestamp());
        self.evaluate(reading, &context)
    }
}
