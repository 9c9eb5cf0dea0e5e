//! Patient Context Snapshot and the Baseline Store Seam
//!
//! ## Overview
//!
//! Every evaluation receives a [`PatientContext`]: a read-only snapshot of
//! what is known about the patient at call time - age, chronic conditions,
//! personal baselines (e.g. best-ever peak flow), and a bounded window of
//! recent readings. The engine never mutates or persists the snapshot; the
//! caller assembles a fresh one per call, which is what makes concurrent
//! evaluation trivially safe.
//!
//! ## Degradation, Not Failure
//!
//! Any part of the snapshot may be missing. A context fetched during a
//! storage outage can be `PatientContext::default()` - no age, no
//! conditions, no baselines, empty window - and the engine still produces a
//! result: the catalog falls back to conservative adult bands, the trend
//! analyzer goes neutral, the correlator finds no co-occurring signals.
//!
//! ## The Baseline Store
//!
//! Fetching the snapshot from persistent storage is the surrounding
//! product's job. [`BaselineStore`] is the seam for it: the engine can be
//! handed any implementation and will only ever read through it, once per
//! evaluation, before the pure computation starts.

use heapless::Vec;

use crate::constants::{MAX_CONDITIONS, RECENT_WINDOW};
use crate::vitals::{ConditionType, Timestamp, VitalReading, VitalType, VITAL_TYPE_COUNT};
use crate::window::{ReadingWindow, RecordedVital};

/// Read-only patient snapshot supplied per evaluation
#[derive(Debug, Clone, Default)]
pub struct PatientContext {
    /// Patient age in whole years; `None` when the fetch failed or the
    /// record is incomplete
    pub age_years: Option<u8>,

    /// Known chronic conditions, deduplicated
    conditions: Vec<ConditionType, MAX_CONDITIONS>,

    /// Personal baseline per vital type (e.g. personal-best peak flow)
    baselines: [Option<f32>; VITAL_TYPE_COUNT],

    /// Recent readings, bounded, oldest overwritten first
    recent: ReadingWindow<RECENT_WINDOW>,
}

impl PatientContext {
    /// Empty context: no age, no conditions, no baselines, no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a known condition
    ///
    /// Duplicates are ignored. Returns `false` when the condition set is
    /// full; the engine treats an overfull set the same as any other
    /// context gap and keeps going.
    pub fn add_condition(&mut self, condition: ConditionType) -> bool {
        if self.has_condition(condition) {
            return true;
        }
        self.conditions.push(condition).is_ok()
    }

    /// Whether the patient is known to have the given condition
    pub fn has_condition(&self, condition: ConditionType) -> bool {
        self.conditions.iter().any(|c| *c == condition)
    }

    /// Known conditions as a slice
    pub fn conditions(&self) -> &[ConditionType] {
        &self.conditions
    }

    /// Set the personal baseline for a vital type
    ///
    /// Non-finite baselines are discarded at the door so the trend analyzer
    /// never has to re-check.
    pub fn set_baseline(&mut self, vital: VitalType, value: f32) {
        if value.is_finite() {
            self.baselines[vital.index()] = Some(value);
        }
    }

    /// Personal baseline for a vital type, if one is known
    pub fn baseline(&self, vital: VitalType) -> Option<f32> {
        self.baselines[vital.index()]
    }

    /// Append a reading to the recent window
    pub fn observe(&mut self, reading: &VitalReading<'_>) {
        self.recent.push(RecordedVital::from_reading(reading));
    }

    /// Append an already-compacted record to the recent window
    pub fn record(&mut self, record: RecordedVital) {
        self.recent.push(record);
    }

    /// The bounded recent-readings window
    pub fn recent(&self) -> &ReadingWindow<RECENT_WINDOW> {
        &self.recent
    }
}

/// External collaborator that materializes a patient snapshot on demand
///
/// Implementations live outside the engine (database adapters, caches,
/// fixtures in tests). The engine only reads through this trait; it never
/// writes back, retries, or times out - whatever suspension or failure
/// policy applies to fetching context is the caller's.
pub trait BaselineStore {
    /// Produce the patient snapshot to evaluate against at time `now`
    fn patient_context(&self, now: Timestamp) -> PatientContext;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::Unit;

    #[test]
    fn default_context_is_empty() {
        let ctx = PatientContext::default();
        assert!(ctx.age_years.is_none());
        assert!(ctx.conditions().is_empty());
        assert!(ctx.baseline(VitalType::PeakFlow).is_none());
        assert!(ctx.recent().is_empty());
    }

    #[test]
    fn conditions_deduplicate() {
        let mut ctx = PatientContext::new();
        assert!(ctx.add_condition(ConditionType::Copd));
        assert!(ctx.add_condition(ConditionType::Copd));
        assert_eq!(ctx.conditions().len(), 1);
        assert!(ctx.has_condition(ConditionType::Copd));
        assert!(!ctx.has_condition(ConditionType::Diabetes));
    }

    #[test]
    fn non_finite_baseline_is_dropped() {
        let mut ctx = PatientContext::new();
        ctx.set_baseline(VitalType::PeakFlow, f32::NAN);
        assert!(ctx.baseline(VitalType::PeakFlow).is_none());

        ctx.set_baseline(VitalType::PeakFlow, 480.0);
        assert_eq!(ctx.baseline(VitalType::PeakFlow), Some(480.0));
    }

    #[test]
    fn observe_compacts_reading() {
        let mut ctx = PatientContext::new();
        let reading = VitalReading::new(VitalType::HeartRate, 88.0, None, Unit::Bpm, 5000)
            .unwrap()
            .with_notes("after stairs");
        ctx.observe(&reading);

        let record = ctx.recent().last().unwrap();
        assert_eq!(record.vital, VitalType::HeartRate);
        assert_eq!(record.value, 88.0);
        assert_eq!(record.timestamp, 5000);
    }
}
