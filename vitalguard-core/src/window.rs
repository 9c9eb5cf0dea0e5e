//! Fixed-Size Recent-Readings Window for Trend and Pattern Analysis
//!
//! ## Overview
//!
//! Trend and pattern analysis need a bounded view of what the patient
//! submitted recently: the correlator looks for co-occurring signals across
//! vital types, and clinical context is only meaningful for a short horizon
//! anyway. This module provides a circular (ring) buffer holding the most
//! recent N readings with no heap allocation, sized at compile time through
//! const generics.
//!
//! ## Design Rationale
//!
//! A circular buffer provides constant-time operations while using fixed
//! memory:
//! - O(1) insertion (overwrites oldest when full)
//! - O(1) access to most recent reading
//! - O(n) iteration over all readings
//! - Zero heap allocations
//!
//! Automatic overwrite matches the use case exactly: when the window is
//! full the oldest reading is the least clinically relevant, so it is
//! silently discarded. The window is restartable - a fresh context starts
//! empty and every analyzer treats an empty window as "no evidence", never
//! as an error.
//!
//! Unlike a plain time-series buffer, the window is queried by vital type:
//! the correlator asks "what was the most recent heart rate within fifteen
//! minutes of this reading?", so lookups filter on type and recency rather
//! than position.

use crate::vitals::{Timestamp, VitalReading, VitalType};

/// Compact record of one reading kept in the window
///
/// Free-text notes are deliberately dropped: the window exists for numeric
/// correlation, and keeping borrowed text would tie the window's lifetime to
/// every reading ever pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedVital {
    /// Vital sign this record measures
    pub vital: VitalType,
    /// Primary scalar (systolic for blood pressure)
    pub value: f32,
    /// Secondary scalar (diastolic), blood pressure only
    pub value2: Option<f32>,
    /// Submission timestamp in milliseconds
    pub timestamp: Timestamp,
}

impl RecordedVital {
    /// Capture the numeric content of a full reading
    pub fn from_reading(reading: &VitalReading<'_>) -> Self {
        Self {
            vital: reading.vital(),
            value: reading.value(),
            value2: reading.value2(),
            timestamp: reading.timestamp(),
        }
    }
}

/// Fixed-size circular buffer of recent readings
///
/// ## Type Parameter
///
/// - `N`: maximum number of readings to keep. A compile-time constant so the
///   memory layout is fixed; powers of 2 let the wrap-around compile to a
///   bit mask.
///
/// ## Internal Invariants
///
/// - `write_pos < N` (next write position is always valid)
/// - `len <= N` (never claim more items than capacity)
/// - iteration yields readings in chronological push order
#[derive(Debug, Clone)]
pub struct ReadingWindow<const N: usize> {
    /// Storage array using Option for uninitialized slots
    data: [Option<RecordedVital>; N],
    /// Index where the next write will occur, wraps at N
    write_pos: usize,
    /// Current number of valid readings
    len: usize,
}

impl<const N: usize> ReadingWindow<N> {
    /// Creates a new empty window
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds a reading, overwriting the oldest when full
    pub fn push(&mut self, record: RecordedVital) {
        self.data[self.write_pos] = Some(record);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Get number of stored readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if window is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Get the most recently pushed reading
    pub fn last(&self) -> Option<&RecordedVital> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };

        self.data[idx].as_ref()
    }

    /// Most recently pushed reading of the given vital type, if any
    pub fn latest_of(&self, vital: VitalType) -> Option<&RecordedVital> {
        // Newest wins, so scan from the back
        let mut best: Option<&RecordedVital> = None;
        for record in self.iter() {
            if record.vital == vital {
                best = Some(record);
            }
        }
        best
    }

    /// Most recent reading of `vital` within `horizon_ms` of `at`
    ///
    /// Recency is symmetric: a reading submitted concurrently with (or just
    /// after) the one under evaluation still counts as co-occurring.
    pub fn latest_within(
        &self,
        vital: VitalType,
        at: Timestamp,
        horizon_ms: u64,
    ) -> Option<&RecordedVital> {
        let mut best: Option<&RecordedVital> = None;
        for record in self.iter() {
            if record.vital == vital && at.abs_diff(record.timestamp) <= horizon_ms {
                best = Some(record);
            }
        }
        best
    }

    /// Iterate over readings from oldest to newest
    pub fn iter(&self) -> ReadingWindowIter<'_, N> {
        ReadingWindowIter {
            window: self,
            index: 0,
            count: 0,
        }
    }

    /// Clear all readings
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Reading by logical index (0 = oldest)
    ///
    /// When the window is not full, logical and physical indices match.
    /// When full, the oldest element sits at `write_pos`, so we offset.
    fn get(&self, index: usize) -> Option<&RecordedVital> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over window contents
pub struct ReadingWindowIter<'a, const N: usize> {
    window: &'a ReadingWindow<N>,
    index: usize,
    count: usize,
}

impl<'a, const N: usize> Iterator for ReadingWindowIter<'a, N> {
    type Item = &'a RecordedVital;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count >= self.window.len() {
            return None;
        }

        let item = self.window.get(self.index)?;
        self.index += 1;
        self.count += 1;
        Some(item)
    }
}

impl<const N: usize> Default for ReadingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vital: VitalType, value: f32, timestamp: Timestamp) -> RecordedVital {
        RecordedVital {
            vital,
            value,
            value2: None,
            timestamp,
        }
    }

    #[test]
    fn empty_window() {
        let window: ReadingWindow<5> = ReadingWindow::new();
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
        assert!(window.last().is_none());
        assert!(window.latest_of(VitalType::HeartRate).is_none());
    }

    #[test]
    fn push_and_retrieve() {
        let mut window = ReadingWindow::<5>::new();

        window.push(record(VitalType::HeartRate, 72.0, 1000));
        assert_eq!(window.len(), 1);

        let last = window.last().unwrap();
        assert_eq!(last.value, 72.0);
        assert_eq!(last.timestamp, 1000);
    }

    #[test]
    fn circular_overwrite() {
        let mut window = ReadingWindow::<3>::new();

        for i in 0..5 {
            window.push(record(VitalType::Weight, i as f32, i as u64 * 1000));
        }

        assert_eq!(window.len(), 3);
        assert!(window.is_full());

        // Oldest two were overwritten
        let values: [f32; 3] = {
            let mut out = [0.0; 3];
            for (i, r) in window.iter().enumerate() {
                out[i] = r.value;
            }
            out
        };
        assert_eq!(values, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn latest_of_picks_newest_match() {
        let mut window = ReadingWindow::<8>::new();
        window.push(record(VitalType::HeartRate, 70.0, 1000));
        window.push(record(VitalType::RespiratoryRate, 16.0, 2000));
        window.push(record(VitalType::HeartRate, 90.0, 3000));

        let hr = window.latest_of(VitalType::HeartRate).unwrap();
        assert_eq!(hr.value, 90.0);
        assert!(window.latest_of(VitalType::PeakFlow).is_none());
    }

    #[test]
    fn latest_within_respects_horizon() {
        let mut window = ReadingWindow::<8>::new();
        window.push(record(VitalType::HeartRate, 110.0, 10_000));

        // Within horizon, before and after the probe time
        assert!(window
            .latest_within(VitalType::HeartRate, 12_000, 5_000)
            .is_some());
        assert!(window
            .latest_within(VitalType::HeartRate, 8_000, 5_000)
            .is_some());

        // Stale
        assert!(window
            .latest_within(VitalType::HeartRate, 100_000, 5_000)
            .is_none());
    }
}
