//! Clinical and Engine Constants
//!
//! This module provides centralized, well-documented constants used
//! throughout the engine. All numeric values are defined here or in the
//! threshold catalog tables, with their purpose, source, and rationale.
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, include the guideline they were sourced from
//! 3. Use descriptive names that include units

// ===== TREND DEVIATION THRESHOLDS =====

/// Peak flow drop from personal best that triggers a warning (%).
///
/// A reading below 80% of the patient's personal best marks the start of
/// the "caution" zone of a written asthma action plan.
///
/// Source: BTS/SIGN asthma guideline peak-flow zones; GINA action plans
pub const PEAK_FLOW_WARNING_DROP_PCT: f32 = 20.0;

/// Peak flow drop from personal best that triggers a critical alert (%).
///
/// Below 50% of personal best indicates an acute severe exacerbation
/// regardless of how the absolute value compares to population tables.
///
/// Source: BTS/SIGN asthma guideline (acute severe: PEF 33-50% of best)
pub const PEAK_FLOW_CRITICAL_DROP_PCT: f32 = 50.0;

/// Weight deviation from baseline that triggers a warning (%).
///
/// Rapid weight change against the patient's own baseline is the signal;
/// population weight tables carry almost no per-patient meaning. Five
/// percent in a bounded window approximates the "3 lb in a day / 5 lb in a
/// week" heart-failure self-monitoring rule for typical adult weights.
///
/// Source: AHA/HFSA heart-failure self-care recommendations
pub const WEIGHT_WARNING_DEVIATION_PCT: f32 = 5.0;

/// Weight deviation from baseline that triggers a critical alert (%).
///
/// Source: AHA/HFSA heart-failure self-care recommendations (scaled)
pub const WEIGHT_CRITICAL_DEVIATION_PCT: f32 = 10.0;

// ===== PATTERN CORRELATION =====

/// Window within which separately submitted vitals count as co-occurring (ms).
///
/// Fifteen minutes covers one home-monitoring session where a patient works
/// through several devices back to back, without correlating readings from
/// unrelated sittings.
pub const PATTERN_WINDOW_MS: u64 = 15 * 60 * 1000;

// ===== AGE BAND BOUNDARIES =====

/// First birthday: readings below this age use infant tables (years).
pub const AGE_CHILD_MIN_YEARS: u8 = 1;

/// Adulthood boundary for threshold selection (years).
pub const AGE_ADULT_MIN_YEARS: u8 = 18;

// ===== CAPACITY LIMITS =====

/// Maximum readings kept in a patient context's recent window.
///
/// One home session rarely exceeds a handful of vitals; sixteen leaves room
/// for repeated measurements without growing the context.
pub const RECENT_WINDOW: usize = 16;

/// Maximum known conditions carried per patient context.
pub const MAX_CONDITIONS: usize = 8;

/// Capacity of a composed alert message (bytes).
///
/// Messages that would overflow are truncated rather than allocated.
pub const MESSAGE_CAPACITY: usize = 192;
