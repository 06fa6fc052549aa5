//! Summary of a precompute pass.

use serde::Serialize;

/// Outcome of one precompute pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrecomputeReport {
    /// Distinct in-range candidate indices.
    pub flagged: usize,
    /// Candidates kept after the per-batch cap.
    pub selected: usize,
    /// Entries this pass inserted.
    pub cached: usize,
    /// Selected indices that were already cached.
    pub already_cached: usize,
    /// Selected indices whose attribution failed, ascending.
    pub skipped: Vec<usize>,
    /// Candidates dropped for lying outside the matrix.
    pub out_of_range: usize,
    /// The deadline passed before every selected index was visited.
    pub truncated: bool,
}
