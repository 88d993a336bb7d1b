use serde::{Deserialize, Serialize};

/// A time span in seconds whose bounds may be unknown.
///
/// A missing bound stays `None` all the way to the report; it is never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Start in seconds
    pub start: Option<f64>,
    /// End in seconds
    pub end: Option<f64>,
}

/// Why a known interval was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalViolation {
    /// `end < start` with both bounds known
    EndBeforeStart,
    /// A known bound is negative, NaN or infinite
    OutOfRange,
}

impl TimeInterval {
    pub fn new(start: Option<f64>, end: Option<f64>) -> Self {
        Self { start, end }
    }

    /// Interval with both bounds known
    pub fn known(start: f64, end: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    /// Both bounds present
    pub fn is_known(&self) -> bool {
        self.bounds().is_some()
    }

    /// `(start, end)` when both bounds are known
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Length in seconds, `None` when either bound is unknown
    pub fn duration(&self) -> Option<f64> {
        self.bounds().map(|(start, end)| (end - start).max(0.0))
    }

    /// Overlap with `[other_start, other_end]` in seconds; zero when disjoint or unknown
    pub fn overlap_with(&self, other_start: f64, other_end: f64) -> f64 {
        match self.bounds() {
            Some((start, end)) => (end.min(other_end) - start.max(other_start)).max(0.0),
            None => 0.0,
        }
    }

    /// Check the known bounds against the data model
    pub fn validate(&self) -> Result<(), IntervalViolation> {
        for bound in [self.start, self.end].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(IntervalViolation::OutOfRange);
            }
        }
        if let Some((start, end)) = self.bounds() {
            if end < start {
                return Err(IntervalViolation::EndBeforeStart);
            }
        }
        Ok(())
    }
}
