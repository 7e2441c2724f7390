//! Iteration records and the validated trace container produced by the engine.

use serde::{Deserialize, Serialize};

use crate::error::{IterationError, Result};

/// One row of an iteration trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// Zero-based step index; `0` marks the seed record.
    pub iteration: usize,
    /// Value fed into the recurrence.
    pub old_value: f64,
    /// Value returned by the recurrence.
    pub new_value: f64,
}

impl IterationRecord {
    /// Absolute change produced by this step.
    pub fn gap(&self) -> f64 {
        (self.new_value - self.old_value).abs()
    }

    /// Whether this is the seed record anchoring the trace.
    pub fn is_seed(&self) -> bool {
        self.iteration == 0
    }
}

/// Ordered, non-empty sequence of [`IterationRecord`]s starting at a seed.
///
/// Traces are only produced by [`iterate`](crate::solving::iterate) or by
/// [`IterationTrace::from_records`], both of which uphold the chaining and
/// indexing invariants. Deserialization is routed through the same checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IterationRecord>", into = "Vec<IterationRecord>")]
pub struct IterationTrace {
    records: Vec<IterationRecord>,
}

impl IterationTrace {
    /// Starts a trace whose seed holds `initial_value` on both sides.
    pub(crate) fn seeded(initial_value: f64) -> Self {
        Self {
            records: vec![IterationRecord {
                iteration: 0,
                old_value: initial_value,
                new_value: initial_value,
            }],
        }
    }

    /// Appends the next step, chained to the current last value.
    pub(crate) fn push_step(&mut self, new_value: f64) -> &IterationRecord {
        let last = self.last();
        let record = IterationRecord {
            iteration: last.iteration + 1,
            old_value: last.new_value,
            new_value,
        };
        self.records.push(record);
        self.last()
    }

    /// Rebuilds a trace from raw records after validating every invariant.
    pub fn from_records(records: Vec<IterationRecord>) -> Result<Self> {
        let seed = records
            .first()
            .ok_or_else(|| IterationError::malformed(0, "trace must contain a seed record"))?;
        if seed.old_value.to_bits() != seed.new_value.to_bits() {
            return Err(IterationError::malformed(
                0,
                "seed record must repeat its value",
            ));
        }

        for (index, record) in records.iter().enumerate() {
            if record.iteration != index {
                return Err(IterationError::malformed(
                    index,
                    "iteration indices must count up from zero",
                ));
            }
            if !record.old_value.is_finite() || !record.new_value.is_finite() {
                return Err(IterationError::malformed(index, "values must be finite"));
            }
        }

        for (index, pair) in records.windows(2).enumerate() {
            if pair[1].old_value.to_bits() != pair[0].new_value.to_bits() {
                return Err(IterationError::malformed(
                    index + 1,
                    "old value must equal the previous new value",
                ));
            }
        }

        Ok(Self { records })
    }

    /// All records, seed first.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, IterationRecord> {
        self.records.iter()
    }

    /// Number of records, seed included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the trace has no records (never true for a constructed trace).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of recurrence applications (records after the seed).
    pub fn steps(&self) -> usize {
        self.records.len() - 1
    }

    /// The seed record.
    pub fn seed(&self) -> &IterationRecord {
        &self.records[0]
    }

    /// The most recent record.
    pub fn last(&self) -> &IterationRecord {
        &self.records[self.records.len() - 1]
    }

    /// The initial guess the trace started from.
    pub fn initial_value(&self) -> f64 {
        self.seed().new_value
    }

    /// The last value produced by the recurrence.
    pub fn final_value(&self) -> f64 {
        self.last().new_value
    }

    /// Largest `new_value` across all records.
    pub fn max_value(&self) -> f64 {
        self.records
            .iter()
            .map(|record| record.new_value)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Diagnostics describing how the trace ended.
    pub fn summary(&self) -> IterationSummary {
        IterationSummary {
            iterations: self.steps(),
            final_gap: self.last().gap(),
            fixed_point: self.final_value(),
        }
    }

    /// Consumes the trace and returns its records.
    pub fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }
}

impl TryFrom<Vec<IterationRecord>> for IterationTrace {
    type Error = IterationError;

    fn try_from(records: Vec<IterationRecord>) -> Result<Self> {
        Self::from_records(records)
    }
}

impl From<IterationTrace> for Vec<IterationRecord> {
    fn from(trace: IterationTrace) -> Self {
        trace.records
    }
}

impl<'a> IntoIterator for &'a IterationTrace {
    type Item = &'a IterationRecord;
    type IntoIter = std::slice::Iter<'a, IterationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Diagnostics returned alongside a trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationSummary {
    /// Number of recurrence applications performed.
    pub iterations: usize,
    /// Absolute change observed in the final step.
    pub final_gap: f64,
    /// Last value produced, the fixed-point estimate.
    pub fixed_point: f64,
}
