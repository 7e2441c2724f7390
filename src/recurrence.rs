//! Scalar recurrences `x -> f(x)` iterated by the engine.

use crate::error::Result;
use crate::options::RecurrenceParameters;

/// A pure scalar map whose fixed point the engine searches for.
///
/// Implemented for any `Fn(f64) -> f64`, so closures can be passed directly.
pub trait Recurrence {
    /// Applies the map once. Returning a non-finite value signals a domain error.
    fn apply(&self, value: f64) -> f64;
}

impl<F> Recurrence for F
where
    F: Fn(f64) -> f64,
{
    fn apply(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Annuity-rate recurrence `next = (A / P) * ((1 + r)^n - 1) / (1 + r)^n`.
///
/// Rates at or below `-1` have no annuity interpretation and evaluate to NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnuityRecurrence {
    params: RecurrenceParameters,
    ratio: f64,
}

impl AnnuityRecurrence {
    /// Creates the recurrence after validating its constants.
    pub fn new(params: RecurrenceParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ratio: params.amount / params.principal,
        })
    }

    /// The constants this recurrence was built from.
    pub fn params(&self) -> &RecurrenceParameters {
        &self.params
    }

    /// Payment-to-principal ratio `A / P`, the supremum of the recurrence.
    pub fn payment_ratio(&self) -> f64 {
        self.ratio
    }
}

impl Default for AnnuityRecurrence {
    fn default() -> Self {
        let params = RecurrenceParameters::default();
        Self {
            params,
            ratio: params.amount / params.principal,
        }
    }
}

impl Recurrence for AnnuityRecurrence {
    fn apply(&self, value: f64) -> f64 {
        let growth = 1.0 + value;
        if growth <= 0.0 {
            return f64::NAN;
        }
        self.ratio * (1.0 - growth.powf(-self.params.periods))
    }
}
