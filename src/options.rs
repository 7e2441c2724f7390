//! Configuration structures for the iteration engine and the annuity recurrence.

use serde::{Deserialize, Serialize};

use crate::error::{IterationError, Result};

/// Absolute tolerance used when none is supplied.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Iteration cap used when none is supplied.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Controls the stopping rule of [`iterate`](crate::solving::iterate).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationOptions {
    /// Absolute change between successive values at or below which iteration stops.
    pub tolerance: f64,
    /// Maximum number of recurrence applications before giving up.
    pub max_iterations: usize,
}

impl Default for IterationOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterationOptions {
    /// Override the convergence tolerance while preserving other defaults.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Override the iteration cap while preserving other defaults.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the options describe a terminating, meaningful stopping rule.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(IterationError::invalid_parameter(
                "tolerance",
                self.tolerance,
                "must be a positive finite number",
            ));
        }
        if self.max_iterations == 0 {
            return Err(IterationError::invalid_parameter(
                "max_iterations",
                0.0,
                "at least one iteration is required",
            ));
        }
        Ok(())
    }
}

/// Constants of the annuity-rate equation `r = (A / P) * (1 - (1 + r)^-n)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceParameters {
    /// Periodic payment `A`.
    pub amount: f64,
    /// Present value `P`.
    pub principal: f64,
    /// Number of periods `n`.
    pub periods: f64,
}

impl Default for RecurrenceParameters {
    fn default() -> Self {
        Self {
            amount: 50_000.0,
            principal: 273_400.0,
            periods: 14.0,
        }
    }
}

impl RecurrenceParameters {
    /// Builds parameters from explicit constants.
    pub fn new(amount: f64, principal: f64, periods: f64) -> Self {
        Self {
            amount,
            principal,
            periods,
        }
    }

    /// Rejects constants for which the recurrence is undefined everywhere.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(IterationError::invalid_parameter(
                "amount",
                self.amount,
                "must be finite",
            ));
        }
        if !self.principal.is_finite() || self.principal == 0.0 {
            return Err(IterationError::invalid_parameter(
                "principal",
                self.principal,
                "must be finite and non-zero",
            ));
        }
        if !self.periods.is_finite() || self.periods <= 0.0 {
            return Err(IterationError::invalid_parameter(
                "periods",
                self.periods,
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}
