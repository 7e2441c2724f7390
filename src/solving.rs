//! Traced fixed-point iteration.

use log::{debug, trace};

use crate::error::{IterationError, Result};
use crate::options::IterationOptions;
use crate::recurrence::{AnnuityRecurrence, Recurrence};
use crate::trace::IterationTrace;

/// Iterates `recurrence` from `initial_value` until two successive values
/// differ by at most `options.tolerance`, recording every step.
///
/// The returned trace starts with a seed record `(0, initial, initial)` and
/// always contains at least one real step, even when the first application
/// already satisfies the tolerance.
///
/// # Errors
///
/// - [`IterationError::InvalidParameter`] for a non-finite initial value or
///   invalid options, before any step is taken.
/// - [`IterationError::NumericDivergence`] as soon as the recurrence returns
///   NaN or an infinity.
/// - [`IterationError::NonConvergence`] once `options.max_iterations` steps
///   have been taken without meeting the tolerance; the partial trace is
///   attached.
pub fn iterate<R>(
    recurrence: &R,
    initial_value: f64,
    options: &IterationOptions,
) -> Result<IterationTrace>
where
    R: Recurrence + ?Sized,
{
    if !initial_value.is_finite() {
        return Err(IterationError::invalid_parameter(
            "initial_value",
            initial_value,
            "must be finite",
        ));
    }
    options.validate()?;

    let mut steps = IterationTrace::seeded(initial_value);
    let mut previous = initial_value;
    let mut gap = f64::INFINITY;

    for iteration in 1..=options.max_iterations {
        let current = recurrence.apply(previous);
        if !current.is_finite() {
            return Err(IterationError::NumericDivergence {
                iteration,
                input: previous,
            });
        }

        gap = steps.push_step(current).gap();
        trace!("iteration {iteration}: {previous} -> {current} (gap {gap:e})");

        if gap <= options.tolerance {
            debug!(
                "fixed-point iteration from {initial_value} converged to {current} after {iteration} iterations"
            );
            return Ok(steps);
        }
        previous = current;
    }

    Err(IterationError::NonConvergence {
        iterations: options.max_iterations,
        last_gap: gap,
        trace: steps,
    })
}

/// Iterates the reference annuity recurrence with default options.
pub fn iterate_default(initial_value: f64) -> Result<IterationTrace> {
    iterate(
        &AnnuityRecurrence::default(),
        initial_value,
        &IterationOptions::default(),
    )
}
