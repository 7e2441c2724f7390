//! Traced fixed-point iteration for annuity-rate equations.
//!
//! The crate solves `r = f(r)` by plain successive substitution and keeps
//! every intermediate step, so the convergence behaviour of different
//! starting guesses can be tabulated and compared. It offers tools to
//!
//! - define scalar recurrences, including the annuity-rate map (`recurrence` module),
//! - iterate them to a tolerance under an explicit iteration cap (`solving` module),
//! - inspect, validate and serialize the resulting traces (`trace` module),
//! - tabulate traces and lay two of them out on shared chart axes
//!   (`table` and `comparison` modules), and
//! - keep a memoized pair of traces that only recompute on new guesses (`session` module).
//!
//! The annuity recurrence is
//! `next = (A / P) * ((1 + r)^n - 1) / (1 + r)^n`
//! with reference constants `A = 50000`, `P = 273400`, `n = 14`. Its stable
//! fixed point attracts both reference guesses `0.08` and `0.22`.
//!
//! # Quick start
//!
//! ```no_run
//! use annuity_fixpoint::comparison::{compare, ComparisonChart, Viewport};
//! use annuity_fixpoint::table::TraceTable;
//! use annuity_fixpoint::{AnnuityRecurrence, IterationOptions};
//!
//! let recurrence = AnnuityRecurrence::default();
//! let options = IterationOptions::default().with_tolerance(1e-5);
//!
//! let (low, high) = compare(&recurrence, 0.08, 0.22, &options).expect("both guesses converge");
//! println!("{}", TraceTable::new(&low));
//! println!("fixed point: {:.5}", high.final_value());
//!
//! let chart = ComparisonChart::new(&low, &high, Viewport::default());
//! for series in chart.series() {
//!     println!("{} ({}): {} points", series.label, series.color.as_str(), series.points.len());
//! }
//! ```
//!
//! Any `Fn(f64) -> f64` is a [`Recurrence`], so the engine is not tied to
//! the annuity equation.

pub mod comparison;
pub mod error;
pub mod options;
pub mod recurrence;
pub mod session;
pub mod solving;
pub mod table;
pub mod trace;

pub use error::{IterationError, Result};
pub use options::{IterationOptions, RecurrenceParameters};
pub use recurrence::{AnnuityRecurrence, Recurrence};
pub use solving::{iterate, iterate_default};
pub use trace::{IterationRecord, IterationSummary, IterationTrace};
