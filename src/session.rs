//! Memoized two-guess comparison that recomputes a trace only when its guess changes.

use log::debug;

use crate::comparison::{ComparisonChart, Viewport};
use crate::error::Result;
use crate::options::IterationOptions;
use crate::recurrence::{AnnuityRecurrence, Recurrence};
use crate::solving::iterate;
use crate::trace::IterationTrace;

/// Initial guess shown in the first slot by default.
pub const DEFAULT_FIRST_GUESS: f64 = 0.08;

/// Initial guess shown in the second slot by default.
pub const DEFAULT_SECOND_GUESS: f64 = 0.22;

/// Which of the two compared guesses an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

#[derive(Debug)]
struct Entry {
    guess: f64,
    outcome: Option<Result<IterationTrace>>,
}

impl Entry {
    fn stale(guess: f64) -> Self {
        Self {
            guess,
            outcome: None,
        }
    }
}

/// Holds two initial guesses and their cached traces.
#[derive(Debug)]
pub struct ComparisonSession<R> {
    recurrence: R,
    options: IterationOptions,
    entries: [Entry; 2],
    recomputations: usize,
}

impl Default for ComparisonSession<AnnuityRecurrence> {
    fn default() -> Self {
        Self::new(
            AnnuityRecurrence::default(),
            IterationOptions::default(),
            DEFAULT_FIRST_GUESS,
            DEFAULT_SECOND_GUESS,
        )
    }
}

impl<R> ComparisonSession<R>
where
    R: Recurrence + Sync,
{
    /// Creates a session; traces are computed lazily on first access.
    pub fn new(recurrence: R, options: IterationOptions, first: f64, second: f64) -> Self {
        Self {
            recurrence,
            options,
            entries: [Entry::stale(first), Entry::stale(second)],
            recomputations: 0,
        }
    }

    pub fn guess(&self, slot: Slot) -> f64 {
        self.entries[slot.index()].guess
    }

    /// Replaces the guess for `slot`, returning whether it actually changed.
    ///
    /// Setting the same value keeps the cached trace.
    pub fn set_guess(&mut self, slot: Slot, guess: f64) -> bool {
        let entry = &mut self.entries[slot.index()];
        if entry.guess.to_bits() == guess.to_bits() {
            return false;
        }
        debug!("{slot:?} guess changed from {} to {guess}", entry.guess);
        *entry = Entry::stale(guess);
        true
    }

    /// Recomputes every slot whose guess changed since the last refresh.
    ///
    /// Returns how many traces were computed.
    pub fn refresh(&mut self) -> usize {
        let recurrence = &self.recurrence;
        let options = &self.options;
        let [first, second] = &mut self.entries;

        let computed = match (first.outcome.is_none(), second.outcome.is_none()) {
            (true, true) => {
                let (a, b) = rayon::join(
                    || iterate(recurrence, first.guess, options),
                    || iterate(recurrence, second.guess, options),
                );
                first.outcome = Some(a);
                second.outcome = Some(b);
                2
            }
            (true, false) => {
                first.outcome = Some(iterate(recurrence, first.guess, options));
                1
            }
            (false, true) => {
                second.outcome = Some(iterate(recurrence, second.guess, options));
                1
            }
            (false, false) => 0,
        };

        if computed > 0 {
            debug!("recomputed {computed} trace(s)");
        }
        self.recomputations += computed;
        computed
    }

    /// Memoized result for `slot`, computing only that slot if stale.
    pub fn outcome(&mut self, slot: Slot) -> &Result<IterationTrace> {
        let entry = &mut self.entries[slot.index()];
        if entry.outcome.is_none() {
            debug!("recomputing {slot:?} trace");
            self.recomputations += 1;
        }
        let guess = entry.guess;
        entry
            .outcome
            .get_or_insert_with(|| iterate(&self.recurrence, guess, &self.options))
    }

    /// Successful trace for `slot`, if the iteration succeeded.
    pub fn trace(&mut self, slot: Slot) -> Option<&IterationTrace> {
        self.outcome(slot).as_ref().ok()
    }

    /// Chart of both traces, or `None` unless both iterations succeeded.
    pub fn chart(&mut self, viewport: Viewport) -> Option<ComparisonChart> {
        self.refresh();
        match (&self.entries[0].outcome, &self.entries[1].outcome) {
            (Some(Ok(first)), Some(Ok(second))) => {
                Some(ComparisonChart::new(first, second, viewport))
            }
            _ => None,
        }
    }

    /// Total number of traces computed over the session's lifetime.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
