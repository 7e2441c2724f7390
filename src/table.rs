//! Plain-text tabulation of iteration traces.

use std::fmt;

use crate::trace::IterationTrace;

/// Decimal places used for old/new values unless overridden.
pub const DEFAULT_PRECISION: usize = 5;

const HEADERS: [&str; 3] = ["Iteration", "Old Value", "New Value"];

/// A trace formatted as rows of `(iteration, old value, new value)` strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceTable {
    rows: Vec<[String; 3]>,
}

impl TraceTable {
    /// Formats `trace` with five decimal places.
    pub fn new(trace: &IterationTrace) -> Self {
        Self::with_precision(trace, DEFAULT_PRECISION)
    }

    pub fn with_precision(trace: &IterationTrace, precision: usize) -> Self {
        let rows = trace
            .iter()
            .map(|record| {
                [
                    record.iteration.to_string(),
                    format!("{:.precision$}", record.old_value),
                    format!("{:.precision$}", record.new_value),
                ]
            })
            .collect();
        Self { rows }
    }

    pub fn headers(&self) -> [&'static str; 3] {
        HEADERS
    }

    pub fn rows(&self) -> &[[String; 3]] {
        &self.rows
    }

    fn column_widths(&self) -> [usize; 3] {
        let mut widths = HEADERS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        widths
    }
}

impl fmt::Display for TraceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w0, w1, w2] = self.column_widths();
        writeln!(
            f,
            "{:>w0$} | {:>w1$} | {:>w2$}",
            HEADERS[0], HEADERS[1], HEADERS[2]
        )?;
        writeln!(f, "{}-+-{}-+-{}", "-".repeat(w0), "-".repeat(w1), "-".repeat(w2))?;
        for [iteration, old, new] in &self.rows {
            writeln!(f, "{iteration:>w0$} | {old:>w1$} | {new:>w2$}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solving::iterate_default;

    #[test]
    fn rows_use_five_decimals() {
        let trace = iterate_default(0.08).unwrap();
        let table = TraceTable::new(&trace);

        assert_eq!(table.rows().len(), trace.len());
        assert_eq!(table.rows()[0], ["0", "0.08000", "0.08000"].map(String::from));
        assert_eq!(table.rows()[1][1], "0.08000");
        assert_eq!(table.rows()[1][2].len(), "0.00000".len());
    }

    #[test]
    fn display_aligns_columns() {
        let trace = iterate_default(0.22).unwrap();
        let rendered = TraceTable::with_precision(&trace, 3).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Iteration | Old Value | New Value");
        assert_eq!(lines[1], "----------+-----------+----------");
        assert_eq!(lines[2], "        0 |     0.220 |     0.220");
        assert_eq!(lines.len(), trace.len() + 2);
    }
}
