//! Side-by-side comparison of two traces and the chart geometry derived from them.
//!
//! Nothing here draws. [`ComparisonChart`] turns two traces into a shared
//! domain and two polylines in viewport coordinates, which a renderer can
//! stroke as-is.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::IterationOptions;
use crate::recurrence::Recurrence;
use crate::solving::iterate;
use crate::trace::IterationTrace;

/// Title for the horizontal axis.
pub const X_AXIS_TITLE: &str = "Iterations";

/// Title for the vertical axis.
pub const Y_AXIS_TITLE: &str = "Iterated Value";

/// Iterates the same recurrence from two initial guesses.
///
/// The runs are independent and execute on the rayon pool. When both fail,
/// the error of the first guess is returned.
pub fn compare<R>(
    recurrence: &R,
    first: f64,
    second: f64,
    options: &IterationOptions,
) -> Result<(IterationTrace, IterationTrace)>
where
    R: Recurrence + Sync + ?Sized,
{
    let (a, b) = rayon::join(
        || iterate(recurrence, first, options),
        || iterate(recurrence, second, options),
    );
    Ok((a?, b?))
}

/// Pixel margins around the plotting area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and margins the chart is laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 400.0,
            margin: Margin {
                top: 20.0,
                right: 30.0,
                bottom: 50.0,
                left: 50.0,
            },
        }
    }
}

impl Viewport {
    /// Horizontal pixel range, left to right.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    /// Vertical pixel range, inverted so larger values sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.margin.bottom, self.margin.top)
    }
}

/// Affine map from a data interval onto a pixel interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps `value` into the range. A zero-width domain maps to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Stroke colour assigned to a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColor {
    Blue,
    Red,
}

impl SeriesColor {
    /// CSS colour keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }
}

/// One trace mapped into viewport coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub color: SeriesColor,
    /// Vertices ordered by iteration index.
    pub points: Vec<Point2<f64>>,
}

/// A legend swatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: SeriesColor,
}

/// Shared data domain over both traces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartDomain {
    /// Largest iteration index across both traces.
    pub max_iteration: usize,
    /// Largest `new_value` across both traces.
    pub max_value: f64,
}

impl ChartDomain {
    pub fn from_traces(first: &IterationTrace, second: &IterationTrace) -> Self {
        Self {
            max_iteration: first.last().iteration.max(second.last().iteration),
            max_value: first.max_value().max(second.max_value()),
        }
    }
}

/// Geometry of the overlaid convergence chart for two traces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonChart {
    viewport: Viewport,
    domain: ChartDomain,
    x_scale: LinearScale,
    y_scale: LinearScale,
    series: [Series; 2],
}

impl ComparisonChart {
    /// Lays out both traces on shared axes starting at zero.
    pub fn new(first: &IterationTrace, second: &IterationTrace, viewport: Viewport) -> Self {
        let domain = ChartDomain::from_traces(first, second);
        let x_scale = LinearScale::new((0.0, domain.max_iteration as f64), viewport.x_range());
        let y_scale = LinearScale::new((0.0, domain.max_value), viewport.y_range());

        let project = |trace: &IterationTrace| -> Vec<Point2<f64>> {
            trace
                .iter()
                .map(|record| {
                    Point2::new(
                        x_scale.apply(record.iteration as f64),
                        y_scale.apply(record.new_value),
                    )
                })
                .collect()
        };

        let series = [
            Series {
                label: "Initial Value 1".to_string(),
                color: SeriesColor::Blue,
                points: project(first),
            },
            Series {
                label: "Initial Value 2".to_string(),
                color: SeriesColor::Red,
                points: project(second),
            },
        ];

        Self {
            viewport,
            domain,
            x_scale,
            y_scale,
            series,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn domain(&self) -> &ChartDomain {
        &self.domain
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Both series, first guess first.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Legend entries in series order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|series| LegendEntry {
                label: series.label.clone(),
                color: series.color,
            })
            .collect()
    }
}
