//! Expectation history and its terminal chart
//!
//! The engine appends one total per computation and never reads the
//! history back. The chart plots expectation (rows) against iteration
//! (columns), one marker per recorded value.

use serde::Serialize;

use crate::error::Result;

const LABEL_WIDTH: usize = 12;

/// Appearance of the ASCII trajectory chart
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Plot-area columns; longer histories are subsampled
    pub width: usize,
    /// Plot-area rows
    pub height: usize,
    /// Character drawn for each value
    pub marker: char,
    /// Heading printed above the chart
    pub title: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 12,
            marker: '*',
            title: "Expectation vs iteration".to_string(),
        }
    }
}

impl PlotConfig {
    /// Set the plot-area size
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the marker character
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Set the heading
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Append-only sequence of expectation totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectationHistory {
    values: Vec<f64>,
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    iterations: usize,
    values: &'a [f64],
    best: Option<f64>,
    last: Option<f64>,
}

impl ExpectationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, value: f64) {
        self.values.push(value);
    }

    /// All recorded totals, oldest first
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of recorded computations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent total
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Lowest total seen so far
    pub fn best(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Iterate over recorded totals
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Export as a JSON object with the values and their summary
    pub fn to_json(&self) -> Result<String> {
        let export = HistoryExport {
            iterations: self.len(),
            values: &self.values,
            best: self.best(),
            last: self.last(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Render the trajectory as an ASCII chart
    pub fn render(&self, config: &PlotConfig) -> String {
        render_chart(&self.values, config)
    }
}

fn render_chart(values: &[f64], config: &PlotConfig) -> String {
    let mut out = String::new();
    out.push_str(&config.title);
    out.push('\n');

    let finite: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .collect();
    if finite.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let height = config.height.max(2);
    let columns = config.width.max(1).min(values.len());

    let (mut lo, mut hi) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });
    if hi - lo < 1e-12 {
        let pad = (hi.abs() * 0.1).max(0.5);
        lo -= pad;
        hi += pad;
    }

    let mut grid = vec![vec![' '; columns]; height];
    let last = values.len() - 1;
    for &(i, v) in &finite {
        let col = if last == 0 { 0 } else { i * (columns - 1) / last };
        let row = ((hi - v) / (hi - lo) * (height - 1) as f64).round() as usize;
        grid[row.min(height - 1)][col] = config.marker;
    }

    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{:>w$.6}", hi, w = LABEL_WIDTH)
        } else if r == height - 1 {
            format!("{:>w$.6}", lo, w = LABEL_WIDTH)
        } else {
            " ".repeat(LABEL_WIDTH)
        };
        out.push_str(&label);
        out.push_str(" |");
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&" ".repeat(LABEL_WIDTH));
    out.push_str(" +");
    out.push_str(&"-".repeat(columns));
    out.push('\n');

    out.push_str(&" ".repeat(LABEL_WIDTH + 2));
    if last == 0 {
        out.push('0');
    } else {
        let end = last.to_string();
        out.push('0');
        out.push_str(&format!("{:>w$}", end, w = columns.saturating_sub(1).max(end.len() + 1)));
    }
    out.push('\n');
    out
}
