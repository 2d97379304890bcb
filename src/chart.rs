//! Chart data and terminal rendering
//!
//! A chart slot is a singly-owned mutable resource: any existing instance is
//! dropped before a replacement is installed.

use crate::series::{Sample, Series};

/// Dataset for one line chart: period labels and points, with absent
/// samples rendered as gaps
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub points: Vec<Sample>,
}

impl ChartData {
    pub fn from_series(series: &Series) -> Self {
        Self {
            title: series.label().to_string(),
            labels: series.period_labels().to_vec(),
            points: series.samples().to_vec(),
        }
    }
}

/// Owning wrapper for a chart resource
#[derive(Debug)]
pub struct ChartSlot<C> {
    current: Option<C>,
}

impl<C> ChartSlot<C> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Install a new chart, dropping any existing instance first
    pub fn replace(&mut self, chart: C) -> &C {
        if let Some(old) = self.current.take() {
            drop(old);
        }
        self.current.insert(chart)
    }

    pub fn get(&self) -> Option<&C> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<C> {
        self.current.take()
    }
}

impl<C> Default for ChartSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

const GAP_MARKER: char = '×';
const POINT_MARKER: char = '●';
const AXIS_WIDTH: usize = 12;

/// ASCII line-chart renderer for the terminal
pub struct TermChart {
    rows: usize,
}

impl TermChart {
    pub fn new() -> Self {
        Self { rows: 10 }
    }

    pub fn with_rows(rows: usize) -> Self {
        Self { rows: rows.max(2) }
    }

    /// Render a dataset to a multi-line string; absent points show as a
    /// gap marker on the baseline
    pub fn render(&self, data: &ChartData) -> String {
        let present: Vec<f64> = data.points.iter().flatten().copied().collect();
        if present.is_empty() {
            return format!("{}\n  (no data)\n", data.title);
        }

        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let span = max - min;

        let col_width = data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(3)
            .max(3)
            + 1;
        let width = data.points.len() * col_width;
        let mut grid = vec![vec![' '; width]; self.rows];

        for (i, point) in data.points.iter().enumerate() {
            let col = i * col_width + col_width / 2;
            match point {
                Some(value) => {
                    let row = if span == 0.0 {
                        self.rows / 2
                    } else {
                        ((max - value) / span * (self.rows - 1) as f64).round() as usize
                    };
                    grid[row][col] = POINT_MARKER;
                }
                None => {
                    grid[self.rows - 1][col] = GAP_MARKER;
                }
            }
        }

        let mut out = String::new();
        out.push_str(&data.title);
        out.push('\n');
        for (r, row) in grid.iter().enumerate() {
            let axis = if r == 0 {
                format!("{:>width$.6}", max, width = AXIS_WIDTH)
            } else if r == self.rows - 1 {
                format!("{:>width$.6}", min, width = AXIS_WIDTH)
            } else {
                " ".repeat(AXIS_WIDTH)
            };
            let line: String = row.iter().collect();
            out.push_str(&format!("{} │{}\n", axis, line.trim_end()));
        }
        out.push_str(&format!("{} └{}\n", " ".repeat(AXIS_WIDTH), "─".repeat(width)));

        let mut footer = String::new();
        for label in &data.labels {
            footer.push_str(&format!("{:^width$}", label, width = col_width));
        }
        out.push_str(&format!("{}  {}\n", " ".repeat(AXIS_WIDTH), footer.trim_end()));
        out
    }
}

impl Default for TermChart {
    fn default() -> Self {
        Self::new()
    }
}
